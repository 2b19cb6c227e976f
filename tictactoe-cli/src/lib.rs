//! 井字棋终端客户端
//!
//! 包含:
//! - 设置文件与命令行参数
//! - 终端回合控制与 AI 调度

pub mod play;
pub mod settings;

pub use play::{Command, Table, HELP};
pub use settings::{CliArgs, GameSettings};
