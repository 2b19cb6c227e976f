//! 井字棋核心规则库
//!
//! 包含:
//! - 标记、棋盘等核心数据结构（3×3 至 6×6）
//! - 获胜连线生成与胜负判定
//! - 对局状态机
//! - 比分与对局日志
//! - 棋盘记谱格式

mod board;
mod constants;
mod error;
mod game;
mod lines;
mod mark;
mod mode;
mod notation;
mod outcome;
mod record;

pub use board::{apply_move, new_board, Board};
pub use constants::*;
pub use error::{GameError, Result};
pub use game::{Game, MoveRecord, Phase};
pub use lines::{Line, LineSet};
pub use mark::{cell_char, Mark, EMPTY_CHAR};
pub use mode::{Difficulty, GameMode};
pub use notation::Notation;
pub use outcome::{evaluate, winner, Outcome};
pub use record::{LogEntry, MatchLog, Players, Scoreboard, Session};
