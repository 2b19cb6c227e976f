//! 井字棋 AI 引擎
//!
//! 包含:
//! - Minimax + Alpha-Beta 搜索（小棋盘完全搜索，大棋盘限制深度）
//! - 按难度分级的走法选择
//! - 随机走法

mod random;
mod search;

pub use random::random_move;
pub use search::{
    choose_move, AiConfig, AiEngine, Difficulty, SearchResult, DEFAULT_TIME_LIMIT_MS,
};
