//! 错误类型定义

use thiserror::Error;

/// 对局规则错误
///
/// 全部属于调用方违反前置条件，核心只负责报告，不做重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 不支持的棋盘边长
    #[error("Invalid board size: {size} (supported: {min}..={max})")]
    InvalidSize { size: usize, min: usize, max: usize },

    /// 格子索引越界
    #[error("Index out of range: {index} (board has {len} cells)")]
    IndexOutOfRange { index: usize, len: usize },

    /// 格子已被占用
    #[error("Cell {index} is already occupied")]
    CellOccupied { index: usize },

    /// 没有空格可走
    #[error("No moves available")]
    NoMovesAvailable,

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,

    /// 无效的棋盘记谱字符串
    #[error("Invalid board notation: {reason}")]
    InvalidNotation { reason: String },
}

impl GameError {
    pub(crate) fn invalid_size(size: usize) -> Self {
        GameError::InvalidSize {
            size,
            min: crate::constants::MIN_BOARD_SIZE,
            max: crate::constants::MAX_BOARD_SIZE,
        }
    }
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
