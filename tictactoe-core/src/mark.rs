//! 棋子标记定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// 标记（执子方）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// X（先手）
    X,
    /// O（后手）
    O,
}

impl Mark {
    /// 获取对方标记
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// 获取记谱字符
    pub fn to_char(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// 从记谱字符解析（大小写均可）
    pub fn from_char(c: char) -> Option<Mark> {
        match c {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            _ => None,
        }
    }

    /// 两种标记
    pub fn all() -> [Mark; 2] {
        [Mark::X, Mark::O]
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 空格的记谱字符
pub const EMPTY_CHAR: char = '-';

/// 格子的记谱字符
pub fn cell_char(cell: Option<Mark>) -> char {
    cell.map(|m| m.to_char()).unwrap_or(EMPTY_CHAR)
}
