//! 胜负判定

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::lines::{Line, LineSet};
use crate::mark::Mark;

/// 对局结果
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// 未分胜负，继续对局
    Ongoing,
    /// 一方获胜，附带获胜连线（用于高亮）
    Win { mark: Mark, line: Line },
    /// 和棋
    Draw,
}

impl Outcome {
    /// 获胜方
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// 对局是否已结束
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// 判定棋盘状态
///
/// 按连线集合的固定顺序扫描，返回第一条同色连线；
/// 无人获胜且棋盘已满为和棋，否则继续。只读，不修改棋盘。
pub fn evaluate(board: &Board, lines: &LineSet) -> Outcome {
    for line in lines {
        if let Some(mark) = line_owner(board, line) {
            return Outcome::Win {
                mark,
                line: line.clone(),
            };
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// 连线上所有格子同为某一标记时返回该标记
fn line_owner(board: &Board, line: &Line) -> Option<Mark> {
    let (&first, rest) = line.split_first()?;
    let mark = board.get(first)?;
    rest.iter()
        .all(|&i| board.get(i) == Some(mark))
        .then_some(mark)
}

/// 快速判定：只返回获胜方
pub fn winner(board: &Board, lines: &LineSet) -> Option<Mark> {
    lines.iter().find_map(|line| line_owner(board, line))
}
