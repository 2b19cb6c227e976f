//! 对局控制
//!
//! 状态机：`AwaitingMove(p)` → 判定 → `AwaitingMove(对方)` / `Won` / `Drawn`。
//! `Won`、`Drawn` 为终止状态，只能通过 [`Game::reset`] 重新开局。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::error::{GameError, Result};
use crate::lines::{Line, LineSet};
use crate::mark::Mark;
use crate::outcome::{evaluate, Outcome};

/// 对局阶段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// 等待某方落子
    AwaitingMove(Mark),
    /// 某方获胜
    Won { mark: Mark, line: Line },
    /// 和棋
    Drawn,
}

impl Phase {
    pub fn is_over(&self) -> bool {
        !matches!(self, Phase::AwaitingMove(_))
    }
}

/// 走法记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub index: usize,
    pub mark: Mark,
}

/// 一局对局
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    lines: LineSet,
    phase: Phase,
    moves: Vec<MoveRecord>,
}

impl Game {
    /// 新开一局，X 先手
    pub fn new(size: usize) -> Result<Self> {
        let (board, lines) = crate::board::new_board(size)?;
        Ok(Self {
            board,
            lines,
            phase: Phase::AwaitingMove(Mark::X),
            moves: Vec::new(),
        })
    }

    /// 当前方落子并判定结果
    pub fn apply_move(&mut self, index: usize) -> Result<Outcome> {
        let mark = self.current_player().ok_or(GameError::GameOver)?;
        self.board.place(index, mark)?;
        self.moves.push(MoveRecord { index, mark });

        let outcome = evaluate(&self.board, &self.lines);
        self.phase = match &outcome {
            Outcome::Ongoing => Phase::AwaitingMove(mark.opponent()),
            Outcome::Win { mark, line } => Phase::Won {
                mark: *mark,
                line: line.clone(),
            },
            Outcome::Draw => Phase::Drawn,
        };
        debug!("{} -> {}: {:?}", mark, index, self.phase);

        Ok(outcome)
    }

    /// 重新开局（可改变棋盘大小）
    pub fn reset(&mut self, size: usize) -> Result<()> {
        *self = Self::new(size)?;
        Ok(())
    }

    /// 当前走子方，对局结束时为 None
    pub fn current_player(&self) -> Option<Mark> {
        match self.phase {
            Phase::AwaitingMove(mark) => Some(mark),
            _ => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn lines(&self) -> &LineSet {
        &self.lines
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }
}
