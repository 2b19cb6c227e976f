//! 棋盘状态

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::is_supported_size;
use crate::error::{GameError, Result};
use crate::lines::LineSet;
use crate::mark::{cell_char, Mark};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    /// 边长
    size: usize,
    /// size×size 个格子，索引为 row * size + col
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// 创建空棋盘
    pub fn new(size: usize) -> Result<Self> {
        if !is_supported_size(size) {
            return Err(GameError::invalid_size(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// 从格子序列创建棋盘（格子数必须是受支持边长的平方）
    pub fn from_cells(cells: Vec<Option<Mark>>) -> Result<Self> {
        let size = (1..=crate::constants::MAX_BOARD_SIZE)
            .find(|s| s * s == cells.len())
            .ok_or_else(|| GameError::InvalidNotation {
                reason: format!("{} cells is not a square board", cells.len()),
            })?;
        if !is_supported_size(size) {
            return Err(GameError::invalid_size(size));
        }
        Ok(Self { size, cells })
    }

    /// 所有空格落子后的 (索引, 新棋盘)，按索引升序
    pub fn successors(&self, mark: Mark) -> impl Iterator<Item = (usize, Board)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(index, _)| {
                let mut next = self.clone();
                next.cells[index] = Some(mark);
                (index, next)
            })
    }

    /// 边长
    pub fn size(&self) -> usize {
        self.size
    }

    /// 格子总数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 所有格子（按索引顺序）
    pub fn cells(&self) -> &[Option<Mark>] {
        &self.cells
    }

    /// 获取指定格子，越界返回 None
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// 落子
    ///
    /// 只允许从空格变为标记；违反前置条件时棋盘保持不变。
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<()> {
        match self.cells.get(index) {
            None => Err(GameError::IndexOutOfRange {
                index,
                len: self.cells.len(),
            }),
            Some(Some(_)) => Err(GameError::CellOccupied { index }),
            Some(None) => {
                self.cells[index] = Some(mark);
                Ok(())
            }
        }
    }

    /// 落子后的新棋盘（原棋盘不变）
    pub fn with_move(&self, index: usize, mark: Mark) -> Result<Board> {
        let mut next = self.clone();
        next.place(index, mark)?;
        Ok(next)
    }

    /// 是否没有空格
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// 是否全为空格
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// 所有空格的索引（升序）
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// 指定标记的数量
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    /// 索引转 (行, 列)
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// (行, 列) 转索引，越界返回 None
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }
}

/// 反序列化的原始形式，经 [`Board::from_cells`] 校验
#[derive(Deserialize)]
struct BoardRepr {
    size: usize,
    cells: Vec<Option<Mark>>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let board = Board::from_cells(repr.cells)?;
        if board.size != repr.size {
            return Err(GameError::InvalidNotation {
                reason: format!("size {} does not match {} cells", repr.size, board.len()),
            });
        }
        Ok(board)
    }
}

/// 创建新棋盘及其连线集合（开局或切换棋盘大小时调用）
pub fn new_board(size: usize) -> Result<(Board, LineSet)> {
    let board = Board::new(size)?;
    let lines = LineSet::for_size(size)?;
    Ok((board, lines))
}

/// 在棋盘上落子
pub fn apply_move(board: &mut Board, index: usize, mark: Mark) -> Result<()> {
    board.place(index, mark)
}

impl fmt::Display for Board {
    /// 以网格形式输出，空格显示为格子编号（从 1 开始）
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.len().to_string().len();
        for row in 0..self.size {
            if row > 0 {
                let sep = vec!["-".repeat(width + 2); self.size].join("+");
                writeln!(f, "{}", sep)?;
            }
            let line: Vec<String> = (0..self.size)
                .map(|col| {
                    let index = row * self.size + col;
                    match self.cells[index] {
                        Some(mark) => format!(" {:>width$} ", cell_char(Some(mark))),
                        None => format!(" {:>width$} ", index + 1),
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
