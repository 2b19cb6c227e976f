//! 连线生成
//!
//! 为给定边长和连子数生成所有可能的获胜连线：
//! 横、竖、主对角线（左上→右下）、副对角线（右上→左下），
//! 连子数小于边长时以滑动窗口覆盖所有起点。

use serde::{Deserialize, Serialize};

use crate::constants::{is_supported_size, win_length};
use crate::error::{GameError, Result};

/// 一条获胜连线（按顺序排列的格子索引）
pub type Line = Vec<usize>;

/// 连线集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSet {
    size: usize,
    win_length: usize,
    lines: Vec<Line>,
}

impl LineSet {
    /// 按边长的默认连子数生成
    pub fn for_size(size: usize) -> Result<Self> {
        if !is_supported_size(size) {
            return Err(GameError::invalid_size(size));
        }
        Ok(Self::generate(size, win_length(size)))
    }

    /// 生成所有长度为 `win_length` 的连线
    ///
    /// 顺序固定：先横后竖，再主对角线、副对角线，各自按起点索引递增。
    /// `win_length` 为 0 或大于 `size` 时结果为空。
    pub fn generate(size: usize, win_length: usize) -> Self {
        let mut lines: Vec<Line> = Vec::new();
        if win_length == 0 || win_length > size {
            return Self {
                size,
                win_length,
                lines,
            };
        }
        let starts = size - win_length + 1;

        // 横
        for row in 0..size {
            for col in 0..starts {
                lines.push((0..win_length).map(|k| row * size + col + k).collect());
            }
        }

        // 竖
        for col in 0..size {
            for row in 0..starts {
                lines.push((0..win_length).map(|k| (row + k) * size + col).collect());
            }
        }

        // 主对角线
        for row in 0..starts {
            for col in 0..starts {
                lines.push((0..win_length).map(|k| (row + k) * size + col + k).collect());
            }
        }

        // 副对角线
        for row in 0..starts {
            for col in (win_length - 1)..size {
                lines.push((0..win_length).map(|k| (row + k) * size + col - k).collect());
            }
        }

        Self {
            size,
            win_length,
            lines,
        }
    }

    /// 连线数量的闭式解：`2·n·(n−w+1) + 2·(n−w+1)²`
    pub fn expected_count(size: usize, win_length: usize) -> usize {
        if win_length == 0 || win_length > size {
            return 0;
        }
        let starts = size - win_length + 1;
        2 * size * starts + 2 * starts * starts
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
