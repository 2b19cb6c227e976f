//! 棋盘记谱格式
//!
//! 类似 FEN 的紧凑表示：各行以 `/` 分隔，`X`/`O` 为标记，`-` 为空格，
//! 数字表示连续空格数。
//!
//! 示例：`XX-/OO-/---` 等价于 `XX1/OO1/3`

use crate::board::Board;
use crate::error::{GameError, Result};
use crate::mark::{cell_char, Mark, EMPTY_CHAR};

/// 记谱格式处理
pub struct Notation;

impl Notation {
    /// 解析记谱字符串为棋盘
    pub fn parse(notation: &str) -> Result<Board> {
        let notation = notation.trim();
        if notation.is_empty() {
            return Err(GameError::InvalidNotation {
                reason: "Empty notation string".to_string(),
            });
        }

        let rows: Vec<&str> = notation.split('/').collect();
        let size = rows.len();
        let mut board = Board::new(size).map_err(|_| GameError::InvalidNotation {
            reason: format!("Unsupported row count: {}", size),
        })?;

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= size {
                    return Err(GameError::InvalidNotation {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(run) = c.to_digit(10) {
                    col += run as usize;
                } else if c == EMPTY_CHAR || c == '.' {
                    col += 1;
                } else if let Some(mark) = Mark::from_char(c) {
                    board.place(row_idx * size + col, mark)?;
                    col += 1;
                } else {
                    return Err(GameError::InvalidNotation {
                        reason: format!("Invalid cell character: {}", c),
                    });
                }
            }

            if col != size {
                return Err(GameError::InvalidNotation {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, size),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘转换为记谱字符串（空格一律写作 `-`）
    pub fn to_string(board: &Board) -> String {
        board
            .cells()
            .chunks(board.size())
            .map(|row| row.iter().map(|&cell| cell_char(cell)).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}
