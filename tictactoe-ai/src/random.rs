//! 随机走法

use rand::seq::SliceRandom;
use rand::Rng;
use tictactoe_core::Board;

/// 在所有空格中均匀随机选择一个，棋盘已满时返回 None
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.empty_cells().choose(rng).copied()
}
