//! 规则常量定义

/// 支持的最小棋盘边长
pub const MIN_BOARD_SIZE: usize = 3;

/// 支持的最大棋盘边长
pub const MAX_BOARD_SIZE: usize = 6;

/// 默认棋盘边长（经典井字棋）
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// 大棋盘（边长 > 3）的默认搜索深度上限（层）
pub const DEFAULT_DEPTH_CAP: u8 = 4;

/// 胜利基础分，胜负分值为 `WIN_SCORE - 层数` / `层数 - WIN_SCORE`
pub const WIN_SCORE: i32 = 10;

/// 中等难度下选择最优走法的概率
pub const MEDIUM_OPTIMAL_PROBABILITY: f64 = 0.6;

/// 获取指定棋盘边长的连子数
///
/// 3×3、4×4 需要连满整行；5×5、6×6 只需 `size - 1` 连子。
pub fn win_length(size: usize) -> usize {
    if size <= 4 {
        size
    } else {
        size - 1
    }
}

/// 边长是否在支持范围内
pub fn is_supported_size(size: usize) -> bool {
    (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
}
