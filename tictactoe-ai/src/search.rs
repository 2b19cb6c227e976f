//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，带深度与时间上限

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tictactoe_core::{
    winner, Board, GameError, LineSet, Mark, Result, DEFAULT_DEPTH_CAP,
    MEDIUM_OPTIMAL_PROBABILITY, WIN_SCORE,
};
use tracing::debug;

use crate::random::random_move;

// 重导出 Difficulty 以便外部使用
pub use tictactoe_core::Difficulty;

/// 默认单次搜索时间上限（毫秒）
pub const DEFAULT_TIME_LIMIT_MS: u64 = 5000;

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 搜索深度上限（层），None 表示搜到终局
    pub max_depth: Option<u8>,
    pub time_limit_ms: u64,
    /// 走最优解的概率，仅对 Medium 生效
    pub optimal_probability: f64,
}

impl AiConfig {
    /// 按难度和棋盘边长生成配置：3×3 完全搜索，更大的棋盘限制 4 层
    pub fn for_board(difficulty: Difficulty, size: usize) -> Self {
        Self {
            difficulty,
            max_depth: if size <= 3 { None } else { Some(DEFAULT_DEPTH_CAP) },
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            optimal_probability: MEDIUM_OPTIMAL_PROBABILITY,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::for_board(Difficulty::Medium, tictactoe_core::DEFAULT_BOARD_SIZE)
    }
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 选中的格子索引
    pub index: usize,
    /// 以 AI 视角的分值
    pub score: i32,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎（随机种子取自系统熵）
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
            nodes_searched: 0,
        }
    }

    /// 使用固定种子创建（结果可复现）
    pub fn with_seed(config: AiConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            nodes_searched: 0,
        }
    }

    /// 从难度和棋盘边长创建
    pub fn from_difficulty(difficulty: Difficulty, size: usize) -> Self {
        Self::new(AiConfig::for_board(difficulty, size))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 按难度选择走法
    ///
    /// 棋盘只读；已分胜负或没有空格时返回错误。
    pub fn choose_move(
        &mut self,
        board: &Board,
        lines: &LineSet,
        bot: Mark,
        opponent: Mark,
    ) -> Result<usize> {
        Self::check_playable(board, lines)?;

        let play_optimal = match self.config.difficulty {
            Difficulty::Easy => false,
            Difficulty::Hard => true,
            Difficulty::Medium => self
                .rng
                .gen_bool(self.config.optimal_probability.clamp(0.0, 1.0)),
        };

        if play_optimal {
            Ok(self.best_move(board, lines, bot, opponent)?.index)
        } else {
            let index = random_move(board, &mut self.rng).ok_or(GameError::NoMovesAvailable)?;
            debug!("随机走法: {}", index);
            Ok(index)
        }
    }

    /// 搜索最佳走法
    ///
    /// 分值相同时取索引最小的走法。
    pub fn best_move(
        &mut self,
        board: &Board,
        lines: &LineSet,
        bot: Mark,
        opponent: Mark,
    ) -> Result<SearchResult> {
        Self::check_playable(board, lines)?;

        self.nodes_searched = 0;
        let started = Instant::now();
        let deadline = started + Duration::from_millis(self.config.time_limit_ms);

        let mut best: Option<SearchResult> = None;
        let mut alpha = i32::MIN;

        for (index, child) in board.successors(bot) {
            // 超时也至少完成第一个走法
            if best.is_some() && Instant::now() >= deadline {
                break;
            }

            let score = self.minimax(
                &child,
                lines,
                0,
                false,
                alpha,
                i32::MAX,
                bot,
                opponent,
                &deadline,
            );

            if best.map_or(true, |b| score > b.score) {
                best = Some(SearchResult { index, score });
            }
            alpha = alpha.max(score);
        }

        let best = best.ok_or(GameError::NoMovesAvailable)?;

        debug!(
            "搜索完成: 走法 {} 分数 {} 节点 {} 用时 {:?}",
            best.index,
            best.score,
            self.nodes_searched,
            started.elapsed()
        );

        Ok(best)
    }

    /// Minimax 搜索
    ///
    /// `depth` 为根走法之后已展开的层数。AI 胜得 `WIN_SCORE - depth`，
    /// 对手胜得 `depth - WIN_SCORE`，和棋、到达深度上限或超时得 0。
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &Board,
        lines: &LineSet,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        bot: Mark,
        opponent: Mark,
        deadline: &Instant,
    ) -> i32 {
        self.nodes_searched += 1;

        match winner(board, lines) {
            Some(mark) if mark == bot => return WIN_SCORE - depth as i32,
            Some(_) => return depth as i32 - WIN_SCORE,
            None => {}
        }

        if board.is_full() {
            return 0;
        }

        // 到达深度上限，按和棋近似
        if let Some(max_depth) = self.config.max_depth {
            if depth + 1 >= max_depth {
                return 0;
            }
        }

        if Instant::now() >= *deadline {
            return 0;
        }

        let mark = if maximizing { bot } else { opponent };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for (_, child) in board.successors(mark) {
            let score = self.minimax(
                &child,
                lines,
                depth + 1,
                !maximizing,
                alpha,
                beta,
                bot,
                opponent,
                deadline,
            );

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break; // Alpha-Beta 剪枝
            }
        }

        best
    }

    fn check_playable(board: &Board, lines: &LineSet) -> Result<()> {
        if winner(board, lines).is_some() {
            return Err(GameError::GameOver);
        }
        if board.is_full() {
            return Err(GameError::NoMovesAvailable);
        }
        Ok(())
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 按难度为 `bot` 选择走法（一次性调用，不保留任何状态）
pub fn choose_move(
    board: &Board,
    lines: &LineSet,
    difficulty: Difficulty,
    bot: Mark,
    opponent: Mark,
) -> Result<usize> {
    AiEngine::from_difficulty(difficulty, board.size()).choose_move(board, lines, bot, opponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{evaluate, Notation, Outcome};

    fn setup(notation: &str) -> (Board, LineSet) {
        let board = Notation::parse(notation).unwrap();
        let lines = LineSet::for_size(board.size()).unwrap();
        (board, lines)
    }

    fn hard(size: usize) -> AiEngine {
        AiEngine::with_seed(AiConfig::for_board(Difficulty::Hard, size), 7)
    }

    #[test]
    fn test_completes_top_row() {
        let (mut board, lines) = setup("XX-/OO-/---");
        let mut engine = hard(3);

        let result = engine.best_move(&board, &lines, Mark::X, Mark::O).unwrap();
        assert_eq!(result.index, 2);
        assert_eq!(result.score, WIN_SCORE);

        board.place(result.index, Mark::X).unwrap();
        assert_eq!(
            evaluate(&board, &lines),
            Outcome::Win {
                mark: Mark::X,
                line: vec![0, 1, 2]
            }
        );
    }

    #[test]
    fn test_blocks_opponent() {
        // O 威胁 8（对角线），X 没有一步胜
        let (board, lines) = setup("O-X/-O-/X--");
        let mut engine = hard(3);
        let index = engine.choose_move(&board, &lines, Mark::X, Mark::O).unwrap();
        assert_eq!(index, 8);
    }

    #[test]
    fn test_prefers_faster_win() {
        // 3 和 6 都能形成双杀（三层后必胜），8 直接获胜
        let (board, lines) = setup("XOO/-X-/---");
        let mut engine = hard(3);

        for slower in [3, 6] {
            let child = board.with_move(slower, Mark::X).unwrap();
            let mut search = hard(3);
            let deadline = Instant::now() + Duration::from_secs(60);
            let score = search.minimax(
                &child,
                &lines,
                0,
                false,
                i32::MIN,
                i32::MAX,
                Mark::X,
                Mark::O,
                &deadline,
            );
            assert_eq!(
                score,
                WIN_SCORE - 2,
                "move {} should force a win in three plies",
                slower
            );
        }

        let result = engine.best_move(&board, &lines, Mark::X, Mark::O).unwrap();
        assert_eq!(result.index, 8);
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_prefers_slower_loss() {
        // O 已必败：不堵 8 则下一步就输，堵 8 后 X 走 6 形成双杀，第三层才输
        let (board, lines) = setup("XO-/-X-/---");
        let mut engine = hard(3);
        let result = engine.best_move(&board, &lines, Mark::O, Mark::X).unwrap();
        assert_eq!(result.index, 8);
        assert_eq!(result.score, 3 - WIN_SCORE);
    }

    #[test]
    fn test_expired_deadline_still_searches() {
        let (board, lines) = setup("---/---/---");
        let config = AiConfig {
            time_limit_ms: 0,
            ..AiConfig::for_board(Difficulty::Hard, 3)
        };
        let mut engine = AiEngine::with_seed(config, 7);

        // 第一个走法照常展开，其余节点按超时记 0
        let result = engine.best_move(&board, &lines, Mark::X, Mark::O).unwrap();
        assert_eq!(result, SearchResult { index: 0, score: 0 });
        assert_eq!(engine.nodes_searched(), 1);
    }

    #[test]
    fn test_depth_cap_boundary() {
        // 4×4 上限 4 层：depth 3 是最后一个会判胜负的节点
        let mut engine = hard(4);
        let deadline = Instant::now() + Duration::from_secs(60);
        let mut score = |notation: &str, depth: u8, maximizing: bool| {
            let (board, lines) = setup(notation);
            engine.minimax(
                &board,
                &lines,
                depth,
                maximizing,
                i32::MIN,
                i32::MAX,
                Mark::X,
                Mark::O,
                &deadline,
            )
        };

        // 已成四连的局面在上限处仍计胜
        assert_eq!(score("XXXX/OOO-/----/----", 3, false), WIN_SCORE - 3);
        // 上限处不再展开，X 的一步胜看不到
        assert_eq!(score("XXX-/OOO-/----/----", 3, true), 0);
        // 提前一层就能看到
        assert_eq!(score("XXX-/OOO-/----/----", 2, true), WIN_SCORE - 3);
    }

    #[test]
    fn test_board_unchanged_after_search() {
        let (board, lines) = setup("X--/-O-/---");
        let before = board.clone();
        for difficulty in Difficulty::all() {
            let mut engine = AiEngine::with_seed(AiConfig::for_board(*difficulty, 3), 1);
            let index = engine.choose_move(&board, &lines, Mark::X, Mark::O).unwrap();
            assert!(board.get(index).is_none());
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_easy_single_empty_cell() {
        let (board, lines) = setup("XOX/OXO/OX-");
        for seed in 0..20 {
            let mut engine = AiEngine::with_seed(AiConfig::for_board(Difficulty::Easy, 3), seed);
            assert_eq!(engine.choose_move(&board, &lines, Mark::O, Mark::X).unwrap(), 8);
        }
    }

    #[test]
    fn test_easy_picks_empty_cells() {
        let (board, lines) = setup("X-O/---/O-X");
        let mut engine = AiEngine::with_seed(AiConfig::for_board(Difficulty::Easy, 3), 3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let index = engine.choose_move(&board, &lines, Mark::X, Mark::O).unwrap();
            assert!(board.get(index).is_none());
            seen.insert(index);
        }
        assert_eq!(seen.len(), board.empty_cells().len());
    }

    #[test]
    fn test_medium_mixes_optimal_and_random() {
        let (board, lines) = setup("XX-/OO-/---");
        let mut engine = AiEngine::with_seed(AiConfig::for_board(Difficulty::Medium, 3), 42);
        let trials = 2000;
        let mut optimal = 0;
        for _ in 0..trials {
            if engine.choose_move(&board, &lines, Mark::X, Mark::O).unwrap() == 2 {
                optimal += 1;
            }
        }
        // 0.6 + 0.4 × 1/5 = 0.68
        let rate = optimal as f64 / trials as f64;
        assert!(rate > 0.62 && rate < 0.74, "optimal rate {}", rate);
    }

    #[test]
    fn test_full_board_is_error() {
        let (board, lines) = setup("XOX/OXO/OXO");
        let mut engine = hard(3);
        assert_eq!(
            engine.choose_move(&board, &lines, Mark::X, Mark::O),
            Err(GameError::NoMovesAvailable)
        );
    }

    #[test]
    fn test_decided_board_is_error() {
        let (board, lines) = setup("XXX/OO-/---");
        let mut engine = hard(3);
        assert_eq!(
            engine.best_move(&board, &lines, Mark::O, Mark::X),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_large_board_takes_win() {
        let (board, lines) = setup("XXX-/OOO-/----/----");
        let mut engine = hard(4);
        assert_eq!(engine.choose_move(&board, &lines, Mark::X, Mark::O).unwrap(), 3);
    }

    #[test]
    fn test_large_board_blocks() {
        let (board, lines) = setup("XX--/OOO-/X---/----");
        let mut engine = hard(4);
        assert_eq!(engine.choose_move(&board, &lines, Mark::X, Mark::O).unwrap(), 7);
    }

    #[test]
    fn test_six_by_six_depth_capped() {
        let (board, lines) = setup("6/6/2X3/3O2/6/6");
        let mut engine = hard(6);
        let result = engine.best_move(&board, &lines, Mark::X, Mark::O).unwrap();
        assert!(board.get(result.index).is_none());
        // 四层内无人能成五连，只能按和棋近似
        assert_eq!(result.score, 0);
        assert!(engine.nodes_searched() > 0);
    }

    #[test]
    fn test_difficulty_config() {
        let small = AiConfig::for_board(Difficulty::Hard, 3);
        assert_eq!(small.max_depth, None);

        let large = AiConfig::for_board(Difficulty::Hard, 5);
        assert_eq!(large.max_depth, Some(DEFAULT_DEPTH_CAP));

        let medium = AiConfig::default();
        assert_eq!(medium.difficulty, Difficulty::Medium);
        assert!((medium.optimal_probability - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_free_choose_move() {
        let (board, lines) = setup("XX-/OO-/---");
        let index = choose_move(&board, &lines, Difficulty::Hard, Mark::X, Mark::O).unwrap();
        assert_eq!(index, 2);
    }
}
