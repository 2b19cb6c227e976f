//! 完全搜索的井字棋自对弈测试
//!
//! 3×3 井字棋双方最优时必然和棋；困难 AI 对随机对手不应输棋。

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tictactoe_ai::{random_move, AiConfig, AiEngine, Difficulty};
use tictactoe_core::{Game, Mark, Outcome};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn hard_engine(size: usize, seed: u64) -> AiEngine {
    AiEngine::with_seed(AiConfig::for_board(Difficulty::Hard, size), seed)
}

#[test]
fn test_hard_vs_hard_draws() {
    init_tracing();

    let mut game = Game::new(3).unwrap();
    let mut x = hard_engine(3, 1);
    let mut o = hard_engine(3, 2);
    let mut outcome = Outcome::Ongoing;

    while let Some(mark) = game.current_player() {
        let engine = if mark == Mark::X { &mut x } else { &mut o };
        let before = game.board().clone();
        let index = engine
            .choose_move(game.board(), game.lines(), mark, mark.opponent())
            .unwrap();
        assert_eq!(game.board(), &before, "search must not touch the board");
        outcome = game.apply_move(index).unwrap();
    }

    assert_eq!(outcome, Outcome::Draw);
    assert_eq!(game.moves().len(), 9);
}

#[test]
fn test_hard_never_loses_to_random() {
    init_tracing();

    for seed in 0..20 {
        for bot in Mark::all() {
            let mut game = Game::new(3).unwrap();
            let mut engine = hard_engine(3, seed);
            let mut rng = ChaCha8Rng::seed_from_u64(seed + 1000);
            let mut outcome = Outcome::Ongoing;

            while let Some(mark) = game.current_player() {
                let index = if mark == bot {
                    engine
                        .choose_move(game.board(), game.lines(), bot, bot.opponent())
                        .unwrap()
                } else {
                    random_move(game.board(), &mut rng).unwrap()
                };
                outcome = game.apply_move(index).unwrap();
            }

            assert_ne!(
                outcome.winner(),
                Some(bot.opponent()),
                "bot {} lost with seed {}",
                bot,
                seed
            );
        }
    }
}

#[test]
fn test_capped_search_completes_large_games() {
    init_tracing();

    for size in 4..=5 {
        let mut game = Game::new(size).unwrap();
        let mut engine = hard_engine(size, 9);
        let mut rng = ChaCha8Rng::seed_from_u64(size as u64);

        while let Some(mark) = game.current_player() {
            let index = if mark == Mark::O {
                engine
                    .choose_move(game.board(), game.lines(), Mark::O, Mark::X)
                    .unwrap()
            } else {
                random_move(game.board(), &mut rng).unwrap()
            };
            game.apply_move(index).unwrap();
        }

        assert!(game.is_over());
    }
}
