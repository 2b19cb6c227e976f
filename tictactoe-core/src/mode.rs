//! 对局模式与 AI 难度

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mark::Mark;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单：在空格中均匀随机
    Easy,
    /// 中等：60% 概率走最优解，否则随机
    #[default]
    Medium,
    /// 困难：总是走 minimax 最优解
    Hard,
}

impl Difficulty {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// 对局模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GameMode {
    /// 双人对战
    Pvp,
    /// 人机对战
    Pve {
        difficulty: Difficulty,
        /// AI 执子方
        bot: Mark,
    },
}

impl GameMode {
    /// 指定标记是否由 AI 控制
    pub fn is_bot(&self, mark: Mark) -> bool {
        matches!(self, GameMode::Pve { bot, .. } if *bot == mark)
    }

    /// AI 难度（人机模式）
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            GameMode::Pvp => None,
            GameMode::Pve { difficulty, .. } => Some(*difficulty),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Pve {
            difficulty: Difficulty::default(),
            bot: Mark::O,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("impossible".parse::<Difficulty>().is_err());
        for d in Difficulty::all() {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(*d));
        }
    }

    #[test]
    fn test_mode_bot() {
        let mode = GameMode::Pve {
            difficulty: Difficulty::Hard,
            bot: Mark::X,
        };
        assert!(mode.is_bot(Mark::X));
        assert!(!mode.is_bot(Mark::O));
        assert_eq!(mode.difficulty(), Some(Difficulty::Hard));
        assert!(!GameMode::Pvp.is_bot(Mark::X));
    }

    #[test]
    fn test_mode_json() {
        let mode: GameMode =
            serde_json::from_str(r#"{"type":"pve","difficulty":"easy","bot":"X"}"#).unwrap();
        assert_eq!(
            mode,
            GameMode::Pve {
                difficulty: Difficulty::Easy,
                bot: Mark::X
            }
        );
    }
}
