//! 游戏设置模块
//!
//! 设置文件（JSON）与命令行参数，命令行优先。设置只读，不会写回。

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tictactoe_core::{is_supported_size, Difficulty, GameMode, Mark, Players, DEFAULT_BOARD_SIZE};

/// AI 默认思考延迟（毫秒）
pub const DEFAULT_BOT_DELAY_MS: u64 = 500;

/// 游戏设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// 棋盘边长
    pub board_size: usize,
    /// 对局模式
    pub mode: GameMode,
    /// X 方玩家名
    pub player_x: String,
    /// O 方玩家名
    pub player_o: String,
    /// AI 落子前的停顿（毫秒）
    pub bot_delay_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            mode: GameMode::default(),
            player_x: String::new(),
            player_o: String::new(),
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
        }
    }
}

impl GameSettings {
    /// 从文件加载设置，文件不存在或无效时使用默认设置
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置: {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("已加载设置: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("设置文件格式无效: {}，使用默认设置", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("无法读取设置文件: {}，使用默认设置", e);
                Self::default()
            }
        }
    }

    /// 玩家名
    pub fn players(&self) -> Players {
        let mut players = Players::new(self.player_x.clone(), self.player_o.clone());
        if let GameMode::Pve { difficulty, bot } = self.mode {
            let bot_name = format!("Computer ({})", difficulty);
            match bot {
                Mark::X if players.x.trim().is_empty() => players.x = bot_name,
                Mark::O if players.o.trim().is_empty() => players.o = bot_name,
                _ => {}
            }
        }
        players
    }

    /// 校验设置
    pub fn validate(&self) -> Result<()> {
        if !is_supported_size(self.board_size) {
            bail!("不支持的棋盘大小: {}", self.board_size);
        }
        Ok(())
    }
}

/// 命令行参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub size: Option<usize>,
    pub difficulty: Option<Difficulty>,
    pub pvp: bool,
    pub bot_first: bool,
    pub delay_ms: Option<u64>,
}

impl CliArgs {
    /// 解析参数（不含程序名）
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config 需要文件路径")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--size" => {
                    let value = args.next().context("--size 需要数值")?;
                    parsed.size = Some(
                        value
                            .parse::<usize>()
                            .with_context(|| format!("无效的棋盘大小: {}", value))?,
                    );
                }
                "--difficulty" => {
                    let value = args.next().context("--difficulty 需要 easy/medium/hard")?;
                    parsed.difficulty =
                        Some(value.parse::<Difficulty>().map_err(anyhow::Error::msg)?);
                }
                "--delay" => {
                    let value = args.next().context("--delay 需要毫秒数")?;
                    parsed.delay_ms = Some(
                        value
                            .parse::<u64>()
                            .with_context(|| format!("无效的延迟: {}", value))?,
                    );
                }
                "--pvp" => parsed.pvp = true,
                "--bot-first" => parsed.bot_first = true,
                other => bail!("未知参数: {}", other),
            }
        }

        Ok(parsed)
    }

    /// 加载设置文件并用命令行参数覆盖
    pub fn into_settings(self) -> Result<GameSettings> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::load(path),
            None => GameSettings::default(),
        };

        if let Some(size) = self.size {
            settings.board_size = size;
        }
        if let Some(delay) = self.delay_ms {
            settings.bot_delay_ms = delay;
        }

        if self.pvp {
            settings.mode = GameMode::Pvp;
        } else if self.difficulty.is_some() || self.bot_first {
            let (difficulty, bot) = match settings.mode {
                GameMode::Pve { difficulty, bot } => (difficulty, bot),
                GameMode::Pvp => (Difficulty::default(), Mark::O),
            };
            settings.mode = GameMode::Pve {
                difficulty: self.difficulty.unwrap_or(difficulty),
                bot: if self.bot_first { Mark::X } else { bot },
            };
        }

        settings.validate()?;
        Ok(settings)
    }
}
