//! 比赛记录
//!
//! 多局比赛的比分、局数与对局日志。全部为显式状态，由调用方持有。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::game::Game;
use crate::mark::Mark;
use crate::outcome::Outcome;

/// 比分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub x: u32,
    pub o: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// 记录一局结果（未结束的对局不计分）
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => self.x += 1,
            Outcome::Win { mark: Mark::O, .. } => self.o += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
    }

    /// 指定方的胜局数
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    pub fn total(&self) -> u32 {
        self.x + self.o + self.draws
    }
}

/// 日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            text: text.into(),
        }
    }

    /// 带时间前缀的显示文本，如 `[14:03:27] ...`
    pub fn display(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.text)
    }
}

/// 对局日志（最新条目在前）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchLog {
    entries: Vec<LogEntry>,
}

impl MatchLog {
    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.insert(0, LogEntry::new(text));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 双方玩家名
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub x: String,
    pub o: String,
}

impl Players {
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// 玩家名，空白时回退为 `Player X` / `Player O`
    pub fn name(&self, mark: Mark) -> String {
        let name = match mark {
            Mark::X => self.x.trim(),
            Mark::O => self.o.trim(),
        };
        if name.is_empty() {
            format!("Player {}", mark)
        } else {
            name.to_string()
        }
    }
}

/// 一场比赛（多局）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub players: Players,
    scores: Scoreboard,
    match_number: u32,
    log: MatchLog,
    game: Game,
}

impl Session {
    /// 开始新比赛，第 1 局
    pub fn new(size: usize, players: Players) -> Result<Self> {
        let mut session = Self {
            players,
            scores: Scoreboard::default(),
            match_number: 1,
            log: MatchLog::default(),
            game: Game::new(size)?,
        };
        session.log_commence();
        Ok(session)
    }

    /// 当前方落子；对局结束时记录比分和日志
    pub fn play(&mut self, index: usize) -> Result<Outcome> {
        let mark = self.game.current_player();
        let outcome = self.game.apply_move(index)?;

        if let Some(mark) = mark {
            self.log
                .push(format!("{} marked square {}.", self.players.name(mark), index + 1));
        }

        if outcome.is_over() {
            self.scores.record(&outcome);
            self.log
                .push(format!("--- MATCH {} CONCLUDED ---", self.match_number));
            match outcome.winner() {
                Some(winner) => {
                    let name = self.players.name(winner);
                    info!("第 {} 局结束，{} 获胜", self.match_number, name);
                    self.log.push(format!("{} claims the field.", name));
                }
                None => {
                    info!("第 {} 局结束，和棋", self.match_number);
                    self.log.push("Neither side gains the advantage.");
                }
            }
        }

        Ok(outcome)
    }

    /// 下一局（保留比分，局数 +1）
    pub fn new_game(&mut self) -> Result<()> {
        self.game.reset(self.game.size())?;
        self.match_number += 1;
        self.log_commence();
        Ok(())
    }

    /// 切换棋盘大小并开始下一局
    pub fn change_size(&mut self, size: usize) -> Result<()> {
        self.game.reset(size)?;
        self.match_number += 1;
        self.log_commence();
        Ok(())
    }

    /// 清空比分与日志，从第 1 局重新开始
    pub fn reset_match(&mut self) -> Result<()> {
        self.game.reset(self.game.size())?;
        self.scores = Scoreboard::default();
        self.match_number = 1;
        self.log.clear();
        self.log_commence();
        Ok(())
    }

    fn log_commence(&mut self) {
        info!("第 {} 局开始", self.match_number);
        self.log
            .push(format!("--- MATCH {} COMMENCES ---", self.match_number));
    }

    /// 状态栏文本
    pub fn status(&self) -> String {
        match self.game.current_player() {
            Some(mark) => format!("{} TO MOVE", self.players.name(mark).to_uppercase()),
            None => match self.game.phase() {
                crate::game::Phase::Won { mark, .. } => {
                    format!("VICTORY FOR {}!", self.players.name(*mark).to_uppercase())
                }
                _ => "A DRAW! WELL CONTESTED.".to_string(),
            },
        }
    }

    pub fn player_name(&self, mark: Mark) -> String {
        self.players.name(mark)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn match_number(&self) -> u32 {
        self.match_number
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    /// 导出为 JSON（仅用于展示，不做持久化）
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
