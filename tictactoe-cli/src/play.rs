//! 终端对局控制
//!
//! 负责输入解析、回合调度与 AI 走棋。AI 搜索在阻塞线程池中运行，
//! 思考延迟只属于展示层，落子前重新确认对局状态。

use std::time::Duration;

use anyhow::{Context, Result};
use tictactoe_ai::AiEngine;
use tictactoe_core::{GameMode, Mark, Outcome, Session};
use tracing::{debug, info};

use crate::settings::GameSettings;

/// 玩家输入的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 落子（格子编号从 1 开始）
    Place(usize),
    /// 下一局
    NewGame,
    /// 清空比分重新开始
    ResetMatch,
    /// 切换棋盘大小
    Size(usize),
    /// 显示对局日志
    Log,
    /// 显示比分
    Score,
    /// 导出当前比赛记录
    Export,
    /// 帮助
    Help,
    /// 退出
    Quit,
}

impl Command {
    /// 解析一行输入
    pub fn parse(line: &str) -> Option<Command> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?.to_ascii_lowercase();

        let command = match head.as_str() {
            "new" | "n" => Command::NewGame,
            "reset" => Command::ResetMatch,
            "size" => Command::Size(parts.next()?.parse().ok()?),
            "log" => Command::Log,
            "score" | "scores" => Command::Score,
            "export" | "print" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            number => Command::Place(number.parse().ok()?),
        };

        if parts.next().is_some() {
            return None;
        }
        Some(command)
    }
}

/// 帮助文本
pub const HELP: &str = "\
Commands:
  <n>        mark square n (numbered from 1)
  new        start the next match
  reset      clear scores and match log
  size <n>   switch to an n×n board (3-6)
  log        show the match log
  score      show the scoreboard
  export     print the match record as JSON
  quit       leave the game";

/// 终端对局
pub struct Table {
    session: Session,
    mode: GameMode,
    bot_delay: Duration,
}

impl Table {
    pub fn new(settings: &GameSettings) -> Result<Self> {
        let session = Session::new(settings.board_size, settings.players())
            .context("创建对局失败")?;
        Ok(Self {
            session,
            mode: settings.mode,
            bot_delay: Duration::from_millis(settings.bot_delay_ms),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 当前是否轮到 AI
    pub fn is_bot_turn(&self) -> bool {
        self.session
            .game()
            .current_player()
            .is_some_and(|mark| self.mode.is_bot(mark))
    }

    /// 玩家落子（格子编号从 1 开始）
    pub fn human_move(&mut self, square: usize) -> Result<Outcome> {
        if self.is_bot_turn() {
            anyhow::bail!("现在轮到电脑走棋");
        }
        let index = square.checked_sub(1).context("格子编号从 1 开始")?;
        Ok(self.session.play(index)?)
    }

    /// AI 走棋
    ///
    /// 先在阻塞线程中完成搜索，再等待思考延迟；延迟结束后确认对局仍在进行。
    pub async fn bot_move(&mut self) -> Result<Option<Outcome>> {
        let GameMode::Pve { difficulty, bot } = self.mode else {
            return Ok(None);
        };
        if self.session.game().current_player() != Some(bot) {
            return Ok(None);
        }

        let board = self.session.game().board().clone();
        let lines = self.session.game().lines().clone();
        let started = tokio::time::Instant::now();

        let index = tokio::task::spawn_blocking(move || {
            let mut engine = AiEngine::from_difficulty(difficulty, board.size());
            let index = engine.choose_move(&board, &lines, bot, bot.opponent());
            debug!("AI 搜索节点数: {}", engine.nodes_searched());
            index
        })
        .await
        .context("AI 任务异常退出")??;

        let remaining = self.bot_delay.saturating_sub(started.elapsed());
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }

        if self.session.game().current_player() != Some(bot) {
            return Ok(None);
        }

        info!("AI ({}) 落子: {}", difficulty, index + 1);
        Ok(Some(self.session.play(index)?))
    }

    pub fn new_game(&mut self) -> Result<()> {
        Ok(self.session.new_game()?)
    }

    pub fn reset_match(&mut self) -> Result<()> {
        Ok(self.session.reset_match()?)
    }

    pub fn change_size(&mut self, size: usize) -> Result<()> {
        Ok(self.session.change_size(size)?)
    }

    /// 会话导出为 JSON
    pub fn export(&self) -> Result<String> {
        self.session.to_json().context("导出会话失败")
    }

    /// 棋盘与状态栏
    pub fn render(&self) -> String {
        format!(
            "MATCH {}\n{}\n{}",
            self.session.match_number(),
            self.session.game().board(),
            self.session.status()
        )
    }

    /// 比分
    pub fn render_scores(&self) -> String {
        let scores = self.session.scores();
        format!(
            "{}: {}  {}: {}  Draws: {}",
            self.session.player_name(Mark::X),
            scores.x,
            self.session.player_name(Mark::O),
            scores.o,
            scores.draws
        )
    }

    /// 对局日志（最新在前）
    pub fn render_log(&self) -> String {
        self.session
            .log()
            .entries()
            .iter()
            .map(|entry| entry.display())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 获胜连线的格子编号（从 1 开始）
    pub fn winning_squares(&self) -> Option<Vec<usize>> {
        match self.session.game().phase() {
            tictactoe_core::Phase::Won { line, .. } => Some(line.iter().map(|i| i + 1).collect()),
            _ => None,
        }
    }
}
