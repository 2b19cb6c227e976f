use anyhow::Result;
use tictactoe_cli::{CliArgs, Command, Table, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("tictactoe_cli=info".parse()?))
        .init();

    let settings = CliArgs::parse(std::env::args().skip(1))?.into_settings()?;
    info!("井字棋启动: {}×{}, 模式 {:?}", settings.board_size, settings.board_size, settings.mode);

    let mut table = Table::new(&settings)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP);
    println!("{}", table.render());

    loop {
        if table.is_bot_turn() {
            if table.bot_move().await?.is_some() {
                print_board(&table);
            }
            continue;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                println!("Unrecognised input. Type `help` for commands.");
            }
            continue;
        };

        let result = match command {
            Command::Place(square) => table.human_move(square).map(|_| print_board(&table)),
            Command::NewGame => table.new_game().map(|_| print_board(&table)),
            Command::ResetMatch => table.reset_match().map(|_| print_board(&table)),
            Command::Size(size) => table.change_size(size).map(|_| print_board(&table)),
            Command::Log => {
                println!("{}", table.render_log());
                Ok(())
            }
            Command::Score => {
                println!("{}", table.render_scores());
                Ok(())
            }
            Command::Export => table.export().map(|json| println!("{}", json)),
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = result {
            warn!("{:#}", e);
            println!("{:#}", e);
        }
    }

    println!("{}", table.render_scores());
    Ok(())
}

fn print_board(table: &Table) {
    println!("\n{}", table.render());
    if let Some(squares) = table.winning_squares() {
        println!("Winning line: {:?}", squares);
    }
    if table.session().game().is_over() {
        println!("{}\nType `new` for the next match.", table.render_scores());
    }
}
