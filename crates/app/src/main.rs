mod args;
mod config;
mod terminal;

use std::io;
use std::process::ExitCode;

use quiz_core::assets::AssetTable;
use quiz_core::catalog;
use services::{QuizService, ScoreBoard};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command, print_usage};
use crate::config::AppConfig;
use crate::terminal::Terminal;

/// `RUST_LOG` wins over the configured filter. Logs go to stderr.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn check_assets(config: &AppConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let table = AssetTable::builtin(&config.asset_root);
    let items = catalog::all_items()?;
    let report = table.check(items.iter().map(|(_, item)| item));

    println!(
        "{} images under {}",
        table.len(),
        config.asset_root.display()
    );
    for id in &report.unresolved_items {
        println!("no image for item: {id}");
    }
    for path in &report.missing_files {
        println!("missing file: {}", path.display());
    }

    if report.is_clean() {
        println!("all assets present");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(
            unresolved = report.unresolved_items.len(),
            missing = report.missing_files.len(),
            "asset check failed"
        );
        Ok(ExitCode::from(1))
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::from_env().inspect_err(|_| print_usage())?;
    if args.command == Command::Help {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    let config = AppConfig::resolve(&args)?;
    init_tracing(&config.log_filter);
    tracing::debug!(command = %args.command, ?config, "starting");

    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());
    match args.command {
        Command::Play => {
            let assets = AssetTable::builtin(&config.asset_root);
            let service = QuizService::new(config.settings);
            let board = ScoreBoard::new();
            terminal.play(&service, &board, &assets, args.section, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Learn => {
            let assets = AssetTable::builtin(&config.asset_root);
            terminal.learn(args.section, &assets)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckAssets => check_assets(&config),
        Command::Help => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
