mod app;
mod data;
mod error;
mod input;
mod paths;
mod render;
mod terminal;

use std::fs::{self, File};
use std::path::PathBuf;

use rowscope::GridConfig;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::error::AppError;
use crate::terminal::Terminal;

const INVOICE_COUNT: usize = 10_000;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    init_logging()?;
    let config = load_config()?;

    let mut app = App::new(config, data::generate(INVOICE_COUNT));
    let mut term = Terminal::new()?;
    app.run(&mut term)
}

fn init_logging() -> Result<(), AppError> {
    let path = paths::log_file()
        .filter(|path| path.parent().is_none_or(|dir| fs::create_dir_all(dir).is_ok()))
        .unwrap_or_else(|| PathBuf::from("rowscope-tui.log"));
    let log_file = File::create(&path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;
    log::info!("[main] logging to {}", path.display());
    Ok(())
}

/// Config from the first argument, else the user config file, else defaults
/// sized for a terminal.
fn load_config() -> Result<GridConfig, AppError> {
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let config = match explicit.or_else(|| paths::config_file().filter(|p| p.exists())) {
        Some(path) => {
            log::info!("[main] loading config from {}", path.display());
            GridConfig::load(&path)?
        }
        None => GridConfig::new().overscan(2).column_width_bounds(4.0, 80.0),
    };

    // One terminal line per row.
    if config.row_height != 1.0 {
        log::warn!(
            "[main] row_height {} ignored in the terminal, using 1",
            config.row_height
        );
    }
    Ok(config.row_height(1.0))
}
