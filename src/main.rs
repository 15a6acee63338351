// gridpaths: step-through visualizer for memoized DFS path counting

mod counter;
mod grid;
mod snapshot;
mod ui;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gumdrop::Options;
use log::{LevelFilter, info};
use ratatui::{Terminal, backend::CrosstermBackend};

use counter::{GridConfig, PathCounter};
use counter::constants::{DEFAULT_GRID_SIZE, DEFAULT_STEP_DELAY_MS};
use ui::App;

#[derive(Debug, Options)]
struct Opts {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "cells per side of the grid (default 5)", meta = "N")]
    size: Option<usize>,

    #[options(help = "step delay in milliseconds (default 300)", meta = "MS")]
    delay: Option<u64>,

    #[options(no_short, help = "run to completion without the terminal UI")]
    headless: bool,

    #[options(no_short, help = "with --headless, print every snapshot as a JSON line")]
    trace: bool,

    #[options(no_short, help = "with --headless, do not wait between snapshots")]
    no_wait: bool,

    #[options(no_short, help = "write log output to this file", meta = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse_args_default_or_exit();

    init_logger(&opts)?;

    let size = opts.size.unwrap_or(DEFAULT_GRID_SIZE);
    let delay_ms = opts.delay.unwrap_or(DEFAULT_STEP_DELAY_MS);

    if opts.headless {
        let config = match GridConfig::new(size, Duration::from_millis(delay_ms)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        return run_headless(config, opts.trace, !opts.no_wait);
    }

    let config = match GridConfig::from_input(size, delay_ms) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", Opts::usage());
            std::process::exit(1);
        }
    };

    info!(
        "starting TUI with a {}x{} grid and {}ms delay",
        config.grid_size(),
        config.grid_size(),
        config.step_delay_ms()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(PathCounter::new(config));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Route `log` output: to `--log-file` if given, to stderr in headless mode,
/// nowhere otherwise (the TUI owns the terminal)
fn init_logger(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );

    if let Some(path) = &opts.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !opts.headless {
        builder.filter_level(LevelFilter::Off);
    }

    builder.init();
    Ok(())
}

/// Drive a run to completion on stdout, optionally sleeping for each pause
fn run_headless(
    config: GridConfig,
    trace: bool,
    wait: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut counter = PathCounter::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;

    let total = counter.run(|step| {
        if trace && write_error.is_none() {
            let line = serde_json::to_string(&step.snapshot)
                .map_err(io::Error::from)
                .and_then(|json| writeln!(out, "{}", json));
            if let Err(e) = line {
                write_error = Some(e);
            }
        }
        if wait && !step.pause.is_zero() {
            std::thread::sleep(step.pause);
        }
    });

    if let Some(e) = write_error {
        return Err(e.into());
    }

    let goal = grid::Grid::new(config.grid_size()).goal();
    writeln!(
        out,
        "Paths from (0, 0) to {} on a {}x{} grid: {}",
        goal,
        config.grid_size(),
        config.grid_size(),
        total
    )?;
    Ok(())
}
