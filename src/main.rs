//! Push Shell
//!
//! Interactive shell on the host terminal. Keys are read raw from stdin and
//! the screen is drawn with ANSI cursor addressing.

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use push_shell::app::{CliArgs, Config};
use push_shell::input::Replay;
use push_shell::term::posix::{window_size, RawMode, StdinKeys};
use push_shell::term::AnsiConsole;
use push_shell::{Disposition, Shell};

fn main() -> ExitCode {
    // Logs go to stderr so they never land on the shell's screen
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            eprintln!("push: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let _raw = RawMode::enable()?;

    let (cols, rows) = config.screen.resolve(window_size());
    tracing::debug!(cols, rows, platform = %config.platform, "Starting shell");

    let mut keys = Replay::new(StdinKeys);
    let mut console = AnsiConsole::new(io::stdout(), cols, rows);

    loop {
        let mut shell = Shell::new(console, config.clone());
        let disposition = shell.run(&mut keys);
        console = shell.into_console();

        match disposition {
            Disposition::Reset => {
                tracing::info!("Warm reset");
            }
            Disposition::Exit | Disposition::Continue => break,
        }
    }

    Ok(())
}
