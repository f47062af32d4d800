//! Push Headless Runner
//!
//! Runs the shell against an in-memory screen for testing and automation.
//! Key bytes come from the command line, a file or stdin and are decoded with
//! the selected platform profile; the final screen is printed as a snapshot.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use push_shell::app::Config;
use push_shell::input::{Platform, Replay, ScriptSource};
use push_shell::{Screen, Shell, Snapshot};

#[derive(Parser, Debug)]
#[command(name = "push-headless")]
#[command(version)]
#[command(about = "Run the push shell on an in-memory screen", long_about = None)]
struct Args {
    /// Key bytes to type; `\n` or `\r` submit a line
    keys: Option<String>,

    /// Read key bytes from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "keys")]
    file: Option<PathBuf>,

    /// Screen width
    #[arg(short, long, default_value_t = 40)]
    cols: usize,

    /// Screen height
    #[arg(short, long, default_value_t = 25)]
    rows: usize,

    /// Hardware profile used to decode the key bytes
    #[arg(short, long, value_enum, default_value_t = Platform::Posix)]
    platform: Platform,

    /// Working directory for file commands
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Make `sleep` return immediately
    #[arg(long)]
    no_sleep: bool,

    /// Output snapshot as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    // Read input
    let input_data = match (&args.keys, &args.file) {
        (Some(keys), _) => keys.clone().into_bytes(),
        (None, Some(path)) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        }
    };

    let config = Config {
        platform: args.platform,
        ..Config::default()
    };
    let screen = Screen::new(args.cols, args.rows);
    let mut shell = match args.cwd {
        Some(cwd) => Shell::with_cwd(screen, config, cwd),
        None => Shell::new(screen, config),
    };
    if args.no_sleep {
        shell.session_mut().sleep = |_| {};
    }

    // Run until the script exits, resets or runs dry
    let mut keys = Replay::new(ScriptSource::new(input_data));
    let disposition = shell.run(&mut keys);
    tracing::debug!(?disposition, "Script finished");

    let screen = shell.console();
    if args.json {
        match Snapshot::from_screen(screen).to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        let cursor = screen.cursor();
        println!("Shell State ({}x{}, {}):", args.cols, args.rows, args.platform);
        println!("Cursor: ({}, {})", cursor.row, cursor.col);
        println!("Result: {:?}", disposition);
        println!("---");
        println!("{}", screen.text());
        println!("---");
    }

    ExitCode::SUCCESS
}
