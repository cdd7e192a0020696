//! # Stockbook Console Library
//!
//! Line-oriented front end for `stockbook-core`. `main.rs` only calls
//! [`run`]; everything else lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! stockbook_console/
//! ├── lib.rs        ◄─── You are here (logging setup & run)
//! ├── config.rs     ◄─── STOCKBOOK_* environment settings
//! ├── command.rs    ◄─── Input line → Command
//! ├── shell.rs      ◄─── Command execution & read loop
//! ├── state.rs      ◄─── Inventory behind Arc<Mutex<_>>
//! ├── render.rs     ◄─── Text tables for reports
//! └── error.rs      ◄─── AppError { code, message }
//! ```
//!
//! ## Streams
//! Command output goes to stdout, logs go to stderr, so piping the
//! shell's output never mixes in log lines.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::io::{self, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::shell::Shell;
use crate::state::InventoryState;

/// Runs the interactive shell on stdin/stdout.
///
/// ## Startup Sequence
/// 1. Load configuration from the environment
/// 2. Initialize logging
/// 3. Create an empty inventory
/// 4. Print the banner and read commands until EOF or `quit`
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    init_tracing(&config);

    info!(store = %config.store_name, "Starting Stockbook console");

    let today = chrono::Local::now().date_naive();
    let shell = Shell::new(InventoryState::new(), config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "{} inventory ({}). Type 'help' for commands.",
        shell.config().store_name,
        today
    )?;
    out.flush()?;

    shell.run(stdin.lock(), &mut out, today)?;

    info!("Stockbook console stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - then `STOCKBOOK_LOG`
/// - Default: `info,stockbook=debug`
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
