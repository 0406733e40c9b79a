//! Simple Banking System CLI
//!
//! Interactive terminal session over a SQLite card store.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --fileName card.s3db
//! cargo run -- --fileName card.s3db --export > accounts.csv
//! RUST_LOG=debug cargo run -- --fileName card.s3db
//! ```
//!
//! The session reads menu choices from stdin and writes prompts to stdout.
//! Log output goes to stderr.
//!
//! # Exit Codes
//!
//! - 0: Session ended normally
//! - 1: Fatal error (store unavailable, storage failure, broken invariant)

use simple_banking::cli;
use simple_banking::io::export_store;
use simple_banking::session::run_session;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays the session transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let config = args.to_config();

    let result = if args.export {
        export_store(&config, &mut std::io::stdout())
    } else {
        let stdin = std::io::stdin();
        run_session(&config, stdin.lock(), std::io::stdout())
    };

    if let Err(e) = result {
        error!(error = %e, "session aborted");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
