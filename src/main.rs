//! Carelink entry point
//!
//! Parses arguments, dispatches to the selected command, prints any error
//! to stderr, and exits non-zero on failure. All logic lives in the CLI
//! module; nothing here loads configuration or touches a data store.

use carelink::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
