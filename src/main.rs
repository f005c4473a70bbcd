//! contacts-api entry point
//!
//! Parses arguments, runs the command and exits non-zero on failure. All
//! logic lives in the `cli` module.

use contacts_api::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
