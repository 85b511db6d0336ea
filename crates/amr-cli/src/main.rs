use amr_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = Cli::parse_or_exit();
    match cli.run().await {
        Ok(exit) => std::process::exit(exit.code()),
        Err(err) => {
            eprintln!("amr error: {:#}", err);
            std::process::exit(1);
        }
    }
}
