use clap::Parser;

mod cli;
mod commands;
mod error;

use cli::Cli;
pub use error::AppError;

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = cli.command.run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
