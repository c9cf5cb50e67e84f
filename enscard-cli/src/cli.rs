use clap::Parser;

use crate::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "enscard-cli")]
#[clap(about = "Resolve ENS and Basename profile cards", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
