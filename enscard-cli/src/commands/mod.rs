use clap::Subcommand;

use crate::AppError;

mod avatar;
mod export;
mod resolve;

use enscard::Theme;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Resolve(resolve::Resolve),
    Export(export::Export),
    Avatar(avatar::Avatar),
}

impl Commands {
    pub async fn run(&self) -> Result<(), AppError> {
        match self {
            Commands::Resolve(cmd) => cmd.run().await,
            Commands::Export(cmd) => cmd.run().await,
            Commands::Avatar(cmd) => cmd.run().await,
        }
    }
}

pub fn parse_theme(name: &str) -> Result<Theme, AppError> {
    match name {
        "dark" => Ok(Theme::dark()),
        "light" => Ok(Theme::light()),
        other => Err(AppError::InvalidArgument(format!(
            "Unknown theme: {other} (expected dark or light)"
        ))),
    }
}
