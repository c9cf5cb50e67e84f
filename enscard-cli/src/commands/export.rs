use std::path::PathBuf;

use enscard::{export, EffectKind, ProfileCard};

use crate::commands::parse_theme;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "export", about = "Render a card to a static HTML file")]
pub struct Export {
    #[clap(help = "ENS or Basename to look up")]
    query: String,
    #[clap(long, default_value = ".", help = "Output directory")]
    out: PathBuf,
    #[clap(long, default_value = "dark", help = "Color theme: dark or light")]
    theme: String,
    #[clap(long, help = "Cosmetic effect to embed, e.g. snow or matrix")]
    effect: Option<EffectKind>,
}

impl Export {
    pub async fn run(&self) -> Result<(), AppError> {
        log::debug!(
            "cli/export: query {} into {}",
            self.query,
            self.out.display()
        );

        let theme = parse_theme(&self.theme)?;

        let mut pipeline = ProfileCard::new()?;
        pipeline.set_theme(theme.clone());
        let card = pipeline
            .resolve(&self.query)
            .await
            .map_err(|e| AppError::ResolveError(e.to_string()))?;

        let path = export::export(&card, &theme, self.effect, &self.out)
            .map_err(|e| AppError::ExportError(e.to_string()))?;
        println!("Exported {}", path.display());

        Ok(())
    }
}
