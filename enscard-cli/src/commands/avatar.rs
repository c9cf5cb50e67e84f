use enscard::{ProfileCard, ProfileName};

use crate::commands::parse_theme;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "avatar", about = "Look up avatars for a batch of names")]
pub struct Avatar {
    #[clap(required = true, help = "Names to look up")]
    names: Vec<String>,
    #[clap(long, default_value = "dark", help = "Color theme: dark or light")]
    theme: String,
}

impl Avatar {
    pub async fn run(&self) -> Result<(), AppError> {
        log::debug!("cli/avatar: {} names", self.names.len());

        let theme = parse_theme(&self.theme)?;

        let names = self
            .names
            .iter()
            .map(|raw| ProfileName::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pipeline = ProfileCard::new()?;
        pipeline.set_theme(theme);
        pipeline.preload_avatars(&names).await;

        for name in &names {
            let avatar = pipeline.grid_avatar(name).await;
            if avatar.is_default {
                println!(
                    "{name}  default ({})",
                    avatar.original_letter.unwrap_or('?')
                );
            } else {
                println!("{name}  {}", avatar.uri);
            }
        }

        Ok(())
    }
}
