use enscard::{Card, ProfileCard};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "resolve", about = "Resolve a name and print its card records")]
pub struct Resolve {
    #[clap(help = "ENS or Basename to look up, e.g. vitalik or jesse.base.eth")]
    query: String,
    #[clap(long, help = "Print the merged profile as JSON")]
    json: bool,
}

impl Resolve {
    pub async fn run(&self) -> Result<(), AppError> {
        log::debug!("cli/resolve: query {}", self.query);

        let mut pipeline = ProfileCard::new()?;
        let card = pipeline
            .resolve(&self.query)
            .await
            .map_err(|e| AppError::ResolveError(e.to_string()))?;

        if self.json {
            match &card {
                Card::Registered(registered) => println!(
                    "{}",
                    serde_json::to_string_pretty(&registered.profile)
                        .map_err(|e| AppError::ResolveError(e.to_string()))?
                ),
                Card::Unregistered(unregistered) => println!(
                    r#"{{ "name": "{}", "status": "Unregistered", "register": "{}" }}"#,
                    unregistered.name, unregistered.register_url
                ),
            }
            return Ok(());
        }

        let width = card
            .records()
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or(0);
        for record in card.records() {
            match &record.href {
                Some(href) => println!(
                    "{:width$}  {} <{}>",
                    record.label, record.value, href
                ),
                None => {
                    println!("{:width$}  {}", record.label, record.value)
                }
            }
        }

        match &card {
            Card::Registered(registered) => {
                for number in &registered.number_records {
                    println!("#{:<width$} {}", number.key, number.value);
                }
            }
            Card::Unregistered(unregistered) => {
                println!();
                println!("Register at {}", unregistered.register_url);
            }
        }

        Ok(())
    }
}
