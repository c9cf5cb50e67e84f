use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CardError, Result};

pub const ENS_SUFFIX: &str = ".eth";
pub const BASENAME_SUFFIX: &str = ".base.eth";

/// Which registry a name belongs to. Basenames live under `.base.eth`
/// and are served by a separate API resource and registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Ens,
    Basename,
}

impl NameKind {
    /// Label of the identity row on the rendered card.
    pub fn label(&self) -> &'static str {
        match self {
            NameKind::Ens => "ENS",
            NameKind::Basename => "Basename",
        }
    }

    /// Resource segment of the profile API path.
    pub fn resource(&self) -> &'static str {
        match self {
            NameKind::Ens => "ens",
            NameKind::Basename => "basenames",
        }
    }
}

/// A normalized, validated profile name such as `vitalik.eth` or
/// `jesse.base.eth`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    /// Normalize raw user input into a canonical dotted name.
    ///
    /// The input is trimmed and lowercased, and `.eth` is appended
    /// unless the name already carries a recognized suffix. Empty input
    /// and input containing whitespace are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let query = raw.trim().to_lowercase();
        if query.is_empty() {
            return Err(CardError::Validation(
                "Please enter a name to search.".to_owned(),
            ));
        }
        if query.chars().any(char::is_whitespace) {
            return Err(CardError::Validation(
                "Name cannot contain spaces.".to_owned(),
            ));
        }

        if query.ends_with(ENS_SUFFIX) || query.ends_with(BASENAME_SUFFIX) {
            Ok(Self(query))
        } else {
            Ok(Self(format!("{query}{ENS_SUFFIX}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> NameKind {
        if self.0.ends_with(BASENAME_SUFFIX) {
            NameKind::Basename
        } else {
            NameKind::Ens
        }
    }

    /// First character of the name, used for the generated avatar.
    pub fn first_char(&self) -> char {
        self.0.chars().next().unwrap_or('?')
    }

    /// Where an unregistered name can be claimed. ENS names go to the
    /// ENS app, basenames to the Base registrar with the suffix
    /// stripped from the claim parameter.
    pub fn register_url(&self) -> String {
        match self.kind() {
            NameKind::Ens => {
                format!("https://app.ens.domains/{}", self.0)
            }
            NameKind::Basename => {
                let bare = self
                    .0
                    .strip_suffix(BASENAME_SUFFIX)
                    .unwrap_or(&self.0);
                format!("https://www.base.org/names?claim={bare}")
            }
        }
    }

    /// File name of the static HTML export: `{name}.eth.html` with a
    /// single trailing `.eth` collapsed.
    pub fn export_file_name(&self) -> String {
        let bare = self.0.strip_suffix(ENS_SUFFIX).unwrap_or(&self.0);
        format!("{bare}.eth.html")
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProfileName {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_eth_suffix_once() {
        let name = ProfileName::parse("alice").unwrap();
        assert_eq!(name.as_str(), "alice.eth");

        // Idempotent: parsing an already-normalized name is a no-op.
        let again = ProfileName::parse(name.as_str()).unwrap();
        assert_eq!(again, name);
    }

    #[test]
    fn preserves_recognized_suffixes() {
        assert_eq!(
            ProfileName::parse("bob.eth").unwrap().as_str(),
            "bob.eth"
        );
        assert_eq!(
            ProfileName::parse("jesse.base.eth").unwrap().as_str(),
            "jesse.base.eth"
        );
    }

    #[test]
    fn trims_and_lowercases() {
        let name = ProfileName::parse("  Vitalik.ETH  ").unwrap();
        assert_eq!(name.as_str(), "vitalik.eth");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(
            ProfileName::parse(""),
            Err(CardError::Validation(_))
        ));
        assert!(matches!(
            ProfileName::parse("   "),
            Err(CardError::Validation(_))
        ));
        assert!(matches!(
            ProfileName::parse("two words"),
            Err(CardError::Validation(_))
        ));
    }

    #[test]
    fn kind_and_labels() {
        let ens = ProfileName::parse("alice").unwrap();
        assert_eq!(ens.kind(), NameKind::Ens);
        assert_eq!(ens.kind().label(), "ENS");
        assert_eq!(ens.kind().resource(), "ens");

        let base = ProfileName::parse("jesse.base.eth").unwrap();
        assert_eq!(base.kind(), NameKind::Basename);
        assert_eq!(base.kind().label(), "Basename");
        assert_eq!(base.kind().resource(), "basenames");
    }

    #[test]
    fn register_urls() {
        let ens = ProfileName::parse("foo.eth").unwrap();
        assert_eq!(ens.register_url(), "https://app.ens.domains/foo.eth");

        let base = ProfileName::parse("bar.base.eth").unwrap();
        assert_eq!(
            base.register_url(),
            "https://www.base.org/names?claim=bar"
        );
    }

    #[test]
    fn export_file_names() {
        let ens = ProfileName::parse("foo.eth").unwrap();
        assert_eq!(ens.export_file_name(), "foo.eth.html");

        let base = ProfileName::parse("bar.base.eth").unwrap();
        assert_eq!(base.export_file_name(), "bar.base.eth.html");
    }
}
