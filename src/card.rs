use crate::avatar::{
    resolve_avatar, Avatar, AvatarCache, Theme, PRELOAD_COUNT,
};
use crate::fetch::{FetchOutcome, ProfileFetcher};
use crate::name::ProfileName;
use crate::profile::MergedProfile;
use crate::records::{
    build_number_records, build_records, unregistered_records,
    NumberRecord, ProfileRecord,
};
use crate::Result;

/// A fully resolved, render-ready profile card.
#[derive(Debug)]
pub enum Card {
    Registered(RegisteredCard),
    Unregistered(UnregisteredCard),
}

#[derive(Debug)]
pub struct RegisteredCard {
    pub name: ProfileName,
    pub profile: MergedProfile,
    pub records: Vec<ProfileRecord>,
    pub number_records: Vec<NumberRecord>,
    pub avatar: Avatar,
}

#[derive(Debug)]
pub struct UnregisteredCard {
    pub name: ProfileName,
    pub records: Vec<ProfileRecord>,
    pub avatar: Avatar,
    pub register_url: String,
}

impl Card {
    pub fn name(&self) -> &ProfileName {
        match self {
            Card::Registered(card) => &card.name,
            Card::Unregistered(card) => &card.name,
        }
    }

    pub fn records(&self) -> &[ProfileRecord] {
        match self {
            Card::Registered(card) => &card.records,
            Card::Unregistered(card) => &card.records,
        }
    }

    pub fn avatar(&self) -> &Avatar {
        match self {
            Card::Registered(card) => &card.avatar,
            Card::Unregistered(card) => &card.avatar,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Card::Registered(_))
    }

    /// Redraw a generated avatar with new theme colors, from the
    /// stored letter and without a network request. Remote avatars
    /// are untouched.
    pub fn apply_theme(&mut self, theme: &Theme) {
        let avatar = match self {
            Card::Registered(card) => &mut card.avatar,
            Card::Unregistered(card) => &mut card.avatar,
        };
        *avatar = avatar.regenerate(theme);
    }
}

/// The resolution pipeline: normalize → fetch → merge → build records
/// → resolve avatar. Owns its fetcher, avatar cache and theme; no
/// module-level state.
pub struct ProfileCard {
    fetcher: ProfileFetcher,
    avatars: AvatarCache,
    theme: Theme,
}

impl ProfileCard {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(ProfileFetcher::new()?))
    }

    pub fn with_fetcher(fetcher: ProfileFetcher) -> Self {
        Self {
            fetcher,
            avatars: AvatarCache::default(),
            theme: Theme::default(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Resolve a raw query into a card. A 404 from the registry lands
    /// on the unregistered path; other upstream failures surface as
    /// errors.
    pub async fn resolve(&mut self, query: &str) -> Result<Card> {
        let name = ProfileName::parse(query)?;
        log::debug!("card: resolving {name}");

        match self.fetcher.fetch(&name).await? {
            FetchOutcome::Registered(merged) => {
                let records = build_records(&merged, &name);
                let number_records =
                    build_number_records(&merged.profile.records);
                let avatar =
                    resolve_avatar(&merged.profile, &name, &self.theme);
                Ok(Card::Registered(RegisteredCard {
                    name,
                    profile: *merged,
                    records,
                    number_records,
                    avatar,
                }))
            }
            FetchOutcome::Unregistered => {
                let records = unregistered_records(&name);
                let avatar =
                    Avatar::generated(name.first_char(), &self.theme);
                let register_url = name.register_url();
                Ok(Card::Unregistered(UnregisteredCard {
                    name,
                    records,
                    avatar,
                    register_url,
                }))
            }
        }
    }

    /// Avatar lookup for a grid tile, memoized by name. A remote URL
    /// is only cached after its bytes prove to be an image; every
    /// failure is cached as "use the default avatar".
    pub async fn grid_avatar(&mut self, name: &ProfileName) -> Avatar {
        let fetcher = &self.fetcher;
        self.avatars
            .resolve_with(name, &self.theme, |n| async move {
                let url = fetcher.fetch_avatar(&n).await?;
                if fetcher.probe_avatar_bytes(&url).await {
                    Some(url)
                } else {
                    None
                }
            })
            .await
    }

    /// Warm the cache for the first few grid tiles; the rest load on
    /// demand through `grid_avatar`.
    pub async fn preload_avatars(&mut self, names: &[ProfileName]) {
        for name in names.iter().take(PRELOAD_COUNT) {
            self.grid_avatar(name).await;
        }
    }
}
