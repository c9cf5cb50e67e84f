use std::future::Future;
use std::num::NonZeroUsize;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lru::LruCache;

use crate::name::ProfileName;
use crate::profile::ProfileData;

/// How many grid names are resolved eagerly before the rest go
/// through on-demand lookups.
pub const PRELOAD_COUNT: usize = 5;

const AVATAR_SIZE: u32 = 200;

/// Card colors, also painted into generated avatars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub border: String,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: "#000000".to_owned(),
            text: "#ffffff".to_owned(),
            border: "#ffffff".to_owned(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_owned(),
            text: "#000000".to_owned(),
            border: "#000000".to_owned(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// An avatar ready to embed: either a remote URL or a generated
/// initial-letter image. Generated avatars remember their source
/// character so a theme change can regenerate them without a network
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub uri: String,
    pub is_default: bool,
    pub original_letter: Option<char>,
}

impl Avatar {
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            uri: url.into(),
            is_default: false,
            original_letter: None,
        }
    }

    /// Draw the fallback avatar: a theme-colored square with a 1-px
    /// border and the first character of the name centered in it,
    /// returned as a base64 SVG data URI.
    pub fn generated(letter: char, theme: &Theme) -> Self {
        let emoji = is_emoji(letter);
        // Emojis keep their case and get a larger glyph; everything
        // else is uppercased.
        let display: String = if emoji {
            letter.to_string()
        } else {
            letter.to_uppercase().collect()
        };
        let (font_size, font_weight) =
            if emoji { (120, "normal") } else { (100, "bold") };

        let svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
                r#"<rect width="{s}" height="{s}" fill="{bg}"/>"#,
                r#"<rect x="0.5" y="0.5" width="{inner}" height="{inner}" fill="none" stroke="{border}" stroke-width="1"/>"#,
                r#"<text x="{c}" y="{c}" fill="{text}" font-family="sans-serif" font-size="{size}" font-weight="{weight}" text-anchor="middle" dominant-baseline="central">{glyph}</text>"#,
                r#"</svg>"#
            ),
            s = AVATAR_SIZE,
            inner = AVATAR_SIZE - 1,
            c = AVATAR_SIZE / 2,
            bg = theme.background,
            border = theme.border,
            text = theme.text,
            size = font_size,
            weight = font_weight,
            glyph = escape_xml(&display),
        );

        Self {
            uri: format!(
                "data:image/svg+xml;base64,{}",
                BASE64.encode(svg.as_bytes())
            ),
            is_default: true,
            original_letter: Some(letter),
        }
    }

    /// Redraw a generated avatar with new theme colors. Remote avatars
    /// are returned unchanged.
    pub fn regenerate(&self, theme: &Theme) -> Self {
        match self.original_letter {
            Some(letter) if self.is_default => {
                Self::generated(letter, theme)
            }
            _ => self.clone(),
        }
    }
}

/// Pick the avatar for a profile: the remote URL when the profile has
/// one, else a generated initial-letter image.
pub fn resolve_avatar(
    profile: &ProfileData,
    name: &ProfileName,
    theme: &Theme,
) -> Avatar {
    match &profile.avatar {
        Some(url) if !url.is_empty() => Avatar::remote(url.clone()),
        _ => Avatar::generated(name.first_char(), theme),
    }
}

/// Unicode pictograph/emoji blocks the original letter is checked
/// against.
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1F6FF
            | 0x2600..=0x26FF
            | 0x1F900..=0x1F9FF
            | 0x1F1E0..=0x1F1FF
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// What the cache remembers about a name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CachedAvatar {
    /// A validated remote avatar URL.
    Remote(String),
    /// The name is known to have no usable avatar; render the default.
    NoAvatar,
}

/// In-memory memoization of avatar lookups, keyed by name. Repeat
/// resolutions for the same name never issue a second lookup.
pub struct AvatarCache {
    entries: LruCache<ProfileName, CachedAvatar>,
}

impl AvatarCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .expect("Capacity can't be zero");
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Resolve through the cache, calling `lookup` only on a miss.
    /// `lookup` returns the remote avatar URL, or `None` when the
    /// name has no usable avatar; either answer is memoized.
    pub async fn resolve_with<F, Fut>(
        &mut self,
        name: &ProfileName,
        theme: &Theme,
        lookup: F,
    ) -> Avatar
    where
        F: FnOnce(ProfileName) -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        if let Some(cached) = self.entries.get(name) {
            log::debug!("avatars: cache hit for {name}");
            return match cached {
                CachedAvatar::Remote(url) => Avatar::remote(url.clone()),
                CachedAvatar::NoAvatar => {
                    Avatar::generated(name.first_char(), theme)
                }
            };
        }

        match lookup(name.clone()).await {
            Some(url) => {
                log::debug!("avatars: caching remote avatar for {name}");
                self.entries
                    .put(name.clone(), CachedAvatar::Remote(url.clone()));
                Avatar::remote(url)
            }
            None => {
                log::debug!("avatars: caching default avatar for {name}");
                self.entries.put(name.clone(), CachedAvatar::NoAvatar);
                Avatar::generated(name.first_char(), theme)
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AvatarCache {
    fn default() -> Self {
        Self::new(256)
    }
}
