use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use itertools::Itertools;
use lazy_static::lazy_static;

use crate::name::ProfileName;
use crate::profile::MergedProfile;

/// One label/value row on the rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub label: String,
    pub value: String,
    pub is_link: bool,
    pub href: Option<String>,
}

impl ProfileRecord {
    fn text(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_owned(),
            value: value.into(),
            is_link: false,
            href: None,
        }
    }

    fn link(label: &str, value: impl Into<String>, href: String) -> Self {
        Self {
            label: label.to_owned(),
            value: value.into(),
            is_link: true,
            href: Some(href),
        }
    }
}

/// How a numeric-keyed record value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberRecordKind {
    Image,
    Link,
    Text,
}

/// A numeric-keyed entry from the profile's records map, rendered in
/// its own area of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberRecord {
    pub key: u64,
    pub value: String,
    pub kind: NumberRecordKind,
}

lazy_static! {
    /// Known platforms: display label and URL pattern for the handle.
    /// `{}` is replaced by the handle; a `None` pattern means the
    /// handle itself is normalized into the URL.
    static ref PLATFORM_LABELS: HashMap<&'static str, (&'static str, Option<&'static str>)> =
        HashMap::from([
            ("twitter", ("Twitter", Some("https://x.com/{}"))),
            ("github", ("GitHub", Some("https://github.com/{}"))),
            ("discord", ("Discord", Some("https://discord.com/users/{}"))),
            ("telegram", ("Telegram", Some("https://t.me/{}"))),
            ("farcaster", ("Farcaster", None)),
        ]);
}

/// Prepend `https://` to anything that does not already carry an
/// http(s) scheme. Empty input stays empty.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let lower = url.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_owned()
    } else {
        format!("https://{url}")
    }
}

/// Reformat a created-at timestamp as `MM/DD/YYYY`, passing the value
/// through unchanged when it does not parse.
fn format_created(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%m/%d/%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%m/%d/%Y").to_string();
    }
    raw.to_owned()
}

/// Build the ordered record rows for a registered profile.
///
/// Order is fixed: identity, display name, follower counts, location,
/// status, bio, email, website, the remaining social links sorted
/// alphabetically by label, and the created date last.
pub fn build_records(
    merged: &MergedProfile,
    name: &ProfileName,
) -> Vec<ProfileRecord> {
    let profile = &merged.profile;
    let mut records = Vec::new();

    records.push(ProfileRecord::text(name.kind().label(), name.as_str()));

    if let Some(display_name) = &profile.display_name {
        if display_name != name.as_str() {
            records.push(ProfileRecord::text("Name", display_name));
        }
    }

    let (followers, following) = merged.follow_counts();
    records.push(ProfileRecord::text("Followers", followers));
    records.push(ProfileRecord::text("Following", following));

    if let Some(location) = &profile.location {
        records.push(ProfileRecord::text("Location", location));
    }
    if let Some(status) = &profile.status {
        records.push(ProfileRecord::text("Status", status));
    }
    if let Some(description) = &profile.description {
        records.push(ProfileRecord::text("Bio", description));
    }
    if let Some(email) = &profile.email {
        records.push(ProfileRecord::text("Email", email));
    }

    if let Some(website) = profile.links.get("website") {
        if let Some(handle) = &website.handle {
            let href = website
                .link
                .clone()
                .unwrap_or_else(|| normalize_url(handle));
            records.push(ProfileRecord::link("Website", handle, href));
        }
    }

    let social = profile
        .links
        .iter()
        .filter(|(platform, _)| platform.as_str() != "website")
        .filter_map(|(platform, link)| {
            let handle = link.handle.as_deref()?;
            let (label, href) = match PLATFORM_LABELS.get(platform.as_str())
            {
                Some((label, Some(pattern))) => (
                    (*label).to_owned(),
                    pattern.replace("{}", handle),
                ),
                Some((label, None)) => {
                    ((*label).to_owned(), normalize_url(handle))
                }
                None => (
                    capitalize(platform),
                    link.link
                        .clone()
                        .unwrap_or_else(|| normalize_url(handle)),
                ),
            };
            Some(ProfileRecord::link(&label, handle, href))
        })
        .sorted_by(|a, b| a.label.cmp(&b.label));
    records.extend(social);

    if let Some(created_at) = &profile.created_at {
        records
            .push(ProfileRecord::text("Created", format_created(created_at)));
    }

    records
}

/// Build the rows for an unregistered name: the identity row and an
/// `Unregistered` status, nothing else.
pub fn unregistered_records(name: &ProfileName) -> Vec<ProfileRecord> {
    vec![
        ProfileRecord::text(name.kind().label(), name.as_str()),
        ProfileRecord::text("Status", "Unregistered"),
    ]
}

/// Pull the numeric-keyed entries out of the records map, highest key
/// first, with the render kind auto-detected from the value.
pub fn build_number_records(
    records: &HashMap<String, String>,
) -> Vec<NumberRecord> {
    records
        .iter()
        .filter_map(|(key, value)| {
            if key.is_empty() || !key.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let key = key.parse::<u64>().ok()?;
            Some(NumberRecord {
                key,
                value: value.clone(),
                kind: detect_value_kind(value),
            })
        })
        .sorted_by(|a, b| b.key.cmp(&a.key))
        .collect()
}

/// Image detection: known extensions, or known image-hosting hosts.
fn is_image_url(value: &str) -> bool {
    let lower = value.to_lowercase();
    let by_extension = [".jpeg", ".jpg", ".gif", ".png", ".webp", ".svg"]
        .iter()
        .any(|ext| lower.ends_with(ext));

    by_extension
        || value.starts_with("https://i.imgur.com/")
        || value.starts_with("https://ipfs.io/")
        || value.contains("cloudfront.net")
        || value.contains("nftstorage.link")
}

fn detect_value_kind(value: &str) -> NumberRecordKind {
    if is_image_url(value) {
        NumberRecordKind::Image
    } else if value.starts_with("http") {
        NumberRecordKind::Link
    } else {
        NumberRecordKind::Text
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str()
        }
        None => String::new(),
    }
}
