use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Profile payload returned by the web3.bio API. Only the fields the
/// card consumes are modeled; everything else in the response is
/// ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub avatar: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
    pub header: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub links: HashMap<String, SocialLink>,
    #[serde(default)]
    pub records: HashMap<String, String>,
    pub social: Option<SocialStats>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SocialLink {
    pub handle: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Follower counts embedded in the profile payload itself, used only
/// when the follow-graph service has nothing better.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct SocialStats {
    pub follower: Option<u64>,
    pub following: Option<u64>,
}

/// Stats payload from the ethfollow.xyz API. The counts arrive as
/// strings and stay strings; `default()` stands in whenever the
/// service is unreachable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FollowStats {
    #[serde(default = "zero")]
    pub followers_count: String,
    #[serde(default = "zero")]
    pub following_count: String,
}

fn zero() -> String {
    "0".to_owned()
}

impl Default for FollowStats {
    fn default() -> Self {
        Self {
            followers_count: zero(),
            following_count: zero(),
        }
    }
}

/// Follower/following pair attached to a merged profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FollowCounts {
    pub followers: String,
    pub following: String,
}

/// `ProfileData` with the follow-graph counts attached.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MergedProfile {
    #[serde(flatten)]
    pub profile: ProfileData,
    pub eth_follow: FollowCounts,
}

/// Combine the two payloads into one view model. Pure; neither input
/// is mutated. Empty count strings from the follow API are coerced to
/// `"0"` so they take part in the fallback like any other zero.
pub fn merge(profile: ProfileData, stats: FollowStats) -> MergedProfile {
    MergedProfile {
        profile,
        eth_follow: FollowCounts {
            followers: non_empty_or_zero(stats.followers_count),
            following: non_empty_or_zero(stats.following_count),
        },
    }
}

fn non_empty_or_zero(count: String) -> String {
    if count.is_empty() {
        zero()
    } else {
        count
    }
}

impl MergedProfile {
    /// Follower/following values as rendered, with fallback
    /// precedence: the follow-graph counts win when either is
    /// non-zero, else the profile's own social stats, else zeros.
    pub fn follow_counts(&self) -> (String, String) {
        let eth = &self.eth_follow;
        if eth.followers != "0" || eth.following != "0" {
            return (eth.followers.clone(), eth.following.clone());
        }
        if let Some(social) = &self.profile.social {
            return (
                social.follower.unwrap_or(0).to_string(),
                social.following.unwrap_or(0).to_string(),
            );
        }
        ("0".to_owned(), "0".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_attaches_counts() {
        let profile = ProfileData {
            display_name: Some("Alice".to_owned()),
            ..Default::default()
        };
        let stats = FollowStats {
            followers_count: "12".to_owned(),
            following_count: "7".to_owned(),
        };

        let merged = merge(profile, stats);
        assert_eq!(merged.eth_follow.followers, "12");
        assert_eq!(merged.eth_follow.following, "7");
        assert_eq!(merged.profile.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn fallback_uses_social_when_counts_are_zero() {
        let profile = ProfileData {
            social: Some(SocialStats {
                follower: Some(5),
                following: Some(2),
            }),
            ..Default::default()
        };
        let merged = merge(profile, FollowStats::default());

        assert_eq!(
            merged.follow_counts(),
            ("5".to_owned(), "2".to_owned())
        );
    }

    #[test]
    fn fallback_keeps_counts_when_either_is_nonzero() {
        let profile = ProfileData {
            social: Some(SocialStats {
                follower: Some(5),
                following: Some(2),
            }),
            ..Default::default()
        };
        let stats = FollowStats {
            followers_count: "3".to_owned(),
            following_count: "0".to_owned(),
        };
        let merged = merge(profile, stats);

        assert_eq!(
            merged.follow_counts(),
            ("3".to_owned(), "0".to_owned())
        );
    }

    #[test]
    fn empty_counts_coerced_to_zero() {
        let profile = ProfileData {
            social: Some(SocialStats {
                follower: Some(5),
                following: Some(2),
            }),
            ..Default::default()
        };
        let stats = FollowStats {
            followers_count: String::new(),
            following_count: String::new(),
        };
        let merged = merge(profile, stats);

        // Empty strings are not "non-zero"; the social stats win.
        assert_eq!(merged.eth_follow.followers, "0");
        assert_eq!(
            merged.follow_counts(),
            ("5".to_owned(), "2".to_owned())
        );
    }

    #[test]
    fn fallback_zero_when_nothing_available() {
        let merged =
            merge(ProfileData::default(), FollowStats::default());
        assert_eq!(
            merged.follow_counts(),
            ("0".to_owned(), "0".to_owned())
        );
    }

    #[test]
    fn deserializes_api_payload() {
        let json = r#"{
            "avatar": "https://cdn.example/a.png",
            "displayName": "Alice",
            "createdAt": "2021-03-04T00:00:00Z",
            "links": {
                "github": { "handle": "alice", "link": null, "sources": ["ens"] }
            },
            "records": { "1": "hello" },
            "social": { "follower": 10, "following": 3 },
            "unknownField": true
        }"#;

        let data: ProfileData = serde_json::from_str(json).unwrap();
        assert_eq!(data.display_name.as_deref(), Some("Alice"));
        assert_eq!(
            data.links.get("github").unwrap().handle.as_deref(),
            Some("alice")
        );
        assert_eq!(data.records.get("1").unwrap(), "hello");
        assert_eq!(data.social.unwrap().follower, Some(10));
    }

    #[test]
    fn follow_stats_defaults_missing_fields() {
        let stats: FollowStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.followers_count, "0");
        assert_eq!(stats.following_count, "0");
    }
}
