use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use url::Url;

use crate::name::ProfileName;
use crate::profile::{merge, FollowStats, MergedProfile, ProfileData};
use crate::{CardError, Result};

pub const PROFILE_API_BASE: &str = "https://api.web3.bio";
pub const FOLLOW_API_BASE: &str = "https://api.ethfollow.xyz/api/v1";

/// Timeout of the primary profile request.
const PROFILE_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout of the avatar-only lookup used by grid preloading.
const AVATAR_TIMEOUT: Duration = Duration::from_secs(3);

/// Outcome of a profile lookup. A 404 from the registry is a terminal
/// state of its own, not an error.
#[derive(Debug)]
pub enum FetchOutcome {
    Registered(Box<MergedProfile>),
    Unregistered,
}

/// Read-only client for the profile and follow-graph APIs.
pub struct ProfileFetcher {
    client: reqwest::Client,
    profile_api_base: String,
    follow_api_base: String,
}

impl ProfileFetcher {
    pub fn new() -> Result<Self> {
        Self::with_base_urls(PROFILE_API_BASE, FOLLOW_API_BASE)
    }

    pub fn with_base_urls(
        profile_api_base: &str,
        follow_api_base: &str,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "User-Agent",
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64; rv:102.0) Gecko/20100101 Firefox/102.0",
            ),
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        // Reject malformed base URLs up front rather than on first use.
        Url::parse(profile_api_base)?;
        Url::parse(follow_api_base)?;

        Ok(Self {
            client,
            profile_api_base: profile_api_base.trim_end_matches('/').to_owned(),
            follow_api_base: follow_api_base.trim_end_matches('/').to_owned(),
        })
    }

    fn profile_url(&self, name: &ProfileName) -> String {
        format!(
            "{}/profile/{}/{}",
            self.profile_api_base,
            name.kind().resource(),
            name
        )
    }

    fn follow_url(&self, name: &ProfileName) -> String {
        format!("{}/users/{}/stats", self.follow_api_base, name)
    }

    /// Fetch a profile and its follow-graph stats. The two requests
    /// run independently; a failure of the stats request never fails
    /// the lookup and is replaced with zero counts.
    pub async fn fetch(&self, name: &ProfileName) -> Result<FetchOutcome> {
        let (profile, stats) = tokio::join!(
            self.fetch_profile_data(name),
            self.fetch_follow_stats(name)
        );

        match profile? {
            Some(data) => Ok(FetchOutcome::Registered(Box::new(merge(
                data, stats,
            )))),
            None => Ok(FetchOutcome::Unregistered),
        }
    }

    /// Primary profile request. `None` means the name is unregistered.
    async fn fetch_profile_data(
        &self,
        name: &ProfileName,
    ) -> Result<Option<ProfileData>> {
        let url = self.profile_url(name);
        log::debug!("fetch/{name}: GET {url}");

        let response = self
            .client
            .get(&url)
            .timeout(PROFILE_TIMEOUT)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            log::debug!("fetch/{name}: not registered");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CardError::Upstream(upstream_message(
                status, &body, name,
            )));
        }

        let data = response.json::<ProfileData>().await?;
        Ok(Some(data))
    }

    /// Secondary follow-graph request. All failures collapse to the
    /// zero-valued default.
    async fn fetch_follow_stats(&self, name: &ProfileName) -> FollowStats {
        let url = self.follow_url(name);
        let result = async {
            let response = self
                .client
                .get(&url)
                .timeout(PROFILE_TIMEOUT)
                .send()
                .await?;
            response.error_for_status()?.json::<FollowStats>().await
        }
        .await;

        match result {
            Ok(stats) => stats,
            Err(e) => {
                log::warn!("fetch/{name}: follow stats unavailable: {e}");
                FollowStats::default()
            }
        }
    }

    /// Avatar-only lookup for grid preloading. Short timeout, and any
    /// failure collapses to `None` so the caller falls back to a
    /// generated avatar.
    pub async fn fetch_avatar(&self, name: &ProfileName) -> Option<String> {
        let url = self.profile_url(name);
        let result = async {
            let response = self
                .client
                .get(&url)
                .timeout(AVATAR_TIMEOUT)
                .send()
                .await?;
            response.error_for_status()?.json::<ProfileData>().await
        }
        .await;

        match result {
            Ok(data) => data.avatar,
            Err(e) => {
                log::warn!("fetch/{name}: avatar lookup failed: {e}");
                None
            }
        }
    }

    /// Download avatar bytes and check they decode as an image. Used
    /// to validate a remote avatar before it is cached; an URL serving
    /// something unrenderable is as good as no avatar.
    pub async fn probe_avatar_bytes(&self, avatar_url: &str) -> bool {
        let result = async {
            let response = self
                .client
                .get(avatar_url)
                .timeout(AVATAR_TIMEOUT)
                .send()
                .await?;
            response.error_for_status()?.bytes().await
        }
        .await;

        match result {
            Ok(bytes) => image::guess_format(&bytes).is_ok(),
            Err(e) => {
                log::warn!("fetch: avatar probe failed for {avatar_url}: {e}");
                false
            }
        }
    }
}

/// Map a non-404 upstream failure to a user-facing message. The JSON
/// error body wins when it parses; well-known cases get friendlier
/// wording.
pub fn upstream_message(
    status: StatusCode,
    body: &str,
    name: &ProfileName,
) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str().map(str::to_owned))
        });

    let message = from_body.unwrap_or_else(|| {
        format!(
            "Error {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown")
        )
    });

    if message.to_lowercase().contains("invalid name") {
        return format!("Invalid name format: {name}");
    }
    if status.is_server_error() {
        return "Server error. Please try again later.".to_owned();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ProfileName {
        ProfileName::parse(s).unwrap()
    }

    #[test]
    fn profile_urls_route_by_kind() {
        let fetcher = ProfileFetcher::new().unwrap();
        assert_eq!(
            fetcher.profile_url(&name("alice.eth")),
            "https://api.web3.bio/profile/ens/alice.eth"
        );
        assert_eq!(
            fetcher.profile_url(&name("jesse.base.eth")),
            "https://api.web3.bio/profile/basenames/jesse.base.eth"
        );
        assert_eq!(
            fetcher.follow_url(&name("alice.eth")),
            "https://api.ethfollow.xyz/api/v1/users/alice.eth/stats"
        );
    }

    #[test]
    fn upstream_message_prefers_json_body() {
        let msg = upstream_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"rate limited"}"#,
            &name("alice.eth"),
        );
        assert_eq!(msg, "rate limited");

        let msg = upstream_message(
            StatusCode::BAD_REQUEST,
            r#"{"error":"bad request"}"#,
            &name("alice.eth"),
        );
        assert_eq!(msg, "bad request");
    }

    #[test]
    fn upstream_message_substitutes_known_cases() {
        let msg = upstream_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid name supplied"}"#,
            &name("weird"),
        );
        assert_eq!(msg, "Invalid name format: weird.eth");

        let msg = upstream_message(
            StatusCode::BAD_GATEWAY,
            "not json at all",
            &name("alice.eth"),
        );
        assert_eq!(msg, "Server error. Please try again later.");
    }

    #[test]
    fn upstream_message_falls_back_to_status() {
        let msg = upstream_message(
            StatusCode::FORBIDDEN,
            "<html>nope</html>",
            &name("alice.eth"),
        );
        assert_eq!(msg, "Error 403: Forbidden");
    }
}
