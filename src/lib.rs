//! enscard resolves ENS and Basename profiles into render-ready
//! "profile card" data and static HTML exports.
//!
//! The pipeline: normalize the query ([`name::ProfileName`]), fetch
//! the profile and follow-graph stats ([`fetch::ProfileFetcher`]),
//! merge them ([`profile::merge`]), build the ordered record rows
//! ([`records`]), and resolve or generate an avatar ([`avatar`]).
//! [`card::ProfileCard`] ties these together; [`export`] renders the
//! result into a standalone HTML file.

pub mod avatar;
pub mod card;
pub mod effects;
pub mod errors;
pub mod export;
pub mod fetch;
pub mod name;
pub mod profile;
pub mod records;

pub use avatar::{Avatar, AvatarCache, Theme};
pub use card::{Card, ProfileCard};
pub use effects::EffectKind;
pub use errors::{CardError, Result};
pub use fetch::{FetchOutcome, ProfileFetcher};
pub use name::{NameKind, ProfileName};
pub use profile::{merge, FollowStats, MergedProfile, ProfileData};
pub use records::{NumberRecord, ProfileRecord};
