use std::collections::HashMap;

use enscard::avatar::{resolve_avatar, Theme};
use enscard::card::{Card, RegisteredCard, UnregisteredCard};
use enscard::export::{export, render_html};
use enscard::profile::{merge, FollowStats, ProfileData, SocialLink};
use enscard::records::{
    build_number_records, build_records, unregistered_records,
};
use enscard::{Avatar, EffectKind, ProfileName};

fn sample_payload() -> ProfileData {
    serde_json::from_str(
        r#"{
        "avatar": null,
        "displayName": "Alice",
        "description": "onchain builder",
        "location": "Lisbon",
        "email": "alice@example.com",
        "createdAt": "2021-03-04T10:30:00Z",
        "links": {
            "website": { "handle": "alice.com" },
            "twitter": { "handle": "alice_tw" },
            "github": { "handle": "alice-gh" }
        },
        "records": {
            "2": "https://cdn.example/pic.png",
            "7": "https://example.com/page",
            "ens": "ignored"
        },
        "social": { "follower": 5, "following": 2 }
    }"#,
    )
    .expect("sample payload should deserialize")
}

#[test]
fn pipeline_from_payload_to_export() {
    let name = ProfileName::parse("Alice").unwrap();
    assert_eq!(name.as_str(), "alice.eth");

    let theme = Theme::dark();
    let merged = merge(sample_payload(), FollowStats::default());
    let records = build_records(&merged, &name);
    let number_records = build_number_records(&merged.profile.records);
    let avatar = resolve_avatar(&merged.profile, &name, &theme);

    // No remote avatar in the payload, so the generated fallback wins
    // and remembers its letter.
    assert!(avatar.is_default);
    assert_eq!(avatar.original_letter, Some('a'));

    // Zero follow counts fall back to the embedded social stats.
    let followers = records.iter().find(|r| r.label == "Followers").unwrap();
    assert_eq!(followers.value, "5");

    // Social links land after Website, alphabetically.
    let labels: Vec<_> = records.iter().map(|r| r.label.as_str()).collect();
    let website = labels.iter().position(|l| *l == "Website").unwrap();
    let github = labels.iter().position(|l| *l == "GitHub").unwrap();
    let twitter = labels.iter().position(|l| *l == "Twitter").unwrap();
    assert!(website < github && github < twitter);
    assert_eq!(*labels.last().unwrap(), "Created");

    // Number records keep only digit keys, highest first.
    let keys: Vec<_> = number_records.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![7, 2]);

    let card = Card::Registered(RegisteredCard {
        name,
        profile: merged,
        records,
        number_records,
        avatar,
    });

    let dir = tempfile::tempdir().unwrap();
    let path =
        export(&card, &theme, Some(EffectKind::Stars), dir.path()).unwrap();
    assert!(path.ends_with("alice.eth.html"));

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<title>alice.eth</title>"));
    assert!(html.contains("03/04/2021"));
    assert!(html.contains("@keyframes starTwinkle"));
    assert!(html.contains("https://github.com/alice-gh"));
}

#[test]
fn unregistered_card_renders_two_rows_and_register_link() {
    let name = ProfileName::parse("nosuch.base.eth").unwrap();
    let records = unregistered_records(&name);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].label, "Basename");

    let card = Card::Unregistered(UnregisteredCard {
        records,
        avatar: Avatar::generated(name.first_char(), &Theme::dark()),
        register_url: name.register_url(),
        name,
    });

    let html = render_html(&card, &Theme::dark(), None);
    assert!(html.contains("Unregistered"));
    assert!(html.contains("https://www.base.org/names?claim=nosuch"));
    assert!(html.contains(">Register Basename</a>"));
}

#[test]
fn theme_switch_regenerates_default_avatar_without_network() {
    let name = ProfileName::parse("alice.eth").unwrap();
    let merged = merge(
        ProfileData {
            links: HashMap::from([(
                "website".to_owned(),
                SocialLink {
                    handle: Some("alice.com".to_owned()),
                    link: None,
                    sources: vec![],
                },
            )]),
            ..Default::default()
        },
        FollowStats::default(),
    );
    let records = build_records(&merged, &name);
    let avatar = resolve_avatar(&merged.profile, &name, &Theme::dark());

    let mut card = Card::Registered(RegisteredCard {
        name,
        profile: merged,
        records,
        number_records: vec![],
        avatar: avatar.clone(),
    });

    card.apply_theme(&Theme::light());
    let regenerated = card.avatar();
    assert_ne!(regenerated.uri, avatar.uri);
    assert_eq!(
        *regenerated,
        Avatar::generated('a', &Theme::light())
    );
}
