use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::avatar::Theme;
use crate::card::Card;
use crate::effects::EffectKind;
use crate::records::{NumberRecord, NumberRecordKind, ProfileRecord};
use crate::Result;

const TEMPLATE: &str = include_str!("../templates/card.html");

/// Substitute a resolved card into the HTML template. The result is a
/// single self-contained page.
pub fn render_html(
    card: &Card,
    theme: &Theme,
    effect: Option<EffectKind>,
) -> String {
    let name = card.name().as_str();

    let css_variables = format!(
        "--primary-color: {};\n            --background-color: {};\n            --border-color: {};",
        theme.text, theme.background, theme.border
    );

    let record_rows = card
        .records()
        .iter()
        .map(record_row_html)
        .collect::<Vec<_>>()
        .join("\n");

    let number_section = match card {
        Card::Registered(registered)
            if !registered.number_records.is_empty() =>
        {
            let rows = registered
                .number_records
                .iter()
                .map(number_record_html)
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "    <div class=\"profile-number-records\">\n{rows}\n    </div>"
            )
        }
        _ => String::new(),
    };

    let header_section = match card {
        Card::Registered(registered) => registered
            .profile
            .profile
            .header
            .as_deref()
            .map(|url| {
                format!(
                    "<div class=\"profile-header-image\"><img src=\"{}\" alt=\"{} header\"></div>",
                    escape_html(url),
                    escape_html(name),
                )
            })
            .unwrap_or_default(),
        Card::Unregistered(_) => String::new(),
    };

    // The register call-to-action only appears on unregistered cards;
    // effects are only embedded for registered ones.
    let (register_section, effect) = match card {
        Card::Registered(_) => (String::new(), effect),
        Card::Unregistered(unregistered) => {
            let label = match unregistered.name.kind() {
                crate::name::NameKind::Ens => "Register ENS",
                crate::name::NameKind::Basename => "Register Basename",
            };
            (
                format!(
                    "    <div class=\"register-container\"><a class=\"register-button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div>",
                    escape_html(&unregistered.register_url),
                    label,
                ),
                None,
            )
        }
    };

    let effect_css = effect.map(|e| e.css()).unwrap_or_default();
    let effect_js =
        effect.and_then(|e| e.init_js()).unwrap_or_default();

    TEMPLATE
        .replace("PROFILE_NAME_PLACEHOLDER", &escape_html(name))
        .replace("AVATAR_SRC_PLACEHOLDER", &escape_html(&card.avatar().uri))
        .replace("/* THEME_CSS_VARIABLES_PLACEHOLDER */", &css_variables)
        .replace("/* EFFECT_STYLES_PLACEHOLDER */", effect_css)
        .replace("// EFFECT_INIT_PLACEHOLDER", effect_js)
        .replace("<!-- PROFILE_RECORDS_PLACEHOLDER -->", &record_rows)
        .replace("<!-- NUMBER_RECORDS_PLACEHOLDER -->", &number_section)
        .replace("<!-- HEADER_IMAGE_PLACEHOLDER -->", &header_section)
        .replace("<!-- REGISTER_PLACEHOLDER -->", &register_section)
}

/// Render and write the card as `{name}.eth.html` under `dir`,
/// returning the written path.
pub fn export<P: AsRef<Path>>(
    card: &Card,
    theme: &Theme,
    effect: Option<EffectKind>,
    dir: P,
) -> Result<PathBuf> {
    let html = render_html(card, theme, effect);
    let path = dir.as_ref().join(card.name().export_file_name());

    let mut file = File::create(&path)?;
    file.write_all(html.as_bytes())?;
    log::debug!("export: wrote {}", path.display());
    Ok(path)
}

fn record_row_html(record: &ProfileRecord) -> String {
    let value = if record.is_link {
        let href = record
            .href
            .clone()
            .unwrap_or_else(|| crate::records::normalize_url(&record.value));
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(&href),
            escape_html(&record.value),
        )
    } else {
        escape_html(&record.value)
    };

    format!(
        "        <div class=\"profile-record\"><div class=\"record-label\">{}</div><div class=\"record-value\">{}</div></div>",
        escape_html(&record.label),
        value,
    )
}

fn number_record_html(record: &NumberRecord) -> String {
    let value = match record.kind {
        NumberRecordKind::Image => format!(
            "<img class=\"number-record-image\" src=\"{}\" alt=\"Record {}\" loading=\"lazy\">",
            escape_html(&record.value),
            record.key,
        ),
        NumberRecordKind::Link => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(&record.value),
            escape_html(&record.value),
        ),
        NumberRecordKind::Text => escape_html(&record.value),
    };

    format!(
        "        <div class=\"number-record\"><div class=\"number-record-label\">{}</div><div class=\"number-record-value\">{}</div></div>",
        record.key, value,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
