use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::trace;

use tibiadex_shared::{Badge, Result, TibiaDexError};

use crate::rules::{BADGE_RE, NO_BADGES_PLACEHOLDER};
use crate::sanitize::{clean_fragment, remove_linebreaks};

static BADGE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".TableContentContainer tr td span[style]").expect("valid selector")
});

/// Badges shown on the account, in display order.
///
/// A badge fragment that does not carry the helper popup call is a
/// structural error.
pub fn extract(section: ElementRef<'_>) -> Result<Vec<Badge>> {
    let mut badges = Vec::new();

    for span in section.select(&BADGE_SEL) {
        let fragment = remove_linebreaks(&span.inner_html());
        if fragment.trim() == NO_BADGES_PLACEHOLDER {
            continue;
        }

        let caps = BADGE_RE.captures(&fragment).ok_or_else(|| {
            TibiaDexError::structural(format!("badge fragment did not match: {fragment:?}"))
        })?;
        let badge = Badge {
            name: decode(&caps[1]),
            icon_url: caps[3].to_string(),
            description: decode(&caps[2]),
        };
        trace!(name = %badge.name, "extracted badge");
        badges.push(badge);
    }

    Ok(badges)
}

/// Undo the popup call's quote escaping, then decode entities.
fn decode(raw: &str) -> String {
    clean_fragment(&raw.replace("\\'", "'"))
}
