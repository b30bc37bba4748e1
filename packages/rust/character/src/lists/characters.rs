use scraper::ElementRef;
use tracing::trace;

use tibiadex_shared::{OnlineStatus, OtherCharacterRef};

use crate::lists::row_fragments;
use crate::rules::{
    DELETED_MARKER, MAIN_CHARACTER_MARKER, ONLINE_MARKER, OTHER_CHARACTER_RE, STAFF_POSITION,
    TRADED_MARKER,
};
use crate::sanitize::clean_fragment;

/// Characters on the same account, in page order. The header row is skipped.
pub fn extract(section: ElementRef<'_>) -> Vec<OtherCharacterRef> {
    row_fragments(section)
        .filter_map(|fragment| {
            let character = parse_row(&fragment);
            if character.is_none() {
                trace!(%fragment, "skipping character row");
            }
            character
        })
        .collect()
}

fn parse_row(fragment: &str) -> Option<OtherCharacterRef> {
    let caps = OTHER_CHARACTER_RE.captures(fragment)?;
    let mut name = caps[1].to_string();
    let status = &caps[3];

    let traded = name.contains(TRADED_MARKER);
    if traded {
        name = name.replace(TRADED_MARKER, "");
    }

    let main = name.contains(MAIN_CHARACTER_MARKER);
    if main {
        name = name.split('<').next().unwrap_or_default().to_string();
    }

    Some(OtherCharacterRef {
        name: clean_fragment(&name),
        world: clean_fragment(&caps[2]),
        status: if status.contains(ONLINE_MARKER) {
            OnlineStatus::Online
        } else {
            OnlineStatus::Offline
        },
        deleted: status.contains(DELETED_MARKER),
        main,
        traded,
        position: status
            .contains(STAFF_POSITION)
            .then(|| STAFF_POSITION.to_string()),
    })
}
