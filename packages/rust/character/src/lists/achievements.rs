use scraper::ElementRef;
use tracing::trace;

use tibiadex_shared::Achievement;

use crate::lists::row_fragments;
use crate::rules::{ACHIEVEMENT_RE, GRADE_MARKER, SECRET_MARKER};
use crate::sanitize::clean_fragment;

/// Displayed achievements. Rows that are not achievements are skipped.
pub fn extract(section: ElementRef<'_>) -> Vec<Achievement> {
    row_fragments(section)
        .filter_map(|fragment| {
            let achievement = parse_row(&fragment);
            if achievement.is_none() {
                trace!(%fragment, "skipping achievement row");
            }
            achievement
        })
        .collect()
}

fn parse_row(fragment: &str) -> Option<Achievement> {
    let caps = ACHIEVEMENT_RE.captures(fragment)?;
    let name_markup = &caps[2];
    let name = name_markup.split("<img").next().unwrap_or_default();

    Some(Achievement {
        name: clean_fragment(name),
        grade: caps[1].matches(GRADE_MARKER).count() as u32,
        secret: name_markup.contains(SECRET_MARKER),
    })
}
