//! Recent deaths, with killers and assists resolved into participants.

use scraper::ElementRef;
use tracing::trace;

use tibiadex_shared::{DeathEvent, Result};

use crate::creatures::CreatureList;
use crate::killers::parse_participants;
use crate::lists::row_fragments;
use crate::rules::{ASSIST_BREAK_RE, ASSIST_SEPARATOR, DEATH_RE};
use crate::sanitize::{clean_fragment, parse_count, parse_timestamp};

/// Deaths in page order. Header and placeholder rows are skipped; a death row
/// with an unreadable timestamp or level fails the parse.
pub fn extract(section: ElementRef<'_>, creatures: &CreatureList) -> Result<Vec<DeathEvent>> {
    let mut deaths = Vec::new();
    for fragment in row_fragments(section) {
        match parse_death(&fragment, creatures)? {
            Some(death) => deaths.push(death),
            None => trace!(%fragment, "skipping death row"),
        }
    }
    Ok(deaths)
}

fn parse_death(fragment: &str, creatures: &CreatureList) -> Result<Option<DeathEvent>> {
    let fragment = ASSIST_BREAK_RE.replace_all(fragment, ". Assisted by");
    let Some(caps) = DEATH_RE.captures(&fragment) else {
        return Ok(None);
    };

    let (time, description, level, participants) = (&caps[1], &caps[2], &caps[3], &caps[4]);
    let reason = clean_fragment(&format!(
        "{description} at Level {level} by {participants}."
    ));

    let (killers, assists) = match participants.split_once(ASSIST_SEPARATOR) {
        Some((killers, assists)) => (killers, Some(assists)),
        None => (participants, None),
    };

    Ok(Some(DeathEvent {
        time: parse_timestamp(&clean_fragment(time))?,
        level: parse_count(level)?,
        killers: parse_participants(killers, creatures),
        assists: assists
            .map(|fragment| parse_participants(fragment, creatures))
            .unwrap_or_default(),
        reason,
    }))
}
