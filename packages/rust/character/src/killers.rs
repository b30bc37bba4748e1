//! Killer and assist list parsing for death entries.
//!
//! A fragment such as `<a ..>Tom</a>, a dragon and a fire elemental of
//! <a ..>Ann</a>` becomes an ordered list of participants. Order and
//! duplicates are preserved.

use tibiadex_shared::KillParticipant;

use crate::creatures::CreatureList;
use crate::rules::{PLAYER_PROFILE_MARKER, SUMMON_RE, TRADED_MARKER};
use crate::sanitize::{clean_fragment, strip_markup};

/// Resolve every participant named in one killers or assists fragment.
pub fn parse_participants(fragment: &str, creatures: &CreatureList) -> Vec<KillParticipant> {
    split_participants(fragment)
        .into_iter()
        .map(|token| parse_participant(token, creatures))
        .collect()
}

/// Split `A, B and C` into `[A, B, C]`.
///
/// Only the last comma-separated token is split on " and ", and only once.
pub(crate) fn split_participants(fragment: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = fragment.split(", ").collect();
    if let Some(last) = tokens.pop() {
        match last.split_once(" and ") {
            Some((head, tail)) => {
                tokens.push(head);
                tokens.push(tail);
            }
            None => tokens.push(last),
        }
    }
    tokens
}

/// Classify a single participant token.
pub(crate) fn parse_participant(token: &str, creatures: &CreatureList) -> KillParticipant {
    let mut text = token.to_string();
    let mut player = false;
    let mut traded = false;

    if text.contains(TRADED_MARKER) {
        player = true;
        traded = true;
        text = text.replace(TRADED_MARKER, "");
    }

    if text.contains(PLAYER_PROFILE_MARKER) {
        player = true;
        text = strip_markup(&text);
    }

    let mut summon = None;
    if let Some((creature, owner)) = split_summon(&text, creatures) {
        summon = Some(creature);
        text = owner;
    }

    KillParticipant {
        name: clean_fragment(&text),
        player,
        traded,
        summon,
    }
}

/// `a fire elemental of Tom` → (`a fire elemental`, `Tom`), unless the whole
/// phrase is a creature whose own name contains "of".
fn split_summon(text: &str, creatures: &CreatureList) -> Option<(String, String)> {
    let creature = text.strip_prefix("an ").or_else(|| text.strip_prefix("a "))?;
    if creatures.contains(creature) {
        return None;
    }
    let caps = SUMMON_RE.captures(text)?;
    Some((clean_fragment(&caps[1]), caps[2].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_link(name: &str) -> String {
        format!(
            r#"<a href="https://www.tibia.com/community/?subtopic=characters&amp;name={}">{name}</a>"#,
            name.replace(' ', "+")
        )
    }

    fn names(list: &[KillParticipant]) -> Vec<&str> {
        list.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn splits_comma_and_final_and() {
        assert_eq!(split_participants("A, B and C"), vec!["A", "B", "C"]);
        assert_eq!(split_participants("A and B"), vec!["A", "B"]);
        assert_eq!(split_participants("A"), vec!["A"]);
    }

    #[test]
    fn and_inside_earlier_token_is_untouched() {
        assert_eq!(
            split_participants("Salt and Pepper, B and C"),
            vec!["Salt and Pepper", "B", "C"]
        );
    }

    #[test]
    fn creatures_keep_their_article() {
        let list = parse_participants("a dragon, a dragon and a demon", &CreatureList::builtin());
        assert_eq!(names(&list), vec!["a dragon", "a dragon", "a demon"]);
        assert!(list.iter().all(|p| !p.player && !p.traded && p.summon.is_none()));
    }

    #[test]
    fn linked_player_detected() {
        let fragment = format!("{} and a dragon", player_link("Tom Hanks"));
        let list = parse_participants(&fragment, &CreatureList::builtin());
        assert_eq!(names(&list), vec!["Tom Hanks", "a dragon"]);
        assert!(list[0].player);
        assert!(!list[1].player);
    }

    #[test]
    fn summon_of_linked_player() {
        let fragment = format!("a fire elemental of {}", player_link("Tom"));
        let list = parse_participants(&fragment, &CreatureList::builtin());
        assert_eq!(
            list,
            vec![KillParticipant {
                name: "Tom".into(),
                player: true,
                traded: false,
                summon: Some("a fire elemental".into()),
            }]
        );
    }

    #[test]
    fn whitelisted_creature_is_not_a_summon() {
        let creatures = CreatureList::builtin();
        let p = parse_participant("lord of the elements", &creatures);
        assert_eq!(p.name, "lord of the elements");
        assert!(p.summon.is_none());

        let p = parse_participant("a lord of the elements", &creatures);
        assert_eq!(p.name, "a lord of the elements");
        assert!(p.summon.is_none());

        let p = parse_participant("an essence of darkness", &creatures);
        assert_eq!(p.name, "an essence of darkness");
        assert!(p.summon.is_none());
    }

    #[test]
    fn traded_player_flags() {
        let token = format!("{} (traded)", player_link("Old Owner"));
        let p = parse_participant(&token, &CreatureList::builtin());
        assert_eq!(p.name, "Old Owner");
        assert!(p.player);
        assert!(p.traded);
    }

    #[test]
    fn replacement_list_changes_classification() {
        let creatures = CreatureList::from_text("fire elemental of tom\n");
        let p = parse_participant("a fire elemental of tom", &creatures);
        assert_eq!(p.name, "a fire elemental of tom");
        assert!(p.summon.is_none());
    }
}
