//! Section discovery and routing.
//!
//! A character page is a sequence of `.TableContainer` blocks, each with a
//! caption (`div.Text`). [`sections`] yields them in document order;
//! [`route`] reduces one section to its extracted data.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use tibiadex_shared::{Result, TibiaDexError};

use crate::creatures::CreatureList;
use crate::fields::{ProfileScope, extract_profile};
use crate::lists::{achievements, badges, characters, deaths};
use crate::record::SectionData;
use crate::rules::NOT_FOUND_HEADING;
use crate::sanitize::normalize_text;

static CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".TableContainer").expect("valid selector"));

static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.Text").expect("valid selector"));

static ROW_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".TableContentContainer tr").expect("valid selector"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a section holds, decided by its heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    NotFound,
    CharacterInformation,
    AccountInformation,
    AccountBadges,
    AccountAchievements,
    CharacterDeaths,
    Characters,
    Unknown(String),
}

impl SectionKind {
    pub fn from_heading(heading: &str) -> Self {
        match heading {
            NOT_FOUND_HEADING => Self::NotFound,
            "Character Information" => Self::CharacterInformation,
            "Account Information" => Self::AccountInformation,
            "Account Badges" => Self::AccountBadges,
            "Account Achievements" => Self::AccountAchievements,
            "Character Deaths" => Self::CharacterDeaths,
            "Characters" => Self::Characters,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// One captioned block of the page.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub element: ElementRef<'a>,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// All sections of the document, in document order.
pub fn sections(doc: &Html) -> impl Iterator<Item = Result<Section<'_>>> {
    doc.select(&CONTAINER_SEL).map(|element| {
        let heading = section_heading(element)?;
        Ok(Section {
            kind: SectionKind::from_heading(&heading),
            element,
        })
    })
}

/// Reduce a section to its data.
///
/// The not-found sentinel surfaces as [`TibiaDexError::NotFound`] so callers
/// stop at it; unknown sections yield `None`.
pub(crate) fn route(section: &Section<'_>, creatures: &CreatureList) -> Result<Option<SectionData>> {
    let element = section.element;
    let data = match &section.kind {
        SectionKind::NotFound => return Err(TibiaDexError::NotFound),
        SectionKind::CharacterInformation => {
            SectionData::Profile(extract_profile(element, ProfileScope::Character)?)
        }
        SectionKind::AccountInformation => {
            SectionData::Profile(extract_profile(element, ProfileScope::Account)?)
        }
        SectionKind::AccountBadges => SectionData::Badges(badges::extract(element)?),
        SectionKind::AccountAchievements => {
            SectionData::Achievements(achievements::extract(element))
        }
        SectionKind::CharacterDeaths => SectionData::Deaths(deaths::extract(element, creatures)?),
        SectionKind::Characters => SectionData::Characters(characters::extract(element)),
        SectionKind::Unknown(heading) => {
            debug!(%heading, "skipping unrecognized section");
            return Ok(None);
        }
    };
    Ok(Some(data))
}

/// Rows of a section's content table.
pub(crate) fn content_rows<'a>(section: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    section.select(&ROW_SEL)
}

fn section_heading(container: ElementRef<'_>) -> Result<String> {
    container
        .select(&HEADING_SEL)
        .next()
        .and_then(|heading| heading.text().next())
        .map(normalize_text)
        .filter(|heading| !heading.is_empty())
        .ok_or_else(|| TibiaDexError::structural("section container without a heading"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(heading: &str) -> String {
        format!(
            r#"<div class="TableContainer"><div class="CaptionContainer"><div class="Text">{heading}</div></div></div>"#
        )
    }

    #[test]
    fn headings_classify() {
        assert_eq!(SectionKind::from_heading("Could not find character"), SectionKind::NotFound);
        assert_eq!(SectionKind::from_heading("Characters"), SectionKind::Characters);
        assert_eq!(
            SectionKind::from_heading("Search Character"),
            SectionKind::Unknown("Search Character".into())
        );
    }

    #[test]
    fn sections_in_document_order() {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            container("Character Deaths"),
            container("Character Information"),
            container("Search Character")
        );
        let doc = Html::parse_document(&html);
        let kinds: Vec<SectionKind> = sections(&doc).map(|s| s.unwrap().kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::CharacterDeaths,
                SectionKind::CharacterInformation,
                SectionKind::Unknown("Search Character".into()),
            ]
        );
    }

    #[test]
    fn heading_text_is_normalized() {
        let doc = Html::parse_document(&container("  Account&#160;Badges "));
        let section = sections(&doc).next().unwrap().unwrap();
        assert_eq!(section.kind, SectionKind::AccountBadges);
    }

    #[test]
    fn missing_heading_is_structural_error() {
        let doc = Html::parse_document(r#"<div class="TableContainer"><p>no caption</p></div>"#);
        let err = sections(&doc).next().unwrap().unwrap_err();
        assert!(matches!(err, TibiaDexError::StructuralParse { .. }));
    }

    #[test]
    fn sentinel_routes_to_not_found() {
        let doc = Html::parse_document(&container("Could not find character"));
        let section = sections(&doc).next().unwrap().unwrap();
        let err = route(&section, &CreatureList::builtin()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn unknown_section_routes_to_none() {
        let doc = Html::parse_document(&container("Search Character"));
        let section = sections(&doc).next().unwrap().unwrap();
        assert!(route(&section, &CreatureList::builtin()).unwrap().is_none());
    }
}
