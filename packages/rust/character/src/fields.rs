//! Label/value rows of the "Character Information" and "Account Information"
//! sections.
//!
//! Each row becomes at most one [`Field`]; the record assembler applies them
//! in page order.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Node, Selector};
use tracing::{debug, trace};
use url::Url;

use tibiadex_shared::{CharacterTitle, GuildMembership, House, Result, TibiaDexError};

use crate::rules::{
    DELETION_MARKER, GUILD_RANK_SUFFIX, HOUSE_ID_PARAM, HOUSE_PAID_PHRASE, NEVER_LOGGED_IN,
    NO_LOYALTY_TITLE, SITE_BASE_URL, TITLE_RE, TRADED_MARKER,
};
use crate::sanitize::{normalize_text, parse_count, parse_date, parse_timestamp};
use crate::sections::content_rows;

static LABEL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"td[class^="Label"]"#).expect("valid selector"));

static LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Which section a row came from; decides where "Position" lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileScope {
    Character,
    Account,
}

/// One recognized label/value row.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Name {
        name: String,
        traded: bool,
        deletion_date: Option<DateTime<Utc>>,
    },
    FormerNames(Vec<String>),
    Sex(String),
    Title(CharacterTitle),
    Vocation(String),
    Level(u32),
    AchievementPoints(u32),
    World(String),
    FormerWorlds(Vec<String>),
    Residence(String),
    MarriedTo(String),
    House(House),
    Guild(GuildMembership),
    LastLogin(DateTime<Utc>),
    AccountStatus(String),
    Comment(String),
    LoyaltyTitle(String),
    Created(DateTime<Utc>),
    Position {
        scope: ProfileScope,
        position: String,
    },
}

/// Extract every recognized row of a profile section.
pub fn extract_profile(section: ElementRef<'_>, scope: ProfileScope) -> Result<Vec<Field>> {
    let mut fields = Vec::new();

    for row in content_rows(section) {
        let label_cell = row
            .select(&LABEL_SEL)
            .next()
            .ok_or_else(|| TibiaDexError::structural("profile row without a label cell"))?;
        let value_cell = label_cell
            .next_siblings()
            .find_map(ElementRef::wrap)
            .ok_or_else(|| TibiaDexError::structural("profile row without a value cell"))?;

        let label = normalize_label(&label_cell.text().collect::<String>());
        if let Some(field) = extract_field(&label, value_cell, scope)? {
            trace!(%label, ?field, "extracted field");
            fields.push(field);
        }
    }

    Ok(fields)
}

/// `" Name: "` → `"Name"`.
fn normalize_label(raw: &str) -> String {
    normalize_text(raw).trim_end_matches(':').trim_end().to_string()
}

fn extract_field(label: &str, value: ElementRef<'_>, scope: ProfileScope) -> Result<Option<Field>> {
    let text = leading_text(value);

    let field = match label {
        "Name" => extract_name(&text, value)?,
        "Former Names" => Field::FormerNames(split_list(&text)),
        "Sex" => Field::Sex(text),
        "Title" => Field::Title(extract_title(&text)?),
        "Vocation" => Field::Vocation(text),
        "Level" => Field::Level(parse_count(&text)?),
        "Achievement Points" => Field::AchievementPoints(parse_count(&text)?),
        "World" => Field::World(text),
        "Former World" | "Former Worlds" => Field::FormerWorlds(split_list(&text)),
        "Residence" => Field::Residence(text),
        "Account Status" => Field::AccountStatus(text),
        "Married To" => Field::MarriedTo(link_text(value, "Married To")?),
        "House" => Field::House(extract_house(value)?),
        "Guild Membership" => Field::Guild(extract_guild(&text, value)?),
        "Last Login" if text == NEVER_LOGGED_IN => return Ok(None),
        "Last Login" => Field::LastLogin(parse_timestamp(&text)?),
        "Comment" => match extract_comment(value) {
            Some(comment) => Field::Comment(comment),
            None => return Ok(None),
        },
        "Loyalty Title" if text == NO_LOYALTY_TITLE => return Ok(None),
        "Loyalty Title" => Field::LoyaltyTitle(text),
        "Created" => Field::Created(parse_timestamp(&text)?),
        "Position" => Field::Position {
            scope,
            position: before_markup(&text),
        },
        other => {
            debug!(label = %other, value = %text, "unrecognized profile label");
            return Ok(None);
        }
    };

    Ok(Some(field))
}

// ---------------------------------------------------------------------------
// Per-label extraction
// ---------------------------------------------------------------------------

fn extract_name(text: &str, value: ElementRef<'_>) -> Result<Field> {
    let mut name = before_markup(text);
    let mut deletion_date = None;

    if let Some((plain, date)) = name.split_once(DELETION_MARKER) {
        deletion_date = Some(parse_timestamp(date)?);
        name = plain.trim().to_string();
    }

    let traded = normalize_text(&value.text().collect::<String>()).contains(TRADED_MARKER);
    if traded {
        name = name.replace(TRADED_MARKER, "").trim().to_string();
    }

    Ok(Field::Name {
        name,
        traded,
        deletion_date,
    })
}

fn extract_title(text: &str) -> Result<CharacterTitle> {
    let caps = TITLE_RE
        .captures(text)
        .ok_or_else(|| TibiaDexError::structural(format!("title row did not match: {text:?}")))?;
    Ok(CharacterTitle {
        name: caps[1].to_string(),
        unlocked_titles: parse_count(&caps[2])?,
    })
}

fn extract_house(value: ElementRef<'_>) -> Result<House> {
    let link = value
        .select(&LINK_SEL)
        .next()
        .ok_or_else(|| TibiaDexError::structural("house row without a link"))?;
    let name = normalize_text(&link.text().collect::<String>());
    let href = link
        .value()
        .attr("href")
        .ok_or_else(|| TibiaDexError::structural("house link without href"))?;
    let house_id = house_id_from_href(href)?;

    let trailing = value
        .last_child()
        .and_then(|node| node.value().as_text().map(|t| normalize_text(t)))
        .ok_or_else(|| TibiaDexError::structural("house row without trailing text"))?;

    let town = parenthesized(&trailing)
        .ok_or_else(|| TibiaDexError::structural(format!("house row without town: {trailing:?}")))?;
    let paid = trailing
        .find(HOUSE_PAID_PHRASE)
        .map(|at| &trailing[at + HOUSE_PAID_PHRASE.len()..])
        .ok_or_else(|| {
            TibiaDexError::structural(format!("house row without paid date: {trailing:?}"))
        })?;

    Ok(House {
        name,
        town: town.to_string(),
        paid: parse_date(paid)?,
        house_id,
    })
}

fn house_id_from_href(href: &str) -> Result<u32> {
    let base = Url::parse(SITE_BASE_URL)
        .map_err(|e| TibiaDexError::structural(format!("bad site base url: {e}")))?;
    let url = base
        .join(href)
        .map_err(|e| TibiaDexError::structural(format!("bad house link {href:?}: {e}")))?;
    let id = url
        .query_pairs()
        .find_map(|(key, value)| (key == HOUSE_ID_PARAM).then(|| value.into_owned()))
        .ok_or_else(|| TibiaDexError::structural(format!("house link without id: {href:?}")))?;
    parse_count(&id)
}

fn extract_guild(text: &str, value: ElementRef<'_>) -> Result<GuildMembership> {
    let rank = text
        .strip_suffix(GUILD_RANK_SUFFIX)
        .unwrap_or(text)
        .trim()
        .to_string();

    // The guild name is the text inside the trailing guild link.
    let name = value
        .last_child()
        .and_then(ElementRef::wrap)
        .and_then(|link| link.last_child())
        .and_then(|node| node.value().as_text().map(|t| normalize_text(t)))
        .ok_or_else(|| TibiaDexError::structural("guild row without a guild link"))?;

    Ok(GuildMembership {
        name: Some(name),
        rank: Some(rank),
    })
}

/// Text of every child of the comment cell; `<br>` nodes are dropped since
/// the adjacent text already carries the newline.
fn extract_comment(value: ElementRef<'_>) -> Option<String> {
    let mut comment = String::new();
    for node in value.children() {
        match node.value() {
            Node::Text(text) => comment.push_str(text),
            Node::Element(el) if el.name() == "br" => {}
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(node) {
                    comment.extend(el.text());
                }
            }
            _ => {}
        }
    }

    let comment = comment.trim();
    (!comment.is_empty()).then(|| comment.to_string())
}

fn link_text(value: ElementRef<'_>, label: &str) -> Result<String> {
    value
        .select(&LINK_SEL)
        .next()
        .map(|link| normalize_text(&link.text().collect::<String>()))
        .ok_or_else(|| TibiaDexError::structural(format!("{label} row without a link")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Text of the value cell's first child, whitespace-normalized.
fn leading_text(value: ElementRef<'_>) -> String {
    let Some(first) = value.first_child() else {
        return String::new();
    };
    match first.value() {
        Node::Text(text) => normalize_text(text),
        Node::Element(_) => ElementRef::wrap(first)
            .map(|el| normalize_text(&el.text().collect::<String>()))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Everything before an inline markup fragment, trimmed.
fn before_markup(text: &str) -> String {
    text.split('<').next().unwrap_or_default().trim().to_string()
}

fn split_list(text: &str) -> Vec<String> {
    text.split(", ")
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parenthesized(text: &str) -> Option<&str> {
    let open = text.find('(')?;
    let close = text[open..].find(')')? + open;
    Some(&text[open + 1..close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scraper::Html;

    fn profile_doc(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div class="TableContainer"><div class="TableContentContainer"><table class="TableContent">{rows}</table></div></div></body></html>"#
        ))
    }

    fn extract_rows(rows: &str, scope: ProfileScope) -> Result<Vec<Field>> {
        let doc = profile_doc(rows);
        let section = doc
            .select(&Selector::parse(".TableContainer").unwrap())
            .next()
            .unwrap();
        extract_profile(section, scope)
    }

    fn row(label: &str, value: &str) -> String {
        format!(r#"<tr><td class="LabelV175">{label}</td><td>{value}</td></tr>"#)
    }

    fn single(label: &str, value: &str) -> Field {
        let mut fields = extract_rows(&row(label, value), ProfileScope::Character).unwrap();
        assert_eq!(fields.len(), 1, "expected one field for {label}");
        fields.remove(0)
    }

    #[test]
    fn plain_name() {
        assert_eq!(
            single("Name:", "Bubble"),
            Field::Name {
                name: "Bubble".into(),
                traded: false,
                deletion_date: None,
            }
        );
    }

    #[test]
    fn name_with_deletion_and_trade() {
        let field = single(
            "Name:",
            "Bubble (traded), will be deleted at Mar&#160;03&#160;2024,&#160;09:15:00&#160;CET",
        );
        let Field::Name {
            name,
            traded,
            deletion_date,
        } = field
        else {
            panic!("expected name field");
        };
        assert_eq!(name, "Bubble");
        assert!(traded);
        assert_eq!(
            deletion_date.unwrap().to_rfc3339(),
            "2024-03-03T08:15:00+00:00"
        );
    }

    #[test]
    fn label_with_nobr_wrapper() {
        let rows = r#"<tr><td class="LabelV175"><nobr>Achievement Points:</nobr></td><td>1,024</td></tr>"#;
        let fields = extract_rows(rows, ProfileScope::Character).unwrap();
        assert_eq!(fields, vec![Field::AchievementPoints(1024)]);
    }

    #[test]
    fn title_with_unlocked_count() {
        assert_eq!(
            single("Title:", "Costumed Freak (3 titles unlocked)"),
            Field::Title(CharacterTitle {
                name: "Costumed Freak".into(),
                unlocked_titles: 3,
            })
        );
    }

    #[test]
    fn title_without_count_is_error() {
        let err = extract_rows(&row("Title:", "Costumed Freak"), ProfileScope::Character)
            .unwrap_err();
        assert!(matches!(err, TibiaDexError::StructuralParse { .. }));
    }

    #[test]
    fn lists_keep_order() {
        assert_eq!(
            single("Former Names:", "Zeta, Alpha, Mid"),
            Field::FormerNames(vec!["Zeta".into(), "Alpha".into(), "Mid".into()])
        );
        assert_eq!(
            single("Former World:", "Secura, Inabra"),
            Field::FormerWorlds(vec!["Secura".into(), "Inabra".into()])
        );
        assert_eq!(
            single("Former Worlds:", "Secura"),
            Field::FormerWorlds(vec!["Secura".into()])
        );
    }

    #[test]
    fn house_row() {
        let value = r#"<a href="https://www.tibia.com/community/?subtopic=houses&amp;page=view&amp;world=Antica&amp;houseid=1234&amp;character=X">Harbour Flats, Flat 11</a> (Rathleton) is paid until Jan 10 2024"#;
        assert_eq!(
            single("House:", value),
            Field::House(House {
                name: "Harbour Flats, Flat 11".into(),
                town: "Rathleton".into(),
                paid: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                house_id: 1234,
            })
        );
    }

    #[test]
    fn house_with_relative_link() {
        let value = r#"<a href="/community/?subtopic=houses&amp;houseid=77&amp;character=X">Cellar</a> (Thais) is paid until Feb&#160;01&#160;2024"#;
        let Field::House(house) = single("House:", value) else {
            panic!("expected house field");
        };
        assert_eq!(house.house_id, 77);
        assert_eq!(house.town, "Thais");
    }

    #[test]
    fn house_without_link_is_error() {
        let err = extract_rows(
            &row("House:", "Cellar (Thais) is paid until Jan 10 2024"),
            ProfileScope::Character,
        )
        .unwrap_err();
        assert!(err.to_string().contains("house row without a link"));
    }

    #[test]
    fn guild_membership() {
        let value = r#"Leader of the <a href="https://www.tibia.com/community/?subtopic=guilds&amp;page=view&amp;GuildName=Red+Rose">Red&#160;Rose</a>"#;
        assert_eq!(
            single("Guild Membership:", value),
            Field::Guild(GuildMembership {
                name: Some("Red Rose".into()),
                rank: Some("Leader".into()),
            })
        );
    }

    #[test]
    fn guild_without_link_is_error() {
        let err = extract_rows(&row("Guild Membership:", "Leader of the "), ProfileScope::Character)
            .unwrap_err();
        assert!(matches!(err, TibiaDexError::StructuralParse { .. }));
    }

    #[test]
    fn married_to_reads_link() {
        let value = r#"<a href="https://www.tibia.com/community/?subtopic=characters&amp;name=Ann">Ann</a>"#;
        assert_eq!(single("Married To:", value), Field::MarriedTo("Ann".into()));
    }

    #[test]
    fn never_logged_in_is_absent() {
        let fields = extract_rows(&row("Last Login:", "never logged in"), ProfileScope::Character)
            .unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn no_loyalty_title_is_absent() {
        let fields = extract_rows(&row("Loyalty Title:", "(no title)"), ProfileScope::Account)
            .unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn comment_skips_line_breaks() {
        let field = single("Comment:", "Hello there!<br>\nNice to meet you &amp; welcome.");
        let Field::Comment(comment) = field else {
            panic!("expected comment field");
        };
        assert!(!comment.contains("<br"));
        assert!(comment.starts_with("Hello there!"));
        assert!(comment.ends_with("Nice to meet you & welcome."));
    }

    #[test]
    fn position_follows_scope() {
        let value = r#"Community Manager<img src="https://static.tibia.com/images/global/content/info.gif" alt="info">"#;
        let fields = extract_rows(&row("Position:", value), ProfileScope::Account).unwrap();
        assert_eq!(
            fields,
            vec![Field::Position {
                scope: ProfileScope::Account,
                position: "Community Manager".into(),
            }]
        );
    }

    #[test]
    fn unknown_label_is_skipped() {
        let rows = format!("{}{}", row("Bonus:", "whatever"), row("Level:", "87"));
        let fields = extract_rows(&rows, ProfileScope::Character).unwrap();
        assert_eq!(fields, vec![Field::Level(87)]);
    }

    #[test]
    fn row_without_label_is_error() {
        let err = extract_rows("<tr><td>orphan</td></tr>", ProfileScope::Character).unwrap_err();
        assert!(err.to_string().contains("label cell"));
    }
}
