//! Text normalization shared by every extractor.
//!
//! Values come from two places: text nodes of the parsed tree (already
//! entity-decoded) and regex captures over serialized row markup (still
//! escaped). Captures go through [`clean_fragment`]; tree text only needs
//! [`normalize_text`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use scraper::Html;

use tibiadex_shared::{Result, TibiaDexError};

/// Timestamp layout used on the site, e.g. `Jan 10 2024, 12:34:56`.
const TIMESTAMP_FORMAT: &str = "%b %d %Y, %H:%M:%S";

/// Date layout used on the site, e.g. `Jan 10 2024`.
const DATE_FORMAT: &str = "%b %d %Y";

/// Drop the line breaks of serialized markup so row patterns see one line.
pub fn remove_linebreaks(s: &str) -> String {
    s.replace(['\n', '\r'], "")
}

/// Collapse whitespace runs (non-breaking spaces included) and trim.
pub fn normalize_text(s: &str) -> String {
    // char::is_whitespace covers U+00A0, which the site uses between date parts.
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every tag from an HTML fragment and decode its entities.
pub fn strip_markup(fragment: &str) -> String {
    if !fragment.contains(['<', '&']) {
        return fragment.to_string();
    }
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect()
}

/// Plain, whitespace-normalized text of a serialized fragment.
pub fn clean_fragment(fragment: &str) -> String {
    normalize_text(&strip_markup(fragment))
}

/// Parse a non-negative count such as a level or `1,024` achievement points.
pub fn parse_count(raw: &str) -> Result<u32> {
    let digits = normalize_text(raw).replace(',', "");
    digits
        .parse::<u32>()
        .map_err(|e| TibiaDexError::structural(format!("expected a number, got {raw:?}: {e}")))
}

/// Normalize a site timestamp (`Jan 10 2024, 12:34:56 CET`) to UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let text = normalize_text(raw);
    let (stamp, zone) = text
        .rsplit_once(' ')
        .ok_or_else(|| TibiaDexError::structural(format!("timestamp without zone: {text:?}")))?;

    let offset_secs = match zone {
        "CET" => 3600,
        "CEST" => 7200,
        "UTC" | "GMT" => 0,
        other => {
            return Err(TibiaDexError::structural(format!(
                "unknown timezone {other:?} in {text:?}"
            )));
        }
    };

    let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
        .map_err(|e| TibiaDexError::structural(format!("bad timestamp {text:?}: {e}")))?;
    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| TibiaDexError::structural(format!("bad offset for {zone}")))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| TibiaDexError::structural(format!("ambiguous timestamp {text:?}")))
}

/// Normalize a site date (`Jan 10 2024`, commas tolerated).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let text = normalize_text(&raw.replace(',', ""));
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|e| TibiaDexError::structural(format!("bad date {text:?}: {e}")))
}
