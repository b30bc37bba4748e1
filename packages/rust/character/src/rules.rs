//! Extraction rules tied to the character page markup.
//!
//! Row patterns run against `ElementRef::inner_html` output with line breaks
//! removed, so they expect html5ever's serialization: double-quoted
//! attributes, `&nbsp;` for non-breaking spaces, void tags without a slash.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Literal markers
// ---------------------------------------------------------------------------

/// Heading of the section shown instead of a character.
pub const NOT_FOUND_HEADING: &str = "Could not find character";

/// Suffix attached to names of recently traded characters.
pub const TRADED_MARKER: &str = " (traded)";

/// Separates a name from its scheduled deletion date.
pub const DELETION_MARKER: &str = ", will be deleted at ";

pub const NEVER_LOGGED_IN: &str = "never logged in";

pub const NO_LOYALTY_TITLE: &str = "(no title)";

pub const NO_BADGES_PLACEHOLDER: &str =
    "There are no account badges set to be displayed for this character.";

/// Trails the rank in a guild membership row, before the guild link.
pub const GUILD_RANK_SUFFIX: &str = "of the";

pub const HOUSE_PAID_PHRASE: &str = "is paid until ";

/// Query parameter carrying the house id in house links.
pub const HOUSE_ID_PARAM: &str = "houseid";

/// Base for resolving relative links found on the page.
pub const SITE_BASE_URL: &str = "https://www.tibia.com/";

/// Link target of character profile pages; its presence marks a player.
pub const PLAYER_PROFILE_MARKER: &str = "https://www.tibia.com/community/?subtopic=characters";

/// Joins the killers and the assists of one death entry.
pub const ASSIST_SEPARATOR: &str = ". Assisted by ";

pub const GRADE_MARKER: &str = "achievement-grade-symbol";

pub const SECRET_MARKER: &str = "achievement-secret-symbol";

pub const MAIN_CHARACTER_MARKER: &str = "Main Character";

pub const ONLINE_MARKER: &str = r#"<b class="green">online</b>"#;

pub const DELETED_MARKER: &str = "deleted";

/// Special position shown for staff characters.
pub const STAFF_POSITION: &str = "CipSoft Member";

// ---------------------------------------------------------------------------
// Patterns (compiled once)
// ---------------------------------------------------------------------------

/// `Costumed Freak (3 titles unlocked)` → title, count.
pub static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) \(([0-9]+).*$").expect("title regex"));

/// Death row → timestamp, description, level, killer fragment.
pub static DEATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<td[^>]*>(.*?)</td>\s*<td[^>]*>(.*) at Level ([0-9]+) by (.*)\.</td>")
        .expect("death regex")
});

/// Assists are printed on their own line after the killers.
pub static ASSIST_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.<br\s*/?>\s*Assisted by").expect("assist break regex"));

/// `a fire elemental of Tom` → summon, owner.
pub static SUMMON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(an? .+) of ([^<]+)").expect("summon regex"));

/// Helper-popup call of a badge → name, description, icon URL.
pub static BADGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\(this\), '((?:[^'\\]|\\.)*)', '((?:[^'\\]|\\.)*)',.*?src="([^"]*)""#,
    )
    .expect("badge regex")
});

/// Achievement row → grade markup, name markup.
pub static ACHIEVEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<td class="[a-zA-Z0-9_.\- ]+">(.*?)</td>\s*<td[^>]*>(.*)</td>"#)
        .expect("achievement regex")
});

/// Account character row → name fragment, world, status fragment.
pub static OTHER_CHARACTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<td[^>]*><nobr>[0-9]+\.(?:&nbsp;|\s)(.*?)</nobr></td>\s*<td[^>]*><nobr>(.*?)</nobr></td>\s*<td[^>]*>(.*?)</td>",
    )
    .expect("other character regex")
});
