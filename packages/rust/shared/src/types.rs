//! Core domain types for an extracted character page.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CharacterRecord
// ---------------------------------------------------------------------------

/// Everything extracted from one character page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// The character's own information block.
    pub character: Identity,
    /// Guild the character belongs to (both fields absent without a guild).
    #[serde(default)]
    pub guild: GuildMembership,
    /// Houses owned by the character, in page order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub houses: Vec<House>,
    /// Account-level information.
    #[serde(default)]
    pub account_information: AccountInfo,
    /// Badges displayed for the account.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub account_badges: Vec<Badge>,
    /// Achievements displayed for the character.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<Achievement>,
    /// Recent deaths, newest first as the page lists them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deaths: Vec<DeathEvent>,
    /// Other characters on the same account.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_characters: Vec<OtherCharacterRef>,
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The "Character Information" block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub former_names: Vec<String>,
    /// Whether the character changed owner recently.
    #[serde(default)]
    pub traded: bool,
    /// When the character is scheduled for deletion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<DateTime<Utc>>,
    pub sex: String,
    /// Selected title and the number of unlocked titles.
    #[serde(flatten)]
    pub title: Option<CharacterTitle>,
    pub vocation: String,
    pub level: u32,
    pub achievement_points: u32,
    pub world: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub former_worlds: Vec<String>,
    pub residence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub married_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub account_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Special position such as a staff role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// A title always comes with the count of unlocked titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTitle {
    #[serde(rename = "title")]
    pub name: String,
    pub unlocked_titles: u32,
}

/// Guild name and rank; both absent when the character has no guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMembership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

/// A house owned by the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub name: String,
    pub town: String,
    /// Date the last paid rent runs out.
    pub paid: NaiveDate,
    #[serde(rename = "houseid")]
    pub house_id: u32,
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// The "Account Information" block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub icon_url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    /// Number of stars.
    pub grade: u32,
    pub secret: bool,
}

// ---------------------------------------------------------------------------
// Deaths
// ---------------------------------------------------------------------------

/// One entry of the "Character Deaths" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    pub time: DateTime<Utc>,
    pub level: u32,
    pub killers: Vec<KillParticipant>,
    pub assists: Vec<KillParticipant>,
    /// The death sentence as plain text.
    pub reason: String,
}

/// A killer or assist named in a death entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillParticipant {
    pub name: String,
    pub player: bool,
    /// The player was traded after the death.
    pub traded: bool,
    /// Summoned creature that dealt the damage on the player's behalf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summon: Option<String>,
}

// ---------------------------------------------------------------------------
// Other characters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Online,
    Offline,
}

impl std::fmt::Display for OnlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// Another character listed on the same account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherCharacterRef {
    pub name: String,
    pub world: String,
    pub status: OnlineStatus,
    pub deleted: bool,
    pub main: bool,
    pub traded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}
