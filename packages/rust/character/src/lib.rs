//! Character page extraction for TibiaDex.
//!
//! Turns one captured character page into a [`CharacterRecord`]:
//! sections are discovered in document order, each is reduced by its
//! extractor, and the results are folded into a single record.
//!
//! ```no_run
//! let html = std::fs::read_to_string("character.html").unwrap();
//! match tibiadex_character::parse_character(&html) {
//!     Ok(record) => println!("{}", record.character.name),
//!     Err(e) if e.is_not_found() => println!("no such character"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod creatures;
pub mod fields;
pub mod killers;
pub mod lists;
mod record;
pub mod rules;
pub mod sanitize;
pub mod sections;

use std::sync::LazyLock;

use scraper::Html;
use tracing::{debug, instrument};

use tibiadex_shared::{CharacterRecord, Result, TibiaDexError};

pub use creatures::CreatureList;
pub use sections::{Section, SectionKind};

use record::RecordBuilder;

static DEFAULT_PARSER: LazyLock<CharacterParser> = LazyLock::new(CharacterParser::default);

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Extracts character records; holds the creature list used to tell summons
/// apart from creatures whose name contains "of".
#[derive(Debug, Clone)]
pub struct CharacterParser {
    creatures: CreatureList,
}

impl Default for CharacterParser {
    fn default() -> Self {
        Self::new(CreatureList::builtin())
    }
}

impl CharacterParser {
    pub fn new(creatures: CreatureList) -> Self {
        Self { creatures }
    }

    pub fn creatures(&self) -> &CreatureList {
        &self.creatures
    }

    /// Parse one character page.
    ///
    /// Stops at the first failing section; no partial record is returned.
    /// A page showing the "not found" notice, or one from which nothing
    /// was extracted, yields [`TibiaDexError::NotFound`].
    #[instrument(skip_all, fields(len = html.len()))]
    pub fn parse(&self, html: &str) -> Result<CharacterRecord> {
        if html.trim().is_empty() {
            return Err(TibiaDexError::malformed("empty document"));
        }

        let doc = Html::parse_document(html);
        let builder = sections::sections(&doc).try_fold(
            RecordBuilder::default(),
            |builder, section| -> Result<RecordBuilder> {
                let section = section?;
                debug!(kind = ?section.kind, "processing section");
                Ok(match sections::route(&section, &self.creatures)? {
                    Some(data) => builder.absorb(data),
                    None => builder,
                })
            },
        )?;

        builder.finish()
    }
}

/// Parse a character page with the built-in creature list.
pub fn parse_character(html: &str) -> Result<CharacterRecord> {
    DEFAULT_PARSER.parse(html)
}
