//! Extractors for sections made of repeated rows.
//!
//! Each extractor serializes a row with `inner_html`, strips line breaks and
//! applies the row pattern from [`crate::rules`].

pub mod achievements;
pub mod badges;
pub mod characters;
pub mod deaths;

use scraper::ElementRef;

use crate::sanitize::remove_linebreaks;
use crate::sections::content_rows;

/// Serialized markup of every content row, one line each.
pub(crate) fn row_fragments(section: ElementRef<'_>) -> impl Iterator<Item = String> + '_ {
    content_rows(section).map(|row| remove_linebreaks(&row.inner_html()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use scraper::{ElementRef, Html, Selector};

    /// Wrap table rows in a minimal section container.
    pub fn section_doc(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div class="TableContainer"><div class="CaptionContainer"><div class="Text">Test</div></div><div class="TableContentContainer"><table class="TableContent">{rows}</table></div></div></body></html>"#
        ))
    }

    pub fn section(doc: &Html) -> ElementRef<'_> {
        doc.select(&Selector::parse(".TableContainer").unwrap())
            .next()
            .unwrap()
    }
}
