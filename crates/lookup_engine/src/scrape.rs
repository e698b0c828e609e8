//! Scraping boundary for dictionary entry pages.
//!
//! The markup belongs to the dictionary site and changes without notice; every
//! selector lives here.

use std::fmt;

use lookup_core::DictionarySite;
use scraper::{Html, Selector};

const HEADWORD_SELECTOR: &str = "span.hw.dhw";

/// Pronunciation region, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Us,
    Uk,
}

impl Accent {
    pub const PREFERENCE: [Accent; 2] = [Accent::Us, Accent::Uk];

    fn source_selector(self) -> String {
        let region = match self {
            Accent::Us => "us",
            Accent::Uk => "uk",
        };
        format!(r#"span.{region}.dpron-i source[src$=".mp3"]"#)
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accent::Us => write!(f, "US"),
            Accent::Uk => write!(f, "UK"),
        }
    }
}

/// A parsed entry page. Not `Send`; parse after the last await.
pub struct DictionaryPage {
    doc: Html,
}

impl DictionaryPage {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// Text of the first headword marker, trimmed. `None` when absent or blank.
    pub fn headword(&self) -> Option<String> {
        let selector = Selector::parse(HEADWORD_SELECTOR).ok()?;
        self.doc
            .select(&selector)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Raw `src` of the first `.mp3` source inside the accent's pronunciation block.
    pub fn audio_source(&self, accent: Accent) -> Option<String> {
        let selector = Selector::parse(&accent.source_selector()).ok()?;
        self.doc
            .select(&selector)
            .filter_map(|node| node.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty())
            .map(ToOwned::to_owned)
    }

    /// Absolute audio URL for the accent, if the page carries one.
    pub fn audio_url(&self, accent: Accent, site: &DictionarySite) -> Option<String> {
        self.audio_source(accent)
            .and_then(|src| site.resolve_audio_source(&src))
    }
}

pub fn extract_headword(html: &str) -> Option<String> {
    DictionaryPage::parse(html).headword()
}

pub fn extract_audio_url(html: &str, accent: Accent, site: &DictionarySite) -> Option<String> {
    DictionaryPage::parse(html).audio_url(accent, site)
}
