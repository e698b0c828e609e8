use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use lookup_core::{derive_base_form, DictionarySite};

use crate::decode::decode_text;
use crate::fetch::Fetcher;
use crate::scrape::{Accent, DictionaryPage};

/// Finds a pronunciation clip for a word on the dictionary site.
///
/// The exact word is tried first; if that yields nothing, one retry is made
/// with a suffix-stripped base form. Every failure collapses to `None`.
#[derive(Clone)]
pub struct AudioResolver {
    fetcher: Arc<dyn Fetcher>,
    site: DictionarySite,
}

impl AudioResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>, site: DictionarySite) -> Self {
        Self { fetcher, site }
    }

    pub async fn resolve_audio(&self, word: &str) -> Option<String> {
        if let Some(url) = self.attempt(word).await {
            return Some(url);
        }

        let word = word.trim();
        let base = derive_base_form(word)?;
        if base.to_lowercase() == word.to_lowercase() {
            return None;
        }
        engine_info!("Audio: retrying \"{}\" as base form \"{}\"", word, base);
        self.attempt(base).await
    }

    /// One fetch-and-scrape pass for exactly `candidate`.
    pub async fn attempt(&self, candidate: &str) -> Option<String> {
        let page_url = self.site.audio_page_url(candidate)?;
        engine_debug!("Audio: fetching {}", page_url);

        let output = match self.fetcher.fetch(&page_url).await {
            Ok(output) => output,
            Err(err) => {
                engine_warn!("Audio: fetch failed for \"{}\": {}", candidate, err);
                return None;
            }
        };
        if output.metadata.redirect_count > 0 {
            engine_debug!(
                "Audio: {} redirected {} time(s) to {}",
                page_url,
                output.metadata.redirect_count,
                output.metadata.final_url
            );
        }
        let decoded = decode_text(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_errors {
            engine_debug!("Audio: {} decoded lossily as {}", page_url, decoded.encoding);
        }

        select_audio(&decoded.text, candidate, &self.site)
    }
}

fn select_audio(html: &str, candidate: &str, site: &DictionarySite) -> Option<String> {
    let page = DictionaryPage::parse(html);

    let Some(headword) = page.headword() else {
        engine_warn!("Audio: no headword on page for \"{}\"", candidate);
        return None;
    };
    let requested = candidate.trim().to_lowercase();
    if headword.to_lowercase() != requested {
        engine_info!(
            "Audio: requested \"{}\" does not match headword \"{}\"",
            requested,
            headword
        );
        return None;
    }

    for accent in Accent::PREFERENCE {
        if let Some(url) = page.audio_url(accent, site) {
            engine_info!("Audio: {} clip for \"{}\": {}", accent, requested, url);
            return Some(url);
        }
    }

    engine_warn!("Audio: no clip found for \"{}\"", requested);
    None
}
