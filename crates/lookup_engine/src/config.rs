use lookup_core::DictionarySite;

use crate::fetch::FetchSettings;

/// Generic clip served for entries without a recording of their own.
pub const PLACEHOLDER_AUDIO_URL: &str =
    "https://dictionary.cambridge.org/media/english/uk_pron/u/ukz/ukzit/ukzit__004.mp3";

#[derive(Debug, Clone)]
pub struct DictionarySettings {
    pub site: DictionarySite,
    /// Resolved clips equal to one of these are reported as "no audio".
    pub ignored_audio_urls: Vec<String>,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            site: DictionarySite::default(),
            ignored_audio_urls: vec![PLACEHOLDER_AUDIO_URL.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub dictionary: DictionarySettings,
}

impl EngineConfig {
    pub fn with_site(site: DictionarySite) -> Self {
        Self {
            dictionary: DictionarySettings {
                site,
                ..DictionarySettings::default()
            },
            ..Self::default()
        }
    }
}
