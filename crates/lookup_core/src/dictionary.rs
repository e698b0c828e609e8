use url::Url;

pub const DEFAULT_DICTIONARY_BASE: &str = "https://dictionary.cambridge.org";

const ENTRY_PATH: [&str; 2] = ["dictionary", "english"];

/// Builds entry addresses on the dictionary site and recognises its pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySite {
    base: Url,
}

impl Default for DictionarySite {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_DICTIONARY_BASE).expect("default dictionary base is valid"),
        }
    }
}

impl DictionarySite {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Address of the page shown in the lookup tab. `None` for blank queries
    /// and for `.`/`..`, which cannot be a path segment.
    pub fn lookup_url(&self, query: &str) -> Option<String> {
        self.entry_url(query.trim())
    }

    /// Address fetched to resolve pronunciation audio; the word is lower-cased.
    pub fn audio_page_url(&self, word: &str) -> Option<String> {
        if word.trim().is_empty() {
            return None;
        }
        self.entry_url(&word.to_lowercase())
    }

    /// Every page of the dictionary site starts with this prefix.
    pub fn site_prefix(&self) -> String {
        let base = self.base.as_str();
        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        }
    }

    pub fn is_dictionary_page(&self, url: &str) -> bool {
        url.starts_with(&self.site_prefix())
    }

    /// Makes an audio `src` attribute absolute. Sources already starting with
    /// `http` are returned unchanged.
    pub fn resolve_audio_source(&self, src: &str) -> Option<String> {
        if src.starts_with("http") {
            return Some(src.to_string());
        }
        self.base.join(src).ok().map(String::from)
    }

    fn entry_url(&self, segment: &str) -> Option<String> {
        if matches!(segment, "" | "." | "..") {
            return None;
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(ENTRY_PATH)
            .push(segment);
        Some(url.into())
    }
}
