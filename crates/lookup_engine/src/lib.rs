//! Lookup engine: dictionary fetching, audio resolution and lookup tab coordination.
mod config;
mod coordinator;
mod decode;
mod engine;
mod fetch;
mod message;
mod resolver;
mod scrape;
mod selection;
mod tabs;
mod types;

pub use config::{DictionarySettings, EngineConfig, PLACEHOLDER_AUDIO_URL};
pub use coordinator::{open_or_update, CoordinatorHandle, TabCoordinator};
pub use decode::{decode_text, DecodedText};
pub use engine::LookupEngine;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use message::{
    AgentQuery, ContextMenuEntry, Request, Response, SelectedTextReply, LOOKUP_MENU_ID,
    LOOKUP_MENU_TITLE,
};
pub use resolver::AudioResolver;
pub use scrape::{extract_audio_url, extract_headword, Accent, DictionaryPage};
pub use selection::{ProbeError, SelectionProbe};
pub use tabs::{TabApi, TabError, TabInfo};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
