use std::sync::{Arc, Mutex};

use engine_logging::{engine_debug, engine_info, engine_warn};
use lookup_core::{DictionarySite, SelectionState, TabId};

use crate::config::EngineConfig;
use crate::coordinator::{CoordinatorHandle, TabCoordinator};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::message::{ContextMenuEntry, Request, Response, LOOKUP_MENU_ID};
use crate::resolver::AudioResolver;
use crate::selection::SelectionProbe;
use crate::tabs::TabApi;

/// Background-side message handling: owns the lookup tab coordinator, the
/// audio resolver and the last observed selection.
pub struct LookupEngine {
    coordinator: CoordinatorHandle,
    resolver: AudioResolver,
    site: DictionarySite,
    ignored_audio_urls: Vec<String>,
    selection: Mutex<SelectionState>,
    probe: Arc<dyn SelectionProbe>,
}

impl LookupEngine {
    /// Must be called from within a tokio runtime.
    pub fn start(
        config: EngineConfig,
        tabs: Arc<dyn TabApi>,
        probe: Arc<dyn SelectionProbe>,
    ) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher, tabs, probe)
    }

    pub fn with_fetcher(
        config: EngineConfig,
        fetcher: Arc<dyn Fetcher>,
        tabs: Arc<dyn TabApi>,
        probe: Arc<dyn SelectionProbe>,
    ) -> Self {
        let site = config.dictionary.site;
        Self {
            coordinator: TabCoordinator::spawn(tabs, site.clone()),
            resolver: AudioResolver::new(fetcher, site.clone()),
            site,
            ignored_audio_urls: config.dictionary.ignored_audio_urls,
            selection: Mutex::new(SelectionState::new()),
            probe,
        }
    }

    pub fn coordinator(&self) -> &CoordinatorHandle {
        &self.coordinator
    }

    pub fn context_menu(&self) -> ContextMenuEntry {
        ContextMenuEntry::lookup()
    }

    /// Handles one request; `None` for fire-and-forget actions.
    pub async fn handle(&self, request: Request) -> Option<Response> {
        engine_debug!("Message received: {:?}", request);
        match request {
            Request::UpdateSelectedText { text } => {
                self.lock_selection(|selection| selection.update_selected_text(text));
                None
            }
            Request::GetSelectedText { tab_id } => {
                let text = self.selected_text(tab_id).await;
                Some(Response::SelectedText { text })
            }
            Request::OpenLookupTab { query } => {
                if let Some(query) = query {
                    self.open_lookup(&query);
                }
                None
            }
            Request::GetCambridgeAudioUrl { query } => {
                let audio_url = match query.filter(|query| !query.trim().is_empty()) {
                    Some(query) => self.audio_url(&query).await,
                    None => None,
                };
                Some(Response::AudioUrl { audio_url })
            }
        }
    }

    pub fn tab_removed(&self, tab_id: TabId) {
        if self.coordinator.view().managed.is_some_and(|tab| tab.tab_id == tab_id) {
            engine_info!("Lookup tab {} was removed", tab_id);
        }
        self.coordinator.tab_removed(tab_id);
    }

    pub fn context_menu_clicked(&self, menu_item_id: &str, selection_text: Option<&str>) {
        if menu_item_id != LOOKUP_MENU_ID {
            return;
        }
        if let Some(text) = selection_text {
            self.open_lookup(text);
        }
    }

    fn open_lookup(&self, query: &str) {
        match self.site.lookup_url(query) {
            Some(url) => {
                engine_info!("Adding to lookup queue: {}", url);
                self.coordinator.enqueue(url);
            }
            None => engine_debug!("Ignoring blank lookup query"),
        }
    }

    async fn selected_text(&self, tab_id: Option<TabId>) -> String {
        if let Some(tab_id) = tab_id {
            match self.probe.query_selected_text(tab_id).await {
                Ok(Some(text)) => return text,
                Ok(None) => engine_debug!("Tab {} reported no selection field", tab_id),
                Err(err) => engine_debug!("Selection query to tab {} failed: {}", tab_id, err),
            }
        }
        self.lock_selection(|selection| selection.last_selected_text().to_string())
    }

    async fn audio_url(&self, query: &str) -> Option<String> {
        let url = self.resolver.resolve_audio(query).await?;
        if self.ignored_audio_urls.iter().any(|ignored| *ignored == url) {
            engine_info!("Audio: ignoring placeholder clip for \"{}\"", query);
            return None;
        }
        Some(url)
    }

    fn lock_selection<T>(&self, f: impl FnOnce(&mut SelectionState) -> T) -> T {
        let mut guard = match self.selection.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                engine_warn!("Selection state lock was poisoned; continuing");
                poisoned.into_inner()
            }
        };
        f(&mut guard)
    }
}
