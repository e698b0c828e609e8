#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

use lookup_core::{TabId, WindowId};
use lookup_engine::{ProbeError, SelectionProbe, TabApi, TabError, TabInfo};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Markup shaped like a dictionary entry page.
pub fn entry_page(headword: &str, us_src: Option<&str>, uk_src: Option<&str>) -> String {
    let pron = |region: &str, src: Option<&str>| match src {
        Some(src) => format!(
            r#"<span class="{region} dpron-i "><span class="region dreg">{region}</span><span class="daud"><audio class="hdn" preload="none"><source type="audio/mpeg" src="{src}"/><source type="audio/ogg" src="{src}.ogg"/></audio></span></span>"#
        ),
        None => String::new(),
    };
    format!(
        r#"<!DOCTYPE html><html><head><title>{headword} | Dictionary</title></head><body>
<div class="pos-header dpos-h"><div class="di-title"><span class="headword hdb tw-bw dhw dpos-h_hw "><span class="hw dhw">{headword}</span></span></div>
{uk}
{us}
</div></body></html>"#,
        uk = pron("uk", uk_src),
        us = pron("us", us_src),
    )
}

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub tabs: BTreeMap<TabId, TabInfo>,
    pub created: usize,
    pub gets: usize,
    /// Every URL shown by the lookup tab, via create or update, in order.
    pub history: Vec<String>,
    pub updates: Vec<(TabId, String)>,
    pub focused: Vec<WindowId>,
    pub fail_create: bool,
    pub create_without_id: bool,
    next_id: TabId,
}

impl BrowserState {
    /// Id of the most recently created tab.
    pub fn last_created_id(&self) -> TabId {
        self.next_id
    }
}

/// In-memory browser with one window.
#[derive(Default)]
pub struct FakeBrowser {
    state: Mutex<BrowserState>,
    latency: Option<Duration>,
}

pub const WINDOW: WindowId = 1;

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> BrowserState {
        self.state.lock().unwrap().clone()
    }

    pub fn tab_url(&self, tab_id: TabId) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .tabs
            .get(&tab_id)
            .and_then(|tab| tab.url.clone())
    }

    pub fn close(&self, tab_id: TabId) {
        self.state.lock().unwrap().tabs.remove(&tab_id);
    }

    pub fn navigate(&self, tab_id: TabId, url: &str) {
        if let Some(tab) = self.state.lock().unwrap().tabs.get_mut(&tab_id) {
            tab.url = Some(url.to_string());
        }
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    pub fn set_create_without_id(&self, without_id: bool) {
        self.state.lock().unwrap().create_without_id = without_id;
    }

    async fn pause(&self) {
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
    }
}

#[async_trait::async_trait]
impl TabApi for FakeBrowser {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, TabError> {
        self.pause().await;
        let mut state = self.state.lock().unwrap();
        state.gets += 1;
        state
            .tabs
            .get(&tab_id)
            .cloned()
            .ok_or(TabError::NotFound(tab_id))
    }

    async fn update_tab(&self, tab_id: TabId, url: &str) -> Result<(), TabError> {
        self.pause().await;
        let mut state = self.state.lock().unwrap();
        let tab = state.tabs.get_mut(&tab_id).ok_or(TabError::NotFound(tab_id))?;
        tab.url = Some(url.to_string());
        state.updates.push((tab_id, url.to_string()));
        state.history.push(url.to_string());
        Ok(())
    }

    async fn create_tab(&self, url: &str) -> Result<TabInfo, TabError> {
        self.pause().await;
        let mut state = self.state.lock().unwrap();
        if state.fail_create {
            return Err(TabError::Api("tabs.create rejected".to_string()));
        }
        state.created += 1;
        state.history.push(url.to_string());
        if state.create_without_id {
            return Ok(TabInfo {
                id: None,
                window_id: Some(WINDOW),
                url: Some(url.to_string()),
            });
        }
        state.next_id += 1;
        let tab_id = state.next_id;
        let tab = TabInfo {
            id: Some(tab_id),
            window_id: Some(WINDOW),
            url: Some(url.to_string()),
        };
        state.tabs.insert(tab_id, tab.clone());
        Ok(tab)
    }

    async fn focus_window(&self, window_id: WindowId) -> Result<(), TabError> {
        self.pause().await;
        self.state.lock().unwrap().focused.push(window_id);
        Ok(())
    }
}

/// Page agent that always gives the same answer.
pub struct FakeProbe {
    reply: Result<Option<String>, ProbeError>,
}

impl FakeProbe {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Ok(Some(text.to_string())),
        }
    }

    pub fn without_text() -> Self {
        Self { reply: Ok(None) }
    }

    pub fn unreachable() -> Self {
        Self {
            reply: Err(ProbeError::NoAgent(0)),
        }
    }
}

#[async_trait::async_trait]
impl SelectionProbe for FakeProbe {
    async fn query_selected_text(&self, _tab_id: TabId) -> Result<Option<String>, ProbeError> {
        self.reply.clone()
    }
}
