use lookup_core::{TabId, WindowId};

/// Live state of a browser tab as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabInfo {
    /// Absent when the browser could not assign an id (e.g. devtools windows).
    pub id: Option<TabId>,
    pub window_id: Option<WindowId>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabError {
    #[error("no tab with id {0}")]
    NotFound(TabId),
    #[error("browser API error: {0}")]
    Api(String),
    #[error("browser connection closed")]
    Disconnected,
}

/// The subset of the browser's tab and window API the lookup tab needs.
#[async_trait::async_trait]
pub trait TabApi: Send + Sync {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, TabError>;

    /// Navigates an existing tab and makes it the active tab of its window.
    async fn update_tab(&self, tab_id: TabId, url: &str) -> Result<(), TabError>;

    /// Opens `url` in a new active tab.
    async fn create_tab(&self, url: &str) -> Result<TabInfo, TabError>;

    async fn focus_window(&self, window_id: WindowId) -> Result<(), TabError>;
}
