use lookup_core::TabId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("no page agent in tab {0}")]
    NoAgent(TabId),
    #[error("page agent error: {0}")]
    Agent(String),
}

/// Asks the page agent in a tab for its live text selection.
#[async_trait::async_trait]
pub trait SelectionProbe: Send + Sync {
    /// `Ok(None)` means the agent answered without a `text` field.
    async fn query_selected_text(&self, tab_id: TabId) -> Result<Option<String>, ProbeError>;
}
