use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use engine_logging::engine_warn;
use lookup_core::{TabId, WindowId};
use lookup_engine::{
    AgentQuery, ProbeError, SelectedTextReply, SelectionProbe, TabApi, TabError, TabInfo,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::protocol::{BrowserCall, CallId, Outbound, WireTab};

type Reply = Result<Option<Value>, String>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("browser connection closed")]
    Disconnected,
    #[error("{0}")]
    Browser(String),
    #[error("unexpected reply payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<BridgeError> for TabError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Disconnected => TabError::Disconnected,
            other => TabError::Api(other.to_string()),
        }
    }
}

/// Performs browser API calls by sending them over the host connection and
/// waiting for the matching reply.
pub struct BrowserBridge {
    out_tx: mpsc::UnboundedSender<Outbound>,
    pending: Mutex<HashMap<CallId, oneshot::Sender<Reply>>>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl BrowserBridge {
    pub fn new(out_tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self {
            out_tx,
            pending: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Routes a reply from the browser to the waiting call.
    pub fn resolve(&self, id: CallId, reply: Reply) {
        match self.lock_pending().remove(&id) {
            Some(waiter) => {
                let _ = waiter.send(reply);
            }
            None => engine_warn!("Reply for unknown call {}", id),
        }
    }

    /// Fails every outstanding and future call.
    pub fn disconnect(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.lock_pending().clear();
    }

    async fn call(&self, call: BrowserCall) -> Result<Option<Value>, BridgeError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BridgeError::Disconnected);
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();
        self.lock_pending().insert(id, reply_tx);

        if self.out_tx.send(Outbound::Call { id, call }).is_err() {
            self.lock_pending().remove(&id);
            return Err(BridgeError::Disconnected);
        }
        match reply_rx.await {
            Ok(reply) => reply.map_err(BridgeError::Browser),
            Err(_) => Err(BridgeError::Disconnected),
        }
    }

    async fn call_for<T: DeserializeOwned + Default>(
        &self,
        call: BrowserCall,
    ) -> Result<T, BridgeError> {
        match self.call(call).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(T::default()),
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashMap<CallId, oneshot::Sender<Reply>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl TabApi for BrowserBridge {
    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, TabError> {
        let tab: WireTab = self.call_for(BrowserCall::GetTab { tab_id }).await?;
        Ok(tab.into())
    }

    async fn update_tab(&self, tab_id: TabId, url: &str) -> Result<(), TabError> {
        self.call(BrowserCall::UpdateTab {
            tab_id,
            url: url.to_string(),
            active: true,
        })
        .await?;
        Ok(())
    }

    async fn create_tab(&self, url: &str) -> Result<TabInfo, TabError> {
        let tab: WireTab = self
            .call_for(BrowserCall::CreateTab {
                url: url.to_string(),
                active: true,
            })
            .await?;
        Ok(tab.into())
    }

    async fn focus_window(&self, window_id: WindowId) -> Result<(), TabError> {
        self.call(BrowserCall::FocusWindow { window_id }).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl SelectionProbe for BrowserBridge {
    async fn query_selected_text(&self, tab_id: TabId) -> Result<Option<String>, ProbeError> {
        let reply: SelectedTextReply = self
            .call_for(BrowserCall::SendToTab {
                tab_id,
                message: AgentQuery::QuerySelectedText,
            })
            .await
            .map_err(|err| match err {
                BridgeError::Disconnected => ProbeError::NoAgent(tab_id),
                other => ProbeError::Agent(other.to_string()),
            })?;
        Ok(reply.text)
    }
}
