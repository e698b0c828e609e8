use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use lookup_core::{
    update, CoordinatorState, CoordinatorView, DictionarySite, Effect, LookupOutcome, ManagedTab,
    Msg, TabId,
};
use tokio::sync::{mpsc, watch};

use crate::tabs::{TabApi, TabError};

/// Cheap, cloneable front of the lookup tab coordinator.
///
/// `enqueue` never blocks; requests are applied to the single managed tab one
/// at a time, in submission order.
#[derive(Clone)]
pub struct CoordinatorHandle {
    msg_tx: mpsc::UnboundedSender<Msg>,
    accepted: Arc<AtomicU64>,
    view_rx: watch::Receiver<CoordinatorView>,
}

impl CoordinatorHandle {
    pub fn enqueue(&self, url: impl Into<String>) {
        let url = url.into();
        self.accepted.fetch_add(1, Ordering::SeqCst);
        if self.msg_tx.send(Msg::LookupRequested(url)).is_err() {
            self.accepted.fetch_sub(1, Ordering::SeqCst);
            engine_warn!("Lookup coordinator stopped; dropping request");
        }
    }

    pub fn tab_removed(&self, tab_id: TabId) {
        let _ = self.msg_tx.send(Msg::TabRemoved(tab_id));
    }

    pub fn view(&self) -> CoordinatorView {
        *self.view_rx.borrow()
    }

    /// Resolves once every request enqueued through any handle so far has been consumed.
    pub async fn wait_idle(&self) {
        let mut view_rx = self.view_rx.clone();
        let accepted = self.accepted.clone();
        let _ = view_rx
            .wait_for(|view| view.completed >= accepted.load(Ordering::SeqCst))
            .await;
    }
}

/// Owns the lookup queue and the managed tab handle.
pub struct TabCoordinator {
    tabs: Arc<dyn TabApi>,
    site: DictionarySite,
    state: CoordinatorState,
    msg_tx: mpsc::WeakUnboundedSender<Msg>,
    view_tx: watch::Sender<CoordinatorView>,
}

impl TabCoordinator {
    /// Starts the coordinator on the current tokio runtime.
    pub fn spawn(tabs: Arc<dyn TabApi>, site: DictionarySite) -> CoordinatorHandle {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let state = CoordinatorState::new();
        let (view_tx, view_rx) = watch::channel(state.view());

        let coordinator = Self {
            tabs,
            site,
            state,
            msg_tx: msg_tx.downgrade(),
            view_tx,
        };
        tokio::spawn(coordinator.run(msg_rx));

        CoordinatorHandle {
            msg_tx,
            accepted: Arc::new(AtomicU64::new(0)),
            view_rx,
        }
    }

    async fn run(mut self, mut msg_rx: mpsc::UnboundedReceiver<Msg>) {
        // Used only once every sender is gone, so leftover work still drains.
        let mut local: Option<Msg> = None;
        loop {
            let msg = match local.take() {
                Some(msg) => msg,
                None => match msg_rx.recv().await {
                    Some(msg) => msg,
                    None => break,
                },
            };
            if let Msg::LookupRequested(url) = &msg {
                engine_debug!(
                    "Lookup queued: {} (queue length {})",
                    url,
                    self.state.queue_len() + 1
                );
            }

            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            self.view_tx.send_replace(self.state.view());

            for effect in effects {
                if let Some(msg) = self.run_effect(effect).await {
                    local = Some(msg);
                }
            }
        }
        engine_debug!("Lookup coordinator stopped");
    }

    /// Executes an effect; returns a message to handle inline when nobody can
    /// post to the channel any more.
    async fn run_effect(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::OpenOrUpdateTab { url, managed } => {
                let Some(tx) = self.msg_tx.upgrade() else {
                    let outcome = open_or_update(self.tabs.as_ref(), &self.site, &url, managed).await;
                    return Some(Msg::LookupFinished(outcome));
                };
                let tabs = self.tabs.clone();
                let site = self.site.clone();
                tokio::spawn(async move {
                    let outcome = open_or_update(tabs.as_ref(), &site, &url, managed).await;
                    let _ = tx.send(Msg::LookupFinished(outcome));
                });
                None
            }
            Effect::ResumeDrain => match self.msg_tx.upgrade() {
                Some(tx) => {
                    let _ = tx.send(Msg::Drain);
                    None
                }
                None => Some(Msg::Drain),
            },
        }
    }
}

/// Shows `url` in the managed tab if it is still on the dictionary site,
/// otherwise in a newly created tab. Never fails; errors become `Failed`.
pub async fn open_or_update(
    tabs: &dyn TabApi,
    site: &DictionarySite,
    url: &str,
    managed: Option<ManagedTab>,
) -> LookupOutcome {
    match try_open_or_update(tabs, site, url, managed).await {
        Ok(outcome) => outcome,
        Err(err) => {
            engine_error!("Lookup tab for {} failed: {}", url, err);
            LookupOutcome::Failed
        }
    }
}

async fn try_open_or_update(
    tabs: &dyn TabApi,
    site: &DictionarySite,
    url: &str,
    managed: Option<ManagedTab>,
) -> Result<LookupOutcome, TabError> {
    if let Some(tab) = managed {
        match reuse_tab(tabs, site, url, tab).await {
            Ok(true) => return Ok(LookupOutcome::Reused),
            Ok(false) => {
                engine_info!("Lookup tab {} left the dictionary site", tab.tab_id);
            }
            Err(err) => {
                engine_warn!(
                    "Lookup tab {} unusable: {}. Will create new tab.",
                    tab.tab_id,
                    err
                );
            }
        }
    }

    engine_info!("Creating new lookup tab for {}", url);
    let created = tabs.create_tab(url).await?;
    let Some(tab_id) = created.id else {
        engine_warn!("New lookup tab has no id");
        return Ok(LookupOutcome::CreatedWithoutId);
    };
    let tab = ManagedTab {
        tab_id,
        window_id: created.window_id,
    };
    if let Some(window_id) = tab.window_id {
        tabs.focus_window(window_id).await?;
    }
    engine_info!("New lookup tab {}", tab_id);
    Ok(LookupOutcome::Created(tab))
}

/// `Ok(false)` when the tab exists but no longer shows the dictionary.
async fn reuse_tab(
    tabs: &dyn TabApi,
    site: &DictionarySite,
    url: &str,
    tab: ManagedTab,
) -> Result<bool, TabError> {
    let live = tabs.get_tab(tab.tab_id).await?;
    if !live.url.as_deref().is_some_and(|current| site.is_dictionary_page(current)) {
        return Ok(false);
    }

    engine_info!("Updating lookup tab {} to {}", tab.tab_id, url);
    tabs.update_tab(tab.tab_id, url).await?;
    if let Some(window_id) = live.window_id.or(tab.window_id) {
        tabs.focus_window(window_id).await?;
    }
    Ok(true)
}
