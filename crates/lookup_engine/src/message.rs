//! Messages exchanged with the page agent and the popup.

use lookup_core::TabId;
use serde::{Deserialize, Serialize};

/// A message sent to the background by the page agent or the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// The agent saw the selection change. Fire-and-forget.
    UpdateSelectedText {
        #[serde(default)]
        text: String,
    },
    /// The popup opened and wants the best-known selection.
    GetSelectedText {
        #[serde(rename = "tabId", default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
    },
    /// Show the dictionary entry for `query` in the lookup tab. Fire-and-forget.
    OpenLookupTab {
        #[serde(default)]
        query: Option<String>,
    },
    /// Resolve a pronunciation clip for `query`.
    GetCambridgeAudioUrl {
        #[serde(default)]
        query: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    SelectedText {
        text: String,
    },
    AudioUrl {
        #[serde(rename = "audioUrl")]
        audio_url: Option<String>,
    },
}

/// Sent by the background to a page agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AgentQuery {
    QuerySelectedText,
}

/// The agent's answer to [`AgentQuery::QuerySelectedText`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectedTextReply {
    #[serde(default)]
    pub text: Option<String>,
}

/// The single context-menu entry registered on install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuEntry {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
}

pub const LOOKUP_MENU_ID: &str = "lookupInCambridge";
pub const LOOKUP_MENU_TITLE: &str = "Lookup in Cambridge";

impl ContextMenuEntry {
    pub fn lookup() -> Self {
        Self {
            id: LOOKUP_MENU_ID.to_string(),
            title: LOOKUP_MENU_TITLE.to_string(),
            contexts: vec!["selection".to_string()],
        }
    }
}
