//! Line-delimited JSON envelopes exchanged with the browser side over stdio.

use lookup_core::{TabId, WindowId};
use lookup_engine::{AgentQuery, ContextMenuEntry, Request, Response, TabInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type CallId = u64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Inbound {
    /// A message from the page agent or the popup.
    Request { id: u64, message: Request },
    /// Answer to an earlier [`Outbound::Call`].
    Reply {
        id: CallId,
        #[serde(default)]
        ok: Option<Value>,
        #[serde(default)]
        error: Option<String>,
    },
    TabRemoved {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    ContextMenuClicked {
        #[serde(rename = "menuItemId")]
        menu_item_id: String,
        #[serde(rename = "selectionText", default)]
        selection_text: Option<String>,
    },
    /// The extension was installed or updated.
    Installed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outbound {
    Response { id: u64, message: Response },
    Call { id: CallId, call: BrowserCall },
    RegisterContextMenu(ContextMenuEntry),
}

/// A browser API call the host needs the extension to perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum BrowserCall {
    GetTab {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    CreateTab {
        url: String,
        active: bool,
    },
    UpdateTab {
        #[serde(rename = "tabId")]
        tab_id: TabId,
        url: String,
        active: bool,
    },
    FocusWindow {
        #[serde(rename = "windowId")]
        window_id: WindowId,
    },
    SendToTab {
        #[serde(rename = "tabId")]
        tab_id: TabId,
        message: AgentQuery,
    },
}

/// Tab fields as the browser reports them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireTab {
    #[serde(default)]
    pub id: Option<TabId>,
    #[serde(rename = "windowId", default)]
    pub window_id: Option<WindowId>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<WireTab> for TabInfo {
    fn from(tab: WireTab) -> Self {
        TabInfo {
            id: tab.id,
            window_id: tab.window_id,
            url: tab.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use lookup_engine::{ContextMenuEntry, Request, Response};
    use serde_json::json;

    use super::{BrowserCall, Inbound, Outbound};

    #[test]
    fn inbound_envelopes_parse() {
        let request: Inbound = serde_json::from_value(json!({
            "kind": "request",
            "id": 4,
            "message": {"action": "openLookupTab", "query": "cat"}
        }))
        .unwrap();
        assert_eq!(
            request,
            Inbound::Request {
                id: 4,
                message: Request::OpenLookupTab {
                    query: Some("cat".to_string())
                }
            }
        );

        let reply: Inbound =
            serde_json::from_value(json!({"kind": "reply", "id": 9, "error": "No tab"})).unwrap();
        assert_eq!(
            reply,
            Inbound::Reply {
                id: 9,
                ok: None,
                error: Some("No tab".to_string())
            }
        );

        let click: Inbound = serde_json::from_value(json!({
            "kind": "contextMenuClicked",
            "menuItemId": "lookupInCambridge"
        }))
        .unwrap();
        assert_eq!(
            click,
            Inbound::ContextMenuClicked {
                menu_item_id: "lookupInCambridge".to_string(),
                selection_text: None
            }
        );
    }

    #[test]
    fn outbound_envelopes_serialize() {
        let response = Outbound::Response {
            id: 2,
            message: Response::AudioUrl { audio_url: None },
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"kind": "response", "id": 2, "message": {"audioUrl": null}})
        );

        let call = Outbound::Call {
            id: 1,
            call: BrowserCall::UpdateTab {
                tab_id: 5,
                url: "https://d.example/x".to_string(),
                active: true,
            },
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({"kind": "call", "id": 1, "call": {
                "method": "updateTab", "tabId": 5, "url": "https://d.example/x", "active": true
            }})
        );

        let menu = Outbound::RegisterContextMenu(ContextMenuEntry::lookup());
        assert_eq!(
            serde_json::to_value(&menu).unwrap(),
            json!({
                "kind": "registerContextMenu",
                "id": "lookupInCambridge",
                "title": "Lookup in Cambridge",
                "contexts": ["selection"]
            })
        );
    }
}
