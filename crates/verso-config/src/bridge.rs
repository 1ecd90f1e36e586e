use std::env;

use serde::{Deserialize, Serialize};

fn default_ws_url() -> String {
    "ws://localhost:8080".to_string()
}

fn default_clipboard_poll_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listen to the page bridge websocket, if false use clipboard watcher
    pub listen_to_ws: bool,
    /// WebSocket URL to connect to
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    #[serde(default = "default_clipboard_poll_ms")]
    pub clipboard_poll_ms: u64,
}

impl BridgeConfig {
    pub fn new() -> Self {
        let ws_url = env::var("WS_URL").unwrap_or_else(|_| default_ws_url());
        let listen_to_ws = env::var("VERSO_LISTEN_TO_WS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            listen_to_ws,
            ws_url,
            clipboard_poll_ms: default_clipboard_poll_ms(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen_to_ws: false,
            ws_url: default_ws_url(),
            clipboard_poll_ms: default_clipboard_poll_ms(),
        }
    }
}
