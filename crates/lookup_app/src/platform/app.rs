use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use lookup_engine::{EngineConfig, LookupEngine};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use super::bridge::BrowserBridge;
use super::config::{config_path, read_config, AppConfig};
use super::logging;
use super::protocol::{Inbound, Outbound};

pub async fn run_app() -> anyhow::Result<()> {
    let path = config_path();
    let loaded = read_config(&path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => AppConfig::default(),
    };

    let level = config.level();
    logging::initialize(
        config.log_destination,
        *level.as_ref().unwrap_or(&log::LevelFilter::Info),
        &config.log_file,
    );
    if let Err(err) = level {
        engine_warn!("{}; logging at info", err);
    }
    match loaded {
        Ok(Some(_)) => engine_info!("Loaded config from {:?}", path),
        Ok(None) => engine_info!("No config at {:?}; using defaults", path),
        Err(err) => engine_warn!("Ignoring config: {}", err),
    }

    let engine_config = config.engine_config().unwrap_or_else(|err| {
        engine_warn!("{}; using the default dictionary site", err);
        EngineConfig::default()
    });
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    serve(engine_config, stdin, tokio::io::stdout()).await
}

/// Runs the background host until `reader` reaches end of input.
pub async fn serve<R, W>(config: EngineConfig, reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let bridge = Arc::new(BrowserBridge::new(out_tx.clone()));
    let engine = Arc::new(LookupEngine::start(config, bridge.clone(), bridge.clone()));
    let writer_task = tokio::spawn(write_envelopes(out_rx, writer));

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Inbound>(&line) {
            Ok(inbound) => dispatch(inbound, &engine, &bridge, &out_tx),
            Err(err) => engine_warn!("Skipping malformed message: {}", err),
        }
    }

    engine_info!("Browser connection closed");
    bridge.disconnect();
    drop(out_tx);
    drop(engine);
    writer_task.abort();
    Ok(())
}

fn dispatch(
    inbound: Inbound,
    engine: &Arc<LookupEngine>,
    bridge: &BrowserBridge,
    out_tx: &mpsc::UnboundedSender<Outbound>,
) {
    match inbound {
        Inbound::Request { id, message } => {
            let engine = engine.clone();
            let out_tx = out_tx.clone();
            tokio::spawn(async move {
                if let Some(message) = engine.handle(message).await {
                    let _ = out_tx.send(Outbound::Response { id, message });
                }
            });
        }
        Inbound::Reply { id, ok, error } => {
            let reply = match error {
                Some(error) => Err(error),
                None => Ok(ok),
            };
            bridge.resolve(id, reply);
        }
        Inbound::TabRemoved { tab_id } => engine.tab_removed(tab_id),
        Inbound::ContextMenuClicked {
            menu_item_id,
            selection_text,
        } => {
            engine_debug!("Context menu clicked: {}", menu_item_id);
            engine.context_menu_clicked(&menu_item_id, selection_text.as_deref());
        }
        Inbound::Installed => {
            engine_info!("Extension installed or updated; registering context menu");
            let _ = out_tx.send(Outbound::RegisterContextMenu(engine.context_menu()));
        }
    }
}

async fn write_envelopes<W>(mut out_rx: mpsc::UnboundedReceiver<Outbound>, mut writer: W)
where
    W: AsyncWrite + Unpin,
{
    while let Some(outbound) = out_rx.recv().await {
        let mut line = match serde_json::to_string(&outbound) {
            Ok(line) => line,
            Err(err) => {
                engine_error!("Failed to encode {:?}: {}", outbound, err);
                continue;
            }
        };
        line.push('\n');
        if let Err(err) = writer.write_all(line.as_bytes()).await {
            engine_error!("Failed to write to browser: {}", err);
            break;
        }
        if let Err(err) = writer.flush().await {
            engine_error!("Failed to flush to browser: {}", err);
            break;
        }
    }
}
