use futures::future::{AbortHandle, Abortable, poll_fn};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{Message, State, WebSocketError, futures::WebSocket};
use wasm_bindgen_futures::spawn_local;

use crate::application::feed_client::{FeedDispatch, FeedEvent, FeedTransport};
use crate::domain::errors::{AppError, FeedResult};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_error, log_info, log_warn};

/// Browser websocket transport. The read pump runs as a local task; `close` aborts it, which
/// drops and closes the socket, so no event is dispatched after `close` returns.
#[derive(Default)]
pub struct GlooWebSocketTransport {
    pump: Option<AbortHandle>,
}

impl GlooWebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run_pump(mut ws: WebSocket, dispatch: FeedDispatch) {
        // The sink only becomes ready once the handshake has settled either way.
        if let Err(e) = poll_fn(|cx| ws.poll_ready_unpin(cx)).await {
            log_warn!(LogComponent::Infrastructure("WebSocket"), "Handshake failed: {e}");
        }
        if !matches!(ws.state(), State::Open) {
            dispatch(FeedEvent::Error("websocket failed to open".to_string()));
            dispatch(FeedEvent::Closed);
            return;
        }
        dispatch(FeedEvent::Opened);

        while let Some(item) = ws.next().await {
            match item {
                Ok(Message::Text(text)) => dispatch(FeedEvent::Message(text)),
                Ok(Message::Bytes(bytes)) => {
                    log_debug!(
                        LogComponent::Infrastructure("WebSocket"),
                        "Ignoring {} byte binary frame",
                        bytes.len()
                    );
                }
                Err(WebSocketError::ConnectionClose(event)) => {
                    log_info!(
                        LogComponent::Infrastructure("WebSocket"),
                        "Socket closed: code={} clean={} reason='{}'",
                        event.code,
                        event.was_clean,
                        event.reason
                    );
                    break;
                }
                Err(e) => {
                    log_error!(LogComponent::Infrastructure("WebSocket"), "❌ Socket error: {e}");
                    dispatch(FeedEvent::Error(e.to_string()));
                }
            }
        }
        dispatch(FeedEvent::Closed);
    }
}

impl FeedTransport for GlooWebSocketTransport {
    fn open(&mut self, url: &str, dispatch: FeedDispatch) -> FeedResult<()> {
        self.close();
        let ws = WebSocket::open(url)
            .map_err(|e| AppError::Network(format!("Failed to open WebSocket: {e}")))?;

        let (handle, registration) = AbortHandle::new_pair();
        self.pump = Some(handle);
        spawn_local(async move {
            let _ = Abortable::new(Self::run_pump(ws, dispatch), registration).await;
        });
        Ok(())
    }

    fn close(&mut self) {
        if let Some(handle) = self.pump.take() {
            handle.abort();
        }
    }
}

impl Drop for GlooWebSocketTransport {
    fn drop(&mut self) {
        self.close();
    }
}
