//! WebSocket handling.
//!
//! # Sessions
//! ```text
//! Echo:   Open --(text/binary != "exit")--> reply verbatim, stay Open
//!         Open --("exit" | close | error)--> Closed
//!
//! Flood:  Waiting --(text/binary != "exit")--> Flooding
//!         Waiting --("exit" | close | error)--> Closed
//!         Flooding --(write error | peer close | shutdown)--> Closed
//! ```
//!
//! # Design Decisions
//! - Sessions share nothing; the RPS counter is not updated here
//! - Ping/Pong are answered by the WebSocket layer and never echoed
//! - Flooding has no pacing; it writes as fast as the transport accepts.
//!   A reader task keeps consuming incoming frames so a peer close ends
//!   the loop without waiting for a failed write.

use axum::{
    body::Bytes,
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::config::ResponseMode;
use crate::http::handlers::time::now_stamp;
use crate::http::server::AppState;

/// Payload that ends a session without a reply.
pub const EXIT: &str = "exit";

/// What a received frame means to a session.
#[derive(Debug)]
enum Inbound {
    Exit,
    Data(Message),
    Closed,
    Control,
}

impl Inbound {
    fn classify(message: Message) -> Self {
        let is_exit = match &message {
            Message::Text(text) => text.as_str() == EXIT,
            Message::Binary(data) => &data[..] == EXIT.as_bytes(),
            _ => false,
        };
        if is_exit {
            return Inbound::Exit;
        }
        match message {
            Message::Text(_) | Message::Binary(_) => Inbound::Data(message),
            Message::Close(_) => Inbound::Closed,
            Message::Ping(_) | Message::Pong(_) => Inbound::Control,
        }
    }
}

/// Frame type used for flood replies, taken from the triggering message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Text,
    Binary,
}

impl FrameKind {
    fn of(message: &Message) -> Self {
        match message {
            Message::Binary(_) => FrameKind::Binary,
            _ => FrameKind::Text,
        }
    }

    fn frame(self, payload: String) -> Message {
        match self {
            FrameKind::Text => Message::Text(payload.into()),
            FrameKind::Binary => Message::Binary(Bytes::from(payload)),
        }
    }
}

/// Upgrade the connection and run the configured session.
pub async fn upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let flood = matches!(state.config.mode, ResponseMode::WebSocket { flood: true });
    let shutdown = state.shutdown.subscribe();

    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "WebSocket upgrade failed"))
        .on_upgrade(move |socket| async move {
            if flood {
                flood_session(socket, shutdown).await;
            } else {
                echo_session(socket).await;
            }
        })
}

async fn echo_session(mut socket: WebSocket) {
    loop {
        let message = match socket.recv().await {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "WebSocket read error");
                return;
            }
            None => return,
        };
        log_received(&message);

        match Inbound::classify(message) {
            Inbound::Exit => {
                let _ = socket.send(Message::Close(None)).await;
                return;
            }
            Inbound::Closed => return,
            Inbound::Control => continue,
            Inbound::Data(message) => {
                if let Err(e) = socket.send(message).await {
                    tracing::warn!(error = %e, "WebSocket write error");
                    return;
                }
            }
        }
    }
}

async fn flood_session(socket: WebSocket, mut shutdown: broadcast::Receiver<()>) {
    let (mut sink, mut stream) = socket.split();

    let kind = loop {
        let message = match stream.next().await {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "WebSocket read error");
                return;
            }
            None => return,
        };
        log_received(&message);

        match Inbound::classify(message) {
            Inbound::Exit => {
                let _ = sink.send(Message::Close(None)).await;
                return;
            }
            Inbound::Closed => return,
            Inbound::Control => continue,
            Inbound::Data(message) => break FrameKind::of(&message),
        }
    };

    tracing::debug!(kind = ?kind, "Flooding timestamps");
    // Incoming frames are drained on their own task, which ends when the
    // peer goes away.
    let mut peer_gone = tokio::spawn(async move {
        while let Some(incoming) = stream.next().await {
            match incoming {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "WebSocket read error");
                    break;
                }
            }
        }
    });

    let mut sent: u64 = 0;
    let mut shutting_down = false;
    loop {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                shutting_down = true;
                break;
            }
            _ = &mut peer_gone => break,
            result = sink.send(kind.frame(now_stamp())) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "WebSocket write error");
                    break;
                }
                sent += 1;
            }
        }
    }
    peer_gone.abort();
    if shutting_down {
        let _ = sink.send(Message::Close(None)).await;
    }
    tracing::debug!(frames = sent, "Flood ended");
}

fn log_received(message: &Message) {
    match message {
        Message::Text(text) => tracing::debug!("Received WebSocket message: {}", text.as_str()),
        Message::Binary(data) => {
            tracing::debug!("Received WebSocket message: {}", String::from_utf8_lossy(data))
        }
        _ => {}
    }
}
