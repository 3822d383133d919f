use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, info, warn};

use crate::motivator;
use crate::timer::{Command, Preset, Snapshot, TimerHandle};

/// Requests a client can send, tagged by `type`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Start,
    Stop,
    Select { preset: Preset },
    Status,
    Phrase {
        #[serde(default)]
        plain: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct WebSocketResponse {
    pub success: bool,
    pub message: Option<String>,
    pub state: Option<Snapshot>,
}

/// Unsolicited updates pushed to every client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerPush {
    Snapshot(Snapshot),
}

pub async fn start_websocket_server(addr: SocketAddr, timer: TimerHandle) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("WebSocket server listening on: {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        info!("New WebSocket connection from: {}", peer_addr);
        tokio::spawn(handle_connection(stream, peer_addr, timer.clone()));
    }

    Ok(())
}

pub async fn handle_request(timer: &TimerHandle, request: ClientMessage) -> WebSocketResponse {
    let command = match request {
        ClientMessage::Start => Command::Start,
        ClientMessage::Stop => Command::Stop,
        ClientMessage::Select { preset } => Command::Select(preset),
        ClientMessage::Status => Command::Status,
        ClientMessage::Phrase { plain } => {
            let phrase = if plain {
                motivator::pick_plain()
            } else {
                motivator::pick_decorated().to_string()
            };
            return WebSocketResponse {
                success: true,
                message: Some(phrase),
                state: None,
            };
        }
    };

    match timer.send(command).await {
        Ok(snapshot) => WebSocketResponse {
            success: true,
            message: None,
            state: Some(snapshot),
        },
        Err(e) => WebSocketResponse {
            success: false,
            message: Some(e.to_string()),
            state: Some(timer.current()),
        },
    }
}

fn parse_request(text: &str) -> std::result::Result<ClientMessage, WebSocketResponse> {
    serde_json::from_str::<ClientMessage>(text).map_err(|e| WebSocketResponse {
        success: false,
        message: Some(format!("Parse error: {}", e)),
        state: None,
    })
}

async fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, timer: TimerHandle) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed with {}: {}", peer_addr, e);
            return;
        }
    };

    debug!("WebSocket handshake completed with {}", peer_addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut snapshots = timer.subscribe();

    // Greet with the current state so the client can draw immediately.
    let greeting = ServerPush::Snapshot(snapshots.borrow_and_update().clone());
    if let Ok(json) = serde_json::to_string(&greeting) {
        if ws_sender.send(Message::Text(json)).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let push = ServerPush::Snapshot(snapshots.borrow_and_update().clone());
                if let Ok(json) = serde_json::to_string(&push) {
                    if let Err(e) = ws_sender.send(Message::Text(json)).await {
                        warn!("Failed to push snapshot to {}: {}", peer_addr, e);
                        break;
                    }
                }
            }
            msg = ws_receiver.next() => {
                let Some(msg) = msg else {
                    break;
                };
                match msg {
                    Ok(Message::Text(text)) => {
                        let response = match parse_request(&text) {
                            Ok(request) => {
                                debug!("[WebSocket] {} -> {:?}", peer_addr, request);
                                handle_request(&timer, request).await
                            }
                            Err(response) => response,
                        };
                        if let Ok(response_json) = serde_json::to_string(&response) {
                            if let Err(e) = ws_sender.send(Message::Text(response_json)).await {
                                warn!("Failed to send WebSocket response: {}", e);
                                break;
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!("WebSocket connection closed by {}", peer_addr);
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        if let Err(e) = ws_sender.send(Message::Pong(data)).await {
                            warn!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("WebSocket error from {}: {}", peer_addr, e);
                        break;
                    }
                }
            }
        }
    }

    info!("WebSocket connection with {} terminated", peer_addr);
}
