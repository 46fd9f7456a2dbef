//! Native WebSocket transport over `tokio-tungstenite`.
//!
//! A thin request/response adapter: no background task, no subscription
//! tracking. Control frames are handled inline while waiting for the next
//! text frame.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::WsError;
use crate::ws::{Connector, Transport};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens `tokio-tungstenite` connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeConnector;

impl Connector for NativeConnector {
    type Transport = NativeTransport;

    async fn connect(&self, url: &str) -> Result<NativeTransport, WsError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;
        Ok(NativeTransport { stream })
    }
}

/// One open `tokio-tungstenite` connection.
pub struct NativeTransport {
    stream: WsStream,
}

impl Transport for NativeTransport {
    async fn send(&mut self, text: String) -> Result<(), WsError> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }

    async fn recv(&mut self) -> Result<String, WsError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    let text_str: &str = text.as_ref();
                    return Ok(text_str.to_string());
                }
                Some(Ok(Message::Binary(data))) => {
                    return String::from_utf8(data.to_vec())
                        .map_err(|e| WsError::ReceiveFailed(format!("Non UTF-8 frame: {}", e)));
                }
                Some(Ok(Message::Ping(data))) => {
                    if let Err(e) = self.stream.send(Message::Pong(data)).await {
                        tracing::warn!("Failed to answer ping: {}", e);
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = extract_close(frame.as_ref());
                    return Err(WsError::Closed {
                        code: Some(code),
                        reason,
                    });
                }
                Some(Ok(_)) => {} // Pong, raw Frame
                Some(Err(e)) => return Err(WsError::ReceiveFailed(e.to_string())),
                None => {
                    return Err(WsError::Closed {
                        code: None,
                        reason: "Stream ended".into(),
                    })
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), WsError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| WsError::SendFailed(e.to_string()))
    }
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}
