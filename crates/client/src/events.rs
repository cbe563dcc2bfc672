//! Room event stream over WebSocket.

use futures_util::StreamExt;
use kinoswap_core::{Action, ClientEvent, RoomEvent, RoomId};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::error::ClientError;

/// An open room event stream. Events are forwarded as [`ClientEvent::Room`]
/// until the stream ends or the subscription is dropped.
#[derive(Debug,)]
pub struct RoomSubscription {
    room: RoomId,
    task: JoinHandle<(),>,
}

impl RoomSubscription {
    /// Connects to `url` and starts forwarding events into `events`.
    ///
    /// # Errors
    /// Fails when the WebSocket handshake fails.
    pub async fn connect(
        url: &str,
        room: RoomId,
        events: mpsc::Sender<ClientEvent,>,
    ) -> Result<Self, ClientError,> {
        let (stream, _,) = tokio_tungstenite::connect_async(url,).await?;
        info!("subscribed to room {room} at {url}");
        let task = tokio::spawn(forward(stream, events,),);
        Ok(Self { room, task, },)
    }

    #[must_use]
    pub const fn room(&self,) -> &RoomId {
        &self.room
    }

}

impl Drop for RoomSubscription {
    fn drop(&mut self,) {
        debug!("closing subscription to room {}", self.room);
        self.task.abort();
    }
}

async fn forward<S,>(mut stream: WebSocketStream<S,>, events: mpsc::Sender<ClientEvent,>,)
where S: AsyncRead + AsyncWrite + Unpin {
    let closed_by_server = loop {
        let Some(frame,) = stream.next().await else {
            break true;
        };
        match frame {
            | Ok(WsMessage::Text(text,),) => match RoomEvent::from_json(text.as_str(),) {
                | Ok(event,) => {
                    debug!("room event {event:?}");
                    if events.send(ClientEvent::Room(event,),).await.is_err() {
                        break false;
                    }
                },
                | Err(e,) => warn!("dropping malformed room event {}: {e}", text.as_str()),
            },
            | Ok(WsMessage::Close(_,),) => break true,
            | Ok(_,) => continue, // pings and binary frames carry no events
            | Err(e,) => {
                warn!("room event stream failed: {e}");
                let _ = events.send(ClientEvent::failed(Action::Subscribe, e,),).await;
                break false;
            },
        }
    };

    if closed_by_server {
        info!("server closed the room event stream");
        let _ = events
            .send(ClientEvent::failed(Action::Subscribe, ClientError::StreamClosed,),)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::SinkExt;
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn forwards_typed_events_and_skips_garbage() {
        let listener = TcpListener::bind("127.0.0.1:0",).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _,) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream,).await.unwrap();
            for frame in [
                r#"{"type":"lobby_update","data":{"participants_count":2}}"#,
                "not json",
                r#"{"type":"voting_started"}"#,
            ] {
                ws.send(WsMessage::text(frame,),).await.unwrap();
            }
            ws.close(None,).await.unwrap();
        },);

        let (tx, mut rx,) = mpsc::channel(8,);
        let sub = RoomSubscription::connect(&format!("ws://{addr}"), "1".into(), tx,)
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await,
            Some(ClientEvent::Room(RoomEvent::LobbyUpdate { participants_count: 2 }))
        );
        assert_eq!(rx.recv().await, Some(ClientEvent::Room(RoomEvent::VotingStarted)));
        assert_eq!(
            rx.recv().await,
            Some(ClientEvent::failed(Action::Subscribe, ClientError::StreamClosed))
        );
        assert_eq!(sub.room().as_str(), "1");
    }

    #[tokio::test]
    async fn reports_server_close_while_sender_is_shared() {
        let listener = TcpListener::bind("127.0.0.1:0",).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (stream, _,) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream,).await.unwrap();
            ws.close(None,).await.unwrap();
        },);

        // the bridge keeps its own sender alive, so the channel never closes
        let (tx, mut rx,) = mpsc::channel(8,);
        let _sub = RoomSubscription::connect(&format!("ws://{addr}"), "1".into(), tx.clone(),)
            .await
            .unwrap();

        let event = tokio::time::timeout(Duration::from_secs(2,), rx.recv(),)
            .await
            .expect("close is reported",);
        assert!(matches!(
            event,
            Some(ClientEvent::Failed { action: Action::Subscribe, reason })
                if reason == "room event stream closed"
        ));
    }

    #[tokio::test]
    async fn connect_to_closed_port_fails() {
        let listener = TcpListener::bind("127.0.0.1:0",).await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener,);

        let (tx, _rx,) = mpsc::channel(1,);
        let err = RoomSubscription::connect(&format!("ws://{addr}"), "1".into(), tx,)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::WebSocket(_)));
    }
}
