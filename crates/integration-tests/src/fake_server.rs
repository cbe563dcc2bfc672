//! A room server with the REST and WebSocket surface the client talks to.
//!
//! Rooms live in memory. Every WebSocket connection counts as a participant
//! and `voting_finished` is broadcast once every ready participant submitted.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use kinoswap_core::{Candidate, RoomEvent, RoomResult};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// What the server saw of one room.
#[derive(Debug,)]
pub struct RoomRecord {
    pub participants: u32,
    pub ready:        Vec<String,>,
    pub started:      bool,
    pub ballots:      Vec<BTreeMap<String, u8,>,>,
    events:           broadcast::Sender<String,>,
}

impl RoomRecord {
    fn new() -> Self {
        let (events, _,) = broadcast::channel(32,);
        Self {
            participants: 0,
            ready: Vec::new(),
            started: false,
            ballots: Vec::new(),
            events,
        }
    }

    fn publish(&self, event: &RoomEvent,) {
        if let Ok(text,) = event.to_json() {
            debug!("broadcast {text}");
            let _ = self.events.send(text,);
        }
    }

    /// Likes per candidate, most liked first.
    fn results(&self, catalogue: &[Candidate],) -> Vec<RoomResult,> {
        let mut results: Vec<RoomResult,> = catalogue
            .iter()
            .map(|candidate| RoomResult {
                likes:     self
                    .ballots
                    .iter()
                    .filter(|ballot| ballot.get(candidate.id.as_str(),) == Some(&1,),)
                    .count() as u32,
                candidate: candidate.clone(),
            },)
            .collect();
        results.sort_by(|a, b| b.likes.cmp(&a.likes,),);
        results
    }
}

#[derive(Debug, Default,)]
struct Rooms {
    next_code:         u32,
    rooms:             HashMap<String, RoomRecord,>,
    reject_participate: bool,
}

type Shared = Arc<Mutex<Rooms,>,>;

/// Handle of a running fake server. The server stops when this is dropped.
pub struct FakeServer {
    addr:  SocketAddr,
    rooms: Shared,
    task:  JoinHandle<(),>,
}

impl FakeServer {
    /// Binds an ephemeral local port and serves until dropped.
    ///
    /// # Panics
    /// When no local port can be bound.
    pub async fn start() -> Self {
        let rooms: Shared = Arc::new(Mutex::new(Rooms {
            next_code: 100_000,
            ..Rooms::default()
        },),);
        let listener = TcpListener::bind("127.0.0.1:0",).await.expect("bind fake server",);
        let addr = listener.local_addr().expect("local addr",);

        let app = router(rooms.clone(),);
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app,).await;
        },);
        info!("fake room server on {addr}");

        Self { addr, rooms, task, }
    }

    #[must_use]
    pub fn base_url(&self,) -> String {
        format!("http://{}", self.addr)
    }

    /// Makes `PATCH .../participate` answer 409 from now on.
    pub fn reject_participation(&self,) {
        lock(&self.rooms,).reject_participate = true;
    }

    /// Runs `f` on the record of `room`.
    ///
    /// # Panics
    /// When the room does not exist.
    pub fn inspect<T,>(&self, room: &str, f: impl FnOnce(&RoomRecord,) -> T,) -> T {
        let rooms = lock(&self.rooms,);
        f(rooms.rooms.get(room,).expect("unknown room",),)
    }
}

impl Drop for FakeServer {
    fn drop(&mut self,) {
        self.task.abort();
    }
}

fn lock(rooms: &Shared,) -> MutexGuard<'_, Rooms,> {
    rooms.lock().unwrap_or_else(std::sync::PoisonError::into_inner,)
}

/// The server-side catalogue.
fn catalogue() -> Vec<Candidate,> {
    Candidate::demo_set()
}

fn router(rooms: Shared,) -> Router {
    Router::new()
        .route("/api/rooms", get(create_room,),)
        .route("/api/rooms/{id}/acquired", get(acquired,),)
        .route("/api/rooms/{id}/participate", patch(participate,),)
        .route("/api/rooms/{id}/start", patch(start,),)
        .route("/api/rooms/{id}/movies", get(movies,),)
        .route("/api/rooms/{id}/results", patch(submit,).get(results,),)
        .route("/api/rooms/{id}/ws", get(events,),)
        .with_state(rooms,)
}

async fn create_room(State(rooms,): State<Shared,>,) -> impl IntoResponse {
    let mut rooms = lock(&rooms,);
    rooms.next_code += 1;
    let code = rooms.next_code.to_string();
    rooms.rooms.insert(code.clone(), RoomRecord::new(),);
    Json(json!({ "room_id": code }),)
}

async fn acquired(State(rooms,): State<Shared,>, Path(id,): Path<String,>,) -> StatusCode {
    if lock(&rooms,).rooms.contains_key(&id,) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

#[derive(Deserialize,)]
struct Participation {
    text: String,
}

async fn participate(
    State(rooms,): State<Shared,>,
    Path(id,): Path<String,>,
    Json(body,): Json<Participation,>,
) -> Response {
    let mut rooms = lock(&rooms,);
    if rooms.reject_participate {
        return (StatusCode::CONFLICT, "participation closed",).into_response();
    }
    let Some(room,) = rooms.rooms.get_mut(&id,) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    room.ready.push(body.text,);
    let ready_participants = room.ready.len() as u32;
    room.publish(&RoomEvent::ParticipantReady { ready_participants, },);
    StatusCode::OK.into_response()
}

async fn start(State(rooms,): State<Shared,>, Path(id,): Path<String,>,) -> StatusCode {
    let mut rooms = lock(&rooms,);
    let Some(room,) = rooms.rooms.get_mut(&id,) else {
        return StatusCode::NOT_FOUND;
    };
    room.started = true;
    room.publish(&RoomEvent::VotingStarted,);
    StatusCode::OK
}

async fn movies(
    State(rooms,): State<Shared,>,
    Path(id,): Path<String,>,
    Query(query,): Query<HashMap<String, String,>,>,
) -> Response {
    if !lock(&rooms,).rooms.contains_key(&id,) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let count = query
        .get("count",)
        .and_then(|c| c.parse::<usize>().ok(),)
        .unwrap_or(usize::MAX,);
    let movies: Vec<Candidate,> = catalogue().into_iter().take(count,).collect();
    Json(json!({ "movies": movies }),).into_response()
}

#[derive(Deserialize,)]
struct Reactions {
    reactions: BTreeMap<String, u8,>,
}

async fn submit(
    State(rooms,): State<Shared,>,
    Path(id,): Path<String,>,
    Json(body,): Json<Reactions,>,
) -> StatusCode {
    let mut rooms = lock(&rooms,);
    let Some(room,) = rooms.rooms.get_mut(&id,) else {
        return StatusCode::NOT_FOUND;
    };
    room.ballots.push(body.reactions,);
    if room.ballots.len() >= room.ready.len() {
        room.publish(&RoomEvent::VotingFinished,);
    }
    StatusCode::ACCEPTED
}

async fn results(State(rooms,): State<Shared,>, Path(id,): Path<String,>,) -> Response {
    let rooms = lock(&rooms,);
    let Some(room,) = rooms.rooms.get(&id,) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    Json(json!({ "results": room.results(&catalogue()) }),).into_response()
}

async fn events(
    State(rooms,): State<Shared,>,
    Path(id,): Path<String,>,
    ws: WebSocketUpgrade,
) -> Response {
    let subscription = {
        let rooms = lock(&rooms,);
        rooms.rooms.get(&id,).map(|room| room.events.subscribe(),)
    };
    let Some(subscription,) = subscription else {
        return StatusCode::NOT_FOUND.into_response();
    };

    ws.on_upgrade(move |socket| async move {
        {
            let mut rooms = lock(&rooms,);
            if let Some(room,) = rooms.rooms.get_mut(&id,) {
                room.participants += 1;
                let participants_count = room.participants;
                room.publish(&RoomEvent::LobbyUpdate { participants_count, },);
            }
        }
        forward(socket, subscription,).await;
    },)
}

async fn forward(mut socket: WebSocket, mut events: broadcast::Receiver<String,>,) {
    while let Ok(text,) = events.recv().await {
        if socket.send(Message::Text(text.into(),),).await.is_err() {
            break;
        }
    }
}
