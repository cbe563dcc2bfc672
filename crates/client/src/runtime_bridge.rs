//! Glue that runs the room client on its own Tokio runtime and exposes two
//! channels to the GUI:
//!   * push commands  -> `cmd_tx` (`UiCmd` -> runtime)
//!   * pull results   <- `msg_rx` (`ClientEvent` <- runtime)

use std::sync::Arc;

use kinoswap_core::{Action, Candidate, ClientEvent, RoomId, UiCmd};
use log::{debug, info, warn};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{HttpRoomApi, RoomApi};
use crate::config::{CandidateSource, ClientConfig};
use crate::error::ClientError;
use crate::events::RoomSubscription;

/// Handle returned to the GUI.
pub struct UiHandle {
    /// GUI -> runtime
    pub cmd_tx: mpsc::Sender<UiCmd,>,
    /// runtime -> GUI, drained every frame
    pub msg_rx: mpsc::Receiver<ClientEvent,>,
    pub _rt:    Option<Arc<Runtime,>,>, // keep Tokio alive when we own it
}

/// Spawns a dedicated runtime and the bridge task on it.
///
/// # Errors
/// Fails when the runtime or the HTTP client cannot be built.
pub fn start(config: ClientConfig,) -> Result<UiHandle, ClientError,> {
    let rt = Arc::new(
        Builder::new_multi_thread()
            .enable_all()
            .thread_name("net-rt",)
            .build()?,
    );
    let mut handle = start_on(rt.handle(), config,)?;
    handle._rt = Some(rt,);
    Ok(handle,)
}

/// Spawns the bridge task on an existing runtime.
///
/// # Errors
/// Fails when the HTTP client cannot be built.
pub fn start_on(rt: &Handle, config: ClientConfig,) -> Result<UiHandle, ClientError,> {
    let api = HttpRoomApi::new(config.clone(),)?;
    Ok(start_with_api(rt, Arc::new(api,), config,),)
}

/// Spawns the bridge task with any [`RoomApi`] implementation.
#[must_use]
pub fn start_with_api(rt: &Handle, api: Arc<dyn RoomApi,>, config: ClientConfig,) -> UiHandle {
    let capacity = config.event_capacity.max(1,);
    let (cmd_tx, cmd_rx,) = mpsc::channel::<UiCmd,>(capacity,); // UI -> Runtime
    let (msg_tx, msg_rx,) = mpsc::channel::<ClientEvent,>(capacity,); // Runtime -> UI
    let (opened_tx, opened_rx,) = mpsc::channel::<Opened,>(4,); // connect tasks -> bridge

    info!(
        "runtime bridge for {} (candidates: {})",
        config.api_url, config.candidate_source
    );
    let bridge = Bridge {
        api,
        config,
        events: msg_tx,
        opened: opened_tx,
        generation: 0,
        connecting: None,
        subscription: None,
    };
    rt.spawn(bridge.run(cmd_rx, opened_rx,),);

    UiHandle {
        cmd_tx,
        msg_rx,
        _rt: None,
    }
}

/// Outcome of a connect task, tagged with the subscribe request it answers.
struct Opened {
    generation: u64,
    room:       RoomId,
    result:     Result<RoomSubscription, ClientError,>,
}

struct Bridge {
    api:          Arc<dyn RoomApi,>,
    config:       ClientConfig,
    events:       mpsc::Sender<ClientEvent,>,
    opened:       mpsc::Sender<Opened,>,
    /// Bumped by every subscribe and unsubscribe; older connects are stale.
    generation:   u64,
    connecting:   Option<JoinHandle<(),>,>,
    subscription: Option<RoomSubscription,>,
}

impl Bridge {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<UiCmd,>,
        mut opened_rx: mpsc::Receiver<Opened,>,
    ) {
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd,) = cmd else { break };
                    info!("ui command {cmd}");
                    match cmd {
                        | UiCmd::Shutdown => break,
                        | UiCmd::Subscribe(room,) => self.subscribe(room,),
                        | UiCmd::Unsubscribe => self.unsubscribe(),
                        | request => self.spawn_request(request,),
                    }
                },
                Some(opened,) = opened_rx.recv() => self.install(opened,).await,
            }
        }
        self.unsubscribe();
        info!("runtime bridge stopped");
    }

    /// Drops any open subscription and starts connecting to `room` in the
    /// background.
    fn subscribe(&mut self, room: RoomId,) {
        self.unsubscribe();

        let generation = self.generation;
        let config = self.config.clone();
        let events = self.events.clone();
        let opened = self.opened.clone();
        self.connecting = Some(tokio::spawn(async move {
            let result = open(&config, &room, events,).await;
            let _ = opened.send(Opened { generation, room, result, },).await;
        },),);
    }

    async fn install(&mut self, opened: Opened,) {
        let Opened {
            generation,
            room,
            result,
        } = opened;
        if generation != self.generation {
            debug!("dropping stale connect to room {room}");
            return;
        }
        self.connecting = None;

        let event = match result {
            | Ok(subscription,) => {
                self.subscription = Some(subscription,);
                ClientEvent::Subscribed(room,)
            },
            | Err(e,) => {
                warn!("cannot subscribe to room {room}: {e}");
                ClientEvent::failed(Action::Subscribe, e,)
            },
        };
        let _ = self.events.send(event,).await;
    }

    fn unsubscribe(&mut self,) {
        self.generation += 1;
        if let Some(connecting,) = self.connecting.take() {
            debug!("cancelling pending connect");
            connecting.abort();
        }
        if let Some(subscription,) = self.subscription.take() {
            info!("unsubscribing from room {}", subscription.room());
        }
    }

    /// Each request runs as its own task so a slow call never holds up the
    /// command loop or the room events.
    fn spawn_request(&self, cmd: UiCmd,) {
        let api = Arc::clone(&self.api,);
        let config = self.config.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), &config, cmd,).await;
            let _ = events.send(event,).await;
        },);
    }
}

async fn open(
    config: &ClientConfig,
    room: &RoomId,
    events: mpsc::Sender<ClientEvent,>,
) -> Result<RoomSubscription, ClientError,> {
    let url = config.room_events_url(room,)?;
    let connect = RoomSubscription::connect(&url, room.clone(), events,);
    tokio::time::timeout(config.request_timeout, connect,)
        .await
        .map_err(|_| ClientError::Timeout(url,),)?
}

/// Runs one request command and reports its outcome.
pub async fn execute(api: &dyn RoomApi, config: &ClientConfig, cmd: UiCmd,) -> ClientEvent {
    let action = cmd.action();
    let outcome = match cmd {
        | UiCmd::CreateRoom => api.create_room().await.map(ClientEvent::RoomCreated,),
        | UiCmd::CheckRoom(room,) => match api.check_room(&room,).await {
            | Ok((),) => Ok(ClientEvent::RoomChecked {
                room,
                available: true,
            },),
            | Err(ClientError::RoomNotFound,) => Ok(ClientEvent::RoomChecked {
                room,
                available: false,
            },),
            | Err(e,) => Err(e,),
        },
        | UiCmd::Participate { room, text, } => api
            .participate(&room, &text,)
            .await
            .map(|()| ClientEvent::ReadyAccepted,),
        | UiCmd::StartVoting(room,) => api
            .start_voting(&room,)
            .await
            .map(|()| ClientEvent::StartAccepted,),
        | UiCmd::LoadCandidates(room,) => match config.candidate_source {
            | CandidateSource::Demo => Ok(ClientEvent::CandidatesLoaded(Candidate::demo_set(),),),
            | CandidateSource::Remote => api
                .candidates(&room, config.candidate_count,)
                .await
                .map(ClientEvent::CandidatesLoaded,),
        },
        | UiCmd::SubmitBallot { room, ballot, } => match config.candidate_source {
            | CandidateSource::Demo => {
                info!(
                    "demo candidates, not submitting {} decisions for room {room}",
                    ballot.len()
                );
                Ok(ClientEvent::BallotSubmitted,)
            },
            | CandidateSource::Remote => api
                .submit_ballot(&room, &ballot,)
                .await
                .map(|()| ClientEvent::BallotSubmitted,),
        },
        | UiCmd::LoadResults(room,) => api.results(&room,).await.map(ClientEvent::ResultsLoaded,),
        | other @ (UiCmd::Subscribe(_,) | UiCmd::Unsubscribe | UiCmd::Shutdown) => {
            return ClientEvent::failed(action, format!("{other} is not a request"),);
        },
    };

    outcome.unwrap_or_else(|e| {
        warn!("{action:?} failed: {e}");
        ClientEvent::failed(action, e,)
    },)
}
