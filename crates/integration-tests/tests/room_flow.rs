//! `crates/integration-tests/tests/room_flow.rs`
//!
//! Headless clients drive the screen controllers through the real runtime
//! bridge against the in-process room server.

mod support;

use std::time::Duration;

use anyhow::Result;
use env_logger::Env;
use kinoswap_client::CandidateSource;
use kinoswap_core::capability::{Recorder, Toast};
use kinoswap_core::gesture::Point;
use kinoswap_core::voting::VotingSession;
use kinoswap_core::{Route, text};
use kinoswap_integration_tests::FakeServer;

use crate::support::mock_gui::{MockUi, Screen};

// Initialize logger for tests to print info and warn messages.
fn init_logger() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("error",),).try_init();
}

fn swipe(voting: &mut VotingSession, shell: &mut Recorder, dx: f32,) {
    voting.press(Point::new(150.0, 200.0,),);
    voting.drag(Point::new(150.0 + dx, 210.0,),);
    voting.release(shell,);
}

/// Creates a room as host and returns its route.
async fn host_room(host: &mut MockUi,) -> Route {
    {
        let (entry, shell,) = host.entry();
        entry.create_room(shell,);
    }
    host.wait_for("host lobby", |ui| ui.is_on("lobby",),).await;
    host.route().cloned().expect("host navigated",)
}

fn lobby_ready(ui: &MockUi, n: u32,) -> bool {
    matches!(&ui.screen, Screen::Lobby(lobby) if lobby.ready_participants() >= n)
}

fn candidates_loaded(ui: &MockUi,) -> bool {
    matches!(&ui.screen, Screen::Voting(voting) if voting.is_loaded())
}

fn results_loaded(ui: &MockUi,) -> bool {
    ui.is_on("results",) && ui.results().results().is_some()
}

/// Host and guest meet in a room, vote on the remote candidates and both end
/// up with the server's results.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn host_and_guest_vote_and_see_results() -> Result<(),> {
    init_logger();
    let server = FakeServer::start().await;
    let mut host = MockUi::new("host", server.base_url(), CandidateSource::Remote,);
    let mut guest = MockUi::new("guest", server.base_url(), CandidateSource::Remote,);

    let Route::Lobby { room, host: true, } = host_room(&mut host,).await else {
        panic!("host should enter the lobby as host");
    };

    {
        let (entry, shell,) = guest.entry();
        entry.form_mut().paste(room.as_str(),);
        entry.join_room(shell,);
    }
    guest.wait_for("guest lobby", |ui| ui.is_on("lobby",),).await;
    assert_eq!(guest.route(), Some(&Route::Lobby { room: room.clone(), host: false }));

    host.wait_for("both connected", |ui| {
        matches!(&ui.screen, Screen::Lobby(lobby) if lobby.participants() == 2)
    },)
    .await;

    {
        let (lobby, shell,) = host.lobby();
        lobby.set_preferences("комедия",);
        lobby.mark_ready(shell,);
    }
    {
        let (lobby, shell,) = guest.lobby();
        lobby.mark_ready(shell,);
    }
    host.wait_for_toast(Toast::success(text::READY_WITH_WISHES,),).await;
    guest.wait_for_toast(Toast::success(text::READY_WITHOUT_WISHES,),).await;
    host.wait_for("both ready", |ui| lobby_ready(ui, 2,),).await;

    let wishes = server.inspect(room.as_str(), |record| record.ready.clone(),);
    assert!(wishes.contains(&"комедия".to_string()));
    assert!(wishes.contains(&String::new()));

    // a guest cannot start, the host can
    {
        let (lobby, shell,) = guest.lobby();
        lobby.start_voting(shell,);
        assert!(shell.commands.is_empty());
    }
    {
        let (lobby, shell,) = host.lobby();
        lobby.start_voting(shell,);
    }
    host.wait_for("host voting", candidates_loaded,).await;
    guest.wait_for("guest voting", candidates_loaded,).await;
    assert!(guest.shell.toasts.contains(&Toast::success(text::VOTING_STARTED)));
    assert!(server.inspect(room.as_str(), |record| record.started));

    {
        let (voting, shell,) = host.voting();
        assert_eq!(voting.progress().total, 3);
        while !voting.is_complete() {
            voting.approve(shell,);
        }
    }
    {
        let (voting, shell,) = guest.voting();
        swipe(voting, shell, 150.0,);
        swipe(voting, shell, 40.0,);
        assert_eq!(voting.ballot().len(), 1, "a short swipe records nothing");
        while !voting.is_complete() {
            swipe(voting, shell, -150.0,);
        }
    }
    host.pump().await;
    guest.pump().await;

    host.wait_for("host results", results_loaded,).await;
    guest.wait_for("guest results", results_loaded,).await;

    assert_eq!(host.route(), Some(&Route::Results { room: room.clone() }));
    assert_eq!(server.inspect(room.as_str(), |record| record.ballots.len()), 2);

    let results = guest.results().results().unwrap_or_default();
    let summary: Vec<(&str, u32,),> =
        results.iter().map(|r| (r.candidate.id.as_str(), r.likes,),).collect();
    assert_eq!(summary, vec![("movie-1", 2), ("movie-2", 1), ("movie-3", 1)]);
    Ok((),)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_code_keeps_the_entry_screen() {
    init_logger();
    let server = FakeServer::start().await;
    let mut guest = MockUi::new("guest", server.base_url(), CandidateSource::Demo,);

    {
        let (entry, shell,) = guest.entry();
        entry.form_mut().paste("999-999",);
        entry.join_room(shell,);
    }
    guest.wait_for_toast(Toast::error(text::ROOM_UNAVAILABLE,),).await;
    assert!(guest.is_on("entry"));
    assert!(guest.route().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_server_fails_room_creation() {
    init_logger();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0",).await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener,);

    let mut host = MockUi::new("host", url, CandidateSource::Demo,);
    {
        let (entry, shell,) = host.entry();
        entry.create_room(shell,);
    }
    host.wait_for_toast(Toast::error(text::CREATE_FAILED,),).await;
    assert!(host.is_on("entry"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_ready_can_be_retried() {
    init_logger();
    let server = FakeServer::start().await;
    let mut host = MockUi::new("host", server.base_url(), CandidateSource::Demo,);
    host_room(&mut host,).await;

    server.reject_participation();
    {
        let (lobby, shell,) = host.lobby();
        lobby.mark_ready(shell,);
    }
    host.wait_for_toast(Toast::error("Ошибка: server answered 409: participation closed",),)
        .await;

    let (lobby, shell,) = host.lobby();
    assert!(!lobby.is_ready());
    lobby.mark_ready(shell,);
    assert_eq!(shell.commands.len(), 1, "a failed ready leaves the button enabled");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn demo_candidates_are_not_submitted() {
    init_logger();
    let server = FakeServer::start().await;
    let mut host = MockUi::new("host", server.base_url(), CandidateSource::Demo,);
    let Route::Lobby { room, .. } = host_room(&mut host,).await else {
        panic!("expected the lobby");
    };

    {
        let (lobby, shell,) = host.lobby();
        lobby.mark_ready(shell,);
        lobby.start_voting(shell,);
    }
    host.wait_for("voting", candidates_loaded,).await;
    {
        let (voting, shell,) = host.voting();
        assert_eq!(voting.current().map(|c| c.id.as_str()), Some("movie-1"));
        while !voting.is_complete() {
            voting.reject(shell,);
        }
    }
    host.wait_for("results screen", |ui| ui.is_on("results",),).await;

    tokio::time::sleep(Duration::from_millis(100,),).await;
    host.pump().await;
    assert_eq!(server.inspect(room.as_str(), |record| record.ballots.len()), 0);
    assert!(!host.results().is_finished());
}
