//! `HttpRoomApi` against a small in-process axum server.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use kinoswap_client::{ClientConfig, ClientError, HttpRoomApi, RoomApi};
use kinoswap_core::RoomId;
use serde_json::json;
use tokio::net::TcpListener;

async fn serve(app: Router,) -> ClientConfig {
    let listener = TcpListener::bind("127.0.0.1:0",).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app,).await.unwrap() },);
    ClientConfig {
        api_url: format!("http://{addr}"),
        request_timeout: Duration::from_secs(5,),
        ..ClientConfig::default()
    }
}

fn app() -> Router {
    Router::new()
        .route("/api/rooms", get(|| async { Json(json!({ "room_id": "654321" })) },),)
        .route(
            "/api/rooms/{id}/acquired",
            get(|Path(id,): Path<String,>| async move {
                match id.as_str() {
                    | "654321" => StatusCode::OK,
                    | "500500" => StatusCode::INTERNAL_SERVER_ERROR,
                    | _ => StatusCode::NOT_FOUND,
                }
            },),
        )
        .route(
            "/api/rooms/{id}/movies",
            get(|Query(query,): Query<HashMap<String, String,>,>| async move {
                let count = query.get("count",).cloned().unwrap_or_default();
                Json(json!({
                    "movies": [{
                        "id": "m1",
                        "title": count,
                        "poster_link": "https://img/1.jpg",
                        "genres": ["драма"],
                        "overview": "...",
                        "year": 2001,
                        "rating": 7.5,
                    }]
                }),)
            },),
        )
        .route("/api/rooms/{id}/results", get(|| async { "not json" },),)
}

#[tokio::test]
async fn creates_and_checks_rooms() {
    let api = HttpRoomApi::new(serve(app(),).await,).unwrap();

    assert_eq!(api.create_room().await.unwrap(), RoomId::from("654321"));
    api.check_room(&"654321".into(),).await.unwrap();

    assert!(matches!(
        api.check_room(&"000000".into()).await,
        Err(ClientError::RoomNotFound)
    ));
    assert!(matches!(
        api.check_room(&"500500".into()).await,
        Err(ClientError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn decodes_server_candidates() {
    let api = HttpRoomApi::new(serve(app(),).await,).unwrap();
    let movies = api.candidates(&"654321".into(), 5,).await.unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "5");
    assert_eq!(movies[0].poster, "https://img/1.jpg");
    assert_eq!(movies[0].genre, vec!["драма".to_string()]);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let api = HttpRoomApi::new(serve(app(),).await,).unwrap();
    assert!(matches!(
        api.results(&"654321".into()).await,
        Err(ClientError::Decode(_))
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0",).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener,);

    let api = HttpRoomApi::new(ClientConfig {
        api_url: format!("http://{addr}"),
        ..ClientConfig::default()
    },)
    .unwrap();
    assert!(matches!(api.create_room().await, Err(ClientError::Transport(_))));
}
