//! REST calls against the room server.

use std::collections::BTreeMap;

use async_trait::async_trait;
use kinoswap_core::{Ballot, Candidate, RoomId, RoomResult};
use log::debug;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Room operations the runtime bridge needs.
#[async_trait]
pub trait RoomApi: Send + Sync {
    async fn create_room(&self,) -> Result<RoomId, ClientError,>;

    /// # Errors
    /// [`ClientError::RoomNotFound`] when the server does not know the room.
    async fn check_room(&self, room: &RoomId,) -> Result<(), ClientError,>;

    async fn participate(&self, room: &RoomId, text: &str,) -> Result<(), ClientError,>;

    async fn start_voting(&self, room: &RoomId,) -> Result<(), ClientError,>;

    async fn candidates(&self, room: &RoomId, count: usize,)
    -> Result<Vec<Candidate,>, ClientError,>;

    async fn submit_ballot(&self, room: &RoomId, ballot: &Ballot,) -> Result<(), ClientError,>;

    async fn results(&self, room: &RoomId,) -> Result<Vec<RoomResult,>, ClientError,>;
}

#[derive(Debug, Deserialize,)]
struct CreatedRoom {
    room_id: RoomId,
}

#[derive(Debug, Serialize,)]
struct Participation<'a,> {
    text: &'a str,
}

#[derive(Debug, Deserialize,)]
struct Movies {
    movies: Vec<Candidate,>,
}

#[derive(Debug, Serialize,)]
struct Reactions {
    reactions: BTreeMap<String, u8,>,
}

#[derive(Debug, Deserialize,)]
struct Results {
    results: Vec<RoomResult,>,
}

/// [`RoomApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone,)]
pub struct HttpRoomApi {
    http:   reqwest::Client,
    config: ClientConfig,
}

impl HttpRoomApi {
    /// # Errors
    /// Fails when the HTTP client cannot be built.
    pub fn new(config: ClientConfig,) -> Result<Self, ClientError,> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout,)
            .build()?;
        Ok(Self { http, config, },)
    }

    #[must_use]
    pub const fn config(&self,) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str,) -> String {
        self.config.endpoint(path,)
    }
}

/// Turns a non-2xx answer into [`ClientError::Status`].
async fn success(response: Response,) -> Result<Response, ClientError,> {
    let status = response.status();
    if status.is_success() {
        return Ok(response,);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    },)
}

async fn decode<T: DeserializeOwned,>(response: Response,) -> Result<T, ClientError,> {
    let bytes = success(response,).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes,)?,)
}

#[async_trait]
impl RoomApi for HttpRoomApi {
    async fn create_room(&self,) -> Result<RoomId, ClientError,> {
        let response = self.http.get(self.url("/rooms",),).send().await?;
        let created: CreatedRoom = decode(response,).await?;
        debug!("server created room {}", created.room_id);
        Ok(created.room_id,)
    }

    async fn check_room(&self, room: &RoomId,) -> Result<(), ClientError,> {
        let response = self
            .http
            .get(self.url(&format!("/rooms/{room}/acquired"),),)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::RoomNotFound,);
        }
        success(response,).await?;
        Ok((),)
    }

    async fn participate(&self, room: &RoomId, text: &str,) -> Result<(), ClientError,> {
        let response = self
            .http
            .patch(self.url(&format!("/rooms/{room}/participate"),),)
            .json(&Participation { text, },)
            .send()
            .await?;
        success(response,).await?;
        Ok((),)
    }

    async fn start_voting(&self, room: &RoomId,) -> Result<(), ClientError,> {
        let response = self
            .http
            .patch(self.url(&format!("/rooms/{room}/start"),),)
            .send()
            .await?;
        success(response,).await?;
        Ok((),)
    }

    async fn candidates(
        &self,
        room: &RoomId,
        count: usize,
    ) -> Result<Vec<Candidate,>, ClientError,> {
        let response = self
            .http
            .get(self.url(&format!("/rooms/{room}/movies"),),)
            .query(&[("count", count,),],)
            .send()
            .await?;
        let movies: Movies = decode(response,).await?;
        Ok(movies.movies,)
    }

    async fn submit_ballot(&self, room: &RoomId, ballot: &Ballot,) -> Result<(), ClientError,> {
        let response = self
            .http
            .patch(self.url(&format!("/rooms/{room}/results"),),)
            .json(&Reactions {
                reactions: ballot.reactions(),
            },)
            .send()
            .await?;
        success(response,).await?;
        Ok((),)
    }

    async fn results(&self, room: &RoomId,) -> Result<Vec<RoomResult,>, ClientError,> {
        let response = self
            .http
            .get(self.url(&format!("/rooms/{room}/results"),),)
            .send()
            .await?;
        let results: Results = decode(response,).await?;
        Ok(results.results,)
    }
}
