//! Client settings, read from `KINOSWAP_*` environment variables.

use std::env;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use kinoswap_core::RoomId;
use log::{info, warn};

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Where the voting screen takes its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub enum CandidateSource {
    /// The built-in catalogue. Ballots are not submitted.
    #[default]
    Demo,
    /// `GET /api/rooms/{id}/movies` on the room server.
    Remote,
}

impl FromStr for CandidateSource {
    type Err = String;

    fn from_str(s: &str,) -> Result<Self, Self::Err,> {
        match s.trim().to_ascii_lowercase().as_str() {
            | "demo" => Ok(Self::Demo,),
            | "remote" => Ok(Self::Remote,),
            | other => Err(format!("unknown candidate source `{other}`"),),
        }
    }
}

impl Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result {
        f.write_str(match self {
            | Self::Demo => "demo",
            | Self::Remote => "remote",
        },)
    }
}

#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ClientConfig {
    /// Base URL of the room server, without the `/api` prefix.
    pub api_url:          String,
    pub request_timeout:  Duration,
    pub candidate_source: CandidateSource,
    pub candidate_count:  usize,
    /// Capacity of the command and event channels.
    pub event_capacity:   usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url:          DEFAULT_API_URL.to_string(),
            request_timeout:  Duration::from_secs(30,),
            candidate_source: CandidateSource::Demo,
            candidate_count:  5,
            event_capacity:   64,
        }
    }
}

impl ClientConfig {
    /// Reads the process environment. Missing or invalid values fall back to
    /// the defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key,).ok(),)
    }

    pub fn from_lookup(lookup: impl Fn(&str,) -> Option<String,>,) -> Self {
        let defaults = Self::default();
        Self {
            api_url:          try_load(&lookup, "KINOSWAP_API_URL", defaults.api_url,),
            request_timeout:  Duration::from_secs(try_load(
                &lookup,
                "KINOSWAP_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            ),),
            candidate_source: try_load(
                &lookup,
                "KINOSWAP_CANDIDATES",
                defaults.candidate_source,
            ),
            candidate_count:  try_load(
                &lookup,
                "KINOSWAP_CANDIDATE_COUNT",
                defaults.candidate_count,
            ),
            event_capacity:   defaults.event_capacity,
        }
    }

    /// `{api_url}/api{path}`.
    #[must_use]
    pub fn endpoint(&self, path: &str,) -> String {
        format!("{}/api{path}", self.api_url.trim_end_matches('/'))
    }

    /// WebSocket URL of the room event stream, `ws` for `http` and `wss` for
    /// `https`.
    ///
    /// # Errors
    /// Fails when the base URL is neither http nor https.
    pub fn room_events_url(&self, room: &RoomId,) -> Result<String, ClientError,> {
        let http = self.endpoint(&format!("/rooms/{room}/ws"),);
        if let Some(rest,) = http.strip_prefix("https://",) {
            Ok(format!("wss://{rest}"),)
        } else if let Some(rest,) = http.strip_prefix("http://",) {
            Ok(format!("ws://{rest}"),)
        } else {
            Err(ClientError::InvalidUrl(self.api_url.clone(),),)
        }
    }
}

fn try_load<T,>(lookup: &impl Fn(&str,) -> Option<String,>, key: &str, default: T,) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw,) = lookup(key,) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value `{raw}`: {e}, using default: {default}");
        default
    },)
}
