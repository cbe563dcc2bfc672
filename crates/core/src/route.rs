//! Screens of the client and their path form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::room::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, Error,)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String,),

    #[error("route {0} needs a room parameter")]
    MissingRoom(String,),
}

/// A screen plus the parameters it is opened with.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum Route {
    Entry,
    Lobby { room: RoomId, host: bool, },
    Voting { room: RoomId, },
    Results { room: RoomId, },
}

impl Route {
    #[must_use]
    pub fn room(&self,) -> Option<&RoomId,> {
        match self {
            | Self::Entry => None,
            | Self::Lobby { room, .. }
            | Self::Voting { room, }
            | Self::Results { room, } => Some(room,),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result {
        match self {
            | Self::Entry => write!(f, "/"),
            | Self::Lobby { room, host: true, } => {
                write!(f, "/rooms/{room}/lobby?host=true")
            },
            | Self::Lobby { room, host: false, } => write!(f, "/rooms/{room}/lobby"),
            | Self::Voting { room, } => write!(f, "/voting?room={room}"),
            | Self::Results { room, } => write!(f, "/results?room={room}"),
        }
    }
}

fn query_param<'a,>(query: &'a str, key: &str,) -> Option<&'a str,> {
    query
        .split('&',)
        .filter_map(|pair| pair.split_once('=',),)
        .find(|(k, _,)| *k == key,)
        .map(|(_, v,)| v,)
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str,) -> Result<Self, Self::Err,> {
        let (path, query,) = s.split_once('?',).unwrap_or((s, "",),);
        let segments: Vec<&str,> =
            path.split('/',).filter(|seg| !seg.is_empty(),).collect();

        let room_param = || {
            query_param(query, "room",)
                .filter(|v| !v.is_empty(),)
                .map(RoomId::from,)
                .ok_or_else(|| RouteError::MissingRoom(s.to_string(),),)
        };

        match segments.as_slice() {
            | [] => Ok(Self::Entry,),
            | ["rooms", room, "lobby"] => Ok(Self::Lobby {
                room: RoomId::from(*room,),
                host: query_param(query, "host",) == Some("true",),
            },),
            | ["voting"] => Ok(Self::Voting { room: room_param()?, },),
            | ["results"] => Ok(Self::Results { room: room_param()?, },),
            | _ => Err(RouteError::Unknown(s.to_string(),),),
        }
    }
}
