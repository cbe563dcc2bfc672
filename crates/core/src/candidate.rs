//! Movie candidates presented for a like/dislike decision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a candidate, opaque to the client.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CandidateId(String,);

impl CandidateId {
    #[must_use]
    pub fn new(id: impl Into<String,>,) -> Self {
        Self(id.into(),)
    }

    #[must_use]
    pub fn as_str(&self,) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str,> for CandidateId {
    fn from(id: &str,) -> Self {
        Self::new(id,)
    }
}

/// A movie shown on a voting card.
///
/// The web front-end and the room server name a few fields differently, both
/// spellings are accepted when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
pub struct Candidate {
    pub id:          CandidateId,
    pub title:       String,
    #[serde(alias = "poster_link", default)]
    pub poster:      String,
    #[serde(default)]
    pub duration:    String,
    #[serde(alias = "genres", default)]
    pub genre:       Vec<String,>,
    #[serde(alias = "overview", default)]
    pub description: String,
    pub year:        u16,
    pub rating:      f32,
}

impl Candidate {
    /// Highest rating on the 0-10 scale.
    pub const MAX_RATING: f32 = 10.0;

    /// Rating clamped to the 0-10 scale.
    #[must_use]
    pub fn rating(&self,) -> f32 {
        self.rating.clamp(0.0, Self::MAX_RATING,)
    }

    /// Comma separated genre tags, as shown on the back of the card.
    #[must_use]
    pub fn genre_line(&self,) -> String {
        self.genre.join(", ",)
    }

    /// The catalogue used while the room server does not serve candidates.
    #[must_use]
    pub fn demo_set() -> Vec<Self,> {
        vec![
            Self {
                id:          CandidateId::new("movie-1",),
                title:       "Маска".to_string(),
                poster:      "/placeholder.svg".to_string(),
                duration:    "101 мин".to_string(),
                genre:       vec!["Комедия".to_string(), "Фэнтези".to_string()],
                description: "Застенчивый банковский служащий Стэнли Ипкисс \
                              находит древнюю маску, которая превращает его в \
                              зеленолицого супергероя с невероятными \
                              способностями."
                    .to_string(),
                year:        1994,
                rating:      6.9,
            },
            Self {
                id:          CandidateId::new("movie-2",),
                title:       "Джон Уик".to_string(),
                poster:      "/placeholder.svg".to_string(),
                duration:    "101 мин".to_string(),
                genre:       vec!["Боевик".to_string(), "Триллер".to_string()],
                description: "Легендарный киллер выходит из отставки, чтобы \
                              отомстить за убийство своей собаки - последнего \
                              подарка от покойной жены."
                    .to_string(),
                year:        2014,
                rating:      7.4,
            },
            Self {
                id:          CandidateId::new("movie-3",),
                title:       "Интерстеллар".to_string(),
                poster:      "/placeholder.svg".to_string(),
                duration:    "169 мин".to_string(),
                genre:       vec!["Фантастика".to_string(), "Драма".to_string()],
                description: "В будущем Земля умирает, и группа исследователей \
                              отправляется через червоточину в поисках нового \
                              дома для человечества."
                    .to_string(),
                year:        2014,
                rating:      8.6,
            },
        ]
    }
}
