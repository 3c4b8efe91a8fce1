//! Closed genre enumeration.
//!
//! # Invariants
//! - `Genre::ALL` lists every variant exactly once, in display order.
//! - `label()` and `FromStr` are exact inverses (case-sensitive).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Recognized book genres. Free-text genres are never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fantasy,
    Horror,
    Mystery,
    #[serde(rename = "Romance novel")]
    RomanceNovel,
    #[serde(rename = "Science fiction")]
    ScienceFiction,
    Thriller,
    #[serde(rename = "Historical Fiction")]
    HistoricalFiction,
    #[serde(rename = "Adventure fiction")]
    AdventureFiction,
    #[serde(rename = "Young adult")]
    YoungAdult,
    #[serde(rename = "Children's literature")]
    ChildrensLiterature,
    Fiction,
    Historical,
    #[serde(rename = "Literary fiction")]
    LiteraryFiction,
    Comedy,
    #[serde(rename = "Dystopian Fiction")]
    DystopianFiction,
    #[serde(rename = "Gothic fiction")]
    GothicFiction,
    #[serde(rename = "Magic realism")]
    MagicRealism,
    #[serde(rename = "Short story")]
    ShortStory,
    #[serde(rename = "Autobiography and memoir")]
    AutobiographyAndMemoir,
    #[serde(rename = "Contemporary fantasy")]
    ContemporaryFantasy,
    #[serde(rename = "Dark fantasy")]
    DarkFantasy,
    #[serde(rename = "Romantic fantasy")]
    RomanticFantasy,
    #[serde(rename = "Graphic novel")]
    GraphicNovel,
}

impl Genre {
    /// Every genre, in the order selection lists should present them.
    pub const ALL: [Genre; 23] = [
        Genre::Fantasy,
        Genre::Horror,
        Genre::Mystery,
        Genre::RomanceNovel,
        Genre::ScienceFiction,
        Genre::Thriller,
        Genre::HistoricalFiction,
        Genre::AdventureFiction,
        Genre::YoungAdult,
        Genre::ChildrensLiterature,
        Genre::Fiction,
        Genre::Historical,
        Genre::LiteraryFiction,
        Genre::Comedy,
        Genre::DystopianFiction,
        Genre::GothicFiction,
        Genre::MagicRealism,
        Genre::ShortStory,
        Genre::AutobiographyAndMemoir,
        Genre::ContemporaryFantasy,
        Genre::DarkFantasy,
        Genre::RomanticFantasy,
        Genre::GraphicNovel,
    ];

    /// Human-readable label, also used as the persisted value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::Mystery => "Mystery",
            Self::RomanceNovel => "Romance novel",
            Self::ScienceFiction => "Science fiction",
            Self::Thriller => "Thriller",
            Self::HistoricalFiction => "Historical Fiction",
            Self::AdventureFiction => "Adventure fiction",
            Self::YoungAdult => "Young adult",
            Self::ChildrensLiterature => "Children's literature",
            Self::Fiction => "Fiction",
            Self::Historical => "Historical",
            Self::LiteraryFiction => "Literary fiction",
            Self::Comedy => "Comedy",
            Self::DystopianFiction => "Dystopian Fiction",
            Self::GothicFiction => "Gothic fiction",
            Self::MagicRealism => "Magic realism",
            Self::ShortStory => "Short story",
            Self::AutobiographyAndMemoir => "Autobiography and memoir",
            Self::ContemporaryFantasy => "Contemporary fantasy",
            Self::DarkFantasy => "Dark fantasy",
            Self::RomanticFantasy => "Romantic fantasy",
            Self::GraphicNovel => "Graphic novel",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when text does not name a recognized genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGenre(pub String);

impl Display for UnknownGenre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown genre `{}`", self.0)
    }
}

impl std::error::Error for UnknownGenre {}

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|genre| genre.label() == value)
            .ok_or_else(|| UnknownGenre(value.to_string()))
    }
}
