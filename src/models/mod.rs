use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::Display;

/// A traveler. Birth dates arrive as free-form upstream input and are kept
/// raw here; the demographic classifier parses them leniently.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub birth_date: Option<String>,
}

/// A stated interest of one user ("food", "nature", ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct InterestArea {
    pub interest_id: i64,
    pub user_id: i64,
    pub interest: String,
}

/// A trip owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Trip {
    pub trip_id: i64,
    pub user_id: i64,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A place from the external places taxonomy, identified by name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Place {
    pub place_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Associates a trip with a place
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MapPin {
    pub pin_id: i64,
    pub trip_id: i64,
    pub place_name: String,
}

/// A rated visit attached to a map pin
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VisitRecord {
    pub record_id: i64,
    pub pin_id: i64,
    pub rating: f64,
    pub visit_date: Option<NaiveDate>,
}

/// One row of a user's persisted ranked set
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Recommendation {
    pub recommendation_id: i64,
    pub user_id: i64,
    pub place_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub place_type: String,
    pub ranking: i64,
    pub season: String,
    pub age_group: String,
}

/// Coarse demographic bucket derived from birth year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    Teen,
    Adult,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Teen => "Teen",
            AgeGroup::Adult => "Adult",
        }
    }
}

impl Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Season bucket used for the seasonal popularity signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Maps a calendar month (1-12) to its season
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interest category a raw place type maps into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestCategory {
    Food,
    Activities,
    CultureArts,
    Healing,
    Nature,
    Shopping,
    Etc,
}

impl InterestCategory {
    /// The label stored in `interest_area.interest`
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestCategory::Food => "food",
            InterestCategory::Activities => "activities",
            InterestCategory::CultureArts => "culture_arts",
            InterestCategory::Healing => "healing",
            InterestCategory::Nature => "nature",
            InterestCategory::Shopping => "shopping",
            InterestCategory::Etc => "etc",
        }
    }
}

impl Display for InterestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
