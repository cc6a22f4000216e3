use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a board item
///
/// Serializes as the bare UUID string, matching the storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a fresh random ItemId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for ItemId {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| crate::error::BoardError::InvalidItemId(s.to_string()))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three fixed board lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lane {
    Todo,
    InProgress,
    Completed,
}

impl Lane {
    /// All lanes in board display order
    pub const ALL: [Lane; 3] = [Lane::Todo, Lane::InProgress, Lane::Completed];

    /// The stable string form used on the wire and as droppable ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// The column heading shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Done",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Lane {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(crate::error::BoardError::InvalidLane(s.to_string())),
        }
    }
}

/// A single board item
///
/// The wire shape is camelCase with the lane stored under a `status` key and
/// timestamps as integer Unix milliseconds, so stored data written by earlier
/// versions of the board keeps loading unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "status")]
    pub lane: Lane,
}

impl Item {
    /// Creates a new item in the To Do lane
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            lane: Lane::Todo,
        }
    }

    /// The unnamed item a fresh board starts with
    pub fn seed() -> Self {
        Self::new("")
    }

    /// Replaces the name and refreshes `updated_at`
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Moves the item to another lane and refreshes `updated_at`
    ///
    /// Position within the global sequence is not touched here; positional
    /// lane changes go through [`crate::ItemStore::move_item`].
    pub fn set_lane(&mut self, lane: Lane) {
        self.lane = lane;
        self.updated_at = Utc::now();
    }

    /// True while the item still carries an empty name
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}
