//! Workout model for storage and API.

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Workout document stored in the `workouts` collection.
///
/// Workouts reference their owner by id instead of being embedded in
/// the user document: they are numerous, grow over the user's
/// lifetime, and are listed/sorted independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Document id; `None` until the store assigns one on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user's id (hex string reference, not a join)
    pub user_id: String,
    /// Workout title
    pub title: String,
    /// Start date (RFC3339 with `Z` suffix, so the descending index
    /// sort is a plain lexicographic comparison)
    pub date: String,
    /// Embedded exercises, in insertion order
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// Normalize a timestamp for storage.
    ///
    /// All stored dates go through this so that string comparison and
    /// chronological order agree.
    pub fn format_date(date: DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Exercise embedded in a `Workout`. No identity of its own: appended
/// with a push update, removed by name with a pull update, never
/// addressed independently of its parent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Exercise {
    #[validate(length(min = 1, message = "exercise name must not be empty"))]
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Load (unit-less, by convention kg)
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: f64,
}
