//! Per-user progress summary produced by the analytics pipeline.

use serde::{Deserialize, Serialize};

/// Aggregate statistics over all of one user's workouts.
///
/// `avg_reps` is `None` when the user has no workouts with exercises:
/// "no data" is a distinct result from "zero average", and coercing it
/// to 0 would bias any further averaging. It serializes as JSON null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Number of workouts, including workouts with no exercises
    pub total_workouts: u64,
    /// Sum over all workouts of sets x reps x weight
    pub total_volume: f64,
    /// Average of the per-workout average reps; workouts with no
    /// exercises do not participate
    pub avg_reps: Option<f64>,
}
