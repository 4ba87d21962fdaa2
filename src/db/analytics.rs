// SPDX-License-Identifier: MIT

//! Per-user progress summary via a store-side aggregation pipeline.
//!
//! The pipeline groups twice, mirroring the data model: exercises
//! under their workout, then workouts under the user. A flat average
//! over all exercises would weight exercise-heavy workouts more than
//! small frequent ones.

use futures_util::TryStreamExt;
use mongodb::bson::{doc, from_document, Document};

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::WorkoutSummary;

impl MongoDb {
    /// Compute `{total_workouts, total_volume, avg_reps}` for one user.
    ///
    /// A user with zero workouts produces no pipeline output row; that
    /// maps to the default summary, whose `avg_reps` is `None` rather
    /// than zero.
    pub async fn summarize_user(&self, user_id: &str) -> Result<WorkoutSummary, AppError> {
        let mut cursor = self.workouts()?.aggregate(summary_pipeline(user_id)).await?;

        match cursor.try_next().await? {
            Some(row) => from_document(row).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("summary row decoding failed: {}", e))
            }),
            None => Ok(WorkoutSummary::default()),
        }
    }
}

/// The aggregation stages for one user's summary.
///
/// Stage by stage:
/// 1. `$match` the user's workouts.
/// 2. `$unwind` exercises with `preserveNullAndEmptyArrays`, so a
///    workout with no exercises still contributes one row (with the
///    exercise fields absent, not zero) and stays in the workout count.
/// 3. `$group` by workout: volume sums sets x reps x weight with
///    absent fields nulled to 0; `$avg` over an absent `reps` yields
///    null, which is exactly the "no data" marker the next stage needs.
/// 4. `$group` by user: count workouts, sum volumes, and average the
///    per-workout averages. `$avg` ignores null inputs, so empty
///    workouts never drag the final average down.
/// 5. `$project` the response shape, rounded to one decimal.
fn summary_pipeline(user_id: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "user_id": user_id } },
        doc! { "$unwind": {
            "path": "$exercises",
            "preserveNullAndEmptyArrays": true,
        } },
        doc! { "$group": {
            "_id": "$_id",
            "user_id": { "$first": "$user_id" },
            "workout_volume": { "$sum": { "$multiply": [
                { "$ifNull": ["$exercises.sets", 0] },
                { "$ifNull": ["$exercises.reps", 0] },
                { "$ifNull": ["$exercises.weight", 0] },
            ] } },
            "avg_reps_in_workout": { "$avg": "$exercises.reps" },
        } },
        doc! { "$group": {
            "_id": "$user_id",
            "total_workouts": { "$sum": 1 },
            "total_volume": { "$sum": "$workout_volume" },
            "avg_reps": { "$avg": "$avg_reps_in_workout" },
        } },
        doc! { "$project": {
            "_id": 0,
            "total_workouts": 1,
            "total_volume": { "$round": ["$total_volume", 1] },
            "avg_reps": { "$round": ["$avg_reps", 1] },
        } },
    ]
}
