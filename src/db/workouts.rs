// SPDX-License-Identifier: MIT

//! Workout repository operations.
//!
//! Every mutating operation matches on `{_id, user_id}` in one store
//! call, so ownership is checked and acted on atomically: another
//! caller's workout can never be mutated, even under concurrent
//! requests. Exercises are edited in place with push/pull updates,
//! never by replacing the document (which would reintroduce a
//! lost-update race between concurrent appends).

use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson, Document};
use mongodb::options::ReturnDocument;

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::{Exercise, Workout};

impl MongoDb {
    /// Insert a new workout and return the assigned id. The exercise
    /// list may be empty at creation.
    pub async fn create_workout(&self, workout: &Workout) -> Result<ObjectId, AppError> {
        let result = self.workouts()?.insert_one(workout).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("insert_one returned a non-ObjectId id"))
        })?;

        tracing::info!(
            workout_id = %id.to_hex(),
            user_id = %workout.user_id,
            "Workout created"
        );
        Ok(id)
    }

    /// All workouts for a user, newest date first.
    ///
    /// The filter and sort together are served by the compound
    /// `(user_id, date desc)` index. Unbounded result size is an
    /// accepted limitation.
    pub async fn workouts_for_user(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        let cursor = self
            .workouts()?
            .find(doc! { "user_id": user_id })
            .sort(doc! { "date": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Get a workout by id, regardless of owner. The caller decides
    /// whether the requesting user may see it.
    pub async fn get_workout(&self, workout_id: ObjectId) -> Result<Option<Workout>, AppError> {
        Ok(self.workouts()?.find_one(doc! { "_id": workout_id }).await?)
    }

    /// Delete a workout owned by `user_id`.
    pub async fn delete_workout(
        &self,
        workout_id: ObjectId,
        user_id: &str,
    ) -> Result<(), AppError> {
        let result = self
            .workouts()?
            .delete_one(owned_filter(workout_id, user_id))
            .await?;

        if result.deleted_count == 0 {
            return Err(self.workout_denied(workout_id).await);
        }

        tracing::info!(workout_id = %workout_id.to_hex(), user_id, "Workout deleted");
        Ok(())
    }

    /// Atomically append one exercise to the end of the embedded list
    /// and return the updated workout. Existing exercises and their
    /// order are untouched; names need not be unique.
    pub async fn push_exercise(
        &self,
        workout_id: ObjectId,
        user_id: &str,
        exercise: &Exercise,
    ) -> Result<Workout, AppError> {
        let exercise = to_bson(exercise)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("exercise encoding failed: {}", e)))?;

        let updated = self
            .workouts()?
            .find_one_and_update(
                owned_filter(workout_id, user_id),
                doc! { "$push": { "exercises": exercise } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(workout) => Ok(workout),
            None => Err(self.workout_denied(workout_id).await),
        }
    }

    /// Atomically remove every embedded exercise whose name exactly
    /// matches, returning the updated workout. Removing zero matches
    /// is a no-op success, not an error.
    pub async fn pull_exercises_by_name(
        &self,
        workout_id: ObjectId,
        user_id: &str,
        exercise_name: &str,
    ) -> Result<Workout, AppError> {
        let updated = self
            .workouts()?
            .find_one_and_update(
                owned_filter(workout_id, user_id),
                doc! { "$pull": { "exercises": { "name": exercise_name } } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(workout) => Ok(workout),
            None => Err(self.workout_denied(workout_id).await),
        }
    }

    /// A match on `{_id, user_id}` found nothing: report whether the
    /// workout is missing or belongs to someone else. This read is
    /// only for the error message; the mutation itself already refused
    /// to touch a non-owned document.
    async fn workout_denied(&self, workout_id: ObjectId) -> AppError {
        match self.get_workout(workout_id).await {
            Ok(Some(_)) => AppError::Forbidden("Workout belongs to another user".to_string()),
            Ok(None) => AppError::NotFound(format!("Workout {} not found", workout_id.to_hex())),
            Err(err) => err,
        }
    }
}

/// Filter combining id and owner, used as the match condition of every
/// mutating workout operation.
fn owned_filter(workout_id: ObjectId, user_id: &str) -> Document {
    doc! { "_id": workout_id, "user_id": user_id }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_filter_includes_owner() {
        let id = ObjectId::new();
        let filter = owned_filter(id, "6630f0d2a3b4c5d6e7f80910");

        assert_eq!(filter.get_object_id("_id").unwrap(), id);
        assert_eq!(
            filter.get_str("user_id").unwrap(),
            "6630f0d2a3b4c5d6e7f80910"
        );
    }
}
