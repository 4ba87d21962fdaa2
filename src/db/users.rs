// SPDX-License-Identifier: MIT

//! User repository operations.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;

use crate::db::MongoDb;
use crate::error::AppError;
use crate::models::{ProfileUpdate, User};

impl MongoDb {
    /// Insert a new user and return the assigned id.
    ///
    /// Uniqueness of email and username is enforced by the unique
    /// indexes, not pre-checked here: a check-then-act lookup would
    /// race with concurrent registrations. A violation surfaces as
    /// `AppError::Duplicate`.
    pub async fn create_user(&self, user: &User) -> Result<ObjectId, AppError> {
        let result = self.users()?.insert_one(user).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("insert_one returned a non-ObjectId id"))
        })?;

        tracing::info!(user_id = %id.to_hex(), username = %user.username, "User created");
        Ok(id)
    }

    /// Look up a user by email (login flow). Password verification is
    /// the caller's job.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users()?.find_one(doc! { "email": email }).await?)
    }

    /// Look up a user by id.
    pub async fn find_user_by_id(&self, user_id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users()?.find_one(doc! { "_id": user_id }).await?)
    }

    /// Apply a sparse profile update and return the updated user.
    ///
    /// Only the fields present in `update` are written, as a single
    /// field-level `$set` against the embedded sub-document; omitted
    /// fields are untouched. Returns `None` when the id does not
    /// resolve.
    pub async fn update_profile(
        &self,
        user_id: ObjectId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        if update.is_empty() {
            // Nothing to set; an empty $set is rejected by the store.
            return self.find_user_by_id(user_id).await;
        }

        let updated = self
            .users()?
            .find_one_and_update(
                doc! { "_id": user_id },
                doc! { "$set": profile_set_document(update) },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::debug!(user_id = %user_id.to_hex(), "Profile updated");
        }
        Ok(updated)
    }
}

/// Build the dotted-path `$set` document for a sparse profile update.
fn profile_set_document(update: &ProfileUpdate) -> Document {
    let mut set = Document::new();
    if let Some(age) = update.age {
        set.insert("profile.age", age as i64);
    }
    if let Some(weight) = update.weight {
        set.insert("profile.weight", weight);
    }
    if let Some(height) = update.height {
        set.insert("profile.height", height);
    }
    if let Some(goals) = &update.goals {
        set.insert("profile.goals", goals.clone());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_document_only_contains_present_fields() {
        let update = ProfileUpdate {
            weight: Some(80.0),
            ..Default::default()
        };

        let set = profile_set_document(&update);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get_f64("profile.weight").unwrap(), 80.0);
        // age/height/goals omitted entirely, so the store leaves them alone
        assert!(!set.contains_key("profile.age"));
        assert!(!set.contains_key("profile.height"));
        assert!(!set.contains_key("profile.goals"));
    }

    #[test]
    fn test_set_document_uses_dotted_paths() {
        let update = ProfileUpdate {
            age: Some(30),
            weight: Some(80.0),
            height: Some(182.0),
            goals: Some("Deadlift 200kg".to_string()),
        };

        let set = profile_set_document(&update);

        // Dotted paths merge into the embedded document; a top-level
        // "profile" key would replace the whole sub-document instead.
        assert_eq!(set.len(), 4);
        for key in set.keys() {
            assert!(key.starts_with("profile."), "unexpected key {}", key);
        }
    }
}
