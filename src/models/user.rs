//! User model for storage and API.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document stored in the `users` collection.
///
/// The password hash is part of the stored document but is never
/// exposed through the API; responses use `routes::api::UserResponse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document id; `None` until the store assigns one on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Unique username
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Argon2 password hash (opaque to this layer)
    pub password_hash: String,
    /// Embedded profile sub-document
    #[serde(default)]
    pub profile: Profile,
}

/// Profile embedded in `User`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub age: Option<u32>,
    /// Body weight (unit-less, by convention kg)
    pub weight: Option<f64>,
    pub height: Option<f64>,
    /// Free-text training goals
    pub goals: Option<String>,
}

/// Sparse profile update: only fields present in the request are
/// applied; omitted fields are left untouched in the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub goals: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.weight.is_none() && self.height.is_none() && self.goals.is_none()
    }
}
