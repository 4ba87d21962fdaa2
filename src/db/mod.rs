// SPDX-License-Identifier: MIT

//! Database layer (MongoDB).
//!
//! `MongoDb` owns the connection; the repository operations are split
//! into per-aggregate modules (`users`, `workouts`, `analytics`) as
//! additional `impl` blocks.

pub mod analytics;
pub mod mongo;
pub mod users;
pub mod workouts;

pub use mongo::MongoDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
}
