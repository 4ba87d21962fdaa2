// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod stats;
pub mod user;
pub mod workout;

pub use stats::WorkoutSummary;
pub use user::{Profile, ProfileUpdate, User};
pub use workout::{Exercise, Workout};
