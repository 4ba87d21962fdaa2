// SPDX-License-Identifier: MIT

//! Liftlog: log workouts, track progress.
//!
//! This crate provides the backend API for registering users, logging
//! workouts composed of exercises, and computing per-user progress
//! summaries from the workout collection.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::MongoDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MongoDb,
}
