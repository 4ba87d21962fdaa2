// SPDX-License-Identifier: MIT

//! API routes for authenticated users.
//!
//! Every handler resolves the caller from the request extension placed
//! by the auth middleware, and checks ownership before touching the
//! store. Malformed ids are rejected up front as 400.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Exercise, Profile, ProfileUpdate, User, Workout, WorkoutSummary};
use crate::AppState;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(get_me))
        .route("/users/{user_id}/profile", patch(update_profile))
        .route("/users/{user_id}/workouts", post(create_workout))
        .route("/users/{user_id}/workouts", get(list_workouts))
        .route("/workouts/{workout_id}", get(get_workout))
        .route("/workouts/{workout_id}", delete(delete_workout))
        .route("/workouts/{workout_id}/exercises", patch(add_exercise))
        .route(
            "/workouts/{workout_id}/exercises/remove",
            patch(remove_exercises),
        )
        .route("/analytics/summary/{user_id}", get(summary))
}

fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} id: {}", what, raw)))
}

// ─── User Profile ────────────────────────────────────────────

/// User as returned by the API: everything stored except the password
/// hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub profile: Profile,
}

fn user_response(user: User) -> Result<UserResponse> {
    let id = user
        .id
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("stored user missing _id")))?;
    Ok(UserResponse {
        id: id.to_hex(),
        username: user.username,
        email: user.email,
        profile: user.profile,
    })
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user_id = parse_object_id(&user.user_id, "user")?;

    // A token whose subject no longer resolves is as good as no token.
    let profile = state
        .db
        .find_user_by_id(user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    Ok(Json(user_response(profile)?))
}

/// Partially update the caller's embedded profile. Only fields present
/// in the body are touched.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserResponse>> {
    user.require_owner(&user_id)?;
    let user_id = parse_object_id(&user_id, "user")?;

    let updated = state
        .db
        .update_profile(user_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id.to_hex())))?;

    Ok(Json(user_response(updated)?))
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: String,
    /// Defaults to now when omitted
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<Exercise>,
}

#[derive(Serialize)]
pub struct CreateWorkoutResponse {
    pub workout_id: String,
}

#[derive(Serialize)]
pub struct WorkoutResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub date: String,
    pub exercises: Vec<Exercise>,
}

fn workout_response(workout: Workout) -> Result<WorkoutResponse> {
    let id = workout
        .id
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("stored workout missing _id")))?;
    Ok(WorkoutResponse {
        id: id.to_hex(),
        user_id: workout.user_id,
        title: workout.title,
        date: workout.date,
        exercises: workout.exercises,
    })
}

/// Log a new workout. The exercise list may be empty.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<CreateWorkoutResponse>)> {
    user.require_owner(&user_id)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let workout = Workout {
        id: None,
        user_id,
        title: request.title,
        date: Workout::format_date(request.date.unwrap_or_else(Utc::now)),
        exercises: request.exercises,
    };

    let workout_id = state.db.create_workout(&workout).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkoutResponse {
            workout_id: workout_id.to_hex(),
        }),
    ))
}

/// List the caller's workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    user.require_owner(&user_id)?;

    let workouts = state.db.workouts_for_user(&user_id).await?;

    workouts
        .into_iter()
        .map(workout_response)
        .collect::<Result<Vec<_>>>()
        .map(Json)
}

/// Get one workout; only its owner may see it.
async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<WorkoutResponse>> {
    let workout_id = parse_object_id(&workout_id, "workout")?;

    let workout = state
        .db
        .get_workout(workout_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", workout_id.to_hex())))?;

    user.require_owner(&workout.user_id)?;

    Ok(Json(workout_response(workout)?))
}

/// Delete one of the caller's workouts.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<StatusCode> {
    let workout_id = parse_object_id(&workout_id, "workout")?;

    state.db.delete_workout(workout_id, &user.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ─── Embedded Exercises ──────────────────────────────────────

/// Append an exercise to the end of a workout's list.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    Json(exercise): Json<Exercise>,
) -> Result<Json<WorkoutResponse>> {
    let workout_id = parse_object_id(&workout_id, "workout")?;
    exercise
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state
        .db
        .push_exercise(workout_id, &user.user_id, &exercise)
        .await?;

    Ok(Json(workout_response(updated)?))
}

#[derive(Deserialize)]
struct RemoveExercisesParams {
    exercise_name: String,
}

/// Remove every exercise with the given name from a workout. Removing
/// a name that is not present succeeds and returns the workout
/// unchanged.
async fn remove_exercises(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    Query(params): Query<RemoveExercisesParams>,
) -> Result<Json<WorkoutResponse>> {
    let workout_id = parse_object_id(&workout_id, "workout")?;

    let updated = state
        .db
        .pull_exercises_by_name(workout_id, &user.user_id, &params.exercise_name)
        .await?;

    Ok(Json(workout_response(updated)?))
}

// ─── Analytics ───────────────────────────────────────────────

/// Progress summary for the caller's workouts.
async fn summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<WorkoutSummary>> {
    user.require_owner(&user_id)?;

    let summary = state.db.summarize_user(&user_id).await?;

    Ok(Json(summary))
}
