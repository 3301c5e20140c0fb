use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use habitus::{stats, DayKey, Habit, HabitId, HabitPatch, NewHabit};
use serde::Deserialize;
use tracing::instrument;

use crate::{app_state::AppState, routes::ApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_habits).post(create_habit))
        .route("/:id", put(update_habit).delete(delete_habit))
        .route("/:id/toggle", post(toggle_completion))
        .route("/:id/stats", get(habit_stats))
}

#[instrument(name = "GET /habits", skip(app_state))]
async fn list_habits(State(app_state): State<AppState>) -> Json<Vec<Habit>> {
    let habits = app_state.read(|store| store.list().to_vec()).await;
    Json(habits)
}

#[instrument(name = "POST /habits", skip(app_state, body), fields(name = %body.name))]
async fn create_habit(
    State(app_state): State<AppState>,
    Json(body): Json<NewHabit>,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let habit = app_state.mutate(|store| store.create(body)).await?;
    tracing::info!("created habit {}", habit.id);
    Ok((StatusCode::CREATED, Json(habit)))
}

#[instrument(name = "PUT /habits/{id}", skip(app_state, patch))]
async fn update_habit(
    State(app_state): State<AppState>,
    Path(id): Path<HabitId>,
    Json(patch): Json<HabitPatch>,
) -> Result<Json<Habit>, ApiError> {
    let habit = app_state.mutate(|store| store.update(id, patch)).await?;
    Ok(Json(habit))
}

#[instrument(name = "DELETE /habits/{id}", skip(app_state))]
async fn delete_habit(
    State(app_state): State<AppState>,
    Path(id): Path<HabitId>,
) -> Result<StatusCode, ApiError> {
    app_state.mutate(|store| store.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleCompletionBody {
    /// Day to flip; omitted means today.
    date: Option<DayKey>,
}

#[instrument(name = "POST /habits/{id}/toggle", skip(app_state, body))]
async fn toggle_completion(
    State(app_state): State<AppState>,
    Path(id): Path<HabitId>,
    Json(body): Json<ToggleCompletionBody>,
) -> Result<Json<Habit>, ApiError> {
    let day = body.date.unwrap_or_else(DayKey::today);
    let habit = app_state
        .mutate(|store| store.toggle_completion(id, day))
        .await?;
    Ok(Json(habit))
}

#[instrument(name = "GET /habits/{id}/stats", skip(app_state))]
async fn habit_stats(
    State(app_state): State<AppState>,
    Path(id): Path<HabitId>,
) -> Result<Json<stats::HabitStats>, ApiError> {
    let today = DayKey::today();
    let summary = app_state
        .read(|store| store.get(id).map(|habit| stats::summarize(habit, today)))
        .await?;
    Ok(Json(summary))
}
