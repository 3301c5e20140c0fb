use axum::{extract::State, routing::get, Json, Router};
use habitus::{stats, DayKey};
use serde::Serialize;
use tracing::instrument;

use crate::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(overview))
}

/// Aggregate numbers for the stats page header.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOverview {
    total_habits: usize,
    completed_today: usize,
    total_completions: usize,
}

#[instrument(name = "GET /stats", skip(app_state))]
async fn overview(State(app_state): State<AppState>) -> Json<StatsOverview> {
    let today = DayKey::today();
    let overview = app_state
        .read(|store| {
            let habits = store.list();
            StatsOverview {
                total_habits: habits.len(),
                completed_today: habits
                    .iter()
                    .filter(|habit| stats::completed_on(habit, today))
                    .count(),
                total_completions: habits.iter().map(stats::total_completions).sum(),
            }
        })
        .await;
    Json(overview)
}
