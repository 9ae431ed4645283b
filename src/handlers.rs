use crate::app::AppState;
use crate::errors::AppError;
use crate::models::{Mood, MoodBody, NameFilter, UsageStat};
use crate::storage::persist_data;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<Mood>> {
    let data = state.data.lock().await;
    Json(data.moods.clone())
}

pub async fn filter_moods(
    State(state): State<AppState>,
    Query(filter): Query<NameFilter>,
) -> Json<Vec<Mood>> {
    let data = state.data.lock().await;
    let matches = data
        .moods
        .iter()
        .filter(|mood| mood.body.name == filter.name)
        .cloned()
        .collect();
    Json(matches)
}

pub async fn get_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Mood>, AppError> {
    let data = state.data.lock().await;
    data.find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(&id))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<MoodBody>,
) -> Result<(StatusCode, Json<Mood>), AppError> {
    let body = checked_body(body)?;
    let mut data = state.data.lock().await;
    if data.name_taken(&body.name, None) {
        return Err(AppError::conflict(&body.name));
    }

    let mood = Mood {
        id: Uuid::new_v4().to_string(),
        body,
    };
    data.moods.push(mood.clone());
    persist_data(&state.data_path, &data).await?;

    info!(id = %mood.id, name = %mood.body.name, "mood created");
    Ok((StatusCode::CREATED, Json(mood)))
}

pub async fn update_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MoodBody>,
) -> Result<Json<Mood>, AppError> {
    let body = checked_body(body)?;
    let mut data = state.data.lock().await;
    if data.find(&id).is_none() {
        return Err(AppError::not_found(&id));
    }
    if data.name_taken(&body.name, Some(id.as_str())) {
        return Err(AppError::conflict(&body.name));
    }

    let updated = {
        let mood = data
            .moods
            .iter_mut()
            .find(|mood| mood.id == id)
            .ok_or_else(|| AppError::not_found(&id))?;
        mood.body = body;
        mood.clone()
    };
    if let Some(stat) = data.stats.get_mut(&id) {
        stat.mood_name = updated.body.name.clone();
    }
    persist_data(&state.data_path, &data).await?;

    info!(id = %id, "mood updated");
    Ok(Json(updated))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let before = data.moods.len();
    data.moods.retain(|mood| mood.id != id);
    if data.moods.len() == before {
        return Err(AppError::not_found(&id));
    }
    data.stats.remove(&id);
    persist_data(&state.data_path, &data).await?;

    info!(id = %id, "mood deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UsageStat>, AppError> {
    let mut data = state.data.lock().await;
    let stat = data
        .record_view(&id, Utc::now())
        .ok_or_else(|| AppError::not_found(&id))?;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(stat))
}

pub async fn list_stats(State(state): State<AppState>) -> Json<Vec<UsageStat>> {
    let data = state.data.lock().await;
    let mut stats: Vec<UsageStat> = data.stats.values().cloned().collect();
    stats.sort_by(|a, b| a.mood_name.cmp(&b.mood_name));
    Json(stats)
}

fn checked_body(mut body: MoodBody) -> Result<MoodBody, AppError> {
    body.name = body.name.trim().to_string();
    if body.name.is_empty() {
        return Err(AppError::bad_request("humor must not be empty"));
    }
    Ok(body)
}
