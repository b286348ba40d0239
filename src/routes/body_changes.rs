use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::BodyChange;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBodyChange {
    pub cycle_entry_id: Option<String>,
    pub skin_condition: Option<String>,
    pub hair_condition: Option<String>,
    pub gut_health: Option<String>,
    pub diet_cravings: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    pub cycle_entry_id: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/body-changes", get(get_body_changes).post(log_body_change))
        .with_state(pool)
}

pub(crate) fn parse_entry_id(raw: Option<String>) -> Result<Uuid, ApiError> {
    let Some(raw) = raw else {
        return Err(ApiError::validation("Cycle entry ID is required"));
    };
    Uuid::parse_str(&raw).map_err(|_| ApiError::validation("Invalid cycle entry ID"))
}

async fn log_body_change(
    State(pool): State<PgPool>,
    Json(body): Json<NewBodyChange>,
) -> Result<(StatusCode, Json<BodyChange>), ApiError> {
    let cycle_entry_id = parse_entry_id(body.cycle_entry_id)?;

    let row = sqlx::query_as::<_, BodyChange>(
        "INSERT INTO body_changes (cycle_entry_id, skin_condition, hair_condition, gut_health, diet_cravings)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(cycle_entry_id)
    .bind(&body.skin_condition)
    .bind(&body.hair_condition)
    .bind(&body.gut_health)
    .bind(&body.diet_cravings)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_body_changes(
    State(pool): State<PgPool>,
    Query(params): Query<EntryQuery>,
) -> Result<Json<Vec<BodyChange>>, ApiError> {
    let cycle_entry_id = parse_entry_id(params.cycle_entry_id)?;

    let rows = sqlx::query_as::<_, BodyChange>(
        "SELECT * FROM body_changes WHERE cycle_entry_id = $1",
    )
    .bind(cycle_entry_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}
