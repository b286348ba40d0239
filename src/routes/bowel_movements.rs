use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::BowelMovement;
use crate::routes::body_changes::parse_entry_id;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBowelMovement {
    // Validated but not stored; the row belongs to the cycle entry.
    pub user_id: Option<String>,
    pub cycle_entry_id: Option<String>,
    pub frequency: Option<i32>,
    pub consistency: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    pub cycle_entry_id: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/bowel-movements",
            get(get_bowel_movements).post(log_bowel_movement),
        )
        .with_state(pool)
}

async fn log_bowel_movement(
    State(pool): State<PgPool>,
    Json(body): Json<NewBowelMovement>,
) -> Result<(StatusCode, Json<BowelMovement>), ApiError> {
    let (Some(_user_id), Some(frequency), Some(consistency)) =
        (body.user_id, body.frequency, body.consistency)
    else {
        return Err(ApiError::validation(
            "userId, cycleEntryId, frequency, and consistency are required",
        ));
    };
    let cycle_entry_id = parse_entry_id(body.cycle_entry_id)?;

    let row = sqlx::query_as::<_, BowelMovement>(
        "INSERT INTO bowel_movements (cycle_entry_id, frequency, consistency)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(cycle_entry_id)
    .bind(frequency)
    .bind(&consistency)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_bowel_movements(
    State(pool): State<PgPool>,
    Query(params): Query<EntryQuery>,
) -> Result<Json<Vec<BowelMovement>>, ApiError> {
    let cycle_entry_id = parse_entry_id(params.cycle_entry_id)?;

    let rows = sqlx::query_as::<_, BowelMovement>(
        "SELECT * FROM bowel_movements WHERE cycle_entry_id = $1",
    )
    .bind(cycle_entry_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}
