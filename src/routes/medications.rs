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
use crate::models::Medication;
use crate::routes::body_changes::parse_entry_id;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub cycle_entry_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    pub cycle_entry_id: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/medications",
            get(get_medications)
                .post(log_medication)
                .delete(delete_medication),
        )
        .with_state(pool)
}

async fn log_medication(
    State(pool): State<PgPool>,
    Json(body): Json<NewMedication>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let Some(name) = body.name.filter(|n| !n.is_empty()) else {
        return Err(ApiError::validation(
            "Cycle entry ID and medication name are required",
        ));
    };
    let cycle_entry_id = parse_entry_id(body.cycle_entry_id)?;

    let row = sqlx::query_as::<_, Medication>(
        "INSERT INTO medications (cycle_entry_id, name)
         VALUES ($1, $2)
         RETURNING *",
    )
    .bind(cycle_entry_id)
    .bind(&name)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_medications(
    State(pool): State<PgPool>,
    Query(params): Query<EntryQuery>,
) -> Result<Json<Vec<Medication>>, ApiError> {
    let cycle_entry_id = parse_entry_id(params.cycle_entry_id)?;

    let rows = sqlx::query_as::<_, Medication>(
        "SELECT * FROM medications WHERE cycle_entry_id = $1",
    )
    .bind(cycle_entry_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}

async fn delete_medication(
    State(pool): State<PgPool>,
    Query(params): Query<DeleteQuery>,
) -> Result<Json<Medication>, ApiError> {
    let Some(raw) = params.id else {
        return Err(ApiError::validation("Medication ID is required"));
    };
    let id = Uuid::parse_str(&raw)
        .map_err(|_| ApiError::validation("Invalid medication ID"))?;

    let deleted = sqlx::query_as::<_, Medication>(
        "DELETE FROM medications WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?;

    match deleted {
        Some(row) => {
            tracing::info!("🗑️ Deleted medication {}", row.id);
            Ok(Json(row))
        }
        None => Err(ApiError::not_found("Medication not found")),
    }
}
