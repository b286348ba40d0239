use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{
    BodyChange, BowelMovement, CognitiveAssessment, CycleEntry, EntryWithRelations, Medication,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCycleEntry {
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub mood: Option<String>,
    pub energy: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateLookupQuery {
    pub user_id: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/cycle-entries", get(get_entries).post(create_entry))
        .route("/cycle-entries/date/:date", get(get_entry_by_date))
        .with_state(pool)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Invalid date format"))
}

async fn create_entry(
    State(pool): State<PgPool>,
    Json(body): Json<NewCycleEntry>,
) -> Result<(StatusCode, Json<CycleEntry>), ApiError> {
    let (Some(user_id), Some(date), Some(end_date)) = (body.user_id, body.date, body.end_date)
    else {
        return Err(ApiError::validation("Missing required fields"));
    };

    let date = parse_date(&date)?;
    let end_date = parse_date(&end_date)?;

    if let Some(energy) = body.energy {
        if !(1..=5).contains(&energy) {
            return Err(ApiError::validation("energy must be between 1 and 5"));
        }
    }

    let entry = sqlx::query_as::<_, CycleEntry>(
        "INSERT INTO cycle_entries (user_id, date, end_date, mood, energy, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(&user_id)
    .bind(date)
    .bind(end_date)
    .bind(&body.mood)
    .bind(body.energy)
    .bind(&body.notes)
    .fetch_one(&pool)
    .await?;

    tracing::info!("🩸 Created cycle entry {} for user {}", entry.id, user_id);

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entries(
    State(pool): State<PgPool>,
    Query(params): Query<EntriesQuery>,
) -> Result<Json<Vec<CycleEntry>>, ApiError> {
    let Some(user_id) = params.user_id else {
        return Err(ApiError::validation("User ID is required"));
    };
    let limit = params.limit.unwrap_or(5);

    let entries = sqlx::query_as::<_, CycleEntry>(
        "SELECT * FROM cycle_entries WHERE user_id = $1 ORDER BY date DESC LIMIT $2",
    )
    .bind(&user_id)
    .bind(limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(entries))
}

// Finds the one entry whose [date, end_date] range covers the target day,
// with every child relation loaded. A miss is an empty object, not a 404.
async fn get_entry_by_date(
    State(pool): State<PgPool>,
    Path(date): Path<String>,
    Query(params): Query<DateLookupQuery>,
) -> Result<Response, ApiError> {
    let Some(user_id) = params.user_id else {
        return Err(ApiError::validation("Missing required parameters"));
    };
    let target = parse_date(&date)?;

    let Some(entry) = sqlx::query_as::<_, CycleEntry>(
        "SELECT * FROM cycle_entries
         WHERE user_id = $1 AND date <= $2 AND end_date >= $2
         LIMIT 1",
    )
    .bind(&user_id)
    .bind(target)
    .fetch_optional(&pool)
    .await?
    else {
        return Ok(Json(serde_json::json!({})).into_response());
    };

    let body_changes = sqlx::query_as::<_, BodyChange>(
        "SELECT * FROM body_changes WHERE cycle_entry_id = $1",
    )
    .bind(entry.id)
    .fetch_all(&pool)
    .await?;

    let bowel_movements = sqlx::query_as::<_, BowelMovement>(
        "SELECT * FROM bowel_movements WHERE cycle_entry_id = $1",
    )
    .bind(entry.id)
    .fetch_all(&pool)
    .await?;

    let cognitive_assessments = sqlx::query_as::<_, CognitiveAssessment>(
        "SELECT * FROM cognitive_assessments WHERE cycle_entry_id = $1",
    )
    .bind(entry.id)
    .fetch_all(&pool)
    .await?;

    let medications = sqlx::query_as::<_, Medication>(
        "SELECT * FROM medications WHERE cycle_entry_id = $1",
    )
    .bind(entry.id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(EntryWithRelations {
        entry,
        body_changes,
        bowel_movements,
        cognitive_assessments,
        medications,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{body_json, test_pool};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn parse_date_accepts_iso_days() {
        assert!(parse_date("2024-01-01").is_ok());
        assert!(parse_date("01/01/2024").is_err());
        assert!(parse_date("2024-13-40").is_err());
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cycle-entries")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"date":"2024-01-01","endDate":"2024-01-07"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn create_rejects_bad_dates() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cycle-entries")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"userId":"u1","date":"yesterday","endDate":"2024-01-07"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Invalid date format");
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_energy() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cycle-entries")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"userId":"u1","date":"2024-01-01","endDate":"2024-01-07","energy":9}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_requires_user_id() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/cycle-entries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "User ID is required");
    }

    #[tokio::test]
    async fn date_lookup_rejects_bad_date() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/cycle-entries/date/not-a-date?userId=u1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn date_lookup_requires_user_id() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/cycle-entries/date/2024-01-03")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
