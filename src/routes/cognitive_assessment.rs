use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::CognitiveAssessment;
use crate::routes::body_changes::parse_entry_id;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCognitiveAssessment {
    pub cycle_entry_id: Option<String>,
    pub focus: Option<String>,
    pub memory: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryQuery {
    pub cycle_entry_id: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/cognitive-assessment",
            get(get_assessments).post(log_assessment),
        )
        .with_state(pool)
}

async fn log_assessment(
    State(pool): State<PgPool>,
    Json(body): Json<NewCognitiveAssessment>,
) -> Result<(StatusCode, Json<CognitiveAssessment>), ApiError> {
    let cycle_entry_id = parse_entry_id(body.cycle_entry_id)?;

    let row = sqlx::query_as::<_, CognitiveAssessment>(
        "INSERT INTO cognitive_assessments (cycle_entry_id, focus, memory)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(cycle_entry_id)
    .bind(&body.focus)
    .bind(&body.memory)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_assessments(
    State(pool): State<PgPool>,
    Query(params): Query<EntryQuery>,
) -> Result<Json<Vec<CognitiveAssessment>>, ApiError> {
    let cycle_entry_id = parse_entry_id(params.cycle_entry_id)?;

    let rows = sqlx::query_as::<_, CognitiveAssessment>(
        "SELECT * FROM cognitive_assessments WHERE cycle_entry_id = $1",
    )
    .bind(cycle_entry_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{body_json, test_pool};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn post_requires_cycle_entry_id() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cognitive-assessment")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"focus":"sharp","memory":"foggy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Cycle entry ID is required");
    }

    #[tokio::test]
    async fn get_requires_cycle_entry_id() {
        let app = routes(test_pool());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/cognitive-assessment")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
