use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::User;

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/users", get(get_user_by_email))
        .with_state(pool)
}

async fn get_user_by_email(
    State(pool): State<PgPool>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<User>, ApiError> {
    let Some(email) = params.email else {
        return Err(ApiError::validation("Email is required"));
    };

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 LIMIT 1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;

    match user {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::not_found("User not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::{body_json, test_pool};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn lookup_requires_email() {
        let app = routes(test_pool());
        let res = app
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_json(res).await;
        assert_eq!(body["error"], "Email is required");
    }
}
