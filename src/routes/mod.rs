pub mod body_changes;
pub mod bowel_movements;
pub mod cognitive_assessment;
pub mod collective_entries;
pub mod cycle_entries;
pub mod medications;
pub mod users;

#[cfg(test)]
pub(crate) mod test_util {
    use axum::response::Response;
    use http_body_util::BodyExt;
    use sqlx::PgPool;

    /// Lazy pool that never opens a connection. Validation paths reject
    /// before the first query, so these tests run without a database.
    pub fn test_pool() -> PgPool {
        PgPool::connect_lazy("postgres://postgres@localhost/lunalog_test")
            .expect("lazy pool")
    }

    pub async fn body_json(res: Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
