use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    BodyChangeSummary, BowelMovementSummary, CognitiveSummary, CollectiveEntry, MedicationSummary,
};

const DASHBOARD_ENTRY_LIMIT: i64 = 10;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

/// One row of the parent-to-children left join. Child presence is carried by
/// the child row's id, so a matched child whose fields are all NULL still
/// surfaces as a nested object rather than null.
#[derive(Debug, sqlx::FromRow)]
pub struct CollectiveRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    pub mood: Option<String>,
    pub energy: Option<i32>,
    pub notes: Option<String>,
    pub body_change_id: Option<Uuid>,
    pub skin_condition: Option<String>,
    pub hair_condition: Option<String>,
    pub gut_health: Option<String>,
    pub diet_cravings: Option<String>,
    pub bowel_movement_id: Option<Uuid>,
    pub frequency: Option<i32>,
    pub consistency: Option<String>,
    pub cognitive_assessment_id: Option<Uuid>,
    pub focus: Option<String>,
    pub memory: Option<String>,
    pub medication_name: Option<String>,
}

pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/collective-entries", get(get_collective_entries))
        .with_state(pool)
}

async fn get_collective_entries(
    State(pool): State<PgPool>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<CollectiveEntry>>, ApiError> {
    let Some(user_id) = params.user_id else {
        return Err(ApiError::validation("User ID is required"));
    };

    // The limit is applied to distinct parents in the subquery, so a parent
    // with many medications cannot push later parents out of the window.
    let rows = sqlx::query_as::<_, CollectiveRow>(
        "SELECT ce.id, ce.date, ce.end_date, ce.mood, ce.energy, ce.notes,
                bc.id AS body_change_id, bc.skin_condition, bc.hair_condition,
                bc.gut_health, bc.diet_cravings,
                bm.id AS bowel_movement_id, bm.frequency, bm.consistency,
                ca.id AS cognitive_assessment_id, ca.focus, ca.memory,
                m.name AS medication_name
         FROM (
             SELECT * FROM cycle_entries
             WHERE user_id = $1
             ORDER BY date DESC
             LIMIT $2
         ) ce
         LEFT JOIN body_changes bc ON bc.cycle_entry_id = ce.id
         LEFT JOIN bowel_movements bm ON bm.cycle_entry_id = ce.id
         LEFT JOIN cognitive_assessments ca ON ca.cycle_entry_id = ce.id
         LEFT JOIN medications m ON m.cycle_entry_id = ce.id
         ORDER BY ce.date DESC, ce.id",
    )
    .bind(&user_id)
    .bind(DASHBOARD_ENTRY_LIMIT)
    .fetch_all(&pool)
    .await?;

    Ok(Json(group_entries(rows)))
}

// Walks joined rows in order, keyed by parent id. The first row for a parent
// fixes its scalars and zero-or-one children; every later row for the same
// parent only contributes its medication, which is how the one-to-many
// medication list is rebuilt from the flat join.
fn group_entries(rows: Vec<CollectiveRow>) -> Vec<CollectiveEntry> {
    let mut entries: Vec<CollectiveEntry> = Vec::new();
    let mut seen: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        if let Some(&i) = seen.get(&row.id) {
            if let Some(name) = row.medication_name {
                entries[i].medications.push(MedicationSummary { name });
            }
            continue;
        }

        let body_changes = row.body_change_id.map(|_| BodyChangeSummary {
            skin_condition: row.skin_condition,
            hair_condition: row.hair_condition,
            gut_health: row.gut_health,
            diet_cravings: row.diet_cravings,
        });
        let bowel_movements = row.bowel_movement_id.map(|_| BowelMovementSummary {
            frequency: row.frequency,
            consistency: row.consistency,
        });
        let cognitive_assessment = row.cognitive_assessment_id.map(|_| CognitiveSummary {
            focus: row.focus,
            memory: row.memory,
        });
        let medications = match row.medication_name {
            Some(name) => vec![MedicationSummary { name }],
            None => vec![],
        };

        seen.insert(row.id, entries.len());
        entries.push(CollectiveEntry {
            id: row.id,
            date: row.date,
            end_date: row.end_date,
            mood: row.mood,
            energy: row.energy,
            notes: row.notes,
            body_changes,
            bowel_movements,
            cognitive_assessment,
            medications,
        });
    }

    entries
}
