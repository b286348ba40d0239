use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// Parent record for one tracked period.
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CycleEntry {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    pub mood: Option<String>,
    pub energy: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BodyChange {
    pub id: Uuid,
    pub cycle_entry_id: Uuid,
    pub skin_condition: Option<String>,
    pub hair_condition: Option<String>,
    pub gut_health: Option<String>,
    pub diet_cravings: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BowelMovement {
    pub id: Uuid,
    pub cycle_entry_id: Uuid,
    pub frequency: Option<i32>,
    pub consistency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveAssessment {
    pub id: Uuid,
    pub cycle_entry_id: Uuid,
    pub focus: Option<String>,
    pub memory: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: Uuid,
    pub cycle_entry_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One dashboard-ready entry: parent scalars plus nested child records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectiveEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    pub mood: Option<String>,
    pub energy: Option<i32>,
    pub notes: Option<String>,
    pub body_changes: Option<BodyChangeSummary>,
    pub bowel_movements: Option<BowelMovementSummary>,
    pub cognitive_assessment: Option<CognitiveSummary>,
    pub medications: Vec<MedicationSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyChangeSummary {
    pub skin_condition: Option<String>,
    pub hair_condition: Option<String>,
    pub gut_health: Option<String>,
    pub diet_cravings: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BowelMovementSummary {
    pub frequency: Option<i32>,
    pub consistency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CognitiveSummary {
    pub focus: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MedicationSummary {
    pub name: String,
}

/// Date-range lookup payload: the entry with every child relation loaded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWithRelations {
    #[serde(flatten)]
    pub entry: CycleEntry,
    pub body_changes: Vec<BodyChange>,
    pub bowel_movements: Vec<BowelMovement>,
    pub cognitive_assessments: Vec<CognitiveAssessment>,
    pub medications: Vec<Medication>,
}
