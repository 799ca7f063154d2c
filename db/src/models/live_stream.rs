use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Represents a live stream in the `live_streams` table.
///
/// A stream is live while `end_time` is unset; it ends exactly once, by its
/// conductor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "live_streams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    /// Conducting teacher; cleared if the account is deleted.
    pub conducted_by: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub recording_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ConductedBy",
        to = "super::user::Column::Id"
    )]
    Conductor,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conductor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn has_ended(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn is_conducted_by(&self, user_id: i64) -> bool {
        self.conducted_by == Some(user_id)
    }
}
