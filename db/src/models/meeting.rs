use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What kind of meeting is being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "meeting_kind_enum")]
pub enum MeetingKind {
    #[sea_orm(string_value = "parent-teacher")]
    #[serde(rename = "parent-teacher")]
    ParentTeacher,
    #[sea_orm(string_value = "admin")]
    #[serde(rename = "admin")]
    Admin,
}

impl Default for MeetingKind {
    fn default() -> Self {
        Self::ParentTeacher
    }
}

/// Represents a meeting in the `meetings` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Organizing user; cleared if the account is deleted.
    pub organizer_id: Option<i64>,
    pub scheduled_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub kind: MeetingKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id"
    )]
    Organizer,

    #[sea_orm(has_many = "super::meeting_participant::Entity")]
    Participants,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::meeting_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
