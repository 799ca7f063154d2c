use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::models::user::EduLevel;

/// Represents a course in the `courses` table.
///
/// A course is owned by exactly one teacher; students join through the
/// `course_students` membership table and content (videos, assignments,
/// quizzes) hangs off the course id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning teacher; cleared if the account is deleted.
    pub teacher_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub edu_level: Option<EduLevel>,
    pub edu_grade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
