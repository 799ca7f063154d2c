use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Where a course video comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "video_kind_enum")]
pub enum VideoKind {
    #[sea_orm(string_value = "lecture")]
    #[serde(rename = "lecture")]
    Lecture,
    #[sea_orm(string_value = "youtube")]
    #[serde(rename = "youtube")]
    Youtube,
    #[sea_orm(string_value = "live-stream")]
    #[serde(rename = "live-stream")]
    LiveStream,
}

impl Default for VideoKind {
    fn default() -> Self {
        Self::Lecture
    }
}

/// Represents a video in the `videos` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    /// Uploading user; cleared if the account is deleted.
    pub uploaded_by: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub kind: VideoKind,
    pub url: String,
    pub language: Option<String>,
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
        from = "Column::UploadedBy",
        to = "super::user::Column::Id"
    )]
    Uploader,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
