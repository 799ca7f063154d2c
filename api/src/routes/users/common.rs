use chrono::{DateTime, Utc};
use db::models::{
    course::{self, Column as CourseColumn, Entity as CourseEntity},
    course_student,
    parent_child,
    user::{self, Role},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::routes::common::{EducationalStage, UserSummary};

/// Thin course representation embedded in profile responses.
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl From<course::Model> for CourseSummary {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
        }
    }
}

/// A user profile with its course and family references expanded.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub educational_stage: Option<EducationalStage>,
    pub activity_streak: i32,
    pub last_active: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub courses_enrolled: Vec<CourseSummary>,
    pub teaching_courses: Vec<CourseSummary>,
    pub children: Vec<UserSummary>,
}

/// Expands a user row into a full profile, fanning the three reference
/// lookups out concurrently.
pub async fn build_profile(
    db: &DatabaseConnection,
    user: user::Model,
) -> Result<ProfileResponse, DbErr> {
    let (enrolled_ids, teaching, child_ids) = tokio::try_join!(
        course_student::Model::course_ids_for(db, user.id),
        CourseEntity::find()
            .filter(CourseColumn::TeacherId.eq(user.id))
            .all(db),
        parent_child::Model::child_ids_for(db, user.id),
    )?;

    let (enrolled, children) = tokio::try_join!(
        CourseEntity::find()
            .filter(CourseColumn::Id.is_in(enrolled_ids))
            .all(db),
        user::Entity::find()
            .filter(user::Column::Id.is_in(child_ids))
            .all(db),
    )?;

    Ok(ProfileResponse {
        id: user.id,
        email: user.email,
        role: user.role,
        name: user.name,
        profile_picture_url: user.profile_picture_path,
        educational_stage: EducationalStage::of(user.edu_level, user.edu_grade),
        activity_streak: user.activity_streak,
        last_active: user.last_active,
        created_at: user.created_at,
        updated_at: user.updated_at,
        courses_enrolled: enrolled.into_iter().map(Into::into).collect(),
        teaching_courses: teaching.into_iter().map(Into::into).collect(),
        children: children.into_iter().map(Into::into).collect(),
    })
}
