use chrono::{DateTime, Utc};
use db::models::{assignment, course, course_subject, quiz, user::EduLevel, video};
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::common::{EducationalStage, UserSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct CourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,
    pub educational_stage: Option<EducationalStage>,
    pub subjects: Option<Vec<String>>,
}

/// Partial course update; absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct CourseUpdateRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub educational_stage: Option<EducationalStage>,
    pub subjects: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub educational_stage: Option<EducationalStage>,
    pub subjects: Vec<String>,
    pub teacher_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourseResponse {
    pub fn from_parts(course: course::Model, subjects: Vec<String>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            educational_stage: EducationalStage::of(course.edu_level, course.edu_grade),
            subjects,
            teacher_id: course.teacher_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }

    pub async fn load(db: &DatabaseConnection, course: course::Model) -> Result<Self, DbErr> {
        let subjects = course_subject::Model::for_course(db, course.id).await?;
        Ok(Self::from_parts(course, subjects))
    }
}

/// Quiz representation embedded in course content; the question list (and its
/// correct answers) stays server-side.
#[derive(Debug, Serialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub max_marks: i32,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<quiz::Model> for QuizSummary {
    fn from(quiz: quiz::Model) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            max_marks: quiz.max_marks,
            question_count: quiz.questions.len(),
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseContent {
    pub videos: Vec<video::Model>,
    pub assignments: Vec<assignment::Model>,
    pub quizzes: Vec<QuizSummary>,
}

/// A course with its teacher, roster, and content expanded.
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub teacher: Option<UserSummary>,
    pub students: Vec<UserSummary>,
    pub content: CourseContent,
}

/// A course list entry with its teacher summary attached.
#[derive(Debug, Serialize)]
pub struct CourseListItem {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub teacher: Option<UserSummary>,
}

/// Validates the level half of an educational stage filter string.
pub fn parse_level(raw: &str) -> Option<EduLevel> {
    match raw {
        "kindergarten" => Some(EduLevel::Kindergarten),
        "primary" => Some(EduLevel::Primary),
        "secondary" => Some(EduLevel::Secondary),
        "undergrad" => Some(EduLevel::Undergrad),
        "postgrad" => Some(EduLevel::Postgrad),
        _ => None,
    }
}
