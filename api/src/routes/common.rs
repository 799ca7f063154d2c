//! Request/response helpers shared by every route group.

use common::format_validation_errors;
use db::models::user::{self, EduLevel, Role};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::response::ApiError;

/// Runs `validator` checks, flattening failures into one `BadRequest`.
pub fn validate_request(req: &impl Validate) -> Result<(), ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(format_validation_errors(&e)))
}

/// Clamps raw pagination parameters to page >= 1 and 1 <= limit <= 100,
/// defaulting to page 1 of 10.
pub fn resolve_page(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    (page.unwrap_or(1).max(1), limit.unwrap_or(10).clamp(1, 100))
}

/// Offset pagination query parameters: `?page=2&limit=20`.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn resolve(&self) -> (u64, u64) {
        resolve_page(self.page, self.limit)
    }
}

/// Fetches one page and the total count concurrently.
pub async fn paginate<E>(
    db: &DatabaseConnection,
    query: Select<E>,
    page: u64,
    limit: u64,
) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: sea_orm::FromQueryResult + Send + Sync,
{
    let offset = (page - 1) * limit;
    let (items, total) = tokio::try_join!(
        query.clone().offset(offset).limit(limit).all(db),
        query.count(db)
    )?;
    Ok((items, total))
}

/// Thin user representation embedded in other resources' responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// The (level, grade) pair classifying a user or course by schooling tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationalStage {
    pub level: Option<EduLevel>,
    pub grade: Option<String>,
}

impl EducationalStage {
    pub fn of(level: Option<EduLevel>, grade: Option<String>) -> Option<Self> {
        if level.is_none() && grade.is_none() {
            None
        } else {
            Some(Self { level, grade })
        }
    }
}
