use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use std::collections::HashMap;
use util::state::AppState;

use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity},
    user::{Column as UserColumn, Entity as UserEntity, Role},
    video::{Column as VideoColumn, Entity as VideoEntity},
};

use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{PageQuery, UserSummary, paginate, resolve_page};
use crate::routes::courses::common::{CourseListItem, CourseResponse, parse_level};
use crate::routes::users::common::build_profile;
use crate::routes::videos::common::expand_videos;

fn parse_role(raw: &str) -> Option<Role> {
    match raw {
        "student" => Some(Role::Student),
        "teacher" => Some(Role::Teacher),
        "parent" => Some(Role::Parent),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub role: Option<String>,
    pub educational_stage: Option<String>,
}

/// GET /api/admin/users
///
/// Paginated user directory, filterable by role and educational stage level,
/// with each user's course references expanded.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = resolve_page(params.page, params.limit);

    let mut query = UserEntity::find().order_by_asc(UserColumn::Id);

    if let Some(ref raw) = params.role {
        let role = parse_role(raw).ok_or_else(|| ApiError::bad_request("Invalid role"))?;
        query = query.filter(UserColumn::Role.eq(role));
    }
    if let Some(ref raw) = params.educational_stage {
        let level = parse_level(raw)
            .ok_or_else(|| ApiError::bad_request("Invalid educational stage level"))?;
        query = query.filter(UserColumn::EduLevel.eq(level));
    }

    let (users, total) = paginate(db, query, page, limit).await?;

    let mut items = Vec::with_capacity(users.len());
    for user in users {
        items.push(build_profile(db, user).await?);
    }

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Users retrieved successfully",
    )))
}

/// GET /api/admin/courses
///
/// Paginated catalogue of every course with teacher summaries.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = params.resolve();

    let query = CourseEntity::find().order_by_desc(CourseColumn::CreatedAt);
    let (courses, total) = paginate(db, query, page, limit).await?;

    let teacher_ids: Vec<i64> = courses.iter().filter_map(|c| c.teacher_id).collect();
    let teachers: HashMap<i64, UserSummary> = UserEntity::find()
        .filter(UserColumn::Id.is_in(teacher_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.into()))
        .collect();

    let mut items = Vec::with_capacity(courses.len());
    for course in courses {
        let teacher = course.teacher_id.and_then(|id| teachers.get(&id)).cloned();
        items.push(CourseListItem {
            course: CourseResponse::load(db, course).await?,
            teacher,
        });
    }

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Courses retrieved successfully",
    )))
}

/// GET /api/admin/videos
///
/// Paginated catalogue of every video with uploader and course title.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = params.resolve();

    let query = VideoEntity::find().order_by_desc(VideoColumn::CreatedAt);
    let (videos, total) = paginate(db, query, page, limit).await?;
    let items = expand_videos(db, videos).await?;

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Videos retrieved successfully",
    )))
}
