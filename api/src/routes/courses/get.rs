use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use std::collections::HashMap;
use util::state::AppState;

use db::models::{
    assignment::{Column as AssignmentColumn, Entity as AssignmentEntity},
    course::{Column as CourseColumn, Entity as CourseEntity},
    course_student::{Column as MembershipColumn, Entity as MembershipEntity},
    course_subject::{self, Column as SubjectColumn, Entity as SubjectEntity},
    quiz::{Column as QuizColumn, Entity as QuizEntity},
    user::{Column as UserColumn, Entity as UserEntity},
    video::{Column as VideoColumn, Entity as VideoEntity, VideoKind},
};

use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{UserSummary, paginate, resolve_page};
use crate::routes::courses::common::{
    CourseContent, CourseDetailResponse, CourseListItem, CourseResponse, parse_level,
};

#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Educational stage level filter, e.g. `secondary`.
    pub educational_stage: Option<String>,
    pub subject: Option<String>,
}

/// GET /api/courses
///
/// Paginated course catalogue, filterable by educational stage level and
/// subject tag. Each entry carries its teacher's summary.
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = resolve_page(params.page, params.limit);

    let mut query = CourseEntity::find().order_by_desc(CourseColumn::CreatedAt);

    if let Some(ref raw) = params.educational_stage {
        let level = parse_level(raw)
            .ok_or_else(|| ApiError::bad_request("Invalid educational stage level"))?;
        query = query.filter(CourseColumn::EduLevel.eq(level));
    }

    if let Some(ref subject) = params.subject {
        let course_ids: Vec<i64> = SubjectEntity::find()
            .filter(SubjectColumn::Subject.eq(subject))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.course_id)
            .collect();
        query = query.filter(CourseColumn::Id.is_in(course_ids));
    }

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

/// GET /api/courses/{course_id}
///
/// One course with teacher, roster, and content (videos, assignments,
/// quizzes) expanded. Content lookups fan out concurrently.
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let course = CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let (videos, assignments, quizzes, memberships, subjects) = tokio::try_join!(
        VideoEntity::find()
            .filter(VideoColumn::CourseId.eq(course_id))
            .all(db),
        AssignmentEntity::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .all(db),
        QuizEntity::find()
            .filter(QuizColumn::CourseId.eq(course_id))
            .all(db),
        MembershipEntity::find()
            .filter(MembershipColumn::CourseId.eq(course_id))
            .all(db),
        course_subject::Model::for_course(db, course_id),
    )?;

    let student_ids: Vec<i64> = memberships.into_iter().map(|m| m.user_id).collect();
    let (students, teacher) = tokio::try_join!(
        UserEntity::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(db),
        async {
            match course.teacher_id {
                Some(id) => UserEntity::find_by_id(id).one(db).await,
                None => Ok(None),
            }
        },
    )?;

    let response = CourseDetailResponse {
        course: CourseResponse::from_parts(course, subjects),
        teacher: teacher.map(Into::into),
        students: students.into_iter().map(Into::into).collect(),
        content: CourseContent {
            videos,
            assignments,
            quizzes: quizzes.into_iter().map(Into::into).collect(),
        },
    };

    Ok(Json(ApiResponse::success(
        response,
        "Course retrieved successfully",
    )))
}

/// GET /api/courses/{course_id}/students
///
/// The course's enrolled students.
pub async fn get_students(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let student_ids: Vec<i64> = MembershipEntity::find()
        .filter(MembershipColumn::CourseId.eq(course_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.user_id)
        .collect();

    let students: Vec<UserSummary> = UserEntity::find()
        .filter(UserColumn::Id.is_in(student_ids))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::success(
        students,
        "Students retrieved successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct CourseVideoQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub kind: Option<VideoKind>,
    pub language: Option<String>,
}

/// GET /api/courses/{course_id}/videos
///
/// Paginated videos belonging to one course, newest first, filterable by
/// kind and language.
pub async fn get_course_videos(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(params): Query<CourseVideoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = resolve_page(params.page, params.limit);

    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    let mut query = VideoEntity::find()
        .filter(VideoColumn::CourseId.eq(course_id))
        .order_by_desc(VideoColumn::CreatedAt);

    if let Some(kind) = params.kind {
        query = query.filter(VideoColumn::Kind.eq(kind));
    }
    if let Some(ref language) = params.language {
        query = query.filter(VideoColumn::Language.eq(language));
    }

    let (videos, total) = paginate(db, query, page, limit).await?;

    Ok(Json(ApiResponse::success(
        Paginated::new(videos, page, limit, total),
        "Videos retrieved successfully",
    )))
}

/// GET /api/courses/{course_id}/videos/{video_id}
///
/// One video, scoped to the course it belongs to.
pub async fn get_course_video(
    State(state): State<AppState>,
    Path((course_id, video_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let video = VideoEntity::find_by_id(video_id)
        .filter(VideoColumn::CourseId.eq(course_id))
        .one(state.db())
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found in this course"))?;

    Ok(Json(ApiResponse::success(
        video,
        "Video retrieved successfully",
    )))
}
