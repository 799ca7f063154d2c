use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use util::state::AppState;

use db::models::{
    assignment::{Column as AssignmentColumn, Entity as AssignmentEntity},
    course::{Column as CourseColumn, Entity as CourseEntity},
    course_student::{Column as MembershipColumn, Entity as MembershipEntity},
    quiz::{Column as QuizColumn, Entity as QuizEntity},
    video::{Column as VideoColumn, Entity as VideoEntity},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{PageQuery, paginate};
use crate::routes::courses::common::CourseResponse;

#[derive(Debug, Serialize)]
pub struct TeachingCourseItem {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub student_count: u64,
    pub video_count: u64,
    pub assignment_count: u64,
    pub quiz_count: u64,
}

/// GET /api/teachers/me/courses
///
/// The requesting teacher's courses, paginated, with roster and content
/// counts fetched concurrently per course.
pub async fn get_courses(
    State(state): State<AppState>,
    Extension(CurrentUser(teacher)): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = params.resolve();

    let query = CourseEntity::find()
        .filter(CourseColumn::TeacherId.eq(teacher.id))
        .order_by_desc(CourseColumn::CreatedAt);

    let (courses, total) = paginate(db, query, page, limit).await?;

    let mut items = Vec::with_capacity(courses.len());
    for course in courses {
        let (student_count, video_count, assignment_count, quiz_count) = tokio::try_join!(
            MembershipEntity::find()
                .filter(MembershipColumn::CourseId.eq(course.id))
                .count(db),
            VideoEntity::find()
                .filter(VideoColumn::CourseId.eq(course.id))
                .count(db),
            AssignmentEntity::find()
                .filter(AssignmentColumn::CourseId.eq(course.id))
                .count(db),
            QuizEntity::find()
                .filter(QuizColumn::CourseId.eq(course.id))
                .count(db),
        )?;

        items.push(TeachingCourseItem {
            course: CourseResponse::load(db, course).await?,
            student_count,
            video_count,
            assignment_count,
            quiz_count,
        });
    }

    Ok(Json(ApiResponse::success(
        Paginated::new(items, page, limit, total),
        "Courses retrieved successfully",
    )))
}
