use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use std::collections::HashMap;
use util::state::AppState;

use db::models::{
    assignment::{self, Column as AssignmentColumn, Entity as AssignmentEntity},
    assignment_submission::{
        self, Column as SubmissionColumn, Entity as SubmissionEntity,
    },
    course::{Column as CourseColumn, Entity as CourseEntity},
    course_student,
    quiz::{Column as QuizColumn, Entity as QuizEntity},
    quiz_attempt::{self, Column as AttemptColumn, Entity as AttemptEntity},
    user::{Column as UserColumn, Entity as UserEntity},
};

use crate::auth::CurrentUser;
use crate::response::{ApiError, ApiResponse, Paginated};
use crate::routes::common::{PageQuery, UserSummary, paginate};
use crate::routes::courses::common::{CourseListItem, CourseResponse};

/// GET /api/students/me/courses
///
/// The requesting student's enrolled courses, paginated, with teacher
/// summaries attached.
pub async fn get_enrolled_courses(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();
    let (page, limit) = params.resolve();

    let enrolled_ids = course_student::Model::course_ids_for(db, student.id).await?;
    let query = CourseEntity::find()
        .filter(CourseColumn::Id.is_in(enrolled_ids))
        .order_by_desc(CourseColumn::CreatedAt);

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
        "Enrolled courses retrieved successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct CompletionStats {
    pub completed: u64,
    pub total: u64,
    pub percentage: f64,
}

impl CompletionStats {
    fn new(completed: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64) * 100.0
        };
        Self {
            completed,
            total,
            percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseProgress {
    pub course_id: i64,
    pub course_title: String,
    pub assignment_progress: CompletionStats,
    pub quiz_progress: CompletionStats,
}

/// GET /api/students/me/progress
///
/// Per-course completion percentages: how many of the course's assignments
/// have a submission, and how many of its quizzes an attempt, by this
/// student. A course with no assignments or quizzes reports 0%.
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let enrolled_ids = course_student::Model::course_ids_for(db, student.id).await?;
    let courses = CourseEntity::find()
        .filter(CourseColumn::Id.is_in(enrolled_ids))
        .all(db)
        .await?;

    let mut progress = Vec::with_capacity(courses.len());
    for course in courses {
        let (assignment_ids, quiz_ids) = tokio::try_join!(
            async {
                Ok::<_, sea_orm::DbErr>(
                    AssignmentEntity::find()
                        .filter(AssignmentColumn::CourseId.eq(course.id))
                        .all(db)
                        .await?
                        .into_iter()
                        .map(|a| a.id)
                        .collect::<Vec<i64>>(),
                )
            },
            async {
                Ok::<_, sea_orm::DbErr>(
                    QuizEntity::find()
                        .filter(QuizColumn::CourseId.eq(course.id))
                        .all(db)
                        .await?
                        .into_iter()
                        .map(|q| q.id)
                        .collect::<Vec<i64>>(),
                )
            },
        )?;

        let (completed_assignments, completed_quizzes) = tokio::try_join!(
            SubmissionEntity::find()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
                .filter(SubmissionColumn::StudentId.eq(student.id))
                .count(db),
            AttemptEntity::find()
                .filter(AttemptColumn::QuizId.is_in(quiz_ids.clone()))
                .filter(AttemptColumn::StudentId.eq(student.id))
                .select_only()
                .column(AttemptColumn::QuizId)
                .distinct()
                .count(db),
        )?;

        progress.push(CourseProgress {
            course_id: course.id,
            course_title: course.title,
            assignment_progress: CompletionStats::new(
                completed_assignments,
                assignment_ids.len() as u64,
            ),
            quiz_progress: CompletionStats::new(completed_quizzes, quiz_ids.len() as u64),
        });
    }

    Ok(Json(ApiResponse::success(
        progress,
        "Progress retrieved successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak: i32,
    pub last_active: Option<DateTime<Utc>>,
}

/// GET /api/students/me/streak
///
/// The activity streak, reset lazily: if more than 24 hours have passed since
/// the student's last action, the streak drops to 0 on this read.
pub async fn get_streak(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    if student.streak_lapsed(Utc::now()) {
        UserEntity::update_many()
            .col_expr(UserColumn::ActivityStreak, Expr::value(0))
            .filter(UserColumn::Id.eq(student.id))
            .exec(db)
            .await?;

        return Ok(Json(ApiResponse::success(
            StreakResponse {
                streak: 0,
                last_active: student.last_active,
            },
            "Streak retrieved successfully",
        )));
    }

    Ok(Json(ApiResponse::success(
        StreakResponse {
            streak: student.activity_streak,
            last_active: student.last_active,
        },
        "Streak retrieved successfully",
    )))
}

/// GET /api/students/me/recommended
///
/// Up to five unenrolled courses matching the student's educational stage.
pub async fn get_recommended_courses(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let Some(level) = student.edu_level else {
        return Ok(Json(ApiResponse::success(
            Vec::<CourseResponse>::new(),
            "Recommended courses retrieved successfully",
        )));
    };

    let enrolled_ids = course_student::Model::course_ids_for(db, student.id).await?;

    let mut query = CourseEntity::find()
        .filter(CourseColumn::EduLevel.eq(level))
        .filter(CourseColumn::Id.is_not_in(enrolled_ids));

    if let Some(ref grade) = student.edu_grade {
        query = query.filter(CourseColumn::EduGrade.eq(grade));
    }

    let courses = query.limit(5).all(db).await?;

    let mut items = Vec::with_capacity(courses.len());
    for course in courses {
        items.push(CourseResponse::load(db, course).await?);
    }

    Ok(Json(ApiResponse::success(
        items,
        "Recommended courses retrieved successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct AssignmentWithSubmission {
    #[serde(flatten)]
    pub assignment: assignment::Model,
    pub submission: Option<assignment_submission::Model>,
}

/// GET /api/students/courses/{course_id}/assignments
///
/// The course's assignments with the requesting student's own submission (if
/// any) attached to each. Enrollment required.
pub async fn get_course_assignments(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    if !course_student::Model::is_enrolled(db, course_id, student.id).await? {
        return Err(ApiError::forbidden("You are not enrolled in this course"));
    }

    let assignments = AssignmentEntity::find()
        .filter(AssignmentColumn::CourseId.eq(course_id))
        .all(db)
        .await?;

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let mut submissions: HashMap<i64, assignment_submission::Model> = SubmissionEntity::find()
        .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
        .filter(SubmissionColumn::StudentId.eq(student.id))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    let items: Vec<AssignmentWithSubmission> = assignments
        .into_iter()
        .map(|assignment| {
            let submission = submissions.remove(&assignment.id);
            AssignmentWithSubmission {
                assignment,
                submission,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(
        items,
        "Assignments retrieved successfully",
    )))
}

/// GET /api/students/assignments/{assignment_id}/submission
///
/// The requesting student's submission for one assignment.
pub async fn get_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Path(assignment_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    AssignmentEntity::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found"))?;

    let submission =
        assignment_submission::Model::find_for_student(db, assignment_id, student.id)
            .await?
            .ok_or_else(|| ApiError::not_found("No submission found"))?;

    Ok(Json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}

#[derive(Debug, Serialize)]
pub struct QuizAttemptsResponse {
    pub quiz_title: String,
    pub course_title: Option<String>,
    pub total_questions: usize,
    pub attempts: Vec<quiz_attempt::Model>,
}

/// GET /api/students/quizzes/{quiz_id}/attempts
///
/// The requesting student's attempts at one quiz, with stored scores.
pub async fn get_quiz_attempts(
    State(state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.db();

    let quiz = QuizEntity::find_by_id(quiz_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;

    let (course, attempts) = tokio::try_join!(
        CourseEntity::find_by_id(quiz.course_id).one(db),
        AttemptEntity::find()
            .filter(AttemptColumn::QuizId.eq(quiz_id))
            .filter(AttemptColumn::StudentId.eq(student.id))
            .order_by_asc(AttemptColumn::AttemptedAt)
            .all(db),
    )?;

    Ok(Json(ApiResponse::success(
        QuizAttemptsResponse {
            quiz_title: quiz.title,
            course_title: course.map(|c| c.title),
            total_questions: quiz.questions.len(),
            attempts,
        },
        "Quiz attempts retrieved successfully",
    )))
}
