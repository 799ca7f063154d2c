use db::models::{
    assignment::{Column as AssignmentColumn, Entity as AssignmentEntity},
    assignment_submission::{Column as SubmissionColumn, Entity as SubmissionEntity},
    quiz::{Column as QuizColumn, Entity as QuizEntity},
    quiz_attempt::{Column as AttemptColumn, Entity as AttemptEntity},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;

/// One graded item in a report: `score` is `None` when the student never
/// submitted or attempted it.
#[derive(Debug, Serialize)]
pub struct ScoreLine {
    pub title: String,
    pub score: Option<f64>,
}

/// A student's per-assignment grades and per-quiz scores for one course.
#[derive(Debug, Serialize)]
pub struct PerformanceData {
    pub assignments: Vec<ScoreLine>,
    pub quizzes: Vec<ScoreLine>,
}

/// Aggregates one student's scores across a course's assignments and quizzes.
/// Quiz lines use the stored score of the student's first attempt.
pub async fn build_performance_data(
    db: &DatabaseConnection,
    course_id: i64,
    student_id: i64,
) -> Result<PerformanceData, DbErr> {
    let (assignments, quizzes) = tokio::try_join!(
        AssignmentEntity::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .all(db),
        QuizEntity::find()
            .filter(QuizColumn::CourseId.eq(course_id))
            .all(db),
    )?;

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();

    let (submissions, attempts) = tokio::try_join!(
        SubmissionEntity::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
            .filter(SubmissionColumn::StudentId.eq(student_id))
            .all(db),
        AttemptEntity::find()
            .filter(AttemptColumn::QuizId.is_in(quiz_ids))
            .filter(AttemptColumn::StudentId.eq(student_id))
            .order_by_asc(AttemptColumn::AttemptedAt)
            .all(db),
    )?;

    let grades: HashMap<i64, Option<f64>> = submissions
        .into_iter()
        .map(|s| (s.assignment_id, s.grade))
        .collect();

    // First attempt per quiz wins; rows arrive ordered by attempt time.
    let mut scores: HashMap<i64, f64> = HashMap::new();
    for attempt in attempts {
        scores.entry(attempt.quiz_id).or_insert(attempt.score);
    }

    Ok(PerformanceData {
        assignments: assignments
            .into_iter()
            .map(|a| ScoreLine {
                score: grades.get(&a.id).copied().flatten(),
                title: a.title,
            })
            .collect(),
        quizzes: quizzes
            .into_iter()
            .map(|q| ScoreLine {
                score: scores.get(&q.id).copied(),
                title: q.title,
            })
            .collect(),
    })
}
