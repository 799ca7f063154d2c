#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use db::models::{
        assignment_submission::{self, SubmissionFiles},
        user::Role,
    };
    use sea_orm::{
        ActiveModelTrait,
        ActiveValue::{NotSet, Set},
        DatabaseConnection,
    };
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{
        create_assignment, create_course, create_user, enroll, token_for,
    };

    async fn seed_submission(
        db: &DatabaseConnection,
        assignment_id: i64,
        student_id: i64,
    ) -> assignment_submission::Model {
        assignment_submission::ActiveModel {
            id: NotSet,
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            files: Set(SubmissionFiles(vec![
                "/uploads/submissions/essay.pdf".into(),
            ])),
            grade: Set(None),
            feedback: Set(None),
            submitted_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap()
    }

    /// Test Case: Owner grades a submission
    #[tokio::test]
    async fn test_grade_submission() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        let assignment = create_assignment(db, course.id, None).await;
        enroll(db, course.id, student.id).await;
        let submission = seed_submission(db, assignment.id, student.id).await;

        let token = token_for(&teacher);
        let uri = format!(
            "/api/teachers/me/assignments/{}/submissions/{}",
            assignment.id, submission.id
        );
        let body = json!({ "grade": 87.5, "feedback": "Solid work" });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Submission graded successfully");
        assert_eq!(json["data"]["grade"], 87.5);
        assert_eq!(json["data"]["feedback"], "Solid work");
    }

    /// Test Case: Grading is scoped to owned courses
    #[tokio::test]
    async fn test_grade_submission_unowned_course() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let owner = create_user(db, "owner@example.com", Role::Teacher).await;
        let intruder = create_user(db, "intruder@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, owner.id, "Algebra I").await;
        let assignment = create_assignment(db, course.id, None).await;
        enroll(db, course.id, student.id).await;
        let submission = seed_submission(db, assignment.id, student.id).await;

        let token = token_for(&intruder);
        let uri = format!(
            "/api/teachers/me/assignments/{}/submissions/{}",
            assignment.id, submission.id
        );
        let body = json!({ "grade": 100.0 });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Assignment not found or unauthorized");
    }
}
