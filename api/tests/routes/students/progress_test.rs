#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use db::models::user::Role;
    use sea_orm::{
        ActiveModelTrait,
        ActiveValue::{NotSet, Set},
    };
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{
        create_assignment, create_course, create_quiz, create_user, enroll, token_for,
    };

    /// Test Case: Completion percentages per course
    #[tokio::test]
    async fn test_progress_percentages() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        enroll(db, course.id, student.id).await;

        // Two assignments, one submitted; one quiz, attempted.
        let done = create_assignment(db, course.id, None).await;
        create_assignment(db, course.id, None).await;
        let quiz = create_quiz(db, course.id, teacher.id, &["a"]).await;

        db::models::assignment_submission::ActiveModel {
            id: NotSet,
            assignment_id: Set(done.id),
            student_id: Set(student.id),
            files: Set(db::models::assignment_submission::SubmissionFiles(vec![
                "/uploads/submissions/essay.pdf".into(),
            ])),
            grade: Set(None),
            feedback: Set(None),
            submitted_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();

        let token = token_for(&student);
        let attempt_uri = format!("/api/students/quizzes/{}/attempts", quiz.id);
        send_json(
            &app,
            Method::POST,
            &attempt_uri,
            Some(&token),
            Some(json!({ "answers": ["a"] })),
        )
        .await;

        let (status, json) =
            send_json(&app, Method::GET, "/api/students/me/progress", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let entry = &json["data"][0];
        assert_eq!(entry["course_title"], "Algebra I");
        assert_eq!(entry["assignment_progress"]["completed"], 1);
        assert_eq!(entry["assignment_progress"]["total"], 2);
        assert_eq!(entry["assignment_progress"]["percentage"], 50.0);
        assert_eq!(entry["quiz_progress"]["percentage"], 100.0);
    }

    /// Test Case: Empty course reports zero, not NaN
    #[tokio::test]
    async fn test_progress_empty_course() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Empty course").await;
        enroll(db, course.id, student.id).await;

        let token = token_for(&student);
        let (status, json) =
            send_json(&app, Method::GET, "/api/students/me/progress", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        let entry = &json["data"][0];
        assert_eq!(entry["assignment_progress"]["percentage"], 0.0);
        assert_eq!(entry["quiz_progress"]["percentage"], 0.0);
    }
}
