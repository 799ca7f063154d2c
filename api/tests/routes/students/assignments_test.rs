#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use db::models::user::Role;

    use crate::helpers::app::{make_test_app, multipart_body, send_multipart, send_json};
    use crate::helpers::data::{
        create_assignment, create_course, create_user, enroll, token_for,
    };

    fn submission_parts() -> (String, Vec<u8>) {
        multipart_body("submission", "essay.pdf", "application/pdf", b"essay body", &[])
    }

    /// Test Case: Submission before the due date accepted exactly once
    #[tokio::test]
    async fn test_submit_once_before_due_date() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        let assignment =
            create_assignment(db, course.id, Some(Utc::now() + Duration::days(7))).await;
        enroll(db, course.id, student.id).await;

        let token = token_for(&student);
        let uri = format!("/api/students/assignments/{}/submissions", assignment.id);

        let (content_type, body) = submission_parts();
        let (status, json) =
            send_multipart(&app, Method::POST, &uri, &token, content_type, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Assignment submitted successfully");
        assert!(!json["data"]["files"].as_array().unwrap().is_empty());

        // Second submission is rejected.
        let (content_type, body) = submission_parts();
        let (status, json) =
            send_multipart(&app, Method::POST, &uri, &token, content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "You have already submitted this assignment");

        // And the stored submission is retrievable.
        let get_uri = format!("/api/students/assignments/{}/submission", assignment.id);
        let (status, json) = send_json(&app, Method::GET, &get_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["student_id"], student.id);
    }

    /// Test Case: Submission past the due date rejected
    #[tokio::test]
    async fn test_submit_past_due_date() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        let assignment =
            create_assignment(db, course.id, Some(Utc::now() - Duration::hours(1))).await;
        enroll(db, course.id, student.id).await;

        let token = token_for(&student);
        let uri = format!("/api/students/assignments/{}/submissions", assignment.id);
        let (content_type, body) = submission_parts();
        let (status, json) =
            send_multipart(&app, Method::POST, &uri, &token, content_type, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Assignment submission deadline has passed");
    }

    /// Test Case: Disallowed file extension rejected
    #[tokio::test]
    async fn test_submit_bad_file_type() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        let assignment = create_assignment(db, course.id, None).await;
        enroll(db, course.id, student.id).await;

        let token = token_for(&student);
        let uri = format!("/api/students/assignments/{}/submissions", assignment.id);
        let (content_type, body) = multipart_body(
            "submission",
            "payload.exe",
            "application/octet-stream",
            b"bits",
            &[],
        );
        let (status, json) =
            send_multipart(&app, Method::POST, &uri, &token, content_type, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid file type for submission");
    }

    /// Test Case: Enrollment is required to submit
    #[tokio::test]
    async fn test_submit_requires_enrollment() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let outsider = create_user(db, "outsider@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        let assignment = create_assignment(db, course.id, None).await;

        let token = token_for(&outsider);
        let uri = format!("/api/students/assignments/{}/submissions", assignment.id);
        let (content_type, body) = submission_parts();
        let (status, json) =
            send_multipart(&app, Method::POST, &uri, &token, content_type, body).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "You are not enrolled in this course");
    }
}
