#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{create_course, create_user, token_for};

    /// Test Case: Enrolling twice yields one membership and a 400
    #[tokio::test]
    async fn test_duplicate_enroll_rejected() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        let token = token_for(&student);
        let uri = format!("/api/courses/{}/enroll", course.id);

        let (status, json) = send_json(&app, Method::POST, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Enrolled successfully");

        let (status, json) = send_json(&app, Method::POST, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Student already enrolled");

        // Exactly one membership row behind the scenes.
        let students_uri = format!("/api/courses/{}/students", course.id);
        let (_, json) = send_json(&app, Method::GET, &students_uri, Some(&token), None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["id"], student.id);
    }

    /// Test Case: Unenroll removes the membership
    #[tokio::test]
    async fn test_unenroll() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        let token = token_for(&student);
        let uri = format!("/api/courses/{}/enroll", course.id);

        send_json(&app, Method::POST, &uri, Some(&token), None).await;
        let (status, _) = send_json(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let students_uri = format!("/api/courses/{}/students", course.id);
        let (_, json) = send_json(&app, Method::GET, &students_uri, Some(&token), None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    /// Test Case: Enrolling in a missing course
    #[tokio::test]
    async fn test_enroll_unknown_course() {
        let (app, state) = make_test_app().await;
        let student = create_user(state.db(), "student@example.com", Role::Student).await;
        let token = token_for(&student);

        let (status, json) =
            send_json(&app, Method::POST, "/api/courses/999/enroll", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }

    /// Test Case: Teachers cannot enroll
    #[tokio::test]
    async fn test_enroll_forbidden_for_teachers() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        let token = token_for(&teacher);
        let uri = format!("/api/courses/{}/enroll", course.id);
        let (status, _) = send_json(&app, Method::POST, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
