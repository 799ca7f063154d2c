#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{create_course, create_user, token_for};

    /// Test Case: Non-owning teacher cannot update another teacher's course
    #[tokio::test]
    async fn test_update_course_not_owner() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let owner = create_user(db, "owner@example.com", Role::Teacher).await;
        let intruder = create_user(db, "intruder@example.com", Role::Teacher).await;
        let course = create_course(db, owner.id, "Algebra I").await;

        let token = token_for(&intruder);
        let uri = format!("/api/courses/{}", course.id);
        let body = json!({ "title": "Hijacked" });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Unauthorized to update this course");
    }

    /// Test Case: Owner updates title and stage
    #[tokio::test]
    async fn test_update_course_as_owner() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let owner = create_user(db, "owner@example.com", Role::Teacher).await;
        let course = create_course(db, owner.id, "Algebra I").await;

        let token = token_for(&owner);
        let uri = format!("/api/courses/{}", course.id);
        let body = json!({
            "title": "Algebra II",
            "educational_stage": { "level": "secondary", "grade": "11" }
        });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Algebra II");
        assert_eq!(json["data"]["educational_stage"]["grade"], "11");
    }

    /// Test Case: Updating a missing course
    #[tokio::test]
    async fn test_update_unknown_course() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "teacher@example.com", Role::Teacher).await;
        let token = token_for(&teacher);

        let body = json!({ "title": "Ghost" });
        let (status, json) =
            send_json(&app, Method::PUT, "/api/courses/999", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }
}
