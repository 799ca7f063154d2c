#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{create_course, create_user, enroll, token_for};

    /// Test Case: Conductor auto-joins attendance on start
    #[tokio::test]
    async fn test_start_stream_conductor_attends() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        let token = token_for(&teacher);
        let body = json!({ "title": "Live revision", "course_id": course.id });
        let (status, json) =
            send_json(&app, Method::POST, "/api/live-streams", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let stream_id = json["data"]["id"].as_i64().unwrap();

        let uri = format!("/api/live-streams/{}", stream_id);
        let (_, json) = send_json(&app, Method::GET, &uri, Some(&token), None).await;
        let attendance = json["data"]["attendance"].as_array().unwrap();
        assert_eq!(attendance.len(), 1);
        assert_eq!(attendance[0]["id"], teacher.id);
    }

    /// Test Case: Starting a stream on someone else's course
    #[tokio::test]
    async fn test_start_stream_unowned_course() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let owner = create_user(db, "owner@example.com", Role::Teacher).await;
        let intruder = create_user(db, "intruder@example.com", Role::Teacher).await;
        let course = create_course(db, owner.id, "Algebra I").await;

        let token = token_for(&intruder);
        let body = json!({ "title": "Hijack", "course_id": course.id });
        let (status, json) =
            send_json(&app, Method::POST, "/api/live-streams", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found or unauthorized");
    }

    /// Test Case: Joining twice keeps a single attendance row
    #[tokio::test]
    async fn test_join_is_idempotent() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        enroll(db, course.id, student.id).await;

        let teacher_token = token_for(&teacher);
        let body = json!({ "title": "Live revision", "course_id": course.id });
        let (_, json) = send_json(
            &app,
            Method::POST,
            "/api/live-streams",
            Some(&teacher_token),
            Some(body),
        )
        .await;
        let stream_id = json["data"]["id"].as_i64().unwrap();

        let student_token = token_for(&student);
        let join_uri = format!("/api/live-streams/{}/join", stream_id);
        let (status, _) = send_json(&app, Method::POST, &join_uri, Some(&student_token), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send_json(&app, Method::POST, &join_uri, Some(&student_token), None).await;
        assert_eq!(status, StatusCode::OK);

        let detail_uri = format!("/api/live-streams/{}", stream_id);
        let (_, json) = send_json(&app, Method::GET, &detail_uri, Some(&student_token), None).await;
        assert_eq!(json["data"]["attendance"].as_array().unwrap().len(), 2);
    }

    /// Test Case: Unenrolled students may not join
    #[tokio::test]
    async fn test_join_requires_enrollment() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let outsider = create_user(db, "outsider@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        let teacher_token = token_for(&teacher);
        let body = json!({ "title": "Live revision", "course_id": course.id });
        let (_, json) = send_json(
            &app,
            Method::POST,
            "/api/live-streams",
            Some(&teacher_token),
            Some(body),
        )
        .await;
        let stream_id = json["data"]["id"].as_i64().unwrap();

        let token = token_for(&outsider);
        let join_uri = format!("/api/live-streams/{}/join", stream_id);
        let (status, json) = send_json(&app, Method::POST, &join_uri, Some(&token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Not authorized to join this stream");
    }

    /// Test Case: A stream ends exactly once, by its conductor
    #[tokio::test]
    async fn test_end_stream_once() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let other = create_user(db, "other@example.com", Role::Teacher).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        let token = token_for(&teacher);
        let body = json!({ "title": "Live revision", "course_id": course.id });
        let (_, json) =
            send_json(&app, Method::POST, "/api/live-streams", Some(&token), Some(body)).await;
        let stream_id = json["data"]["id"].as_i64().unwrap();
        let end_uri = format!("/api/live-streams/{}/end", stream_id);

        // Not the conductor.
        let other_token = token_for(&other);
        let (status, json) = send_json(&app, Method::POST, &end_uri, Some(&other_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Not authorized to end this stream");

        // Conductor ends it, with a recording URL.
        let body = json!({ "recording_url": "/uploads/videos/recording.mp4" });
        let (status, json) = send_json(&app, Method::POST, &end_uri, Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["end_time"].as_str().is_some());
        assert_eq!(json["data"]["recording_url"], "/uploads/videos/recording.mp4");

        // Ending again fails.
        let (status, json) = send_json(&app, Method::POST, &end_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Stream has already ended");

        // Joining after the end fails too.
        let join_uri = format!("/api/live-streams/{}/join", stream_id);
        let (status, json) = send_json(&app, Method::POST, &join_uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "This live stream has ended");
    }

    /// Test Case: Students only see streams from enrolled courses
    #[tokio::test]
    async fn test_list_streams_scoped_for_students() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let enrolled_course = create_course(db, teacher.id, "Algebra I").await;
        let other_course = create_course(db, teacher.id, "Geometry").await;
        enroll(db, enrolled_course.id, student.id).await;

        let token = token_for(&teacher);
        for course_id in [enrolled_course.id, other_course.id] {
            let body = json!({ "title": "Stream", "course_id": course_id });
            send_json(&app, Method::POST, "/api/live-streams", Some(&token), Some(body)).await;
        }

        let student_token = token_for(&student);
        let (_, json) =
            send_json(&app, Method::GET, "/api/live-streams", Some(&student_token), None).await;
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["course_id"], enrolled_course.id);

        // The teacher sees both.
        let (_, json) = send_json(&app, Method::GET, "/api/live-streams", Some(&token), None).await;
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);
    }
}
