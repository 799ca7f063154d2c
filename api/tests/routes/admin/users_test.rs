#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use db::models::user::Role;
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{create_user, token_for};

    /// Test Case: Deleting the last admin is rejected
    #[tokio::test]
    async fn test_cannot_delete_last_admin() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "admin@example.com", Role::Admin).await;

        let token = token_for(&admin);
        let uri = format!("/api/admin/users/{}", admin.id);
        let (status, json) = send_json(&app, Method::DELETE, &uri, Some(&token), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Cannot delete the last admin user");
    }

    /// Test Case: An admin can be deleted while another remains
    #[tokio::test]
    async fn test_delete_admin_with_backup() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let admin = create_user(db, "admin@example.com", Role::Admin).await;
        let backup = create_user(db, "backup@example.com", Role::Admin).await;

        let token = token_for(&admin);
        let uri = format!("/api/admin/users/{}", backup.id);
        let (status, json) = send_json(&app, Method::DELETE, &uri, Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "User deleted successfully");
    }

    /// Test Case: Demoting the last admin is rejected
    #[tokio::test]
    async fn test_cannot_demote_last_admin() {
        let (app, state) = make_test_app().await;
        let admin = create_user(state.db(), "admin@example.com", Role::Admin).await;

        let token = token_for(&admin);
        let uri = format!("/api/admin/users/{}", admin.id);
        let body = json!({ "role": "teacher" });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Cannot change role of the last admin");
    }

    /// Test Case: Demotion succeeds once another admin exists
    #[tokio::test]
    async fn test_demote_admin_with_backup() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let admin = create_user(db, "admin@example.com", Role::Admin).await;
        let backup = create_user(db, "backup@example.com", Role::Admin).await;

        let token = token_for(&admin);
        let uri = format!("/api/admin/users/{}", backup.id);
        let body = json!({ "role": "teacher" });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "teacher");
    }

    /// Test Case: Promoting a student touches no admin invariant
    #[tokio::test]
    async fn test_promote_student() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let admin = create_user(db, "admin@example.com", Role::Admin).await;
        let student = create_user(db, "student@example.com", Role::Student).await;

        let token = token_for(&admin);
        let uri = format!("/api/admin/users/{}", student.id);
        let body = json!({ "role": "teacher" });
        let (status, json) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "teacher");
    }

    /// Test Case: Non-admins are rejected at the router layer
    #[tokio::test]
    async fn test_admin_routes_forbidden() {
        let (app, state) = make_test_app().await;
        let teacher = create_user(state.db(), "teacher@example.com", Role::Teacher).await;

        let token = token_for(&teacher);
        let (status, json) =
            send_json(&app, Method::GET, "/api/admin/users", Some(&token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Admin access required");
    }

    /// Test Case: User listing filters by role and paginates
    #[tokio::test]
    async fn test_list_users_filter_and_pagination() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let admin = create_user(db, "admin@example.com", Role::Admin).await;
        for i in 0..3 {
            create_user(db, &format!("s{i}@example.com"), Role::Student).await;
        }

        let token = token_for(&admin);
        let (status, json) = send_json(
            &app,
            Method::GET,
            "/api/admin/users?role=student&page=1&limit=2",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["pagination"]["total"], 3);
        assert_eq!(json["data"]["pagination"]["pages"], 2);
        assert_eq!(json["data"]["pagination"]["limit"], 2);
    }
}
