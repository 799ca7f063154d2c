#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};

    /// Test Case: Successful registration issues a token
    #[tokio::test]
    async fn test_register_success() {
        let (app, _state) = make_test_app().await;

        let body = json!({
            "email": "student@example.com",
            "password": "strongpassword",
            "role": "student",
            "name": "Sam Student",
            "educational_stage": { "level": "secondary", "grade": "10" }
        });
        let (status, json) =
            send_json(&app, Method::POST, "/api/auth/register", None, Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User registered successfully");
        assert!(json["data"]["token"].as_str().is_some());
        assert_eq!(json["data"]["user"]["email"], "student@example.com");
        assert_eq!(json["data"]["user"]["role"], "student");
    }

    /// Test Case: Duplicate email rejected
    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (app, _state) = make_test_app().await;

        let body = json!({
            "email": "dup@example.com",
            "password": "strongpassword",
            "role": "teacher"
        });
        let (status, _) = send_json(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) =
            send_json(&app, Method::POST, "/api/auth/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User already exists");
    }

    /// Test Case: Validation failures are reported
    #[tokio::test]
    async fn test_register_invalid_input() {
        let (app, _state) = make_test_app().await;

        let body = json!({
            "email": "not-an-email",
            "password": "short",
            "role": "student"
        });
        let (status, json) =
            send_json(&app, Method::POST, "/api/auth/register", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("Invalid email format"));
        assert!(message.contains("Password must be at least 8 characters"));
    }

    /// Test Case: Login with wrong password never issues a token
    #[tokio::test]
    async fn test_login_wrong_password() {
        let (app, _state) = make_test_app().await;

        let register = json!({
            "email": "user@example.com",
            "password": "strongpassword",
            "role": "student"
        });
        send_json(&app, Method::POST, "/api/auth/register", None, Some(register)).await;

        let login = json!({ "email": "user@example.com", "password": "wrongpassword" });
        let (status, json) =
            send_json(&app, Method::POST, "/api/auth/login", None, Some(login)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
        assert!(json["data"].get("token").is_none());
    }

    /// Test Case: Login with an unknown email fails identically
    #[tokio::test]
    async fn test_login_unknown_email() {
        let (app, _state) = make_test_app().await;

        let login = json!({ "email": "ghost@example.com", "password": "whatever123" });
        let (status, json) =
            send_json(&app, Method::POST, "/api/auth/login", None, Some(login)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid credentials");
    }

    /// Test Case: Successful login
    #[tokio::test]
    async fn test_login_success() {
        let (app, _state) = make_test_app().await;

        let register = json!({
            "email": "user@example.com",
            "password": "strongpassword",
            "role": "teacher"
        });
        send_json(&app, Method::POST, "/api/auth/register", None, Some(register)).await;

        let login = json!({ "email": "user@example.com", "password": "strongpassword" });
        let (status, json) =
            send_json(&app, Method::POST, "/api/auth/login", None, Some(login)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Login successful");
        assert!(json["data"]["token"].as_str().is_some());
    }

    /// Test Case: Full password reset round trip
    #[tokio::test]
    async fn test_password_reset_flow() {
        let (app, _state) = make_test_app().await;

        let register = json!({
            "email": "forgetful@example.com",
            "password": "oldpassword",
            "role": "student"
        });
        send_json(&app, Method::POST, "/api/auth/register", None, Some(register)).await;

        // Outside production the reset token comes back in the body.
        let forgot = json!({ "email": "forgetful@example.com" });
        let (status, json) = send_json(
            &app,
            Method::POST,
            "/api/auth/forgot-password",
            None,
            Some(forgot),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reset_token = json["data"]["reset_token"].as_str().unwrap().to_string();

        let reset = json!({ "token": reset_token, "new_password": "newpassword" });
        let (status, json) = send_json(
            &app,
            Method::POST,
            "/api/auth/reset-password",
            None,
            Some(reset),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Password reset successful");

        let old_login = json!({ "email": "forgetful@example.com", "password": "oldpassword" });
        let (status, _) =
            send_json(&app, Method::POST, "/api/auth/login", None, Some(old_login)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let new_login = json!({ "email": "forgetful@example.com", "password": "newpassword" });
        let (status, _) =
            send_json(&app, Method::POST, "/api/auth/login", None, Some(new_login)).await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Test Case: Garbage reset token rejected
    #[tokio::test]
    async fn test_reset_with_invalid_token() {
        let (app, _state) = make_test_app().await;

        let reset = json!({ "token": "garbage", "new_password": "newpassword" });
        let (status, json) = send_json(
            &app,
            Method::POST,
            "/api/auth/reset-password",
            None,
            Some(reset),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid or expired reset token");
    }
}
