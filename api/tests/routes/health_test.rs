#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::helpers::app::{make_test_app, send_json};

    #[tokio::test]
    async fn health_is_public() {
        let (app, _state) = make_test_app().await;

        let (status, json) = send_json(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "API is up");
    }
}
