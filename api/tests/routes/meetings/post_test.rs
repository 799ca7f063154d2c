#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use db::models::user::Role;
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{create_user, token_for};

    /// Test Case: Meetings cannot be scheduled in the past
    #[tokio::test]
    async fn test_schedule_in_past_rejected() {
        let (app, state) = make_test_app().await;
        let parent = create_user(state.db(), "parent@example.com", Role::Parent).await;

        let token = token_for(&parent);
        let body = json!({
            "participants": [],
            "scheduled_time": (Utc::now() - Duration::hours(1)).to_rfc3339()
        });
        let (status, json) =
            send_json(&app, Method::POST, "/api/meetings", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Meeting cannot be scheduled in the past");
    }

    /// Test Case: Unknown participants rejected
    #[tokio::test]
    async fn test_unknown_participants_rejected() {
        let (app, state) = make_test_app().await;
        let parent = create_user(state.db(), "parent@example.com", Role::Parent).await;

        let token = token_for(&parent);
        let body = json!({
            "participants": [9999],
            "scheduled_time": (Utc::now() + Duration::days(1)).to_rfc3339()
        });
        let (status, json) =
            send_json(&app, Method::POST, "/api/meetings", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "One or more participants not found");
    }

    /// Test Case: The organizer is always a participant
    #[tokio::test]
    async fn test_organizer_included() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let parent = create_user(db, "parent@example.com", Role::Parent).await;
        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;

        let token = token_for(&parent);
        let body = json!({
            "participants": [teacher.id],
            "scheduled_time": (Utc::now() + Duration::days(1)).to_rfc3339(),
            "kind": "parent-teacher"
        });
        let (status, json) =
            send_json(&app, Method::POST, "/api/meetings", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        let participants = json["data"]["participants"].as_array().unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(json["data"]["organizer"]["id"], parent.id);
        assert_eq!(json["data"]["kind"], "parent-teacher");
    }

    /// Test Case: Only the organizer (or an admin) may update, and never into
    /// the past
    #[tokio::test]
    async fn test_update_meeting_rules() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let parent = create_user(db, "parent@example.com", Role::Parent).await;
        let stranger = create_user(db, "stranger@example.com", Role::Teacher).await;
        let admin = create_user(db, "admin@example.com", Role::Admin).await;

        let token = token_for(&parent);
        let body = json!({
            "participants": [],
            "scheduled_time": (Utc::now() + Duration::days(1)).to_rfc3339()
        });
        let (_, json) =
            send_json(&app, Method::POST, "/api/meetings", Some(&token), Some(body)).await;
        let meeting_id = json["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/meetings/{}", meeting_id);

        // Stranger cannot touch it.
        let stranger_token = token_for(&stranger);
        let body = json!({ "notes": "hijack" });
        let (status, json) =
            send_json(&app, Method::PUT, &uri, Some(&stranger_token), Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Not authorized to update this meeting");

        // Organizer cannot move it into the past.
        let body = json!({ "scheduled_time": (Utc::now() - Duration::days(1)).to_rfc3339() });
        let (status, _) = send_json(&app, Method::PUT, &uri, Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // An admin may update.
        let admin_token = token_for(&admin);
        let body = json!({ "notes": "moderated" });
        let (status, json) =
            send_json(&app, Method::PUT, &uri, Some(&admin_token), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["notes"], "moderated");
    }

    /// Test Case: Listing is scoped to the requester's meetings
    #[tokio::test]
    async fn test_list_scoped_to_participant() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let parent = create_user(db, "parent@example.com", Role::Parent).await;
        let other = create_user(db, "other@example.com", Role::Parent).await;

        let token = token_for(&parent);
        let body = json!({
            "participants": [],
            "scheduled_time": (Utc::now() + Duration::days(1)).to_rfc3339()
        });
        send_json(&app, Method::POST, "/api/meetings", Some(&token), Some(body)).await;

        let (_, json) = send_json(&app, Method::GET, "/api/meetings", Some(&token), None).await;
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);

        let other_token = token_for(&other);
        let (_, json) =
            send_json(&app, Method::GET, "/api/meetings", Some(&other_token), None).await;
        assert!(json["data"]["items"].as_array().unwrap().is_empty());
    }
}
