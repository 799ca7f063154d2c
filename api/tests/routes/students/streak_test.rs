#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use db::models::user::{self, Role};
    use sea_orm::sea_query::Expr;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use serde_json::json;

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{create_course, create_user, enroll, token_for};

    /// Test Case: Tracking a video bumps the streak by one
    #[tokio::test]
    async fn test_tracking_bumps_streak() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;
        enroll(db, course.id, student.id).await;

        use sea_orm::ActiveModelTrait;
        use sea_orm::ActiveValue::{NotSet, Set};
        let video = db::models::video::ActiveModel {
            id: NotSet,
            course_id: Set(course.id),
            uploaded_by: Set(Some(teacher.id)),
            title: Set("Intro".into()),
            description: Set(None),
            kind: Set(db::models::video::VideoKind::Lecture),
            url: Set("/uploads/videos/intro.mp4".into()),
            language: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();

        let token = token_for(&student);
        let uri = format!("/api/students/videos/{}/track", video.id);
        let (status, json) = send_json(
            &app,
            Method::POST,
            &uri,
            Some(&token),
            Some(json!({ "progress": 42.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["progress"], 42.0);

        let (status, json) =
            send_json(&app, Method::GET, "/api/students/me/streak", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["streak"], 1);
    }

    /// Test Case: Streak resets lazily after a 24-hour gap
    #[tokio::test]
    async fn test_streak_resets_after_gap() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let student = create_user(db, "student@example.com", Role::Student).await;

        // Fake an old streak with a stale last_active timestamp.
        user::Entity::update_many()
            .col_expr(user::Column::ActivityStreak, Expr::value(5))
            .col_expr(
                user::Column::LastActive,
                Expr::value(Utc::now() - Duration::hours(25)),
            )
            .filter(user::Column::Id.eq(student.id))
            .exec(db)
            .await
            .unwrap();

        let token = token_for(&student);
        let (status, json) =
            send_json(&app, Method::GET, "/api/students/me/streak", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["streak"], 0);

        // The reset is persisted.
        let reloaded = user::Entity::find_by_id(student.id)
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.activity_streak, 0);
    }

    /// Test Case: A fresh gap under 24 hours keeps the streak
    #[tokio::test]
    async fn test_streak_kept_within_window() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let student = create_user(db, "student@example.com", Role::Student).await;

        user::Entity::update_many()
            .col_expr(user::Column::ActivityStreak, Expr::value(3))
            .col_expr(
                user::Column::LastActive,
                Expr::value(Utc::now() - Duration::hours(3)),
            )
            .filter(user::Column::Id.eq(student.id))
            .exec(db)
            .await
            .unwrap();

        let token = token_for(&student);
        let (_, json) =
            send_json(&app, Method::GET, "/api/students/me/streak", Some(&token), None).await;
        assert_eq!(json["data"]["streak"], 3);
    }
}
