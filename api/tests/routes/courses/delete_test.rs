#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use sea_orm::{
        ActiveModelTrait,
        ActiveValue::{NotSet, Set},
        ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    };

    use db::models::{
        assignment::{Column as AssignmentColumn, Entity as AssignmentEntity},
        course_student::Entity as MembershipEntity,
        quiz::{Column as QuizColumn, Entity as QuizEntity},
        user::Role,
        video::{self, Column as VideoColumn, Entity as VideoEntity, VideoKind},
    };

    use crate::helpers::app::{make_test_app, send_json};
    use crate::helpers::data::{
        create_assignment, create_course, create_quiz, create_user, enroll, token_for,
    };

    /// Test Case: Course deletion cascades to content and memberships
    #[tokio::test]
    async fn test_delete_course_cascades() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let teacher = create_user(db, "teacher@example.com", Role::Teacher).await;
        let student = create_user(db, "student@example.com", Role::Student).await;
        let course = create_course(db, teacher.id, "Algebra I").await;

        create_quiz(db, course.id, teacher.id, &["a", "b", "c"]).await;
        create_assignment(db, course.id, None).await;
        video::ActiveModel {
            id: NotSet,
            course_id: Set(course.id),
            uploaded_by: Set(Some(teacher.id)),
            title: Set("Intro".into()),
            description: Set(None),
            kind: Set(VideoKind::Lecture),
            url: Set("/uploads/videos/intro.mp4".into()),
            language: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .unwrap();
        enroll(db, course.id, student.id).await;

        let token = token_for(&teacher);
        let uri = format!("/api/courses/{}", course.id);
        let (status, json) = send_json(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Course deleted successfully");

        // Course is gone over the API...
        let (status, _) = send_json(&app, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // ...and every dependent row is gone from the store.
        let videos = VideoEntity::find()
            .filter(VideoColumn::CourseId.eq(course.id))
            .count(db)
            .await
            .unwrap();
        let assignments = AssignmentEntity::find()
            .filter(AssignmentColumn::CourseId.eq(course.id))
            .count(db)
            .await
            .unwrap();
        let quizzes = QuizEntity::find()
            .filter(QuizColumn::CourseId.eq(course.id))
            .count(db)
            .await
            .unwrap();
        let memberships = MembershipEntity::find().count(db).await.unwrap();

        assert_eq!((videos, assignments, quizzes, memberships), (0, 0, 0, 0));

        // The student no longer references the course either.
        let student_token = token_for(&student);
        let (_, json) =
            send_json(&app, Method::GET, "/api/users/me", Some(&student_token), None).await;
        assert!(json["data"]["courses_enrolled"].as_array().unwrap().is_empty());
    }

    /// Test Case: Only the owner may delete
    #[tokio::test]
    async fn test_delete_course_not_owner() {
        let (app, state) = make_test_app().await;
        let db = state.db();

        let owner = create_user(db, "owner@example.com", Role::Teacher).await;
        let intruder = create_user(db, "intruder@example.com", Role::Teacher).await;
        let course = create_course(db, owner.id, "Algebra I").await;

        let token = token_for(&intruder);
        let uri = format!("/api/courses/{}", course.id);
        let (status, json) = send_json(&app, Method::DELETE, &uri, Some(&token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Unauthorized to delete this course");
    }
}
