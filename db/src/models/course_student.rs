use sea_orm::entity::prelude::*;
use sea_orm::{Set, sea_query::OnConflict};
use serde::Serialize;

/// Enrollment membership: one row per (course, student) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "course_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Add-if-absent enrollment. The conflict target is the composite primary
    /// key, so a concurrent duplicate enroll collapses into a no-op.
    /// Returns `true` when a new membership row was inserted.
    pub async fn enroll(
        db: &DatabaseConnection,
        course_id: i64,
        user_id: i64,
    ) -> Result<bool, DbErr> {
        let inserted = Entity::insert(ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
        })
        .on_conflict(
            OnConflict::columns([Column::CourseId, Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        Ok(inserted > 0)
    }

    pub async fn unenroll(
        db: &DatabaseConnection,
        course_id: i64,
        user_id: i64,
    ) -> Result<u64, DbErr> {
        let result = Entity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn is_enrolled(
        db: &DatabaseConnection,
        course_id: i64,
        user_id: i64,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// Ids of all courses the user is enrolled in.
    pub async fn course_ids_for(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.course_id)
            .collect())
    }
}
