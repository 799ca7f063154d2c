use sea_orm::entity::prelude::*;
use sea_orm::{Set, sea_query::OnConflict};
use serde::Serialize;

/// Subject tag attached to a course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "course_subjects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Replaces a course's subject tag set.
    pub async fn replace_for_course(
        db: &DatabaseConnection,
        course_id: i64,
        subjects: &[String],
    ) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;

        if subjects.is_empty() {
            return Ok(());
        }

        let rows = subjects.iter().map(|s| ActiveModel {
            course_id: Set(course_id),
            subject: Set(s.clone()),
        });

        Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([Column::CourseId, Column::Subject])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn for_course(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<Vec<String>, DbErr> {
        Ok(Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.subject)
            .collect())
    }
}
