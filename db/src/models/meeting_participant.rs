use sea_orm::entity::prelude::*;
use sea_orm::{Set, sea_query::OnConflict};
use serde::Serialize;

/// Participant membership: one row per (meeting, user) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "meeting_participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub meeting_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::meeting::Entity",
        from = "Column::MeetingId",
        to = "super::meeting::Column::Id"
    )]
    Meeting,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::meeting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meeting.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Adds the given users to a meeting, ignoring ones already present.
    pub async fn add_all(
        db: &DatabaseConnection,
        meeting_id: i64,
        user_ids: &[i64],
    ) -> Result<(), DbErr> {
        if user_ids.is_empty() {
            return Ok(());
        }

        let rows = user_ids.iter().map(|&user_id| ActiveModel {
            meeting_id: Set(meeting_id),
            user_id: Set(user_id),
        });

        Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([Column::MeetingId, Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn user_ids_for(
        db: &DatabaseConnection,
        meeting_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::MeetingId.eq(meeting_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.user_id)
            .collect())
    }
}
