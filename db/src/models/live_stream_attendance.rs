use sea_orm::entity::prelude::*;
use sea_orm::{Set, sea_query::OnConflict};
use serde::Serialize;

/// Attendance membership: one row per (stream, user) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "live_stream_attendance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stream_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::live_stream::Entity",
        from = "Column::StreamId",
        to = "super::live_stream::Column::Id"
    )]
    Stream,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::live_stream::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stream.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Add-if-absent join. Safe to call for a user who is already attending.
    pub async fn join(db: &DatabaseConnection, stream_id: i64, user_id: i64) -> Result<(), DbErr> {
        Entity::insert(ActiveModel {
            stream_id: Set(stream_id),
            user_id: Set(user_id),
        })
        .on_conflict(
            OnConflict::columns([Column::StreamId, Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
        Ok(())
    }
}
