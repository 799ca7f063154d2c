use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Parent-to-student link: one row per (parent, child) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "parent_children")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub child_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ParentId",
        to = "super::user::Column::Id"
    )]
    Parent,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ChildId",
        to = "super::user::Column::Id"
    )]
    Child,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Ids of the children linked to a parent account.
    pub async fn child_ids_for(
        db: &DatabaseConnection,
        parent_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::ParentId.eq(parent_id))
            .all(db)
            .await?
            .into_iter()
            .map(|row| row.child_id)
            .collect())
    }
}
