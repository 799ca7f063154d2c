use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601120001_create_users"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("users"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("email")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("password_hash")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("role"))
                            .enumeration(
                                Alias::new("user_role_enum"),
                                vec![
                                    Alias::new("student"),
                                    Alias::new("teacher"),
                                    Alias::new("parent"),
                                    Alias::new("admin"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("name")).string().null())
                    .col(ColumnDef::new(Alias::new("profile_picture_path")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("edu_level"))
                            .enumeration(
                                Alias::new("edu_level_enum"),
                                vec![
                                    Alias::new("kindergarten"),
                                    Alias::new("primary"),
                                    Alias::new("secondary"),
                                    Alias::new("undergrad"),
                                    Alias::new("postgrad"),
                                ],
                            )
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("edu_grade")).string().null())
                    .col(ColumnDef::new(Alias::new("activity_streak")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("last_active")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("parent_children"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("parent_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("child_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("parent_id"))
                            .col(Alias::new("child_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("parent_children"), Alias::new("parent_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("parent_children"), Alias::new("child_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("parent_children")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("users")).to_owned())
            .await
    }
}
