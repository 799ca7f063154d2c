use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601120007_create_meetings"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("meetings"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("organizer_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("scheduled_time")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("notes")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("kind"))
                            .enumeration(
                                Alias::new("meeting_kind_enum"),
                                vec![
                                    Alias::new("parent-teacher"),
                                    Alias::new("admin"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("meetings"), Alias::new("organizer_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("meeting_participants"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("meeting_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("meeting_id"))
                            .col(Alias::new("user_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("meeting_participants"), Alias::new("meeting_id"))
                            .to(Alias::new("meetings"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("meeting_participants"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("meeting_participants")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("meetings")).to_owned())
            .await
    }
}
