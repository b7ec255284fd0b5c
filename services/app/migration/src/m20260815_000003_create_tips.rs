use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tips::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tips::UserId).uuid().not_null())
                    .col(ColumnDef::new(Tips::Content).string_len(140).not_null())
                    .col(
                        ColumnDef::new(Tips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tips::Table, Tips::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The board lists newest-first.
        manager
            .create_index(
                Index::create()
                    .table(Tips::Table)
                    .col(Tips::CreatedAt)
                    .name("idx_tips_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_tips_created_at").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tips::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tips {
    Table,
    Id,
    UserId,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
