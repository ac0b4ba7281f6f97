use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teams::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::Token).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tags::TagUid).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(Tags::TeamId).integer().not_null())
                    .col(
                        ColumnDef::new(Tags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tags_team_id")
                            .from(Tags::Table, Tags::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tags_team_id")
                    .table(Tags::Table)
                    .col(Tags::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Taps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Taps::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Taps::TagUid).big_integer().not_null())
                    .col(ColumnDef::new(Taps::Count).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Taps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_taps_tag_uid")
                            .from(Taps::Table, Taps::TagUid)
                            .to(Tags::Table, Tags::TagUid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Covers both the per-tag range scan and the importer's duplicate check.
        manager
            .create_index(
                Index::create()
                    .name("idx_taps_tag_uid_created_at")
                    .table(Taps::Table)
                    .col(Taps::TagUid)
                    .col(Taps::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Taps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    Token,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    TagUid,
    TeamId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Taps {
    Table,
    TagUid,
    Id,
    Count,
    CreatedAt,
}
