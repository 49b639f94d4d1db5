//! Create `acronym` table with FK to `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Acronym::Table)
                    .if_not_exists()
                    .col(uuid(Acronym::Id).primary_key())
                    .col(string_len(Acronym::Short, 64).not_null())
                    .col(string_len(Acronym::Long, 255).not_null())
                    .col(uuid(Acronym::CreatorId).not_null())
                    .col(timestamp_with_time_zone(Acronym::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_acronym_creator")
                            .from(Acronym::Table, Acronym::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Acronym::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Acronym { Table, Id, Short, Long, CreatorId, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
