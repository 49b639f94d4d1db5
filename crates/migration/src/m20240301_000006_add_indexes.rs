use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Acronyms: index on creator_id for the per-user listing
        manager
            .create_index(
                Index::create()
                    .name("idx_acronym_creator")
                    .table(Acronym::Table)
                    .col(Acronym::CreatorId)
                    .to_owned(),
            )
            .await?;

        // Acronyms: search hits short/long with exact matches
        manager
            .create_index(
                Index::create()
                    .name("idx_acronym_short")
                    .table(Acronym::Table)
                    .col(Acronym::Short)
                    .to_owned(),
            )
            .await?;

        // Tokens: index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_token_user")
                    .table(Token::Table)
                    .col(Token::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_acronym_creator").table(Acronym::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_acronym_short").table(Acronym::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_token_user").table(Token::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Acronym { Table, CreatorId, Short }

#[derive(DeriveIden)]
enum Token { Table, UserId }
