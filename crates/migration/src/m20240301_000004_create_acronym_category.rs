//! Create `acronym_category` pivot table.
//!
//! Composite primary key makes duplicate associations impossible; both
//! FKs cascade so deleting either side removes the join rows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AcronymCategory::Table)
                    .if_not_exists()
                    .col(uuid(AcronymCategory::AcronymId).not_null())
                    .col(uuid(AcronymCategory::CategoryId).not_null())
                    .primary_key(
                        Index::create()
                            .col(AcronymCategory::AcronymId)
                            .col(AcronymCategory::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_acronym_category_acronym")
                            .from(AcronymCategory::Table, AcronymCategory::AcronymId)
                            .to(Acronym::Table, Acronym::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_acronym_category_category")
                            .from(AcronymCategory::Table, AcronymCategory::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AcronymCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AcronymCategory { Table, AcronymId, CategoryId }

#[derive(DeriveIden)]
enum Acronym { Table, Id }

#[derive(DeriveIden)]
enum Category { Table, Id }
