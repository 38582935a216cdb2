use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_catalog_tables::Migration),
            Box::new(m20260101_000002_create_article_tables::Migration),
            Box::new(m20260101_000003_create_terminal_tables::Migration),
            Box::new(m20260101_000004_create_adjustment_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20260101_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Branches::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Branches::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Branches::Code).string().not_null())
                        .col(ColumnDef::new(Branches::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Warehouses::BranchId).big_integer().not_null())
                        .col(ColumnDef::new(Warehouses::Code).string().not_null())
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_warehouses_branch_id")
                        .table(Warehouses::Table)
                        .col(Warehouses::BranchId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Currencies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Currencies::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Currencies::Code).string().not_null())
                        .col(ColumnDef::new(Currencies::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AdjustmentReasons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AdjustmentReasons::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AdjustmentReasons::Code).string().not_null())
                        .col(
                            ColumnDef::new(AdjustmentReasons::Description)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AdjustmentReasons::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Currencies::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Branches::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Branches {
        Table,
        Id,
        Code,
        Name,
    }

    #[derive(DeriveIden)]
    enum Warehouses {
        Table,
        Id,
        BranchId,
        Code,
        Name,
    }

    #[derive(DeriveIden)]
    enum Currencies {
        Table,
        Id,
        Code,
        Name,
    }

    #[derive(DeriveIden)]
    enum AdjustmentReasons {
        Table,
        Id,
        Code,
        Description,
    }
}

mod m20260101_000002_create_article_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000002_create_article_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Articles::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Articles::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Articles::Code).string().not_null())
                        .col(ColumnDef::new(Articles::ReferenceCode).string().null())
                        .col(ColumnDef::new(Articles::Name).string().not_null())
                        .col(ColumnDef::new(Articles::LineId).big_integer().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_articles_code")
                        .table(Articles::Table)
                        .col(Articles::Code)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ArticleStock::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ArticleStock::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ArticleStock::ArticleId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ArticleStock::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ArticleStock::Quantity)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(ArticleStock::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_article_stock_article_warehouse")
                        .table(ArticleStock::Table)
                        .col(ArticleStock::ArticleId)
                        .col(ArticleStock::WarehouseId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ArticleStock::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Articles::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Articles {
        Table,
        Id,
        Code,
        ReferenceCode,
        Name,
        LineId,
    }

    #[derive(DeriveIden)]
    enum ArticleStock {
        Table,
        Id,
        ArticleId,
        WarehouseId,
        Quantity,
        UpdatedAt,
    }
}

mod m20260101_000003_create_terminal_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000003_create_terminal_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Terminals::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Terminals::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Terminals::Code).string().not_null())
                        .col(
                            ColumnDef::new(Terminals::EstablishmentCode)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Terminals::PointCode).integer().not_null())
                        .col(
                            ColumnDef::new(Terminals::NextNumber)
                                .big_integer()
                                .not_null()
                                .default(1),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserConfigs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserConfigs::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserConfigs::UserId).big_integer().not_null())
                        .col(ColumnDef::new(UserConfigs::TerminalId).big_integer().null())
                        .col(
                            ColumnDef::new(UserConfigs::AllowPositive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(UserConfigs::AllowNegative)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_user_configs_user_id")
                        .table(UserConfigs::Table)
                        .col(UserConfigs::UserId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserConfigs::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Terminals::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Terminals {
        Table,
        Id,
        Code,
        EstablishmentCode,
        PointCode,
        NextNumber,
    }

    #[derive(DeriveIden)]
    enum UserConfigs {
        Table,
        Id,
        UserId,
        TerminalId,
        AllowPositive,
        AllowNegative,
    }
}

mod m20260101_000004_create_adjustment_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20260101_000004_create_adjustment_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryAdjustments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryAdjustments::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::DocumentNumber)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::TerminalId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::BranchId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::WarehouseId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::UserId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::CurrencyId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::ReasonId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryAdjustments::Kind).string().not_null())
                        .col(
                            ColumnDef::new(InventoryAdjustments::DocumentDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::ExchangeRate)
                                .decimal()
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(InventoryAdjustments::Observation).string().null())
                        .col(
                            ColumnDef::new(InventoryAdjustments::Total)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryAdjustments::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_adjustments_terminal_document_number")
                        .table(InventoryAdjustments::Table)
                        .col(InventoryAdjustments::TerminalId)
                        .col(InventoryAdjustments::DocumentNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_adjustments_document_date")
                        .table(InventoryAdjustments::Table)
                        .col(InventoryAdjustments::DocumentDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AdjustmentLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AdjustmentLines::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentLines::AdjustmentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentLines::ItemNumber)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentLines::ArticleId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AdjustmentLines::Quantity).decimal().not_null())
                        .col(ColumnDef::new(AdjustmentLines::UnitCost).decimal().not_null())
                        .col(ColumnDef::new(AdjustmentLines::LineTotal).decimal().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_adjustment_lines_adjustment_id")
                        .table(AdjustmentLines::Table)
                        .col(AdjustmentLines::AdjustmentId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AdjustmentLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryAdjustments::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum InventoryAdjustments {
        Table,
        Id,
        DocumentNumber,
        TerminalId,
        BranchId,
        WarehouseId,
        UserId,
        CurrencyId,
        ReasonId,
        Kind,
        DocumentDate,
        ExchangeRate,
        Observation,
        Total,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum AdjustmentLines {
        Table,
        Id,
        AdjustmentId,
        ItemNumber,
        ArticleId,
        Quantity,
        UnitCost,
        LineTotal,
    }
}
