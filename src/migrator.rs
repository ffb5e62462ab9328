use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_supplier_products_table::Migration),
            Box::new(m20240101_000003_create_inventory_table::Migration),
            Box::new(m20240101_000004_create_purchase_order_tables::Migration),
            Box::new(m20240101_000005_create_sales_order_tables::Migration),
            Box::new(m20240101_000006_create_movement_tables::Migration),
            Box::new(m20240101_000007_create_order_sequences_table::Migration),
            Box::new(m20240101_000008_create_system_logs_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Departments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Departments::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Departments::Name).string().not_null())
                        .col(ColumnDef::new(Departments::Contact).string().null())
                        .col(ColumnDef::new(Departments::Phone).string().null())
                        .col(ColumnDef::new(Departments::Email).string().null())
                        .col(ColumnDef::new(Departments::ManagerId).string_len(32).null())
                        .col(ColumnDef::new(Departments::Note).string().null())
                        .col(
                            ColumnDef::new(Departments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::Name).string().not_null())
                        .col(ColumnDef::new(Employees::Gender).string_len(1).null())
                        .col(ColumnDef::new(Employees::Phone).string().null())
                        .col(ColumnDef::new(Employees::Email).string().null())
                        .col(ColumnDef::new(Employees::EntryDate).date().null())
                        .col(ColumnDef::new(Employees::EmployeeType).string().not_null())
                        .col(
                            ColumnDef::new(Employees::DepartmentId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::Note).string().null())
                        .col(
                            ColumnDef::new(Employees::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_employees_department")
                                .from(Employees::Table, Employees::DepartmentId)
                                .to(Departments::Table, Departments::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Gender).string_len(1).null())
                        .col(ColumnDef::new(Customers::Phone).string().null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(ColumnDef::new(Customers::Note).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Suppliers::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::Contact).string().null())
                        .col(ColumnDef::new(Suppliers::Phone).string().null())
                        .col(ColumnDef::new(Suppliers::Email).string().null())
                        .col(ColumnDef::new(Suppliers::Address).string().null())
                        .col(ColumnDef::new(Suppliers::Note).string().null())
                        .col(
                            ColumnDef::new(Suppliers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Category).string().null())
                        .col(ColumnDef::new(Products::Brand).string().null())
                        .col(ColumnDef::new(Products::Size).string().null())
                        .col(ColumnDef::new(Products::Color).string().null())
                        .col(ColumnDef::new(Products::Material).string().null())
                        .col(ColumnDef::new(Products::Unit).string().null())
                        .col(
                            ColumnDef::new(Products::CostPrice)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::SellPrice)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
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
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(ColumnDef::new(Warehouses::Address).string().null())
                        .col(ColumnDef::new(Warehouses::Note).string().null())
                        .col(
                            ColumnDef::new(Warehouses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_employees_department_id")
                        .table(Employees::Table)
                        .col(Employees::DepartmentId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_employees_type")
                        .table(Employees::Table)
                        .col(Employees::EmployeeType)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Departments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Departments {
        Table,
        Id,
        Name,
        Contact,
        Phone,
        Email,
        ManagerId,
        Note,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Employees {
        Table,
        Id,
        Name,
        Gender,
        Phone,
        Email,
        EntryDate,
        EmployeeType,
        DepartmentId,
        Note,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Name,
        Gender,
        Phone,
        Email,
        Address,
        Note,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Suppliers {
        Table,
        Id,
        Name,
        Contact,
        Phone,
        Email,
        Address,
        Note,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        Name,
        Category,
        Brand,
        Size,
        Color,
        Material,
        Unit,
        CostPrice,
        SellPrice,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Warehouses {
        Table,
        Id,
        Name,
        Address,
        Note,
        CreatedAt,
    }
}

mod m20240101_000002_create_supplier_products_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_supplier_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SupplierProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SupplierProducts::SupplierId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupplierProducts::ProductId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupplierProducts::LastPrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupplierProducts::SupplyStatus)
                                .string()
                                .not_null()
                                .default("active"),
                        )
                        .col(
                            ColumnDef::new(SupplierProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(SupplierProducts::SupplierId)
                                .col(SupplierProducts::ProductId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SupplierProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SupplierProducts {
        Table,
        SupplierId,
        ProductId,
        LastPrice,
        SupplyStatus,
        UpdatedAt,
    }
}

mod m20240101_000003_create_inventory_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_inventory_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inventory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inventory::ProductId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Inventory::WarehouseId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Inventory::CurrentQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Inventory::MinQty)
                                .integer()
                                .not_null()
                                .default(10),
                        )
                        .col(
                            ColumnDef::new(Inventory::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(Inventory::ProductId)
                                .col(Inventory::WarehouseId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_warehouse_id")
                        .table(Inventory::Table)
                        .col(Inventory::WarehouseId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inventory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Inventory {
        Table,
        ProductId,
        WarehouseId,
        CurrentQty,
        MinQty,
        UpdatedAt,
    }
}

mod m20240101_000004_create_purchase_order_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_purchase_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::SupplierId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::EmployeeId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::OrderDate).date().not_null())
                        .col(ColumnDef::new(PurchaseOrders::ExpectDate).date().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::OrderStatus)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::TotalAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(PurchaseOrders::Note).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderItems::PurchaseOrderId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::ItemNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::ProductId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UnitPrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::Note).string().null())
                        .primary_key(
                            Index::create()
                                .col(PurchaseOrderItems::PurchaseOrderId)
                                .col(PurchaseOrderItems::ItemNo),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_items_order")
                                .from(
                                    PurchaseOrderItems::Table,
                                    PurchaseOrderItems::PurchaseOrderId,
                                )
                                .to(PurchaseOrders::Table, PurchaseOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_supplier_id")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::SupplierId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_status")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::OrderStatus)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseOrders {
        Table,
        Id,
        SupplierId,
        EmployeeId,
        OrderDate,
        ExpectDate,
        OrderStatus,
        TotalAmount,
        Note,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum PurchaseOrderItems {
        Table,
        PurchaseOrderId,
        ItemNo,
        ProductId,
        Quantity,
        UnitPrice,
        Note,
    }
}

mod m20240101_000005_create_sales_order_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_sales_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::CustomerId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::EmployeeId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrders::OrderDate).date().not_null())
                        .col(ColumnDef::new(SalesOrders::ExpectDate).date().null())
                        .col(ColumnDef::new(SalesOrders::OrderStatus).string().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::TotalAmount)
                                .decimal_len(12, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(SalesOrders::Note).string().null())
                        .col(
                            ColumnDef::new(SalesOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderItems::SalesOrderId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderItems::ItemNo).integer().not_null())
                        .col(
                            ColumnDef::new(SalesOrderItems::ProductId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderItems::UnitPrice)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(SalesOrderItems::Note).string().null())
                        .primary_key(
                            Index::create()
                                .col(SalesOrderItems::SalesOrderId)
                                .col(SalesOrderItems::ItemNo),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sales_order_items_order")
                                .from(SalesOrderItems::Table, SalesOrderItems::SalesOrderId)
                                .to(SalesOrders::Table, SalesOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_customer_id")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sales_orders_status")
                        .table(SalesOrders::Table)
                        .col(SalesOrders::OrderStatus)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesOrders {
        Table,
        Id,
        CustomerId,
        EmployeeId,
        OrderDate,
        ExpectDate,
        OrderStatus,
        TotalAmount,
        Note,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum SalesOrderItems {
        Table,
        SalesOrderId,
        ItemNo,
        ProductId,
        Quantity,
        UnitPrice,
        Note,
    }
}

mod m20240101_000006_create_movement_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_movement_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InboundOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InboundOrders::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrders::PurchaseOrderId)
                                .string_len(32)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrders::EmployeeId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrders::InboundDate).date().not_null())
                        .col(
                            ColumnDef::new(InboundOrders::OperateStatus)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrders::Note).string().null())
                        .col(
                            ColumnDef::new(InboundOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InboundOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InboundOrderItems::InboundOrderId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrderItems::ItemNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrderItems::ProductId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrderItems::WarehouseId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InboundOrderItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InboundOrderItems::BatchNo).string().null())
                        .col(ColumnDef::new(InboundOrderItems::Note).string().null())
                        .primary_key(
                            Index::create()
                                .col(InboundOrderItems::InboundOrderId)
                                .col(InboundOrderItems::ItemNo),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inbound_order_items_order")
                                .from(InboundOrderItems::Table, InboundOrderItems::InboundOrderId)
                                .to(InboundOrders::Table, InboundOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OutboundOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OutboundOrders::Id)
                                .string_len(32)
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::SalesOrderId)
                                .string_len(32)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::CustomerId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::EmployeeId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::OutboundDate)
                                .date()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OutboundOrders::TrackingNo).string().null())
                        .col(
                            ColumnDef::new(OutboundOrders::OperateStatus)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OutboundOrders::Note).string().null())
                        .col(
                            ColumnDef::new(OutboundOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OutboundOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OutboundOrderItems::OutboundOrderId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrderItems::ItemNo)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrderItems::ProductId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrderItems::WarehouseId)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OutboundOrderItems::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OutboundOrderItems::Note).string().null())
                        .primary_key(
                            Index::create()
                                .col(OutboundOrderItems::OutboundOrderId)
                                .col(OutboundOrderItems::ItemNo),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_outbound_order_items_order")
                                .from(
                                    OutboundOrderItems::Table,
                                    OutboundOrderItems::OutboundOrderId,
                                )
                                .to(OutboundOrders::Table, OutboundOrders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inbound_orders_purchase_order_id")
                        .table(InboundOrders::Table)
                        .col(InboundOrders::PurchaseOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_outbound_orders_sales_order_id")
                        .table(OutboundOrders::Table)
                        .col(OutboundOrders::SalesOrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InboundOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InboundOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OutboundOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OutboundOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InboundOrders {
        Table,
        Id,
        PurchaseOrderId,
        EmployeeId,
        InboundDate,
        OperateStatus,
        Note,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum InboundOrderItems {
        Table,
        InboundOrderId,
        ItemNo,
        ProductId,
        WarehouseId,
        Quantity,
        BatchNo,
        Note,
    }

    #[derive(DeriveIden)]
    pub(super) enum OutboundOrders {
        Table,
        Id,
        SalesOrderId,
        CustomerId,
        EmployeeId,
        OutboundDate,
        TrackingNo,
        OperateStatus,
        Note,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum OutboundOrderItems {
        Table,
        OutboundOrderId,
        ItemNo,
        ProductId,
        WarehouseId,
        Quantity,
        Note,
    }
}

mod m20240101_000007_create_order_sequences_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_order_sequences_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // One row per order-type + calendar-month partition, e.g. "PO202401".
            manager
                .create_table(
                    Table::create()
                        .table(OrderSequences::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderSequences::Prefix)
                                .string_len(16)
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderSequences::LastSeq)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderSequences::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderSequences {
        Table,
        Prefix,
        LastSeq,
    }
}

mod m20240101_000008_create_system_logs_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_system_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SystemLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SystemLogs::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SystemLogs::Level).string().not_null())
                        .col(ColumnDef::new(SystemLogs::Module).string().not_null())
                        .col(ColumnDef::new(SystemLogs::Action).string().not_null())
                        .col(ColumnDef::new(SystemLogs::Message).string().not_null())
                        .col(ColumnDef::new(SystemLogs::EmployeeId).string_len(32).null())
                        .col(ColumnDef::new(SystemLogs::Detail).json().null())
                        .col(
                            ColumnDef::new(SystemLogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_system_logs_module")
                        .table(SystemLogs::Table)
                        .col(SystemLogs::Module)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_system_logs_created_at")
                        .table(SystemLogs::Table)
                        .col(SystemLogs::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SystemLogs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum SystemLogs {
        Table,
        Id,
        Level,
        Module,
        Action,
        Message,
        EmployeeId,
        Detail,
        CreatedAt,
    }
}
