use std::sync::Arc;

use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use ttfashion_api::migrator::Migrator;
use ttfashion_api::services::customers::CreateCustomerInput;
use ttfashion_api::services::departments::CreateDepartmentInput;
use ttfashion_api::services::employees::CreateEmployeeInput;
use ttfashion_api::services::products::CreateProductInput;
use ttfashion_api::services::suppliers::CreateSupplierInput;
use ttfashion_api::services::warehouse::UpdateInventoryInput;
use ttfashion_api::services::warehouses::CreateWarehouseInput;
use ttfashion_api::AppState;

/// Fresh in-memory database with the full schema applied. A single
/// connection keeps every query on the same sqlite handle.
pub async fn setup() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None).await.expect("migrations failed");
    AppState::new(Arc::new(db))
}

/// Seeds one department, one employee per functional role, a customer,
/// a supplier, two products, and two warehouses.
#[allow(dead_code)]
pub async fn seed_base(state: &AppState) {
    state
        .services
        .departments
        .create(CreateDepartmentInput {
            id: "D01".into(),
            name: "运营部".into(),
            contact: None,
            phone: None,
            email: None,
            manager_id: None,
            note: None,
        })
        .await
        .expect("seed department");

    for (id, name, employee_type) in [
        ("E001", "采购员一号", "purchase"),
        ("E002", "销售员一号", "sales"),
        ("E003", "仓管员一号", "warehouse"),
    ] {
        state
            .services
            .employees
            .create(CreateEmployeeInput {
                id: id.into(),
                name: name.into(),
                gender: None,
                phone: None,
                email: None,
                entry_date: None,
                employee_type: employee_type.into(),
                department_id: "D01".into(),
                note: None,
            })
            .await
            .expect("seed employee");
    }

    state
        .services
        .customers
        .create(CreateCustomerInput {
            id: "C0001".into(),
            name: "华东商贸".into(),
            gender: None,
            phone: None,
            email: None,
            address: None,
            note: None,
        })
        .await
        .expect("seed customer");

    state
        .services
        .suppliers
        .create(CreateSupplierInput {
            id: "S0001".into(),
            name: "江南纺织".into(),
            contact: None,
            phone: None,
            email: None,
            address: None,
            note: None,
        })
        .await
        .expect("seed supplier");

    for (id, name) in [("P1", "棉质衬衫"), ("P2", "牛仔外套")] {
        state
            .services
            .products
            .create(CreateProductInput {
                id: id.into(),
                name: name.into(),
                category: Some("服装".into()),
                brand: None,
                size: None,
                color: None,
                material: None,
                unit: Some("件".into()),
                cost_price: dec!(30.00),
                sell_price: dec!(59.90),
            })
            .await
            .expect("seed product");
    }

    for (id, name) in [("W1", "一号仓"), ("W2", "二号仓")] {
        seed_warehouse(state, id, name).await;
    }
}

#[allow(dead_code)]
async fn seed_warehouse(state: &AppState, id: &str, name: &str) {
    state
        .services
        .warehouses
        .create(CreateWarehouseInput {
            id: id.into(),
            name: name.into(),
            address: None,
            note: None,
        })
        .await
        .expect("seed warehouse");
}

/// Sets a ledger row directly through the administrative overwrite.
#[allow(dead_code)]
pub async fn set_stock(state: &AppState, product_id: &str, warehouse_id: &str, qty: i32) {
    state
        .services
        .warehouse
        .update_inventory(
            product_id,
            warehouse_id,
            UpdateInventoryInput {
                current_qty: qty,
                min_qty: None,
            },
        )
        .await
        .expect("set stock");
}
