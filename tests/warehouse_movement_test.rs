mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;

use ttfashion_api::errors::ServiceError;
use ttfashion_api::services::status::OperateStatus;
use ttfashion_api::services::warehouse::{
    CreateInboundInput, CreateOutboundInput, InventoryFilter, MovementItemInput,
    UpdateInventoryInput,
};

fn movement_item(product_id: &str, warehouse_id: &str, quantity: i32) -> MovementItemInput {
    MovementItemInput {
        product_id: product_id.into(),
        warehouse_id: warehouse_id.into(),
        quantity,
        batch_no: None,
        note: None,
    }
}

fn inbound_input(items: Vec<MovementItemInput>) -> CreateInboundInput {
    CreateInboundInput {
        purchase_order_id: None,
        inbound_date: NaiveDate::from_ymd_opt(2024, 1, 10),
        operate_status: None,
        note: None,
        items,
    }
}

fn outbound_input(items: Vec<MovementItemInput>) -> CreateOutboundInput {
    CreateOutboundInput {
        sales_order_id: None,
        customer_id: "C0001".into(),
        outbound_date: NaiveDate::from_ymd_opt(2024, 1, 12),
        tracking_no: None,
        operate_status: None,
        note: None,
        items,
    }
}

async fn stock_of(
    state: &ttfashion_api::AppState,
    product_id: &str,
    warehouse_id: &str,
) -> Option<(i32, i32)> {
    let (rows, _) = state
        .services
        .warehouse
        .get_inventory(
            InventoryFilter {
                product_id: Some(product_id.into()),
                warehouse_id: Some(warehouse_id.into()),
            },
            1,
            10,
        )
        .await
        .unwrap();
    rows.first().map(|v| (v.row.current_qty, v.row.min_qty))
}

#[tokio::test]
async fn inbound_completion_creates_ledger_rows_with_default_threshold() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let created = state
        .services
        .warehouse
        .create_inbound("E003", inbound_input(vec![movement_item("P1", "W1", 40)]))
        .await
        .unwrap();
    assert_eq!(created.order.id, "IN202401001");
    assert_eq!(created.order.operate_status, "processing");
    // Nothing moves until the order completes.
    assert_eq!(stock_of(&state, "P1", "W1").await, None);

    state
        .services
        .warehouse
        .update_inbound_status(&created.order.id, OperateStatus::Completed)
        .await
        .unwrap();
    assert_eq!(stock_of(&state, "P1", "W1").await, Some((40, 10)));
}

#[tokio::test]
async fn inbound_completion_is_not_applied_twice() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 5).await;

    let created = state
        .services
        .warehouse
        .create_inbound("E003", inbound_input(vec![movement_item("P1", "W1", 40)]))
        .await
        .unwrap();
    state
        .services
        .warehouse
        .update_inbound_status(&created.order.id, OperateStatus::Completed)
        .await
        .unwrap();
    assert_eq!(stock_of(&state, "P1", "W1").await.map(|s| s.0), Some(45));

    // Re-asserting completed must not add the quantities again.
    state
        .services
        .warehouse
        .update_inbound_status(&created.order.id, OperateStatus::Completed)
        .await
        .unwrap();
    assert_eq!(stock_of(&state, "P1", "W1").await.map(|s| s.0), Some(45));
}

#[tokio::test]
async fn inbound_completed_at_creation_applies_immediately() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let mut input = inbound_input(vec![movement_item("P2", "W2", 12)]);
    input.operate_status = Some(OperateStatus::Completed);
    state.services.warehouse.create_inbound("E003", input).await.unwrap();

    assert_eq!(stock_of(&state, "P2", "W2").await, Some((12, 10)));
}

#[tokio::test]
async fn outbound_completion_decrements_the_named_warehouse() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 15).await;

    let created = state
        .services
        .warehouse
        .create_outbound("E003", outbound_input(vec![movement_item("P1", "W1", 10)]))
        .await
        .unwrap();
    assert_eq!(created.order.id, "OUT202401001");
    assert_eq!(stock_of(&state, "P1", "W1").await.map(|s| s.0), Some(15));

    state
        .services
        .warehouse
        .update_outbound_status(&created.order.id, OperateStatus::Completed)
        .await
        .unwrap();
    assert_eq!(stock_of(&state, "P1", "W1").await.map(|s| s.0), Some(5));
}

#[tokio::test]
async fn outbound_creation_checks_the_named_warehouse_only() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 3).await;
    common::set_stock(&state, "P1", "W2", 50).await;

    // W2 has plenty, but the line names W1.
    let err = state
        .services
        .warehouse
        .create_outbound("E003", outbound_input(vec![movement_item("P1", "W1", 10)]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));
}

#[tokio::test]
async fn movements_require_a_warehouse_employee() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let err = state
        .services
        .warehouse
        .create_inbound("E001", inbound_input(vec![movement_item("P1", "W1", 1)]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));
}

#[tokio::test]
async fn low_stock_alerts_distinguish_empty_from_low() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 0).await;
    common::set_stock(&state, "P2", "W1", 5).await;

    let mut alerts = state.services.warehouse.get_low_stock_alerts().await.unwrap();
    alerts.sort_by(|a, b| a.product_id.cmp(&b.product_id));
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].label, "缺货");
    assert_eq!(alerts[1].label, "库存不足");
}

#[tokio::test]
async fn administrative_overwrite_replaces_quantities() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 7).await;

    let row = state
        .services
        .warehouse
        .update_inventory(
            "P1",
            "W1",
            UpdateInventoryInput {
                current_qty: 100,
                min_qty: Some(20),
            },
        )
        .await
        .unwrap();
    assert_eq!(row.current_qty, 100);
    assert_eq!(row.min_qty, 20);
}

#[tokio::test]
async fn inbound_rejects_unknown_purchase_order() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let mut input = inbound_input(vec![movement_item("P1", "W1", 1)]);
    input.purchase_order_id = Some("PO209912999".into());
    let err = state.services.warehouse.create_inbound("E003", input).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}
