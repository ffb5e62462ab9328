mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use ttfashion_api::errors::ServiceError;
use ttfashion_api::services::purchase::OrderItemInput;
use ttfashion_api::services::sales::{CreateSalesOrderInput, UpdateSalesOrderInput};
use ttfashion_api::services::status::SalesOrderStatus;
use ttfashion_api::services::warehouse::{CreateOutboundInput, MovementItemInput};

fn order_input(items: Vec<OrderItemInput>) -> CreateSalesOrderInput {
    CreateSalesOrderInput {
        customer_id: "C0001".into(),
        order_date: NaiveDate::from_ymd_opt(2024, 1, 20),
        expect_date: None,
        note: None,
        items,
    }
}

fn item(product_id: &str, quantity: i32, unit_price: rust_decimal::Decimal) -> OrderItemInput {
    OrderItemInput {
        product_id: product_id.into(),
        quantity,
        unit_price,
        note: None,
    }
}

#[tokio::test]
async fn create_requires_on_hand_stock() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 10).await;

    // Exactly the available quantity is enough.
    let view = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 10, dec!(59.90))]))
        .await
        .unwrap();
    assert_eq!(view.order.id, "SO202401001");
    assert_eq!(view.order.total_amount, dec!(599.00));

    // One more than any single warehouse holds is rejected.
    let err = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 11, dec!(59.90))]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));
}

#[tokio::test]
async fn stock_is_not_pooled_across_warehouses() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 5).await;
    common::set_stock(&state, "P1", "W2", 5).await;

    // 10 units exist in total but no single warehouse can cover 8.
    let err = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 8, dec!(59.90))]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));
}

#[tokio::test]
async fn create_rejects_non_sales_employee() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 10).await;

    let err = state
        .services
        .sales
        .create("E001", order_input(vec![item("P1", 1, dec!(59.90))]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));
}

#[tokio::test]
async fn status_follows_the_transition_graph() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 10).await;

    let created = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 2, dec!(59.90))]))
        .await
        .unwrap();
    let id = created.order.id.clone();

    // pending cannot jump straight to shipped
    let err = state
        .services
        .sales
        .update_status(&id, SalesOrderStatus::Shipped)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    for next in [
        SalesOrderStatus::Confirmed,
        SalesOrderStatus::Shipped,
        SalesOrderStatus::Completed,
    ] {
        let view = state.services.sales.update_status(&id, next).await.unwrap();
        assert_eq!(view.order.order_status, next.to_string());
    }

    // completed is terminal
    let err = state
        .services
        .sales
        .update_status(&id, SalesOrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn cancelled_orders_cannot_be_revived() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 10).await;

    let created = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 1, dec!(59.90))]))
        .await
        .unwrap();
    state
        .services
        .sales
        .update_status(&created.order.id, SalesOrderStatus::Cancelled)
        .await
        .unwrap();

    let err = state
        .services
        .sales
        .update_status(&created.order.id, SalesOrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn edits_are_pending_only() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 10).await;

    let created = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 1, dec!(59.90))]))
        .await
        .unwrap();
    state
        .services
        .sales
        .update_status(&created.order.id, SalesOrderStatus::Confirmed)
        .await
        .unwrap();

    let err = state
        .services
        .sales
        .update(
            &created.order.id,
            UpdateSalesOrderInput {
                customer_id: None,
                expect_date: None,
                note: Some("too late".into()),
                items: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn delete_is_refused_while_outbound_orders_reference_it() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 20).await;

    let created = state
        .services
        .sales
        .create("E002", order_input(vec![item("P1", 5, dec!(59.90))]))
        .await
        .unwrap();

    state
        .services
        .warehouse
        .create_outbound(
            "E003",
            CreateOutboundInput {
                sales_order_id: Some(created.order.id.clone()),
                customer_id: "C0001".into(),
                outbound_date: NaiveDate::from_ymd_opt(2024, 1, 21),
                tracking_no: None,
                operate_status: None,
                note: None,
                items: vec![MovementItemInput {
                    product_id: "P1".into(),
                    warehouse_id: "W1".into(),
                    quantity: 5,
                    batch_no: None,
                    note: None,
                }],
            },
        )
        .await
        .unwrap();

    let err = state.services.sales.remove(&created.order.id).await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}
