mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use ttfashion_api::errors::ServiceError;
use ttfashion_api::services::purchase::{
    CreatePurchaseOrderInput, OrderItemInput, PurchaseOrderFilter, UpdatePurchaseOrderInput,
};
use ttfashion_api::services::status::PurchaseOrderStatus;
use ttfashion_api::services::warehouse::{CreateInboundInput, MovementItemInput};

fn order_input(items: Vec<OrderItemInput>) -> CreatePurchaseOrderInput {
    CreatePurchaseOrderInput {
        supplier_id: "S0001".into(),
        order_date: NaiveDate::from_ymd_opt(2024, 1, 15),
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
async fn create_computes_total_and_dense_item_numbers() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let view = state
        .services
        .purchase
        .create(
            "E001",
            order_input(vec![item("P1", 3, dec!(19.99)), item("P2", 2, dec!(45.50))]),
        )
        .await
        .unwrap();

    // 3 * 19.99 + 2 * 45.50, exact
    assert_eq!(view.order.total_amount, dec!(150.97));
    assert_eq!(view.order.order_status, "pending");
    let numbers: Vec<i32> = view.items.iter().map(|i| i.item_no).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn order_ids_are_sequential_within_a_month() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let first = state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 1, dec!(10.00))]))
        .await
        .unwrap();
    let second = state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 1, dec!(10.00))]))
        .await
        .unwrap();

    assert_eq!(first.order.id, "PO202401001");
    assert_eq!(second.order.id, "PO202401002");
}

#[tokio::test]
async fn create_records_supplier_product_price() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 5, dec!(27.80))]))
        .await
        .unwrap();

    let associations = state.services.suppliers.find_products("S0001").await.unwrap();
    assert_eq!(associations.len(), 1);
    assert_eq!(associations[0].association.last_price, dec!(27.80));

    // A later order overwrites the negotiated price.
    state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 2, dec!(26.00))]))
        .await
        .unwrap();
    let associations = state.services.suppliers.find_products("S0001").await.unwrap();
    assert_eq!(associations[0].association.last_price, dec!(26.00));
}

#[tokio::test]
async fn create_rejects_wrong_employee_role_and_missing_references() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    // E002 is a sales employee
    let err = state
        .services
        .purchase
        .create("E002", order_input(vec![item("P1", 1, dec!(10.00))]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::BadRequest(_));

    let err = state
        .services
        .purchase
        .create("E001", order_input(vec![item("NOPE", 1, dec!(10.00))]))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let mut input = order_input(vec![item("P1", 1, dec!(10.00))]);
    input.supplier_id = "GHOST".into();
    let err = state.services.purchase.create("E001", input).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn item_replacement_reassigns_numbers_and_recomputes_total() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let created = state
        .services
        .purchase
        .create(
            "E001",
            order_input(vec![item("P1", 1, dec!(10.00)), item("P2", 1, dec!(20.00))]),
        )
        .await
        .unwrap();

    let updated = state
        .services
        .purchase
        .update(
            &created.order.id,
            UpdatePurchaseOrderInput {
                supplier_id: None,
                expect_date: None,
                note: None,
                items: Some(vec![item("P2", 4, dec!(21.25))]),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].item_no, 1);
    assert_eq!(updated.order.total_amount, dec!(85.00));
}

#[tokio::test]
async fn edits_are_refused_once_confirmed() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let created = state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 1, dec!(10.00))]))
        .await
        .unwrap();
    state
        .services
        .purchase
        .update_status(&created.order.id, PurchaseOrderStatus::Confirmed)
        .await
        .unwrap();

    let err = state
        .services
        .purchase
        .update(
            &created.order.id,
            UpdatePurchaseOrderInput {
                supplier_id: None,
                expect_date: None,
                note: Some("late edit".into()),
                items: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn status_overwrite_is_unrestricted() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let created = state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 1, dec!(10.00))]))
        .await
        .unwrap();

    // No transition graph on purchase orders: completed back to pending is
    // accepted as-is.
    let view = state
        .services
        .purchase
        .update_status(&created.order.id, PurchaseOrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(view.order.order_status, "completed");
    let view = state
        .services
        .purchase
        .update_status(&created.order.id, PurchaseOrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(view.order.order_status, "pending");
}

#[tokio::test]
async fn delete_confirmed_order_fails_and_leaves_order_intact() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let created = state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 2, dec!(15.00))]))
        .await
        .unwrap();
    state
        .services
        .purchase
        .update_status(&created.order.id, PurchaseOrderStatus::Confirmed)
        .await
        .unwrap();

    let err = state.services.purchase.remove(&created.order.id).await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));

    let survivor = state.services.purchase.find_one(&created.order.id).await.unwrap();
    assert_eq!(survivor.order.order_status, "confirmed");
    assert_eq!(survivor.order.total_amount, dec!(30.00));
    assert_eq!(survivor.items.len(), 1);
}

#[tokio::test]
async fn delete_is_refused_while_inbound_orders_reference_it() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    let created = state
        .services
        .purchase
        .create("E001", order_input(vec![item("P1", 2, dec!(15.00))]))
        .await
        .unwrap();

    state
        .services
        .warehouse
        .create_inbound(
            "E003",
            CreateInboundInput {
                purchase_order_id: Some(created.order.id.clone()),
                inbound_date: NaiveDate::from_ymd_opt(2024, 1, 16),
                operate_status: None,
                note: None,
                items: vec![MovementItemInput {
                    product_id: "P1".into(),
                    warehouse_id: "W1".into(),
                    quantity: 2,
                    batch_no: None,
                    note: None,
                }],
            },
        )
        .await
        .unwrap();

    let err = state.services.purchase.remove(&created.order.id).await.unwrap_err();
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn list_filters_by_status_and_paginates() {
    let state = common::setup().await;
    common::seed_base(&state).await;

    for _ in 0..3 {
        state
            .services
            .purchase
            .create("E001", order_input(vec![item("P1", 1, dec!(10.00))]))
            .await
            .unwrap();
    }
    let (page, total) = state
        .services
        .purchase
        .find_all(
            PurchaseOrderFilter {
                order_status: Some(PurchaseOrderStatus::Pending),
                ..Default::default()
            },
            1,
            2,
        )
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].supplier_name.as_deref(), Some("江南纺织"));
}
