mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use ttfashion_api::services::purchase::{CreatePurchaseOrderInput, OrderItemInput};
use ttfashion_api::services::sales::CreateSalesOrderInput;
use ttfashion_api::services::status::SalesOrderStatus;

fn item(product_id: &str, quantity: i32, unit_price: rust_decimal::Decimal) -> OrderItemInput {
    OrderItemInput {
        product_id: product_id.into(),
        quantity,
        unit_price,
        note: None,
    }
}

async fn seed_orders(state: &ttfashion_api::AppState) {
    // Two purchase orders for S0001: 3*19.99 = 59.97 and 2*30.00 = 60.00.
    for items in [
        vec![item("P1", 3, dec!(19.99))],
        vec![item("P2", 2, dec!(30.00))],
    ] {
        state
            .services
            .purchase
            .create(
                "E001",
                CreatePurchaseOrderInput {
                    supplier_id: "S0001".into(),
                    order_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                    expect_date: None,
                    note: None,
                    items,
                },
            )
            .await
            .unwrap();
    }

    // One sales order for C0001: 2*59.90 = 119.80.
    common::set_stock(state, "P1", "W1", 50).await;
    state
        .services
        .sales
        .create(
            "E002",
            CreateSalesOrderInput {
                customer_id: "C0001".into(),
                order_date: NaiveDate::from_ymd_opt(2024, 1, 20),
                expect_date: None,
                note: None,
                items: vec![item("P1", 2, dec!(59.90))],
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn purchase_stats_aggregate_by_status_supplier_and_employee() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    seed_orders(&state).await;

    let stats = state.services.purchase.stats().await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_amount, dec!(119.97));

    assert_eq!(stats.by_status.len(), 1);
    assert_eq!(stats.by_status[0].order_status, "pending");
    assert_eq!(stats.by_status[0].count, 2);
    assert_eq!(stats.by_status[0].amount, Some(dec!(119.97)));

    assert_eq!(stats.top_suppliers.len(), 1);
    assert_eq!(stats.top_suppliers[0].supplier_id, "S0001");
    assert_eq!(stats.top_suppliers[0].supplier_name.as_deref(), Some("江南纺织"));
    assert_eq!(stats.top_suppliers[0].amount, dec!(119.97));

    assert_eq!(stats.by_employee.len(), 1);
    assert_eq!(stats.by_employee[0].employee_id, "E001");
    assert_eq!(stats.by_employee[0].employee_name.as_deref(), Some("采购员一号"));
    assert_eq!(stats.by_employee[0].count, 2);
    assert_eq!(stats.by_employee[0].amount, dec!(119.97));
}

#[tokio::test]
async fn sales_stats_aggregate_by_customer_employee_and_product() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    seed_orders(&state).await;

    let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let stats = state.services.sales.stats(today).await.unwrap();
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.total_amount, dec!(119.80));

    assert_eq!(stats.by_customer.len(), 1);
    assert_eq!(stats.by_customer[0].customer_id, "C0001");
    assert_eq!(stats.by_customer[0].customer_name.as_deref(), Some("华东商贸"));
    assert_eq!(stats.by_customer[0].count, 1);
    assert_eq!(stats.by_customer[0].amount, dec!(119.80));

    assert_eq!(stats.by_employee.len(), 1);
    assert_eq!(stats.by_employee[0].employee_id, "E002");
    assert_eq!(stats.by_employee[0].employee_name.as_deref(), Some("销售员一号"));
    assert_eq!(stats.by_employee[0].amount, dec!(119.80));

    assert_eq!(stats.top_products.len(), 1);
    assert_eq!(stats.top_products[0].product_id, "P1");
    assert_eq!(stats.top_products[0].quantity, 2);
    assert_eq!(stats.top_products[0].amount, dec!(119.80));

    // Twelve buckets ending with the month of `today`; all activity
    // lands in the last one.
    assert_eq!(stats.monthly_trend.len(), 12);
    let last = stats.monthly_trend.last().unwrap();
    assert_eq!(last.month, "2024-01");
    assert_eq!(last.count, 1);
    assert_eq!(last.amount, dec!(119.80));
    assert!(stats.monthly_trend[..11].iter().all(|m| m.count == 0));
}

#[tokio::test]
async fn inventory_stats_value_stock_at_cost() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    common::set_stock(&state, "P1", "W1", 30).await;
    common::set_stock(&state, "P2", "W2", 20).await;

    let stats = state.services.warehouse.inventory_stats().await.unwrap();
    assert_eq!(stats.sku_count, 2);
    assert_eq!(stats.total_qty, 50);
    // 50 units at cost 30.00 each
    assert_eq!(stats.total_value, dec!(1500.00));
    assert_eq!(stats.low_stock_count, 0);

    assert_eq!(stats.by_warehouse.len(), 2);
    assert_eq!(stats.by_warehouse[0].warehouse_id, "W1");
    assert_eq!(stats.by_warehouse[0].total_qty, 30);
    assert_eq!(stats.by_warehouse[1].warehouse_id, "W2");
    assert_eq!(stats.by_warehouse[1].total_qty, 20);
}

#[tokio::test]
async fn dashboard_counts_pending_work_and_month_amounts() {
    let state = common::setup().await;
    common::seed_base(&state).await;
    seed_orders(&state).await;

    // One sales order moves out of pending.
    state
        .services
        .sales
        .update_status("SO202401001", SalesOrderStatus::Confirmed)
        .await
        .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let dashboard = state.services.reports.dashboard(today).await.unwrap();

    assert_eq!(dashboard.product_count, 2);
    assert_eq!(dashboard.customer_count, 1);
    assert_eq!(dashboard.supplier_count, 1);
    assert_eq!(dashboard.pending_purchase_orders, 2);
    assert_eq!(dashboard.pending_sales_orders, 0);
    assert_eq!(dashboard.processing_outbound_orders, 0);
    // P1 at 50 is healthy; P2 has no ledger row at all.
    assert_eq!(dashboard.low_stock_count, 0);
    assert_eq!(dashboard.month_purchase_amount, dec!(119.97));
    assert_eq!(dashboard.month_sales_amount, dec!(119.80));
}
