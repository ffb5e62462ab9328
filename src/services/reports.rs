use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use tracing::instrument;

use crate::db::DbPool;
use crate::entities::{
    customers, inventory, outbound_orders, products, purchase_orders, sales_orders, suppliers,
};
use crate::errors::ServiceError;
use crate::services::status::{OperateStatus, PurchaseOrderStatus, SalesOrderStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub product_count: u64,
    pub customer_count: u64,
    pub supplier_count: u64,
    pub pending_purchase_orders: u64,
    pub pending_sales_orders: u64,
    pub processing_outbound_orders: u64,
    pub low_stock_count: u64,
    pub month_purchase_amount: Decimal,
    pub month_sales_amount: Decimal,
}

/// Cross-module dashboard rollups. Pure read-side, recomputed per call.
#[derive(Clone)]
pub struct ReportsService {
    db_pool: Arc<DbPool>,
}

impl ReportsService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Snapshot counters for the landing dashboard. Month amounts cover
    /// the calendar month containing `today`.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, today: NaiveDate) -> Result<Dashboard, ServiceError> {
        let db = &*self.db_pool;

        let product_count = products::Entity::find().count(db).await?;
        let customer_count = customers::Entity::find().count(db).await?;
        let supplier_count = suppliers::Entity::find().count(db).await?;

        let pending_purchase_orders = purchase_orders::Entity::find()
            .filter(
                purchase_orders::Column::OrderStatus
                    .eq(PurchaseOrderStatus::Pending.to_string()),
            )
            .count(db)
            .await?;
        let pending_sales_orders = sales_orders::Entity::find()
            .filter(sales_orders::Column::OrderStatus.eq(SalesOrderStatus::Pending.to_string()))
            .count(db)
            .await?;
        let processing_outbound_orders = outbound_orders::Entity::find()
            .filter(
                outbound_orders::Column::OperateStatus
                    .eq(OperateStatus::Processing.to_string()),
            )
            .count(db)
            .await?;

        let low_stock_count = inventory::Entity::find()
            .all(db)
            .await?
            .iter()
            .filter(|r| r.current_qty <= r.min_qty)
            .count() as u64;

        let month_start = today.with_day(1).unwrap_or(today);
        let month_purchase_amount = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::OrderDate.gte(month_start))
            .filter(purchase_orders::Column::OrderDate.lte(today))
            .all(db)
            .await?
            .iter()
            .map(|o| o.total_amount)
            .sum();
        let month_sales_amount = sales_orders::Entity::find()
            .filter(sales_orders::Column::OrderDate.gte(month_start))
            .filter(sales_orders::Column::OrderDate.lte(today))
            .all(db)
            .await?
            .iter()
            .map(|o| o.total_amount)
            .sum();

        Ok(Dashboard {
            product_count,
            customer_count,
            supplier_count,
            pending_purchase_orders,
            pending_sales_orders,
            processing_outbound_orders,
            low_stock_count,
            month_purchase_amount,
            month_sales_amount,
        })
    }
}
