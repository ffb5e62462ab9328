use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{
    customers, employees, inbound_order_items, inbound_orders, inventory, outbound_order_items,
    outbound_orders, products, purchase_orders, sales_orders, warehouses,
};
use crate::errors::ServiceError;
use crate::services::sequence::{next_order_id, OrderKind};
use crate::services::status::OperateStatus;
use crate::services::system_logs::SystemLogService;
use crate::services::{ensure_employee_role, EmployeeRole};

const DEFAULT_MIN_QTY: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovementItemInput {
    #[validate(length(min = 1, max = 32))]
    pub product_id: String,
    #[validate(length(min = 1, max = 32))]
    pub warehouse_id: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub batch_no: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInboundInput {
    pub purchase_order_id: Option<String>,
    pub inbound_date: Option<NaiveDate>,
    pub operate_status: Option<OperateStatus>,
    pub note: Option<String>,
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<MovementItemInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutboundInput {
    pub sales_order_id: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub customer_id: String,
    pub outbound_date: Option<NaiveDate>,
    pub tracking_no: Option<String>,
    pub operate_status: Option<OperateStatus>,
    pub note: Option<String>,
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<MovementItemInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOperateStatusInput {
    pub operate_status: OperateStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryInput {
    pub current_qty: i32,
    pub min_qty: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementItemView {
    pub item_no: i32,
    pub product_id: String,
    pub product_name: Option<String>,
    pub warehouse_id: String,
    pub warehouse_name: Option<String>,
    pub quantity: i32,
    pub batch_no: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundOrderView {
    #[serde(flatten)]
    pub order: inbound_orders::Model,
    pub employee_name: Option<String>,
    pub items: Vec<MovementItemView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundOrderView {
    #[serde(flatten)]
    pub order: outbound_orders::Model,
    pub customer_name: Option<String>,
    pub employee_name: Option<String>,
    pub items: Vec<MovementItemView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    #[serde(flatten)]
    pub row: inventory::Model,
    pub product_name: Option<String>,
    pub warehouse_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub product_id: String,
    pub product_name: Option<String>,
    pub warehouse_id: String,
    pub warehouse_name: Option<String>,
    pub current_qty: i32,
    pub min_qty: i32,
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    pub product_id: Option<String>,
    pub warehouse_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    pub operate_status: Option<OperateStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStock {
    pub warehouse_id: String,
    pub warehouse_name: Option<String>,
    pub sku_count: i64,
    pub total_qty: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub sku_count: u64,
    pub total_qty: i64,
    pub total_value: Decimal,
    pub low_stock_count: u64,
    pub by_warehouse: Vec<WarehouseStock>,
}

/// Service for stock movements and the inventory ledger
#[derive(Clone)]
pub struct WarehouseService {
    db_pool: Arc<DbPool>,
    logs: SystemLogService,
}

impl WarehouseService {
    pub fn new(db_pool: Arc<DbPool>, logs: SystemLogService) -> Self {
        Self { db_pool, logs }
    }

    async fn check_movement_items<C: ConnectionTrait>(
        conn: &C,
        items: &[MovementItemInput],
    ) -> Result<(), ServiceError> {
        if items.is_empty() {
            return Err(ServiceError::BadRequest(
                "Movement must contain at least one item".to_string(),
            ));
        }
        for item in items {
            if item.quantity < 1 {
                return Err(ServiceError::BadRequest(format!(
                    "Quantity for product {} must be positive",
                    item.product_id
                )));
            }
            products::Entity::find_by_id(&item.product_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", item.product_id))
                })?;
            warehouses::Entity::find_by_id(&item.warehouse_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Warehouse {} not found", item.warehouse_id))
                })?;
        }
        Ok(())
    }

    /// Upserts the ledger row for each line: create with the incoming
    /// quantity if absent, else add to the existing quantity.
    async fn apply_increments<C: ConnectionTrait>(
        conn: &C,
        items: &[inbound_order_items::Model],
    ) -> Result<(), ServiceError> {
        for item in items {
            let existing = inventory::Entity::find_by_id((
                item.product_id.clone(),
                item.warehouse_id.clone(),
            ))
            .one(conn)
            .await?;

            match existing {
                Some(row) => {
                    let qty = row.current_qty + item.quantity;
                    let mut active: inventory::ActiveModel = row.into();
                    active.current_qty = Set(qty);
                    active.updated_at = Set(Utc::now());
                    active.update(conn).await?;
                }
                None => {
                    inventory::ActiveModel {
                        product_id: Set(item.product_id.clone()),
                        warehouse_id: Set(item.warehouse_id.clone()),
                        current_qty: Set(item.quantity),
                        min_qty: Set(DEFAULT_MIN_QTY),
                        updated_at: Set(Utc::now()),
                    }
                    .insert(conn)
                    .await?;
                }
            }
        }
        Ok(())
    }

    /// Decrements the ledger unconditionally. No floor at zero: completing
    /// movements out of order can leave a negative quantity, which the
    /// low-stock view surfaces as out of stock.
    async fn apply_decrements<C: ConnectionTrait>(
        conn: &C,
        items: &[outbound_order_items::Model],
    ) -> Result<(), ServiceError> {
        for item in items {
            let existing = inventory::Entity::find_by_id((
                item.product_id.clone(),
                item.warehouse_id.clone(),
            ))
            .one(conn)
            .await?;

            match existing {
                Some(row) => {
                    let qty = row.current_qty - item.quantity;
                    let mut active: inventory::ActiveModel = row.into();
                    active.current_qty = Set(qty);
                    active.updated_at = Set(Utc::now());
                    active.update(conn).await?;
                }
                None => {
                    inventory::ActiveModel {
                        product_id: Set(item.product_id.clone()),
                        warehouse_id: Set(item.warehouse_id.clone()),
                        current_qty: Set(-item.quantity),
                        min_qty: Set(DEFAULT_MIN_QTY),
                        updated_at: Set(Utc::now()),
                    }
                    .insert(conn)
                    .await?;
                }
            }
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create_inbound(
        &self,
        employee_id: &str,
        input: CreateInboundInput,
    ) -> Result<InboundOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        ensure_employee_role(&txn, employee_id, EmployeeRole::Warehouse).await?;

        if let Some(po_id) = input.purchase_order_id.as_deref().filter(|p| !p.is_empty()) {
            purchase_orders::Entity::find_by_id(po_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Purchase order {} not found", po_id))
                })?;
        }
        Self::check_movement_items(&txn, &input.items).await?;

        let inbound_date = input.inbound_date.unwrap_or_else(|| Utc::now().date_naive());
        let status = input.operate_status.unwrap_or(OperateStatus::Processing);
        let order_id = next_order_id(&txn, OrderKind::Inbound, inbound_date).await?;
        let now = Utc::now();

        inbound_orders::ActiveModel {
            id: Set(order_id.clone()),
            purchase_order_id: Set(input.purchase_order_id.clone().filter(|p| !p.is_empty())),
            employee_id: Set(employee_id.to_string()),
            inbound_date: Set(inbound_date),
            operate_status: Set(status.to_string()),
            note: Set(input.note.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let item_models: Vec<inbound_order_items::ActiveModel> = input
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| inbound_order_items::ActiveModel {
                inbound_order_id: Set(order_id.clone()),
                item_no: Set(idx as i32 + 1),
                product_id: Set(item.product_id.clone()),
                warehouse_id: Set(item.warehouse_id.clone()),
                quantity: Set(item.quantity),
                batch_no: Set(item.batch_no.clone()),
                note: Set(item.note.clone()),
            })
            .collect();
        inbound_order_items::Entity::insert_many(item_models).exec(&txn).await?;

        // Completed-at-creation applies the increments immediately.
        if status == OperateStatus::Completed {
            let stored = inbound_order_items::Entity::find()
                .filter(inbound_order_items::Column::InboundOrderId.eq(&order_id))
                .all(&txn)
                .await?;
            Self::apply_increments(&txn, &stored).await?;
        }

        txn.commit().await?;

        self.logs
            .record(
                "info",
                "warehouse",
                "create_inbound",
                format!("Inbound order {} created", order_id),
                Some(employee_id.to_string()),
                None,
            )
            .await;

        self.find_one_inbound(&order_id).await
    }

    /// Increments are applied only when moving into completed from a
    /// non-completed prior status, so repeating the call cannot double-count.
    #[instrument(skip(self))]
    pub async fn update_inbound_status(
        &self,
        id: &str,
        status: OperateStatus,
    ) -> Result<InboundOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = inbound_orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inbound order {} not found", id)))?;

        let previous = OperateStatus::from_str(&order.operate_status).map_err(|_| {
            ServiceError::InternalError(format!(
                "Inbound order {} has unrecognized status {}",
                id, order.operate_status
            ))
        })?;

        if status == OperateStatus::Completed && previous != OperateStatus::Completed {
            let items = inbound_order_items::Entity::find()
                .filter(inbound_order_items::Column::InboundOrderId.eq(id))
                .all(&txn)
                .await?;
            Self::apply_increments(&txn, &items).await?;
        }

        let mut active: inbound_orders::ActiveModel = order.into();
        active.operate_status = Set(status.to_string());
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        self.find_one_inbound(id).await
    }

    #[instrument(skip(self))]
    pub async fn find_all_inbound(
        &self,
        filter: MovementFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<inbound_orders::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = inbound_orders::Entity::find().order_by_desc(inbound_orders::Column::Id);
        if let Some(status) = filter.operate_status {
            query = query.filter(inbound_orders::Column::OperateStatus.eq(status.to_string()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(inbound_orders::Column::InboundDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(inbound_orders::Column::InboundDate.lte(end));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;
        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one_inbound(&self, id: &str) -> Result<InboundOrderView, ServiceError> {
        let db = &*self.db_pool;

        let order = inbound_orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inbound order {} not found", id)))?;

        let employee_name = employees::Entity::find_by_id(&order.employee_id)
            .one(db)
            .await?
            .map(|e| e.name);

        let raw_items = inbound_order_items::Entity::find()
            .filter(inbound_order_items::Column::InboundOrderId.eq(id))
            .order_by_asc(inbound_order_items::Column::ItemNo)
            .all(db)
            .await?;
        let items = self
            .movement_views(
                raw_items
                    .into_iter()
                    .map(|i| {
                        (
                            i.item_no,
                            i.product_id,
                            i.warehouse_id,
                            i.quantity,
                            i.batch_no,
                            i.note,
                        )
                    })
                    .collect(),
            )
            .await?;

        Ok(InboundOrderView {
            order,
            employee_name,
            items,
        })
    }

    async fn movement_views(
        &self,
        raw: Vec<(i32, String, String, i32, Option<String>, Option<String>)>,
    ) -> Result<Vec<MovementItemView>, ServiceError> {
        let db = &*self.db_pool;

        let product_ids: Vec<String> = raw.iter().map(|r| r.1.clone()).collect();
        let warehouse_ids: Vec<String> = raw.iter().map(|r| r.2.clone()).collect();

        let mut product_names = HashMap::new();
        if !product_ids.is_empty() {
            for p in products::Entity::find()
                .filter(products::Column::Id.is_in(product_ids))
                .all(db)
                .await?
            {
                product_names.insert(p.id, p.name);
            }
        }
        let mut warehouse_names = HashMap::new();
        if !warehouse_ids.is_empty() {
            for w in warehouses::Entity::find()
                .filter(warehouses::Column::Id.is_in(warehouse_ids))
                .all(db)
                .await?
            {
                warehouse_names.insert(w.id, w.name);
            }
        }

        Ok(raw
            .into_iter()
            .map(
                |(item_no, product_id, warehouse_id, quantity, batch_no, note)| MovementItemView {
                    item_no,
                    product_name: product_names.get(&product_id).cloned(),
                    product_id,
                    warehouse_name: warehouse_names.get(&warehouse_id).cloned(),
                    warehouse_id,
                    quantity,
                    batch_no,
                    note,
                },
            )
            .collect())
    }

    /// Stock sufficiency is checked against the specific warehouse each
    /// line names, stricter than the sales-order check.
    #[instrument(skip(self, input))]
    pub async fn create_outbound(
        &self,
        employee_id: &str,
        input: CreateOutboundInput,
    ) -> Result<OutboundOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        ensure_employee_role(&txn, employee_id, EmployeeRole::Warehouse).await?;

        customers::Entity::find_by_id(&input.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", input.customer_id))
            })?;
        if let Some(so_id) = input.sales_order_id.as_deref().filter(|s| !s.is_empty()) {
            sales_orders::Entity::find_by_id(so_id)
                .one(&txn)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Sales order {} not found", so_id)))?;
        }
        Self::check_movement_items(&txn, &input.items).await?;

        for item in &input.items {
            let row = inventory::Entity::find_by_id((
                item.product_id.clone(),
                item.warehouse_id.clone(),
            ))
            .one(&txn)
            .await?;
            let available = row.map(|r| r.current_qty).unwrap_or(0);
            if available < item.quantity {
                return Err(ServiceError::InsufficientStock(format!(
                    "Warehouse {} holds {} units of product {}, requested {}",
                    item.warehouse_id, available, item.product_id, item.quantity
                )));
            }
        }

        let outbound_date = input.outbound_date.unwrap_or_else(|| Utc::now().date_naive());
        let status = input.operate_status.unwrap_or(OperateStatus::Processing);
        let order_id = next_order_id(&txn, OrderKind::Outbound, outbound_date).await?;
        let now = Utc::now();

        outbound_orders::ActiveModel {
            id: Set(order_id.clone()),
            sales_order_id: Set(input.sales_order_id.clone().filter(|s| !s.is_empty())),
            customer_id: Set(input.customer_id.clone()),
            employee_id: Set(employee_id.to_string()),
            outbound_date: Set(outbound_date),
            tracking_no: Set(input.tracking_no.clone()),
            operate_status: Set(status.to_string()),
            note: Set(input.note.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let item_models: Vec<outbound_order_items::ActiveModel> = input
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| outbound_order_items::ActiveModel {
                outbound_order_id: Set(order_id.clone()),
                item_no: Set(idx as i32 + 1),
                product_id: Set(item.product_id.clone()),
                warehouse_id: Set(item.warehouse_id.clone()),
                quantity: Set(item.quantity),
                note: Set(item.note.clone()),
            })
            .collect();
        outbound_order_items::Entity::insert_many(item_models).exec(&txn).await?;

        if status == OperateStatus::Completed {
            let stored = outbound_order_items::Entity::find()
                .filter(outbound_order_items::Column::OutboundOrderId.eq(&order_id))
                .all(&txn)
                .await?;
            Self::apply_decrements(&txn, &stored).await?;
        }

        txn.commit().await?;

        self.logs
            .record(
                "info",
                "warehouse",
                "create_outbound",
                format!("Outbound order {} created", order_id),
                Some(employee_id.to_string()),
                None,
            )
            .await;

        self.find_one_outbound(&order_id).await
    }

    #[instrument(skip(self))]
    pub async fn update_outbound_status(
        &self,
        id: &str,
        status: OperateStatus,
    ) -> Result<OutboundOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = outbound_orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outbound order {} not found", id)))?;

        let previous = OperateStatus::from_str(&order.operate_status).map_err(|_| {
            ServiceError::InternalError(format!(
                "Outbound order {} has unrecognized status {}",
                id, order.operate_status
            ))
        })?;

        if status == OperateStatus::Completed && previous != OperateStatus::Completed {
            let items = outbound_order_items::Entity::find()
                .filter(outbound_order_items::Column::OutboundOrderId.eq(id))
                .all(&txn)
                .await?;
            Self::apply_decrements(&txn, &items).await?;
        }

        let mut active: outbound_orders::ActiveModel = order.into();
        active.operate_status = Set(status.to_string());
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        self.find_one_outbound(id).await
    }

    #[instrument(skip(self))]
    pub async fn find_all_outbound(
        &self,
        filter: MovementFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<outbound_orders::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query =
            outbound_orders::Entity::find().order_by_desc(outbound_orders::Column::Id);
        if let Some(status) = filter.operate_status {
            query = query.filter(outbound_orders::Column::OperateStatus.eq(status.to_string()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(outbound_orders::Column::OutboundDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(outbound_orders::Column::OutboundDate.lte(end));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;
        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one_outbound(&self, id: &str) -> Result<OutboundOrderView, ServiceError> {
        let db = &*self.db_pool;

        let order = outbound_orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outbound order {} not found", id)))?;

        let customer_name = customers::Entity::find_by_id(&order.customer_id)
            .one(db)
            .await?
            .map(|c| c.name);
        let employee_name = employees::Entity::find_by_id(&order.employee_id)
            .one(db)
            .await?
            .map(|e| e.name);

        let raw_items = outbound_order_items::Entity::find()
            .filter(outbound_order_items::Column::OutboundOrderId.eq(id))
            .order_by_asc(outbound_order_items::Column::ItemNo)
            .all(db)
            .await?;
        let items = self
            .movement_views(
                raw_items
                    .into_iter()
                    .map(|i| (i.item_no, i.product_id, i.warehouse_id, i.quantity, None, i.note))
                    .collect(),
            )
            .await?;

        Ok(OutboundOrderView {
            order,
            customer_name,
            employee_name,
            items,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_inventory(
        &self,
        filter: InventoryFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<InventoryView>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = inventory::Entity::find()
            .order_by_asc(inventory::Column::ProductId)
            .order_by_asc(inventory::Column::WarehouseId);
        if let Some(product) = filter.product_id.filter(|p| !p.is_empty()) {
            query = query.filter(inventory::Column::ProductId.eq(product));
        }
        if let Some(warehouse) = filter.warehouse_id.filter(|w| !w.is_empty()) {
            query = query.filter(inventory::Column::WarehouseId.eq(warehouse));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.max(1) - 1).await?;

        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let product_name = products::Entity::find_by_id(&row.product_id)
                .one(db)
                .await?
                .map(|p| p.name);
            let warehouse_name = warehouses::Entity::find_by_id(&row.warehouse_id)
                .one(db)
                .await?
                .map(|w| w.name);
            data.push(InventoryView {
                row,
                product_name,
                warehouse_name,
            });
        }

        Ok((data, total))
    }

    /// Every ledger row at or below its minimum threshold, labeled
    /// "缺货" when nothing is left and "库存不足" otherwise.
    #[instrument(skip(self))]
    pub async fn get_low_stock_alerts(&self) -> Result<Vec<LowStockAlert>, ServiceError> {
        let db = &*self.db_pool;

        let rows = inventory::Entity::find()
            .filter(
                Expr::col(inventory::Column::CurrentQty)
                    .lte(Expr::col(inventory::Column::MinQty)),
            )
            .order_by_asc(inventory::Column::CurrentQty)
            .all(db)
            .await?;

        let mut alerts = Vec::with_capacity(rows.len());
        for row in rows {
            let product_name = products::Entity::find_by_id(&row.product_id)
                .one(db)
                .await?
                .map(|p| p.name);
            let warehouse_name = warehouses::Entity::find_by_id(&row.warehouse_id)
                .one(db)
                .await?
                .map(|w| w.name);
            let label = if row.current_qty <= 0 { "缺货" } else { "库存不足" };
            alerts.push(LowStockAlert {
                product_id: row.product_id,
                product_name,
                warehouse_id: row.warehouse_id,
                warehouse_name,
                current_qty: row.current_qty,
                min_qty: row.min_qty,
                label: label.to_string(),
            });
        }

        Ok(alerts)
    }

    /// Administrative overwrite of a ledger row, bypassing movement
    /// bookkeeping entirely.
    #[instrument(skip(self))]
    pub async fn update_inventory(
        &self,
        product_id: &str,
        warehouse_id: &str,
        input: UpdateInventoryInput,
    ) -> Result<inventory::Model, ServiceError> {
        let db = &*self.db_pool;

        products::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;
        warehouses::Entity::find_by_id(warehouse_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Warehouse {} not found", warehouse_id))
            })?;

        let existing = inventory::Entity::find_by_id((
            product_id.to_string(),
            warehouse_id.to_string(),
        ))
        .one(db)
        .await?;

        let model = match existing {
            Some(row) => {
                let mut active: inventory::ActiveModel = row.into();
                active.current_qty = Set(input.current_qty);
                if let Some(min) = input.min_qty {
                    active.min_qty = Set(min);
                }
                active.updated_at = Set(Utc::now());
                active.update(db).await?
            }
            None => {
                inventory::ActiveModel {
                    product_id: Set(product_id.to_string()),
                    warehouse_id: Set(warehouse_id.to_string()),
                    current_qty: Set(input.current_qty),
                    min_qty: Set(input.min_qty.unwrap_or(DEFAULT_MIN_QTY)),
                    updated_at: Set(Utc::now()),
                }
                .insert(db)
                .await?
            }
        };

        self.logs
            .record(
                "warn",
                "warehouse",
                "update_inventory",
                format!(
                    "Inventory for product {} in warehouse {} overwritten to {}",
                    product_id, warehouse_id, input.current_qty
                ),
                None,
                None,
            )
            .await;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn inventory_stats(&self) -> Result<InventoryStats, ServiceError> {
        let db = &*self.db_pool;

        let rows = inventory::Entity::find().all(db).await?;
        let sku_count = rows.len() as u64;
        let total_qty: i64 = rows.iter().map(|r| i64::from(r.current_qty)).sum();
        let low_stock_count =
            rows.iter().filter(|r| r.current_qty <= r.min_qty).count() as u64;

        let mut cost_prices = HashMap::new();
        let product_ids: Vec<String> = rows.iter().map(|r| r.product_id.clone()).collect();
        if !product_ids.is_empty() {
            for p in products::Entity::find()
                .filter(products::Column::Id.is_in(product_ids))
                .all(db)
                .await?
            {
                cost_prices.insert(p.id, p.cost_price);
            }
        }
        let total_value = rows
            .iter()
            .map(|r| {
                Decimal::from(r.current_qty)
                    * cost_prices.get(&r.product_id).copied().unwrap_or_default()
            })
            .sum::<Decimal>();

        let mut per_warehouse: HashMap<String, (i64, i64)> = HashMap::new();
        for row in &rows {
            let entry = per_warehouse.entry(row.warehouse_id.clone()).or_default();
            entry.0 += 1;
            entry.1 += i64::from(row.current_qty);
        }

        let mut by_warehouse = Vec::with_capacity(per_warehouse.len());
        for (warehouse_id, (sku, qty)) in per_warehouse {
            let warehouse_name = warehouses::Entity::find_by_id(&warehouse_id)
                .one(db)
                .await?
                .map(|w| w.name);
            by_warehouse.push(WarehouseStock {
                warehouse_id,
                warehouse_name,
                sku_count: sku,
                total_qty: qty,
            });
        }
        by_warehouse.sort_by(|a, b| a.warehouse_id.cmp(&b.warehouse_id));

        Ok(InventoryStats {
            sku_count,
            total_qty,
            total_value,
            low_stock_count,
            by_warehouse,
        })
    }
}
