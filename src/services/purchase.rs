use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{
    employees, inbound_orders, products, purchase_order_items, purchase_orders, supplier_products,
    suppliers,
};
use crate::errors::ServiceError;
use crate::services::sequence::{next_order_id, OrderKind};
use crate::services::status::PurchaseOrderStatus;
use crate::services::system_logs::SystemLogService;
use crate::services::{ensure_employee_role, EmployeeRole};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[validate(length(min = 1, max = 32))]
    pub product_id: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub unit_price: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseOrderInput {
    #[validate(length(min = 1, max = 32))]
    pub supplier_id: String,
    pub order_date: Option<NaiveDate>,
    pub expect_date: Option<NaiveDate>,
    pub note: Option<String>,
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseOrderInput {
    pub supplier_id: Option<String>,
    pub expect_date: Option<NaiveDate>,
    pub note: Option<String>,
    #[validate]
    pub items: Option<Vec<OrderItemInput>>,
}

/// Typed at the schema boundary so an unknown status string is rejected
/// before it reaches the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseStatusInput {
    pub order_status: PurchaseOrderStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub item_no: i32,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderView {
    #[serde(flatten)]
    pub order: purchase_orders::Model,
    pub supplier_name: Option<String>,
    pub employee_name: Option<String>,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderSummary {
    #[serde(flatten)]
    pub order: purchase_orders::Model,
    pub supplier_name: Option<String>,
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderFilter {
    pub supplier_id: Option<String>,
    pub order_status: Option<PurchaseOrderStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub order_status: String,
    pub count: i64,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSpend {
    pub supplier_id: String,
    pub supplier_name: Option<String>,
    pub count: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSpend {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub count: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseStats {
    pub total_orders: u64,
    pub total_amount: Decimal,
    pub by_status: Vec<StatusBreakdown>,
    pub top_suppliers: Vec<SupplierSpend>,
    pub by_employee: Vec<EmployeeSpend>,
}

/// Service for the purchase order workflow
#[derive(Clone)]
pub struct PurchaseService {
    db_pool: Arc<DbPool>,
    logs: SystemLogService,
}

impl PurchaseService {
    pub fn new(db_pool: Arc<DbPool>, logs: SystemLogService) -> Self {
        Self { db_pool, logs }
    }

    async fn check_items<C: ConnectionTrait>(
        conn: &C,
        items: &[OrderItemInput],
    ) -> Result<Decimal, ServiceError> {
        if items.is_empty() {
            return Err(ServiceError::BadRequest(
                "Order must contain at least one item".to_string(),
            ));
        }

        let mut total = Decimal::ZERO;
        for item in items {
            if item.quantity < 1 {
                return Err(ServiceError::BadRequest(format!(
                    "Quantity for product {} must be positive",
                    item.product_id
                )));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(ServiceError::BadRequest(format!(
                    "Unit price for product {} must not be negative",
                    item.product_id
                )));
            }
            products::Entity::find_by_id(&item.product_id)
                .one(conn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Product {} not found", item.product_id))
                })?;
            total += Decimal::from(item.quantity) * item.unit_price;
        }
        Ok(total)
    }

    /// Records the supplier's latest negotiated unit price per product.
    async fn upsert_supplier_prices<C: ConnectionTrait>(
        conn: &C,
        supplier_id: &str,
        items: &[OrderItemInput],
    ) -> Result<(), ServiceError> {
        for item in items {
            let existing = supplier_products::Entity::find_by_id((
                supplier_id.to_string(),
                item.product_id.clone(),
            ))
            .one(conn)
            .await?;

            match existing {
                Some(row) => {
                    let mut active: supplier_products::ActiveModel = row.into();
                    active.last_price = Set(item.unit_price);
                    active.updated_at = Set(Utc::now());
                    active.update(conn).await?;
                }
                None => {
                    supplier_products::ActiveModel {
                        supplier_id: Set(supplier_id.to_string()),
                        product_id: Set(item.product_id.clone()),
                        last_price: Set(item.unit_price),
                        supply_status: Set("active".to_string()),
                        updated_at: Set(Utc::now()),
                    }
                    .insert(conn)
                    .await?;
                }
            }
        }
        Ok(())
    }

    fn item_models(
        order_id: &str,
        items: &[OrderItemInput],
    ) -> Vec<purchase_order_items::ActiveModel> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| purchase_order_items::ActiveModel {
                purchase_order_id: Set(order_id.to_string()),
                item_no: Set(idx as i32 + 1),
                product_id: Set(item.product_id.clone()),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                note: Set(item.note.clone()),
            })
            .collect()
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        employee_id: &str,
        input: CreatePurchaseOrderInput,
    ) -> Result<PurchaseOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        suppliers::Entity::find_by_id(&input.supplier_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Supplier {} not found", input.supplier_id))
            })?;
        ensure_employee_role(&txn, employee_id, EmployeeRole::Purchase).await?;

        let total = Self::check_items(&txn, &input.items).await?;
        let order_date = input.order_date.unwrap_or_else(|| Utc::now().date_naive());
        let order_id = next_order_id(&txn, OrderKind::Purchase, order_date).await?;
        let now = Utc::now();

        purchase_orders::ActiveModel {
            id: Set(order_id.clone()),
            supplier_id: Set(input.supplier_id.clone()),
            employee_id: Set(employee_id.to_string()),
            order_date: Set(order_date),
            expect_date: Set(input.expect_date),
            order_status: Set(PurchaseOrderStatus::Pending.to_string()),
            total_amount: Set(total),
            note: Set(input.note.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        purchase_order_items::Entity::insert_many(Self::item_models(&order_id, &input.items))
            .exec(&txn)
            .await?;
        Self::upsert_supplier_prices(&txn, &input.supplier_id, &input.items).await?;

        txn.commit().await?;

        self.logs
            .record(
                "info",
                "purchase",
                "create",
                format!("Purchase order {} created", order_id),
                Some(employee_id.to_string()),
                None,
            )
            .await;

        self.find_one(&order_id).await
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        filter: PurchaseOrderFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<PurchaseOrderSummary>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query =
            purchase_orders::Entity::find().order_by_desc(purchase_orders::Column::Id);
        if let Some(supplier) = filter.supplier_id.filter(|s| !s.is_empty()) {
            query = query.filter(purchase_orders::Column::SupplierId.eq(supplier));
        }
        if let Some(status) = filter.order_status {
            query = query.filter(purchase_orders::Column::OrderStatus.eq(status.to_string()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(purchase_orders::Column::OrderDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(purchase_orders::Column::OrderDate.lte(end));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.max(1) - 1).await?;

        let supplier_names = Self::load_supplier_names(
            db,
            orders.iter().map(|o| o.supplier_id.clone()).collect(),
        )
        .await?;
        let employee_names = Self::load_employee_names(
            db,
            orders.iter().map(|o| o.employee_id.clone()).collect(),
        )
        .await?;

        let data = orders
            .into_iter()
            .map(|order| {
                let supplier_name = supplier_names.get(&order.supplier_id).cloned();
                let employee_name = employee_names.get(&order.employee_id).cloned();
                PurchaseOrderSummary {
                    order,
                    supplier_name,
                    employee_name,
                }
            })
            .collect();

        Ok((data, total))
    }

    async fn load_supplier_names(
        db: &DbPool,
        ids: Vec<String>,
    ) -> Result<HashMap<String, String>, ServiceError> {
        let mut names = HashMap::new();
        if ids.is_empty() {
            return Ok(names);
        }
        let rows = suppliers::Entity::find()
            .filter(suppliers::Column::Id.is_in(ids))
            .all(db)
            .await?;
        for row in rows {
            names.insert(row.id, row.name);
        }
        Ok(names)
    }

    async fn load_employee_names(
        db: &DbPool,
        ids: Vec<String>,
    ) -> Result<HashMap<String, String>, ServiceError> {
        let mut names = HashMap::new();
        if ids.is_empty() {
            return Ok(names);
        }
        let rows = employees::Entity::find()
            .filter(employees::Column::Id.is_in(ids))
            .all(db)
            .await?;
        for row in rows {
            names.insert(row.id, row.name);
        }
        Ok(names)
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<PurchaseOrderView, ServiceError> {
        let db = &*self.db_pool;

        let order = purchase_orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", id)))?;

        let supplier_name = suppliers::Entity::find_by_id(&order.supplier_id)
            .one(db)
            .await?
            .map(|s| s.name);
        let employee_name = employees::Entity::find_by_id(&order.employee_id)
            .one(db)
            .await?
            .map(|e| e.name);

        let items = purchase_order_items::Entity::find()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(id))
            .order_by_asc(purchase_order_items::Column::ItemNo)
            .find_also_related(products::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(item, product)| OrderItemView {
                item_no: item.item_no,
                product_id: item.product_id,
                product_name: product.map(|p| p.name),
                quantity: item.quantity,
                unit_price: item.unit_price,
                note: item.note,
            })
            .collect();

        Ok(PurchaseOrderView {
            order,
            supplier_name,
            employee_name,
            items,
        })
    }

    /// Edits are only allowed while the order is still pending. Replacing
    /// the item list deletes the old lines and reinserts with a fresh dense
    /// sequence, recomputing the total.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdatePurchaseOrderInput,
    ) -> Result<PurchaseOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = purchase_orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", id)))?;

        if order.order_status != PurchaseOrderStatus::Pending.to_string() {
            return Err(ServiceError::Conflict(format!(
                "Purchase order {} is {} and can no longer be edited",
                id, order.order_status
            )));
        }

        let supplier_id = match &input.supplier_id {
            Some(new_supplier) if !new_supplier.is_empty() => {
                suppliers::Entity::find_by_id(new_supplier)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Supplier {} not found", new_supplier))
                    })?;
                new_supplier.clone()
            }
            _ => order.supplier_id.clone(),
        };

        let mut active: purchase_orders::ActiveModel = order.into();
        active.supplier_id = Set(supplier_id.clone());
        if input.expect_date.is_some() {
            active.expect_date = Set(input.expect_date);
        }
        if input.note.is_some() {
            active.note = Set(input.note.clone());
        }

        if let Some(items) = &input.items {
            let total = Self::check_items(&txn, items).await?;
            purchase_order_items::Entity::delete_many()
                .filter(purchase_order_items::Column::PurchaseOrderId.eq(id))
                .exec(&txn)
                .await?;
            purchase_order_items::Entity::insert_many(Self::item_models(id, items))
                .exec(&txn)
                .await?;
            Self::upsert_supplier_prices(&txn, &supplier_id, items).await?;
            active.total_amount = Set(total);
        }

        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        self.find_one(id).await
    }

    /// Unconditional status overwrite. Purchase orders carry no transition
    /// graph, unlike sales orders.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &str,
        status: PurchaseOrderStatus,
    ) -> Result<PurchaseOrderView, ServiceError> {
        let db = &*self.db_pool;

        let order = purchase_orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", id)))?;

        let employee_id = order.employee_id.clone();
        let mut active: purchase_orders::ActiveModel = order.into();
        active.order_status = Set(status.to_string());
        active.updated_at = Set(Utc::now());
        active.update(db).await?;

        self.logs
            .record(
                "info",
                "purchase",
                "update_status",
                format!("Purchase order {} set to {}", id, status),
                Some(employee_id),
                None,
            )
            .await;

        self.find_one(id).await
    }

    /// Deletion requires pending status and no inbound orders referencing
    /// this order.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = purchase_orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", id)))?;

        if order.order_status != PurchaseOrderStatus::Pending.to_string() {
            return Err(ServiceError::Conflict(format!(
                "Purchase order {} is {} and cannot be deleted",
                id, order.order_status
            )));
        }

        let inbound_refs = inbound_orders::Entity::find()
            .filter(inbound_orders::Column::PurchaseOrderId.eq(id))
            .count(&txn)
            .await?;
        if inbound_refs > 0 {
            return Err(ServiceError::Conflict(format!(
                "Purchase order {} has {} inbound orders and cannot be deleted",
                id, inbound_refs
            )));
        }

        purchase_order_items::Entity::delete_many()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(id))
            .exec(&txn)
            .await?;
        purchase_orders::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        self.logs
            .record(
                "info",
                "purchase",
                "remove",
                format!("Purchase order {} deleted", id),
                None,
                None,
            )
            .await;

        Ok(())
    }

    /// Read-side rollup: counts and amounts by status plus top suppliers
    /// by spend.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<PurchaseStats, ServiceError> {
        let db = &*self.db_pool;

        let by_status = purchase_orders::Entity::find()
            .select_only()
            .column(purchase_orders::Column::OrderStatus)
            .column_as(purchase_orders::Column::Id.count(), "count")
            .column_as(purchase_orders::Column::TotalAmount.sum(), "amount")
            .group_by(purchase_orders::Column::OrderStatus)
            .into_model::<StatusBreakdown>()
            .all(db)
            .await?;

        let total_orders = purchase_orders::Entity::find().count(db).await?;
        let total_amount = by_status
            .iter()
            .filter_map(|s| s.amount)
            .sum::<Decimal>();

        #[derive(FromQueryResult)]
        struct SupplierAgg {
            supplier_id: String,
            count: i64,
            amount: Option<Decimal>,
        }

        let mut supplier_rows = purchase_orders::Entity::find()
            .select_only()
            .column(purchase_orders::Column::SupplierId)
            .column_as(purchase_orders::Column::Id.count(), "count")
            .column_as(purchase_orders::Column::TotalAmount.sum(), "amount")
            .group_by(purchase_orders::Column::SupplierId)
            .into_model::<SupplierAgg>()
            .all(db)
            .await?;
        supplier_rows.sort_by(|a, b| {
            b.amount
                .unwrap_or_default()
                .cmp(&a.amount.unwrap_or_default())
        });
        supplier_rows.truncate(5);

        let names = Self::load_supplier_names(
            db,
            supplier_rows.iter().map(|r| r.supplier_id.clone()).collect(),
        )
        .await?;

        let top_suppliers = supplier_rows
            .into_iter()
            .map(|row| SupplierSpend {
                supplier_name: names.get(&row.supplier_id).cloned(),
                supplier_id: row.supplier_id,
                count: row.count,
                amount: row.amount.unwrap_or_default(),
            })
            .collect();

        #[derive(FromQueryResult)]
        struct EmployeeAgg {
            employee_id: String,
            count: i64,
            amount: Option<Decimal>,
        }

        let mut employee_rows = purchase_orders::Entity::find()
            .select_only()
            .column(purchase_orders::Column::EmployeeId)
            .column_as(purchase_orders::Column::Id.count(), "count")
            .column_as(purchase_orders::Column::TotalAmount.sum(), "amount")
            .group_by(purchase_orders::Column::EmployeeId)
            .into_model::<EmployeeAgg>()
            .all(db)
            .await?;
        employee_rows.sort_by(|a, b| {
            b.amount
                .unwrap_or_default()
                .cmp(&a.amount.unwrap_or_default())
        });

        let employee_names = Self::load_employee_names(
            db,
            employee_rows.iter().map(|r| r.employee_id.clone()).collect(),
        )
        .await?;

        let by_employee = employee_rows
            .into_iter()
            .map(|row| EmployeeSpend {
                employee_name: employee_names.get(&row.employee_id).cloned(),
                employee_id: row.employee_id,
                count: row.count,
                amount: row.amount.unwrap_or_default(),
            })
            .collect();

        Ok(PurchaseStats {
            total_orders,
            total_amount,
            by_status,
            top_suppliers,
            by_employee,
        })
    }
}
