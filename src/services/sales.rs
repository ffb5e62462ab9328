use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
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
    customers, employees, inventory, outbound_orders, products, sales_order_items, sales_orders,
};
use crate::errors::ServiceError;
use crate::services::purchase::OrderItemInput;
use crate::services::sequence::{next_order_id, OrderKind};
use crate::services::status::SalesOrderStatus;
use crate::services::system_logs::SystemLogService;
use crate::services::{ensure_employee_role, EmployeeRole};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalesOrderInput {
    #[validate(length(min = 1, max = 32))]
    pub customer_id: String,
    pub order_date: Option<NaiveDate>,
    pub expect_date: Option<NaiveDate>,
    pub note: Option<String>,
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalesOrderInput {
    pub customer_id: Option<String>,
    pub expect_date: Option<NaiveDate>,
    pub note: Option<String>,
    #[validate]
    pub items: Option<Vec<OrderItemInput>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalesStatusInput {
    pub order_status: SalesOrderStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderItemView {
    pub item_no: i32,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderView {
    #[serde(flatten)]
    pub order: sales_orders::Model,
    pub customer_name: Option<String>,
    pub employee_name: Option<String>,
    pub items: Vec<SalesOrderItemView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderSummary {
    #[serde(flatten)]
    pub order: sales_orders::Model,
    pub customer_name: Option<String>,
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderFilter {
    pub customer_id: Option<String>,
    pub order_status: Option<SalesOrderStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatusBreakdown {
    pub order_status: String,
    pub count: i64,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: String,
    pub count: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSales {
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub count: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSales {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub count: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_orders: u64,
    pub total_amount: Decimal,
    pub by_status: Vec<SalesStatusBreakdown>,
    pub monthly_trend: Vec<MonthlySales>,
    pub top_products: Vec<TopProduct>,
    pub by_customer: Vec<CustomerSales>,
    pub by_employee: Vec<EmployeeSales>,
}

/// Service for the sales order workflow
#[derive(Clone)]
pub struct SalesService {
    db_pool: Arc<DbPool>,
    logs: SystemLogService,
}

impl SalesService {
    pub fn new(db_pool: Arc<DbPool>, logs: SystemLogService) -> Self {
        Self { db_pool, logs }
    }

    /// Validates products exist and, per line, that at least one single
    /// warehouse holds enough stock for the requested quantity. The check is
    /// warehouse-agnostic and does not reserve anything; stock is only
    /// decremented at outbound completion.
    async fn check_items_and_stock<C: ConnectionTrait>(
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

            let sufficient = inventory::Entity::find()
                .filter(inventory::Column::ProductId.eq(&item.product_id))
                .filter(inventory::Column::CurrentQty.gte(item.quantity))
                .one(conn)
                .await?;
            if sufficient.is_none() {
                return Err(ServiceError::InsufficientStock(format!(
                    "No warehouse holds {} units of product {}",
                    item.quantity, item.product_id
                )));
            }

            total += Decimal::from(item.quantity) * item.unit_price;
        }
        Ok(total)
    }

    fn item_models(order_id: &str, items: &[OrderItemInput]) -> Vec<sales_order_items::ActiveModel> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| sales_order_items::ActiveModel {
                sales_order_id: Set(order_id.to_string()),
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
        input: CreateSalesOrderInput,
    ) -> Result<SalesOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        customers::Entity::find_by_id(&input.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", input.customer_id))
            })?;
        ensure_employee_role(&txn, employee_id, EmployeeRole::Sales).await?;

        let total = Self::check_items_and_stock(&txn, &input.items).await?;
        let order_date = input.order_date.unwrap_or_else(|| Utc::now().date_naive());
        let order_id = next_order_id(&txn, OrderKind::Sales, order_date).await?;
        let now = Utc::now();

        sales_orders::ActiveModel {
            id: Set(order_id.clone()),
            customer_id: Set(input.customer_id.clone()),
            employee_id: Set(employee_id.to_string()),
            order_date: Set(order_date),
            expect_date: Set(input.expect_date),
            order_status: Set(SalesOrderStatus::Pending.to_string()),
            total_amount: Set(total),
            note: Set(input.note.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        sales_order_items::Entity::insert_many(Self::item_models(&order_id, &input.items))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        self.logs
            .record(
                "info",
                "sales",
                "create",
                format!("Sales order {} created", order_id),
                Some(employee_id.to_string()),
                None,
            )
            .await;

        self.find_one(&order_id).await
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        filter: SalesOrderFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<SalesOrderSummary>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = sales_orders::Entity::find().order_by_desc(sales_orders::Column::Id);
        if let Some(customer) = filter.customer_id.filter(|c| !c.is_empty()) {
            query = query.filter(sales_orders::Column::CustomerId.eq(customer));
        }
        if let Some(status) = filter.order_status {
            query = query.filter(sales_orders::Column::OrderStatus.eq(status.to_string()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(sales_orders::Column::OrderDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(sales_orders::Column::OrderDate.lte(end));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.max(1) - 1).await?;

        let customer_ids: Vec<String> = orders.iter().map(|o| o.customer_id.clone()).collect();
        let employee_ids: Vec<String> = orders.iter().map(|o| o.employee_id.clone()).collect();

        let mut customer_names = HashMap::new();
        if !customer_ids.is_empty() {
            for row in customers::Entity::find()
                .filter(customers::Column::Id.is_in(customer_ids))
                .all(db)
                .await?
            {
                customer_names.insert(row.id, row.name);
            }
        }
        let mut employee_names = HashMap::new();
        if !employee_ids.is_empty() {
            for row in employees::Entity::find()
                .filter(employees::Column::Id.is_in(employee_ids))
                .all(db)
                .await?
            {
                employee_names.insert(row.id, row.name);
            }
        }

        let data = orders
            .into_iter()
            .map(|order| {
                let customer_name = customer_names.get(&order.customer_id).cloned();
                let employee_name = employee_names.get(&order.employee_id).cloned();
                SalesOrderSummary {
                    order,
                    customer_name,
                    employee_name,
                }
            })
            .collect();

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<SalesOrderView, ServiceError> {
        let db = &*self.db_pool;

        let order = sales_orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales order {} not found", id)))?;

        let customer_name = customers::Entity::find_by_id(&order.customer_id)
            .one(db)
            .await?
            .map(|c| c.name);
        let employee_name = employees::Entity::find_by_id(&order.employee_id)
            .one(db)
            .await?
            .map(|e| e.name);

        let items = sales_order_items::Entity::find()
            .filter(sales_order_items::Column::SalesOrderId.eq(id))
            .order_by_asc(sales_order_items::Column::ItemNo)
            .find_also_related(products::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|(item, product)| SalesOrderItemView {
                item_no: item.item_no,
                product_id: item.product_id,
                product_name: product.map(|p| p.name),
                quantity: item.quantity,
                unit_price: item.unit_price,
                note: item.note,
            })
            .collect();

        Ok(SalesOrderView {
            order,
            customer_name,
            employee_name,
            items,
        })
    }

    /// Edits are only allowed while the order is still pending; item
    /// replacement re-runs the stock-sufficiency check.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSalesOrderInput,
    ) -> Result<SalesOrderView, ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = sales_orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales order {} not found", id)))?;

        if order.order_status != SalesOrderStatus::Pending.to_string() {
            return Err(ServiceError::Conflict(format!(
                "Sales order {} is {} and can no longer be edited",
                id, order.order_status
            )));
        }

        let customer_id = match &input.customer_id {
            Some(new_customer) if !new_customer.is_empty() => {
                customers::Entity::find_by_id(new_customer)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Customer {} not found", new_customer))
                    })?;
                new_customer.clone()
            }
            _ => order.customer_id.clone(),
        };

        let mut active: sales_orders::ActiveModel = order.into();
        active.customer_id = Set(customer_id);
        if input.expect_date.is_some() {
            active.expect_date = Set(input.expect_date);
        }
        if input.note.is_some() {
            active.note = Set(input.note.clone());
        }

        if let Some(items) = &input.items {
            let total = Self::check_items_and_stock(&txn, items).await?;
            sales_order_items::Entity::delete_many()
                .filter(sales_order_items::Column::SalesOrderId.eq(id))
                .exec(&txn)
                .await?;
            sales_order_items::Entity::insert_many(Self::item_models(id, items))
                .exec(&txn)
                .await?;
            active.total_amount = Set(total);
        }

        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        self.find_one(id).await
    }

    /// Transitions are checked against the sales status graph; anything
    /// outside it is a conflict naming both statuses.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &str,
        status: SalesOrderStatus,
    ) -> Result<SalesOrderView, ServiceError> {
        let db = &*self.db_pool;

        let order = sales_orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales order {} not found", id)))?;

        let current = SalesOrderStatus::from_str(&order.order_status).map_err(|_| {
            ServiceError::InternalError(format!(
                "Sales order {} has unrecognized status {}",
                id, order.order_status
            ))
        })?;

        if !current.can_transition_to(status) {
            return Err(ServiceError::Conflict(format!(
                "Sales order {} cannot transition from {} to {}",
                id, current, status
            )));
        }

        let employee_id = order.employee_id.clone();
        let mut active: sales_orders::ActiveModel = order.into();
        active.order_status = Set(status.to_string());
        active.updated_at = Set(Utc::now());
        active.update(db).await?;

        self.logs
            .record(
                "info",
                "sales",
                "update_status",
                format!("Sales order {} set to {}", id, status),
                Some(employee_id),
                None,
            )
            .await;

        self.find_one(id).await
    }

    /// Deletion requires pending status and no outbound orders referencing
    /// this order.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let txn = self.db_pool.begin().await?;

        let order = sales_orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales order {} not found", id)))?;

        if order.order_status != SalesOrderStatus::Pending.to_string() {
            return Err(ServiceError::Conflict(format!(
                "Sales order {} is {} and cannot be deleted",
                id, order.order_status
            )));
        }

        let outbound_refs = outbound_orders::Entity::find()
            .filter(outbound_orders::Column::SalesOrderId.eq(id))
            .count(&txn)
            .await?;
        if outbound_refs > 0 {
            return Err(ServiceError::Conflict(format!(
                "Sales order {} has {} outbound orders and cannot be deleted",
                id, outbound_refs
            )));
        }

        sales_order_items::Entity::delete_many()
            .filter(sales_order_items::Column::SalesOrderId.eq(id))
            .exec(&txn)
            .await?;
        sales_orders::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        self.logs
            .record(
                "info",
                "sales",
                "remove",
                format!("Sales order {} deleted", id),
                None,
                None,
            )
            .await;

        Ok(())
    }

    /// Read-side rollup: status breakdown, a twelve-month trend ending at
    /// `today`, and the top five products by sold quantity.
    #[instrument(skip(self))]
    pub async fn stats(&self, today: NaiveDate) -> Result<SalesStats, ServiceError> {
        let db = &*self.db_pool;

        let by_status = sales_orders::Entity::find()
            .select_only()
            .column(sales_orders::Column::OrderStatus)
            .column_as(sales_orders::Column::Id.count(), "count")
            .column_as(sales_orders::Column::TotalAmount.sum(), "amount")
            .group_by(sales_orders::Column::OrderStatus)
            .into_model::<SalesStatusBreakdown>()
            .all(db)
            .await?;

        let total_orders = sales_orders::Entity::find().count(db).await?;
        let total_amount = by_status.iter().filter_map(|s| s.amount).sum::<Decimal>();

        // Month buckets computed in Rust; one query per bucket keeps the
        // SQL portable across backends.
        let mut monthly_trend = Vec::with_capacity(12);
        let mut year = today.year();
        let mut month = today.month();
        let mut buckets = Vec::with_capacity(12);
        for _ in 0..12 {
            buckets.push((year, month));
            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
        }
        buckets.reverse();

        for (year, month) in buckets {
            let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                ServiceError::InternalError("Invalid month bucket".to_string())
            })?;
            let next = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)
            }
            .ok_or_else(|| ServiceError::InternalError("Invalid month bucket".to_string()))?;

            let rows = sales_orders::Entity::find()
                .filter(sales_orders::Column::OrderDate.gte(start))
                .filter(sales_orders::Column::OrderDate.lt(next))
                .all(db)
                .await?;
            let amount = rows.iter().map(|o| o.total_amount).sum::<Decimal>();
            monthly_trend.push(MonthlySales {
                month: format!("{:04}-{:02}", year, month),
                count: rows.len() as i64,
                amount,
            });
        }

        #[derive(FromQueryResult)]
        struct ProductAgg {
            product_id: String,
            quantity: Option<i64>,
        }

        let mut product_rows = sales_order_items::Entity::find()
            .select_only()
            .column(sales_order_items::Column::ProductId)
            .column_as(sales_order_items::Column::Quantity.sum(), "quantity")
            .group_by(sales_order_items::Column::ProductId)
            .into_model::<ProductAgg>()
            .all(db)
            .await?;
        product_rows.sort_by_key(|r| std::cmp::Reverse(r.quantity.unwrap_or_default()));
        product_rows.truncate(5);

        let mut top_products = Vec::with_capacity(product_rows.len());
        for row in product_rows {
            let lines = sales_order_items::Entity::find()
                .filter(sales_order_items::Column::ProductId.eq(&row.product_id))
                .all(db)
                .await?;
            let amount = lines
                .iter()
                .map(|l| Decimal::from(l.quantity) * l.unit_price)
                .sum::<Decimal>();
            let product_name = products::Entity::find_by_id(&row.product_id)
                .one(db)
                .await?
                .map(|p| p.name);
            top_products.push(TopProduct {
                product_id: row.product_id,
                product_name,
                quantity: row.quantity.unwrap_or_default(),
                amount,
            });
        }

        #[derive(FromQueryResult)]
        struct PartyAgg {
            party_id: String,
            count: i64,
            amount: Option<Decimal>,
        }

        let mut customer_rows = sales_orders::Entity::find()
            .select_only()
            .column_as(sales_orders::Column::CustomerId, "party_id")
            .column_as(sales_orders::Column::Id.count(), "count")
            .column_as(sales_orders::Column::TotalAmount.sum(), "amount")
            .group_by(sales_orders::Column::CustomerId)
            .into_model::<PartyAgg>()
            .all(db)
            .await?;
        customer_rows.sort_by(|a, b| {
            b.amount
                .unwrap_or_default()
                .cmp(&a.amount.unwrap_or_default())
        });

        let mut customer_names = HashMap::new();
        if !customer_rows.is_empty() {
            for row in customers::Entity::find()
                .filter(
                    customers::Column::Id
                        .is_in(customer_rows.iter().map(|r| r.party_id.clone())),
                )
                .all(db)
                .await?
            {
                customer_names.insert(row.id, row.name);
            }
        }
        let by_customer = customer_rows
            .into_iter()
            .map(|row| CustomerSales {
                customer_name: customer_names.get(&row.party_id).cloned(),
                customer_id: row.party_id,
                count: row.count,
                amount: row.amount.unwrap_or_default(),
            })
            .collect();

        let mut employee_rows = sales_orders::Entity::find()
            .select_only()
            .column_as(sales_orders::Column::EmployeeId, "party_id")
            .column_as(sales_orders::Column::Id.count(), "count")
            .column_as(sales_orders::Column::TotalAmount.sum(), "amount")
            .group_by(sales_orders::Column::EmployeeId)
            .into_model::<PartyAgg>()
            .all(db)
            .await?;
        employee_rows.sort_by(|a, b| {
            b.amount
                .unwrap_or_default()
                .cmp(&a.amount.unwrap_or_default())
        });

        let mut employee_names = HashMap::new();
        if !employee_rows.is_empty() {
            for row in employees::Entity::find()
                .filter(
                    employees::Column::Id
                        .is_in(employee_rows.iter().map(|r| r.party_id.clone())),
                )
                .all(db)
                .await?
            {
                employee_names.insert(row.id, row.name);
            }
        }
        let by_employee = employee_rows
            .into_iter()
            .map(|row| EmployeeSales {
                employee_name: employee_names.get(&row.party_id).cloned(),
                employee_id: row.party_id,
                count: row.count,
                amount: row.amount.unwrap_or_default(),
            })
            .collect();

        Ok(SalesStats {
            total_orders,
            total_amount,
            by_status,
            monthly_trend,
            top_products,
            by_customer,
            by_employee,
        })
    }
}
