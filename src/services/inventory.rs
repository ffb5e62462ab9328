use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::instrument;

use crate::db::DbPool;
use crate::entities::{inventory, products, warehouses};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStockRow {
    pub warehouse_id: String,
    pub warehouse_name: Option<String>,
    pub current_qty: i32,
    pub min_qty: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product_id: String,
    pub product_name: String,
    pub total_qty: i64,
    pub rows: Vec<ProductStockRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStockRow {
    pub product_id: String,
    pub product_name: Option<String>,
    pub current_qty: i32,
    pub min_qty: i32,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStock {
    pub warehouse_id: String,
    pub warehouse_name: String,
    pub total_qty: i64,
    pub total_value: Decimal,
    pub rows: Vec<WarehouseStockRow>,
}

/// Read-only views over the inventory ledger, grouped per product or
/// per warehouse.
#[derive(Clone)]
pub struct InventoryService {
    db_pool: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn by_product(&self, product_id: &str) -> Result<ProductStock, ServiceError> {
        let db = &*self.db_pool;

        let product = products::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let rows = inventory::Entity::find()
            .filter(inventory::Column::ProductId.eq(product_id))
            .order_by_asc(inventory::Column::WarehouseId)
            .find_also_related(warehouses::Entity)
            .all(db)
            .await?;

        let total_qty = rows.iter().map(|(r, _)| i64::from(r.current_qty)).sum();
        let rows = rows
            .into_iter()
            .map(|(row, warehouse)| ProductStockRow {
                warehouse_id: row.warehouse_id,
                warehouse_name: warehouse.map(|w| w.name),
                current_qty: row.current_qty,
                min_qty: row.min_qty,
            })
            .collect();

        Ok(ProductStock {
            product_id: product.id,
            product_name: product.name,
            total_qty,
            rows,
        })
    }

    #[instrument(skip(self))]
    pub async fn by_warehouse(&self, warehouse_id: &str) -> Result<WarehouseStock, ServiceError> {
        let db = &*self.db_pool;

        let warehouse = warehouses::Entity::find_by_id(warehouse_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Warehouse {} not found", warehouse_id))
            })?;

        let rows = inventory::Entity::find()
            .filter(inventory::Column::WarehouseId.eq(warehouse_id))
            .order_by_asc(inventory::Column::ProductId)
            .find_also_related(products::Entity)
            .all(db)
            .await?;

        let total_qty = rows.iter().map(|(r, _)| i64::from(r.current_qty)).sum();
        let rows: Vec<WarehouseStockRow> = rows
            .into_iter()
            .map(|(row, product)| {
                let cost = product.as_ref().map(|p| p.cost_price).unwrap_or_default();
                WarehouseStockRow {
                    product_id: row.product_id,
                    product_name: product.map(|p| p.name),
                    current_qty: row.current_qty,
                    min_qty: row.min_qty,
                    value: Decimal::from(row.current_qty) * cost,
                }
            })
            .collect();
        let total_value = rows.iter().map(|r| r.value).sum();

        Ok(WarehouseStock {
            warehouse_id: warehouse.id,
            warehouse_name: warehouse.name,
            total_qty,
            total_value,
            rows,
        })
    }
}
