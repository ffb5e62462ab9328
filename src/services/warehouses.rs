use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{inventory, warehouses};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouseInput {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub address: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarehouseInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Service for managing warehouse reference data
#[derive(Clone)]
pub struct WarehousesService {
    db_pool: Arc<DbPool>,
}

impl WarehousesService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateWarehouseInput,
    ) -> Result<warehouses::Model, ServiceError> {
        let db = &*self.db_pool;

        if warehouses::Entity::find_by_id(&input.id).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Warehouse {} already exists",
                input.id
            )));
        }

        let model = warehouses::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            address: Set(input.address),
            note: Set(input.note),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        keyword: Option<String>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<warehouses::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = warehouses::Entity::find().order_by_asc(warehouses::Column::Id);
        if let Some(kw) = keyword.filter(|k| !k.is_empty()) {
            query = query.filter(warehouses::Column::Name.contains(&kw));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<warehouses::Model, ServiceError> {
        let db = &*self.db_pool;
        warehouses::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateWarehouseInput,
    ) -> Result<warehouses::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let mut active: warehouses::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.address.is_some() {
            active.address = Set(input.address);
        }
        if input.note.is_some() {
            active.note = Set(input.note);
        }

        Ok(active.update(db).await?)
    }

    /// Removal is refused while inventory rows reference the warehouse.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let stock_rows = inventory::Entity::find()
            .filter(inventory::Column::WarehouseId.eq(id))
            .count(db)
            .await?;
        if stock_rows > 0 {
            return Err(ServiceError::Conflict(format!(
                "Warehouse {} still has inventory records",
                id
            )));
        }

        warehouses::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }
}
