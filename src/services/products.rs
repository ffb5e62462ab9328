use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{
    inventory, products, purchase_order_items, sales_order_items, supplier_products,
};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub unit: Option<String>,
    pub cost_price: Decimal,
    pub sell_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub unit: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
}

/// Product detail joined with its total stock across warehouses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: products::Model,
    pub total_stock: i64,
}

/// Service for managing the product catalog
#[derive(Clone)]
pub struct ProductsService {
    db_pool: Arc<DbPool>,
}

impl ProductsService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ServiceError> {
        let db = &*self.db_pool;

        if input.cost_price < Decimal::ZERO || input.sell_price < Decimal::ZERO {
            return Err(ServiceError::BadRequest(
                "Prices must not be negative".to_string(),
            ));
        }

        if products::Entity::find_by_id(&input.id).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Product {} already exists",
                input.id
            )));
        }

        let model = products::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            category: Set(input.category),
            brand: Set(input.brand),
            size: Set(input.size),
            color: Set(input.color),
            material: Set(input.material),
            unit: Set(input.unit),
            cost_price: Set(input.cost_price),
            sell_price: Set(input.sell_price),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        filter: ProductFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<products::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = products::Entity::find().order_by_asc(products::Column::Id);
        if let Some(kw) = filter.keyword.filter(|k| !k.is_empty()) {
            query = query.filter(
                products::Column::Name
                    .contains(&kw)
                    .or(products::Column::Id.contains(&kw)),
            );
        }
        if let Some(category) = filter.category.filter(|c| !c.is_empty()) {
            query = query.filter(products::Column::Category.eq(category));
        }
        if let Some(brand) = filter.brand.filter(|b| !b.is_empty()) {
            query = query.filter(products::Column::Brand.eq(brand));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<ProductView, ServiceError> {
        let db = &*self.db_pool;
        let product = products::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let total_stock: i64 = inventory::Entity::find()
            .filter(inventory::Column::ProductId.eq(id))
            .all(db)
            .await?
            .iter()
            .map(|row| i64::from(row.current_qty))
            .sum();

        Ok(ProductView {
            product,
            total_stock,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateProductInput,
    ) -> Result<products::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = products::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        if input.cost_price.is_some_and(|p| p < Decimal::ZERO)
            || input.sell_price.is_some_and(|p| p < Decimal::ZERO)
        {
            return Err(ServiceError::BadRequest(
                "Prices must not be negative".to_string(),
            ));
        }

        let mut active: products::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.category.is_some() {
            active.category = Set(input.category);
        }
        if input.brand.is_some() {
            active.brand = Set(input.brand);
        }
        if input.size.is_some() {
            active.size = Set(input.size);
        }
        if input.color.is_some() {
            active.color = Set(input.color);
        }
        if input.material.is_some() {
            active.material = Set(input.material);
        }
        if input.unit.is_some() {
            active.unit = Set(input.unit);
        }
        if let Some(price) = input.cost_price {
            active.cost_price = Set(price);
        }
        if let Some(price) = input.sell_price {
            active.sell_price = Set(price);
        }

        Ok(active.update(db).await?)
    }

    /// Removal is refused while order lines or inventory rows reference
    /// the product.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let existing = products::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let order_lines = purchase_order_items::Entity::find()
            .filter(purchase_order_items::Column::ProductId.eq(id))
            .count(db)
            .await?
            + sales_order_items::Entity::find()
                .filter(sales_order_items::Column::ProductId.eq(id))
                .count(db)
                .await?;
        if order_lines > 0 {
            return Err(ServiceError::Conflict(format!(
                "Product {} is referenced by {} order lines",
                id, order_lines
            )));
        }

        let stock_rows = inventory::Entity::find()
            .filter(inventory::Column::ProductId.eq(id))
            .count(db)
            .await?;
        if stock_rows > 0 {
            return Err(ServiceError::Conflict(format!(
                "Product {} still has inventory records",
                id
            )));
        }

        supplier_products::Entity::delete_many()
            .filter(supplier_products::Column::ProductId.eq(id))
            .exec(db)
            .await?;
        products::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }
}
