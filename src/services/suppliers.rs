use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{products, purchase_orders, supplier_products, suppliers};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierInput {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Supplier-product association joined with product display fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierProductView {
    #[serde(flatten)]
    pub association: supplier_products::Model,
    pub product_name: Option<String>,
}

/// Service for managing suppliers
#[derive(Clone)]
pub struct SuppliersService {
    db_pool: Arc<DbPool>,
}

impl SuppliersService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateSupplierInput,
    ) -> Result<suppliers::Model, ServiceError> {
        let db = &*self.db_pool;

        if suppliers::Entity::find_by_id(&input.id).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Supplier {} already exists",
                input.id
            )));
        }

        let model = suppliers::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            contact: Set(input.contact),
            phone: Set(input.phone),
            email: Set(input.email),
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
    ) -> Result<(Vec<suppliers::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = suppliers::Entity::find().order_by_asc(suppliers::Column::Id);
        if let Some(kw) = keyword.filter(|k| !k.is_empty()) {
            query = query.filter(
                suppliers::Column::Name
                    .contains(&kw)
                    .or(suppliers::Column::Contact.contains(&kw)),
            );
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<suppliers::Model, ServiceError> {
        let db = &*self.db_pool;
        suppliers::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", id)))
    }

    /// Products this supplier has quoted, with the latest negotiated price.
    #[instrument(skip(self))]
    pub async fn find_products(
        &self,
        supplier_id: &str,
    ) -> Result<Vec<SupplierProductView>, ServiceError> {
        let db = &*self.db_pool;
        self.find_one(supplier_id).await?;

        let rows = supplier_products::Entity::find()
            .filter(supplier_products::Column::SupplierId.eq(supplier_id))
            .find_also_related(products::Entity)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(association, product)| SupplierProductView {
                association,
                product_name: product.map(|p| p.name),
            })
            .collect())
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateSupplierInput,
    ) -> Result<suppliers::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let mut active: suppliers::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.contact.is_some() {
            active.contact = Set(input.contact);
        }
        if input.phone.is_some() {
            active.phone = Set(input.phone);
        }
        if input.email.is_some() {
            active.email = Set(input.email);
        }
        if input.address.is_some() {
            active.address = Set(input.address);
        }
        if input.note.is_some() {
            active.note = Set(input.note);
        }

        Ok(active.update(db).await?)
    }

    /// Removal is refused while purchase orders still reference the supplier.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let orders = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::SupplierId.eq(id))
            .count(db)
            .await?;
        if orders > 0 {
            return Err(ServiceError::Conflict(format!(
                "Supplier {} is referenced by {} purchase orders",
                id, orders
            )));
        }

        supplier_products::Entity::delete_many()
            .filter(supplier_products::Column::SupplierId.eq(id))
            .exec(db)
            .await?;
        suppliers::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }
}
