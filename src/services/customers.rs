use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{customers, sales_orders};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Service for managing customers
#[derive(Clone)]
pub struct CustomersService {
    db_pool: Arc<DbPool>,
}

impl CustomersService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customers::Model, ServiceError> {
        let db = &*self.db_pool;

        if customers::Entity::find_by_id(&input.id).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Customer {} already exists",
                input.id
            )));
        }

        let model = customers::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            gender: Set(input.gender),
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
    ) -> Result<(Vec<customers::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = customers::Entity::find().order_by_asc(customers::Column::Id);
        if let Some(kw) = keyword.filter(|k| !k.is_empty()) {
            query = query.filter(
                customers::Column::Name
                    .contains(&kw)
                    .or(customers::Column::Phone.contains(&kw)),
            );
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<customers::Model, ServiceError> {
        let db = &*self.db_pool;
        customers::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateCustomerInput,
    ) -> Result<customers::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let mut active: customers::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.gender.is_some() {
            active.gender = Set(input.gender);
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

    /// Removal is refused while sales orders still reference the customer.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let orders = sales_orders::Entity::find()
            .filter(sales_orders::Column::CustomerId.eq(id))
            .count(db)
            .await?;
        if orders > 0 {
            return Err(ServiceError::Conflict(format!(
                "Customer {} is referenced by {} sales orders",
                id, orders
            )));
        }

        customers::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }
}
