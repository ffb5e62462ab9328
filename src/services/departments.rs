use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{departments, employees};
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentInput {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub manager_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub manager_id: Option<String>,
    pub note: Option<String>,
}

/// Service for managing departments
#[derive(Clone)]
pub struct DepartmentsService {
    db_pool: Arc<DbPool>,
}

impl DepartmentsService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateDepartmentInput,
    ) -> Result<departments::Model, ServiceError> {
        let db = &*self.db_pool;

        if departments::Entity::find_by_id(&input.id).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Department {} already exists",
                input.id
            )));
        }

        let model = departments::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            contact: Set(input.contact),
            phone: Set(input.phone),
            email: Set(input.email),
            manager_id: Set(input.manager_id),
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
    ) -> Result<(Vec<departments::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = departments::Entity::find().order_by_asc(departments::Column::Id);
        if let Some(kw) = keyword.filter(|k| !k.is_empty()) {
            query = query.filter(departments::Column::Name.contains(&kw));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<departments::Model, ServiceError> {
        let db = &*self.db_pool;
        departments::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Department {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateDepartmentInput,
    ) -> Result<departments::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let mut active: departments::ActiveModel = existing.into();
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
        if input.manager_id.is_some() {
            active.manager_id = Set(input.manager_id);
        }
        if input.note.is_some() {
            active.note = Set(input.note);
        }

        Ok(active.update(db).await?)
    }

    /// Removal is refused while any employee still belongs to the department.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let members = employees::Entity::find()
            .filter(employees::Column::DepartmentId.eq(id))
            .count(db)
            .await?;
        if members > 0 {
            return Err(ServiceError::Conflict(format!(
                "Department {} still has {} employees",
                id, members
            )));
        }

        departments::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }
}
