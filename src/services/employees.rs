use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::{departments, employees, purchase_orders, sales_orders};
use crate::errors::ServiceError;

const EMPLOYEE_TYPES: &[&str] = &["purchase", "sales", "warehouse", "finance"];

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeInput {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub employee_type: String,
    #[validate(length(min = 1, max = 32))]
    pub department_id: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub employee_type: Option<String>,
    pub department_id: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFilter {
    pub keyword: Option<String>,
    pub employee_type: Option<String>,
    pub department_id: Option<String>,
}

/// Service for managing employees
#[derive(Clone)]
pub struct EmployeesService {
    db_pool: Arc<DbPool>,
}

impl EmployeesService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    fn check_employee_type(value: &str) -> Result<(), ServiceError> {
        if !EMPLOYEE_TYPES.contains(&value) {
            return Err(ServiceError::BadRequest(format!(
                "Unknown employee type: {}",
                value
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<employees::Model, ServiceError> {
        let db = &*self.db_pool;

        Self::check_employee_type(&input.employee_type)?;

        if employees::Entity::find_by_id(&input.id).one(db).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Employee {} already exists",
                input.id
            )));
        }

        departments::Entity::find_by_id(&input.department_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Department {} not found", input.department_id))
            })?;

        let model = employees::ActiveModel {
            id: Set(input.id),
            name: Set(input.name),
            gender: Set(input.gender),
            phone: Set(input.phone),
            email: Set(input.email),
            entry_date: Set(input.entry_date),
            employee_type: Set(input.employee_type),
            department_id: Set(input.department_id),
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
        filter: EmployeeFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<employees::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = employees::Entity::find().order_by_asc(employees::Column::Id);
        if let Some(kw) = filter.keyword.filter(|k| !k.is_empty()) {
            query = query.filter(employees::Column::Name.contains(&kw));
        }
        if let Some(ty) = filter.employee_type.filter(|t| !t.is_empty()) {
            query = query.filter(employees::Column::EmployeeType.eq(ty));
        }
        if let Some(dept) = filter.department_id.filter(|d| !d.is_empty()) {
            query = query.filter(employees::Column::DepartmentId.eq(dept));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: &str) -> Result<employees::Model, ServiceError> {
        let db = &*self.db_pool;
        employees::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Employee {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateEmployeeInput,
    ) -> Result<employees::Model, ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        if let Some(ty) = &input.employee_type {
            Self::check_employee_type(ty)?;
        }
        if let Some(dept) = &input.department_id {
            departments::Entity::find_by_id(dept)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Department {} not found", dept)))?;
        }

        let mut active: employees::ActiveModel = existing.into();
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
        if input.entry_date.is_some() {
            active.entry_date = Set(input.entry_date);
        }
        if let Some(ty) = input.employee_type {
            active.employee_type = Set(ty);
        }
        if let Some(dept) = input.department_id {
            active.department_id = Set(dept);
        }
        if input.note.is_some() {
            active.note = Set(input.note);
        }

        Ok(active.update(db).await?)
    }

    /// Removal is refused while orders still reference the employee.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let existing = self.find_one(id).await?;

        let referencing = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::EmployeeId.eq(id))
            .count(db)
            .await?
            + sales_orders::Entity::find()
                .filter(sales_orders::Column::EmployeeId.eq(id))
                .count(db)
                .await?;
        if referencing > 0 {
            return Err(ServiceError::Conflict(format!(
                "Employee {} is referenced by {} orders",
                id, referencing
            )));
        }

        employees::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }
}
