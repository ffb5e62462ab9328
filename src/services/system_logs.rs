use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::entities::system_logs;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLogFilter {
    pub level: Option<String>,
    pub module: Option<String>,
    pub employee_id: Option<String>,
}

/// Audit trail writer and reader. Writes are fire-and-forget: a failed
/// log insert must never fail the business operation that triggered it.
#[derive(Clone)]
pub struct SystemLogService {
    db_pool: Arc<DbPool>,
}

impl SystemLogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Records one audit entry, swallowing any storage error.
    pub async fn record(
        &self,
        level: &str,
        module: &str,
        action: &str,
        message: String,
        employee_id: Option<String>,
        detail: Option<serde_json::Value>,
    ) {
        let db = &*self.db_pool;
        let entry = system_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            level: Set(level.to_string()),
            module: Set(module.to_string()),
            action: Set(action.to_string()),
            message: Set(message),
            employee_id: Set(employee_id),
            detail: Set(detail),
            created_at: Set(Utc::now()),
        };

        if let Err(e) = entry.insert(db).await {
            warn!(module, action, error = %e, "audit log write failed");
        }
    }

    #[instrument(skip(self))]
    pub async fn find_all(
        &self,
        filter: SystemLogFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<system_logs::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query =
            system_logs::Entity::find().order_by_desc(system_logs::Column::CreatedAt);
        if let Some(level) = filter.level.filter(|l| !l.is_empty()) {
            query = query.filter(system_logs::Column::Level.eq(level));
        }
        if let Some(module) = filter.module.filter(|m| !m.is_empty()) {
            query = query.filter(system_logs::Column::Module.eq(module));
        }
        if let Some(emp) = filter.employee_id.filter(|e| !e.is_empty()) {
            query = query.filter(system_logs::Column::EmployeeId.eq(emp));
        }

        let paginator = query.paginate(db, limit);
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(page.max(1) - 1).await?;

        Ok((data, total))
    }
}
