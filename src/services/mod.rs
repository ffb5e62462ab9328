pub mod customers;
pub mod departments;
pub mod employees;
pub mod inventory;
pub mod products;
pub mod purchase;
pub mod reports;
pub mod sales;
pub mod sequence;
pub mod status;
pub mod suppliers;
pub mod system_logs;
pub mod warehouse;
pub mod warehouses;

use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entities::employees as employee_entities;
use crate::errors::ServiceError;

/// Employee functional roles that gate mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeRole {
    Purchase,
    Sales,
    Warehouse,
}

impl EmployeeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeRole::Purchase => "purchase",
            EmployeeRole::Sales => "sales",
            EmployeeRole::Warehouse => "warehouse",
        }
    }
}

/// Loads the employee and checks its declared type matches `role`.
/// The id itself is resolved upstream and trusted; only the functional
/// type is verified here.
pub(crate) async fn ensure_employee_role<C: ConnectionTrait>(
    conn: &C,
    employee_id: &str,
    role: EmployeeRole,
) -> Result<employee_entities::Model, ServiceError> {
    let employee = employee_entities::Entity::find_by_id(employee_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Employee {} not found", employee_id)))?;

    if employee.employee_type != role.as_str() {
        return Err(ServiceError::BadRequest(format!(
            "Employee {} has type {}, operation requires type {}",
            employee_id,
            employee.employee_type,
            role.as_str()
        )));
    }

    Ok(employee)
}
