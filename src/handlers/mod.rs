pub mod common;
pub mod customers;
pub mod departments;
pub mod employees;
pub mod inbound_orders;
pub mod inventory;
pub mod outbound_orders;
pub mod products;
pub mod purchase_orders;
pub mod reports;
pub mod sales_orders;
pub mod suppliers;
pub mod system_logs;
pub mod warehouses;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::customers::CustomersService;
use crate::services::departments::DepartmentsService;
use crate::services::employees::EmployeesService;
use crate::services::inventory::InventoryService;
use crate::services::products::ProductsService;
use crate::services::purchase::PurchaseService;
use crate::services::reports::ReportsService;
use crate::services::sales::SalesService;
use crate::services::suppliers::SuppliersService;
use crate::services::system_logs::SystemLogService;
use crate::services::warehouse::WarehouseService;
use crate::services::warehouses::WarehousesService;

/// One instance of every domain service, all sharing the same pool.
#[derive(Clone)]
pub struct AppServices {
    pub departments: DepartmentsService,
    pub employees: EmployeesService,
    pub customers: CustomersService,
    pub suppliers: SuppliersService,
    pub products: ProductsService,
    pub warehouses: WarehousesService,
    pub purchase: PurchaseService,
    pub sales: SalesService,
    pub warehouse: WarehouseService,
    pub inventory: InventoryService,
    pub reports: ReportsService,
    pub logs: SystemLogService,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        let logs = SystemLogService::new(db.clone());
        Self {
            departments: DepartmentsService::new(db.clone()),
            employees: EmployeesService::new(db.clone()),
            customers: CustomersService::new(db.clone()),
            suppliers: SuppliersService::new(db.clone()),
            products: ProductsService::new(db.clone()),
            warehouses: WarehousesService::new(db.clone()),
            purchase: PurchaseService::new(db.clone(), logs.clone()),
            sales: SalesService::new(db.clone(), logs.clone()),
            warehouse: WarehouseService::new(db.clone(), logs.clone()),
            inventory: InventoryService::new(db.clone()),
            reports: ReportsService::new(db),
            logs,
        }
    }
}

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            services: AppServices::new(db.clone()),
            db,
        }
    }
}
