pub mod customers;
pub mod departments;
pub mod employees;
pub mod inbound_order_items;
pub mod inbound_orders;
pub mod inventory;
pub mod order_sequences;
pub mod outbound_order_items;
pub mod outbound_orders;
pub mod products;
pub mod purchase_order_items;
pub mod purchase_orders;
pub mod sales_order_items;
pub mod sales_orders;
pub mod supplier_products;
pub mod suppliers;
pub mod system_logs;
pub mod warehouses;
