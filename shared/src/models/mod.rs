//! Back-office records: menu, suppliers and purchases

pub mod menu;
pub mod purchase;
pub mod supplier;

// Re-exports
pub use menu::{MenuItem, MenuItemInput, MenuSection};
pub use purchase::{Purchase, PurchaseInput};
pub use supplier::{Supplier, SupplierInput};
