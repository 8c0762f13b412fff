//! 文件存储层
//!
//! - [`FileStore`]: 整文件读写 + 单写者锁
//! - [`codec`]: JSON 数组和菜单 CSV 格式
//! - [`StoreError`]: 存储错误

pub mod codec;
pub mod error;
pub mod file;

pub use codec::{Codec, JsonCodec, MenuCsvCodec};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;

use shared::models::{MenuItem, Purchase, Supplier};
use shared::order::Order;

pub type OrderStore = FileStore<Order, JsonCodec>;
pub type MenuStore = FileStore<MenuItem, MenuCsvCodec>;
pub type SupplierStore = FileStore<Supplier, JsonCodec>;
pub type PurchaseStore = FileStore<Purchase, JsonCodec>;
