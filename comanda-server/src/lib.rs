//! Comanda Server - 餐厅点单后台
//!
//! # 架构概述
//!
//! - **文件存储** (`store`): JSON / CSV 整文件读写，每个集合一把写锁
//! - **订单** (`orders`): 开单、出菜、结账，状态由菜品状态推导
//! - **HTTP API** (`api`): RESTful 接口，供点单、厨房和后台页面轮询
//! - **后台任务** (`core::tasks`): 订单状态监控、运行时长日志
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、错误、服务器、后台任务
//! ├── store/         # 文件存储
//! ├── orders/        # 订单管理、状态监控
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志初始化、输入校验
//! ```

pub mod api;
pub mod core;
pub mod middleware;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, build_app};
pub use orders::{OrdersManager, TransitionMonitor};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

pub fn print_banner() {
    println!(
        r#"
  ______                                   __
 / ____/___  ____ ___  ____ _____  ____/ /___ _
/ /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
