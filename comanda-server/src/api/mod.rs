//! API 路由模块
//!
//! # 结构
//!
//! - [`extract`] - 路径参数提取器
//! - [`health`] - 健康检查
//! - [`comandas`] - 订单开单、加菜、出菜、结账
//! - [`cozinha`] - 厨房队列和看板
//! - [`cardapio`] - 菜单管理
//! - [`fornecedores`] - 供应商管理
//! - [`compras`] - 采购管理
//! - [`relatorios`] - 销售、采购和现金流报表
//! - [`alertas`] - 订单状态提醒

pub mod extract;
pub mod health;

pub mod alertas;
pub mod cardapio;
pub mod comandas;
pub mod compras;
pub mod cozinha;
pub mod fornecedores;
pub mod relatorios;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
