//! 企业微信群机器人 webhook 客户端
pub mod api;
pub mod client;
pub mod error;
pub mod models;

// 重新导出主要类型以便外部使用
pub use client::{WxWorkBot, BOT_KEY_ENV, DEFAULT_ENDPOINT};
pub use error::WxWorkError;
pub use models::*;
