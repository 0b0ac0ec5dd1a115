//! HTTP 介面：追蹤頁面與 `/track` 批次查詢端點

pub mod page;
pub mod routes;
pub mod state;


pub use routes::{create_router, create_router_with_body_limit, ApiError};
pub use state::AppState;
