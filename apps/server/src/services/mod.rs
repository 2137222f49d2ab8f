//! Service layer.
//!
//! Handlers stay thin; anything that spans more than one repository call
//! lives here.

pub mod dashboard_service;
pub mod order_service;
pub mod user_service;

pub use dashboard_service::DashboardService;
pub use order_service::OrderService;
pub use user_service::UserService;
