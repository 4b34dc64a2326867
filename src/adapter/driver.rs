// 駆動する側アダプター（REST API）

pub mod request_dto;
pub mod response_dto;
pub mod rest_api;

pub use rest_api::{create_router, ApiError, AppState};
