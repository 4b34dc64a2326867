// アプリケーション層
// ユースケースを実装し、ドメインとポートを協調させる

mod error;
pub mod service;

pub use error::{ApplicationError, ResourceNotFound};
