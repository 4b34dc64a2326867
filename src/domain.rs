// ドメイン層
// 集約・値オブジェクト・ビジネスルールと、外部に依存するポートを定義

pub mod error;
pub mod model;
pub mod port;
pub mod validation;
