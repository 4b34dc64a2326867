//! 航空便の座席在庫と予約を管理するドメイン駆動設計のサンプル

pub mod adapter;
pub mod application;
pub mod domain;
