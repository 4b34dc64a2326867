use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

use std::fmt;

/// エンティティの同一性
/// 永続化されるまではIDを持たない（Transient）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity<I> {
    /// 未永続化
    Transient,
    /// ストアが採番したIDを持つ
    Persisted(I),
}

impl<I: Copy + PartialEq> Identity<I> {
    /// IDを取得（未永続化ならNone）
    pub fn value(&self) -> Option<I> {
        match self {
            Identity::Transient => None,
            Identity::Persisted(id) => Some(*id),
        }
    }

    /// 永続化済みかどうか
    pub fn is_persisted(&self) -> bool {
        matches!(self, Identity::Persisted(_))
    }

    /// 同一エンティティを指しているか
    /// 未永続化の同一性は何とも一致しない
    pub fn same_as(&self, other: &Identity<I>) -> bool {
        match (self, other) {
            (Identity::Persisted(a), Identity::Persisted(b)) => a == b,
            _ => false,
        }
    }
}

impl<I: fmt::Display> fmt::Display for Identity<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Transient => write!(f, "unsaved"),
            Identity::Persisted(id) => write!(f, "{}", id),
        }
    }
}

/// 乗客の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassengerId(i64);

impl PassengerId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 便の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(i64);

impl FlightId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 予約の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 予約のステータス
/// 遷移は Confirmed → Cancelled のみ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// 確定（座席を1つ占有している）
    Confirmed,
    /// キャンセル済み（終端状態）
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", status_str)
    }
}

impl BookingStatus {
    /// 文字列からBookingStatusを作成
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            _ => Err(DomainError::InvalidArgument(format!(
                "Unknown booking status: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_identity_never_matches() {
        let a: Identity<FlightId> = Identity::Transient;
        let b: Identity<FlightId> = Identity::Transient;
        assert!(!a.same_as(&b));
        assert!(!a.same_as(&Identity::Persisted(FlightId::new(1))));
    }

    #[test]
    fn test_persisted_identity_matches_by_value() {
        let a = Identity::Persisted(FlightId::new(7));
        assert!(a.same_as(&Identity::Persisted(FlightId::new(7))));
        assert!(!a.same_as(&Identity::Persisted(FlightId::new(8))));
        assert_eq!(a.value(), Some(FlightId::new(7)));
        assert!(a.is_persisted());
    }

    #[test]
    fn test_booking_status_string_conversion() {
        for status in [BookingStatus::Confirmed, BookingStatus::Cancelled] {
            assert_eq!(BookingStatus::from_string(&status.to_string()), Ok(status));
        }
        assert!(BookingStatus::from_string("confirmed").is_err()); // 大文字小文字が違う
        assert!(BookingStatus::from_string("").is_err());
    }
}
