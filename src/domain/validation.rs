// 事前条件チェック
// すべての集約が生成時・変更時の不変条件の検証に使う状態を持たない関数群

use crate::domain::error::DomainError;

/// 値が存在することを確認し、中身を取り出す
pub fn required<T>(value: Option<T>, message: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::invalid_argument(message))
}

/// 文字列が空または空白のみでないことを確認
pub fn not_blank(value: &str, message: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(message));
    }
    Ok(())
}

/// 値が0より大きいことを確認
pub fn is_positive<N>(value: N, message: &str) -> Result<(), DomainError>
where
    N: PartialOrd + Default,
{
    if value <= N::default() {
        return Err(DomainError::invalid_argument(message));
    }
    Ok(())
}

/// `value >= threshold` であることを確認
pub fn is_greater_or_equal_than<N>(value: N, threshold: N, message: &str) -> Result<(), DomainError>
where
    N: PartialOrd,
{
    if value < threshold {
        return Err(DomainError::invalid_argument(message));
    }
    Ok(())
}
