use crate::domain::model::{BookingId, FlightId, Identity};

/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// 無効な引数（例: 空の出発地、0以下の座席数）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// 出発済みの便に対する操作
    #[error("Flight {0} has already departed. Operations are not allowed.")]
    FlightAlreadyDeparted(Identity<FlightId>),
    /// 満席の便への座席予約
    #[error("Flight {0} is fully booked. No seats available.")]
    FlightOverbooked(Identity<FlightId>),
    /// 使用中の座席がない便での座席解放
    #[error("Cannot release seat for Flight {0} because it has no occupied seats.")]
    EmptyFlightSeatRelease(Identity<FlightId>),
    /// キャンセル済みの予約を再度キャンセルしようとした
    #[error("Booking {0} is already cancelled and cannot be cancelled again.")]
    BookingAlreadyCancelled(Identity<BookingId>),
    /// 出発後の予約キャンセル
    #[error("Cannot cancel Booking {0} because the flight has already departed.")]
    BookingCancellationWindowClosed(Identity<BookingId>),
}

impl DomainError {
    pub(crate) fn invalid_argument(message: &str) -> Self {
        DomainError::InvalidArgument(message.to_string())
    }
}
