use crate::domain::error::DomainError;
use crate::domain::model::{FlightId, Identity};
use crate::domain::validation;
use chrono::{DateTime, Utc};

/// 便集約
/// 座席数と使用中座席数のカウンタを管理する
///
/// 不変条件: `0 <= occupied_seats <= capacity`
#[derive(Debug, Clone)]
pub struct Flight {
    id: Identity<FlightId>,
    origin: String,
    destination: String,
    capacity: u32,
    occupied_seats: u32,
    departure_time: DateTime<Utc>,
    version: u64,
}

impl Flight {
    fn build(
        id: Identity<FlightId>,
        origin: String,
        destination: String,
        capacity: u32,
        occupied_seats: u32,
        departure_time: DateTime<Utc>,
        version: u64,
    ) -> Result<Self, DomainError> {
        validation::not_blank(&origin, "Origin cannot be blank")?;
        validation::not_blank(&destination, "Destination cannot be blank")?;
        validation::is_positive(capacity, "Capacity must be positive")?;
        validation::is_greater_or_equal_than(
            capacity,
            occupied_seats,
            "Occupied seats cannot exceed capacity",
        )?;
        Ok(Self {
            id,
            origin,
            destination,
            capacity,
            occupied_seats,
            departure_time,
            version,
        })
    }

    /// 未永続化の便を作成
    /// 使用中座席数は0から始まる
    pub fn create(
        origin: impl Into<String>,
        destination: impl Into<String>,
        capacity: u32,
        departure_time: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::build(
            Identity::Transient,
            origin.into(),
            destination.into(),
            capacity,
            0,
            departure_time,
            0,
        )
    }

    /// ストアから取得したデータで便を再構築
    ///
    /// # Arguments
    /// * `version` - 楽観ロック用のバージョン
    pub fn from_persistence(
        id: FlightId,
        origin: impl Into<String>,
        destination: impl Into<String>,
        capacity: u32,
        occupied_seats: u32,
        departure_time: DateTime<Utc>,
        version: u64,
    ) -> Result<Self, DomainError> {
        Self::build(
            Identity::Persisted(id),
            origin.into(),
            destination.into(),
            capacity,
            occupied_seats,
            departure_time,
            version,
        )
    }

    pub fn id(&self) -> Identity<FlightId> {
        self.id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn occupied_seats(&self) -> u32 {
        self.occupied_seats
    }

    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    /// ストアが保存のたびに進めるバージョン
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 空席数
    pub fn available_seats(&self) -> u32 {
        self.capacity - self.occupied_seats
    }

    /// 指定時刻の時点で出発済みか（出発時刻ちょうどは出発前とみなす）
    pub fn has_departed_at(&self, current_time: DateTime<Utc>) -> bool {
        current_time > self.departure_time
    }

    /// 座席を1つ予約する
    ///
    /// # Returns
    /// * `Ok(())` - 予約成功
    /// * `Err(DomainError::FlightAlreadyDeparted)` - 出発済み
    /// * `Err(DomainError::FlightOverbooked)` - 満席
    pub fn reserve_seat(&mut self, current_time: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_not_departed(current_time)?;
        if self.occupied_seats >= self.capacity {
            return Err(DomainError::FlightOverbooked(self.id));
        }
        self.occupied_seats += 1;
        Ok(())
    }

    /// 座席を1つ解放する
    ///
    /// # Returns
    /// * `Ok(())` - 解放成功
    /// * `Err(DomainError::FlightAlreadyDeparted)` - 出発済み
    /// * `Err(DomainError::EmptyFlightSeatRelease)` - 使用中の座席がない
    pub fn release_seat(&mut self, current_time: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_not_departed(current_time)?;
        if self.occupied_seats == 0 {
            return Err(DomainError::EmptyFlightSeatRelease(self.id));
        }
        self.occupied_seats -= 1;
        Ok(())
    }

    fn ensure_not_departed(&self, current_time: DateTime<Utc>) -> Result<(), DomainError> {
        if self.has_departed_at(current_time) {
            return Err(DomainError::FlightAlreadyDeparted(self.id));
        }
        Ok(())
    }
}

impl PartialEq for Flight {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.id.same_as(&other.id)
    }
}
