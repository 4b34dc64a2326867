use crate::domain::model::{
    Booking, BookingId, BookingStatus, Flight, FlightId, Passenger, PassengerId,
};
use crate::domain::port::{BookingRepository, FlightRepository, PassengerRepository, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

// メモリ上のテーブル
// IDは1から順に採番する
struct Table<K, V> {
    rows: BTreeMap<K, V>,
    next_id: i64,
}

impl<K: Ord, V> Table<K, V> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // 明示的なIDで書き込まれた場合に採番が衝突しないようにする
    fn observe_id(&mut self, id: i64) {
        if id >= self.next_id {
            self.next_id = id + 1;
        }
    }
}

fn rebuild_failed(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::OperationFailed(e.to_string())
}

/// インメモリ乗客リポジトリ
pub struct InMemoryPassengerRepository {
    table: Mutex<Table<PassengerId, Passenger>>,
}

impl InMemoryPassengerRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for InMemoryPassengerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PassengerRepository for InMemoryPassengerRepository {
    async fn save(&self, passenger: &Passenger) -> Result<Passenger, RepositoryError> {
        let mut table = self.table.lock().await;
        let id = match passenger.id().value() {
            Some(id) => {
                table.observe_id(id.value());
                id
            }
            None => PassengerId::new(table.allocate_id()),
        };

        let saved = Passenger::from_persistence(id, passenger.name(), passenger.email())
            .map_err(rebuild_failed)?;
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(
        &self,
        passenger_id: PassengerId,
    ) -> Result<Option<Passenger>, RepositoryError> {
        Ok(self.table.lock().await.rows.get(&passenger_id).cloned())
    }
}

/// インメモリ便リポジトリ
/// 保存済みの便はバージョンが一致する場合のみ上書きする
pub struct InMemoryFlightRepository {
    table: Mutex<Table<FlightId, Flight>>,
}

impl InMemoryFlightRepository {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table::new()),
        }
    }
}

impl Default for InMemoryFlightRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightRepository {
    async fn save(&self, flight: &Flight) -> Result<Flight, RepositoryError> {
        let mut table = self.table.lock().await;

        let (id, version) = match flight.id().value() {
            None => (FlightId::new(table.allocate_id()), 0),
            Some(id) => {
                if let Some(stored) = table.rows.get(&id) {
                    if stored.version() != flight.version() {
                        return Err(RepositoryError::Conflict(format!(
                            "Flight {} was modified concurrently (expected version {}, found {})",
                            id,
                            flight.version(),
                            stored.version()
                        )));
                    }
                }
                table.observe_id(id.value());
                (id, flight.version() + 1)
            }
        };

        let saved = Flight::from_persistence(
            id,
            flight.origin(),
            flight.destination(),
            flight.capacity(),
            flight.occupied_seats(),
            flight.departure_time(),
            version,
        )
        .map_err(rebuild_failed)?;
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError> {
        Ok(self.table.lock().await.rows.get(&flight_id).cloned())
    }
}

// 予約の行
// 乗客と便はIDだけを持ち、読み込み時に各ストアから引き直す
#[derive(Clone)]
struct BookingRow {
    passenger_id: PassengerId,
    flight_id: FlightId,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

/// インメモリ予約リポジトリ
/// 乗客と便は共有している各リポジトリの現在の状態で復元する
pub struct InMemoryBookingRepository {
    table: Mutex<Table<BookingId, BookingRow>>,
    passengers: Arc<InMemoryPassengerRepository>,
    flights: Arc<InMemoryFlightRepository>,
}

impl InMemoryBookingRepository {
    /// 新しいインメモリ予約リポジトリを作成
    ///
    /// # Arguments
    /// * `passengers` - 予約が参照する乗客のストア
    /// * `flights` - 予約が参照する便のストア
    pub fn new(
        passengers: Arc<InMemoryPassengerRepository>,
        flights: Arc<InMemoryFlightRepository>,
    ) -> Self {
        Self {
            table: Mutex::new(Table::new()),
            passengers,
            flights,
        }
    }

    async fn resolve(&self, id: BookingId, row: BookingRow) -> Result<Booking, RepositoryError> {
        let passenger = self
            .passengers
            .find_by_id(row.passenger_id)
            .await?
            .ok_or_else(|| {
                RepositoryError::FetchFailed(format!(
                    "Booking {} references missing Passenger {}",
                    id, row.passenger_id
                ))
            })?;
        let flight = self.flights.find_by_id(row.flight_id).await?.ok_or_else(|| {
            RepositoryError::FetchFailed(format!(
                "Booking {} references missing Flight {}",
                id, row.flight_id
            ))
        })?;

        Booking::from_persistence(id, passenger, flight, row.status, row.created_at)
            .map_err(|e| RepositoryError::FetchFailed(e.to_string()))
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
        // 保存済みの乗客と便であることはBookingの生成時に保証されている
        let passenger_id = booking
            .passenger()
            .id()
            .value()
            .ok_or_else(|| RepositoryError::OperationFailed("passenger has no id".to_string()))?;
        let flight_id = booking
            .flight()
            .id()
            .value()
            .ok_or_else(|| RepositoryError::OperationFailed("flight has no id".to_string()))?;

        let mut table = self.table.lock().await;
        let id = match booking.id().value() {
            Some(id) => {
                table.observe_id(id.value());
                id
            }
            None => BookingId::new(table.allocate_id()),
        };
        table.rows.insert(
            id,
            BookingRow {
                passenger_id,
                flight_id,
                status: booking.status(),
                created_at: booking.created_at(),
            },
        );

        Booking::from_persistence(
            id,
            booking.passenger().clone(),
            booking.flight().clone(),
            booking.status(),
            booking.created_at(),
        )
        .map_err(rebuild_failed)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        // 他のストアを引く前にロックを手放す
        let row = self.table.lock().await.rows.get(&booking_id).cloned();
        match row {
            Some(row) => self.resolve(booking_id, row).await.map(Some),
            None => Ok(None),
        }
    }

    /// ID昇順で返す
    async fn find_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        let rows: Vec<(BookingId, BookingRow)> = self
            .table
            .lock()
            .await
            .rows
            .iter()
            .map(|(id, row)| (*id, row.clone()))
            .collect();

        let mut bookings = Vec::with_capacity(rows.len());
        for (id, row) in rows {
            bookings.push(self.resolve(id, row).await?);
        }
        Ok(bookings)
    }
}
