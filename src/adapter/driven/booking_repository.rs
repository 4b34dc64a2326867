use super::flight_repository::flight_from_row;
use super::passenger_repository::passenger_from_row;
use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{Booking, BookingId, BookingStatus};
use crate::domain::port::{BookingRepository, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};

/// MySQL予約リポジトリ
/// bookingsテーブルには乗客と便のIDだけを保存し、読み込み時にJOINで復元する
#[derive(Clone)]
pub struct MySqlBookingRepository {
    pool: Pool<MySql>,
}

// 乗客と便の列は接頭辞付きの別名で取得する
const SELECT_BOOKINGS: &str = r#"
    SELECT
        b.id, b.status, b.created_at,
        p.id AS p_id, p.full_name AS p_full_name, p.email_address AS p_email_address,
        f.id AS f_id, f.origin AS f_origin, f.destination AS f_destination,
        f.capacity AS f_capacity, f.occupied_seats AS f_occupied_seats,
        f.departure_time AS f_departure_time, f.version AS f_version
    FROM bookings b
    INNER JOIN passengers p ON p.id = b.passenger_id
    INNER JOIN flights f ON f.id = b.flight_id
"#;

impl MySqlBookingRepository {
    /// 新しいMySQL予約リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

fn booking_from_row(row: &MySqlRow) -> Result<Booking, RepositoryError> {
    let fetch_failed =
        |e: sqlx::Error| DatabaseError::MappingError(format!("予約の列の読み取りに失敗しました: {}", e));

    let id: i64 = row.try_get("id").map_err(fetch_failed)?;
    let status: String = row.try_get("status").map_err(fetch_failed)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(fetch_failed)?;

    let status = BookingStatus::from_string(&status).map_err(|e| {
        RepositoryError::FetchFailed(format!("予約ステータスの解析に失敗しました: {}", e))
    })?;
    let passenger = passenger_from_row(row, "p_")?;
    let flight = flight_from_row(row, "f_")?;

    Booking::from_persistence(BookingId::new(id), passenger, flight, status, created_at)
        .map_err(|e| RepositoryError::FetchFailed(format!("予約の復元に失敗しました: {}", e)))
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
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

        let id = match booking.id().value() {
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO bookings (id, passenger_id, flight_id, status, created_at)
                    VALUES (?, ?, ?, ?, ?)
                    ON DUPLICATE KEY UPDATE
                        passenger_id = VALUES(passenger_id),
                        flight_id = VALUES(flight_id),
                        status = VALUES(status),
                        created_at = VALUES(created_at)
                    "#,
                )
                .bind(id.value())
                .bind(passenger_id.value())
                .bind(flight_id.value())
                .bind(booking.status().to_string())
                .bind(booking.created_at())
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::QueryError(format!("予約の保存に失敗しました: {}", e)))?;
                id
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO bookings (passenger_id, flight_id, status, created_at)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(passenger_id.value())
                .bind(flight_id.value())
                .bind(booking.status().to_string())
                .bind(booking.created_at())
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::QueryError(format!("予約の登録に失敗しました: {}", e)))?;
                BookingId::new(result.last_insert_id() as i64)
            }
        };

        Booking::from_persistence(
            id,
            booking.passenger().clone(),
            booking.flight().clone(),
            booking.status(),
            booking.created_at(),
        )
        .map_err(|e| RepositoryError::OperationFailed(e.to_string()))
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, RepositoryError> {
        let query = format!("{} WHERE b.id = ?", SELECT_BOOKINGS);
        let row = sqlx::query(&query)
            .bind(booking_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("予約の取得に失敗しました: {}", e)))?;

        row.map(|row| booking_from_row(&row)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        let query = format!("{} ORDER BY b.id ASC", SELECT_BOOKINGS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("予約一覧の取得に失敗しました: {}", e)))?;

        rows.iter().map(booking_from_row).collect()
    }
}
