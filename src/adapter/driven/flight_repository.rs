use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{Flight, FlightId};
use crate::domain::port::{FlightRepository, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};

/// MySQL便リポジトリ
/// flightsテーブルに便を永続化する
///
/// 既存の便の更新は `version` 列が一致する行だけを対象にする
#[derive(Clone)]
pub struct MySqlFlightRepository {
    pool: Pool<MySql>,
}

impl MySqlFlightRepository {
    /// 新しいMySQL便リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    async fn exists(&self, flight_id: FlightId) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM flights WHERE id = ?")
            .bind(flight_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("便の存在確認に失敗しました: {}", e)))?;
        Ok(row.is_some())
    }
}

/// 行から便を再構築する
/// JOINした結果にも使えるよう列名の接頭辞を受け取る
pub(super) fn flight_from_row(row: &MySqlRow, prefix: &str) -> Result<Flight, RepositoryError> {
    let column = |name: &str| format!("{}{}", prefix, name);
    let fetch_failed =
        |e: sqlx::Error| DatabaseError::MappingError(format!("便の列の読み取りに失敗しました: {}", e));

    let id: i64 = row.try_get(column("id").as_str()).map_err(fetch_failed)?;
    let origin: String = row.try_get(column("origin").as_str()).map_err(fetch_failed)?;
    let destination: String = row
        .try_get(column("destination").as_str())
        .map_err(fetch_failed)?;
    let capacity: u32 = row.try_get(column("capacity").as_str()).map_err(fetch_failed)?;
    let occupied_seats: u32 = row
        .try_get(column("occupied_seats").as_str())
        .map_err(fetch_failed)?;
    let departure_time: DateTime<Utc> = row
        .try_get(column("departure_time").as_str())
        .map_err(fetch_failed)?;
    let version: u64 = row.try_get(column("version").as_str()).map_err(fetch_failed)?;

    Flight::from_persistence(
        FlightId::new(id),
        origin,
        destination,
        capacity,
        occupied_seats,
        departure_time,
        version,
    )
    .map_err(|e| RepositoryError::FetchFailed(format!("便の復元に失敗しました: {}", e)))
}

#[async_trait]
impl FlightRepository for MySqlFlightRepository {
    async fn save(&self, flight: &Flight) -> Result<Flight, RepositoryError> {
        let (id, version) = match flight.id().value() {
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO flights
                        (origin, destination, capacity, occupied_seats, departure_time, version)
                    VALUES (?, ?, ?, ?, ?, 0)
                    "#,
                )
                .bind(flight.origin())
                .bind(flight.destination())
                .bind(flight.capacity())
                .bind(flight.occupied_seats())
                .bind(flight.departure_time())
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::QueryError(format!("便の登録に失敗しました: {}", e)))?;
                (FlightId::new(result.last_insert_id() as i64), 0)
            }
            Some(id) => {
                let next_version = flight.version() + 1;
                let result = sqlx::query(
                    r#"
                    UPDATE flights
                    SET origin = ?, destination = ?, capacity = ?, occupied_seats = ?,
                        departure_time = ?, version = ?
                    WHERE id = ? AND version = ?
                    "#,
                )
                .bind(flight.origin())
                .bind(flight.destination())
                .bind(flight.capacity())
                .bind(flight.occupied_seats())
                .bind(flight.departure_time())
                .bind(next_version)
                .bind(id.value())
                .bind(flight.version())
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::QueryError(format!("便の更新に失敗しました: {}", e)))?;

                if result.rows_affected() == 0 {
                    if self.exists(id).await? {
                        return Err(RepositoryError::Conflict(format!(
                            "Flight {} was modified concurrently (expected version {})",
                            id,
                            flight.version()
                        )));
                    }
                    sqlx::query(
                        r#"
                        INSERT INTO flights
                            (id, origin, destination, capacity, occupied_seats, departure_time, version)
                        VALUES (?, ?, ?, ?, ?, ?, ?)
                        "#,
                    )
                    .bind(id.value())
                    .bind(flight.origin())
                    .bind(flight.destination())
                    .bind(flight.capacity())
                    .bind(flight.occupied_seats())
                    .bind(flight.departure_time())
                    .bind(next_version)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        DatabaseError::QueryError(format!("便の登録に失敗しました: {}", e))
                    })?;
                }
                (id, next_version)
            }
        };

        Flight::from_persistence(
            id,
            flight.origin(),
            flight.destination(),
            flight.capacity(),
            flight.occupied_seats(),
            flight.departure_time(),
            version,
        )
        .map_err(|e| RepositoryError::OperationFailed(e.to_string()))
    }

    async fn find_by_id(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, origin, destination, capacity, occupied_seats, departure_time, version
            FROM flights
            WHERE id = ?
            "#,
        )
        .bind(flight_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("便の取得に失敗しました: {}", e)))?;

        row.map(|row| flight_from_row(&row, "")).transpose()
    }
}
