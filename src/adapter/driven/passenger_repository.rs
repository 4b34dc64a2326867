use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{Passenger, PassengerId};
use crate::domain::port::{PassengerRepository, RepositoryError};
use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};

/// MySQL乗客リポジトリ
/// passengersテーブルに乗客を永続化する
#[derive(Clone)]
pub struct MySqlPassengerRepository {
    pool: Pool<MySql>,
}

impl MySqlPassengerRepository {
    /// 新しいMySQL乗客リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

/// 行から乗客を再構築する
/// JOINした結果にも使えるよう列名の接頭辞を受け取る
pub(super) fn passenger_from_row(row: &MySqlRow, prefix: &str) -> Result<Passenger, RepositoryError> {
    let column = |name: &str| format!("{}{}", prefix, name);
    let fetch_failed =
        |e: sqlx::Error| DatabaseError::MappingError(format!("乗客の列の読み取りに失敗しました: {}", e));

    let id: i64 = row.try_get(column("id").as_str()).map_err(fetch_failed)?;
    let full_name: String = row.try_get(column("full_name").as_str()).map_err(fetch_failed)?;
    let email: String = row
        .try_get(column("email_address").as_str())
        .map_err(fetch_failed)?;

    Passenger::from_persistence(PassengerId::new(id), full_name, email)
        .map_err(|e| RepositoryError::FetchFailed(format!("乗客の復元に失敗しました: {}", e)))
}

#[async_trait]
impl PassengerRepository for MySqlPassengerRepository {
    async fn save(&self, passenger: &Passenger) -> Result<Passenger, RepositoryError> {
        let id = match passenger.id().value() {
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO passengers (id, full_name, email_address)
                    VALUES (?, ?, ?)
                    ON DUPLICATE KEY UPDATE
                        full_name = VALUES(full_name),
                        email_address = VALUES(email_address)
                    "#,
                )
                .bind(id.value())
                .bind(passenger.name())
                .bind(passenger.email())
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::QueryError(format!("乗客の保存に失敗しました: {}", e)))?;
                id
            }
            None => {
                let result =
                    sqlx::query("INSERT INTO passengers (full_name, email_address) VALUES (?, ?)")
                        .bind(passenger.name())
                        .bind(passenger.email())
                        .execute(&self.pool)
                        .await
                        .map_err(|e| {
                            DatabaseError::QueryError(format!("乗客の登録に失敗しました: {}", e))
                        })?;
                PassengerId::new(result.last_insert_id() as i64)
            }
        };

        Passenger::from_persistence(id, passenger.name(), passenger.email())
            .map_err(|e| RepositoryError::OperationFailed(e.to_string()))
    }

    async fn find_by_id(
        &self,
        passenger_id: PassengerId,
    ) -> Result<Option<Passenger>, RepositoryError> {
        let row = sqlx::query("SELECT id, full_name, email_address FROM passengers WHERE id = ?")
            .bind(passenger_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("乗客の取得に失敗しました: {}", e)))?;

        row.map(|row| passenger_from_row(&row, "")).transpose()
    }
}
