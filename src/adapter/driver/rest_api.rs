use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapter::driver::request_dto::{
    CreateBookingRequest, CreateFlightRequest, CreatePassengerRequest,
};
use crate::adapter::driver::response_dto::{BookingResponse, FlightResponse, PassengerResponse};
use crate::application::service::{
    BookingApplicationService, FlightApplicationService, PassengerApplicationService,
};
use crate::application::{ApplicationError, ResourceNotFound};
use crate::domain::error::DomainError;
use crate::domain::model::{BookingId, FlightId, PassengerId};
use crate::domain::port::RepositoryError;

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

// アプリケーションサービスを含む状態
#[derive(Clone)]
pub struct AppState {
    pub passenger_service: Arc<PassengerApplicationService>,
    pub flight_service: Arc<FlightApplicationService>,
    pub booking_service: Arc<BookingApplicationService>,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/passengers", post(register_passenger))
        .route("/passengers/:passenger_id", get(get_passenger))
        .route("/flights", post(schedule_flight))
        .route("/flights/:flight_id", get(get_flight))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/:booking_id", get(get_booking))
        .route("/bookings/:booking_id/cancel", post(cancel_booking))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "flight-booking",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// 乗客登録エンドポイント
async fn register_passenger(
    State(state): State<AppState>,
    Json(request): Json<CreatePassengerRequest>,
) -> ApiResult<(StatusCode, Json<PassengerResponse>)> {
    let (name, email) = request.into_parts().map_err(map_domain_error)?;

    match state.passenger_service.register_passenger(name, email).await {
        Ok(passenger) => Ok((
            StatusCode::CREATED,
            Json(PassengerResponse::from_passenger(&passenger)),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

async fn get_passenger(
    State(state): State<AppState>,
    Path(passenger_id): Path<i64>,
) -> ApiResult<Json<PassengerResponse>> {
    let passenger = state
        .passenger_service
        .get_passenger(PassengerId::new(passenger_id))
        .await
        .map_err(map_application_error)?;
    Ok(Json(PassengerResponse::from_passenger(&passenger)))
}

// 便登録エンドポイント
async fn schedule_flight(
    State(state): State<AppState>,
    Json(request): Json<CreateFlightRequest>,
) -> ApiResult<(StatusCode, Json<FlightResponse>)> {
    let params = request.into_params().map_err(map_domain_error)?;

    let flight = state
        .flight_service
        .schedule_flight(
            params.origin,
            params.destination,
            params.capacity,
            params.departure_time,
        )
        .await
        .map_err(map_application_error)?;
    Ok((StatusCode::CREATED, Json(FlightResponse::from_flight(&flight))))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> ApiResult<Json<FlightResponse>> {
    let flight = state
        .flight_service
        .get_flight(FlightId::new(flight_id))
        .await
        .map_err(map_application_error)?;
    Ok(Json(FlightResponse::from_flight(&flight)))
}

// 予約作成エンドポイント
// 現在時刻は受け付けた時点のもの
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let (passenger_id, flight_id) = request.into_ids().map_err(map_domain_error)?;

    let booking = state
        .booking_service
        .create_booking(passenger_id, flight_id, Utc::now())
        .await
        .map_err(map_application_error)?;
    Ok((StatusCode::CREATED, Json(BookingResponse::from_booking(&booking))))
}

// 予約一覧取得エンドポイント
async fn list_bookings(State(state): State<AppState>) -> ApiResult<Json<Vec<BookingResponse>>> {
    let bookings = state
        .booking_service
        .list_bookings()
        .await
        .map_err(map_application_error)?;
    Ok(Json(
        bookings.iter().map(BookingResponse::from_booking).collect(),
    ))
}

// 予約取得エンドポイント
async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> ApiResult<Json<BookingResponse>> {
    let booking_id = BookingId::new(booking_id);
    match state.booking_service.get_booking(booking_id).await {
        Ok(Some(booking)) => Ok(Json(BookingResponse::from_booking(&booking))),
        Ok(None) => Err(map_application_error(
            ResourceNotFound::Booking(booking_id).into(),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 予約キャンセルエンドポイント
async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state
        .booking_service
        .cancel_booking(BookingId::new(booking_id), Utc::now())
        .await
        .map_err(map_application_error)?;
    Ok(Json(BookingResponse::from_booking(&booking)))
}

fn api_error(status: StatusCode, code: &str, error: String) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error,
            code: code.to_string(),
        }),
    )
}

// アプリケーションエラーをHTTPレスポンスにマッピング
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ApplicationError::Domain(domain_err) => map_domain_error(domain_err),
        ApplicationError::NotFound(not_found) => {
            api_error(StatusCode::NOT_FOUND, "NOT_FOUND", not_found.to_string())
        }
        ApplicationError::Repository(RepositoryError::Conflict(msg)) => {
            api_error(StatusCode::CONFLICT, "CONCURRENT_MODIFICATION", msg)
        }
        ApplicationError::Repository(repo_err) => {
            tracing::error!(error = %repo_err, "repository failure");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "REPOSITORY_ERROR",
                repo_err.to_string(),
            )
        }
    }
}

// ドメインエラーをHTTPレスポンスにマッピング
fn map_domain_error(err: DomainError) -> (StatusCode, Json<ApiError>) {
    let message = err.to_string();
    match err {
        DomainError::InvalidArgument(msg) => {
            api_error(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg)
        }
        DomainError::FlightAlreadyDeparted(_) => {
            api_error(StatusCode::CONFLICT, "FLIGHT_ALREADY_DEPARTED", message)
        }
        DomainError::FlightOverbooked(_) => {
            api_error(StatusCode::CONFLICT, "FLIGHT_OVERBOOKED", message)
        }
        DomainError::EmptyFlightSeatRelease(_) => {
            api_error(StatusCode::CONFLICT, "EMPTY_FLIGHT_SEAT_RELEASE", message)
        }
        DomainError::BookingAlreadyCancelled(_) => {
            api_error(StatusCode::CONFLICT, "BOOKING_ALREADY_CANCELLED", message)
        }
        DomainError::BookingCancellationWindowClosed(_) => api_error(
            StatusCode::CONFLICT,
            "BOOKING_CANCELLATION_WINDOW_CLOSED",
            message,
        ),
    }
}

#[cfg(test)]
mod error_handling_tests {
    use super::*;
    use crate::domain::model::Identity;

    #[test]
    fn test_map_application_error_not_found() {
        let app_error: ApplicationError = ResourceNotFound::Flight(FlightId::new(467)).into();
        let (status, Json(api_error)) = map_application_error(app_error);

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.code, "NOT_FOUND");
        assert_eq!(api_error.error, "Flight with ID 467 not found.");
    }

    #[test]
    fn test_invalid_argument_keeps_message_without_prefix() {
        let (status, Json(api_error)) =
            map_domain_error(DomainError::invalid_argument("Capacity must be positive"));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error, "Capacity must be positive");
    }

    #[test]
    fn test_state_violations_are_conflicts() {
        let (status, Json(api_error)) = map_domain_error(DomainError::FlightOverbooked(
            Identity::Persisted(FlightId::new(467)),
        ));

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(api_error.code, "FLIGHT_OVERBOOKED");
        assert_eq!(
            api_error.error,
            "Flight 467 is fully booked. No seats available."
        );
    }

    #[test]
    fn test_repository_errors() {
        let (status, _) = map_application_error(
            RepositoryError::Conflict("Flight 1 was modified concurrently".to_string()).into(),
        );
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, Json(api_error)) = map_application_error(
            RepositoryError::ConnectionFailed("refused".to_string()).into(),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.code, "REPOSITORY_ERROR");
    }
}
