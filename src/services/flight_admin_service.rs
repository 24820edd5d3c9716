use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AdminError, ValidationErrors};
use crate::http::api_client::{ApiClient, ApiError, HttpMethod, QueryParams};
use crate::models::flight::{FlightRoute, GenerateSchedulesResult, RouteForm, ScheduleForm};
use crate::models::lenient::parse_datetime;
use crate::models::pagination::{PaginationState, ServerPagination};
use crate::services::refiner::parse_hour;

const ROUTES_PATH: &str = "flights/admin/routes";
const SCHEDULES_PATH: &str = "flights/admin/schedules";
const GENERATE_PATH: &str = "flights/admin/generate-schedules";

pub const ROUTES_PAGE_SIZE: u32 = 10;
const SCHEDULE_STATUSES: [&str; 4] = ["scheduled", "delayed", "cancelled", "completed"];

#[derive(Debug, Clone, Serialize)]
pub struct RoutePage {
    pub routes: Vec<FlightRoute>,
    pub pagination: PaginationState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    /// The route still has future schedules; it can only be deactivated.
    HasFutureSchedules { message: String },
}

pub struct FlightAdminService {
    client: Arc<dyn ApiClient>,
}

impl FlightAdminService {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_routes(&self, page: u32, search: Option<&str>) -> Result<RoutePage, ApiError> {
        let page = page.max(1);
        let mut params = QueryParams::new()
            .with("page", page.to_string())
            .with("limit", ROUTES_PAGE_SIZE.to_string());
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            params.push("search", search);
        }

        let body = self.client.get_json(ROUTES_PATH, &params).await?;
        let rows = body
            .get("routes")
            .or_else(|| body.get("data"))
            .and_then(Value::as_array)
            .cloned()
            .or_else(|| body.as_array().cloned())
            .unwrap_or_default();
        let routes: Vec<FlightRoute> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(route) => Some(route),
                Err(e) => {
                    warn!("Skipping undecodable flight route: {}", e);
                    None
                }
            })
            .collect();

        let pagination = match body
            .get("pagination")
            .and_then(|p| serde_json::from_value::<ServerPagination>(p.clone()).ok())
        {
            Some(meta) => PaginationState::from_server(&meta, page, ROUTES_PAGE_SIZE),
            None => PaginationState::from_total(page, ROUTES_PAGE_SIZE, routes.len() as u64),
        };
        Ok(RoutePage { routes, pagination })
    }

    pub async fn create_route(&self, form: &RouteForm) -> Result<Value, AdminError> {
        validate_route(form)?;
        let body = route_payload(form)?;
        let created = self
            .client
            .send_json(HttpMethod::Post, ROUTES_PATH, Some(&body))
            .await?;
        info!("Created flight route {}", form.flight_number);
        Ok(created)
    }

    pub async fn update_route(&self, id: u64, form: &RouteForm) -> Result<Value, AdminError> {
        validate_route(form)?;
        let body = route_payload(form)?;
        let path = format!("{}/{}", ROUTES_PATH, id);
        Ok(self.client.send_json(HttpMethod::Put, &path, Some(&body)).await?)
    }

    /// A 409 from the backend means the route has schedules in the future.
    pub async fn delete_route(&self, id: u64) -> Result<DeleteOutcome, ApiError> {
        let path = format!("{}/{}", ROUTES_PATH, id);
        match self.client.send_json(HttpMethod::Delete, &path, None).await {
            Ok(_) => {
                info!("Deleted flight route {}", id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) if err.status_code() == Some(409) => Ok(DeleteOutcome::HasFutureSchedules {
                message: err.backend_message().unwrap_or_else(|| {
                    "Tuyến bay còn lịch bay trong tương lai. Bạn có thể ngừng hoạt động tuyến này."
                        .to_string()
                }),
            }),
            Err(err) => Err(err),
        }
    }

    pub async fn deactivate_route(&self, id: u64) -> Result<Value, ApiError> {
        let path = format!("{}/{}", ROUTES_PATH, id);
        let body = json!({ "is_active": false });
        let response = self.client.send_json(HttpMethod::Put, &path, Some(&body)).await?;
        info!("Deactivated flight route {}", id);
        Ok(response)
    }

    pub async fn update_schedule(&self, id: u64, form: &ScheduleForm) -> Result<Value, AdminError> {
        validate_schedule(form)?;
        let path = format!("{}/{}", SCHEDULES_PATH, id);
        let mut body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
        if form.status.trim().is_empty() {
            body["status"] = json!("scheduled");
        }
        Ok(self.client.send_json(HttpMethod::Put, &path, Some(&body)).await?)
    }

    /// Asks the backend to roll schedules forward; its message is passed through.
    pub async fn generate_schedules(&self) -> Result<GenerateSchedulesResult, ApiError> {
        let body = self
            .client
            .send_json(HttpMethod::Post, GENERATE_PATH, Some(&json!({})))
            .await?;
        let result = match serde_json::from_value::<GenerateSchedulesResult>(body.clone()) {
            Ok(result) => result,
            Err(e) => {
                warn!("Unexpected generate-schedules response ({}): {}", e, body);
                GenerateSchedulesResult {
                    message: body
                        .get("message")
                        .and_then(Value::as_str)
                        .or_else(|| body.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    ..GenerateSchedulesResult::default()
                }
            }
        };
        info!(
            "Schedule generation: {} created, {} skipped",
            result.generated_count, result.skipped_routes
        );
        Ok(result)
    }
}

/// Seat classes and operating days travel as JSON columns.
fn route_payload(form: &RouteForm) -> Result<Value, ApiError> {
    let mut body = serde_json::to_value(form).map_err(|e| ApiError::Decode(e.to_string()))?;
    body["airline"] = json!(form.airline.trim());
    body["flight_number"] = json!(form.flight_number.trim().to_uppercase());
    body["departure_airport"] = json!(form.departure_airport.trim().to_uppercase());
    body["arrival_airport"] = json!(form.arrival_airport.trim().to_uppercase());
    Ok(body)
}

fn positive(value: f64) -> bool {
    value > 0.0
}

fn valid_clock_time(raw: &str) -> bool {
    let mut parts = raw.trim().splitn(3, ':');
    let hour_ok = parse_hour(raw).is_some_and(|h| h < 24);
    let minute_ok = parts
        .nth(1)
        .and_then(|m| m.parse::<u32>().ok())
        .is_some_and(|m| m < 60);
    hour_ok && minute_ok
}

pub fn validate_route(form: &RouteForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("airline", &form.airline, "Vui lòng nhập hãng bay");
    errors.require("flight_number", &form.flight_number, "Vui lòng nhập số hiệu chuyến bay");
    errors.require("departure_airport", &form.departure_airport, "Vui lòng chọn sân bay đi");
    errors.require("arrival_airport", &form.arrival_airport, "Vui lòng chọn sân bay đến");

    if !form.departure_airport.trim().is_empty()
        && form
            .departure_airport
            .trim()
            .eq_ignore_ascii_case(form.arrival_airport.trim())
    {
        errors.add("arrival_airport", "Sân bay đến phải khác sân bay đi");
    }

    if !valid_clock_time(&form.departure_time) {
        errors.add("departure_time", "Giờ khởi hành không hợp lệ (HH:MM)");
    }
    if !valid_clock_time(&form.arrival_time) {
        errors.add("arrival_time", "Giờ đến không hợp lệ (HH:MM)");
    } else if form.arrival_time.trim() == form.departure_time.trim() {
        errors.add("arrival_time", "Giờ đến phải khác giờ khởi hành");
    }

    if !positive(form.base_price) {
        errors.add("base_price", "Giá vé phải lớn hơn 0");
    }
    if form.total_seats == 0 {
        errors.add("total_seats", "Số ghế phải lớn hơn 0");
    }

    if form
        .seat_classes
        .iter()
        .any(|c| c.name.trim().is_empty() || !positive(c.price) || c.seat_count == 0)
    {
        errors.add("seat_classes", "Mỗi hạng ghế cần tên, giá và số ghế hợp lệ");
    } else {
        let class_seats: u32 = form.seat_classes.iter().map(|c| c.seat_count).sum();
        if form.total_seats > 0 && class_seats > form.total_seats {
            errors.add("seat_classes", "Tổng số ghế các hạng vượt quá số ghế của chuyến bay");
        }
    }

    if form.operating_days.is_empty() {
        errors.add("operating_days", "Vui lòng chọn ít nhất một ngày hoạt động");
    } else if form.operating_days.iter().any(|d| !(1..=7).contains(d)) {
        errors.add("operating_days", "Ngày hoạt động không hợp lệ");
    }

    errors.into_result()
}

pub fn validate_schedule(form: &ScheduleForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let departure = parse_datetime(&form.departure_datetime);
    let arrival = parse_datetime(&form.arrival_datetime);

    if departure.is_none() {
        errors.add("departure_datetime", "Thời gian khởi hành không hợp lệ");
    }
    match (departure, arrival) {
        (_, None) => errors.add("arrival_datetime", "Thời gian đến không hợp lệ"),
        (Some(departure), Some(arrival)) if arrival <= departure => {
            errors.add("arrival_datetime", "Thời gian đến phải sau thời gian khởi hành")
        }
        _ => {}
    }

    if !positive(form.price) {
        errors.add("price", "Giá vé phải lớn hơn 0");
    }
    let status = form.status.trim();
    if !status.is_empty() && !SCHEDULE_STATUSES.contains(&status) {
        errors.add("status", "Trạng thái không hợp lệ");
    }

    errors.into_result()
}
