use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::lenient;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatClass {
    #[serde(alias = "class", alias = "class_name")]
    pub name: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub price: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(alias = "seats", alias = "total_seats")]
    pub seat_count: u32,
}

/// A flight route row as the admin listing returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRoute {
    #[serde(deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub departure_airport: String,
    #[serde(default)]
    pub arrival_airport: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub departure_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub arrival_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub seat_classes: Vec<SeatClass>,
    /// ISO weekdays, 1 = Monday.
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub operating_days: Vec<u8>,
    #[serde(default, deserialize_with = "lenient::json_column")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "lenient::json_value")]
    pub baggage: Value,
    #[serde(default = "default_active", deserialize_with = "lenient_bool")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// MySQL TINYINT(1) comes back as 0/1
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0).unwrap_or(true),
        Some(Value::String(s)) => !matches!(s.trim(), "0" | "false" | ""),
        _ => true,
    })
}

/// Route create/update payload. HTML forms post numbers as strings, so
/// numeric fields accept either.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteForm {
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub departure_airport: String,
    #[serde(default)]
    pub arrival_airport: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub base_price: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub total_seats: u32,
    #[serde(default)]
    pub seat_classes: Vec<SeatClass>,
    #[serde(default)]
    pub operating_days: Vec<u8>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub baggage: Value,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Edit of one generated schedule.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleForm {
    #[serde(default)]
    pub departure_datetime: String,
    #[serde(default)]
    pub arrival_datetime: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub price: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub available_seats: u32,
    #[serde(default)]
    pub status: String,
}

/// What the backend says after a generate-schedules run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateSchedulesResult {
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "created", deserialize_with = "lenient::count")]
    pub generated_count: u32,
    #[serde(default, alias = "skipped", deserialize_with = "lenient::count")]
    pub skipped_routes: u32,
}
