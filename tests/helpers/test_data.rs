//! Test data builders

use chrono::NaiveDate;

use CourtBuddy::models::booking::{BookingOwner, CreateBookingRequest};
use CourtBuddy::models::participant::JoinSessionRequest;
use CourtBuddy::models::session::{CreateMabarSessionRequest, MabarSessionType};
use CourtBuddy::models::slot::{Field, FieldSchedule};

/// Saturday used across the suites
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()
}

pub fn test_field(id: i64) -> Field {
    Field {
        id,
        name: format!("Lapangan {}", id),
        price_per_hour: 150000,
        schedule: FieldSchedule::uniform(8, 22),
        blackouts: Vec::new(),
    }
}

pub fn booking_request(field_id: i64, slots: Vec<&str>) -> CreateBookingRequest {
    booking_request_for(1, field_id, slots)
}

pub fn booking_request_for(user_id: i64, field_id: i64, slots: Vec<&str>) -> CreateBookingRequest {
    CreateBookingRequest {
        field_id,
        date: test_date(),
        slots: slots.into_iter().map(|s| s.to_string()).collect(),
        owner: BookingOwner::Registered { user_id },
    }
}

pub fn session_request(slots_total: i32, price_per_slot: i64) -> CreateMabarSessionRequest {
    CreateMabarSessionRequest {
        title: "Sabtu sore mabar".to_string(),
        description: Some("Friendly 5v5".to_string()),
        session_type: MabarSessionType::Open,
        slots_total,
        price_per_slot,
        payment_instructions: "Transfer BCA 1234567890 a.n. Host".to_string(),
        cover_image_url: None,
    }
}

pub fn join_request(user_id: i64) -> JoinSessionRequest {
    JoinSessionRequest {
        user_id,
        name: format!("Player {}", user_id),
    }
}

/// Settings with a gateway key so validation passes
pub fn test_settings() -> CourtBuddy::config::Settings {
    let mut settings = CourtBuddy::config::Settings::default();
    settings.gateway.client_key = "SB-test-client-key".to_string();
    settings
}
