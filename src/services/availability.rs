//! Slot availability resolution
//!
//! Produces the bookable slot grid for a field and date from three inputs:
//! the field's operating hours for that weekday, administrator blackout
//! windows, and the slots already held by non-terminal bookings. The service
//! has no cache and no side effects; callers re-query after every
//! booking-affecting event (creation, cancellation, expiry).

use std::collections::HashSet;
use std::sync::Arc;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::api::BookingApi;
use crate::models::slot::{BlackoutWindow, FieldSchedule, TimeSlot};
use crate::utils::errors::{CourtBuddyError, Result};

/// Resolve the ordered slot grid for one field and date.
///
/// A slot is available iff it lies inside the weekday's operating hours, is
/// not covered by any blackout window, and is not occupied by a non-terminal
/// booking. Hours outside the operating window are omitted entirely rather
/// than shown as unavailable.
pub fn resolve_slots(
    schedule: &FieldSchedule,
    date: NaiveDate,
    blackouts: &[BlackoutWindow],
    occupied: &HashSet<String>,
) -> Vec<TimeSlot> {
    let Some(hours) = schedule.hours_for(date.weekday()) else {
        return Vec::new();
    };

    (hours.open_hour..hours.close_hour)
        .map(|hour| {
            let blacked_out = blackouts.iter().any(|w| w.covers(date, hour));
            let label = crate::utils::helpers::slot_label(hour);
            let taken = occupied.contains(&label);
            TimeSlot::new(hour, !blacked_out && !taken)
        })
        .collect()
}

/// Availability query service over the remote API
#[derive(Clone)]
pub struct AvailabilityService {
    api: Arc<dyn BookingApi>,
}

impl AvailabilityService {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        Self { api }
    }

    /// Ordered slot grid for (field, date).
    ///
    /// An unknown field or a date the field is closed yields an empty list,
    /// never an error, so callers render "no slots" instead of failing hard.
    pub async fn availability(&self, field_id: i64, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        debug!(field_id = field_id, date = %date, "Resolving slot availability");

        let field = match self.api.get_field(field_id).await {
            Ok(field) => field,
            Err(CourtBuddyError::FieldNotFound { .. }) | Err(CourtBuddyError::Validation(_)) => {
                warn!(field_id = field_id, "Availability requested for unknown field");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let occupied: HashSet<String> = self
            .api
            .get_occupied_slots(field_id, date)
            .await?
            .into_iter()
            .collect();

        let slots = resolve_slots(&field.schedule, date, &field.blackouts, &occupied);
        debug!(
            field_id = field_id,
            date = %date,
            total = slots.len(),
            free = slots.iter().filter(|s| s.is_available).count(),
            "Slot availability resolved"
        );
        Ok(slots)
    }
}
