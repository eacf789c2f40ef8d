//! Time slot and field schedule models

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, Weekday};

/// One hour-granularity bookable unit of a field on a given date.
///
/// Slots are ephemeral: they are recomputed on every availability query and
/// never cached across booking-affecting events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_hour: u8,
    pub label: String,
    pub is_available: bool,
}

impl TimeSlot {
    pub fn new(start_hour: u8, is_available: bool) -> Self {
        Self {
            start_hour,
            label: crate::utils::helpers::slot_label(start_hour),
            is_available,
        }
    }
}

/// Operating hours of a field for one weekday, as [open, close) hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open_hour: u8,
    pub close_hour: u8,
}

/// Per-weekday operating hours for a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchedule {
    pub monday: Option<OperatingHours>,
    pub tuesday: Option<OperatingHours>,
    pub wednesday: Option<OperatingHours>,
    pub thursday: Option<OperatingHours>,
    pub friday: Option<OperatingHours>,
    pub saturday: Option<OperatingHours>,
    pub sunday: Option<OperatingHours>,
}

impl FieldSchedule {
    /// Same hours every day of the week
    pub fn uniform(open_hour: u8, close_hour: u8) -> Self {
        let hours = Some(OperatingHours { open_hour, close_hour });
        Self {
            monday: hours,
            tuesday: hours,
            wednesday: hours,
            thursday: hours,
            friday: hours,
            saturday: hours,
            sunday: hours,
        }
    }

    /// Operating hours for the given weekday, None when the field is closed
    pub fn hours_for(&self, weekday: Weekday) -> Option<OperatingHours> {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

/// Administrator-defined blackout window removing slots from sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackoutWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Blacked-out hours as [start, end); None blacks out the whole day
    pub start_hour: Option<u8>,
    pub end_hour: Option<u8>,
    pub reason: Option<String>,
}

impl BlackoutWindow {
    /// Whether the given date and hour falls inside this window
    pub fn covers(&self, date: NaiveDate, hour: u8) -> bool {
        if date < self.start_date || date > self.end_date {
            return false;
        }
        match (self.start_hour, self.end_hour) {
            (Some(start), Some(end)) => hour >= start && hour < end,
            _ => true,
        }
    }
}

/// A bookable field as exposed by the remote system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: i64,
    pub name: String,
    pub price_per_hour: i64,
    pub schedule: FieldSchedule,
    pub blackouts: Vec<BlackoutWindow>,
}
