//! Services module
//!
//! This module contains business logic services

pub mod availability;
pub mod booking;
pub mod payment;
pub mod mabar;

// Re-export commonly used services
pub use availability::{AvailabilityService, resolve_slots};
pub use booking::BookingService;
pub use payment::{PaymentOrchestrator, PaymentResolution};
pub use mabar::MabarService;

use std::sync::Arc;

use crate::api::BookingApi;
use crate::config::settings::Settings;
use crate::gateway::PaymentWidget;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
///
/// Services are cheap `Clone` handles over the shared API client and widget,
/// so re-entrant UI surfaces share one set of in-flight connections.
#[derive(Clone)]
pub struct ServiceFactory {
    pub availability_service: AvailabilityService,
    pub booking_service: BookingService,
    pub payment_orchestrator: PaymentOrchestrator,
    pub mabar_service: MabarService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        api: Arc<dyn BookingApi>,
        widget: Arc<dyn PaymentWidget>,
        settings: Settings,
    ) -> Result<Self> {
        settings.validate()?;

        let availability_service = AvailabilityService::new(api.clone());
        let booking_service = BookingService::new(api.clone(), settings.clone());
        let payment_orchestrator =
            PaymentOrchestrator::new(api.clone(), widget, settings.clone());
        let mabar_service = MabarService::new(api, settings);

        Ok(Self {
            availability_service,
            booking_service,
            payment_orchestrator,
            mabar_service,
        })
    }
}
