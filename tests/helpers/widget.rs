//! Scripted payment widget for tests
//!
//! Pops one pre-programmed outcome per invocation. On a scripted `Success`
//! it settles the booking on the fake server first, the way the real gateway
//! notifies the platform server-to-server before the widget callback fires.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use CourtBuddy::gateway::{PaymentOutcome, PaymentWidget};
use CourtBuddy::utils::errors::{CourtBuddyError, Result};

use super::fake_api::FakeCourtApi;

pub struct ScriptedWidget {
    outcomes: Mutex<VecDeque<PaymentOutcome>>,
    server: Option<Arc<FakeCourtApi>>,
}

impl ScriptedWidget {
    pub fn new(outcomes: Vec<PaymentOutcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            server: None,
        })
    }

    /// Wire the widget to the fake server so Success settles the booking
    pub fn with_server(outcomes: Vec<PaymentOutcome>, server: Arc<FakeCourtApi>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            server: Some(server),
        })
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentWidget for ScriptedWidget {
    async fn open(&self, token: &str) -> Result<PaymentOutcome> {
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CourtBuddyError::Gateway("widget opened unexpectedly".to_string()))?;

        if matches!(outcome, PaymentOutcome::Success) {
            if let Some(server) = &self.server {
                server.settle_token(token);
            }
        }

        Ok(outcome)
    }
}
