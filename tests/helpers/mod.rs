//! Shared test infrastructure
//!
//! The fake remote arbiter, the scripted payment widget and test data
//! builders used by the integration suites.

// Each integration binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

pub mod fake_api;
pub mod widget;
pub mod test_data;

#[allow(unused_imports)]
pub use fake_api::FakeCourtApi;
#[allow(unused_imports)]
pub use widget::ScriptedWidget;
