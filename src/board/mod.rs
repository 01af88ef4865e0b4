//! Session state and the controller that drives it.

pub mod clock;
pub mod controller;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{BoardError, Controller, ControllerSettings, EditOutcome, format_date};
pub use state::{AppState, FormMode, ListView};
