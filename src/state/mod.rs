//! Application state module

mod app_state;
pub mod forms;
// Maker-portal selectors, kept as a library surface
#[allow(dead_code)]
pub mod maker;
mod referral;
mod session;
mod snapshot_store;

pub use app_state::*;
pub use forms::*;
pub use referral::*;
pub use session::*;
pub use snapshot_store::*;
