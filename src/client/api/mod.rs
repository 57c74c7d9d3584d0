//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Account registration and login
//! - [`WaterApi`] - Water logs, goal, streak, history and statistics
//!
//! The [`HydrateApi`] super-trait combines both.

mod auth;
mod water;

pub use auth::AuthApi;
pub use water::WaterApi;

/// Combined Hydrate API surface
///
/// Implemented automatically for anything that implements both sub-traits.
pub trait HydrateApi: AuthApi + WaterApi {}

impl<T: AuthApi + WaterApi> HydrateApi for T {}
