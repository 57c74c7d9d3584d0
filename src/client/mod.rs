//! Hydrate API client

pub mod api;
pub mod fallback;
pub mod hydrate;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{AuthApi, HydrateApi, WaterApi};
pub use hydrate::{DEFAULT_API_HOST, HydrateClient};
#[cfg(test)]
pub use mock::MockHydrateClient;
