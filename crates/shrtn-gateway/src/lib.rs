//! HTTP front end of the Shrtn URL shortener.
//!
//! Serves the index page, accepts new URLs from its form and redirects
//! `/s/{code}` to the stored destination.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod render;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
