//! Fetch policy for the weather panel.
//!
//! Decides, on every cycle, whether the forecast comes from the
//! session cache, the live API, or bundled fixtures, and normalizes
//! the winning payload for rendering.

pub mod cache;
pub mod display;
pub mod orchestrator;
pub mod resolver;

pub use cache::{MemoryStore, SessionStore, WeatherCache};
pub use orchestrator::{ConfigProvider, ForecastOrchestrator};
pub use resolver::{LocationResolver, ResolvedLocation};
