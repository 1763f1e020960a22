pub mod engine;
pub mod soil;
pub mod weather;

pub use engine::{LiveRequest, ManualRequest, RecommendationEngine};
pub use weather::WeatherService;
