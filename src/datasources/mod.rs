pub mod geolocation;
pub mod nasapower;
pub mod openweathermap;

pub use geolocation::GeoLocator;
pub use nasapower::NasaPowerClient;
pub use openweathermap::OpenWeatherMapClient;
