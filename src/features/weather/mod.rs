pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::{FloodRisk, WeatherReport};
pub use services::{MockWeatherProvider, WeatherProvider};
