//! The seven report pipelines. Each takes read-only trips plus one weather
//! granularity and returns a self-contained, serializable result.

pub mod bike_types;
pub mod popularity;
pub mod rain_impact;
pub mod ride_time;
pub mod temperature;
pub mod weekly;
pub mod wind_speed;

pub use bike_types::{BikeTypeStats, compare_bike_types};
pub use popularity::{PopularityReport, popular_spots};
pub use rain_impact::{RainImpact, rain_impact};
pub use ride_time::{RideTimeReport, ride_time_stats};
pub use temperature::{TemperatureBracket, temperature_brackets};
pub use weekly::{WeekdayTrend, weekly_trends};
pub use wind_speed::{WindSpeedBracket, speed_by_wind};
