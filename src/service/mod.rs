pub mod health;

pub use health::{check_once, ApiStatus, HealthMonitor, HealthSnapshot};
