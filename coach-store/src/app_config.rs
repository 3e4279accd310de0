use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    pub price: i32,
    pub currency: String,
    /// Simulated processor latency
    pub payment_latency_ms: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            price: 300,
            currency: "USD".to_string(),
            payment_latency_ms: 1500,
        }
    }
}

impl BookingConfig {
    pub fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }
}

/// Outbound contact points are display-only.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ContactConfig {
    pub submit_latency_ms: u64,
    pub phone: String,
    pub email: String,
    pub social_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_latency_ms: 1000,
            phone: "+14252097368".to_string(),
            email: "raysaranya@gmail.com".to_string(),
            social_url: "https://www.linkedin.com/in/raysaranya/".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RotationConfig {
    pub interval_ms: u64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { interval_ms: 6000 }
    }
}

impl RotationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
            max_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EventsConfig {
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. COACH_SERVER__PORT=9000
            .add_source(
                config::Environment::with_prefix("COACH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.booking.price, 300);
        assert_eq!(config.booking.payment_latency(), Duration::from_millis(1500));
        assert_eq!(config.rotation.interval(), Duration::from_secs(6));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_partial_source_keeps_section_defaults() {
        let config: Config = config::Config::builder()
            .set_override("server.port", 9090)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.contact.email, "raysaranya@gmail.com");
        assert_eq!(config.events.capacity, 100);
    }

    #[test]
    fn test_single_field_keeps_sibling_defaults() {
        let config: Config = config::Config::builder()
            .set_override("booking.price", 400)
            .unwrap()
            .set_override("retry.max_attempts", 5)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.booking.price, 400);
        assert_eq!(config.booking.currency, "USD");
        assert_eq!(config.booking.payment_latency_ms, 1500);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 200);
    }
}
