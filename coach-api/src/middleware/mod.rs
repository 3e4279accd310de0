pub mod resiliency;

pub use resiliency::{circuit_breaker_middleware, CircuitBreaker, CircuitState, Resiliency};
