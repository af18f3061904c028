//! Business logic invoked through the `httpx` adapter.

pub mod health;
