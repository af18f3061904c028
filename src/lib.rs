//! `rester` – typed request/response handlers for axum.
//!
//! [`handle`] wraps a business-logic function `(Context, Req) -> Result<Resp>`
//! into an axum handler that binds, validates, logs and encodes, and maps
//! failures to client-visible or generic responses using [`Errorx`].

pub mod config;
pub mod encoder;
pub mod errorx;
pub mod httpx;
pub mod logger;
pub mod routes;
pub mod use_case;

pub use config::Config;
pub use encoder::{Format, Json, Xml};
pub use errorx::Errorx;
pub use httpx::{handle, Context, DefaultRequest, DefaultResponse, Options};
pub use logger::Logger;
