//! Content encoders for handler responses.
//!
//! A [`Format`] is an immutable, shareable encoder factory (one per wire
//! format). Calling [`Format::encoder`] binds a fresh [`Encode`] instance to a
//! single output sink; that instance is not reused for any other sink.
//!
//! Two formats ship with the crate:
//! - [`Json`] – one value per call, newline terminated
//! - [`Xml`]  – one element per call, root tag taken from the type name
//!
//! Failures are surfaced as [`EncodeError`] without classification; deciding
//! what the client sees is the adapter's job (see `httpx`).
use std::{error::Error as StdError, fmt, io::Write};

use serde::Serialize;

// ---

/// Errors produced while encoding a value to a sink.
#[derive(Debug)]
pub enum EncodeError {
    /// Writing to the sink failed.
    Io(std::io::Error),
    /// The JSON serializer rejected the value.
    Json(serde_json::Error),
    /// The XML serializer rejected the value.
    Xml(Box<dyn StdError + Send + Sync>),
    /// Any other failure reported by a custom [`Format`].
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Io(e) => write!(f, "failed to write encoded value: {}", e),
            EncodeError::Json(e) => write!(f, "failed to encode json: {}", e),
            EncodeError::Xml(e) => write!(f, "failed to encode xml: {}", e),
            EncodeError::Other(e) => write!(f, "failed to encode value: {}", e),
        }
    }
}

impl StdError for EncodeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            EncodeError::Io(e) => Some(e),
            EncodeError::Json(e) => Some(e),
            EncodeError::Xml(e) | EncodeError::Other(e) => Some(&**e),
        }
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self {
        EncodeError::Io(e)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError::Json(e)
    }
}

/// An encoder bound to one output sink.
pub trait Encode {
    /// Serialize one value to the bound sink.
    fn encode<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: Serialize + ?Sized;
}

/// A wire format: creates encoders and optionally announces a MIME type.
///
/// Implementations are stateless and shared read-only across requests.
pub trait Format: Send + Sync + 'static {
    /// The encoder type produced for a sink of type `W`.
    type Encoder<W: Write>: Encode;

    /// Bind a fresh encoder to `sink`.
    fn encoder<W: Write>(&self, sink: W) -> Self::Encoder<W>;

    /// MIME type announced in the `Content-Type` response header, if any.
    fn content_type(&self) -> Option<&'static str> {
        None
    }
}

/// Encode a single value into an in-memory buffer.
///
/// Used by the adapter so that a failed encode never leaves a partially
/// written response body behind.
pub fn encode_to_vec<F, T>(format: &F, value: &T) -> Result<Vec<u8>, EncodeError>
where
    F: Format,
    T: Serialize + ?Sized,
{
    // ---
    let mut buf = Vec::new();
    format.encoder(&mut buf).encode(value)?;
    Ok(buf)
}

// --- JSON

/// JSON wire format. This is the default handler encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

/// JSON encoder bound to a sink.
#[derive(Debug)]
pub struct JsonEncoder<W> {
    sink: W,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> Encode for JsonEncoder<W> {
    fn encode<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: Serialize + ?Sized,
    {
        // ---
        serde_json::to_writer(&mut self.sink, value)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }
}

impl Format for Json {
    type Encoder<W: Write> = JsonEncoder<W>;

    fn encoder<W: Write>(&self, sink: W) -> JsonEncoder<W> {
        JsonEncoder::new(sink)
    }

    fn content_type(&self) -> Option<&'static str> {
        Some("application/json")
    }
}

// --- XML

/// XML wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

/// XML encoder bound to a sink.
#[derive(Debug)]
pub struct XmlEncoder<W> {
    sink: W,
}

impl<W: Write> XmlEncoder<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> Encode for XmlEncoder<W> {
    fn encode<T>(&mut self, value: &T) -> Result<(), EncodeError>
    where
        T: Serialize + ?Sized,
    {
        // ---
        // quick-xml serializes into a `fmt::Write`, so the element is built
        // as a string first and then flushed to the sink in one write.
        let element = quick_xml::se::to_string(value).map_err(|e| EncodeError::Xml(Box::new(e)))?;
        self.sink.write_all(element.as_bytes())?;
        Ok(())
    }
}

impl Format for Xml {
    type Encoder<W: Write> = XmlEncoder<W>;

    fn encoder<W: Write>(&self, sink: W) -> XmlEncoder<W> {
        XmlEncoder::new(sink)
    }

    fn content_type(&self) -> Option<&'static str> {
        Some("application/xml")
    }
}
