//! Typed request/response adapter for axum handlers.
//!
//! [`handle`] turns a use-case function `(Context, Req) -> Result<Resp>` into
//! an axum handler. For every inbound request the adapter runs a fixed,
//! linear pipeline and stops at the first failing step:
//!
//! 1. build `Req::default()` and [`Bindable::bind`] it from the raw request
//! 2. log the bound request
//! 3. [`Validatable::validate`] it
//! 4. call the use case
//! 5. log the response and encode it with the configured [`Format`]
//!
//! Failures are answered according to [`Errorx`] classification: a
//! client-visible `Errorx` anywhere in the cause chain yields its code and an
//! [`ErrorBody`] with its message; anything else yields a generic 500 and the
//! real error only reaches the logs.
//!
//! Bodies are encoded into a buffer first, so a failed encode is replaced by
//! a plain-text response instead of leaving a half-written body.
use std::{fmt, future::Future, pin::Pin, sync::Arc};

use axum::{
    body::Body,
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, Extensions, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::Span;
use uuid::Uuid;

use crate::encoder::{encode_to_vec, Format, Json};
use crate::errorx::Errorx;
use crate::logger::Logger;

// ---

/// Populate a typed request from the raw inbound request.
pub trait Bindable {
    fn bind(&mut self, request: Request) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Check a bound request's own invariants.
pub trait Validatable {
    fn validate(&self) -> anyhow::Result<()>;
}

/// Everything the adapter needs from a request type.
pub trait TypedRequest: Bindable + Validatable + fmt::Display + Default + Send + 'static {}

impl<T> TypedRequest for T where T: Bindable + Validatable + fmt::Display + Default + Send + 'static {}

/// A request that binds nothing and is always valid.
///
/// Use it directly for endpoints without input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultRequest;

impl Bindable for DefaultRequest {
    async fn bind(&mut self, _request: Request) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Validatable for DefaultRequest {
    fn validate(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl fmt::Display for DefaultRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{}")
    }
}

/// A response carrying a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultResponse {
    pub message: String,
}

/// Body written for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-request values handed to the use case.
#[derive(Debug, Clone)]
pub struct Context {
    id: Uuid,
    extensions: Extensions,
}

impl Context {
    pub fn new(id: Uuid, extensions: Extensions) -> Self {
        Self { id, extensions }
    }

    /// Correlation id of the request, as found in the `request` log span.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Extensions of the inbound request (values inserted by middleware).
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

/// Handler configuration. Defaults: `200 OK`, [`Json`], [`Logger::default`].
#[derive(Debug, Clone)]
pub struct Options<F = Json> {
    success_code: StatusCode,
    format: F,
    logger: Logger,
}

impl Default for Options<Json> {
    fn default() -> Self {
        Self {
            success_code: StatusCode::OK,
            format: Json,
            logger: Logger::default(),
        }
    }
}

impl<F: Format> Options<F> {
    /// Status written on success.
    pub fn with_success_code(mut self, code: StatusCode) -> Self {
        self.success_code = code;
        self
    }

    /// Wire format for success and error bodies.
    pub fn with_encoder<G: Format>(self, format: G) -> Options<G> {
        Options {
            success_code: self.success_code,
            format,
            logger: self.logger,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn success_code(&self) -> StatusCode {
        self.success_code
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Build an axum handler around `use_case`.
///
/// The returned closure is cheap to clone and can be mounted on any route.
/// `Resp` must be `Debug` only because the response is written to the
/// `response` log record.
pub fn handle<Req, Resp, U, Fut, F>(
    use_case: U,
    options: Options<F>,
) -> impl Fn(Request) -> ResponseFuture + Clone + Send + Sync + 'static
where
    Req: TypedRequest,
    Resp: Serialize + fmt::Debug + Send + 'static,
    U: Fn(Context, Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Resp>> + Send + 'static,
    F: Format,
{
    // ---
    let adapter = Arc::new(Adapter { use_case, options });

    move |request: Request| -> ResponseFuture {
        let adapter = Arc::clone(&adapter);
        Box::pin(async move { adapter.serve::<Req, Resp, Fut>(request).await })
    }
}

struct Adapter<U, F> {
    use_case: U,
    options: Options<F>,
}

impl<U, F: Format> Adapter<U, F> {
    async fn serve<Req, Resp, Fut>(&self, request: Request) -> Response
    where
        Req: TypedRequest,
        Resp: Serialize + fmt::Debug,
        U: Fn(Context, Req) -> Fut,
        Fut: Future<Output = anyhow::Result<Resp>>,
    {
        // ---
        let id = Uuid::new_v4();
        let span = self.options.logger.request_span(id);
        let ctx = Context::new(id, request.extensions().clone());

        // Step 1: bind
        let mut req = Req::default();
        if let Err(err) = req.bind(request).await {
            return self.fail(&span, "failed to bind request", &err);
        }

        // Step 2: log request
        self.log(&span, || tracing::info!(request = %req, "request"));

        // Step 3: validate
        if let Err(err) = req.validate() {
            return self.fail(&span, "failed to validate request", &err);
        }

        // Step 4: use case
        let response = match (self.use_case)(ctx, req).await {
            Ok(response) => response,
            Err(err) => return self.fail(&span, "use case failed", &err),
        };

        // Step 5: log response, encode
        self.log(&span, || tracing::info!(response = ?response, "response"));

        match encode_to_vec(&self.options.format, &response) {
            Ok(body) => self.respond(self.options.success_code, body),
            Err(err) => {
                self.log(&span, || tracing::error!(err = %err, "failed to write response"));
                match Errorx::find_in(&err) {
                    Some(errx) if !errx.is_internal() => plain_text(errx.code(), errx.message().to_string()),
                    _ => internal_server_error(),
                }
            }
        }
    }

    /// Answer a failed step according to the error's classification.
    fn fail(&self, span: &Span, what: &'static str, err: &anyhow::Error) -> Response {
        // ---
        let (code, body) = match Errorx::find(err) {
            Some(errx) if !errx.is_internal() => (errx.code(), ErrorBody::new(errx.message())),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(internal_status_text())),
        };

        let detail = format!("{:#}", err);
        self.log(span, || tracing::error!(err = %detail, status = code.as_u16(), "{}", what));

        match encode_to_vec(&self.options.format, &body) {
            Ok(bytes) => self.respond(code, bytes),
            Err(e) => {
                self.log(span, || tracing::error!(err = %e, "failed to write error response"));
                internal_server_error()
            }
        }
    }

    fn respond(&self, code: StatusCode, body: Vec<u8>) -> Response {
        // ---
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = code;
        if let Some(content_type) = self.options.format.content_type() {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response
    }

    fn log(&self, span: &Span, f: impl FnOnce()) {
        self.options.logger.in_span(span, f)
    }
}

fn internal_status_text() -> &'static str {
    StatusCode::INTERNAL_SERVER_ERROR
        .canonical_reason()
        .unwrap_or("Internal Server Error")
}

fn internal_server_error() -> Response {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, internal_status_text().to_string())
}

fn plain_text(code: StatusCode, message: String) -> Response {
    (code, message).into_response()
}

// --- bind helpers

/// Decode a JSON request body.
///
/// Extraction failures (wrong content type, malformed or mistyped JSON,
/// unreadable body) become client-visible errors with the rejection's status.
pub async fn json_body<T>(request: Request) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    // ---
    match axum::Json::<T>::from_request(request, &()).await {
        Ok(axum::Json(value)) => Ok(value),
        Err(rejection) => Err(Errorx::external(rejection.status(), rejection.body_text()).into()),
    }
}

/// Decode the query string.
///
/// A query that does not deserialize into `T` becomes a client-visible
/// `400 Bad Request`.
pub fn query<T>(request: &Request) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    // ---
    match Query::<T>::try_from_uri(request.uri()) {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => Err(Errorx::external(rejection.status(), rejection.body_text()).into()),
    }
}
