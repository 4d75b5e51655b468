use crate::domain::InverterResponse;
use crate::solax::variant::Variant;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::Utf8Error;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_PORT: u16 = 80;

/// A variant bound to the endpoint of a single inverter.
#[derive(Clone, Debug)]
pub struct Inverter {
    client: Client,
    variant: Variant,
    host: String,
    port: u16,
}

impl Inverter {
    pub fn new(client: Client, variant: Variant, host: impl Into<String>, port: u16) -> Self {
        Inverter {
            client,
            variant,
            host: host.into(),
            port,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Performs a single request against the inverter and validates the payload.
    #[instrument(skip(self), fields(variant = %self.variant, host = %self.host, port = self.port))]
    pub async fn get_data(&self) -> Result<InverterResponse, InverterError> {
        let url = self.variant.url(&self.host, self.port);
        debug!("Requesting {} {}...", self.variant.method(), url);

        let body = self
            .client
            .request(self.variant.method(), &url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        debug!("Requesting {} {}... OK, {} bytes received", self.variant.method(), url, body.len());
        self.variant.parse(&body)
    }
}

/// Reports that an inverter could not be read using a particular variant.
#[derive(Error, Debug)]
pub enum InverterError {
    #[error("could not connect to inverter endpoint: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("received non-JSON data from inverter endpoint: {0}")]
    Parse(#[from] ParseError),
    #[error("received malformed JSON from inverter: {0}")]
    Schema(#[source] SchemaError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("body is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("{source}")]
    Payload { source: serde_json::Error },
    #[error("field `{field}`: {source}")]
    Field { field: String, source: serde_json::Error },
}

impl From<serde_path_to_error::Error<serde_json::Error>> for SchemaError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let field = err.path().to_string();
        let source = err.into_inner();
        // Missing fields are reported against the payload itself
        if field == "." {
            SchemaError::Payload { source }
        } else {
            SchemaError::Field { field, source }
        }
    }
}

/// A payload validated field by field, in the order of `FIELDS`.
pub(super) trait Schema: DeserializeOwned {
    const FIELDS: &'static [&'static str];
}

pub(super) fn decode(body: &[u8]) -> Result<&str, ParseError> {
    Ok(std::str::from_utf8(body)?)
}

/// Parses `text` as a JSON object and validates it against the payload type `T`.
///
/// Fields are checked in schema order up to the first missing one, so the reported error is the first
/// violated constraint. Unknown fields are dropped.
pub(super) fn validate<T: Schema>(text: &str) -> Result<T, InverterError> {
    let json = serde_json::from_str::<Value>(text).map_err(ParseError::from)?;
    let Value::Object(mut object) = json else {
        return Err(InverterError::Schema(SchemaError::NotAnObject));
    };

    let mut ordered = Map::with_capacity(T::FIELDS.len());
    for field in T::FIELDS {
        let Some(value) = object.remove(*field) else {
            break;
        };
        ordered.insert(field.to_string(), value);
    }

    serde_path_to_error::deserialize(Value::Object(ordered)).map_err(|err| InverterError::Schema(err.into()))
}
