use crate::config::TongsConfig;
use crate::error::UpdateError;
use crate::token::TokenProvider;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumIter, EnumString};

pub const ACCEPT_JSON: &str = "application/json";
pub const REQUESTED_WITH: &str = "XMLHttpRequest";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }
}

/// How the selected value travels to the endpoint.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(try_from = "String", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransportMode {
    /// `GET ?field=value`
    Get,
    /// `POST {"data": {field: value}}` with the CSRF header
    #[default]
    Post,
}

// Config files and env vars accept the same spellings.
impl TryFrom<String> for TransportMode {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl From<TransportMode> for String {
    fn from(mode: TransportMode) -> Self {
        mode.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubtypeRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl SubtypeRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builds the request for one change event. The token provider is read here
/// and only in post mode.
pub fn build_request(
    config: &TongsConfig,
    value: &str,
    tokens: &dyn TokenProvider,
) -> SubtypeRequest {
    let mut headers = vec![
        ("Accept".to_string(), ACCEPT_JSON.to_string()),
        ("X-Requested-With".to_string(), REQUESTED_WITH.to_string()),
    ];

    match config.mode {
        TransportMode::Get => SubtypeRequest {
            method: HttpMethod::Get,
            path: config.endpoint.clone(),
            query: vec![(config.field.clone(), value.to_string())],
            headers,
            body: None,
        },
        TransportMode::Post => {
            match tokens.token() {
                Some(token) => headers.push((config.csrf_header.clone(), token)),
                None => tracing::warn!(
                    "no '{}' cookie available; sending without {}",
                    config.csrf_cookie,
                    config.csrf_header
                ),
            }
            headers.push(("Content-Type".to_string(), ACCEPT_JSON.to_string()));

            let mut data = serde_json::Map::new();
            data.insert(config.field.clone(), Value::String(value.to_string()));

            SubtypeRequest {
                method: HttpMethod::Post,
                path: config.endpoint.clone(),
                query: Vec::new(),
                headers,
                body: Some(json!({ "data": data })),
            }
        }
    }
}

/// Parses `{"data": [[value, label], ...]}` into options, in response order.
pub fn parse_options(body: &str) -> Result<Vec<SelectOption>, UpdateError> {
    let payload: Value = serde_json::from_str(body)?;
    let rows = payload
        .get("data")
        .ok_or_else(|| UpdateError::Shape("missing field 'data'".to_string()))?
        .as_array()
        .ok_or_else(|| UpdateError::Shape("'data' is not an array".to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.as_array().map(Vec::as_slice) {
            Some([value, label]) => Ok(SelectOption::new(
                scalar(value, index)?,
                scalar(label, index)?,
            )),
            _ => Err(UpdateError::Shape(format!(
                "row {index} is not a [value, label] pair"
            ))),
        })
        .collect()
}

fn scalar(value: &Value, index: usize) -> Result<String, UpdateError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(UpdateError::Shape(format!(
            "row {index} holds {value}; expected a string or number"
        ))),
    }
}

/// Placeholder first, then the endpoint's options.
pub fn with_placeholder(label: &str, options: Vec<SelectOption>) -> Vec<SelectOption> {
    let mut all = Vec::with_capacity(options.len() + 1);
    all.push(SelectOption::placeholder(label));
    all.extend(options);
    all
}
