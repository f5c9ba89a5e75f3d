use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Reserved request timeout in milliseconds. Stored on the description but
/// not enforced and not forwarded to the host.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// HTTP method of a request description.
///
/// Parsing is case-insensitive. Methods outside the well-known set are kept
/// as `Other` (upper-cased) and forwarded as-is; the host decides what to do
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn parse(method: &str) -> Self {
        let upper = method.to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => Self::Other(upper),
        }
    }

    /// Upper-case wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Other(method) => method,
        }
    }

    pub fn is_get(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for HttpMethod {
    fn from(method: &str) -> Self {
        Self::parse(method)
    }
}

impl From<String> for HttpMethod {
    fn from(method: String) -> Self {
        Self::parse(&method)
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Other(method) => method,
            known => known.as_str().to_string(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller-facing description of a request, before it is shaped for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescription {
    /// Passed to the host unchanged; relative URLs are not resolved here.
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    /// Query parameters
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Map<String, Value>,
    /// Request body. Dropped entirely for GET.
    #[serde(default = "empty_object")]
    pub data: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    #[serde(rename = "timeout", default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl RequestDescription {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::default(),
            params: Map::new(),
            data: empty_object(),
            headers: HashMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_method(mut self, method: impl Into<HttpMethod>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Shapes the description into the argument record for the host command.
    pub fn into_bridge_args(self) -> BridgeArgs {
        let body = if self.method.is_get() {
            None
        } else {
            Some(self.data)
        };

        BridgeArgs {
            url: self.url,
            options: BridgeOptions {
                method: self.method.into(),
                params: self.params,
                body,
                headers: self.headers,
            },
        }
    }
}

/// Options record handed to the host's `http_request` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeOptions {
    pub method: String,
    pub params: Map<String, Value>,
    /// `None` means the key is left out of the wire record, not sent as null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

/// Full argument record for the `http_request` host command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeArgs {
    pub url: String,
    pub options: BridgeOptions,
}
