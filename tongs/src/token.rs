use percent_encoding::percent_decode_str;
use std::sync::Arc;

/// Supplies the anti-forgery token for post requests.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Anything exposing a `document.cookie` style string.
pub trait CookieSource: Send + Sync {
    fn cookie_string(&self) -> String;
}

/// Reads the token from a named cookie on every call.
pub struct CookieToken {
    source: Arc<dyn CookieSource>,
    name: String,
}

impl CookieToken {
    pub fn new(source: Arc<dyn CookieSource>, name: impl Into<String>) -> Self {
        Self {
            source,
            name: name.into(),
        }
    }
}

impl TokenProvider for CookieToken {
    fn token(&self) -> Option<String> {
        get_cookie(&self.source.cookie_string(), &self.name)
    }
}

pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A fixed cookie string, e.g. one passed on the command line.
pub struct CookieString(pub String);

impl CookieSource for CookieString {
    fn cookie_string(&self) -> String {
        self.0.clone()
    }
}

/// Returns the percent-decoded value of the first cookie called `name`.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    let prefix = format!("{name}=");
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}
