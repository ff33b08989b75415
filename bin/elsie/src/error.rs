use std::fmt;

#[derive(Debug)]
pub enum Error {
    Dyson(dyson::Error),
    Mqtt(paho_mqtt::Error),
    Json(serde_json::Error),
    Http(chipp_http::Error),
    UrlParse(chipp_http::UrlParseError),
    Io(std::io::Error),
    MissingVariable(&'static str),
    InvalidVariable(&'static str, String),
    StreamClosed,
}

impl From<dyson::Error> for Error {
    fn from(err: dyson::Error) -> Self {
        Self::Dyson(err)
    }
}

impl From<paho_mqtt::Error> for Error {
    fn from(err: paho_mqtt::Error) -> Self {
        Self::Mqtt(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<chipp_http::Error> for Error {
    fn from(err: chipp_http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<chipp_http::UrlParseError> for Error {
    fn from(err: chipp_http::UrlParseError) -> Self {
        Self::UrlParse(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dyson(err) => write!(f, "{err}"),
            Self::Mqtt(err) => write!(f, "mqtt error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Http(err) => write!(f, "http error: {err}"),
            Self::UrlParse(err) => write!(f, "url parse error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::MissingVariable(name) => write!(f, "set ENV variable {name}"),
            Self::InvalidVariable(name, reason) => write!(f, "invalid {name}: {reason}"),
            Self::StreamClosed => write!(f, "mqtt stream closed"),
        }
    }
}

impl std::error::Error for Error {}
