use std::str::FromStr;

use serde_json::{Map, Value};

use crate::telegram::{MessageKind, Telegram};
use crate::value::is_sentinel;
use crate::{Error, Result};

mod sensors;
pub use sensors::SensorSnapshot;

mod state;
pub use state::StateSnapshot;

/// A freshly built snapshot together with every field whose token had to be dropped.
#[derive(Debug)]
pub struct Fold<S> {
    pub snapshot: S,
    pub rejected: Vec<Rejection>,
}

#[derive(Debug)]
pub struct Rejection {
    pub key: &'static str,
    pub error: Error,
}

#[derive(Debug)]
pub enum Message {
    State(Fold<StateSnapshot>),
    Sensors(Fold<SensorSnapshot>),
    Unknown(String),
}

pub fn fold(telegram: &Telegram) -> Result<Message> {
    match telegram.kind() {
        MessageKind::CurrentState | MessageKind::StateChange => {
            let data = telegram
                .product_state
                .as_ref()
                .ok_or(Error::MalformedTelegram("missing product-state"))?;

            StateSnapshot::fold(data).map(Message::State)
        }
        MessageKind::EnvironmentalSensorData => {
            let data = telegram
                .data
                .as_ref()
                .ok_or(Error::MalformedTelegram("missing data"))?;

            Ok(Message::Sensors(SensorSnapshot::fold(data)))
        }
        MessageKind::Unknown => Ok(Message::Unknown(telegram.msg.clone())),
    }
}

pub fn decode(payload: &[u8]) -> Result<Message> {
    fold(&Telegram::from_slice(payload)?)
}

/// Reads tokens out of a telegram data object, remembering every rejected one.
struct Fields<'d> {
    data: &'d Map<String, Value>,
    rejected: Vec<Rejection>,
}

impl<'d> Fields<'d> {
    fn new(data: &'d Map<String, Value>) -> Self {
        Self {
            data,
            rejected: Vec::new(),
        }
    }

    fn reject(&mut self, key: &'static str, error: Error) {
        self.rejected.push(Rejection { key, error });
    }

    fn into_fold<S>(self, snapshot: S) -> Fold<S> {
        Fold {
            snapshot,
            rejected: self.rejected,
        }
    }

    /// Current token of a field. Change telegrams carry `[previous, current]` pairs.
    fn token(&mut self, key: &'static str) -> Option<&'d str> {
        let data = self.data;
        let value = match data.get(key)? {
            Value::Array(values) => values.last()?,
            value => value,
        };

        match value {
            Value::String(token) => Some(token.as_str()),
            other => {
                self.reject(key, Error::UnrecognizedToken(other.to_string()));
                None
            }
        }
    }

    /// First key present in precedence order.
    fn first_key(&self, keys: &[&'static str]) -> Option<&'static str> {
        keys.iter().copied().find(|key| self.data.contains_key(*key))
    }

    fn parse<T>(&mut self, key: &'static str) -> Option<T>
    where
        T: FromStr<Err = Error>,
    {
        let token = self.token(key)?;
        match token.parse() {
            Ok(value) => Some(value),
            Err(err) => {
                self.reject(key, err);
                None
            }
        }
    }

    fn parse_first<T>(&mut self, keys: &[&'static str]) -> Option<T>
    where
        T: FromStr<Err = Error>,
    {
        let key = self.first_key(keys)?;
        self.parse(key)
    }

    /// Numeric reading where sentinel tokens mean the value is unavailable.
    fn reading<T: FromStr>(&mut self, key: &'static str) -> Option<T> {
        let token = self.token(key)?;
        if is_sentinel(token) {
            return None;
        }

        match token.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.reject(key, Error::UnrecognizedToken(token.to_string()));
                None
            }
        }
    }

    fn reading_first<T: FromStr>(&mut self, keys: &[&'static str]) -> Option<T> {
        let key = self.first_key(keys)?;
        self.reading(key)
    }

    fn percent(&mut self, key: &'static str) -> Option<u8> {
        let value = self.reading::<u8>(key)?;
        if value > 100 {
            self.reject(key, Error::UnrecognizedToken(value.to_string()));
            return None;
        }

        Some(value)
    }
}
