use std::fmt;

use crate::TemperatureUnit;

#[derive(Debug)]
pub enum Error {
    UnrecognizedToken(String),
    MalformedTelegram(&'static str),
    InvalidTargetTemperature(TemperatureUnit, i32),
    InvalidQualityTarget(u8),
    InvalidFanSpeed(u8),
    DeviceNameNotFound(String, Vec<String>),
    AmbiguousDeviceSelection(usize),
    NoUsableCredentials,
    InvalidCloudCredential(&'static str),
    NotConnected,
    Json(serde_json::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedToken(token) => write!(f, "unrecognized token {token:?}"),
            Self::MalformedTelegram(reason) => write!(f, "malformed telegram: {reason}"),
            Self::InvalidTargetTemperature(unit, value) => {
                let (min, max) = unit.target_range();
                write!(
                    f,
                    "{value} is not a valid temperature target, it must be between {min} and {max} {unit} inclusive"
                )
            }
            Self::InvalidQualityTarget(level) => {
                write!(f, "invalid quality target level {level}, expected 10, 20 or 30")
            }
            Self::InvalidFanSpeed(level) => {
                write!(f, "invalid fan speed {level}, expected 1 to 10")
            }
            Self::DeviceNameNotFound(name, available) => {
                write!(f, "device {name:?} not found, available: {available:?}")
            }
            Self::AmbiguousDeviceSelection(count) => write!(
                f,
                "account has {count} devices, set a device name to pick one"
            ),
            Self::NoUsableCredentials => write!(f, "no usable credentials"),
            Self::InvalidCloudCredential(reason) => {
                write!(f, "invalid cloud credential: {reason}")
            }
            Self::NotConnected => write!(f, "device is not connected"),
            Self::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
