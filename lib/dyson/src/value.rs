use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const KELVIN_OFFSET: f64 = 273.15;

/// Tokens the device reports for a reading it cannot provide.
pub(crate) const SENTINELS: [&str; 3] = ["INIT", "OFF", "INV"];

pub(crate) fn is_sentinel(token: &str) -> bool {
    SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(token))
}

pub fn kelvin_tenths_to_celsius(tenths: f64) -> f64 {
    tenths / 10.0 - KELVIN_OFFSET
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriStateSwitch {
    Off,
    On,
    Auto,
}

impl TriStateSwitch {
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Auto => 2,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
            Self::Auto => "AUTO",
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<bool> for TriStateSwitch {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl FromStr for TriStateSwitch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "ON" | "FAN" => Ok(Self::On),
            "AUTO" => Ok(Self::Auto),
            _ => Err(Error::UnrecognizedToken(s.to_string())),
        }
    }
}

impl fmt::Display for TriStateSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QualityTarget {
    High,
    Medium,
    Normal,
    Unknown,
    Off,
}

impl QualityTarget {
    /// Maps the user-facing sensitivity level onto the device target.
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            10 => Ok(Self::Normal),
            20 => Ok(Self::Medium),
            30 => Ok(Self::High),
            _ => Err(Error::InvalidQualityTarget(level)),
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Normal => 2,
            Self::Unknown => 3,
            Self::Off => 4,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::High => "0001",
            Self::Unknown => "0002",
            Self::Medium => "0003",
            Self::Normal => "0004",
            Self::Off => "OFF",
        }
    }
}

impl FromStr for QualityTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "0001" => Ok(Self::High),
            "0002" => Ok(Self::Unknown),
            "0003" => Ok(Self::Medium),
            "0004" => Ok(Self::Normal),
            "OFF" => Ok(Self::Off),
            _ => Err(Error::UnrecognizedToken(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeatMode {
    Off,
    Heat,
}

impl HeatMode {
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Heat => "HEAT",
        }
    }
}

impl From<bool> for HeatMode {
    fn from(on: bool) -> Self {
        if on {
            Self::Heat
        } else {
            Self::Off
        }
    }
}

impl FromStr for HeatMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(Self::Off),
            "HEAT" => Ok(Self::Heat),
            _ => Err(Error::UnrecognizedToken(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FanSpeed {
    Level(u8),
    Auto,
}

impl FanSpeed {
    pub fn level(level: u8) -> Result<Self> {
        if (1..=10).contains(&level) {
            Ok(Self::Level(level))
        } else {
            Err(Error::InvalidFanSpeed(level))
        }
    }

    pub fn as_wire(self) -> String {
        match self {
            Self::Level(level) => format!("{:04}", level),
            Self::Auto => "AUTO".to_string(),
        }
    }
}

impl FromStr for FanSpeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("AUTO") {
            return Ok(Self::Auto);
        }

        s.parse::<u8>()
            .ok()
            .filter(|level| (1..=10).contains(level))
            .map(Self::Level)
            .ok_or_else(|| Error::UnrecognizedToken(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorStatus {
    NoError,
    ErrorCode(String),
}

impl ErrorStatus {
    const NO_ERROR_CODES: [&'static str; 2] = ["02C0", "02C9"];

    pub fn from_code(code: &str) -> Self {
        if Self::NO_ERROR_CODES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(code))
        {
            Self::NoError
        } else {
            Self::ErrorCode(code.to_string())
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::NoError => None,
            Self::ErrorCode(code) => Some(code),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WarningStatus {
    NoWarning,
    FilterWarning,
}

impl WarningStatus {
    pub fn from_code(code: &str) -> Self {
        if code.eq_ignore_ascii_case("FLTR") {
            Self::FilterWarning
        } else {
            Self::NoWarning
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn target_range(self) -> (i32, i32) {
        match self {
            Self::Celsius => (1, 37),
            Self::Fahrenheit => (34, 98),
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius => f.write_str("Celsius"),
            Self::Fahrenheit => f.write_str("Fahrenheit"),
        }
    }
}

/// Heating target in whole tenths of a kelvin, as the device expects it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeatTarget(u16);

impl HeatTarget {
    pub fn new(value: i32, unit: TemperatureUnit) -> Result<Self> {
        let (min, max) = unit.target_range();
        if !(min..=max).contains(&value) {
            return Err(Error::InvalidTargetTemperature(unit, value));
        }

        let kelvin = match unit {
            TemperatureUnit::Celsius => value + 273,
            TemperatureUnit::Fahrenheit => ((value as f64 + 459.67) * 5.0 / 9.0).floor() as i32,
        };

        Ok(Self((kelvin * 10) as u16))
    }

    pub fn celsius(value: i32) -> Result<Self> {
        Self::new(value, TemperatureUnit::Celsius)
    }

    pub fn fahrenheit(value: i32) -> Result<Self> {
        Self::new(value, TemperatureUnit::Fahrenheit)
    }

    pub fn kelvin_tenths(self) -> u16 {
        self.0
    }

    pub fn as_wire(self) -> String {
        format!("{:04}", self.0)
    }
}
