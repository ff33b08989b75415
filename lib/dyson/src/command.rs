use chrono::{DateTime, Utc};

use crate::telegram::{build_state_change, OutboundTelegram};
use crate::{FanSpeed, HeatMode, HeatTarget, QualityTarget, Result, TemperatureUnit, TriStateSwitch};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetFanMode(TriStateSwitch),
    SetFanState(TriStateSwitch),
    SetFanSpeed(FanSpeed),
    SetStandbyMonitoring(bool),
    SetNightMode(bool),
    SetOscillation(bool),
    SetFocus(bool),
    SetAutoMode(bool),
    SetQualityTarget(QualityTarget),
    SetHeatMode(HeatMode),
    SetHeatTarget(HeatTarget),
    ResetFilter,
}

impl Command {
    pub fn fan_speed(level: u8) -> Result<Self> {
        FanSpeed::level(level).map(Self::SetFanSpeed)
    }

    pub fn quality_target(level: u8) -> Result<Self> {
        QualityTarget::from_level(level).map(Self::SetQualityTarget)
    }

    pub fn heat_target(value: i32, unit: TemperatureUnit) -> Result<Self> {
        HeatTarget::new(value, unit).map(Self::SetHeatTarget)
    }

    /// Wire key the device stores this setting under.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SetFanMode(_) => "fmod",
            Self::SetFanState(_) => "fnst",
            Self::SetFanSpeed(_) => "fnsp",
            Self::SetStandbyMonitoring(_) => "rhtm",
            Self::SetNightMode(_) => "nmod",
            Self::SetOscillation(_) => "oson",
            Self::SetFocus(_) => "fdir",
            Self::SetAutoMode(_) => "auto",
            Self::SetQualityTarget(_) => "qtar",
            Self::SetHeatMode(_) => "hmod",
            Self::SetHeatTarget(_) => "hmax",
            Self::ResetFilter => "rstf",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::SetFanMode(mode) | Self::SetFanState(mode) => mode.as_wire().to_string(),
            Self::SetFanSpeed(speed) => speed.as_wire(),
            Self::SetStandbyMonitoring(on)
            | Self::SetNightMode(on)
            | Self::SetOscillation(on)
            | Self::SetFocus(on)
            | Self::SetAutoMode(on) => TriStateSwitch::from(*on).as_wire().to_string(),
            Self::SetQualityTarget(target) => target.as_wire().to_string(),
            Self::SetHeatMode(mode) => mode.as_wire().to_string(),
            Self::SetHeatTarget(target) => target.as_wire(),
            Self::ResetFilter => "RSTF".to_string(),
        }
    }

    pub fn telegram(&self, now: DateTime<Utc>) -> OutboundTelegram {
        build_state_change(self.key(), self.value(), now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::Error;

    #[test]
    fn test_keys_and_values() {
        let cases = [
            (Command::SetFanMode(TriStateSwitch::Auto), "fmod", "AUTO"),
            (Command::SetFanState(TriStateSwitch::On), "fnst", "ON"),
            (Command::SetFanSpeed(FanSpeed::Level(7)), "fnsp", "0007"),
            (Command::SetFanSpeed(FanSpeed::Auto), "fnsp", "AUTO"),
            (Command::SetStandbyMonitoring(true), "rhtm", "ON"),
            (Command::SetNightMode(false), "nmod", "OFF"),
            (Command::SetOscillation(true), "oson", "ON"),
            (Command::SetFocus(false), "fdir", "OFF"),
            (Command::SetAutoMode(true), "auto", "ON"),
            (Command::SetQualityTarget(QualityTarget::High), "qtar", "0001"),
            (Command::SetHeatMode(HeatMode::Heat), "hmod", "HEAT"),
            (Command::ResetFilter, "rstf", "RSTF"),
        ];

        for (command, key, value) in cases {
            assert_eq!(command.key(), key);
            assert_eq!(command.value(), value);
        }
    }

    #[test]
    fn test_validating_constructors() {
        assert_eq!(
            Command::heat_target(20, TemperatureUnit::Celsius).unwrap().value(),
            "2930"
        );
        assert!(matches!(
            Command::heat_target(0, TemperatureUnit::Celsius),
            Err(Error::InvalidTargetTemperature(TemperatureUnit::Celsius, 0))
        ));
        assert!(matches!(
            Command::heat_target(38, TemperatureUnit::Celsius),
            Err(Error::InvalidTargetTemperature(TemperatureUnit::Celsius, 38))
        ));

        assert_eq!(Command::quality_target(10).unwrap().value(), "0004");
        assert!(matches!(
            Command::quality_target(25),
            Err(Error::InvalidQualityTarget(25))
        ));

        assert_eq!(Command::fan_speed(10).unwrap().value(), "0010");
        assert!(matches!(Command::fan_speed(11), Err(Error::InvalidFanSpeed(11))));
    }

    #[test]
    fn test_telegram() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let telegram = Command::SetNightMode(true).telegram(now);

        assert_eq!(
            serde_json::to_value(&telegram).unwrap(),
            json!({
                "msg": "STATE-SET",
                "mode-reason": "LAPP",
                "data": { "nmod": "ON" },
                "time": "2024-01-02T03:04:05Z"
            })
        );
    }
}
