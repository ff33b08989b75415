use dyson::{Command, HeatMode, SensorSnapshot, StateSnapshot, TriStateSwitch, WarningStatus};
use transport::elsie::{Action, FanMode, FanSpeed, QualityTarget, Sensors, Status, TemperatureUnit};

pub fn command_for_action(action: Action) -> dyson::Result<Command> {
    let command = match action {
        Action::SetFanMode(mode) => Command::SetFanMode(switch_from_mode(mode)),
        Action::SetFanState(on) => Command::SetFanState(TriStateSwitch::from(on)),
        Action::SetFanSpeed(FanSpeed::Level(level)) => Command::fan_speed(level)?,
        Action::SetFanSpeed(FanSpeed::Auto) => Command::SetFanSpeed(dyson::FanSpeed::Auto),
        Action::SetNightMode(on) => Command::SetNightMode(on),
        Action::SetOscillation(on) => Command::SetOscillation(on),
        Action::SetFocus(on) => Command::SetFocus(on),
        Action::SetAutoMode(on) => Command::SetAutoMode(on),
        Action::SetStandbyMonitoring(on) => Command::SetStandbyMonitoring(on),
        Action::SetQualityTarget(target) => Command::quality_target(target.level())?,
        Action::SetHeating(on) => Command::SetHeatMode(HeatMode::from(on)),
        Action::SetHeatTarget(value, unit) => Command::heat_target(value, dyson_unit(unit))?,
        Action::ResetFilter => Command::ResetFilter,
    };

    Ok(command)
}

pub fn status_from_snapshot(name: &str, state: &StateSnapshot, unit: TemperatureUnit) -> Status {
    let is_on = |switch: Option<TriStateSwitch>| switch.map(TriStateSwitch::is_on);

    Status {
        name: name.to_string(),
        fan_mode: state.fan_mode.map(mode_from_switch),
        fan_speed: state.fan_speed.map(fan_speed),
        fan_state: is_on(state.fan_state),
        night_mode: is_on(state.night_mode),
        night_mode_speed: state.night_mode_speed.map(fan_speed),
        oscillation: is_on(state.oscillation),
        oscillation_angles: state.oscillation_angle_low.zip(state.oscillation_angle_high),
        focus: is_on(state.focus),
        auto_mode: is_on(state.fan_mode_auto),
        standby_monitoring: is_on(state.standby_monitoring),
        quality_target: state.quality_target.and_then(quality_target),
        heating: state.heat_mode.map(|mode| mode == HeatMode::Heat),
        heat_target: state
            .heat_target_celsius
            .map(|celsius| temperature(celsius, unit)),
        filter_life: state.filter_life_percent,
        error_code: state.error_status.code().map(str::to_string),
        filter_warning: state.warning_status == WarningStatus::FilterWarning,
        temperature_unit: unit,
    }
}

pub fn sensors_from_snapshot(name: &str, sensors: &SensorSnapshot, unit: TemperatureUnit) -> Sensors {
    // p25r/p10r only stand in for pm25/pm10 as a pair
    let (pm25, pm10) = match (sensors.particulate_matter_25, sensors.particulate_matter_10) {
        (None, None) => (sensors.particles_2_5, sensors.particles_10),
        pair => pair,
    };

    Sensors {
        name: name.to_string(),
        temperature: sensors
            .temperature_celsius
            .map(|celsius| temperature(celsius, unit)),
        humidity: sensors.humidity,
        volatile_compounds: sensors.volatile_compounds_index,
        particles: sensors.particles_index,
        pm25,
        pm10,
        nitrogen_dioxide: sensors.nitrogen_dioxide_density,
        sleep_timer: sensors.sleep_timer_minutes,
        temperature_unit: unit,
    }
}

fn dyson_unit(unit: TemperatureUnit) -> dyson::TemperatureUnit {
    match unit {
        TemperatureUnit::Celsius => dyson::TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit => dyson::TemperatureUnit::Fahrenheit,
    }
}

fn temperature(celsius: f64, unit: TemperatureUnit) -> f32 {
    let value = dyson_unit(unit).from_celsius(celsius);
    ((value * 100.0).round() / 100.0) as f32
}

fn switch_from_mode(mode: FanMode) -> TriStateSwitch {
    match mode {
        FanMode::Off => TriStateSwitch::Off,
        FanMode::On => TriStateSwitch::On,
        FanMode::Auto => TriStateSwitch::Auto,
    }
}

fn mode_from_switch(switch: TriStateSwitch) -> FanMode {
    match switch {
        TriStateSwitch::Off => FanMode::Off,
        TriStateSwitch::On => FanMode::On,
        TriStateSwitch::Auto => FanMode::Auto,
    }
}

fn fan_speed(speed: dyson::FanSpeed) -> FanSpeed {
    match speed {
        dyson::FanSpeed::Level(level) => FanSpeed::Level(level),
        dyson::FanSpeed::Auto => FanSpeed::Auto,
    }
}

fn quality_target(target: dyson::QualityTarget) -> Option<QualityTarget> {
    match target {
        dyson::QualityTarget::High => Some(QualityTarget::High),
        dyson::QualityTarget::Medium => Some(QualityTarget::Medium),
        dyson::QualityTarget::Normal => Some(QualityTarget::Normal),
        dyson::QualityTarget::Unknown | dyson::QualityTarget::Off => None,
    }
}

#[cfg(test)]
mod tests {
    use dyson::{decode, Message};

    use super::*;

    fn state(payload: &[u8]) -> StateSnapshot {
        match decode(payload).unwrap() {
            Message::State(fold) => fold.snapshot,
            other => panic!("unexpected {:?}", other),
        }
    }

    fn sensors(payload: &[u8]) -> SensorSnapshot {
        match decode(payload).unwrap() {
            Message::Sensors(fold) => fold.snapshot,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_command_for_action() {
        let command = command_for_action(Action::SetFanSpeed(FanSpeed::Level(4))).unwrap();
        assert_eq!(command, Command::SetFanSpeed(dyson::FanSpeed::Level(4)));

        let command = command_for_action(Action::SetQualityTarget(QualityTarget::Normal)).unwrap();
        assert_eq!(command.value(), "0004");

        let command =
            command_for_action(Action::SetHeatTarget(68, TemperatureUnit::Fahrenheit)).unwrap();
        assert_eq!((command.key(), command.value().as_str()), ("hmax", "2930"));

        let command = command_for_action(Action::SetHeating(true)).unwrap();
        assert_eq!((command.key(), command.value().as_str()), ("hmod", "HEAT"));

        let command = command_for_action(Action::SetFanMode(FanMode::Auto)).unwrap();
        assert_eq!((command.key(), command.value().as_str()), ("fmod", "AUTO"));
    }

    #[test]
    fn test_invalid_action() {
        assert!(matches!(
            command_for_action(Action::SetFanSpeed(FanSpeed::Level(12))),
            Err(dyson::Error::InvalidFanSpeed(12))
        ));
        assert!(matches!(
            command_for_action(Action::SetHeatTarget(40, TemperatureUnit::Celsius)),
            Err(dyson::Error::InvalidTargetTemperature(dyson::TemperatureUnit::Celsius, 40))
        ));
    }

    #[test]
    fn test_status() {
        let state = state(
            br#"{"msg":"CURRENT-STATE","product-state":{
                "fmod":"FAN","fnsp":"0006","oson":"ON","auto":"OFF","qtar":"0002",
                "hmod":"HEAT","hmax":"2950","osal":"0045","osau":"0315",
                "hflr":"0080","cflr":"0090","ercd":"02C9","wacd":"FLTR"}}"#,
        );

        let status = status_from_snapshot("Bedroom", &state, TemperatureUnit::Celsius);
        assert_eq!(status.name, "Bedroom");
        assert_eq!(status.fan_mode, Some(FanMode::On));
        assert_eq!(status.fan_speed, Some(FanSpeed::Level(6)));
        assert_eq!(status.oscillation, Some(true));
        assert_eq!(status.oscillation_angles, Some((45, 315)));
        assert_eq!(status.auto_mode, Some(false));
        assert_eq!(status.night_mode, None);
        assert_eq!(status.quality_target, None);
        assert_eq!(status.heating, Some(true));
        assert_eq!(status.heat_target, Some(21.85));
        assert_eq!(status.filter_life, Some(85));
        assert_eq!(status.error_code, None);
        assert!(status.filter_warning);
    }

    #[test]
    fn test_sensors() {
        let sensors = sensors(
            br#"{"msg":"ENVIRONMENTAL-CURRENT-SENSOR-DATA","data":{
                "tact":"2931","hact":"0052","pact":"0003","pm25":"0004","pm10":"0006",
                "p25r":"0005","p10r":"0007","va10":"0002","sltm":"OFF"}}"#,
        );

        let payload = sensors_from_snapshot("Bedroom", &sensors, TemperatureUnit::Fahrenheit);
        assert_eq!(payload.temperature, Some(67.91));
        assert_eq!(payload.humidity, Some(52));
        assert_eq!(payload.particles, Some(3));
        assert_eq!(payload.pm25, Some(4));
        assert_eq!(payload.pm10, Some(6));
        assert_eq!(payload.volatile_compounds, Some(2));
        assert_eq!(payload.sleep_timer, None);
        assert_eq!(payload.temperature_unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn test_revision_particles() {
        let sensors = sensors(
            br#"{"msg":"ENVIRONMENTAL-CURRENT-SENSOR-DATA","data":{"p25r":"0007","p10r":"0009"}}"#,
        );

        let payload = sensors_from_snapshot("Bedroom", &sensors, TemperatureUnit::Celsius);
        assert_eq!(payload.particles, None);
        assert_eq!(payload.pm25, Some(7));
        assert_eq!(payload.pm10, Some(9));
    }
}
