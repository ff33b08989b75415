use chrono::Utc;
use log::{debug, error, info, trace, warn};

use crate::snapshot::{fold, Message, Rejection};
use crate::telegram::{build_state_request, MessageKind, OutboundTelegram, Telegram};
use crate::{Command, DeviceIdentity, Error, Result, SensorSnapshot, StateSnapshot};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    Connected,
    AwaitingStateReply,
}

impl Phase {
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected | Self::AwaitingStateReply)
    }
}

/// Work the transport has to carry out on behalf of the scheduler.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Connect { username: String, password: String },
    Subscribe(String),
    Publish { topic: String, telegram: OutboundTelegram },
    StateChanged(StateSnapshot),
    SensorsChanged(SensorSnapshot),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Heartbeat ticks between two state requests.
    pub request_interval: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            request_interval: 3,
        }
    }
}

pub struct Scheduler {
    config: SchedulerConfig,
    phase: Phase,
    identity: Option<DeviceIdentity>,
    countdown: u32,
    state: Option<StateSnapshot>,
    sensors: Option<SensorSnapshot>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config: SchedulerConfig {
                request_interval: config.request_interval.max(1),
            },
            phase: Phase::Disconnected,
            identity: None,
            countdown: 0,
            state: None,
            sensors: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn identity(&self) -> Option<&DeviceIdentity> {
        self.identity.as_ref()
    }

    pub fn state(&self) -> Option<&StateSnapshot> {
        self.state.as_ref()
    }

    pub fn sensors(&self) -> Option<&SensorSnapshot> {
        self.sensors.as_ref()
    }

    /// Identity is ready, start connecting to the device broker.
    pub fn start(&mut self, identity: DeviceIdentity) -> Vec<Effect> {
        if self.phase != Phase::Disconnected {
            warn!("ignoring start while {:?}", self.phase);
            return vec![];
        }

        info!("starting {:?}", identity);
        self.identity = Some(identity);
        self.connect()
    }

    pub fn reconnect(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Disconnected {
            return vec![];
        }

        self.connect()
    }

    fn connect(&mut self) -> Vec<Effect> {
        let Some(identity) = &self.identity else {
            return vec![];
        };

        self.phase = Phase::Connecting;
        vec![Effect::Connect {
            username: identity.serial_number().to_string(),
            password: identity.credential().to_string(),
        }]
    }

    pub fn connect_succeeded(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Connecting {
            warn!("unexpected connect while {:?}", self.phase);
            return vec![];
        }

        let Some(identity) = &self.identity else {
            return vec![];
        };

        info!("connected to {}", identity.display_name());
        let subscribe = Effect::Subscribe(identity.status_topic());

        self.phase = Phase::Connected;
        let mut effects = vec![subscribe];
        effects.extend(self.request_state());
        effects
    }

    pub fn connect_failed(&mut self, reason: &str) {
        error!("device connection failed: {}", reason);
        self.reset();
    }

    /// The status subscription was refused. Replies can never arrive on this
    /// session, so the device is treated as disconnected.
    pub fn subscribe_failed(&mut self, topic: &str, reason: &str) {
        error!("unable to subscribe to {}: {}", topic, reason);
        self.reset();
    }

    pub fn disconnected(&mut self) {
        if self.phase != Phase::Disconnected {
            info!("disconnected while {:?}", self.phase);
        }

        self.reset();
    }

    fn reset(&mut self) {
        self.phase = Phase::Disconnected;
        self.countdown = 0;
        self.state = None;
        self.sensors = None;
    }

    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.phase.is_connected() {
            return vec![];
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return vec![];
        }

        if self.phase == Phase::AwaitingStateReply {
            debug!("no state reply yet, requesting again");
        }

        self.request_state()
    }

    fn request_state(&mut self) -> Vec<Effect> {
        let Some(identity) = &self.identity else {
            return vec![];
        };

        let effect = Effect::Publish {
            topic: identity.command_topic(),
            telegram: build_state_request(Utc::now()),
        };

        self.countdown = self.config.request_interval;
        self.phase = Phase::AwaitingStateReply;
        vec![effect]
    }

    pub fn message_arrived(&mut self, topic: &str, payload: &[u8]) -> Vec<Effect> {
        trace!("{} {}", topic, String::from_utf8_lossy(payload));

        let telegram = match Telegram::from_slice(payload) {
            Ok(telegram) => telegram,
            Err(err) => {
                warn!("discarding telegram on {}: {}", topic, err);
                return vec![];
            }
        };

        let kind = telegram.kind();
        if kind == MessageKind::Unknown {
            debug!("ignoring {} telegram", telegram.msg);
            return vec![];
        }

        if !self.phase.is_connected() {
            debug!("ignoring {:?} telegram while {:?}", kind, self.phase);
            return vec![];
        }

        match fold(&telegram) {
            Ok(Message::State(fold)) => {
                log_rejected(&fold.rejected);
                self.apply_state(fold.snapshot)
            }
            Ok(Message::Sensors(fold)) => {
                log_rejected(&fold.rejected);
                self.apply_sensors(fold.snapshot)
            }
            Ok(Message::Unknown(_)) => vec![],
            Err(err) => {
                warn!("discarding {:?} telegram: {}", kind, err);
                vec![]
            }
        }
    }

    fn apply_state(&mut self, snapshot: StateSnapshot) -> Vec<Effect> {
        if snapshot.has_data() && self.phase == Phase::AwaitingStateReply {
            self.phase = Phase::Connected;
        }

        if self.state.as_ref() == Some(&snapshot) {
            return vec![];
        }

        debug!("state changed {:?}", snapshot);
        self.state = Some(snapshot.clone());
        vec![Effect::StateChanged(snapshot)]
    }

    fn apply_sensors(&mut self, snapshot: SensorSnapshot) -> Vec<Effect> {
        if self.sensors.as_ref() == Some(&snapshot) {
            return vec![];
        }

        debug!("sensors changed {:?}", snapshot);
        self.sensors = Some(snapshot.clone());
        vec![Effect::SensorsChanged(snapshot)]
    }

    pub fn command(&mut self, command: &Command) -> Result<Vec<Effect>> {
        if !self.phase.is_connected() {
            return Err(Error::NotConnected);
        }

        let identity = self.identity.as_ref().ok_or(Error::NotConnected)?;
        info!("sending {:?}", command);

        Ok(vec![Effect::Publish {
            topic: identity.command_topic(),
            telegram: command.telegram(Utc::now()),
        }])
    }
}

fn log_rejected(rejected: &[Rejection]) {
    for rejection in rejected {
        warn!("rejected field {}: {}", rejection.key, rejection.error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FanSpeed, TriStateSwitch};

    const STATE: &[u8] = br#"{"msg":"CURRENT-STATE","product-state":{"fmod":"AUTO","fnsp":"0004","ercd":"02C0","wacd":"NONE"}}"#;
    const SENSORS: &[u8] = br#"{"msg":"ENVIRONMENTAL-CURRENT-SENSOR-DATA","data":{"hact":"45","tact":"2980"}}"#;

    fn identity() -> DeviceIdentity {
        DeviceIdentity::new("NN2-EU-JEA3830A", "475", "secret", "Bedroom")
    }

    fn connected(interval: u32) -> Scheduler {
        let mut scheduler = Scheduler::new(SchedulerConfig {
            request_interval: interval,
        });
        scheduler.start(identity());
        scheduler.connect_succeeded();
        scheduler
    }

    fn state_requests(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|effect| {
                matches!(effect, Effect::Publish { telegram, .. } if telegram.msg == "REQUEST-CURRENT-STATE")
            })
            .count()
    }

    #[test]
    fn test_start_connects() {
        let mut scheduler = Scheduler::new(SchedulerConfig::default());
        assert_eq!(scheduler.phase(), Phase::Disconnected);

        let effects = scheduler.start(identity());
        assert_eq!(
            effects,
            vec![Effect::Connect {
                username: "NN2-EU-JEA3830A".to_string(),
                password: "secret".to_string(),
            }]
        );
        assert_eq!(scheduler.phase(), Phase::Connecting);
    }

    #[test]
    fn test_connect_requests_state_once() {
        let mut scheduler = Scheduler::new(SchedulerConfig::default());
        scheduler.start(identity());

        let effects = scheduler.connect_succeeded();
        assert_eq!(
            effects[0],
            Effect::Subscribe("475/NN2-EU-JEA3830A/status/current".to_string())
        );
        assert_eq!(state_requests(&effects), 1);
        assert!(matches!(
            &effects[1],
            Effect::Publish { topic, .. } if topic == "475/NN2-EU-JEA3830A/command"
        ));
        assert_eq!(scheduler.phase(), Phase::AwaitingStateReply);
    }

    #[test]
    fn test_request_every_interval() {
        let mut scheduler = connected(3);

        let mut emitted = vec![];
        for _ in 0..9 {
            emitted.push(state_requests(&scheduler.tick()));
        }

        assert_eq!(emitted, vec![0, 0, 1, 0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_interval_of_one() {
        let mut scheduler = connected(1);

        for _ in 0..4 {
            assert_eq!(state_requests(&scheduler.tick()), 1);
        }
    }

    #[test]
    fn test_no_requests_after_disconnect() {
        let mut scheduler = connected(1);
        scheduler.disconnected();

        assert_eq!(scheduler.phase(), Phase::Disconnected);
        for _ in 0..5 {
            assert!(scheduler.tick().is_empty());
        }
    }

    #[test]
    fn test_reconnect_requests_fresh_state() {
        let mut scheduler = connected(3);
        scheduler.message_arrived("status", STATE);
        assert!(scheduler.state().is_some());

        scheduler.disconnected();
        assert!(scheduler.state().is_none());

        assert!(matches!(scheduler.reconnect()[..], [Effect::Connect { .. }]));
        assert_eq!(state_requests(&scheduler.connect_succeeded()), 1);

        let effects = scheduler.message_arrived("status", STATE);
        assert!(matches!(effects[..], [Effect::StateChanged(_)]));
    }

    #[test]
    fn test_subscribe_failed() {
        let mut scheduler = connected(1);
        assert_eq!(scheduler.phase(), Phase::AwaitingStateReply);

        scheduler.subscribe_failed("475/NN2-EU-JEA3830A/status/current", "not authorized");
        assert_eq!(scheduler.phase(), Phase::Disconnected);
        assert!(scheduler.tick().is_empty());

        assert!(matches!(scheduler.reconnect()[..], [Effect::Connect { .. }]));
        let effects = scheduler.connect_succeeded();
        assert!(matches!(&effects[0], Effect::Subscribe(_)));
        assert_eq!(state_requests(&effects), 1);
    }

    #[test]
    fn test_connect_failed() {
        let mut scheduler = Scheduler::new(SchedulerConfig::default());
        scheduler.start(identity());
        scheduler.connect_failed("refused");

        assert_eq!(scheduler.phase(), Phase::Disconnected);
        assert!(scheduler.tick().is_empty());
        assert_eq!(scheduler.identity(), Some(&identity()));
    }

    #[test]
    fn test_state_reply() {
        let mut scheduler = connected(3);

        let effects = scheduler.message_arrived("status", STATE);
        assert_eq!(scheduler.phase(), Phase::Connected);

        match &effects[..] {
            [Effect::StateChanged(state)] => {
                assert_eq!(state.fan_mode, Some(TriStateSwitch::Auto));
                assert_eq!(state.fan_speed, Some(FanSpeed::Level(4)));
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(scheduler.message_arrived("status", STATE).is_empty());
    }

    #[test]
    fn test_sensors() {
        let mut scheduler = connected(3);

        let effects = scheduler.message_arrived("status", SENSORS);
        assert!(matches!(effects[..], [Effect::SensorsChanged(_)]));
        assert_eq!(scheduler.sensors().and_then(|s| s.humidity), Some(45));
        assert_eq!(scheduler.phase(), Phase::AwaitingStateReply);

        assert!(scheduler.message_arrived("status", SENSORS).is_empty());
    }

    #[test]
    fn test_messages_ignored_while_disconnected() {
        let mut scheduler = Scheduler::new(SchedulerConfig::default());
        scheduler.start(identity());

        assert!(scheduler.message_arrived("status", STATE).is_empty());
        assert!(scheduler.state().is_none());
    }

    #[test]
    fn test_malformed_telegram_keeps_snapshot() {
        let mut scheduler = connected(3);
        scheduler.message_arrived("status", STATE);

        let malformed = br#"{"msg":"STATE-CHANGE","product-state":{"fmod":"OFF"}}"#;
        assert!(scheduler.message_arrived("status", malformed).is_empty());
        assert!(scheduler.message_arrived("status", b"garbage").is_empty());

        assert_eq!(
            scheduler.state().and_then(|s| s.fan_mode),
            Some(TriStateSwitch::Auto)
        );
    }

    #[test]
    fn test_command() {
        let mut scheduler = Scheduler::new(SchedulerConfig::default());
        assert!(matches!(
            scheduler.command(&Command::ResetFilter),
            Err(Error::NotConnected)
        ));

        scheduler.start(identity());
        scheduler.connect_succeeded();

        let effects = scheduler.command(&Command::SetNightMode(true)).unwrap();
        match &effects[..] {
            [Effect::Publish { topic, telegram }] => {
                assert_eq!(topic, "475/NN2-EU-JEA3830A/command");
                assert_eq!(telegram.msg, "STATE-SET");
                assert_eq!(telegram.mode_reason, Some("LAPP"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
