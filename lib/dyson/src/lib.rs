mod cloud;
mod command;
mod credentials;
mod scheduler;
mod snapshot;
mod telegram;
mod topic;
mod value;

mod error;
pub use error::Error;

pub use cloud::CloudDevice;
pub use command::Command;
pub use credentials::{
    resolve_identity, CloudLogin, CredentialSources, DeviceIdentity, LocalCredentials,
};
pub use scheduler::{Effect, Phase, Scheduler, SchedulerConfig};
pub use snapshot::{decode, fold, Fold, Message, Rejection, SensorSnapshot, StateSnapshot};
pub use telegram::{build_state_change, build_state_request, MessageKind, OutboundTelegram, Telegram};
pub use topic::{base_topic, command_topic, status_topic};
pub use value::{
    kelvin_tenths_to_celsius, ErrorStatus, FanSpeed, HeatMode, HeatTarget, QualityTarget,
    TemperatureUnit, TriStateSwitch, WarningStatus,
};

pub type Result<T> = std::result::Result<T, Error>;
