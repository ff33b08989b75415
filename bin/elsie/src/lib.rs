mod cloud;
mod config;
mod gateway;
mod status;

pub use cloud::fetch_devices;
pub use config::Config;
pub use gateway::Gateway;
pub use status::{command_for_action, sensors_from_snapshot, status_from_snapshot};

mod error;
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
