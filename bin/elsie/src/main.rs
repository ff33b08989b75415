use elsie::{fetch_devices, Config, Gateway, Result};
use transport::connect_mqtt;

use log::{error, info};
use paho_mqtt::{AsyncClient, CreateOptionsBuilder};
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();

    info!("elsie version {VERSION}");

    let config = Config::from_env()?;

    let cloud_devices = match &config.credentials.cloud {
        Some(login) => match fetch_devices(login).await {
            Ok(devices) => devices,
            Err(err) => {
                error!("cloud lookup failed: {err}");
                vec![]
            }
        },
        None => vec![],
    };

    let identity = dyson::resolve_identity(&config.credentials, &cloud_devices)?;
    info!("resolved {:?}", identity);

    let create_opts = CreateOptionsBuilder::new_v3()
        .server_uri(&config.device_address)
        .client_id(format!("elsie-{}", identity.serial_number()))
        .finalize();
    let device = AsyncClient::new(create_opts)?;

    let consumer = connect_mqtt(
        &config.mqtt_address,
        &config.mqtt_user,
        &config.mqtt_pass,
        "elsie",
    )
    .await?;
    info!("connected mqtt");

    let gateway = Gateway::new(config.scheduler, device, consumer, config.temperature_unit);
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = gateway.run(identity, config.heartbeat) => result?,
        _ = sigterm.recv() => info!("got SIGTERM, exiting..."),
    };

    Ok(())
}
