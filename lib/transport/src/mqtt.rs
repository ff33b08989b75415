use std::time::Duration;

use log::info;
use paho_mqtt::{AsyncClient, ConnectOptionsBuilder, CreateOptionsBuilder, SslOptions};

/// Connects to the consumer broker over TLS.
pub async fn connect_mqtt(
    address: &str,
    username: &str,
    password: &str,
    client_id: &str,
) -> Result<AsyncClient, paho_mqtt::Error> {
    let create_opts = CreateOptionsBuilder::new_v3()
        .server_uri(address)
        .client_id(client_id)
        .finalize();

    let client = AsyncClient::new(create_opts)?;

    let conn_opts = ConnectOptionsBuilder::new_v3()
        .keep_alive_interval(Duration::from_secs(30))
        .clean_session(false)
        .ssl_options(SslOptions::new())
        .user_name(username)
        .password(password)
        .finalize();

    client.connect(conn_opts).await?;
    info!("connected to {} as {}", address, client_id);

    Ok(client)
}
