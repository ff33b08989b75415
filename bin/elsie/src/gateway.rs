use std::time::Duration;

use dyson::{DeviceIdentity, Effect, Phase, Scheduler, SchedulerConfig};
use futures_util::stream::StreamExt;
use log::{debug, error, info, trace};
use paho_mqtt::{AsyncClient, ConnectOptionsBuilder, Message, MessageBuilder, QOS_1};
use serde::Serialize;
use tokio::time::{self, interval_at, Instant, Interval};
use transport::action::{Action, ActionRequest, ActionResponse, ActionResult};
use transport::elsie::{self, TemperatureUnit};
use transport::state::StateUpdate;
use transport::Topic;

use crate::status::{command_for_action, sensors_from_snapshot, status_from_snapshot};
use crate::{Error, Result};

/// First tick fires one full period after creation.
fn heartbeat_timer(period: Duration) -> Interval {
    interval_at(Instant::now() + period, period)
}

/// Bridges one device broker and the consumer broker around a [`Scheduler`].
pub struct Gateway {
    scheduler: Scheduler,
    device: AsyncClient,
    consumer: AsyncClient,
    temperature_unit: TemperatureUnit,
}

impl Gateway {
    pub fn new(
        config: SchedulerConfig,
        device: AsyncClient,
        consumer: AsyncClient,
        temperature_unit: TemperatureUnit,
    ) -> Self {
        Self {
            scheduler: Scheduler::new(config),
            device,
            consumer,
            temperature_unit,
        }
    }

    pub async fn run(mut self, identity: DeviceIdentity, heartbeat: Duration) -> Result<()> {
        let mut device_stream = self.device.get_stream(25);
        let mut consumer_stream = self.consumer.get_stream(25);

        self.subscribe_consumer().await?;

        let effects = self.scheduler.start(identity);
        self.apply_logged(effects).await;

        let mut timer = heartbeat_timer(heartbeat);

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    let effects = match self.scheduler.phase() {
                        Phase::Disconnected => self.scheduler.reconnect(),
                        _ => self.scheduler.tick(),
                    };
                    self.apply_logged(effects).await;
                }
                msg = device_stream.next() => match msg {
                    Some(Some(msg)) => {
                        let effects = self.scheduler.message_arrived(msg.topic(), msg.payload());
                        self.apply_logged(effects).await;
                    }
                    Some(None) => {
                        error!("lost device connection, retrying on next heartbeat");
                        self.scheduler.disconnected();
                    }
                    None => return Err(Error::StreamClosed),
                },
                msg = consumer_stream.next() => match msg {
                    Some(Some(msg)) => self.handle_consumer_message(&msg).await,
                    Some(None) => {
                        error!("Lost MQTT connection. Attempting reconnect.");
                        self.reconnect_consumer().await?;
                    }
                    None => return Err(Error::StreamClosed),
                },
            }
        }
    }

    async fn subscribe_consumer(&self) -> Result<()> {
        let topics = [Topic::ActionRequest.to_string(), Topic::StateRequest.to_string()];
        self.consumer.subscribe_many(&topics, &[QOS_1, QOS_1]).await?;
        info!("subscribed to topics: {:?}", topics);

        Ok(())
    }

    async fn reconnect_consumer(&self) -> Result<()> {
        while let Err(err) = self.consumer.reconnect().await {
            error!("Error MQTT reconnecting: {}", err);
            time::sleep(Duration::from_secs(1)).await;
        }

        info!("reconnected mqtt");
        self.subscribe_consumer().await
    }

    async fn apply_logged(&mut self, effects: Vec<Effect>) {
        if let Err(err) = self.apply(effects).await {
            error!("{}", err);
        }
    }

    async fn apply(&mut self, effects: Vec<Effect>) -> Result<()> {
        let mut pending = effects;

        while !pending.is_empty() {
            let mut next = Vec::new();

            for effect in pending {
                match effect {
                    Effect::Connect { username, password } => {
                        let options = ConnectOptionsBuilder::new_v3()
                            .keep_alive_interval(Duration::from_secs(30))
                            .clean_session(true)
                            .user_name(username)
                            .password(password)
                            .finalize();

                        match self.device.connect(options).await {
                            Ok(_) => next.extend(self.scheduler.connect_succeeded()),
                            Err(err) => self.scheduler.connect_failed(&err.to_string()),
                        }
                    }
                    Effect::Subscribe(topic) => {
                        if let Err(err) = self.device.subscribe(&topic, QOS_1).await {
                            self.scheduler.subscribe_failed(&topic, &err.to_string());
                            if let Err(err) = self.device.disconnect(None).await {
                                debug!("unable to disconnect device: {}", err);
                            }
                            return Err(err.into());
                        }
                        info!("subscribed to {}", topic);
                    }
                    Effect::Publish { topic, telegram } => {
                        let payload = telegram.to_vec()?;
                        debug!("sending {} to {}", telegram.msg, topic);
                        trace!("{}", String::from_utf8_lossy(&payload));

                        let message = MessageBuilder::new()
                            .topic(topic)
                            .payload(payload)
                            .qos(QOS_1)
                            .finalize();
                        self.device.publish(message).await?;
                    }
                    Effect::StateChanged(state) => {
                        let status =
                            status_from_snapshot(self.name(), &state, self.temperature_unit);
                        self.publish_update(elsie::State::Status(status)).await?;
                    }
                    Effect::SensorsChanged(sensors) => {
                        let sensors =
                            sensors_from_snapshot(self.name(), &sensors, self.temperature_unit);
                        self.publish_update(elsie::State::Sensors(sensors)).await?;
                    }
                }
            }

            pending = next;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        self.scheduler
            .identity()
            .map(DeviceIdentity::display_name)
            .unwrap_or_default()
    }

    async fn handle_consumer_message(&mut self, msg: &Message) {
        match msg.topic().parse::<Topic>() {
            Ok(Topic::ActionRequest) => {
                match serde_json::from_slice::<ActionRequest>(msg.payload()) {
                    Ok(request) => {
                        for action in request.actions {
                            self.perform(action).await;
                        }
                    }
                    Err(err) => error!("unable to parse action request: {}", err),
                }
            }
            Ok(Topic::StateRequest) => {
                if let Err(err) = self.publish_snapshots().await {
                    error!("unable to publish state: {}", err);
                }
            }
            _ => debug!("ignoring message on {}", msg.topic()),
        }
    }

    async fn perform(&mut self, action: Action) {
        let action_id = action.id();
        let Action::Elsie(action, _) = action;
        info!("performing {:?}", action);

        let result = match self.send(action).await {
            Ok(()) => ActionResult::Success,
            Err(err) => {
                error!("unable to perform action {}: {}", action_id, err);
                ActionResult::Failure(err.to_string())
            }
        };

        let response = ActionResponse { action_id, result };
        let topic = Topic::ActionResponse(action_id.to_string());

        if let Err(err) = self.publish(topic, &response).await {
            error!("unable to publish action response: {}", err);
        }
    }

    async fn send(&mut self, action: elsie::Action) -> Result<()> {
        let command = command_for_action(action)?;
        let effects = self.scheduler.command(&command)?;
        self.apply(effects).await
    }

    async fn publish_snapshots(&mut self) -> Result<()> {
        let mut effects = Vec::new();

        if let Some(state) = self.scheduler.state() {
            effects.push(Effect::StateChanged(state.clone()));
        }

        if let Some(sensors) = self.scheduler.sensors() {
            effects.push(Effect::SensorsChanged(sensors.clone()));
        }

        self.apply(effects).await
    }

    async fn publish_update(&self, state: elsie::State) -> Result<()> {
        info!("publishing state: {:?}", state);
        self.publish(Topic::State, &StateUpdate::Elsie(state)).await
    }

    async fn publish<T: Serialize>(&self, topic: Topic, payload: &T) -> Result<()> {
        let payload = serde_json::to_vec(payload)?;

        let message = MessageBuilder::new()
            .topic(topic.to_string())
            .payload(payload)
            .qos(QOS_1)
            .finalize();

        self.consumer.publish(message).await?;
        Ok(())
    }
}
