pub mod elsie;

pub mod action {
    mod request;
    mod response;

    pub use request::Action;
    pub use request::Request as ActionRequest;
    pub use response::ActionResult;
    pub use response::Response as ActionResponse;
}

pub mod state {
    mod update;

    pub use update::Update as StateUpdate;
}

mod mqtt;
pub use mqtt::connect_mqtt;

mod topic;
pub use topic::Topic;
