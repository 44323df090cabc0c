pub mod request {
    use crate::modules::request::Scope;

    pub struct Payload {
        pub scope: Scope,
    }
}

pub mod response {
    use crate::modules::request::feed::Change;
    use axum::response::sse::{Event, Sse};
    use futures::stream::BoxStream;

    pub const EVENT_NAME: &str = "change";

    pub fn into_event(change: Change) -> Result<Event, axum::Error> {
        Event::default().event(EVENT_NAME).json_data(change)
    }

    pub type Response = Sse<BoxStream<'static, Result<Event, axum::Error>>>;
}
