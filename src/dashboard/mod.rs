//! Staff-side live view of open service calls.

pub mod alert;
pub mod engine;
pub mod http;
pub mod preference;
pub mod runtime;
pub mod source;
pub mod sse;

pub use alert::{AlertError, Alerter, Player};
pub use engine::{Engine, Input, Outcome, ScheduledAlert};
pub use http::{Audience, HttpSource};
pub use preference::SoundPreference;
pub use runtime::{Dashboard, PushStatus, Settings, SettingsError, View};
pub use source::{ChangeStream, RequestSource, SourceError};

use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub api_url: String,
    pub token: String,
    pub audience: Audience,
    pub request_timeout: Duration,
    pub sound_preference_path: String,
    pub settings: Settings,
}

fn millis(name: &str, default: u64) -> Duration {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Duration::from_millis(
        raw.parse::<u64>()
            .unwrap_or_else(|_| panic!("Invalid {} value", name)),
    )
}

impl Default for Config {
    fn default() -> Self {
        let api_url =
            env::var("DASHBOARD_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let (token, audience) = match env::var("PANEL_TOKEN") {
            Ok(token) => (token, Audience::Panel),
            Err(_) => (
                env::var("ADMIN_TOKEN").expect("PANEL_TOKEN or ADMIN_TOKEN not set"),
                Audience::Admin,
            ),
        };
        let snapshot_limit = env::var("SNAPSHOT_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u32>()
            .expect("Invalid SNAPSHOT_LIMIT value");
        let sound_preference_path = env::var("SOUND_PREFERENCE_PATH")
            .unwrap_or_else(|_| ".tablecall/sound.json".to_string());

        let settings = Settings {
            poll_interval: millis("POLL_INTERVAL_MS", 2_000),
            alert_stagger: millis("ALERT_STAGGER_MS", 450),
            snapshot_limit,
            push_retry: millis("PUSH_RETRY_MS", 5_000),
        };
        if let Err(err) = settings.validate() {
            panic!("Invalid dashboard settings: {}", err);
        }

        Self {
            api_url,
            token,
            audience,
            request_timeout: millis("REQUEST_TIMEOUT_MS", 10_000),
            sound_preference_path,
            settings,
        }
    }
}
