use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    InFlight,
    CoolingDown { remaining: Duration },
}

/// Per-session guard against repeated taps on the call buttons.
#[derive(Debug)]
pub struct SubmissionThrottle {
    cooldown: Duration,
    last_attempt: Option<Instant>,
    in_flight: bool,
}

impl Default for SubmissionThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl SubmissionThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_attempt: None,
            in_flight: false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Admits an attempt, starting the cooldown whatever its outcome.
    pub fn try_begin(&mut self, now: Instant) -> Result<(), Refusal> {
        if self.in_flight {
            return Err(Refusal::InFlight);
        }

        if let Some(last) = self.last_attempt {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.cooldown {
                return Err(Refusal::CoolingDown {
                    remaining: self.cooldown - elapsed,
                });
            }
        }

        self.last_attempt = Some(now);
        self.in_flight = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}
