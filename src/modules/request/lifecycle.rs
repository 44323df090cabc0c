//! Service call types and the `waiting -> completed` state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue(pub String);

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid value", self.0)
    }
}

impl std::error::Error for InvalidValue {}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestType {
    #[serde(rename = "waiter")]
    Waiter,
    #[serde(rename = "bill")]
    Bill,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Waiter => "waiter",
            RequestType::Bill => "bill",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestType::Waiter => "Waiter requested",
            RequestType::Bill => "Bill requested",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiter" => Ok(RequestType::Waiter),
            "bill" => Ok(RequestType::Bill),
            _ => Err(InvalidValue(s.to_string())),
        }
    }
}

impl TryFrom<String> for RequestType {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    #[serde(rename = "waiting")]
    Waiting,
    #[serde(rename = "completed")]
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Waiting => "waiting",
            RequestStatus::Completed => "completed",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::Waiting)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(RequestStatus::Waiting),
            "completed" => Ok(RequestStatus::Completed),
            _ => Err(InvalidValue(s.to_string())),
        }
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Result of applying the staff "resolve" action to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Completed,
    AlreadyCompleted,
}

/// The only legal move is `waiting -> completed`; resolving a completed
/// request again is a no-op success, never a regression.
pub fn resolve(current: RequestStatus) -> Transition {
    match current {
        RequestStatus::Waiting => Transition::Completed,
        RequestStatus::Completed => Transition::AlreadyCompleted,
    }
}
