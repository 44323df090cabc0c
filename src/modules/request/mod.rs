pub mod feed;
pub mod lifecycle;
pub mod repository;
pub mod routes;
pub mod service;

use repository::Request;

/// Which requests a dashboard may see and act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    Restaurant(String),
    Global,
}

impl Scope {
    pub fn restaurant_id(&self) -> Option<&str> {
        match self {
            Scope::Restaurant(id) => Some(id.as_str()),
            Scope::Global => None,
        }
    }

    pub fn includes(&self, row: &Request) -> bool {
        match self {
            Scope::Restaurant(id) => row.restaurant_id == *id,
            Scope::Global => true,
        }
    }
}
