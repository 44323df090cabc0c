pub mod auth;
pub mod request;
pub mod restaurant;
pub mod table;

mod router;
pub use router::get_router;
