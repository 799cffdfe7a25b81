#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod captcha;
pub mod dispatch;
pub mod routes;
pub mod server;
pub mod types;
pub mod world_id;
