pub mod ranking;
pub mod season;
pub mod server;
