pub mod cors;
pub mod download;
pub mod routes;
pub mod server;
