pub mod event_loop;
pub mod functions;
pub mod server;
pub mod transport;
pub mod types;
