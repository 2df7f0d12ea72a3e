//! WebSocket signaling server: transport glue and the per-connection session.

mod handler;
mod server;
pub mod session;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
