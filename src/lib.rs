pub mod bot;
pub mod buttons;
pub mod commands;
pub mod config;
pub mod heartbeat;
pub mod http_server;
pub mod interaction;
pub mod logging;
pub mod publisher;
pub mod router;
pub mod supervisor;
