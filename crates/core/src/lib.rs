#![deny(rust_2018_idioms)]

pub mod advert;
pub mod commands;
pub mod config;
pub mod permissions;
pub mod player;
pub mod plugin;
pub mod preferences;
pub mod server;
pub mod substitution;

pub use commands::CommandSender;
pub use config::PluginConfig;
pub use player::OnlinePlayer;
pub use plugin::ColoredChatNames;
pub use server::{ChatEvent, Server};
