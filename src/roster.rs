use anyhow::{Context, Result};
use ccn_core::permissions::Permissions;
use ccn_core::{CommandSender, OnlinePlayer, Server};
use ccn_text::{strip_formatting, TextComponent};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug)]
struct RosterEntry {
    name: String,
    display_name: Option<String>,
    /// Leave out to grant every permission.
    permissions: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
struct RosterFile {
    #[serde(default)]
    players: Vec<RosterEntry>,
}

/// A stand-in host whose online players come from a TOML file.
pub struct Roster {
    players: Vec<OnlinePlayer>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Roster> {
        let str = fs::read_to_string(path)
            .with_context(|| format!("failed to read roster {}", path.display()))?;
        let file: RosterFile = toml::from_str(&str)
            .with_context(|| format!("failed to parse roster {}", path.display()))?;

        let players = file
            .players
            .into_iter()
            .map(|entry| {
                let display_name = entry.display_name.unwrap_or_else(|| entry.name.clone());
                let player = OnlinePlayer::new(entry.name, display_name);
                match entry.permissions {
                    Some(nodes) => player.with_permissions(Permissions::from_nodes(nodes)),
                    None => player,
                }
            })
            .collect();
        Ok(Roster { players })
    }
}

impl Server for Roster {
    fn online_players(&self) -> Vec<OnlinePlayer> {
        self.players.clone()
    }

    fn send_message(&self, to: &CommandSender, message: TextComponent) {
        match to {
            CommandSender::Player(name) => {
                println!("[to {}] {}", name, strip_formatting(&message.to_plain_text()))
            }
            CommandSender::Console => println!("{}", message.to_plain_text()),
        }
    }

    fn kick_player(&self, name: &str, reason: TextComponent) {
        println!("[kick {}] {}", name, reason.to_plain_text());
    }
}
