use ccn_core::permissions::Permissions;
use ccn_core::{ColoredChatNames, CommandSender, OnlinePlayer, PluginConfig, Server};
use ccn_text::TextComponent;
use std::path::Path;
use std::sync::Mutex;

pub const AD: &str = "Visit shady.example.org for cheap ranks!";

pub struct TestServer {
    players: Vec<OnlinePlayer>,
    sent: Mutex<Vec<(CommandSender, TextComponent)>>,
    kicked: Mutex<Vec<(String, String)>>,
}

impl TestServer {
    pub fn new() -> TestServer {
        TestServer {
            players: Vec::new(),
            sent: Mutex::new(Vec::new()),
            kicked: Mutex::new(Vec::new()),
        }
    }

    pub fn with_player(mut self, player: OnlinePlayer) -> TestServer {
        self.players.push(player);
        self
    }

    /// The usual cast: two regular players and an admin.
    pub fn standard() -> TestServer {
        let regular = ["coloredchatnames", "coloredchatnames.target"];
        TestServer::new()
            .with_player(
                OnlinePlayer::new("Alice", "§bAlice§r")
                    .with_permissions(Permissions::from_nodes(regular)),
            )
            .with_player(
                OnlinePlayer::new("Bob", "§aBob§r")
                    .with_permissions(Permissions::from_nodes(regular)),
            )
            .with_player(
                OnlinePlayer::new("Admin", "§4Admin§r")
                    .with_permissions(Permissions::from_nodes(["coloredchatnames.*"])),
            )
    }

    pub fn player(&self, name: &str) -> OnlinePlayer {
        self.get_player_exact(name)
            .unwrap_or_else(|| panic!("{} is not online", name))
    }

    /// Plain text of every message sent to `to`, oldest first.
    pub fn messages_to(&self, to: &CommandSender) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(sender, _)| sender == to)
            .map(|(_, message)| message.to_plain_text())
            .collect()
    }

    pub fn kicked(&self) -> Vec<(String, String)> {
        self.kicked.lock().unwrap().clone()
    }
}

impl Server for TestServer {
    fn online_players(&self) -> Vec<OnlinePlayer> {
        self.players.clone()
    }

    fn send_message(&self, to: &CommandSender, message: TextComponent) {
        self.sent.lock().unwrap().push((to.clone(), message));
    }

    fn kick_player(&self, name: &str, reason: TextComponent) {
        self.kicked
            .lock()
            .unwrap()
            .push((name.to_string(), reason.to_plain_text()));
    }
}

pub fn config_in(dir: &Path) -> PluginConfig {
    PluginConfig {
        data_file: dir.join("config.yml").to_string_lossy().into_owned(),
        advertisement_signature: AD.to_string(),
        ..Default::default()
    }
}

pub fn enable_in(dir: &Path) -> ColoredChatNames {
    ColoredChatNames::enable(config_in(dir))
}

pub fn player(name: &str) -> CommandSender {
    CommandSender::Player(name.to_string())
}

pub fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
