use crate::commands::CommandSender;
use crate::player::OnlinePlayer;
use ccn_text::TextComponent;

/// The parts of the host server this plugin talks to.
///
/// Every call is a fresh query; nothing returned here is kept past the
/// operation that asked for it.
pub trait Server {
    /// Connected players, in the host's enumeration order.
    fn online_players(&self) -> Vec<OnlinePlayer>;

    fn send_message(&self, to: &CommandSender, message: TextComponent);

    /// Disconnects `name` with `reason` shown on their screen.
    fn kick_player(&self, name: &str, reason: TextComponent);

    fn get_player_exact(&self, name: &str) -> Option<OnlinePlayer> {
        self.online_players()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Looks up a player by exact name, falling back to the shortest name that
    /// starts with `name`.
    fn find_player(&self, name: &str) -> Option<OnlinePlayer> {
        let players = self.online_players();
        let name_lower = name.to_lowercase();
        let index = players
            .iter()
            .position(|p| p.name.to_lowercase() == name_lower)
            .or_else(|| {
                players
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.name.to_lowercase().starts_with(&name_lower))
                    .min_by_key(|(_, p)| p.name.len())
                    .map(|(i, _)| i)
            })?;
        players.into_iter().nth(index)
    }
}

/// A chat message on its way to the other players.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub player: OnlinePlayer,
    pub message: String,
    /// Set when delivery should not happen.
    pub cancelled: bool,
}

impl ChatEvent {
    pub fn new(player: OnlinePlayer, message: impl Into<String>) -> ChatEvent {
        ChatEvent {
            player,
            message: message.into(),
            cancelled: false,
        }
    }
}
