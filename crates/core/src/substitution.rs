use crate::player::OnlinePlayer;
use ccn_text::contains_formatting;
use regex::{NoExpand, Regex};
use tracing::warn;

/// Players without this permission never have their name rewritten.
pub const TARGET_PERMISSION: &str = "coloredchatnames.target";

fn name_pattern(name: &str) -> Option<Regex> {
    if name.is_empty() {
        return None;
    }
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            warn!("Cannot match name {:?}: {}", name, err);
            None
        }
    }
}

/// Replaces whole-word, case-insensitive mentions of each targetable player's
/// name with their display name.
///
/// Players are handled one after another in the given order, each pass working
/// on the output of the previous one. A display name inserted early can
/// therefore be matched again by a later player's name.
pub fn substitute(message: &str, online_players: &[OnlinePlayer]) -> String {
    let mut msg = message.to_owned();
    for online in online_players {
        if !online.has_permission(TARGET_PERMISSION) {
            continue;
        }
        let Some(pattern) = name_pattern(&online.name) else {
            continue;
        };
        msg = pattern
            .replace_all(&msg, NoExpand(&online.display_name))
            .into_owned();
    }
    msg
}

/// Like [`substitute`], but returns the message untouched if the sender
/// already formatted it by hand.
pub fn substitute_unless_formatted(message: &str, online_players: &[OnlinePlayer]) -> String {
    if contains_formatting(message) {
        return message.to_owned();
    }
    substitute(message, online_players)
}
