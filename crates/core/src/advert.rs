use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    Allow,
    /// Drop the message and remove the player from the server.
    Remove,
}

/// Looks at the first thing each player says this session and flags a known
/// advertisement signature.
#[derive(Debug, Default)]
pub struct AdvertisementFilter {
    signature: String,
    spoken: HashSet<String>,
}

impl AdvertisementFilter {
    pub fn new(signature: impl Into<String>) -> AdvertisementFilter {
        AdvertisementFilter {
            signature: signature.into(),
            spoken: HashSet::new(),
        }
    }

    pub fn check_first_message(&mut self, player: &str, message: &str) -> FilterAction {
        if !self.spoken.insert(player.to_owned()) {
            return FilterAction::Allow;
        }
        if !self.signature.is_empty() && message == self.signature {
            FilterAction::Remove
        } else {
            FilterAction::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AD: &str = "Join play.example.net for free diamonds!";

    #[test]
    fn first_message_matching_signature_is_removed() {
        let mut filter = AdvertisementFilter::new(AD);
        assert_eq!(filter.check_first_message("Spammer", AD), FilterAction::Remove);
        assert!(filter.spoken.contains("Spammer"));
    }

    #[test]
    fn only_the_first_message_is_inspected() {
        let mut filter = AdvertisementFilter::new(AD);
        assert_eq!(filter.check_first_message("Steve", "hello"), FilterAction::Allow);
        assert_eq!(filter.check_first_message("Steve", AD), FilterAction::Allow);
    }

    #[test]
    fn players_are_tracked_independently() {
        let mut filter = AdvertisementFilter::new(AD);
        assert_eq!(filter.check_first_message("A", AD), FilterAction::Remove);
        assert_eq!(filter.check_first_message("B", AD), FilterAction::Remove);
        assert_eq!(filter.check_first_message("A", AD), FilterAction::Allow);
    }

    #[test]
    fn match_must_be_exact() {
        let mut filter = AdvertisementFilter::new(AD);
        let near_miss = format!("{} ", AD);
        assert_eq!(filter.check_first_message("A", &near_miss), FilterAction::Allow);
    }

    #[test]
    fn empty_signature_never_removes() {
        let mut filter = AdvertisementFilter::default();
        assert_eq!(filter.check_first_message("A", ""), FilterAction::Allow);
        assert!(filter.spoken.contains("A"));
    }
}
