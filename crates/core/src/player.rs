use crate::permissions::Permissions;
use std::fmt;

/// A connected player as reported by the host at the time of a query.
#[derive(Clone)]
pub struct OnlinePlayer {
    pub name: String,
    /// Decorated name, may carry `§` formatting codes.
    pub display_name: String,
    pub permissions: Option<Permissions>,
}

impl fmt::Debug for OnlinePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnlinePlayer")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl OnlinePlayer {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> OnlinePlayer {
        OnlinePlayer {
            name: name.into(),
            display_name: display_name.into(),
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> OnlinePlayer {
        self.permissions = Some(permissions);
        self
    }

    pub fn has_permission(&self, node: &str) -> bool {
        if let Some(cache) = &self.permissions {
            // Nodes missing from the cache are denied
            cache.get_node_val(node).unwrap_or(false)
        } else {
            // Permissions is not enabled
            true
        }
    }
}
