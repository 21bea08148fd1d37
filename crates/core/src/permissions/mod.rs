//! Permission nodes in the usual dotted form, e.g. `coloredchatnames.toggle.other`.
//!
//! A node ending in `*` grants everything below it. A leading `-` negates the
//! node. The first node that matches decides the answer.

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    WildCard,
    Named(String),
}

#[derive(Debug, Clone)]
struct PermissionNode {
    path: Vec<PathSegment>,
    value: bool,
}

impl PermissionNode {
    fn parse(node: &str) -> Option<PermissionNode> {
        let (node, value) = match node.trim().strip_prefix('-') {
            Some(negated) => (negated, false),
            None => (node.trim(), true),
        };
        if node.is_empty() {
            return None;
        }
        let path = node
            .split('.')
            .map(|s| match s {
                "*" => PathSegment::WildCard,
                s => PathSegment::Named(s.to_ascii_lowercase()),
            })
            .collect();
        Some(PermissionNode { path, value })
    }

    fn matches(&self, str: &str) -> bool {
        let mut segments = str.split('.');
        for path_segment in &self.path {
            match path_segment {
                PathSegment::WildCard => return true,
                PathSegment::Named(name) => match segments.next() {
                    Some(segment) if segment.eq_ignore_ascii_case(name) => {}
                    _ => return false,
                },
            }
        }
        segments.next().is_none()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Permissions {
    nodes: Vec<PermissionNode>,
}

impl Permissions {
    pub fn new() -> Permissions {
        Default::default()
    }

    pub fn get_node_val(&self, name: &str) -> Option<bool> {
        self.nodes
            .iter()
            .find(|node| node.matches(name))
            .map(|node| node.value)
    }

    pub fn insert(&mut self, name: &str, value: bool) {
        if let Some(mut node) = PermissionNode::parse(name) {
            node.value = node.value == value;
            self.nodes.push(node);
        }
    }

    /// Builds a set from node strings, where `-node` denies `node`.
    pub fn from_nodes<I, S>(nodes: I) -> Permissions
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = nodes
            .into_iter()
            .filter_map(|node| PermissionNode::parse(node.as_ref()))
            .collect();
        Permissions { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_nodes() {
        let perms = Permissions::from_nodes(["coloredchatnames", "coloredchatnames.target"]);
        assert_eq!(perms.get_node_val("coloredchatnames"), Some(true));
        assert_eq!(perms.get_node_val("ColoredChatNames.Target"), Some(true));
        assert_eq!(perms.get_node_val("coloredchatnames.toggle.other"), None);
    }

    #[test]
    fn wildcards_cover_children() {
        let perms = Permissions::from_nodes(["coloredchatnames.*"]);
        assert_eq!(perms.get_node_val("coloredchatnames.target"), Some(true));
        assert_eq!(perms.get_node_val("coloredchatnames.toggle.other"), Some(true));
        assert_eq!(perms.get_node_val("otherplugin.use"), None);

        let all = Permissions::from_nodes(["*"]);
        assert_eq!(all.get_node_val("anything.at.all"), Some(true));
    }

    #[test]
    fn first_match_wins() {
        let perms = Permissions::from_nodes(["-coloredchatnames.toggle.other", "coloredchatnames.*"]);
        assert_eq!(perms.get_node_val("coloredchatnames.toggle.other"), Some(false));
        assert_eq!(perms.get_node_val("coloredchatnames.target"), Some(true));
    }

    #[test]
    fn insert_respects_value() {
        let mut perms = Permissions::new();
        perms.insert("coloredchatnames.target", false);
        perms.insert("", true);
        assert_eq!(perms.get_node_val("coloredchatnames.target"), Some(false));
        assert_eq!(perms.nodes.len(), 1);
    }
}
