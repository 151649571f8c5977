use std::sync::Arc;
use url::Url;

/// One step of the traversal: where we are, how many hops remain, and which
/// hostname the whole crawl is scoped to
///
/// The seed hostname is shared by every state of one crawl and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalState {
    /// The URL of the node being visited
    pub url: Url,

    /// Remaining link hops; the node is not visited when this is 0
    pub depth: u32,

    /// Hostname of the seed URL
    pub seed_host: Arc<str>,
}

impl TraversalState {
    /// Creates the root state of a crawl
    pub fn seed(url: Url, depth: u32, seed_host: impl Into<Arc<str>>) -> Self {
        Self {
            url,
            depth,
            seed_host: seed_host.into(),
        }
    }

    /// Returns true if no further work is produced at this node
    pub fn is_exhausted(&self) -> bool {
        self.depth == 0
    }

    /// State for a link discovered at this node, one hop deeper
    pub fn child(&self, url: Url) -> Self {
        Self {
            url,
            depth: self.depth.saturating_sub(1),
            seed_host: Arc::clone(&self.seed_host),
        }
    }
}
