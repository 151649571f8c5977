/// Outcome definitions for nodes and links processed during a crawl
///
/// Every candidate link and every visited node ends in exactly one of these.
use std::fmt;

/// Represents how one crawl step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeOutcome {
    // ===== Success =====
    /// Resource was fetched and persisted into the mirror
    Written,

    // ===== Skips =====
    /// Another link in this run already claimed the same mirror path
    AlreadyClaimed,

    /// The mirror file already exists on disk (earlier run)
    AlreadyMaterialized,

    /// Link points at a different hostname than the seed
    CrossHost,

    /// Same hostname but not an http(s) URL
    UnsupportedScheme,

    /// Derived mirror path was rejected (would escape the mirror root)
    RejectedPath,

    /// Depth budget reached zero; the node is not probed
    DepthExhausted,

    // ===== Errors =====
    /// Liveness probe returned a non-200 status
    ProbeDead,

    /// Liveness probe failed at the transport level
    ProbeFailed,

    /// Content retrieval failed (status or transport)
    FetchFailed,

    /// Directory creation or file write failed
    WriteFailed,

    /// Work was abandoned because the crawl was cancelled
    Cancelled,
}

impl NodeOutcome {
    /// Returns true if this represents a persisted resource
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written)
    }

    /// Returns true if this is a deliberate skip decision
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::AlreadyClaimed
                | Self::AlreadyMaterialized
                | Self::CrossHost
                | Self::UnsupportedScheme
                | Self::RejectedPath
                | Self::DepthExhausted
        )
    }

    /// Returns true if this represents an abandoned branch
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ProbeDead
                | Self::ProbeFailed
                | Self::FetchFailed
                | Self::WriteFailed
                | Self::Cancelled
        )
    }

    /// Short machine-friendly name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::AlreadyClaimed => "already_claimed",
            Self::AlreadyMaterialized => "already_materialized",
            Self::CrossHost => "cross_host",
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::RejectedPath => "rejected_path",
            Self::DepthExhausted => "depth_exhausted",
            Self::ProbeDead => "probe_dead",
            Self::ProbeFailed => "probe_failed",
            Self::FetchFailed => "fetch_failed",
            Self::WriteFailed => "write_failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for NodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
