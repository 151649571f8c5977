use crate::audit::TagAudit;

/// Points deducted for every required tag the site never uses
pub const POINTS_PER_MISSING_TAG: u64 = 2;

/// Ordered list of tag names a site is expected to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    tags: Vec<String>,
}

impl Checklist {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Splits the checklist into present and missing tags, preserving order
    pub fn compare(&self, audit: &TagAudit) -> AuditReport {
        let (present, missing): (Vec<String>, Vec<String>) = self
            .tags
            .iter()
            .cloned()
            .partition(|tag| audit.contains(tag));

        AuditReport {
            total_needed: self.tags.len(),
            present,
            missing,
            div_count: audit.div_count,
            inline_styles: audit.inline_styles,
            math_ml_used: audit.math_ml_used,
            social_meta_tags: audit.social_meta_tags,
            files_scanned: audit.files_scanned,
            files_unreadable: audit.files_unreadable,
        }
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new(crate::audit::DEFAULT_REQUIRED_TAGS.iter().copied())
    }
}

/// Coverage of a checklist by one mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub total_needed: usize,
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub div_count: u64,
    pub inline_styles: u64,
    pub math_ml_used: bool,
    pub social_meta_tags: bool,
    pub files_scanned: u64,
    pub files_unreadable: u64,
}

impl AuditReport {
    pub fn total_present(&self) -> usize {
        self.present.len()
    }

    pub fn total_missing(&self) -> usize {
        self.missing.len()
    }

    pub fn penalty_points(&self) -> u64 {
        self.missing.len() as u64 * POINTS_PER_MISSING_TAG
    }
}
