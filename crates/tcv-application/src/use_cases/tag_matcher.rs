//! Tag matching

use tcv_domain::TagSet;

/// Decides inclusion from declared and requested tags
#[derive(Debug, Clone, Copy, Default)]
pub struct TagMatcher;

impl TagMatcher {
    /// True when nothing was requested, otherwise when any declared tag was requested
    pub fn matches(declared: &TagSet, requested: &TagSet) -> bool {
        requested.is_empty() || declared.intersects(requested)
    }
}
