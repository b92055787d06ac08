//! Account-name filters
//!
//! Glob patterns matched case-sensitively against account display names.
//! An account passes when any pattern matches; no patterns means match
//! everything.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{ConfigError, Result};

/// A compiled set of account-name glob patterns
#[derive(Debug)]
pub struct NameFilters {
    /// None = no patterns configured, match everything
    set: Option<GlobSet>,
}

impl NameFilters {
    /// Compile a set of glob patterns. An empty slice matches everything.
    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self { set: None });
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                ConfigError::Invalid(format!("Bad account filter '{pattern}': {e}"))
            })?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Bad account filters: {e}")))?;

        Ok(Self { set: Some(set) })
    }

    /// Match-everything filter
    pub fn match_all() -> Self {
        Self { set: None }
    }

    /// Whether an account name passes the filter
    pub fn matches(&self, name: &str) -> bool {
        match &self.set {
            None => true,
            Some(set) => set.is_match(name),
        }
    }
}
