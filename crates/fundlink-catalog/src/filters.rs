use thiserror::Error;

use fundlink_types::api::{InvestorFilter, StartupFilter};
use fundlink_types::models::{Investor, StartupProject};

use crate::seed::{FUNDING_STAGES, INVESTOR_FOCUS_AREAS, STARTUP_CATEGORIES};

/// A filter value outside the fixed vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct FilterError {
    pub kind: &'static str,
    pub value: String,
}

/// A browsing filter over one kind of catalog entry.
/// Empty criteria match everything.
pub trait Filter<T> {
    /// Reject criteria that could never come from the filter panel.
    fn validate(&self) -> Result<(), FilterError>;

    fn matches(&self, item: &T) -> bool;
}

fn check_vocabulary(
    kind: &'static str,
    values: &[String],
    allowed: &[&str],
) -> Result<(), FilterError> {
    match values.iter().find(|v| !allowed.contains(&v.as_str())) {
        Some(value) => Err(FilterError {
            kind,
            value: value.clone(),
        }),
        None => Ok(()),
    }
}

impl Filter<Investor> for InvestorFilter {
    fn validate(&self) -> Result<(), FilterError> {
        check_vocabulary("focus area", &self.focus_areas, INVESTOR_FOCUS_AREAS)?;
        check_vocabulary("funding stage", &self.funding_stages, FUNDING_STAGES)
    }

    fn matches(&self, investor: &Investor) -> bool {
        if !self.focus_areas.is_empty()
            && !investor.focus_areas.iter().any(|a| self.focus_areas.contains(a))
        {
            return false;
        }

        if !self.funding_stages.is_empty()
            && !investor
                .funding_stages
                .iter()
                .any(|s| self.funding_stages.contains(s))
        {
            return false;
        }

        let location = self.location.trim();
        location.is_empty() || contains_ignore_case(&investor.location, location)
    }
}

impl Filter<StartupProject> for StartupFilter {
    fn validate(&self) -> Result<(), FilterError> {
        check_vocabulary("category", &self.categories, STARTUP_CATEGORIES)
    }

    fn matches(&self, startup: &StartupProject) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&startup.category) {
            return false;
        }

        let query = self.query.trim();
        query.is_empty()
            || contains_ignore_case(&startup.name, query)
            || contains_ignore_case(&startup.idea, query)
            || contains_ignore_case(&startup.category, query)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
