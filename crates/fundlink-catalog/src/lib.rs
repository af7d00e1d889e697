//! Read-only seed catalogs of startups and investors, plus the filters and
//! project form used to browse and join them.

pub mod filters;
pub mod projects;
pub mod seed;

use tracing::debug;

use fundlink_types::api::{InvestorFilter, StartupFilter};
use fundlink_types::models::{Investor, Recipient, StartupProject, UserId};

use crate::filters::Filter;

pub struct Catalog {
    investors: Vec<Investor>,
    startups: Vec<StartupProject>,
}

impl Catalog {
    pub fn new(investors: Vec<Investor>, startups: Vec<StartupProject>) -> Self {
        Self {
            investors,
            startups,
        }
    }

    /// The fixed demo catalog.
    pub fn seeded() -> Self {
        let catalog = Self::new(seed::investors(), seed::startups());
        debug!(
            "Seeded catalog with {} investors and {} startups",
            catalog.investors.len(),
            catalog.startups.len()
        );
        catalog
    }

    pub fn investors(&self, filter: &InvestorFilter) -> Vec<&Investor> {
        self.investors.iter().filter(|&i| filter.matches(i)).collect()
    }

    pub fn startups(&self, filter: &StartupFilter) -> Vec<&StartupProject> {
        self.startups.iter().filter(|&s| filter.matches(s)).collect()
    }

    pub fn investor(&self, id: &UserId) -> Option<&Investor> {
        self.investors.iter().find(|i| &i.id == id)
    }

    pub fn startup(&self, id: &UserId) -> Option<&StartupProject> {
        self.startups.iter().find(|s| &s.user_id == id)
    }

    pub fn has_startup(&self, startup_id: &str) -> bool {
        self.startups.iter().any(|s| s.id == startup_id)
    }

    /// Resolve a catalog user into the addressing details of a request.
    pub fn recipient(&self, id: &UserId) -> Option<Recipient> {
        self.investor(id)
            .map(Recipient::from)
            .or_else(|| self.startup(id).map(Recipient::from))
    }
}
