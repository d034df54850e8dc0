// src/health/status.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Alive,
    Dead,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Alive => "alive",
            SiteStatus::Dead => "dead",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: String,
    pub status: SiteStatus,
}

/// Names of checked sites split by status, each list in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub alive: Vec<String>,
    pub dead: Vec<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: CheckOutcome) {
        match outcome.status {
            SiteStatus::Alive => self.alive.push(outcome.name),
            SiteStatus::Dead => self.dead.push(outcome.name),
        }
    }

    pub fn status_of(&self, name: &str) -> Option<SiteStatus> {
        if self.alive.iter().any(|n| n == name) {
            Some(SiteStatus::Alive)
        } else if self.dead.iter().any(|n| n == name) {
            Some(SiteStatus::Dead)
        } else {
            None
        }
    }

    pub fn is_alive(&self, name: &str) -> bool {
        self.status_of(name) == Some(SiteStatus::Alive)
    }

    pub fn len(&self) -> usize {
        self.alive.len() + self.dead.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<CheckOutcome> for ResultSet {
    fn from_iter<I: IntoIterator<Item = CheckOutcome>>(iter: I) -> Self {
        let mut results = ResultSet::new();
        for outcome in iter {
            results.record(outcome);
        }
        results
    }
}
