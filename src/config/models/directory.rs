//! Directory configuration

use serde::{Deserialize, Serialize};

/// Known users and companies for the administrative API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Reject ids not listed below
    #[serde(default)]
    pub enforce: bool,
    /// Company ids
    #[serde(default)]
    pub companies: Vec<String>,
    /// User ids
    #[serde(default)]
    pub users: Vec<String>,
}

impl DirectoryConfig {
    /// Merge directory configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.enforce {
            self.enforce = other.enforce;
        }
        if !other.companies.is_empty() {
            self.companies = other.companies;
        }
        if !other.users.is_empty() {
            self.users = other.users;
        }
        self
    }
}
