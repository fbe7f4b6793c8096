//! Country classification of marketplace offers.
//!
//! The same tables drive the in-memory classifier below and the SQL
//! expression used by catalog filtering, so the two never disagree.

use serde::Serialize;

use crate::config::{CN_MARKETPLACES, KZ_MARKETPLACES};

/// Country bucket an offer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Country {
    #[serde(rename = "KZ")]
    Kz,
    #[serde(rename = "RU")]
    Ru,
    #[serde(rename = "CN")]
    Cn,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::Kz, Country::Ru, Country::Cn];

    /// Two-letter code used in views and SQL
    pub fn code(&self) -> &'static str {
        match self {
            Country::Kz => "KZ",
            Country::Ru => "RU",
            Country::Cn => "CN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Country::Kz => "Kazakhstan",
            Country::Ru => "Russia",
            Country::Cn => "China",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Classify a marketplace name.
///
/// Case-insensitive substring match: China first, then Kazakhstan,
/// everything else is Russia.
pub fn classify(marketplace: &str) -> Country {
    let name = marketplace.to_lowercase();
    if CN_MARKETPLACES.iter().any(|m| name.contains(m)) {
        Country::Cn
    } else if KZ_MARKETPLACES.iter().any(|m| name.contains(m)) {
        Country::Kz
    } else {
        Country::Ru
    }
}
