//! Catalog filter parameters.

use serde::Serialize;

use super::marketplace::Country;

/// Which country buckets the catalog is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountrySelection {
    pub kz: bool,
    pub ru: bool,
    pub cn: bool,
}

impl Default for CountrySelection {
    fn default() -> Self {
        Self {
            kz: true,
            ru: true,
            cn: true,
        }
    }
}

impl CountrySelection {
    pub fn contains(&self, country: Country) -> bool {
        match country {
            Country::Kz => self.kz,
            Country::Ru => self.ru,
            Country::Cn => self.cn,
        }
    }

    /// Selected countries in display order
    pub fn selected(&self) -> Vec<Country> {
        Country::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// All three selected means no country restriction
    pub fn is_unrestricted(&self) -> bool {
        self.kz && self.ru && self.cn
    }
}

/// Filters applied to the lot listing, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogFilter {
    pub countries: CountrySelection,
    /// Trimmed, non-empty search term
    pub search: Option<String>,
    /// Maximum total cost of buying the lot
    pub deposit: Option<f64>,
    /// Minimum profit over the tender price
    pub margin: Option<f64>,
}

impl CatalogFilter {
    /// Set the search term, dropping blank input
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        let selection = CountrySelection {
            kz: true,
            ru: false,
            cn: true,
        };
        assert_eq!(selection.selected(), vec![Country::Kz, Country::Cn]);
        assert!(!selection.is_unrestricted());
        assert!(CountrySelection::default().is_unrestricted());
    }

    #[test]
    fn test_blank_search_dropped() {
        assert_eq!(CatalogFilter::default().with_search(Some("   ")).search, None);
        assert_eq!(
            CatalogFilter::default().with_search(Some("  трубы ")).search,
            Some("трубы".to_string())
        );
    }
}
