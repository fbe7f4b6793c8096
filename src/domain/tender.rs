//! Tender lots and the marketplace offers matched against them.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::marketplace::{classify, Country};
use super::price::parse_price;

/// A procurement lot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lot {
    pub id: i32,
    pub lot_number: String,
    pub original_name: String,
    pub simplified_name: Option<String>,
    pub tender_price: Option<f64>,
    pub quantity: Option<f64>,
    pub created_at: Option<NaiveDateTime>,
}

impl Lot {
    /// Name shown in listings
    pub fn display_name(&self) -> &str {
        self.simplified_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.original_name)
    }

    /// Cost of buying the whole lot at `unit_price`
    pub fn cost_at(&self, unit_price: f64) -> f64 {
        unit_price * self.quantity.unwrap_or(1.0)
    }

    /// Tender price minus the cost of buying at `unit_price`
    pub fn margin_at(&self, unit_price: f64) -> Option<f64> {
        self.tender_price.map(|price| price - self.cost_at(unit_price))
    }
}

/// A marketplace offer matched to a lot (`search_results` row)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i32,
    pub lot_number: String,
    pub marketplace: String,
    pub product_name: Option<String>,
    pub product_price: Option<String>,
    pub product_url: Option<String>,
    pub image_url: Option<String>,
}

impl Product {
    pub fn country(&self) -> Country {
        classify(&self.marketplace)
    }

    /// Parsed price, `None` when missing or malformed
    pub fn price(&self) -> Option<f64> {
        self.product_price.as_deref().and_then(parse_price)
    }
}

/// A lot as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotSummary {
    pub lot: Lot,
    /// Matched offers in the selected countries
    pub products_count: u64,
    /// Cheapest parseable offer price in the selected countries
    pub min_price: Option<f64>,
}

impl LotSummary {
    pub fn estimated_cost(&self) -> Option<f64> {
        self.min_price.map(|p| self.lot.cost_at(p))
    }

    pub fn estimated_margin(&self) -> Option<f64> {
        self.min_price.and_then(|p| self.lot.margin_at(p))
    }
}

/// Offers of one lot split into the three country buckets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductsByCountry {
    pub kz: Vec<Product>,
    pub ru: Vec<Product>,
    pub cn: Vec<Product>,
}

impl ProductsByCountry {
    /// Partition offers, keeping their relative order within each bucket.
    pub fn partition(products: Vec<Product>) -> Self {
        let mut grouped = Self::default();
        for product in products {
            match product.country() {
                Country::Kz => grouped.kz.push(product),
                Country::Ru => grouped.ru.push(product),
                Country::Cn => grouped.cn.push(product),
            }
        }
        grouped
    }

    pub fn get(&self, country: Country) -> &[Product] {
        match country {
            Country::Kz => &self.kz,
            Country::Ru => &self.ru,
            Country::Cn => &self.cn,
        }
    }

    /// Cheapest parseable offer in a bucket
    pub fn cheapest(&self, country: Country) -> Option<&Product> {
        self.get(country)
            .iter()
            .filter_map(|p| p.price().map(|price| (price, p)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.kz.len() + self.ru.len() + self.cn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A lot together with its grouped offers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotDetail {
    pub lot: Lot,
    pub products_by_country: ProductsByCountry,
    pub total_products: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn lot(lot_number: &str, name: &str) -> Lot {
        Lot {
            id: 1,
            lot_number: lot_number.to_string(),
            original_name: name.to_string(),
            simplified_name: None,
            tender_price: Some(80_000.0),
            quantity: Some(10.0),
            created_at: None,
        }
    }

    pub fn product(id: i32, marketplace: &str, price: &str) -> Product {
        Product {
            id,
            lot_number: "LOT-1".to_string(),
            marketplace: marketplace.to_string(),
            product_name: Some(format!("offer {}", id)),
            product_price: Some(price.to_string()),
            product_url: None,
            image_url: None,
        }
    }
}
