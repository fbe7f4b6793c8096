//! SQL for the filtered lot listing.
//!
//! Offers are classified and priced inside the query with the same
//! marketplace tables and price rule as the in-memory code, then folded
//! into one row per lot (`lot_offers`). Filters become typed predicates
//! over that join and are rendered with numbered bind parameters; user
//! input never reaches the SQL text.

use sea_orm::{DbBackend, Statement, Value};

use crate::config::{CN_MARKETPLACES, KZ_MARKETPLACES};
use crate::domain::{CatalogFilter, Country};

/// Columns every listing row carries
const LOT_COLUMNS: &str = "l.id, l.lot_number, l.original_name, l.simplified_name, \
     l.tender_price, l.quantity, l.created_at";

/// Numeric value of a raw price string: keep digits and dots, then
/// require `digits[.digits]`; anything else is NULL.
const PRICE_EXPR: &str = "CASE WHEN regexp_replace(sr.product_price, '[^0-9.]', '', 'g') \
     ~ '^[0-9]+(\\.[0-9]+)?$' \
     THEN regexp_replace(sr.product_price, '[^0-9.]', '', 'g')::double precision END";

/// Cost of buying the lot at its cheapest selected offer
const COST_EXPR: &str = "lo.min_price * COALESCE(l.quantity, 1)";

/// A single condition on the joined `lots`/`lot_offers` row
#[derive(Debug, Clone, PartialEq)]
pub enum LotPredicate {
    /// Case-insensitive substring of either name
    NameContains(String),
    /// At least one offer in the selected countries
    HasOfferIn,
    /// Estimated cost does not exceed the amount
    CostAtMost(f64),
    /// Tender price minus estimated cost reaches the amount
    MarginAtLeast(f64),
}

impl LotPredicate {
    /// Translate catalog filters into predicates, ANDed together.
    pub fn from_filter(filter: &CatalogFilter) -> Vec<Self> {
        let mut predicates = Vec::new();

        if let Some(search) = &filter.search {
            predicates.push(LotPredicate::NameContains(search.clone()));
        }
        if !filter.countries.is_unrestricted() {
            predicates.push(LotPredicate::HasOfferIn);
        }
        if let Some(deposit) = filter.deposit {
            predicates.push(LotPredicate::CostAtMost(deposit));
        }
        if let Some(margin) = filter.margin {
            predicates.push(LotPredicate::MarginAtLeast(margin));
        }

        predicates
    }

    fn render(&self, sql: &mut SqlBuilder) {
        match self {
            LotPredicate::NameContains(term) => {
                let pattern = format!("%{}%", escape_like(term));
                sql.push("(l.original_name ILIKE ");
                sql.push_bind(pattern.clone());
                sql.push(" ESCAPE '\\' OR l.simplified_name ILIKE ");
                sql.push_bind(pattern);
                sql.push(" ESCAPE '\\')");
            }
            LotPredicate::HasOfferIn => sql.push("lo.lot_number IS NOT NULL"),
            LotPredicate::CostAtMost(amount) => {
                sql.push("(lo.min_price IS NOT NULL AND ");
                sql.push(COST_EXPR);
                sql.push(" <= ");
                sql.push_bind(*amount);
                sql.push(")");
            }
            LotPredicate::MarginAtLeast(amount) => {
                sql.push("(lo.min_price IS NOT NULL AND l.tender_price IS NOT NULL AND l.tender_price - ");
                sql.push(COST_EXPR);
                sql.push(" >= ");
                sql.push_bind(*amount);
                sql.push(")");
            }
        }
    }
}

/// Incremental SQL text with Postgres-style `$n` placeholders
#[derive(Debug, Default)]
pub struct SqlBuilder {
    sql: String,
    values: Vec<Value>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    /// Append a placeholder and record its value
    pub fn push_bind(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
        self.sql.push('$');
        self.sql.push_str(&self.values.len().to_string());
    }

    /// Append `$a, $b, ...` for each value
    pub fn push_bind_list<V: Into<Value>>(&mut self, values: impl IntoIterator<Item = V>) {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_bind(value);
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn build(self) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, self.sql, self.values)
    }
}

/// Query over lots joined with their per-lot offer aggregate
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    filter: CatalogFilter,
    predicates: Vec<LotPredicate>,
}

impl CatalogQuery {
    pub fn new(filter: &CatalogFilter) -> Self {
        Self {
            filter: filter.clone(),
            predicates: LotPredicate::from_filter(filter),
        }
    }

    pub fn predicates(&self) -> &[LotPredicate] {
        &self.predicates
    }

    /// Number of lots matching the filters
    pub fn count(&self) -> SqlBuilder {
        let mut sql = SqlBuilder::new();
        self.push_offers_cte(&mut sql);
        sql.push(" SELECT COUNT(*) AS total FROM lots l LEFT JOIN lot_offers lo ON lo.lot_number = l.lot_number");
        self.push_where(&mut sql);
        sql
    }

    /// One page of matching lots, newest first
    pub fn page(&self, limit: u64, offset: u64) -> SqlBuilder {
        let mut sql = SqlBuilder::new();
        self.push_offers_cte(&mut sql);
        sql.push(" SELECT ");
        sql.push(LOT_COLUMNS);
        sql.push(
            ", COALESCE(lo.products_count, 0) AS products_count, lo.min_price \
             FROM lots l LEFT JOIN lot_offers lo ON lo.lot_number = l.lot_number",
        );
        self.push_where(&mut sql);
        sql.push(" ORDER BY l.created_at DESC NULLS LAST, l.id DESC LIMIT ");
        sql.push_bind(limit as i64);
        sql.push(" OFFSET ");
        sql.push_bind(offset as i64);
        sql
    }

    fn push_offers_cte(&self, sql: &mut SqlBuilder) {
        sql.push("WITH offers AS (SELECT sr.lot_number, ");
        push_country_case(sql);
        sql.push(" AS country, ");
        sql.push(PRICE_EXPR);
        sql.push(" AS price FROM search_results sr), lot_offers AS (SELECT o.lot_number, COUNT(*) AS products_count, MIN(o.price) AS min_price FROM offers o");

        let selected = self.filter.countries.selected();
        if selected.is_empty() {
            sql.push(" WHERE FALSE");
        } else if !self.filter.countries.is_unrestricted() {
            sql.push(" WHERE o.country IN (");
            sql.push_bind_list(selected.iter().map(Country::code));
            sql.push(")");
        }
        sql.push(" GROUP BY o.lot_number)");
    }

    fn push_where(&self, sql: &mut SqlBuilder) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            sql.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.render(sql);
        }
    }
}

/// Country bucket of `sr.marketplace`, checked in the same order as
/// [`crate::domain::classify`].
fn push_country_case(sql: &mut SqlBuilder) {
    sql.push("CASE");
    for (fragments, country) in [(CN_MARKETPLACES, Country::Cn), (KZ_MARKETPLACES, Country::Kz)] {
        for fragment in fragments {
            sql.push(" WHEN LOWER(sr.marketplace) LIKE ");
            sql.push_bind(format!("%{}%", escape_like(fragment)));
            sql.push(" ESCAPE '\\' THEN ");
            sql.push_bind(country.code());
        }
    }
    sql.push(" ELSE ");
    sql.push_bind(Country::Ru.code());
    sql.push(" END");
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CountrySelection;

    fn markets() -> usize {
        CN_MARKETPLACES.len() + KZ_MARKETPLACES.len()
    }

    #[test]
    fn test_default_filter_has_no_predicates() {
        let query = CatalogQuery::new(&CatalogFilter::default());
        assert!(query.predicates().is_empty());

        let sql = query.page(20, 0);
        assert!(!sql.sql().contains(" WHERE l."));
        assert!(!sql.sql().contains("o.country IN"));
        assert!(sql.sql().contains("ORDER BY l.created_at DESC"));
        // Two binds per marketplace, the default bucket, then limit and offset
        assert_eq!(sql.values().len(), markets() * 2 + 1 + 2);
        assert_eq!(sql.values()[sql.values().len() - 2], Value::from(20i64));
    }

    #[test]
    fn test_country_subset_restricts_offers() {
        let filter = CatalogFilter {
            countries: CountrySelection {
                kz: true,
                ru: false,
                cn: false,
            },
            ..Default::default()
        };
        let query = CatalogQuery::new(&filter);
        assert_eq!(query.predicates(), &[LotPredicate::HasOfferIn]);

        let sql = query.count();
        assert!(sql.sql().contains("WHERE o.country IN ($"));
        assert!(sql.sql().contains("WHERE lo.lot_number IS NOT NULL"));
        assert_eq!(sql.values().last(), Some(&Value::from("KZ")));
    }

    #[test]
    fn test_no_country_selected_matches_nothing() {
        let filter = CatalogFilter {
            countries: CountrySelection {
                kz: false,
                ru: false,
                cn: false,
            },
            ..Default::default()
        };
        let sql = CatalogQuery::new(&filter).count();
        assert!(sql.sql().contains("FROM offers o WHERE FALSE GROUP BY"));
        assert!(sql.sql().contains("lo.lot_number IS NOT NULL"));
    }

    #[test]
    fn test_search_is_bound_not_inlined() {
        let filter = CatalogFilter::default().with_search(Some("'; DROP TABLE lots; --"));
        let sql = CatalogQuery::new(&filter).count();

        assert!(!sql.sql().contains("DROP TABLE"));
        assert!(sql.sql().contains("l.original_name ILIKE $"));
        assert!(sql.sql().contains("l.simplified_name ILIKE $"));
        assert_eq!(
            sql.values().last(),
            Some(&Value::from("%'; DROP TABLE lots; --%".to_string()))
        );
    }

    #[test]
    fn test_price_filters() {
        let filter = CatalogFilter {
            deposit: Some(50_000.0),
            margin: Some(1_000.0),
            ..Default::default()
        };
        let query = CatalogQuery::new(&filter);
        assert_eq!(
            query.predicates(),
            &[
                LotPredicate::CostAtMost(50_000.0),
                LotPredicate::MarginAtLeast(1_000.0)
            ]
        );

        let sql = query.count();
        assert!(sql.sql().contains("lo.min_price * COALESCE(l.quantity, 1) <= $"));
        assert!(sql.sql().contains("l.tender_price - lo.min_price * COALESCE(l.quantity, 1) >= $"));
        let n = sql.values().len();
        assert_eq!(sql.values()[n - 2], Value::from(50_000.0f64));
        assert_eq!(sql.values()[n - 1], Value::from(1_000.0f64));
    }

    #[test]
    fn test_placeholders_are_sequential() {
        let filter = CatalogFilter {
            deposit: Some(1.0),
            ..Default::default()
        }
        .with_search(Some("pipe"));
        let sql = CatalogQuery::new(&filter).page(20, 40);

        let total = sql.values().len();
        assert!(sql.sql().contains(&format!("${}", total)));
        assert!(!sql.sql().contains(&format!("${}", total + 1)));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("трубы"), "трубы");
    }
}
