//! Catalog listing and lot detail pages.

use url::form_urlencoded;

use super::{escape_html, money};
use crate::domain::{CatalogFilter, Country, LotDetail, LotSummary, Product};
use crate::types::Paginated;

/// Everything the listing page shows
pub struct CatalogView<'a> {
    pub filter: &'a CatalogFilter,
    pub page: &'a Paginated<LotSummary>,
}

impl CatalogView<'_> {
    /// Query string for `page` that keeps the current filters
    pub fn page_query(&self, page: u64) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for country in Country::ALL {
            let flag = if self.filter.countries.contains(country) { "1" } else { "0" };
            query.append_pair(&format!("country_{}", country.code().to_lowercase()), flag);
        }
        if let Some(deposit) = self.filter.deposit {
            query.append_pair("deposit", &deposit.to_string());
        }
        if let Some(margin) = self.filter.margin {
            query.append_pair("margin", &margin.to_string());
        }
        if let Some(search) = &self.filter.search {
            query.append_pair("search", search);
        }
        query.append_pair("page", &page.to_string());
        query.finish()
    }
}

fn country_select(filter: &CatalogFilter, country: Country) -> String {
    let selected = filter.countries.contains(country);
    format!(
        r#"<label>{label} <select name="country_{code}"><option value="1"{yes}>yes</option><option value="0"{no}>no</option></select></label>"#,
        label = country.label(),
        code = country.code().to_lowercase(),
        yes = if selected { " selected" } else { "" },
        no = if selected { "" } else { " selected" },
    )
}

fn optional_amount(amount: Option<f64>) -> String {
    amount.map(money).unwrap_or_else(|| "&mdash;".to_string())
}

fn lot_row(summary: &LotSummary) -> String {
    let lot = &summary.lot;
    format!(
        r#"<tr><td><a href="/lot/{href}">{number}</a></td><td>{name}</td><td>{quantity}</td><td>{price}</td><td>{offers}</td><td>{cost}</td><td>{margin}</td></tr>"#,
        href = form_urlencoded::byte_serialize(lot.lot_number.as_bytes()).collect::<String>(),
        number = escape_html(&lot.lot_number),
        name = escape_html(lot.display_name()),
        quantity = lot.quantity.map(|q| q.to_string()).unwrap_or_else(|| "1".to_string()),
        price = optional_amount(lot.tender_price),
        offers = summary.products_count,
        cost = optional_amount(summary.estimated_cost()),
        margin = optional_amount(summary.estimated_margin()),
    )
}

fn pager(view: &CatalogView<'_>) -> String {
    let meta = &view.page.meta;
    if meta.total_pages <= 1 && !meta.is_past_end() {
        return String::new();
    }

    let mut links = String::from(r#"<p class="pager">"#);
    if meta.has_previous() {
        let previous = meta.page.saturating_sub(1).min(meta.total_pages.max(1));
        links.push_str(&format!(
            r#"<a href="/catalog?{}">&laquo; Previous</a>"#,
            escape_html(&view.page_query(previous))
        ));
    }
    links.push_str(&format!(
        "<span>Page {} of {}</span>",
        meta.page,
        meta.total_pages.max(1)
    ));
    if meta.has_next() {
        links.push_str(&format!(
            r#"<a href="/catalog?{}">Next &raquo;</a>"#,
            escape_html(&view.page_query(meta.page + 1))
        ));
    }
    links.push_str("</p>");
    links
}

pub fn catalog_page(view: &CatalogView<'_>) -> String {
    let filter = view.filter;
    let countries: String = Country::ALL
        .into_iter()
        .map(|c| country_select(filter, c))
        .collect::<Vec<_>>()
        .join(" ");

    let rows: String = view.page.data.iter().map(lot_row).collect();
    let table = if rows.is_empty() {
        "<p>No lots match these filters.</p>".to_string()
    } else {
        format!(
            "<table><thead><tr><th>Lot</th><th>Name</th><th>Qty</th><th>Tender price</th><th>Offers</th><th>Est. cost</th><th>Est. margin</th></tr></thead><tbody>{rows}</tbody></table>"
        )
    };

    format!(
        r#"<h1>Catalog</h1>
<form method="get" action="/catalog">
<p>{countries}</p>
<p><label>Deposit up to <input type="number" step="any" name="deposit" value="{deposit}"></label>
<label>Margin at least <input type="number" step="any" name="margin" value="{margin}"></label>
<label>Search <input type="search" name="search" value="{search}"></label>
<button type="submit">Apply</button> <a href="/catalog">Reset</a></p>
</form>
<p>{total} lots found</p>
{table}
{pager}"#,
        deposit = filter.deposit.map(|d| d.to_string()).unwrap_or_default(),
        margin = filter.margin.map(|m| m.to_string()).unwrap_or_default(),
        search = escape_html(filter.search.as_deref().unwrap_or_default()),
        total = view.page.meta.total,
        pager = pager(view),
    )
}

fn product_row(product: &Product) -> String {
    let name = escape_html(product.product_name.as_deref().unwrap_or("Untitled offer"));
    let name = match &product.product_url {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => format!(
            r#"<a href="{}" rel="noopener noreferrer" target="_blank">{}</a>"#,
            escape_html(url),
            name
        ),
        _ => name,
    };
    let image = match &product.image_url {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => format!(
            r#"<img src="{}" alt="" width="48" loading="lazy">"#,
            escape_html(url)
        ),
        _ => String::new(),
    };

    format!(
        "<tr><td>{image}</td><td>{name}</td><td>{marketplace}</td><td>{price}</td></tr>",
        marketplace = escape_html(&product.marketplace),
        price = escape_html(product.product_price.as_deref().unwrap_or("")),
    )
}

pub fn lot_page(detail: &LotDetail) -> String {
    let lot = &detail.lot;
    let grouped = &detail.products_by_country;

    let sections: String = Country::ALL
        .into_iter()
        .map(|country| {
            let products = grouped.get(country);
            let cheapest = grouped
                .cheapest(country)
                .and_then(|p| p.price().map(|price| (p, price)))
                .map(|(p, price)| {
                    let cost = lot.cost_at(price);
                    format!(
                        "<p>Cheapest: {} at {} (lot cost {})</p>",
                        escape_html(&p.marketplace),
                        money(price),
                        money(cost)
                    )
                })
                .unwrap_or_default();
            let rows: String = products.iter().map(product_row).collect();
            let body = if rows.is_empty() {
                "<p>No offers.</p>".to_string()
            } else {
                format!("<table><tbody>{rows}</tbody></table>")
            };

            format!(
                "<section><h2>{label} ({count})</h2>{cheapest}{body}</section>",
                label = country.label(),
                count = products.len(),
            )
        })
        .collect();

    format!(
        r#"<p><a href="/catalog">&laquo; Back to catalog</a></p>
<h1>{number}: {name}</h1>
<table>
<tr><th>Original name</th><td>{original}</td></tr>
<tr><th>Tender price</th><td>{price}</td></tr>
<tr><th>Quantity</th><td>{quantity}</td></tr>
<tr><th>Matched offers</th><td>{total}</td></tr>
</table>
{sections}"#,
        number = escape_html(&lot.lot_number),
        name = escape_html(lot.display_name()),
        original = escape_html(&lot.original_name),
        price = optional_amount(lot.tender_price),
        quantity = lot.quantity.map(|q| q.to_string()).unwrap_or_else(|| "1".to_string()),
        total = detail.total_products,
    )
}
