//! Landing page.

use chrono::{DateTime, Utc};

use super::escape_html;
use crate::domain::{AccessStatus, User};
use crate::services::PublicStats;

pub fn home_page(user: Option<&User>, stats: &PublicStats, now: DateTime<Utc>) -> String {
    let call_to_action = match user {
        None => r#"<p><a href="/register">Create an account</a> or <a href="/login">log in</a>. An administrator opens catalog access after registration.</p>"#.to_string(),
        Some(user) if user.is_admin() => {
            r#"<p><a href="/admin">Open the admin dashboard</a></p>"#.to_string()
        }
        Some(user) => match AccessStatus::of(&user.entitlement, now) {
            AccessStatus::Active { until: Some(until) } => format!(
                r#"<p>Your access is open until {until}. <a href="/catalog">Browse the catalog</a></p>"#,
                until = until.format("%Y-%m-%d %H:%M UTC")
            ),
            AccessStatus::Active { until: None } => {
                r#"<p><a href="/catalog">Browse the catalog</a></p>"#.to_string()
            }
            AccessStatus::Expired { at } => format!(
                "<p>Your access expired on {at}. Contact an administrator to renew it.</p>",
                at = at.format("%Y-%m-%d")
            ),
            AccessStatus::None => {
                "<p>Your account is waiting for an administrator to open access.</p>".to_string()
            }
        },
    };

    let greeting = user
        .map(|u| format!("<p>Signed in as {}</p>", escape_html(&u.email)))
        .unwrap_or_default();

    format!(
        r#"<h1>Tender Finder</h1>
<p>Procurement lots matched with offers from Kazakh, Russian and Chinese marketplaces.</p>
{greeting}
<div class="stats">
<div class="stat"><b>{lots}</b>lots</div>
<div class="stat"><b>{products}</b>matched offers</div>
<div class="stat"><b>{marketplaces}</b>marketplaces</div>
</div>
{call_to_action}"#,
        lots = stats.lots,
        products = stats.products,
        marketplaces = stats.by_marketplace.len(),
    )
}
