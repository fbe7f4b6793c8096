//! Admin dashboard and user management pages.

use chrono::{DateTime, Utc};

use super::escape_html;
use crate::domain::{AccessStatus, User};
use crate::services::DashboardStats;

pub fn dashboard_page(stats: &DashboardStats) -> String {
    format!(
        r#"<h1>Admin dashboard</h1>
<div class="stats">
<div class="stat"><b>{users}</b>registered users</div>
<div class="stat"><b>{active}</b>with active access</div>
<div class="stat"><b>{lots}</b>lots</div>
<div class="stat"><b>{products}</b>matched offers</div>
</div>
<p><a href="/admin/users">Manage users</a></p>"#,
        users = stats.user_count,
        active = stats.active_user_count,
        lots = stats.lot_count,
        products = stats.product_count,
    )
}

fn status_cell(user: &User, now: DateTime<Utc>) -> String {
    match AccessStatus::of(&user.entitlement, now) {
        AccessStatus::None => "No access".to_string(),
        AccessStatus::Active { until: None } => "Active".to_string(),
        AccessStatus::Active { until: Some(until) } => {
            format!("Active until {}", until.format("%Y-%m-%d %H:%M"))
        }
        AccessStatus::Expired { at } => format!("Expired {}", at.format("%Y-%m-%d %H:%M")),
    }
}

fn user_row(user: &User, now: DateTime<Utc>) -> String {
    let action = format!("/admin/users/{}/toggle-access", user.id);
    let revoke = if user.entitlement.has_access {
        format!(
            r#"<form class="inline" method="post" action="{action}"><button type="submit">Revoke</button></form>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<tr><td>{id}</td><td>{email}</td><td>{status}</td><td>{created}</td><td>
<form class="inline" method="post" action="{action}">
<select name="days"><option value="7">7 days</option><option value="30">30 days</option><option value="90">90 days</option><option value="365">365 days</option></select>
<button type="submit">Grant</button></form> {revoke}</td></tr>"#,
        id = user.id,
        email = escape_html(&user.email),
        status = status_cell(user, now),
        created = user.created_at.format("%Y-%m-%d"),
    )
}

pub fn users_page(users: &[User], now: DateTime<Utc>) -> String {
    let rows: String = users.iter().map(|u| user_row(u, now)).collect();
    let table = if rows.is_empty() {
        "<p>No registered users yet.</p>".to_string()
    } else {
        format!(
            "<table><thead><tr><th>ID</th><th>Email</th><th>Access</th><th>Registered</th><th></th></tr></thead><tbody>{rows}</tbody></table>"
        )
    };

    format!("<h1>Users</h1>\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entitlement;
    use chrono::Duration;

    fn user(id: i32, entitlement: Entitlement) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            password_hash: String::new(),
            is_admin: false,
            entitlement,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_users_page_statuses() {
        let now = Utc::now();
        let users = vec![
            user(1, Entitlement::default()),
            user(2, Entitlement::granted_for(7, now).unwrap()),
            user(
                3,
                Entitlement {
                    has_access: true,
                    access_until: Some(now - Duration::days(1)),
                },
            ),
        ];

        let html = users_page(&users, now);
        assert!(html.contains("No access"));
        assert!(html.contains("Active until"));
        assert!(html.contains("Expired"));
        assert!(html.contains(r#"action="/admin/users/2/toggle-access""#));
    }
}
