//! Page shell shared by every HTML view.

use super::escape_html;
use crate::api::flash::Notice;
use crate::domain::User;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
nav { background: #1f3a5f; padding: .75rem 1.5rem; display: flex; gap: 1rem; align-items: center; }
nav a { color: #fff; text-decoration: none; }
nav .spacer { flex: 1; }
nav .who { color: #c8d3e0; }
main { max-width: 1100px; margin: 1.5rem auto; padding: 0 1rem; }
.notice { padding: .75rem 1rem; border-radius: 4px; margin-bottom: .75rem; }
.notice.success { background: #dff3e4; } .notice.info { background: #e1eefb; }
.notice.warning { background: #fff4d6; } .notice.danger { background: #fbe1e1; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { padding: .5rem; border-bottom: 1px solid #e3e6ea; text-align: left; vertical-align: top; }
form.inline { display: inline; }
.stats { display: flex; gap: 1rem; } .stat { background: #fff; padding: 1rem; border-radius: 4px; flex: 1; }
.stat b { display: block; font-size: 1.6rem; }
.pager a, .pager span { margin-right: .5rem; }
"#;

/// Wrap a page body with navigation and pending notices.
pub fn layout(title: &str, user: Option<&User>, notices: &[Notice], body: &str) -> String {
    let nav_links = match user {
        Some(user) if user.is_admin() => format!(
            r#"<a href="/catalog">Catalog</a><a href="/admin">Dashboard</a><a href="/admin/users">Users</a><span class="spacer"></span><span class="who">{email}</span><a href="/logout">Log out</a>"#,
            email = escape_html(&user.email)
        ),
        Some(user) => format!(
            r#"<a href="/catalog">Catalog</a><span class="spacer"></span><span class="who">{email}</span><a href="/logout">Log out</a>"#,
            email = escape_html(&user.email)
        ),
        None => r#"<span class="spacer"></span><a href="/login">Log in</a><a href="/register">Register</a>"#
            .to_string(),
    };

    let notices: String = notices
        .iter()
        .map(|n| {
            format!(
                r#"<div class="notice {level}">{message}</div>"#,
                level = n.level.as_str(),
                message = escape_html(&n.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Tender Finder</title>
<style>{style}</style>
</head>
<body>
<nav><a href="/"><strong>Tender Finder</strong></a>{nav_links}</nav>
<main>
{notices}
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
    )
}
