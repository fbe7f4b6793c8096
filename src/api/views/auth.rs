//! Registration and login forms.

pub fn register_page() -> String {
    r#"<h1>Register</h1>
<form method="post" action="/register">
<p><label>Email <input type="email" name="email" required></label></p>
<p><label>Password <input type="password" name="password" required></label></p>
<p><label>Confirm password <input type="password" name="password_confirm" required></label></p>
<p><button type="submit">Register</button></p>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#
        .to_string()
}

pub fn login_page() -> String {
    r#"<h1>Log in</h1>
<form method="post" action="/login">
<p><label>Email <input type="email" name="email" required></label></p>
<p><label>Password <input type="password" name="password" required></label></p>
<p><button type="submit">Log in</button></p>
</form>
<p>No account yet? <a href="/register">Register</a></p>"#
        .to_string()
}
