//! Server-rendered HTML pages

use crate::client::UserRow;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/login">Login</a> | <a href="/register">Register</a> | <a href="/data">Data</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn notice(message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p role="alert">{}</p>"#, escape(m)))
        .unwrap_or_default()
}

fn credentials_form(action: &str, submit: &str, username: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<input type="text" name="username" placeholder="Username" value="{username}" autocomplete="username">
<input type="password" name="password" placeholder="Password">
<button type="submit">{submit}</button>
</form>"#,
        action = action,
        username = escape(username),
        submit = submit,
    )
}

/// Landing page
pub fn index(user: Option<&str>) -> String {
    let body = match user {
        Some(user) => format!(
            r#"<p>Signed in as <strong>{}</strong>.</p><p><a href="/data">View data</a></p>"#,
            escape(user)
        ),
        None => r#"<p><a href="/login">Log in</a> or <a href="/register">register</a>.</p>"#
            .to_string(),
    };
    layout("Welcome", &body)
}

/// Login form, optionally with a failure message
pub fn login_form(message: Option<&str>, username: &str) -> String {
    let body = format!(
        "{}{}",
        notice(message),
        credentials_form("/login", "Login", username)
    );
    layout("Login", &body)
}

/// Registration form, optionally with a failure message
pub fn register_form(message: Option<&str>, username: &str) -> String {
    let body = format!(
        "{}{}",
        notice(message),
        credentials_form("/register", "Register", username)
    );
    layout("Register", &body)
}

/// Confirmation after a successful registration
pub fn registered(username: &str) -> String {
    let body = format!(
        r#"<p role="status">User registered: <strong>{}</strong></p><p><a href="/login">Log in</a></p>"#,
        escape(username)
    );
    layout("Registered", &body)
}

/// Table of rows fetched from the data endpoint
pub fn data_table(rows: &[UserRow]) -> String {
    let mut table = String::from(
        "<table>\n<thead><tr><th>ID</th><th>Username</th></tr></thead>\n<tbody>\n",
    );
    for row in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(&row.id),
            escape(&row.username)
        ));
    }
    table.push_str("</tbody>\n</table>");

    layout("Data", &table)
}

/// Generic failure page
pub fn error_page(message: &str) -> String {
    layout("Something went wrong", &notice(Some(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape("alice"), "alice");
    }

    #[test]
    fn test_data_table_escapes_rows() {
        let rows = vec![
            UserRow {
                id: "1".to_string(),
                username: "alice".to_string(),
            },
            UserRow {
                id: "2".to_string(),
                username: "<b>mallory</b>".to_string(),
            },
        ];

        let html = data_table(&rows);
        assert!(html.contains("<th>ID</th><th>Username</th>"));
        assert!(html.contains("<tr><td>1</td><td>alice</td></tr>"));
        assert!(html.contains("&lt;b&gt;mallory&lt;/b&gt;"));
        assert!(!html.contains("<b>mallory</b>"));
    }

    #[test]
    fn test_login_form_keeps_username_and_shows_message() {
        let html = login_form(Some("Invalid credentials"), "al\"ice");
        assert!(html.contains(r#"<p role="alert">Invalid credentials</p>"#));
        assert!(html.contains(r#"value="al&quot;ice""#));
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"type="password""#));
    }

    #[test]
    fn test_index_reflects_session() {
        assert!(index(Some("alice")).contains("Signed in as <strong>alice</strong>"));
        assert!(!index(None).contains("Signed in"));
    }
}
