//! Server-rendered pages.

const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

const ERROR_SLOT: &str = "{{ error }}";

pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect username or password";

pub fn render_login(error: Option<&str>) -> String {
    let banner = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();
    LOGIN_TEMPLATE.replace(ERROR_SLOT, &banner)
}

pub fn render_index() -> String {
    INDEX_TEMPLATE.to_string()
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_without_error_has_no_banner() {
        let html = render_login(None);
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"name="passwd""#));
        assert!(!html.contains(ERROR_SLOT));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn login_error_is_escaped() {
        let html = render_login(Some("<b>nope</b>"));
        assert!(html.contains("&lt;b&gt;nope&lt;/b&gt;"));
        assert!(!html.contains("<b>nope</b>"));
    }

    #[test]
    fn index_talks_to_the_json_api() {
        let html = render_index();
        assert!(html.contains("/todos/"));
        assert!(html.contains("/logout"));
    }

    #[test]
    fn index_has_bulk_actions_and_inline_editing() {
        let html = render_index();
        assert!(html.contains(r#"id="toggle-all""#));
        assert!(html.contains(r#"id="clear-completed""#));
        assert!(html.contains("Clear completed"));
        assert!(html.contains(r#"addEventListener("dblclick""#));
        assert!(html.contains(r#"request("PUT""#));
    }
}
