use axum::response::Html;

use crate::session::SessionStore;
use crate::sitemap::{self, Layout};

/// Escapes text for use in element content and quoted attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps `body` in the layout the route table assigns to `path`.
pub fn render_page(path: &str, session: &SessionStore, body: &str) -> Html<String> {
    let entry = sitemap::lookup(path);
    let title = entry.map(|e| e.title).unwrap_or("Page not found");
    let layout = entry.map(|e| e.layout).unwrap_or(Layout::Bare);

    let (header, footer) = match layout {
        Layout::Marketing => (marketing_header(session), marketing_footer()),
        Layout::Dashboard => (dashboard_header(session), String::new()),
        Layout::Onboarding | Layout::Standalone | Layout::Bare => (String::new(), String::new()),
    };

    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Hubsite Social</title></head>\n<body class=\"layout-{layout}\">\n{header}<main>\n{body}\n</main>\n{footer}</body>\n</html>\n",
        title = escape(title),
        layout = layout_class(layout),
        header = header,
        body = body,
        footer = footer,
    ))
}

fn layout_class(layout: Layout) -> &'static str {
    match layout {
        Layout::Marketing => "marketing",
        Layout::Dashboard => "dashboard",
        Layout::Onboarding => "onboarding",
        Layout::Standalone => "standalone",
        Layout::Bare => "bare",
    }
}

fn marketing_header(session: &SessionStore) -> String {
    let account = if session.state().is_authenticated() {
        "<a href=\"/dashboard\">Dashboard</a>".to_string()
    } else {
        "<a href=\"/?modal=login\">Log in</a> <a href=\"/?modal=signUp\">Sign up</a>".to_string()
    };
    format!(
        "<header><nav><a href=\"/\">Home</a> <a href=\"/about\">About</a> <a href=\"/features\">Features</a> <a href=\"/works\">How it works</a> <a href=\"/faq\">FAQ</a> {}</nav></header>\n",
        account
    )
}

fn marketing_footer() -> String {
    "<footer>\n<form class=\"newsletter\" data-endpoint=\"/api/newsletter\"><label>Stay in the loop <input type=\"email\" name=\"email\" required></label><button type=\"submit\">Subscribe</button></form>\n<nav><a href=\"/termsofuse\">Terms of use</a> <a href=\"/privacypolicy\">Privacy policy</a> <a href=\"/rewardpolicy\">Reward policy</a> <a href=\"/subscription\">Unsubscribe</a></nav>\n</footer>\n".to_string()
}

fn dashboard_header(session: &SessionStore) -> String {
    let name = session
        .current_user()
        .map(|u| u.display_name())
        .unwrap_or_default();
    format!(
        "<header><nav><a href=\"/dashboard\">Rewards</a> <a href=\"/surveys\">Surveys</a> <a href=\"/dashboard/spinner\">Spinner</a></nav><span class=\"user\">{}</span><form data-endpoint=\"/api/auth/logout\"><button type=\"submit\">Log out</button></form></header>\n",
        escape(&name)
    )
}
