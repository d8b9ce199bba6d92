//! Minimal server-rendered pages.
//!
//! Just enough markup for the behavior contract; a real template engine is
//! deliberately out of scope. All user-supplied content is escaped.

use warbler_db::models::{MessageRow, UserRow};

/// Escape text for inclusion in HTML bodies and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><title>{} | Warbler</title></head>\n<body>\n\
         <nav><a href=\"/\">Warbler</a> <a href=\"/signup\">Sign up</a> \
         <a href=\"/login\">Log in</a></nav>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn flash_block(flash: Option<&str>) -> String {
    match flash {
        Some(msg) => format!("<div class=\"flash\">{}</div>\n", escape(msg)),
        None => String::new(),
    }
}

fn message_list(messages: &[MessageRow]) -> String {
    let items: String = messages
        .iter()
        .map(|m| {
            format!(
                "<li><a href=\"/messages/{}\">{}</a> <small>{}</small></li>\n",
                m.id,
                escape(&m.text),
                escape(&m.timestamp)
            )
        })
        .collect();
    format!("<ul class=\"messages\">\n{}</ul>", items)
}

pub fn home_page(flash: Option<&str>) -> String {
    let body = format!(
        "{}<h1>What's Happening?</h1>\n<p>Join Warbler today and share your warbles.</p>",
        flash_block(flash)
    );
    layout("Home", &body)
}

pub fn signup_page(flash: Option<&str>) -> String {
    let body = format!(
        "{}<h1>Join Warbler today.</h1>\n\
         <form method=\"POST\" action=\"/signup\">\n\
         <input name=\"username\" placeholder=\"Username\">\n\
         <input name=\"email\" placeholder=\"E-mail\">\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\n\
         <input name=\"image_url\" placeholder=\"Image URL (optional)\">\n\
         <button>Sign me up!</button>\n</form>",
        flash_block(flash)
    );
    layout("Sign up", &body)
}

pub fn login_page(flash: Option<&str>) -> String {
    let body = format!(
        "{}<h1>Welcome back.</h1>\n\
         <form method=\"POST\" action=\"/login\">\n\
         <input name=\"username\" placeholder=\"Username\">\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\n\
         <button>Log in</button>\n</form>",
        flash_block(flash)
    );
    layout("Log in", &body)
}

pub fn message_page(message: &MessageRow, author: &UserRow) -> String {
    let body = format!(
        "<h2>@{}</h2>\n<blockquote>{}</blockquote>\n<small>{}</small>",
        escape(&author.username),
        escape(&message.text),
        escape(&message.timestamp)
    );
    layout("Message", &body)
}

pub fn new_message_page(username: &str) -> String {
    let body = format!(
        "<h1>Add my message!</h1>\n<p>Posting as @{}</p>\n\
         <form method=\"POST\" action=\"/messages/new\">\n\
         <textarea name=\"text\" placeholder=\"What's happening?\"></textarea>\n\
         <button>Add my message!</button>\n</form>",
        escape(username)
    );
    layout("New message", &body)
}

pub fn profile_page(user: &UserRow, messages: &[MessageRow]) -> String {
    let body = format!(
        "<h1>@{}</h1>\n<p>{} messages</p>\n{}",
        escape(&user.username),
        messages.len(),
        message_list(messages)
    );
    layout(&format!("@{}", user.username), &body)
}

pub fn edit_profile_page(user: &UserRow, message_count: i64) -> String {
    let body = format!(
        "<h1>Edit Your Profile.</h1>\n<p>{} messages</p>\n\
         <form method=\"POST\" action=\"/users/profile\">\n\
         <input name=\"username\" value=\"{}\">\n\
         <input name=\"email\" value=\"{}\">\n\
         <input name=\"image_url\" value=\"{}\">\n\
         <button>Edit this user!</button>\n</form>",
        message_count,
        escape(&user.username),
        escape(&user.email),
        escape(user.image_url.as_deref().unwrap_or("")),
    );
    layout("Edit profile", &body)
}

/// Shared by the followers and following pages.
pub fn user_list_page(heading: &str, owner: &UserRow, users: &[UserRow]) -> String {
    let items: String = users
        .iter()
        .map(|u| {
            format!(
                "<li><a href=\"/users/{}\">@{}</a></li>\n",
                u.id,
                escape(&u.username)
            )
        })
        .collect();
    let body = format!(
        "<h1>@{}</h1>\n<h2>{}</h2>\n<ul class=\"users\">\n{}</ul>",
        escape(&owner.username),
        escape(heading),
        items
    );
    layout(heading, &body)
}

pub fn liked_messages_page(owner: &UserRow, messages: &[MessageRow]) -> String {
    let body = format!(
        "<h1>@{}</h1>\n<h2>Liked warbles</h2>\n{}",
        escape(&owner.username),
        message_list(messages)
    );
    layout("Likes", &body)
}

pub fn not_found_page() -> String {
    layout("Not found", "<h1>Page not found.</h1>")
}

pub fn error_page(message: &str) -> String {
    layout("Error", &format!("<h1>{}</h1>", escape(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>&\"hi\"</b>"), "&lt;b&gt;&amp;&quot;hi&quot;&lt;/b&gt;");
    }

    #[test]
    fn home_page_has_signup_prompt() {
        let page = home_page(Some("Access unauthorized."));
        assert!(page.contains("Access unauthorized."));
        assert!(page.contains("Sign up</a>"));
        assert!(page.contains("/signup"));
    }
}
