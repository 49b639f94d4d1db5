//! HTML views built as strings. Every page goes through [`layout`], so
//! each context carries a title; empty collections are passed as `None`
//! and rendered as the no-data case rather than an empty list.
use std::fmt::Write;

use models::{acronym, category, user};

/// Minimal HTML escaping for user-provided text.
pub fn esc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         color: #24292f; background: #ffffff; line-height: 1.6; }}
  .container {{ max-width: 800px; margin: 0 auto; padding: 2rem 1rem; }}
  h1 {{ font-size: 1.8rem; margin-bottom: 1rem; }}
  h2 {{ font-size: 1.2rem; margin: 1.5rem 0 0.75rem; color: #57606a; }}
  p {{ margin-bottom: 1rem; }}
  table {{ width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; }}
  th, td {{ padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid #d0d7de; }}
  th {{ color: #57606a; font-weight: 600; font-size: 0.85em; text-transform: uppercase; }}
  a {{ color: #0969da; text-decoration: none; }}
  a:hover {{ text-decoration: underline; }}
  nav {{ margin-bottom: 1.5rem; }}
  nav a {{ margin-right: 1rem; }}
  form label {{ display: block; margin-bottom: 0.25rem; }}
  form input {{ display: block; margin-bottom: 1rem; padding: 0.4rem; width: 100%;
               max-width: 24rem; border: 1px solid #d0d7de; border-radius: 6px; }}
  button {{ padding: 0.4rem 1rem; border: 1px solid #1f883d; border-radius: 6px;
           background: #2da44e; color: #ffffff; cursor: pointer; }}
  .inline-form {{ display: inline; }}
</style>
</head>
<body>
<div class="container">
<nav>
  <a href="/">Home</a>
  <a href="/users">All Users</a>
  <a href="/categories">All Categories</a>
  <a href="/create-acronym">Create An Acronym</a>
  <a href="/login">Login</a>
</nav>
<h1>{title}</h1>
{body}
</div>
</body>
</html>"#,
        title = esc(title),
        body = body,
    )
}

fn acronym_rows(acronyms: &[acronym::Model]) -> String {
    let mut rows = String::new();
    for a in acronyms {
        let _ = write!(
            rows,
            r#"<tr>
  <td><a href="/acronyms/{id}">{short}</a></td>
  <td>{long}</td>
</tr>"#,
            id = a.id,
            short = esc(&a.short),
            long = esc(&a.long),
        );
    }
    rows
}

fn acronym_table(acronyms: &[acronym::Model]) -> String {
    format!(
        r#"<table>
  <thead><tr><th>Short</th><th>Long</th></tr></thead>
  <tbody>{}</tbody>
</table>"#,
        acronym_rows(acronyms),
    )
}

/// `GET /` — every known acronym, or the empty-state copy.
pub fn index(acronyms: Option<&[acronym::Model]>) -> String {
    let body = match acronyms {
        Some(list) => acronym_table(list),
        None => "<p>There aren't any acronyms yet!</p>".to_string(),
    };
    layout("Homepage", &body)
}

/// `GET /acronyms/:id` — detail with creator and categories.
pub fn acronym(
    acronym: &acronym::Model,
    creator: &user::Model,
    categories: Option<&[category::Model]>,
) -> String {
    let mut body = format!(
        r#"<h2>{short}</h2>
<p>{long}</p>
<p>Created by <a href="/users/{creator_id}">{creator_name}</a></p>"#,
        short = esc(&acronym.short),
        long = esc(&acronym.long),
        creator_id = creator.id,
        creator_name = esc(&creator.name),
    );
    match categories {
        Some(list) => {
            body.push_str("<h2>Categories</h2><ul>");
            for c in list {
                let _ = write!(
                    body,
                    r#"<li><a href="/categories/{id}">{name}</a></li>"#,
                    id = c.id,
                    name = esc(&c.name),
                );
            }
            body.push_str("</ul>");
        }
        None => body.push_str("<p>Not categorised yet.</p>"),
    }
    let _ = write!(
        body,
        r#"<p><a href="/acronyms/{id}/edit">Edit</a></p>
<form class="inline-form" method="post" action="/acronyms/{id}/delete"><button>Delete</button></form>"#,
        id = acronym.id,
    );
    layout(&acronym.long, &body)
}

/// `GET /users/:id` — user profile with authored acronyms.
pub fn user(user: &user::Public, acronyms: Option<&[acronym::Model]>) -> String {
    let mut body = format!("<p>@{}</p>", esc(&user.username));
    match acronyms {
        Some(list) => {
            body.push_str("<h2>Acronyms</h2>");
            body.push_str(&acronym_table(list));
        }
        None => body.push_str("<p>This user has no acronyms yet.</p>"),
    }
    layout(&user.name, &body)
}

/// `GET /users` — all users, or the empty-state copy.
pub fn all_users(users: Option<&[user::Public]>) -> String {
    let body = match users {
        Some(list) => {
            let mut rows = String::new();
            for u in list {
                let _ = write!(
                    rows,
                    r#"<tr><td><a href="/users/{id}">{name}</a></td><td>@{username}</td></tr>"#,
                    id = u.id,
                    name = esc(&u.name),
                    username = esc(&u.username),
                );
            }
            format!(
                r#"<table>
  <thead><tr><th>Name</th><th>Username</th></tr></thead>
  <tbody>{rows}</tbody>
</table>"#,
            )
        }
        None => "<p>There aren't any users yet!</p>".to_string(),
    };
    layout("All Users", &body)
}

/// `GET /categories` — all categories, or the empty-state copy.
pub fn all_categories(categories: Option<&[category::Model]>) -> String {
    let body = match categories {
        Some(list) => {
            let mut items = String::from("<ul>");
            for c in list {
                let _ = write!(
                    items,
                    r#"<li><a href="/categories/{id}">{name}</a></li>"#,
                    id = c.id,
                    name = esc(&c.name),
                );
            }
            items.push_str("</ul>");
            items
        }
        None => "<p>There aren't any categories yet!</p>".to_string(),
    };
    layout("All Categories", &body)
}

/// `GET /categories/:id` — category with its acronyms.
pub fn category(category: &category::Model, acronyms: Option<&[acronym::Model]>) -> String {
    let body = match acronyms {
        Some(list) => acronym_table(list),
        None => "<p>No acronyms in this category yet.</p>".to_string(),
    };
    layout(&category.name, &body)
}

/// `GET /login`
pub fn login() -> String {
    let body = r#"<form method="post" action="/login">
  <label for="username">Username</label>
  <input id="username" name="username" type="text" required>
  <label for="password">Password</label>
  <input id="password" name="password" type="password" required>
  <button>Log In</button>
</form>"#;
    layout("Login", body)
}

/// `GET /create-acronym` and `GET /acronyms/:id/edit` share one form;
/// editing pre-fills the fields and posts back to the edit route.
pub fn acronym_form(existing: Option<&acronym::Model>) -> String {
    let (title, action, short, long) = match existing {
        Some(a) => (
            "Edit Acronym",
            format!("/acronyms/{}/edit", a.id),
            esc(&a.short),
            esc(&a.long),
        ),
        None => ("Create An Acronym", "/create-acronym".to_string(), String::new(), String::new()),
    };
    let body = format!(
        r#"<form method="post" action="{action}">
  <label for="acronymShort">Acronym</label>
  <input id="acronymShort" name="acronymShort" type="text" value="{short}" required>
  <label for="acronymLong">Meaning</label>
  <input id="acronymLong" name="acronymLong" type="text" value="{long}" required>
  <button>Submit</button>
</form>"#,
    );
    layout(title, &body)
}
