use std::fs;
use std::path::Path;

use clap::ValueEnum;

use crate::error::Result;
use crate::format::{format_count, format_number, format_ordinal, format_rate};
use crate::stats::ProfileStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub muted: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#0d1117",
                card: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                muted: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#f6f8fa",
                card: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                muted: "#6a737d",
            },
        }
    }
}

// Utilities for building HTML content

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// One `<tr>` of the stats table; `value` is expected to be escaped already.
fn stat_row(key: &str, value: &str) -> String {
    format!(
        "<tr><th class=\"key\">{}</th><td class=\"value\">{value}</td></tr>\n",
        escape_html(key)
    )
}

fn plural<'a>(n: u64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

fn build_header(stats: &ProfileStats) -> String {
    let mut out = String::new();

    if let Some(avatar) = &stats.avatar {
        out.push_str(&format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"\">\n",
            escape_html(avatar)
        ));
    }
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&stats.name)));
    out.push_str(&format!(
        "<p class=\"handle\">@{}</p>\n",
        escape_html(&stats.handle)
    ));
    if let Some(description) = &stats.description {
        out.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            escape_html(description)
        ));
    }

    out
}

fn build_rows(stats: &ProfileStats) -> String {
    let age = if stats.age.is_zero() {
        "less than a day".to_string()
    } else {
        stats.age.text()
    };

    let countdown = if stats.until_anniversary.is_zero() {
        "today".to_string()
    } else {
        format!("in {}", stats.until_anniversary)
    };

    let average = stats
        .average_posts
        .map(format_rate)
        .unwrap_or_else(|| "n/a".to_string());

    let milestone = format!(
        "{} ({} {} to go)",
        format_number(stats.next_milestone),
        format_number(stats.posts_until_milestone),
        plural(stats.posts_until_milestone, "post", "posts"),
    );

    let needed = match stats.daily_posts_needed {
        Some(n) => format!(
            "{} {} a day over the next {} {}",
            format_number(n),
            plural(n, "post", "posts"),
            format_number(stats.anniversary_days),
            plural(stats.anniversary_days, "day", "days"),
        ),
        None => "n/a".to_string(),
    };

    let rows = [
        ("Joined", stats.created_at.format("%-d %B %Y").to_string()),
        ("Account age", age),
        ("Days on Bluesky", format_count(stats.age_days)),
        (
            "Next anniversary",
            format!(
                "{} {countdown} ({})",
                format_ordinal(stats.anniversary_number()),
                stats.next_anniversary.format("%-d %B %Y"),
            ),
        ),
        ("Followers", format_count(stats.followers)),
        ("Following", format_count(stats.follows)),
        ("Posts", format_number(stats.post_count)),
        ("Posts per day", average),
        ("Next milestone", milestone),
        ("Pace needed", needed),
    ];

    rows.iter()
        .map(|(key, value)| stat_row(key, &escape_html(value)))
        .collect()
}

fn page(title: &str, body: &str, theme: Theme) -> String {
    let colors = theme.colors();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body         {{ background: {bg}; color: {text}; font-family: system-ui, sans-serif; margin: 0; }}
main         {{ background: {card}; max-width: 40rem; margin: 3rem auto; padding: 2rem; border-radius: 15px; }}
.avatar      {{ width: 96px; height: 96px; border-radius: 50%; }}
.handle      {{ color: {muted}; margin-top: 0; }}
.description {{ white-space: pre-line; }}
.key         {{ color: {key}; text-align: left; padding-right: 1rem; }}
.value       {{ color: {value}; }}
.error       {{ color: {key}; }}
</style>
</head>
<body>
<main>
{body}</main>
</body>
</html>
"#,
        title = escape_html(title),
        bg = colors.bg,
        card = colors.card,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        muted = colors.muted,
        body = body,
    )
}

/// Profile page for a successful lookup
pub fn render_profile_page(stats: &ProfileStats, theme: Theme) -> String {
    let body = format!(
        "{}<table>\n{}</table>\n",
        build_header(stats),
        build_rows(stats)
    );
    page(&format!("{} on Bluesky", stats.name), &body, theme)
}

/// Error page: missing handle or a failed lookup
pub fn render_error_page(message: &str, theme: Theme) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>\n",
        escape_html(message)
    );
    page("Error", &body, theme)
}

/// Writes a rendered page, creating missing parent directories.
pub fn write_page(path: &Path, page: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, page)?;
    Ok(())
}
