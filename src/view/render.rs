//! HTML builders for the three read-only views
//!
//! Plain string builders shared by the server and the CLI. All state lives
//! in query parameters, so every rendered link encodes the next view state.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::aggregate::{Archive, BlogStats};
use crate::config::SiteConfig;
use crate::content::{html_escape, Post};
use crate::view::archive::ArchiveState;
use crate::view::list::{ListPage, ListState, SortOrder, PER_PAGE_CHOICES};
use crate::view::theme::Theme;

/// Pages shown on each side of the current one in the paginator
const PAGER_MID_SIZE: usize = 2;

/// Characters that must not appear raw in a path segment or query value
const ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'&')
    .add(b'=')
    .add(b'%')
    .add(b'+')
    .add(b'/');

/// Percent-encode a path segment or query parameter value
fn encode(value: &str) -> String {
    utf8_percent_encode(value, ENCODE_SET).to_string()
}

/// Build the home-view query string for a given page, keeping the rest of
/// the list state. Defaults are omitted to keep URLs short.
fn list_query(state: &ListState, page: usize) -> String {
    let mut params = Vec::new();

    if !state.search.trim().is_empty() {
        params.push(format!("q={}", encode(&state.search)));
    }
    if !state.selected_tags.is_empty() {
        params.push(format!("tags={}", encode(&state.selected_tags.join(","))));
    }
    if state.sort == SortOrder::Oldest {
        params.push(format!("sort={}", state.sort.as_query()));
    }
    if state.per_page != ListState::default().per_page {
        params.push(format!("per_page={}", state.per_page));
    }
    if page > 1 {
        params.push(format!("page={}", page));
    }

    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Common page shell with the theme class on `<body>`
fn page_shell(config: &SiteConfig, theme: Theme, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - {site}</title>
<style>
body {{ max-width: 48rem; margin: 0 auto; padding: 1rem; font-family: sans-serif; }}
body.dark {{ background: #111; color: #ddd; }}
body.dark a {{ color: #8ab4f8; }}
.tag {{ display: inline-block; padding: 0 .4rem; border-radius: .6rem; background: #eee; color: #333; font-size: .85em; }}
body.dark .tag {{ background: #333; color: #ddd; }}
.tag.selected {{ background: #36c; color: #fff; }}
.pagination a, .pagination span {{ margin: 0 .2rem; }}
.pagination .current {{ font-weight: bold; }}
</style>
</head>
<body class="{theme}">
<header>
<h1><a href="/">{site}</a></h1>
<form method="post" action="/theme/toggle"><button type="submit">{toggle_label}</button></form>
</header>
{body}
<footer><p>{author}</p></footer>
</body>
</html>
"#,
        title = html_escape(title),
        site = html_escape(&config.title),
        theme = theme.class(),
        toggle_label = match theme {
            Theme::Light => "dark mode",
            Theme::Dark => "light mode",
        },
        body = body,
        author = html_escape(&config.author),
    )
}

/// One post entry in the home listing
fn post_entry(post: &Post) -> String {
    let mut html = format!(
        r#"<article><h2><a href="/posts/{id}">{title}</a></h2><time datetime="{date}">{date}</time>"#,
        id = encode(&post.id),
        title = html_escape(&post.title),
        date = html_escape(&post.date),
    );
    for tag in &post.tags {
        html.push_str(&format!(r#" <span class="tag">{}</span>"#, html_escape(tag)));
    }
    if !post.excerpt.is_empty() {
        html.push_str(&format!("<p>{}</p>", html_escape(&post.excerpt)));
    }
    html.push_str("</article>");
    html
}

/// Numbered paginator with a window around the current page
fn paginator(state: &ListState, page: &ListPage) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }

    let current = page.page;
    let total = page.total_pages;
    let mut html = r#"<nav class="pagination">"#.to_string();

    if current > 1 {
        html.push_str(&format!(
            r#"<a rel="prev" href="{}">&larr;</a>"#,
            list_query(state, current - 1)
        ));
    }

    let start = current.saturating_sub(PAGER_MID_SIZE).max(1);
    let end = (current + PAGER_MID_SIZE).min(total);

    if start > 1 {
        html.push_str(&format!(r#"<a href="{}">1</a>"#, list_query(state, 1)));
        if start > 2 {
            html.push_str("<span>&hellip;</span>");
        }
    }

    for number in start..=end {
        if number == current {
            html.push_str(&format!(r#"<span class="current">{}</span>"#, number));
        } else {
            html.push_str(&format!(
                r#"<a href="{}">{}</a>"#,
                list_query(state, number),
                number
            ));
        }
    }

    if end < total {
        if end < total - 1 {
            html.push_str("<span>&hellip;</span>");
        }
        html.push_str(&format!(
            r#"<a href="{}">{}</a>"#,
            list_query(state, total),
            total
        ));
    }

    if current < total {
        html.push_str(&format!(
            r#"<a rel="next" href="{}">&rarr;</a>"#,
            list_query(state, current + 1)
        ));
    }

    html.push_str("</nav>");
    html
}

/// Home view: search box, tag filters, sorted post list, pager, stats panel
pub fn home_page(
    config: &SiteConfig,
    theme: Theme,
    state: &ListState,
    page: &ListPage,
    stats: &BlogStats,
) -> String {
    let mut body = String::new();

    // Search keeps the other filters through hidden fields
    body.push_str(&format!(
        r#"<form method="get" action="/">
<input type="search" name="q" value="{q}" placeholder="Search posts...">
"#,
        q = html_escape(&state.search)
    ));
    if !state.selected_tags.is_empty() {
        body.push_str(&format!(
            r#"<input type="hidden" name="tags" value="{}">
"#,
            html_escape(&state.selected_tags.join(","))
        ));
    }
    body.push_str(&format!(
        r#"<select name="sort">
<option value="desc"{newest}>newest first</option>
<option value="asc"{oldest}>oldest first</option>
</select>
<select name="per_page">
"#,
        newest = if state.sort == SortOrder::Newest { " selected" } else { "" },
        oldest = if state.sort == SortOrder::Oldest { " selected" } else { "" },
    ));
    for choice in PER_PAGE_CHOICES {
        body.push_str(&format!(
            r#"<option value="{choice}"{selected}>{choice} / page</option>
"#,
            choice = choice,
            selected = if state.per_page == choice { " selected" } else { "" },
        ));
    }
    body.push_str("</select>\n<button type=\"submit\">Apply</button>\n</form>\n");

    // Tag filter chips; each link flips one tag
    body.push_str(r#"<p class="tags">"#);
    for (tag, count) in &stats.tag_distribution {
        let mut toggled = state.clone();
        toggled.toggle_tag(tag);
        let selected = state.selected_tags.iter().any(|t| t == tag);
        body.push_str(&format!(
            r#"<a class="tag{selected}" href="{href}">{tag} ({count})</a> "#,
            selected = if selected { " selected" } else { "" },
            href = list_query(&toggled, 1),
            tag = html_escape(tag),
            count = count,
        ));
    }
    body.push_str("</p>\n");

    body.push_str(&format!("<p>{} posts found</p>\n", page.total_matched));

    for post in &page.posts {
        body.push_str(&post_entry(post));
        body.push('\n');
    }

    body.push_str(&paginator(state, page));

    // Stats panel
    body.push_str(&format!(
        "<aside><h2>Blog stats</h2><p>Total posts: {}</p><p>Popular tags:",
        stats.total_posts
    ));
    for tag in &stats.popular_tags {
        let count = stats.tag_distribution.get(tag).copied().unwrap_or(0);
        body.push_str(&format!(
            r#" <span class="tag">{} ({})</span>"#,
            html_escape(tag),
            count
        ));
    }
    body.push_str(r#"</p><p><a href="/archive">Browse the archive</a></p></aside>"#);

    page_shell(config, theme, "Home", &body)
}

/// Detail view: metadata, rendered body, related-posts panel.
///
/// `content_html` is injected as-is; post documents are trusted,
/// author-controlled markup.
pub fn post_page(config: &SiteConfig, theme: Theme, post: &Post, related: &[Post]) -> String {
    let mut body = format!(
        r#"<p><a href="/">&larr; Back to all posts</a></p>
<article>
<h2>{title}</h2>
<time datetime="{date}">{date}</time>"#,
        title = html_escape(&post.title),
        date = html_escape(&post.date),
    );
    for tag in &post.tags {
        body.push_str(&format!(r#" <span class="tag">{}</span>"#, html_escape(tag)));
    }
    body.push_str(&format!(
        "\n<div>{}</div>\n</article>\n",
        post.content_html.as_deref().unwrap_or("")
    ));

    if !related.is_empty() {
        body.push_str("<aside><h2>You may also like</h2><ul>");
        for other in related {
            body.push_str(&format!(
                r#"<li><a href="/posts/{id}">{title}</a> <time datetime="{date}">{date}</time></li>"#,
                id = encode(&other.id),
                title = html_escape(&other.title),
                date = html_escape(&other.date),
            ));
        }
        body.push_str("</ul></aside>");
    }

    let title = if post.title.is_empty() { &post.id } else { &post.title };
    page_shell(config, theme, title, &body)
}

/// Archive view query string for a given expanded-year set
fn archive_query(state: &ArchiveState) -> String {
    let open: Vec<&str> = state.expanded_years().collect();
    if open.is_empty() {
        "/archive".to_string()
    } else {
        format!("/archive?open={}", encode(&open.join(",")))
    }
}

/// Archive view: years descending, expanded years list months descending
pub fn archive_page(
    config: &SiteConfig,
    theme: Theme,
    archive: &Archive,
    state: &ArchiveState,
) -> String {
    let mut body = String::from(r#"<p><a href="/">&larr; Back to home</a></p>"#);

    let mut years: Vec<&String> = archive.keys().collect();
    years.sort_by(|a, b| b.cmp(a));

    for year in years {
        let expanded = state.is_expanded(year);
        body.push_str(&format!(
            r#"<section><h2><a href="{href}">{year} {marker}</a></h2>"#,
            href = archive_query(&state.with_toggled(year)),
            year = html_escape(year),
            marker = if expanded { "&#9662;" } else { "&#9656;" },
        ));

        if expanded {
            let mut months: Vec<&String> = archive[year].keys().collect();
            months.sort_by(|a, b| b.cmp(a));

            for month in months {
                body.push_str(&format!("<h3>{}</h3><ul>", month_name(month)));
                for post in &archive[year][month] {
                    body.push_str(&format!(
                        r#"<li><time datetime="{date}">{date}</time> <a href="/posts/{id}">{title}</a></li>"#,
                        date = html_escape(&post.date),
                        id = encode(&post.id),
                        title = html_escape(&post.title),
                    ));
                }
                body.push_str("</ul>");
            }
        }
        body.push_str("</section>");
    }

    page_shell(config, theme, "Archive", &body)
}

/// Convert a zero-padded month number to its name
fn month_name(month: &str) -> &str {
    match month {
        "01" => "January",
        "02" => "February",
        "03" => "March",
        "04" => "April",
        "05" => "May",
        "06" => "June",
        "07" => "July",
        "08" => "August",
        "09" => "September",
        "10" => "October",
        "11" => "November",
        "12" => "December",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{build_archive, compute_stats};

    fn post(id: &str, date: &str, title: &str, tags: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            excerpt: title.to_lowercase(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content_html: None,
        }
    }

    #[test]
    fn test_list_query_omits_defaults() {
        let state = ListState::new();
        assert_eq!(list_query(&state, 1), "/");

        let mut state = ListState::new();
        state.set_search("rust tips");
        state.set_page(2);
        let query = list_query(&state, 2);
        assert!(query.contains("q=rust%20tips"));
        assert!(query.contains("page=2"));
        assert!(!query.contains("sort="));
    }

    #[test]
    fn test_home_page_escapes_and_links() {
        let config = SiteConfig::default();
        let posts = vec![post("a-post", "2024-01-01", "Tags & <Titles>", &["go"])];
        let stats = compute_stats(&posts);
        let state = ListState::new();
        let page = state.select(&posts);

        let html = home_page(&config, Theme::Light, &state, &page, &stats);
        assert!(html.contains("Tags &amp; &lt;Titles&gt;"));
        assert!(html.contains(r#"href="/posts/a-post""#));
        assert!(html.contains("1 posts found"));
    }

    #[test]
    fn test_post_page_injects_content_html_unescaped() {
        let config = SiteConfig::default();
        let mut detail = post("p", "2024-01-01", "P", &[]);
        detail.content_html = Some("<h1>Rendered</h1>".to_string());
        let html = post_page(&config, Theme::Dark, &detail, &[]);
        assert!(html.contains("<h1>Rendered</h1>"));
        assert!(html.contains(r#"<body class="dark">"#));
    }

    #[test]
    fn test_archive_page_orders_years_descending() {
        let config = SiteConfig::default();
        let posts = vec![
            post("new", "2024-01-01", "New", &[]),
            post("old", "2023-11-05", "Old", &[]),
        ];
        let archive = build_archive(&posts);
        let state = ArchiveState::from_years(["2023"]);
        let html = archive_page(&config, Theme::Light, &archive, &state);

        let pos_2024 = html.find("2024").unwrap();
        let pos_2023 = html.find(">2023 ").unwrap();
        assert!(pos_2024 < pos_2023);
        // Only the expanded year lists its months
        assert!(html.contains("November"));
        assert!(!html.contains("January</h3>"));
    }
}
