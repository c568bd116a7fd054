use crate::controller::SearchResult;
use crate::presenter::{EmptyState, Messages, PostView};
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Renders the widget body for Glance: search form, banners, then posts.
pub fn render_widget(
    result: &SearchResult,
    query: Option<&str>,
    messages: &Messages,
    now: DateTime<Utc>,
) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"<p class="size-h5 color-subdue">{}</p>"#,
        text(messages.subtitle)
    ));
    body.push_str(&format!(
        r#"<form method="get"><input type="text" name="handle" placeholder="{}" value="{}"><button type="submit"{}>{}</button></form>"#,
        attr(messages.search_placeholder),
        attr(query.unwrap_or_default()),
        if result.is_loading() { " disabled" } else { "" },
        text(messages.search_button),
    ));

    if let Some(message) = result.status_message() {
        body.push_str(&format!(
            r#"<p class="color-primary status-message">{}</p>"#,
            text(message)
        ));
    }
    if let SearchResult::Ready(report) = result {
        if report.first_time {
            body.push_str(&format!(
                r#"<p class="color-subdue first-time">{}</p>"#,
                text(messages.first_time)
            ));
        }
    }
    if let Some(error) = result.error() {
        body.push_str(&format!(
            r#"<p class="color-negative error">{}</p>"#,
            text(error)
        ));
    }
    if result.is_loading() {
        body.push_str(r#"<div class="loading-indicator"></div>"#);
    }

    body.push_str(r#"<ul class="list list-gap-14">"#);
    for post in result.posts() {
        render_post(&mut body, &PostView::from_post(post, messages, now));
    }
    body.push_str("</ul>");

    if let Some(empty) = EmptyState::for_result(result) {
        body.push_str(&format!(
            r#"<p class="color-subdue empty-state">{}</p>"#,
            text(empty.text(messages))
        ));
    }

    body
}

fn render_post(body: &mut String, view: &PostView<'_>) {
    let post = view.post;
    body.push_str("<li class=\"post\">");
    body.push_str(&format!(
        r#"<a href="{profile}" target="_blank" rel="noreferrer"><img src="{avatar}" alt="{handle}" width="48" height="48"></a>"#,
        profile = attr(&view.profile_url),
        avatar = attr(&post.author_avatar_url),
        handle = attr(&post.author_handle),
    ));
    body.push_str(&format!(
        r#"<a class="color-highlight" href="{profile}" target="_blank" rel="noreferrer">{name}</a> <span class="color-subdue">@{handle} · {date}</span>"#,
        profile = attr(&view.profile_url),
        name = text(&post.author_display_name),
        handle = text(&post.author_handle),
        date = text(&view.date),
    ));
    if let Some(age) = &view.age {
        body.push_str(&format!(
            r#" <span class="color-subdue size-h6">({})</span>"#,
            text(age)
        ));
    }
    body.push_str(&format!(
        r#"<a href="{link}" target="_blank" rel="noreferrer"><p class="post-text" style="white-space: pre-wrap">{content}</p></a>"#,
        link = attr(&view.permalink),
        content = text(&post.text),
    ));
    body.push_str(&format!(
        r#"<p class="size-h6 color-subdue">💬 {} · 🔁 {} · ❤️ {} · 📊 {}"#,
        view.replies, view.reposts, view.likes, view.views
    ));
    if let Some(score) = &view.score_badge {
        body.push_str(&format!(
            r#" · <span class="color-negative hate-score">⚠ {}</span>"#,
            text(score)
        ));
    }
    body.push_str("</p>");
    if let Some(banner) = view.offensive_banner {
        body.push_str(&format!(
            r#"<p class="color-negative offensive-banner">⚠ {}</p>"#,
            text(banner)
        ));
    }
    body.push_str("</li>");
}
