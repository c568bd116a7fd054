use crate::controller::SearchResult;
use crate::post::Post;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const X_BASE: &str = "https://x.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Tr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tr" | "tr-tr" => Ok(Locale::Tr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected 'tr' or 'en')")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        })
    }
}

/// User-facing strings for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub subtitle: &'static str,
    pub search_failed: &'static str,
    pub offensive_banner: &'static str,
    pub never_searched: &'static str,
    pub nothing_found: &'static str,
    pub first_time: &'static str,
    pub search_placeholder: &'static str,
    pub search_button: &'static str,
    date_format: &'static str,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Tr => &TR,
            Locale::En => &EN,
        }
    }

    pub fn format_date(&self, at: DateTime<Utc>) -> String {
        at.format(self.date_format).to_string()
    }
}

static TR: Messages = Messages {
    subtitle: "Twitter Nefret Söylemi Analizi",
    search_failed: "Tweet'ler yüklenirken bir hata oluştu. Lütfen tekrar deneyin.",
    offensive_banner: "Bu tweet nefret söylemi içeriyor olabilir",
    never_searched: "Henüz tweet görüntülenmedi. Bir kullanıcı adı girin ve aramaya başlayın.",
    nothing_found: "Bu kullanıcı için tweet bulunamadı.",
    first_time: "Bu hesap ilk kez analiz ediliyor.",
    search_placeholder: "Twitter kullanıcı adını girin...",
    search_button: "Ara",
    date_format: "%d.%m.%Y",
};

static EN: Messages = Messages {
    subtitle: "Twitter hate speech analysis",
    search_failed: "Something went wrong while loading tweets. Please try again.",
    offensive_banner: "This tweet may contain hate speech",
    never_searched: "No tweets shown yet. Enter a username to start searching.",
    nothing_found: "No tweets found for this user.",
    first_time: "This account is being analyzed for the first time.",
    search_placeholder: "Enter a Twitter username...",
    search_button: "Search",
    date_format: "%m/%d/%Y",
};

/// Compact engagement count: `999`, `1.5K`, `2.4M`.
///
/// Rounds half up to one decimal using integer arithmetic, so values never
/// drift through float representation. Exact multiples keep their decimal
/// (`1.0K`), and `999_999` stays in the K range as `1000.0K`.
pub fn format_count(n: u64) -> String {
    let (divisor, suffix) = if n >= 1_000_000 {
        (1_000_000u128, "M")
    } else if n >= 1_000 {
        (1_000u128, "K")
    } else {
        return n.to_string();
    };

    let tenths = (u128::from(n) * 10 + divisor / 2) / divisor;
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}

pub fn profile_url(handle: &str) -> String {
    format!("{X_BASE}/{handle}")
}

pub fn permalink(handle: &str, post_id: &str) -> String {
    format!("{X_BASE}/{handle}/status/{post_id}")
}

/// Renders a hate score the way a JavaScript number prints: `5`, `0.75`.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{}", score as i64)
    } else {
        score.to_string()
    }
}

/// Coarse age such as `3h` or `2days`, truncated to its largest unit.
pub fn format_age(age: chrono::Duration) -> String {
    let secs = age.num_seconds().max(0) as u64;
    let unit = match secs {
        0..=59 => 1,
        60..=3_599 => 60,
        3_600..=86_399 => 3_600,
        _ => 86_400,
    };
    humantime::format_duration(Duration::from_secs(secs - secs % unit)).to_string()
}

/// Which empty-state text, if any, replaces the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NeverSearched,
    NothingFound,
}

impl EmptyState {
    /// Shown only when there are no posts, nothing is loading, there is no
    /// error and the backend is not scanning.
    pub fn for_result(result: &SearchResult) -> Option<EmptyState> {
        if !result.posts().is_empty()
            || result.is_loading()
            || result.error().is_some()
            || result.is_scanning()
        {
            return None;
        }
        match result {
            SearchResult::Idle => Some(EmptyState::NeverSearched),
            _ => Some(EmptyState::NothingFound),
        }
    }

    pub fn text(self, messages: &Messages) -> &'static str {
        match self {
            EmptyState::NeverSearched => messages.never_searched,
            EmptyState::NothingFound => messages.nothing_found,
        }
    }
}

/// Display-ready fields for one post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView<'a> {
    pub post: &'a Post,
    pub profile_url: String,
    pub permalink: String,
    pub replies: String,
    pub reposts: String,
    pub likes: String,
    pub views: String,
    /// Present iff `hate_score > 0`; independent of `offensive_banner`.
    pub score_badge: Option<String>,
    pub offensive_banner: Option<&'static str>,
    pub date: String,
    pub age: Option<String>,
}

impl<'a> PostView<'a> {
    pub fn from_post(post: &'a Post, messages: &Messages, now: DateTime<Utc>) -> Self {
        let created = post.created_at_utc();
        PostView {
            post,
            profile_url: profile_url(&post.author_handle),
            permalink: permalink(&post.author_handle, &post.post_id),
            replies: format_count(post.reply_count),
            reposts: format_count(post.repost_count),
            likes: format_count(post.like_count),
            views: format_count(post.view_count),
            score_badge: (post.hate_score > 0.0).then(|| format_score(post.hate_score)),
            offensive_banner: post.is_offensive.then_some(messages.offensive_banner),
            date: created
                .map(|at| messages.format_date(at))
                .unwrap_or_else(|| post.created_at.clone()),
            age: created.map(|at| format_age(now - at)),
        }
    }
}
