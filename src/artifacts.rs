//! Derived artifacts: promotional summary and cover document.
//!
//! Both are pure functions of the article title (and, for the cover, its
//! description). A title is classified by the first keyword it contains, in
//! the fixed order of the lookup tables below; no match selects the default.

use crate::pipeline::wechat::escape_html;
use crate::templates::COVER_TEMPLATE;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_SLOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

/// Subtitle used on the cover when the article has no description.
pub const DEFAULT_SUBTITLE: &str = "Claude Code 配置指南";

const SUMMARY_TEMPLATES: &[(&str, &str)] = &[
    (
        "为什么",
        "同样的需求，为什么别人一次搞定，你却要改5遍？90%的人不知道，一个配置文件就能让Claude Code的输出质量提升10倍。",
    ),
    (
        "工作流",
        "还在让AI上来就写代码？难怪总是返工！掌握这套「研究→计划→实现」三阶段工作流，让Claude Code像资深工程师一样思考。",
    ),
    (
        "质量",
        "代码写完一堆bug？类型全是any？这份质量红线清单，帮你堵住Claude Code偷懒的每一个漏洞。",
    ),
    (
        "编码",
        "函数超过100行、命名乱七八糟、错误处理全靠猜...这些坏习惯，一份编码规范就能根治。",
    ),
    (
        "安全",
        "SQL注入、硬编码密钥、不验证输入...这些安全漏洞你的AI助手可能正在写。这份安全清单必须收藏。",
    ),
];

const DEFAULT_SUMMARY: &str = "用好Claude Code的秘诀，不是提示词写得多花哨，而是这个99%的人都忽略的配置文件。5分钟配置，效率提升10倍。";

/// Visual theme of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeProfile {
    pub gradient: &'static str,
    pub icon: &'static str,
    pub badge: &'static str,
    pub badge_bg: &'static str,
    pub badge_color: &'static str,
}

const THEMES: &[(&str, ThemeProfile)] = &[
    (
        "为什么",
        ThemeProfile {
            gradient: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            icon: "📋",
            badge: "Claude Code 配置指南",
            badge_bg: "rgba(102, 126, 234, 0.2)",
            badge_color: "#a5b4fc",
        },
    ),
    (
        "工作流",
        ThemeProfile {
            gradient: "linear-gradient(135deg, #059669 0%, #34d399 100%)",
            icon: "🔄",
            badge: "效率提升",
            badge_bg: "rgba(52, 211, 153, 0.2)",
            badge_color: "#6ee7b7",
        },
    ),
    (
        "质量",
        ThemeProfile {
            gradient: "linear-gradient(135deg, #dc2626 0%, #f97316 100%)",
            icon: "🛡️",
            badge: "代码质量",
            badge_bg: "rgba(239, 68, 68, 0.2)",
            badge_color: "#fca5a5",
        },
    ),
    (
        "编码",
        ThemeProfile {
            gradient: "linear-gradient(135deg, #0ea5e9 0%, #22d3ee 100%)",
            icon: "💻",
            badge: "编码规范",
            badge_bg: "rgba(14, 165, 233, 0.2)",
            badge_color: "#7dd3fc",
        },
    ),
    (
        "安全",
        ThemeProfile {
            gradient: "linear-gradient(135deg, #f59e0b 0%, #fbbf24 100%)",
            icon: "🔒",
            badge: "安全最佳实践",
            badge_bg: "rgba(245, 158, 11, 0.2)",
            badge_color: "#fcd34d",
        },
    ),
];

const DEFAULT_THEME: ThemeProfile = ThemeProfile {
    gradient: "linear-gradient(135deg, #8b5cf6 0%, #d946ef 100%)",
    icon: "⚡",
    badge: "Claude Code",
    badge_bg: "rgba(139, 92, 246, 0.2)",
    badge_color: "#c4b5fd",
};

/// Promotional summary for an article titled `title`.
pub fn generate_summary(title: &str) -> &'static str {
    first_keyword_match(SUMMARY_TEMPLATES, title)
        .copied()
        .unwrap_or(DEFAULT_SUMMARY)
}

/// Cover theme for an article titled `title`.
pub fn cover_theme(title: &str) -> &'static ThemeProfile {
    first_keyword_match(THEMES, title).unwrap_or(&DEFAULT_THEME)
}

/// Standalone cover document.
///
/// Title and subtitle are escaped; the subtitle falls back to
/// [`DEFAULT_SUBTITLE`] when `description` is empty.
pub fn generate_cover(title: &str, description: &str) -> String {
    let theme = cover_theme(title);
    let subtitle = if description.trim().is_empty() {
        DEFAULT_SUBTITLE
    } else {
        description
    };

    let title = escape_html(title);
    let subtitle = escape_html(subtitle);

    // One pass over the template: substituted values are never rescanned.
    RE_SLOT
        .replace_all(COVER_TEMPLATE, |caps: &Captures<'_>| {
            match &caps[1] {
                "title" => title.as_str(),
                "subtitle" => subtitle.as_str(),
                "gradient" => theme.gradient,
                "icon" => theme.icon,
                "badge" => theme.badge,
                "badge_bg" => theme.badge_bg,
                "badge_color" => theme.badge_color,
                _ => &caps[0],
            }
            .to_string()
        })
        .into_owned()
}

fn first_keyword_match<T>(table: &'static [(&'static str, T)], title: &str) -> Option<&'static T> {
    table
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, value)| value)
}
