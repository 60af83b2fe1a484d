//! Presentational-block rewriting: replace JSX layout constructs with their
//! portable markdown equivalents.
//!
//! ## Why a closed catalogue?
//!
//! The articles use a handful of layout constructs: `<Callout>`, `<Steps>`,
//! and a few hand-authored `<div style={{…}}>` visualisations. Each one is
//! recognised by the *shape* of its markup and rewritten independently; there
//! is no JSX parser and no plugin registry. [`BlockKind::CATALOGUE`] lists the
//! recognisers from most to least specific, and [`rewrite_blocks`] folds the
//! text through them in that order, so a region claimed by an earlier kind is
//! already gone when a looser one runs.
//!
//! When a curated diagram's signature no longer matches (say its closing
//! phrase was reworded), the block is left to [`BlockKind::GenericWrapper`],
//! which strips the styling but keeps the text.

use crate::templates;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One kind of presentational block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// `<Callout type="…">` → quoted block with emoji and label.
    Callout,
    /// `<Steps>` wrapper → markers removed, inner headings kept.
    StepSequence,
    /// Two-column grid ending in "一次到位" → comparison table.
    ComparisonGrid,
    /// Research-to-confirmation workflow → fenced three-stage diagram.
    WorkflowDiagram,
    /// Nested module boxes ending in "沟通风格" → priority table.
    ArchitectureTable,
    /// Column of project/global config boxes → fenced override diagram.
    HierarchyDiagram,
    /// Anything else carrying inline styling → text only.
    GenericWrapper,
}

impl BlockKind {
    /// All recognisers in the order they are applied.
    pub const CATALOGUE: [BlockKind; 7] = [
        BlockKind::Callout,
        BlockKind::StepSequence,
        BlockKind::ComparisonGrid,
        BlockKind::WorkflowDiagram,
        BlockKind::ArchitectureTable,
        BlockKind::HierarchyDiagram,
        BlockKind::GenericWrapper,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Callout => "callout",
            BlockKind::StepSequence => "step_sequence",
            BlockKind::ComparisonGrid => "comparison_grid",
            BlockKind::WorkflowDiagram => "workflow_diagram",
            BlockKind::ArchitectureTable => "architecture_table",
            BlockKind::HierarchyDiagram => "hierarchy_diagram",
            BlockKind::GenericWrapper => "generic_wrapper",
        }
    }

    /// Rewrite every occurrence of this kind in `text`.
    ///
    /// Returns the new text and the number of regions rewritten.
    pub fn rewrite(self, text: &str) -> (String, usize) {
        match self {
            BlockKind::Callout => rewrite_callouts(text),
            BlockKind::StepSequence => rewrite_steps(text),
            BlockKind::ComparisonGrid => {
                replace_curated(&RE_COMPARISON, text, templates::COMPARISON_TABLE)
            }
            BlockKind::WorkflowDiagram => {
                replace_curated(&RE_WORKFLOW, text, templates::WORKFLOW_DIAGRAM)
            }
            BlockKind::ArchitectureTable => {
                replace_curated(&RE_ARCHITECTURE, text, templates::ARCHITECTURE_TABLE)
            }
            BlockKind::HierarchyDiagram => {
                replace_curated(&RE_HIERARCHY, text, templates::HIERARCHY_DIAGRAM)
            }
            BlockKind::GenericWrapper => rewrite_generic(text),
        }
    }
}

/// Per-kind match counts for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    pub callouts: usize,
    pub step_sequences: usize,
    pub comparison_grids: usize,
    pub workflow_diagrams: usize,
    pub architecture_tables: usize,
    pub hierarchy_diagrams: usize,
    pub generic_wrappers: usize,
}

impl BlockStats {
    fn record(&mut self, kind: BlockKind, count: usize) {
        let slot = match kind {
            BlockKind::Callout => &mut self.callouts,
            BlockKind::StepSequence => &mut self.step_sequences,
            BlockKind::ComparisonGrid => &mut self.comparison_grids,
            BlockKind::WorkflowDiagram => &mut self.workflow_diagrams,
            BlockKind::ArchitectureTable => &mut self.architecture_tables,
            BlockKind::HierarchyDiagram => &mut self.hierarchy_diagrams,
            BlockKind::GenericWrapper => &mut self.generic_wrappers,
        };
        *slot += count;
    }
}

/// Run the whole catalogue over `text`, in priority order.
pub fn rewrite_blocks(text: &str) -> (String, BlockStats) {
    let mut stats = BlockStats::default();
    let mut current = text.to_string();
    for kind in BlockKind::CATALOGUE {
        let (next, count) = kind.rewrite(&current);
        if count > 0 {
            debug!("Rewrote {} {} block(s)", count, kind.name());
        }
        stats.record(kind, count);
        current = next;
    }
    (current, stats)
}

// ── Callout ──────────────────────────────────────────────────────────────────

/// Callout flavour, selected by the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Info,
    Warning,
    Error,
    Danger,
    Success,
    Default,
}

impl CalloutKind {
    /// Unknown or missing types map to [`CalloutKind::Default`].
    pub fn from_type(t: &str) -> Self {
        match t.trim().to_ascii_lowercase().as_str() {
            "info" => CalloutKind::Info,
            "warning" => CalloutKind::Warning,
            "error" => CalloutKind::Error,
            "danger" => CalloutKind::Danger,
            "success" => CalloutKind::Success,
            _ => CalloutKind::Default,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CalloutKind::Info => "💡",
            CalloutKind::Warning => "⚠️",
            CalloutKind::Error | CalloutKind::Danger => "🚫",
            CalloutKind::Success => "✅",
            CalloutKind::Default => "📌",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CalloutKind::Info => "提示",
            CalloutKind::Warning => "注意",
            CalloutKind::Error | CalloutKind::Danger => "警告",
            CalloutKind::Success => "成功",
            CalloutKind::Default => "备注",
        }
    }
}

static RE_CALLOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<Callout\b([^>]*)>\s*(.*?)\s*</Callout>").unwrap());

static RE_TYPE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\btype=["'](\w+)["']"#).unwrap());

fn rewrite_callouts(text: &str) -> (String, usize) {
    let mut count = 0;
    let out = RE_CALLOUT.replace_all(text, |caps: &Captures<'_>| {
        count += 1;
        let kind = RE_TYPE_ATTR
            .captures(&caps[1])
            .map_or(CalloutKind::Default, |t| CalloutKind::from_type(&t[1]));
        render_callout(kind, &caps[2])
    });
    (out.into_owned(), count)
}

fn render_callout(kind: CalloutKind, inner: &str) -> String {
    let mut out = format!("> {} **{}**\n>", kind.emoji(), kind.label());
    for line in dedent(inner.trim()).lines() {
        out.push('\n');
        if line.trim().is_empty() {
            out.push('>');
        } else {
            out.push_str("> ");
            out.push_str(line.trim_end());
        }
    }
    out
}

/// Remove the indentation common to every non-blank line after the first.
///
/// The first line has already been trimmed by the callout pattern, so only the
/// continuation lines carry JSX nesting indentation.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    if indent == 0 {
        return text.to_string();
    }
    text.lines()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 || l.trim().is_empty() {
                l.trim_start_matches([' ', '\t'])
            } else {
                &l[indent..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Steps ────────────────────────────────────────────────────────────────────

static RE_STEPS_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<Steps>\s*").unwrap());
static RE_STEPS_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*</Steps>").unwrap());

fn rewrite_steps(text: &str) -> (String, usize) {
    let count = RE_STEPS_OPEN.find_iter(text).count();
    let s = RE_STEPS_OPEN.replace_all(text, "");
    let s = RE_STEPS_CLOSE.replace_all(&s, "");
    (s.into_owned(), count)
}

// ── Curated diagrams ─────────────────────────────────────────────────────────

static RE_COMPARISON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<div style=\{\{\s*display:\s*['"]grid['"],\s*gridTemplateColumns.*?一次到位.*?</p>\s*</div>\s*</div>\s*</div>"#,
    )
    .unwrap()
});

static RE_WORKFLOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<div style=\{\{[^}]*margin:\s*['"]24px 0['"][^}]*padding.*?1\.\s*研究阶段.*?等待用户确认再编码.*?</div>\s*</div>"#,
    )
    .unwrap()
});

static RE_ARCHITECTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<div style=\{\{[^}]*margin:\s*['"]24px 0['"][^}]*\}\}>\s*<div style=\{\{[^}]*marginBottom.*?沟通风格.*?</div>\s*</div>\s*</div>\s*</div>\s*</div>"#,
    )
    .unwrap()
});

static RE_HIERARCHY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<div style=\{\{[^}]*margin:[^}]*\}\}>\s*<div style=\{\{[^}]*display:\s*['"]flex['"][^}]*flexDirection:\s*['"]column['"].*?项目级配置.*?全局配置.*?</div>\s*</div>"#,
    )
    .unwrap()
});

fn replace_curated(re: &Regex, text: &str, substitute: &str) -> (String, usize) {
    let count = re.find_iter(text).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (re.replace_all(text, substitute).into_owned(), count)
}

// ── Generic wrappers ─────────────────────────────────────────────────────────

static RE_FIGURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<div[^>]*>\s*(<img[^>]*>)\s*<p[^>]*>([^<]*)</p>\s*</div>").unwrap()
});
static RE_IMG_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bsrc=["']([^"']+)["']"#).unwrap());
static RE_IMG_ALT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\balt=["']([^"']+)["']"#).unwrap());

static RE_DIV_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<div(?:\s+style=\{\{[^}]*\}\})?\s*>\s*").unwrap());
static RE_DIV_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</div>").unwrap());
static RE_STYLED_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<h[1-6]\s+style=\{\{[^}]*\}\}>([^<]*)</h[1-6]>").unwrap()
});
static RE_STYLED_P: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p(?:\s+style=\{\{[^}]*\}\})?\s*>([^<]*)</p>").unwrap());
static RE_STYLED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<span\s+style=\{\{[^}]*\}\}>([^<]*)</span>").unwrap());
static RE_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br\s*/?>").unwrap());

fn rewrite_generic(text: &str) -> (String, usize) {
    let mut count = 0;

    // Image + caption pairs first: the div pass below would orphan the caption.
    let s = RE_FIGURE.replace_all(text, |caps: &Captures<'_>| {
        count += 1;
        let img = &caps[1];
        let caption = caps[2].trim();
        let src = RE_IMG_SRC
            .captures(img)
            .and_then(|c| c.get(1))
            .map_or("", |m| m.as_str());
        let alt = RE_IMG_ALT
            .captures(img)
            .and_then(|c| c.get(1))
            .map_or(caption, |m| m.as_str());
        format!("![{alt}]({src})\n\n*{caption}*")
    });

    count += RE_DIV_OPEN.find_iter(&s).count();
    let s = RE_DIV_OPEN.replace_all(&s, "");
    let s = RE_DIV_CLOSE.replace_all(&s, "");
    let s = RE_BR.replace_all(&s, "\n");

    count += RE_STYLED_HEADING.find_iter(&s).count();
    let s = RE_STYLED_HEADING.replace_all(&s, "**$1**\n");

    count += RE_STYLED_P.find_iter(&s).count();
    let s = RE_STYLED_P.replace_all(&s, "$1");

    count += RE_STYLED_SPAN.find_iter(&s).count();
    let s = RE_STYLED_SPAN.replace_all(&s, "$1");

    (s.into_owned(), count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKFLOW_BLOCK: &str = r#"<div style={{ margin: '24px 0', padding: '20px', background: '#f8fafc' }}>
  <div style={{ display: 'flex', gap: '12px' }}>
    <div style={{ flex: 1 }}>
      <h4 style={{ margin: 0 }}>1. 研究阶段</h4>
      <p style={{ fontSize: '13px' }}>检查现有代码</p>
    </div>
  </div>
  <div style={{ textAlign: 'center' }}>
    <p style={{ color: '#b45309' }}>等待用户确认再编码</p>
  </div>
</div>"#;

    #[test]
    fn catalogue_order_is_fixed() {
        assert_eq!(BlockKind::CATALOGUE[0], BlockKind::Callout);
        assert_eq!(BlockKind::CATALOGUE[6], BlockKind::GenericWrapper);
    }

    #[test]
    fn warning_callout_maps_to_label_and_emoji() {
        let input = "<Callout type=\"warning\">\n  不要提交密钥。\n  请使用环境变量。\n</Callout>";
        let (out, n) = rewrite_callouts(input);
        assert_eq!(n, 1);
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("> ⚠️"), "got: {first}");
        assert!(first.contains("**注意**"));
        assert_eq!(
            out,
            "> ⚠️ **注意**\n>\n> 不要提交密钥。\n> 请使用环境变量。"
        );
    }

    #[test]
    fn unknown_callout_type_uses_default() {
        let (out, _) = rewrite_callouts("<Callout type='tip'>x</Callout>");
        assert!(out.starts_with("> 📌 **备注**"));
        let (out, _) = rewrite_callouts("<Callout>y</Callout>");
        assert!(out.starts_with("> 📌 **备注**"));
    }

    #[test]
    fn callout_blank_lines_stay_quoted() {
        let (out, _) = rewrite_callouts("<Callout type=\"info\">a\n\nb</Callout>");
        assert_eq!(out, "> 💡 **提示**\n>\n> a\n>\n> b");
    }

    #[test]
    fn callout_kind_table() {
        assert_eq!(CalloutKind::from_type("danger").label(), "警告");
        assert_eq!(CalloutKind::from_type("error").emoji(), "🚫");
        assert_eq!(CalloutKind::from_type("success").emoji(), "✅");
        assert_eq!(CalloutKind::from_type("INFO"), CalloutKind::Info);
    }

    #[test]
    fn steps_markers_removed() {
        let input = "Intro\n\n<Steps>\n### 第一步\n安装\n\n### 第二步\n配置\n</Steps>\n\nEnd";
        let (out, n) = rewrite_steps(input);
        assert_eq!(n, 1);
        assert_eq!(out, "Intro\n\n### 第一步\n安装\n\n### 第二步\n配置\n\nEnd");
    }

    #[test]
    fn workflow_diagram_is_substituted() {
        let (out, stats) = rewrite_blocks(WORKFLOW_BLOCK);
        assert_eq!(stats.workflow_diagrams, 1);
        assert!(out.contains("三阶段工作流程"));
        assert!(out.contains("(RESEARCH)"));
        assert!(!out.contains("<div"));
    }

    #[test]
    fn workflow_without_closing_phrase_degrades() {
        let degraded = WORKFLOW_BLOCK.replace("等待用户确认再编码", "请先确认方案");
        let (out, stats) = rewrite_blocks(&degraded);
        assert_eq!(stats.workflow_diagrams, 0);
        assert!(stats.generic_wrappers > 0);
        assert!(!out.contains("<div"));
        assert!(!out.contains("</div>"));
        assert!(!out.contains("style="));
        assert!(!out.contains("三阶段工作流程"));
        assert!(!out.contains('┌'));
        assert!(out.contains("**1. 研究阶段**"));
        assert!(out.contains("检查现有代码"));
        assert!(out.contains("请先确认方案"));
    }

    #[test]
    fn comparison_grid_is_substituted() {
        let input = r#"<div style={{ display: 'grid', gridTemplateColumns: '1fr 1fr', gap: '16px' }}>
  <div style={{ padding: '16px' }}>
    <p style={{ fontWeight: 'bold' }}>反复修改</p>
  </div>
  <div style={{ padding: '16px' }}>
    <div style={{ color: 'green' }}>
      <p style={{ fontWeight: 'bold' }}>一次到位</p>
    </div>
  </div>
</div>"#;
        let (out, stats) = rewrite_blocks(input);
        assert_eq!(stats.comparison_grids, 1);
        assert!(out.contains("| 没有 CLAUDE.md | 有 CLAUDE.md |"));
    }

    #[test]
    fn architecture_table_is_substituted() {
        let input = r#"<div style={{ margin: '24px 0' }}>
  <div style={{ marginBottom: '8px' }}>
    <div style={{ display: 'flex' }}>
      <div style={{ flex: 1 }}>
        <div>核心工作流程</div>
        <div>沟通风格</div>
      </div>
    </div>
  </div>
</div>"#;
        let (out, stats) = rewrite_blocks(input);
        assert_eq!(stats.architecture_tables, 1);
        assert!(out.contains("| 🔵 低 | 沟通风格 | 语言偏好+交互方式 |"));
    }

    #[test]
    fn hierarchy_diagram_is_substituted() {
        let input = r#"<div style={{ margin: '20px 0' }}>
  <div style={{ display: 'flex', flexDirection: 'column', gap: '8px' }}>
    <div style={{ padding: '12px' }}>项目级配置</div>
    <div style={{ padding: '12px' }}>全局配置</div>
  </div>
</div>"#;
        let (out, stats) = rewrite_blocks(input);
        assert_eq!(stats.hierarchy_diagrams, 1);
        assert!(out.contains("配置文件优先级"));
        assert!(out.contains("↓ 覆盖"));
    }

    #[test]
    fn figure_becomes_image_and_caption() {
        let input = r#"<div style={{ textAlign: 'center' }}>
  <img src="/images/flow.png" alt="流程图" />
  <p style={{ color: '#666' }}>图 1：工作流程</p>
</div>"#;
        let (out, _) = rewrite_generic(input);
        assert_eq!(out, "![流程图](/images/flow.png)\n\n*图 1：工作流程*");
    }

    #[test]
    fn figure_alt_falls_back_to_caption() {
        let input = r#"<div><img src="/a.png"/><p>说明</p></div>"#;
        let (out, _) = rewrite_generic(input);
        assert_eq!(out, "![说明](/a.png)\n\n*说明*");
    }

    #[test]
    fn generic_strips_styles_and_breaks() {
        let input = "<h4 style={{ color: 'red' }}>标题</h4>\n<p>一行<br/>两行</p> <span style={{ fontWeight: 600 }}>强调</span>";
        let (out, n) = rewrite_generic(input);
        assert_eq!(out, "**标题**\n\n一行\n两行 强调");
        assert_eq!(n, 3);
    }

    #[test]
    fn plain_text_passes_untouched() {
        let input = "# Title\n\nJust *markdown* here.\n";
        let (out, stats) = rewrite_blocks(input);
        assert_eq!(out, input);
        assert_eq!(stats, BlockStats::default());
    }
}
