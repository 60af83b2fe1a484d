//! Fixed text templates: curated block substitutes and HTML document shells.
//!
//! The diagram and table substitutes replace one-off, hand-authored JSX
//! visualisations that have no generic markdown equivalent. They are emitted
//! verbatim by [`crate::pipeline::blocks`] with a blank line on each side.
//!
//! The two shells take `{{name}}` slots filled by plain string replacement;
//! callers escape values before substitution.

/// Substitute for the "with vs. without CLAUDE.md" comparison grid.
pub const COMPARISON_TABLE: &str = r#"
| 没有 CLAUDE.md | 有 CLAUDE.md |
|:--------------|:-------------|
| 用户: "写一个登录函数" | 用户: "写一个登录函数" |
| ↓ Claude: 直接开始写代码 | ↓ Claude: 先研究现有代码 |
| ↓ 输出: camelCase 命名、无错误处理 | ↓ Claude: 制定实现计划 |
| ↓ 用户: "改成 snake_case" | ↓ Claude: 获得确认后编码 |
| ↓ 用户: "加上错误处理" | ↓ 输出: 符合规范、完整错误处理 |
| ↓ 用户: "不要用 any" | |
| **反复修改 3-5 次** | **一次到位** |
"#;

/// Substitute for the research → plan → implement workflow diagram.
pub const WORKFLOW_DIAGRAM: &str = r#"
**三阶段工作流程**

```
┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
│  1. 研究阶段    │ →  │  2. 计划阶段    │ →  │  3. 实现阶段    │
│  (RESEARCH)     │    │  (PLAN)         │    │  (IMPLEMENT)    │
├─────────────────┤    ├─────────────────┤    ├─────────────────┤
│ • 检查现有代码  │    │ • 列出文件清单  │    │ • 遵循代码风格  │
│ • Glob/Grep搜索 │    │ • 说明方案      │    │ • 完整错误处理  │
│ • 理解架构      │    │ • 识别风险      │    │ • 同步写测试    │
└─────────────────┘    └─────────────────┘    └─────────────────┘
                              ↓
                    ⚠️ 等待用户确认再编码
```
"#;

/// Substitute for the CLAUDE.md module-architecture diagram.
pub const ARCHITECTURE_TABLE: &str = r#"
**CLAUDE.md 模块架构（按重要性排序）**

| 优先级 | 模块 | 说明 |
|:------|:-----|:-----|
| 🔴 高 | 核心工作流程 | 研究→计划→实现 |
| 🔴 高 | 质量红线 | 禁止清单+检查清单 |
| 🔴 高 | 编码标准 | 命名+函数规范 |
| 🔴 高 | 安全标准 | 输入验证+数据安全 |
| 🟡 中 | 技术栈适配 | 框架+依赖管理 |
| 🟡 中 | 测试规范 | 覆盖率+文件组织 |
| 🟡 中 | Git 规范 | 分支+提交格式 |
| 🔵 低 | 沟通风格 | 语言偏好+交互方式 |
"#;

/// Substitute for the project-over-global configuration hierarchy.
pub const HIERARCHY_DIAGRAM: &str = r#"
**配置文件优先级**

```
┌────────────────────────────────────────────┐
│  项目级配置（优先级最高）                  │
│  位置：项目根目录/CLAUDE.md                │
│  作用：当前项目特定规范                    │
└────────────────────────────────────────────┘
                     ↓ 覆盖
┌────────────────────────────────────────────┐
│  全局配置（优先级较低）                    │
│  位置：~/.claude/CLAUDE.md                 │
│  作用：所有项目通用偏好                    │
└────────────────────────────────────────────┘
```
"#;

/// Outer shell of the styled article. Slot: `{{content}}`.
pub const WECHAT_SHELL: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>微信公众号文章</title>
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
      line-height: 1.8;
      color: #333;
      max-width: 677px;
      margin: 0 auto;
      padding: 20px;
    }
  </style>
</head>
<body>
  <section style="max-width: 677px; margin: 0 auto;">
    {{content}}
  </section>
</body>
</html>"#;

/// Cover image document, 2.35:1.
///
/// Slots: `{{title}}`, `{{subtitle}}`, `{{gradient}}`, `{{icon}}`,
/// `{{badge}}`, `{{badge_bg}}`, `{{badge_color}}`.
pub const COVER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>封面图 - {{title}}</title>
  <style>
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      background: #111;
      font-family: -apple-system, BlinkMacSystemFont, "PingFang SC", "Microsoft YaHei", sans-serif;
    }
    .cover {
      width: 900px;
      height: 383px;
      background: {{gradient}};
      position: relative;
      overflow: hidden;
      display: flex;
      flex-direction: column;
      justify-content: center;
      align-items: center;
      text-align: center;
    }
    .cover::before {
      content: '';
      position: absolute;
      top: -50%;
      left: -50%;
      width: 200%;
      height: 200%;
      background:
        radial-gradient(circle at 20% 30%, rgba(255,255,255,0.18) 0%, transparent 35%),
        radial-gradient(circle at 85% 60%, rgba(255,255,255,0.12) 0%, transparent 30%),
        radial-gradient(circle at 70% 20%, rgba(0,0,0,0.1) 0%, transparent 25%);
    }
    .circle {
      position: absolute;
      border-radius: 50%;
      background: rgba(255,255,255,0.08);
    }
    .circle-1 { width: 300px; height: 300px; top: -100px; right: -80px; }
    .circle-2 { width: 200px; height: 200px; bottom: -60px; left: -60px; }
    .circle-3 { width: 120px; height: 120px; top: 60px; left: 80px; background: rgba(255,255,255,0.05); }
    .circle-4 { width: 80px; height: 80px; bottom: 40px; right: 120px; background: rgba(255,255,255,0.06); }
    .dot {
      position: absolute;
      width: 6px;
      height: 6px;
      background: rgba(255,255,255,0.4);
      border-radius: 50%;
    }
    .dot-1 { top: 40px; left: 150px; }
    .dot-2 { top: 80px; right: 200px; }
    .dot-3 { bottom: 100px; left: 250px; }
    .dot-4 { bottom: 60px; right: 300px; }
    .dot-5 { top: 150px; left: 50px; width: 4px; height: 4px; }
    .dot-6 { top: 200px; right: 80px; width: 4px; height: 4px; }
    .dot-7 { bottom: 150px; right: 180px; width: 5px; height: 5px; }
    .line {
      position: absolute;
      background: rgba(255,255,255,0.1);
    }
    .line-1 { width: 100px; height: 2px; top: 60px; right: 60px; transform: rotate(-20deg); }
    .line-2 { width: 60px; height: 2px; bottom: 80px; left: 40px; transform: rotate(15deg); }
    .line-3 { width: 80px; height: 2px; top: 120px; left: 120px; transform: rotate(-10deg); background: rgba(255,255,255,0.06); }
    .square {
      position: absolute;
      border: 2px solid rgba(255,255,255,0.1);
      transform: rotate(45deg);
    }
    .square-1 { width: 40px; height: 40px; top: 30px; left: 300px; }
    .square-2 { width: 25px; height: 25px; bottom: 50px; right: 220px; }
    .square-3 { width: 60px; height: 60px; bottom: 120px; left: 60px; border-color: rgba(255,255,255,0.06); }
    .code-decoration {
      position: absolute;
      font-family: 'SF Mono', 'Consolas', monospace;
      font-size: 11px;
      color: rgba(255,255,255,0.12);
      white-space: nowrap;
    }
    .code-1 { top: 25px; left: 30px; }
    .code-2 { bottom: 25px; left: 30px; }
    .code-3 { top: 30px; right: 30px; text-align: right; }
    .icon {
      font-size: 72px;
      margin-bottom: 20px;
      position: relative;
      z-index: 2;
      filter: drop-shadow(0 8px 24px rgba(0,0,0,0.3));
    }
    .badge {
      display: inline-block;
      padding: 4px 14px;
      margin-bottom: 14px;
      border-radius: 999px;
      font-size: 13px;
      font-weight: 600;
      background: {{badge_bg}};
      color: {{badge_color}};
      position: relative;
      z-index: 2;
    }
    .title {
      font-size: 42px;
      font-weight: 700;
      color: #fff;
      position: relative;
      z-index: 2;
      text-shadow: 0 4px 20px rgba(0,0,0,0.3);
      line-height: 1.2;
      max-width: 750px;
      padding: 0 40px;
    }
    .subtitle {
      font-size: 17px;
      color: rgba(255,255,255,0.8);
      margin-top: 14px;
      position: relative;
      z-index: 2;
      font-weight: 400;
    }
    .brand {
      position: absolute;
      bottom: 20px;
      right: 28px;
      color: rgba(255,255,255,0.5);
      font-size: 13px;
      font-weight: 500;
      z-index: 2;
    }
    .tip {
      position: fixed;
      bottom: 20px;
      left: 50%;
      transform: translateX(-50%);
      background: #333;
      color: #fff;
      padding: 12px 24px;
      border-radius: 8px;
      font-size: 14px;
    }
  </style>
</head>
<body>
  <div class="cover">
    <div class="circle circle-1"></div>
    <div class="circle circle-2"></div>
    <div class="circle circle-3"></div>
    <div class="circle circle-4"></div>
    <div class="dot dot-1"></div>
    <div class="dot dot-2"></div>
    <div class="dot dot-3"></div>
    <div class="dot dot-4"></div>
    <div class="dot dot-5"></div>
    <div class="dot dot-6"></div>
    <div class="dot dot-7"></div>
    <div class="line line-1"></div>
    <div class="line line-2"></div>
    <div class="line line-3"></div>
    <div class="square square-1"></div>
    <div class="square square-2"></div>
    <div class="square square-3"></div>
    <div class="code-decoration code-1"># CLAUDE.md</div>
    <div class="code-decoration code-2">workflow: research → plan → implement</div>
    <div class="code-decoration code-3">quality_gates: enabled</div>
    <div class="icon">{{icon}}</div>
    <div class="badge">{{badge}}</div>
    <h1 class="title">{{title}}</h1>
    <p class="subtitle">{{subtitle}}</p>
    <div class="brand">⚡ Claude Code Academy</div>
  </div>
  <div class="tip">💡 右键 → 检查 → 右键 .cover → Capture node screenshot</div>
</body>
</html>"#;
