//! Chatbot reply formatting.
//!
//! A reply is tokenised into [`Block`]s (fenced code, paragraphs, lists) and
//! then rendered into the small tag set the chat view injects as HTML:
//! `<p>`, `<ul>`, `<li>`, `<strong>` and the code-block container with its
//! copy button. All reply text is escaped, code bodies are never touched by
//! emphasis, and formatting already-formatted markup is not idempotent (the
//! tags get escaped).

mod parse;

/// Class of the element wrapping a rendered code block.
pub const CODE_CONTAINER_CLASS: &str = "code-block-container";
/// Class of the copy control inside a code block container.
pub const COPY_BUTTON_CLASS: &str = "copy-button";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
/// How long the copy control shows [`COPIED_LABEL`] before reverting.
pub const COPY_FEEDBACK_MS: u32 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLine {
    Item(Vec<Inline>),
    /// A non-list line that shares a blank-line segment with list items.
    Loose(Vec<Inline>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Code { language: String, body: String },
    Paragraph(Vec<Inline>),
    List(Vec<ListLine>),
}

/// Tokenise a raw reply. Never fails; unmatched syntax stays literal text.
pub fn parse_reply(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (idx, run) in parse::split_fences(text).into_iter().enumerate() {
        match run {
            parse::Run::Code { language, body } => blocks.push(Block::Code {
                language: language.to_string(),
                body: body.to_string(),
            }),
            // Any run after the first follows a closing fence on the same line.
            parse::Run::Text(run) => parse::text_blocks(run, idx == 0, &mut blocks),
        }
    }
    blocks
}

pub fn render(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Code { language, body } => render_code(language, body, &mut out),
            Block::Paragraph(spans) => {
                out.push_str("<p>");
                render_inlines(spans, &mut out);
                out.push_str("</p>");
            }
            Block::List(lines) => {
                out.push_str("<ul>");
                for (idx, line) in lines.iter().enumerate() {
                    if idx > 0 {
                        out.push('\n');
                    }
                    match line {
                        ListLine::Item(spans) => {
                            out.push_str("<li>");
                            render_inlines(spans, &mut out);
                            out.push_str("</li>");
                        }
                        ListLine::Loose(spans) => render_inlines(spans, &mut out),
                    }
                }
                out.push_str("</ul>");
            }
        }
    }
    out
}

/// Format a raw chatbot reply into markup.
pub fn format_reply(text: &str) -> String {
    let blocks = parse_reply(text);
    tracing::debug!(blocks = blocks.len(), "formatted chatbot reply");
    render(&blocks)
}

fn render_code(language: &str, body: &str, out: &mut String) {
    out.push_str("<div class=\"");
    out.push_str(CODE_CONTAINER_CLASS);
    out.push_str("\"><pre class=\"code-block\">");
    if language.is_empty() {
        out.push_str("<code>");
    } else {
        out.push_str("<code class=\"language-");
        escape_into(language, out);
        out.push_str("\">");
    }
    escape_into(body, out);
    out.push_str("</code></pre><button class=\"");
    out.push_str(COPY_BUTTON_CLASS);
    out.push_str("\" type=\"button\">");
    out.push_str(COPY_LABEL);
    out.push_str("</button></div>");
}

fn render_inlines(spans: &[Inline], out: &mut String) {
    for span in spans {
        match span {
            Inline::Text(text) => escape_into(text, out),
            Inline::Strong(text) => {
                out.push_str("<strong>");
                escape_into(text, out);
                out.push_str("</strong>");
            }
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code_block(language: &str, body: &str) -> String {
        let mut out = String::new();
        render_code(language, body, &mut out);
        out
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(format_reply(""), "");
        assert_eq!(format_reply(" \n\n \n"), "");
    }

    #[test]
    fn plain_text_is_one_paragraph() {
        assert_eq!(format_reply("Hello there, world."), "<p>Hello there, world.</p>");
        assert_eq!(format_reply("line one\nline two"), "<p>line one\nline two</p>");
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        assert_eq!(format_reply("first\n\n\n  second  \n\n"), "<p>first</p><p>second</p>");
    }

    #[test]
    fn fenced_code_is_not_paragraph_wrapped() {
        let out = format_reply("```js\nconsole.log(1)\n```");
        assert_eq!(
            out,
            "<div class=\"code-block-container\"><pre class=\"code-block\">\
             <code class=\"language-js\">console.log(1)</code></pre>\
             <button class=\"copy-button\" type=\"button\">Copy</button></div>"
        );
        assert!(!out.contains("<p>"));
    }

    #[test]
    fn code_without_language_has_no_hint() {
        assert_eq!(format_reply("```\nls -la\n```"), code_block("", "ls -la"));
    }

    #[test]
    fn text_around_code_becomes_separate_paragraphs() {
        let out = format_reply("Run this:\n```sh\ncargo run\n```\nThen check.");
        assert_eq!(
            out,
            format!("<p>Run this:</p>{}<p>Then check.</p>", code_block("sh", "cargo run"))
        );
    }

    #[test]
    fn marker_right_after_a_fence_is_not_a_bullet() {
        assert_eq!(
            format_reply("```\nx\n```- y"),
            format!("{}<p>- y</p>", code_block("", "x"))
        );
        assert_eq!(
            format_reply("```\nx\n```\n- y"),
            format!("{}<ul><li>y</li></ul>", code_block("", "x"))
        );
    }

    #[test]
    fn crlf_replies_render_clean_list_items() {
        assert_eq!(format_reply("- a\r\n- b"), "<ul><li>a</li>\n<li>b</li></ul>");
    }

    #[test]
    fn code_body_keeps_blank_lines() {
        let out = format_reply("```rs\nfn a() {}\n\nfn b() {}\n```");
        assert_eq!(out, code_block("rs", "fn a() {}\n\nfn b() {}"));
    }

    #[test]
    fn both_bold_markers_are_emphasised() {
        let out = format_reply("**a** and **b**");
        assert_eq!(out, "<p><strong>a</strong> and <strong>b</strong></p>");
        assert_eq!(out.matches("<strong>").count(), 2);
    }

    #[test]
    fn bold_is_not_applied_inside_code() {
        let out = format_reply("```\nlet s = \"**raw**\";\n```");
        assert!(!out.contains("<strong>"));
        assert!(out.contains("**raw**"));
    }

    #[test]
    fn consecutive_bullets_share_one_list() {
        let out = format_reply("- apples\n- pears\n- plums");
        assert_eq!(out, "<ul><li>apples</li>\n<li>pears</li>\n<li>plums</li></ul>");
        assert_eq!(out.matches("<ul>").count(), 1);
        assert_eq!(out.matches("<li>").count(), 3);
    }

    #[test]
    fn star_and_numbered_lines_are_items() {
        assert_eq!(
            format_reply("* **Fast**: yes\n2. second"),
            "<ul><li><strong>Fast</strong>: yes</li>\n<li>second</li></ul>"
        );
    }

    #[test]
    fn intro_line_stays_inside_the_list_segment() {
        assert_eq!(
            format_reply("Steps:\n1. build\n2. test\n\nDone."),
            "<ul>Steps:\n<li>build</li>\n<li>test</li></ul><p>Done.</p>"
        );
    }

    #[test]
    fn bold_line_is_not_mistaken_for_a_bullet() {
        assert_eq!(format_reply("**Note** this"), "<p><strong>Note</strong> this</p>");
    }

    #[test]
    fn unterminated_fence_stays_literal() {
        assert_eq!(format_reply("```js\nlet x = 1;"), "<p>```js\nlet x = 1;</p>");
    }

    #[test]
    fn unmatched_bold_stays_literal() {
        assert_eq!(format_reply("**open only"), "<p>**open only</p>");
    }

    #[test]
    fn reply_text_is_escaped() {
        assert_eq!(
            format_reply("<img src=x onerror=\"alert(1)\"> & co"),
            "<p>&lt;img src=x onerror=&quot;alert(1)&quot;&gt; &amp; co</p>"
        );
        assert_eq!(
            format_reply("```html\n<b>hi</b>\n```"),
            code_block("html", "<b>hi</b>")
        );
        assert!(code_block("html", "<b>hi</b>").contains("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn formatting_is_not_idempotent() {
        let once = format_reply("hello");
        let twice = format_reply(&once);
        assert_eq!(once, "<p>hello</p>");
        assert_eq!(twice, "<p>&lt;p&gt;hello&lt;/p&gt;</p>");
        assert_ne!(once, twice);
    }

    #[test]
    fn parse_exposes_block_structure() {
        let blocks = parse_reply("intro\n\n```py\nprint(1)\n```\n- x");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![Inline::Text("intro".into())]),
                Block::Code { language: "py".into(), body: "print(1)".into() },
                Block::List(vec![ListLine::Item(vec![Inline::Text("x".into())])]),
            ]
        );
    }
}
