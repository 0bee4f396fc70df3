use std::sync::LazyLock;

use regex::Regex;

use super::{Block, Inline, ListLine};

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_]*)\n(.*?)```").expect("fence pattern is valid")
});

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong pattern is valid"));

static LIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[*-]|[0-9]+\.) (.+)$").expect("list pattern is valid"));

/// Stage 1: cut the reply into text runs and fenced code blocks. Unterminated
/// fences never match and stay inside the surrounding text run.
pub(super) fn split_fences(text: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    for caps in FENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            runs.push(Run::Text(&text[cursor..whole.start()]));
        }
        runs.push(Run::Code {
            language: caps.get(1).map_or("", |m| m.as_str()),
            body: caps.get(2).map_or("", |m| m.as_str()).trim(),
        });
        cursor = whole.end();
    }
    if cursor < text.len() {
        runs.push(Run::Text(&text[cursor..]));
    }
    runs
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Run<'a> {
    Text(&'a str),
    Code { language: &'a str, body: &'a str },
}

/// Stages 2-4 for one text run: blank-line segmentation, list detection and
/// inline emphasis. Code never reaches this function. `at_line_start` is
/// false for a run that continues the line a closing fence ended on.
pub(super) fn text_blocks(run: &str, at_line_start: bool, out: &mut Vec<Block>) {
    for (seg_idx, raw) in run.split("\n\n").enumerate() {
        let segment = raw.trim();
        if segment.is_empty() {
            continue;
        }

        // A line only counts as a list line when it started the raw line; the
        // segment trim must not promote an indented line.
        let lead = &raw[..raw.len() - raw.trim_start().len()];
        let starts_line = if lead.is_empty() {
            seg_idx > 0 || at_line_start
        } else {
            lead.ends_with('\n')
        };

        let lines: Vec<ListLine> = segment
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate()
            .map(|(idx, line)| match LIST_LINE.captures(line) {
                Some(caps) if idx > 0 || starts_line => {
                    ListLine::Item(inlines(caps.get(1).map_or("", |m| m.as_str())))
                }
                _ => ListLine::Loose(inlines(line)),
            })
            .collect();

        if lines.iter().any(|l| matches!(l, ListLine::Item(_))) {
            out.push(Block::List(lines));
        } else {
            out.push(Block::Paragraph(inlines(segment)));
        }
    }
}

/// `**X**` pairs never span a newline.
pub(super) fn inlines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in STRONG.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            spans.push(Inline::Text(text[cursor..whole.start()].to_string()));
        }
        spans.push(Inline::Strong(caps.get(1).map_or("", |m| m.as_str()).to_string()));
        cursor = whole.end();
    }
    if cursor < text.len() {
        spans.push(Inline::Text(text[cursor..].to_string()));
    }
    spans
}
