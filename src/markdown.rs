//! Rendering for the constrained markdown dialect used by assistant replies.
//!
//! Parsing is a single pass over lines producing a node list, followed by a
//! separate render pass. This keeps the ordered/unordered list handling an
//! explicit parser state instead of an artifact of chained rewrites, and it
//! lets the TUI project the same nodes to styled text.
//!
//! Malformed input never fails: unmatched markers fall through as literal
//! text. Raw `&`, `<`, and `>` in text, code, and math content are escaped
//! before the fragment is emitted.

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Em(Vec<Inline>),
    Code(String),
    Math(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    ListItem { ordered: bool, content: Vec<Inline> },
    MathBlock(String),
    Paragraph(Vec<Inline>),
}

/// Parse input into a block list. Never fails.
pub fn parse(input: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut lines = input.split('\n');

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("\\[") {
            // Block math runs until the closing delimiter, possibly on a
            // later line. An unclosed block falls back to literal text.
            if let Some(expr) = rest.strip_suffix("\\]") {
                blocks.push(Block::MathBlock(expr.to_string()));
                continue;
            }
            let mut buffered = vec![rest.to_string()];
            let mut closed = false;
            for continuation in lines.by_ref() {
                if let Some(expr) = continuation.trim_end().strip_suffix("\\]") {
                    buffered.push(expr.to_string());
                    closed = true;
                    break;
                }
                buffered.push(continuation.to_string());
            }
            if closed {
                blocks.push(Block::MathBlock(buffered.join("\n")));
            } else {
                blocks.push(Block::Paragraph(vec![Inline::Text(format!(
                    "\\[{}",
                    buffered.join("\n")
                ))]));
            }
            continue;
        }

        blocks.push(parse_line(line));
    }

    blocks
}

fn parse_line(line: &str) -> Block {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return Block::Heading {
                level: hashes as u8,
                content: parse_inlines(rest),
            };
        }
    }

    if let Some(rest) = line.strip_prefix("* ") {
        return Block::ListItem {
            ordered: false,
            content: parse_inlines(rest),
        };
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Block::ListItem {
                ordered: true,
                content: parse_inlines(rest),
            };
        }
    }

    Block::Paragraph(parse_inlines(line))
}

/// Scan a line for inline markers. Strong and emphasis contents are parsed
/// recursively; code and math contents stay literal.
fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut buffer = String::new();
    let bytes = text.as_bytes();
    let mut i = 0;

    let mut flush = |buffer: &mut String, out: &mut Vec<Inline>| {
        if !buffer.is_empty() {
            out.push(Inline::Text(std::mem::take(buffer)));
        }
    };

    while i < bytes.len() {
        let rest = &text[i..];

        if rest.starts_with("**") || rest.starts_with("__") {
            let marker = &rest[..2];
            if let Some(end) = rest[2..].find(marker) {
                if end > 0 {
                    flush(&mut buffer, &mut out);
                    out.push(Inline::Strong(parse_inlines(&rest[2..2 + end])));
                    i += end + 4;
                    continue;
                }
            }
        }

        if rest.starts_with('*') || rest.starts_with('_') {
            let marker = bytes[i] as char;
            if let Some(end) = rest[1..].find(marker) {
                if end > 0 {
                    flush(&mut buffer, &mut out);
                    out.push(Inline::Em(parse_inlines(&rest[1..1 + end])));
                    i += end + 2;
                    continue;
                }
            }
        }

        if rest.starts_with('`') {
            if let Some(end) = rest[1..].find('`') {
                flush(&mut buffer, &mut out);
                out.push(Inline::Code(rest[1..1 + end].to_string()));
                i += end + 2;
                continue;
            }
        }

        if rest.starts_with("\\(") {
            if let Some(end) = rest[2..].find("\\)") {
                flush(&mut buffer, &mut out);
                out.push(Inline::Math(rest[2..2 + end].to_string()));
                i += end + 4;
                continue;
            }
        }

        let ch = rest.chars().next().unwrap_or('\0');
        buffer.push(ch);
        i += ch.len_utf8();
    }

    flush(&mut buffer, &mut out);
    out
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn inlines_to_html(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape(text)),
            Inline::Strong(inner) => {
                out.push_str("<strong>");
                inlines_to_html(inner, out);
                out.push_str("</strong>");
            }
            Inline::Em(inner) => {
                out.push_str("<em>");
                inlines_to_html(inner, out);
                out.push_str("</em>");
            }
            Inline::Code(code) => {
                out.push_str("<code>");
                out.push_str(&escape(code));
                out.push_str("</code>");
            }
            Inline::Math(expr) => {
                out.push_str("<span class=\"math\">\\(");
                out.push_str(&escape(expr));
                out.push_str("\\)</span>");
            }
        }
    }
}

/// Render a block list to an HTML fragment.
///
/// Consecutive list items of the same kind share one `<ul>`/`<ol>` wrapper;
/// a kind change closes the current wrapper and opens the other, which is
/// the documented resolution of interleaved ordered/unordered lines.
/// A newline after paragraph text becomes `<br>` whatever follows it; only
/// newlines immediately after a heading, list, or math block close are
/// swallowed by that block's tags.
pub fn to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut prev_was_paragraph = false;
    let mut i = 0;

    while i < blocks.len() {
        if prev_was_paragraph {
            out.push_str("<br>");
        }
        match &blocks[i] {
            Block::Heading { level, content } => {
                out.push_str(&format!("<h{level}>"));
                inlines_to_html(content, &mut out);
                out.push_str(&format!("</h{level}>"));
                prev_was_paragraph = false;
                i += 1;
            }
            Block::ListItem { ordered, .. } => {
                let kind = *ordered;
                let tag = if kind { "ol" } else { "ul" };
                out.push_str(&format!("<{tag}>"));
                while let Some(Block::ListItem { ordered, content }) = blocks.get(i) {
                    if *ordered != kind {
                        break;
                    }
                    out.push_str("<li>");
                    inlines_to_html(content, &mut out);
                    out.push_str("</li>");
                    i += 1;
                }
                out.push_str(&format!("</{tag}>"));
                prev_was_paragraph = false;
            }
            Block::MathBlock(expr) => {
                out.push_str("<div class=\"math\">\\[");
                out.push_str(&escape(expr));
                out.push_str("\\]</div>");
                prev_was_paragraph = false;
                i += 1;
            }
            Block::Paragraph(content) => {
                inlines_to_html(content, &mut out);
                prev_was_paragraph = true;
                i += 1;
            }
        }
    }

    out
}

/// Parse and render in one step.
pub fn render_html(input: &str) -> String {
    to_html(&parse(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bold_with_both_markers() {
        assert_eq!(render_html("**bold**"), "<strong>bold</strong>");
        assert_eq!(render_html("__bold__"), "<strong>bold</strong>");
    }

    #[test]
    fn renders_italic_with_both_markers() {
        assert_eq!(render_html("*slanted*"), "<em>slanted</em>");
        assert_eq!(render_html("_slanted_"), "<em>slanted</em>");
    }

    #[test]
    fn bold_takes_priority_over_italic() {
        assert_eq!(
            render_html("**a *b* c**"),
            "<strong>a <em>b</em> c</strong>"
        );
    }

    #[test]
    fn renders_headings_by_level() {
        assert_eq!(render_html("# Title"), "<h1>Title</h1>");
        assert_eq!(render_html("### Sub"), "<h3>Sub</h3>");
        assert_eq!(render_html("###### Deep"), "<h6>Deep</h6>");
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        assert_eq!(render_html("####### nope"), "####### nope");
    }

    #[test]
    fn renders_inline_code_literally() {
        assert_eq!(render_html("`let *x* = 1`"), "<code>let *x* = 1</code>");
    }

    #[test]
    fn renders_inline_math_with_delimiters_preserved() {
        assert_eq!(
            render_html("\\(E = mc^2\\)"),
            "<span class=\"math\">\\(E = mc^2\\)</span>"
        );
    }

    #[test]
    fn renders_block_math_across_lines() {
        assert_eq!(
            render_html("\\[x + y\\]"),
            "<div class=\"math\">\\[x + y\\]</div>"
        );
        assert_eq!(
            render_html("\\[\nx + y\n\\]"),
            "<div class=\"math\">\\[\nx + y\n\\]</div>"
        );
    }

    #[test]
    fn unclosed_block_math_stays_literal() {
        assert_eq!(render_html("\\[x + y"), "\\[x + y");
    }

    #[test]
    fn block_math_opens_only_at_line_start() {
        // Mid-line \[..\] is left as literal text; only \(..\) is inline math.
        assert_eq!(render_html("cost is \\[x\\] today"), "cost is \\[x\\] today");
    }

    #[test]
    fn wraps_unordered_list_runs_once() {
        assert_eq!(render_html("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn wraps_ordered_list_runs_once() {
        assert_eq!(render_html("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn mixed_list_kinds_split_at_each_kind_change() {
        // Interleaved ordered/unordered lines are inherently ambiguous in
        // the dialect; the chosen resolution groups by kind per run.
        assert_eq!(
            render_html("* a\n1. b\n* c"),
            "<ul><li>a</li></ul><ol><li>b</li></ol><ul><li>c</li></ul>"
        );
    }

    #[test]
    fn plain_text_only_gains_br_for_newlines() {
        assert_eq!(render_html("hello"), "hello");
        assert_eq!(render_html("line one\nline two"), "line one<br>line two");
        assert_eq!(render_html("a\n\nb"), "a<br><br>b");
    }

    #[test]
    fn newline_after_block_close_is_swallowed() {
        assert_eq!(render_html("# T\nbody"), "<h1>T</h1>body");
        assert_eq!(render_html("* a\nbody"), "<ul><li>a</li></ul>body");
    }

    #[test]
    fn newline_after_paragraph_breaks_before_any_block() {
        assert_eq!(render_html("body\n# T"), "body<br><h1>T</h1>");
        assert_eq!(render_html("body\n* a"), "body<br><ul><li>a</li></ul>");
        assert_eq!(
            render_html("body\n\\[x\\]"),
            "body<br><div class=\"math\">\\[x\\]</div>"
        );
    }

    #[test]
    fn unmatched_markers_pass_through() {
        assert_eq!(render_html("**oops"), "**oops");
        assert_eq!(render_html("`tick"), "`tick");
        assert_eq!(render_html("*"), "*");
    }

    #[test]
    fn escapes_raw_angle_brackets() {
        assert_eq!(
            render_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(render_html("`a < b`"), "<code>a &lt; b</code>");
    }

    #[test]
    fn heading_content_supports_inline_markup() {
        assert_eq!(render_html("# **T**"), "<h1><strong>T</strong></h1>");
    }

    #[test]
    fn list_item_content_supports_inline_markup() {
        assert_eq!(
            render_html("* use `spot` instances"),
            "<ul><li>use <code>spot</code> instances</li></ul>"
        );
    }
}
