//! Markup helpers for the conversation view.
//!
//! The backend owns markdown rendering; what arrives here is already-safe
//! HTML. The client needs three small things on top: an escape fallback
//! for freshly-typed user input, a plain-text projection of markup for
//! display, and extraction of `<pre><code>` blocks for the copy button.

/// HTML-escape `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Local fallback formatting for user input: escape, then turn newlines
/// into `<br>`. Used until (or instead of, on failure) the
/// `/format-preview` round trip.
pub fn markup_from_plain(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

/// Reduce markup to its visible text: tags stripped, line-breaking tags
/// turned into newlines, entities decoded. `escape_html` followed by
/// `visible_text` reproduces the original input exactly.
pub fn visible_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut chars = markup.char_indices();

    while let Some((start, c)) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }
        // Consume the tag and note whether it breaks the line.
        let mut end = start + c.len_utf8();
        for (i, tc) in chars.by_ref() {
            end = i + tc.len_utf8();
            if tc == '>' {
                break;
            }
        }
        let raw = &markup[start..end];
        let is_closing = raw.starts_with("</");
        let tag = raw
            .trim_matches(|t| t == '<' || t == '>' || t == '/')
            .to_ascii_lowercase();
        let name = tag.split_whitespace().next().unwrap_or("");
        if name == "br" || (is_closing && matches!(name, "p" | "div" | "li" | "pre")) {
            out.push('\n');
        }
    }

    unescape_entities(out.trim_end())
}

/// Inner text of every `<pre>…</pre>` block, tags stripped and entities
/// decoded, ready for the clipboard.
pub fn extract_code_blocks(markup: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let lower = markup.to_ascii_lowercase();
    let mut from = 0;

    while let Some(open) = lower[from..].find("<pre") {
        let open = from + open;
        let Some(body_start) = lower[open..].find('>').map(|i| open + i + 1) else {
            break;
        };
        let Some(close) = lower[body_start..].find("</pre>").map(|i| body_start + i) else {
            break;
        };
        let inner = strip_tags(&markup[body_start..close]);
        let text = unescape_entities(&inner);
        let trimmed = text.trim_matches('\n');
        if !trimmed.is_empty() {
            blocks.push(trimmed.to_string());
        }
        from = close + "</pre>".len();
    }
    blocks
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn unescape_entities(text: &str) -> String {
    // &amp; must be decoded last so it cannot cascade into other entities
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
