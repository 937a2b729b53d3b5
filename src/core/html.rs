// src/core/html.rs
// Case-insensitive tag slicing. No DOM and no nesting awareness,
// just enough to walk table/row/cell blocks of a known page.

/// ASCII-only lowercasing; byte offsets stay valid against the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `<open ...> ... </close>` block at or after `from`, as byte offsets
/// `(start_of_open_tag, end_of_close_tag)`. `lc` must be `to_lower(s)`.
fn next_block_lc(s: &str, lc: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let start = lc.get(from..)?.find(open)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(close)?;
    Some((start, open_end + end_rel + close.len()))
}

pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    next_block_lc(s, &to_lower(s), &to_lower(o), &to_lower(c), from)
}

/// Every `<open ...> ... </close>` block in `s`, in document order.
pub fn tag_blocks_ci<'a>(s: &'a str, open: &str, close: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let (open, close) = (to_lower(open), to_lower(close));
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b, e)) = next_block_lc(s, &lc, &open, &close, pos) {
        out.push(&s[b..e]);
        pos = e;
    }
    out
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of a cell block like `<td class=x><b>Ada</b>&nbsp;</td>`.
pub fn cell_text(block: &str) -> String {
    strip_tags(super::sanitize::normalize_entities(&inner_after_open_tag(block)))
}
