//! Caption text derived from file names.

use std::path::Path;

/// Filename without directory or final extension, lossily decoded.
pub fn file_stem_caption(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Strip a leading `Photo <digits> - ` prefix and trim.
///
/// The prefix is case-sensitive; any amount of whitespace (including none) may surround the
/// hyphen. Stems without the prefix are only trimmed. An empty result is a valid caption.
pub fn normalize_caption(stem: &str) -> String {
    strip_photo_prefix(stem).unwrap_or(stem).trim().to_string()
}

fn strip_photo_prefix(stem: &str) -> Option<&str> {
    let rest = stem.strip_prefix("Photo ")?;
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].trim_start().strip_prefix('-')?;
    Some(rest.trim_start())
}

/// Greedy word wrap at `width` characters, following Python's `textwrap.wrap` defaults.
///
/// Every whitespace character counts as one space and spacing inside a line is kept. Whitespace
/// at the end of a line, and at the start of every line but the first, is dropped. Hyphenated
/// words may break after a hyphen; words longer than `width` are split, preferring a hyphen.
/// Blank input yields no lines.
pub fn wrap_caption(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = split_chunks(text);
    chunks.reverse();
    let mut lines = Vec::new();

    while !chunks.is_empty() {
        let mut line: Vec<Vec<char>> = Vec::new();
        let mut len = 0usize;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_space(c)) {
            chunks.pop();
        }
        while chunks.last().is_some_and(|c| len + c.len() <= width) {
            if let Some(chunk) = chunks.pop() {
                len += chunk.len();
                line.push(chunk);
            }
        }

        if let Some(chunk) = chunks.last_mut()
            && chunk.len() > width
        {
            let space_left = width.saturating_sub(len).max(1);
            let mut end = space_left;
            if let Some(h) = chunk[..space_left].iter().rposition(|&c| c == '-')
                && h > 0
                && chunk[..h].iter().any(|&c| c != '-')
            {
                end = h + 1;
            }
            let rest = chunk.split_off(end);
            line.push(std::mem::replace(chunk, rest));
        }

        if line.last().is_some_and(|c| is_space(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.into_iter().flatten().collect());
        }
    }
    lines
}

fn is_space(chunk: &[char]) -> bool {
    chunk.iter().all(|&c| c == ' ')
}

/// Split into runs of spaces and words; words also split after a hyphen joining two letter runs
/// (`state-of-the-art` gives `state-`, `of-`, `the-`, `art`).
fn split_chunks(text: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let mut chunks = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let start = i;
        if chars[i] == ' ' {
            while i < chars.len() && chars[i] == ' ' {
                i += 1;
            }
        } else {
            while i < chars.len() && chars[i] != ' ' {
                i += 1;
                if chars[i - 1] == '-' && breaks_after_hyphen(&chars, i - 1) {
                    break;
                }
            }
        }
        chunks.push(chars[start..i].to_vec());
    }
    chunks
}

fn breaks_after_hyphen(chars: &[char], i: usize) -> bool {
    let letter = |j: usize| chars.get(j).is_some_and(|c| c.is_alphabetic());
    let before = (i >= 2 && letter(i - 1) && letter(i - 2))
        || (i >= 3 && letter(i - 1) && chars[i - 2] == '-' && letter(i - 3));
    let after = letter(i + 1)
        && (letter(i + 2) || (chars.get(i + 2) == Some(&'-') && letter(i + 3)));
    before && after
}
