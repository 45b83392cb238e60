// SPDX-License-Identifier: GPL-3.0-only

//! `KEY="VALUE"` export syntax, as printed by `blkid --output export`.

use storage_types::AttributeMap;
use tracing::debug;

const KEY_RENAMES: &[(&str, &str)] = &[
    ("devname", "dev_name"),
    ("partlabel", "part_label"),
    ("partuuid", "part_uuid"),
];

/// Parse export output into attributes, keeping key case and order.
///
/// Malformed lines (no `=`, empty key, unterminated quote) are skipped
/// without affecting the lines around them. A repeated key keeps its first
/// position and takes the last value.
pub fn parse_export(output: &str) -> AttributeMap {
    let mut attributes = AttributeMap::new();

    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        match parse_line(line) {
            Some((key, value)) => {
                attributes.insert(key, value);
            }
            None => debug!("Skipping malformed export line: {:?}", line),
        }
    }

    attributes
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let (key, raw) = line.split_once('=')?;

    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = unquote(raw.trim_end())?;
    Some((key.to_string(), value))
}

/// Strip one pair of surrounding quotes and resolve backslash escapes.
///
/// Quotes inside the pair are kept as-is. Returns `None` when the value opens
/// a quote that is not closed by its last character.
fn unquote(raw: &str) -> Option<String> {
    let Some(quoted) = raw.strip_prefix('"') else {
        return Some(unescape(raw));
    };

    let inner = quoted.strip_suffix('"')?;
    let trailing_backslashes = inner.chars().rev().take_while(|ch| *ch == '\\').count();
    if trailing_backslashes % 2 == 1 {
        // closing quote is escaped
        return None;
    }

    Some(unescape(inner))
}

fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                value.push(escaped);
                continue;
            }
        }
        value.push(ch);
    }

    value
}

/// Render attributes back into export syntax, one quoted line per key.
pub fn render_export(attributes: &AttributeMap) -> String {
    let mut output = String::new();

    for (key, value) in attributes {
        output.push_str(key);
        output.push_str("=\"");
        for ch in value.chars() {
            if ch == '"' || ch == '\\' {
                output.push('\\');
            }
            output.push(ch);
        }
        output.push_str("\"\n");
    }

    output
}

/// Lower-case keys and apply snake-case renames (`DEVNAME` → `dev_name`).
pub fn normalize_keys(attributes: AttributeMap) -> AttributeMap {
    attributes
        .into_iter()
        .map(|(key, value)| {
            let lowered = key.to_lowercase();
            let renamed = KEY_RENAMES
                .iter()
                .find(|(from, _)| *from == lowered)
                .map(|(_, to)| to.to_string())
                .unwrap_or(lowered);
            (renamed, value)
        })
        .collect()
}
