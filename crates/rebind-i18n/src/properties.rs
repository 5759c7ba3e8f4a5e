//! Properties-style resource bundle parsing.
//!
//! Accepts the `.properties` syntax resource files are written in:
//!
//! ```text
//! # comment
//! ! also a comment
//! greeting = Hello
//! files = {0} files
//! files[one] = {0} file
//! files[=0] = no files
//! long = first part \
//!        second part
//! ```
//!
//! A `key[form]` suffix declares a selector override for `key`.

use crate::descriptor::{InterfaceId, ResourceDescriptor, SelectorForm};
use crate::error::{I18nError, Result};
use crate::locale::LocaleTag;

/// One `key[form] = value` line, after unescaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    /// 1-based line the entry starts on.
    pub line: usize,
    pub key: String,
    pub form: Option<SelectorForm>,
    pub value: String,
}

/// Parse properties text into entries, in file order.
pub fn parse_properties(text: &str) -> Result<Vec<PropertyEntry>> {
    let mut entries = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let start_line = idx + 1;
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, start_line)?;
        let value = unescape(raw_value, start_line)?;
        let (key, form) = split_selector(&key, start_line)?;
        if key.is_empty() {
            return Err(I18nError::Parse {
                line: start_line,
                reason: "empty key".into(),
            });
        }

        entries.push(PropertyEntry {
            line: start_line,
            key,
            form,
            value,
        });
    }

    Ok(entries)
}

/// Build a descriptor for `interface` and `locale` from properties text.
pub fn descriptor_from_properties(
    interface: impl Into<InterfaceId>,
    locale: LocaleTag,
    text: &str,
    source: Option<&str>,
) -> Result<ResourceDescriptor> {
    let mut builder = ResourceDescriptor::builder(interface, locale);
    if let Some(source) = source {
        builder = builder.source(source);
    }
    for entry in parse_properties(text)? {
        match entry.form {
            Some(form) => builder.insert_form(entry.key, form, entry.value),
            None => builder.insert_value(entry.key, entry.value),
        }
    }
    builder.build()
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace outside a `[form]`
/// suffix. Whitespace around the separator is not part of either side.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut in_selector = false;
    let mut key_end = line.len();
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '[' => in_selector = true,
            ']' => in_selector = false,
            _ if in_selector => {}
            '=' | ':' => {
                key_end = idx;
                break;
            }
            c if c.is_whitespace() => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start();
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start();
    }
    (key, rest)
}

fn split_selector(key: &str, line: usize) -> Result<(String, Option<SelectorForm>)> {
    let Some(body) = key.strip_suffix(']') else {
        return Ok((key.to_string(), None));
    };
    let Some(open) = body.rfind('[') else {
        return Err(I18nError::Parse {
            line,
            reason: format!("unbalanced selector suffix in '{key}'"),
        });
    };
    let form = SelectorForm::new(&body[open + 1..]).map_err(|_| I18nError::Parse {
        line,
        reason: format!("invalid selector form in '{key}'"),
    })?;
    Ok((body[..open].to_string(), Some(form)))
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000c}'),
            Some('u') => {
                let unit = hex_unit(&mut chars, line)?;
                let decoded = if (0xD800..=0xDBFF).contains(&unit) {
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => hex_unit(&mut chars, line)?,
                        _ => return Err(surrogate_error(unit, line)),
                    };
                    char::decode_utf16([unit, low])
                        .next()
                        .and_then(|c| c.ok())
                        .ok_or_else(|| surrogate_error(unit, line))?
                } else {
                    char::from_u32(u32::from(unit)).ok_or_else(|| surrogate_error(unit, line))?
                };
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn hex_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16> {
    let hex: String = chars.by_ref().take(4).collect();
    u16::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| I18nError::Parse {
            line,
            reason: format!("invalid unicode escape '\\u{hex}'"),
        })
}

fn surrogate_error(unit: u16, line: usize) -> I18nError {
    I18nError::Parse {
        line,
        reason: format!("unpaired surrogate in unicode escape '\\u{unit:04X}'"),
    }
}
