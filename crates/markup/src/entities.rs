// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Character reference decoding for attribute values
//!
//! Covers the references that show up in hand-written templates: a few
//! named ones plus semicolon-terminated decimal and hex references. Anything
//! else is kept verbatim.

use std::borrow::Cow;

const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
];

/// Longest reference body we look at, `#x10FFFF` included
const MAX_REFERENCE_LEN: usize = 8;

/// Decode character references in `text`, borrowing when there are none
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_REFERENCE_LEN)
            .and_then(|end| decode_reference(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(body: &str) -> Option<char> {
    match body.strip_prefix('#') {
        Some(numeric) => {
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                None if numeric.chars().all(|c| c.is_ascii_digit()) => numeric.parse().ok()?,
                _ => return None,
            };
            char::from_u32(code)
        }
        None => NAMED
            .iter()
            .find(|(name, _)| *name == body)
            .map(|(_, c)| *c),
    }
}
