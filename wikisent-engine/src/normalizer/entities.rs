//! Character entity decoding
//!
//! Dump text is XML-escaped once, and the wiki markup inside it carries its
//! own HTML entities, so the normalizer decodes twice.

use std::borrow::Cow;

/// Longest entity name we look for, excluding `&` and `;`
const MAX_ENTITY_LEN: usize = 10;

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "minus" => '\u{2212}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "times" => '\u{00D7}',
        "deg" => '\u{00B0}',
        _ => return None,
    };
    Some(ch)
}

fn numeric_entity(body: &str) -> Option<char> {
    let code = match body.strip_prefix(|c: char| c == 'x' || c == 'X') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => body.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn decode_one(name: &str) -> Option<char> {
    match name.strip_prefix('#') {
        Some(body) => numeric_entity(body),
        None => named_entity(name),
    }
}

/// Decode named and numeric entities; unknown ones are left as they are
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];
        let decoded = candidate
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, ch)| ch == ';')
            .and_then(|(semi, _)| decode_one(&candidate[..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}
