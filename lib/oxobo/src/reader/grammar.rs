//! Micro-grammars shared by the tag handlers.

/// Splits a value starting with a quoted string into the raw (still escaped) quoted content and the rest.
///
/// The closing quote is the first `"` not preceded by a `\`.
pub fn split_quoted(value: &str) -> Option<(&str, &str)> {
    let inner = value.trim_start().strip_prefix('"')?;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some((&inner[..i], inner[i + 1..].trim_start())),
            _ => escaped = false,
        }
    }
    None
}

/// Resolves OBO escapes. Line breaks and tabs become spaces.
pub fn unescape(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n' | 't' | 'W') => output.push(' '),
                Some(other) => output.push(other),
                None => output.push('\\'),
            },
            '\n' | '\t' | '\r' => output.push(' '),
            c => output.push(c),
        }
    }
    output
}

/// Splits a trailing `{...}` modifier block (outside quotes) from a value.
pub fn split_modifiers(value: &str) -> (&str, Option<&str>) {
    let value = value.trim();
    if !value.ends_with('}') {
        return (value, None);
    }
    let mut quoted = false;
    let mut escaped = false;
    let mut start = None;
    for (i, c) in value.char_indices() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => quoted = !quoted,
            '{' if !quoted && start.is_none() => start = Some(i),
            _ => (),
        }
        escaped = false;
    }
    match start {
        Some(start) if start > 0 => (
            value[..start].trim_end(),
            Some(&value[start + 1..value.len() - 1]),
        ),
        _ => (value, None),
    }
}

/// Splits a value starting with `[` at the matching `]`, returning the bracket content and the rest.
pub fn split_bracketed(value: &str) -> Option<(&str, &str)> {
    let inner = value.trim_start().strip_prefix('[')?;
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in inner.char_indices() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => quoted = !quoted,
            ']' if !quoted => return Some((&inner[..i], inner[i + 1..].trim_start())),
            _ => (),
        }
        escaped = false;
    }
    None
}

/// Splits on a separator outside of quotes, dropping empty elements.
pub fn split_outside_quotes(value: &str, separator: char) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut quoted = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => quoted = !quoted,
            c if c == separator && !quoted => {
                elements.push(value[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => (),
        }
        escaped = false;
    }
    elements.push(value[start..].trim());
    elements.retain(|e| !e.is_empty());
    elements
}

/// Splits the first whitespace separated token from the rest.
pub fn split_token(value: &str) -> (&str, &str) {
    let value = value.trim_start();
    match value.find(char::is_whitespace) {
        Some(i) => (&value[..i], value[i..].trim_start()),
        None => (value, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted() {
        assert_eq!(
            Some(("Something", "[]")),
            split_quoted("\"Something\" []")
        );
        assert_eq!(
            Some(("a \\\"b\\\" c", "EXACT []")),
            split_quoted("\"a \\\"b\\\" c\" EXACT []")
        );
        assert_eq!(None, split_quoted("\"unterminated"));
        assert_eq!(None, split_quoted("no quotes"));
        assert_eq!("a \"b\" c d", unescape("a \\\"b\\\" c\\nd"));
    }

    #[test]
    fn modifiers() {
        assert_eq!(
            ("part_of GO:1", Some("source=\"x\", a=b")),
            split_modifiers("part_of GO:1 {source=\"x\", a=b}")
        );
        assert_eq!(
            ("\"a {b}\" []", None),
            split_modifiers("\"a {b}\" []")
        );
        assert_eq!(("{a=b}", None), split_modifiers("{a=b}"));
    }

    #[test]
    fn lists() {
        assert_eq!(
            Some(("orcid:1, PMID:2", "{a=b}")),
            split_bracketed("[orcid:1, PMID:2] {a=b}")
        );
        assert_eq!(
            vec!["a", "\"b, c\"", "d"],
            split_outside_quotes("a, \"b, c\",, d", ',')
        );
        assert_eq!(("EXACT", "[]"), split_token("EXACT []"));
        assert_eq!(("EXACT", ""), split_token("EXACT"));
    }
}
