//! Narrow lexing over JSX/TSX sources.
//!
//! The transforms only need to find class-name strings and a handful of
//! statement shapes, so instead of a full parser this module scans string
//! literals, comments and bracketed regions and hands each class string to
//! a rewrite callback.

use regex::Regex;
use std::sync::LazyLock;

use crate::transform::TransformError;

/// `className=` attributes and `cn(`/`cva(` calls.
static CLASS_SITE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclassName\s*=\s*|\b(cn|cva)\s*\(").expect("class site regex must compile")
});

/// How string literals inside a region are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    /// `className={...}` or `cn(...)`: top-level literals, object keys and
    /// `className` properties.
    Expression,
    /// `cva(...)`: base strings, variant values and `className` properties.
    Variants,
}

/// Split a class into `(variant, value, modifier)`.
///
/// `hover:bg-primary/50` splits into `hover`, `bg-primary` and `50`.
pub fn split_class_name(class_name: &str) -> (Option<&str>, &str, Option<&str>) {
    if !class_name.contains('/') && !class_name.contains(':') {
        return (None, class_name, None);
    }

    let (rest, modifier) = match class_name.split_once('/') {
        Some((rest, modifier)) => (rest, Some(modifier)),
        None => (class_name, None),
    };

    match rest.rsplit_once(':') {
        Some((variant, value)) => (Some(variant), value, modifier),
        None => (None, rest, modifier),
    }
}

/// Inverse of [`split_class_name`].
pub fn join_class_name(variant: Option<&str>, value: &str, modifier: Option<&str>) -> String {
    let mut class_name = String::with_capacity(value.len() + 8);
    if let Some(variant) = variant {
        class_name.push_str(variant);
        class_name.push(':');
    }
    class_name.push_str(value);
    if let Some(modifier) = modifier {
        class_name.push('/');
        class_name.push_str(modifier);
    }
    class_name
}

/// Rewrite every class-name string in `source`.
///
/// Class strings are the value of a `className="..."` attribute, string
/// literals inside a `className={...}` expression or a `cn(...)` call, and
/// the base, variant and `className` strings of a `cva(...)` call.
/// Operands of `==`/`!=` comparisons are left alone, and so are property
/// values of nested objects such as `buttonVariants({ variant: "ghost" })`
/// unless the property is `className` or `class`.
///
/// With `drop_empty_attributes`, a `className="..."` attribute that the
/// rewrite turned blank is removed along with the whitespace before it.
pub fn rewrite_class_strings<F>(
    source: &str,
    drop_empty_attributes: bool,
    mut rewrite: F,
) -> Result<String, TransformError>
where
    F: FnMut(&str) -> String,
{
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(caps) = CLASS_SITE_REGEX.captures_at(source, cursor) {
        let Some(site) = caps.get(0) else {
            break;
        };
        out.push_str(&source[cursor..site.start()]);

        if let Some(callee) = caps.get(1) {
            let kind = if callee.as_str() == "cva" {
                Site::Variants
            } else {
                Site::Expression
            };
            let open = site.end() - 1;
            let close = find_closing(source, open)?;
            out.push_str(&source[site.start()..=open]);
            out.push_str(&rewrite_region(&source[open + 1..close - 1], kind, &mut rewrite)?);
            out.push(')');
            cursor = close;
            continue;
        }

        let value_start = site.end();
        match bytes.get(value_start) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let end = scan_string(source, value_start)?;
                let original = &source[value_start + 1..end - 1];
                let rewritten = rewrite(original);
                if drop_empty_attributes && rewritten != original && rewritten.trim().is_empty() {
                    let kept = out.trim_end().len();
                    out.truncate(kept);
                } else {
                    out.push_str(site.as_str());
                    out.push(quote as char);
                    out.push_str(&rewritten);
                    out.push(quote as char);
                }
                cursor = end;
            }
            Some(b'{') => {
                let close = find_closing(source, value_start)?;
                out.push_str(site.as_str());
                out.push('{');
                out.push_str(&rewrite_region(
                    &source[value_start + 1..close - 1],
                    Site::Expression,
                    &mut rewrite,
                )?);
                out.push('}');
                cursor = close;
            }
            _ => {
                out.push_str(site.as_str());
                cursor = site.end();
            }
        }
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}

fn rewrite_region<F>(region: &str, site: Site, rewrite: &mut F) -> Result<String, TransformError>
where
    F: FnMut(&str) -> String,
{
    let bytes = region.as_bytes();
    let mut out = String::with_capacity(region.len());
    let mut copied = 0;
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                let end = scan_string(region, i)?;
                if is_class_literal(region, i, end, depth, site) {
                    out.push_str(&region[copied..=i]);
                    out.push_str(&rewrite(&region[i + 1..end - 1]));
                    out.push_str(&region[end - 1..end]);
                    copied = end;
                }
                i = end;
            }
            b'`' => i = scan_string(region, i)?,
            b'/' if matches!(bytes.get(i + 1), Some(b'/' | b'*')) => i = skip_comment(region, i)?,
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            _ => i += 1,
        }
    }

    out.push_str(&region[copied..]);
    Ok(out)
}

fn is_class_literal(region: &str, start: usize, end: usize, depth: usize, site: Site) -> bool {
    let before = region[..start].trim_end();
    let after = region[end..].trim_start();

    if before.ends_with('=') || after.starts_with("==") || after.starts_with("!=") {
        return false;
    }

    let is_key = after.starts_with(':') && (before.ends_with('{') || before.ends_with(','));

    match site {
        Site::Expression => depth == 0 || is_key || is_class_property(before),
        Site::Variants => {
            if is_key {
                return false;
            }
            depth == 0 || depth >= 3 || is_class_property(before)
        }
    }
}

/// Whether the text before a literal ends in a `className:`/`class:` key.
fn is_class_property(before: &str) -> bool {
    before
        .strip_suffix(':')
        .is_some_and(|key| matches!(trailing_key(key.trim_end()), "className" | "class"))
}

/// The identifier or quoted key at the end of `text`.
fn trailing_key(text: &str) -> &str {
    let text = text.trim_end_matches(['"', '\'']);
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '$' | '-'))
        .last()
        .map_or(text.len(), |(index, _)| index);
    &text[start..]
}

/// Index just past the string literal that starts at `start`.
pub fn scan_string(source: &str, start: usize) -> Result<usize, TransformError> {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Ok(i + 1),
            b'\n' if quote != b'`' => break,
            b'$' if quote == b'`' && bytes.get(i + 1) == Some(&b'{') => {
                i = find_closing(source, i + 1)?;
            }
            _ => i += 1,
        }
    }

    Err(TransformError::UnterminatedString { offset: start })
}

/// Index just past the bracket that closes the one at `open`.
pub fn find_closing(source: &str, open: usize) -> Result<usize, TransformError> {
    let bytes = source.as_bytes();
    let open_byte = bytes[open];
    let close_byte = match open_byte {
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    };

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                i = scan_string(source, i)?;
                continue;
            }
            b'/' if matches!(bytes.get(i + 1), Some(b'/' | b'*')) => {
                i = skip_comment(source, i)?;
                continue;
            }
            b if b == open_byte => depth += 1,
            b if b == close_byte => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(TransformError::Unclosed {
        open: open_byte as char,
        offset: open,
    })
}

/// Index just past the comment that starts at `start`.
fn skip_comment(source: &str, start: usize) -> Result<usize, TransformError> {
    let rest = &source[start..];
    if rest.starts_with("//") {
        return Ok(rest.find('\n').map_or(source.len(), |end| start + end));
    }
    rest[2..]
        .find("*/")
        .map(|end| start + 2 + end + 2)
        .ok_or(TransformError::UnterminatedComment { offset: start })
}
