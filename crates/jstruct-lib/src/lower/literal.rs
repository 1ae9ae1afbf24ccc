//! Annotation values: Java literals and constant names.

use jstruct_core::AnnotationValue;

use crate::parser::{SyntaxKind, SyntaxToken};

/// Classifies the non-trivia tokens of an element value. `raw` is the value as written,
/// kept verbatim when the tokens are not a recognized literal form.
pub(super) fn lower_expression(tokens: &[SyntaxToken], raw: &str) -> AnnotationValue {
    let expression = || AnnotationValue::Expression(raw.to_owned());

    match tokens {
        [tok] => single_token(tok).unwrap_or_else(expression),
        [minus, tok] if minus.kind() == SyntaxKind::Minus => {
            negated(tok).unwrap_or_else(expression)
        }
        _ => {
            if let Some(name) = class_literal(tokens) {
                return AnnotationValue::ClassLiteral(name);
            }
            if is_dotted_name(tokens) {
                return AnnotationValue::EnumConstant(join(tokens));
            }
            expression()
        }
    }
}

fn single_token(tok: &SyntaxToken) -> Option<AnnotationValue> {
    let text = tok.text();
    match tok.kind() {
        SyntaxKind::StringLiteral => {
            let inner = text.strip_prefix('"')?.strip_suffix('"')?;
            unescape(inner).map(AnnotationValue::String)
        }
        SyntaxKind::TextBlock => text_block(text).map(AnnotationValue::String),
        SyntaxKind::CharLiteral => {
            let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
            let decoded = unescape(inner)?;
            let mut chars = decoded.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(AnnotationValue::Char(c)),
                _ => None,
            }
        }
        SyntaxKind::IntLiteral => parse_int_literal(text).map(AnnotationValue::Integer),
        SyntaxKind::FloatLiteral => parse_float_literal(text).map(AnnotationValue::Float),
        SyntaxKind::KwTrue => Some(AnnotationValue::Boolean(true)),
        SyntaxKind::KwFalse => Some(AnnotationValue::Boolean(false)),
        SyntaxKind::Id => Some(AnnotationValue::EnumConstant(text.to_owned())),
        _ => None,
    }
}

fn negated(tok: &SyntaxToken) -> Option<AnnotationValue> {
    match tok.kind() {
        SyntaxKind::IntLiteral => {
            let (digits, radix, long) = split_int_literal(tok.text())?;
            if radix != 10 {
                let value = parse_int_literal(tok.text())?;
                return Some(AnnotationValue::Integer(value.wrapping_neg()));
            }
            let magnitude = u64::from_str_radix(&digits, 10).ok()?;
            let limit = if long {
                i64::MAX as u64 + 1
            } else {
                i32::MAX as u64 + 1
            };
            (magnitude <= limit)
                .then(|| AnnotationValue::Integer((magnitude as i64).wrapping_neg()))
        }
        SyntaxKind::FloatLiteral => {
            parse_float_literal(tok.text()).map(|x| AnnotationValue::Float(-x))
        }
        _ => None,
    }
}

/// Integer literal value with Java's typing rules.
///
/// Hex, octal and binary `int` literals are 32-bit two's complement, so
/// `0xFFFFFFFF` is `-1`; with an `L` suffix they are 64-bit. Decimal literals
/// must fit their type without a sign (`2147483648` only appears negated).
pub fn parse_int_literal(text: &str) -> Option<i64> {
    let (digits, radix, long) = split_int_literal(text)?;
    let magnitude = u64::from_str_radix(&digits, radix).ok()?;

    match (radix, long) {
        (10, false) => i32::try_from(magnitude).ok().map(i64::from),
        (10, true) => i64::try_from(magnitude).ok(),
        (_, false) => u32::try_from(magnitude).ok().map(|v| i64::from(v as i32)),
        (_, true) => Some(magnitude as i64),
    }
}

/// Digits without prefix, suffix and `_` separators, plus radix and `L` flag.
fn split_int_literal(text: &str) -> Option<(String, u32, bool)> {
    let (body, long) = match text.strip_suffix(['l', 'L']) {
        Some(body) => (body, true),
        None => (text, false),
    };

    let (digits, radix) = if let Some(hex) = body.strip_prefix("0x").or(body.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = body.strip_prefix("0b").or(body.strip_prefix("0B")) {
        (bin, 2)
    } else if body.len() > 1 && body.starts_with('0') {
        (&body[1..], 8)
    } else {
        (body, 10)
    };

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return None;
    }
    Some((digits, radix, long))
}

fn parse_float_literal(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim_end_matches(['f', 'F', 'd', 'D'])
        .chars()
        .filter(|&c| c != '_')
        .collect();
    cleaned.parse().ok()
}

/// `Foo.class`, `a.b.Foo.class`, `int.class`
fn class_literal(tokens: &[SyntaxToken]) -> Option<String> {
    let [name @ .., dot, class] = tokens else {
        return None;
    };
    if dot.kind() != SyntaxKind::Dot || class.kind() != SyntaxKind::KwClass {
        return None;
    }
    match name {
        [prim] if prim.kind() == SyntaxKind::PrimitiveType => Some(prim.text().to_owned()),
        _ if is_dotted_name(name) => Some(join(name)),
        _ => None,
    }
}

/// `A`, `A.B`, `a.b.C` with no other tokens.
fn is_dotted_name(tokens: &[SyntaxToken]) -> bool {
    !tokens.is_empty()
        && tokens.len() % 2 == 1
        && tokens.iter().enumerate().all(|(i, tok)| {
            let expected = if i % 2 == 0 {
                SyntaxKind::Id
            } else {
                SyntaxKind::Dot
            };
            tok.kind() == expected
        })
}

fn join(tokens: &[SyntaxToken]) -> String {
    tokens.iter().map(|t| t.text()).collect()
}

/// Decodes Java escape sequences. `None` on a malformed escape.
pub fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{c}',
            'r' => '\r',
            's' => ' ',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
            }
            first @ '0'..='7' => {
                // Up to three octal digits, at most `\377`.
                let max_len = if first <= '3' { 3 } else { 2 };
                let mut value = first.to_digit(8)?;
                for _ in 1..max_len {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}

/// Content of a `"""` text block: first line dropped, incidental indentation stripped,
/// escapes decoded.
fn text_block(text: &str) -> Option<String> {
    let inner = text.strip_prefix("\"\"\"")?.strip_suffix("\"\"\"")?;
    let (_, body) = inner.split_once('\n')?;

    let lines: Vec<&str> = body.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| !line.trim().is_empty() || *i == lines.len() - 1)
        .map(|(_, line)| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect();
    unescape(&stripped.join("\n"))
}
