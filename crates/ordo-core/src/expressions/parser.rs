//! Expression syntax.
//!
//! - `${key}` references another property
//! - `${key:default}` falls back to `default` when `key` is undefined
//! - keys and defaults may themselves contain references
//! - `::` inside a key is part of the key, not a default separator; the
//!   expression stage reads `${handler::input}` as a secret handler call
//! - `\$` and `$${` produce a literal `$` and `${`
//!
//! Malformed input is kept as literal text: an unterminated `${` and an
//! empty `${}` are not errors.

/// A parsed piece of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Reference {
        key: Vec<Segment>,
        default: Option<Vec<Segment>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Top,
    Key,
    Default,
}

enum Terminator {
    End,
    Colon,
    Brace,
}

/// Split `input` into literal text and references.
pub fn parse(input: &str) -> Vec<Segment> {
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0;
    let (segments, _) = parse_until(&chars, &mut pos, Mode::Top);
    segments
}

fn parse_until(chars: &[char], pos: &mut usize, mode: Mode) -> (Vec<Segment>, Terminator) {
    let mut segments = Vec::new();
    let mut literal = String::new();

    while *pos < chars.len() {
        let c = chars[*pos];
        let next = chars.get(*pos + 1).copied();
        match c {
            '\\' if next == Some('$') => {
                literal.push('$');
                *pos += 2;
            }
            '$' if next == Some('$') && chars.get(*pos + 2) == Some(&'{') => {
                literal.push_str("${");
                *pos += 3;
            }
            '$' if next == Some('{') => {
                let start = *pos;
                *pos += 2;
                match parse_reference(chars, pos) {
                    Some(reference) => {
                        flush(&mut literal, &mut segments);
                        segments.push(reference);
                    }
                    None => literal.extend(&chars[start..*pos]),
                }
            }
            '}' if mode != Mode::Top => {
                *pos += 1;
                flush(&mut literal, &mut segments);
                return (segments, Terminator::Brace);
            }
            ':' if mode == Mode::Key => {
                if next == Some(':') {
                    literal.push_str("::");
                    *pos += 2;
                } else {
                    *pos += 1;
                    flush(&mut literal, &mut segments);
                    return (segments, Terminator::Colon);
                }
            }
            _ => {
                literal.push(c);
                *pos += 1;
            }
        }
    }

    flush(&mut literal, &mut segments);
    (segments, Terminator::End)
}

/// Parse the body of a reference, `pos` pointing just past `${`.
///
/// Returns `None` when the reference is not well formed. `pos` is then left
/// past whatever was consumed, which the caller keeps as literal text.
fn parse_reference(chars: &[char], pos: &mut usize) -> Option<Segment> {
    let (key, terminator) = parse_until(chars, pos, Mode::Key);
    match terminator {
        Terminator::End => None,
        Terminator::Brace if key.is_empty() => None,
        Terminator::Brace => Some(Segment::Reference { key, default: None }),
        Terminator::Colon => match parse_until(chars, pos, Mode::Default) {
            (default, Terminator::Brace) => Some(Segment::Reference {
                key,
                default: Some(default),
            }),
            _ => None,
        },
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Render `segments`, resolving each reference with `resolve`.
///
/// `resolve` receives the evaluated key and whether a default is available.
/// When it returns `Ok(None)` the default is rendered if there is one and
/// nothing otherwise, so a caller that treats a missing reference as an
/// error must return that error itself.
pub fn evaluate<F, E>(segments: &[Segment], resolve: &mut F) -> Result<String, E>
where
    F: FnMut(&str, bool) -> Result<Option<String>, E>,
{
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Reference { key, default } => {
                let key = evaluate(key, resolve)?;
                match resolve(&key, default.is_some())? {
                    Some(value) => out.push_str(&value),
                    None => {
                        if let Some(default) = default {
                            out.push_str(&evaluate(default, resolve)?);
                        }
                    }
                }
            }
        }
    }
    Ok(out)
}
