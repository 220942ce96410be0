use nom::{
    bytes::complete::take_till,
    character::complete::one_of,
    combinator::recognize,
    error::Error,
    multi::many0,
    sequence::pair,
    Parser,
};

use crate::ast::cmd;

pub mod standard;

pub type Span<'a> = &'a str;

fn is_introducer(c: char) -> bool {
    c == '^' || c == '~'
}

/// Splits a ZPL byte stream into command tokens.
///
/// Vertical whitespace (LF, VT, FF, CR) is stripped first; every `^` or `~`
/// then begins a new token and terminates the one in progress. The
/// introducer is kept as the first character of each token, and material
/// before the first introducer is discarded.
pub fn tokenize(input: &str) -> Vec<String> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '\n' | '\x0b' | '\x0c' | '\r'))
        .collect();

    let rest = match cleaned.find(is_introducer) {
        Some(start) => &cleaned[start..],
        None => return Vec::new(),
    };

    let token = recognize(pair(
        one_of::<_, _, Error<Span>>("^~"),
        take_till(is_introducer),
    ));
    let (_, tokens) = many0(token)
        .parse(rest)
        .unwrap_or((rest, Vec::new()));

    tokens.into_iter().map(str::to_owned).collect()
}

/// Parses a ZPL document into its command stream.
///
/// Never fails: unknown designators become [`cmd::Command::Unsupported`]
/// and malformed parameters collapse to their documented defaults.
pub fn parse_zpl(input: &str) -> Vec<cmd::Command> {
    tokenize(input)
        .iter()
        .map(|token| parse_token(token))
        .collect()
}

/// Parses a single token (introducer + designator + parameter tail).
fn parse_token(token: &str) -> cmd::Command {
    let mut chars = token.char_indices();
    let (intro, c1, c2) = match (chars.next(), chars.next(), chars.next()) {
        (Some((_, intro)), Some((_, c1)), Some((_, c2))) => (intro, c1, c2),
        _ => return unsupported(token),
    };
    let tail_start = chars.next().map(|(i, _)| i).unwrap_or(token.len());
    let tail = &token[tail_start..];

    match (intro, c1, c2) {
        ('^', 'X', 'A') => cmd::Command::StartFormat,
        ('^', 'X', 'Z') => cmd::Command::EndFormat,
        ('^', 'X', 'G') => standard::cmd_xg(tail),
        ('^', 'L', 'H') => standard::cmd_lh(tail),
        ('^', 'F', 'O') => standard::cmd_fo(tail),
        ('^', 'F', 'T') => standard::cmd_ft(tail),
        ('^', 'F', 'S') => cmd::Command::FieldSeparator,
        ('^', 'F', 'R') => cmd::Command::FieldReverse,
        ('^', 'F', 'W') => standard::cmd_fw(tail),
        ('^', 'F', 'B') => standard::cmd_fb(tail),
        ('^', 'F', 'D') => cmd::Command::FieldData {
            data: tail.to_owned(),
        },
        ('^', 'C', 'F') => standard::cmd_cf(tail),
        ('^', 'G', 'B') => standard::cmd_gb(tail),
        ('^', 'G', 'C') => standard::cmd_gc(tail),
        ('^', 'G', 'D') => standard::cmd_gd(tail),
        ('^', 'B', 'Y') => standard::cmd_by(tail),
        ('^', 'I', 'M') => standard::cmd_im(tail),
        ('~', 'D', 'G') => standard::cmd_dg(tail),
        ('~', 'D', 'Y') => standard::cmd_dy(tail),
        ('^', 'A', name) => standard::cmd_a(name, tail),
        ('^', 'B', code) => match standard::cmd_b(code, tail) {
            Some(command) => command,
            None => unsupported(token),
        },
        _ => unsupported(token),
    }
}

fn unsupported(token: &str) -> cmd::Command {
    let designator: String = token.chars().take(3).collect();
    cmd::Command::Unsupported { designator }
}

/// Takes one comma-separated field from the tail, leaving the cursor past
/// the delimiter.
pub(crate) fn take_field(input: Span) -> (Span, Span) {
    let (rest, field) = take_till::<_, _, Error<Span>>(|c| c == ',')
        .parse(input)
        .unwrap_or((input, ""));
    let rest = rest.strip_prefix(',').unwrap_or(rest);
    (rest, field)
}

/// Numeric field; anything that does not parse as an integer collapses to
/// `None` so the evaluator can substitute the documented default.
pub(crate) fn u32_field(input: Span) -> (Span, Option<u32>) {
    let (rest, field) = take_field(input);
    (rest, field.trim().parse::<u32>().ok())
}

/// Decimal field with the same fallback behavior as [`u32_field`].
pub(crate) fn f32_field(input: Span) -> (Span, Option<f32>) {
    let (rest, field) = take_field(input);
    (rest, field.trim().parse::<f32>().ok())
}

/// Single-character field (e.g. a Y/N flag or a color letter).
pub(crate) fn char_field(input: Span) -> (Span, Option<char>) {
    let (rest, field) = take_field(input);
    (rest, field.trim().chars().next())
}

/// Leading single-character parameter with its trailing comma, used where
/// ZPL glues a letter directly to the designator (e.g. `^A0N,30`).
pub(crate) fn lead_char(input: Span) -> (Span, Option<char>) {
    let mut chars = input.chars();
    match chars.next() {
        None => (input, None),
        Some(',') => (chars.as_str(), None),
        Some(c) => {
            let rest = chars.as_str();
            let rest = rest.strip_prefix(',').unwrap_or(rest);
            (rest, Some(c))
        }
    }
}

/// Leading barcode orientation: consumed only when the first character is
/// one of `N`, `R`, `I`, `B`; anything else stays in the parameter tail.
pub(crate) fn lead_orientation(input: Span) -> (Span, crate::ast::commons::Orientation) {
    use crate::ast::commons::Orientation;
    match input.chars().next() {
        Some(c @ ('N' | 'R' | 'I' | 'B')) => {
            let rest = &input[c.len_utf8()..];
            let rest = rest.strip_prefix(',').unwrap_or(rest);
            (rest, Orientation::from(c))
        }
        Some(',') => (&input[1..], Orientation::N),
        _ => (input, Orientation::N),
    }
}
