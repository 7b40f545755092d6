// ABOUTME: Parser module for parsing Lisp expressions using nom combinators

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, hex_digit1, multispace0, multispace1, oct_digit1, one_of},
    combinator::{opt, recognize},
    multi::many0,
    IResult, Parser,
};

use crate::error::EvalError;
use crate::value::Value;

const SYMBOL_CHARS: &str = "!$%&|*+-/:<=?>@^_~#";

fn ws(input: &str) -> IResult<&str, ()> {
    many0(multispace1).map(|_| ()).parse(input)
}

/// digits, or digits with a decimal point and optional fraction, or a
/// leading-dot decimal. Shared by the rational/complex number components.
fn real_component(input: &str) -> IResult<&str, &str> {
    recognize(alt((
        recognize((digit1, opt((char('.'), opt(digit1))))),
        recognize((char('.'), digit1)),
    )))
    .parse(input)
}

/// `digits '/' digits` => Rational(p, q). `q = 0` surfaces as a parse error.
fn parse_rational(input: &str) -> IResult<&str, Value> {
    let (input, p) = digit1(input)?;
    let (input, _) = char('/')(input)?;
    let (input, q) = digit1(input)?;

    let p: i64 = p.parse().map_err(|_| nom_fail(input))?;
    let q: i64 = q.parse().map_err(|_| nom_fail(input))?;
    if q == 0 {
        return Err(nom_fail(input));
    }
    Ok((input, Value::Rational(p, q)))
}

/// `digits_or_dot ('+'|'-') digits_or_dot 'i'` => Complex(a, b), sign on b.
fn parse_complex(input: &str) -> IResult<&str, Value> {
    let (input, a) = real_component(input)?;
    let (input, sign) = one_of("+-")(input)?;
    let (input, b) = real_component(input)?;
    let (input, _) = char('i')(input)?;

    let a: f64 = a.parse().map_err(|_| nom_fail(input))?;
    let mut b: f64 = b.parse().map_err(|_| nom_fail(input))?;
    if sign == '-' {
        b = -b;
    }
    Ok((input, Value::Complex(a, b)))
}

/// Decimal integer, `#x<hex>`, or `#o<octal>` — all produce `Number`.
fn parse_number(input: &str) -> IResult<&str, Value> {
    alt((
        |i| {
            let (i, _) = tag("#x")(i)?;
            let (i, digits) = hex_digit1(i)?;
            let n = i64::from_str_radix(digits, 16).map_err(|_| nom_fail(i))?;
            Ok((i, Value::Number(n)))
        },
        |i| {
            let (i, _) = tag("#o")(i)?;
            let (i, digits) = oct_digit1(i)?;
            let n = i64::from_str_radix(digits, 8).map_err(|_| nom_fail(i))?;
            Ok((i, Value::Number(n)))
        },
        |i| {
            let (i, digits) = digit1(i)?;
            let n: i64 = digits.parse().map_err(|_| nom_fail(i))?;
            Ok((i, Value::Number(n)))
        },
    ))
    .parse(input)
}

/// `#d[0-9.]+` => Float.
fn parse_decimal(input: &str) -> IResult<&str, Value> {
    let (input, _) = tag("#d")(input)?;
    let (input, digits) = nom::bytes::complete::take_while1(|c: char| c.is_ascii_digit() || c == '.')
        .parse(input)?;
    let n: f64 = digits.parse().map_err(|_| nom_fail(input))?;
    Ok((input, Value::Float(n)))
}

/// `"..."` with `\\`, `\"`, `\n`, `\r`, `\t` escapes. Any other escape is a
/// parse error.
fn parse_string(input: &str) -> IResult<&str, Value> {
    let (mut input, _) = char('"')(input)?;
    let mut result = String::new();

    loop {
        match input.chars().next() {
            None => return Err(nom_fail(input)),
            Some('"') => {
                input = &input[1..];
                return Ok((input, Value::String(result)));
            }
            Some('\\') => {
                let rest = &input[1..];
                match rest.chars().next() {
                    Some('\\') => {
                        result.push('\\');
                        input = &rest[1..];
                    }
                    Some('"') => {
                        result.push('"');
                        input = &rest[1..];
                    }
                    Some('n') => {
                        result.push('\n');
                        input = &rest[1..];
                    }
                    Some('r') => {
                        result.push('\r');
                        input = &rest[1..];
                    }
                    Some('t') => {
                        result.push('\t');
                        input = &rest[1..];
                    }
                    _ => return Err(nom_fail(input)),
                }
            }
            Some(c) => {
                result.push(c);
                input = &input[c.len_utf8()..];
            }
        }
    }
}

/// `#\` followed by one or more letters. `newline`/`space` are named; a
/// single letter spells itself; anything else is a parse error.
fn parse_char(input: &str) -> IResult<&str, Value> {
    let (input, _) = tag("#\\")(input)?;
    let (input, letters) =
        nom::bytes::complete::take_while1(|c: char| c.is_ascii_alphabetic()).parse(input)?;

    let value = match letters {
        "newline" => '\n',
        "space" => ' ',
        s if s.chars().count() == 1 => s.chars().next().unwrap(),
        _ => return Err(nom_fail(input)),
    };
    Ok((input, Value::Char(value)))
}

fn is_symbol_char(c: char) -> bool {
    SYMBOL_CHARS.contains(c)
}

/// One `letter|symbol` followed by zero or more `letter|digit|symbol`.
/// `#t`/`#f` are promoted to `Bool`. The bare one-character atom `"#"` is
/// refused so that `#(...)` can fall through to the Vector alternative —
/// see SPEC_FULL.md.
fn parse_atom(input: &str) -> IResult<&str, Value> {
    let (rest, first) = one_of(&*format!(
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ{}",
        SYMBOL_CHARS
    ))
    .parse(input)?;

    let (rest, tail) =
        nom::bytes::complete::take_while(|c: char| c.is_alphanumeric() || is_symbol_char(c))
            .parse(rest)?;

    let mut text = String::new();
    text.push(first);
    text.push_str(tail);

    if text == "#" {
        return Err(nom_fail(input));
    }

    let value = match text.as_str() {
        "#t" => Value::Bool(true),
        "#f" => Value::Bool(false),
        _ => Value::Atom(text),
    };
    Ok((rest, value))
}

/// `'EXPR` => `(quote EXPR)`.
fn parse_quoted(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('\'')(input)?;
    let (input, expr) = parse_expr(input)?;
    Ok((
        input,
        Value::List(vec![Value::Atom("quote".to_string()), expr]),
    ))
}

/// `#( E1 E2 ... En )` => Vector.
fn parse_vector(input: &str) -> IResult<&str, Value> {
    let (input, _) = tag("#(")(input)?;
    let (mut input, _) = ws(input)?;
    let mut items = Vec::new();

    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(input) {
            return Ok((rest, Value::Vector(items)));
        }
        let (rest, expr) = parse_expr(input)?;
        items.push(expr);
        let (rest, _) = ws(rest)?;
        input = rest;
    }
}

/// `( E1 ... Ek . Etail )` or `( E1 ... En )`.
fn parse_list(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('(')(input)?;
    let (mut input, _) = ws(input)?;
    let mut items = Vec::new();

    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(input) {
            return Ok((rest, Value::List(items)));
        }

        // dotted tail: `. Etail )`
        if items.first().is_some() {
            if let Ok((rest, _)) = char::<_, nom::error::Error<_>>('.')(input) {
                // a standalone '.' must be followed by whitespace to count as the
                // dotted-pair marker rather than the start of some other token
                if rest.starts_with(|c: char| c.is_whitespace()) {
                    let (rest, _) = ws(rest)?;
                    let (rest, tail) = parse_expr(rest)?;
                    let (rest, _) = ws(rest)?;
                    let (rest, _) = char(')')(rest)?;
                    return Ok((rest, Value::DottedList(items, Box::new(tail))));
                }
            }
        }

        let (rest, expr) = parse_expr(input)?;
        items.push(expr);
        let (rest, _) = ws(rest)?;
        input = rest;
    }
}

/// `` ` ( items ) `` with `, EXPR` rewritten structurally into `(unquote EXPR)`.
/// No splicing is performed; a `,@` inside the quasiquote is a parse error.
fn parse_quasiquote(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('`')(input)?;
    let (input, _) = char('(')(input)?;
    let (mut input, _) = ws(input)?;
    let mut items = Vec::new();

    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(input) {
            return Ok((
                rest,
                Value::List(vec![
                    Value::Atom("quasiquote".to_string()),
                    Value::List(items),
                ]),
            ));
        }
        let (rest, item) = parse_qq_item(input)?;
        items.push(item);
        let (rest, _) = ws(rest)?;
        input = rest;
    }
}

fn parse_qq_item(input: &str) -> IResult<&str, Value> {
    if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(',')(input) {
        if rest.starts_with('@') {
            return Err(nom_fail(input));
        }
        let (rest, expr) = parse_expr(rest)?;
        return Ok((
            rest,
            Value::List(vec![Value::Atom("unquote".to_string()), expr]),
        ));
    }

    if input.starts_with('(') {
        let (input, _) = char('(')(input)?;
        let (mut input, _) = ws(input)?;
        let mut items = Vec::new();
        loop {
            if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(input) {
                return Ok((rest, Value::List(items)));
            }
            let (rest, item) = parse_qq_item(input)?;
            items.push(item);
            let (rest, _) = ws(rest)?;
            input = rest;
        }
    }

    parse_expr(input)
}

/// Main expression parser - tries all alternatives, in the priority order
/// fixed by spec.md §4.1.
fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws(input)?;
    alt((
        parse_rational,
        parse_complex,
        parse_number,
        parse_decimal,
        parse_string,
        parse_char,
        parse_atom,
        parse_quoted,
        parse_vector,
        parse_list,
        parse_quasiquote,
    ))
    .parse(input)
}

fn nom_fail(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Fail))
}

fn position_of(original: &str, remaining: &str) -> usize {
    original.len() - remaining.len()
}

/// Parses exactly one expression. Any non-whitespace left over after the
/// expression is an error — callers needing multiple expressions should use
/// `read_all`.
pub fn read_one(input: &str) -> Result<Value, EvalError> {
    match parse_expr(input) {
        Ok((rest, value)) => {
            let (rest, _) = ws(rest).unwrap_or((rest, ()));
            if rest.is_empty() {
                Ok(value)
            } else {
                Err(EvalError::Parser(format!(
                    "{} expected end of input",
                    position_of(input, rest)
                )))
            }
        }
        Err(_) => Err(EvalError::Parser(format!(
            "{} expected expression",
            position_of(input, input.trim_start())
        ))),
    }
}

/// Parses a whitespace-separated sequence of expressions, consuming the
/// entire input. Returns the expressions it found and their exact text
/// offsets are not exposed to callers.
pub fn read_all(input: &str) -> Result<Vec<Value>, EvalError> {
    let mut remaining = input;
    let mut values = Vec::new();

    loop {
        let (rest, _) = ws(remaining).unwrap_or((remaining, ()));
        if rest.is_empty() {
            return Ok(values);
        }
        match parse_expr(rest) {
            Ok((rest2, value)) => {
                values.push(value);
                remaining = rest2;
            }
            Err(_) => {
                return Err(EvalError::Parser(format!(
                    "{} expected expression",
                    position_of(input, rest)
                )));
            }
        }
    }
}

/// Parses one expression and returns it along with the unconsumed remainder
/// of the input, without requiring the remainder to be empty. Used by the
/// `read` primitive against an in-memory port buffer.
pub fn read_one_with_rest(input: &str) -> Result<(Value, &str), EvalError> {
    match parse_expr(input) {
        Ok((rest, value)) => Ok((value, rest)),
        Err(_) => Err(EvalError::Parser(format!(
            "{} expected expression",
            position_of(input, input.trim_start())
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert!(matches!(read_one("42"), Ok(Value::Number(42))));
        assert!(matches!(read_one("0"), Ok(Value::Number(0))));
    }

    #[test]
    fn test_parse_hex_and_octal() {
        assert!(matches!(read_one("#x1F"), Ok(Value::Number(31))));
        assert!(matches!(read_one("#o17"), Ok(Value::Number(15))));
    }

    #[test]
    fn test_parse_decimal_float() {
        match read_one("#d3.5") {
            Ok(Value::Float(n)) => assert!((n - 3.5).abs() < 1e-9),
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rational() {
        assert!(matches!(read_one("3/4"), Ok(Value::Rational(3, 4))));
        assert!(read_one("3/0").is_err());
    }

    #[test]
    fn test_parse_complex() {
        match read_one("3+4i") {
            Ok(Value::Complex(r, i)) => {
                assert!((r - 3.0).abs() < 1e-9);
                assert!((i - 4.0).abs() < 1e-9);
            }
            other => panic!("expected complex, got {:?}", other),
        }

        match read_one("3-4i") {
            Ok(Value::Complex(_, i)) => assert!((i + 4.0).abs() < 1e-9),
            other => panic!("expected complex, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bool() {
        assert!(matches!(read_one("#t"), Ok(Value::Bool(true))));
        assert!(matches!(read_one("#f"), Ok(Value::Bool(false))));
    }

    #[test]
    fn test_parse_atom() {
        assert!(matches!(read_one("foo-bar?"), Ok(Value::Atom(s)) if s == "foo-bar?"));
        assert!(matches!(read_one("+"), Ok(Value::Atom(s)) if s == "+"));
        assert!(matches!(read_one("else"), Ok(Value::Atom(s)) if s == "else"));
    }

    #[test]
    fn test_parse_string_with_escapes() {
        assert!(matches!(read_one(r#""hello""#), Ok(Value::String(s)) if s == "hello"));
        assert!(matches!(read_one(r#""a\nb""#), Ok(Value::String(s)) if s == "a\nb"));
        assert!(matches!(read_one(r#""say \"hi\"""#), Ok(Value::String(s)) if s == "say \"hi\""));
        assert!(read_one(r#""bad\qescape""#).is_err());
    }

    #[test]
    fn test_parse_char() {
        assert!(matches!(read_one("#\\a"), Ok(Value::Char('a'))));
        assert!(matches!(read_one("#\\space"), Ok(Value::Char(' '))));
        assert!(matches!(read_one("#\\newline"), Ok(Value::Char('\n'))));
        assert!(read_one("#\\zzz").is_err());
    }

    #[test]
    fn test_parse_quoted() {
        match read_one("'x") {
            Ok(Value::List(items)) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[0], Value::Atom(s) if s == "quote"));
                assert!(matches!(&items[1], Value::Atom(s) if s == "x"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_vector() {
        match read_one("#(1 2 3)") {
            Ok(Value::Vector(items)) => assert_eq!(items.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }
        match read_one("#()") {
            Ok(Value::Vector(items)) => assert!(items.is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_proper_and_dotted_list() {
        match read_one("(1 2 3)") {
            Ok(Value::List(items)) => assert_eq!(items.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }

        match read_one("(1 2 . 3)") {
            Ok(Value::DottedList(items, tail)) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(*tail, Value::Number(3)));
            }
            other => panic!("unexpected: {:?}", other),
        }

        assert!(matches!(read_one("()"), Ok(Value::List(items)) if items.is_empty()));
    }

    #[test]
    fn test_parse_quasiquote_rewrites_unquote() {
        match read_one("`(a ,b c)") {
            Ok(Value::List(outer)) => {
                assert!(matches!(&outer[0], Value::Atom(s) if s == "quasiquote"));
                match &outer[1] {
                    Value::List(items) => {
                        assert_eq!(items.len(), 3);
                        match &items[1] {
                            Value::List(uq) => {
                                assert!(matches!(&uq[0], Value::Atom(s) if s == "unquote"));
                            }
                            other => panic!("unexpected: {:?}", other),
                        }
                    }
                    other => panic!("unexpected: {:?}", other),
                }
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_unclosed_list() {
        assert!(read_one("(1 2").is_err());
    }

    #[test]
    fn test_parse_trailing_input_is_error() {
        assert!(read_one("1 2").is_err());
    }

    #[test]
    fn test_read_all_multiple_expressions() {
        let values = read_all("1 2 (+ 1 2)").unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_parse_complex_expr() {
        match read_one("(define (square x) (* x x))") {
            Ok(Value::List(items)) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(&items[0], Value::Atom(s) if s == "define"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
