use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    sequence::{delimited, pair},
    IResult,
};

use crate::core::Value;

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        |s: &str| s.to_string(),
    )(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
    ))(input)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })(input)
}

/// Converts one raw token into a typed scalar.
///
/// Rules, tried in order: a token wrapped in one matching pair of quotes is
/// the interior as text (no escape processing); `true`/`false` in any case
/// is a boolean; a whole-token base-10 integer is an integer; anything else
/// is the raw token as text. There is no failure path, and quoting is the
/// only way to force a literal string that also reads as a number or
/// boolean.
#[must_use]
pub fn scalar(token: &str) -> Value {
    let token = token.trim();
    if let Ok((_, interior)) = all_consuming(quoted)(token) {
        return Value::Text(interior.to_string());
    }
    if token.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok((_, n)) = all_consuming(integer)(token) {
        return Value::Integer(n);
    }
    Value::Text(token.to_string())
}

/// A shell-style argument: a quoted string (quotes stripped) or a bare word.
pub fn token(input: &str) -> IResult<&str, String> {
    alt((
        map(quoted, |s: &str| s.to_string()),
        map(take_while1(|c: char| !c.is_whitespace()), |s: &str| {
            s.to_string()
        }),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_quoted_overrides_numeric() {
        assert_eq!(scalar("'42'"), Value::Text("42".to_string()));
        assert_eq!(scalar("\"true\""), Value::Text("true".to_string()));
    }

    #[test]
    fn test_scalar_boolean() {
        assert_eq!(scalar("true"), Value::Boolean(true));
        assert_eq!(scalar("FALSE"), Value::Boolean(false));
    }

    #[test]
    fn test_scalar_integer() {
        assert_eq!(scalar("7"), Value::Integer(7));
        assert_eq!(scalar("-13"), Value::Integer(-13));
    }

    #[test]
    fn test_scalar_fallback_text() {
        assert_eq!(scalar("hello"), Value::Text("hello".to_string()));
        // Partial matches fall through to text.
        assert_eq!(scalar("7x"), Value::Text("7x".to_string()));
        assert_eq!(scalar("'open"), Value::Text("'open".to_string()));
    }

    #[test]
    fn test_token_quoted_and_bare() {
        assert_eq!(token("'John Smith' 30"), Ok((" 30", "John Smith".to_string())));
        assert_eq!(token("Alice 30"), Ok((" 30", "Alice".to_string())));
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("users rest"), Ok((" rest", "users".to_string())));
        assert_eq!(identifier("_tmp1"), Ok(("", "_tmp1".to_string())));
        assert!(identifier("1users").is_err());
    }
}
