use proptest::prelude::*;
use trio::{Context, Value, parse, run};

fn eval_literal(literal: &str) -> Option<Value> {
    let src = format!("return {literal};");
    run(&src, "prop", &mut Context::new()).unwrap_or_else(|e| panic!("{src} failed: {e}"))
}

/// One piece of a string literal: its source spelling and the text it stands for.
fn string_piece() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        "[a-zA-Z0-9 ]".prop_map(|c| (c.clone(), c)),
        prop::sample::select(vec![(r"\t", "\t"),
                                  (r"\n", "\n"),
                                  (r"\r", "\r"),
                                  (r"\a", "\u{07}"),
                                  (r"\b", "\u{08}"),
                                  (r"\v", "\u{0B}"),
                                  (r"\f", "\u{0C}"),
                                  (r"\\", "\\"),
                                  (r#"\""#, "\""),
                                  (r"\q", "q")]).prop_map(|(s, t)| (s.to_string(), t.to_string())),
        (0x20u32..0xD7FF).prop_map(|code| {
            let c = char::from_u32(code).unwrap_or(' ');
            (format!(r"\x{code:04x}"), c.to_string())
        }),
        (octal_code(), any::<bool>()).prop_map(|(code, prefixed)| {
            let c = char::from_u32(code).unwrap_or(' ');
            let marker = if prefixed { "o" } else { "" };
            (format!(r"\{marker}{code:03o}"), c.to_string())
        }),
    ]
}

/// A three digit octal code using the digits `0` to `6`.
fn octal_code() -> impl Strategy<Value = u32> {
    (0u32..7, 0u32..7, 0u32..7).prop_map(|(a, b, c)| a * 64 + b * 8 + c)
}

fn eval_with(src: &str, a: i32, b: i32) -> Option<Value> {
    let mut context = Context::new();
    context.define_variable("a", Value::Integer(a)).unwrap();
    context.define_variable("b", Value::Integer(b)).unwrap();
    run(src, "prop", &mut context).unwrap_or_else(|e| panic!("{src} failed: {e}"))
}

proptest! {
    /// Arbitrary input yields a script or an error, never a panic.
    #[test]
    fn parser_does_not_panic(s in "\\PC*") {
        let _ = parse(&s, "prop");
    }

    #[test]
    fn decimal_literals_survive_lexing(n in 0..=i32::MAX) {
        let src = format!("return {n};");
        prop_assert_eq!(run(&src, "prop", &mut Context::new()).unwrap(), Some(Value::Integer(n)));
    }

    #[test]
    fn hex_literals_survive_lexing(n in any::<u32>()) {
        let src = format!("return {n:#x};");
        prop_assert_eq!(run(&src, "prop", &mut Context::new()).unwrap(),
                        Some(Value::Integer(n as i32)));
    }

    #[test]
    fn plain_strings_survive_lexing(s in "[^\"\\\\\r\n]*") {
        let src = format!("return \"{s}\";");
        prop_assert_eq!(run(&src, "prop", &mut Context::new()).unwrap(),
                        Some(Value::from(s.as_str())));
    }

    #[test]
    fn integer_arithmetic_wraps(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(eval_with("return a + b;", a, b), Some(Value::Integer(a.wrapping_add(b))));
        prop_assert_eq!(eval_with("return a - b;", a, b), Some(Value::Integer(a.wrapping_sub(b))));
        prop_assert_eq!(eval_with("return a * b;", a, b), Some(Value::Integer(a.wrapping_mul(b))));
    }

    #[test]
    fn division_truncates_toward_zero(a in any::<i32>(), b in any::<i32>().prop_filter("non-zero", |b| *b != 0)) {
        prop_assert_eq!(eval_with("return a / b;", a, b), Some(Value::Integer(a.wrapping_div(b))));
        prop_assert_eq!(eval_with("return a % b;", a, b), Some(Value::Integer(a.wrapping_rem(b))));
    }

    #[test]
    fn comparisons_agree_with_rust(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(eval_with("return a < b;", a, b), Some(Value::Bool(a < b)));
        prop_assert_eq!(eval_with("return a >= b;", a, b), Some(Value::Bool(a >= b)));
        prop_assert_eq!(eval_with("return a == b ? 1 : 0;", a, b), Some(Value::Integer(i32::from(a == b))));
    }

    #[test]
    fn double_literals_survive_lexing(int in 0u32..100_000, frac in "[0-9]{1,6}", exp in -30i32..30) {
        for literal in [format!("{int}.{frac}"),
                        format!(".{frac}"),
                        format!("{int}e{exp}"),
                        format!("{int}.{frac}E{exp}")]
        {
            let expected: f64 = literal.parse().unwrap();
            prop_assert_eq!(eval_literal(&literal), Some(Value::Double(expected)), "{}", literal);
        }
    }

    #[test]
    fn rust_float_formatting_survives_lexing(x in 0.0f64..1e300) {
        prop_assert_eq!(eval_literal(&format!("{x:?}")), Some(Value::Double(x)));
    }

    #[test]
    fn boolean_literals_survive_lexing(b in any::<bool>()) {
        prop_assert_eq!(eval_literal(&b.to_string()), Some(Value::Bool(b)));
    }

    #[test]
    fn escaped_strings_survive_lexing(pieces in prop::collection::vec(string_piece(), 0..12)) {
        let source: String = pieces.iter().map(|(s, _)| s.as_str()).collect();
        let expected: String = pieces.iter().map(|(_, t)| t.as_str()).collect();
        prop_assert_eq!(eval_literal(&format!("\"{source}\"")), Some(Value::from(expected.as_str())));
    }
}
