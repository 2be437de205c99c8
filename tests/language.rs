use trio::{
    Context, DEFAULT_MAX_CALL_DEPTH, Function, NativeFunction, ParseError, RuntimeError, Value, parse,
    parse_lines, run,
};

fn eval(src: &str) -> Option<Value> {
    run(src, "test", &mut Context::new()).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn assert_returns(src: &str, expected: impl Into<Value>) {
    assert_eq!(eval(src), Some(expected.into()), "script: {src}");
}

fn runtime_error(src: &str) -> RuntimeError {
    runtime_error_in(src, &mut Context::new())
}

fn runtime_error_in(src: &str, context: &mut Context) -> RuntimeError {
    let script = parse(src, "test").unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"));
    match script.execute(context) {
        Ok(value) => panic!("Script succeeded with {value:?} but was expected to fail\n{src}"),
        Err(e) => e,
    }
}

fn parse_error(src: &str) -> ParseError {
    match parse(src, "test") {
        Ok(_) => panic!("Script parsed but was expected to fail\n{src}"),
        Err(e) => e,
    }
}

#[test]
fn integer_and_double_arithmetic() {
    assert_returns("return 1 + 2 * 3;", 7);
    assert_returns("return 7 / 2;", 3);
    assert_returns("return -7 / 2;", -3);
    assert_returns("return -7 % 3;", -1);
    assert_returns("return 7 % -3;", 1);
    assert_returns("return 1.5 * 2.0;", 3.0);
    assert_returns("return 1 + 2.5;", 3.5);
    assert_returns("return 5 / 2.0;", 2.5);
    assert_returns("return 0xFF + 1;", 256);
    assert_returns("return .5 + 1e1;", 10.5);
    assert_returns("return 2147483647 + 1;", i32::MIN);
}

#[test]
fn precedence_and_associativity() {
    assert_returns("return 10 - 3 - 2;", 5);
    assert_returns("return 1 + 2 * 3 << 1;", 14);
    assert_returns("return 1 | 2 ^ 3 & 1;", 3);
    assert_returns("return 1 < 2 == true;", true);
    assert_returns("return (1 + 2) * 3;", 9);
    assert_returns("return true || false && false;", true);
    assert_returns("return -2 * -3;", 6);
    assert_returns("return ~0 & 0xF;", 15);
    assert_returns("return !!true;", true);
}

#[test]
fn conditional_expression() {
    assert_returns(r#"return 1 < 2 ? "yes" : "no";"#, "yes");
    assert_returns("return false ? 1 : true ? 2 : 3;", 2);
    assert_returns("var x = 5; return x > 3 ? x * 2 : x;", 10);
}

#[test]
fn strings_and_lists() {
    assert_returns(r#"return "a" + "b";"#, "ab");
    assert_returns(r#"return "tab\there";"#, "tab\there");
    assert_returns("return to_string([1, 2] + [3]);", "[1,2,3]");
    assert_returns("return [1, 2] == [1, 2];", true);
    assert_returns("return [1, 2] == [2, 1];", false);
    assert_returns("return [1, 2] != [1];", true);
    assert_returns("return [] == [];", true);
    assert_returns(r#"return "abc" == "abc";"#, true);
}

#[test]
fn numeric_comparison_promotes() {
    assert_returns("return 1 == 1.0;", true);
    assert_returns("return 1 < 1.5;", true);
    assert_returns("return [1] == [1.0];", false);
}

#[test]
fn logical_operators_short_circuit() {
    assert_returns("return false && (1 / 0 == 0);", false);
    assert_returns("return true || (1 / 0 == 0);", true);
    assert!(matches!(runtime_error("return true && (1 / 0 == 0);"),
                     RuntimeError::OperatorFailed { op: "/", .. }));
}

#[test]
fn logical_operators_require_booleans() {
    let err = runtime_error("return 1 && true;");
    assert!(err.to_string().ends_with("failed to apply && operator - left operand is not boolean"));
    let err = runtime_error("return false || 1;");
    assert!(err.to_string().ends_with("failed to apply || operator - right operand is not boolean"));
}

#[test]
fn operator_type_errors() {
    let err = runtime_error(r#"return "a" - 1;"#);
    assert_eq!(err.to_string(),
               "test(1,12): failed to apply - operator - not defined for combination of input values");
    let err = runtime_error(r#"return -"a";"#);
    assert!(err.to_string().ends_with("inner value is not number"));
    let err = runtime_error("return ~1.5;");
    assert!(err.to_string().ends_with("inner value is not integer"));
    let err = runtime_error("return !1;");
    assert!(err.to_string().ends_with("inner value is not boolean"));
    let err = runtime_error("return 1 % 0;");
    assert!(err.to_string().ends_with("division by zero"));
}

#[test]
fn variables_and_assignment() {
    assert_returns("var a; var b = a = 3; return a + b;", 6);
    assert_returns("var a; var b; a = b = 2; return a * b;", 4);
    assert_returns("var Abc = 1; return ABC + abc;", 2);
    assert!(matches!(runtime_error("var x; return x;"),
                     RuntimeError::VariableNotInitialized { .. }));
    assert!(matches!(runtime_error("var x = x;"), RuntimeError::VariableNotInitialized { .. }));
    assert!(matches!(runtime_error("y = 1;"), RuntimeError::VariableNotDefined { .. }));
}

#[test]
fn block_variables_are_scoped() {
    match runtime_error("{ var x = 1; } var y = x;") {
        RuntimeError::VariableNotDefined { name, .. } => assert_eq!(name, "x"),
        other => panic!("unexpected error {other}"),
    }
    assert!(matches!(runtime_error("if (true) var x = 1; return x;"),
                     RuntimeError::VariableNotDefined { .. }));
    assert_returns("var x = 1; { var x = 2; } return x;", 1);
    assert_returns("var x = 1; { x = 2; } return x;", 2);
}

#[test]
fn redeclaration_in_same_scope_fails() {
    let err = runtime_error("{ var a = 1; var a = 2; }");
    assert!(matches!(err, RuntimeError::VariableAlreadyDefined { .. }));
    assert!(err.to_string().contains("variable a already defined"));
}

#[test]
fn list_indexing_and_aliasing() {
    assert_returns("var l = [1, 2, 3]; l[1] = 20; return l[1] + l[2];", 23);
    assert_returns("var a = [1, 2]; var b = a; b[0] = 9; return a[0];", 9);
    assert_returns("var l = [[1, 2], [3]]; var inner = l[0]; inner[1] = 5; return to_string(l);",
                   "[[1,5],[3]]");
}

#[test]
fn index_errors() {
    let err = runtime_error("var l = [1,2]; var x = l[5];");
    assert!(matches!(err, RuntimeError::IndexOutOfRange { index: 5, .. }));
    assert_eq!(err.to_string(), "test(1,26): index 5 out of range");
    assert!(matches!(runtime_error("var l = [1]; var x = l[-1];"),
                     RuntimeError::IndexOutOfRange { index: -1, .. }));
    assert!(matches!(runtime_error("var l = [1]; var x = l[0.0];"),
                     RuntimeError::IndexNotInteger { .. }));
    assert!(matches!(runtime_error("var s = 1; s[0] = 2;"),
                     RuntimeError::VariableNotCollection { .. }));
    assert!(matches!(runtime_error("var l; l[0] = 2;"),
                     RuntimeError::VariableNotInitialized { .. }));
}

#[test]
fn if_else_chains() {
    let src = "func sign(x) { if (x < 0) return -1; else if (x == 0) return 0; else return 1; }
               return [sign(-5), sign(0), sign(7)] == [-1, 0, 1];";
    assert_returns(src, true);
    assert!(matches!(runtime_error("if (1) { }"), RuntimeError::ConditionNotBoolean { .. }));
}

#[test]
fn while_with_break_and_continue() {
    assert_returns("var n = 0; while (true) { n = n + 1; if (n == 3) break; } return n;", 3);
    let src = "var i = 0; var s = 0;
               while (i < 6) { i = i + 1; if (i % 2 == 0) continue; s = s + i; }
               return s;";
    assert_returns(src, 9);
    assert!(matches!(runtime_error("while (1) { }"), RuntimeError::ConditionNotBoolean { .. }));
}

#[test]
fn for_loops() {
    assert_returns("var s = 0; for (var i = 0; i < 5; i = i + 1) s = s + i; return s;", 10);
    assert_returns("var i; for (i = 0; i < 5; i = i + 1) { } return i;", 5);
    let src = "var s = 0;
               for (var i = 0; i < 5; i = i + 1) { if (i % 2 == 0) continue; s = s + i; }
               return s;";
    assert_returns(src, 4);
    assert_returns("var s = 0; for (var i = 0; true; i = i + 1) { if (i == 4) break; s = s + i; } return s;",
                   6);
}

#[test]
fn for_induction_variable_is_scoped() {
    let err = runtime_error("for (var i = 0; i < 3; i = i + 1) { } var z = i;");
    assert!(matches!(err, RuntimeError::VariableNotDefined { .. }));
}

#[test]
fn foreach_loops() {
    assert_returns("var s = 0; foreach (x in [1, 2, 3]) s = s + x; return s;", 6);
    assert_returns("var s = 0; foreach (var x in [1, 2, 3]) { if (x == 2) break; s = s + x; } return s;",
                   1);
    assert_returns("var s = 0; foreach (x in [1, 2, 3]) { if (x == 2) continue; s = s + x; } return s;",
                   4);
    assert_returns("var l = [1, 2, 3]; var s = 0; foreach (x in l) { l[2] = 10; s = s + x; } return s;",
                   13);
    assert!(matches!(runtime_error("foreach (x in 5) { }"),
                     RuntimeError::ExpressionNotCollection { .. }));
    assert!(matches!(runtime_error("foreach (x in [1]) { } return x;"),
                     RuntimeError::VariableNotDefined { .. }));
}

#[test]
fn user_functions() {
    assert_returns("func f(a, b) { return a + b; } return f(2, 3);", 5);
    assert!(matches!(runtime_error("func f(a, b) { return a + b; } return f(2);"),
                     RuntimeError::ParameterCountMismatch { .. }));
    assert_returns("return twice(4); func twice(x) { return x * 2; }", 8);
    assert_returns("func Foo() { return 1; } return FOO();", 1);
    assert_returns("func fact(n) { return n <= 1 ? 1 : n * fact(n - 1); } return fact(10);",
                   3_628_800);
}

#[test]
fn variadic_functions() {
    assert_returns("func g(a, ...) { return count_of(...); } return g(1, 2, 3, 4);", 3);
    assert_returns("func g(a, ...) { return count_of(...); } return g(1);", 0);
    assert_returns("func sum(...) { var s = 0; foreach (x in ...) s = s + x; return s; } return sum(1, 2, 3);",
                   6);
    assert_returns("func last(...) { return ...[count_of(...) - 1]; } return last(1, 2, 9);", 9);
    assert!(matches!(runtime_error("func g(a, ...) { return a; } return g();"),
                     RuntimeError::ParameterCountMismatch { .. }));
    assert!(matches!(runtime_error("func g(a) { return count_of(...); } return g(1);"),
                     RuntimeError::VariableNotDefined { .. }));
}

#[test]
fn function_bodies_resolve_names_through_the_caller() {
    assert_returns("var g = 10; func f() { return g; } return f();", 10);
    assert_returns("var g = 10; func f() { g = g + 1; } f(); f(); return g;", 12);
    assert_returns("var x = 1; func f(x) { return x; } return f(5) + x;", 6);
    let src = "func f() { return local; }
               func h() { var local = 1; return f(); }
               return h();";
    assert_returns(src, 1);
    let src = "func bump() { count = count + 1; }
               func twice() { var count = 0; bump(); bump(); return count; }
               return twice();";
    assert_returns(src, 2);
    let src = "func f() { return x; }
               func h(x) { return f(); }
               return h(7) + h(8);";
    assert_returns(src, 15);
    assert!(matches!(runtime_error("func f() { var inner = 1; } f(); return inner;"),
                     RuntimeError::VariableNotDefined { .. }));
    assert!(matches!(runtime_error("func f() { return local; } return f();"),
                     RuntimeError::VariableNotDefined { .. }));
}

#[test]
fn function_results() {
    assert_returns("func f() { } f(); return 1;", 1);
    let err = runtime_error("func f() { } var x = f();");
    assert!(matches!(err, RuntimeError::MissingReturnValue { .. }));
    assert!(err.to_string().ends_with("function f should return value"));
    assert_returns("func first(l) { foreach (x in l) { if (x > 1) return x; } return -1; } return first([0, 5, 7]);",
                   5);
    assert!(matches!(runtime_error("return nope(1);"), RuntimeError::FunctionNotDefined { .. }));
}

#[test]
fn function_redefinition_is_error() {
    assert!(matches!(runtime_error("func a() { } func A() { }"),
                     RuntimeError::FunctionAlreadyDefined { .. }));
    assert!(matches!(runtime_error("func to_string(x) { return x; }"),
                     RuntimeError::FunctionAlreadyDefined { .. }));
    assert!(matches!(runtime_error("func f(a, a) { } f(1, 2);"),
                     RuntimeError::VariableAlreadyDefined { .. }));
}

#[test]
fn break_and_continue_outside_loops() {
    assert!(matches!(runtime_error("break;"), RuntimeError::BreakOutsideLoop { .. }));
    assert!(matches!(runtime_error("if (true) continue;"),
                     RuntimeError::ContinueOutsideLoop { .. }));
    let err = runtime_error("func f() { break; } while (true) { f(); }");
    assert!(matches!(err, RuntimeError::BreakOutsideLoop { .. }));
    assert_eq!(err.to_string(), "test(1,12): break without surrounding for or while");
}

#[test]
fn top_level_return() {
    assert_eq!(eval("return;"), None);
    assert_eq!(eval("var x = 1;"), None);
    assert_returns("var x = 1; if (x == 1) { return \"early\"; } return \"late\";", "early");
}

#[test]
fn builtins() {
    assert_returns("return to_string(1.5);", "1.5");
    assert_returns("return to_string(3.0);", "3");
    assert_returns(r#"return to_string([1, "a", true]);"#, "[1,a,true]");
    assert_returns(r#"return to_string("x");"#, "x");
    assert_returns("return to_int(-3.9);", -3);
    assert_returns("return to_int(true) + to_int(false);", -1);
    assert_returns("return to_int(7);", 7);
    assert_returns("return count_of([1, [2, 3]]);", 2);
    assert!(matches!(runtime_error(r#"return to_int("1");"#),
                     RuntimeError::ConversionFailed { .. }));
    assert!(matches!(runtime_error("return to_int(1e20);"),
                     RuntimeError::ConversionFailed { .. }));
    assert!(matches!(runtime_error(r#"return count_of("abc");"#),
                     RuntimeError::ExpressionNotCollection { .. }));
    assert!(matches!(runtime_error("return count_of(1, 2);"),
                     RuntimeError::ParameterCountMismatch { .. }));
}

#[test]
fn call_depth_is_limited() {
    let mut context = Context::new().with_max_call_depth(16);
    let err = runtime_error_in("func r(n) { return r(n + 1); } return r(0);", &mut context);
    assert!(matches!(err, RuntimeError::CallDepthExceeded { depth: 16, .. }));

    let mut context = Context::new().with_max_call_depth(16);
    let result = run("func down(n) { return n == 0 ? 0 : down(n - 1); } return down(15);",
                     "test",
                     &mut context).unwrap();
    assert_eq!(result, Some(Value::Integer(0)));
}

const SMALL_STACK: usize = 2 * 1024 * 1024;

/// Runs `r(depth)` on a fresh 2 MiB thread and renders the outcome.
fn recurse_on_small_stack(depth: usize, max_call_depth: usize) -> Result<String, String> {
    std::thread::Builder::new().stack_size(SMALL_STACK)
                               .spawn(move || {
                                   let src = format!("func r(n) {{ if (n > 0) {{ return 1 + r(n - 1); }} return 0; }}
                                                      return r({depth});");
                                   let mut context = Context::new().with_max_call_depth(max_call_depth);
                                   run(&src, "deep", &mut context).map(|v| format!("{v:?}"))
                                                                  .map_err(|e| e.to_string())
                               })
                               .unwrap()
                               .join()
                               .unwrap()
}

#[test]
fn default_call_depth_fits_a_small_thread_stack() {
    let depth = DEFAULT_MAX_CALL_DEPTH - 1;
    assert_eq!(recurse_on_small_stack(depth, DEFAULT_MAX_CALL_DEPTH),
               Ok(format!("{:?}", Some(Value::Integer(i32::try_from(depth).unwrap())))));

    let err = recurse_on_small_stack(DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_CALL_DEPTH).unwrap_err();
    assert!(err.ends_with(&format!("call depth limit {DEFAULT_MAX_CALL_DEPTH} exceeded")), "{err}");
}

#[test]
fn raised_call_depth_grows_past_the_thread_stack() {
    assert_eq!(recurse_on_small_stack(1500, 2000),
               Ok(format!("{:?}", Some(Value::Integer(1500)))));
}

#[test]
fn host_natives_and_variables() {
    let mut context = Context::new();
    context.define_variable("limit", Value::Integer(3)).unwrap();
    context.define_function(Function::native(NativeFunction::new("join", &["sep"], true, |a| {
                                let sep = a.argument("sep")?.to_string();
                                let parts: Vec<String> = a.variadic_arguments()
                                                          .iter()
                                                          .map(ToString::to_string)
                                                          .collect();
                                Ok(Some(Value::from(parts.join(&sep))))
                            })))
           .unwrap();
    context.define_function(Function::native(NativeFunction::new("fail", &[], false, |a| {
                                Err(a.error("boom"))
                            })))
           .unwrap();

    let result = run(r#"return join("-", 1, limit, "x");"#, "host", &mut context).unwrap();
    assert_eq!(result, Some(Value::from("1-3-x")));

    let err = runtime_error_in("fail();", &mut context);
    assert_eq!(err.to_string(), "test(1,1): boom");

    assert!(context.define_variable("LIMIT", Value::Integer(1)).is_err());
}

#[test]
fn runtime_errors_carry_positions() {
    let err = runtime_error("var a = 1;\nvar b = c;");
    assert_eq!(err.to_string(), "test(2,9): variable c not defined");
}

#[test]
fn parse_errors() {
    assert!(matches!(parse_error("var x = #;"), ParseError::UnknownToken { .. }));
    let err = parse_error("var x = 1");
    assert!(matches!(err, ParseError::UnexpectedEndOfFile { .. }));
    assert_eq!(err.to_string(), "test(1,9): unexpected end of file");
    assert_eq!(parse_error("{ var x = 1;\n").to_string(), "test(1,12): unexpected end of file");
    assert!(matches!(parse_error("var 1 = 2;"), ParseError::IdentifierExpected { .. }));
    assert!(matches!(parse_error("while (true)"), ParseError::UnexpectedEndOfFile { .. }));
    assert!(matches!(parse_error("while (true) func"), ParseError::StatementExpected { .. }));
    assert!(matches!(parse_error("return 1 +;"), ParseError::SubExpressionExpected { .. }));
    assert!(matches!(parse_error("return -;"), ParseError::SubExpressionExpected { .. }));
    assert!(matches!(parse_error("return (;"), ParseError::ExpressionExpected { .. }));
    assert!(matches!(parse_error("while true { }"), ParseError::SymbolExpected { symbol: "(", .. }));
    assert!(matches!(parse_error("return 1 ? 2;"), ParseError::SymbolExpected { symbol: ":", .. }));
    assert!(matches!(parse_error("foreach (x of l) { }"),
                     ParseError::KeywordExpected { keyword: "in", .. }));
    assert!(matches!(parse_error("func f(a, ..., b) { }"), ParseError::EllipsisNotLast { .. }));
    assert!(matches!(parse_error("func f(a b) { }"), ParseError::SymbolExpected { symbol: ",", .. }));
    assert!(matches!(parse_error("var x = 2147483648;"),
                     ParseError::LiteralOutOfRange { .. }));
    assert!(matches!(parse_error("{ func f() { } }"), ParseError::StatementExpected { .. }));

    let err = parse_error("var x = 1;\nx + 1;");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    assert_eq!(err.to_string(), "test(2,1): unexpected token x");
}

#[test]
fn parse_lines_matches_parse() {
    let lines = ["var x = 1;", "// comment", "return x + 1;"];
    let from_lines = parse_lines(&lines, "lines").unwrap();
    let from_text = parse(&lines.join("\n"), "lines").unwrap();
    assert_eq!(from_lines, from_text);
    assert_eq!(from_lines.execute(&mut Context::new()).unwrap(), Some(Value::Integer(2)));
}
