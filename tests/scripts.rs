use std::fs;

use trio::{Context, Function, NativeFunction, Value, run};
use walkdir::WalkDir;

fn context_with_assert() -> Context {
    let mut context = Context::new();
    context.define_function(Function::native(NativeFunction::new("assert", &["condition"], false, |a| {
                                match a.argument("condition")? {
                                    Value::Bool(true) => Ok(None),
                                    other => Err(a.error(format!("assertion failed: {other}"))),
                                }
                            })))
           .unwrap();
    context
}

fn run_checked(code: &str, name: &str) {
    if let Err(e) = run(code, name, &mut context_with_assert()) {
        panic!("Script {name} failed:\n{code}\nError: {e}");
    }
}

#[test]
fn sample_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "trio"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;
        run_checked(&content, &path.display().to_string());
    }

    assert!(count > 0, "No scripts found in scripts/");
}

#[test]
fn readme_examples_work() {
    let content = fs::read_to_string("README.md").expect("README.md is readable");
    let blocks = extract_trio_blocks(&content);

    for (i, code) in blocks.iter().enumerate() {
        run_checked(code, &format!("README example {}", i + 1));
    }

    assert!(!blocks.is_empty(), "No trio examples found in README.md");
}

#[test]
fn failing_assert_reports_position() {
    let err = run("var x = 1;\nassert(x == 2);", "check", &mut context_with_assert()).unwrap_err();
    assert_eq!(err.to_string(), "check(2,1): assertion failed: false");
}

fn extract_trio_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```trio") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}
