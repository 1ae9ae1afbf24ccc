use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::parser::parse;
use crate::test_utils::cst;
use crate::{Config, Error};

fn nested_classes(depth: usize) -> String {
    let mut input = String::new();
    for i in 0..depth {
        input.push_str(&format!("class C{i} {{ "));
    }
    for _ in 0..depth {
        input.push_str("} ");
    }
    input
}

fn many_fields(count: usize) -> String {
    let mut input = String::from("class Big {\n");
    for i in 0..count {
        input.push_str(&format!("    int f{i};\n"));
    }
    input.push('}');
    input
}

#[test]
fn deeply_nested_classes_hit_recursion_limit() {
    let input = nested_classes(20);
    let config = Config::default().with_recursion_fuel(Some(8));

    let result = parse(&input, &config);

    assert!(
        matches!(result, Err(Error::RecursionLimitExceeded)),
        "expected RecursionLimitExceeded error, got {:?}",
        result
    );
}

#[test]
fn nesting_within_limit_parses() {
    let input = nested_classes(8);
    let config = Config::default().with_recursion_fuel(Some(8));

    let result = parse(&input, &config).expect("eight levels fit");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn deeply_nested_annotations_hit_recursion_limit() {
    let depth = 16;
    let mut input = String::new();
    for _ in 0..depth {
        input.push_str("@A(");
    }
    for _ in 0..depth {
        input.push(')');
    }
    input.push_str(" class X {}");
    let config = Config::default().with_recursion_fuel(Some(4));

    let result = parse(&input, &config);

    assert!(
        matches!(result, Err(Error::RecursionLimitExceeded)),
        "expected RecursionLimitExceeded error, got {:?}",
        result
    );
}

#[test]
fn exec_fuel_exhausted() {
    let input = many_fields(50);
    let config = Config::default().with_exec_fuel(Some(10));

    let result = parse(&input, &config);

    assert!(
        matches!(result, Err(Error::ExecFuelExhausted)),
        "expected ExecFuelExhausted error, got {:?}",
        result
    );
}

#[test]
fn fuel_consumed_is_reported() {
    let result = parse("class A { int x; }", &Config::default()).expect("small input");
    // class A { int x ; }
    assert_eq!(result.exec_fuel_consumed, 7);
}

#[test]
fn unbounded_fuel() {
    let input = many_fields(500);
    let config = Config::default()
        .with_exec_fuel(None)
        .with_recursion_fuel(None);

    let result = parse(&input, &config).expect("no limits");
    assert_eq!(result.exec_fuel_consumed, 0);
}

#[test]
fn cancellation_aborts_parse() {
    let input = many_fields(300);
    let flag = Arc::new(AtomicBool::new(true));
    let config = Config::default().with_cancellation(flag);

    let result = parse(&input, &config);

    assert!(
        matches!(result, Err(Error::Cancelled)),
        "expected Cancelled error, got {:?}",
        result
    );
}

#[test]
fn unset_cancellation_flag_is_ignored() {
    let input = many_fields(300);
    let flag = Arc::new(AtomicBool::new(false));
    let config = Config::default().with_cancellation(flag);

    assert!(parse(&input, &config).is_ok());
}

#[test]
fn zero_timeout_aborts_parse() {
    let input = many_fields(300);
    let config = Config::default().with_timeout(Some(Duration::ZERO));

    let result = parse(&input, &config);

    assert!(
        matches!(result, Err(Error::Timeout)),
        "expected Timeout error, got {:?}",
        result
    );
}

#[test]
fn small_input_finishes_before_first_poll() {
    let config = Config::default().with_timeout(Some(Duration::ZERO));

    assert!(parse("class A {}", &config).is_ok());
}

#[test]
fn long_comparison_runs_are_not_type_args() {
    let elements = vec!["a < b"; 5000].join(", ");
    let input = format!("class A {{ boolean[] x = {{ {elements} }}; }}");

    let result = parse(&input, &Config::default()).expect("within default limits");
    assert!(result.diagnostics.is_empty());
    assert!(!cst(&input).contains("TypeArgs"));
}

#[test]
fn type_args_lookahead_is_bounded() {
    let args = |count: usize| vec!["T"; count].join(", ");
    let short = format!("class A {{ Object o = new Foo<{}>(); }}", args(3));
    let long = format!("class A {{ Object o = new Foo<{}>(); }}", args(40));

    assert!(cst(&short).contains("TypeArgs"));
    assert!(!cst(&long).contains("TypeArgs"));
    assert!(parse(&long, &Config::default()).expect("parses").diagnostics.is_empty());
}
