//! Property-based fuzzing tests for the funlang scanner, parser and runtime
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The scanner and parser never panic on arbitrary input
//! 2. Declarations, arithmetic and short-circuit operators behave for any value
//! 3. Parsing is deterministic

use funlang::{
    BinaryOp, Block, Error, EvalConfig, Expression, Interpreter, Parser, Scanner, Statement, Value,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Generate token soup built from real funlang tokens
fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(source_token(), 0..60).prop_map(|tokens| tokens.join(" "))
}

fn source_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(",".to_string()),
        // Keywords
        Just("fun".to_string()),
        Just("var".to_string()),
        Just("while".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("return".to_string()),
        // Operators
        Just("=".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("%".to_string()),
        Just("==".to_string()),
        Just("<=".to_string()),
        Just("&&".to_string()),
        Just("||".to_string()),
        // Numbers
        (-1000i64..1000i64).prop_map(|n| n.to_string()),
        // Identifiers
        identifier(),
        // Comments
        "//[^\n]{0,20}\n".prop_map(|s| s),
    ]
}

/// Identifiers that are not keywords
fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,10}".prop_filter("keywords are reserved", |name| {
        !matches!(
            name.as_str(),
            "fun" | "var" | "while" | "if" | "else" | "return"
        )
    })
}

fn arithmetic_op() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
    ])
}

// =============================================================================
// HELPERS
// =============================================================================

fn capturing(config: EvalConfig) -> (Interpreter, Rc<RefCell<Vec<Vec<Value>>>>) {
    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&printed);
    let interpreter = Interpreter::with_println(move |args| sink.borrow_mut().push(args.to_vec()))
        .with_config(config);
    (interpreter, printed)
}

fn parse(source: &str) -> funlang::Result<Block> {
    let tokens = Scanner::new(source).scan_tokens()?;
    Parser::new(tokens).parse()
}

// =============================================================================
// SCANNER AND PARSER FUZZ TESTS
// =============================================================================

proptest! {
    /// The scanner should never panic on arbitrary input
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let mut scanner = Scanner::new(&source);
        // Should either succeed or return an error, never panic
        let _ = scanner.scan_tokens();
    }

    /// The parser should never panic on any token sequence
    #[test]
    fn parser_never_panics_on_token_soup(source in token_soup()) {
        if let Ok(tokens) = Scanner::new(&source).scan_tokens() {
            let _ = Parser::new(tokens).parse();
        }
    }

    /// Parser handles deeply nested parentheses
    #[test]
    fn parser_handles_deep_nesting(depth in 1usize..100) {
        let source = format!("println({}1 + 1{})", "(".repeat(depth), ")".repeat(depth));
        let program = parse(&source);
        prop_assert!(program.is_ok());
    }

    /// Parsing is a pure function of the source
    #[test]
    fn parser_is_deterministic(source in token_soup()) {
        prop_assert_eq!(parse(&source), parse(&source));
    }

    /// Unbalanced braces are reported, never a panic
    #[test]
    fn parser_reports_unbalanced_braces(opens in 0usize..30, closes in 0usize..30) {
        prop_assume!(opens != closes);
        let source = format!("{}var x = 1{}", "{".repeat(opens), "}".repeat(closes));
        let err = parse(&source).unwrap_err();
        prop_assert!(err.is_syntax());
    }
}

// =============================================================================
// EVALUATOR PROPERTIES
// =============================================================================

proptest! {
    /// A declared variable reads back its value
    #[test]
    fn declared_variable_reads_back(name in identifier(), value in (i64::MIN + 1)..=i64::MAX) {
        prop_assume!(name != "println");
        let (mut interpreter, printed) = capturing(EvalConfig::default());
        let source = format!("var {name} = {value} println({name})");

        let program = parse(&source).unwrap();
        interpreter.execute(&program).unwrap();
        prop_assert_eq!(printed.borrow().clone(), vec![vec![value]]);
    }

    /// Declaring the same name twice in one block always fails
    #[test]
    fn double_declaration_always_fails(name in identifier(), first in any::<i32>(), second in any::<i32>()) {
        let (mut interpreter, _) = capturing(EvalConfig::default());
        let source = format!("var {name} = {first} var {name} = {second}");

        let program = parse(&source).unwrap();
        let is_duplicate = matches!(
            interpreter.execute(&program),
            Err(Error::DuplicateDeclaration { .. })
        );
        prop_assert!(is_duplicate);
    }

    /// Arithmetic wraps and only zero divisors fail
    #[test]
    fn arithmetic_wraps(left in any::<i64>(), op in arithmetic_op(), right in any::<i64>()) {
        let (mut interpreter, _) = capturing(EvalConfig::default());
        let program = Block::new(vec![Statement::Return {
            value: Expression::binary(Expression::Literal(left), op, Expression::Literal(right)),
        }]);
        let result = interpreter.execute(&program);

        let expected = match op {
            BinaryOp::Add => Some(left.wrapping_add(right)),
            BinaryOp::Sub => Some(left.wrapping_sub(right)),
            BinaryOp::Mul => Some(left.wrapping_mul(right)),
            BinaryOp::Div if right != 0 => Some(left.wrapping_div(right)),
            BinaryOp::Mod if right != 0 => Some(left.wrapping_rem(right)),
            _ => None,
        };
        match expected {
            Some(value) => prop_assert_eq!(result.unwrap(), Some(value)),
            None => {
                let is_arithmetic_failure = matches!(result, Err(Error::ArithmeticFailure { .. }));
                prop_assert!(is_arithmetic_failure);
            }
        }
    }

    /// `||` skips its right side after a non-zero left, `&&` after a zero left
    #[test]
    fn short_circuit_skips_side_effects(left in -3i64..=3, right in -3i64..=3) {
        let source = format!(
            "fun side(v) {{ println(v) return v }} \
             return ({left} || side({right})) * 0 + ({left} && side({right}))"
        );
        let (mut interpreter, printed) = capturing(EvalConfig::default());
        let result = interpreter.execute(&parse(&source).unwrap()).unwrap();

        let or_value = if left != 0 { left } else { right };
        let and_value = if left == 0 { left } else { right };
        prop_assert_eq!(result, Some(or_value * 0 + and_value));

        // Exactly one of the two right operands runs
        prop_assert_eq!(printed.borrow().clone(), vec![vec![right]]);
    }
}
