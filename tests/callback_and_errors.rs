//! End-to-end tests for callback dispatch and the generator/parser error
//! paths, driven through the DSL front-end.

use lr1gen::parser::{CallbackRegistry, Token, TokenClass, VecTokenSource};
use lr1gen::{build, dsl, GrammarError, ParseError};
use std::cell::RefCell;
use std::rc::Rc;

fn lit(lexeme: &str) -> Token {
    Token::new(TokenClass::Delimiter, lexeme)
}

fn int(n: f64) -> Token {
    Token::new(TokenClass::Int, n.to_string()).with_value(n)
}

#[test]
fn blub_callback_fires_exactly_once_with_the_integer_token() {
    let source = r#"
        z = s ;
        s = s "b" | "b" a "a" ;
        a = "a" s "c" | "a" | "a" s INT -> blub ;
    "#;
    let grammar = dsl::parse(source).unwrap();
    let tables = build(&grammar).unwrap();

    let fire_count = Rc::new(RefCell::new(0usize));
    let seen_lexemes = Rc::new(RefCell::new(Vec::new()));
    let mut callbacks = CallbackRegistry::new();
    {
        let fire_count = Rc::clone(&fire_count);
        let seen_lexemes = Rc::clone(&seen_lexemes);
        callbacks.register("blub", move |args: &[Token]| {
            *fire_count.borrow_mut() += 1;
            *seen_lexemes.borrow_mut() = args.iter().map(|t| t.lexeme.clone()).collect();
        });
    }

    // b a b a a 42 a
    let tokens = vec![lit("b"), lit("a"), lit("b"), lit("a"), lit("a"), int(42.0), lit("a")];
    let mut token_source = VecTokenSource::new(tokens);
    lr1gen::parser::run(&grammar, &tables.table, &mut token_source, &mut callbacks).unwrap();

    assert_eq!(*fire_count.borrow(), 1);
    // a = "a" s INT -> blub: only the terminal RHS positions reach the
    // callback, so this is exactly ["a", "42"] with no placeholder for `s`.
    assert_eq!(seen_lexemes.borrow().as_slice(), &["a".to_string(), "42".to_string()]);
}

#[test]
fn left_recursive_grammar_without_base_case_builds_but_never_parses() {
    let grammar = dsl::parse(r#"x = x "a" ;"#).unwrap();
    let tables = build(&grammar).expect("accepted at table-build time");

    let mut callbacks = CallbackRegistry::new();
    let mut token_source = VecTokenSource::new(vec![lit("a")]);
    let result = lr1gen::parser::run(&grammar, &tables.table, &mut token_source, &mut callbacks);
    assert!(matches!(result, Err(ParseError::UnexpectedToken { .. })));
}

#[test]
fn ambiguous_reduction_is_reported_before_any_parse_is_attempted() {
    // s = e; e = t; e = u; t = "x"; u = "x"; both t and u reduce on the
    // same lookahead in the same context: a genuine reduce/reduce conflict
    // that must surface at table-build time, not at parse time.
    let source = r#"
        s = e ;
        e = t | u ;
        t = "x" ;
        u = "x" ;
    "#;
    let grammar = dsl::parse(source).unwrap();
    let result = build(&grammar);
    assert!(matches!(result, Err(GrammarError::ReduceReduceConflict { .. })));
}
