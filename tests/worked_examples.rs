//! End-to-end tests driving the full DSL-to-parse pipeline through the
//! public API only: `dsl::parse` -> `build` -> `parser::run`.

use lr1gen::parser::{CallbackRegistry, Token, TokenClass, VecTokenSource};
use lr1gen::{build, dsl};
use std::cell::RefCell;
use std::rc::Rc;

const ARITHMETIC: &str = r#"
    term = add ;
    add  = add "+" mul -> add
         | mul ;
    mul  = mul "*" unary -> mul
         | unary ;
    unary = INT -> push_int
          | "(" add ")" ;
"#;

fn int(n: f64) -> Token {
    Token::new(TokenClass::Int, n.to_string()).with_value(n)
}

fn lit(lexeme: &str) -> Token {
    Token::new(TokenClass::Delimiter, lexeme)
}

fn evaluate(tokens: Vec<Token>) -> f64 {
    let grammar = dsl::parse(ARITHMETIC).unwrap();
    let tables = build(&grammar).unwrap();

    let stack = Rc::new(RefCell::new(Vec::new()));
    let mut callbacks = CallbackRegistry::new();
    {
        let stack = Rc::clone(&stack);
        callbacks.register("push_int", move |args: &[Token]| {
            stack.borrow_mut().push(args[0].value.unwrap());
        });
    }
    {
        let stack = Rc::clone(&stack);
        callbacks.register("add", move |_args: &[Token]| {
            let mut s = stack.borrow_mut();
            let b = s.pop().unwrap();
            let a = s.pop().unwrap();
            s.push(a + b);
        });
    }
    {
        let stack = Rc::clone(&stack);
        callbacks.register("mul", move |_args: &[Token]| {
            let mut s = stack.borrow_mut();
            let b = s.pop().unwrap();
            let a = s.pop().unwrap();
            s.push(a * b);
        });
    }

    let mut source = VecTokenSource::new(tokens);
    lr1gen::parser::run(&grammar, &tables.table, &mut source, &mut callbacks).unwrap();
    *stack.borrow().last().unwrap()
}

#[test]
fn multiplication_binds_tighter_than_addition_with_grouping() {
    // 2 * (3 + 4)
    let tokens = vec![int(2.0), lit("*"), lit("("), int(3.0), lit("+"), int(4.0), lit(")")];
    assert_eq!(evaluate(tokens), 14.0);
}

#[test]
fn left_associative_addition_with_tighter_multiplication() {
    // 1 + 2 * 3
    let tokens = vec![int(1.0), lit("+"), int(2.0), lit("*"), int(3.0)];
    assert_eq!(evaluate(tokens), 7.0);
}

#[test]
fn two_grouped_sums_multiplied() {
    // (1+2)*(3+4)
    let tokens = vec![
        lit("("),
        int(1.0),
        lit("+"),
        int(2.0),
        lit(")"),
        lit("*"),
        lit("("),
        int(3.0),
        lit("+"),
        int(4.0),
        lit(")"),
    ];
    assert_eq!(evaluate(tokens), 21.0);
}
