//! `lr1gen`, a demonstration binary for the canonical LR(1) parser
//! generator and parser runtime.
//!
//! Takes a grammar file in the rule-definition DSL (§6.1) and either dumps
//! the generator's debug stringification of the resulting tables, or reads
//! an expression (from a file or stdin) and runs it through the built-in
//! arithmetic callbacks registered for the worked example.
//!
//! # Author
//! Juan Manuel Young Hoyos

use clap::Parser as ClapParser;
use lr1gen::parser::{CallbackRegistry, Token, TokenClass, VecTokenSource};
use lr1gen::{build, dsl};
use std::cell::RefCell;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

#[derive(ClapParser, Debug)]
#[command(name = "lr1gen", about = "Canonical LR(1) parser generator and runtime")]
struct Args {
    /// Path to a grammar file written in the rule-definition DSL.
    grammar: PathBuf,

    /// Path to an input expression; reads stdin if omitted.
    input: Option<PathBuf>,

    /// Increases log verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Prints the generator's debug stringification of the grammar, FIRST
    /// sets, automaton, and table instead of parsing an input.
    #[arg(long)]
    dump_table: bool,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(message) = run(&args) {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn run(args: &Args) -> Result<(), String> {
    let source = fs::read_to_string(&args.grammar).map_err(|e| format!("reading grammar file: {e}"))?;
    let grammar = dsl::parse(&source).map_err(|e| e.to_string())?;
    let tables = build(&grammar).map_err(|e| e.to_string())?;

    if args.dump_table {
        print!("{}", lr1gen::debug::format_grammar(&grammar));
        print!("{}", lr1gen::debug::format_first_sets(&tables.first_sets));
        print!("{}", lr1gen::debug::format_automaton(&tables.automaton, &grammar));
        print!("{}", lr1gen::debug::format_table(&tables.table));
        return Ok(());
    }

    let input = read_input(args.input.as_deref())?;
    let tokens = tokenize(&input);

    let stack = Rc::new(RefCell::new(Vec::new()));
    let mut callbacks = arithmetic_callbacks(Rc::clone(&stack));
    let mut source = VecTokenSource::new(tokens);

    lr1gen::parser::run(&grammar, &tables.table, &mut source, &mut callbacks).map_err(|e| e.to_string())?;

    match stack.borrow().last() {
        Some(value) => println!("{value}"),
        None => println!("(no callback produced a result)"),
    }
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("reading input file: {e}")),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("reading stdin: {e}"))?;
            Ok(buf)
        }
    }
}

/// Whitespace-delimited tokenizer for the worked arithmetic example: a word
/// that parses as `f64` becomes an `INT` token carrying that value, anything
/// else becomes a literal terminal (`+`, `*`, `(`, `)`).
fn tokenize(input: &str) -> Vec<Token> {
    input
        .split_whitespace()
        .map(|word| match word.parse::<f64>() {
            Ok(value) => Token::new(TokenClass::Int, word).with_value(value),
            Err(_) => Token::new(TokenClass::Delimiter, word),
        })
        .collect()
}

/// Registers the built-in callbacks for the §8 worked arithmetic example:
/// `push_int` pushes a leaf value, `add`/`mul` pop two operands and push
/// their combination.
fn arithmetic_callbacks<'cb>(stack: Rc<RefCell<Vec<f64>>>) -> CallbackRegistry<'cb> {
    let mut callbacks = CallbackRegistry::new();
    {
        let stack = Rc::clone(&stack);
        callbacks.register("push_int", move |args: &[Token]| {
            if let Some(value) = args.first().and_then(|t| t.value) {
                stack.borrow_mut().push(value);
            }
        });
    }
    {
        let stack = Rc::clone(&stack);
        callbacks.register("add", move |_args: &[Token]| {
            let mut s = stack.borrow_mut();
            if let (Some(b), Some(a)) = (s.pop(), s.pop()) {
                s.push(a + b);
            }
        });
    }
    {
        let stack = Rc::clone(&stack);
        callbacks.register("mul", move |_args: &[Token]| {
            let mut s = stack.borrow_mut();
            if let (Some(b), Some(a)) = (s.pop(), s.pop()) {
                s.push(a * b);
            }
        });
    }
    callbacks
}
