//! The small rule-definition language (§6.1): a hand-written
//! recursive-descent lexer and parser that populates a [`Grammar`] via its
//! programmatic rule API, rather than a parser-combinator or
//! lexer-generator dependency.
//!
//! ```text
//! rules = { rule } ;
//! rule  = ID "=" rhs { "|" rhs } ";" ;
//! rhs   = { item } [ "->" ID ] ;
//! item  = "INT" | "REAL" | "HEX" | "ID" | "STR" | ID | STR ;
//! ```

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::symbol::{Symbol, TOKEN_CLASSES};

#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Ident(String),
    Str(String),
    Eq,
    Pipe,
    Semi,
    Arrow,
    Eof,
}

#[derive(Debug, Clone)]
struct DslToken {
    lexeme: Lexeme,
    line: usize,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<DslToken>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let line = self.line;
            let Some(&c) = self.chars.peek() else {
                tokens.push(DslToken { lexeme: Lexeme::Eof, line });
                break;
            };

            let lexeme = match c {
                '=' => {
                    self.chars.next();
                    Lexeme::Eq
                }
                '|' => {
                    self.chars.next();
                    Lexeme::Pipe
                }
                ';' => {
                    self.chars.next();
                    Lexeme::Semi
                }
                '-' => {
                    self.chars.next();
                    match self.chars.next() {
                        Some('>') => Lexeme::Arrow,
                        _ => {
                            return Err(GrammarError::DslSyntax {
                                line,
                                message: "expected '->'".to_string(),
                            })
                        }
                    }
                }
                '"' => self.read_string(line)?,
                c if c.is_alphabetic() || c == '_' => self.read_ident(),
                other => {
                    return Err(GrammarError::DslSyntax {
                        line,
                        message: format!("unexpected character '{other}'"),
                    })
                }
            };

            tokens.push(DslToken { lexeme, line });
        }
        Ok(tokens)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.chars.peek() {
                Some(&c) if c == '\n' => {
                    self.line += 1;
                    self.chars.next();
                }
                Some(&c) if c.is_whitespace() => {
                    self.chars.next();
                }
                Some(&'#') => {
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.chars.next();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_ident(&mut self) -> Lexeme {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        Lexeme::Ident(s)
    }

    fn read_string(&mut self, line: usize) -> Result<Lexeme> {
        self.chars.next(); // opening quote
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(Lexeme::Str(s)),
                Some('\\') => match self.chars.next() {
                    Some(c) => s.push(c),
                    None => {
                        return Err(GrammarError::DslSyntax {
                            line,
                            message: "unterminated string literal".to_string(),
                        })
                    }
                },
                Some(c) => s.push(c),
                None => {
                    return Err(GrammarError::DslSyntax {
                        line,
                        message: "unterminated string literal".to_string(),
                    })
                }
            }
        }
    }
}

struct Parser {
    tokens: Vec<DslToken>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<DslToken>) -> Self {
        Self { tokens, position: 0 }
    }

    fn peek(&self) -> &DslToken {
        &self.tokens[self.position]
    }

    fn advance(&mut self) -> DslToken {
        let tok = self.tokens[self.position].clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        tok
    }

    fn expect_ident(&mut self) -> Result<(String, usize)> {
        let tok = self.advance();
        match tok.lexeme {
            Lexeme::Ident(name) => Ok((name, tok.line)),
            other => Err(GrammarError::DslSyntax {
                line: tok.line,
                message: format!("expected identifier, found {other:?}"),
            }),
        }
    }

    fn expect(&mut self, expected: Lexeme) -> Result<()> {
        let tok = self.advance();
        if tok.lexeme == expected {
            Ok(())
        } else {
            Err(GrammarError::DslSyntax {
                line: tok.line,
                message: format!("expected {expected:?}, found {:?}", tok.lexeme),
            })
        }
    }

    fn parse_rules(&mut self, grammar: &mut Grammar) -> Result<()> {
        loop {
            if self.peek().lexeme == Lexeme::Eof {
                return Ok(());
            }
            self.parse_rule(grammar)?;
        }
    }

    fn parse_rule(&mut self, grammar: &mut Grammar) -> Result<()> {
        let (lhs, _line) = self.expect_ident()?;
        self.expect(Lexeme::Eq)?;

        loop {
            self.parse_rhs(grammar, &lhs)?;
            if self.peek().lexeme == Lexeme::Pipe {
                self.advance();
                continue;
            }
            break;
        }
        self.expect(Lexeme::Semi)?;
        Ok(())
    }

    fn parse_rhs(&mut self, grammar: &mut Grammar, lhs: &str) -> Result<()> {
        let mut items = Vec::new();
        loop {
            match &self.peek().lexeme {
                Lexeme::Ident(name) => {
                    let name = name.clone();
                    self.advance();
                    if TOKEN_CLASSES.contains(&name.as_str()) {
                        items.push(Symbol::token_class(name));
                    } else {
                        items.push(Symbol::non_terminal(name));
                    }
                }
                Lexeme::Str(text) => {
                    let text = text.clone();
                    self.advance();
                    items.push(Symbol::literal(text));
                }
                _ => break,
            }
        }

        let callback = if self.peek().lexeme == Lexeme::Arrow {
            self.advance();
            let (name, _) = self.expect_ident()?;
            Some(name)
        } else {
            None
        };

        let rule = grammar.add_rule(lhs.to_string());
        for item in items {
            if item.is_terminal() {
                rule.terminal(item);
            } else {
                rule.non_terminal(item.key().to_string());
            }
        }
        if let Some(name) = callback {
            rule.callback(name);
        }
        Ok(())
    }
}

/// Parses `source` in the §6.1 rule-definition DSL into a fresh [`Grammar`].
/// Does not call [`Grammar::validate`], the caller is expected to run the
/// usual generator-time pipeline on the result.
pub fn parse(source: &str) -> Result<Grammar> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens);
    let mut grammar = Grammar::new();
    parser.parse_rules(&mut grammar)?;
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first::compute_first_sets;
    use crate::{automaton, table};

    #[test]
    fn parses_arithmetic_grammar() {
        let source = r#"
            term = add ;
            add  = add "+" mul -> add
                 | mul ;
            mul  = mul "*" unary -> mul
                 | unary ;
            unary = INT -> push_int
                  | "(" add ")" ;
        "#;
        let grammar = parse(source).unwrap();
        assert!(grammar.validate().is_ok());
        assert_eq!(grammar.rules().len(), 6);
        assert_eq!(grammar.root_rule().lhs, "term");
    }

    #[test]
    fn parsed_grammar_builds_conflict_free_table() {
        let source = r#"
            term = add ;
            add  = add "+" mul -> add | mul ;
            mul  = mul "*" unary -> mul | unary ;
            unary = INT -> push_int | "(" add ")" ;
        "#;
        let grammar = parse(source).unwrap();
        let first = compute_first_sets(&grammar);
        let automaton = automaton::build(&grammar, &first);
        assert!(table::build(&grammar, &automaton).is_ok());
    }

    #[test]
    fn reserved_token_class_becomes_terminal_without_colon_prefix() {
        let grammar = parse("s = INT ;").unwrap();
        let rhs = &grammar.root_rule().rhs;
        assert_eq!(rhs, &[Symbol::token_class("INT")]);
    }

    #[test]
    fn quoted_literal_becomes_colon_prefixed_terminal() {
        let grammar = parse(r#"s = "while" ;"#).unwrap();
        let rhs = &grammar.root_rule().rhs;
        assert_eq!(rhs, &[Symbol::literal("while")]);
    }

    #[test]
    fn callback_name_is_captured() {
        let grammar = parse("s = INT -> blub ;").unwrap();
        assert_eq!(grammar.root_rule().callback, Some("blub".to_string()));
    }

    #[test]
    fn missing_semicolon_is_a_syntax_error() {
        let result = parse("s = INT");
        assert!(matches!(result, Err(GrammarError::DslSyntax { .. })));
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        let result = parse("s = \"abc ;");
        assert!(matches!(result, Err(GrammarError::DslSyntax { .. })));
    }

    #[test]
    fn comment_lines_are_ignored() {
        let grammar = parse("# a comment\ns = INT ; # trailing\n").unwrap();
        assert_eq!(grammar.rules().len(), 1);
    }
}
