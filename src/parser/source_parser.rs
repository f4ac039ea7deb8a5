use std::rc::Rc;

use super::ast::{BinaryOp, Block, Expression, FunctionDecl, Statement};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Recursive descent parser for funlang
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Creates a new parser over a token stream ending in `Eof`
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the tokens into a program block
    pub fn parse(&mut self) -> Result<Block> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Block::new(statements))
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match &self.peek().kind {
            TokenKind::Fun => self.parse_function(),
            TokenKind::LeftBrace => Ok(Statement::Block(self.parse_braced_block()?)),
            TokenKind::Var => self.parse_variable(),
            TokenKind::While => self.parse_while(),
            TokenKind::If => self.parse_if(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Identifier(_) if self.peek_next_is(&TokenKind::Assign) => {
                self.parse_assignment()
            }
            _ => Ok(Statement::Expression(self.parse_expression()?)),
        }
    }

    /// Parse `fun name(params) { body }`
    fn parse_function(&mut self) -> Result<Statement> {
        self.advance(); // consume 'fun'

        let name = self.expect_identifier("function name")?;
        self.consume(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                params.push(self.expect_identifier("parameter name")?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        let body = self.parse_braced_block()?;

        Ok(Statement::FunctionDefinition(Rc::new(FunctionDecl {
            name,
            params,
            body,
        })))
    }

    /// Parse `{ statement* }`
    fn parse_braced_block(&mut self) -> Result<Block> {
        self.consume(TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(self.expected_error(
                    "`}`",
                    Some("A block opened with `{` is never closed."),
                ));
            }
            statements.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RightBrace)?;

        Ok(Block::new(statements))
    }

    /// Parse `var name (= init)?`
    fn parse_variable(&mut self) -> Result<Statement> {
        self.advance(); // consume 'var'

        let name = self.expect_identifier("variable name")?;
        let init = if self.match_kind(&TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Statement::VariableDeclaration { name, init })
    }

    /// Parse `while (condition) statement`
    fn parse_while(&mut self) -> Result<Statement> {
        self.advance(); // consume 'while'

        let condition = self.parse_condition()?;
        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While { condition, body })
    }

    /// Parse `if (condition) statement (else statement)?`
    fn parse_if(&mut self) -> Result<Statement> {
        self.advance(); // consume 'if'

        let condition = self.parse_condition()?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_kind(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_return(&mut self) -> Result<Statement> {
        self.advance(); // consume 'return'

        let value = self.parse_expression()?;
        Ok(Statement::Return { value })
    }

    fn parse_assignment(&mut self) -> Result<Statement> {
        let name = self.expect_identifier("variable name")?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expression()?;

        Ok(Statement::Assignment { name, value })
    }

    /// Parenthesized condition of `while` and `if`
    fn parse_condition(&mut self) -> Result<Expression> {
        self.consume(TokenKind::LeftParen)?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen)?;
        Ok(condition)
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_binary(0)
    }

    /// Precedence climbing; every operator is left-associative
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut left = self.parse_primary()?;

        while let Some(op) = self.peek_binary_op() {
            let precedence = op.precedence() as u8;
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary(precedence + 1)?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek().kind.clone() {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expression::Literal(n))
            }
            TokenKind::Minus => {
                self.advance();
                match self.peek().kind {
                    TokenKind::Integer(n) => {
                        self.advance();
                        Ok(Expression::Literal(-n))
                    }
                    _ => Err(self.expected_error(
                        "integer after `-`",
                        Some("Only literals can be negated: write `0 - x` for a variable."),
                    )),
                }
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    let args = self.parse_arguments()?;
                    Ok(Expression::Call { name, args })
                } else {
                    Ok(Expression::Identifier(name))
                }
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RightParen)?;
                Ok(expr)
            }
            _ => Err(self.expected_error(
                "expression",
                Some("Expected one of: integer, identifier, function call, or `(...)`"),
            )),
        }
    }

    /// Parse `(expr, expr, ...)`
    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        self.consume(TokenKind::LeftParen)?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        Ok(args)
    }

    // Helper methods

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        match self.peek().kind {
            TokenKind::Identifier(_) | TokenKind::Integer(_) => None,
            _ => BinaryOp::from_token(&self.peek().lexeme),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn peek_next_is(&self, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.current + 1)
            .map(|t| std::mem::discriminant(&t.kind) == std::mem::discriminant(kind))
            .unwrap_or(false)
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.expected_error(&Self::token_kind_name(&kind), None))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.expected_error(
                &format!("identifier ({})", what),
                Some("Valid identifiers start with a letter or underscore and are not keywords."),
            )),
        }
    }

    /// Get a human-readable name for a token kind
    fn token_kind_name(kind: &TokenKind) -> String {
        match kind {
            TokenKind::LeftParen => "`(`".to_string(),
            TokenKind::RightParen => "`)`".to_string(),
            TokenKind::LeftBrace => "`{`".to_string(),
            TokenKind::RightBrace => "`}`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Assign => "`=`".to_string(),
            TokenKind::Integer(_) => "integer".to_string(),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Eof => "end of file".to_string(),
            kind if kind.is_keyword() => format!("keyword `{:?}`", kind).to_lowercase(),
            _ => format!("{:?}", kind),
        }
    }

    /// Helper to create a syntax error with expected/got pattern
    fn expected_error(&self, expected: &str, hint: Option<&str>) -> Error {
        let token = self.peek();
        let got_str = Self::token_kind_name(&token.kind);

        let mut message = format!("Expected {}, found {}", expected, got_str);

        if let Some(hint) = hint {
            message.push_str("\n\nHelp: ");
            message.push_str(hint);
        }

        Error::SyntaxError {
            line: token.line,
            col: token.column,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;

    fn parse_str(source: &str) -> Result<Block> {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens()?;
        let mut parser = Parser::new(tokens);
        parser.parse()
    }

    fn v(name: &str) -> Expression {
        Expression::ident(name)
    }

    fn i(value: i64) -> Expression {
        Expression::Literal(value)
    }

    fn call_s(name: &str, args: Vec<Expression>) -> Statement {
        Statement::Expression(Expression::call(name, args))
    }

    #[test]
    fn test_example_if_else() {
        let program = parse_str(
            "var a = 10
             var b = 20
             if (a > b) {
                 println(1)
             } else {
                 println(0)
             }",
        )
        .unwrap();

        let expected = Block::new(vec![
            Statement::var("a", Some(i(10))),
            Statement::var("b", Some(i(20))),
            Statement::If {
                condition: Expression::binary(v("a"), BinaryOp::Gt, v("b")),
                then_branch: Box::new(Statement::block(vec![call_s("println", vec![i(1)])])),
                else_branch: Some(Box::new(Statement::block(vec![call_s(
                    "println",
                    vec![i(0)],
                )]))),
            },
        ]);
        assert_eq!(program, expected);
    }

    #[test]
    fn test_example_fibonacci() {
        let program = parse_str(
            "fun fib(n) {
                 if (n <= 1) {
                     return 1
                 }
                 return fib(n - 1) + fib(n - 2)
             }

             var i = 1
             while (i <= 5) {
                 println(i, fib(i))
                 i = i + 1
             }",
        )
        .unwrap();

        let expected = Block::new(vec![
            Statement::function(
                "fib",
                &["n"],
                vec![
                    Statement::If {
                        condition: Expression::binary(v("n"), BinaryOp::LtEq, i(1)),
                        then_branch: Box::new(Statement::block(vec![Statement::Return {
                            value: i(1),
                        }])),
                        else_branch: None,
                    },
                    Statement::Return {
                        value: Expression::binary(
                            Expression::call(
                                "fib",
                                vec![Expression::binary(v("n"), BinaryOp::Sub, i(1))],
                            ),
                            BinaryOp::Add,
                            Expression::call(
                                "fib",
                                vec![Expression::binary(v("n"), BinaryOp::Sub, i(2))],
                            ),
                        ),
                    },
                ],
            ),
            Statement::var("i", Some(i(1))),
            Statement::While {
                condition: Expression::binary(v("i"), BinaryOp::LtEq, i(5)),
                body: Box::new(Statement::block(vec![
                    call_s("println", vec![v("i"), Expression::call("fib", vec![v("i")])]),
                    Statement::assign("i", Expression::binary(v("i"), BinaryOp::Add, i(1))),
                ])),
            },
        ]);
        assert_eq!(program, expected);
    }

    #[test]
    fn test_nested_function_with_comment() {
        let program = parse_str(
            "fun foo(n) {
                 fun bar(m) {
                     return m + n
                 }

                 return bar(1)
             }

             println(foo(41)) // prints 42",
        )
        .unwrap();

        let expected = Block::new(vec![
            Statement::function(
                "foo",
                &["n"],
                vec![
                    Statement::function(
                        "bar",
                        &["m"],
                        vec![Statement::Return {
                            value: Expression::binary(v("m"), BinaryOp::Add, v("n")),
                        }],
                    ),
                    Statement::Return {
                        value: Expression::call("bar", vec![i(1)]),
                    },
                ],
            ),
            call_s("println", vec![Expression::call("foo", vec![i(41)])]),
        ]);
        assert_eq!(program, expected);
    }

    #[test]
    fn test_precedence_and_associativity() {
        let program = parse_str("1 + 2 * 3 - 4 || 5 && 6 == 7").unwrap();

        // ((1 + (2 * 3)) - 4) || (5 && (6 == 7))
        let expected = Expression::binary(
            Expression::binary(
                Expression::binary(
                    i(1),
                    BinaryOp::Add,
                    Expression::binary(i(2), BinaryOp::Mul, i(3)),
                ),
                BinaryOp::Sub,
                i(4),
            ),
            BinaryOp::Or,
            Expression::binary(
                i(5),
                BinaryOp::And,
                Expression::binary(i(6), BinaryOp::Eq, i(7)),
            ),
        );
        assert_eq!(program.statements, vec![Statement::Expression(expected)]);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let program = parse_str("(1 + 2) * 3").unwrap();
        let expected = Expression::binary(
            Expression::binary(i(1), BinaryOp::Add, i(2)),
            BinaryOp::Mul,
            i(3),
        );
        assert_eq!(program.statements, vec![Statement::Expression(expected)]);
    }

    #[test]
    fn test_statements_without_separators() {
        let program = parse_str("fun foo() { x = x + 1 return x <= 1 }").unwrap();
        match &program.statements[0] {
            Statement::FunctionDefinition(decl) => {
                assert_eq!(decl.body.statements.len(), 2);
                assert!(matches!(decl.body.statements[1], Statement::Return { .. }));
            }
            other => panic!("expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_statement_bodies() {
        let program = parse_str("while (foo()) var y = 0 if (0) {} else var x = 10").unwrap();
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(
            &program.statements[0],
            Statement::While { body, .. } if matches!(**body, Statement::VariableDeclaration { .. })
        ));
    }

    #[test]
    fn test_declaration_without_init() {
        let program = parse_str("var foo").unwrap();
        assert_eq!(program.statements, vec![Statement::var("foo", None)]);
    }

    #[test]
    fn test_negative_literal() {
        let program = parse_str("x = -5 - 3").unwrap();
        assert_eq!(
            program.statements,
            vec![Statement::assign(
                "x",
                Expression::binary(i(-5), BinaryOp::Sub, i(3))
            )]
        );
    }

    #[test]
    fn test_missing_closing_brace() {
        let err = parse_str("fun f() { return 1").unwrap_err();
        match err {
            Error::SyntaxError { message, .. } => {
                assert!(message.contains("Expected `}`, found end of file"))
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_keyword_as_variable_name() {
        let err = parse_str("var while = 1").unwrap_err();
        match err {
            Error::SyntaxError { line, col, message } => {
                assert_eq!((line, col), (1, 5));
                assert!(message.contains("identifier (variable name)"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        assert!(parse_str("  // nothing here\n").unwrap().is_empty());
    }
}
