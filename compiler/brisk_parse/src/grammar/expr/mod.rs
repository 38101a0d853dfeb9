//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! 1. `=` (right-associative)
//! 2. `||` / `or`
//! 3. `&&` / `and`
//! 4. comparisons `== != <> < <= > >=`
//! 5. `+ -`
//! 6. `* / % ^`
//! 7. prefix `- !`
//! 8. postfix `.name`, `(args)`, `[index]`
//!
//! Binary levels 2 to 6 are left folds.

mod operators;

use brisk_ir::{BinaryOp, Literal, MemberKind, Node, NodeKind, Span, TokenKind};
use brisk_stack::ensure_sufficient_stack;

use crate::{PResult, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> PResult<Node> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> PResult<Node> {
        let target = self.parse_or()?;
        if !self.cursor.try_eat(TokenKind::Eq)? {
            return Ok(target);
        }
        let value = self.parse_assignment()?;
        let span = target.span.merge(value.span);
        Ok(Node::new(
            NodeKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> PResult<Node> {
        let mut left = self.parse_and()?;
        while self.cursor.try_eat(TokenKind::BarBar)? {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> PResult<Node> {
        let mut left = self.parse_comparison()?;
        while self.cursor.try_eat(TokenKind::AmpAmp)? {
            let right = self.parse_comparison()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> PResult<Node> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_comparison_op() {
            self.cursor.advance()?;
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> PResult<Node> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.cursor.advance()?;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> PResult<Node> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.cursor.advance()?;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Node> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_postfix();
        };
        let start = self.cursor.advance()?.span;
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Node::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    /// Primary followed by any chain of `.name`, `(args)`, `[index]`.
    fn parse_postfix(&mut self) -> PResult<Node> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.cursor.peek_kind() {
                TokenKind::Dot => {
                    self.cursor.advance()?;
                    let name = self.cursor.expect_ident()?;
                    let kind = if self.cursor.check(TokenKind::LParen) {
                        MemberKind::MethodCall
                    } else {
                        MemberKind::Get
                    };
                    let span = self.span_from(expr.span);
                    expr = Node::new(
                        NodeKind::Member {
                            target: Box::new(expr),
                            name,
                            kind,
                        },
                        span,
                    );
                }
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    let span = self.span_from(expr.span);
                    expr = Node::new(
                        NodeKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.cursor.advance()?;
                    let index = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RBracket)?;
                    let span = self.span_from(expr.span);
                    expr = Node::new(
                        NodeKind::Index {
                            target: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// `(a, b c)`: commas between arguments are optional.
    fn parse_args(&mut self) -> PResult<Vec<Node>> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.cursor.try_eat(TokenKind::RParen)? {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected(TokenKind::RParen.display_name()));
            }
            args.push(self.parse_expr()?);
            self.cursor.try_eat(TokenKind::Comma)?;
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> PResult<Node> {
        match self.cursor.peek_kind() {
            TokenKind::LParen => {
                self.cursor.advance()?;
                let inner = self.parse_expr()?;
                self.cursor.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Int => {
                let token = self.cursor.advance()?;
                let value = token.text.parse::<i64>().map_err(|_| {
                    ParseError::invalid_literal(&token.text, token.position, token.span)
                })?;
                Ok(constant(Literal::Int(value), token.span))
            }
            TokenKind::Float => {
                let token = self.cursor.advance()?;
                let digits = token.text.trim_end_matches(['f', 'F']);
                let value = digits.parse::<f64>().map_err(|_| {
                    ParseError::invalid_literal(&token.text, token.position, token.span)
                })?;
                Ok(constant(Literal::Float(value), token.span))
            }
            TokenKind::Str => {
                let token = self.cursor.advance()?;
                Ok(constant(Literal::Str(token.text), token.span))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.cursor.advance()?;
                Ok(constant(Literal::Bool(token.is(TokenKind::True)), token.span))
            }
            TokenKind::Ident => {
                let token = self.cursor.advance()?;
                Ok(Node::new(NodeKind::Named(token.text), token.span))
            }
            TokenKind::New => self.parse_new(),
            TokenKind::Lambda => self.parse_lambda(),
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// `new a.b.Type(args)`
    fn parse_new(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::New)?.span;
        let first = self.cursor.expect(TokenKind::Ident)?;
        let mut target = Node::new(NodeKind::Named(first.text), first.span);
        while self.cursor.try_eat(TokenKind::Dot)? {
            let name = self.cursor.expect_ident()?;
            let span = self.span_from(target.span);
            target = Node::new(
                NodeKind::Member {
                    target: Box::new(target),
                    name,
                    kind: MemberKind::Get,
                },
                span,
            );
        }
        let args = self.parse_args()?;
        Ok(Node::new(
            NodeKind::New {
                target: Box::new(target),
                args,
            },
            self.span_from(start),
        ))
    }

    /// `lambda(params) body`
    fn parse_lambda(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Lambda)?.span;
        let params = self.parse_params()?;
        let body = self.parse_statement()?;
        Ok(Node::new(
            NodeKind::Lambda {
                params,
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }
}

fn binary(op: BinaryOp, left: Node, right: Node) -> Node {
    let span = left.span.merge(right.span);
    Node::new(
        NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn constant(literal: Literal, span: Span) -> Node {
    Node::new(NodeKind::Constant(literal), span)
}
