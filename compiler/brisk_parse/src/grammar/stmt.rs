//! Statement productions.

use brisk_ir::{IfBranch, Node, NodeKind, TokenKind};

use crate::{PResult, Parser};

/// How a branch body ended.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum BodyEnd {
    /// Self-contained: a single statement, a `{}` block, or a `then` block
    /// closed by `end`.
    Closed,
    /// A `then` block cut short by `elseif`/`else`; the enclosing `if`
    /// still owes an `end`.
    Open,
}

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> PResult<Node> {
        tracing::trace!(token = ?self.cursor.peek_kind(), "statement");
        match self.cursor.peek_kind() {
            TokenKind::Semicolon => {
                let token = self.cursor.advance()?;
                Ok(Node::new(NodeKind::Null, token.span))
            }
            TokenKind::LBrace => self.parse_brace_block(),
            TokenKind::Then => Ok(self.parse_then_block()?.0),
            TokenKind::Loop => self.parse_loop(),
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function_def(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Var => self.parse_var(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Break => self.parse_break(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `{ statements }`
    fn parse_brace_block(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::LBrace)?.span;
        let mut statements = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected(TokenKind::RBrace.display_name()));
            }
            statements.push(self.parse_statement()?);
        }
        self.cursor.advance()?;
        Ok(Node::new(NodeKind::Block(statements), self.span_from(start)))
    }

    /// `then statements end`, also stopping before `elseif`/`else`.
    fn parse_then_block(&mut self) -> PResult<(Node, BodyEnd)> {
        let start = self.cursor.expect(TokenKind::Then)?.span;
        let (statements, end) = self.parse_statements_until_end()?;
        Ok((
            Node::new(NodeKind::Block(statements), self.span_from(start)),
            end,
        ))
    }

    fn parse_statements_until_end(&mut self) -> PResult<(Vec<Node>, BodyEnd)> {
        let mut statements = Vec::new();
        loop {
            match self.cursor.peek_kind() {
                TokenKind::End => {
                    self.cursor.advance()?;
                    return Ok((statements, BodyEnd::Closed));
                }
                TokenKind::ElseIf | TokenKind::Else => return Ok((statements, BodyEnd::Open)),
                TokenKind::Eof => {
                    return Err(self.cursor.unexpected(TokenKind::End.display_name()));
                }
                _ => statements.push(self.parse_statement()?),
            }
        }
    }

    fn parse_branch_body(&mut self) -> PResult<(Node, BodyEnd)> {
        if self.cursor.check(TokenKind::Then) {
            self.parse_then_block()
        } else {
            Ok((self.parse_statement()?, BodyEnd::Closed))
        }
    }

    /// `if test body [elseif test body]* [else body]`
    fn parse_if(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::If)?.span;
        let mut branches = Vec::new();
        let last_end = loop {
            let test = self.parse_expr()?;
            let (body, end) = self.parse_branch_body()?;
            branches.push(IfBranch { test, body });
            if !self.cursor.try_eat(TokenKind::ElseIf)? {
                break end;
            }
        };

        let otherwise = if self.cursor.try_eat(TokenKind::Else)? {
            let else_start = self.cursor.previous_span();
            let body = match last_end {
                BodyEnd::Open => {
                    let (statements, end) = self.parse_statements_until_end()?;
                    if end == BodyEnd::Open {
                        return Err(self.cursor.unexpected(TokenKind::End.display_name()));
                    }
                    Node::new(NodeKind::Block(statements), self.span_from(else_start))
                }
                BodyEnd::Closed => self.parse_statement()?,
            };
            Some(Box::new(body))
        } else {
            if last_end == BodyEnd::Open {
                return Err(self.cursor.unexpected(TokenKind::End.display_name()));
            }
            None
        };

        Ok(Node::new(
            NodeKind::If {
                branches,
                otherwise,
            },
            self.span_from(start),
        ))
    }

    /// `loop body`
    fn parse_loop(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Loop)?.span;
        let body = self.parse_statement()?;
        Ok(Node::new(
            NodeKind::Loop {
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }

    /// `function name(params) body`
    fn parse_function_def(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Function)?.span;
        let name = self.cursor.expect_ident()?;
        let params = self.parse_params()?;
        let body = self.parse_statement()?;
        Ok(Node::new(
            NodeKind::FunctionDef {
                name,
                params,
                body: Box::new(body),
            },
            self.span_from(start),
        ))
    }

    /// `(a, b c)`: commas between parameters are optional.
    pub(crate) fn parse_params(&mut self) -> PResult<Vec<String>> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.cursor.try_eat(TokenKind::RParen)? {
            params.push(self.cursor.expect_ident()?);
            self.cursor.try_eat(TokenKind::Comma)?;
        }
        Ok(params)
    }

    /// `return [expr] [;]`
    fn parse_return(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Return)?.span;
        let value = if self.cursor.try_eat(TokenKind::Semicolon)? || self.at_statement_end() {
            None
        } else {
            let value = self.parse_expr()?;
            self.cursor.try_eat(TokenKind::Semicolon)?;
            Some(Box::new(value))
        };
        Ok(Node::new(NodeKind::Return { value }, self.span_from(start)))
    }

    /// Tokens that close the enclosing block, so a bare `return` needs no `;`.
    fn at_statement_end(&self) -> bool {
        matches!(
            self.cursor.peek_kind(),
            TokenKind::RBrace | TokenKind::End | TokenKind::ElseIf | TokenKind::Else | TokenKind::Eof
        )
    }

    /// `var name [= expr] [;]`
    fn parse_var(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Var)?.span;
        let name = self.cursor.expect_ident()?;
        let init = if self.cursor.try_eat(TokenKind::Eq)? {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.cursor.try_eat(TokenKind::Semicolon)?;
        Ok(Node::new(NodeKind::Var { name, init }, self.span_from(start)))
    }

    /// `import a.b.c [as alias] [;]`
    fn parse_import(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Import)?.span;
        let mut path = vec![self.cursor.expect_ident()?];
        while self.cursor.try_eat(TokenKind::Dot)? {
            path.push(self.cursor.expect_ident()?);
        }
        let alias = if self.cursor.try_eat(TokenKind::As)? {
            Some(self.cursor.expect_ident()?)
        } else {
            None
        };
        self.cursor.try_eat(TokenKind::Semicolon)?;
        Ok(Node::new(NodeKind::Import { path, alias }, self.span_from(start)))
    }

    /// `break [(expr)] [;]`
    fn parse_break(&mut self) -> PResult<Node> {
        let start = self.cursor.expect(TokenKind::Break)?.span;
        let value = if self.cursor.try_eat(TokenKind::LParen)? {
            let value = self.parse_expr()?;
            self.cursor.expect(TokenKind::RParen)?;
            Some(Box::new(value))
        } else {
            None
        };
        self.cursor.try_eat(TokenKind::Semicolon)?;
        Ok(Node::new(NodeKind::Break { value }, self.span_from(start)))
    }

    fn parse_expression_statement(&mut self) -> PResult<Node> {
        let start = self.cursor.peek().span;
        let expr = self.parse_expr()?;
        self.cursor.try_eat(TokenKind::Semicolon)?;
        Ok(Node::new(
            NodeKind::ExprStmt(Box::new(expr)),
            self.span_from(start),
        ))
    }
}
