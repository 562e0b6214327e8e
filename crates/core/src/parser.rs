//! Recursive descent over the MySQL SELECT grammar.
//!
//! Each top-level clause production runs inside a tracking scope that
//! records the clause's source span and the placeholders consumed while it
//! was the outermost scope. Subqueries re-enter the same productions but
//! never acquire a scope of their own, so a `?` nested arbitrarily deep in
//! a clause expression lands in that clause's placeholder list.

use crate::errors::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::sections::{ParseResult, SectionKind, SqlSection};

type ParseOutcome = Result<(), ParseError>;

/// Depth-1 tracking state: only the outermost clause scope captures.
#[derive(Debug, Default)]
struct SectionTracker {
    in_progress: bool,
    section_start: usize,
    placeholders: Vec<usize>,
}

impl SectionTracker {
    /// Returns true when the caller became the owner of the scope.
    fn try_acquire(&mut self, section_start: usize) -> bool {
        if self.in_progress {
            return false;
        }
        self.in_progress = true;
        self.section_start = section_start;
        self.placeholders.clear();
        true
    }

    fn release(&mut self) -> Vec<usize> {
        self.in_progress = false;
        std::mem::take(&mut self.placeholders)
    }

    fn record(&mut self, offset: usize) {
        if self.in_progress {
            self.placeholders.push(offset - self.section_start);
        }
    }
}

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    tracker: SectionTracker,
    result: ParseResult,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            tracker: SectionTracker::default(),
            result: ParseResult::default(),
        }
    }

    pub(crate) fn run(mut self) -> Result<ParseResult, ParseError> {
        self.stmt()?;

        if self.lexer.has() {
            log::debug!("tokens remain after the statement");
            return Err(ParseError::InvalidSyntax);
        }

        Ok(self.result)
    }

    fn peek(&mut self) -> TokenKind {
        self.lexer.peek().kind
    }

    fn peek_next(&mut self) -> TokenKind {
        self.lexer.peek_next().kind
    }

    fn advance(&mut self) -> Token<'a> {
        self.lexer.consume()
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.peek() == kind {
            Ok(self.advance())
        } else {
            Err(ParseError::InvalidSyntax)
        }
    }

    fn placeholder(&mut self) -> ParseOutcome {
        let token = self.expect(TokenKind::Placeholder)?;
        self.tracker.record(token.offset);
        Ok(())
    }

    /// Runs `production` inside a tracking scope. The first scope on the
    /// stack owns the tracker; it stores the clause's verbatim source slice
    /// and the accumulated placeholders once the production succeeds having
    /// consumed at least one token. Release runs on every exit path.
    fn tracked(
        &mut self,
        kind: SectionKind,
        production: impl FnOnce(&mut Self) -> ParseOutcome,
    ) -> ParseOutcome {
        let start_offset = self.lexer.peek().offset;
        let start_count = self.lexer.tokens_consumed();
        let owner = self.tracker.try_acquire(start_offset);

        let outcome = production(self);

        if owner {
            let placeholders = self.tracker.release();
            if outcome.is_ok()
                && self.lexer.tokens_consumed() > start_count
                && let Some(last) = self.lexer.previous()
            {
                let content = &self.lexer.source()[start_offset..last.end()];
                self.result.set(kind, SqlSection::new(content, placeholders));
            }
        }

        outcome
    }

    /// `SELECT` followed by the clause productions in statement order. All
    /// clauses but the column list are optional.
    fn stmt(&mut self) -> ParseOutcome {
        self.expect(TokenKind::Select)?;
        self.modifiers()?;
        self.columns()?;
        self.into_clause(SectionKind::FirstInto)?;
        self.tables()?;
        self.where_clause()?;
        self.group_by()?;
        self.having()?;
        self.order_by()?;
        self.limit()?;
        self.procedure()?;
        self.into_clause(SectionKind::SecondInto)?;
        self.flags()
    }

    fn modifiers(&mut self) -> ParseOutcome {
        self.tracked(SectionKind::Modifiers, |p| {
            if matches!(
                p.peek(),
                TokenKind::All | TokenKind::Distinct | TokenKind::Distinctrow
            ) {
                p.advance();
            }
            p.accept(TokenKind::HighPriority);
            p.accept(TokenKind::StraightJoin);
            p.accept(TokenKind::SqlSmallResult);
            p.accept(TokenKind::SqlBigResult);
            p.accept(TokenKind::SqlBufferResult);
            if matches!(
                p.peek(),
                TokenKind::SqlCache | TokenKind::SqlNoCache | TokenKind::SqlCalcFoundRows
            ) {
                p.advance();
            }
            Ok(())
        })
    }

    fn columns(&mut self) -> ParseOutcome {
        self.tracked(SectionKind::Columns, |p| {
            p.select_item()?;
            while p.accept(TokenKind::Comma) {
                p.select_item()?;
            }
            Ok(())
        })
    }

    fn select_item(&mut self) -> ParseOutcome {
        self.expression()?;
        self.alias()
    }

    /// `AS identifier`, a bare identifier, or nothing.
    fn alias(&mut self) -> ParseOutcome {
        if self.accept(TokenKind::As) {
            self.expect(TokenKind::Identifier)?;
        } else if self.peek() == TokenKind::Identifier {
            self.advance();
        }
        Ok(())
    }

    /// `INTO OUTFILE … | INTO DUMPFILE … | INTO @var, …`. The same inner
    /// grammar serves both the post-columns and the trailing position.
    fn into_clause(&mut self, kind: SectionKind) -> ParseOutcome {
        if self.peek() != TokenKind::Into {
            return Ok(());
        }

        self.tracked(kind, |p| {
            p.advance();
            match p.peek() {
                TokenKind::Outfile => p.into_outfile(),
                TokenKind::Dumpfile => {
                    p.advance();
                    p.expect(TokenKind::StringLiteral)?;
                    Ok(())
                }
                TokenKind::Variable => {
                    p.advance();
                    while p.accept(TokenKind::Comma) {
                        p.expect(TokenKind::Variable)?;
                    }
                    Ok(())
                }
                _ => Err(ParseError::InvalidSyntax),
            }
        })
    }

    fn into_outfile(&mut self) -> ParseOutcome {
        self.advance();
        self.expect(TokenKind::StringLiteral)?;

        if self.accept(TokenKind::Character) {
            self.expect(TokenKind::Set)?;
            self.expect(TokenKind::Identifier)?;
        }

        if matches!(self.peek(), TokenKind::Fields | TokenKind::Columns) {
            self.advance();
            if self.accept(TokenKind::Terminated) {
                self.expect(TokenKind::By)?;
                self.expect(TokenKind::StringLiteral)?;
            }
            if self.accept(TokenKind::Optionally) {
                self.expect(TokenKind::Enclosed)?;
                self.expect(TokenKind::By)?;
                self.expect(TokenKind::StringLiteral)?;
            } else if self.accept(TokenKind::Enclosed) {
                self.expect(TokenKind::By)?;
                self.expect(TokenKind::StringLiteral)?;
            }
            if self.accept(TokenKind::Escaped) {
                self.expect(TokenKind::By)?;
                self.expect(TokenKind::StringLiteral)?;
            }
        }

        if self.accept(TokenKind::Lines) {
            if self.accept(TokenKind::Starting) {
                self.expect(TokenKind::By)?;
                self.expect(TokenKind::StringLiteral)?;
            }
            if self.accept(TokenKind::Terminated) {
                self.expect(TokenKind::By)?;
                self.expect(TokenKind::StringLiteral)?;
            }
        }

        Ok(())
    }

    fn tables(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::From) {
            return Ok(());
        }

        self.tracked(SectionKind::Tables, |p| {
            p.joined_table()?;
            while p.accept(TokenKind::Comma) {
                p.joined_table()?;
            }
            Ok(())
        })
    }

    fn joined_table(&mut self) -> ParseOutcome {
        self.table_factor()?;

        loop {
            match self.peek() {
                TokenKind::Natural => {
                    self.advance();
                    if matches!(
                        self.peek(),
                        TokenKind::Inner | TokenKind::Left | TokenKind::Right
                    ) {
                        self.advance();
                    }
                    self.accept(TokenKind::Outer);
                    self.expect(TokenKind::Join)?;
                    self.table_factor()?;
                }
                TokenKind::Inner | TokenKind::Cross | TokenKind::Straight => {
                    self.advance();
                    self.expect(TokenKind::Join)?;
                    self.table_factor()?;
                    self.join_specification(false)?;
                }
                TokenKind::Join => {
                    self.advance();
                    self.table_factor()?;
                    self.join_specification(false)?;
                }
                TokenKind::Left | TokenKind::Right => {
                    self.advance();
                    self.accept(TokenKind::Outer);
                    self.expect(TokenKind::Join)?;
                    self.table_factor()?;
                    self.join_specification(true)?;
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// `ON expression` or `USING (ident, …)`. LEFT and RIGHT joins demand
    /// one; the other join forms take it or leave it.
    fn join_specification(&mut self, required: bool) -> ParseOutcome {
        match self.peek() {
            TokenKind::On => {
                self.advance();
                self.expression()
            }
            TokenKind::Using => {
                self.advance();
                self.expect(TokenKind::OpenParen)?;
                self.identifier_list()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(())
            }
            _ if required => Err(ParseError::InvalidSyntax),
            _ => Ok(()),
        }
    }

    fn table_factor(&mut self) -> ParseOutcome {
        match self.peek() {
            TokenKind::Placeholder => self.placeholder(),
            TokenKind::OpenParen => {
                self.advance();
                if self.peek() == TokenKind::Select {
                    self.stmt()?;
                    self.expect(TokenKind::CloseParen)?;
                    self.alias()?;
                    if self.accept(TokenKind::OpenParen) {
                        self.identifier_list()?;
                        self.expect(TokenKind::CloseParen)?;
                    }
                } else {
                    self.table_name()?;
                    while self.accept(TokenKind::Comma) {
                        self.table_name()?;
                    }
                    self.expect(TokenKind::CloseParen)?;
                }
                Ok(())
            }
            TokenKind::Identifier | TokenKind::QualifiedIdentifier => {
                self.table_name()?;
                if self.accept(TokenKind::Partition) {
                    self.expect(TokenKind::OpenParen)?;
                    self.identifier_list()?;
                    self.expect(TokenKind::CloseParen)?;
                }
                self.alias()?;
                self.index_hints()
            }
            _ => Err(ParseError::InvalidSyntax),
        }
    }

    fn table_name(&mut self) -> ParseOutcome {
        let token = self.lexer.peek();
        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(())
            }
            TokenKind::QualifiedIdentifier if token.identifier_parts() <= 3 => {
                self.advance();
                Ok(())
            }
            _ => Err(ParseError::InvalidSyntax),
        }
    }

    /// Zero or more index hints. A comma continues the hint chain only when
    /// the token after it starts another hint; otherwise the comma belongs
    /// to the enclosing table list.
    fn index_hints(&mut self) -> ParseOutcome {
        loop {
            while matches!(
                self.peek(),
                TokenKind::Use | TokenKind::Force | TokenKind::Ignore
            ) {
                self.index_hint()?;
            }

            if self.peek() == TokenKind::Comma
                && matches!(
                    self.peek_next(),
                    TokenKind::Use | TokenKind::Force | TokenKind::Ignore
                )
            {
                self.advance();
                continue;
            }

            break;
        }

        Ok(())
    }

    fn index_hint(&mut self) -> ParseOutcome {
        self.advance();

        if !matches!(self.peek(), TokenKind::Index | TokenKind::Key) {
            return Err(ParseError::InvalidSyntax);
        }
        self.advance();

        if self.accept(TokenKind::For) {
            match self.peek() {
                TokenKind::Join => {
                    self.advance();
                }
                TokenKind::Order | TokenKind::Group => {
                    self.advance();
                    self.expect(TokenKind::By)?;
                }
                _ => return Err(ParseError::InvalidSyntax),
            }
        }

        self.expect(TokenKind::OpenParen)?;
        self.identifier_list()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(())
    }

    fn identifier_list(&mut self) -> ParseOutcome {
        self.expect(TokenKind::Identifier)?;
        while self.accept(TokenKind::Comma) {
            self.expect(TokenKind::Identifier)?;
        }
        Ok(())
    }

    fn where_clause(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::Where) {
            return Ok(());
        }
        self.tracked(SectionKind::Where, Self::expression)
    }

    fn group_by(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::Group) {
            return Ok(());
        }
        self.expect(TokenKind::By)?;
        self.tracked(SectionKind::GroupBy, Self::ordering_list)
    }

    fn having(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::Having) {
            return Ok(());
        }
        self.tracked(SectionKind::Having, Self::expression)
    }

    fn order_by(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::Order) {
            return Ok(());
        }
        self.expect(TokenKind::By)?;
        self.tracked(SectionKind::OrderBy, Self::ordering_list)
    }

    fn ordering_list(&mut self) -> ParseOutcome {
        loop {
            self.expression()?;
            if matches!(self.peek(), TokenKind::Asc | TokenKind::Desc) {
                self.advance();
            }
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        Ok(())
    }

    fn limit(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::Limit) {
            return Ok(());
        }

        self.tracked(SectionKind::Limit, |p| {
            p.limit_operand()?;
            if p.accept(TokenKind::Comma) || p.accept(TokenKind::Offset) {
                p.limit_operand()?;
            } else if matches!(p.peek(), TokenKind::Number | TokenKind::Placeholder) {
                // LIMIT also takes two bare operands with no separator.
                p.limit_operand()?;
            }
            Ok(())
        })
    }

    fn limit_operand(&mut self) -> ParseOutcome {
        match self.peek() {
            TokenKind::Number => {
                self.advance();
                Ok(())
            }
            TokenKind::Placeholder => self.placeholder(),
            _ => Err(ParseError::InvalidSyntax),
        }
    }

    fn procedure(&mut self) -> ParseOutcome {
        if !self.accept(TokenKind::Procedure) {
            return Ok(());
        }

        self.tracked(SectionKind::Procedure, |p| {
            p.expect(TokenKind::Identifier)?;
            p.expect(TokenKind::OpenParen)?;
            if p.peek() != TokenKind::CloseParen {
                p.expression()?;
                while p.accept(TokenKind::Comma) {
                    p.expression()?;
                }
            }
            p.expect(TokenKind::CloseParen)?;
            Ok(())
        })
    }

    /// `FOR UPDATE` or `LOCK IN SHARE MODE`.
    fn flags(&mut self) -> ParseOutcome {
        if !matches!(self.peek(), TokenKind::For | TokenKind::Lock) {
            return Ok(());
        }

        self.tracked(SectionKind::Flags, |p| {
            if p.accept(TokenKind::For) {
                p.expect(TokenKind::Update)?;
            } else {
                p.expect(TokenKind::Lock)?;
                p.expect(TokenKind::In)?;
                p.expect(TokenKind::Share)?;
                p.expect(TokenKind::Mode)?;
            }
            Ok(())
        })
    }

    /// Logical connectives, comparisons with optional `ALL`/`ANY`
    /// subqueries, and the `IS [NOT] …` tail. Right-associative.
    fn expression(&mut self) -> ParseOutcome {
        self.predicate_expression()?;

        loop {
            match self.peek() {
                TokenKind::Or
                | TokenKind::LogicalOr
                | TokenKind::And
                | TokenKind::LogicalAnd
                | TokenKind::Xor
                | TokenKind::Arrow => {
                    self.advance();
                    self.expression()?;
                }
                TokenKind::Comparison => {
                    self.advance();
                    if matches!(self.peek(), TokenKind::All | TokenKind::Any) {
                        self.advance();
                        self.expect(TokenKind::OpenParen)?;
                        self.stmt()?;
                        self.expect(TokenKind::CloseParen)?;
                    } else {
                        self.expression()?;
                    }
                }
                TokenKind::Is => {
                    self.advance();
                    self.accept(TokenKind::Not);
                    if !matches!(
                        self.peek(),
                        TokenKind::Null | TokenKind::True | TokenKind::False | TokenKind::Unknown
                    ) {
                        return Err(ParseError::InvalidSyntax);
                    }
                    self.advance();
                }
                _ => break,
            }
        }

        Ok(())
    }

    /// `SOUNDS LIKE`, and the `[NOT] REGEXP | BETWEEN | LIKE | IN` family.
    fn predicate_expression(&mut self) -> ParseOutcome {
        self.arithm_expression()?;

        if self.accept(TokenKind::Sounds) {
            self.expect(TokenKind::Like)?;
            return self.expression();
        }

        let negated = self.accept(TokenKind::Not);
        match self.peek() {
            TokenKind::Regexp => {
                self.advance();
                self.expression()
            }
            TokenKind::Between => {
                self.advance();
                self.predicate_expression()?;
                self.expect(TokenKind::And)?;
                self.expression()
            }
            TokenKind::Like => {
                self.advance();
                self.expression()?;
                if self.accept(TokenKind::Escape) {
                    self.expression()?;
                }
                Ok(())
            }
            TokenKind::In => {
                self.advance();
                self.expect(TokenKind::OpenParen)?;
                self.expression()?;
                while self.accept(TokenKind::Comma) {
                    self.expression()?;
                }
                self.expect(TokenKind::CloseParen)?;
                Ok(())
            }
            _ if negated => Err(ParseError::InvalidSyntax),
            _ => Ok(()),
        }
    }

    /// At most one binary arithmetic or bitwise operator, or a `COLLATE`
    /// tail; the right operand re-enters the full expression grammar.
    fn arithm_expression(&mut self) -> ParseOutcome {
        self.simple_expression()?;

        match self.peek() {
            TokenKind::Pipe
            | TokenKind::Ampersand
            | TokenKind::ShiftLeft
            | TokenKind::ShiftRight
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Div
            | TokenKind::Mod
            | TokenKind::Percent
            | TokenKind::Caret => {
                self.advance();
                self.expression()
            }
            TokenKind::Collate => {
                self.advance();
                self.expect(TokenKind::Identifier)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn simple_expression(&mut self) -> ParseOutcome {
        let token = self.lexer.peek();

        match token.kind {
            TokenKind::Number
            | TokenKind::BitValue
            | TokenKind::HexValue
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::Variable
            | TokenKind::Star => {
                self.advance();
                Ok(())
            }
            TokenKind::QualifiedIdentifier | TokenKind::WildcardIdentifier => {
                if token.identifier_parts() > 3 {
                    return Err(ParseError::InvalidSyntax);
                }
                self.advance();
                Ok(())
            }
            TokenKind::Identifier => {
                self.advance();
                if self.peek() == TokenKind::OpenParen {
                    self.advance();
                    if self.peek() != TokenKind::CloseParen {
                        self.expression()?;
                        while self.accept(TokenKind::Comma) {
                            self.expression()?;
                        }
                    }
                    self.expect(TokenKind::CloseParen)?;
                }
                Ok(())
            }
            TokenKind::StringLiteral => {
                self.string_literal();
                Ok(())
            }
            TokenKind::Date | TokenKind::Time | TokenKind::Timestamp => {
                self.advance();
                self.expect(TokenKind::StringLiteral)?;
                while self.peek() == TokenKind::StringLiteral {
                    self.advance();
                }
                Ok(())
            }
            TokenKind::Placeholder => self.placeholder(),
            TokenKind::OpenParen => {
                self.advance();
                self.expression()?;
                while self.accept(TokenKind::Comma) {
                    self.expression()?;
                }
                self.expect(TokenKind::CloseParen)?;
                Ok(())
            }
            TokenKind::Exists => {
                self.advance();
                self.expect(TokenKind::OpenParen)?;
                self.stmt()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(())
            }
            TokenKind::Select => self.stmt(),
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Not
            | TokenKind::Binary => {
                self.advance();
                self.expression()
            }
            TokenKind::Interval => {
                self.advance();
                self.expression()?;
                self.expect(TokenKind::IntervalUnit)?;
                Ok(())
            }
            TokenKind::Case => self.case_expression(),
            TokenKind::Match => self.match_expression(),
            TokenKind::Row => {
                self.advance();
                self.expect(TokenKind::OpenParen)?;
                self.expression()?;
                while self.accept(TokenKind::Comma) {
                    self.expression()?;
                }
                self.expect(TokenKind::CloseParen)?;
                Ok(())
            }
            _ => Err(ParseError::InvalidSyntax),
        }
    }

    /// Adjacent string literals separated only by whitespace form one
    /// logical string.
    fn string_literal(&mut self) {
        self.advance();
        while self.peek() == TokenKind::StringLiteral {
            self.advance();
        }
    }

    /// `CASE (expr)? (WHEN expr THEN expr)+ (ELSE expr)? END`.
    fn case_expression(&mut self) -> ParseOutcome {
        self.advance();

        if self.peek() != TokenKind::When {
            self.expression()?;
        }
        self.expect(TokenKind::When)?;

        loop {
            self.expression()?;
            self.expect(TokenKind::Then)?;
            self.expression()?;
            if !self.accept(TokenKind::When) {
                break;
            }
        }

        if self.accept(TokenKind::Else) {
            self.expression()?;
        }

        self.expect(TokenKind::End)?;
        Ok(())
    }

    /// `MATCH (expr, …) AGAINST (expr [search modifiers])`. The AGAINST
    /// body stops at the arithmetic level so `IN BOOLEAN MODE` stays
    /// readable as a search modifier rather than an IN predicate.
    fn match_expression(&mut self) -> ParseOutcome {
        self.advance();
        self.expect(TokenKind::OpenParen)?;
        self.expression()?;
        while self.accept(TokenKind::Comma) {
            self.expression()?;
        }
        self.expect(TokenKind::CloseParen)?;

        self.expect(TokenKind::Against)?;
        self.expect(TokenKind::OpenParen)?;
        self.arithm_expression()?;

        if self.accept(TokenKind::With) {
            self.expect(TokenKind::Query)?;
            self.expect(TokenKind::Expansion)?;
        } else if self.accept(TokenKind::In) {
            if self.accept(TokenKind::Boolean) {
                self.expect(TokenKind::Mode)?;
            } else {
                self.expect(TokenKind::Natural)?;
                self.expect(TokenKind::Language)?;
                self.expect(TokenKind::Mode)?;
                if self.accept(TokenKind::With) {
                    self.expect(TokenKind::Query)?;
                    self.expect(TokenKind::Expansion)?;
                }
            }
        }

        self.expect(TokenKind::CloseParen)?;
        Ok(())
    }
}
