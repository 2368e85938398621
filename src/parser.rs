/**
 * Predictify, a First/Follow/Predict set calculator for LL(1) grammars.
 * Copyright (C) 2024  Eduardo Ibarra
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use crate::grammar::GrammarSpec;
use crate::scanner::{Token, TokenKind};

#[derive(Debug)]
pub(crate) enum ParserError {
  UnexpectedToken(Token, Vec<TokenKind>),
}

/// Recursive descent reader for BNF grammar files:
///
/// ```text
/// bnf_file         = production production_list
/// production_list  = production production_list | EOF
/// production       = ID EQUALS token_list alternative_list END
/// alternative_list = OR token_list alternative_list | <empty>
/// token_list       = token token_list | <empty>
/// token            = ID | TERM
/// ```
pub(crate) struct Parser {
  scanner: Vec<Token>,
  current_ndx: usize,
  grammar: GrammarSpec,
}

impl Parser {
  pub(crate) fn new(tokens: Vec<Token>) -> Self {
    Parser {
      scanner: tokens,
      current_ndx: 0,
      grammar: GrammarSpec::new(String::new()),
    }
  }

  fn error<T>(&self, expected: &[TokenKind]) -> Result<T, ParserError> {
    Err(ParserError::UnexpectedToken(self.scanner[self.current_ndx].clone(), expected.to_vec()))
  }

  fn match_kind(&mut self, kind: TokenKind) -> Result<Token, ParserError> {
    if self.current() != kind {
      return self.error(&[kind]);
    }

    let prev = self.scanner[self.current_ndx].clone();
    self.current_ndx += 1;
    Ok(prev)
  }

  fn current(&self) -> TokenKind {
    // the scanner always terminates the stream with Eof
    self.scanner.get(self.current_ndx).map_or(TokenKind::Eof, |x| x.kind)
  }

  /// The first rule's left-hand side becomes the start symbol.
  pub(crate) fn parse(mut self) -> Result<GrammarSpec, ParserError> {
    self.bnf_file()?;
    self.match_kind(TokenKind::Eof)?;

    Ok(self.grammar)
  }

  fn bnf_file(&mut self) -> Result<(), ParserError> {
    if self.current() == TokenKind::Id {
      self.production()?;
      self.production_list()
    } else {
      self.error(&[TokenKind::Id])
    }
  }

  fn production_list(&mut self) -> Result<(), ParserError> {
    match self.current() {
      TokenKind::Id => {
        self.production()?;
        self.production_list()
      }
      TokenKind::Eof => Ok(()),
      _ => self.error(&[TokenKind::Eof, TokenKind::Id]),
    }
  }

  fn production(&mut self) -> Result<(), ParserError> {
    let nt = self.match_kind(TokenKind::Id)?;
    self.match_kind(TokenKind::Equals)?;

    if self.grammar.start.is_empty() {
      self.grammar.start = nt.value.clone();
    }

    let mut alternative = vec![];
    self.token_list(&mut alternative)?;
    self.grammar.push(nt.value.clone(), alternative);
    self.alternative_list(&nt.value)?;

    self.match_kind(TokenKind::End)?;
    Ok(())
  }

  fn alternative_list(&mut self, nt_name: &str) -> Result<(), ParserError> {
    match self.current() {
      TokenKind::Or => {
        self.match_kind(TokenKind::Or)?;
        let mut alternative = vec![];
        self.token_list(&mut alternative)?;
        self.grammar.push(nt_name, alternative);
        self.alternative_list(nt_name)
      }
      TokenKind::End => Ok(()),
      _ => self.error(&[TokenKind::Or, TokenKind::End]),
    }
  }

  fn token_list(&mut self, alternative: &mut Vec<String>) -> Result<(), ParserError> {
    match self.current() {
      TokenKind::Id | TokenKind::Term => {
        let token = self.token()?;
        alternative.push(token.symbol_name());
        self.token_list(alternative)
      }
      TokenKind::Or | TokenKind::End => Ok(()),
      _ => self.error(&[TokenKind::Id, TokenKind::Term, TokenKind::Or, TokenKind::End]),
    }
  }

  fn token(&mut self) -> Result<Token, ParserError> {
    match self.current() {
      TokenKind::Id => self.match_kind(TokenKind::Id),
      TokenKind::Term => self.match_kind(TokenKind::Term),
      _ => self.error(&[TokenKind::Term, TokenKind::Id]),
    }
  }
}
