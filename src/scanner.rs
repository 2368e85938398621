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

use std::fmt;
use crate::scanner::ScanError::{NoMoreChars, UnexpectedChar};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Coord {
  pub(crate) line_num: usize,
  pub(crate) col: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Span {
  pub(crate) start: Coord,
  pub(crate) end: Coord,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
  Id,
  Term,
  Equals,
  Or,
  End,
  Eof,
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
  pub(crate) kind: TokenKind,
  pub(crate) value: String,
  pub(crate) span: Span,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ScanError {
  // expected, saw, where
  UnexpectedChar(char, char, Coord),
  NoMoreChars(Coord),
}

pub(crate) struct Scanner {
  file: Vec<char>,
  next_char: usize,
  tokens: Vec<Token>,
  seen_newlines: usize,
  last_seen_newline_ndx: i64,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      TokenKind::Id => "identifier",
      TokenKind::Term => "literal",
      TokenKind::Equals => "':'",
      TokenKind::Or => "'|'",
      TokenKind::End => "';'",
      TokenKind::Eof => "end of file",
    };

    f.write_str(name)
  }
}

impl Token {
  /// Name of the symbol this token stands for, quotes stripped.
  pub(crate) fn symbol_name(&self) -> String {
    match self.kind {
      TokenKind::Term => strip_literal(&self.value),
      _ => self.value.clone(),
    }
  }
}

fn strip_literal(literal: &str) -> String {
  let mut chars = literal.chars();
  chars.next();
  chars.next_back();
  chars.as_str().to_string()
}

impl Scanner {
  pub(crate) fn new(file: &str) -> Self {
    Scanner {
      file: file.chars().collect(),
      next_char: 0,
      tokens: vec![],
      seen_newlines: 0,
      last_seen_newline_ndx: -1,
    }
  }

  pub(crate) fn scan(&mut self) -> Result<Vec<Token>, ScanError> {
    while self.has_next() {
      let start_of_token = self.next_char;
      let start_coord = self.index_to_coord(start_of_token);

      let current = self.current()?;
      let kind = if current.is_whitespace() {
        self.whitespace()?;
        continue; // do not make whitespace tokens.
      } else if current == '/' {
        self.comment()?;
        continue; // do not make comment tokens.
      } else if current == '_' || current.is_alphabetic() {
        self.identifier()?;
        TokenKind::Id
      } else if current == '"' || current == '\'' {
        self.literal()?;
        TokenKind::Term
      } else if current == ':' {
        // either ':' or '::=' is an equals token.
        self.match_char(':')?;

        if self.has_next() && self.current()? == ':' {
          self.match_char(':')?;
          self.match_char('=')?;
        }

        TokenKind::Equals
      } else if current == '|' {
        self.match_char('|')?;
        TokenKind::Or
      } else if current == ';' || current == '.' {
        self.match_char(current)?;
        TokenKind::End
      } else {
        return Err(UnexpectedChar('_', current, start_coord));
      };

      let value: String = self.file[start_of_token..self.next_char].iter().collect();

      self.tokens.push(Token {
        kind,
        value,
        span: Span { start: start_coord, end: self.index_to_coord(self.next_char) },
      });
    }

    let eof = self.index_to_coord(self.next_char);
    self.tokens.push(Token {
      kind: TokenKind::Eof,
      value: String::new(),
      span: Span { start: eof, end: eof },
    });

    Ok(std::mem::take(&mut self.tokens))
  }

  fn has_next(&self) -> bool {
    self.next_char < self.file.len()
  }

  fn current(&self) -> Result<char, ScanError> {
    match self.file.get(self.next_char) {
      None => Err(NoMoreChars(self.index_to_coord(self.next_char))),
      Some(character) => Ok(*character)
    }
  }

  fn match_char(&mut self, expected: char) -> Result<(), ScanError> {
    let current = self.current()?;
    if current != expected {
      return Err(UnexpectedChar(expected, current, self.index_to_coord(self.next_char)));
    }

    if current == '\n' {
      self.seen_newlines += 1;
      self.last_seen_newline_ndx = self.next_char as i64;
    }

    self.next_char += 1;

    Ok(())
  }

  fn index_to_coord(&self, index: usize) -> Coord {
    Coord {
      line_num: self.seen_newlines + 1,
      col: (index as i64 - self.last_seen_newline_ndx) as usize,
    }
  }

  fn comment(&mut self) -> Result<(), ScanError> {
    self.match_char('/')?;
    self.match_char('/')?;

    // a comment may run to the end of the file.
    while self.has_next() && self.current()? != '\n' {
      self.match_char(self.current()?)?;
    }

    if self.has_next() {
      self.match_char('\n')?;
    }

    Ok(())
  }

  fn whitespace(&mut self) -> Result<(), ScanError> {
    while self.has_next() && self.current()?.is_whitespace() {
      self.match_char(self.current()?)?;
    }

    Ok(())
  }

  fn identifier(&mut self) -> Result<(), ScanError> {
    self.match_char(self.current()?)?;

    // primes are allowed so that E' and T' read naturally.
    while self.has_next() {
      let current = self.current()?;
      if current == '_' || current == '\'' || current.is_alphanumeric() {
        self.match_char(current)?;
      } else {
        break;
      }
    }

    Ok(())
  }

  fn literal(&mut self) -> Result<(), ScanError> {
    let quote = self.current()?;
    self.match_char(quote)?;

    while self.current()? != quote {
      if self.current()? == '\n' {
        return Err(UnexpectedChar(quote, '\n', self.index_to_coord(self.next_char)));
      }

      self.match_char(self.current()?)?;
    }

    self.match_char(quote)
  }
}
