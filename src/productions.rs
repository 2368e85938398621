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

/// Attribute of the empty string marker.
pub(crate) const EPSILON: &str = "\u{03B5}";

/// Attribute appended to the start symbol's follow set.
pub(crate) const END_MARKER: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Symbol {
  Terminal(String),
  NonTerminal(String),
}

/// Ordered production: `left -> right`. `right` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Production {
  pub(crate) left: Symbol,
  pub(crate) right: Vec<Symbol>,
}

/// A trailing run of at least two symbols from some right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Suffix {
  pub(crate) symbols: Vec<Symbol>,
}

impl Symbol {
  pub(crate) fn epsilon() -> Self {
    Symbol::Terminal(EPSILON.to_string())
  }

  pub(crate) fn attr(&self) -> &str {
    match self {
      Symbol::Terminal(attr) | Symbol::NonTerminal(attr) => attr.as_str(),
    }
  }

  pub(crate) fn is_non_terminal(&self) -> bool {
    matches!(self, Symbol::NonTerminal(_))
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.attr())
  }
}

impl Production {
  /// An empty `right` becomes `[ε]`.
  pub(crate) fn new(left: Symbol, right: Vec<Symbol>) -> Self {
    let right = if right.is_empty() { vec![Symbol::epsilon()] } else { right };
    Production { left, right }
  }

  /// Key of First(right) in the first table.
  pub(crate) fn right_key(&self) -> String {
    sequence_key(&self.right)
  }
}

impl fmt::Display for Production {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.left, join_attrs(&self.right))
  }
}

impl Suffix {
  pub(crate) fn new(symbols: &[Symbol]) -> Self {
    Suffix { symbols: symbols.to_vec() }
  }
}

impl fmt::Display for Suffix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&join_attrs(&self.symbols))
  }
}

/// Table key for a non-empty symbol sequence. A single symbol is keyed by
/// its own attribute, longer runs by their suffix rendering.
pub(crate) fn sequence_key(symbols: &[Symbol]) -> String {
  match symbols {
    [] => EPSILON.to_string(),
    [single] => single.to_string(),
    _ => join_attrs(symbols),
  }
}

fn join_attrs(symbols: &[Symbol]) -> String {
  symbols.iter().map(Symbol::attr).collect::<Vec<_>>().join(" ")
}
