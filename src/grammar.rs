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

use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use crate::productions::{END_MARKER, EPSILON, Production, Suffix, Symbol};

/// Grammar as handed over by a loader, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GrammarSpec {
  pub(crate) start: String,
  pub(crate) productions: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GrammarError {
  NoProductions,
  EmptyStartSymbol,
  UndefinedStartSymbol(String),
  // index of the offending production in the input
  EmptyProduction(usize),
  ReservedName(String),
  InvalidName(String),
}

/// Classified grammar with its suffix cache. Immutable once built.
#[derive(Debug, Clone)]
pub(crate) struct Grammar {
  pub(crate) start: Symbol,
  pub(crate) terminals: Vec<Symbol>,
  pub(crate) non_terminals: Vec<Symbol>,
  pub(crate) productions: Vec<Production>,
  pub(crate) suffixes: Vec<Suffix>,
}

impl fmt::Display for GrammarError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GrammarError::NoProductions => write!(f, "grammar has no productions"),
      GrammarError::EmptyStartSymbol => write!(f, "start symbol is empty"),
      GrammarError::UndefinedStartSymbol(name) => {
        write!(f, "start symbol \"{}\" is not the left-hand side of any production", name)
      }
      GrammarError::EmptyProduction(index) => {
        write!(f, "production #{} has no left-hand side", index + 1)
      }
      GrammarError::ReservedName(name) => write!(f, "\"{}\" is reserved and cannot name a symbol", name),
      GrammarError::InvalidName(name) => write!(f, "\"{}\" is not a valid symbol name", name),
    }
  }
}

impl Error for GrammarError {}

impl GrammarSpec {
  pub(crate) fn new(start: impl Into<String>) -> Self {
    GrammarSpec {
      start: start.into(),
      productions: vec![],
    }
  }

  pub(crate) fn push(&mut self, left: impl Into<String>, right: Vec<String>) {
    self.productions.push((left.into(), right));
  }
}

#[cfg(test)]
impl GrammarSpec {
  pub(crate) fn from_rules(start: &str, rules: &[(&str, &[&str])]) -> Self {
    let mut spec = GrammarSpec::new(start);
    for (left, right) in rules {
      spec.push(*left, right.iter().map(|x| x.to_string()).collect());
    }
    spec
  }
}

impl Grammar {
  pub(crate) fn build(spec: &GrammarSpec) -> Result<Grammar, GrammarError> {
    if spec.productions.is_empty() {
      return Err(GrammarError::NoProductions);
    }

    if spec.start.is_empty() {
      return Err(GrammarError::EmptyStartSymbol);
    }

    let mut defined = HashSet::new();
    let mut non_terminals = vec![];
    for (left, _) in &spec.productions {
      check_name(left)?;
      if defined.insert(left.as_str()) {
        non_terminals.push(Symbol::NonTerminal(left.clone()));
      }
    }

    if !defined.contains(spec.start.as_str()) {
      return Err(GrammarError::UndefinedStartSymbol(spec.start.clone()));
    }

    let mut seen_terms = HashSet::new();
    let mut terminals = vec![];
    let mut productions = vec![];
    for (left, right) in &spec.productions {
      let mut symbols = vec![];
      for name in right {
        check_name(name)?;
        if defined.contains(name.as_str()) {
          symbols.push(Symbol::NonTerminal(name.clone()));
        } else {
          if seen_terms.insert(name.as_str()) {
            terminals.push(Symbol::Terminal(name.clone()));
          }
          symbols.push(Symbol::Terminal(name.clone()));
        }
      }

      productions.push(Production::new(Symbol::NonTerminal(left.clone()), symbols));
    }

    let suffixes = collect_suffixes(&productions);
    log::debug!(
      "built grammar: {} terminals, {} nonterminals, {} productions, {} cached suffixes",
      terminals.len(),
      non_terminals.len(),
      productions.len(),
      suffixes.len()
    );

    Ok(Grammar {
      start: Symbol::NonTerminal(spec.start.clone()),
      terminals,
      non_terminals,
      productions,
      suffixes,
    })
  }
}

fn check_name(name: &str) -> Result<(), GrammarError> {
  if name == EPSILON || name == END_MARKER {
    return Err(GrammarError::ReservedName(name.to_string()));
  }

  if name.is_empty() || name.chars().any(char::is_whitespace) {
    return Err(GrammarError::InvalidName(name.to_string()));
  }

  Ok(())
}

/// Every trailing window of length >= 2, deduplicated, in first-seen order.
fn collect_suffixes(productions: &[Production]) -> Vec<Suffix> {
  let mut suffixes: Vec<Suffix> = vec![];

  for prod in productions {
    let len = prod.right.len();
    if len < 2 {
      continue;
    }

    for start in (0..=len - 2).rev() {
      let suffix = Suffix::new(&prod.right[start..]);
      if !suffixes.contains(&suffix) {
        suffixes.push(suffix);
      }
    }
  }

  suffixes
}
