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
use serde::Serialize;
use crate::grammar::Grammar;
use crate::productions::{END_MARKER, EPSILON, sequence_key};
use crate::set_table::{AttrSet, SetTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
  First,
  Follow,
}

/// Called after every full solver pass with the table as it stands.
pub(crate) trait RoundObserver {
  fn round_finished(&mut self, phase: Phase, round: usize, table: &SetTable);
}

impl RoundObserver for () {
  fn round_finished(&mut self, _phase: Phase, _round: usize, _table: &SetTable) {}
}

impl<F> RoundObserver for F
where
  F: FnMut(Phase, usize, &SetTable),
{
  fn round_finished(&mut self, phase: Phase, round: usize, table: &SetTable) {
    self(phase, round, table)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PredictSet {
  pub(crate) production: String,
  pub(crate) set: AttrSet,
}

/// Converged First and Follow tables plus one predict set per production.
#[derive(Debug, Clone)]
pub(crate) struct Analysis {
  pub(crate) first: SetTable,
  pub(crate) follow: SetTable,
  pub(crate) ps: Vec<PredictSet>,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::First => f.write_str("First"),
      Phase::Follow => f.write_str("Follow"),
    }
  }
}

pub(crate) fn ll_process(grammar: &Grammar, observer: &mut impl RoundObserver) -> Analysis {
  let first = first_sets(grammar, observer);
  let follow = follow_sets(grammar, &first, observer);
  let ps = predict_sets(grammar, &first, &follow);

  Analysis { first, follow, ps }
}

pub(crate) fn initial_first_table(grammar: &Grammar) -> SetTable {
  let mut table = SetTable::new();
  table.seed(EPSILON, [EPSILON]);

  for term in &grammar.terminals {
    table.seed(term.attr(), [term.attr()]);
  }

  for nt in &grammar.non_terminals {
    table.seed(nt.attr(), Vec::<String>::new());
  }

  for suffix in &grammar.suffixes {
    table.seed(suffix.to_string(), Vec::<String>::new());
  }

  table
}

pub(crate) fn initial_follow_table(grammar: &Grammar) -> SetTable {
  let mut table = SetTable::new();

  for nt in &grammar.non_terminals {
    if *nt == grammar.start {
      table.seed(nt.attr(), [END_MARKER]);
    } else {
      table.seed(nt.attr(), Vec::<String>::new());
    }
  }

  table
}

pub(crate) fn first_sets(grammar: &Grammar, observer: &mut impl RoundObserver) -> SetTable {
  let mut first = initial_first_table(grammar);
  let mut rounds = 0;

  loop {
    rounds += 1;
    let changed = first_pass(grammar, &mut first);
    log::debug!("[First] round {} changed: {}", rounds, changed);
    observer.round_finished(Phase::First, rounds, &first);

    if !changed {
      break;
    }
  }

  log::info!("First sets converged after {} rounds", rounds);
  first
}

/// One full pass of both update rules. Returns whether any entry changed.
pub(crate) fn first_pass(grammar: &Grammar, first: &mut SetTable) -> bool {
  let mut changed = false;

  for suffix in &grammar.suffixes {
    let mut candidate = AttrSet::new();

    for symbol in &suffix.symbols {
      let symbol_first = first.get(symbol.attr());
      candidate.extend(symbol_first.iter().cloned());

      // only the whole run being nullable keeps ε
      if !symbol_first.contains(EPSILON) {
        candidate.remove(EPSILON);
        break;
      }
    }

    changed |= first.update(&suffix.to_string(), candidate);
  }

  for prod in &grammar.productions {
    let left = prod.left.attr();
    let mut candidate = first.get(left).clone();
    candidate.extend(first.get(&prod.right_key()).iter().cloned());

    changed |= first.update(left, candidate);
  }

  changed
}

pub(crate) fn follow_sets(grammar: &Grammar, first: &SetTable, observer: &mut impl RoundObserver) -> SetTable {
  let mut follow = initial_follow_table(grammar);
  let mut rounds = 0;

  loop {
    rounds += 1;
    let changed = follow_pass(grammar, first, &mut follow);
    log::debug!("[Follow] round {} changed: {}", rounds, changed);
    observer.round_finished(Phase::Follow, rounds, &follow);

    if !changed {
      break;
    }
  }

  log::info!("Follow sets converged after {} rounds", rounds);
  follow
}

pub(crate) fn follow_pass(grammar: &Grammar, first: &SetTable, follow: &mut SetTable) -> bool {
  let mut changed = false;

  for prod in &grammar.productions {
    for (index, symbol) in prod.right.iter().enumerate() {
      if !symbol.is_non_terminal() {
        continue;
      }

      // an empty remainder keys to ε
      let remainder = sequence_key(&prod.right[index + 1..]);
      let remainder_first = first.get(&remainder);

      let mut candidate = follow.get(symbol.attr()).clone();
      candidate.extend(remainder_first.iter().filter(|x| x.as_str() != EPSILON).cloned());
      if remainder_first.contains(EPSILON) {
        candidate.extend(follow.get(prod.left.attr()).iter().cloned());
      }

      changed |= follow.update(symbol.attr(), candidate);
    }
  }

  changed
}

pub(crate) fn predict_sets(grammar: &Grammar, first: &SetTable, follow: &SetTable) -> Vec<PredictSet> {
  grammar.productions.iter().map(|prod| {
    let right_first = first.get(&prod.right_key());

    let mut set: AttrSet = right_first.iter().filter(|x| x.as_str() != EPSILON).cloned().collect();
    if right_first.contains(EPSILON) {
      set.extend(follow.get(prod.left.attr()).iter().cloned());
    }

    PredictSet { production: prod.to_string(), set }
  }).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::GrammarSpec;

  fn set(items: &[&str]) -> AttrSet {
    items.iter().map(|x| x.to_string()).collect()
  }

  fn build(start: &str, rules: &[(&str, &[&str])]) -> Grammar {
    Grammar::build(&GrammarSpec::from_rules(start, rules)).unwrap()
  }

  fn optional_list() -> Grammar {
    build("S", &[("S", &["A"]), ("A", &["a", "A"]), ("A", &[])])
  }

  fn expression() -> Grammar {
    build("E", &[
      ("E", &["T", "E'"]),
      ("E'", &["+", "T", "E'"]),
      ("E'", &[]),
      ("T", &["F", "T'"]),
      ("T'", &["*", "F", "T'"]),
      ("T'", &[]),
      ("F", &["(", "E", ")"]),
      ("F", &["id"]),
    ])
  }

  fn predict_of<'a>(analysis: &'a Analysis, production: &str) -> &'a AttrSet {
    &analysis.ps.iter().find(|x| x.production == production).unwrap().set
  }

  #[test]
  fn optional_list_sets() {
    let analysis = ll_process(&optional_list(), &mut ());

    assert_eq!(analysis.first.get("a"), &set(&["a"]));
    assert_eq!(analysis.first.get("A"), &set(&["a", EPSILON]));
    assert_eq!(analysis.first.get("S"), &set(&["a", EPSILON]));
    assert_eq!(analysis.first.get("a A"), &set(&["a"]));

    assert_eq!(analysis.follow.get("S"), &set(&["#"]));
    assert_eq!(analysis.follow.get("A"), &set(&["#"]));

    assert_eq!(predict_of(&analysis, "S -> A"), &set(&["a", "#"]));
    assert_eq!(predict_of(&analysis, "A -> a A"), &set(&["a"]));
    assert_eq!(predict_of(&analysis, "A -> \u{03B5}"), &set(&["#"]));
  }

  #[test]
  fn expression_grammar_sets() {
    let analysis = ll_process(&expression(), &mut ());
    let first = &analysis.first;
    let follow = &analysis.follow;

    assert_eq!(first.get("E"), &set(&["(", "id"]));
    assert_eq!(first.get("T"), &set(&["(", "id"]));
    assert_eq!(first.get("F"), &set(&["(", "id"]));
    assert_eq!(first.get("E'"), &set(&["+", EPSILON]));
    assert_eq!(first.get("T'"), &set(&["*", EPSILON]));
    assert_eq!(first.get("T E'"), &set(&["(", "id"]));
    assert_eq!(first.get("E )"), &set(&["(", "id"]));

    assert_eq!(follow.get("E"), &set(&[")", "#"]));
    assert_eq!(follow.get("E'"), &set(&[")", "#"]));
    assert_eq!(follow.get("T"), &set(&["+", ")", "#"]));
    assert_eq!(follow.get("T'"), &set(&["+", ")", "#"]));
    assert_eq!(follow.get("F"), &set(&["*", "+", ")", "#"]));

    assert_eq!(predict_of(&analysis, "E' -> \u{03B5}"), &set(&[")", "#"]));
    assert_eq!(predict_of(&analysis, "T' -> * F T'"), &set(&["*"]));
    assert_eq!(predict_of(&analysis, "F -> ( E )"), &set(&["("]));
  }

  #[test]
  fn suffix_first_drops_epsilon_unless_fully_nullable() {
    let grammar = build("S", &[
      ("S", &["A", "B", "c"]),
      ("S", &["A", "B"]),
      ("A", &["a"]),
      ("A", &[]),
      ("B", &["b"]),
      ("B", &[]),
    ]);
    let first = first_sets(&grammar, &mut ());

    assert_eq!(first.get("A B c"), &set(&["a", "b", "c"]));
    assert_eq!(first.get("B c"), &set(&["b", "c"]));
    assert_eq!(first.get("A B"), &set(&["a", "b", EPSILON]));
    assert_eq!(first.get("S"), &set(&["a", "b", "c", EPSILON]));
  }

  #[test]
  fn left_recursive_cycle_converges() {
    let grammar = build("S", &[("S", &["S", "a"]), ("S", &["A"]), ("A", &["S"]), ("A", &["b"])]);
    let analysis = ll_process(&grammar, &mut ());

    assert_eq!(analysis.first.get("S"), &set(&["b"]));
    assert_eq!(analysis.first.get("A"), &set(&["b"]));
    assert_eq!(analysis.follow.get("S"), &set(&["a", "#"]));
    assert_eq!(analysis.follow.get("A"), &set(&["a", "#"]));
  }

  #[test]
  fn tables_grow_monotonically() {
    let grammar = expression();
    let mut rounds: Vec<(Phase, SetTable)> = vec![];
    ll_process(&grammar, &mut |phase: Phase, _round: usize, table: &SetTable| {
      rounds.push((phase, table.clone()));
    });

    let mut previous = initial_first_table(&grammar);
    let mut phase = Phase::First;
    for (round_phase, table) in &rounds {
      if *round_phase != phase {
        phase = *round_phase;
        previous = initial_follow_table(&grammar);
      }

      for (key, old) in previous.iter() {
        assert!(table.get(key).is_superset(old), "{} lost members in {} round", key, phase);
      }
      previous = table.clone();
    }

    assert!(rounds.iter().any(|(phase, _)| *phase == Phase::Follow));
  }

  #[test]
  fn extra_pass_at_fixed_point_changes_nothing() {
    let grammar = expression();
    let analysis = ll_process(&grammar, &mut ());

    let mut first = analysis.first.clone();
    assert!(!first_pass(&grammar, &mut first));
    assert_eq!(first, analysis.first);

    let mut follow = analysis.follow.clone();
    assert!(!follow_pass(&grammar, &analysis.first, &mut follow));
    assert_eq!(follow, analysis.follow);
  }

  #[test]
  fn rounds_are_numbered_from_one() {
    let grammar = optional_list();
    let mut seen: Vec<(Phase, usize, usize)> = vec![];
    ll_process(&grammar, &mut |phase: Phase, round: usize, table: &SetTable| {
      seen.push((phase, round, table.len()));
    });

    let first_rounds: Vec<_> = seen.iter().filter(|x| x.0 == Phase::First).collect();
    let follow_rounds: Vec<_> = seen.iter().filter(|x| x.0 == Phase::Follow).collect();
    assert_eq!(first_rounds.iter().map(|x| x.1).collect::<Vec<_>>(), (1..=first_rounds.len()).collect::<Vec<_>>());
    assert!(first_rounds.len() >= 2);
    assert!(!follow_rounds.is_empty());
    // ε, a, S, A, a A
    assert!(first_rounds.iter().all(|x| x.2 == 5));
  }

  #[test]
  fn epsilon_only_for_fully_nullable_sequences() {
    let grammar = expression();
    let analysis = ll_process(&grammar, &mut ());

    for suffix in &grammar.suffixes {
      let all_nullable = suffix.symbols.iter().all(|x| analysis.first.contains(x.attr(), EPSILON));
      assert_eq!(analysis.first.contains(&suffix.to_string(), EPSILON), all_nullable, "{}", suffix);
    }
  }

  #[test]
  fn follow_sets_are_complete() {
    let grammar = expression();
    let analysis = ll_process(&grammar, &mut ());

    for prod in &grammar.productions {
      for (index, symbol) in prod.right.iter().enumerate() {
        if !symbol.is_non_terminal() {
          continue;
        }

        let beta = analysis.first.get(&sequence_key(&prod.right[index + 1..]));
        let follow = analysis.follow.get(symbol.attr());
        assert!(beta.iter().filter(|x| x.as_str() != EPSILON).all(|x| follow.contains(x)));
        if beta.contains(EPSILON) {
          assert!(follow.is_superset(analysis.follow.get(prod.left.attr())));
        }
      }
    }
  }

  #[test]
  fn predict_sets_follow_the_ll1_rule() {
    let grammar = expression();
    let analysis = ll_process(&grammar, &mut ());

    for (prod, predict) in grammar.productions.iter().zip(&analysis.ps) {
      let beta = analysis.first.get(&prod.right_key());
      let mut expected: AttrSet = beta.iter().filter(|x| x.as_str() != EPSILON).cloned().collect();
      if beta.contains(EPSILON) {
        expected.extend(analysis.follow.get(prod.left.attr()).iter().cloned());
      }

      assert_eq!(predict.production, prod.to_string());
      assert_eq!(predict.set, expected);
    }
  }

  #[test]
  fn ll1_grammar_has_disjoint_alternatives() {
    let grammar = expression();
    let analysis = ll_process(&grammar, &mut ());

    for (i, a) in grammar.productions.iter().enumerate() {
      for (j, b) in grammar.productions.iter().enumerate().skip(i + 1) {
        if a.left == b.left {
          assert!(analysis.ps[i].set.is_disjoint(&analysis.ps[j].set), "{} / {}", a, b);
        }
      }
    }
  }

  #[test]
  fn identical_productions_stay_distinct() {
    let grammar = build("S", &[("S", &["a"]), ("S", &["a"])]);
    let analysis = ll_process(&grammar, &mut ());

    assert_eq!(analysis.ps.len(), 2);
    assert_eq!(analysis.ps[0], analysis.ps[1]);
  }
}
