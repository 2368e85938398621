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

use serde::Serialize;
use crate::grammar::Grammar;
use crate::ll_processing::{Analysis, Phase, PredictSet};
use crate::set_table::{AttrSet, SetEntry, SetTable};

const RULE_WIDTH: usize = 18;

struct GeneratorContext {
  output: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  first: Vec<SetEntry>,
  follow: Vec<SetEntry>,
  ps: &'a [PredictSet],
}

impl GeneratorContext {
  fn new() -> Self {
    GeneratorContext {
      output: String::new(),
    }
  }

  fn emit_newline(&mut self) {
    self.output.push('\n');
  }

  fn push_line(&mut self, value: &str) {
    self.output.push_str(value);
    self.emit_newline();
  }

  fn emit_header(&mut self, title: &str) {
    let rule = "-".repeat(RULE_WIDTH);
    self.push_line(&format!("{}{}{}", rule, title, rule));
    self.emit_newline();
  }

  fn emit_entry(&mut self, label: &str, key: &str, set: &AttrSet) {
    self.push_line(&format!("[{}] {} ====> {}", label, key, format_set(set)));
  }
}

/// Sets render as `{a, b}` in sorted order, `{}` when empty.
pub(crate) fn format_set(set: &AttrSet) -> String {
  let items: Vec<&str> = set.iter().map(String::as_str).collect();
  format!("{{{}}}", items.join(", "))
}

fn ordered_entries(phase: Phase, table: &SetTable) -> Vec<SetEntry> {
  match phase {
    Phase::First => table.entries_by_length(),
    Phase::Follow => table.entries(),
  }
}

pub(crate) fn generate_report(grammar: &Grammar, analysis: &Analysis) -> String {
  let mut ctx = GeneratorContext::new();

  ctx.emit_header("Productions");
  for prod in &grammar.productions {
    ctx.push_line(&prod.to_string());
  }

  ctx.emit_newline();
  ctx.emit_header("First Set");
  for entry in ordered_entries(Phase::First, &analysis.first) {
    ctx.emit_entry("First", &entry.key, &entry.set);
  }

  ctx.emit_newline();
  ctx.emit_header("Follow Set");
  for entry in ordered_entries(Phase::Follow, &analysis.follow) {
    ctx.emit_entry("Follow", &entry.key, &entry.set);
  }

  ctx.emit_newline();
  ctx.emit_header("PS Set");
  for predict in &analysis.ps {
    ctx.emit_entry("PS", &predict.production, &predict.set);
  }

  ctx.output
}

pub(crate) fn generate_round(phase: Phase, round: usize, table: &SetTable) -> String {
  let mut ctx = GeneratorContext::new();
  let label = phase.to_string();

  ctx.emit_header(&format!("{} Round {}", label, round));
  for entry in ordered_entries(phase, table) {
    ctx.emit_entry(&label, &entry.key, &entry.set);
  }

  ctx.output
}

pub(crate) fn generate_json(analysis: &Analysis) -> Result<String, serde_json::Error> {
  let report = JsonReport {
    first: ordered_entries(Phase::First, &analysis.first),
    follow: ordered_entries(Phase::Follow, &analysis.follow),
    ps: &analysis.ps,
  };

  serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::GrammarSpec;
  use crate::ll_processing::ll_process;

  fn analyzed() -> (Grammar, Analysis) {
    let spec = GrammarSpec::from_rules("S", &[("S", &["A"]), ("A", &["a", "A"]), ("A", &[])]);
    let grammar = Grammar::build(&spec).unwrap();
    let analysis = ll_process(&grammar, &mut ());
    (grammar, analysis)
  }

  #[test]
  fn formats_sets() {
    assert_eq!(format_set(&AttrSet::new()), "{}");
    assert_eq!(format_set(&["b".to_string(), "a".to_string()].into()), "{a, b}");
  }

  #[test]
  fn text_report_sections() {
    let (grammar, analysis) = analyzed();
    let report = generate_report(&grammar, &analysis);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "------------------Productions------------------");
    assert_eq!(lines[2], "S -> A");
    assert_eq!(lines[4], "A -> \u{03B5}");
    assert!(lines.contains(&"[First] A ====> {a, \u{03B5}}"));
    assert!(lines.contains(&"[Follow] A ====> {#}"));
    assert!(lines.contains(&"[PS] S -> A ====> {#, a}"));

    let first_keys: Vec<&str> = lines.iter()
      .filter_map(|x| x.strip_prefix("[First] "))
      .map(|x| x.split(" ====> ").next().unwrap())
      .collect();
    assert_eq!(first_keys, vec!["A", "S", "a", "\u{03B5}", "a A"]);
  }

  #[test]
  fn round_header() {
    let (_, analysis) = analyzed();
    let round = generate_round(Phase::Follow, 2, &analysis.follow);

    assert!(round.starts_with("------------------Follow Round 2------------------\n\n"));
    assert!(round.ends_with("[Follow] S ====> {#}\n"));
  }

  #[test]
  fn json_report() {
    let (_, analysis) = analyzed();
    let value: serde_json::Value = serde_json::from_str(&generate_json(&analysis).unwrap()).unwrap();

    assert_eq!(value["follow"][0]["key"], "A");
    assert_eq!(value["follow"][0]["set"][0], "#");
    assert_eq!(value["ps"][2]["production"], "A -> \u{03B5}");
    assert_eq!(value["first"].as_array().unwrap().len(), 5);
  }
}
