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

use std::fs;
use std::process::ExitCode;
use clap::Parser;
use crate::error_handler::{print_grammar_err, print_parse_err, print_scan_error};
use crate::grammar::{Grammar, GrammarSpec};
use crate::input::GrammarFile;
use crate::ll_processing::{ll_process, Phase};
use crate::scanner::Scanner;
use crate::set_table::SetTable;

mod scanner;
mod productions;
mod grammar;
mod set_table;
mod input;
mod generator;
mod parser;
mod error_handler;
mod ll_processing;

/// First, Follow and Predict set calculator for LL(1) grammars.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Output file path, stdout when omitted
  #[arg(short, long)]
  output: Option<String>,

  /// Grammar file path (.json or BNF text)
  #[arg()]
  input: String,

  /// Override the grammar's start symbol
  #[arg(short, long)]
  start: Option<String>,

  /// Emit the tables as JSON
  #[arg(long)]
  json: bool,

  /// Print every solver round
  #[arg(long)]
  trace: bool,
}

fn load_grammar(path: &str, file: &str) -> Option<GrammarSpec> {
  if path.ends_with(".json") {
    let grammar_file: GrammarFile = match serde_json::from_str(file) {
      Ok(grammar_file) => grammar_file,
      Err(err) => {
        eprintln!("Failed to read {}: {}", path, err);
        return None;
      }
    };

    return match grammar_file.into_spec() {
      Ok(spec) => Some(spec),
      Err(err) => {
        print_grammar_err(path, err);
        None
      }
    };
  }

  let tokens = match Scanner::new(file).scan() {
    Ok(tokens) => tokens,
    Err(err) => {
      print_scan_error(file, err);
      return None;
    }
  };

  match parser::Parser::new(tokens).parse() {
    Ok(spec) => Some(spec),
    Err(err) => {
      print_parse_err(file, err);
      None
    }
  }
}

fn main() -> ExitCode {
  env_logger::init();
  let cli_args = Args::parse();

  let file = match fs::read_to_string(&cli_args.input) {
    Ok(file) => file,
    Err(err) => {
      eprintln!("Failed to open file {}: {}", cli_args.input, err);
      return ExitCode::FAILURE;
    }
  };

  let Some(mut spec) = load_grammar(&cli_args.input, &file) else {
    return ExitCode::FAILURE;
  };

  if let Some(start) = cli_args.start {
    spec.start = start;
  }

  let grammar = match Grammar::build(&spec) {
    Ok(grammar) => grammar,
    Err(err) => {
      print_grammar_err(&cli_args.input, err);
      return ExitCode::FAILURE;
    }
  };

  let analysis = if cli_args.trace {
    ll_process(&grammar, &mut |phase: Phase, round: usize, table: &SetTable| {
      println!("{}", generator::generate_round(phase, round, table));
    })
  } else {
    ll_process(&grammar, &mut ())
  };

  let output = if cli_args.json {
    match generator::generate_json(&analysis) {
      Ok(json) => json,
      Err(err) => {
        eprintln!("Failed to serialize report: {}", err);
        return ExitCode::FAILURE;
      }
    }
  } else {
    generator::generate_report(&grammar, &analysis)
  };

  match cli_args.output {
    Some(path) => {
      if let Err(err) = fs::write(&path, output) {
        eprintln!("Failed to write to file {}: {}", path, err);
        return ExitCode::FAILURE;
      }
    }
    None => print!("{}", output),
  }

  ExitCode::SUCCESS
}
