use crate::grammar::GrammarError;
use crate::parser::ParserError;
use crate::scanner::{Coord, ScanError};

fn print_caret_line(file: &str, at: Coord, width: usize) {
  let line = file.split('\n').nth(at.line_num - 1).unwrap_or("");
  if line.is_empty() {
    eprintln!("(empty)");
    return;
  }

  eprintln!("{}", line);

  let mut marker = " ".repeat(at.col.saturating_sub(1));
  marker.push('^');
  marker.push_str(&"~".repeat(width.saturating_sub(1)));
  eprintln!("{}", marker);
}

pub(crate) fn print_parse_err(file: &str, error: ParserError) {
  match error {
    ParserError::UnexpectedToken(token, expected) => {
      let start = token.span.start;
      let width = token.span.end.col.saturating_sub(start.col);
      print_caret_line(file, start, width);

      let expected: Vec<String> = expected.iter().map(|x| x.to_string()).collect();
      let seen = if token.value.is_empty() { token.kind.to_string() } else { format!("\"{}\"", token.value) };
      eprintln!("Unexpected token {} at line {}, expected {}", seen, start.line_num, expected.join(", "));
      eprintln!();
    }
  }
}

pub(crate) fn print_scan_error(file: &str, error: ScanError) {
  match error {
    ScanError::UnexpectedChar(expected, seen, at) => {
      print_caret_line(file, at, 1);

      let seen = if seen == '\n' { "\\n".to_string() } else { seen.to_string() };
      if expected != '_' {
        eprintln!("Unexpected character \"{}\" at line {}, expected {}", seen, at.line_num, expected);
      } else {
        eprintln!("Unexpected character \"{}\" at line {}", seen, at.line_num);
      }

      eprintln!();
    }
    ScanError::NoMoreChars(at) => {
      eprintln!("Line {} ended unexpectedly!", at.line_num);
      print_caret_line(file, at, 1);
      eprintln!();
    }
  }
}

pub(crate) fn print_grammar_err(path: &str, error: GrammarError) {
  eprintln!("Malformed grammar in {}: {}", path, error);
}
