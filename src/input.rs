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

use serde::{Deserialize, Serialize};
use crate::grammar::{GrammarError, GrammarSpec};

/// JSON grammar file. Each production lists its left-hand side first;
/// a single-element production derives the empty string.
#[derive(Serialize, Deserialize)]
pub(crate) struct GrammarFile {
  #[serde(alias = "symbol_s")]
  pub(crate) start: String,
  #[serde(alias = "production")]
  pub(crate) productions: Vec<Vec<String>>,
}

impl GrammarFile {
  pub(crate) fn into_spec(self) -> Result<GrammarSpec, GrammarError> {
    let mut spec = GrammarSpec::new(self.start);

    for (index, mut production) in self.productions.into_iter().enumerate() {
      if production.is_empty() {
        return Err(GrammarError::EmptyProduction(index));
      }

      let right = production.split_off(1);
      spec.push(production.remove(0), right);
    }

    Ok(spec)
  }
}
