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

use std::collections::{BTreeMap, BTreeSet};
use serde::Serialize;

pub(crate) type AttrSet = BTreeSet<String>;

static EMPTY: AttrSet = BTreeSet::new();

/// Rendered key -> current approximation of its set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SetTable {
  sets: BTreeMap<String, AttrSet>,
}

/// One row of a finished table, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SetEntry {
  pub(crate) key: String,
  pub(crate) set: AttrSet,
}

impl SetTable {
  pub(crate) fn new() -> Self {
    SetTable { sets: BTreeMap::new() }
  }

  pub(crate) fn seed<I, S>(&mut self, key: impl Into<String>, items: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.sets.insert(key.into(), items.into_iter().map(Into::into).collect());
  }

  /// Missing keys read as the empty set.
  pub(crate) fn get(&self, key: &str) -> &AttrSet {
    self.sets.get(key).unwrap_or(&EMPTY)
  }

  pub(crate) fn contains(&self, key: &str, attr: &str) -> bool {
    self.get(key).contains(attr)
  }

  /// Stores `candidate` under `key`, returning whether the entry changed.
  pub(crate) fn update(&mut self, key: &str, candidate: AttrSet) -> bool {
    if self.get(key) == &candidate {
      return false;
    }

    self.sets.insert(key.to_string(), candidate);
    true
  }

  pub(crate) fn len(&self) -> usize {
    self.sets.len()
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &AttrSet)> {
    self.sets.iter()
  }

  /// Entries in lexicographic key order.
  pub(crate) fn entries(&self) -> Vec<SetEntry> {
    self.iter().map(|(key, set)| SetEntry { key: key.clone(), set: set.clone() }).collect()
  }

  /// Entries ordered by key length in characters, then lexicographically.
  pub(crate) fn entries_by_length(&self) -> Vec<SetEntry> {
    let mut entries = self.entries();
    entries.sort_by(|a, b| {
      a.key.chars().count().cmp(&b.key.chars().count()).then_with(|| a.key.cmp(&b.key))
    });
    entries
  }
}
