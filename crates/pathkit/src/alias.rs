//! Alias tables (`@/` → `/src/`, `~` → `/home/user`).
//!
//! An [`AliasTable`] can only be obtained through [`AliasTable::normalize`],
//! so holding one means the entries are already in canonical form: slash
//! normalized, ordered most specific first, with aliases that point at other
//! aliases flattened. Normalizing an existing table returns it unchanged.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::path::{join, normalize_windows_path};

/// Normalized alias → target table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

/// Raw alias mappings accepted by [`AliasTable::normalize`].
pub trait IntoAliasTable {
    fn into_alias_table(self) -> AliasTable;
}

impl IntoAliasTable for AliasTable {
    fn into_alias_table(self) -> AliasTable {
        self
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoAliasTable for Vec<(K, V)> {
    fn into_alias_table(self) -> AliasTable {
        AliasTable::from_raw(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> IntoAliasTable for [(K, V); N] {
    fn into_alias_table(self) -> AliasTable {
        AliasTable::from_raw(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoAliasTable for IndexMap<K, V> {
    fn into_alias_table(self) -> AliasTable {
        AliasTable::from_raw(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> IntoAliasTable for BTreeMap<K, V> {
    fn into_alias_table(self) -> AliasTable {
        AliasTable::from_raw(self)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, S> IntoAliasTable for HashMap<K, V, S> {
    fn into_alias_table(self) -> AliasTable {
        // HashMap iteration order is unspecified; sort keys first so that
        // ties in segment count break deterministically.
        let mut raw: Vec<(K, V)> = self.into_iter().collect();
        raw.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));
        AliasTable::from_raw(raw)
    }
}

fn is_separator_or_end(next: Option<u8>) -> bool {
    matches!(next, None | Some(b'/') | Some(b'\\'))
}

/// `path` starts with `prefix`, and the match ends on a segment boundary.
///
/// A prefix without a trailing separator still has to end a segment: `@`
/// matches `@` and `@/x` but not `@scope/pkg`.
pub(crate) fn matches_prefix(path: &str, prefix: &str) -> bool {
    if path == prefix {
        return true;
    }
    if !path.starts_with(prefix) {
        return false;
    }
    let trimmed = prefix.strip_suffix('/').unwrap_or(prefix);
    is_separator_or_end(path.as_bytes().get(trimmed.len()).copied())
}

fn segment_rank(key: &str) -> usize {
    key.split('/').count()
}

impl AliasTable {
    /// Normalize a raw mapping. A table that is already normalized is
    /// returned as is.
    pub fn normalize(raw: impl IntoAliasTable) -> Self {
        raw.into_alias_table()
    }

    fn from_raw<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut entries: Vec<(String, String)> = raw
            .into_iter()
            .map(|(k, v)| {
                (
                    normalize_windows_path(k.as_ref()),
                    normalize_windows_path(v.as_ref()),
                )
            })
            .collect();

        // Later duplicates replace earlier ones, keeping the first position.
        let mut deduped: IndexMap<String, String> = IndexMap::with_capacity(entries.len());
        for (k, v) in entries.drain(..) {
            deduped.insert(k, v);
        }
        let mut entries: Vec<(String, String)> = deduped.into_iter().collect();

        entries.sort_by_key(|(key, _)| std::cmp::Reverse(segment_rank(key)));

        for i in 0..entries.len() {
            for j in 0..entries.len() {
                if i == j {
                    continue;
                }
                let (key, alias) = (&entries[i].0, &entries[j].0);
                if key == alias || key.starts_with(alias.as_str()) {
                    continue;
                }
                let target = &entries[i].1;
                if target.starts_with(alias.as_str())
                    && is_separator_or_end(target.as_bytes().get(alias.len()).copied())
                {
                    let flattened = format!("{}{}", entries[j].1, &target[alias.len()..]);
                    entries[i].1 = flattened;
                }
            }
        }

        Self { entries }
    }

    /// Resolve `path` through the first matching alias.
    ///
    /// Returns the slash-normalized input unchanged when nothing matches.
    pub fn resolve(&self, path: &str) -> String {
        let path = normalize_windows_path(path);
        for (alias, target) in &self.entries {
            if matches_prefix(&path, alias) {
                let rest = path.get(alias.len()..).unwrap_or_default();
                return join([target.as_str(), rest]);
            }
        }
        path
    }

    /// Every alias form of `path`, longest result first.
    pub fn reverse_resolve(&self, path: &str) -> Vec<String> {
        let path = normalize_windows_path(path);
        let mut matches: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, target)| matches_prefix(&path, target))
            .map(|(alias, target)| {
                let rest = path.get(target.len()..).unwrap_or_default();
                join([alias.as_str(), rest])
            })
            .collect();
        matches.sort_by_key(|m| std::cmp::Reverse(m.len()));
        matches
    }

    /// Target configured for exactly `alias`.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == alias)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Free-function form of [`AliasTable::normalize`].
pub fn normalize_aliases(raw: impl IntoAliasTable) -> AliasTable {
    AliasTable::normalize(raw)
}

/// Resolve `path` through `aliases`, normalizing the table first.
pub fn resolve_alias(path: &str, aliases: impl IntoAliasTable) -> String {
    AliasTable::normalize(aliases).resolve(path)
}

/// Reverse-resolve `path` through `aliases`, normalizing the table first.
pub fn reverse_resolve_alias(path: &str, aliases: impl IntoAliasTable) -> Vec<String> {
    AliasTable::normalize(aliases).reverse_resolve(path)
}
