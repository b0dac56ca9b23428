//! Ordered `key=value` preferences with dot-separated namespaces.
//!
//! A [`PreferencesMap`] is loaded from a flat text format:
//!
//! ```text
//! # comment
//! upload.tool = avrdude
//! upload.tool.windows = avrdude.exe
//! ```
//!
//! Keys ending in the running platform's suffix (`.linux`, `.windows`,
//! `.macos`) are copied onto their base key once loading finishes. Nested
//! groups are navigated with [`PreferencesMap::top_level_map`],
//! [`PreferencesMap::first_level_map`] and [`PreferencesMap::sub_tree`].

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{PrefsError, Result};
use crate::lines::read_lines;
use crate::platform::Platform;

/// An insertion-ordered map of preference keys to raw string values.
///
/// Re-inserting an existing key replaces its value but keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferencesMap(IndexMap<String, String>);

impl PreferencesMap {
    pub fn new() -> Self {
        PreferencesMap(IndexMap::new())
    }

    /// Loads a new map from `input`, resolving overrides for `platform`.
    pub fn from_reader<R: Read>(input: R, platform: Platform) -> Result<Self> {
        let mut map = Self::new();
        map.load(input, platform)?;
        Ok(map)
    }

    /// Loads a new map from the file at `path`, resolving overrides for `platform`.
    pub fn from_path<P: AsRef<Path>>(path: P, platform: Platform) -> Result<Self> {
        let mut map = Self::new();
        map.load_path(path, platform)?;
        Ok(map)
    }

    /// Opens `path` and loads its entries into this map.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P, platform: Platform) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PrefsError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading preferences from {}", path.display());
        self.load(file, platform)
    }

    /// Parses `key=value` lines from `input` into this map, then applies the
    /// overrides for `platform`.
    ///
    /// Empty lines, lines starting with `#` and lines without `=` are skipped.
    /// Key and value are trimmed. Later duplicates overwrite earlier ones.
    pub fn load<R: Read>(&mut self, input: R, platform: Platform) -> Result<()> {
        let lines = read_lines(input)?;
        let before = self.0.len();
        let mut skipped = 0usize;

        for line in &lines {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    self.0.insert(trim_control(key).to_string(), trim_control(value).to_string());
                }
                None => {
                    trace!("Skipping line without '=': {}", line);
                    skipped += 1;
                }
            }
        }

        debug!(
            "Read {} lines, {} new keys, {} skipped",
            lines.len(),
            self.0.len() - before,
            skipped
        );

        self.apply_platform_overrides(platform);
        Ok(())
    }

    /// Copies every `<base><suffix>` value onto `<base>` for the given platform.
    ///
    /// The suffixed keys stay in the map. Keys for other platforms are left
    /// untouched, and [`Platform::Other`] resolves nothing. Returns the number
    /// of overrides applied.
    pub fn apply_platform_overrides(&mut self, platform: Platform) -> usize {
        let Some(suffix) = platform.suffix() else {
            return 0;
        };

        // Snapshot so inserts below don't disturb the walk.
        let keys: Vec<String> = self.0.keys().cloned().collect();
        let mut applied = 0;
        for key in keys.iter().filter(|k| k.ends_with(suffix)) {
            // A matching suffix always contains a dot.
            let Some(dot) = key.rfind('.') else { continue };
            let Some(value) = self.0.get(key).cloned() else { continue };
            let base = &key[..dot];
            debug!("Override {} = {} (from {})", base, value, key);
            self.0.insert(base.to_string(), value);
            applied += 1;
        }
        applied
    }

    /// Entries whose key has no `.`, in order.
    pub fn top_level_map(&self) -> PreferencesMap {
        self.0
            .iter()
            .filter(|(key, _)| !key.contains('.'))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Groups dotted keys by their first segment.
    ///
    /// `alpha.some.keys = v1` lands in group `alpha` as `some.keys = v1`.
    /// Groups appear in order of first use; keys without a dot are dropped.
    pub fn first_level_map(&self) -> IndexMap<String, PreferencesMap> {
        let mut res: IndexMap<String, PreferencesMap> = IndexMap::new();
        for (key, value) in &self.0 {
            let Some((parent, child)) = key.split_once('.') else {
                continue;
            };
            res.entry(parent.to_string())
                .or_default()
                .insert(child, value.clone());
        }
        res
    }

    /// Entries under `parent.`, with that prefix removed.
    pub fn sub_tree(&self, parent: &str) -> PreferencesMap {
        let prefix = format!("{}.", parent);
        self.0
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix.as_str())
                    .map(|child| (child.to_string(), value.clone()))
            })
            .collect()
    }

    /// Debug rendering: an opening brace line, then `key = value` lines in
    /// sorted key order, every line prefixed with `indent`.
    ///
    /// No closing brace is written; existing consumers of this output expect
    /// that. See [`PreferencesMap::render_block`] for the balanced form.
    pub fn render(&self, indent: &str) -> String {
        let mut res = format!("{}{{\n", indent);
        for (key, value) in self.sorted_entries() {
            res.push_str(&format!("{}{} = {}\n", indent, key, value));
        }
        res
    }

    /// Same as [`PreferencesMap::render`] followed by a closing brace line.
    pub fn render_block(&self, indent: &str) -> String {
        let mut res = self.render(indent);
        res.push_str(&format!("{}}}\n", indent));
        res
    }

    fn sorted_entries(&self) -> Vec<(&String, &String)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, String> {
        self.0.values()
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

/// Strips characters up to and including U+0020 from both ends. Unicode
/// spaces such as NBSP are kept.
fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

impl From<IndexMap<String, String>> for PreferencesMap {
    fn from(map: IndexMap<String, String>) -> Self {
        PreferencesMap(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PreferencesMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PreferencesMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for PreferencesMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for PreferencesMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PreferencesMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PreferencesMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(""))
    }
}
