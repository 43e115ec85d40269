// Named symbol classes for regular expressions.
//
// A definition maps a class name to a regex fragment, and fragments may
// mention other class names. Construction rewrites every right-hand side
// until no known name remains, so expansion afterwards is a single pass
// over the table.

use std::collections::BTreeMap;

/// Named symbol classes with fully resolved right-hand sides.
///
/// Substitution is textual. The table must be acyclic and no name may be
/// a substring of another name, otherwise resolution loops forever or
/// rewrites the wrong spans. Both are the caller's contract and neither
/// is detected here. Grammar writers keep class names distinctive
/// (`Vowel`, `CoronalC`) for exactly this reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions {
    defs: BTreeMap<String, String>,
}

impl Definitions {
    /// Build a registry and resolve all cross-references.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut registry = Definitions {
            defs: entries
                .into_iter()
                .map(|(name, fragment)| (name.into(), fragment.into()))
                .collect(),
        };
        registry.resolve();
        registry
    }

    /// Rewrite right-hand sides until none contains a known name.
    ///
    /// A chain like `Seg -> C -> Stop` needs one pass per link, hence the
    /// outer fixed-point loop.
    fn resolve(&mut self) {
        let names: Vec<String> = self.defs.keys().cloned().collect();
        let mut substituted = true;
        while substituted {
            substituted = false;
            for name in &names {
                for other in &names {
                    if name == other {
                        continue;
                    }
                    let expansion = self.defs[other].clone();
                    let current = &self.defs[name];
                    if current.contains(other.as_str()) {
                        let resolved = current.replace(other.as_str(), &expansion);
                        self.defs.insert(name.clone(), resolved);
                        substituted = true;
                    }
                }
            }
        }
    }

    /// Replace every known class name in `text` with its expansion.
    pub fn expand(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (name, expansion) in &self.defs {
            result = result.replace(name.as_str(), expansion);
        }
        result
    }

    /// Resolved right-hand side for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defs.get(name).map(String::as_str)
    }

    /// Defined class names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
