//! Identifier interning.
//!
//! Identifiers repeat heavily in real sources; the scanner interns each one
//! so the parser can store a 4-byte [`Atom`] per name and compare names
//! without touching string data.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Handle to an interned string. `Atom::NONE` marks "no atom".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Atom(pub u32);

impl Atom {
    pub const NONE: Atom = Atom(u32::MAX);

    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Clone, Debug, Default)]
pub struct Interner {
    strings: Vec<Arc<str>>,
    lookup: FxHashMap<Arc<str>, u32>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner::default()
    }

    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&id) = self.lookup.get(text) {
            return Atom(id);
        }
        let id = u32::try_from(self.strings.len()).expect("interner overflow");
        let shared: Arc<str> = Arc::from(text);
        self.strings.push(Arc::clone(&shared));
        self.lookup.insert(shared, id);
        Atom(id)
    }

    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    pub fn try_resolve(&self, atom: Atom) -> Option<&str> {
        if atom.is_none() {
            None
        } else {
            self.strings.get(atom.0 as usize).map(|s| &**s)
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_deduplicates_and_round_trips() {
        let mut interner = Interner::new();
        let a = interner.intern("value");
        let b = interner.intern("other");
        let c = interner.intern("value");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.resolve(a), "value");
        assert_eq!(interner.resolve(b), "other");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn none_atom_resolves_to_nothing() {
        let interner = Interner::new();
        assert_eq!(interner.try_resolve(Atom::NONE), None);
    }
}
