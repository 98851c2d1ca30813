//! Scoped symbol tables: one for class-level names, one for the
//! currently compiled subroutine.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Arg,
    Var,
    None,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub var_type: String,
    pub kind: Kind,
    pub index: usize,
}

/// One scope's worth of `(name -> {type, kind, index})` bindings, with a
/// dense, monotonically increasing index per kind.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Entry>,
    counters: HashMap<Kind, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Empties the table and resets every kind's counter to zero. Passing
    /// `is_method = true` pre-defines the implicit receiver at `ARG` index
    /// 0 before any parameter is parsed.
    pub fn reset(&mut self, is_method: bool, class_name: &str) {
        self.entries.clear();
        self.counters.clear();
        if is_method {
            self.define("this", class_name, Kind::Arg);
        }
    }

    pub fn define(&mut self, name: &str, var_type: &str, kind: Kind) {
        let index = *self.counters.get(&kind).unwrap_or(&0);
        self.entries.insert(
            name.to_string(),
            Entry {
                var_type: var_type.to_string(),
                kind,
                index,
            },
        );
        self.counters.insert(kind, index + 1);
    }

    pub fn var_count(&self, kind: Kind) -> usize {
        *self.counters.get(&kind).unwrap_or(&0)
    }

    pub fn kind_of(&self, name: &str) -> Kind {
        self.entries.get(name).map_or(Kind::None, |e| e.kind)
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.var_type.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get(name).map(|e| e.index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_dense_per_kind() {
        let mut t = SymbolTable::new();
        t.reset(false, "C");
        t.define("a", "int", Kind::Var);
        t.define("b", "int", Kind::Var);
        t.define("c", "boolean", Kind::Arg);
        assert_eq!(t.index_of("a"), Some(0));
        assert_eq!(t.index_of("b"), Some(1));
        assert_eq!(t.index_of("c"), Some(0));
        assert_eq!(t.var_count(Kind::Var), 2);
        assert_eq!(t.var_count(Kind::Arg), 1);
    }

    #[test]
    fn method_reset_reserves_arg_zero_for_receiver() {
        let mut t = SymbolTable::new();
        t.reset(true, "Point");
        assert_eq!(t.var_count(Kind::Arg), 1);
        t.define("dx", "int", Kind::Arg);
        assert_eq!(t.index_of("dx"), Some(1));
        assert_eq!(t.type_of("this"), Some("Point"));
    }

    #[test]
    fn function_reset_reserves_nothing() {
        let mut t = SymbolTable::new();
        t.reset(false, "Point");
        assert_eq!(t.var_count(Kind::Arg), 0);
    }

    #[test]
    fn redefinition_shadows_within_the_same_table() {
        let mut t = SymbolTable::new();
        t.reset(false, "C");
        t.define("x", "int", Kind::Var);
        t.define("x", "char", Kind::Var);
        assert_eq!(t.type_of("x"), Some("char"));
        assert_eq!(t.var_count(Kind::Var), 2);
    }

    #[test]
    fn unknown_name_has_kind_none() {
        let t = SymbolTable::new();
        assert_eq!(t.kind_of("nope"), Kind::None);
    }
}
