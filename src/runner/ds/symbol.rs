use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A symbol value. Two symbols are the same symbol when their keys match; the
/// description is only for display.
pub struct SymbolData {
    description: String,
    key: String,
}

impl SymbolData {
    fn well_known(description: &str) -> Self {
        SymbolData {
            description: description.to_string(),
            key: description.to_string(),
        }
    }

    pub fn new(description: String) -> Self {
        SymbolData {
            description,
            key: Uuid::new_v4().to_hyphenated().to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
impl Clone for SymbolData {
    fn clone(&self) -> Self {
        SymbolData {
            description: self.description.to_string(),
            key: self.key.to_string(),
        }
    }
}
impl PartialEq for SymbolData {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for SymbolData {}
impl Hash for SymbolData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}
impl fmt::Debug for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/* Well known symbols */
lazy_static! {
    pub static ref SYMBOL_HAS_INSTANCE: SymbolData = SymbolData::well_known("Symbol.hasInstance");
    pub static ref SYMBOL_IS_CONCAT_SPREADABLE: SymbolData =
        SymbolData::well_known("Symbol.isConcatSpreadable");
    pub static ref SYMBOL_ITERATOR: SymbolData = SymbolData::well_known("Symbol.iterator");
    pub static ref SYMBOL_MATCH: SymbolData = SymbolData::well_known("Symbol.match");
    pub static ref SYMBOL_REPLACE: SymbolData = SymbolData::well_known("Symbol.replace");
    pub static ref SYMBOL_SEARCH: SymbolData = SymbolData::well_known("Symbol.search");
    pub static ref SYMBOL_SPECIES: SymbolData = SymbolData::well_known("Symbol.species");
    pub static ref SYMBOL_SPLIT: SymbolData = SymbolData::well_known("Symbol.split");
    pub static ref SYMBOL_TO_PRIMITIVE: SymbolData = SymbolData::well_known("Symbol.toPrimitive");
    pub static ref SYMBOL_TO_STRING_TAG: SymbolData = SymbolData::well_known("Symbol.toStringTag");
    pub static ref SYMBOL_UNSCOPABLES: SymbolData = SymbolData::well_known("Symbol.unscopables");
}

/// Looks up a well-known symbol by its short name (`"toPrimitive"`) or its full
/// description (`"Symbol.toPrimitive"`).
pub fn well_known_symbol(name: &str) -> Option<SymbolData> {
    let short = name.strip_prefix("Symbol.").unwrap_or(name);
    let symbol: &SymbolData = match short {
        "hasInstance" => &SYMBOL_HAS_INSTANCE,
        "isConcatSpreadable" => &SYMBOL_IS_CONCAT_SPREADABLE,
        "iterator" => &SYMBOL_ITERATOR,
        "match" => &SYMBOL_MATCH,
        "replace" => &SYMBOL_REPLACE,
        "search" => &SYMBOL_SEARCH,
        "species" => &SYMBOL_SPECIES,
        "split" => &SYMBOL_SPLIT,
        "toPrimitive" => &SYMBOL_TO_PRIMITIVE,
        "toStringTag" => &SYMBOL_TO_STRING_TAG,
        "unscopables" => &SYMBOL_UNSCOPABLES,
        _ => return None,
    };
    Some(symbol.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_lookup_accepts_short_and_full_names() {
        assert_eq!(well_known_symbol("toPrimitive"), Some(SYMBOL_TO_PRIMITIVE.clone()));
        assert_eq!(
            well_known_symbol("Symbol.iterator"),
            Some(SYMBOL_ITERATOR.clone())
        );
        assert_eq!(well_known_symbol("toJSON"), None);
    }

    #[test]
    fn test_symbols_with_same_description_are_distinct() {
        let a = SymbolData::new("tag".to_string());
        let b = SymbolData::new("tag".to_string());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
