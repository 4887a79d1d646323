//! Action symbols: the discrete input events fed to the engine.

mod interner;

use std::fmt;

pub use interner::{IStr, intern, resolve};

/// One discrete, named input event (e.g., `Punch`, `Down`).
///
/// Symbols are interned, so copying and comparing them is as cheap as an
/// integer. Two symbols are equal exactly when their names are equal; there
/// is no ordering between them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionSymbol(IStr);

impl ActionSymbol {
    pub fn new(name: &str) -> Self {
        Self(intern(name))
    }

    pub fn as_str(&self) -> &'static str {
        resolve(self.0)
    }
}

impl From<&str> for ActionSymbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for ActionSymbol {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for ActionSymbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ActionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionSymbol({:?})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_symbol() {
        assert_eq!(ActionSymbol::new("Punch"), ActionSymbol::from("Punch"));
        assert_ne!(ActionSymbol::new("Punch"), ActionSymbol::new("Kick"));
    }

    #[test]
    fn test_symbols_are_case_sensitive() {
        assert_ne!(ActionSymbol::new("up"), ActionSymbol::new("Up"));
    }

    #[test]
    fn test_resolves_to_name() {
        let sym = ActionSymbol::new("Down");
        assert_eq!(sym.as_str(), "Down");
        assert_eq!(sym.to_string(), "Down");
        assert_eq!(format!("{:?}", sym), "ActionSymbol(\"Down\")");
    }
}
