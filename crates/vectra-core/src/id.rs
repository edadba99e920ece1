//! Element identity.
//!
//! Hosts name elements with arbitrary strings. Every name is interned once
//! and carried around as a 4-byte key, which is what sessions, selections
//! and snap guides hold on to across arena rebuilds.

use lasso::{Spur, ThreadedRodeo};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Suffix counter for generated names, shared by every kind.
static GENERATED: AtomicU64 = AtomicU64::new(0);

/// Stable handle for a canvas element. Equal names give equal handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    pub fn intern(name: &str) -> Self {
        ElementId(NAMES.get_or_intern(name))
    }

    /// The host-facing name. Names are never evicted, hence `'static`.
    pub fn as_str(&self) -> &'static str {
        NAMES.resolve(&self.0)
    }

    /// A fresh name of the form `<kind>_<n>` for elements created without one.
    pub fn fresh(kind: &str) -> Self {
        let n = GENERATED.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{kind}_{n}"))
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct NameVisitor;

impl Visitor<'_> for NameVisitor {
    type Value = ElementId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an element id string")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<ElementId, E> {
        Ok(ElementId::intern(name))
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(NameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_name_same_handle() {
        let a = ElementId::intern("hero_title");
        assert_eq!(a, ElementId::intern("hero_title"));
        assert_ne!(a, ElementId::intern("hero_subtitle"));
        assert_eq!(a.as_str(), "hero_title");
    }

    #[test]
    fn fresh_names_carry_kind_and_never_repeat() {
        let a = ElementId::fresh("circle");
        let b = ElementId::fresh("circle");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("circle_"));
    }

    #[test]
    fn debug_marks_handle_display_does_not() {
        let id = ElementId::intern("logo");
        assert_eq!(id.to_string(), "logo");
        assert_eq!(format!("{id:?}"), "#logo");
    }

    #[test]
    fn json_uses_the_bare_name() {
        let ids: Vec<ElementId> = serde_json::from_str(r#"["nav", "footer"]"#).unwrap();
        assert_eq!(ids, vec![ElementId::intern("nav"), ElementId::intern("footer")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["nav","footer"]"#);
        assert!(serde_json::from_str::<ElementId>("7").is_err());
    }
}
