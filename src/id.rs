//! Interned identifiers.
//!
//! All id domains (`ItemId`, `LocationId`, `VerbId`, `GlobalId`, `FuseId`,
//! `DaemonId`, `AttributeId`, `Pronoun`) share one string pool so that two
//! domains can reuse the same surface text without colliding: the pool key
//! is `(domain, text)`, not just `text`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Domain {
    Item,
    Location,
    Verb,
    Global,
    Fuse,
    Daemon,
    Attribute,
    Pronoun,
}

struct Pool {
    ids: HashMap<(Domain, String), u32>,
    strings: Vec<Arc<str>>,
}

impl Pool {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, domain: Domain, text: &str) -> u32 {
        if let Some(&idx) = self.ids.get(&(domain, text.to_string())) {
            return idx;
        }
        let idx = u32::try_from(self.strings.len()).expect("interner overflowed u32");
        self.strings.push(Arc::from(text));
        self.ids.insert((domain, text.to_string()), idx);
        idx
    }

    fn text(&self, idx: u32) -> Arc<str> {
        self.strings[idx as usize].clone()
    }
}

static POOL: LazyLock<Mutex<Pool>> = LazyLock::new(|| Mutex::new(Pool::new()));

macro_rules! interned_id {
    ($name:ident, $domain:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        // Interned indices are only stable within one process: a save file
        // must carry the id's text, not its pool slot, so that loading it
        // back (possibly after the pool was populated in a different order)
        // resolves to the same logical identifier.
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let text = String::deserialize(deserializer)?;
                Ok(Self::new(&text))
            }
        }

        impl $name {
            #[must_use]
            pub fn new(text: &str) -> Self {
                let mut pool = POOL.lock().expect("id pool poisoned");
                Self(pool.intern($domain, text))
            }

            #[must_use]
            pub fn as_str(&self) -> Arc<str> {
                POOL.lock().expect("id pool poisoned").text(self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(text: &str) -> Self {
                Self::new(text)
            }
        }

        impl From<String> for $name {
            fn from(text: String) -> Self {
                Self::new(&text)
            }
        }
    };
}

interned_id!(ItemId, Domain::Item);
interned_id!(LocationId, Domain::Location);
interned_id!(VerbId, Domain::Verb);
interned_id!(GlobalId, Domain::Global);
interned_id!(FuseId, Domain::Fuse);
interned_id!(DaemonId, Domain::Daemon);
interned_id!(AttributeId, Domain::Attribute);

/// A word like "it"/"them"/"him"/"her" whose target set the engine tracks
/// across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Pronoun {
    It,
    Them,
    Him,
    Her,
}

impl fmt::Display for Pronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::It => "it",
            Self::Them => "them",
            Self::Him => "him",
            Self::Her => "her",
        };
        write!(f, "{word}")
    }
}
