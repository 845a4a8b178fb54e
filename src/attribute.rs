//! Dynamic attribute values and the item/location parent relation.

use crate::id::{AttributeId, ItemId, LocationId};
use std::collections::HashSet;

/// Where an item currently lives. Forms a forest rooted at `Player`,
/// `Location(_)`, and `Nowhere`; every item has exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Parent {
    Player,
    Location(LocationId),
    Item(ItemId),
    Nowhere,
}

impl Parent {
    #[must_use]
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Item(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn location_id(&self) -> Option<LocationId> {
        match self {
            Self::Location(id) => Some(*id),
            _ => None,
        }
    }
}

/// A tagged attribute value. Common flag attributes (`isTakable`,
/// `isContainer`, `isOpen`, ...) are `Bool`; numeric ones (`size`,
/// `capacity`) are `Int`; `lockKey` is an `ItemIdSet` of at most one element
/// so "no key required" and "empty key set" share representation with other
/// id-set attributes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    String(String),
    StringSet(HashSet<String>),
    ItemIdSet(HashSet<ItemId>),
    Parent(Parent),
}

impl AttributeValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_item_id_set(&self) -> Option<&HashSet<ItemId>> {
        match self {
            Self::ItemIdSet(set) => Some(set),
            _ => None,
        }
    }
}

/// Well-known attribute names, collected in one place so callers don't
/// repeat string literals. The attribute map itself is still open: a game
/// may define and read attributes this list doesn't know about.
pub mod well_known {
    macro_rules! attr_const {
        ($name:ident, $text:literal) => {
            pub fn $name() -> crate::id::AttributeId {
                crate::id::AttributeId::new($text)
            }
        };
    }

    attr_const!(is_takable, "isTakable");
    attr_const!(is_container, "isContainer");
    attr_const!(is_surface, "isSurface");
    attr_const!(is_openable, "isOpenable");
    attr_const!(is_open, "isOpen");
    attr_const!(is_lockable, "isLockable");
    attr_const!(is_locked, "isLocked");
    attr_const!(is_readable, "isReadable");
    attr_const!(is_light_source, "isLightSource");
    attr_const!(is_on, "isOn");
    attr_const!(is_transparent, "isTransparent");
    attr_const!(is_touched, "isTouched");
    attr_const!(is_wearable, "isWearable");
    attr_const!(is_worn, "isWorn");
    attr_const!(is_fixed, "isFixed");
    attr_const!(is_scenery, "isScenery");
    attr_const!(is_edible, "isEdible");
    attr_const!(is_device, "isDevice");
    attr_const!(is_inherently_lit, "isInherentlyLit");
    attr_const!(size, "size");
    attr_const!(capacity, "capacity");
    attr_const!(lock_key, "lockKey");
    attr_const!(description, "description");
    attr_const!(read_text, "readText");
    attr_const!(first_description, "firstDescription");
}

#[must_use]
pub fn attr_id(name: &str) -> AttributeId {
    AttributeId::new(name)
}
