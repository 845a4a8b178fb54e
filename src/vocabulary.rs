//! Vocabulary: maps surface words to canonical identifiers.

use crate::id::{ItemId, Pronoun, VerbId};
use crate::location::Direction;
use crate::world::World;
use std::collections::{HashMap, HashSet};

/// A preposition recognised between a direct and indirect object phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preposition {
    In,
    On,
    Under,
    Behind,
    With,
    To,
    From,
    At,
}

impl Preposition {
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "in" | "into" | "inside" => Self::In,
            "on" | "onto" | "upon" => Self::On,
            "under" | "beneath" | "underneath" => Self::Under,
            "behind" => Self::Behind,
            "with" | "using" => Self::With,
            "to" => Self::To,
            "from" | "out" => Self::From,
            "at" => Self::At,
            _ => return None,
        })
    }
}

const DEFAULT_NOISE_WORDS: &[&str] = &["the", "a", "an", "of", "please", "some"];

const DEFAULT_VERBS: &[(&str, &[&str])] = &[
    ("take", &["get", "grab", "pick"]),
    ("drop", &["discard"]),
    ("insert", &["put", "place"]),
    ("open", &[]),
    ("close", &["shut"]),
    ("lock", &[]),
    ("unlock", &[]),
    ("turn-on", &["light"]),
    ("turn-off", &["extinguish"]),
    ("read", &[]),
    ("look", &["l"]),
    ("examine", &["x", "inspect"]),
    ("inventory", &["i", "inv"]),
    ("wear", &["don"]),
    ("remove", &["doff", "unwear"]),
    ("go", &["walk", "move"]),
];

/// Built once per game from all items and the verb table (default + any
/// author-declared verbs/synonyms); produces the lookups the parser needs.
#[derive(Debug, Default)]
pub struct Vocabulary {
    verbs: HashMap<String, VerbId>,
    nouns: HashMap<String, HashSet<ItemId>>,
    adjectives: HashMap<String, HashSet<ItemId>>,
    noise_words: HashSet<String>,
    pronouns: HashMap<String, Pronoun>,
}

impl Vocabulary {
    #[must_use]
    pub fn build(world: &World, author_verbs: &[(String, Vec<String>)]) -> Self {
        let mut vocab = Self {
            noise_words: DEFAULT_NOISE_WORDS.iter().map(|s| (*s).to_string()).collect(),
            pronouns: [
                ("it".to_string(), Pronoun::It),
                ("them".to_string(), Pronoun::Them),
                ("him".to_string(), Pronoun::Him),
                ("her".to_string(), Pronoun::Her),
            ]
            .into_iter()
            .collect(),
            ..Self::default()
        };

        for (verb, synonyms) in DEFAULT_VERBS {
            vocab.add_verb(verb, synonyms.iter().map(|s| (*s).to_string()).collect());
        }
        for (verb, synonyms) in author_verbs {
            vocab.add_verb(verb, synonyms.clone());
        }

        for item in world.all_items() {
            vocab.add_noun(&item.name, item.id);
            for synonym in &item.synonyms {
                vocab.add_noun(synonym, item.id);
            }
            for adjective in &item.adjectives {
                vocab.adjectives.entry(adjective.to_lowercase()).or_default().insert(item.id);
            }
        }

        vocab
    }

    fn add_verb(&mut self, canonical: &str, synonyms: Vec<String>) {
        let id = VerbId::new(canonical);
        self.verbs.insert(canonical.to_lowercase(), id);
        for synonym in synonyms {
            self.verbs.insert(synonym.to_lowercase(), id);
        }
    }

    fn add_noun(&mut self, word: &str, id: ItemId) {
        // A noun word is whatever last token in a noun's printable name
        // would be recognised as; store every individual word of a
        // multi-word name ("gold coin" registers both "gold" and "coin")
        // since callers match on single tokens.
        for word in word.to_lowercase().split_whitespace() {
            self.nouns.entry(word.to_string()).or_default().insert(id);
        }
    }

    #[must_use]
    pub fn verb(&self, word: &str) -> Option<VerbId> {
        self.verbs.get(word).copied()
    }

    #[must_use]
    pub fn noun(&self, word: &str) -> Option<&HashSet<ItemId>> {
        self.nouns.get(word)
    }

    #[must_use]
    pub fn adjective(&self, word: &str) -> Option<&HashSet<ItemId>> {
        self.adjectives.get(word)
    }

    #[must_use]
    pub fn preposition(&self, word: &str) -> Option<Preposition> {
        Preposition::from_word(word)
    }

    #[must_use]
    pub fn direction(&self, word: &str) -> Option<Direction> {
        Direction::from_word(word)
    }

    #[must_use]
    pub fn is_noise_word(&self, word: &str) -> bool {
        self.noise_words.contains(word)
    }

    #[must_use]
    pub fn pronoun(&self, word: &str) -> Option<Pronoun> {
        self.pronouns.get(word).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Parent;
    use crate::id::LocationId;
    use crate::item::Item;
    use crate::player::Player;

    fn world_with_lamps() -> World {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_item(
            Item::new(ItemId::new("brassLamp"), "brass lantern", Parent::Location(start)).with_adjective("brass"),
        );
        world.insert_item(
            Item::new(ItemId::new("rustyLamp"), "rusty lantern", Parent::Location(start)).with_adjective("rusty"),
        );
        world
    }

    #[test]
    fn verb_synonyms_resolve_to_the_same_canonical_id() {
        let world = world_with_lamps();
        let vocab = Vocabulary::build(&world, &[]);
        assert_eq!(vocab.verb("take"), vocab.verb("get"));
        assert_eq!(vocab.verb("x"), vocab.verb("examine"));
    }

    #[test]
    fn noun_maps_to_all_items_sharing_that_word() {
        let world = world_with_lamps();
        let vocab = Vocabulary::build(&world, &[]);
        let lanterns = vocab.noun("lantern").unwrap();
        assert_eq!(lanterns.len(), 2);
        assert!(lanterns.contains(&ItemId::new("brassLamp")));
    }

    #[test]
    fn adjectives_disambiguate() {
        let world = world_with_lamps();
        let vocab = Vocabulary::build(&world, &[]);
        let brass = vocab.adjective("brass").unwrap();
        assert_eq!(brass.len(), 1);
        assert!(brass.contains(&ItemId::new("brassLamp")));
    }
}
