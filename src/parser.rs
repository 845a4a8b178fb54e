//! Tokenises raw input and resolves it into a structured `Command`.

use crate::id::{ItemId, Pronoun, VerbId};
use crate::location::Direction;
use crate::scope::{items_reachable_by_player, items_visible_to_player};
use crate::vocabulary::{Preposition, Vocabulary};
use crate::world::World;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("I beg your pardon?")]
    EmptyInput,
    #[error("I don't know the word \"{0}\".")]
    VerbUnknown(String),
    #[error("I don't know the word \"{0}\".")]
    NounUnknown(String),
    #[error("You can't see any such thing.")]
    ItemNotInScope(String),
    #[error("I don't see a {modifiers} {noun} here.", modifiers = .1.join(" "), noun = .0)]
    ModifierMismatch(String, Vec<String>),
    #[error("{0}")]
    Ambiguity(String),
    #[error("I'm not sure which one you mean.")]
    AmbiguousPronounReference,
    #[error("I don't know what \"{0}\" refers to.")]
    PronounNotSet(Pronoun),
    #[error("That's not something you can see right now.")]
    PronounRefersToOutOfScopeItem(Pronoun),
    #[error("{0}")]
    BadGrammar(String),
    #[error("Something went wrong understanding that.")]
    InternalError,
}

/// A fully resolved command ready for dispatch.
#[derive(Debug, Clone)]
pub struct Command {
    pub verb: VerbId,
    pub direct_object: Option<ItemId>,
    pub direct_modifiers: Vec<String>,
    pub preposition: Option<Preposition>,
    pub indirect_object: Option<ItemId>,
    pub indirect_modifiers: Vec<String>,
    pub direction: Option<Direction>,
    pub raw_input: String,
}

impl Command {
    fn bare(verb: VerbId, raw_input: String) -> Self {
        Self {
            verb,
            direct_object: None,
            direct_modifiers: Vec::new(),
            preposition: None,
            indirect_object: None,
            indirect_modifiers: Vec::new(),
            direction: None,
            raw_input,
        }
    }
}

/// Which object slots a verb's syntax rule expects. Deliberately simple:
/// object *presence* is an action-handler validation concern ("Take what?"
/// is produced by the handler, not the parser) -- the parser only decides
/// how to split the token run into phrases.
enum Slots {
    None,
    DirectOnly,
    DirectThenIndirect(&'static [Preposition]),
}

fn slots_for(verb: &str) -> Slots {
    match verb {
        "look" | "inventory" => Slots::None,
        "insert" => Slots::DirectThenIndirect(&[Preposition::In, Preposition::On, Preposition::Under, Preposition::Behind]),
        "lock" | "unlock" => Slots::DirectThenIndirect(&[Preposition::With]),
        _ => Slots::DirectOnly,
    }
}

fn tokenize(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '\''))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn denoise(tokens: Vec<String>, vocabulary: &Vocabulary) -> Vec<String> {
    tokens.into_iter().filter(|word| !vocabulary.is_noise_word(word)).collect()
}

/// `parse(input, vocabulary, world) → Result<Command, ParseError>`: the
/// full tokenise / de-noise / verb-lookup / phrase-resolution pipeline.
pub fn parse(input: &str, vocabulary: &Vocabulary, world: &World) -> Result<Command, ParseError> {
    let raw_input = input.to_string();
    let tokens = denoise(tokenize(input), vocabulary);

    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if tokens.len() == 1 {
        if let Some(direction) = vocabulary.direction(&tokens[0]) {
            let mut command = Command::bare(VerbId::new("go"), raw_input);
            command.direction = Some(direction);
            return Ok(command);
        }
    } else if vocabulary.direction(&tokens[0]).is_some() {
        return Err(ParseError::BadGrammar(format!("Unexpected words: {}", tokens[1..].join(" "))));
    }

    let verb_word = tokens[0].clone();
    let verb = vocabulary.verb(&verb_word).ok_or(ParseError::VerbUnknown(verb_word))?;
    let rest = &tokens[1..];

    if verb == VerbId::new("go") {
        return parse_go(verb, rest, raw_input, vocabulary);
    }

    let visible = items_visible_to_player(world);
    let reachable = items_reachable_by_player(world);
    let pronouns = world.pronouns();

    let mut command = Command::bare(verb, raw_input);

    match slots_for(&verb.to_string()) {
        Slots::None => {
            if !rest.is_empty() {
                return Err(ParseError::BadGrammar(format!("Unexpected words: {}", rest.join(" "))));
            }
        },
        Slots::DirectOnly => {
            let (object, modifiers) = resolve_phrase(rest, vocabulary, world, &visible, &reachable, pronouns)?;
            command.direct_object = object;
            command.direct_modifiers = modifiers;
        },
        Slots::DirectThenIndirect(preps) => {
            let split = rest.iter().position(|word| {
                vocabulary.preposition(word).is_some_and(|p| preps.contains(&p))
            });
            if let Some(index) = split {
                let (direct_tokens, rest_tokens) = rest.split_at(index);
                let preposition = vocabulary.preposition(&rest_tokens[0]);
                let indirect_tokens = &rest_tokens[1..];
                let (direct, direct_mods) = resolve_phrase(direct_tokens, vocabulary, world, &visible, &reachable, pronouns)?;
                let (indirect, indirect_mods) = resolve_phrase(indirect_tokens, vocabulary, world, &visible, &reachable, pronouns)?;
                command.direct_object = direct;
                command.direct_modifiers = direct_mods;
                command.preposition = preposition;
                command.indirect_object = indirect;
                command.indirect_modifiers = indirect_mods;
            } else {
                let (direct, direct_mods) = resolve_phrase(rest, vocabulary, world, &visible, &reachable, pronouns)?;
                command.direct_object = direct;
                command.direct_modifiers = direct_mods;
            }
        },
    }

    Ok(command)
}

fn parse_go(verb: VerbId, rest: &[String], raw_input: String, vocabulary: &Vocabulary) -> Result<Command, ParseError> {
    let mut command = Command::bare(verb, raw_input);
    match rest {
        [] => Ok(command),
        [single] => {
            let direction = vocabulary.direction(single).ok_or_else(|| ParseError::BadGrammar(format!("I don't know which way \"{single}\" is.")))?;
            command.direction = Some(direction);
            Ok(command)
        },
        _ => Err(ParseError::BadGrammar(format!("Unexpected words: {}", rest[1..].join(" ")))),
    }
}

/// Resolves one phrase (a maximal run of adjective/noun/pronoun tokens)
/// into an item id plus leftover modifier words, per §4.4 step 7-8.
fn resolve_phrase(
    tokens: &[String],
    vocabulary: &Vocabulary,
    world: &World,
    visible: &HashSet<ItemId>,
    reachable: &HashSet<ItemId>,
    pronouns: &crate::global::Pronouns,
) -> Result<(Option<ItemId>, Vec<String>), ParseError> {
    if tokens.is_empty() {
        return Ok((None, Vec::new()));
    }

    if let Some(pronoun) = vocabulary.pronoun(&tokens[0]) {
        if tokens.len() > 1 {
            return Err(ParseError::BadGrammar(format!("\"{}\" can't take modifiers.", tokens[0])));
        }
        let targets = pronouns.get(pronoun).cloned().unwrap_or_default();
        if targets.is_empty() {
            return Err(ParseError::PronounNotSet(pronoun));
        }
        let in_scope: HashSet<ItemId> = targets.intersection(reachable).copied().collect();
        return match in_scope.len() {
            0 => Err(ParseError::PronounRefersToOutOfScopeItem(pronoun)),
            1 => Ok((in_scope.into_iter().next(), Vec::new())),
            _ => Err(ParseError::AmbiguousPronounReference),
        };
    }

    let noun_word = tokens.last().expect("checked non-empty above").clone();
    let modifiers = &tokens[..tokens.len() - 1];
    for modifier in modifiers {
        if vocabulary.adjective(modifier).is_none() && vocabulary.noun(modifier).is_none() {
            return Err(ParseError::BadGrammar(format!("I don't understand \"{modifier}\".")));
        }
    }

    let Some(noun_candidates) = vocabulary.noun(&noun_word) else {
        return Err(ParseError::NounUnknown(noun_word));
    };

    let visible_candidates: HashSet<ItemId> = noun_candidates.intersection(visible).copied().collect();
    if visible_candidates.is_empty() {
        return Err(ParseError::ItemNotInScope(noun_word));
    }

    if modifiers.is_empty() {
        return match visible_candidates.len() {
            1 => Ok((visible_candidates.into_iter().next(), Vec::new())),
            _ => Err(ParseError::Ambiguity(format!("Which {noun_word} do you mean?"))),
        };
    }

    let matching: Vec<ItemId> = visible_candidates
        .iter()
        .copied()
        .filter(|id| {
            world
                .item(*id)
                .is_some_and(|item| modifiers.iter().all(|m| item.adjectives.contains(m)))
        })
        .collect();

    match matching.len() {
        0 => Err(ParseError::ModifierMismatch(noun_word, modifiers.to_vec())),
        1 => Ok((Some(matching[0]), modifiers.to_vec())),
        _ => Err(ParseError::Ambiguity(format!("Which {noun_word} do you mean?"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{well_known as attr, AttributeValue};
    use crate::attribute::Parent;
    use crate::id::LocationId;
    use crate::item::Item;
    use crate::location::Location;
    use crate::player::Player;

    fn world_with_lanterns(modifiers: bool) -> World {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start Room", "desc").with_inherently_lit(true));
        let mut brass = Item::new(ItemId::new("brassLamp"), "brass lantern", Parent::Location(start))
            .with_flag(attr::is_takable(), true);
        let mut rusty = Item::new(ItemId::new("rustyLamp"), "rusty lantern", Parent::Location(start))
            .with_flag(attr::is_takable(), true);
        if modifiers {
            brass = brass.with_adjective("brass");
            rusty = rusty.with_adjective("rusty");
        }
        world.insert_item(brass);
        world.insert_item(rusty);
        world
    }

    #[test]
    fn parses_take_coin() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        world.insert_item(
            Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start)).with_flag(attr::is_takable(), true),
        );
        let vocab = Vocabulary::build(&world, &[]);
        let command = parse("take the coin", &vocab, &world).unwrap();
        assert_eq!(command.direct_object, Some(ItemId::new("coin")));
    }

    #[test]
    fn whitespace_and_noise_are_idempotent() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        world.insert_item(
            Item::new(ItemId::new("lamp"), "lamp", Parent::Location(start)).with_flag(attr::is_takable(), true),
        );
        let vocab = Vocabulary::build(&world, &[]);
        let a = parse("  take the lamp  ", &vocab, &world).unwrap();
        let b = parse("take lamp", &vocab, &world).unwrap();
        assert_eq!(a.direct_object, b.direct_object);
        assert_eq!(a.verb, b.verb);
    }

    #[test]
    fn ambiguous_noun_without_modifiers() {
        let world = world_with_lanterns(false);
        let vocab = Vocabulary::build(&world, &[]);
        let err = parse("take lantern", &vocab, &world).unwrap_err();
        assert_eq!(err, ParseError::Ambiguity("Which lantern do you mean?".to_string()));
    }

    #[test]
    fn modifier_disambiguates() {
        let world = world_with_lanterns(true);
        let vocab = Vocabulary::build(&world, &[]);
        let command = parse("take brass lantern", &vocab, &world).unwrap();
        assert_eq!(command.direct_object, Some(ItemId::new("brassLamp")));
    }

    #[test]
    fn modifier_mismatch_wins_over_ambiguity_when_noun_shared() {
        let mut world = world_with_lanterns(true);
        let start = LocationId::new("startRoom");
        world.insert_item(
            Item::new(ItemId::new("chest"), "wooden chest", Parent::Location(start)).with_adjective("wooden"),
        );
        let vocab = Vocabulary::build(&world, &[]);
        // "wooden" is a known adjective (of the chest), but neither lantern
        // has it: both candidates share the noun "lantern", so this must
        // resolve to ModifierMismatch rather than a generic Ambiguity.
        let err = parse("take wooden lantern", &vocab, &world).unwrap_err();
        assert!(matches!(err, ParseError::ModifierMismatch(noun, _) if noun == "lantern"));
    }

    #[test]
    fn direction_shortcut() {
        let world = world_with_lanterns(false);
        let vocab = Vocabulary::build(&world, &[]);
        let command = parse("north", &vocab, &world).unwrap();
        assert_eq!(command.direction, Some(Direction::North));
    }

    #[test]
    fn unknown_verb() {
        let world = world_with_lanterns(false);
        let vocab = Vocabulary::build(&world, &[]);
        let err = parse("xyzzy the lamp", &vocab, &world).unwrap_err();
        assert!(matches!(err, ParseError::VerbUnknown(word) if word == "xyzzy"));
    }

    #[test]
    fn insert_splits_on_preposition() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        world.insert_item(Item::new(ItemId::new("coin"), "coin", Parent::Player).with_flag(attr::is_takable(), true));
        world.insert_item(
            Item::new(ItemId::new("box"), "box", Parent::Location(start))
                .with_flag(attr::is_container(), true)
                .with_attribute(attr::is_open(), AttributeValue::Bool(true)),
        );
        let vocab = Vocabulary::build(&world, &[]);
        let command = parse("put coin in box", &vocab, &world).unwrap();
        assert_eq!(command.direct_object, Some(ItemId::new("coin")));
        assert_eq!(command.indirect_object, Some(ItemId::new("box")));
        assert_eq!(command.preposition, Some(Preposition::In));
    }
}
