//! Property-style checks on the World Store's commit discipline, run at
//! the crate's public boundary rather than against `World` internals.

mod common;

use grue_engine::attribute::{well_known as attr, Parent};
use grue_engine::id::{ItemId, LocationId};
use grue_engine::item::Item;
use grue_engine::location::Location;
use grue_engine::parser::parse;
use grue_engine::vocabulary::Vocabulary;
use grue_engine::world::World;
use grue_engine::player::Player;

fn start() -> LocationId {
    LocationId::new("startRoom")
}

#[test]
fn a_turn_that_fails_validation_commits_nothing_and_leaves_later_turns_unaffected() {
    let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start())).with_flag(attr::is_takable(), true);
    let boulder = Item::new(ItemId::new("boulder"), "huge boulder", Parent::Location(start()))
        .with_flag(attr::is_takable(), true)
        .with_attribute(attr::size(), grue_engine::attribute::AttributeValue::Int(1000));
    let mut engine = common::engine(
        vec![Location::new(start(), "Start Room", "desc").with_inherently_lit(true)],
        vec![coin, boulder],
        start(),
    );

    let output = engine.execute("take boulder");
    assert_eq!(output, "Your hands are full.");
    assert!(engine.world().change_history().is_empty());
    assert_eq!(engine.world().item(ItemId::new("boulder")).unwrap().parent, Parent::Location(start()));

    // An unrelated, valid turn afterward still works normally.
    let output = engine.execute("take coin");
    assert_eq!(output, "Taken.");
    assert_eq!(engine.world().item(ItemId::new("coin")).unwrap().parent, Parent::Player);
}

#[test]
fn touched_never_reverts_once_set_through_a_full_turn() {
    let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start())).with_flag(attr::is_takable(), true);
    let mut engine = common::engine(vec![Location::new(start(), "Start Room", "desc").with_inherently_lit(true)], vec![coin], start());

    engine.execute("take coin");
    assert!(engine.world().item(ItemId::new("coin")).unwrap().flag(attr::is_touched()));
    engine.execute("drop it");
    // Dropping does not re-touch, but touched must still hold.
    assert!(engine.world().item(ItemId::new("coin")).unwrap().flag(attr::is_touched()));
}

#[test]
fn parser_is_idempotent_on_whitespace_and_noise_words() {
    let start = start();
    let mut world = World::new(Player::new(start));
    world.insert_location(Location::new(start, "Start Room", "desc").with_inherently_lit(true));
    world.insert_item(Item::new(ItemId::new("lamp"), "lamp", Parent::Location(start)).with_flag(attr::is_takable(), true));
    let vocab = Vocabulary::build(&world, &[]);

    let a = parse("  take the lamp  ", &vocab, &world).unwrap();
    let b = parse("take lamp", &vocab, &world).unwrap();
    assert_eq!(a.verb, b.verb);
    assert_eq!(a.direct_object, b.direct_object);
}

#[test]
fn turning_on_a_light_never_shrinks_what_is_visible() {
    let lamp = Item::new(ItemId::new("lamp"), "brass lantern", Parent::Player).with_flag(attr::is_light_source(), true);
    let statue = Item::new(ItemId::new("statue"), "stone statue", Parent::Location(start()));
    let mut engine = common::engine(
        vec![Location::new(start(), "Start Room", "desc").with_inherently_lit(false)],
        vec![lamp, statue],
        start(),
    );

    let before = grue_engine::scope::items_visible_to_player(engine.world()).len();
    engine.execute("light lamp");
    let after = grue_engine::scope::items_visible_to_player(engine.world()).len();
    assert!(after >= before);
}
