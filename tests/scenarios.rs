//! End-to-end turn scenarios, run through the public `TurnEngine` surface
//! rather than individual handlers.

mod common;

use grue_engine::attribute::{well_known as attr, AttributeValue, Parent};
use grue_engine::id::{ItemId, LocationId};
use grue_engine::item::Item;
use grue_engine::location::Location;

fn start() -> LocationId {
    LocationId::new("startRoom")
}

fn lit_room() -> Location {
    Location::new(start(), "Start Room", "A plain room.").with_inherently_lit(true)
}

#[test]
fn successful_take_reports_taken_and_touches_the_item() {
    let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start())).with_flag(attr::is_takable(), true);
    let mut engine = common::engine(vec![lit_room()], vec![coin], start());

    let output = engine.execute("take coin");
    assert_eq!(output, "Taken.");
    assert_eq!(engine.world().item(ItemId::new("coin")).unwrap().parent, Parent::Player);
    assert!(engine.world().item(ItemId::new("coin")).unwrap().flag(attr::is_touched()));
}

#[test]
fn insert_into_open_container_moves_the_item_and_reports_it() {
    let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Player).with_flag(attr::is_takable(), true);
    let box_ = Item::new(ItemId::new("box"), "open box", Parent::Location(start()))
        .with_flag(attr::is_container(), true)
        .with_attribute(attr::is_open(), AttributeValue::Bool(true));
    let mut engine = common::engine(vec![lit_room()], vec![coin, box_], start());

    let output = engine.execute("put coin in box");
    assert_eq!(output, "You put the gold coin in the open box.");
    assert_eq!(engine.world().item(ItemId::new("coin")).unwrap().parent, Parent::Item(ItemId::new("box")));
}

#[test]
fn insert_into_closed_container_fails_without_committing() {
    let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Player).with_flag(attr::is_takable(), true);
    let box_ = Item::new(ItemId::new("box"), "wooden box", Parent::Location(start())).with_flag(attr::is_container(), true);
    let mut engine = common::engine(vec![lit_room()], vec![coin, box_], start());

    let output = engine.execute("put coin in box");
    assert_eq!(output, "The wooden box is closed.");
    assert_eq!(engine.world().item(ItemId::new("coin")).unwrap().parent, Parent::Player);
    assert!(engine.world().change_history().is_empty());
}

#[test]
fn insert_fails_on_a_containment_cycle() {
    let crate_ = Item::new(ItemId::new("crate"), "crate", Parent::Player)
        .with_flag(attr::is_container(), true)
        .with_attribute(attr::is_open(), AttributeValue::Bool(true));
    let chest = Item::new(ItemId::new("chest"), "chest", Parent::Item(ItemId::new("crate")))
        .with_flag(attr::is_container(), true)
        .with_attribute(attr::is_open(), AttributeValue::Bool(true));
    let mut engine = common::engine(vec![lit_room()], vec![crate_, chest], start());

    let output = engine.execute("put crate in chest");
    assert!(output.contains("is inside the"), "unexpected message: {output}");
    assert_eq!(engine.world().item(ItemId::new("crate")).unwrap().parent, Parent::Player);
}

#[test]
fn extinguishing_the_last_light_source_warns_of_darkness() {
    let lamp = Item::new(ItemId::new("lamp"), "brass lantern", Parent::Player)
        .with_flag(attr::is_light_source(), true)
        .with_flag(attr::is_on(), true);
    let mut engine = common::engine(vec![Location::new(start(), "Start Room", "desc").with_inherently_lit(false)], vec![lamp], start());

    let output = engine.execute("extinguish lamp");
    assert!(output.contains("now off."), "unexpected message: {output}");
    assert!(output.contains("pitch black"), "unexpected message: {output}");
}

#[test]
fn ambiguous_noun_does_not_consume_a_turn() {
    let brass = Item::new(ItemId::new("brassLamp"), "brass lantern", Parent::Location(start())).with_flag(attr::is_takable(), true);
    let rusty = Item::new(ItemId::new("rustyLamp"), "rusty lantern", Parent::Location(start())).with_flag(attr::is_takable(), true);
    let mut engine = common::engine(vec![lit_room()], vec![brass, rusty], start());

    let output = engine.execute("take lantern");
    assert_eq!(output, "Which lantern do you mean?");
    assert_eq!(engine.world().turn_count(), 0);
}

#[test]
fn pronoun_resolves_across_turns() {
    let coin = Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start())).with_flag(attr::is_takable(), true);
    let mut engine = common::engine(vec![lit_room()], vec![coin], start());

    assert_eq!(engine.execute("take coin"), "Taken.");
    let output = engine.execute("drop it");
    assert_eq!(output, "Dropped.");
    assert_eq!(engine.world().item(ItemId::new("coin")).unwrap().parent, Parent::Location(start()));
}
