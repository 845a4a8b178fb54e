//! Scope Resolver: lighting and reachability/visibility computed from a
//! world snapshot.

use crate::attribute::{well_known as attr, Parent};
use crate::id::ItemId;
use crate::world::World;
use std::collections::HashSet;

/// True iff `location` is lit: inherently lit, or some on light source is
/// in it, carried by the player while the player is there, or nested in a
/// surface/open-or-transparent container recursively contained in such.
#[must_use]
pub fn is_location_lit(world: &World, location: crate::id::LocationId) -> bool {
    let Some(loc) = world.location(location) else {
        return false;
    };
    if loc.inherently_lit() {
        return true;
    }
    let player_here = world.player().current_location == location;
    world.all_items().any(|item| {
        if !(item.flag(attr::is_light_source()) && item.flag(attr::is_on())) {
            return false;
        }
        match &item.parent {
            Parent::Location(id) => *id == location,
            Parent::Player => player_here,
            Parent::Item(_) => player_here && is_nested_reachably(world, item.id),
            Parent::Nowhere => false,
        }
    })
}

/// Whether `item` is nested, through a chain of surfaces/open-or-transparent
/// containers, inside something the player is carrying or that's in the
/// player's location. Used both for light propagation and for reachability.
fn is_nested_reachably(world: &World, item: ItemId) -> bool {
    let Some(item) = world.item(item) else { return false };
    match &item.parent {
        Parent::Player => true,
        Parent::Location(id) => *id == world.player().current_location,
        Parent::Item(parent_id) => world
            .item(*parent_id)
            .is_some_and(|parent_item| parent_item.lets_contents_through())
            && is_nested_reachably(world, *parent_id),
        Parent::Nowhere => false,
    }
}

/// The set of items the player can currently touch.
#[must_use]
pub fn items_reachable_by_player(world: &World) -> HashSet<ItemId> {
    let mut reachable = HashSet::new();
    let location = world.player().current_location;
    let dark = !is_location_lit(world, location);

    collect_from(world, &Parent::Player, &mut reachable, true);

    if !dark {
        collect_from(world, &Parent::Location(location), &mut reachable, true);
        for &global in &world.location(location).map(|loc| loc.local_globals.clone()).unwrap_or_default() {
            reachable.insert(global);
        }
    }
    reachable
}

/// Same traversal as `items_reachable_by_player`, but also peeks through
/// transparent closed containers. Empty (except carried items) when the
/// player's location is dark.
#[must_use]
pub fn items_visible_to_player(world: &World) -> HashSet<ItemId> {
    let mut visible = HashSet::new();
    let location = world.player().current_location;
    let dark = !is_location_lit(world, location);

    collect_from(world, &Parent::Player, &mut visible, false);

    if !dark {
        collect_from(world, &Parent::Location(location), &mut visible, false);
        for &global in &world.location(location).map(|loc| loc.local_globals.clone()).unwrap_or_default() {
            visible.insert(global);
        }
    }
    visible
}

/// Breadth-first traversal from everything directly parented to `root`,
/// descending into containers/surfaces. `reachable_only` selects whether a
/// closed transparent container still exposes its contents (false = allow,
/// matching the "visible" traversal) or not (true = "reachable" traversal).
fn collect_from(world: &World, root: &Parent, out: &mut HashSet<ItemId>, reachable_only: bool) {
    let mut frontier: Vec<ItemId> = world.items_in(root).into_iter().map(|item| item.id).collect();
    while let Some(id) = frontier.pop() {
        if !out.insert(id) {
            continue;
        }
        let Some(item) = world.item(id) else { continue };
        let lets_through = if reachable_only {
            item.lets_contents_through()
        } else {
            item.lets_contents_be_seen()
        };
        if lets_through {
            for child in world.items_in(&Parent::Item(id)) {
                frontier.push(child.id);
            }
        }
    }
}
