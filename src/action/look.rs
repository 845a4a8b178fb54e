use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue, Parent};
use crate::change::StateChange;
use crate::id::Pronoun;
use crate::scope::{is_location_lit, items_reachable_by_player, items_visible_to_player};
use std::collections::HashSet;

pub struct Look;

impl ActionHandler for Look {
    fn validate(&self, _ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let location_id = ctx.world.player().current_location;
        let Some(location) = ctx.world.location(location_id) else {
            return Err(ActionResponse::Custom("You are nowhere.".to_string()));
        };
        if !is_location_lit(ctx.world, location_id) {
            return Ok(ActionResult::new(format!("{}\nIt is pitch black. You are likely to be eaten by a grue.", location.name)));
        }

        let visible = items_visible_to_player(ctx.world);
        let here: Vec<&str> = ctx
            .world
            .items_in(&Parent::Location(location_id))
            .into_iter()
            .filter(|item| visible.contains(&item.id) && !item.flag(attr::is_scenery()))
            .map(|item| item.name.as_str())
            .collect();

        let mut paragraphs = vec![location.name.clone(), location.description.clone()];
        if !here.is_empty() {
            paragraphs.push(format!("You can see {} here.", here.join(", ")));
        }
        Ok(ActionResult::new(paragraphs.join("\n")))
    }
}

pub struct Examine;

impl ActionHandler for Examine {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Examine what?".to_string()));
        };
        ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_visible_to_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let mut lines = vec![item.description().to_string()];

        if item.lets_contents_be_seen() {
            let contents: Vec<&str> = ctx
                .world
                .items_in(&Parent::Item(id))
                .into_iter()
                .map(|inner| inner.name.as_str())
                .collect();
            if !contents.is_empty() {
                let verb = if item.is_surface() { "On" } else { "In" };
                lines.push(format!("{verb} the {} you see {}.", item.name, contents.join(", ")));
            }
        }

        let mut changes = vec![StateChange::SetPronoun { pronoun: Pronoun::It, targets: HashSet::from([id]) }];
        if !item.flag(attr::is_touched()) {
            changes.push(StateChange::SetItemAttribute {
                id,
                attribute: attr::is_touched(),
                new_value: AttributeValue::Bool(true),
                old_value: None,
            });
        }
        Ok(ActionResult::new(lines.join("\n")).with_changes(changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::id::{ItemId, LocationId};
    use crate::item::Item;
    use crate::location::Location;
    use crate::parser::Command;
    use crate::player::Player;
    use crate::world::World;

    fn bare(verb: &str) -> Command {
        Command {
            verb: crate::id::VerbId::new(verb),
            direct_object: None,
            direct_modifiers: Vec::new(),
            preposition: None,
            indirect_object: None,
            indirect_modifiers: Vec::new(),
            direction: None,
            raw_input: verb.to_string(),
        }
    }

    #[test]
    fn look_in_dark_room_warns_of_grue() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Cellar", "desc").with_inherently_lit(false));
        let command = bare("look");
        let ctx = ActionContext { command: &command, world: &world, config: &EngineConfig::default() };
        let result = super::super::run(&Look, &ctx).unwrap();
        assert!(result.message.contains("grue"));
    }

    #[test]
    fn look_lists_visible_items() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start Room", "A plain room.").with_inherently_lit(true));
        world.insert_item(Item::new(ItemId::new("coin"), "gold coin", Parent::Location(start)));
        let command = bare("look");
        let ctx = ActionContext { command: &command, world: &world, config: &EngineConfig::default() };
        let result = super::super::run(&Look, &ctx).unwrap();
        assert!(result.message.contains("gold coin"));
    }

    #[test]
    fn examine_marks_touched_and_sets_pronoun() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        let coin = ItemId::new("coin");
        world.insert_item(Item::new(coin, "gold coin", Parent::Location(start)));
        let mut command = bare("examine");
        command.direct_object = Some(coin);
        let ctx = ActionContext { command: &command, world: &world, config: &EngineConfig::default() };
        let result = super::super::run(&Examine, &ctx).unwrap();
        assert_eq!(result.changes.len(), 2);
    }
}
