use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue};
use crate::change::StateChange;
use crate::location::Exit;

pub struct Go;

impl Go {
    fn exit<'a>(&self, ctx: &ActionContext<'a>) -> Result<&'a Exit, ActionResponse> {
        let Some(direction) = ctx.command.direction else {
            return Err(ActionResponse::Custom("Go where?".to_string()));
        };
        let location = ctx
            .world
            .location(ctx.world.player().current_location)
            .ok_or_else(|| ActionResponse::Custom("You are nowhere.".to_string()))?;
        location
            .exits
            .get(&direction)
            .ok_or_else(|| ActionResponse::Custom(format!("You can't go {direction}.")))
    }
}

impl ActionHandler for Go {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let exit = self.exit(ctx)?;
        if let Some(door_id) = exit.door {
            let door = ctx.world.item(door_id).ok_or(ActionResponse::ItemNotAccessible)?;
            if door.flag(attr::is_locked()) {
                let message = exit.barred_message.clone().unwrap_or_else(|| format!("The {} is locked.", door.name));
                return Err(ActionResponse::Custom(message));
            }
            if !door.is_open() && !ctx.config.door_auto_open {
                let message = exit.barred_message.clone().unwrap_or_else(|| format!("The {} is closed.", door.name));
                return Err(ActionResponse::Custom(message));
            }
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let exit = self.exit(ctx).expect("validated above");
        let mut changes = Vec::new();
        let mut message = String::new();

        if let Some(door_id) = exit.door {
            let door = ctx.world.item(door_id).expect("door id validated above");
            if !door.is_open() {
                changes.push(StateChange::SetItemAttribute {
                    id: door_id,
                    attribute: attr::is_open(),
                    new_value: AttributeValue::Bool(true),
                    old_value: Some(AttributeValue::Bool(false)),
                });
                message.push_str(&format!("(the {} opens)\n", door.name));
            }
        }

        changes.push(StateChange::MovePlayer { destination: exit.destination });
        let destination_name = ctx.world.location(exit.destination).map_or("somewhere new", |loc| loc.name.as_str());
        message.push_str(&format!("You go to {destination_name}."));
        Ok(ActionResult::new(message).with_changes(changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Parent;
    use crate::config::EngineConfig;
    use crate::id::{ItemId, LocationId};
    use crate::item::Item;
    use crate::location::{Direction, Location};
    use crate::parser::Command;
    use crate::player::Player;
    use crate::world::World;

    fn command(direction: Direction) -> Command {
        Command {
            verb: crate::id::VerbId::new("go"),
            direct_object: None,
            direct_modifiers: Vec::new(),
            preposition: None,
            indirect_object: None,
            indirect_modifiers: Vec::new(),
            direction: Some(direction),
            raw_input: "north".to_string(),
        }
    }

    fn two_room_world() -> (World, LocationId, LocationId) {
        let start = LocationId::new("startRoom");
        let north = LocationId::new("northRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start Room", "desc").with_inherently_lit(true).with_exit(Direction::North, Exit::new(north)));
        world.insert_location(Location::new(north, "North Room", "desc").with_inherently_lit(true));
        (world, start, north)
    }

    #[test]
    fn moves_player_through_open_exit() {
        let (world, _start, north) = two_room_world();
        let command = command(Direction::North);
        let config = EngineConfig::default();
        let ctx = ActionContext { command: &command, world: &world, config: &config };
        let result = super::super::run(&Go, &ctx).unwrap();
        assert!(result.changes.iter().any(|c| matches!(c, StateChange::MovePlayer { destination } if *destination == north)));
    }

    #[test]
    fn locked_door_blocks_travel() {
        let start = LocationId::new("startRoom");
        let north = LocationId::new("northRoom");
        let mut world = World::new(Player::new(start));
        let door = ItemId::new("gate");
        world.insert_item(
            Item::new(door, "iron gate", Parent::Nowhere)
                .with_flag(attr::is_lockable(), true)
                .with_flag(attr::is_locked(), true),
        );
        world.insert_location(
            Location::new(start, "Start Room", "desc")
                .with_inherently_lit(true)
                .with_exit(Direction::North, Exit::new(north).with_door(door)),
        );
        world.insert_location(Location::new(north, "North Room", "desc").with_inherently_lit(true));
        let command = command(Direction::North);
        let config = EngineConfig::default();
        let ctx = ActionContext { command: &command, world: &world, config: &config };
        let err = super::super::run(&Go, &ctx).unwrap_err();
        assert!(matches!(err, ActionResponse::Custom(msg) if msg.contains("locked")));
    }
}
