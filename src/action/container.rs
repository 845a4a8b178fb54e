use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue, Parent};
use crate::change::StateChange;
use crate::scope::items_reachable_by_player;

fn require_target(ctx: &ActionContext<'_>, verb: &str) -> Result<crate::id::ItemId, ActionResponse> {
    ctx.command
        .direct_object
        .ok_or_else(|| ActionResponse::Custom(format!("{verb} what?")))
}

pub struct Open;

impl ActionHandler for Open {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let id = require_target(ctx, "Open")?;
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !item.flag(attr::is_openable()) {
            return Err(ActionResponse::Custom(format!("You can't open the {}.", item.name)));
        }
        if item.flag(attr::is_locked()) {
            return Err(ActionResponse::Custom(format!("The {} is locked.", item.name)));
        }
        if item.is_open() {
            return Err(ActionResponse::Custom(format!("The {} is already open.", item.name)));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_open(),
            new_value: AttributeValue::Bool(true),
            old_value: Some(AttributeValue::Bool(false)),
        }];
        Ok(ActionResult::new(format!("You open the {}.", item.name)).with_changes(changes))
    }
}

pub struct Close;

impl ActionHandler for Close {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let id = require_target(ctx, "Close")?;
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !item.flag(attr::is_openable()) {
            return Err(ActionResponse::Custom(format!("You can't close the {}.", item.name)));
        }
        if !item.is_open() {
            return Err(ActionResponse::Custom(format!("The {} is already closed.", item.name)));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_open(),
            new_value: AttributeValue::Bool(false),
            old_value: Some(AttributeValue::Bool(true)),
        }];
        Ok(ActionResult::new(format!("You close the {}.", item.name)).with_changes(changes))
    }
}

pub struct Lock;

impl ActionHandler for Lock {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let id = require_target(ctx, "Lock")?;
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !item.flag(attr::is_lockable()) {
            return Err(ActionResponse::Custom(format!("You can't lock the {}.", item.name)));
        }
        if item.is_open() {
            return Err(ActionResponse::Custom(format!("You'll have to close the {} first.", item.name)));
        }
        let Some(key_id) = ctx.command.indirect_object else {
            return Err(ActionResponse::Custom("Lock it with what?".to_string()));
        };
        if item.lock_key() != Some(key_id) {
            let key_name = ctx.world.item(key_id).map_or("that", |k| k.name.as_str());
            return Err(ActionResponse::Custom(format!("The {key_name} doesn't fit the {}.", item.name)));
        }
        let key = ctx.world.item(key_id).ok_or(ActionResponse::ItemNotAccessible)?;
        if key.parent != Parent::Player {
            return Err(ActionResponse::ItemNotHeld);
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_locked(),
            new_value: AttributeValue::Bool(true),
            old_value: Some(AttributeValue::Bool(false)),
        }];
        Ok(ActionResult::new(format!("You lock the {}.", item.name)).with_changes(changes))
    }
}

pub struct Unlock;

impl ActionHandler for Unlock {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let id = require_target(ctx, "Unlock")?;
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !item.flag(attr::is_lockable()) {
            return Err(ActionResponse::Custom(format!("You can't unlock the {}.", item.name)));
        }
        if !item.flag(attr::is_locked()) {
            return Err(ActionResponse::Custom(format!("The {} isn't locked.", item.name)));
        }
        let Some(key_id) = ctx.command.indirect_object else {
            return Err(ActionResponse::Custom("Unlock it with what?".to_string()));
        };
        if item.lock_key() != Some(key_id) {
            let key_name = ctx.world.item(key_id).map_or("that", |k| k.name.as_str());
            return Err(ActionResponse::Custom(format!("The {key_name} doesn't fit the {}.", item.name)));
        }
        let key = ctx.world.item(key_id).ok_or(ActionResponse::ItemNotAccessible)?;
        if key.parent != Parent::Player {
            return Err(ActionResponse::ItemNotHeld);
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_locked(),
            new_value: AttributeValue::Bool(false),
            old_value: Some(AttributeValue::Bool(true)),
        }];
        Ok(ActionResult::new(format!("You unlock the {}.", item.name)).with_changes(changes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::attribute::Parent;
    use crate::id::{ItemId, LocationId};
    use crate::item::Item;
    use crate::location::Location;
    use crate::parser::Command;
    use crate::player::Player;
    use crate::world::World;

    fn command(direct: ItemId, indirect: Option<ItemId>) -> Command {
        Command {
            verb: crate::id::VerbId::new("open"),
            direct_object: Some(direct),
            direct_modifiers: Vec::new(),
            preposition: None,
            indirect_object: indirect,
            indirect_modifiers: Vec::new(),
            direction: None,
            raw_input: "open box".to_string(),
        }
    }

    #[test]
    fn open_sets_is_open_true() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        let box_id = ItemId::new("box");
        world.insert_item(Item::new(box_id, "box", Parent::Location(start)).with_flag(attr::is_openable(), true));
        let command = command(box_id, None);
        let ctx = ActionContext { command: &command, world: &world, config: &EngineConfig::default() };
        let result = super::super::run(&Open, &ctx).unwrap();
        assert!(result.changes.iter().any(|c| matches!(c, StateChange::SetItemAttribute { new_value: AttributeValue::Bool(true), .. })));
    }

    #[test]
    fn unlock_requires_matching_key() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        let box_id = ItemId::new("box");
        let key_id = ItemId::new("key");
        world.insert_item(
            Item::new(box_id, "box", Parent::Location(start))
                .with_flag(attr::is_lockable(), true)
                .with_flag(attr::is_locked(), true)
                .with_attribute(attr::lock_key(), AttributeValue::ItemIdSet(std::collections::HashSet::from([key_id]))),
        );
        world.insert_item(Item::new(key_id, "brass key", Parent::Player));
        let command = command(box_id, Some(key_id));
        let ctx = ActionContext { command: &command, world: &world, config: &EngineConfig::default() };
        let result = super::super::run(&Unlock, &ctx).unwrap();
        assert_eq!(result.message, "You unlock the box.");
    }

    #[test]
    fn unlock_rejects_a_key_that_is_reachable_but_not_held() {
        let start = LocationId::new("startRoom");
        let mut world = World::new(Player::new(start));
        world.insert_location(Location::new(start, "Start", "desc").with_inherently_lit(true));
        let box_id = ItemId::new("box");
        let key_id = ItemId::new("key");
        world.insert_item(
            Item::new(box_id, "box", Parent::Location(start))
                .with_flag(attr::is_lockable(), true)
                .with_flag(attr::is_locked(), true)
                .with_attribute(attr::lock_key(), AttributeValue::ItemIdSet(std::collections::HashSet::from([key_id]))),
        );
        world.insert_item(Item::new(key_id, "brass key", Parent::Location(start)));
        let command = command(box_id, Some(key_id));
        let ctx = ActionContext { command: &command, world: &world, config: &EngineConfig::default() };
        let err = super::super::run(&Unlock, &ctx).unwrap_err();
        assert!(matches!(err, ActionResponse::ItemNotHeld));
    }
}
