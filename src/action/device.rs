use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue};
use crate::change::StateChange;
use crate::scope::{is_location_lit, items_reachable_by_player};

fn touch_change(ctx: &ActionContext<'_>, id: crate::id::ItemId) -> Option<StateChange> {
    let item = ctx.world.item(id)?;
    if item.flag(attr::is_touched()) {
        return None;
    }
    Some(StateChange::SetItemAttribute {
        id,
        attribute: attr::is_touched(),
        new_value: AttributeValue::Bool(true),
        old_value: None,
    })
}

pub struct TurnOn;

impl ActionHandler for TurnOn {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Turn on what?".to_string()));
        };
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !(item.flag(attr::is_device()) || item.flag(attr::is_light_source())) {
            return Err(ActionResponse::Custom(format!("You can't turn on the {}.", item.name)));
        }
        if item.flag(attr::is_on()) {
            return Err(ActionResponse::Custom(format!("The {} is already on.", item.name)));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let mut changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_on(),
            new_value: AttributeValue::Bool(true),
            old_value: Some(AttributeValue::Bool(false)),
        }];
        changes.extend(touch_change(ctx, id));
        let mut message = format!("You turn on the {}.", item.name);
        if item.flag(attr::is_light_source()) {
            let location = ctx.world.player().current_location;
            let was_dark = !is_location_lit(ctx.world, location);
            if was_dark {
                message.push_str("\nLight floods the room.");
            }
        }
        Ok(ActionResult::new(message).with_changes(changes))
    }
}

pub struct TurnOff;

impl ActionHandler for TurnOff {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Turn off what?".to_string()));
        };
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !(item.flag(attr::is_device()) || item.flag(attr::is_light_source())) {
            return Err(ActionResponse::Custom(format!("You can't turn off the {}.", item.name)));
        }
        if !item.flag(attr::is_on()) {
            return Err(ActionResponse::Custom(format!("The {} is already off.", item.name)));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let is_light_source = item.flag(attr::is_light_source());
        let location = ctx.world.player().current_location;
        let was_lit = is_location_lit(ctx.world, location);

        let mut changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_on(),
            new_value: AttributeValue::Bool(false),
            old_value: Some(AttributeValue::Bool(true)),
        }];
        changes.extend(touch_change(ctx, id));

        let mut message = format!("The {} is now off.", item.name);
        if is_light_source && was_lit {
            // Another on light source, carried or in the room, still lights
            // it once this one turns off.
            let other_light_remains = ctx.world.all_items().any(|other| {
                other.id != id
                    && other.flag(attr::is_light_source())
                    && other.flag(attr::is_on())
                    && (matches!(&other.parent, Parent::Player)
                        || matches!(&other.parent, Parent::Location(loc) if *loc == location))
            });
            let inherently_lit = ctx.world.location(location).is_some_and(crate::location::Location::inherently_lit);
            if !other_light_remains && !inherently_lit {
                message.push_str("\nIt is now pitch black. You are likely to be eaten by a grue.");
            }
        }
        Ok(ActionResult::new(message).with_changes(changes))
    }
}
