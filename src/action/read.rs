use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue};
use crate::change::StateChange;
use crate::scope::{is_location_lit, items_reachable_by_player};

pub struct Read;

impl ActionHandler for Read {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Read what?".to_string()));
        };
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if !item.flag(attr::is_readable()) {
            return Err(ActionResponse::ItemNotReadable(item.name.clone()));
        }
        let location = ctx.world.player().current_location;
        let lit = is_location_lit(ctx.world, location) || item.flag(attr::is_light_source()) && item.flag(attr::is_on());
        if !lit {
            return Err(ActionResponse::RoomIsDark);
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let message = match item.text(attr::read_text()) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("There's nothing written on the {}.", item.name),
        };
        let mut changes = Vec::new();
        if !item.flag(attr::is_touched()) {
            changes.push(StateChange::SetItemAttribute {
                id,
                attribute: attr::is_touched(),
                new_value: AttributeValue::Bool(true),
                old_value: None,
            });
        }
        Ok(ActionResult::new(message).with_changes(changes))
    }
}
