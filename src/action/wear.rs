use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue, Parent};
use crate::change::StateChange;

pub struct Wear;

impl ActionHandler for Wear {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Wear what?".to_string()));
        };
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if item.parent != Parent::Player {
            return Err(ActionResponse::ItemNotHeld);
        }
        if !item.flag(attr::is_wearable()) {
            return Err(ActionResponse::Custom(format!("You can't wear the {}.", item.name)));
        }
        if item.flag(attr::is_worn()) {
            return Err(ActionResponse::Custom(format!("You're already wearing the {}.", item.name)));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_worn(),
            new_value: AttributeValue::Bool(true),
            old_value: Some(AttributeValue::Bool(false)),
        }];
        Ok(ActionResult::new(format!("You put on the {}.", item.name)).with_changes(changes))
    }
}

pub struct Remove;

impl ActionHandler for Remove {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Remove what?".to_string()));
        };
        let item = ctx.world.item(id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !item.flag(attr::is_worn()) {
            return Err(ActionResponse::ItemNotRemovable(item.name.clone()));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let changes = vec![StateChange::SetItemAttribute {
            id,
            attribute: attr::is_worn(),
            new_value: AttributeValue::Bool(false),
            old_value: Some(AttributeValue::Bool(true)),
        }];
        Ok(ActionResult::new(format!("You take off the {}.", item.name)).with_changes(changes))
    }
}
