use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, Parent};

pub struct Inventory;

impl ActionHandler for Inventory {
    fn validate(&self, _ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let carried = ctx.world.items_in(&Parent::Player);
        if carried.is_empty() {
            return Ok(ActionResult::new("You are carrying nothing."));
        }
        let lines: Vec<String> = carried
            .into_iter()
            .map(|item| {
                if item.flag(attr::is_worn()) {
                    format!("{} (worn)", item.name)
                } else {
                    item.name.clone()
                }
            })
            .collect();
        Ok(ActionResult::new(format!("You are carrying:\n{}", lines.join("\n"))))
    }
}
