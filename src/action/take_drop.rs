use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue, Parent};
use crate::change::StateChange;
use crate::id::Pronoun;
use crate::scope::items_reachable_by_player;
use std::collections::HashSet;

pub struct Take;

impl ActionHandler for Take {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Take what?".to_string()));
        };
        let Some(item) = ctx.world.item(id) else {
            return Err(ActionResponse::ItemNotAccessible);
        };
        if !items_reachable_by_player(ctx.world).contains(&id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if item.parent == Parent::Player {
            return Err(ActionResponse::Custom("You already have that.".to_string()));
        }
        if let Parent::Item(container_id) = item.parent {
            let container = ctx.world.item(container_id);
            let passable = container.is_some_and(|c| c.lets_contents_through());
            if !passable {
                let name = container.map_or("that".to_string(), |c| c.name.clone());
                return Err(ActionResponse::Custom(format!("You can't take things out of the {name}.")));
            }
        }
        if !item.is_takable() {
            return Err(ActionResponse::Custom(format!("You can't take the {}.", item.name)));
        }
        let carried: i64 = ctx.world.items_in(&Parent::Player).iter().map(|i| i.size()).sum();
        if carried + item.size() > ctx.world.player().carrying_capacity {
            return Err(ActionResponse::Custom("Your hands are full.".to_string()));
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let item = ctx.world.item(id).expect("validated above");
        let mut changes = vec![StateChange::MoveItem { id, new_parent: Parent::Player }];
        if !item.flag(attr::is_touched()) {
            changes.push(StateChange::SetItemAttribute {
                id,
                attribute: attr::is_touched(),
                new_value: AttributeValue::Bool(true),
                old_value: None,
            });
        }
        changes.push(StateChange::SetPronoun { pronoun: Pronoun::It, targets: HashSet::from([id]) });
        Ok(ActionResult::new("Taken.").with_changes(changes))
    }
}

pub struct Drop;

impl ActionHandler for Drop {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Drop what?".to_string()));
        };
        let Some(item) = ctx.world.item(id) else {
            return Err(ActionResponse::ItemNotAccessible);
        };
        if item.parent != Parent::Player {
            return Err(ActionResponse::ItemNotHeld);
        }
        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let id = ctx.command.direct_object.expect("validated above");
        let destination = Parent::Location(ctx.world.player().current_location);
        let changes = vec![
            StateChange::MoveItem { id, new_parent: destination },
            StateChange::SetPronoun { pronoun: Pronoun::It, targets: HashSet::from([id]) },
        ];
        Ok(ActionResult::new("Dropped.").with_changes(changes))
    }
}
