use super::{ActionContext, ActionHandler, ActionResponse, ActionResult};
use crate::attribute::{well_known as attr, AttributeValue, Parent};
use crate::change::StateChange;
use crate::id::{ItemId, Pronoun};
use crate::scope::items_reachable_by_player;
use crate::vocabulary::Preposition;
use std::collections::HashSet;

/// Handles both `put X in Y` and `put X on Y`: the resolved preposition
/// picks container vs surface semantics, per the Insert/PutOn contract.
pub struct Insert;

fn is_ancestor(world: &crate::world::World, candidate: ItemId, of: ItemId) -> bool {
    let mut cursor = world.item(of).map(|item| item.parent.clone());
    while let Some(Parent::Item(id)) = cursor {
        if id == candidate {
            return true;
        }
        cursor = world.item(id).map(|item| item.parent.clone());
    }
    false
}

impl ActionHandler for Insert {
    fn validate(&self, ctx: &ActionContext<'_>) -> Result<(), ActionResponse> {
        let Some(direct_id) = ctx.command.direct_object else {
            return Err(ActionResponse::Custom("Put what?".to_string()));
        };
        let Some(indirect_id) = ctx.command.indirect_object else {
            return Err(ActionResponse::Custom("Put it in what?".to_string()));
        };
        let reachable = items_reachable_by_player(ctx.world);
        let direct = ctx.world.item(direct_id).ok_or(ActionResponse::ItemNotAccessible)?;
        let indirect = ctx.world.item(indirect_id).ok_or(ActionResponse::ItemNotAccessible)?;
        if !reachable.contains(&direct_id) || !reachable.contains(&indirect_id) {
            return Err(ActionResponse::ItemNotAccessible);
        }
        if direct_id == indirect_id {
            return Err(ActionResponse::SelfInsertion);
        }
        if is_ancestor(ctx.world, direct_id, indirect_id) {
            return Err(ActionResponse::IndirectRecursion {
                inner: direct.name.clone(),
                outer: indirect.name.clone(),
            });
        }

        let onto_surface = ctx.command.preposition == Some(Preposition::On);
        if onto_surface {
            if !indirect.is_surface() {
                return Err(ActionResponse::TargetNotContainer(indirect.name.clone()));
            }
        } else {
            if !indirect.is_container() {
                return Err(ActionResponse::TargetNotContainer(indirect.name.clone()));
            }
            if !indirect.is_open() {
                return Err(ActionResponse::ContainerClosed(indirect.name.clone()));
            }
        }

        if let Some(capacity) = indirect.capacity() {
            if direct.size() > capacity {
                return Err(ActionResponse::ItemTooLarge(direct.name.clone()));
            }
            let occupied: i64 = ctx.world.items_in(&Parent::Item(indirect_id)).iter().map(|item| item.size()).sum();
            if occupied + direct.size() > capacity {
                return Err(ActionResponse::ContainerFull(indirect.name.clone()));
            }
        }

        Ok(())
    }

    fn process(&self, ctx: &ActionContext<'_>) -> Result<ActionResult, ActionResponse> {
        let direct_id = ctx.command.direct_object.expect("validated above");
        let indirect_id = ctx.command.indirect_object.expect("validated above");
        let direct = ctx.world.item(direct_id).expect("validated above");
        let indirect = ctx.world.item(indirect_id).expect("validated above");
        let onto_surface = ctx.command.preposition == Some(Preposition::On);

        let mut changes = vec![StateChange::MoveItem { id: direct_id, new_parent: Parent::Item(indirect_id) }];
        if !direct.flag(attr::is_touched()) {
            changes.push(StateChange::SetItemAttribute {
                id: direct_id,
                attribute: attr::is_touched(),
                new_value: AttributeValue::Bool(true),
                old_value: None,
            });
        }
        if !indirect.flag(attr::is_touched()) {
            changes.push(StateChange::SetItemAttribute {
                id: indirect_id,
                attribute: attr::is_touched(),
                new_value: AttributeValue::Bool(true),
                old_value: None,
            });
        }
        changes.push(StateChange::SetPronoun { pronoun: Pronoun::It, targets: HashSet::from([direct_id]) });

        let preposition_word = if onto_surface { "on" } else { "in" };
        let message = format!("You put the {} {preposition_word} the {}.", direct.name, indirect.name);
        Ok(ActionResult::new(message).with_changes(changes))
    }
}
