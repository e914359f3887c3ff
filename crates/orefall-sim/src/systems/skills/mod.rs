//! The four activatable skills.
//!
//! Each skill reads its press flag once per tick. A press on a locked skill,
//! a skill still cooling down, or a targeted skill without a valid pointer
//! does nothing: it is not queued and no cooldown is spent.

pub mod chain;
pub mod emp;
pub mod laser;
pub mod overcharge;

use glam::Vec2;
use tracing::debug;

use orefall_core::enums::SkillSlot;
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

fn can_fire(slot: SkillSlot, records: &SharedRecords, input: &InputState) -> bool {
    if !input.is_pressed(slot) {
        return false;
    }
    if !records.unlocks.is_unlocked(slot) {
        debug!(?slot, "press ignored, skill locked");
        return false;
    }
    records.cooldowns.get(slot).is_ready()
}

fn start_cooldown(slot: SkillSlot, records: &mut SharedRecords) {
    let max = records.skills.cooldown(slot);
    records.cooldowns.trigger(slot, max);
    debug!(?slot, cooldown = max, "skill activated");
}

/// Gate a pointer-targeted skill. On success the cooldown is running and
/// the pointer position is returned.
pub(crate) fn activate_targeted(
    slot: SkillSlot,
    records: &mut SharedRecords,
    input: &InputState,
) -> Option<Vec2> {
    if !can_fire(slot, records, input) {
        return None;
    }
    let Some(pointer) = input.pointer() else {
        debug!(?slot, "press ignored, no valid pointer");
        return None;
    };
    start_cooldown(slot, records);
    Some(pointer)
}

/// Gate a skill that needs no target.
pub(crate) fn activate(slot: SkillSlot, records: &mut SharedRecords, input: &InputState) -> bool {
    if !can_fire(slot, records, input) {
        return false;
    }
    start_cooldown(slot, records);
    true
}
