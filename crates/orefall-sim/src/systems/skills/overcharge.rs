//! Overcharge: a timed boost to mining damage and radius.

use orefall_core::constants::SHIP_POSITION;
use orefall_core::enums::SkillSlot;
use orefall_core::events::{FrameEvents, SkillEvent};
use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

pub fn run(records: &mut SharedRecords, input: &InputState, events: &mut FrameEvents) {
    if !super::activate(SkillSlot::Overcharge, records, input) {
        return;
    }
    records.overcharge.activate(&records.skills);

    let target = input.pointer().unwrap_or(SHIP_POSITION);
    let radius = records.mining.radius * records.overcharge.radius_multiplier;
    events
        .skills
        .push(SkillEvent::new(SkillSlot::Overcharge, SHIP_POSITION, target, radius));
}
