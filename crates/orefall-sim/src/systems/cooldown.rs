//! Timers that run every tick regardless of phase, and the input reset.

use orefall_core::input::InputState;
use orefall_core::records::SharedRecords;

/// Decay skill cooldowns, the overcharge buff and the combo window.
pub fn run(records: &mut SharedRecords, dt: f32) {
    records.cooldowns.tick(dt);
    records.overcharge.tick(dt);
    records.bonus.tick_combo(dt);
}

/// Clear skill presses. Must run after every skill system has read them.
pub fn reset_input(input: &mut InputState) {
    input.reset_presses();
}
