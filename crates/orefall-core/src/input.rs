//! Inbound per-frame input written by the input collaborator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::SkillSlot;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Pointer position in world space.
    pub pointer: Vec2,
    /// False when the pointer is off the playfield or not yet reported.
    pub pointer_valid: bool,
    /// Skill press flags. Every skill system reads these before the
    /// input-reset step clears them.
    pub pressed: [bool; 4],
}

impl InputState {
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
        self.pointer_valid = true;
    }

    pub fn clear_pointer(&mut self) {
        self.pointer_valid = false;
    }

    pub fn press(&mut self, slot: SkillSlot) {
        self.pressed[slot.index()] = true;
    }

    #[inline]
    pub fn is_pressed(&self, slot: SkillSlot) -> bool {
        self.pressed[slot.index()]
    }

    /// Pointer position if valid.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer_valid.then_some(self.pointer)
    }

    pub fn reset_presses(&mut self) {
        self.pressed = [false; 4];
    }
}
