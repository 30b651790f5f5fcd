//! Tracks which pointer, if any, is currently driving a joystick.

use bevy::log::trace;
use bevy::math::Vec2;
use bevy::reflect::Reflect;

use crate::pointer::{PointerId, PointerPhase, PointerSample};

/// What a joystick should do this frame, as decided by an [`OwnershipTracker`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OwnershipAction {
    /// Nothing is driving the joystick, and nothing began inside it
    Idle,
    /// The given pointer began inside the joystick and should take it over
    Claim(PointerSample),
    /// The owning pointer is still held at the given device space position
    Tweak(Vec2),
    /// The owning pointer was released
    Release,
    /// The owning pointer could not be found this frame.
    ///
    /// Ownership is kept, but the thumb should not move.
    Unresolved,
}

/// Remembers the pointer that claimed a joystick, until it is released
///
/// Only one pointer may own a joystick at a time.
/// When several pointers begin inside the joystick during the same frame,
/// the first one in polling order wins and the others are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct OwnershipTracker {
    owner: Option<PointerId>,
}

impl OwnershipTracker {
    /// The pointer that currently owns the joystick.
    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<PointerId> {
        self.owner
    }

    /// Is any pointer currently driving the joystick?
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    /// Decides what the joystick should do with this frame's `samples`.
    ///
    /// `contains` reports whether a device space position lies within the joystick.
    /// When `allow_claims` is false, an idle joystick ignores new pointers,
    /// but an owned joystick keeps following its pointer.
    ///
    /// This does not change the tracker: call [`OwnershipTracker::claim`]
    /// or [`OwnershipTracker::release`] to act on the decision.
    #[must_use]
    pub fn resolve(
        &self,
        samples: &[PointerSample],
        allow_claims: bool,
        contains: impl Fn(Vec2) -> bool,
    ) -> OwnershipAction {
        let Some(owner) = self.owner else {
            if !allow_claims {
                return OwnershipAction::Idle;
            }

            return samples
                .iter()
                .find(|sample| sample.phase == PointerPhase::Began && contains(sample.position))
                .map_or(OwnershipAction::Idle, |sample| {
                    OwnershipAction::Claim(*sample)
                });
        };

        match samples.iter().find(|sample| sample.id == owner) {
            Some(sample) if sample.phase.is_released() => OwnershipAction::Release,
            Some(sample) => OwnershipAction::Tweak(sample.position),
            None => {
                trace!("owning pointer {owner:?} was not reported this frame");
                OwnershipAction::Unresolved
            }
        }
    }

    /// Hands the joystick to `pointer`.
    ///
    /// Returns `false`, leaving the current owner in place, if the joystick is already owned.
    pub fn claim(&mut self, pointer: PointerId) -> bool {
        if self.owner.is_some() {
            return false;
        }

        self.owner = Some(pointer);
        true
    }

    /// Drops the current owner, returning it.
    pub fn release(&mut self) -> Option<PointerId> {
        self.owner.take()
    }
}
