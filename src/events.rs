//! Notifications raised by a virtual joystick, and the listeners that receive them.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use bevy::ecs::{entity::Entity, event::Event};
use bevy::math::Vec3;
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Something that happened to a joystick during a frame
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub enum JoystickEvent {
    /// A pointer claimed the joystick
    TouchStart,
    /// The joystick was dragged
    ///
    /// The `x` and `y` components lie within the unit circle. `z` is always zero.
    Move(Vec3),
    /// The owning pointer let go of the joystick, or the joystick was disabled while held
    TouchEnd,
}

impl JoystickEvent {
    /// The kind of this event, without its payload.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> JoystickEventKind {
        match self {
            Self::TouchStart => JoystickEventKind::TouchStart,
            Self::Move(_) => JoystickEventKind::Move,
            Self::TouchEnd => JoystickEventKind::TouchEnd,
        }
    }
}

/// The kinds of [`JoystickEvent`], used to pick which events a listener receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum JoystickEventKind {
    /// [`JoystickEvent::TouchStart`]
    TouchStart,
    /// [`JoystickEvent::Move`]
    Move,
    /// [`JoystickEvent::TouchEnd`]
    TouchEnd,
}

/// A [`JoystickEvent`] tagged with the joystick entity that raised it
///
/// These are typically accessed using an `EventReader<JoystickEventMessage>`.
#[derive(Debug, Clone, Copy, PartialEq, Event)]
pub struct JoystickEventMessage {
    /// The entity with the [`VirtualJoystickNode`](crate::plugin::VirtualJoystickNode) component
    pub joystick: Entity,
    /// What happened
    pub event: JoystickEvent,
}

/// Identifies a listener registered with [`JoystickListeners::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

type Listener = Arc<dyn Fn(&JoystickEvent) + Send + Sync>;

/// A registry of callbacks interested in a joystick's events
///
/// Dispatch iterates over a snapshot of the listeners registered when it started.
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use leafwing_virtual_joystick::events::{JoystickEvent, JoystickEventKind, JoystickListeners};
///
/// let mut listeners = JoystickListeners::default();
/// let starts = Arc::new(AtomicUsize::new(0));
///
/// let counter = starts.clone();
/// let handle = listeners.subscribe(JoystickEventKind::TouchStart, move |_| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
///
/// listeners.dispatch(&[JoystickEvent::TouchStart, JoystickEvent::TouchEnd]);
/// assert_eq!(starts.load(Ordering::Relaxed), 1);
///
/// listeners.unsubscribe(handle);
/// listeners.dispatch(&[JoystickEvent::TouchStart]);
/// assert_eq!(starts.load(Ordering::Relaxed), 1);
/// ```
#[derive(Default, Clone)]
pub struct JoystickListeners {
    next_handle: u64,
    listeners: Vec<(ListenerHandle, JoystickEventKind, Listener)>,
}

impl JoystickListeners {
    /// Registers `listener` to be called for every event of the given `kind`.
    pub fn subscribe(
        &mut self,
        kind: JoystickEventKind,
        listener: impl Fn(&JoystickEvent) + Send + Sync + 'static,
    ) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, kind, Arc::new(listener)));
        handle
    }

    /// Removes a listener, returning `true` if it was registered.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, ..)| *registered != handle);
        self.listeners.len() != before
    }

    /// The number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Are there no registered listeners?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Calls every matching listener for each of `events`, in order.
    pub fn dispatch(&self, events: &[JoystickEvent]) {
        if events.is_empty() {
            return;
        }

        let snapshot: Vec<(JoystickEventKind, Listener)> = self
            .listeners
            .iter()
            .map(|(_, kind, listener)| (*kind, listener.clone()))
            .collect();

        for event in events {
            for (kind, listener) in &snapshot {
                if *kind == event.kind() {
                    listener(event);
                }
            }
        }
    }
}

impl Debug for JoystickListeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoystickListeners")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
