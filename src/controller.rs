//! The joystick state machine.
//!
//! A [`VirtualJoystick`] is created once with [`VirtualJoystick::initialize`],
//! then fed one [`FrameInput`] per frame through [`VirtualJoystick::update`].
//! Each update returns the [`JoystickEffects`] the host should apply:
//! new widget positions, and the events raised this frame.

use bevy::ecs::component::Component;
use bevy::log::debug;
use bevy::math::Vec2;
use bevy::reflect::Reflect;

use crate::config::JoystickConfig;
use crate::displacement::ThumbBounds;
use crate::errors::JoystickError;
use crate::events::{JoystickEvent, JoystickListeners};
use crate::geometry::JoystickGeometry;
use crate::ownership::{OwnershipAction, OwnershipTracker};
use crate::pointer::{select_strategy, InputStrategy, PointerId, PointerInput};

/// Everything a joystick reads during one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    /// Raw touch and mouse input
    pub pointers: PointerInput,
    /// Screen and widget layout
    pub geometry: JoystickGeometry,
    /// When `false`, an idle joystick will not be claimed by new pointers this frame.
    ///
    /// Used to let other UI take priority over the joystick.
    pub allow_claims: bool,
}

impl FrameInput {
    /// Creates a [`FrameInput`] that allows new pointers to claim the joystick.
    #[must_use]
    pub fn new(pointers: PointerInput, geometry: JoystickGeometry) -> Self {
        Self {
            pointers,
            geometry,
            allow_claims: true,
        }
    }
}

/// The changes a joystick wants applied after an update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoystickEffects {
    /// The new position of the area widget, relative to the panel
    pub area_position: Option<Vec2>,
    /// The new position of the thumb widget, relative to the area
    pub thumb_position: Option<Vec2>,
    /// The events raised this frame, in the order they happened
    pub events: Vec<JoystickEvent>,
}

impl JoystickEffects {
    /// Does applying these effects change nothing?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area_position.is_none() && self.thumb_position.is_none() && self.events.is_empty()
    }

    /// The last drag vector reported this frame, if any.
    #[must_use]
    pub fn drag(&self) -> Option<Vec2> {
        self.events.iter().rev().find_map(|event| match event {
            JoystickEvent::Move(value) => Some(value.truncate()),
            _ => None,
        })
    }
}

/// The mutable part of a joystick: who owns it, and where the drag started
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct SessionState {
    ownership: OwnershipTracker,
    origin: Vec2,
}

impl SessionState {
    /// The pointer currently driving the joystick.
    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<PointerId> {
        self.ownership.owner()
    }

    /// Is the joystick currently held?
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ownership.is_active()
    }

    /// Where the current drag is measured from, in logical space.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}

/// An on-screen analog joystick
///
/// ```rust
/// use bevy::math::{Rect, Vec2};
/// use leafwing_virtual_joystick::prelude::*;
///
/// let mut joystick = VirtualJoystick::initialize(JoystickConfig::default(), true).unwrap();
///
/// let geometry = JoystickGeometry {
///     screen_rect: Rect::new(0.0, 400.0, 200.0, 600.0),
///     area: WidgetRect::new(Vec2::ZERO, Vec2::new(200.0, 200.0)),
///     thumb: WidgetRect::new(Vec2::new(75.0, 75.0), Vec2::new(50.0, 50.0)),
///     device_screen_size: Vec2::new(800.0, 600.0),
///     logical_screen_size: Vec2::new(800.0, 600.0),
/// };
///
/// // A finger lands right in the middle of the joystick
/// let touch = PointerSample::touch(0, Vec2::new(100.0, 100.0), PointerPhase::Began);
/// let pointers = PointerInput { touches: vec![touch], ..Default::default() };
/// let effects = joystick.update(&FrameInput::new(pointers, geometry));
///
/// assert!(joystick.is_active());
/// assert_eq!(effects.events[0], JoystickEvent::TouchStart);
/// assert_eq!(effects.drag(), Some(Vec2::ZERO));
/// ```
#[derive(Debug, Component)]
pub struct VirtualJoystick {
    config: JoystickConfig,
    bounds: ThumbBounds,
    strategy: Box<dyn InputStrategy>,
    session: SessionState,
    listeners: JoystickListeners,
    enabled: bool,
    drag: Vec2,
}

impl VirtualJoystick {
    /// Creates an idle joystick.
    ///
    /// `supports_touch` reports whether the platform has a touch screen;
    /// together with [`JoystickConfig::force_touch_input`] it decides whether touches or the mouse drive the joystick.
    ///
    /// Fails if the configuration is invalid.
    pub fn initialize(config: JoystickConfig, supports_touch: bool) -> Result<Self, JoystickError> {
        config.validate()?;

        Ok(Self {
            config,
            bounds: ThumbBounds::new(config.radius),
            strategy: select_strategy(supports_touch, config.force_touch_input),
            session: SessionState::default(),
            listeners: JoystickListeners::default(),
            enabled: true,
            drag: Vec2::ZERO,
        })
    }

    /// The configuration this joystick was initialized with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &JoystickConfig {
        &self.config
    }

    /// The current session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Is a pointer currently driving the joystick?
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Does the joystick respond to input?
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The most recently reported drag vector, or zero when idle.
    #[inline]
    #[must_use]
    pub fn drag(&self) -> Vec2 {
        self.drag
    }

    /// The listeners notified of every event this joystick raises.
    #[inline]
    pub fn listeners_mut(&mut self) -> &mut JoystickListeners {
        &mut self.listeners
    }

    /// Turns input processing on or off.
    ///
    /// Disabling a joystick that is being held releases it,
    /// raising [`JoystickEvent::TouchEnd`] and recentering the widgets.
    pub fn set_enabled(&mut self, enabled: bool, geometry: &JoystickGeometry) -> JoystickEffects {
        let mut effects = JoystickEffects::default();

        if !enabled && self.is_active() {
            debug!("joystick disabled while held, releasing it");
            self.reset(geometry, &mut effects);
        }
        self.enabled = enabled;

        self.listeners.dispatch(&effects.events);
        effects
    }

    /// Processes one frame of input.
    ///
    /// Disabled joysticks return empty effects.
    pub fn update(&mut self, frame: &FrameInput) -> JoystickEffects {
        let mut effects = JoystickEffects::default();
        if !self.enabled {
            return effects;
        }

        let mut geometry = frame.geometry;
        let samples = self.strategy.samples(&frame.pointers);
        let action =
            self.session
                .ownership
                .resolve(&samples, frame.allow_claims, |position| {
                    geometry.contains(position)
                });

        match action {
            OwnershipAction::Idle | OwnershipAction::Unresolved => {}
            OwnershipAction::Claim(sample) => {
                debug!("joystick claimed by {:?}", sample.id);
                effects.events.push(JoystickEvent::TouchStart);
                self.start_tweaking(sample.position, &mut geometry, &mut effects);
                self.session.ownership.claim(sample.id);
            }
            OwnershipAction::Tweak(position) => {
                self.tweak(position, &mut geometry, &mut effects);
            }
            OwnershipAction::Release => {
                debug!("joystick released by {:?}", self.session.owner());
                self.reset(&geometry, &mut effects);
            }
        }

        self.listeners.dispatch(&effects.events);
        effects
    }

    /// Records the reference origin for a new drag, then tweaks towards `position` right away.
    ///
    /// Must run before ownership is claimed, so the tweak sees an inactive session.
    fn start_tweaking(
        &mut self,
        position: Vec2,
        geometry: &mut JoystickGeometry,
        effects: &mut JoystickEffects,
    ) {
        self.session.origin = if self.config.dynamic_thumb {
            geometry.to_logical_space(position)
        } else {
            geometry.panel_to_logical_space(geometry.area.center())
        };

        self.tweak(position, geometry, effects);
    }

    fn tweak(
        &mut self,
        position: Vec2,
        geometry: &mut JoystickGeometry,
        effects: &mut JoystickEffects,
    ) {
        let touch_point = geometry.to_logical_space(position);
        let relative_point = geometry.to_panel_space(touch_point);

        // The area follows the first touch of a dynamic session
        if self.config.dynamic_thumb && !self.session.is_active() {
            geometry.area = geometry.area.centered_on(relative_point);
            geometry.thumb = geometry.thumb.centered_within(geometry.area.size);
            effects.area_position = Some(geometry.area.position);
        }

        let area_center = geometry.area.center();
        let local_offset = self.bounds.clamp(relative_point - area_center);
        geometry.thumb.position = geometry.area.size / 2.0 + local_offset - geometry.thumb.size / 2.0;
        effects.thumb_position = Some(geometry.thumb.position);

        // Measured against the origin, not the thumb, so the two may disagree
        self.drag = self.bounds.normalize(touch_point - self.session.origin);
        effects.events.push(JoystickEvent::Move(self.drag.extend(0.0)));
    }

    fn reset(&mut self, geometry: &JoystickGeometry, effects: &mut JoystickEffects) {
        self.session.ownership.release();
        self.drag = Vec2::ZERO;

        let panel_size = geometry.panel_logical_rect().size();
        let area = geometry.area.centered_within(panel_size);
        let thumb = geometry.thumb.centered_within(area.size);
        effects.area_position = Some(area.position);
        effects.thumb_position = Some(thumb.position);

        effects.events.push(JoystickEvent::TouchEnd);
    }
}
