//! Helpful utilities for testing joysticks by sending mock touch and mouse events
//!
//! Positions are given the way the window reports them: in logical pixels, from the top-left corner.

use bevy::app::App;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::With;
use bevy::ecs::world::World;
use bevy::input::{
    mouse::{MouseButton, MouseButtonInput},
    touch::{TouchInput, TouchPhase},
    ButtonState,
};
use bevy::math::Vec2;
use bevy::window::{PrimaryWindow, Window};

/// Send fake pointer events for testing purposes
///
/// The events are processed by `bevy::input` during the next [`App::update`],
/// just as real input would be.
///
/// # Examples
/// ```rust
/// use bevy::input::touch::TouchPhase;
/// use bevy::prelude::*;
/// use leafwing_virtual_joystick::MockTouch;
///
/// let mut app = App::new();
/// app.add_plugins(bevy::input::InputPlugin);
///
/// // Drag a finger down the screen
/// app.send_touch(0, TouchPhase::Started, Vec2::new(100.0, 100.0));
/// app.send_touch(0, TouchPhase::Moved, Vec2::new(100.0, 150.0));
/// app.send_touch(0, TouchPhase::Ended, Vec2::new(100.0, 150.0));
/// ```
pub trait MockTouch {
    /// Sends a touch event for the finger `id`, at `position` in window coordinates.
    fn send_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2);

    /// Moves the cursor of the primary window to `position`, then presses the left mouse button.
    fn press_mouse_at(&mut self, position: Vec2);

    /// Moves the cursor of the primary window to `position`.
    fn move_cursor_to(&mut self, position: Vec2);

    /// Releases the left mouse button.
    fn release_mouse(&mut self);
}

fn primary_window(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<PrimaryWindow>>()
        .get_single(world)
        .unwrap_or(Entity::PLACEHOLDER)
}

fn send_mouse_button(world: &mut World, state: ButtonState) {
    let window = primary_window(world);
    world.send_event(MouseButtonInput {
        button: MouseButton::Left,
        state,
        window,
    });
}

impl MockTouch for World {
    fn send_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        let window = primary_window(self);
        self.send_event(TouchInput {
            phase,
            position,
            window,
            force: None,
            id,
        });
    }

    fn press_mouse_at(&mut self, position: Vec2) {
        self.move_cursor_to(position);
        send_mouse_button(self, ButtonState::Pressed);
    }

    fn move_cursor_to(&mut self, position: Vec2) {
        let mut windows = self.query_filtered::<&mut Window, With<PrimaryWindow>>();
        if let Ok(mut window) = windows.get_single_mut(self) {
            window.set_cursor_position(Some(position));
        }
    }

    fn release_mouse(&mut self) {
        send_mouse_button(self, ButtonState::Released);
    }
}

impl MockTouch for App {
    fn send_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        self.world_mut().send_touch(id, phase, position);
    }

    fn press_mouse_at(&mut self, position: Vec2) {
        self.world_mut().press_mouse_at(position);
    }

    fn move_cursor_to(&mut self, position: Vec2) {
        self.world_mut().move_cursor_to(position);
    }

    fn release_mouse(&mut self) {
        self.world_mut().release_mouse();
    }
}
