//! The systems that power each [`VirtualJoystickPlugin`](crate::plugin::VirtualJoystickPlugin).

use bevy::ecs::prelude::*;
use bevy::input::{
    mouse::MouseButton,
    touch::{Touch, Touches},
    ButtonInput,
};
use bevy::log::error;
use bevy::math::{Rect, Vec2};
use bevy::window::{PrimaryWindow, Window};

#[cfg(feature = "ui")]
use bevy::log::warn;
#[cfg(feature = "ui")]
use bevy::{
    transform::components::GlobalTransform,
    ui::{Node, PositionType, Style, UiScale, Val},
};
#[cfg(feature = "ui")]
use crate::{controller::JoystickEffects, errors::JoystickWidget};
#[cfg(feature = "egui")]
use bevy_egui::EguiContext;

use crate::controller::{FrameInput, VirtualJoystick};
use crate::errors::JoystickWidgets;
use crate::events::JoystickEventMessage;
use crate::geometry::{JoystickGeometry, WidgetRect};
use crate::plugin::{JoystickDisabled, JoystickLayout, TouchSupport, VirtualJoystickNode};
use crate::pointer::{MouseSample, PointerInput, PointerPhase, PointerSample};

/// Validates newly added [`VirtualJoystickNode`]s.
///
/// Valid joysticks receive a [`VirtualJoystick`], and a default [`JoystickLayout`] if they had none.
/// Invalid ones are reported once and receive a [`JoystickDisabled`].
///
/// With the `ui` feature, widgets that have no `Style` are also reported here,
/// as the joystick will not be able to move them.
pub fn initialize_joysticks(
    mut commands: Commands,
    touch_support: Res<TouchSupport>,
    added: Query<(Entity, &VirtualJoystickNode, Has<JoystickLayout>), Added<VirtualJoystickNode>>,
    entities: Query<Entity>,
    #[cfg(feature = "ui")] styled: Query<(), With<Style>>,
) {
    for (entity, node, has_layout) in added.iter() {
        let widgets = JoystickWidgets {
            area: node.area.filter(|area| entities.contains(*area)),
            thumb: node.thumb.filter(|thumb| entities.contains(*thumb)),
        };

        let joystick = widgets.resolve().and_then(|_| {
            VirtualJoystick::initialize(node.config, touch_support.supports_touch)
        });

        match joystick {
            Ok(joystick) => {
                #[cfg(feature = "ui")]
                for (widget, target) in [
                    (JoystickWidget::Area, node.area),
                    (JoystickWidget::Thumb, node.thumb),
                ] {
                    if target.is_some_and(|target| !styled.contains(target)) {
                        warn!(
                            "joystick {entity:?} cannot move its {widget} widget, which has no `Style`"
                        );
                    }
                }

                let mut entity_commands = commands.entity(entity);
                entity_commands.insert(joystick);
                if !has_layout {
                    entity_commands.insert(JoystickLayout::default());
                }
            }
            Err(err) => {
                error!("virtual joystick {entity:?} is disabled: {err}");
                commands.entity(entity).insert(JoystickDisabled(err));
            }
        }
    }
}

/// Copies the computed `bevy::ui` layout of each joystick's panel, area and thumb into its [`JoystickLayout`].
///
/// Joysticks whose panel has no [`Node`] are skipped, and keep whatever layout was written for them.
#[cfg(feature = "ui")]
pub fn sync_ui_layout(
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_scale: Option<Res<UiScale>>,
    mut joysticks: Query<(
        &VirtualJoystickNode,
        &Node,
        &GlobalTransform,
        &mut JoystickLayout,
    )>,
    nodes: Query<(&Node, &GlobalTransform), Without<VirtualJoystickNode>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let scale_factor = window.scale_factor();
    let ui_scale = ui_scale.map_or(1.0, |ui_scale| ui_scale.0);

    for (joystick, panel_node, panel_transform, mut layout) in joysticks.iter_mut() {
        let (Some(area), Some(thumb)) = (joystick.area, joystick.thumb) else {
            continue;
        };
        let (Ok((area_node, area_transform)), Ok((thumb_node, thumb_transform))) =
            (nodes.get(area), nodes.get(thumb))
        else {
            continue;
        };

        let panel_rect = panel_node.logical_rect(panel_transform);
        let area_rect = area_node.logical_rect(area_transform);
        let thumb_rect = thumb_node.logical_rect(thumb_transform);

        layout.screen_rect = Rect::from_corners(
            panel_rect.min * scale_factor,
            panel_rect.max * scale_factor,
        );
        layout.area = WidgetRect::new(
            (area_rect.min - panel_rect.min) / ui_scale,
            area_rect.size() / ui_scale,
        );
        layout.thumb = WidgetRect::new(
            (thumb_rect.min - area_rect.min) / ui_scale,
            thumb_rect.size() / ui_scale,
        );
    }
}

/// Feeds this frame's touches and mouse input to every [`VirtualJoystick`],
/// then applies the resulting widget moves and sends the resulting [`JoystickEventMessage`]s.
///
/// Nothing happens if there is no primary window.
#[allow(clippy::too_many_arguments)]
pub fn update_virtual_joysticks(
    touches: Option<Res<Touches>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    #[cfg(feature = "ui")] ui_scale: Option<Res<UiScale>>,
    #[cfg(feature = "egui")] mut maybe_egui: Query<(Entity, &'static mut EguiContext)>,
    mut joysticks: Query<(
        Entity,
        &VirtualJoystickNode,
        &mut VirtualJoystick,
        &mut JoystickLayout,
    )>,
    #[cfg(feature = "ui")] mut styles: Query<&mut Style>,
    mut messages: EventWriter<JoystickEventMessage>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    #[cfg(feature = "ui")]
    let ui_scale = ui_scale.map_or(1.0, |ui_scale| ui_scale.0);
    #[cfg(not(feature = "ui"))]
    let ui_scale = 1.0;

    let pointers = PointerInput {
        touches: touches
            .map(|touches| touch_samples(&touches, window))
            .unwrap_or_default(),
        mouse: mouse_buttons
            .map(|buttons| mouse_sample(&buttons, window))
            .unwrap_or_default(),
    };

    // If egui wants the pointer, don't let it grab a joystick too.
    // `wants_pointer_input` sometimes returns `false` after clicking or holding a button over a widget,
    // so `is_pointer_over_area` is also needed.
    #[cfg(feature = "egui")]
    let allow_claims = !maybe_egui.iter_mut().any(|(_, mut ctx)| {
        ctx.get_mut().is_pointer_over_area() || ctx.get_mut().wants_pointer_input()
    });
    #[cfg(not(feature = "egui"))]
    let allow_claims = true;

    for (entity, node, mut joystick, mut layout) in joysticks.iter_mut() {
        let geometry = JoystickGeometry {
            screen_rect: layout.screen_rect,
            area: layout.area,
            thumb: layout.thumb,
            device_screen_size: window.physical_size().as_vec2(),
            logical_screen_size: window.size() / ui_scale,
        };

        let effects = if node.enabled != joystick.is_enabled() {
            joystick.set_enabled(node.enabled, &geometry)
        } else {
            joystick.update(&FrameInput {
                pointers: pointers.clone(),
                geometry,
                allow_claims,
            })
        };

        if effects.is_empty() {
            continue;
        }

        if let Some(position) = effects.area_position {
            layout.area.position = position;
        }
        if let Some(position) = effects.thumb_position {
            layout.thumb.position = position;
        }

        #[cfg(feature = "ui")]
        apply_to_styles(node, &effects, &mut styles);

        messages.send_batch(
            effects
                .events
                .iter()
                .map(|&event| JoystickEventMessage {
                    joystick: entity,
                    event,
                }),
        );
    }
}

#[cfg(feature = "ui")]
// Widgets without a `Style` were reported by `initialize_joysticks`, and are skipped here.
fn apply_to_styles(
    node: &VirtualJoystickNode,
    effects: &JoystickEffects,
    styles: &mut Query<&mut Style>,
) {
    let moves = [
        (node.area, effects.area_position),
        (node.thumb, effects.thumb_position),
    ];

    for (target, position) in moves {
        let (Some(target), Some(position)) = (target, position) else {
            continue;
        };
        let Ok(mut style) = styles.get_mut(target) else {
            continue;
        };

        style.position_type = PositionType::Absolute;
        style.left = Val::Px(position.x);
        style.top = Val::Px(position.y);
    }
}

/// Converts a window position (logical pixels, top-left origin) into device space (physical pixels, bottom-left origin).
fn to_device_space(position: Vec2, window: &Window) -> Vec2 {
    let physical = position * window.scale_factor();
    Vec2::new(physical.x, window.physical_height() as f32 - physical.y)
}

fn touch_samples(touches: &Touches, window: &Window) -> Vec<PointerSample> {
    let sample = |touch: &Touch, phase: PointerPhase| {
        PointerSample::touch(touch.id(), to_device_space(touch.position(), window), phase)
    };

    let held = touches.iter().map(|touch| {
        let phase = if touches.just_pressed(touch.id()) {
            PointerPhase::Began
        } else if touch.delta() != Vec2::ZERO {
            PointerPhase::Moved
        } else {
            PointerPhase::Stationary
        };
        sample(touch, phase)
    });
    let released = touches
        .iter_just_released()
        .map(|touch| sample(touch, PointerPhase::Ended));
    let canceled = touches
        .iter_just_canceled()
        .map(|touch| sample(touch, PointerPhase::Canceled));

    held.chain(released).chain(canceled).collect()
}

fn mouse_sample(buttons: &ButtonInput<MouseButton>, window: &Window) -> MouseSample {
    MouseSample {
        just_pressed: buttons.just_pressed(MouseButton::Left),
        pressed: buttons.pressed(MouseButton::Left),
        just_released: buttons.just_released(MouseButton::Left),
        position: window
            .cursor_position()
            .map(|position| to_device_space(position, window)),
    }
}
