//! Contains main plugin exported by this crate.

use bevy::app::{App, Plugin, PreUpdate};
use bevy::ecs::prelude::*;
use bevy::input::InputSystem;
use bevy::math::Rect;
use bevy::reflect::Reflect;

use crate::config::JoystickConfig;
use crate::errors::JoystickError;
use crate::events::JoystickEventMessage;
use crate::geometry::WidgetRect;

/// A [`Plugin`] that drives every [`VirtualJoystickNode`] from touch and mouse input
///
/// Each joystick is made of three entities:
///  - a panel, carrying the [`VirtualJoystickNode`] component, which defines where the joystick can be grabbed
///  - an area, a child of the panel, which bounds the travel of the thumb
///  - a thumb, which should be a child of the area, and follows the finger
///
/// Once a [`VirtualJoystickNode`] is added, it is validated and given a
/// [`VirtualJoystick`](crate::controller::VirtualJoystick) and a [`JoystickLayout`].
/// Joysticks that fail validation receive a [`JoystickDisabled`] component instead, and are never updated.
///
/// ## Systems
///
/// **WARNING:** These systems run during [`PreUpdate`].
/// If you have systems that care about joystick events that also run during this schedule,
/// you must define an ordering between your systems or behavior will be very erratic.
/// The stable labels for these systems are available under the [`VirtualJoystickSystem`] enum.
///
/// Complete list:
///
/// - [`initialize_joysticks`](crate::systems::initialize_joysticks), which validates newly added joysticks
///     - labeled [`VirtualJoystickSystem::Initialize`]
/// - [`sync_ui_layout`](crate::systems::sync_ui_layout), which copies the computed `bevy::ui` layout into each [`JoystickLayout`]
///     - labeled [`VirtualJoystickSystem::Layout`]
///     - only present with the `ui` feature
/// - [`update_virtual_joysticks`](crate::systems::update_virtual_joysticks), which feeds touches and mouse input to each joystick,
///   moves its widgets and sends [`JoystickEventMessage`]s
///     - labeled [`VirtualJoystickSystem::Update`]
#[derive(Debug, Default)]
pub struct VirtualJoystickPlugin;

impl Plugin for VirtualJoystickPlugin {
    fn build(&self, app: &mut App) {
        use crate::systems::*;

        app.configure_sets(
            PreUpdate,
            (
                VirtualJoystickSystem::Initialize,
                VirtualJoystickSystem::Layout,
                VirtualJoystickSystem::Update,
            )
                .chain()
                .after(InputSystem),
        )
        .add_systems(
            PreUpdate,
            initialize_joysticks.in_set(VirtualJoystickSystem::Initialize),
        )
        .add_systems(
            PreUpdate,
            update_virtual_joysticks.in_set(VirtualJoystickSystem::Update),
        );

        #[cfg(feature = "ui")]
        app.add_systems(
            PreUpdate,
            sync_ui_layout.in_set(VirtualJoystickSystem::Layout),
        );

        // Resources and events
        app.init_resource::<TouchSupport>()
            .add_event::<JoystickEventMessage>();

        // Reflection
        app.register_type::<VirtualJoystickNode>()
            .register_type::<JoystickLayout>()
            .register_type::<JoystickConfig>()
            .register_type::<TouchSupport>();
    }
}

/// [`SystemSet`]s for the [`crate::systems`] used by this crate
///
/// The sets run in the order they are declared.
#[derive(SystemSet, Clone, Hash, Debug, PartialEq, Eq)]
pub enum VirtualJoystickSystem {
    /// Validates newly added [`VirtualJoystickNode`]s
    Initialize,
    /// Gathers the layout of each joystick's widgets
    Layout,
    /// Processes input and moves the widgets
    Update,
}

/// Marks an entity as the root panel of an on-screen joystick
///
/// Touches and clicks that begin inside the panel grab the joystick.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
pub struct VirtualJoystickNode {
    /// How the joystick behaves
    pub config: JoystickConfig,
    /// The entity bounding the thumb's travel
    pub area: Option<Entity>,
    /// The entity following the finger
    pub thumb: Option<Entity>,
    /// When set to `false`, the joystick ignores input.
    ///
    /// Disabling a joystick while it is held releases it.
    pub enabled: bool,
}

impl VirtualJoystickNode {
    /// Creates an enabled joystick node driving the given widgets.
    #[must_use]
    pub fn new(config: JoystickConfig, area: Entity, thumb: Entity) -> Self {
        Self {
            config,
            area: Some(area),
            thumb: Some(thumb),
            enabled: true,
        }
    }
}

/// The last known layout of a joystick's panel and widgets
///
/// With the `ui` feature, this is refreshed every frame from the `bevy::ui` layout of nodes that have one.
/// Joysticks that are not laid out by `bevy::ui` may have it written directly instead.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct JoystickLayout {
    /// The panel in device space, with a top-left origin
    pub screen_rect: Rect,
    /// The area widget, relative to the panel
    pub area: WidgetRect,
    /// The thumb widget, relative to the area
    pub thumb: WidgetRect,
}

/// Added to joysticks that could not be set up
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct JoystickDisabled(pub JoystickError);

/// Whether the current platform reports input through a touch screen
///
/// Decides, when each joystick is initialized, whether touches or the mouse drive it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct TouchSupport {
    /// Does the platform support touch input?
    pub supports_touch: bool,
}

impl Default for TouchSupport {
    fn default() -> Self {
        Self {
            supports_touch: cfg!(any(target_os = "android", target_os = "ios")),
        }
    }
}
