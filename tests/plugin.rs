use bevy::input::touch::TouchPhase;
use bevy::input::InputPlugin;
use bevy::math::Rect;
use bevy::prelude::*;
use bevy::ui::{Node, UiScale};
use bevy::window::{PrimaryWindow, WindowResolution};
use leafwing_virtual_joystick::prelude::*;
use leafwing_virtual_joystick::MockTouch;

struct TestJoystick {
    panel: Entity,
    area: Entity,
    thumb: Entity,
}

fn test_app(supports_touch: bool) -> App {
    test_app_with_resolution(supports_touch, WindowResolution::new(800.0, 600.0))
}

fn test_app_with_resolution(supports_touch: bool, resolution: WindowResolution) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(InputPlugin)
        .add_plugins(VirtualJoystickPlugin)
        .insert_resource(TouchSupport { supports_touch });

    app.world_mut().spawn((
        Window {
            resolution,
            ..default()
        },
        PrimaryWindow,
    ));

    app
}

/// Spawns a 200x200 joystick in the bottom-left corner of the window.
///
/// The panel has no `Node`, so its layout is written by hand.
fn spawn_joystick(app: &mut App, config: JoystickConfig) -> TestJoystick {
    let world = app.world_mut();
    let thumb = world.spawn(Style::default()).id();
    let area = world.spawn(Style::default()).id();
    let panel = world
        .spawn((
            VirtualJoystickNode::new(config, area, thumb),
            JoystickLayout {
                screen_rect: Rect::new(0.0, 400.0, 200.0, 600.0),
                area: WidgetRect::new(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0)),
                thumb: WidgetRect::new(Vec2::new(40.0, 40.0), Vec2::new(20.0, 20.0)),
            },
        ))
        .id();

    TestJoystick { panel, area, thumb }
}

fn drain_events(app: &mut App) -> Vec<JoystickEventMessage> {
    app.world_mut()
        .resource_mut::<Events<JoystickEventMessage>>()
        .drain()
        .collect()
}

fn position_of(app: &App, entity: Entity) -> (Val, Val) {
    let style = app.world().get::<Style>(entity).unwrap();
    (style.left, style.top)
}

#[test]
fn valid_joysticks_are_initialized() {
    let mut app = test_app(true);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default());

    app.update();

    let world = app.world();
    assert!(world.get::<VirtualJoystick>(joystick.panel).is_some());
    assert!(world.get::<JoystickDisabled>(joystick.panel).is_none());
}

#[test]
fn missing_widgets_disable_the_joystick() {
    let mut app = test_app(true);
    let area = app.world_mut().spawn(Style::default()).id();
    let panel = app
        .world_mut()
        .spawn(VirtualJoystickNode {
            config: JoystickConfig::default(),
            area: Some(area),
            thumb: None,
            enabled: true,
        })
        .id();

    app.update();

    let world = app.world();
    assert!(world.get::<VirtualJoystick>(panel).is_none());
    assert_eq!(
        world.get::<JoystickDisabled>(panel),
        Some(&JoystickDisabled(JoystickError::MissingWidget(
            JoystickWidget::Thumb
        )))
    );

    // Disabled joysticks never respond to input
    app.send_touch(0, TouchPhase::Started, Vec2::new(100.0, 500.0));
    app.update();
    assert!(drain_events(&mut app).is_empty());
}

#[test]
fn invalid_radius_disables_the_joystick() {
    let mut app = test_app(true);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default().with_radius(-5.0));

    app.update();

    assert_eq!(
        app.world().get::<JoystickDisabled>(joystick.panel),
        Some(&JoystickDisabled(JoystickError::InvalidRadius(-5.0)))
    );
}

#[test]
fn touch_drag_moves_the_thumb_and_sends_events() {
    let mut app = test_app(true);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default());
    app.update();

    // The center of the area, in window coordinates
    app.send_touch(7, TouchPhase::Started, Vec2::new(100.0, 500.0));
    app.update();

    let events = drain_events(&mut app);
    assert_eq!(
        events,
        vec![
            JoystickEventMessage {
                joystick: joystick.panel,
                event: JoystickEvent::TouchStart,
            },
            JoystickEventMessage {
                joystick: joystick.panel,
                event: JoystickEvent::Move(Vec3::ZERO),
            },
        ]
    );

    // Drag 45 pixels up the screen
    app.send_touch(7, TouchPhase::Moved, Vec2::new(100.0, 455.0));
    app.update();

    let events = drain_events(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, JoystickEvent::Move(Vec3::new(0.0, 0.5, 0.0)));
    assert_eq!(
        position_of(&app, joystick.thumb),
        (Val::Px(40.0), Val::Px(-5.0))
    );
    assert_eq!(
        app.world().get::<Style>(joystick.thumb).unwrap().position_type,
        PositionType::Absolute
    );

    let layout = app.world().get::<JoystickLayout>(joystick.panel).unwrap();
    assert_eq!(layout.thumb.position, Vec2::new(40.0, -5.0));

    // Let go
    app.send_touch(7, TouchPhase::Ended, Vec2::new(100.0, 455.0));
    app.update();

    let events = drain_events(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, JoystickEvent::TouchEnd);
    assert_eq!(
        position_of(&app, joystick.thumb),
        (Val::Px(40.0), Val::Px(40.0))
    );
    assert_eq!(
        position_of(&app, joystick.area),
        (Val::Px(50.0), Val::Px(50.0))
    );
}

#[test]
fn touches_outside_the_panel_are_ignored() {
    let mut app = test_app(true);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default());
    app.update();

    app.send_touch(0, TouchPhase::Started, Vec2::new(600.0, 100.0));
    app.update();

    assert!(drain_events(&mut app).is_empty());
    assert!(!app
        .world()
        .get::<VirtualJoystick>(joystick.panel)
        .unwrap()
        .is_active());
}

#[test]
fn mouse_drag_without_touch_support() {
    let mut app = test_app(false);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default());
    app.update();

    app.press_mouse_at(Vec2::new(100.0, 500.0));
    app.update();
    let events = drain_events(&mut app);
    assert_eq!(events[0].event, JoystickEvent::TouchStart);

    app.move_cursor_to(Vec2::new(190.0, 500.0));
    app.update();
    let events = drain_events(&mut app);
    assert_eq!(events, vec![JoystickEventMessage {
        joystick: joystick.panel,
        event: JoystickEvent::Move(Vec3::new(1.0, 0.0, 0.0)),
    }]);

    app.release_mouse();
    app.update();
    let events = drain_events(&mut app);
    assert_eq!(events[0].event, JoystickEvent::TouchEnd);
}

#[test]
fn dynamic_joystick_moves_its_area() {
    let mut app = test_app(true);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default().with_dynamic_thumb(true));
    app.update();

    // 20 pixels in from the panel's top-left corner
    app.send_touch(1, TouchPhase::Started, Vec2::new(20.0, 420.0));
    app.update();

    assert_eq!(
        position_of(&app, joystick.area),
        (Val::Px(-30.0), Val::Px(-30.0))
    );
    assert_eq!(
        position_of(&app, joystick.thumb),
        (Val::Px(40.0), Val::Px(40.0))
    );
}

#[test]
fn disabling_a_held_joystick_releases_it() {
    let mut app = test_app(true);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default());
    app.update();

    app.send_touch(3, TouchPhase::Started, Vec2::new(120.0, 500.0));
    app.update();
    drain_events(&mut app);

    app.world_mut()
        .get_mut::<VirtualJoystickNode>(joystick.panel)
        .unwrap()
        .enabled = false;
    app.update();

    let events = drain_events(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, JoystickEvent::TouchEnd);

    // Further movement is ignored while disabled
    app.send_touch(3, TouchPhase::Moved, Vec2::new(150.0, 500.0));
    app.update();
    assert!(drain_events(&mut app).is_empty());
}

#[test]
fn two_joysticks_take_one_finger_each() {
    let mut app = test_app(true);
    let left = spawn_joystick(&mut app, JoystickConfig::default());
    let right = spawn_joystick(&mut app, JoystickConfig::default());
    app.world_mut()
        .get_mut::<JoystickLayout>(right.panel)
        .unwrap()
        .screen_rect = Rect::new(600.0, 400.0, 800.0, 600.0);
    app.update();

    app.send_touch(0, TouchPhase::Started, Vec2::new(100.0, 500.0));
    app.send_touch(1, TouchPhase::Started, Vec2::new(700.0, 500.0));
    app.update();

    let starts: Vec<Entity> = drain_events(&mut app)
        .into_iter()
        .filter(|message| message.event == JoystickEvent::TouchStart)
        .map(|message| message.joystick)
        .collect();
    assert_eq!(starts.len(), 2);
    assert!(starts.contains(&left.panel));
    assert!(starts.contains(&right.panel));

    let owner = |app: &App, panel| {
        app.world()
            .get::<VirtualJoystick>(panel)
            .unwrap()
            .session()
            .owner()
    };
    assert_eq!(owner(&app, left.panel), Some(PointerId::Touch(0)));
    assert_eq!(owner(&app, right.panel), Some(PointerId::Touch(1)));
}

#[test]
fn touch_drag_on_a_high_dpi_window() {
    // 800x600 logical pixels
    let resolution = WindowResolution::new(1600.0, 1200.0).with_scale_factor_override(2.0);
    let mut app = test_app_with_resolution(true, resolution);
    let joystick = spawn_joystick(&mut app, JoystickConfig::default());

    // The same bottom-left panel, now measured in physical pixels
    app.world_mut()
        .get_mut::<JoystickLayout>(joystick.panel)
        .unwrap()
        .screen_rect = Rect::new(0.0, 800.0, 400.0, 1200.0);
    app.update();

    // Window positions are logical, so the center of the area has not moved
    app.send_touch(2, TouchPhase::Started, Vec2::new(100.0, 500.0));
    app.update();
    let events = drain_events(&mut app);
    assert_eq!(events[0].event, JoystickEvent::TouchStart);
    assert_eq!(events[1].event, JoystickEvent::Move(Vec3::ZERO));

    app.send_touch(2, TouchPhase::Moved, Vec2::new(100.0, 455.0));
    app.update();
    let events = drain_events(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, JoystickEvent::Move(Vec3::new(0.0, 0.5, 0.0)));
    assert_eq!(
        position_of(&app, joystick.thumb),
        (Val::Px(40.0), Val::Px(-5.0))
    );

    app.send_touch(2, TouchPhase::Ended, Vec2::new(100.0, 455.0));
    app.update();
    let events = drain_events(&mut app);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, JoystickEvent::TouchEnd);

    // The top-left corner of the window, mirroring the panel
    app.send_touch(3, TouchPhase::Started, Vec2::new(100.0, 100.0));
    app.update();
    assert!(drain_events(&mut app).is_empty());
}

#[test]
fn ui_layout_is_scaled_into_device_space() {
    let resolution = WindowResolution::new(1600.0, 1200.0).with_scale_factor_override(2.0);
    let mut app = test_app_with_resolution(true, resolution);
    app.insert_resource(UiScale(2.0));

    // Nodes that were never laid out have no size, so their rects collapse onto their translation
    let world = app.world_mut();
    let thumb = world
        .spawn((
            Node::default(),
            GlobalTransform::from_translation(Vec3::new(160.0, 530.0, 0.0)),
            Style::default(),
        ))
        .id();
    let area = world
        .spawn((
            Node::default(),
            GlobalTransform::from_translation(Vec3::new(150.0, 520.0, 0.0)),
            Style::default(),
        ))
        .id();
    let panel = world
        .spawn((
            Node::default(),
            GlobalTransform::from_translation(Vec3::new(100.0, 500.0, 0.0)),
            VirtualJoystickNode::new(JoystickConfig::default(), area, thumb),
        ))
        .id();

    app.update();
    app.update();

    let layout = app.world().get::<JoystickLayout>(panel).unwrap();
    assert_eq!(
        layout.screen_rect,
        Rect::from_corners(Vec2::new(200.0, 1000.0), Vec2::new(200.0, 1000.0))
    );
    assert_eq!(layout.area.position, Vec2::new(25.0, 10.0));
    assert_eq!(layout.thumb.position, Vec2::new(5.0, 5.0));
    assert_eq!(layout.area.size, Vec2::ZERO);
}

#[test]
fn widgets_without_style_still_report_events() {
    let mut app = test_app(true);
    let world = app.world_mut();
    let thumb = world.spawn_empty().id();
    let area = world.spawn_empty().id();
    let panel = world
        .spawn((
            VirtualJoystickNode::new(JoystickConfig::default(), area, thumb),
            JoystickLayout {
                screen_rect: Rect::new(0.0, 400.0, 200.0, 600.0),
                area: WidgetRect::new(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0)),
                thumb: WidgetRect::new(Vec2::new(40.0, 40.0), Vec2::new(20.0, 20.0)),
            },
        ))
        .id();
    app.update();
    assert!(app.world().get::<VirtualJoystick>(panel).is_some());

    app.send_touch(0, TouchPhase::Started, Vec2::new(100.0, 500.0));
    app.update();
    drain_events(&mut app);

    // Held for several frames, with nothing to move on screen
    for y in [490.0, 480.0, 470.0] {
        app.send_touch(0, TouchPhase::Moved, Vec2::new(100.0, y));
        app.update();
        assert_eq!(drain_events(&mut app).len(), 1);
    }

    assert!(app.world().get::<Style>(thumb).is_none());
    let layout = app.world().get::<JoystickLayout>(panel).unwrap();
    assert_eq!(layout.thumb.position, Vec2::new(40.0, 10.0));
}
