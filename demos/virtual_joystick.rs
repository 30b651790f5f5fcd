use bevy::prelude::*;
use leafwing_virtual_joystick::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // This plugin drives every `VirtualJoystickNode` from touch input,
        // or from the left mouse button on desktop
        .add_plugins(VirtualJoystickPlugin)
        .add_systems(Startup, (spawn_joystick, spawn_player))
        // Read the joystick's events in your systems!
        .add_systems(Update, steer)
        .add_systems(Update, move_player.after(steer))
        .run();
}

#[derive(Component, Default)]
struct Player {
    velocity: Vec2,
}

const PLAYER_SPEED: f32 = 300.0;

fn spawn_joystick(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    let thumb = commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Px(50.0),
                height: Val::Px(50.0),
                ..default()
            },
            background_color: Color::WHITE.into(),
            ..default()
        })
        .id();

    let area = commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Px(180.0),
                height: Val::Px(180.0),
                ..default()
            },
            background_color: Color::srgba(1.0, 1.0, 1.0, 0.2).into(),
            ..default()
        })
        .add_child(thumb)
        .id();

    // The left half of the screen grabs the joystick
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(50.0),
                    height: Val::Percent(100.0),
                    align_items: AlignItems::End,
                    padding: UiRect::all(Val::Px(40.0)),
                    ..default()
                },
                ..default()
            },
            VirtualJoystickNode::new(JoystickConfig::default(), area, thumb),
        ))
        .add_child(area);
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(0.3, 0.7, 0.9),
                custom_size: Some(Vec2::splat(40.0)),
                ..default()
            },
            ..default()
        },
        Player::default(),
    ));
}

fn steer(mut events: EventReader<JoystickEventMessage>, mut players: Query<&mut Player>) {
    for message in events.read() {
        let velocity = match message.event {
            JoystickEvent::TouchStart => continue,
            // Drag vectors point up the screen, like world space
            JoystickEvent::Move(drag) => drag.truncate() * PLAYER_SPEED,
            JoystickEvent::TouchEnd => Vec2::ZERO,
        };

        for mut player in players.iter_mut() {
            player.velocity = velocity;
        }
    }
}

fn move_player(time: Res<Time>, mut players: Query<(&Player, &mut Transform)>) {
    for (player, mut transform) in players.iter_mut() {
        transform.translation += player.velocity.extend(0.0) * time.delta_seconds();
    }
}
