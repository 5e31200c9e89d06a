use glam::Vec2;
use hero_core::*;

fn press(session: &mut Session, key_code: u32) {
    session.push_input(InputEvent::KeyDown { key_code });
    session.tick(0.0);
}

fn release(session: &mut Session, key_code: u32) {
    session.push_input(InputEvent::KeyUp { key_code });
    session.tick(0.0);
}

fn steps(session: &mut Session, n: usize) {
    for _ in 0..n {
        session.step();
    }
}

#[test]
fn held_attack_fires_once_per_cycle() {
    let mut session = Session::new(PlayerConfig::default(), SandboxHost::new());
    let attack = session.player().config().bindings.attack;
    press(&mut session, attack);

    // Two seconds; the attack clip runs 17 frames at 36 fps.
    steps(&mut session, 120);
    assert_eq!(session.player().state_kind(), StateKind::Attack);
    assert_eq!(session.host().projectiles.len(), 4);

    release(&mut session, attack);
    steps(&mut session, 1);
    assert_eq!(session.player().state_kind(), StateKind::Idle);
}

#[test]
fn first_frame_keyframe_fires_every_cycle() {
    let config = PlayerConfig {
        attack_keyframe: 0,
        ..Default::default()
    };
    let mut session = Session::new(config, SandboxHost::new());
    let attack = session.player().config().bindings.attack;
    press(&mut session, attack);

    // Passes start at 0 s and then every 17/36 s; five start within 2 s.
    steps(&mut session, 120);
    assert_eq!(session.host().projectiles.len(), 5);
}

#[test]
fn coarse_ticks_do_not_skip_attack_cycles() {
    let mut session = Session::new(PlayerConfig::default(), SandboxHost::new())
        .with_timestep(FixedTimestep::new(0.2));
    let attack = session.player().config().bindings.attack;
    press(&mut session, attack);

    // 7.2 clip frames per tick, so some polls jump straight over the wrap.
    // 19 ticks of playback cover 136 frames: keyframe 12 is passed 8 times.
    steps(&mut session, 20);
    assert_eq!(session.player().state_kind(), StateKind::Attack);
    assert_eq!(session.host().projectiles.len(), 8);
}

#[test]
fn jump_arc_lands_back_in_idle() {
    let host = SandboxHost::new().with_floor(100.0, 600.0);
    let mut session = Session::new(PlayerConfig::default(), host);
    let up = session.player().config().bindings.up;

    // Jumps are locked for the first 200 ms.
    steps(&mut session, 15);
    press(&mut session, up);
    steps(&mut session, 1);
    assert_eq!(session.player().state_kind(), StateKind::Jump);
    release(&mut session, up);

    steps(&mut session, 10);
    assert!(!session.host().on_ground);
    assert!(session.host().position.y < 100.0);

    steps(&mut session, 60);
    assert_eq!(session.player().state_kind(), StateKind::Idle);
    assert!(session.host().on_ground);
    assert!(session.host().played.contains(&AnimationKey::Land));
}

#[test]
fn invincibility_expires_through_timers() {
    let mut session = Session::new(PlayerConfig::default(), SandboxHost::new());
    steps(&mut session, 1);
    assert!(session.apply_damage(1));
    assert!(session.player().is_invincible());

    // 400 ms is 24 ticks at 60 Hz.
    steps(&mut session, 23);
    assert!(session.player().is_invincible());
    steps(&mut session, 2);
    assert!(!session.player().is_invincible());
    assert!(session.apply_damage(1));
    assert_eq!(session.player().health(), 1);
}

#[test]
fn death_sequence_ends_session() {
    let mut session = Session::new(PlayerConfig::default(), SandboxHost::new());
    steps(&mut session, 1);
    assert!(session.apply_effect(&Effect::health(-3)));
    assert_eq!(session.player().state_kind(), StateKind::Die);
    assert!(!session.is_over());

    // Death clip: 11 frames at 24 fps.
    steps(&mut session, 40);
    assert!(session.player().removal_requested());
    assert!(session.is_over());

    let frozen = session.now();
    steps(&mut session, 5);
    assert_eq!(session.now(), frozen);
}

#[test]
fn walking_off_the_edge_despawns() {
    let host = SandboxHost::new()
        .with_bounds(WorldBounds::new(8, 15, 16.0, 16.0))
        .with_position(Vec2::new(120.0, 100.0));
    let mut session = Session::new(PlayerConfig::default(), host);
    let right = session.player().config().bindings.right;
    press(&mut session, right);

    // 8 units to the edge at 140 units/s.
    steps(&mut session, 3);
    assert!(!session.player().is_dead());
    steps(&mut session, 5);
    assert!(session.player().is_dead());
    assert!(!session.player().is_dying());
    assert!(session.is_over());
}

#[test]
fn config_file_drives_session() {
    let config = PlayerConfig::from_json(r#"{ "max_health": 1, "bindings": { "attack": 90 } }"#)
        .unwrap();
    let mut session = Session::new(config, SandboxHost::new());
    press(&mut session, 90);
    steps(&mut session, 1);
    assert_eq!(session.player().state_kind(), StateKind::Attack);

    assert!(session.apply_damage(1));
    assert!(session.player().is_dying());
}
