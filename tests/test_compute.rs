use flappy_cannon::compute::*;
use flappy_cannon::config::GameConfig;
use flappy_cannon::entities::*;
use flappy_cannon::geometry::Vec2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Default tuning with cannon spawning switched off.
fn quiet_config() -> GameConfig {
    GameConfig {
        cannon_spawn_chance: 0.0,
        ..GameConfig::default()
    }
}

fn bird() -> Bird {
    Bird { x: 100.0, y: 250.0, velocity_y: 0.0 }
}

fn pipe_at(x: f32) -> Pipe {
    Pipe { x, gap_top: 200.0, gap_size: 150.0, scored: false }
}

fn cannon_at(x: f32, y: f32, last_shot: f64) -> Cannon {
    Cannon { id: 7, x, y, facing: Facing::Left, last_shot }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── Bird physics ──────────────────────────────────────────────────────────────

#[test]
fn gravity_updates_velocity_then_position() {
    let c = GameConfig::default();
    let b = apply_gravity(&bird(), &c);
    assert_eq!(b.velocity_y, 0.5);
    assert_eq!(b.y, 250.5);
    assert_eq!(b.x, 100.0);
}

#[test]
fn gravity_adds_exactly_the_constant_each_frame() {
    let c = GameConfig::default();
    let mut b = Bird { velocity_y: -8.0, ..bird() };
    for _ in 0..40 {
        let next = apply_gravity(&b, &c);
        assert_eq!(next.velocity_y - b.velocity_y, c.gravity);
        assert_eq!(next.y, b.y + next.velocity_y);
        b = next;
    }
}

#[test]
fn flap_overrides_velocity_regardless_of_fall_speed() {
    let c = GameConfig::default();
    for v in [-20.0, -8.0, 0.0, 3.5, 12.0] {
        let b = flap(&Bird { velocity_y: v, ..bird() }, &c);
        assert_eq!(b.velocity_y, c.jump_force);
        assert_eq!(b.y, 250.0); // position only moves on the next frame
    }
}

#[test]
fn physics_does_not_mutate_original() {
    let c = GameConfig::default();
    let b = bird();
    let _ = apply_gravity(&b, &c);
    let _ = flap(&b, &c);
    assert_eq!(b, bird());
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

#[test]
fn spawned_pipe_gaps_stay_inside_the_field() {
    let c = GameConfig::default();
    for seed in 0..500 {
        let p = spawn_pipe(&c, &mut StdRng::seed_from_u64(seed));
        assert!(p.gap_top >= 0.0);
        assert!(p.gap_top >= c.gap_top_min());
        assert!(p.gap_top <= c.gap_top_max());
        assert!(p.gap_top + p.gap_size <= c.height);
        assert_eq!(p.x, c.width);
        assert!(!p.scored);
    }
}

#[test]
fn first_pipe_spawns_at_right_edge() {
    let c = GameConfig::default();
    let step = advance_pipes(&[], &bird(), &c, &mut seeded_rng());
    assert_eq!(step.pipes.len(), 1);
    assert_eq!(step.pipes[0].x, 800.0);
    assert_eq!(step.pipes[0].gap_size, 150.0);
    assert_eq!(step.newly_scored, 0);
}

#[test]
fn pipes_scroll_without_spawning_before_spacing() {
    let c = GameConfig::default();
    // 600 → 598, still right of 800 - 300
    let step = advance_pipes(&[pipe_at(600.0)], &bird(), &c, &mut seeded_rng());
    assert_eq!(step.pipes.len(), 1);
    assert_eq!(step.pipes[0].x, 598.0);
}

#[test]
fn next_pipe_spawns_once_last_passes_spacing() {
    let c = GameConfig::default();
    // 501 → 499 < 500
    let step = advance_pipes(&[pipe_at(501.0)], &bird(), &c, &mut seeded_rng());
    assert_eq!(step.pipes.len(), 2);
    assert_eq!(step.pipes[0].x, 499.0);
    assert_eq!(step.pipes[1].x, 800.0);
}

#[test]
fn pipes_retired_once_fully_off_screen() {
    let c = GameConfig::default();
    // -59 → -61 (gone), -57 → -59 (kept), 600 → 598 (no spawn)
    let step = advance_pipes(
        &[pipe_at(-59.0), pipe_at(-57.0), pipe_at(600.0)],
        &bird(),
        &c,
        &mut seeded_rng(),
    );
    let xs: Vec<f32> = step.pipes.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![-59.0, 598.0]);
}

#[test]
fn pipe_scores_once_bird_clears_trailing_edge() {
    let c = GameConfig::default();
    // 41 → 39, trailing edge 99 < bird.x 100
    let step = advance_pipes(&[pipe_at(41.0)], &bird(), &c, &mut seeded_rng());
    assert_eq!(step.newly_scored, 1);
    assert!(step.pipes[0].scored);

    // Same pipe next frame: already scored, contributes nothing
    let again = advance_pipes(&step.pipes, &bird(), &c, &mut seeded_rng());
    assert_eq!(again.newly_scored, 0);
    assert!(again.pipes[0].scored);
}

#[test]
fn pipe_not_scored_while_bird_still_alongside() {
    let c = GameConfig::default();
    // 43 → 41, trailing edge 101 > 100
    let step = advance_pipes(&[pipe_at(43.0)], &bird(), &c, &mut seeded_rng());
    assert_eq!(step.newly_scored, 0);
    assert!(!step.pipes[0].scored);
}

// ── Aiming & firing ───────────────────────────────────────────────────────────

#[test]
fn aim_velocity_is_unit_direction_times_speed() {
    let v = aim_velocity(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Facing::Left, 4.0);
    assert!(close(v.x, 2.4));
    assert!(close(v.y, 3.2));
    assert!(close(v.length(), 4.0));
}

#[test]
fn aim_velocity_falls_back_to_facing_when_target_coincides() {
    let p = Vec2::new(120.0, 80.0);
    let left = aim_velocity(p, p, Facing::Left, 4.0);
    assert_eq!(left, Vec2::new(-4.0, 0.0));
    let right = aim_velocity(p, p, Facing::Right, 4.0);
    assert_eq!(right, Vec2::new(4.0, 0.0));
    assert!(left.x.is_finite() && left.y.is_finite());
}

#[test]
fn cannon_holds_fire_until_interval_strictly_exceeded() {
    let c = GameConfig::default();
    let mut ids = EntityIds::default();
    let cannon = cannon_at(400.0, 237.5, 0.0);
    let (same, shot) = fire(&cannon, Vec2::new(100.0, 250.0), 2000.0, &mut ids, &c);
    assert!(shot.is_none());
    assert_eq!(same.last_shot, 0.0);
    assert_eq!(ids.projectile, 0);
}

#[test]
fn cannon_fires_from_center_toward_target() {
    let c = GameConfig::default();
    let mut ids = EntityIds::default();
    // centre = (420, 250), bird straight to the left
    let cannon = cannon_at(400.0, 237.5, 0.0);
    let (reloaded, shot) = fire(&cannon, Vec2::new(100.0, 250.0), 2000.5, &mut ids, &c);
    let p = shot.expect("cooldown elapsed");
    assert_eq!((p.x, p.y), (420.0, 250.0));
    assert_eq!((p.velocity_x, p.velocity_y), (-4.0, 0.0));
    assert_eq!(p.id, 0);
    assert_eq!(ids.projectile, 1);
    assert_eq!(reloaded.last_shot, 2000.5);
}

#[test]
fn cannons_scroll_left() {
    let c = quiet_config();
    let mut ids = EntityIds::default();
    let step = advance_cannons(
        &[cannon_at(700.0, 100.0, 0.0)],
        Vec2::new(100.0, 250.0),
        10.0,
        &mut ids,
        &c,
        &mut seeded_rng(),
    );
    assert_eq!(step.cannons.len(), 1);
    assert_eq!(step.cannons[0].x, 698.0);
    assert!(step.launched.is_empty());
}

#[test]
fn cannon_spawns_at_right_edge_when_roll_succeeds() {
    let c = GameConfig { cannon_spawn_chance: 1.0, ..GameConfig::default() };
    let mut ids = EntityIds::default();
    let step = advance_cannons(&[], Vec2::new(100.0, 250.0), 1234.0, &mut ids, &c, &mut seeded_rng());
    assert_eq!(step.cannons.len(), 1);
    let spawned = &step.cannons[0];
    assert_eq!(spawned.x, 800.0);
    assert!(spawned.y >= 50.0 && spawned.y < 450.0);
    assert_eq!(spawned.last_shot, 1234.0);
    assert_eq!(spawned.id, 0);
    assert_eq!(ids.cannon, 1);
}

#[test]
fn cannon_spawn_respects_spacing() {
    let c = GameConfig { cannon_spawn_chance: 1.0, ..GameConfig::default() };
    let target = Vec2::new(100.0, 250.0);

    // 700 → 698, not yet left of 800 - 200
    let mut ids = EntityIds::default();
    let blocked = advance_cannons(&[cannon_at(700.0, 100.0, 0.0)], target, 0.0, &mut ids, &c, &mut seeded_rng());
    assert_eq!(blocked.cannons.len(), 1);

    // 601 → 599
    let mut ids = EntityIds::default();
    let open = advance_cannons(&[cannon_at(601.0, 100.0, 0.0)], target, 0.0, &mut ids, &c, &mut seeded_rng());
    assert_eq!(open.cannons.len(), 2);
    assert_eq!(open.cannons[1].x, 800.0);
}

#[test]
fn retiring_cannon_still_gets_its_last_shot() {
    let c = quiet_config();
    let mut ids = EntityIds::default();
    // -49 → -51, past the 50-unit margin
    let step = advance_cannons(
        &[cannon_at(-49.0, 100.0, 0.0)],
        Vec2::new(100.0, 250.0),
        5000.0,
        &mut ids,
        &c,
        &mut seeded_rng(),
    );
    assert!(step.cannons.is_empty());
    assert_eq!(step.launched.len(), 1);
}

#[test]
fn spawn_roll_of_zero_never_spawns() {
    let c = quiet_config();
    let mut rng = seeded_rng();
    let mut ids = EntityIds::default();
    for frame in 0..1000 {
        let step = advance_cannons(&[], Vec2::new(100.0, 250.0), frame as f64, &mut ids, &c, &mut rng);
        assert!(step.cannons.is_empty());
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

fn projectile(x: f32, y: f32, vx: f32, vy: f32) -> Projectile {
    Projectile { id: 1, x, y, velocity_x: vx, velocity_y: vy }
}

#[test]
fn projectiles_move_in_straight_lines() {
    let c = GameConfig::default();
    let moved = advance_projectiles(&[projectile(400.0, 200.0, -3.0, 1.5)], &c);
    assert_eq!(moved.len(), 1);
    assert_eq!((moved[0].x, moved[0].y), (397.0, 201.5));
    // velocity is frozen at launch
    assert_eq!((moved[0].velocity_x, moved[0].velocity_y), (-3.0, 1.5));
}

#[test]
fn projectiles_retired_outside_margin() {
    let c = GameConfig::default();
    let moved = advance_projectiles(
        &[
            projectile(-28.0, 200.0, -4.0, 0.0), // → -32, gone
            projectile(799.0, 250.0, 4.0, 0.0),  // → 803, kept
            projectile(300.0, 528.0, 0.0, 4.0),  // → 532, gone
            projectile(300.0, -26.0, 0.0, -2.0), // → -28, kept
        ],
        &c,
    );
    let xs: Vec<f32> = moved.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![803.0, 300.0]);
}
