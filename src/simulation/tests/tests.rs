use super::*;
use crate::domain::config::PhysicsParams;
use crate::domain::particle::{MAX_LANES, PRT_PER_EFFECT};

const DT: f32 = 0.016;
const W: f32 = 800.0;
const H: f32 = 600.0;

fn seeded(lanes: usize, seed: u64) -> EffectSystem {
    EffectSystem::with_config(EngineConfig {
        lanes,
        seed: Some(seed),
        physics: PhysicsParams::default(),
    })
    .unwrap()
}

#[test]
fn lane_count_is_clamped() {
    assert_eq!(EffectSystem::new(0).lane_count(), 1);
    assert_eq!(EffectSystem::new(MAX_LANES + 10).lane_count(), MAX_LANES);
    assert_eq!(EffectSystem::new(5).config().lanes, 5);
}

#[test]
fn invalid_physics_is_rejected() {
    let config = EngineConfig {
        physics: PhysicsParams {
            drag: 2.0,
            ..PhysicsParams::default()
        },
        ..EngineConfig::with_lanes(2)
    };
    assert!(EffectSystem::with_config(config).is_err());
}

#[test]
fn fresh_system_renders_nothing() {
    let sys = EffectSystem::new(4);
    let snapshot = sys.get_render_buffer();
    assert_eq!(snapshot.buffer_id(), 0);
    assert_eq!(snapshot.effect_count(), 0);
    assert_eq!(snapshot.particle_count(), 0);
}

#[test]
fn admitted_burst_is_visible_after_one_update() {
    let sys = seeded(4, 1);
    sys.add_effect(100.0, 120.0);
    sys.update(DT, W, H);

    let snapshot = sys.get_render_buffer();
    assert_eq!(snapshot.effect_count(), 1);
    assert_eq!(snapshot.particle_count(), PRT_PER_EFFECT);
    for prt in snapshot.live_particles() {
        assert_eq!((prt.x, prt.y, prt.alpha), (100.0, 120.0, 1.0));
    }

    let stats = sys.get_tick_stats();
    assert_eq!(stats.tick(), 1);
    assert!(stats.spawn_admitted());
    assert_eq!(stats.effects_alive(), 1);
    assert_eq!(stats.particles_alive(), PRT_PER_EFFECT as u32);
}

#[test]
fn only_latest_spawn_request_survives() {
    let sys = seeded(2, 2);
    sys.add_effect(10.0, 10.0);
    sys.add_effect(20.0, 30.0);
    assert_eq!(sys.pending_spawn(), Some(SpawnRequest { x: 20.0, y: 30.0 }));

    sys.update(DT, W, H);
    assert_eq!(sys.pending_spawn(), None);

    let snapshot = sys.get_render_buffer();
    assert_eq!(snapshot.effect_count(), 1);
    let first = snapshot.live_particles().next().unwrap();
    assert_eq!((first.x, first.y), (20.0, 30.0));
}

#[test]
fn admission_targets_least_loaded_lane() {
    let sys = seeded(4, 3);
    sys.add_effect(400.0, 300.0);
    sys.update(DT, W, H);
    {
        let snapshot = sys.get_render_buffer();
        assert_eq!(snapshot.lane(0).used(), 1);
    }

    sys.add_effect(400.0, 300.0);
    sys.update(DT, W, H);

    let snapshot = sys.get_render_buffer();
    let used: Vec<usize> = snapshot.lanes().iter().map(|l| l.used()).collect();
    assert_eq!(used, vec![1, 1, 0, 0]);
}

#[test]
fn pinned_snapshot_is_never_overwritten() {
    let sys = seeded(3, 4);
    sys.add_effect(400.0, 300.0);
    sys.update(DT, W, H);

    let snapshot = sys.get_render_buffer();
    let pinned = snapshot.buffer_id();
    let mut before = Vec::new();
    snapshot.extract_points(&mut before);

    for _ in 0..10 {
        sys.add_effect(200.0, 200.0);
        sys.update(DT, W, H);
        let roles = sys.roles();
        assert_eq!(roles.render, Some(pinned));
        assert_ne!(roles.next, pinned);
    }

    let mut after = Vec::new();
    snapshot.extract_points(&mut after);
    assert_eq!(before, after);
    drop(snapshot);

    let latest = sys.get_render_buffer();
    assert_ne!(latest.buffer_id(), pinned);
    assert_eq!(latest.effect_count(), 11);
}

#[test]
fn same_seed_same_frames() {
    let a = seeded(4, 77);
    let b = seeded(4, 77);

    for tick in 0..120 {
        if tick % 10 == 0 {
            a.add_effect(400.0, 300.0);
            b.add_effect(400.0, 300.0);
        }
        a.update(DT * 4.0, W, H);
        b.update(DT * 4.0, W, H);
    }

    let (mut pa, mut pb) = (Vec::new(), Vec::new());
    a.get_render_buffer().extract_points(&mut pa);
    b.get_render_buffer().extract_points(&mut pb);
    assert!(!pa.is_empty());
    assert_eq!(pa, pb);
    assert_eq!(a.get_tick_stats().particles_alive(), b.get_tick_stats().particles_alive());
}

#[test]
fn stats_particle_count_matches_buffer() {
    let sys = seeded(4, 9);
    for tick in 0..200 {
        if tick % 5 == 0 {
            sys.add_effect(400.0, 100.0 + (tick % 300) as f32);
        }
        sys.update(DT * 2.0, W, H);

        let stats = sys.get_tick_stats();
        let snapshot = sys.get_render_buffer();
        assert_eq!(stats.particles_alive() as usize, snapshot.particle_count());
        assert_eq!(stats.effects_alive() as usize, snapshot.effect_count());
    }
}

#[test]
fn timings_only_when_perf_enabled() {
    let sys = seeded(2, 5);
    sys.update(DT, W, H);
    let stats = sys.get_tick_stats();
    assert_eq!(stats.tick_ms(), 0.0);
    assert_eq!(stats.lanes_ms(), 0.0);

    sys.enable_perf_metrics(true);
    assert!(sys.perf_metrics_enabled());
    sys.update(DT, W, H);
    let stats = sys.get_tick_stats();
    assert!(stats.tick_ms() >= stats.lanes_ms());
    assert!(stats.lanes_ms() >= 0.0);
    assert!(stats.to_json().contains("\"tickMs\""));
}

#[test]
fn single_lane_needs_no_pool() {
    let sys = EffectSystem::new(1);
    assert!(!sys.scheduler.has_dedicated_pool());
    sys.add_effect(1.0, 1.0);
    sys.update(DT, W, H);
    assert_eq!(sys.get_render_buffer().effect_count(), 1);
}

#[test]
fn tick_counter_advances_per_update() {
    let sys = EffectSystem::new(2);
    for _ in 0..7 {
        sys.update(DT, W, H);
    }
    assert_eq!(sys.tick_count(), 7);
    assert!(sys.roles().is_consistent());
}

#[test]
fn superseded_snapshot_can_become_write_target() {
    let sys = EffectSystem::new(2);
    sys.update(DT, W, H);

    let stale = sys.get_render_buffer();
    sys.update(DT, W, H);
    let latest = sys.get_render_buffer();
    assert_ne!(latest.buffer_id(), stale.buffer_id());
    sys.update(DT, W, H);

    // Only the latest pin is protected; the stale one is up for writing.
    let roles = sys.roles();
    assert_eq!(roles.render, Some(latest.buffer_id()));
    assert_eq!(roles.next, stale.buffer_id());

    drop(stale);
    sys.update(DT, W, H);
    assert_eq!(sys.tick_count(), 4);
    assert_eq!(latest.effect_count(), 0);
}
