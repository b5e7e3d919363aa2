//! Integration tests for shoal-sim.

use glam::DVec3;

use shoal_agent::{AgentStore, AgentStoreBuilder, Boid, Steerable};
use shoal_core::{AgentId, AgentParams, CoreError, FlockConfig, Frame, ReplayRng, SimRng};
use shoal_spatial::{GridIndex, LinearIndex, NeighborIndex, RTreeIndex, is_neighbor};
use shoal_steer::{Neighbor, steer, wander_delta};

use crate::{FlockObserver, FrameStats, NoopObserver, Sim, SimBuilder, SimError, UpdateMode};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f64 = 1.0 / 60.0;

fn test_config(agent_count: usize) -> FlockConfig {
    FlockConfig { agent_count, seed: 7, ..FlockConfig::default() }
}

fn seeded(agent_count: usize) -> Sim<SimRng, LinearIndex> {
    let config = test_config(agent_count);
    let rng = SimRng::new(config.seed);
    SimBuilder::new(config, rng).build().unwrap()
}

fn boid(pos: DVec3, dir: DVec3) -> Boid {
    Boid::new(pos, dir, &AgentParams::default())
}

fn positions<R: shoal_core::RandomSource, I: NeighborIndex + Sync>(sim: &Sim<R, I>) -> Vec<DVec3> {
    sim.agents.iter().map(|(_, b)| b.position()).collect()
}

/// Counts every observer callback.
#[derive(Default)]
struct Counting {
    starts:    Vec<Frame>,
    ends:      Vec<FrameStats>,
    snapshots: Vec<Frame>,
    run_ends:  Vec<Frame>,
}

impl FlockObserver for Counting {
    fn on_frame_start(&mut self, frame: Frame) {
        self.starts.push(frame);
    }
    fn on_frame_end(&mut self, _frame: Frame, stats: &FrameStats) {
        self.ends.push(*stats);
    }
    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore) {
        assert!(!agents.is_empty());
        self.snapshots.push(frame);
    }
    fn on_run_end(&mut self, final_frame: Frame) {
        self.run_ends.push(final_frame);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn spawns_configured_count() {
        let sim = seeded(40);
        assert_eq!(sim.agents.count(), 40);
        assert_eq!(sim.index.len(), 40);
        assert_eq!(sim.frame(), Frame::ZERO);
        assert_eq!(sim.mode, UpdateMode::Sequential);
    }

    #[test]
    fn spawn_consumes_six_draws_per_agent() {
        let sim = SimBuilder::new(test_config(5), ReplayRng::constant(0.25))
            .build()
            .unwrap();
        assert_eq!(sim.rng.consumed(), 30);
    }

    #[test]
    fn supplied_agents_skip_spawning() {
        let store = AgentStore::from_boids(vec![
            boid(DVec3::ZERO, DVec3::X),
            boid(DVec3::new(5.0, 0.0, 0.0), DVec3::Z),
        ]);
        let sim = SimBuilder::new(test_config(2), ReplayRng::constant(0.5))
            .agents(store)
            .build()
            .unwrap();
        assert_eq!(sim.rng.consumed(), 0);
        assert_eq!(sim.agents.boids[1].position(), DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn agent_count_mismatch_errors() {
        let store = AgentStore::from_boids(vec![boid(DVec3::ZERO, DVec3::X)]);
        let result = SimBuilder::new(test_config(3), SimRng::new(1)).agents(store).build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 3, got: 1, .. })
        ));
    }

    #[test]
    fn non_empty_index_errors() {
        let mut index = LinearIndex::new();
        index.register(AgentId(0), DVec3::ZERO);
        let result = SimBuilder::new(test_config(3), SimRng::new(1)).index(index).build();
        assert!(matches!(result, Err(SimError::IndexNotEmpty(1))));
    }

    #[test]
    fn invalid_config_errors() {
        let config = FlockConfig { world_bound: -1.0, ..test_config(3) };
        let result = SimBuilder::new(config, SimRng::new(1)).build();
        assert!(matches!(
            result,
            Err(SimError::Config(CoreError::Config { field: "world_bound", .. }))
        ));
    }

    #[test]
    fn empty_flock_steps() {
        let mut sim = seeded(0);
        let stats = sim.step(DT, &mut NoopObserver).unwrap();
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.mean_neighbors(), 0.0);
        assert_eq!(sim.frame(), Frame(1));
    }
}

// ── Frame step ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn every_agent_moves_at_max_speed() {
        let mut sim = seeded(60);
        sim.run_frames(5, DT, &mut NoopObserver).unwrap();
        for (_, b) in sim.agents.iter() {
            assert!((b.velocity().length() - 10.0).abs() < 1e-9);
            assert!((b.direction().length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn clock_tracks_frames_and_time() {
        let mut sim = seeded(4);
        sim.run_frames(3, 0.5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_frame, Frame(3));
        assert!((sim.clock.elapsed_secs - 1.5).abs() < 1e-12);
    }

    #[test]
    fn negative_or_non_finite_dt_rejected() {
        let mut sim = seeded(4);
        let before = positions(&sim);
        for dt in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(sim.step(dt, &mut NoopObserver), Err(SimError::InvalidDelta(_))));
        }
        assert_eq!(sim.frame(), Frame::ZERO);
        assert_eq!(positions(&sim), before);
    }

    #[test]
    fn zero_dt_keeps_positions() {
        let mut sim = seeded(10);
        let before = positions(&sim);
        sim.step(0.0, &mut NoopObserver).unwrap();
        assert_eq!(positions(&sim), before);
        assert_eq!(sim.frame(), Frame(1));
    }

    #[test]
    fn agent_crossing_edge_wraps_and_index_follows() {
        let store = AgentStore::from_boids(vec![boid(DVec3::new(299.0, 0.0, 0.0), DVec3::X)]);
        let mut sim = SimBuilder::new(test_config(1), ReplayRng::constant(0.5))
            .agents(store)
            .index(GridIndex::new(15.0).unwrap())
            .build()
            .unwrap();

        let stats = sim.step(1.0, &mut NoopObserver).unwrap();
        assert_eq!(stats.wrapped, 1);

        let p = sim.agents.boids[0].position();
        assert_eq!(p.x, -300.0);

        let mut out = Vec::new();
        sim.index.query(&sim.agents, DVec3::new(-299.0, p.y, p.z), 5.0, &mut out);
        assert_eq!(out, vec![AgentId(0)]);
    }

    #[test]
    fn neighbor_links_counted() {
        let store = AgentStore::from_boids(vec![
            boid(DVec3::ZERO, DVec3::X),
            boid(DVec3::new(2.0, 0.0, 0.0), DVec3::X),
            boid(DVec3::new(200.0, 0.0, 0.0), DVec3::X),
        ]);
        let mut sim = SimBuilder::new(test_config(3), ReplayRng::constant(0.5))
            .agents(store)
            .build()
            .unwrap();
        let stats = sim.step(0.0, &mut NoopObserver).unwrap();
        assert_eq!(stats.neighbor_links, 2);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn callbacks_fire_once_per_frame() {
        let mut sim = seeded(8);
        let mut obs = Counting::default();
        sim.run_frames(4, DT, &mut obs).unwrap();

        assert_eq!(obs.starts, vec![Frame(0), Frame(1), Frame(2), Frame(3)]);
        assert_eq!(obs.ends.len(), 4);
        assert!(obs.ends.iter().all(|s| s.updated == 8));
        assert_eq!(obs.run_ends, vec![Frame(4)]);
    }

    #[test]
    fn snapshot_interval_respected() {
        let config = test_config(8);
        let mut sim = SimBuilder::new(config, SimRng::new(3))
            .snapshot_interval(3)
            .build()
            .unwrap();
        let mut obs = Counting::default();
        sim.run_frames(7, DT, &mut obs).unwrap();
        assert_eq!(obs.snapshots, vec![Frame(0), Frame(3), Frame(6)]);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut sim = SimBuilder::new(test_config(8), SimRng::new(3))
            .snapshot_interval(0)
            .build()
            .unwrap();
        let mut obs = Counting::default();
        sim.run_frames(5, DT, &mut obs).unwrap();
        assert!(obs.snapshots.is_empty());
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use super::*;

    fn run_with<I: NeighborIndex + Sync>(index: I, mode: UpdateMode, frames: u64) -> Vec<DVec3> {
        let config = FlockConfig { spawn_box_range: 40.0, ..test_config(120) };
        let rng = SimRng::new(config.seed);
        let mut sim = SimBuilder::new(config, rng).index(index).mode(mode).build().unwrap();
        sim.run_frames(frames, DT, &mut NoopObserver).unwrap();
        positions(&sim)
    }

    #[test]
    fn same_seed_same_trajectory() {
        let a = run_with(LinearIndex::new(), UpdateMode::Sequential, 30);
        let b = run_with(LinearIndex::new(), UpdateMode::Sequential, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_diverges() {
        let mut a = seeded(20);
        let config = FlockConfig { seed: 8, ..test_config(20) };
        let mut b = SimBuilder::new(config, SimRng::new(8)).build().unwrap();
        a.step(DT, &mut NoopObserver).unwrap();
        b.step(DT, &mut NoopObserver).unwrap();
        assert_ne!(positions(&a), positions(&b));
    }

    #[test]
    fn index_choice_does_not_change_trajectory() {
        let linear = run_with(LinearIndex::new(), UpdateMode::Sequential, 40);
        let grid = run_with(GridIndex::new(15.0).unwrap(), UpdateMode::Sequential, 40);
        let rtree = run_with(RTreeIndex::new(), UpdateMode::Sequential, 40);
        assert_eq!(linear, grid);
        assert_eq!(linear, rtree);
    }

    #[test]
    fn index_choice_does_not_change_snapshot_trajectory() {
        let linear = run_with(LinearIndex::new(), UpdateMode::Snapshot, 20);
        let grid = run_with(GridIndex::new(7.5).unwrap(), UpdateMode::Snapshot, 20);
        assert_eq!(linear, grid);
    }
}

// ── Update modes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod mode_tests {
    use super::*;

    fn pair() -> AgentStore {
        AgentStore::from_boids(vec![
            boid(DVec3::ZERO, DVec3::X),
            boid(DVec3::new(4.0, 0.0, 1.0), DVec3::Z),
        ])
    }

    fn build(mode: UpdateMode) -> Sim<ReplayRng, LinearIndex> {
        SimBuilder::new(test_config(2), ReplayRng::new([0.1, 0.7, 0.4]))
            .agents(pair())
            .mode(mode)
            .build()
            .unwrap()
    }

    #[test]
    fn both_modes_consume_one_draw_per_agent() {
        for mode in [UpdateMode::Sequential, UpdateMode::Snapshot] {
            let mut sim = build(mode);
            sim.run_frames(3, DT, &mut NoopObserver).unwrap();
            assert_eq!(sim.rng.consumed(), 6, "{mode}");
        }
    }

    #[test]
    fn snapshot_steers_against_frame_start_state() {
        let mut sim = build(UpdateMode::Snapshot);
        sim.step(DT, &mut NoopObserver).unwrap();

        // Agent 1 must have seen agent 0 where it stood before the frame.
        let start = pair();
        let params = sim.config.steering;
        let tau = std::f64::consts::TAU;
        let delta = params.wander_step * (0.7 * (tau - -tau) + -tau);
        let locals: Vec<Neighbor> = vec![start.boids[0].as_neighbor()];
        let expected = steer(&start.boids[1].kinematics, &locals, delta, DT, &params);

        let got = &sim.agents.boids[1];
        assert!(got.velocity().distance(expected.velocity) < 1e-12);
    }

    #[test]
    fn sequential_sees_moved_neighbors() {
        let mut seq = build(UpdateMode::Sequential);
        let mut snap = build(UpdateMode::Snapshot);
        seq.step(DT, &mut NoopObserver).unwrap();
        snap.step(DT, &mut NoopObserver).unwrap();

        // Agent 0 goes first, so both modes agree on it.
        assert_eq!(seq.agents.boids[0], snap.agents.boids[0]);
        assert_ne!(seq.agents.boids[1].position(), snap.agents.boids[1].position());
    }

    #[test]
    fn single_agent_modes_agree() {
        let store = || AgentStore::from_boids(vec![boid(DVec3::new(1.0, 2.0, 3.0), DVec3::Z)]);
        let run = |mode| {
            let mut sim = SimBuilder::new(test_config(1), SimRng::new(11))
                .agents(store())
                .mode(mode)
                .build()
                .unwrap();
            sim.run_frames(10, DT, &mut NoopObserver).unwrap();
            positions(&sim)
        };
        assert_eq!(run(UpdateMode::Sequential), run(UpdateMode::Snapshot));
    }

    #[test]
    fn spawned_store_matches_builder_spawn() {
        let config = test_config(6);
        let direct = AgentStoreBuilder::new(&config).spawn(&mut SimRng::new(config.seed));
        let sim = SimBuilder::new(config.clone(), SimRng::new(config.seed)).build().unwrap();
        assert_eq!(sim.agents.boids, direct.boids);
    }
}

// ── Snapshot compute ──────────────────────────────────────────────────────────

/// Step a snapshot-mode flock of `n` once and check every agent against a
/// single-threaded recomputation from the frame-start state.
fn assert_snapshot_matches_frozen_recompute<I: NeighborIndex + Sync>(n: usize, index: I) {
    let config = FlockConfig { spawn_box_range: 25.0, ..test_config(n) };
    let draws: Vec<f64> = (0..7 * n).map(|k| (k as f64 * 0.618_034) % 1.0).collect();
    let mut sim = SimBuilder::new(config, ReplayRng::new(draws))
        .index(index)
        .mode(UpdateMode::Snapshot)
        .build()
        .unwrap();

    let start = sim.agents.clone();
    let mut rng = sim.rng.clone();
    let params = sim.config.steering;
    let bound = sim.config.world_bound;

    sim.step(DT, &mut NoopObserver).unwrap();

    let mut views = Vec::new();
    for (id, before) in start.iter() {
        let delta = wander_delta(&mut rng, &params);
        let ids: Vec<AgentId> = start
            .iter()
            .filter(|(_, other)| is_neighbor(before.position(), other.position(), before.radius()))
            .map(|(j, _)| j)
            .collect();
        start.neighbors_into(&ids, &mut views);

        let outcome = steer(&before.kinematics, &views, delta, DT, &params);
        let mut expected = before.clone();
        expected.apply(&outcome, DT);
        expected.check_bounds(bound);

        assert_eq!(sim.agents.boids[id.index()], expected, "{id}");
    }
}

#[cfg(test)]
mod snapshot_compute_tests {
    use super::*;

    #[test]
    fn matches_frozen_recompute() {
        assert_snapshot_matches_frozen_recompute(150, LinearIndex::new());
    }

    #[test]
    fn matches_frozen_recompute_on_grid() {
        assert_snapshot_matches_frozen_recompute(150, GridIndex::new(15.0).unwrap());
    }
}

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use super::*;

    /// Large enough that rayon splits the work across threads.
    #[test]
    fn rayon_compute_is_bit_identical_to_serial_reference() {
        assert_snapshot_matches_frozen_recompute(2_000, GridIndex::new(15.0).unwrap());
    }

    #[test]
    fn rayon_runs_are_reproducible() {
        let run = || {
            let config = FlockConfig { spawn_box_range: 40.0, ..test_config(1_500) };
            let mut sim = SimBuilder::new(config.clone(), SimRng::new(config.seed))
                .index(RTreeIndex::new())
                .mode(UpdateMode::Snapshot)
                .build()
                .unwrap();
            sim.run_frames(10, DT, &mut NoopObserver).unwrap();
            positions(&sim)
        };
        assert_eq!(run(), run());
    }
}
