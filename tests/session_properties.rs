//! End-to-end behaviour of the public session API

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use pursuit_arena::sim::{
    ObstacleField, ObstacleKind, PlacementRequest, Rect, find_free_position, predict_target,
    step_toward,
};
use pursuit_arena::{Session, SessionError, SessionPhase, TickInput, Tuning, tick};

const FRAME_MS: u64 = 16;

fn pairwise_clear(session: &Session) -> bool {
    let tuning = session.tuning();
    let blocks: Vec<Rect> = session.obstacles().blocks().map(|o| o.rect).collect();
    let all: Vec<Rect> = session.obstacles().iter().map(|o| o.rect).collect();

    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            if !a.clear_of(b, tuning.block_clearance) {
                return false;
            }
        }
    }
    let pursuers: Vec<Rect> = session.pursuers().iter().map(|p| p.rect()).collect();
    for (i, p) in pursuers.iter().enumerate() {
        if all.iter().any(|o| !p.clear_of(o, tuning.pursuer_clearance)) {
            return false;
        }
        if pursuers[i + 1..].iter().any(|q| !p.clear_of(q, tuning.pursuer_clearance)) {
            return false;
        }
    }
    true
}

#[test]
fn placement_keeps_out_of_expanded_obstacle_footprint() {
    let mut field = ObstacleField::borders(800.0, 600.0, 10.0);
    field.add_block(Rect::new(400.0, 300.0, 100.0, 100.0));
    let blocks: Vec<Rect> = field.blocks().map(|o| o.rect).collect();
    let footprint = Rect::new(320.0, 220.0, 260.0, 260.0);

    let request = PlacementRequest::new(Rect::new(0.0, 0.0, 800.0, 600.0), Vec2::splat(40.0), 100)
        .with_clearance(80.0);
    let mut rng = Pcg32::seed_from_u64(2024);
    for _ in 0..500 {
        if let Ok(pos) = find_free_position(&mut rng, &request, &blocks) {
            assert!(!Rect::square(pos, 40.0).expanded(80.0).intersects(&footprint));
        }
    }
}

#[test]
fn avoidance_finds_a_way_around_a_thin_wall() {
    let wall = Rect::new(2.0, -20.0, 6.0, 40.0);
    let next = step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, 16, |p| {
        Rect::square(p, 1.0).intersects(&wall)
    });
    assert_ne!(next, Vec2::ZERO);
}

#[test]
fn prediction_leads_and_clamps() {
    let arena = Vec2::new(800.0, 600.0);
    let scale = Tuning::default().prediction_scale();
    let lead = predict_target(Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0), arena, 40.0, scale);
    assert!(lead.x > 100.0);

    let clamped = predict_target(Vec2::new(750.0, 100.0), Vec2::new(5.0, 0.0), arena, 40.0, scale);
    assert_eq!(clamped.x, 760.0);
}

#[test]
fn escalation_over_a_long_run() {
    let mut session = Session::with_tuning(1280.0, 720.0, Tuning::default(), 31).unwrap();
    tick(&mut session, 0, &TickInput::default());
    assert_eq!(session.batch_size(), 1);
    tick(&mut session, 30_000, &TickInput::default());
    assert_eq!(session.batch_size(), 2);
    tick(&mut session, 60_000, &TickInput::default());
    assert_eq!(session.batch_size(), 3);
}

#[test]
fn reset_twice_is_idempotent() {
    let mut session = Session::with_tuning(1600.0, 900.0, Tuning::default(), 8).unwrap();
    // Stand still until caught or until the frame budget runs out
    for frame in 0..5_000 {
        if tick(&mut session, frame * FRAME_MS, &TickInput::default()).terminal {
            break;
        }
    }

    for _ in 0..2 {
        session.reset();
        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::Grace);
        assert_eq!(snap.batch_size, 1);
        assert!(!snap.terminal);
        assert!(!session.obstacles().intersects(&session.player().rect()));
        assert!(pairwise_clear(&session));
    }
}

#[test]
fn terminal_snapshots_are_frozen() {
    // No interior blocks: nothing can keep the pursuers away
    let tuning = Tuning {
        area_per_block: 1.0e9,
        ..Default::default()
    };
    let mut session = Session::with_tuning(1280.0, 720.0, tuning, 4).unwrap();
    let mut caught = None;
    for frame in 0..20_000 {
        let snap = tick(&mut session, frame * FRAME_MS, &TickInput::default());
        if snap.terminal {
            caught = Some((frame, snap));
            break;
        }
    }
    let (frame, snap) = caught.expect("stationary player should be caught");
    let run = TickInput {
        right: true,
        ..Default::default()
    };
    for later in 1..20 {
        let again = tick(&mut session, (frame + later) * FRAME_MS, &run);
        assert_eq!(again, snap);
    }
}

#[test]
fn obstacle_field_shape() {
    let session = Session::with_tuning(1920.0, 1080.0, Tuning::default(), 5).unwrap();
    let borders = session
        .obstacles()
        .iter()
        .filter(|o| o.kind == ObstacleKind::Border)
        .count();
    assert_eq!(borders, 4);
    assert!(session.obstacles().blocks().count() <= 25);
    assert!(session.obstacles().iter().all(|o| o.rect.width > 0.0 && o.rect.height > 0.0));
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(matches!(Session::new(-800.0, 600.0), Err(SessionError::InvalidArena { .. })));
    assert!(matches!(Session::new(800.0, 0.0), Err(SessionError::InvalidArena { .. })));
    assert!(matches!(Session::new(800.0, 30.0), Err(SessionError::ArenaTooSmall { .. })));
}

#[test]
fn snapshot_serializes() {
    let mut session = Session::with_tuning(800.0, 600.0, Tuning::default(), 6).unwrap();
    let snap = tick(&mut session, 0, &TickInput::default());
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Grace\""));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sessions_start_without_overlaps(
        seed in any::<u64>(),
        w in 400.0_f32..2000.0,
        h in 300.0_f32..1200.0,
    ) {
        let session = Session::with_tuning(w, h, Tuning::default(), seed).unwrap();
        prop_assert!(pairwise_clear(&session), "seed={seed} {w}x{h}");
        prop_assert!(!session.obstacles().intersects(&session.player().rect()));
        prop_assert_eq!(session.phase(), SessionPhase::Grace);
    }

    #[test]
    fn player_never_inside_obstacle(
        seed in any::<u64>(),
        moves in prop::collection::vec(0_u8..16, 1..300),
    ) {
        let mut session = Session::with_tuning(1280.0, 720.0, Tuning::default(), seed).unwrap();
        for (frame, bits) in moves.iter().enumerate() {
            let input = TickInput {
                up: bits & 1 != 0,
                down: bits & 2 != 0,
                left: bits & 4 != 0,
                right: bits & 8 != 0,
                restart: false,
            };
            let snap = tick(&mut session, frame as u64 * FRAME_MS, &input);
            prop_assert!(!session.obstacles().intersects(&Rect::square(snap.player, 40.0)));
        }
    }
}
