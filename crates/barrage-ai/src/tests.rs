#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use barrage_core::constants::*;
    use barrage_core::enums::{BossArchetype, BulletKind, EnemyKind, MovementKind, PatternKind};
    use barrage_core::state::PatternHint;
    use barrage_core::geometry::{segment_intersects_rect, Aabb};
    use barrage_core::types::{PlayerId, SimTime};

    use crate::boss::apocalypse::Apocalypse;
    use crate::boss::dash::Dash;
    use crate::boss::gravity_well::{gravity_pull, GravityWell};
    use crate::boss::laser_barrage::LaserBarrage;
    use crate::boss::missiles::MissileLauncher;
    use crate::boss::spawner::MobSpawner;
    use crate::boss::spread::{fan, SpreadShot};
    use crate::boss::{Boss, Pattern, PatternContext, TargetInfo};
    use crate::formation::strategy::{MoveContext, MovementStrategy};
    use crate::formation::{Column, EnemyShip, Formation, FormationSpec, MemberHit};
    use crate::output::PatternOutput;
    use crate::profiles::get_profile;

    fn field() -> Aabb {
        Aabb::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)
    }

    fn target(id: u8, x: f32, y: f32) -> TargetInfo {
        TargetInfo {
            id: PlayerId(id),
            bounds: Aabb::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    fn spec(width: usize, height: usize, movements: Vec<MovementKind>) -> FormationSpec {
        FormationSpec {
            width,
            height,
            base_speed: 10.0,
            shooting_frequency_ms: 1_000,
            movements,
        }
    }

    // ---- Boss phases ----

    #[test]
    fn test_phase_is_monotonic_in_ratio() {
        for archetype in [BossArchetype::Sentinel, BossArchetype::Warden, BossArchetype::Overlord] {
            let profile = get_profile(archetype);
            assert_eq!(profile.phases.len(), profile.thresholds.len() + 1);
            let mut last = 0;
            for step in (0..=100).rev() {
                let ratio = step as f32 / 100.0;
                let phase = profile.phase_for_ratio(ratio);
                assert_eq!(phase, profile.phase_for_ratio(ratio), "phase must be pure");
                assert!(phase >= last, "{archetype:?}: phase dropped at ratio {ratio}");
                last = phase;
            }
            assert_eq!(profile.phase_for_ratio(1.0), 0);
            assert_eq!(profile.phase_for_ratio(0.0), profile.thresholds.len());
        }
    }

    #[test]
    fn test_warden_thresholds() {
        let profile = get_profile(BossArchetype::Warden);
        assert_eq!(profile.phase_for_ratio(0.61), 0);
        assert_eq!(profile.phase_for_ratio(0.6), 0);
        assert_eq!(profile.phase_for_ratio(0.59), 1);
        assert_eq!(profile.phase_for_ratio(0.29), 2);
    }

    #[test]
    fn test_boss_enters_then_starts_phase_zero() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut boss = Boss::new(900, BossArchetype::Sentinel, &field());
        assert!(boss.body.bottom() <= 0.0);

        let mut tick = 0;
        while boss.coordinator().is_entering() {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            boss.update(&mut ctx);
            assert!(tick < 200, "boss never finished entering");
        }
        assert!((boss.body.y - BOSS_HOVER_Y).abs() < 1e-4);
        assert_eq!(boss.coordinator().phase(), 0);
        assert_eq!(boss.coordinator().attack_kind(), Some(PatternKind::SpreadShot));
        assert_eq!(boss.coordinator().movement_kind(), Some(PatternKind::Horizontal));
    }

    #[test]
    fn test_boss_phase_follows_damage() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut boss = Boss::new(900, BossArchetype::Sentinel, &field());
        let mut tick = 0;
        while boss.coordinator().is_entering() {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            boss.update(&mut ctx);
        }

        assert!(!boss.apply_damage(30));
        assert_eq!(boss.phase(), 0, "exactly half health is still phase 0");
        assert!(!boss.apply_damage(1));
        assert_eq!(boss.phase(), 1);

        tick += 1;
        ctx.now_ms = SimTime::ms_at(tick);
        boss.update(&mut ctx);
        assert_eq!(boss.coordinator().phase(), 1);
        assert_eq!(boss.coordinator().movement_kind(), Some(PatternKind::Diagonal));

        assert!(boss.apply_damage(1_000));
        assert!(boss.is_defeated());
        assert!(!boss.apply_damage(1), "a defeated boss is not defeated twice");
        assert!(boss.coordinator().attack_kind().is_none());
    }

    #[test]
    fn test_phase_change_waits_for_dash() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut boss = Boss::new(900, BossArchetype::Warden, &field());
        // Phase 1 cycles Zigzag -> LaserBarrage -> Dash.
        boss.apply_damage(41);

        let mut tick = 0;
        let telegraphing = |boss: &Boss| {
            boss.coordinator()
                .active_attack()
                .and_then(|p| p.as_dash())
                .is_some_and(|d| d.is_showing_path())
        };
        while !telegraphing(&boss) {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            boss.update(&mut ctx);
            assert!(tick < 3_000, "dash never started telegraphing");
        }
        assert_eq!(boss.coordinator().phase(), 1);

        boss.apply_damage(30);
        assert_eq!(boss.phase(), 2);
        tick += 1;
        ctx.now_ms = SimTime::ms_at(tick);
        boss.update(&mut ctx);
        assert_eq!(boss.coordinator().phase(), 1, "swap deferred mid-telegraph");
        assert_eq!(boss.coordinator().pending_phase(), Some(2));

        while boss.coordinator().phase() != 2 {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            boss.update(&mut ctx);
            assert!(tick < 5_000, "pending phase never applied");
        }
        assert_eq!(boss.coordinator().pending_phase(), None);
    }

    #[test]
    fn test_interrupt_preempts_and_resumes_cycle() {
        let targets = [target(1, 100.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut boss = Boss::new(900, BossArchetype::Overlord, &field());
        boss.apply_damage(100);
        assert_eq!(boss.phase(), 2);

        let mut tick = 0;
        let mut saw_interrupt = false;
        let mut resumed = false;
        while tick < 60 * 40 {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            boss.update(&mut ctx);
            boss.drain_produced().for_each(drop);
            if boss.coordinator().is_interrupted() {
                saw_interrupt = true;
                assert_eq!(boss.coordinator().attack_kind(), Some(PatternKind::Apocalypse));
            } else if saw_interrupt {
                resumed = true;
                break;
            }
        }
        assert!(saw_interrupt, "apocalypse never pre-empted the cycle");
        assert!(resumed, "cycle never resumed after the sweep");
    }

    // ---- Dash ----

    #[test]
    fn test_dash_telegraph_then_dash_to_boundary() {
        let targets = [target(1, 384.0, 500.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut body = Aabb::new(352.0, 60.0, 96.0, 64.0);
        let mut dash = Dash::new();

        let mut tick = 0;
        while !dash.is_showing_path() {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            dash.update_movement(&mut body, &mut ctx);
            assert!(tick < 100, "never reached the staging point");
        }
        let telegraph_start = ctx.now_ms;
        assert!(!dash.is_interruptible());
        assert!(dash.hint(&body, ctx.now_ms).is_some());
        let parked = body;

        while !dash.is_dashing() {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            dash.update_movement(&mut body, &mut ctx);
            if ctx.now_ms < telegraph_start + DASH_TELEGRAPH_MS {
                assert!(dash.is_showing_path());
                assert_eq!(body, parked, "body holds still while telegraphing");
            }
            assert!(tick < 200);
        }
        assert!(ctx.now_ms >= telegraph_start + DASH_TELEGRAPH_MS);

        while !dash.is_dash_completed() {
            assert!(dash.is_dashing());
            assert!(body.bottom() < FIELD_HEIGHT);
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            dash.update_movement(&mut body, &mut ctx);
            assert!(tick < 400);
        }
        assert!((body.bottom() - FIELD_HEIGHT).abs() < 1e-3);
        assert!(dash.is_complete(ctx.now_ms));
    }

    #[test]
    fn test_dash_without_target_aborts() {
        let targets: [TargetInfo; 0] = [];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut body = Aabb::new(352.0, 72.0, 96.0, 64.0);
        let mut dash = Dash::new();
        for tick in 1..50 {
            ctx.now_ms = SimTime::ms_at(tick);
            dash.update_movement(&mut body, &mut ctx);
        }
        assert!(dash.is_complete(ctx.now_ms));
        assert!(!dash.is_dash_completed());
        assert!(dash.endpoint().is_none());
    }

    #[test]
    fn test_dash_endpoint_defaults_to_body() {
        let boss = Boss::new(900, BossArchetype::Warden, &field());
        let endpoint = boss.coordinator().dash_endpoint(&boss.body);
        assert_eq!(endpoint, boss.body.center());
    }

    // ---- Lasers ----

    #[test]
    fn test_laser_barrage_fires_quota_with_gaps() {
        let targets = [target(1, 200.0, 500.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let body = Aabb::new(352.0, 60.0, 96.0, 64.0);
        let mut barrage = LaserBarrage::new();
        let mut out = Vec::new();
        let mut fired_at = Vec::new();

        for tick in 0..600 {
            ctx.now_ms = SimTime::ms_at(tick);
            let before = out.len();
            barrage.attack(&body, &mut ctx, &mut out);
            if out.len() > before {
                fired_at.push(ctx.now_ms);
            }
        }

        assert_eq!(out.len(), BARRAGE_LASERS as usize);
        assert!(barrage.is_complete(ctx.now_ms));
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] >= BARRAGE_GAP_MS);
        }
        for output in &out {
            let PatternOutput::Laser(laser) = output else {
                panic!("barrage produced {output:?}");
            };
            assert_eq!(laser.target, PlayerId(1));
            assert!(segment_intersects_rect(&laser.segment, &targets[0].bounds));
            assert!(!field().contains_point(laser.segment.a), "origin must be off-screen");
        }
    }

    #[test]
    fn test_laser_barrage_without_targets_finishes() {
        let targets: [TargetInfo; 0] = [];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut barrage = LaserBarrage::new();
        let mut out = Vec::new();
        barrage.attack(&Aabb::default(), &mut ctx, &mut out);
        assert!(out.is_empty());
        assert!(barrage.is_complete(0));
    }

    // ---- Spread and missiles ----

    #[test]
    fn test_fan_is_symmetric_around_aim() {
        let aim = Vec2::new(0.6, 0.8);
        let shots: Vec<Vec2> = fan(aim, SPREAD_COUNT, SPREAD_ANGLE, BOSS_BULLET_SPEED).collect();
        assert_eq!(shots.len(), SPREAD_COUNT as usize);
        for v in &shots {
            assert!((v.length() - BOSS_BULLET_SPEED).abs() < 1e-4);
        }
        // Odd count: the middle bullet flies straight down the aim line.
        let middle = shots[shots.len() / 2];
        assert!((middle.normalize() - aim).length() < 1e-4);
        // Mirror pairs make equal angles on either side of the aim.
        for i in 0..shots.len() / 2 {
            let left = shots[i].angle_to(aim);
            let right = shots[shots.len() - 1 - i].angle_to(aim);
            assert!((left + right).abs() < 1e-4, "pair {i} is lopsided");
        }
        let outer = shots[0].angle_to(shots[shots.len() - 1]).abs();
        assert!((outer - SPREAD_ANGLE).abs() < 1e-4);
    }

    #[test]
    fn test_fan_single_bullet_follows_aim() {
        let shots: Vec<Vec2> = fan(Vec2::Y, 1, SPREAD_ANGLE, 2.0).collect();
        assert_eq!(shots.len(), 1);
        assert!((shots[0] - Vec2::new(0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_spread_shot_fires_fan_per_volley() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let body = Aabb::new(350.0, 60.0, 100.0, 60.0);
        let mut spread = SpreadShot::new();
        let mut out = Vec::new();
        spread.attack(&body, &mut ctx, &mut out);
        assert_eq!(out.len(), SPREAD_COUNT as usize);
        assert_eq!(spread.volleys_fired(), 1);
        assert!(out.iter().all(|o| matches!(o, PatternOutput::Bullet(_))));

        // The gate holds the next volley back.
        out.clear();
        ctx.now_ms = SPREAD_INTERVAL_MS - 1;
        spread.attack(&body, &mut ctx, &mut out);
        assert!(out.is_empty());
        assert!(!spread.is_complete(ctx.now_ms));
    }

    #[test]
    fn test_missile_volleys_then_complete() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let body = Aabb::new(350.0, 60.0, 100.0, 60.0);
        let mut launcher = MissileLauncher::new();
        let mut out = Vec::new();
        for volley in 0..MISSILE_VOLLEYS as u64 {
            ctx.now_ms = volley * MISSILE_GAP_MS;
            launcher.attack(&body, &mut ctx, &mut out);
            assert!(!launcher.is_complete(ctx.now_ms));
        }
        assert_eq!(out.len(), (MISSILE_VOLLEYS * MISSILE_PER_VOLLEY) as usize);
        for output in &out {
            let PatternOutput::Bullet(spec) = output else {
                panic!("launcher only emits bullets");
            };
            assert_eq!(spec.kind, BulletKind::Guided);
            assert_eq!(spec.lifetime_ms, Some(MISSILE_LIFETIME_MS));
            assert!((spec.origin.y - body.bottom()).abs() < 1e-4);
        }

        // No extra volley once the quota is spent.
        let last = (MISSILE_VOLLEYS as u64 - 1) * MISSILE_GAP_MS;
        ctx.now_ms = last + MISSILE_GAP_MS;
        out.clear();
        launcher.attack(&body, &mut ctx, &mut out);
        assert!(out.is_empty());
        assert!(launcher.is_complete(ctx.now_ms));
    }

    #[test]
    fn test_missile_launcher_idles_without_targets() {
        let targets: [TargetInfo; 0] = [];
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let mut launcher = MissileLauncher::new();
        let mut out = Vec::new();
        launcher.attack(&Aabb::new(350.0, 60.0, 100.0, 60.0), &mut ctx, &mut out);
        assert!(out.is_empty());
        assert!(launcher.is_complete(0));
    }

    // ---- Mob spawner ----

    #[test]
    fn test_mob_spawner_releases_waves_below_boss() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let body = Aabb::new(350.0, 60.0, 100.0, 60.0);
        let mut spawner = MobSpawner::new();
        let mut out = Vec::new();
        spawner.attack(&body, &mut ctx, &mut out);
        ctx.now_ms = MOB_GAP_MS - 1;
        spawner.attack(&body, &mut ctx, &mut out);
        assert_eq!(out.len(), 1, "second wave waits for the gap");

        for wave in 1..=MOB_WAVES as u64 + 1 {
            ctx.now_ms = wave * MOB_GAP_MS;
            spawner.attack(&body, &mut ctx, &mut out);
        }
        assert_eq!(out.len(), MOB_WAVES as usize);
        for output in &out {
            let PatternOutput::SpawnMobs { origin, count } = output else {
                panic!("spawner only releases mobs");
            };
            assert_eq!(*count, MOB_COUNT);
            assert!((origin.x - body.center().x).abs() < 1e-4);
            assert!((origin.y - body.bottom()).abs() < 1e-4);
        }
        assert!(spawner.is_complete(ctx.now_ms));
    }

    #[test]
    fn test_released_mobs_loop_vertically() {
        let field = field();
        let mut next_id = 10;
        let formation = Formation::mobs(3, Vec2::new(400.0, 120.0), MOB_COUNT, &mut next_id, &field);
        assert_eq!(formation.ship_count(), MOB_COUNT as usize);
        assert_eq!(next_id, 10 + MOB_COUNT);
        assert_eq!(formation.subgroups().len(), 1);
        assert_eq!(formation.subgroups()[0].strategy.kind(), MovementKind::VerticalLoop);
        assert!(formation.ships().all(|s| s.kind == EnemyKind::Mob));
    }

    // ---- Hazards ----

    #[test]
    fn test_gravity_well_center_and_outside() {
        let center = Vec2::new(400.0, 300.0);
        assert_eq!(gravity_pull(center, 160.0, 0.03, center), Vec2::ZERO);
        assert_eq!(gravity_pull(center, 160.0, 0.03, Vec2::new(400.0, 461.0)), Vec2::ZERO);
        let inside = gravity_pull(center, 160.0, 0.03, Vec2::new(400.0, 400.0));
        assert!(inside.y < 0.0, "pull points toward the center");
        assert!((inside.length() - 60.0 * 0.03).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_outline_ends_with_hazard_after_suspend() {
        let targets = [target(1, 384.0, 520.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ctx = PatternContext {
            now_ms: 0,
            field: field(),
            targets: &targets,
            rng: &mut rng,
        };
        let body = Aabb::new(350.0, 60.0, 100.0, 60.0);
        let mut well = GravityWell::new();
        let mut out = Vec::new();
        well.attack(&body, &mut ctx, &mut out);
        let [PatternOutput::BlackHole(spec)] = out.as_slice() else {
            panic!("expected one black hole");
        };
        assert_eq!(spec.duration_ms, GRAVITY_DURATION_MS);
        assert!(matches!(well.hint(&body, 0), Some(PatternHint::GravityOutline { .. })));

        // An interrupt holds the pattern for a while; the hazard keeps ticking.
        well.suspend(500);
        well.resume(3_500);
        let after = GRAVITY_DURATION_MS + 500;
        assert!(well.hint(&body, after).is_none());
        assert!(well.is_complete(after));
    }

    #[test]
    fn test_apocalypse_spares_safe_lane() {
        let field = field();
        let safe = target(1, 384.0, 500.0);
        let exposed = target(2, 84.0, 500.0);
        let targets = [safe, exposed];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ctx = PatternContext {
            now_ms: 0,
            field,
            targets: &targets,
            rng: &mut rng,
        };
        let mut sweep = Apocalypse::with_safe_lane(2, field, 0);
        let mut out = Vec::new();
        let mut tick = 0;
        while !sweep.is_complete(ctx.now_ms) {
            tick += 1;
            ctx.now_ms = SimTime::ms_at(tick);
            let before = out.len();
            sweep.attack(&Aabb::default(), &mut ctx, &mut out);
            if ctx.now_ms < APOCALYPSE_TELEGRAPH_MS {
                assert_eq!(out.len(), before, "no damage during the telegraph");
            }
            assert!(tick < 1_000);
        }

        let hits: Vec<PlayerId> = out
            .iter()
            .filter_map(|o| match o {
                PatternOutput::AreaDamage { target } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(hits, vec![PlayerId(2)]);
    }

    // ---- Formations ----

    #[test]
    fn test_formation_speed_scenario() {
        let mut next_id = 1;
        let mut formation = Formation::new(1, &spec(3, 3, vec![]), &mut next_id, &field(), 0);
        assert_eq!(formation.ship_count(), 9);
        assert_eq!(next_id, 10);
        assert!((formation.speed() - (FORMATION_MIN_SPEED + 10.0)).abs() < 1e-5);

        let ids: Vec<u32> = formation.ships().map(|s| s.id).collect();
        for (i, &id) in ids.iter().take(8).enumerate() {
            assert!(formation.destroy_member(id, 0).is_some());
            assert!(!formation.is_empty(), "empty after only {} destroys", i + 1);
        }
        let expected = FORMATION_MIN_SPEED + 10.0 * (1.0 + FORMATION_SPEED_SCALE * 8.0 / 9.0);
        assert!((formation.speed() - expected).abs() < 1e-4);
        assert_eq!(formation.ship_count(), 1);

        assert!(formation.destroy_member(ids[8], 0).is_some());
        assert!(formation.is_empty());
        assert!(formation.destroy_member(ids[8], 0).is_none(), "destroyed only once");
    }

    #[test]
    fn test_formation_bounds_track_survivors() {
        let mut next_id = 1;
        let mut formation = Formation::new(1, &spec(4, 2, vec![]), &mut next_id, &field(), 0);
        let full = formation.bounds();

        // Remove the whole right-most column.
        let right: Vec<u32> = formation
            .ships()
            .filter(|s| s.bounds.right() >= full.right() - 1e-3)
            .map(|s| s.id)
            .collect();
        assert_eq!(right.len(), 2);
        for id in right {
            formation.destroy_member(id, 0);
        }

        let expected = formation
            .ships()
            .map(|s| s.bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap();
        assert_eq!(formation.bounds(), expected);
        assert!(formation.width() < full.w);
        assert_eq!(formation.x(), full.x);

        // Remove a top-row ship from the left column: the top edge stays put
        // while other top-row ships survive.
        let top_left = formation
            .ships()
            .min_by(|a, b| (a.bounds.x + a.bounds.y).total_cmp(&(b.bounds.x + b.bounds.y)))
            .unwrap()
            .id;
        formation.destroy_member(top_left, 0);
        let expected = formation
            .ships()
            .map(|s| s.bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap();
        assert_eq!(formation.bounds(), expected);
        assert_eq!(formation.ship_count(), 5);
    }

    #[test]
    fn test_elite_needs_two_hits() {
        let mut next_id = 1;
        let mut formation = Formation::new(1, &spec(1, 3, vec![]), &mut next_id, &field(), 0);
        let elite = formation.ships().next().unwrap().id;
        assert!(matches!(formation.damage_member(elite, 1, 0), MemberHit::Damaged));
        assert!(matches!(formation.damage_member(elite, 1, 0), MemberHit::Destroyed(_)));
        assert!(matches!(formation.damage_member(elite, 1, 0), MemberHit::Missed));
    }

    #[test]
    fn test_subgroups_split_columns() {
        let mut next_id = 1;
        let movements = vec![MovementKind::SideToSide, MovementKind::Diagonal];
        let formation = Formation::new(1, &spec(5, 2, movements), &mut next_id, &field(), 0);
        let groups = formation.subgroups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].columns.len(), 3);
        assert_eq!(groups[1].columns.len(), 2);
        assert_eq!(groups[1].strategy.kind(), MovementKind::Diagonal);
    }

    #[test]
    fn test_interval_shrinks_with_losses() {
        let mut next_id = 1;
        let mut formation = Formation::new(1, &spec(4, 3, vec![]), &mut next_id, &field(), 0);
        assert_eq!(formation.interval(), FORMATION_BASE_INTERVAL);
        let ids: Vec<u32> = formation.ships().map(|s| s.id).collect();
        for &id in &ids[..11] {
            formation.destroy_member(id, 0);
        }
        assert_eq!(formation.interval(), FORMATION_MIN_INTERVAL);
    }

    #[test]
    fn test_strategies_ignore_empty_groups() {
        let ctx = MoveContext {
            speed: 10.0,
            now_ms: 0,
            field: field(),
            lower_limit: 420.0,
        };
        for kind in [
            MovementKind::SideToSide,
            MovementKind::Diagonal,
            MovementKind::PursuitLine,
            MovementKind::PursuitBezier,
            MovementKind::VerticalLoop,
            MovementKind::Zigzag,
        ] {
            let mut strategy = MovementStrategy::new(kind);
            let mut none: Vec<Column> = Vec::new();
            strategy.attach(&mut none, &field());
            strategy.update_movement(&mut none, &ctx);
            let mut hollow = vec![Column::default(), Column::default()];
            strategy.update_movement(&mut hollow, &ctx);
            assert!(hollow.iter().all(|c| c.ships.is_empty()));
        }
    }

    #[test]
    fn test_side_to_side_drops_at_edge() {
        let ctx = MoveContext {
            speed: 11.0,
            now_ms: 0,
            field: field(),
            lower_limit: 420.0,
        };
        let mut columns = vec![Column {
            ships: vec![EnemyShip::new(1, Default::default(), FIELD_WIDTH - 30.0, 100.0)],
        }];
        let mut strategy = MovementStrategy::new(MovementKind::SideToSide);
        strategy.update_movement(&mut columns, &ctx);
        let ship = &columns[0].ships[0];
        assert_eq!(ship.bounds.x, FIELD_WIDTH - 30.0);
        assert_eq!(ship.bounds.y, 100.0 + SIDE_TO_SIDE_DROP);
        strategy.update_movement(&mut columns, &ctx);
        assert_eq!(columns[0].ships[0].bounds.x, FIELD_WIDTH - 41.0);
    }

    #[test]
    fn test_diagonal_slows_after_loss() {
        let mut next_id = 1;
        let mut formation = Formation::new(
            1,
            &spec(3, 1, vec![MovementKind::Diagonal]),
            &mut next_id,
            &field(),
            0,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut shots = Vec::new();

        let start = formation.x();
        formation.update(16, &field(), &mut rng, &mut shots);
        let normal_step = formation.x() - start;
        assert!(normal_step > 0.0);

        // The right-most member, so the group's left edge stays put.
        let id = formation.ships().last().unwrap().id;
        formation.destroy_member(id, 16);
        let start = formation.x();
        formation.update(33, &field(), &mut rng, &mut shots);
        let slowed_step = formation.x() - start;
        let expected = formation.speed() * SMOOTH_SPEED_FACTOR * DIAGONAL_SLOW_FACTOR;
        assert!((slowed_step - expected).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_loop_respawns_after_delay() {
        let field = field();
        let ctx = |now_ms| MoveContext {
            speed: 1.0,
            now_ms,
            field,
            lower_limit: 420.0,
        };
        let mut columns = vec![Column {
            ships: vec![EnemyShip::new(1, Default::default(), 100.0, 20.0)],
        }];
        let mut strategy = MovementStrategy::new(MovementKind::VerticalLoop);
        strategy.attach(&mut columns, &field);

        let mut tick = 0;
        let mut slowed = false;
        while columns[0].ships[0].motion.respawn.is_none() {
            tick += 1;
            let before = columns[0].ships[0].bounds.y;
            strategy.update_movement(&mut columns, &ctx(SimTime::ms_at(tick)));
            let dy = columns[0].ships[0].bounds.y - before;
            if dy > 0.0 && (dy - LOOP_SLOW_SPEED).abs() < 1e-4 {
                slowed = true;
            }
            assert!(tick < 2_000);
        }
        assert!(slowed, "members slow down past the threshold");
        assert!(columns[0].ships[0].bounds.bottom() < field.top(), "parked off-screen");

        let parked_at = SimTime::ms_at(tick);
        while columns[0].ships[0].motion.respawn.is_some() {
            tick += 1;
            strategy.update_movement(&mut columns, &ctx(SimTime::ms_at(tick)));
            assert!(tick < 4_000);
        }
        assert!(SimTime::ms_at(tick) >= parked_at + LOOP_RESPAWN_MS);
        assert_eq!(columns[0].ships[0].bounds.y, 20.0);
        assert_eq!(columns[0].ships[0].bounds.x, 100.0);
    }

    #[test]
    fn test_pursuit_members_finish_and_restart() {
        let field = field();
        let mut next_id = 1;
        let mut formation = Formation::new(
            1,
            &spec(2, 1, vec![MovementKind::PursuitBezier]),
            &mut next_id,
            &field,
            0,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut shots = Vec::new();

        let entry: Vec<Vec2> = formation.ships().map(|s| s.bounds.center()).collect();
        assert!(entry[0].x < field.left(), "left member enters from the left");
        assert!(entry[1].x > field.right(), "right member enters from the right");

        let mut saw_on_screen = false;
        let mut restarted = false;
        for tick in 1..20_000 {
            formation.update(SimTime::ms_at(tick), &field, &mut rng, &mut shots);
            if formation.ships().any(|s| field.contains_rect(&s.bounds)) {
                saw_on_screen = true;
            }
            let MovementStrategy::Pursuit(pursuit) = &formation.subgroups()[0].strategy else {
                panic!("expected pursuit");
            };
            if pursuit.passes() > 0 {
                restarted = true;
                break;
            }
        }
        assert!(saw_on_screen);
        assert!(restarted, "pursuit never completed a pass");
        assert!(formation.ships().all(|s| !s.motion.finished && s.motion.t == 0.0));
    }
}
