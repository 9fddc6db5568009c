//! Player movement integration
//!
//! Explicit Euler at a fixed step. Dashes are flat: vertical velocity is held
//! at zero and gravity is skipped for the whole dash window. While dashing,
//! run input is ignored and horizontal velocity converges on the dash speed.
//! Holding down adds fast-drop acceleration outside a dash.

use super::state::Player;
use super::tick::TickInput;
use crate::config::SimConfig;

/// What the integrator consumed this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Motion {
    pub jumped: bool,
    pub dash_started: bool,
    pub dash_ended: bool,
}

/// Advance velocity, dash timers and position by one step
pub fn integrate(player: &mut Player, config: &SimConfig, input: &TickInput, dt: f32) -> Motion {
    let mut motion = Motion::default();

    let dir = match (input.left, input.right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    // Direction is locked for the length of a dash
    if dir != 0.0 && !player.is_dashing() {
        player.facing = dir;
    }

    if input.dash && player.dash_ready() {
        player.dash_timer = config.dash_duration;
        player.dash_cooldown = config.dash_cooldown;
        player.vel.y = 0.0;
        motion.dash_started = true;
        log::trace!("Dash toward {}", player.facing);
    }

    // Not mid-dash
    if input.jump && player.on_ground && !player.is_dashing() {
        player.vel.y = config.jump_impulse;
        player.on_ground = false;
        motion.jumped = true;
    }

    if player.is_dashing() {
        let target = player.facing * config.dash_velocity();
        player.vel.x += (target - player.vel.x) * config.dash_blend;
        player.vel.y = 0.0;

        player.dash_timer -= dt;
        if player.dash_timer <= 0.0 {
            player.dash_timer = 0.0;
            motion.dash_ended = true;
        }
    } else {
        if dir != 0.0 {
            player.vel.x = dir * config.move_speed;
        } else {
            player.vel.x *= config.release_damping.powf(dt);
        }

        let mut accel = config.gravity;
        if input.down {
            accel += config.fast_drop_accel;
        }
        player.vel.y = (player.vel.y + accel * dt).min(config.max_fall_speed);
        if player.dash_cooldown > 0.0 {
            player.dash_cooldown = (player.dash_cooldown - dt).max(0.0);
        }
    }

    player.pos += player.vel * dt;

    motion
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player() -> Player {
        Player::new(Vec2::new(120.0, 100.0), Vec2::new(48.0, 56.0))
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_right_and_left() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();

        integrate(&mut p, &config, &right(), dt);
        assert_eq!(p.vel.x, config.move_speed);
        assert_eq!(p.facing, 1.0);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        integrate(&mut p, &config, &left, dt);
        assert_eq!(p.vel.x, -config.move_speed);
        assert_eq!(p.facing, -1.0);
    }

    #[test]
    fn test_opposing_input_releases() {
        let config = SimConfig {
            release_damping: 0.0,
            ..Default::default()
        };
        let mut p = player();
        p.vel.x = 200.0;
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        integrate(&mut p, &config, &both, config.fixed_dt());
        assert_eq!(p.vel.x, 0.0);
        // Facing is untouched by cancelled input
        assert_eq!(p.facing, 1.0);
    }

    #[test]
    fn test_release_damping_decays() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();
        p.vel.x = 260.0;
        integrate(&mut p, &config, &TickInput::default(), dt);
        let expected = 260.0 * config.release_damping.powf(dt);
        assert!((p.vel.x - expected).abs() < 1e-3);
        assert!(p.vel.x < 260.0 && p.vel.x > 0.0);
    }

    #[test]
    fn test_gravity_accumulates_to_terminal() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();
        integrate(&mut p, &config, &TickInput::default(), dt);
        assert!((p.vel.y - config.gravity * dt).abs() < 1e-4);

        for _ in 0..1000 {
            integrate(&mut p, &config, &TickInput::default(), dt);
        }
        assert_eq!(p.vel.y, config.max_fall_speed);
    }

    #[test]
    fn test_down_adds_fast_drop() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let down = TickInput {
            down: true,
            ..Default::default()
        };

        let mut normal = player();
        let mut dropping = player();
        integrate(&mut normal, &config, &TickInput::default(), dt);
        integrate(&mut dropping, &config, &down, dt);
        let extra = dropping.vel.y - normal.vel.y;
        assert!((extra - config.fast_drop_accel * dt).abs() < 1e-3);

        // Terminal speed still applies
        for _ in 0..1000 {
            integrate(&mut dropping, &config, &down, dt);
        }
        assert_eq!(dropping.vel.y, config.max_fall_speed);
    }

    #[test]
    fn test_down_ignored_while_dashing() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();
        let dash_down = TickInput {
            dash: true,
            down: true,
            ..Default::default()
        };
        integrate(&mut p, &config, &dash_down, dt);
        assert!(p.is_dashing());
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_jump_requires_ground() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        let mut airborne = player();
        let motion = integrate(&mut airborne, &config, &jump, dt);
        assert!(!motion.jumped);
        assert!(airborne.vel.y > 0.0);

        let mut grounded = player();
        grounded.on_ground = true;
        let motion = integrate(&mut grounded, &config, &jump, dt);
        assert!(motion.jumped);
        assert!(!grounded.on_ground);
        assert!((grounded.vel.y - (config.jump_impulse + config.gravity * dt)).abs() < 1e-3);
    }

    #[test]
    fn test_dash_is_flat_and_directed_by_facing() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();
        p.facing = -1.0;
        p.vel.y = 300.0;

        let dash = TickInput {
            dash: true,
            ..Default::default()
        };
        let motion = integrate(&mut p, &config, &dash, dt);
        assert!(motion.dash_started);
        assert_eq!(p.vel.y, 0.0);
        assert!(p.vel.x < 0.0);
        assert_eq!(p.dash_cooldown, config.dash_cooldown);

        let y = p.pos.y;
        while p.is_dashing() {
            integrate(&mut p, &config, &TickInput::default(), dt);
            assert_eq!(p.pos.y, y);
        }
    }

    #[test]
    fn test_dash_converges_toward_dash_velocity() {
        let config = SimConfig {
            dash_duration: 1.0,
            dash_distance: 700.0,
            ..Default::default()
        };
        let dt = config.fixed_dt();
        let mut p = player();
        let dash = TickInput {
            right: true,
            dash: true,
            ..Default::default()
        };
        integrate(&mut p, &config, &dash, dt);
        for _ in 0..60 {
            integrate(&mut p, &config, &right(), dt);
        }
        assert!((p.vel.x - 700.0).abs() < 1.0);
    }

    #[test]
    fn test_cooldown_exact_when_dash_ends() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();
        let dash = TickInput {
            dash: true,
            ..Default::default()
        };

        let mut motion = integrate(&mut p, &config, &dash, dt);
        while !motion.dash_ended {
            assert_eq!(p.dash_cooldown, config.dash_cooldown);
            motion = integrate(&mut p, &config, &TickInput::default(), dt);
        }
        assert_eq!(p.dash_cooldown, config.dash_cooldown);
        assert!(!p.is_dashing());

        let mut last = p.dash_cooldown;
        while p.dash_cooldown > 0.0 {
            integrate(&mut p, &config, &TickInput::default(), dt);
            assert!(p.dash_cooldown < last);
            last = p.dash_cooldown;
        }
        assert!(p.dash_ready());
    }

    #[test]
    fn test_dash_rejected_while_dashing_or_cooling() {
        let config = SimConfig::default();
        let dt = config.fixed_dt();
        let mut p = player();
        let dash = TickInput {
            dash: true,
            ..Default::default()
        };

        assert!(integrate(&mut p, &config, &dash, dt).dash_started);
        let timer = p.dash_timer;
        let motion = integrate(&mut p, &config, &dash, dt);
        assert!(!motion.dash_started);
        assert!(p.dash_timer < timer);

        while p.is_dashing() {
            integrate(&mut p, &config, &TickInput::default(), dt);
        }
        assert!(!integrate(&mut p, &config, &dash, dt).dash_started);
        assert_eq!(p.dash_timer, 0.0);
    }
}
