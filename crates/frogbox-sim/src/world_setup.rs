//! Frog spawn factories for setting up a level.
//!
//! Builds the component bundle for each frog: a body and head collider, a
//! detonator for YellowBlack frogs, and a color-cycle timer with a random
//! starting offset.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use frogbox_behavior::profiles::get_profile;
use frogbox_core::components::*;
use frogbox_core::config::LevelConfig;
use frogbox_core::constants::HEAD_OFFSET_Y;
use frogbox_core::enums::{FrogClass, FrogColor};
use frogbox_core::types::{FrogId, Position};

use crate::field::{Field, FrogBundle};

/// Where and in which color to put a frog.
#[derive(Debug, Clone, Copy)]
pub struct FrogSpawn {
    pub color: FrogColor,
    pub position: Position,
}

impl FrogSpawn {
    pub fn new(color: FrogColor, x: f64, y: f64) -> Self {
        Self {
            color,
            position: Position::new(x, y),
        }
    }
}

/// Body circle at the origin plus a smaller head circle above it.
pub fn frog_colliders(config: &LevelConfig) -> Colliders {
    Colliders {
        circles: vec![
            CircleCollider {
                offset_x: 0.0,
                offset_y: 0.0,
                radius: config.body_radius,
            },
            CircleCollider {
                offset_x: 0.0,
                offset_y: HEAD_OFFSET_Y,
                radius: config.head_radius,
            },
        ],
    }
}

/// Spawn one frog. The session is not told; callers register the count.
pub fn spawn_frog(
    field: &mut Field,
    rng: &mut ChaCha8Rng,
    config: &LevelConfig,
    spawn: FrogSpawn,
) -> (Entity, FrogId) {
    let profile = get_profile(spawn.color, &config.cycle);
    let hold_secs = profile.roll_hold(rng);
    let elapsed_secs = profile.roll_initial_elapsed(rng, hold_secs);

    let detonator = (spawn.color.class() == FrogClass::YellowBlack).then_some(Detonator {
        radius: config.explosion_radius,
    });

    field.spawn(FrogBundle {
        color: spawn.color,
        position: spawn.position,
        colliders: frog_colliders(config),
        detonator,
        cycle: ColorCycle {
            elapsed_secs,
            hold_secs,
        },
    })
}

/// Scatter the level's configured frogs over the field. Returns how many spawned.
pub fn spawn_level(field: &mut Field, rng: &mut ChaCha8Rng, config: &LevelConfig) -> u32 {
    let counts = [
        (FrogColor::Green, config.spawn.green),
        (FrogColor::Red, config.spawn.red),
        (FrogColor::Yellow, config.spawn.yellow),
        (FrogColor::Black, config.spawn.black),
    ];

    // Keep the whole frog, head included, inside the field.
    let inset_x = (config.field_half_width - config.body_radius).max(0.0);
    let inset_bottom = (config.field_half_height - config.body_radius).max(0.0);
    let inset_top = (config.field_half_height - HEAD_OFFSET_Y - config.head_radius).max(0.0);

    let mut spawned = 0;
    for (color, count) in counts {
        for _ in 0..count {
            let x = sample(rng, -inset_x, inset_x);
            let y = sample(rng, -inset_bottom, inset_top);
            spawn_frog(field, rng, config, FrogSpawn::new(color, x, y));
            spawned += 1;
        }
    }
    spawned
}

fn sample(rng: &mut ChaCha8Rng, low: f64, high: f64) -> f64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}
