//! Maze corridor demo
//!
//! Builds the corridor level from character data, instantiates it into a
//! scene and lets a wandering player and a patrolling enemy walk through
//! it while the collision grid keeps only nearby geometry registered.
//!
//! ```text
//! cargo run -p maze_demo -- [grid.toml | grid.ron]
//! RUST_LOG=collision_grid=debug cargo run -p maze_demo
//! ```

mod maze;

use std::f32::consts::PI;

use collision_grid::foundation::logging;
use collision_grid::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

const TICKS: u32 = 600;
const SEED: u64 = 0x6d61_7a65;

const CORRIDOR_COLUMNS: usize = 15;
const CORRIDOR_ROWS: usize = 55;
const WALL_LAYERS: usize = 3;
const COIN_EVERY: usize = 6;

/// Distance covered per tick
const WALK_SPEED: f32 = 0.35;
/// Actor origin height while standing on the floor
const STANDING_HEIGHT: f32 = -1.0;
const JUMP_TICKS: u32 = 14;
const JUMP_HEIGHT: f32 = 1.2;
/// Enemy is removed from the level after this tick
const ENEMY_LIFETIME: u32 = 400;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Random walker confined to the corridor
struct Wanderer {
    node: NodeId,
    position: Vec3,
    heading: f32,
    jump_remaining: u32,
    grounded: bool,
}

impl Wanderer {
    fn new(node: NodeId, position: Vec3) -> Self {
        Self {
            node,
            position,
            heading: 0.0,
            jump_remaining: 0,
            grounded: true,
        }
    }

    /// Advance one tick and return the new world position
    fn advance(&mut self, rng: &mut StdRng, min: Vec3, max: Vec3) -> Vec3 {
        self.heading += rng.gen_range(-0.4..0.4);
        let mut next = self.position + Vec3::new(self.heading.cos(), 0.0, self.heading.sin()) * WALK_SPEED;

        if next.x < min.x || next.x > max.x || next.z < min.z || next.z > max.z {
            self.heading += PI;
            next = self.position;
        }

        if self.jump_remaining == 0 && rng.gen_bool(0.02) {
            self.jump_remaining = JUMP_TICKS;
        }
        let lift = if self.jump_remaining > 0 {
            self.jump_remaining -= 1;
            let t = (JUMP_TICKS - self.jump_remaining) as f32 / JUMP_TICKS as f32;
            JUMP_HEIGHT * (PI * t).sin()
        } else {
            0.0
        };

        next.y = STANDING_HEIGHT + lift;
        self.position = next;
        next
    }
}

/// Enemy pacing back and forth along the corridor
struct Patrol {
    node: NodeId,
    position: Vec3,
    direction: f32,
}

impl Patrol {
    fn advance(&mut self, min_z: f32, max_z: f32) -> Vec3 {
        self.position.z += self.direction * WALK_SPEED * 1.5;
        if self.position.z < min_z || self.position.z > max_z {
            self.direction = -self.direction;
            self.position.z = self.position.z.clamp(min_z, max_z);
        }
        self.position
    }
}

fn main() -> Result<(), DemoError> {
    logging::init();

    let grid_config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading grid configuration from {}", path);
            GridConfig::load_from_file(&path)?
        }
        None => GridConfig::default(),
    };

    run(grid_config)
}

fn run(grid_config: GridConfig) -> Result<(), DemoError> {
    log::info!("Starting maze demo");

    // Build the level
    let map = maze::corridor(CORRIDOR_COLUMNS, CORRIDOR_ROWS, WALL_LAYERS, COIN_EVERY);
    let extent = map_extent(&map);
    let mut builder = maze::builder();
    let interior_min = builder.position_of(1, 0, 1, &extent);
    let interior_max = builder.position_of(extent.columns - 2, 0, extent.rows - 2, &extent);
    let level = builder.build(&map);
    log::info!("Level has {} objects", level.object_count());

    let mut scene = SceneTree::new();
    let objects = scene.create_node("objects");
    let map_root = scene.instantiate(Some(objects), level)?;

    let player_node = scene.create_child(objects, "player")?;
    let start = Vec3::new(0.0, STANDING_HEIGHT, interior_min.z + 2.0);
    scene.set_local_position(player_node, start)?;
    let mut player = Wanderer::new(player_node, start);

    let enemy_node = scene.create_child(objects, "enemy")?;
    let enemy_start = Vec3::new(interior_max.x - 2.0, STANDING_HEIGHT, interior_max.z);
    scene.set_local_position(enemy_node, enemy_start)?;
    let mut enemy = Some(Patrol {
        node: enemy_node,
        position: enemy_start,
        direction: -1.0,
    });

    // The physics world picks up every collider when the level spawns;
    // the grid's first step takes the static ones back out
    let mut broad_phase = BroadPhase::new();
    broad_phase.register_scene(&scene);
    log::info!("Broad phase starts with {} colliders", broad_phase.registered_count());

    let mut grid = CollisionGrid::with_config(grid_config, broad_phase)?.with_root(map_root);
    grid.register_dynamic(player.node);
    grid.register_dynamic(enemy_node);

    let mut rng = StdRng::seed_from_u64(SEED);
    let mut timer = TickTimer::new();
    let mut totals = StepReport::default();
    let mut grounded_ticks = 0u32;
    let mut landings = 0u32;

    for tick in 0..TICKS {
        let position = player.advance(&mut rng, interior_min, interior_max);
        scene.set_local_position(player.node, position)?;

        if let Some(patrol) = enemy.as_mut() {
            let position = patrol.advance(interior_min.z, interior_max.z);
            scene.set_local_position(patrol.node, position)?;
        }
        if tick == ENEMY_LIFETIME {
            if let Some(patrol) = enemy.take() {
                grid.unregister_dynamic(patrol.node);
                scene.despawn(patrol.node);
                log::info!("Tick {}: enemy removed", tick);
            }
        }

        let report = timer.measure(|| grid.step(&scene));
        totals.cells_entered += report.cells_entered;
        totals.cells_exited += report.cells_exited;
        totals.colliders_enabled += report.colliders_enabled;
        totals.colliders_disabled += report.colliders_disabled;

        // Ground check: the player's feet against registered ground colliders
        let feet = AABB::from_center_extents(position - Vec3::new(0.0, 0.25, 0.0), Vec3::new(0.2, 0.1, 0.2));
        let grounded = !grid
            .bridge()
            .query_overlaps(&scene, &feet, CollisionLayers::PLAYER, CollisionLayers::GROUND)
            .is_empty();
        if grounded {
            grounded_ticks += 1;
        }
        if grounded != player.grounded {
            if grounded {
                landings += 1;
            }
            log::debug!("Tick {}: player {} at {:?}", tick, if grounded { "landed" } else { "left the ground" }, position.as_slice());
            player.grounded = grounded;
        }
    }

    let metrics = grid.metrics();
    log::info!(
        "Static colliders: {} in {} cells, {} registered at the end",
        metrics.static_colliders,
        metrics.occupied_cells,
        metrics.registered_colliders
    );
    log::info!(
        "Transitions: {} cells entered, {} exited, {} colliders enabled, {} disabled",
        totals.cells_entered,
        totals.cells_exited,
        totals.colliders_enabled,
        totals.colliders_disabled
    );
    log::info!(
        "Player grounded for {}/{} ticks, landed {} times",
        grounded_ticks,
        TICKS,
        landings
    );
    log::info!(
        "Broad phase: {} registered, {} register / {} unregister calls",
        grid.bridge().registered_count(),
        grid.bridge().register_calls(),
        grid.bridge().unregister_calls()
    );
    log::info!(
        "Step cost: {:.2} us average, {:?} peak over {} steps",
        timer.average_micros(),
        timer.peak(),
        timer.samples()
    );

    Ok(())
}
