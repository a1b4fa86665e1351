//! Corridor map data and the object factories that build it

use collision_grid::prelude::*;

/// Walkable floor tile
pub const FLOOR: char = 'y';
/// Solid wall block
pub const WALL: char = 'w';
/// Collectible coin
pub const COIN: char = 'c';

/// Floor tiles are 4x4 but cells are 2 apart, so floors go on every other cell
const FLOOR_STRIDE: usize = 2;

/// Build a corridor map: a floor layer, `wall_layers` layers of border
/// walls around an open corridor, and a coin every `coin_every` rows down
/// the middle of the first wall layer
pub fn corridor(columns: usize, rows: usize, wall_layers: usize, coin_every: usize) -> Vec<Vec<String>> {
    let mut layers = Vec::with_capacity(wall_layers + 1);

    let floor: Vec<String> = (0..rows)
        .map(|row| {
            (0..columns)
                .map(|column| {
                    if row % FLOOR_STRIDE == 0 && column % FLOOR_STRIDE == 0 {
                        FLOOR
                    } else {
                        '_'
                    }
                })
                .collect()
        })
        .collect();
    layers.push(floor);

    for level in 0..wall_layers {
        let walls: Vec<String> = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| {
                        let border = row == 0 || row + 1 == rows || column == 0 || column + 1 == columns;
                        if border {
                            WALL
                        } else if level == 0 && coin_every > 0 && column == columns / 2 && row % coin_every == 0 {
                            COIN
                        } else {
                            '_'
                        }
                    })
                    .collect()
            })
            .collect();
        layers.push(walls);
    }

    layers
}

/// Map builder for the corridor level: X/Z centered, floor layer
/// at `y = -1.5`, cells 2 apart horizontally and 1.5 apart vertically
pub fn builder<'a>() -> MapBuilder<'a> {
    MapBuilder::new()
        .with_origin(Vec3::new(0.0, -1.5, 50.0))
        .with_alignment(Vec3::new(0.0, -1.0, 0.0))
        .with_spacing(Vec3::new(2.0, 1.5, 2.0))
        .with_default_size(Vec3::new(2.0, 2.0, 2.0))
        .with_factory(FLOOR, |_, _| Some(floor()))
        .with_factory(WALL, |_, _| Some(wall()))
        .with_factory(COIN, |_, _| Some(coin()))
}

/// Floor tile colliding with players and enemies only
fn floor() -> GameObject {
    let collider = ColliderComponent::new(CollisionShape::aabb(Vec3::new(1.1, 0.5, 1.1)))
        .with_layers(CollisionLayers::GROUND, CollisionLayers::mask(&[CollisionLayers::PLAYER, CollisionLayers::ENEMY]));
    GameObject::new("floor")
        .with_scale(Vec3::new(4.0, 1.0, 4.0))
        .with_collider(collider)
}

fn wall() -> GameObject {
    let collider = ColliderComponent::new(CollisionShape::aabb(Vec3::new(0.5, 0.5, 0.5)))
        .with_layers(CollisionLayers::DEFAULT, CollisionLayers::mask(&[CollisionLayers::PLAYER, CollisionLayers::ENEMY]));
    GameObject::new("wall")
        .with_scale(Vec3::new(2.0, 2.0, 2.0))
        .with_collider(collider)
}

/// Coins are trigger spheres; the grid leaves them alone
fn coin() -> GameObject {
    let collider = ColliderComponent::new(CollisionShape::sphere(Vec3::new(0.0, -0.1, 0.0), 0.4)).as_trigger();
    GameObject::new("coin")
        .with_scale(Vec3::new(3.0, 3.0, 3.0))
        .with_collider(collider)
}
