use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::VERTEX_SPREAD;

/// Canvas-space coordinate. May land outside the canvas; the rasterizer
/// clips.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new_random<R: Rng>(rng: &mut R, w: usize, h: usize) -> Point {
        Point {
            x: rng.gen_range(0..w as i32),
            y: rng.gen_range(0..h as i32),
        }
    }

    /// A companion point with per-axis offsets drawn from
    /// [-VERTEX_SPREAD, VERTEX_SPREAD). It can leave the canvas.
    pub fn new_near<R: Rng>(&self, rng: &mut R) -> Point {
        Point {
            x: self.x + rng.gen_range(-VERTEX_SPREAD..VERTEX_SPREAD),
            y: self.y + rng.gen_range(-VERTEX_SPREAD..VERTEX_SPREAD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn random_points_land_on_the_canvas() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        for _ in 0..1000 {
            let p = Point::new_random(&mut rng, 40, 30);
            assert!(p.x >= 0 && p.x < 40);
            assert!(p.y >= 0 && p.y < 30);
        }
    }

    #[test]
    fn nearby_points_stay_within_the_spread() {
        let mut rng = Pcg64Mcg::seed_from_u64(4);
        let anchor = Point { x: 100, y: 100 };
        for _ in 0..1000 {
            let p = anchor.new_near(&mut rng);
            assert!(p.x - anchor.x >= -VERTEX_SPREAD && p.x - anchor.x < VERTEX_SPREAD);
            assert!(p.y - anchor.y >= -VERTEX_SPREAD && p.y - anchor.y < VERTEX_SPREAD);
        }
    }
}
