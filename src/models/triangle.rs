use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{color::Color, point::Point};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub color: Color,
}

impl Triangle {
    /// Anchor uniform over the canvas, the other two vertices clustered
    /// around it (small localized shapes).
    pub fn new_random<R: Rng>(rng: &mut R, w: usize, h: usize) -> Triangle {
        let p1 = Point::new_random(rng, w, h);
        Triangle {
            p1,
            p2: p1.new_near(rng),
            p3: p1.new_near(rng),
            color: Color::new_random(rng),
        }
    }
}
