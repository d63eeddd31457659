use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

pub const RED: Color = Color {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

impl Color {
    /// Every channel drawn from [0, 255) -- the upper bound is exclusive, so
    /// a fully saturated channel never comes out of here.
    pub fn new_random<R: Rng>(rng: &mut R) -> Color {
        Color {
            r: rng.gen_range(0..255),
            g: rng.gen_range(0..255),
            b: rng.gen_range(0..255),
            a: rng.gen_range(0..255),
        }
    }
}

impl From<&[u8]> for Color {
    fn from(value: &[u8]) -> Self {
        Color {
            r: value[0],
            g: value[1],
            b: value[2],
            a: value[3],
        }
    }
}
