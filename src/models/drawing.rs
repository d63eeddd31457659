use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{settings::Settings, utils::fill_triangle};

use super::{buffer::PixelBuffer, genome::Genome, triangle::Triangle};

/// Triangle-set genome: a constant-length list of colored triangles plus its
/// cached render. The list length never changes after spawn; mutation
/// replaces elements and crossover recombines them index by index.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub triangles: Vec<Triangle>,
    pub width: usize,
    pub height: usize,
    pub fitness: u64,
    #[serde(skip)]
    buffer: PixelBuffer,
}

impl Drawing {
    fn render(&mut self) {
        let mut buffer = PixelBuffer::new(self.width, self.height);
        // painter's algorithm, later triangles draw over earlier ones
        for triangle in &self.triangles {
            fill_triangle(&mut buffer, triangle);
        }
        self.buffer = buffer;
    }
}

impl Genome for Drawing {
    fn spawn<R: Rng>(width: usize, height: usize, settings: &Settings, rng: &mut R) -> Drawing {
        let triangles = (0..settings.triangle_count)
            .map(|_| Triangle::new_random(rng, width, height))
            .collect();
        let mut drawing = Drawing {
            triangles,
            width,
            height,
            fitness: 0,
            buffer: PixelBuffer::default(),
        };
        drawing.render();
        drawing
    }

    fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn mutate<R: Rng>(&mut self, settings: &Settings, rng: &mut R) {
        for i in 0..self.triangles.len() {
            if rng.gen::<f64>() < settings.mutation_rate {
                self.triangles[i] = Triangle::new_random(rng, self.width, self.height);
            }
        }
        self.render();
    }

    fn crossover<R: Rng>(&self, other: &Drawing, rng: &mut R) -> Drawing {
        let n = self.triangles.len();
        let mid = rng.gen_range(0..n);
        let triangles = (0..n)
            .map(|i| {
                // index mid itself comes from the other parent
                if i > mid {
                    self.triangles[i]
                } else {
                    other.triangles[i]
                }
            })
            .collect();
        let mut child = Drawing {
            triangles,
            width: self.width,
            height: self.height,
            fitness: 0,
            buffer: PixelBuffer::default(),
        };
        child.render();
        child
    }

    fn refresh(&mut self) {
        self.render();
    }

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}
