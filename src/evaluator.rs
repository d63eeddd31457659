use crate::models::{buffer::PixelBuffer, genome::Genome};

/// Owns the immutable target and scores genomes against it. The stored
/// fitness is the raw pixel distance with one exception: a perfect match
/// stores 1, never 0, so pool weighting always has a strictly positive
/// best.
pub struct Evaluator {
    target: PixelBuffer,
}

impl Evaluator {
    pub fn new(target: PixelBuffer) -> Evaluator {
        assert!(
            target.width > 0 && target.height > 0,
            "target must have pixels"
        );
        assert!(target.data.len() == target.width * target.height * 4);
        Evaluator { target }
    }

    pub fn width(&self) -> usize {
        self.target.width
    }

    pub fn height(&self) -> usize {
        self.target.height
    }

    pub fn evaluate<G: Genome>(&self, genome: &mut G) -> u64 {
        let distance = genome.pixels().diff(&self.target);
        // a perfect match scores 1, not 0
        let fitness = if distance == 0 { 1 } else { distance };
        genome.set_fitness(fitness);
        fitness
    }
}
