use rand::Rng;

use crate::{evaluator::Evaluator, models::genome::Genome, settings::Settings};

/// Fixed-size set of candidates. Replaced wholesale every generation; no
/// genome survives into the next population by reference.
#[derive(Debug, Clone)]
pub struct Population<G> {
    pub genomes: Vec<G>,
}

impl<G: Genome> Population<G> {
    /// `size` fresh random genomes, each evaluated immediately.
    pub fn spawn<R: Rng>(
        size: usize,
        evaluator: &Evaluator,
        settings: &Settings,
        rng: &mut R,
    ) -> Population<G> {
        let genomes = (0..size)
            .map(|_| {
                let mut genome = G::spawn(evaluator.width(), evaluator.height(), settings, rng);
                evaluator.evaluate(&mut genome);
                genome
            })
            .collect();
        Population { genomes }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// The genome with the highest stored fitness, earliest index winning
    /// ties. Fitness is a raw distance, so this is the *worst* match in the
    /// population; the run loop compares exactly this value against the
    /// fitness limit, which means evolution keeps going until every genome
    /// sits under the limit.
    pub fn best(&self) -> &G {
        let mut best = 0u64;
        let mut index = 0usize;
        for (i, genome) in self.genomes.iter().enumerate() {
            if genome.fitness() > best {
                best = genome.fitness();
                index = i;
            }
        }
        &self.genomes[index]
    }
}
