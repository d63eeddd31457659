use rand::Rng;

use crate::{
    evaluator::Evaluator, models::genome::Genome, population::Population, settings::Settings,
};

/// Weighted reproduction pool for one generation: the population ranked
/// ascending by fitness, cut at `pool_cutoff`, each of the top genomes
/// duplicated by how far its fitness sits under the cutoff genome's.
///
/// If the genome at the cutoff scores the same as the genome at the front,
/// every weight would be zero; the whole population is handed back as a
/// uniform pool instead.
pub fn create_pool<'a, G: Genome>(
    population: &'a Population<G>,
    settings: &Settings,
) -> Vec<&'a G> {
    let cutoff = settings.pool_cutoff;
    assert!(
        population.len() > cutoff,
        "population size {} must exceed pool cutoff {}",
        population.len(),
        cutoff
    );

    let mut ranked: Vec<&G> = population.genomes.iter().collect();
    // stable: ties keep population order
    ranked.sort_by_key(|genome| genome.fitness());
    let top = &ranked[..=cutoff];

    if top[cutoff].fitness() == top[0].fitness() {
        return population.genomes.iter().collect();
    }

    let mut pool = Vec::new();
    for genome in &top[..cutoff] {
        let weight = (top[cutoff].fitness() - genome.fitness()) * settings.pool_weight_scale;
        for _ in 0..weight {
            pool.push(*genome);
        }
    }
    pool
}

/// One full reproduction pass: every slot of the next generation gets a
/// child of two uniformly drawn pool parents (drawing the same parent twice
/// is legal), mutated and evaluated before it is placed.
pub fn natural_selection<G: Genome, R: Rng>(
    pool: &[&G],
    size: usize,
    evaluator: &Evaluator,
    settings: &Settings,
    rng: &mut R,
) -> Population<G> {
    let genomes = (0..size)
        .map(|_| {
            let a = pool[rng.gen_range(0..pool.len())];
            let b = pool[rng.gen_range(0..pool.len())];
            let mut child = a.crossover(b, rng);
            child.mutate(settings, rng);
            evaluator.evaluate(&mut child);
            child
        })
        .collect();
    Population { genomes }
}
