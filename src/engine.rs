use std::time::Instant;

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::{
    evaluator::Evaluator,
    models::{buffer::PixelBuffer, genome::Genome},
    population::Population,
    progress::{Progress, ProgressSink},
    selection::{create_pool, natural_selection},
    settings::Settings,
};

/// Where the run stands. Converged is terminal; there is no generation cap,
/// so an unreachable fitness limit loops forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Converged,
}

#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub generations: usize,
    pub evaluations: usize,
}

/// Drives the whole run: owns the evaluator, the current population, the
/// seeded generator and the counters. Generic over the genome encoding;
/// nothing in here inspects the concrete variant.
pub struct Engine<G: Genome> {
    pub evaluator: Evaluator,
    pub settings: Settings,
    pub population: Population<G>,
    pub phase: Phase,
    pub stats: Stats,
    rng: Pcg64Mcg,
}

impl<G: Genome> Engine<G> {
    pub fn new(target: PixelBuffer, settings: Settings, seed: u64) -> Engine<G> {
        settings.validate();
        let evaluator = Evaluator::new(target);
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let population =
            Population::spawn(settings.population_size, &evaluator, &settings, &mut rng);
        let stats = Stats {
            generations: 0,
            evaluations: settings.population_size,
        };
        Engine {
            evaluator,
            settings,
            population,
            phase: Phase::Running,
            stats,
            rng,
        }
    }

    pub fn generation(&self) -> usize {
        self.stats.generations
    }

    pub fn best(&self) -> &G {
        self.population.best()
    }

    /// Installs an externally produced genome (a previous run's best) into
    /// slot 0. Its cached render is rebuilt and its stored fitness thrown
    /// away; do not trust what came off disk.
    pub fn adopt(&mut self, mut genome: G) {
        genome.refresh();
        self.evaluator.evaluate(&mut genome);
        self.stats.evaluations += 1;
        self.population.genomes[0] = genome;
    }

    /// One generation: build the pool, breed a full replacement population.
    /// Returns the pool size, which varies with the fitness spread.
    pub fn step(&mut self) -> usize {
        self.stats.generations += 1;
        let pool = create_pool(&self.population, &self.settings);
        let pool_size = pool.len();
        let next = natural_selection(
            &pool,
            self.settings.population_size,
            &self.evaluator,
            &self.settings,
            &mut self.rng,
        );
        self.population = next;
        self.stats.evaluations += self.settings.population_size;
        pool_size
    }

    /// Runs generations until the tracked best fitness drops under the
    /// limit. The best is sampled before the population is replaced, so the
    /// sink always sees the genome the convergence check just looked at.
    pub fn run<S: ProgressSink<G>>(&mut self, sink: &mut S) -> anyhow::Result<Stats> {
        let started = Instant::now();
        loop {
            let best = self.population.best().clone();
            if best.fitness() < self.settings.fitness_limit {
                self.phase = Phase::Converged;
                return Ok(self.stats.clone());
            }

            let pool_size = self.step();

            if self.stats.generations % self.settings.snapshot_every == 0 {
                sink.emit(
                    &best,
                    &Progress {
                        generation: self.stats.generations,
                        fitness: best.fitness(),
                        pool_size,
                        elapsed: started.elapsed(),
                    },
                )?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{bitmap::Bitmap, drawing::Drawing};
    use crate::progress::NullSink;

    fn tiny_target() -> PixelBuffer {
        PixelBuffer::from_raw(
            2,
            2,
            vec![
                255, 0, 0, 255, //
                0, 255, 0, 255, //
                0, 0, 255, 255, //
                255, 255, 255, 255,
            ],
        )
    }

    fn tiny_settings() -> Settings {
        Settings {
            population_size: 5,
            pool_cutoff: 2,
            triangle_count: 3,
            snapshot_every: 1,
            ..Settings::triangles()
        }
    }

    #[test]
    fn the_population_size_is_stable_across_steps() {
        let mut engine: Engine<Bitmap> = Engine::new(tiny_target(), tiny_settings(), 99);
        for _ in 0..3 {
            engine.step();
            assert_eq!(engine.population.len(), 5);
        }
        assert_eq!(engine.generation(), 3);
        assert_eq!(engine.stats.evaluations, 5 + 3 * 5);
    }

    #[test]
    fn run_converges_immediately_when_the_limit_is_huge() {
        let settings = Settings {
            fitness_limit: u64::MAX,
            ..tiny_settings()
        };
        let mut engine: Engine<Drawing> = Engine::new(tiny_target(), settings, 1);
        let stats = engine.run(&mut NullSink).unwrap();
        assert_eq!(engine.phase, Phase::Converged);
        assert_eq!(stats.generations, 0);
    }

    #[test]
    fn adopt_reevaluates_the_incoming_genome() {
        let mut engine: Engine<Bitmap> = Engine::new(tiny_target(), tiny_settings(), 5);
        let mut alien = engine.population.genomes[1].clone();
        alien.set_fitness(123_456); // a 2x2 buffer can never be this far off
        engine.adopt(alien);
        assert_ne!(engine.population.genomes[0].fitness(), 123_456);
        assert!(engine.population.genomes[0].fitness() > 0);
    }
}
