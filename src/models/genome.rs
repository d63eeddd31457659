use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

use super::buffer::PixelBuffer;
use crate::settings::Settings;

/// Capability shared by the two genome encodings. The engine, population,
/// and pool code are generic over this and never look at the concrete
/// variant.
pub trait Genome: Clone + Serialize + DeserializeOwned {
    /// A fresh random candidate for a w x h target.
    fn spawn<R: Rng>(width: usize, height: usize, settings: &Settings, rng: &mut R) -> Self;

    /// The rendered content. Always in sync with the genome; every mutating
    /// operation re-renders before returning.
    fn pixels(&self) -> &PixelBuffer;

    /// Independently replace each unit (triangle or byte) with probability
    /// `settings.mutation_rate`.
    fn mutate<R: Rng>(&mut self, settings: &Settings, rng: &mut R);

    /// Single-split recombination: a split index `mid` is drawn uniformly
    /// over the units; units after `mid` come from `self`, units up to and
    /// including `mid` come from `other`.
    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self;

    /// Rebuild cached state (the render) after deserializing. Stored
    /// content that contradicts its declared dimensions aborts here rather
    /// than entering the population.
    fn refresh(&mut self);

    fn fitness(&self) -> u64;

    fn set_fitness(&mut self, fitness: u64);
}
