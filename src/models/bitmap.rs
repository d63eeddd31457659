use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

use super::{buffer::PixelBuffer, genome::Genome};

/// Raw-pixel genome: the buffer itself is the evolvable content, one byte
/// per unit. There is no render step; `pixels` hands the genome straight
/// back.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Bitmap {
    pub buffer: PixelBuffer,
    pub fitness: u64,
}

impl Genome for Bitmap {
    fn spawn<R: Rng>(width: usize, height: usize, _settings: &Settings, rng: &mut R) -> Bitmap {
        // spawn uses full-range bytes; mutation below sticks to [0, 255)
        let mut data = vec![0u8; width * height * 4];
        rng.fill_bytes(&mut data);
        Bitmap {
            buffer: PixelBuffer::from_raw(width, height, data),
            fitness: 0,
        }
    }

    fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn mutate<R: Rng>(&mut self, settings: &Settings, rng: &mut R) {
        for byte in self.buffer.data.iter_mut() {
            if rng.gen::<f64>() < settings.mutation_rate {
                *byte = rng.gen_range(0..255);
            }
        }
    }

    fn crossover<R: Rng>(&self, other: &Bitmap, rng: &mut R) -> Bitmap {
        let len = self.buffer.data.len();
        let mid = rng.gen_range(0..len);
        let mut data = vec![0u8; len];
        // bytes up to and including the split come from the other parent
        data[..=mid].copy_from_slice(&other.buffer.data[..=mid]);
        data[mid + 1..].copy_from_slice(&self.buffer.data[mid + 1..]);
        Bitmap {
            buffer: PixelBuffer::from_raw(self.buffer.width, self.buffer.height, data),
            fitness: 0,
        }
    }

    fn refresh(&mut self) {
        // no cached render to rebuild, but a deserialized buffer arrives
        // unchecked and must still match its declared shape
        assert!(
            self.buffer.data.len() == self.buffer.width * self.buffer.height * 4,
            "buffer length {} does not match dimensions {}x{}",
            self.buffer.data.len(),
            self.buffer.width,
            self.buffer.height
        );
    }

    fn fitness(&self) -> u64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u64) {
        self.fitness = fitness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn flat(width: usize, height: usize, byte: u8) -> Bitmap {
        Bitmap {
            buffer: PixelBuffer::from_raw(width, height, vec![byte; width * height * 4]),
            fitness: 0,
        }
    }

    #[test]
    fn spawn_matches_the_requested_dimensions() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let bitmap = Bitmap::spawn(6, 4, &Settings::pixels(), &mut rng);
        assert_eq!(bitmap.buffer.width, 6);
        assert_eq!(bitmap.buffer.height, 4);
        assert_eq!(bitmap.pixels().len(), 6 * 4 * 4);
    }

    #[test]
    fn mutation_rate_zero_is_a_no_op() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let settings = Settings {
            mutation_rate: 0.0,
            ..Settings::pixels()
        };
        let mut bitmap = Bitmap::spawn(4, 4, &settings, &mut rng);
        let before = bitmap.buffer.data.clone();
        bitmap.mutate(&settings, &mut rng);
        assert_eq!(bitmap.buffer.data, before);
    }

    #[test]
    fn mutation_rate_one_replaces_every_byte() {
        // replacements draw from [0, 255), so nothing can stay at 255
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let settings = Settings {
            mutation_rate: 1.0,
            ..Settings::pixels()
        };
        let mut bitmap = flat(3, 3, 255);
        bitmap.mutate(&settings, &mut rng);
        assert!(bitmap.buffer.data.iter().all(|byte| *byte < 255));
    }

    #[test]
    fn self_crossover_is_identity() {
        let mut rng = Pcg64Mcg::seed_from_u64(4);
        let a = Bitmap::spawn(4, 4, &Settings::pixels(), &mut rng);
        let child = a.crossover(&a, &mut rng);
        assert_eq!(child.buffer.data, a.buffer.data);
    }

    #[test]
    #[should_panic(expected = "does not match dimensions")]
    fn refresh_rejects_a_truncated_stored_genome() {
        // hand-edited or corrupt json deserializes fine; the shape check
        // has to catch it before anything scores the genome
        let json = r#"{"buffer":{"width":2,"height":2,"data":[]},"fitness":0}"#;
        let mut bitmap: Bitmap = serde_json::from_str(json).unwrap();
        bitmap.refresh();
    }

    #[test]
    fn crossover_splits_between_the_parents() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let a = flat(2, 2, 7);
        let b = flat(2, 2, 9);
        let child = a.crossover(&b, &mut rng);

        let boundary = child
            .buffer
            .data
            .iter()
            .take_while(|byte| **byte == 9)
            .count();
        // the split byte itself comes from the second parent
        assert!(boundary >= 1);
        assert!(child.buffer.data[boundary..].iter().all(|byte| *byte == 7));
    }
}
