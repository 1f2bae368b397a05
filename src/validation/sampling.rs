use ::rand::Rng;

/// Indices drawn without replacement, sorted ascending
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub indices: Vec<usize>,
    /// Number of random draws made, rejected duplicates included.
    pub attempts: usize,
    /// Slots filled with the lowest unused indices after the draw limit was hit.
    pub filled: usize,
}

/// Draws `size` distinct indices from `0..population` by rejection.
///
/// A `size` not smaller than the population returns every index without drawing. Otherwise
/// the loop stops after `max_attempts` draws and any missing slots are filled with the lowest
/// indices not yet chosen, so the call always terminates with exactly `size` indices.
pub fn sample_indices<R: Rng>(
    population: usize,
    size: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Sample {
    if size >= population {
        return Sample {
            indices: (0..population).collect(),
            attempts: 0,
            filled: 0,
        };
    }
    let mut chosen = vec![false; population];
    let mut indices = Vec::with_capacity(size);
    let mut attempts = 0;
    while indices.len() < size && attempts < max_attempts {
        let index = rng.gen_range(0..population);
        attempts += 1;
        if !chosen[index] {
            chosen[index] = true;
            indices.push(index);
        }
    }
    let mut filled = 0;
    if indices.len() < size {
        for index in 0..population {
            if indices.len() == size {
                break;
            }
            if !chosen[index] {
                chosen[index] = true;
                indices.push(index);
                filled += 1;
            }
        }
    }
    indices.sort();
    Sample {
        indices: indices,
        attempts: attempts,
        filled: filled,
    }
}

/// `round(fraction * population)` clamped to `[1, population]`; zero for an empty population.
pub fn sample_size(population: usize, fraction: f64) -> usize {
    if population == 0 {
        return 0;
    }
    let size = (fraction * population as f64).round();
    if size < 1.0 {
        1
    } else if size >= population as f64 {
        population
    } else {
        size as usize
    }
}
