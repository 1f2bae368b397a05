//! Is parsing a random sub-sample of a corpus close enough to parsing all of it?
//!
//! For every requested fraction the harness repeatedly parses the full corpus and a sample of
//! its sentences, compares the merged corpus graphs structurally and compares the parse times
//! with Welch's t-test. Trials run one after another so timings do not interfere.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use slog::{Discard, Logger};

use crate::lang::Tokenized;
use crate::stats;
use crate::syntax::{self, similarity, Algorithm};
use crate::utils::env::VarError;
use crate::utils::rand::{env_seed, seeded_rng};

pub use self::sampling::*;

mod sampling;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Minimum mean Jaccard or attachment score for a sample to be acceptable.
    pub similarity_threshold: f64,
    /// Timings are comparable when the t-test p-value is at least this.
    pub significance_level: f64,
    /// Draw limit per sample, as a multiple of the corpus size.
    pub max_draw_attempts_factor: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            similarity_threshold: 0.9,
            significance_level: 0.05,
            max_draw_attempts_factor: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Defaults with the seed taken from the `SEED` environment variable.
    ///
    /// A `SEED` that is set but not an unsigned integer is an error.
    pub fn from_env() -> Result<Self, VarError> {
        Ok(Config {
            seed: env_seed()?,
            ..Config::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleTrial {
    pub run: usize,
    pub full_millis: f64,
    pub sample_millis: f64,
    pub full_bytes: usize,
    pub sample_bytes: usize,
    pub jaccard: f64,
    pub attachment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionReport {
    pub fraction: f64,
    pub sample_size: usize,
    pub runs: usize,
    pub jaccard_mean: f64,
    pub jaccard_std: f64,
    pub attachment_mean: f64,
    pub attachment_std: f64,
    pub timing: stats::TTest,
    pub structurally_acceptable: bool,
    pub timing_comparable: bool,
    pub trials: Vec<SampleTrial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub algorithm: Algorithm,
    pub corpus_size: usize,
    pub runs_per_fraction: usize,
    pub fractions: Vec<FractionReport>,
}

impl ValidationReport {
    /// Smallest fraction whose samples were structurally acceptable.
    pub fn smallest_acceptable_fraction(&self) -> Option<f64> {
        self.fractions
            .iter()
            .filter(|r| r.structurally_acceptable)
            .map(|r| r.fraction)
            .fold(None, |acc, f| match acc {
                Some(min) if min <= f => Some(min),
                _ => Some(f),
            })
    }
}

#[derive(Debug)]
pub struct Validator {
    config: Config,
    logger: Logger,
}

impl Validator {
    pub fn new(config: Config) -> Self {
        Validator {
            config: config,
            logger: Logger::root(Discard, o!()),
        }
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run<T: Tokenized>(
        &self,
        corpus: &[Vec<T>],
        fractions: &[f64],
        runs_per_fraction: usize,
        algorithm: Algorithm,
    ) -> ValidationReport {
        let population = corpus.len();
        let max_attempts = self.config
            .max_draw_attempts_factor
            .saturating_mul(population.max(1));
        let mut rng = seeded_rng(self.config.seed);
        info!(
            self.logger,
            "validate `{}` on {} sentences: fractions={:?}, runs={}, seed={:?}",
            algorithm,
            population,
            fractions,
            runs_per_fraction,
            self.config.seed,
        );

        let mut reports = Vec::with_capacity(fractions.len());
        for &fraction in fractions {
            if !fraction.is_finite() || fraction <= 0.0 {
                warn!(self.logger, "skip invalid sample fraction: {}", fraction);
                continue;
            }
            let size = sample_size(population, fraction);
            let mut trials = Vec::with_capacity(runs_per_fraction);
            for run in 0..runs_per_fraction {
                let start = Instant::now();
                let full = syntax::parse_corpus(algorithm, corpus);
                let full_millis = start.elapsed().as_secs_f64() * 1e3;

                let sample = sample_indices(population, size, &mut rng, max_attempts);
                if sample.filled > 0 {
                    warn!(
                        self.logger,
                        "draw limit reached after {} attempts, filled {} of {} indices",
                        sample.attempts,
                        sample.filled,
                        size,
                    );
                }
                let start = Instant::now();
                let sampled = syntax::parse_corpus(
                    algorithm,
                    sample.indices.iter().map(|&i| &corpus[i]),
                );
                let sample_millis = start.elapsed().as_secs_f64() * 1e3;

                let trial = SampleTrial {
                    run: run,
                    full_millis: full_millis,
                    sample_millis: sample_millis,
                    full_bytes: full.footprint(),
                    sample_bytes: sampled.footprint(),
                    jaccard: similarity::jaccard(&full.edges, &sampled.edges),
                    attachment: similarity::attachment_score(&full.edges, &sampled.edges),
                };
                debug!(self.logger, "trial: {:?}", trial);
                trials.push(trial);
            }
            let report = self.summarize(fraction, size, trials);
            info!(
                self.logger,
                "fraction={} size={}: jaccard={:.4} attachment={:.4} p={:.4} acceptable={} comparable={}",
                report.fraction,
                report.sample_size,
                report.jaccard_mean,
                report.attachment_mean,
                report.timing.p_value,
                report.structurally_acceptable,
                report.timing_comparable,
            );
            reports.push(report);
        }

        ValidationReport {
            algorithm: algorithm,
            corpus_size: population,
            runs_per_fraction: runs_per_fraction,
            fractions: reports,
        }
    }

    fn summarize(&self, fraction: f64, size: usize, trials: Vec<SampleTrial>) -> FractionReport {
        let jaccards: Vec<f64> = trials.iter().map(|t| t.jaccard).collect();
        let attachments: Vec<f64> = trials.iter().map(|t| t.attachment).collect();
        let full_times: Vec<f64> = trials.iter().map(|t| t.full_millis).collect();
        let sample_times: Vec<f64> = trials.iter().map(|t| t.sample_millis).collect();

        let jaccard_mean = stats::mean(&jaccards);
        let attachment_mean = stats::mean(&attachments);
        let timing = stats::welch_t_test(&full_times, &sample_times);
        let threshold = self.config.similarity_threshold;
        FractionReport {
            fraction: fraction,
            sample_size: size,
            runs: trials.len(),
            jaccard_mean: jaccard_mean,
            jaccard_std: stats::std_dev(&jaccards),
            attachment_mean: attachment_mean,
            attachment_std: stats::std_dev(&attachments),
            structurally_acceptable: jaccard_mean >= threshold || attachment_mean >= threshold,
            timing_comparable: !timing.p_value.is_nan()
                && timing.p_value >= self.config.significance_level,
            timing: timing,
            trials: trials,
        }
    }
}

/// Runs the harness with [`Config::from_env`] and no logging.
pub fn run_validation<T: Tokenized>(
    corpus: &[Vec<T>],
    fractions: &[f64],
    runs_per_fraction: usize,
    algorithm: Algorithm,
) -> Result<ValidationReport, VarError> {
    let config = Config::from_env()?;
    Ok(Validator::new(config).run(corpus, fractions, runs_per_fraction, algorithm))
}
