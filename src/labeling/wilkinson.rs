use crate::core::numeric::round_to_significant;

use super::{LabelGenerator, LabelInclusion, LabelProps};

/// Scoring weights for coverage, simplicity, density and legibility.
/// Density dominates so the result tracks the requested label budget.
const WEIGHTS: [f64; 4] = [0.2, 0.25, 0.5, 0.05];

/// Step multipliers in preference order; earlier entries score higher.
const NICE_MULTIPLIERS: [f64; 6] = [1.0, 5.0, 2.0, 2.5, 4.0, 3.0];

/// Digits kept when materializing the label sequence by repeated addition.
const LABEL_PRECISION_DIGITS: usize = 10;

/// Optimal tick placement via the extended Wilkinson search.
///
/// The search walks a discrete parameter space (a simplicity multiplier `j`,
/// a niceness multiplier `q`, a candidate label count `k` and a decimal
/// exponent `z`) and keeps the best-scoring evenly spaced sequence. Loop
/// order and the strict upper-bound cutoffs are part of the contract: among
/// equally scored candidates the first one found wins, so reordering the
/// loops changes the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedWilkinson;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    min: f64,
    max: f64,
    step: f64,
}

impl LabelGenerator for ExtendedWilkinson {
    fn generate(
        &self,
        data_min: f64,
        data_max: f64,
        max_labels: usize,
        inclusion: LabelInclusion,
    ) -> LabelProps {
        if data_min == data_max {
            return LabelProps::single(data_min);
        }

        let best = search(data_min, data_max, max_labels.max(2) as f64, inclusion);
        materialize(best)
    }
}

fn search(data_min: f64, data_max: f64, max_labels: f64, inclusion: LabelInclusion) -> Candidate {
    let mut best = Candidate {
        min: 1.0,
        max: 1.0,
        step: 1.0,
    };
    let mut best_score = -2.0;

    'outer: for j in 1u32.. {
        let j = f64::from(j);

        for (q_pos, &q) in NICE_MULTIPLIERS.iter().enumerate() {
            let simplicity_bound = simplicity_max(q_pos, j);

            if score(1.0, simplicity_bound, 1.0, 1.0) < best_score {
                break 'outer;
            }

            for k in 2u32.. {
                let k = f64::from(k);
                let density_bound = density_max(k, max_labels);

                if score(1.0, simplicity_bound, density_bound, 1.0) < best_score {
                    break;
                }

                let delta = (data_max - data_min) / (k + 1.0) / j / q;

                for z in (delta.log10().ceil() as i32).. {
                    let step = j * q * 10f64.powi(z);
                    let coverage_bound = coverage_max(data_min, data_max, step * (k - 1.0));

                    if score(coverage_bound, simplicity_bound, density_bound, 1.0) < best_score {
                        break;
                    }

                    let min_start = (data_max / step).floor() * j - (k - 1.0) * j;
                    let max_start = (data_min / step).ceil() * j;
                    if min_start > max_start {
                        break;
                    }

                    let mut start = min_start;
                    while start <= max_start {
                        let label_min = start * (step / j);
                        let label_max = label_min + step * (k - 1.0);

                        let next_start = start + 1.0;
                        if next_start == start {
                            // Offsets past f64 integer resolution cannot
                            // advance; abandon this exponent.
                            break;
                        }
                        start = next_start;

                        let candidate_score = score(
                            coverage(data_min, data_max, label_min, label_max),
                            simplicity(q_pos, j, label_min, label_max, step),
                            density(k, max_labels, data_min, data_max, label_min, label_max),
                            1.0,
                        );

                        if candidate_score > best_score
                            && inclusion.accepts(data_min, data_max, label_min, label_max)
                        {
                            best_score = candidate_score;
                            best = Candidate {
                                min: label_min,
                                max: label_max,
                                step,
                            };
                        }
                    }
                }
            }
        }
    }

    best
}

fn materialize(candidate: Candidate) -> LabelProps {
    let mut labels = Vec::new();
    let mut value = candidate.min;

    while value <= candidate.max {
        labels.push(value);
        let next = round_to_significant(value + candidate.step, LABEL_PRECISION_DIGITS);
        if next <= value {
            // Step below the snap resolution at this magnitude; stop rather
            // than loop on a value that can no longer advance.
            break;
        }
        value = next;
    }

    LabelProps {
        min: labels.first().copied().unwrap_or(candidate.min),
        max: labels.last().copied().unwrap_or(candidate.max),
        step: candidate.step,
        labels,
    }
}

fn score(coverage: f64, simplicity: f64, density: f64, legibility: f64) -> f64 {
    WEIGHTS[0] * coverage + WEIGHTS[1] * simplicity + WEIGHTS[2] * density + WEIGHTS[3] * legibility
}

fn floored_mod(value: f64, modulus: f64) -> f64 {
    value - modulus * (value / modulus).floor()
}

fn simplicity(q_pos: usize, j: f64, label_min: f64, label_max: f64, step: f64) -> f64 {
    let q_len = NICE_MULTIPLIERS.len() as f64;
    let zero_on_tick =
        floored_mod(label_min, step) < 1e-10 && label_min <= 0.0 && label_max >= 0.0;
    let bonus = if zero_on_tick { 1.0 } else { 0.0 };

    1.0 - q_pos as f64 / (q_len - 1.0) + bonus - j
}

fn simplicity_max(q_pos: usize, j: f64) -> f64 {
    let q_len = NICE_MULTIPLIERS.len() as f64;
    1.0 - q_pos as f64 / (q_len - 1.0) - j + 1.0
}

fn coverage(data_min: f64, data_max: f64, label_min: f64, label_max: f64) -> f64 {
    let tail = (data_max - label_max).powi(2) + (data_min - label_min).powi(2);
    1.0 - 0.5 * tail / (0.1 * (data_max - data_min)).powi(2)
}

/// Upper bound on `coverage` over every placement of a span of this width.
fn coverage_max(data_min: f64, data_max: f64, span: f64) -> f64 {
    let range = data_max - data_min;
    if span > range {
        let half = (span - range) / 2.0;
        1.0 - 0.5 * (half.powi(2) + half.powi(2)) / (0.1 * range).powi(2)
    } else {
        1.0
    }
}

fn density(k: f64, max_labels: f64, data_min: f64, data_max: f64, label_min: f64, label_max: f64) -> f64 {
    let actual = (k - 1.0) / (label_max - label_min);
    let target = (max_labels - 1.0) / (label_max.max(data_max) - label_min.min(data_min));
    2.0 - (actual / target).max(target / actual)
}

fn density_max(k: f64, max_labels: f64) -> f64 {
    if k >= max_labels {
        2.0 - (k - 1.0) / (max_labels - 1.0)
    } else {
        1.0
    }
}
