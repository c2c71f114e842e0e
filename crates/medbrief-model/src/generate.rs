use crate::error::ModelError;

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub num_beams: usize,
    pub length_penalty: f64,
    pub early_stopping: bool,
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_beams: 4,
            length_penalty: 2.0,
            early_stopping: true,
            min_length: 300,
            max_length: 700,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Generated token ids, without the decoder start token.
    pub tokens: Vec<u32>,
    /// Length-normalized log probability of the winning hypothesis.
    pub score: f64,
}

struct Beam {
    tokens: Vec<u32>,
    sum_log_prob: f64,
}

struct Hypothesis {
    tokens: Vec<u32>,
    score: f64,
}

/// Bounded pool of finished hypotheses, best first.
struct FinishedPool {
    hyps: Vec<Hypothesis>,
    capacity: usize,
}

impl FinishedPool {
    fn new(capacity: usize) -> Self {
        Self {
            hyps: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    fn push(&mut self, hyp: Hypothesis) {
        let pos = self.hyps.partition_point(|h| h.score > hyp.score);
        self.hyps.insert(pos, hyp);
        self.hyps.truncate(self.capacity);
    }

    fn is_full(&self) -> bool {
        self.hyps.len() >= self.capacity
    }

    fn best(self) -> Option<Hypothesis> {
        self.hyps.into_iter().next()
    }
}

/// Run beam-search generation over a decode step.
///
/// `step` maps a full decoder prefix (starting with `start_token`) to the
/// next-token logits, abstracting over the model's decoder pass. EOS is
/// suppressed until a hypothesis carries `min_length` generated tokens;
/// finished hypotheses are ranked by `log_prob / len^length_penalty`. With
/// early stopping the search ends once `num_beams` hypotheses have finished,
/// otherwise it runs to `max_length` and the best finished hypothesis wins,
/// falling back to the best live beam when none finished.
///
/// # Errors
///
/// Returns an error if the decode step fails or produces empty logits.
pub fn beam_search<F>(
    step: &mut F,
    config: &GenerationConfig,
    start_token: u32,
    eos_token: u32,
) -> Result<GenerationOutput, ModelError>
where
    F: FnMut(&[u32]) -> Result<Vec<f32>, ModelError>,
{
    let num_beams = config.num_beams.max(1);
    let mut beams = vec![Beam {
        tokens: vec![start_token],
        sum_log_prob: 0.0,
    }];
    let mut finished = FinishedPool::new(num_beams);

    for _ in 0..config.max_length {
        let mut candidates: Vec<(usize, u32, f64)> =
            Vec::with_capacity(beams.len() * 2 * num_beams);
        for (beam_idx, beam) in beams.iter().enumerate() {
            let logits = step(&beam.tokens)?;
            if logits.is_empty() {
                return Err(ModelError::Inference("decoder produced empty logits".into()));
            }
            let mut log_probs = log_softmax(&logits);
            let generated = beam.tokens.len() - 1;
            if generated < config.min_length
                && let Some(p) = log_probs.get_mut(eos_token as usize)
            {
                *p = f64::NEG_INFINITY;
            }
            for (token, lp) in top_k(&log_probs, 2 * num_beams) {
                candidates.push((beam_idx, token, beam.sum_log_prob + lp));
            }
        }
        candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

        let mut next_beams: Vec<Beam> = Vec::with_capacity(num_beams);
        for (rank, (beam_idx, token, sum_log_prob)) in candidates.into_iter().enumerate() {
            if token == eos_token {
                // An EOS outside the top num_beams candidates never wins;
                // recording it would let near-impossible hypotheses finish.
                if rank < num_beams {
                    let mut tokens = beams[beam_idx].tokens.clone();
                    tokens.push(token);
                    finished.push(finalize(tokens, sum_log_prob, config.length_penalty));
                }
            } else if next_beams.len() < num_beams {
                let mut tokens = beams[beam_idx].tokens.clone();
                tokens.push(token);
                next_beams.push(Beam {
                    tokens,
                    sum_log_prob,
                });
            }
            if next_beams.len() >= num_beams {
                break;
            }
        }

        beams = next_beams;
        if (config.early_stopping && finished.is_full()) || beams.is_empty() {
            break;
        }
    }

    if !finished.is_full() {
        for beam in beams {
            finished.push(finalize(beam.tokens, beam.sum_log_prob, config.length_penalty));
        }
    }

    let best = finished
        .best()
        .ok_or_else(|| ModelError::Inference("beam search produced no hypotheses".into()))?;
    Ok(GenerationOutput {
        tokens: best.tokens[1..].to_vec(),
        score: best.score,
    })
}

fn finalize(tokens: Vec<u32>, sum_log_prob: f64, length_penalty: f64) -> Hypothesis {
    #[allow(clippy::cast_precision_loss)]
    let gen_len = (tokens.len() - 1).max(1) as f64;
    Hypothesis {
        score: sum_log_prob / gen_len.powf(length_penalty),
        tokens,
    }
}

fn log_softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let max = f64::from(max);
    let sum: f64 = logits.iter().map(|&l| (f64::from(l) - max).exp()).sum();
    let log_sum = sum.ln();
    logits
        .iter()
        .map(|&l| f64::from(l) - max - log_sum)
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn top_k(log_probs: &[f64], k: usize) -> Vec<(u32, f64)> {
    let mut best: Vec<(u32, f64)> = Vec::with_capacity(k + 1);
    for (i, &lp) in log_probs.iter().enumerate() {
        if best.len() >= k && best.last().is_some_and(|&(_, tail)| lp <= tail) {
            continue;
        }
        // Ties keep the lower token id first.
        let pos = best.partition_point(|&(_, s)| s >= lp);
        best.insert(pos, (i as u32, lp));
        best.truncate(k);
    }
    best
}
