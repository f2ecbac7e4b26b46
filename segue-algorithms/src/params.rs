use crate::NarrativeStrategy;
use anyhow::{anyhow, Result};
use rand::Rng;
use segue_challenges::StoryError;
use segue_utils::{seed_from_str, seed_from_u64};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Held-Karp memory grows as `2^n · n`; beyond this the heuristic is used.
pub const MAX_EXACT_TOUR_LIMIT: usize = 20;

/// Which item a greedy builder starts from.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitPolicy {
    /// The first item in input order.
    #[default]
    First,
    /// A uniformly random item, drawn from the solve seed.
    Random,
    /// The item at this input index.
    Index(usize),
}

impl InitPolicy {
    pub fn select<R: Rng>(&self, len: usize, rng: &mut R) -> Result<usize> {
        match *self {
            InitPolicy::First => Ok(0),
            InitPolicy::Random => Ok(rng.gen_range(0..len)),
            InitPolicy::Index(index) if index < len => Ok(index),
            InitPolicy::Index(index) => Err(StoryError::InitialItemOutOfRange { index, len }.into()),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Params {
    /// Seed of every random choice: random start item, random stories,
    /// swap positions. Hyperparameters may give it as a string or integer.
    pub seed: [u8; 32],

    /// Start item of the greedy builders.
    pub init: InitPolicy,

    /// Score adjustment of the sequential greedy builder.
    pub narrative: NarrativeStrategy,

    /// Independent hill-climbing restarts. At least 1.
    pub n_restarts: usize,

    /// Consecutive non-improving hill-climbing moves tolerated before a
    /// restart stops.
    pub patience: usize,

    /// Largest tour dimension (items + 1) solved exactly. Larger tours fall
    /// back to nearest neighbour + 2-opt.
    pub exact_tour_limit: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seed: seed_from_u64(0),
            init: InitPolicy::First,
            narrative: NarrativeStrategy::None,
            n_restarts: 1,
            patience: 0,
            exact_tour_limit: 16,
        }
    }
}

impl Params {
    /// Overlays user hyperparameters on `base`.
    ///
    /// Keys are the field names above. `seed` may be a string or an integer,
    /// both hashed to 32 bytes; unknown keys are rejected.
    pub fn initialize(base: Params, hyperparameters: &Option<Map<String, Value>>) -> Result<Self> {
        let map = match hyperparameters {
            Some(map) => map,
            None => {
                base.validate()?;
                return Ok(base);
            }
        };

        let mut merged_params = serde_json::to_value(&base)?;
        if let Value::Object(ref mut obj) = merged_params {
            for (k, v) in map {
                let v = if k == "seed" { seed_value(v)? } else { v.clone() };
                obj.insert(k.clone(), v);
            }
        }

        let params: Params = serde_json::from_value(merged_params)
            .map_err(|e| anyhow!("Invalid hyperparameters: {}", e))?;
        params.validate()?;
        tracing::debug!(?params, "algorithm parameters");
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_restarts == 0 {
            return Err(anyhow!("n_restarts must be at least 1"));
        }
        if self.exact_tour_limit > MAX_EXACT_TOUR_LIMIT {
            return Err(anyhow!(
                "exact_tour_limit ({}) must be at most {}",
                self.exact_tour_limit,
                MAX_EXACT_TOUR_LIMIT
            ));
        }
        match self.narrative {
            NarrativeStrategy::DiversityWithDecay { decay }
            | NarrativeStrategy::HomogeneityWithDecay { decay }
                if !(decay > 0.0 && decay.is_finite()) =>
            {
                Err(anyhow!("Decay constant ({}) must be positive and finite", decay))
            }
            _ => Ok(()),
        }
    }
}

fn seed_value(v: &Value) -> Result<Value> {
    let seed = match v {
        Value::String(s) => seed_from_str(s),
        Value::Number(n) => match n.as_u64() {
            Some(n) => seed_from_u64(n),
            None => return Err(anyhow!("Seed ({}) must be a non-negative integer", n)),
        },
        Value::Array(_) => return Ok(v.clone()),
        _ => return Err(anyhow!("Seed must be a string, integer or 32 byte array")),
    };
    Ok(serde_json::to_value(seed)?)
}
