//! Cuisine inference
//!
//! A fixed weighted lookup: every distinct ingredient adds its weight to
//! each cuisine profile that lists it. The best total wins when it reaches
//! the confidence threshold.

use crate::ingredient_set::IngredientSet;
use crate::knowledge_base::{Country, CuisineProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum winning score for a confident inference
pub const DEFAULT_CONFIDENCE_THRESHOLD: u32 = 3;

/// Total weight one cuisine received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuisineScore {
    pub cuisine: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuisineInference {
    /// Best cuisine; `None` when nothing scored
    pub cuisine: Option<String>,
    pub score: u32,
    pub confident: bool,
    /// The winner maps to a single country
    pub flaggable: bool,
    pub country: Option<Country>,
    /// Every profile with a non-zero score, best first
    pub ranking: Vec<CuisineScore>,
}

impl CuisineInference {
    /// Country to display a flag for; only confident, flaggable winners get one
    pub fn flag_country(&self) -> Option<&Country> {
        if self.confident && self.flaggable {
            self.country.as_ref()
        } else {
            None
        }
    }
}

/// Score an ingredient set against the cuisine profiles.
///
/// Ties keep the profile that comes first in `profiles`.
pub fn infer(
    ingredients: &IngredientSet,
    profiles: &[CuisineProfile],
    threshold: u32,
) -> CuisineInference {
    let distinct = ingredients.distinct();

    let scores: Vec<(&CuisineProfile, u32)> = profiles
        .iter()
        .map(|profile| {
            let total = distinct.iter().map(|ing| profile.weight_of(ing)).sum();
            (profile, total)
        })
        .collect();

    let mut best: Option<(&CuisineProfile, u32)> = None;
    for (profile, score) in &scores {
        match best {
            Some((_, top)) if *score <= top => {}
            _ if *score == 0 => {}
            _ => best = Some((profile, *score)),
        }
    }

    let mut ranking: Vec<CuisineScore> = scores
        .iter()
        .filter(|(_, score)| *score > 0)
        .map(|(profile, score)| CuisineScore {
            cuisine: profile.name.clone(),
            score: *score,
        })
        .collect();
    // stable sort keeps configuration order among ties
    ranking.sort_by(|a, b| b.score.cmp(&a.score));

    let inference = match best {
        None => CuisineInference {
            ranking,
            ..CuisineInference::default()
        },
        Some((profile, score)) => CuisineInference {
            cuisine: Some(profile.name.clone()),
            score,
            confident: score >= threshold,
            flaggable: profile.is_flaggable(),
            country: profile.country.clone(),
            ranking,
        },
    };

    debug!(
        cuisine = ?inference.cuisine,
        score = inference.score,
        confident = inference.confident,
        threshold,
        "Cuisine inferred"
    );
    inference
}
