//! Command line argument parsing and message formatting.

use crate::engine::Assessment;
use crate::localization::{detect_language, LocalizationManager};
use crate::restrictions::Change;
use crate::slots::{SlotStatus, SlotView};
use clap::Parser;

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "dishcovery",
    about = "Resolve ingredients, check they make a dish and guess its cuisine",
    long_about = "Resolve freeform ingredients against the catalog, check that they make a dish, \
                  apply dietary restrictions and infer the probable cuisine. Without ingredients, \
                  reads one ingredient per line from standard input."
)]
pub struct CliArgs {
    /// Dietary restriction to apply; repeat in priority order
    #[arg(long = "restrict", value_name = "NAME")]
    pub restrictions: Vec<String>,

    /// Output language (en or fr)
    #[arg(long = "lang", value_name = "LANG")]
    pub language: Option<String>,

    /// Print a Prometheus snapshot of the engine metrics on exit
    #[arg(long)]
    pub metrics: bool,

    /// Ingredients to resolve
    #[arg(value_name = "INGREDIENT")]
    pub ingredients: Vec<String>,
}

/// Language to print in: `--lang`, then the configured default
pub fn resolve_language(args: &CliArgs, default_language: &str) -> String {
    detect_language(args.language.as_deref().or(Some(default_language)))
}

/// Caption for one input slot
pub fn format_slot(slot: &SlotView, manager: &LocalizationManager, language: &str) -> String {
    match slot.status() {
        SlotStatus::Empty => manager.get_message_in_language("slot-empty", language, None),
        SlotStatus::Valid => manager.get_message_with_args_in_language(
            "slot-valid",
            language,
            &[("canonical", slot.result.canonical().unwrap_or(&slot.text))],
        ),
        SlotStatus::Invalid => match slot.result.suggestion() {
            Some(suggestion) => manager.get_message_with_args_in_language(
                "slot-suggested",
                language,
                &[("text", slot.text.trim()), ("suggestion", suggestion)],
            ),
            None => manager.get_message_with_args_in_language(
                "slot-rejected",
                language,
                &[("text", slot.text.trim())],
            ),
        },
    }
}

fn format_change(change: &Change, manager: &LocalizationManager, language: &str) -> String {
    let restrictions = change.triggered_by().join(", ");
    match change {
        Change::Replaced {
            original,
            replacement,
            ..
        } => manager.get_message_with_args_in_language(
            "change-replaced",
            language,
            &[
                ("original", original.as_str()),
                ("replacement", replacement.as_str()),
                ("restrictions", restrictions.as_str()),
            ],
        ),
        Change::Removed { original, .. } => manager.get_message_with_args_in_language(
            "change-removed",
            language,
            &[("original", original.as_str()), ("restrictions", restrictions.as_str())],
        ),
    }
}

/// Human readable lines for an assessment, in display order
pub fn format_assessment(
    assessment: &Assessment,
    manager: &LocalizationManager,
    language: &str,
) -> Vec<String> {
    let mut lines: Vec<String> = assessment
        .restrictions
        .changes
        .iter()
        .map(|change| format_change(change, manager, language))
        .collect();

    if assessment.all_restricted {
        lines.push(manager.get_message_in_language("all-restricted", language, None));
        return lines;
    }

    let counts = assessment
        .sufficiency
        .category_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(category, count)| format!("{} {}", count, category))
        .collect::<Vec<_>>()
        .join(", ");
    if !counts.is_empty() {
        lines.push(manager.get_message_with_args_in_language(
            "have-summary",
            language,
            &[("counts", counts.as_str())],
        ));
    }

    if assessment.ready {
        lines.push(manager.get_message_in_language("feasibility-ok", language, None));
    } else if assessment.sufficiency.sufficient {
        let count = assessment.min_ingredients.to_string();
        lines.push(manager.get_message_with_args_in_language(
            "feasibility-more",
            language,
            &[("count", count.as_str())],
        ));
    } else {
        let missing = assessment
            .sufficiency
            .missing
            .iter()
            .map(|key| clause_label(key, manager, language))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(manager.get_message_with_args_in_language(
            "feasibility-missing",
            language,
            &[("missing", missing.as_str())],
        ));
    }

    for combo in &assessment.bad_combos {
        let items = combo.ingredients.iter().cloned().collect::<Vec<_>>().join(" + ");
        lines.push(manager.get_message_with_args_in_language(
            "bad-combo",
            language,
            &[("items", items.as_str())],
        ));
    }

    if !assessment.suggestions.is_empty() {
        lines.push(manager.get_message_with_args_in_language(
            "suggestions",
            language,
            &[("items", assessment.suggestions.join(", ").as_str())],
        ));
    }

    lines.push(format_origin(assessment, manager, language));
    lines
}

fn clause_label(key: &str, manager: &LocalizationManager, language: &str) -> String {
    let message_key = format!("clause-{}", key);
    if manager.has_message(&message_key, language) || manager.has_message(&message_key, "en") {
        manager.get_message_in_language(&message_key, language, None)
    } else {
        key.replace('_', " ")
    }
}

fn format_origin(assessment: &Assessment, manager: &LocalizationManager, language: &str) -> String {
    let inference = &assessment.cuisine;
    let cuisine = match inference.cuisine.as_deref() {
        Some(cuisine) => cuisine,
        None => return manager.get_message_in_language("origin-none", language, None),
    };

    if !inference.confident {
        let score = inference.score.to_string();
        return manager.get_message_with_args_in_language(
            "origin-uncertain",
            language,
            &[("cuisine", cuisine), ("score", score.as_str())],
        );
    }

    match inference.flag_country() {
        Some(country) => {
            let flag = country.flag();
            manager.get_message_with_args_in_language(
                "origin-confident",
                language,
                &[("cuisine", cuisine), ("flag", flag.as_str())],
            )
        }
        None => manager.get_message_with_args_in_language(
            "origin-regional",
            language,
            &[("cuisine", cuisine)],
        ),
    }
}
