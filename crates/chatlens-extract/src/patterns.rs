//! Best-effort regex heuristics over assistant prose and tool output.
//!
//! Everything here is shape-matching: a 24-hex substring next to the word
//! "project" is treated as a project id whether or not such a project
//! exists. Callers must treat results as hints, not facts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// A project mention pulled out of prose: id always, name when adjacent
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRef {
    pub id: String,
    pub name: Option<String>,
}

/// A leaderboard-style row keyed by a known model-type literal
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRow {
    pub model_type: String,
    pub id: Option<String>,
    pub score: Option<f64>,
    pub is_recommended: bool,
}

// Upstream object ids are 24 lowercase hex characters (BSON ObjectId).
const HEX_ID: &str = "[0-9a-f]{24}";

static NAMED_PROJECT: Lazy<Regex> = Lazy::new(|| {
    // Project "Churn Q3" (68a1b2c3d4e5f6a7b8c9d0e1)
    // project 'Churn Q3' (id: 68a1b2c3d4e5f6a7b8c9d0e1)
    Regex::new(&format!(
        r#"(?i)project\s+["'“]([^"'”\n]{{1,80}})["'”]\s*\(\s*(?:id:\s*)?({HEX_ID})\s*\)"#
    ))
    .unwrap()
});

static BARE_PROJECT: Lazy<Regex> = Lazy::new(|| {
    // project id: 68a1b2c3d4e5f6a7b8c9d0e1 / project 68a1b2c3d4e5f6a7b8c9d0e1
    Regex::new(&format!(r"(?i)project(?:\s+id)?\s*[:=]?\s*`?({HEX_ID})`?")).unwrap()
});

static HEX_IN_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(HEX_ID).unwrap());

static SCORE_IN_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+\.\d+(?:[eE][-+]?\d+)?").unwrap());

static QUOTED_PAIR: Lazy<Regex> = Lazy::new(|| {
    // "projectId": "68a..." / "target": "churned" / "modelCount": 24
    Regex::new(r#""([A-Za-z_][A-Za-z0-9_]*)"\s*:\s*(?:"([^"]*)"|([-+]?[0-9.eE+]+|true|false))"#)
        .unwrap()
});

static BARE_PAIR: Lazy<Regex> = Lazy::new(|| {
    // target: churned / metric=LogLoss (one pair per line segment)
    Regex::new(r"(?m)^\s*[-*]?\s*([A-Za-z_][A-Za-z0-9_ ]{0,40}?)\s*[:=]\s*(\S[^\n,;]*)").unwrap()
});

/// Model-type name literals the leaderboard heuristic keys on.
///
/// Ordered longest-first so the most specific literal wins per line.
const MODEL_TYPE_LITERALS: &[&str] = &[
    "eXtreme Gradient Boosted Trees Classifier",
    "eXtreme Gradient Boosted Trees Regressor",
    "Light Gradient Boosting on ElasticNet Predictions",
    "Regularized Logistic Regression",
    "Generalized Additive2 Model",
    "Generalized Additive Model",
    "Light Gradient Boosted Trees",
    "Gradient Boosted Greedy Trees",
    "Keras Deep Residual Network",
    "Elastic-Net Classifier",
    "Elastic-Net Regressor",
    "Gradient Boosted Trees",
    "RandomForest Classifier",
    "RandomForest Regressor",
    "Random Forest",
    "Ridge Regression",
    "Decision Tree",
    "AVG Blender",
    "ENET Blender",
    "RuleFit Classifier",
    "Eureqa",
];

/// Extract 24-hex project ids paired with adjacent names where present.
///
/// Named matches are preferred; bare id mentions near the word "project"
/// yield id-only refs. Duplicate ids are collapsed, first occurrence wins.
pub fn extract_project_refs(text: &str) -> Vec<ProjectRef> {
    let mut refs: Vec<ProjectRef> = Vec::new();

    for caps in NAMED_PROJECT.captures_iter(text) {
        push_ref(
            &mut refs,
            ProjectRef {
                id: caps[2].to_string(),
                name: Some(caps[1].trim().to_string()),
            },
        );
    }

    for caps in BARE_PROJECT.captures_iter(text) {
        push_ref(
            &mut refs,
            ProjectRef {
                id: caps[1].to_string(),
                name: None,
            },
        );
    }

    refs
}

fn push_ref(refs: &mut Vec<ProjectRef>, candidate: ProjectRef) {
    if let Some(existing) = refs.iter_mut().find(|r| r.id == candidate.id) {
        // A named mention upgrades an earlier bare one
        if existing.name.is_none() {
            existing.name = candidate.name;
        }
        return;
    }
    refs.push(candidate);
}

/// Extract leaderboard-style rows from a pseudo-table.
///
/// A row is any line containing a known model-type literal; the first
/// decimal number after the literal is taken as its score, a 24-hex
/// substring as its id, and a trailing recommendation marker sets
/// `is_recommended`.
pub fn extract_model_rows(text: &str) -> Vec<ModelRow> {
    let mut rows = Vec::new();

    for line in text.lines() {
        let Some((literal, after)) = match_model_literal(line) else {
            continue;
        };

        let score = SCORE_IN_LINE
            .find(after)
            .and_then(|m| m.as_str().parse::<f64>().ok());
        let id = HEX_IN_LINE.find(line).map(|m| m.as_str().to_string());
        let lowered = line.to_lowercase();
        let is_recommended =
            lowered.contains("recommended") || line.contains('★') || lowered.contains("(best)");

        rows.push(ModelRow {
            model_type: literal.to_string(),
            id,
            score,
            is_recommended,
        });
    }

    rows
}

fn match_model_literal(line: &str) -> Option<(&'static str, &str)> {
    for literal in MODEL_TYPE_LITERALS {
        if let Some(pos) = line.find(literal) {
            return Some((literal, &line[pos + literal.len()..]));
        }
    }
    None
}

/// Extract key/value pairs from serialized tool results.
///
/// Handles JSON-ish `"key": value` pairs and bare `key: value` lines. Keys
/// are normalized to snake_case; later occurrences of a key overwrite
/// earlier ones.
pub fn extract_key_values(text: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();

    for caps in QUOTED_PAIR.captures_iter(text) {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        pairs.insert(snake_case(&caps[1]), value);
    }

    for caps in BARE_PAIR.captures_iter(text) {
        let key = caps[1].trim();
        // Quoted pairs already matched above; skip fragments of them
        if key.contains('"') {
            continue;
        }
        pairs.insert(snake_case(key), caps[2].trim().to_string());
    }

    pairs
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_lower = false;

    for ch in key.trim().chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else if ch == ' ' {
            out.push('_');
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }

    out
}
