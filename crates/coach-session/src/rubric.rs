// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Evaluation summary built from advisory feedback.
//!
//! The Evaluation Service is prompted to grade each answer with lines such as
//! `Communication: 4/5`. The summary averages every such line per category
//! across all feedback recorded for a persona.

use std::sync::LazyLock;

use coach_core::RubricCategory;
use regex::Regex;

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[\s>*#•\-]*(job relevance|technical expertise|communication|problem solving|attitude\s*(?:&|and)\s*learning)[\s*]*[:：][\s*]*([1-5])(?:\.\d+)?\s*/\s*5",
    )
    .unwrap()
});

fn category_for(label: &str) -> Option<RubricCategory> {
    let label = label.to_lowercase();
    if label.starts_with("attitude") {
        return Some(RubricCategory::AttitudeLearning);
    }
    RubricCategory::ALL
        .into_iter()
        .find(|c| c.to_string().to_lowercase() == label)
}

/// Extract `(category, score)` pairs from one feedback text.
pub fn parse_scores(feedback: &str) -> Vec<(RubricCategory, u8)> {
    SCORE_LINE
        .captures_iter(feedback)
        .filter_map(|caps| {
            let category = category_for(caps.get(1)?.as_str())?;
            let score = caps.get(2)?.as_str().parse().ok()?;
            Some((category, score))
        })
        .collect()
}

/// Mean score for one rubric category; `None` when no feedback graded it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: RubricCategory,
    pub score: Option<f64>,
}

/// Summary shown once a persona's interview terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    /// One entry per rubric category, in report order.
    pub scores: Vec<CategoryScore>,
    /// Non-empty advisory feedback texts in answer order.
    pub feedback: Vec<String>,
    pub questions_asked: u32,
    pub answers_given: usize,
}

impl EvaluationSummary {
    /// Build a summary from the feedback recorded for each answer.
    pub fn from_feedback<'a, I>(feedback: I, questions_asked: u32, answers_given: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut totals = [(0u32, 0u32); RubricCategory::ALL.len()];
        let mut texts = Vec::new();

        for text in feedback {
            if text.trim().is_empty() {
                continue;
            }
            for (category, score) in parse_scores(text) {
                let slot = &mut totals[category_index(category)];
                slot.0 += u32::from(score);
                slot.1 += 1;
            }
            texts.push(text.to_string());
        }

        let scores = RubricCategory::ALL
            .into_iter()
            .zip(totals)
            .map(|(category, (sum, n))| CategoryScore {
                category,
                score: (n > 0).then(|| round1(f64::from(sum) / f64::from(n))),
            })
            .collect();

        Self {
            scores,
            feedback: texts,
            questions_asked,
            answers_given,
        }
    }

    pub fn score(&self, category: RubricCategory) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.category == category)
            .and_then(|s| s.score)
    }

    /// Mean of the categories that have a score.
    pub fn overall(&self) -> Option<f64> {
        let present: Vec<f64> = self.scores.iter().filter_map(|s| s.score).collect();
        if present.is_empty() {
            return None;
        }
        Some(round1(present.iter().sum::<f64>() / present.len() as f64))
    }
}

fn category_index(category: RubricCategory) -> usize {
    RubricCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
