//! Readiness report: per-pillar scores derived from assessment answers.

use crate::assessment::{sections, FormData};
use crate::types::Pillar;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Exploring,
    Developing,
    Established,
    Advanced,
    Leading,
}

impl MaturityLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 1.5 {
            MaturityLevel::Exploring
        } else if score < 2.5 {
            MaturityLevel::Developing
        } else if score < 3.5 {
            MaturityLevel::Established
        } else if score < 4.5 {
            MaturityLevel::Advanced
        } else {
            MaturityLevel::Leading
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityLevel::Exploring => "Exploring",
            MaturityLevel::Developing => "Developing",
            MaturityLevel::Established => "Established",
            MaturityLevel::Advanced => "Advanced",
            MaturityLevel::Leading => "Leading",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar: Pillar,
    /// Mean of answered question scores, 0–5, one decimal. 0 when unanswered.
    pub score: f64,
    /// Number of scored answers that contributed.
    pub answered: usize,
}

impl PillarScore {
    pub fn has_data(&self) -> bool {
        self.answered > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub pillar: Pillar,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub overall: f64,
    pub maturity: MaturityLevel,
    pub pillars: Vec<PillarScore>,
    pub recommendations: Vec<Recommendation>,
    /// True for the built-in example shown before any answers exist.
    #[serde(default)]
    pub sample: bool,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// How many of the lowest-scoring pillars get a recommendation.
const RECOMMENDATION_COUNT: usize = 2;

fn recommendation(pillar: Pillar) -> Recommendation {
    let (title, detail) = match pillar {
        Pillar::DataFoundation => (
            "Strengthen your data foundation",
            "Inventory the data behind your top use case, assign owners and fix the worst quality issues before modelling.",
        ),
        Pillar::AiStrategy => (
            "Turn interest into a funded AI strategy",
            "Pick two or three use cases with clear ROI, secure an executive sponsor and track them on the roadmap.",
        ),
        Pillar::Technology => (
            "Prepare your technology stack",
            "Make core systems reachable through APIs and agree on a sandbox where AI tools can be trialled safely.",
        ),
        Pillar::TalentCulture => (
            "Build skills and confidence",
            "Start with AI fundamentals training for all staff and a prompt engineering course for early adopters.",
        ),
        Pillar::Governance => (
            "Put AI governance in place",
            "Publish an acceptable-use policy and run a DPIA for every use case that touches personal data.",
        ),
    };
    Recommendation {
        pillar,
        title: title.to_string(),
        detail: detail.to_string(),
    }
}

impl ReadinessReport {
    pub fn from_answers(answers: &FormData) -> Self {
        let pillars: Vec<PillarScore> = Pillar::all()
            .iter()
            .map(|pillar| {
                let scores: Vec<f64> = sections()
                    .iter()
                    .flat_map(|s| s.questions.iter().map(move |q| (s, q)))
                    .filter(|(_, q)| q.pillar == Some(*pillar))
                    .filter_map(|(s, q)| {
                        let answer = answers.get(&s.id)?.get(&q.id)?;
                        q.score(answer)
                    })
                    .collect();
                let score = if scores.is_empty() {
                    0.0
                } else {
                    round1(scores.iter().sum::<f64>() / scores.len() as f64)
                };
                PillarScore {
                    pillar: *pillar,
                    score,
                    answered: scores.len(),
                }
            })
            .collect();
        Self::from_pillars(pillars, false)
    }

    fn from_pillars(pillars: Vec<PillarScore>, sample: bool) -> Self {
        let with_data: Vec<&PillarScore> = pillars.iter().filter(|p| p.has_data()).collect();
        let overall = if with_data.is_empty() {
            0.0
        } else {
            round1(with_data.iter().map(|p| p.score).sum::<f64>() / with_data.len() as f64)
        };

        let mut weakest = with_data.clone();
        weakest.sort_by(|a, b| a.score.total_cmp(&b.score));
        let recommendations = weakest
            .iter()
            .take(RECOMMENDATION_COUNT)
            .map(|p| recommendation(p.pillar))
            .collect();

        Self {
            overall,
            maturity: MaturityLevel::from_score(overall),
            pillars,
            recommendations,
            sample,
        }
    }

    /// Example report shown on the dashboard before an assessment exists.
    pub fn sample() -> Self {
        let scores = [
            (Pillar::DataFoundation, 2.4),
            (Pillar::AiStrategy, 3.1),
            (Pillar::Technology, 3.6),
            (Pillar::TalentCulture, 2.2),
            (Pillar::Governance, 2.9),
        ];
        Self::from_pillars(
            scores
                .into_iter()
                .map(|(pillar, score)| PillarScore {
                    pillar,
                    score,
                    answered: 1,
                })
                .collect(),
            true,
        )
    }

    pub fn has_data(&self) -> bool {
        self.pillars.iter().any(PillarScore::has_data)
    }

    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarScore> {
        self.pillars.iter().find(|p| p.pillar == pillar)
    }
}
