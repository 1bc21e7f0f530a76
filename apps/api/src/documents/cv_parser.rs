//! CV Parser — keyword extraction of qualifications, skills and experience
//! indicators from a CV's plain text.
//!
//! The keyword lists target legal-profession CVs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::similarity::Tokenizer;

const QUALIFICATION_KEYWORDS: &[&str] = &[
    "law",
    "legal",
    "jurisprudence",
    "degree",
    "master",
    "bachelor",
    "llb",
    "jd",
];

const SKILL_KEYWORDS: &[&str] = &[
    "negotiation",
    "contract",
    "research",
    "analysis",
    "drafting",
    "litigation",
    "compliance",
];

const EXPERIENCE_KEYWORDS: &[&str] = &["years", "experience", "worked", "firm", "firms", "practice"];

/// Keywords found in a CV, deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvProfile {
    pub qualifications: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
}

pub fn parse_cv_text(tokenizer: &Tokenizer, text: &str) -> CvProfile {
    let tokens = tokenizer.tokenize(text);

    let profile = CvProfile {
        qualifications: matching(&tokens, QUALIFICATION_KEYWORDS),
        skills: matching(&tokens, SKILL_KEYWORDS),
        experience: matching(&tokens, EXPERIENCE_KEYWORDS),
    };
    debug!("Parsed CV profile: {profile:?}");
    profile
}

fn matching(tokens: &[String], keywords: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| keywords.contains(&t.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
