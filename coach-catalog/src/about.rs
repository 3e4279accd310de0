use serde::{Deserialize, Serialize};
use crate::session::strings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coach {
    pub name: String,
    pub role: String,
    pub experience: String,
    pub expertise: String,
    pub bio: String,
}

/// Headline result, e.g. "85%" / "Interview rate increase".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub metric: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutPage {
    pub headline: String,
    pub mission: Vec<String>,
    pub differentiators: Vec<String>,
    pub coaches: Vec<Coach>,
    pub outcomes: Vec<Outcome>,
    pub during_program: Vec<String>,
    pub after_completion: Vec<String>,
}

fn coach(name: &str, role: &str, experience: &str, expertise: &str, bio: &str) -> Coach {
    Coach {
        name: name.to_string(),
        role: role.to_string(),
        experience: experience.to_string(),
        expertise: expertise.to_string(),
        bio: bio.to_string(),
    }
}

fn outcome(metric: &str, description: &str) -> Outcome {
    Outcome { metric: metric.to_string(), description: description.to_string() }
}

pub fn coaches() -> Vec<Coach> {
    vec![
        coach(
            "Saranya Ray",
            "Lead Career Coach",
            "12+ years in talent acquisition and career coaching",
            "CV optimization, interview preparation, tech recruitment",
            "Former senior hiring manager at leading tech companies. Specialized in helping professionals navigate career transitions and land roles at top-tier organizations.",
        ),
        coach(
            "Industry Expert Panel",
            "Advisory Coaches",
            "15+ years combined experience",
            "Networking strategy, skills development, leadership coaching",
            "A collective of experienced professionals from Fortune 500 companies and innovative startups, bringing diverse perspectives to your career journey.",
        ),
    ]
}

pub fn outcomes() -> Vec<Outcome> {
    vec![
        outcome("85%", "Interview rate increase"),
        outcome("3-4x", "More CV responses"),
        outcome("30%", "Average salary boost"),
        outcome("2 weeks", "Avg. time to first interview"),
    ]
}

pub fn about_page() -> AboutPage {
    AboutPage {
        headline: "We're on a mission to help ambitious professionals move faster in their careers through evidence-based coaching and practical, actionable guidance.".to_string(),
        mission: strings(&[
            "Every professional deserves expert guidance to unlock their career potential. We bridge the gap between where you are and where you want to be through personalized, 1:1 coaching sessions that deliver immediate, practical value.",
            "Our approach combines industry expertise with proven frameworks to help you optimize your CV, master networking, and prepare for the interviews that matter.",
        ]),
        differentiators: strings(&[
            "Real hiring managers & recruiters as coaches",
            "Practical templates & frameworks you can use immediately",
            "Evidence-based strategies, not generic advice",
            "Fixed pricing - no hidden fees or upsells",
            "Post-session resources & follow-up support",
        ]),
        coaches: coaches(),
        outcomes: outcomes(),
        during_program: strings(&[
            "Detailed analysis of your current position",
            "Personalized action plans for each area",
            "Templates and frameworks to implement immediately",
            "Real-time feedback and guidance",
        ]),
        after_completion: strings(&[
            "Optimized CV that passes ATS systems",
            "Networking strategy with proven templates",
            "Skills roadmap aligned with market demands",
            "Interview preparation frameworks",
        ]),
    }
}
