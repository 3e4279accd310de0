use serde::{Deserialize, Serialize};
use coach_core::calendar::WEEKLY_TEMPLATE;

/// One 60-minute coaching meeting of the package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingSession {
    pub number: u8,
    pub title: String,
    pub duration_minutes: u32,
    pub weekday: String,
    pub time: String,
    pub summary: String,
    pub objective: String,
    pub deliverables: Vec<String>,
    pub outcomes: Vec<String>,
}

/// The three sessions sold as a single purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub sessions: u32,
    pub minutes_per_session: u32,
    pub price: i32,
    pub currency: String,
}

impl Package {
    pub const NAME: &'static str = "3-Session Career Coaching";
    pub const SESSION_MINUTES: u32 = 60;

    pub fn new(price: i32, currency: &str) -> Self {
        Self {
            name: Self::NAME.to_string(),
            sessions: WEEKLY_TEMPLATE.len() as u32,
            minutes_per_session: Self::SESSION_MINUTES,
            price,
            currency: currency.to_string(),
        }
    }

    /// e.g. "3 × 60 minutes"
    pub fn duration_label(&self) -> String {
        format!("{} × {} minutes", self.sessions, self.minutes_per_session)
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new(300, "USD")
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sessions() -> Vec<CoachingSession> {
    let details: [(&str, &str, &[&str], &[&str]); 3] = [
        (
            "Detailed CV critique, keyword optimization for ATS, formatting tips, and a polished summary that gets you noticed.",
            "Transform your CV into an interview-generating machine that passes ATS systems and impresses hiring managers.",
            &[
                "Detailed CV critique with specific improvement recommendations",
                "Optimized CV version with ATS-friendly formatting",
                "Industry-specific keyword list tailored to your target roles",
                "Achievement rewriting framework for ongoing use",
                "Improvement checklist with priority actions",
                "PDF summary with all action items",
            ],
            &[
                "85% higher response rate from applications",
                "Pass ATS screening filters consistently",
                "Stand out in competitive candidate pools",
                "Clear, quantified achievements that impress",
            ],
        ),
        (
            "Learn how to network effectively, request referrals, craft compelling messages, and optimize your LinkedIn profile.",
            "Master the art of professional networking and unlock the hidden job market through strategic referrals.",
            &[
                "Personalized networking strategy for your industry",
                "Ready-to-use outreach message templates",
                "LinkedIn profile audit with optimization checklist",
                "Referral request framework and scripts",
                "Network mapping exercise and action plan",
                "Follow-up sequence templates",
            ],
            &[
                "3-4x more meaningful connections",
                "Higher response rates to outreach messages",
                "Regular referral opportunities",
                "Stronger LinkedIn presence and visibility",
            ],
        ),
        (
            "Personal skill-gap analysis, recommended learning plan, mock-interview tips, and behavioral answer frameworks.",
            "Identify skill gaps, create a learning roadmap, and master behavioral interviews to land your target role.",
            &[
                "Personal skill-gap analysis report",
                "Recommended learning roadmap with resources",
                "Mock interview with detailed feedback",
                "Behavioral answer templates (STAR method)",
                "Common interview questions for your field",
                "Salary negotiation tips and frameworks",
            ],
            &[
                "Confidence in interviews",
                "Clear learning path aligned with market needs",
                "Compelling behavioral answer examples",
                "30% average salary increase through negotiation",
            ],
        ),
    ];

    WEEKLY_TEMPLATE
        .iter()
        .zip(details)
        .enumerate()
        .map(|(i, (template, (summary, objective, deliverables, outcomes)))| CoachingSession {
            number: (i + 1) as u8,
            title: template.title.to_string(),
            duration_minutes: Package::SESSION_MINUTES,
            weekday: template.weekday.to_string(),
            time: template.time.to_string(),
            summary: summary.to_string(),
            objective: objective.to_string(),
            deliverables: strings(deliverables),
            outcomes: strings(outcomes),
        })
        .collect()
}
