//! Instruction templates and record rendering for generation requests.

use crate::config::SellerContext;
use crate::record::ProfileRecord;

/// Instructions for model-based profile extraction.
pub const PROFILE_EXTRACTION_INSTRUCTIONS: &str = "You are a friendly assistant!";

/// Instructions for hook generation, parameterized by seller.
pub fn hook_instructions(seller: &SellerContext) -> String {
    format!(
        r#"You will be given a LinkedIn profile.
You MUST provide the top 3 features of the profile, that are HIGHLY relevant to the company sales representative at "{company}"
The 3 features MUST be unique, MUST be factual, MUST be directly from the profile.
Quote the feature then give "---" and then provide a short justification of why it's relevant to the company sales representative at "{company}".

__________

{company} company information:

{about}"#,
        company = seller.company,
        about = seller.about,
    )
}

/// Render a record as the plain-text description sent to the model.
pub fn describe_profile(record: &ProfileRecord) -> String {
    let experience = record
        .experience
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{}. {} at {} ({}) - {}",
                i + 1,
                e.title,
                e.company,
                e.duration,
                e.location
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Name: {}\nHeadline: {}\nLocation: {}\nConnections: {}\nBio: {}\nExperience:\n{}",
        record.name, record.headline, record.location, record.connections, record.bio, experience
    )
}

pub fn hook_prompt(record: &ProfileRecord) -> String {
    format!("LinkedIn Profile Details:\n{}", describe_profile(record))
}
