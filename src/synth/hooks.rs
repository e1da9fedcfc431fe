use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompts::{hook_instructions, hook_prompt};
use crate::config::SellerContext;
use crate::generate::{generate_object, GenerationError, StructuredGenerator};
use crate::record::ProfileRecord;

pub const HOOK_COUNT: usize = 3;

/// Hooks shaped like `"quoted feature" --- justification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HookSet {
    #[schemars(length(equal = 3))]
    pub hooks: Vec<String>,
}

/// Turn a record into exactly three hooks via the generation service.
pub async fn synthesize<G>(
    generator: &G,
    record: &ProfileRecord,
    seller: &SellerContext,
) -> Result<HookSet, GenerationError>
where
    G: StructuredGenerator + ?Sized,
{
    let set: HookSet = generate_object(
        generator,
        "profile_hooks",
        &hook_instructions(seller),
        &hook_prompt(record),
    )
    .await?;

    if set.hooks.len() != HOOK_COUNT {
        return Err(GenerationError::SchemaValidation(format!(
            "expected {} hooks, got {}",
            HOOK_COUNT,
            set.hooks.len()
        )));
    }

    debug!("Generated hooks: {:?}", set.hooks);
    Ok(set)
}
