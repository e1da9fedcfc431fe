//! Request/response shapes exchanged with the host environment.
//!
//! Requests are tagged by `action`; responses carry either the payload or an
//! `error` message, never both.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::SellerContext;
use crate::generate::StructuredGenerator;
use crate::parser::classify;
use crate::record::ProfileRecord;
use crate::synth::{extract_with_model, synthesize};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    #[serde(rename = "getContent")]
    GetContent { text: String },
    #[serde(rename = "getTopHooks", rename_all = "camelCase")]
    GetTopHooks { ai_data: ProfileRecord },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    #[serde(rename_all = "camelCase")]
    Content {
        data: ProfileRecord,
        ai_data: ProfileRecord,
    },
    Hooks { hooks: Vec<String> },
    Error { error: String },
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

/// Serve one request. Failures become `Response::Error`.
pub async fn dispatch<G>(request: Request, generator: &G, seller: &SellerContext) -> Response
where
    G: StructuredGenerator + ?Sized,
{
    match request {
        Request::GetContent { text } => {
            let data = classify(&text);
            match extract_with_model(generator, &text).await {
                Ok(ai_data) => {
                    info!("Extracted profile for {:?}", data.name);
                    Response::Content { data, ai_data }
                }
                Err(e) => {
                    error!("Error extracting content: {}", e);
                    Response::Error { error: e.to_string() }
                }
            }
        }
        Request::GetTopHooks { ai_data } => match synthesize(generator, &ai_data, seller).await {
            Ok(set) => {
                info!("Top {} hooks ready", set.hooks.len());
                Response::Hooks { hooks: set.hooks }
            }
            Err(e) => {
                error!("Error generating hooks: {}", e);
                Response::Error { error: e.to_string() }
            }
        },
    }
}
