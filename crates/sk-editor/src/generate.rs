//! Requests to the external image-generation service.
//!
//! The drawing surface never talks to the network itself. It validates a
//! submission, builds a [`GenerationRequest`], and tracks whether a request
//! is in flight. The host performs the HTTP call (or any other transport)
//! through an [`ImageGenerator`] and hands the response back.
//!
//! There is no retry and no cancellation: a failed request is logged and
//! the session returns to idle with its previous result untouched.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output image size requested from the service.
pub const RESULT_WIDTH: u32 = 512;
pub const RESULT_HEIGHT: u32 = 512;
/// Images generated per request.
pub const NUM_OUTPUTS: u32 = 1;

/// Model used when a drawing is attached (image-to-image).
pub const IMAGE_MODEL: &str = "stability-ai/stable-diffusion";
/// Model used for prompt-only requests.
pub const TEXT_MODEL: &str = "prompthero/openjourney";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("nothing to submit: enter a prompt or draw something")]
    Empty,

    #[error("drawing is not a base64 image data URL")]
    InvalidImage,

    #[error("a generation request is already in progress")]
    Busy,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Rejected(#[from] SubmitError),

    #[error("malformed service response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("generation failed: {0}")]
    Failed(String),

    #[error("service returned no image")]
    NoOutput,

    #[error("no generation request is in progress")]
    NotPending,
}

/// Inputs passed to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationInput {
    pub prompt: String,
    pub grid_size: u32,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_image: Option<String>,
}

/// A validated request, ready to serialize for the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: &'static str,
    pub input: GenerationInput,
}

impl GenerationRequest {
    /// Validate a submission. `image` is the exported drawing as a data
    /// URL; pass `None` (or an empty string) for a blank canvas.
    pub fn new(prompt: &str, image: Option<&str>) -> Result<Self, SubmitError> {
        let prompt = prompt.trim();
        let image = image.map(str::trim).filter(|s| !s.is_empty());

        if prompt.is_empty() && image.is_none() {
            return Err(SubmitError::Empty);
        }
        if let Some(url) = image {
            decode_data_url(url).ok_or(SubmitError::InvalidImage)?;
        }

        Ok(Self {
            model: if image.is_some() { IMAGE_MODEL } else { TEXT_MODEL },
            input: GenerationInput {
                prompt: prompt.to_string(),
                grid_size: NUM_OUTPUTS,
                width: RESULT_WIDTH,
                height: RESULT_HEIGHT,
                init_image: image.map(str::to_string),
            },
        })
    }

    pub fn to_json(&self) -> String {
        // Plain strings and integers only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Encode image bytes as a `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URL into its MIME type and bytes.
pub fn decode_data_url(url: &str) -> Option<(&str, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    if !mime.starts_with("image/") {
        return None;
    }
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime, bytes))
}

/// `output` is a URL or a list of URLs depending on the model.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Output {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<Output>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Extract the first result image URL from a service response.
pub fn parse_response(json: &str) -> Result<String, GenerationError> {
    let prediction: Prediction = serde_json::from_str(json)?;
    if let Some(error) = prediction.error.filter(|e| !e.is_null()) {
        let message = match error {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(GenerationError::Failed(message));
    }
    if let Some(status) = prediction.status.as_deref()
        && matches!(status, "failed" | "canceled")
    {
        return Err(GenerationError::Failed(format!("prediction {status}")));
    }
    let url = match prediction.output {
        Some(Output::One(url)) => Some(url),
        Some(Output::Many(urls)) => urls.into_iter().next(),
        None => None,
    };
    url.filter(|u| !u.is_empty()).ok_or(GenerationError::NoOutput)
}

/// The external generation service.
pub trait ImageGenerator {
    /// Perform one request and return the raw response body.
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Request lifecycle: idle → pending → idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Pending,
}

/// Tracks the single in-flight generation request and the latest result.
#[derive(Debug, Default)]
pub struct GenerationSession {
    pending: Option<GenerationRequest>,
    result_url: Option<String>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GenerationState {
        if self.pending.is_some() {
            GenerationState::Pending
        } else {
            GenerationState::Idle
        }
    }

    /// URL of the most recent successful result.
    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    /// Validate a submission and mark it in flight.
    pub fn begin(
        &mut self,
        prompt: &str,
        image: Option<&str>,
    ) -> Result<&GenerationRequest, SubmitError> {
        if self.pending.is_some() {
            return Err(SubmitError::Busy);
        }
        let request = GenerationRequest::new(prompt, image)?;
        log::debug!(
            "submitting to {} (image attached: {})",
            request.model,
            request.input.init_image.is_some()
        );
        Ok(&*self.pending.insert(request))
    }

    /// Complete the in-flight request with the service's response body.
    pub fn complete(&mut self, response: &str) -> Result<&str, GenerationError> {
        if self.pending.take().is_none() {
            return Err(GenerationError::NotPending);
        }
        match parse_response(response) {
            Ok(url) => Ok(self.result_url.insert(url).as_str()),
            Err(e) => {
                log::warn!("generation failed: {e}");
                Err(e)
            }
        }
    }

    /// Complete the in-flight request with a transport failure.
    pub fn fail(&mut self, message: &str) -> GenerationError {
        self.pending = None;
        log::warn!("generation request failed: {message}");
        GenerationError::Failed(message.to_string())
    }

    /// Drop the latest result (the canvas was cleared).
    pub fn reset_result(&mut self) {
        self.result_url = None;
    }

    /// Submit and wait on a synchronous generator.
    pub fn run(
        &mut self,
        generator: &dyn ImageGenerator,
        prompt: &str,
        image: Option<&str>,
    ) -> Result<String, GenerationError> {
        let request = self.begin(prompt, image)?.clone();
        match generator.generate(&request) {
            Ok(body) => self.complete(&body).map(str::to_string),
            Err(e) => Err(self.fail(&e.to_string())),
        }
    }
}
