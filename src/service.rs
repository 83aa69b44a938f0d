//! Contract with the generative AI backend.
//!
//! The backend itself lives outside this crate. Everything here is
//! single-shot: no retries, no caching, and callers reduce every failure to
//! one generic notice.

use futures::future::{self, BoxFuture};
use log::error;

use crate::error::ServiceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// An encoded image (PNG, JPEG, ...) travelling to or from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Tag `data` with the MIME type sniffed from its header
    pub fn sniff(data: Vec<u8>) -> Self {
        let mime_type = image::guess_format(&data)
            .map(|format| format.to_mime_type())
            .unwrap_or("image/jpeg");
        Self::new(mime_type, data)
    }
}

/// Goal used for a critique when the student leaves it blank
pub const DEFAULT_CRITIQUE_GOAL: &str = "General Calligraphy";
pub const CRITIQUE_UNAVAILABLE: &str = "Unable to generate critique.";
pub const HISTORY_UNAVAILABLE: &str = "History unavailable.";
pub const HISTORY_FALLBACK: &str = "Could not fetch history.";

/// The AI backend as seen by the panels.
///
/// Panels never call these methods directly; they go through
/// [`generate_exemplar`], [`critique`] and [`style_history`], which build the
/// prompts, validate input and normalize replies. Implementors only move
/// bytes to and from their model.
///
/// The returned futures run on a worker thread (see [`crate::task::Request`]),
/// so they must own everything they need. A client typically clones its HTTP
/// handle and API key into an `async move` block.
///
/// To wire in a real client, hand it to the app in place of
/// [`UnconfiguredService`]:
///
/// ```ignore
/// let service: Arc<dyn CalligraphyService> = Arc::new(MyClient::new(api_key));
/// eframe::run_native(
///     "InkFlow",
///     options,
///     Box::new(move |cc| Ok(Box::new(InkFlowApp::new(cc, config, service)))),
/// )
/// ```
pub trait CalligraphyService: Send + Sync {
    /// Render the image described by `prompt`
    fn generate_exemplar(&self, prompt: String) -> BoxFuture<'static, ServiceResult<EncodedImage>>;

    /// Free-form feedback on a practice photo, guided by `prompt`
    fn critique(&self, image: EncodedImage, prompt: String) -> BoxFuture<'static, ServiceResult<String>>;

    /// Plain text answer to `prompt`
    fn describe(&self, prompt: String) -> BoxFuture<'static, ServiceResult<String>>;
}

/// Stand-in backend used when no API client is wired in.
///
/// Every request fails with [`ServiceError::MissingApiKey`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredService;

impl CalligraphyService for UnconfiguredService {
    fn generate_exemplar(&self, _prompt: String) -> BoxFuture<'static, ServiceResult<EncodedImage>> {
        Box::pin(future::ready(Err(ServiceError::MissingApiKey)))
    }

    fn critique(&self, _image: EncodedImage, _prompt: String) -> BoxFuture<'static, ServiceResult<String>> {
        Box::pin(future::ready(Err(ServiceError::MissingApiKey)))
    }

    fn describe(&self, _prompt: String) -> BoxFuture<'static, ServiceResult<String>> {
        Box::pin(future::ready(Err(ServiceError::MissingApiKey)))
    }
}

pub fn exemplar_prompt(text: &str, style_name: &str) -> String {
    format!(
        "Create a high-quality, artistic calligraphy image of the text \"{text}\". \
         The style must be strictly \"{style_name}\". \
         Ensure high contrast, black ink on clean white or textured parchment paper. \
         The focus should be solely on the typography and stroke quality. No background objects."
    )
}

pub fn critique_prompt(style_goal: &str) -> String {
    format!(
        "Act as a master calligraphy professor. Analyze this student's work. \
         The student is attempting: {style_goal}.\n\
         Provide a concise, constructive critique focusing on:\n\
         1. Stroke consistency (thick vs thin).\n\
         2. Spacing and rhythm.\n\
         3. Letterform accuracy.\n\
         4. One specific actionable tip for improvement.\n\
         Format with markdown bolding for key terms."
    )
}

pub fn history_prompt(style_name: &str) -> String {
    format!(
        "Write a short, engaging paragraph (max 100 words) about the history and key \
         characteristics of the {style_name} calligraphy style. \
         Focus on its origin and what makes it unique."
    )
}

/// Blank goals fall back to [`DEFAULT_CRITIQUE_GOAL`]
pub fn critique_goal(style_goal: &str) -> &str {
    let goal = style_goal.trim();
    if goal.is_empty() { DEFAULT_CRITIQUE_GOAL } else { goal }
}

/// Ask for an exemplar of `text` in `style_name`
pub fn generate_exemplar(
    service: &dyn CalligraphyService,
    text: &str,
    style_name: &str,
) -> BoxFuture<'static, ServiceResult<EncodedImage>> {
    if text.trim().is_empty() {
        return Box::pin(future::ready(Err(ServiceError::EmptyText)));
    }
    let request = service.generate_exemplar(exemplar_prompt(text, style_name));
    Box::pin(async move {
        let image = request.await.inspect_err(|err| error!("Generation failed: {}", err))?;
        if image.data.is_empty() {
            error!("Generation failed: {}", ServiceError::NoImageGenerated);
            return Err(ServiceError::NoImageGenerated);
        }
        Ok(image)
    })
}

/// Ask for a critique of `image` against `style_goal`
pub fn critique(
    service: &dyn CalligraphyService,
    image: EncodedImage,
    style_goal: &str,
) -> BoxFuture<'static, ServiceResult<String>> {
    if image.data.is_empty() {
        return Box::pin(future::ready(Err(ServiceError::EmptyImage)));
    }
    let request = service.critique(image, critique_prompt(critique_goal(style_goal)));
    Box::pin(async move {
        let text = request.await.inspect_err(|err| error!("Critique failed: {}", err))?;
        if text.trim().is_empty() {
            Ok(CRITIQUE_UNAVAILABLE.to_owned())
        } else {
            Ok(text)
        }
    })
}

/// Descriptive history of `style_name`. Never fails: errors become
/// [`HISTORY_FALLBACK`].
pub fn style_history(service: &dyn CalligraphyService, style_name: &str) -> BoxFuture<'static, String> {
    let request = service.describe(history_prompt(style_name));
    Box::pin(async move {
        match request.await {
            Ok(text) if text.trim().is_empty() => HISTORY_UNAVAILABLE.to_owned(),
            Ok(text) => text,
            Err(err) => {
                error!("History fetch failed: {}", err);
                HISTORY_FALLBACK.to_owned()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critique_goal_defaults() {
        assert_eq!(critique_goal(""), DEFAULT_CRITIQUE_GOAL);
        assert_eq!(critique_goal("   "), DEFAULT_CRITIQUE_GOAL);
        assert_eq!(critique_goal(" Uncial "), "Uncial");
    }

    #[test]
    fn test_prompts_mention_inputs() {
        let prompt = exemplar_prompt("InkFlow", "Copperplate");
        assert!(prompt.contains("\"InkFlow\""));
        assert!(prompt.contains("strictly \"Copperplate\""));

        assert!(critique_prompt("Italic Hand").contains("attempting: Italic Hand."));
        assert!(history_prompt("Uncial").contains("of the Uncial calligraphy style"));
    }

    #[test]
    fn test_sniff_png() {
        let mut bytes = Vec::new();
        image::RgbaImage::new(1, 1)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(EncodedImage::sniff(bytes).mime_type, "image/png");
    }
}
