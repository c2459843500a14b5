use ql_core::GenerationRequest;

/// Requests above this many words ask for a comprehensive article.
const COMPREHENSIVE_THRESHOLD: u32 = 800;

/// Prompt for the article body.
pub fn body_prompt(request: &GenerationRequest) -> String {
    let depth = if request.word_count > COMPREHENSIVE_THRESHOLD {
        "comprehensive"
    } else {
        "concise"
    };
    format!(
        "Write a {} blog article about '{}' in a {} tone. \
         The article should be approximately {} words. \
         Include SEO-optimized content with proper headings and structure. \
         Make it engaging and informative.",
        depth, request.keywords, request.tone, request.word_count
    )
}

/// Prompt for the article title.
pub fn title_prompt(request: &GenerationRequest) -> String {
    format!(
        "Generate an SEO-optimized, engaging title for a blog article about '{}' in a {} tone. \
         The title should be catchy and under 60 characters.",
        request.keywords, request.tone
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_core::Tone;

    fn request(word_count: u32) -> GenerationRequest {
        GenerationRequest {
            keywords: "rust web services".to_string(),
            tone: Tone::Technical,
            word_count,
        }
    }

    #[test]
    fn body_prompt_picks_depth_by_word_count() {
        assert!(body_prompt(&request(800)).starts_with("Write a concise"));
        assert!(body_prompt(&request(801)).starts_with("Write a comprehensive"));
    }

    #[test]
    fn prompts_carry_keywords_and_tone() {
        let prompt = body_prompt(&request(500));
        assert!(prompt.contains("'rust web services'"));
        assert!(prompt.contains("technical tone"));
        assert!(prompt.contains("approximately 500 words"));

        let prompt = title_prompt(&request(500));
        assert!(prompt.contains("'rust web services'"));
        assert!(prompt.contains("under 60 characters"));
    }
}
