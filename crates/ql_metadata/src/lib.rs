//! Derived-metadata computation for generated articles.
//!
//! Everything here is a pure function over (title, body, keywords): no I/O,
//! no shared state, safe to call concurrently. [`compute`] bundles the
//! individual metrics into an [`ArticleMetadata`] record.

use ql_core::ArticleMetadata;

/// Average reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Upper bound on the meta description, ellipsis included.
pub const META_DESCRIPTION_MAX_CHARS: usize = 150;

/// Description used when the body yields no first sentence.
pub const FALLBACK_META_DESCRIPTION: &str = "Generated blog article";

/// Number of non-empty whitespace-separated tokens.
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Estimated reading time in whole minutes, never below one.
pub fn reading_time(word_count: usize) -> u32 {
    std::cmp::max(1, word_count / WORDS_PER_MINUTE) as u32
}

/// Heuristic SEO quality score in [0, 100].
///
/// Sum of independently awarded buckets: title length (20 for the ideal
/// 50-60 char band, 10 for any other title of 30+ chars), keyword presence
/// in the title (25), body length (20 at 300 words plus 10 more at 1000),
/// and keyword density between 1% and 3% of body words (25).
pub fn seo_score(title: &str, body: &str, keywords: &str) -> f64 {
    let mut score: f64 = 0.0;

    let title_len = title.chars().count();
    if (50..=60).contains(&title_len) {
        score += 20.0;
    } else if title_len >= 30 {
        score += 10.0;
    }

    let keywords_lower = keywords.to_lowercase();
    if title.to_lowercase().contains(&keywords_lower) {
        score += 25.0;
    }

    let words = word_count(body);
    if words >= 300 {
        score += 20.0;
    }
    if words >= 1000 {
        score += 10.0;
    }

    // An empty body has no density; the bucket simply contributes nothing.
    let body_lower = body.to_lowercase();
    let total = body_lower.split_whitespace().count();
    if total > 0 {
        let matches = body_lower
            .split_whitespace()
            .filter(|word| word.contains(&keywords_lower))
            .count();
        let density = matches as f64 / total as f64 * 100.0;
        if (1.0..=3.0).contains(&density) {
            score += 25.0;
        }
    }

    score.min(100.0)
}

/// First sentence of the body, capped at 150 chars.
///
/// Sentences are delimited by the literal sequence ". "; a body without the
/// delimiter is itself the single sentence. Only an empty body falls back
/// to [`FALLBACK_META_DESCRIPTION`].
pub fn meta_description(body: &str) -> String {
    let first = body.split(". ").next().unwrap_or("");
    if first.is_empty() {
        return FALLBACK_META_DESCRIPTION.to_string();
    }
    if first.chars().count() > META_DESCRIPTION_MAX_CHARS {
        let truncated: String = first.chars().take(META_DESCRIPTION_MAX_CHARS - 3).collect();
        format!("{}...", truncated)
    } else {
        first.to_string()
    }
}

/// Lower-cased keyword tokens, split on runs of commas and/or whitespace.
/// Order and duplicates are preserved.
pub fn tags(keywords: &str) -> Vec<String> {
    keywords
        .to_lowercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compute the full metadata record for a generated article.
pub fn compute(title: &str, body: &str, keywords: &str) -> ArticleMetadata {
    let words = word_count(body);
    ArticleMetadata {
        word_count: words,
        reading_time_minutes: reading_time(words),
        seo_score: seo_score(title, body, keywords),
        meta_description: meta_description(body),
        tags: tags(keywords),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A body of `total` words, `matches` of which contain the keyword.
    fn body_with_density(keyword: &str, matches: usize, total: usize) -> String {
        let mut words = vec!["lorem"; total - matches];
        words.extend(std::iter::repeat(keyword).take(matches));
        words.join(" ")
    }

    #[test]
    fn word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("a b   c"), 3);
        assert_eq!(word_count("  leading and trailing  "), 3);
        assert_eq!(word_count("tabs\tand\nnewlines"), 3);
    }

    #[test]
    fn reading_time_is_at_least_one_minute() {
        assert_eq!(reading_time(0), 1);
        assert_eq!(reading_time(199), 1);
        assert_eq!(reading_time(200), 1);
        assert_eq!(reading_time(400), 2);
        assert_eq!(reading_time(1000), 5);
    }

    #[test]
    fn title_length_buckets() {
        let body = "";
        // 55 chars, inside the ideal band
        let ideal = "a".repeat(55);
        assert_eq!(seo_score(&ideal, body, "zzz"), 20.0);
        // 30 chars, long enough but outside the band
        let near = "a".repeat(30);
        assert_eq!(seo_score(&near, body, "zzz"), 10.0);
        // 65 chars, overshot the band
        let over = "a".repeat(65);
        assert_eq!(seo_score(&over, body, "zzz"), 10.0);
        // too short for any points
        assert_eq!(seo_score("short", body, "zzz"), 0.0);
    }

    #[test]
    fn keyword_in_title_is_case_insensitive() {
        assert_eq!(seo_score("All About SEO", "", "seo"), 25.0);
        assert_eq!(seo_score("nothing relevant", "", "seo"), 0.0);
    }

    #[test]
    fn body_length_buckets_are_cumulative() {
        let short = body_with_density("x", 0, 299);
        let medium = body_with_density("x", 0, 300);
        let long = body_with_density("x", 0, 1000);
        assert_eq!(seo_score("t", &short, "zzz"), 0.0);
        assert_eq!(seo_score("t", &medium, "zzz"), 20.0);
        assert_eq!(seo_score("t", &long, "zzz"), 30.0);
    }

    #[test]
    fn density_bucket_awards_between_one_and_three_percent() {
        // 2% density: 8 of 400 words
        let in_range = body_with_density("seo", 8, 400);
        assert_eq!(seo_score("t", &in_range, "seo"), 20.0 + 25.0);
        // 0.25%: too sparse
        let sparse = body_with_density("seo", 1, 400);
        assert_eq!(seo_score("t", &sparse, "seo"), 20.0);
        // 5%: keyword stuffing, no award
        let stuffed = body_with_density("seo", 20, 400);
        assert_eq!(seo_score("t", &stuffed, "seo"), 20.0);
        // boundaries are inclusive
        let at_one = body_with_density("seo", 4, 400);
        assert_eq!(seo_score("t", &at_one, "seo"), 45.0);
        let at_three = body_with_density("seo", 12, 400);
        assert_eq!(seo_score("t", &at_three, "seo"), 45.0);
    }

    #[test]
    fn empty_body_never_faults_and_scores_in_range() {
        let score = seo_score("The Ultimate Guide to SEO", "", "seo");
        assert_eq!(score, 25.0);
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn score_is_monotonic_in_the_title_keyword_bucket() {
        let body = body_with_density("seo", 8, 400);
        let without = seo_score("Unrelated headline", &body, "seo");
        let with = seo_score("Unrelated headline on SEO", &body, "seo");
        assert!(with >= without);
    }

    #[test]
    fn score_is_clamped_to_one_hundred() {
        // Every bucket at once: 20 + 25 + 20 + 10 + 25 = 100
        let title = format!("{} seo {}", "a".repeat(24), "b".repeat(25));
        assert_eq!(title.chars().count(), 54);
        let body = body_with_density("seo", 24, 1200);
        let score = seo_score(&title, &body, "seo");
        assert_eq!(score, 100.0);
        assert!(score <= 100.0);
    }

    #[test]
    fn end_to_end_reference_scenario_scores_seventy() {
        // Title under 30 chars (no length points) but containing the
        // keyword; 350-word body at 2% density.
        let title = "The Ultimate Guide to SEO";
        let body = body_with_density("seo", 7, 350);
        assert_eq!(seo_score(title, &body, "seo"), 70.0);
    }

    #[test]
    fn meta_description_takes_the_first_sentence() {
        assert_eq!(
            meta_description("Short sentence. Another one."),
            "Short sentence"
        );
    }

    #[test]
    fn meta_description_truncates_long_first_sentences() {
        let sentence = "x".repeat(200);
        let description = meta_description(&sentence);
        assert_eq!(description.chars().count(), 150);
        assert!(description.ends_with("..."));
        assert_eq!(&description[..147], &sentence[..147]);
    }

    #[test]
    fn meta_description_of_empty_body_is_the_fallback() {
        assert_eq!(meta_description(""), FALLBACK_META_DESCRIPTION);
    }

    #[test]
    fn meta_description_without_delimiter_is_the_whole_body() {
        assert_eq!(meta_description("no delimiter here"), "no delimiter here");
    }

    #[test]
    fn meta_description_truncation_is_char_boundary_safe() {
        let sentence = "é".repeat(200);
        let description = meta_description(&sentence);
        assert_eq!(description.chars().count(), 150);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn tags_split_on_commas_and_whitespace() {
        assert_eq!(
            tags("SEO, Marketing   tips"),
            vec!["seo", "marketing", "tips"]
        );
        assert_eq!(tags(",,leading, ,trailing,"), vec!["leading", "trailing"]);
        // duplicates and order preserved
        assert_eq!(tags("rust rust"), vec!["rust", "rust"]);
        assert!(tags("").is_empty());
    }

    #[test]
    fn compute_assembles_every_metric() {
        let body = format!(
            "{}. {}",
            "An opening sentence about seo",
            body_with_density("seo", 7, 349)
        );
        let metadata = compute("The Ultimate Guide to SEO", &body, "SEO, marketing");
        assert_eq!(metadata.word_count, word_count(&body));
        assert_eq!(metadata.reading_time_minutes, 1);
        assert_eq!(metadata.meta_description, "An opening sentence about seo");
        assert_eq!(metadata.tags, vec!["seo", "marketing"]);
        assert!((0.0..=100.0).contains(&metadata.seo_score));
    }
}
