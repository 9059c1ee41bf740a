//! Prompt templates for the model-backed nodes.
//!
//! Templates use `{placeholder}` slots filled by [`render`]. Keeping them as
//! plain constants keeps prompt text reviewable in one place.

/// Turns a natural-language user prompt into search-engine queries.
///
/// The model is asked for a comma-separated list; `SearchInternetNode` takes
/// the first candidate.
pub const SEARCH_INTERNET_TEMPLATE: &str = "\
You are tasked with turning a user's request into effective web search queries.
A user request is rarely a good search query as written; rephrase it into short
keyword-style queries a search engine handles well.
Return up to three candidate queries as a comma-separated list, best first,
with no other text.
USER REQUEST: {user_prompt}";

/// Answers the user's question from scraped page content only.
pub const GENERATE_ANSWER_TEMPLATE: &str = "\
You are given content scraped from one or more web pages. Answer the user's
question using only that content. If the content does not contain the answer,
say so instead of guessing.
CONTENT:
{context}
QUESTION: {question}";

/// Replaces each `{name}` slot in `template` with its value.
///
/// Unknown slots are left in place; extra vars are ignored.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: placeholders are substituted, unknown slots left alone.
    #[test]
    fn render_substitutes_placeholders() {
        let out = render("ask {q} about {topic}", &[("q", "who"), ("topic", "Rust")]);
        assert_eq!(out, "ask who about Rust");
        let untouched = render("{missing} stays", &[("q", "x")]);
        assert_eq!(untouched, "{missing} stays");
    }

    /// **Scenario**: the search template carries the user prompt slot.
    #[test]
    fn search_template_has_user_prompt_slot() {
        let out = render(
            SEARCH_INTERNET_TEMPLATE,
            &[("user_prompt", "What is the capital of France?")],
        );
        assert!(out.contains("What is the capital of France?"));
        assert!(!out.contains("{user_prompt}"));
    }
}
