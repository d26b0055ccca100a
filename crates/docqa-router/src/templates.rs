//! Instruction templates handed to the generator
//!
//! Each template carries `{context}` and `{question}` placeholders.

use docqa_core::QueryType;

pub const FACTUAL_TEMPLATE: &str = "\
You are a precise factual assistant. Use the following context to answer the question accurately and concisely.

Context: {context}

Question: {question}

Instructions:
1. Provide direct, factual answers based only on the context
2. If the exact answer isn't in the context, state what information is available
3. Be concise and specific
4. Cite sources when possible

Answer:
";

pub const ANALYTICAL_TEMPLATE: &str = "\
You are an analytical assistant. Use the following context to provide a thoughtful analysis.

Context: {context}

Question: {question}

Instructions:
1. Analyze the information thoroughly
2. Identify patterns, relationships, and implications
3. Compare and contrast different viewpoints if present
4. Provide reasoning for your conclusions
5. Acknowledge limitations or areas of uncertainty

Analysis:
";

pub const SUMMARIZATION_TEMPLATE: &str = "\
You are a summarization specialist. Use the following context to create a comprehensive summary.

Context: {context}

Question: {question}

Instructions:
1. Identify and present the main points clearly
2. Organize information logically
3. Include key details while maintaining conciseness
4. Use bullet points or structure when appropriate
5. Ensure completeness while avoiding redundancy

Summary:
";

pub const PROCEDURAL_TEMPLATE: &str = "\
You are a step-by-step guide assistant. Use the following context to provide clear instructions.

Context: {context}

Question: {question}

Instructions:
1. Break down the process into clear, sequential steps
2. Number or organize steps logically
3. Include important details and warnings
4. Mention prerequisites or requirements
5. Provide examples when helpful

Steps:
";

/// Template for a query type; general queries use the factual one.
pub fn template_for(query_type: QueryType) -> &'static str {
    match query_type {
        QueryType::Factual | QueryType::General => FACTUAL_TEMPLATE,
        QueryType::Analytical => ANALYTICAL_TEMPLATE,
        QueryType::Summarization => SUMMARIZATION_TEMPLATE,
        QueryType::Procedural => PROCEDURAL_TEMPLATE,
    }
}

/// Fill a template's placeholders.
pub fn render_prompt(template: &str, context: &str, question: &str) -> String {
    template
        .replace("{context}", context)
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_falls_back_to_factual() {
        assert_eq!(template_for(QueryType::General), FACTUAL_TEMPLATE);
        assert_eq!(template_for(QueryType::Procedural), PROCEDURAL_TEMPLATE);
    }

    #[test]
    fn test_every_template_has_placeholders() {
        for query_type in QueryType::ALL {
            let template = template_for(query_type);
            assert!(template.contains("{context}"));
            assert!(template.contains("{question}"));
        }
    }

    #[test]
    fn test_render_prompt() {
        let prompt = render_prompt(SUMMARIZATION_TEMPLATE, "1. Rust is fast.", "Summarize Rust");
        assert!(prompt.contains("Context: 1. Rust is fast."));
        assert!(prompt.contains("Question: Summarize Rust"));
        assert!(!prompt.contains("{context}"));
        assert!(prompt.ends_with("Summary:\n"));
    }
}
