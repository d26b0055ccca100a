//! Snapshot tests for core types

#[cfg(test)]
mod snapshot_tests {
    use crate::{
        extract_key_terms, ConfidenceLevel, PostProcessingCheck, QueryType, SourceDocument,
    };
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_source_document_snapshot() {
        let doc = SourceDocument::new("Paris is the capital of France.")
            .with_source_file("geography.pdf")
            .with_page("12");

        assert_yaml_snapshot!(doc, @r###"
        ---
        content: Paris is the capital of France.
        metadata:
          source_file: geography.pdf
          page: "12"
        "###);
    }

    #[test]
    fn test_enum_names_snapshot() {
        assert_yaml_snapshot!(QueryType::ALL, @r###"
        ---
        - factual
        - analytical
        - summarization
        - procedural
        - general
        "###);

        let levels = [
            ConfidenceLevel::High,
            ConfidenceLevel::Medium,
            ConfidenceLevel::Low,
            ConfidenceLevel::VeryLow,
        ];
        assert_yaml_snapshot!(levels, @r###"
        ---
        - high
        - medium
        - low
        - very_low
        "###);

        assert_yaml_snapshot!(PostProcessingCheck::ComplexityValidation, @"complexity_validation");
    }

    #[test]
    fn test_key_terms_snapshot() {
        let terms = extract_key_terms("How do I configure the retrieval pipeline for PDF documents?");
        assert_yaml_snapshot!(terms, @r###"
        ---
        - configure
        - documents
        - pdf
        - pipeline
        - retrieval
        "###);
    }
}
