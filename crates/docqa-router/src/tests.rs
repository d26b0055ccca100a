//! Snapshot tests for query routing

#[cfg(test)]
mod snapshot_tests {
    use crate::{select_strategy, PostProcessingCheck, QueryComplexity, QueryRouter, QueryType};
    use insta::assert_yaml_snapshot;
    use serde::Serialize;

    #[derive(Serialize)]
    struct StrategyRow {
        query_type: QueryType,
        complexity: QueryComplexity,
        retrieval_k: usize,
        max_tokens: u32,
        template: QueryType,
        post_processing: Vec<PostProcessingCheck>,
    }

    #[test]
    fn test_strategy_table_snapshot() {
        let rows: Vec<StrategyRow> = [QueryType::Factual, QueryType::Procedural, QueryType::General]
            .into_iter()
            .flat_map(|query_type| {
                QueryComplexity::ALL.into_iter().map(move |complexity| {
                    let strategy = select_strategy(query_type, complexity);
                    StrategyRow {
                        query_type,
                        complexity,
                        retrieval_k: strategy.retrieval_k,
                        max_tokens: strategy.max_tokens,
                        template: strategy.prompt_template_id,
                        post_processing: strategy.post_processing,
                    }
                })
            })
            .collect();

        assert_yaml_snapshot!(rows, @r###"
        ---
        - query_type: factual
          complexity: simple
          retrieval_k: 2
          max_tokens: 800
          template: factual
          post_processing: []
        - query_type: factual
          complexity: medium
          retrieval_k: 3
          max_tokens: 1000
          template: factual
          post_processing: []
        - query_type: factual
          complexity: complex
          retrieval_k: 5
          max_tokens: 1500
          template: factual
          post_processing:
            - complexity_validation
        - query_type: procedural
          complexity: simple
          retrieval_k: 4
          max_tokens: 1700
          template: procedural
          post_processing:
            - step_validation
        - query_type: procedural
          complexity: medium
          retrieval_k: 5
          max_tokens: 2000
          template: procedural
          post_processing:
            - step_validation
        - query_type: procedural
          complexity: complex
          retrieval_k: 7
          max_tokens: 2500
          template: procedural
          post_processing:
            - step_validation
            - complexity_validation
        - query_type: general
          complexity: simple
          retrieval_k: 3
          max_tokens: 1200
          template: general
          post_processing: []
        - query_type: general
          complexity: medium
          retrieval_k: 4
          max_tokens: 1500
          template: general
          post_processing: []
        - query_type: general
          complexity: complex
          retrieval_k: 6
          max_tokens: 2000
          template: general
          post_processing:
            - complexity_validation
        "###);
    }

    #[test]
    fn test_classification_snapshot() {
        let router = QueryRouter::new();
        let queries = [
            "What is the capital of France?",
            "Explain why revenue fell and what caused it",
            "Summarize the main points of the meeting notes",
            "How to setup the development environment",
            "thanks!",
        ];

        let results: Vec<(QueryType, QueryComplexity)> = queries
            .iter()
            .map(|q| {
                let analysis = router.analyze(q);
                (analysis.query_type, analysis.complexity)
            })
            .collect();

        assert_yaml_snapshot!(results, @r###"
        ---
        - - factual
          - simple
        - - analytical
          - medium
        - - summarization
          - simple
        - - procedural
          - simple
        - - general
          - simple
        "###);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let router = QueryRouter::new();
        let query = "Compare the advantages and disadvantages of X versus Y";
        assert_eq!(router.analyze(query), router.analyze(query));
        assert_eq!(router.analyze(query).query, query);
    }

    #[test]
    fn test_confidence_in_unit_interval() {
        let router = QueryRouter::new();
        for query in ["", "?", "how how how how", "What? Who? When? Where? Which?", "define it"] {
            let confidence = router.analyze(query).confidence;
            assert!((0.0..=1.0).contains(&confidence), "{query}: {confidence}");
        }
    }
}
