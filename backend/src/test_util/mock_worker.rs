use serde_json::{json, Value};

/// Canned worker payloads for tests.
pub struct MockWorkerAnnotations;

impl MockWorkerAnnotations {
    /// Annotations with one detected entity and one sentence per text.
    pub fn single_entity(text_count: usize) -> Value {
        json!({
            "entity_substr": vec![vec!["moscow"]; text_count],
            "entity_lemm_substr": vec![vec!["moscow"]; text_count],
            "entity_offsets": vec![vec![[0, 6]]; text_count],
            "entity_init_offsets": vec![vec![[0, 6]]; text_count],
            "tags": vec![vec!["LOC"]; text_count],
            "sentences_offsets": vec![vec![[0, 18]]; text_count],
            "sentences": vec![vec!["Moscow is a city."]; text_count],
            "probas": vec![vec![0.97]; text_count],
        })
    }

    /// Annotations with no entities and no sentences per text.
    pub fn empty(text_count: usize) -> Value {
        json!({
            "entity_substr": vec![Vec::<String>::new(); text_count],
            "entity_lemm_substr": vec![Vec::<String>::new(); text_count],
            "entity_offsets": vec![Vec::<[usize; 2]>::new(); text_count],
            "entity_init_offsets": vec![Vec::<[usize; 2]>::new(); text_count],
            "tags": vec![Vec::<String>::new(); text_count],
            "sentences_offsets": vec![Vec::<[usize; 2]>::new(); text_count],
            "sentences": vec![Vec::<String>::new(); text_count],
            "probas": vec![Vec::<f64>::new(); text_count],
        })
    }

    /// A payload that violates the parallel-sequence invariant: two tags for
    /// a single detected entity.
    pub fn misaligned() -> Value {
        json!({
            "entity_substr": [["moscow"]],
            "entity_lemm_substr": [["moscow"]],
            "entity_offsets": [[[0, 6]]],
            "entity_init_offsets": [[[0, 6]]],
            "tags": [["LOC", "ORG"]],
            "sentences_offsets": [[[0, 18]]],
            "sentences": [["Moscow is a city."]],
            "probas": [[0.97]],
        })
    }
}

pub fn train_ack_json() -> Value {
    json!({ "trained": true })
}

pub fn eval_report_json() -> Value {
    json!({
        "train": { "ner_f1": 99.1, "ner_token_f1": 99.4 },
        "valid": { "ner_f1": 96.8, "ner_token_f1": 97.5 },
        "test": { "ner_f1": 97.3, "ner_token_f1": 98.1 }
    })
}

/// Evaluation report with no test split.
pub fn eval_report_without_test_json() -> Value {
    json!({
        "train": { "ner_f1": 99.1 }
    })
}
