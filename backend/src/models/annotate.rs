use serde::{Deserialize, Serialize};

/// A half-open character range `(start, end)` within a text.
pub type Span = (usize, usize);

/// Request body for the inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotateRequest {
    /// Texts to analyze.
    pub x: Vec<String>,
}

/// Detected entities and sentence segmentation for a batch of texts.
///
/// Eight parallel sequences with one entry per input text. Within a text,
/// `entity_substr`, `entity_lemm_substr`, `entity_offsets`,
/// `entity_init_offsets`, `tags` and `probas` are parallel per detected
/// entity, while `sentences` and `sentences_offsets` are parallel per
/// sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub entity_substr: Vec<Vec<String>>,
    pub entity_lemm_substr: Vec<Vec<String>>,
    pub entity_offsets: Vec<Vec<Span>>,
    pub entity_init_offsets: Vec<Vec<Span>>,
    pub tags: Vec<Vec<String>>,
    pub sentences_offsets: Vec<Vec<Span>>,
    pub sentences: Vec<Vec<String>>,
    pub probas: Vec<Vec<f64>>,
}

impl Annotations {
    /// Verify the parallel-sequence invariant for a batch of `num_texts`
    /// inputs. Returns a description of the first mismatch found.
    pub fn check_alignment(&self, num_texts: usize) -> Result<(), String> {
        let outer = [
            ("entity_substr", self.entity_substr.len()),
            ("entity_lemm_substr", self.entity_lemm_substr.len()),
            ("entity_offsets", self.entity_offsets.len()),
            ("entity_init_offsets", self.entity_init_offsets.len()),
            ("tags", self.tags.len()),
            ("sentences_offsets", self.sentences_offsets.len()),
            ("sentences", self.sentences.len()),
            ("probas", self.probas.len()),
        ];
        for (name, len) in outer {
            if len != num_texts {
                return Err(format!(
                    "{} has {} entries for {} input texts",
                    name, len, num_texts
                ));
            }
        }

        for i in 0..num_texts {
            let entities = self.entity_substr[i].len();
            let per_entity = [
                ("entity_lemm_substr", self.entity_lemm_substr[i].len()),
                ("entity_offsets", self.entity_offsets[i].len()),
                ("entity_init_offsets", self.entity_init_offsets[i].len()),
                ("tags", self.tags[i].len()),
                ("probas", self.probas[i].len()),
            ];
            for (name, len) in per_entity {
                if len != entities {
                    return Err(format!(
                        "text {}: {} has {} entries for {} entities",
                        i, name, len, entities
                    ));
                }
            }
            if self.sentences[i].len() != self.sentences_offsets[i].len() {
                return Err(format!(
                    "text {}: sentences has {} entries but sentences_offsets has {}",
                    i,
                    self.sentences[i].len(),
                    self.sentences_offsets[i].len()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Annotations {
        Annotations {
            entity_substr: vec![vec!["paris".to_string()]],
            entity_lemm_substr: vec![vec!["paris".to_string()]],
            entity_offsets: vec![vec![(10, 15)]],
            entity_init_offsets: vec![vec![(10, 15)]],
            tags: vec![vec!["LOC".to_string()]],
            sentences_offsets: vec![vec![(0, 16)]],
            sentences: vec![vec!["I went to Paris.".to_string()]],
            probas: vec![vec![0.98]],
        }
    }

    #[test]
    fn aligned_annotations_pass() {
        assert!(sample().check_alignment(1).is_ok());
    }

    #[test]
    fn wrong_batch_size_is_rejected() {
        let err = sample().check_alignment(2).unwrap_err();
        assert!(err.contains("entity_substr"));
    }

    #[test]
    fn entity_sequence_mismatch_is_rejected() {
        let mut annotations = sample();
        annotations.tags[0].push("ORG".to_string());
        let err = annotations.check_alignment(1).unwrap_err();
        assert!(err.contains("tags"));
    }

    #[test]
    fn sentence_sequence_mismatch_is_rejected() {
        let mut annotations = sample();
        annotations.sentences_offsets[0].clear();
        let err = annotations.check_alignment(1).unwrap_err();
        assert!(err.contains("sentences"));
    }

    #[test]
    fn empty_batch_is_aligned() {
        assert!(Annotations::default().check_alignment(0).is_ok());
    }

    #[test]
    fn spans_serialize_as_pairs() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["entity_offsets"][0][0][0], 10);
        assert_eq!(json["entity_offsets"][0][0][1], 15);
    }
}
