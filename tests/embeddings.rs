use std::io::Cursor;

use genderlex::{nlp::EmbeddingModel, LexiconError};

const TEXT_MODEL: &str = "4 2\nking 1.0 0.1\nqueen 0.9 0.4\nprince 0.95 0.05\napple -1.0 0.0\n";

#[test]
fn text_model_ranks_by_cosine_and_skips_query() {
    let model = EmbeddingModel::from_text_reader(Cursor::new(TEXT_MODEL)).unwrap();
    assert_eq!(model.len(), 4);
    assert_eq!(model.dim(), 2);

    let neighbours = model.most_similar("king", 3).unwrap();
    let words: Vec<&str> = neighbours.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["prince", "queen", "apple"]);
    assert!(neighbours[2].1 < 0.0);
}

#[test]
fn vectors_are_unit_normalised() {
    let model = EmbeddingModel::from_vectors([("a", vec![3.0, 4.0]), ("b", vec![6.0, 8.0])]).unwrap();
    let sim = model.similarity("a", "b").unwrap();
    assert!((sim - 1.0).abs() < 1e-6);
}

#[test]
fn topn_larger_than_vocabulary_returns_everything_else() {
    let model = EmbeddingModel::from_text_reader(Cursor::new(TEXT_MODEL)).unwrap();
    assert_eq!(model.most_similar("apple", 100).unwrap().len(), 3);
    assert!(model.most_similar("apple", 0).unwrap().is_empty());
}

#[test]
fn binary_model_matches_text_model() {
    let mut bytes = b"2 3\n".to_vec();
    for (word, vector) in [("male", [1.0f32, 0.0, 0.0]), ("female", [0.0f32, 1.0, 0.0])] {
        bytes.extend_from_slice(word.as_bytes());
        bytes.push(b' ');
        for value in vector {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.push(b'\n');
    }
    let model = EmbeddingModel::from_binary_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(model.len(), 2);
    assert!(model.contains("female"));
    assert!(model.similarity("male", "female").unwrap().abs() < 1e-6);
}

#[test]
fn malformed_models_fail_to_load() {
    let short_row = "2 3\na 1 2 3\nb 1 2\n";
    assert!(EmbeddingModel::from_text_reader(Cursor::new(short_row)).is_err());

    let wrong_count = "3 2\na 1 2\nb 1 2\n";
    assert!(EmbeddingModel::from_text_reader(Cursor::new(wrong_count)).is_err());

    let bad_float = "1 2\na 1 x\n";
    assert!(EmbeddingModel::from_text_reader(Cursor::new(bad_float)).is_err());

    let overflowing = "4611686018427387904 4\n";
    assert!(EmbeddingModel::from_text_reader(Cursor::new(overflowing)).is_err());

    let inflated_count = "1000000000 300\na 1 2\n";
    assert!(EmbeddingModel::from_text_reader(Cursor::new(inflated_count)).is_err());

    let huge_dim = b"1 99999999999\nword ".to_vec();
    assert!(EmbeddingModel::from_binary_reader(Cursor::new(huge_dim)).is_err());

    let truncated = b"1 4\nword \x00\x00".to_vec();
    assert!(EmbeddingModel::from_binary_reader(Cursor::new(truncated)).is_err());
}

#[test]
fn unknown_token_suggests_close_spelling() {
    let model = EmbeddingModel::from_text_reader(Cursor::new(TEXT_MODEL)).unwrap();
    match model.most_similar("quen", 3) {
        Err(LexiconError::UnknownWord { word, suggestion }) => {
            assert_eq!(word, "quen");
            assert_eq!(suggestion.as_deref(), Some("queen"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(model.suggest("zzzzzz"), None);
}
