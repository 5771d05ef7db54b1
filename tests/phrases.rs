use std::io::Cursor;

use genderlex::nlp::{Phraser, TextProcessor};

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn known_pairs_are_joined_left_to_right() {
    let phraser = Phraser::from_phrases(["new_york", "york_times"]);
    let out = phraser.apply(tokens(&["the", "new", "york", "times", "today"]));
    assert_eq!(out, tokens(&["the", "new_york", "times", "today"]));
}

#[test]
fn threshold_drops_weak_phrases() {
    let table = "phrase,score\nrock_star,12.5\nteam_player,0.4\nsoft skills,3.0\n";
    let phraser = Phraser::from_reader(Cursor::new(table), 1.0).unwrap();
    assert_eq!(phraser.len(), 2);
    let out = phraser.apply(tokens(&["team", "player", "rock", "star", "soft", "skills"]));
    assert_eq!(out, tokens(&["team", "player", "rock_star", "soft_skills"]));
}

#[test]
fn score_column_is_optional() {
    let phraser = Phraser::from_reader(Cursor::new("phrase\nrock_star\n"), 0.0).unwrap();
    assert_eq!(phraser.apply(tokens(&["rock", "star"])), tokens(&["rock_star"]));
}

#[test]
fn missing_table_gives_identity_phraser() {
    let dir = tempfile::tempdir().unwrap();
    let phraser = Phraser::from_path(&dir.path().join("absent.csv"), 0.0).unwrap();
    assert!(phraser.is_empty());
    assert_eq!(phraser.apply(tokens(&["rock", "star"])), tokens(&["rock", "star"]));
}

#[test]
fn processor_joins_before_dropping_stop_words() {
    let processor = TextProcessor::new(Phraser::from_phrases(["rock_star"]));
    let words: Vec<String> = processor
        .process("A rock star!")
        .into_iter()
        .map(|t| t.word)
        .collect();
    assert_eq!(words, tokens(&["rock_star"]));
}
