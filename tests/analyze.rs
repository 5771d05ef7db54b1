mod common;

use genderlex::{
    nlp::{highlight_gendered_words, read_text, TextProcessor},
    GenderedWord,
};
use proptest::prelude::*;

const POSTING: &str = "Page 2 of 10\nWe need an Aggressive Rock Star and a team leader who is \
                       100% competitive. Email jobs@acme.com or visit https://acme.com/jobs today.";

fn flagged(word: &str, category: &str) -> GenderedWord {
    GenderedWord {
        stem: common::stem(word),
        word: word.into(),
        pos: None,
        category: category.into(),
    }
}

#[test]
fn process_text_cleans_phrases_and_stems() {
    let lexicon = common::lexicon();
    let tokens = lexicon.process_text(POSTING);
    let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();

    for expected in ["aggressive", "rock_star", "leader", "competitive"] {
        assert!(words.contains(&expected), "{expected} missing from {words:?}");
    }
    for dropped in ["page", "acme", "jobs", "100", "rock", "star", "and", "who"] {
        assert!(!words.contains(&dropped), "{dropped} should be dropped: {words:?}");
    }
    for token in &tokens {
        assert!(token.word.chars().count() >= 3);
        assert_eq!(token.stem, common::stem(&token.word));
    }
}

#[test]
fn gendered_words_skip_neutral_and_unknown_stems() {
    let lexicon = common::lexicon();
    let tokens = lexicon.process_text(POSTING);
    let found = lexicon.gendered_words(&tokens).unwrap();
    let summary: Vec<(&str, Option<&str>, &str)> = found
        .iter()
        .map(|g| (g.word.as_str(), g.pos.as_deref(), g.category.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("aggressive", Some("ADJ"), "strongly_male"),
            ("rock_star", Some("NOUN"), "male"),
            ("competitive", Some("ADJ"), "male"),
        ]
    );
}

#[test]
fn analyze_highlights_original_casing() {
    let lexicon = common::lexicon();
    let analysis = lexicon.analyze(POSTING).unwrap();
    let html = &analysis.highlighted_text;
    assert!(html.contains(
        r#"<a class="strongly_male" ng-click="showWord('aggressive')">Aggressive</a>"#
    ));
    assert!(html.contains(r#"<a class="male" ng-click="showWord('rock_star')">Rock Star</a>"#));
    assert!(html.contains(r#"<a class="male" ng-click="showWord('competitive')">competitive</a>"#));
    assert!(!html.contains("showWord('leader')"));
    assert_eq!(analysis.gendered_words.len(), 3);
}

#[test]
fn highlight_never_rewrites_inserted_markup() {
    let words = [flagged("male", "male"), flagged("rock_star", "male")];
    let html = highlight_gendered_words("male rock star", &words).unwrap();
    assert_eq!(
        html,
        r#"<a class="male" ng-click="showWord('male')">male</a> <a class="male" ng-click="showWord('rock_star')">rock star</a>"#
    );
}

#[test]
fn highlight_wraps_each_repeat_once() {
    let words = [
        flagged("aggressive", "strongly_male"),
        flagged("aggressive", "strongly_male"),
    ];
    let html = highlight_gendered_words("aggressive, AGGRESSIVE", &words).unwrap();
    assert_eq!(html.matches("<a ").count(), 2);
    assert!(html.contains(">AGGRESSIVE</a>"));
}

#[test]
fn highlight_respects_word_boundaries() {
    let words = [flagged("aggressive", "strongly_male")];
    let html = highlight_gendered_words("aggressiveness", &words).unwrap();
    assert_eq!(html, "aggressiveness");
}

#[test]
fn highlight_escapes_surrounding_text() {
    let words = [flagged("aggressive", "strongly_male")];
    let html = highlight_gendered_words("<b>aggressive</b> & co", &words).unwrap();
    assert_eq!(
        html,
        r#"&lt;b&gt;<a class="strongly_male" ng-click="showWord('aggressive')">aggressive</a>&lt;/b&gt; &amp; co"#
    );
}

#[test]
fn read_text_joins_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, "first line\nsecond line\n").unwrap();
    assert_eq!(read_text(&path).unwrap(), "first line second line");
}

proptest! {
    #[test]
    fn tokens_are_long_and_never_numeric_led(text in "[a-zA-Z0-9 .,@/:%_-]{0,80}") {
        let processor = TextProcessor::default();
        for token in processor.tokenize(&text) {
            prop_assert!(token.chars().count() >= 3);
            prop_assert!(!token.starts_with(|c: char| c.is_ascii_digit()));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }
}
