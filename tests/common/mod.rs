#![allow(dead_code)]

use std::{fs, path::Path, sync::Arc};

use genderlex::{
    data::{stem_map::CsvStemMap, StemEntry},
    nlp::{stem_phrase, EmbeddingModel, Phraser, TextProcessor},
    Lexicon, Settings,
};
use tempfile::TempDir;

/// (surface word, pos, category, vector)
pub const WORDS: &[(&str, &str, &str, [f32; 3])] = &[
    ("aggressive", "ADJ", "strongly_male", [1.0, 0.0, 0.0]),
    ("competitive", "ADJ", "male", [0.95, 0.1, 0.0]),
    ("dominant", "ADJ", "strongly_male", [0.9, 0.2, 0.0]),
    ("assertive", "ADJ", "male", [0.8, 0.3, 0.1]),
    ("leader", "NOUN", "neutral", [0.6, 0.6, 0.0]),
    ("rock_star", "NOUN", "male", [0.5, 0.0, 0.8]),
    ("collaborative", "ADJ", "female", [0.3, 0.9, 0.1]),
    ("supportive", "ADJ", "female", [0.2, 0.95, 0.0]),
    ("compassionate", "ADJ", "strongly_female", [0.1, 1.0, 0.0]),
    ("nurturing", "VERB_ADJ", "strongly_female", [0.0, 1.0, 0.1]),
];

pub fn stem(word: &str) -> String {
    stem_phrase(word)
}

pub fn entries() -> Vec<StemEntry> {
    let mut rows: Vec<StemEntry> = WORDS
        .iter()
        .map(|(word, pos, category, _)| StemEntry {
            stem: stem(word),
            word: word.to_string(),
            pos: pos.to_string(),
            category: category.to_string(),
        })
        .collect();
    rows.insert(
        1,
        StemEntry {
            stem: stem("aggressive"),
            word: "aggressiveness".into(),
            pos: "NOUN".into(),
            category: "strongly_male".into(),
        },
    );
    rows
}

pub fn model_text() -> String {
    let mut out = format!("{} 3\n", WORDS.len());
    for (word, _, _, v) in WORDS {
        out.push_str(&format!("{} {} {} {}\n", stem(word), v[0], v[1], v[2]));
    }
    out
}

pub fn stem_map_csv() -> String {
    let mut out = String::from("stem,word,pos,category\n");
    for row in entries() {
        out.push_str(&format!(
            "{},{},{},{}\n",
            row.stem, row.word, row.pos, row.category
        ));
    }
    out
}

pub fn settings(dir: &Path) -> Settings {
    Settings::with_data_dir(dir)
}

/// Write every artefact into a fresh data directory.
pub fn data_dir() -> (TempDir, Settings) {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings(dir.path());
    fs::write(&settings.embedding_model, model_text()).expect("write model");
    fs::write(&settings.stem_map, stem_map_csv()).expect("write stem map");
    fs::write(&settings.bigram_phrases, "phrase,score\nrock_star,12.5\nteam_player,0.1\n")
        .expect("write phrases");
    fs::create_dir_all(&settings.documents_dir).expect("documents dir");
    (dir, settings)
}

/// In-memory lexicon over the fixture words.
pub fn lexicon() -> Lexicon {
    lexicon_with(Settings::with_data_dir("unused"))
}

pub fn lexicon_with(settings: Settings) -> Lexicon {
    let model = EmbeddingModel::from_vectors(
        WORDS
            .iter()
            .map(|(word, _, _, v)| (stem(word), v.to_vec())),
    )
    .expect("fixture model");
    let store = Arc::new(CsvStemMap::from_entries(entries()));
    let processor = TextProcessor::new(Phraser::from_phrases(["rock_star"]));
    Lexicon::new(store, model, processor, &settings)
}
