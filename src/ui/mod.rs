#![cfg(feature = "askama")]

//! Server-rendered landing page with the recommendation and analysis forms.

use askama::Template;
use axum::{extract::State, response::Html};

use crate::{api::error::ApiError, api::AppState, data::GenderCategory};

const POS_CHOICES: &[(&str, &str)] = &[
    ("any", "Any"),
    ("NOUN", "Noun"),
    ("VERB", "Verb"),
    ("ADJ", "Adjective"),
    ("ADV", "Adverb"),
];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    categories: Vec<(&'static str, String)>,
    pos_choices: &'static [(&'static str, &'static str)],
    default_topn: usize,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = IndexTemplate {
        categories: GenderCategory::ALL
            .iter()
            .map(|c| (c.as_str(), label(c.as_str())))
            .collect(),
        pos_choices: POS_CHOICES,
        default_topn: state.settings.default_topn,
    };
    let body = page.render().map_err(anyhow::Error::from)?;
    Ok(Html(body))
}

fn label(category: &str) -> String {
    category
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
