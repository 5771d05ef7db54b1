//! Request parameters and JSON response bodies.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{
    data::LexiconFilter,
    error::LexiconError,
    lexicon::{Recommendation, RecommendQuery},
};

/// A list given either as one comma-separated string or as a JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListParam {
    One(String),
    Many(Vec<String>),
}

impl ListParam {
    pub fn values(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Self::One(value) => vec![value.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .flat_map(|v| v.split(','))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendParams {
    pub word: Option<String>,
    #[serde(default, deserialize_with = "count_param")]
    pub topn: Option<usize>,
    pub gender: Option<ListParam>,
    pub pos: Option<ListParam>,
}

/// Accept a count as a JSON number or as the string a query or form carries.
fn count_param<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid topn '{text}'"))),
    }
}

impl TryFrom<RecommendParams> for RecommendQuery {
    type Error = LexiconError;

    fn try_from(params: RecommendParams) -> Result<Self, Self::Error> {
        let word = params
            .word
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .ok_or_else(|| LexiconError::invalid("missing parameter 'word'"))?;
        let genders = params.gender.map(|g| g.values()).unwrap_or_default();
        let pos = params.pos.map(|p| p.values()).unwrap_or_default();
        Ok(RecommendQuery {
            word,
            topn: params.topn,
            filter: LexiconFilter::from_parts(genders, pos)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeParams {
    pub text: Option<String>,
    /// File name relative to the documents directory.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub vocabulary: usize,
    pub entries: usize,
}
