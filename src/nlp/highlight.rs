//! Markup of flagged words inside the raw document text.

use std::collections::HashMap;

use anyhow::Result;
use regex::RegexBuilder;

use crate::lexicon::GenderedWord;

/// Wrap every word-bounded, case-insensitive occurrence of a flagged word in an
/// anchor carrying its category. Surrounding text is HTML-escaped.
///
/// All words are matched in a single pass, longest first, so a flagged word is
/// never matched inside markup produced for another one.
pub fn highlight_gendered_words(text: &str, words: &[GenderedWord]) -> Result<String> {
    let mut targets: HashMap<String, &GenderedWord> = HashMap::new();
    for word in words {
        let surface = word.word.replace('_', " ").to_lowercase();
        if surface.trim().is_empty() {
            continue;
        }
        targets.entry(surface).or_insert(word);
    }
    if targets.is_empty() {
        return Ok(escape_html(text));
    }

    let mut alternatives: Vec<&String> = targets.keys().collect();
    alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let pattern = format!(
        r"\b(?:{})\b",
        alternatives
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|")
    );
    let re = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

    let mut out = String::with_capacity(text.len() + words.len() * 48);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        match targets.get(&m.as_str().to_lowercase()) {
            Some(word) => out.push_str(&format!(
                r#"<a class="{}" ng-click="showWord('{}')">{}</a>"#,
                escape_html(&word.category),
                escape_html(&word.word),
                escape_html(m.as_str())
            )),
            None => out.push_str(&escape_html(m.as_str())),
        }
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    Ok(out)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
