use std::sync::Arc;

use serde::Deserialize;

use crate::{models::genre, services::providers::TextGenerator};

const MAX_ALTERNATE_PHRASES: usize = 3;
const MAX_GENRE_HINTS: usize = 3;
const MAX_PHRASE_CHARS: usize = 80;

/// Alternate search phrases and genre hints derived from an interest query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestExpansion {
    /// Alternates only; the original query is never repeated here
    pub phrases: Vec<String>,
    pub genre_hints: Vec<u32>,
}

impl InterestExpansion {
    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Deserialize)]
struct ExpansionReply {
    #[serde(default)]
    phrases: Vec<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

/// Expands a free-text interest using a text generator
///
/// Any failure, including an unavailable generator or an unusable reply, yields an empty
/// expansion rather than an error.
#[derive(Clone)]
pub struct InterestExpander {
    generator: Arc<dyn TextGenerator>,
}

impl InterestExpander {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn expand(&self, query: &str, age: u8, country: &str) -> InterestExpansion {
        if !self.generator.is_available() {
            tracing::debug!("Text generator unavailable, skipping interest expansion");
            return InterestExpansion::none();
        }

        let prompt = Self::build_prompt(query, age, country);
        let expansion = match self.generator.generate(&prompt).await {
            Ok(reply) => Self::parse_reply(&reply, query),
            Err(e) => {
                tracing::warn!(error = %e, "Interest expansion failed");
                InterestExpansion::none()
            }
        };

        tracing::info!(
            query = %query,
            phrases = ?expansion.phrases,
            genre_hints = ?expansion.genre_hints,
            "Interest expanded"
        );

        expansion
    }

    fn build_prompt(query: &str, age: u8, country: &str) -> String {
        let genres = genre::MOVIE_GENRES
            .iter()
            .map(|(id, name)| format!("{}={}", id, name))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "A {age}-year-old child in country {country} is interested in \"{query}\".\n\
             Suggest 2 to 3 short, diverse but related search phrases that would find movies or \
             TV series about this theme in The Movie Database. Do not repeat the original phrase.\n\
             Also pick up to {MAX_GENRE_HINTS} genre ids from this list that fit the interest: {genres}.\n\
             Reply with JSON only, in the form {{\"phrases\": [\"...\"], \"genre_ids\": [16]}}."
        )
    }

    /// Reads the generator's reply as JSON, or as a comma-separated phrase list.
    fn parse_reply(reply: &str, original: &str) -> InterestExpansion {
        let body = strip_code_fence(reply);

        let (phrases, genre_ids) = if body.contains('{') {
            let json = match (body.find('{'), body.rfind('}')) {
                (Some(start), Some(end)) if start < end => &body[start..=end],
                _ => return InterestExpansion::none(),
            };
            match serde_json::from_str::<ExpansionReply>(json) {
                Ok(parsed) => (parsed.phrases, parsed.genre_ids),
                Err(e) => {
                    tracing::warn!(error = %e, "Unusable expansion reply");
                    return InterestExpansion::none();
                }
            }
        } else {
            let phrases = body.split(',').map(str::to_string).collect();
            (phrases, Vec::new())
        };

        let original = original.trim().to_lowercase();
        let mut expansion = InterestExpansion::none();

        for phrase in phrases {
            let phrase = phrase.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
            if phrase.is_empty() || phrase.chars().count() > MAX_PHRASE_CHARS {
                continue;
            }
            let lowered = phrase.to_lowercase();
            if lowered == original || expansion.phrases.iter().any(|p| p.to_lowercase() == lowered) {
                continue;
            }
            expansion.phrases.push(phrase.to_string());
            if expansion.phrases.len() == MAX_ALTERNATE_PHRASES {
                break;
            }
        }

        for id in genre_ids {
            if genre::is_known_movie_genre(id) && !expansion.genre_hints.contains(&id) {
                expansion.genre_hints.push(id);
            }
            if expansion.genre_hints.len() == MAX_GENRE_HINTS {
                break;
            }
        }

        expansion
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            // drop the info string (e.g. "json") on the opening fence line
            let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
            rest.trim_end().trim_end_matches("```").trim()
        }
        None => trimmed,
    }
}
