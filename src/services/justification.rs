use std::sync::Arc;

use crate::{
    models::{Recommendation, SelectedProspect, UserContext},
    services::providers::TextGenerator,
};

/// Writes a short parent-facing explanation for each selected title
#[derive(Clone)]
pub struct JustificationGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl JustificationGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One generation call per selection, in order; failures fall back to a template
    pub async fn justify(&self, selections: Vec<SelectedProspect>, context: &UserContext) -> Vec<Recommendation> {
        let mut recommendations = Vec::with_capacity(selections.len());

        for selection in selections {
            let justification = self.justify_one(&selection, context).await;
            recommendations.push(Recommendation {
                selection,
                justification,
            });
        }

        recommendations
    }

    async fn justify_one(&self, selection: &SelectedProspect, context: &UserContext) -> String {
        let title = selection.candidate.title();
        if !self.generator.is_available() {
            return template(selection);
        }

        match self.generator.generate(&build_prompt(selection, context)).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!(title = %title, "Empty justification, using template");
                template(selection)
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Justification failed, using template");
                template(selection)
            }
        }
    }
}

fn build_prompt(selection: &SelectedProspect, context: &UserContext) -> String {
    let item = &selection.candidate.enriched;
    let genres = if item.genres.is_empty() {
        "unknown".to_string()
    } else {
        item.genres.join(", ")
    };

    let mut prompt = format!(
        "You are helping a parent pick something to watch with their {age}-year-old child, \
         who said they are interested in \"{interest}\".\n\
         Title: {title} ({kind})\n\
         Overview: {overview}\n\
         Genres: {genres}\n\
         Rating: {rating:.1}/10 from {votes} votes\n\
         Age certification in {country}: {certification}\n\
         Streaming on: {platforms}\n\
         In two or three sentences, written in the {locale} locale, explain why this title suits the child.",
        age = context.age(),
        interest = context.interests(),
        title = item.prospect.title,
        kind = item.prospect.kind,
        overview = item.prospect.overview,
        rating = item.vote_average,
        votes = item.vote_count,
        country = context.country(),
        certification = item.certification,
        platforms = selection.candidate.platforms.join(", "),
        locale = context.locale(),
    );

    if selection.via_fallback {
        prompt.push_str(
            "\nNo title matched the interest closely, so this is a popular pick for the age group. \
             Say plainly that it is an approximate match.",
        );
    }

    prompt
}

/// Deterministic sentence used whenever generation is unavailable or fails
fn template(selection: &SelectedProspect) -> String {
    let mut text = format!(
        "{} is a popular pick for this age group, available on {}.",
        selection.candidate.title(),
        selection.candidate.platforms.join(", ")
    );
    if selection.via_fallback {
        text.push_str(" It is an approximate match for the requested interest.");
    }
    text
}
