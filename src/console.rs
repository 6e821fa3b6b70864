//! Terminal input collection and rendering for the `ask` command.

use std::io::{BufRead, Write};

use anyhow::{bail, Context};

use crate::{
    config::Config,
    error::AppError,
    models::{Recommendation, RecommendationReport, UserContext},
};

/// Values already supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub age: Option<u32>,
    pub interests: Option<String>,
    /// Comma-separated platform names
    pub platforms: Option<String>,
}

/// Reads missing answers from `input` and renders reports to `output`
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Builds a context, prompting for anything not answered up front
    ///
    /// An invalid age is asked for again until a valid one is given.
    pub fn collect_context(&mut self, answers: Answers, config: &Config) -> anyhow::Result<UserContext> {
        let age = match answers.age {
            Some(age) => age,
            None => self.ask_age()?,
        };
        let interests = match answers.interests {
            Some(interests) => interests,
            None => self.ask("What is the child interested in? (blank for popular picks) ")?,
        };
        let platforms = match answers.platforms {
            Some(platforms) => platforms,
            None => self.ask("Which streaming services do you have? (comma-separated) ")?,
        };

        let platforms = UserContext::parse_platforms(&platforms);
        Ok(UserContext::for_config(age, &interests, &platforms, config)?)
    }

    /// Asks until a whole number in the supported range is given
    fn ask_age(&mut self) -> anyhow::Result<u32> {
        loop {
            let line = self.ask("How old is the child? (1-18) ")?;
            let Ok(age) = line.trim().parse::<u32>() else {
                writeln!(self.output, "Please enter a whole number.")?;
                continue;
            };
            match UserContext::validate_age(age) {
                Ok(_) => return Ok(age),
                Err(AppError::InvalidInput(message)) => writeln!(self.output, "{}", message)?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn render(&mut self, report: &RecommendationReport) -> anyhow::Result<()> {
        writeln!(self.output)?;
        if report.is_empty() {
            writeln!(
                self.output,
                "No recommendations found for \"{}\" on your streaming services. \
                 Try a broader interest or add more platforms.",
                report.interests
            )?;
            return Ok(());
        }

        writeln!(
            self.output,
            "Recommendations for a {}-year-old interested in \"{}\":",
            report.age, report.interests
        )?;
        if report.fallback_engaged {
            writeln!(
                self.output,
                "Nothing matched that interest closely, so these are approximate matches popular with this age group."
            )?;
        }

        for (index, recommendation) in report.recommendations.iter().enumerate() {
            writeln!(self.output)?;
            self.render_one(index + 1, recommendation, &report.country)?;
        }
        self.output.flush()?;

        Ok(())
    }

    fn render_one(&mut self, position: usize, recommendation: &Recommendation, country: &str) -> anyhow::Result<()> {
        let item = recommendation.item();
        let details = &item.enriched;

        writeln!(self.output, "{}. {} ({})", position, item.title(), details.prospect.kind)?;
        writeln!(
            self.output,
            "   Rating: {:.1}/10 ({} votes) | Certification ({}): {}",
            details.vote_average, details.vote_count, country, details.certification
        )?;
        if !details.genres.is_empty() {
            writeln!(self.output, "   Genres: {}", details.genres.join(", "))?;
        }
        writeln!(self.output, "   {}", details.prospect.overview)?;
        writeln!(self.output, "   Watch on: {}", item.platforms.join(", "))?;
        writeln!(self.output, "   Why: {}", recommendation.justification)?;

        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("Input closed before all answers were given");
        }

        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AvailableProspect, EnrichedProspect, MediaKind, Prospect, SelectedProspect,
    };
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.output).unwrap()
    }

    fn recommendation() -> Recommendation {
        Recommendation {
            selection: SelectedProspect {
                candidate: AvailableProspect {
                    enriched: EnrichedProspect {
                        prospect: Prospect {
                            id: 10681,
                            kind: MediaKind::Movie,
                            title: "WALL-E".to_string(),
                            overview: "A robot finds a plant on a deserted Earth.".to_string(),
                            popularity: 80.0,
                        },
                        genres: vec!["Animation".to_string(), "Family".to_string()],
                        vote_average: 8.06,
                        vote_count: 17000,
                        certification: "L".to_string(),
                    },
                    platforms: vec!["Disney Plus".to_string()],
                },
                via_fallback: true,
            },
            justification: "A gentle story about a lonely robot.".to_string(),
        }
    }

    #[test]
    fn test_prompts_until_age_is_valid() {
        let mut console = console("seven\n42\n7\ndinosaurs\nNetflix, Disney+\n");
        let context = console
            .collect_context(Answers::default(), &Config::default())
            .unwrap();

        assert_eq!(context.age(), 7);
        assert_eq!(context.interests(), "dinosaurs");
        assert_eq!(context.platforms(), &["netflix".to_string(), "disney+".to_string()]);

        let transcript = output(console);
        assert!(transcript.contains("Please enter a whole number."));
        assert!(transcript.contains("Age must be between 1 and 18, got 42"));

        // Age is settled before any other question is asked
        let age_prompt = transcript.find("How old is the child?").unwrap();
        let interests_prompt = transcript.find("What is the child interested in?").unwrap();
        let rejection = transcript.find("got 42").unwrap();
        assert!(age_prompt < rejection && rejection < interests_prompt);
    }

    #[test]
    fn test_command_line_age_is_validated() {
        let mut console = console("");
        let answers = Answers {
            age: Some(30),
            interests: Some("robots".to_string()),
            platforms: Some("netflix".to_string()),
        };
        assert!(console.collect_context(answers, &Config::default()).is_err());
    }

    #[test]
    fn test_command_line_answers_skip_prompts() {
        let mut console = console("");
        let answers = Answers {
            age: Some(9),
            interests: Some("robots".to_string()),
            platforms: Some("netflix".to_string()),
        };
        let context = console.collect_context(answers, &Config::default()).unwrap();

        assert_eq!(context.age(), 9);
        assert_eq!(context.country(), "BR");
        assert!(output(console).is_empty());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut console = console("8\nrobots\n");
        assert!(console
            .collect_context(Answers::default(), &Config::default())
            .is_err());
    }

    #[test]
    fn test_render_empty_report() {
        let context = UserContext::new(8, "space adventure", ["netflix"], "BR", "pt-BR").unwrap();
        let mut console = console("");
        console.render(&RecommendationReport::empty(&context)).unwrap();

        assert!(output(console).contains("No recommendations found for \"space adventure\""));
    }

    #[test]
    fn test_render_recommendations_with_fallback_note() {
        let context = UserContext::new(6, "robots", ["disney+"], "BR", "pt-BR").unwrap();
        let report = RecommendationReport::new(&context, vec![recommendation()], true);
        let mut console = console("");
        console.render(&report).unwrap();

        let text = output(console);
        assert!(text.contains("approximate matches"));
        assert!(text.contains("1. WALL-E (movie)"));
        assert!(text.contains("Rating: 8.1/10 (17000 votes) | Certification (BR): L"));
        assert!(text.contains("Genres: Animation, Family"));
        assert!(text.contains("Watch on: Disney Plus"));
        assert!(text.contains("Why: A gentle story about a lonely robot."));
    }
}
