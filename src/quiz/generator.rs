use super::{AnswerStyle, Question, QuestionKind};
use crate::config::Settings;
use crate::error::Result;
use crate::format::format_number;
use crate::rational::{EndBehavior, RationalFunction};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

const OPTION_COUNT: usize = 4;
const DISTRACTOR_ATTEMPTS: usize = 64;

const END_BEHAVIORS: [&str; 5] = [
    "approaches 0",
    "approaches 1",
    "approaches -1",
    "approaches +infinity",
    "approaches -infinity",
];

/// Produces random functions and questions about them, getting harder as
/// more questions are asked.
pub struct QuestionGenerator<R: Rng> {
    rng: R,
    questions_per_level: usize,
    max_difficulty: u32,
    tolerance: f64,
    answered: usize,
}

impl QuestionGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        QuestionGenerator::new(StdRng::from_entropy())
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        QuestionGenerator::with_settings(rng, &Settings::default())
    }

    pub fn with_settings(rng: R, settings: &Settings) -> Self {
        QuestionGenerator {
            rng,
            questions_per_level: settings.quiz.questions_per_level.max(1),
            max_difficulty: settings.quiz.max_difficulty.max(1),
            tolerance: settings.analysis.root_tolerance,
            answered: 0,
        }
    }

    pub fn questions_answered(&self) -> usize {
        self.answered
    }

    /// Starts at 1 and rises every `questions_per_level` questions.
    pub fn difficulty(&self) -> u32 {
        let level = 1 + self.answered / self.questions_per_level;
        u32::try_from(level)
            .unwrap_or(u32::MAX)
            .min(self.max_difficulty)
    }

    pub fn generate_question(&mut self) -> Result<Question> {
        let function = self.random_function()?;
        let kind = *QuestionKind::ALL
            .choose(&mut self.rng)
            .unwrap_or(&QuestionKind::VerticalAsymptote);
        let question = self.question_for(function, kind);
        debug!(difficulty = self.difficulty(), ?kind, "generated question");
        self.answered += 1;
        Ok(question)
    }

    /// A random function shaped by the current difficulty:
    /// linear over linear, then quadratic over linear, then quadratic over
    /// quadratic.
    pub fn random_function(&mut self) -> Result<RationalFunction> {
        let (numerator, denominator) = match self.difficulty() {
            1 => {
                let a = self.rng.gen_range(-5..=5);
                let b = self.rng.gen_range(-5..=5);
                let c = nonzero_or_one(self.rng.gen_range(-5..=5));
                let d = self.rng.gen_range(-5..=5);
                (vec![a, b], vec![c, d])
            }
            2 => {
                let a = nonzero_or_one(self.rng.gen_range(-3..=3));
                let b = self.rng.gen_range(-5..=5);
                let c = self.rng.gen_range(-5..=5);
                let d = nonzero_or_one(self.rng.gen_range(-5..=5));
                let e = self.rng.gen_range(-5..=5);
                (vec![a, b, c], vec![d, e])
            }
            _ => {
                let a = nonzero_or_one(self.rng.gen_range(-3..=3));
                let b = self.rng.gen_range(-5..=5);
                let c = self.rng.gen_range(-5..=5);
                let d = nonzero_or_one(self.rng.gen_range(-3..=3));
                let e = self.rng.gen_range(-5..=5);
                let f = self.rng.gen_range(-5..=5);
                (vec![a, b, c], vec![d, e, f])
            }
        };
        Ok(RationalFunction::from_integers(&numerator, &denominator)?.with_tolerance(self.tolerance))
    }

    pub fn question_for(&mut self, function: RationalFunction, kind: QuestionKind) -> Question {
        let (prompt, correct, options) = match kind {
            QuestionKind::VerticalAsymptote => self.vertical_asymptote(&function),
            QuestionKind::HorizontalAsymptote => self.horizontal_asymptote(&function),
            QuestionKind::Hole => self.hole(&function),
            QuestionKind::YIntercept => self.y_intercept(&function),
            QuestionKind::XIntercept => self.x_intercept(&function),
            QuestionKind::EndBehavior => self.end_behavior(&function),
        };
        let mut options = options;
        options.shuffle(&mut self.rng);
        Question {
            function,
            kind,
            prompt: prompt.to_string(),
            correct_answer: correct,
            style: AnswerStyle::MultipleChoice,
            options,
        }
    }

    fn vertical_asymptote(&mut self, f: &RationalFunction) -> (&'static str, String, Vec<String>) {
        let va = f.vertical_asymptotes();
        match va.as_slice() {
            [] => (
                "What is the vertical asymptote of this function?",
                "none".to_string(),
                fixed(&["none", "x = 0", "x = 1", "x = -1"]),
            ),
            [x] => {
                let correct = format!("x = {}", format_number(*x));
                let options = self.with_distractors(&correct, |rng| {
                    format!("x = {}", rng.gen_range(-5..=5))
                });
                ("What is the vertical asymptote of this function?", correct, options)
            }
            many => {
                let correct = many
                    .iter()
                    .map(|x| format!("x = {}", format_number(*x)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let options = self.with_distractors(&correct, |rng| {
                    format!("x = {}", rng.gen_range(-5..=5))
                });
                ("What are the vertical asymptotes of this function?", correct, options)
            }
        }
    }

    fn horizontal_asymptote(&mut self, f: &RationalFunction) -> (&'static str, String, Vec<String>) {
        let prompt = "What is the horizontal asymptote of this function?";
        match f.horizontal_asymptote() {
            None => (
                prompt,
                "none".to_string(),
                fixed(&["none", "y = 0", "y = 1", "y = -1"]),
            ),
            Some(h) => {
                let correct = format!("y = {}", format_number(h));
                let options = self.with_distractors(&correct, |rng| {
                    format!("y = {}", rng.gen_range(-3..=3))
                });
                (prompt, correct, options)
            }
        }
    }

    fn hole(&mut self, f: &RationalFunction) -> (&'static str, String, Vec<String>) {
        match f.holes().first() {
            None => (
                "Does this function have any holes? If so, where?",
                "none".to_string(),
                fixed(&["none", "(0, 0)", "(1, 1)", "(-1, -1)"]),
            ),
            Some(hole) => {
                let correct = point(hole.x, hole.y);
                let options = self.with_distractors(&correct, |rng| {
                    format!("({}, {})", rng.gen_range(-3..=3), rng.gen_range(-3..=3))
                });
                ("Where is the hole in this function?", correct, options)
            }
        }
    }

    fn y_intercept(&mut self, f: &RationalFunction) -> (&'static str, String, Vec<String>) {
        let prompt = "What is the y-intercept of this function?";
        match f.y_intercept() {
            None => (
                prompt,
                "none".to_string(),
                fixed(&["none", "(0, 0)", "(0, 1)", "(0, -1)"]),
            ),
            Some(y) => {
                let correct = point(0.0, y);
                let options = self.with_distractors(&correct, |rng| {
                    format!("(0, {})", rng.gen_range(-5..=5))
                });
                (prompt, correct, options)
            }
        }
    }

    fn x_intercept(&mut self, f: &RationalFunction) -> (&'static str, String, Vec<String>) {
        let roots = f.x_intercepts();
        match roots.as_slice() {
            [] => (
                "What are the x-intercepts of this function?",
                "none".to_string(),
                fixed(&["none", "(0, 0)", "(1, 0)", "(-1, 0)"]),
            ),
            [x] => {
                let correct = point(*x, 0.0);
                let options = self.with_distractors(&correct, |rng| {
                    format!("({}, 0)", rng.gen_range(-5..=5))
                });
                ("What is the x-intercept of this function?", correct, options)
            }
            many => {
                let correct = many
                    .iter()
                    .map(|x| point(*x, 0.0))
                    .collect::<Vec<_>>()
                    .join(", ");
                let options = self.with_distractors(&correct, |rng| {
                    format!(
                        "({}, 0), ({}, 0)",
                        rng.gen_range(-5..=5),
                        rng.gen_range(-5..=5)
                    )
                });
                ("What are the x-intercepts of this function?", correct, options)
            }
        }
    }

    fn end_behavior(&mut self, f: &RationalFunction) -> (&'static str, String, Vec<String>) {
        let behavior: EndBehavior = f.end_behavior();
        let correct = behavior.to_string();
        let mut options = vec![correct.clone()];
        for candidate in END_BEHAVIORS {
            if options.len() == OPTION_COUNT {
                break;
            }
            if candidate != correct {
                options.push(candidate.to_string());
            }
        }
        (
            "What is the end behavior of this function as x approaches infinity?",
            correct,
            options,
        )
    }

    fn with_distractors(
        &mut self,
        correct: &str,
        mut make: impl FnMut(&mut R) -> String,
    ) -> Vec<String> {
        let mut options = vec![correct.to_string()];
        for _ in 0..DISTRACTOR_ATTEMPTS {
            if options.len() == OPTION_COUNT {
                break;
            }
            let candidate = make(&mut self.rng);
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        options
    }
}

impl Default for QuestionGenerator<StdRng> {
    fn default() -> Self {
        QuestionGenerator::from_entropy()
    }
}

fn nonzero_or_one(value: i64) -> i64 {
    if value == 0 {
        1
    } else {
        value
    }
}

fn fixed(options: &[&str]) -> Vec<String> {
    options.iter().map(|s| s.to_string()).collect()
}

fn point(x: f64, y: f64) -> String {
    format!("({}, {})", format_number(x), format_number(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roots::ROOT_TOLERANCE;

    #[test]
    fn zero_coefficients_are_bumped() {
        assert_eq!(nonzero_or_one(0), 1);
        assert_eq!(nonzero_or_one(-3), -3);
    }

    #[test]
    fn default_tolerance_matches_roots() {
        let generator = QuestionGenerator::new(StdRng::seed_from_u64(1));
        assert_eq!(generator.tolerance, ROOT_TOLERANCE);
    }
}
