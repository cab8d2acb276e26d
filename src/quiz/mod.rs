//! Multiple-choice questions about the graph features of a rational function.

mod generator;

pub use generator::QuestionGenerator;

use crate::rational::RationalFunction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    VerticalAsymptote,
    HorizontalAsymptote,
    Hole,
    YIntercept,
    XIntercept,
    EndBehavior,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 6] = [
        QuestionKind::VerticalAsymptote,
        QuestionKind::HorizontalAsymptote,
        QuestionKind::Hole,
        QuestionKind::YIntercept,
        QuestionKind::XIntercept,
        QuestionKind::EndBehavior,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStyle {
    MultipleChoice,
    /// Free text, compared leniently.
    Text,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub function: RationalFunction,
    pub kind: QuestionKind,
    pub prompt: String,
    pub correct_answer: String,
    pub style: AnswerStyle,
    pub options: Vec<String>,
}

impl Question {
    /// Multiple choice answers must match an option exactly. Text answers
    /// ignore case, whitespace and a leading `x=` / `y=`.
    pub fn check_answer(&self, answer: &str) -> bool {
        match self.style {
            AnswerStyle::MultipleChoice => answer == self.correct_answer,
            AnswerStyle::Text => normalize_answer(answer) == normalize_answer(&self.correct_answer),
        }
    }

    /// The same question without options, to be answered as free text.
    pub fn into_text(mut self) -> Self {
        self.style = AnswerStyle::Text;
        self.options.clear();
        self
    }
}

fn normalize_answer(answer: &str) -> String {
    answer
        .trim()
        .to_lowercase()
        .replace(char::is_whitespace, "")
        .replace("y=", "")
        .replace("x=", "")
}
