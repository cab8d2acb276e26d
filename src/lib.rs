//! Exact analysis of rational functions `p(x) / q(x)`: simplification,
//! asymptotes, holes, intercepts, end behavior and plot sampling, plus a
//! multiple-choice quiz built on top of them.

pub mod config;
pub mod error;
pub mod format;
pub mod parser;
pub mod plot;
pub mod polynomial;
pub mod prelude;
pub mod quiz;
pub mod rational;
pub mod roots;
pub mod scores;
pub mod ui;

pub use config::{AnalysisSettings, PlotSettings, QuizSettings, ScoreSettings, Settings};
pub use error::{RatError, Result};
pub use format::{format_number, polynomial_latex, polynomial_text};
pub use parser::{parse_function, parse_function_in, parse_polynomial};
pub use plot::{PlotData, PLOT_CLIP_THRESHOLD};
pub use polynomial::{Polynomial, Rational};
pub use quiz::{AnswerStyle, Question, QuestionGenerator, QuestionKind};
pub use rational::{EndBehavior, Hole, RationalFunction};
pub use roots::{real_root_values, real_roots, RealRoot, ROOT_TOLERANCE};
pub use scores::{ScoreBoard, ScoreEntry};
