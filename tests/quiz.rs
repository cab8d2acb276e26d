use rand::rngs::StdRng;
use rand::SeedableRng;
use ratfunc::{AnswerStyle, QuestionGenerator, QuestionKind, RationalFunction, Settings};

fn generator(seed: u64) -> QuestionGenerator<StdRng> {
    QuestionGenerator::new(StdRng::seed_from_u64(seed))
}

fn f(num: &[i64], den: &[i64]) -> RationalFunction {
    RationalFunction::from_integers(num, den).expect("valid rational function")
}

#[test]
fn difficulty_rises_every_five_questions() {
    let mut quiz = generator(7);
    let mut levels = Vec::new();
    for _ in 0..30 {
        levels.push(quiz.difficulty());
        quiz.generate_question().expect("question");
    }
    assert_eq!(&levels[..5], &[1; 5]);
    assert_eq!(&levels[5..10], &[2; 5]);
    assert_eq!(levels[10], 3);
    assert_eq!(levels[20], 5);
    assert_eq!(levels[29], 5);
    assert_eq!(quiz.questions_answered(), 30);
}

#[test]
fn level_read_before_generating_matches_the_question() {
    let mut quiz = generator(11);
    for _ in 0..15 {
        let level = quiz.difficulty();
        let question = quiz.generate_question().expect("question");
        let expected = if level >= 3 { Some(2) } else { Some(1) };
        assert_eq!(question.function.denominator().degree(), expected, "level {level}");
    }
}

#[test]
fn pacing_follows_settings() {
    let mut settings = Settings::default();
    settings.quiz.questions_per_level = 2;
    settings.quiz.max_difficulty = 3;
    let mut quiz = QuestionGenerator::with_settings(StdRng::seed_from_u64(1), &settings);
    for _ in 0..10 {
        quiz.generate_question().expect("question");
    }
    assert_eq!(quiz.difficulty(), 3);
}

#[test]
fn correct_answer_is_always_an_option() {
    let mut quiz = generator(42);
    for _ in 0..200 {
        let question = quiz.generate_question().expect("question");
        assert!(
            question.options.contains(&question.correct_answer),
            "{:?}: {} not in {:?}",
            question.kind,
            question.correct_answer,
            question.options
        );
        assert!(question.check_answer(&question.correct_answer));
        assert!(question.options.len() >= 2 && question.options.len() <= 4);
        let mut unique = question.options.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), question.options.len(), "{:?}", question.options);
    }
}

#[test]
fn generated_functions_match_the_level() {
    let mut quiz = generator(3);
    for _ in 0..5 {
        let rf = quiz.random_function().expect("function");
        assert!(rf.numerator().degree().unwrap_or(0) <= 1);
        assert_eq!(rf.denominator().degree(), Some(1));
        quiz.generate_question().expect("question");
    }
    for _ in 0..5 {
        let rf = quiz.random_function().expect("function");
        assert_eq!(rf.numerator().degree(), Some(2));
        assert_eq!(rf.denominator().degree(), Some(1));
        quiz.generate_question().expect("question");
    }
    let rf = quiz.random_function().expect("function");
    assert_eq!(rf.numerator().degree(), Some(2));
    assert_eq!(rf.denominator().degree(), Some(2));
}

#[test]
fn vertical_asymptote_question() {
    let mut quiz = generator(5);
    let question = quiz.question_for(f(&[1], &[1, -3]), QuestionKind::VerticalAsymptote);
    assert_eq!(question.prompt, "What is the vertical asymptote of this function?");
    assert_eq!(question.correct_answer, "x = 3");
    assert_eq!(question.style, AnswerStyle::MultipleChoice);

    let two = quiz.question_for(f(&[1], &[1, 0, -4]), QuestionKind::VerticalAsymptote);
    assert_eq!(two.prompt, "What are the vertical asymptotes of this function?");
    assert_eq!(two.correct_answer, "x = -2, x = 2");
}

#[test]
fn none_answers_use_fixed_options() {
    let mut quiz = generator(9);
    let question = quiz.question_for(f(&[1], &[1, 0, 1]), QuestionKind::VerticalAsymptote);
    assert_eq!(question.correct_answer, "none");
    let mut options = question.options.clone();
    options.sort();
    assert_eq!(options, vec!["none", "x = -1", "x = 0", "x = 1"]);

    let hole = quiz.question_for(f(&[1], &[1, 0, 1]), QuestionKind::Hole);
    assert_eq!(hole.prompt, "Does this function have any holes? If so, where?");
    assert_eq!(hole.correct_answer, "none");
}

#[test]
fn hole_and_intercept_answers() {
    let mut quiz = generator(11);
    let rf = f(&[1, 0, -1], &[1, -1]);
    let hole = quiz.question_for(rf.clone(), QuestionKind::Hole);
    assert_eq!(hole.prompt, "Where is the hole in this function?");
    assert_eq!(hole.correct_answer, "(1, 2)");

    let y = quiz.question_for(rf.clone(), QuestionKind::YIntercept);
    assert_eq!(y.correct_answer, "(0, 1)");

    let x = quiz.question_for(rf, QuestionKind::XIntercept);
    assert_eq!(x.prompt, "What is the x-intercept of this function?");
    assert_eq!(x.correct_answer, "(-1, 0)");
}

#[test]
fn asymptote_and_end_behavior_answers() {
    let mut quiz = generator(13);
    let rf = f(&[2, 1], &[3, -1]);
    let ha = quiz.question_for(rf.clone(), QuestionKind::HorizontalAsymptote);
    assert_eq!(ha.correct_answer, "y = 0.6667");

    let end = quiz.question_for(rf, QuestionKind::EndBehavior);
    assert_eq!(
        end.prompt,
        "What is the end behavior of this function as x approaches infinity?"
    );
    assert_eq!(end.correct_answer, "approaches 0.6667");
    assert_eq!(end.options.len(), 4);

    let grows = quiz.question_for(f(&[1, 0, 0], &[1]), QuestionKind::EndBehavior);
    assert_eq!(grows.correct_answer, "approaches +infinity");
    assert!(grows.options.contains(&"approaches +infinity".to_string()));
}

#[test]
fn text_answers_are_compared_leniently() {
    let mut quiz = generator(17);
    let question = quiz
        .question_for(f(&[1], &[1, -3]), QuestionKind::VerticalAsymptote)
        .into_text();
    assert!(question.options.is_empty());
    assert!(question.check_answer("x=3"));
    assert!(question.check_answer(" X = 3 "));
    assert!(question.check_answer("3"));
    assert!(!question.check_answer("x = -3"));
}

#[test]
fn multiple_choice_requires_exact_option() {
    let mut quiz = generator(19);
    let question = quiz.question_for(f(&[1], &[1, -3]), QuestionKind::VerticalAsymptote);
    assert!(question.check_answer("x = 3"));
    assert!(!question.check_answer("x=3"));
}

#[test]
fn same_seed_same_questions() {
    let mut a = generator(1234);
    let mut b = generator(1234);
    for _ in 0..10 {
        let qa = a.generate_question().expect("question");
        let qb = b.generate_question().expect("question");
        assert_eq!(qa.prompt, qb.prompt);
        assert_eq!(qa.options, qb.options);
        assert_eq!(qa.function.to_display_string(), qb.function.to_display_string());
    }
}
