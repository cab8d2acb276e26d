use std::io::{self, BufRead, Write};

use ratfunc::{QuestionGenerator, ScoreBoard, Settings};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

const ROUNDS: usize = 10;

fn main() -> ratfunc::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RATFUNC_LOG"))
        .init();

    let settings = Settings::load("ratfunc.toml")?;
    let mut generator = QuestionGenerator::with_settings(rand::thread_rng(), &settings);
    let mut board = ScoreBoard::from_settings(&settings.scores);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut score = 0u64;

    for _ in 0..ROUNDS {
        let level = generator.difficulty();
        let question = generator.generate_question()?;
        println!("{}", question.function.to_formatted_expression());
        println!("{} (level {})", question.prompt, level);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {option}", i + 1);
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let answer = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|i| question.options.get(i.wrapping_sub(1)))
            .cloned()
            .unwrap_or(line);
        if question.check_answer(&answer) {
            score += 10 * u64::from(level);
            println!("Correct! Score: {score}\n");
        } else {
            println!("Not quite, the answer was {}\n", question.correct_answer);
        }
    }

    print!("Name for the leaderboard: ");
    io::stdout().flush()?;
    if let Some(Ok(name)) = lines.next() {
        let name = name.trim();
        if !name.is_empty() {
            board.add_score(name, score)?;
        }
    }
    for (rank, entry) in board.top(settings.scores.top_limit).iter().enumerate() {
        println!("{:>2}. {:<16} {}", rank + 1, entry.name, entry.score);
    }
    Ok(())
}
