use ratfunc::prelude::summary;
use ratfunc::{parse_function, Settings};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("RATFUNC_LOG"))
        .init();

    let inputs: Vec<String> = std::env::args().skip(1).collect();
    let inputs = if inputs.is_empty() {
        vec![
            "(x^2 - 1)/(x - 1)".to_string(),
            "1/(x^2 - 4)".to_string(),
            "(2x^2 + 3)/(x^2 - x - 6)".to_string(),
        ]
    } else {
        inputs
    };

    let settings = Settings::load("ratfunc.toml").unwrap_or_else(|err| {
        eprintln!("ignoring ratfunc.toml: {err}");
        Settings::default()
    });

    for input in &inputs {
        let function = match parse_function(input) {
            Ok(function) => function,
            Err(err) => {
                eprintln!("parse error for {input}: {err}");
                continue;
            }
        };
        println!("{}", function.to_formatted_expression());
        for line in summary(&function) {
            println!("  {line}");
        }
        let plot = function.sample_with(&settings.plot);
        println!(
            "  {} samples in {} drawable segments\n",
            plot.points.len(),
            plot.segments().len()
        );
    }
}
