//! Interview Coach - terminal driver
//!
//! Resumes a stored interview or sets up a new one, then walks the candidate
//! through answer, feedback and advance until the final report.

use interview_coach::{
    CoachConfig, Dimension, Evaluation, HttpScoringClient, InterviewRuntime, InterviewSetup,
    LoggingScoringClient, ProductionRuntime, Report, Role, Seniority, SqliteSessionStore, View,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

const QUIT: &str = "/quit";
const ABANDON: &str = "/abandon";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the interview itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interview_coach=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = CoachConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        db_path = %config.db_path.display(),
        timeout_secs = config.request_timeout.as_secs(),
        "Starting interview coach"
    );

    let store = SqliteSessionStore::open(&config.db_path)?;
    let client = LoggingScoringClient::new(HttpScoringClient::from_config(&config)?);
    let mut runtime: ProductionRuntime = InterviewRuntime::new(client, store);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if let Some(session) = runtime.resume().await.session() {
        println!(
            "Resuming your {} {} interview ({}).",
            session.setup().seniority,
            session.setup().role,
            session.setup().focus_area
        );
    }
    println!("Type {QUIT} to stop (progress is kept) or {ABANDON} to discard this interview.");

    loop {
        match runtime.view() {
            View::NotStarted => {
                let Some(setup) = prompt_setup(&mut input).await? else {
                    return Ok(());
                };
                println!("\nGenerating your questions...");
                if let Err(e) = runtime.start(setup).await {
                    println!("{}", e.user_message());
                }
            }

            View::AwaitingAnswer { progress, question } => {
                println!("\n{progress}\n{question}\n");
                let Some(answer) = read_line(&mut input, "Your answer").await? else {
                    return Ok(());
                };
                match answer.trim() {
                    QUIT => return Ok(()),
                    ABANDON => {
                        abandon(&mut runtime).await;
                        continue;
                    }
                    _ => {}
                }
                println!("Evaluating...");
                if let Err(e) = runtime.submit_answer(&answer).await {
                    println!("{}", e.user_message());
                }
            }

            View::ReviewingFeedback {
                evaluation,
                is_last,
                ..
            } => {
                print_evaluation(evaluation);
                let prompt = if is_last {
                    "Press Enter to finish"
                } else {
                    "Press Enter for the next question"
                };
                let Some(line) = read_line(&mut input, prompt).await? else {
                    return Ok(());
                };
                match line.trim() {
                    QUIT => return Ok(()),
                    ABANDON => abandon(&mut runtime).await,
                    _ => {
                        if let Err(e) = runtime.advance().await {
                            println!("{}", e.user_message());
                        }
                    }
                }
            }

            View::Finished { .. } => {
                let report = runtime.report()?;
                print_report(&report);

                // The narrative review is optional; scores above stand on their own
                match runtime.debrief().await {
                    Ok(debrief) => {
                        println!("\nReadiness: {}", debrief.readiness_level);
                        println!("{}", debrief.overall_performance);
                        print_list("Key strengths", &debrief.key_strengths);
                        print_list("Areas for improvement", &debrief.areas_for_improvement);
                        print_list("Next steps", &debrief.actionable_next_steps);
                        print_list("Resources", &debrief.recommended_resources);
                    }
                    Err(e) => tracing::warn!(error = %e, "Debrief unavailable"),
                }

                runtime.abandon().await?;
                return Ok(());
            }
        }
    }
}

async fn abandon(runtime: &mut ProductionRuntime) {
    match runtime.abandon().await {
        Ok(()) => println!("Interview discarded."),
        Err(e) => println!("{}", e.user_message()),
    }
}

/// Read one line; `None` on end of input
async fn read_line(input: &mut Input, prompt: &str) -> std::io::Result<Option<String>> {
    println!("{prompt}:");
    input.next_line().await
}

/// Pick one of `options` by number or name
async fn choose<'a>(
    input: &mut Input,
    title: &str,
    options: &[&'a str],
) -> std::io::Result<Option<&'a str>> {
    println!("\n{title}");
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }
    loop {
        let Some(line) = read_line(input, "Choice").await? else {
            return Ok(None);
        };
        let line = line.trim();
        if line == QUIT {
            return Ok(None);
        }
        let picked = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
            .or_else(|| options.iter().find(|o| o.eq_ignore_ascii_case(line)));
        match picked {
            Some(option) => return Ok(Some(*option)),
            None => println!("Please pick one of the listed options."),
        }
    }
}

async fn prompt_setup(input: &mut Input) -> std::io::Result<Option<InterviewSetup>> {
    let roles: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
    let levels: Vec<&str> = Seniority::ALL.iter().map(|s| s.as_str()).collect();

    let Some(role) = choose(input, "Role", &roles).await? else {
        return Ok(None);
    };
    let Some(seniority) = choose(input, "Seniority", &levels).await? else {
        return Ok(None);
    };
    let areas = role
        .parse::<Role>()
        .map(Role::focus_areas)
        .unwrap_or_default();
    let Some(focus_area) = choose(input, "Focus area", areas).await? else {
        return Ok(None);
    };

    match InterviewSetup::parse(role, seniority, focus_area) {
        Ok(setup) => Ok(Some(setup)),
        Err(e) => {
            println!("{e}");
            Ok(None)
        }
    }
}

fn print_evaluation(evaluation: &Evaluation) {
    println!("\nScore: {}/100", evaluation.total_score);
    for (dimension, score) in evaluation.scores.iter() {
        println!("  {:<24} {score}/20", dimension.label());
    }
    println!("\n{}", evaluation.feedback);
    print_list("Strengths", &evaluation.strengths);
    print_list("To improve", &evaluation.improvements);
    println!("\nSuggested answer:\n{}\n", evaluation.suggested_answer);
}

fn print_report(report: &Report) {
    println!("\n=== Interview complete ===");
    for entry in &report.entries {
        println!(
            "Q{}: {}/100  {}",
            entry.index + 1,
            entry.evaluation.total_score,
            entry.question
        );
    }
    println!("\nAverage score: {}/100", report.summary.total_score);
    for dimension in Dimension::ALL {
        println!(
            "  {:<24} {:.1}/20",
            dimension.label(),
            report.summary.dimension_mean(dimension)
        );
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}
