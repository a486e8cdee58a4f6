// campus-assist - finds your way around campus and keeps you company
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::Context;
use campus_assist_lib::{
    calc::{self, DEFAULT_SUPPORT_DISTANCE},
    core::{Journey, Step},
    logging,
    server::{self, AppState},
    AssistConfig, AssistError, Result,
};
use std::env;
use std::io::{self, BufRead, Read, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Grab whatever the user typed
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    match command.as_str() {
        "version" | "-v" | "--version" => {
            println!("campus-assist v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "-h" | "--help" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let config = AssistConfig::load()
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("could not load configuration")?;
    logging::init(&config.logging.level);

    // The server is long-running; its failures go through anyhow
    if command == "serve" {
        return handle_serve(&config).await;
    }

    let result = match command.as_str() {
        "ask" => handle_ask(&config, &args[2..]),
        "places" => handle_places(&config),
        "support" => handle_support(&config, &args[2..]).await,
        "journey" => handle_journey(),
        "history" => handle_history(&config, &args[2..]).await,
        "reactions" => handle_reactions(&args[2..]),
        "components" => handle_components(&args[2..]),
        "centroid" => handle_centroid(&args[2..]),
        "genres" => handle_genres(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_serve(config: &AssistConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("could not prepare the assistant")?;

    println!("Campus Assist running at http://{}", config.server.bind);

    server::serve(config.server.bind, state)
        .await
        .with_context(|| format!("web server on {} stopped", config.server.bind))
}

fn handle_ask(config: &AssistConfig, args: &[String]) -> Result<()> {
    let question = args.join(" ");
    if question.trim().is_empty() {
        println!("Please ask a question.");
        return Ok(());
    }

    let matcher = config.matcher()?;
    println!("{}", matcher.answer(&question).text());
    Ok(())
}

fn handle_places(config: &AssistConfig) -> Result<()> {
    let kb = config.knowledge_base()?;

    println!("Known places ({}):\n", kb.len());
    for key in kb.sorted_keys() {
        println!("  - {}", key);
    }
    Ok(())
}

async fn handle_support(config: &AssistConfig, args: &[String]) -> Result<()> {
    let responder = config.responder()?;
    let chat_log = config.chat_log().await?;

    // One-shot mode
    if !args.is_empty() {
        let message = args.join(" ");
        let answer = responder.respond(&message, &mut rand::thread_rng());
        chat_log.append(&message, &answer).await?;
        println!("{}", answer);
        return Ok(());
    }

    println!("I'm here to listen. Type 'exit' to leave.\n");

    loop {
        let Some(line) = prompt("You: ")? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "exit" | "quit") {
            println!("Bot: Take care. I'm here whenever you need me.");
            break;
        }

        let answer = responder.respond(message, &mut rand::thread_rng());
        chat_log.append(message, &answer).await?;
        println!("Bot: {}\n", answer);
    }

    Ok(())
}

fn handle_journey() -> Result<()> {
    let mut journey = Journey::new();

    println!("Inner journey: answer each question, or type 'exit' to stop.\n");
    println!("{}", journey.start());

    loop {
        let Some(line) = prompt("> ")? else {
            break;
        };
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        match journey.answer(&line) {
            Step::Question(next) => println!("\n{}", next),
            Step::Summary(summary) => {
                println!("\n{}", summary);
                break;
            }
            Step::Ignored => {}
        }
    }

    Ok(())
}

async fn handle_history(config: &AssistConfig, args: &[String]) -> Result<()> {
    let limit = args
        .first()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    let chat_log = config.chat_log().await?;
    let entries = chat_log.recent(limit).await?;

    if entries.is_empty() {
        println!("No conversations yet. Try: campus-assist support");
        return Ok(());
    }

    println!("Last {} conversations:\n", entries.len());
    for entry in entries {
        println!("{}", entry.timestamp.format("%Y-%m-%d %H:%M:%S"));
        println!("  You: {}", entry.user);
        println!("  Bot: {}\n", entry.bot);
    }
    Ok(())
}

fn handle_reactions(args: &[String]) -> Result<()> {
    let w = number_arg(args, 0, "W")?;
    let a = optional_number_arg(args, 1)?.unwrap_or(DEFAULT_SUPPORT_DISTANCE);
    let b = optional_number_arg(args, 2)?.unwrap_or(DEFAULT_SUPPORT_DISTANCE);

    let r = calc::reactions(w, a, b)?;

    println!("Load W = {}, a = {}, b = {}", w, a, b);
    println!("  RA = {:.2}", r.ra);
    println!("  RB = {:.2}", r.rb);
    Ok(())
}

fn handle_components(args: &[String]) -> Result<()> {
    let f = number_arg(args, 0, "F")?;
    let r = number_arg(args, 1, "r")?;
    let x = number_arg(args, 2, "x")?;

    let c = calc::force_components(f, r, x)?;

    println!("sin θ = {:.4}, cos θ = {:.4}", c.sin_theta, c.cos_theta);
    println!("  Normal component     Fn = {:.2}", c.normal);
    println!("  Tangential component Ft = {:.2}", c.tangential);
    Ok(())
}

fn handle_centroid(args: &[String]) -> Result<()> {
    let a = number_arg(args, 0, "a")?;
    let b = number_arg(args, 1, "b")?;
    let h = number_arg(args, 2, "h")?;

    let c = calc::trapezoid_centroid(a, b, h)?;

    println!("Area = {:.2}", c.area);
    println!("Centroid from bottom-left corner: x̄ = {:.2}, ȳ = {:.2}", c.x, c.y);
    Ok(())
}

fn handle_genres(args: &[String]) -> Result<()> {
    let text = match args.first() {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let readers = calc::parse_readers(&text)?;
    if readers.is_empty() {
        println!("No readers given. Expected lines like 'Asha: fantasy, mystery'.");
        return Ok(());
    }

    let report = calc::aggregate(&readers);

    println!("Readers by genre:");
    for (genre, students) in &report.readers_by_genre {
        let names: Vec<&str> = students.iter().map(String::as_str).collect();
        println!("  {}: {}", genre, names.join(", "));
    }

    println!("\nAverage genres per reader:");
    for (genre, avg) in &report.average_genres {
        println!("  {}: {:.2}", genre, avg);
    }
    Ok(())
}

fn number_arg(args: &[String], idx: usize, name: &str) -> Result<f64> {
    let raw = args
        .get(idx)
        .ok_or_else(|| AssistError::Generic(format!("Missing value for {}", name)))?;
    calc::parse_number(raw)
}

// Blank or "-" means "use the default"
fn optional_number_arg(args: &[String], idx: usize) -> Result<Option<f64>> {
    match args.get(idx).map(|s| s.trim()) {
        None | Some("") | Some("-") => Ok(None),
        Some(raw) => calc::parse_number(raw).map(Some),
    }
}

/// Print a prompt and read one line; `None` on end of input
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn print_usage() {
    println!(
        r#"campus-assist v{} - Your campus guide and a friendly ear

USAGE:
    campus-assist <COMMAND> [ARGS]

COMMANDS:
    serve                  Start the web assistant
    ask <question>         Ask where something is
    places                 List every known place
    support [message]      Talk to the support bot (interactive without a message)
    journey                Take the inner-journey questionnaire
    history [limit]        Show recent support conversations (default: 10)
    reactions W [a] [b]    Beam support reactions (a, b default to 24)
    components F r x       Normal/tangential components of a force on a circle
    centroid a b h         Centroid of a right trapezoid
    genres [file]          Reading-genre statistics (reads stdin without a file)
    version                Show version
    help                   Show this help

EXAMPLES:
    campus-assist ask where is the library
    campus-assist ask "How do I get to the gym from GJBC?"
    campus-assist reactions "forty five" 10 30
    campus-assist support "I'm stressed about exams"
    echo "Asha: fantasy, mystery" | campus-assist genres

CONFIGURATION:
    ~/.campus-assist/config.toml, or the file named by $CAMPUS_ASSIST_CONFIG.
    Set RUST_LOG=debug for verbose logs.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
