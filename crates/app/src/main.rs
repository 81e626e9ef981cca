use std::fmt;
use std::sync::Arc;

use quiz_core::model::Level;
use services::{Clock, CompletionConfig, HttpCompletionService, QuizSessionService};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use ui::vm::{
    LOADING_MESSAGE, OptionMark, QuizPanelVm, QuizVm, SetupFormVm, markdown_to_plain, start_quiz,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLevel { raw: String },
    InvalidYear { raw: String },
    InvalidUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLevel { raw } => write!(f, "invalid --level value: {raw}"),
            ArgsError::InvalidYear { raw } => write!(f, "invalid --year value: {raw}"),
            ArgsError::InvalidUrl { raw } => write!(f, "invalid --url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--level <havo|vwo>] [--year <n>] [--topic <name|number>] [--url <endpoint>]");
    eprintln!();
    eprintln!("Without --topic the setup questions are asked interactively.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_LEVEL, QUIZ_YEAR, QUIZ_TOPIC");
    eprintln!("  QUIZ_COMPLETION_URL, QUIZ_COMPLETION_API_KEY, QUIZ_COMPLETION_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (default: warn)");
}

struct Args {
    url: Option<String>,
    level: Option<Level>,
    year: Option<u8>,
    topic: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            url: None,
            level: std::env::var("QUIZ_LEVEL")
                .ok()
                .and_then(|value| value.parse().ok()),
            year: std::env::var("QUIZ_YEAR")
                .ok()
                .and_then(|value| value.trim().parse().ok()),
            topic: std::env::var("QUIZ_TOPIC")
                .ok()
                .filter(|value| !value.trim().is_empty()),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--level" => {
                    let value = require_value(args, "--level")?;
                    let level = value
                        .parse::<Level>()
                        .map_err(|_| ArgsError::InvalidLevel { raw: value.clone() })?;
                    parsed.level = Some(level);
                }
                "--year" => {
                    let value = require_value(args, "--year")?;
                    let year = value
                        .trim()
                        .parse::<u8>()
                        .map_err(|_| ArgsError::InvalidYear { raw: value.clone() })?;
                    parsed.year = Some(year);
                }
                "--topic" => {
                    parsed.topic = Some(require_value(args, "--topic")?);
                }
                "--url" => {
                    let value = require_value(args, "--url")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidUrl { raw: value });
                    }
                    parsed.url = Some(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn setup_form(&self) -> SetupFormVm {
        let mut form = SetupFormVm::new();
        if let Some(level) = self.level {
            form.set_level(level);
        }
        if let Some(year) = self.year {
            form.set_year(year);
        }
        if let Some(topic) = &self.topic {
            apply_topic(&mut form, topic);
        }
        form
    }
}

/// Accepts either a catalogue number or free text.
fn apply_topic(form: &mut SetupFormVm, raw: &str) {
    match raw.trim().parse::<usize>() {
        Ok(number) => {
            form.choose_topic(number);
        }
        Err(_) => form.set_topic(raw.trim()),
    }
}

struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prompts and reads one trimmed line; `None` on end of input.
    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

enum Flow {
    Reset(SetupFormVm),
    Quit,
}

async fn collect_setup(
    terminal: &mut Terminal,
    mut form: SetupFormVm,
) -> std::io::Result<Option<SetupFormVm>> {
    println!();
    println!("Set up your practice session");
    loop {
        let Some(answer) = terminal
            .ask(&format!("Level [havo/vwo] ({}): ", form.level().code()))
            .await?
        else {
            return Ok(None);
        };
        if answer.is_empty() {
            break;
        }
        match answer.parse::<Level>() {
            Ok(level) => {
                form.set_level(level);
                break;
            }
            Err(err) => println!("{err}"),
        }
    }

    let years = form
        .available_years()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("/");
    loop {
        let Some(answer) = terminal
            .ask(&format!("Year [{years}] ({}): ", form.year()))
            .await?
        else {
            return Ok(None);
        };
        if answer.is_empty() {
            break;
        }
        match answer.parse::<u8>() {
            Ok(year) if form.available_years().contains(&year) => {
                form.set_year(year);
                break;
            }
            _ => println!("Pick one of {years}."),
        }
    }

    for (index, topic) in form.topics().iter().enumerate() {
        println!("  {:>2}. {topic}", index + 1);
    }
    while !form.can_submit() {
        let Some(answer) = terminal.ask("Topic (number or text): ").await? else {
            return Ok(None);
        };
        apply_topic(&mut form, &answer);
    }

    Ok(Some(form))
}

fn render(vm: &QuizVm) {
    println!();
    println!("{}   score {}", vm.header_label(), vm.score_label());
    if let Some(prompt) = vm.prompt_text() {
        println!();
        println!("{prompt}");
    }
    for (index, row) in vm.option_rows().iter().enumerate() {
        let marker = match row.mark {
            OptionMark::Neutral => " ",
            OptionMark::Selected => ">",
            OptionMark::Correct => "✓",
            OptionMark::Wrong => "✗",
        };
        println!(" {marker} {}) {}", index + 1, row.label);
    }
    println!();
    match vm.panel() {
        QuizPanelVm::Loading => println!("{LOADING_MESSAGE}"),
        QuizPanelVm::Answering { can_submit } => {
            if can_submit {
                println!("[1-4] change answer  [s] submit  [r] new session  [q] quit");
            } else {
                println!("[1-4] choose an answer  [r] new session  [q] quit");
            }
        }
        QuizPanelVm::Correct { explanation } => {
            println!("Correct!");
            println!("{}", markdown_to_plain(&explanation));
            println!("[n] next question  [r] new session  [q] quit");
        }
        QuizPanelVm::Incorrect { message, .. } => {
            println!("{}", markdown_to_plain(&message));
            println!("[n] next question  [r] new session  [q] quit");
        }
        QuizPanelVm::Guidance {
            revealed,
            can_advance,
        } => {
            println!("Let's think it through...");
            for hint in &revealed {
                println!("  - {}", markdown_to_plain(hint));
            }
            if can_advance {
                println!("[h] next hint  [r] new session  [q] quit");
            } else {
                println!("[n] next question  [r] new session  [q] quit");
            }
        }
    }
}

async fn play(
    terminal: &mut Terminal,
    service: &QuizSessionService,
    mut vm: QuizVm,
) -> std::io::Result<Flow> {
    loop {
        render(&vm);
        let Some(command) = terminal.ask("> ").await? else {
            return Ok(Flow::Quit);
        };
        match command.to_ascii_lowercase().as_str() {
            "q" | "quit" => return Ok(Flow::Quit),
            "r" | "reset" => return Ok(Flow::Reset(vm.reset())),
            "s" | "submit" | "" => vm.submit(service).await,
            "h" | "hint" => vm.advance_hint(),
            "n" | "next" => {
                if vm.can_request_next() {
                    println!("{LOADING_MESSAGE}");
                }
                vm.next_question(service).await;
            }
            other => match other.parse::<usize>() {
                Ok(number @ 1..=4) => vm.select(number - 1),
                _ => println!("unknown command: {other}"),
            },
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let mut completion_config = CompletionConfig::from_env();
    if let Some(url) = &parsed.url {
        completion_config.url.clone_from(url);
    }
    tracing::info!(url = %completion_config.url, "using completion service");
    let completion = Arc::new(HttpCompletionService::new(completion_config));
    let service = QuizSessionService::new(completion, Clock::system());

    let mut terminal = Terminal::new();
    let mut form = parsed.setup_form();
    loop {
        if !form.can_submit() {
            match collect_setup(&mut terminal, form).await? {
                Some(filled) => form = filled,
                None => return Ok(()),
            }
        }
        let config = form.submit()?;

        println!("{LOADING_MESSAGE}");
        let vm = start_quiz(&service, config).await;
        match play(&mut terminal, &service, vm).await? {
            Flow::Quit => return Ok(()),
            Flow::Reset(prefilled) => {
                // A new session always goes back through setup.
                form = SetupFormVm::new();
                form.set_level(prefilled.level());
                form.set_year(prefilled.year());
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
