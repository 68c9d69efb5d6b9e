use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::application::{DEFAULT_AVATAR, LedgerService, SplitResult};
use crate::domain::{Friend, Payer, format_cents, parse_cents};
use crate::io::{Exporter, load_seed};

/// splitbill - split bills with friends and track who owes whom
#[derive(Parser, Debug)]
#[command(name = "splitbill")]
#[command(about = "Split bills with friends and keep running balances")]
#[command(version)]
pub struct Cli {
    /// JSON file with the initial friend list (replaces the default friends)
    #[arg(short, long, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Start with no friends at all
    #[arg(long, conflicts_with = "seed")]
    pub empty: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_logging(&self) {
        let default = if self.verbose { "splitbill=debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn build_service(&self) -> Result<LedgerService> {
        if self.empty {
            return Ok(LedgerService::empty());
        }
        match &self.seed {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open seed file: {}", path.display()))?;
                let friends = load_seed(BufReader::new(file))
                    .with_context(|| format!("Failed to load seed file: {}", path.display()))?;
                Ok(LedgerService::from_seed(friends)?)
            }
            None => Ok(LedgerService::with_default_friends()),
        }
    }

    pub fn run(self) -> Result<()> {
        let service = self.build_service()?;
        let stdin = std::io::stdin();
        let prompt = stdin.is_terminal();

        let mut session = Session::new(service).with_prompt(prompt);
        session.run(stdin.lock(), std::io::stdout().lock())
    }
}

/// One line typed into the session
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// List friends and balances
    List,

    /// Add a friend
    Add {
        /// Friend name
        name: String,

        /// Avatar image URL
        #[arg(short, long, default_value = DEFAULT_AVATAR)]
        image: String,
    },

    /// Select a friend, or close the selection if already selected
    Select {
        /// Friend name or id
        friend: String,
    },

    /// Split a bill with the selected friend (or --friend)
    Split {
        /// Bill value (e.g., "50" or "49.90")
        bill: String,

        /// Your share of the bill
        your_expense: String,

        /// Who paid the bill: user or friend
        #[arg(short, long, default_value = "user")]
        payer: String,

        /// Friend name or id (defaults to the selected friend)
        #[arg(short, long)]
        friend: Option<String>,
    },

    /// Show details of a friend
    Show {
        /// Friend name or id
        friend: String,
    },

    /// Write balances to the terminal as CSV or JSON
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Whether the session keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Interactive session: reads one command per line and renders the ledger.
pub struct Session {
    service: LedgerService,
    prompt: bool,
}

impl Session {
    pub fn new(service: LedgerService) -> Self {
        Self {
            service,
            prompt: false,
        }
    }

    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    /// Run until `quit` or end of input. Command errors are printed and the
    /// session continues; only I/O failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        writeln!(
            output,
            "{} friend(s) loaded. Type 'help' for commands.",
            self.service.list_friends().len()
        )?;

        let mut line = String::new();
        loop {
            if self.prompt {
                write!(output, "> ")?;
                output.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match self.execute(&line, &mut output) {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue) => {}
                Err(e) => writeln!(output, "error: {:#}", e)?,
            }
        }

        output.flush()?;
        Ok(())
    }

    /// Parse and run a single command line.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Outcome> {
        let tokens = split_line(line)?;
        let parsed = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Help output and usage errors are both rendered by clap
                write!(out, "{}", e.render())?;
                return Ok(Outcome::Continue);
            }
        };

        match parsed.command {
            SessionCommand::List => self.render_list(out)?,

            SessionCommand::Add { name, image } => {
                let friend = self.service.add_friend(&name, &image)?;
                writeln!(out, "Added friend: {}", friend.name)?;
            }

            SessionCommand::Select { friend } => {
                let name = self.service.find_friend(&friend)?.name.clone();
                match self.service.select_friend(&friend)? {
                    Some(selected) => {
                        writeln!(out, "Selected {}", selected.name)?;
                        writeln!(
                            out,
                            "Split a bill with {}: split <BILL> <YOUR_EXPENSE> [--payer user|friend]",
                            selected.name
                        )?;
                    }
                    None => writeln!(out, "Closed {}", name)?,
                }
            }

            SessionCommand::Split {
                bill,
                your_expense,
                payer,
                friend,
            } => {
                let total = parse_cents(&bill)
                    .with_context(|| format!("Invalid bill value '{}'", bill))?;
                let user_expense = parse_cents(&your_expense)
                    .with_context(|| format!("Invalid expense '{}'", your_expense))?;
                let payer: Payer = payer.parse()?;

                let result = match friend {
                    Some(reference) => {
                        self.service
                            .split_bill(&reference, total, user_expense, payer)?
                    }
                    None => self.service.split_selected(total, user_expense, payer)?,
                };
                render_split(out, total, &result)?;
            }

            SessionCommand::Show { friend } => {
                let friend = self.service.find_friend(&friend)?;
                let selected = self
                    .service
                    .selected()
                    .is_some_and(|s| s.id == friend.id);
                render_friend(out, friend, selected)?;
            }

            SessionCommand::Export { format } => {
                let exporter = Exporter::new(self.service.ledger());
                match format {
                    ExportFormat::Csv => exporter.balances_csv(&mut *out)?,
                    ExportFormat::Json => exporter.snapshot_json(&mut *out)?,
                };
            }

            SessionCommand::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Continue)
    }

    fn render_list<W: Write>(&self, out: &mut W) -> Result<()> {
        let friends = self.service.list_friends();
        if friends.is_empty() {
            writeln!(out, "No friends yet. Add one with: add <NAME>")?;
            return Ok(());
        }

        let selected = self.service.selected().map(|f| f.id);
        writeln!(out, "  {:<20} {:>12}  {}", "NAME", "BALANCE", "STATUS")?;
        writeln!(out, "  {}", "-".repeat(60))?;
        for friend in friends {
            let marker = if selected == Some(friend.id) { '>' } else { ' ' };
            writeln!(
                out,
                "{} {:<20} {:>12}  {}",
                marker,
                truncate(&friend.name, 20),
                format_cents(friend.balance),
                friend.describe_balance()
            )?;
        }
        Ok(())
    }
}

fn render_split<W: Write>(out: &mut W, total: i64, result: &SplitResult) -> Result<()> {
    let sign = if result.delta >= 0 { "+" } else { "" };
    writeln!(
        out,
        "Split {} with {}: {}{}",
        format_cents(total),
        result.friend.name,
        sign,
        format_cents(result.delta)
    )?;
    writeln!(out, "{}", result.friend.describe_balance())?;
    Ok(())
}

fn render_friend<W: Write>(out: &mut W, friend: &Friend, selected: bool) -> Result<()> {
    writeln!(out, "Friend: {}", friend.name)?;
    writeln!(out, "  ID:       {}", friend.id)?;
    writeln!(out, "  Image:    {}", friend.image_ref)?;
    writeln!(out, "  Balance:  {}", format_cents(friend.balance))?;
    writeln!(out, "  Status:   {}", friend.describe_balance())?;
    writeln!(out, "  Selected: {}", if selected { "yes" } else { "no" })?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

/// Split a command line into words. Double quotes group words together.
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        bail!("Unterminated quote in: {}", line.trim());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
