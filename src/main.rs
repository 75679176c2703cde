use card_maker::acquire::{self, PathSource};
use card_maker::flow::GenerationFlow;
use card_maker::imaging::{self, Platform};
use card_maker::print::{HtmlFileDispatcher, PrintDispatcher};
use card_maker::session::{Auth, FileSessionStore};
use card_maker::types::CardDraft;
use card_maker::{card, config, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Shared flags for commands that build a card.
#[derive(clap::Args, Clone)]
struct CardArgs {
    /// Photo for the card: a file path, file:// URI, or http(s) URL
    #[arg(long)]
    image: Option<String>,

    /// Greeting text
    #[arg(long, conflicts_with = "greeting_file")]
    greeting: Option<String>,

    /// Read the greeting from a file (keeps line breaks)
    #[arg(long)]
    greeting_file: Option<PathBuf>,

    /// How to read the image (overrides config.toml)
    #[arg(long, value_enum)]
    platform: Option<Platform>,
}

impl CardArgs {
    /// The greeting text, alerting and exiting if the greeting file can't be read.
    fn greeting(&self) -> String {
        match (&self.greeting, &self.greeting_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path).unwrap_or_else(|e| {
                log::debug!("reading {}: {e}", path.display());
                alert_and_exit(
                    "Error",
                    &format!("Could not read greeting file {}", path.display()),
                )
            }),
            (None, None) => String::new(),
        }
    }
}

/// Release builds report the package version; anything else reports the
/// commit it was built from.
fn version_string() -> &'static str {
    match (env!("ON_RELEASE_TAG"), env!("GIT_HASH")) {
        ("true", _) => env!("CARGO_PKG_VERSION"),
        (_, "") => concat!(env!("CARGO_PKG_VERSION"), "-dev"),
        (_, hash) => {
            Box::leak(format!("{}-dev+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "card-maker")]
#[command(about = "Printable greeting cards from a photo and a greeting")]
#[command(long_about = "\
Printable greeting cards from a photo and a greeting

Sign in once, then create cards. Each card is a single letter-size sheet
folded in quarters:

  ┌──────────────┬──────────────┐
  │ inside-right │ inside-left  │   printed upside down
  │  (greeting)  │   (photo)    │
  ├──────────────┼──────────────┤
  │     back     │    front     │
  │ (your name)  │ (title+photo)│
  └──────────────┴──────────────┘

Fold the top half back, then the left half back.

Run 'card-maker gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding the session store and config.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory the printable card is written to
    #[arg(long, default_value = "card-out", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in (local only; any email and password are accepted)
    SignIn {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account (local only)
    SignUp {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Repeat the password
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Forget the signed-in user
    SignOut,
    /// Show the signed-in user
    Whoami,
    /// Generate a printable card
    Create {
        #[command(flatten)]
        card: CardArgs,

        /// Print straight to PDF through a local Chrome (needs the `pdf` feature)
        #[arg(long)]
        pdf: bool,
    },
    /// Print the card document to stdout without writing any files
    Preview(CardArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    log::debug!("data directory: {}", data_dir.display());

    match cli.command {
        Command::SignIn { email, password } => {
            let mut auth = Auth::restore(FileSessionStore::new(&data_dir));
            match auth.sign_in(&email, &password) {
                Ok(user) => output::print_session(Some(user)),
                Err(e) => alert_and_exit("Sign In", &e.to_string()),
            }
        }
        Command::SignUp {
            name,
            email,
            password,
            confirm_password,
        } => {
            let mut auth = Auth::restore(FileSessionStore::new(&data_dir));
            match auth.sign_up(&name, &email, &password, &confirm_password) {
                Ok(user) => output::print_session(Some(user)),
                Err(e) => alert_and_exit("Sign Up", &e.to_string()),
            }
        }
        Command::SignOut => {
            let mut auth = Auth::restore(FileSessionStore::new(&data_dir));
            auth.sign_out()?;
            output::print_session(None);
        }
        Command::Whoami => {
            let auth = Auth::restore(FileSessionStore::new(&data_dir));
            output::print_session(auth.user());
        }
        Command::Create { card: args, pdf } => {
            let auth = Auth::restore(FileSessionStore::new(&data_dir));
            let Some(user) = auth.user() else {
                alert_and_exit(
                    "Not Signed In",
                    "Sign in with 'card-maker sign-in' before creating a card",
                );
            };
            let config = config::load_config(&data_dir)?;

            let locator = acquire::acquire_image(&PathSource::new(args.image.clone()))
                .unwrap_or_else(|e| alert_and_exit(e.title(), &e.to_string()));
            let draft = CardDraft::new(args.greeting(), locator);

            let normalizer =
                imaging::normalizer_for(args.platform.unwrap_or(config.images.platform))?;
            let dispatcher = dispatcher_for(pdf, &cli.output)?;
            let mut flow = GenerationFlow::new(normalizer.as_ref(), dispatcher.as_ref(), &config);
            let result = flow.run(&draft, Some(user));
            log::debug!("generation: {}", output::format_trace(flow.trace()));
            if let Err(e) = result {
                alert_and_exit(e.title(), &e.to_string());
            }
        }
        Command::Preview(args) => {
            let auth = Auth::restore(FileSessionStore::new(&data_dir));
            let config = config::load_config(&data_dir)?;
            let normalizer =
                imaging::normalizer_for(args.platform.unwrap_or(config.images.platform))?;
            let image_source = args
                .image
                .as_deref()
                .map(|locator| normalizer.normalize(locator))
                .unwrap_or_default();
            let document = card::build_document_with(
                &config,
                &image_source,
                &args.greeting(),
                auth.user().map(|u| u.name.as_str()),
            );
            print!("{}", document);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Per-user data directory, or `.card-maker` when the platform has none.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "card-maker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".card-maker"))
}

fn dispatcher_for(
    pdf: bool,
    output_dir: &Path,
) -> Result<Box<dyn PrintDispatcher>, Box<dyn std::error::Error>> {
    if !pdf {
        return Ok(Box::new(HtmlFileDispatcher::new(output_dir)));
    }
    #[cfg(feature = "pdf")]
    {
        Ok(Box::new(card_maker::print::PdfDispatcher::new(output_dir)))
    }
    #[cfg(not(feature = "pdf"))]
    {
        Err("PDF output needs card-maker built with `--features pdf`".into())
    }
}

/// Show a blocking alert and stop with a failure status.
fn alert_and_exit(title: &str, message: &str) -> ! {
    output::print_alert(title, message);
    std::process::exit(1)
}
