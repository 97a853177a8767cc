//! ThousandEyes CLI — manage web transaction tests from the terminal.

mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use thousandeyes_lib::{get_auth_token, normalize_endpoint, Client, WebTransaction};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thousandeyes")]
#[command(about = "ThousandEyes CLI — create, get, update, and delete web transaction tests", long_about = None)]
struct Cli {
    /// Output format: plain (human-readable), json (structured).
    #[arg(short, long, default_value = "plain", value_enum)]
    output: OutputFormatArg,

    /// API base URL.
    #[arg(long, env = "THOUSANDEYES_API_ENDPOINT", default_value = thousandeyes_lib::client::DEFAULT_API_ENDPOINT)]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Plain,
    Json,
}

#[derive(Args)]
#[group(multiple = false)]
struct ScriptArgs {
    /// Transaction script text
    #[arg(long)]
    script: Option<String>,
    /// Read the transaction script from a file
    #[arg(long)]
    script_file: Option<PathBuf>,
}

impl ScriptArgs {
    fn load(self) -> Result<Option<String>, String> {
        match (self.script, self.script_file) {
            (Some(s), _) => Ok(Some(s)),
            (None, Some(path)) => std::fs::read_to_string(&path)
                .map(Some)
                .map_err(|e| format!("Could not read {}: {}", path.display(), e)),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a web transaction test
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        script: ScriptArgs,
    },
    /// Show one web transaction test
    Get { test_id: i64 },
    /// Update a web transaction test
    Update {
        test_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        script: ScriptArgs,
    },
    /// Delete a web transaction test
    Delete { test_id: i64 },
    /// Show version
    Version,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("THOUSANDEYES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Version) {
        println!("thousandeyes {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_tracing();

    let endpoint = match normalize_endpoint(&cli.endpoint) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (token, source) = match get_auth_token() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?source, %endpoint, "auth token resolved");

    let client = Client::with_endpoint(endpoint, token);
    let format = match cli.output {
        OutputFormatArg::Plain => output::OutputFormat::Plain,
        OutputFormatArg::Json => output::OutputFormat::Json,
    };

    match run(&client, cli.command, format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &Client, cmd: Commands, format: output::OutputFormat) -> Result<(), String> {
    let print_test = |t: &WebTransaction| -> Result<(), String> {
        println!("{}", output::render(t, format)?);
        Ok(())
    };

    match cmd {
        Commands::Create { name, script } => {
            let script = script
                .load()?
                .ok_or("Provide --script or --script-file")?;
            let created = client
                .create_web_transaction(&WebTransaction::new(name, script))
                .await
                .map_err(|e| e.to_string())?;
            print_test(&created)?;
        }
        Commands::Get { test_id } => {
            let test = client
                .get_web_transaction(test_id)
                .await
                .map_err(|e| e.to_string())?;
            print_test(&test)?;
        }
        Commands::Update {
            test_id,
            name,
            script,
        } => {
            let update = WebTransaction {
                test_name: name,
                transaction_script: script.load()?,
                ..WebTransaction::default()
            };
            if update.test_name.is_none() && update.transaction_script.is_none() {
                return Err("Nothing to update: pass --name, --script, or --script-file".to_string());
            }
            let updated = client
                .update_web_transaction(test_id, &update)
                .await
                .map_err(|e| e.to_string())?;
            print_test(&updated)?;
        }
        Commands::Delete { test_id } => {
            client
                .delete_web_transaction(test_id)
                .await
                .map_err(|e| e.to_string())?;
            if format == output::OutputFormat::Json {
                println!("{}", serde_json::json!({ "deleted": test_id }));
            } else {
                println!("Deleted test {}", test_id);
            }
        }
        Commands::Version => {}
    }
    Ok(())
}
