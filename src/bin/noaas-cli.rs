use clap::{Parser, Subcommand, ValueEnum};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use no_as_a_service::http::MediaType;

#[derive(Parser)]
#[command(name = "noaas-cli")]
#[command(about = "Ask a No-as-a-Service instance for a reason", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one rejection in the given format
    Fetch {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Send a raw Accept header and show what comes back
    Negotiate {
        /// Accept header value, e.g. "text/html;q=0.5, */*;q=0.1"
        accept: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
    Html,
    Xml,
}

impl From<Format> for MediaType {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => MediaType::Json,
            Format::Text => MediaType::PlainText,
            Format::Html => MediaType::Html,
            Format::Xml => MediaType::Xml,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}/no", cli.url.trim_end_matches('/'));

    let accept = match cli.command {
        Commands::Fetch { format } => MediaType::from(format).as_str().to_string(),
        Commands::Negotiate { accept } => accept,
    };

    let res = client.get(&endpoint).header(ACCEPT, accept).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let body = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Content-Type: {}", content_type);
        eprintln!("Response: {}", body);
        return Ok(());
    }

    println!("Content-Type: {}", content_type);
    if content_type == MediaType::Json.as_str() {
        let json: serde_json::Value = serde_json::from_str(&body)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", body);
    }
    Ok(())
}
