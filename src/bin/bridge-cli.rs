use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Inspect the route table of a running action-bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "/_bridge")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server status
    Status,
    /// List the advertised route table
    Routes,
    /// Resolve a path the way the host dispatcher would
    Lookup {
        path: String,
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.prefix);

    let request = match &cli.command {
        Commands::Status => client.get(format!("{}/status", base)),
        Commands::Routes => client.get(format!("{}/routes", base)),
        Commands::Lookup { path, method } => client
            .get(format!("{}/lookup", base))
            .query(&[("path", path.as_str()), ("method", method.as_str())]),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
