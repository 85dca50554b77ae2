use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Management CLI for the reservation router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check router status
    Status,
    /// List routes in resolution order
    Routes,
    /// Resolve a path without navigating
    Resolve { path: String },
    /// Build a link for a named route
    Href {
        name: String,
        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Navigate to a location
    Navigate { location: String },
    /// Show the current navigation
    Current,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/api/status", base)).send().await?,
        Commands::Routes => client.get(format!("{}/api/routes", base)).send().await?,
        Commands::Resolve { path } => {
            client
                .get(format!("{}/api/resolve", base))
                .query(&[("path", path)])
                .send()
                .await?
        }
        Commands::Href { name, params } => {
            client
                .get(format!("{}/api/href/{}", base, name))
                .query(&params)
                .send()
                .await?
        }
        Commands::Navigate { location } => {
            client
                .post(format!("{}/api/navigate", base))
                .json(&json!({ "location": location }))
                .send()
                .await?
        }
        Commands::Current => client.get(format!("{}/api/navigation", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status == reqwest::StatusCode::NO_CONTENT {
        println!("(none)");
        return Ok(());
    }
    if !status.is_success() {
        eprintln!("Error: router returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
