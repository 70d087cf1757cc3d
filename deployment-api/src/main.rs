use deployment_api::api::{Api, Context};
use deployment_api::config::Config;
use deployment_api::deploymentapi::{search, SearchParams};
use deployment_api::models::SearchRequest;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: deployment-search [--minimal-metadata f1,f2] [--size N] [QUERY]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    query: Option<String>,
    size: Option<u32>,
    minimal_metadata: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--minimal-metadata" => {
                let value = iter
                    .next()
                    .ok_or("--minimal-metadata requires a value")?;
                parsed.minimal_metadata = value
                    .split(',')
                    .map(|field| field.trim().to_string())
                    .filter(|field| !field.is_empty())
                    .collect();
            }
            "--size" => {
                let value = iter.next().ok_or("--size requires a value")?;
                let size = value
                    .parse::<u32>()
                    .map_err(|e| format!("invalid --size '{}': {}", value, e))?;
                parsed.size = Some(size);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            query => {
                if parsed.query.is_some() {
                    return Err(format!("unexpected argument '{}'", query));
                }
                parsed.query = Some(query.to_string());
            }
        }
    }

    Ok(parsed)
}

fn build_request(args: &Args) -> SearchRequest {
    let request = match &args.query {
        Some(query) => SearchRequest::query_string(query.clone()),
        None => SearchRequest::match_all(),
    };

    match args.size {
        Some(size) => request.with_size(size),
        None => request,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deployment_api=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            info!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let api = match Api::new(&config) {
        Ok(api) => api,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    info!("Searching deployments on {}", config.host);

    let params = SearchParams {
        api: Some(&api),
        context: Context::background().with_timeout(config.timeout),
        request: Some(build_request(&args)),
        minimal_metadata: args.minimal_metadata,
    };

    match search(&params).await {
        Ok(res) => {
            info!(
                "Found {} deployments, returning {}",
                res.match_count.unwrap_or_default(),
                res.deployments.len()
            );
            println!("{}", serde_json::to_string_pretty(&res)?);
            Ok(())
        }
        Err(e) => {
            error!("Search failed: {}", e);
            std::process::exit(1);
        }
    }
}
