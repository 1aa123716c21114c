use anyhow::{bail, Context, Result};
use clap::Parser;
use company_website_etl::config::SearchArgs;
use company_website_etl::core::SearchConfig;
use company_website_etl::utils::{logger, validation::Validate};
use company_website_etl::{Resolution, WebsiteResolver};

/// Runs a single resolution or validation, for checking search and threshold settings.
#[derive(Parser)]
#[command(name = "check-site")]
#[command(about = "Resolve one company or validate one URL")]
struct Args {
    /// Company name to resolve
    #[arg(long, conflicts_with = "url")]
    company: Option<String>,

    /// URL to validate
    #[arg(long)]
    url: Option<String>,

    #[command(flatten)]
    search: SearchArgs,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    args.search
        .validate()
        .context("invalid search or validation settings")?;
    let resolver = WebsiteResolver::from_config(&args.search)
        .context("failed to set up HTTP clients")?;

    match (args.company.as_deref(), args.url.as_deref()) {
        (Some(company), _) => {
            println!("🔍 Query: {}", resolver.query_for(company));
            match resolver.resolve(company).await {
                Resolution::Found(url) => println!("✅ {}", url),
                Resolution::Exhausted { candidates } => {
                    println!("❌ No website found ({} candidates rejected)", candidates)
                }
                Resolution::SearchFailed(e) => println!("⚠️ Search failed: {}", e),
            }
        }
        (None, Some(url)) => {
            let timeout = args.search.fetch_timeout();
            println!("🌐 Fetching {} (timeout {:?})", url, timeout);
            match resolver.validator().check(url).await {
                Ok(()) => println!("✅ Valid website"),
                Err(reason) => println!("❌ Rejected: {}", reason),
            }
        }
        (None, None) => bail!("pass either --company or --url"),
    }

    Ok(())
}
