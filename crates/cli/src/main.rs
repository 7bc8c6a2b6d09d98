use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use postgrab_core::{PostReference, ResolvedPost, Resolver, ResolverConfig};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the resolved post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

impl From<OutputFormat> for postgrab_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => postgrab_core::OutputFormat::Text,
            OutputFormat::Json => postgrab_core::OutputFormat::Json,
        }
    }
}

/// Resolve a post URL to its text and author
#[derive(Parser, Debug)]
#[command(name = "postgrab")]
#[command(author = "Postgrab Contributors")]
#[command(version)]
#[command(about = "Resolve post URLs to clean text", long_about = None)]
struct Args {
    /// Post URL (twitter.com, x.com, vxtwitter.com, fxtwitter.com, fixupx.com, fixvx.com)
    #[arg(value_name = "URL")]
    url: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout per attempt in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Attempts against the syndication endpoint
    #[arg(long, default_value = "3", value_name = "NUM")]
    max_attempts: u32,

    /// Backoff unit between syndication attempts in milliseconds
    #[arg(long, default_value = "1000", value_name = "MS")]
    retry_delay_ms: u64,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn render(post: &ResolvedPost, format: OutputFormat) -> anyhow::Result<String> {
    let mut output = post.to_format(format.into()).context("Failed to render post")?;
    output.push('\n');
    Ok(output)
}

async fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        echo::print_banner();
        echo::print_step(1, 3, "Validating URL");
    }

    let reference = PostReference::parse(&args.url).context("Not a recognised post URL")?;

    if args.verbose {
        echo::print_field("Post", &reference.post_id);
        echo::print_field("Canonical", &reference.canonical_url);
        eprintln!();
        echo::print_step(2, 3, &format!("Resolving {}", reference.canonical_url.bright_white().underline()));
    }

    let mut builder = ResolverConfig::builder()
        .timeout(args.timeout)
        .max_attempts(args.max_attempts)
        .retry_delay(Duration::from_millis(args.retry_delay_ms));
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let resolver = Resolver::with_config(builder.build());

    let started = Instant::now();
    let post = resolver.resolve_reference(&reference).await.context("Failed to resolve post")?;

    if args.verbose {
        echo::print_field("Author", &format!("{} {}", post.author_name, post.author_handle));
        echo::print_field("Length", &echo::format_length(&post.text));
        echo::print_timing("Resolved in", started.elapsed());
        eprintln!();
        echo::print_step(3, 3, "Writing output");
        echo::print_info(&format!("Format: {:?}", args.format));
    }

    let output = render(&post, args.format)?;

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        echo::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json() {
        let post = ResolvedPost::new("hi".into(), "Alice".into(), "@alice".into(), "https://x.com/a/status/1".into());
        let rendered = render(&post, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["authorHandle"], "@alice");
    }
}
