//! Hydrofolio CLI
//!
//! Command-line access to the portfolio and analysis tools:
//! - Render the portfolio page
//! - Describe a numeric series or fit a regression
//! - Summarise USGS streamflow for a site
//! - Update README citation badges
//! - Print a default config file

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use hydrofolio::badges::{update_readme, ScholarMetrics};
use hydrofolio::config::{generate_default_config, Config};
use hydrofolio::integrations::usgs::{
    extract_readings, extract_site_name, lookback, summarize, MAX_DAYS,
};
use hydrofolio::integrations::ApiClient;
use hydrofolio::portfolio::{Portfolio, ProjectCard};
use hydrofolio::render::{containers, page};
use hydrofolio::stats::{
    calculate_stats, detect_outliers, linear_regression, moving_average, normalize,
};
use hydrofolio::utils::format_number;

#[derive(Parser)]
#[command(name = "hydrofolio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Research portfolio and hydrology analysis tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Show info-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch featured repositories and render the portfolio
    Portfolio {
        /// Write the HTML page here instead of listing the projects
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Describe a series of numbers
    Stats {
        /// Values, space or comma separated
        #[arg(allow_negative_numbers = true, value_delimiter = ',')]
        values: Vec<f64>,
        /// Read values from a file, one or more per line
        #[arg(long)]
        file: Option<PathBuf>,
        /// Moving average window
        #[arg(short, long)]
        window: Option<usize>,
        /// Print the min-max normalised series
        #[arg(long)]
        normalize: bool,
    },

    /// Least squares fit of y against x
    Regress {
        #[arg(long, required = true, allow_negative_numbers = true, value_delimiter = ',')]
        x: Vec<f64>,
        #[arg(long, required = true, allow_negative_numbers = true, value_delimiter = ',')]
        y: Vec<f64>,
    },

    /// Summarise recent discharge at a USGS gauge
    Streamflow {
        /// Site number (default: usgs.default_site)
        site: Option<String>,
        /// Days back from today
        #[arg(short, long, default_value = "7")]
        days: u32,
        /// Moving average window
        #[arg(short, long, default_value = "24")]
        window: usize,
    },

    /// Update citation badges in a README
    Badges {
        /// README to rewrite
        #[arg(default_value = "README.md")]
        readme: PathBuf,
        #[arg(long)]
        h_index: Option<u64>,
        #[arg(long)]
        citations: Option<u64>,
        #[arg(long)]
        publications: Option<u64>,
        #[arg(long)]
        i10_index: Option<u64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    let mut logging = config.logging.clone();
    if !cli.verbose {
        logging.level = "warn".to_string();
    }
    logging.init();

    match cli.command {
        Commands::Portfolio { output } => {
            let client = ApiClient::from_config(&config)?;
            let portfolio = Portfolio::new(std::sync::Arc::new(client), config.github.clone());

            match output {
                Some(path) => {
                    let grid = portfolio.render().await;
                    let body = format!(
                        r#"<section id="projects"><div id="{}" class="project-grid">{}</div></section>"#,
                        containers::PROJECT_GRID,
                        grid
                    );
                    let tokens = config.theme.tokens(config.theme.default);
                    std::fs::write(&path, page("Projects", tokens, &body))?;
                    println!("Portfolio written to {:?}", path);
                }
                None => {
                    let cards: Vec<ProjectCard> = portfolio
                        .load()
                        .await
                        .iter()
                        .map(ProjectCard::from_repository)
                        .collect();

                    if cli.format == OutputFormat::Json {
                        println!("{}", serde_json::to_string_pretty(&cards)?);
                    } else if cards.is_empty() {
                        println!(
                            "No featured projects loaded. See {}",
                            config.github.profile_url()
                        );
                    } else {
                        print_cards(&cards);
                    }
                }
            }
        }

        Commands::Stats {
            mut values,
            file,
            window,
            normalize: with_normalized,
        } => {
            if let Some(path) = file {
                values.extend(read_values(&path)?);
            }

            let stats = calculate_stats(&values);
            let outliers = detect_outliers(&values);
            let smoothed = window.map(|w| moving_average(&values, w));
            let normalized = with_normalized.then(|| normalize(&values));

            if cli.format == OutputFormat::Json {
                let report = serde_json::json!({
                    "stats": stats,
                    "outliers": outliers,
                    "movingAverage": smoothed,
                    "normalized": normalized,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let Some(stats) = stats else {
                println!("No values");
                return Ok(());
            };

            println!("count     {}", stats.count);
            println!("sum       {}", format_value(stats.sum));
            println!("mean      {}", format_value(stats.mean));
            println!("median    {}", format_value(stats.median));
            println!("min       {}", format_value(stats.min));
            println!("max       {}", format_value(stats.max));
            println!("range     {}", format_value(stats.range));
            println!("variance  {}", format_value(stats.variance));
            println!("std dev   {}", format_value(stats.std_dev));
            println!("q1        {}", format_value(stats.q1));
            println!("q3        {}", format_value(stats.q3));

            if let Some(report) = outliers {
                println!(
                    "outliers  {} outside [{}, {}]",
                    report.outliers.len(),
                    format_value(report.lower_bound),
                    format_value(report.upper_bound)
                );
            }
            if let Some(smoothed) = smoothed {
                println!("moving    {}", join_values(&smoothed));
            }
            if let Some(normalized) = normalized {
                println!("normal    {}", join_values(&normalized));
            }
        }

        Commands::Regress { x, y } => {
            let fit = linear_regression(&x, &y)?;

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&fit)?);
            } else {
                println!(
                    "y = {} x + {}  (R² = {})",
                    format_value(fit.slope),
                    format_value(fit.intercept),
                    format_value(fit.r_squared)
                );
            }
        }

        Commands::Streamflow { site, days, window } => {
            let Some((start, end)) = lookback(Utc::now().date_naive(), days) else {
                return Err(format!("days must be between 1 and {}", MAX_DAYS).into());
            };

            let site = site.unwrap_or_else(|| config.usgs.default_site.clone());
            let client = ApiClient::from_config(&config)?;
            let body = client.usgs_streamflow(&site, start, end).await?;
            let readings = extract_readings(&body);
            let summary = summarize(&site, extract_site_name(&body), &readings, window);

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!(
                "{} {}",
                summary.site,
                summary.site_name.as_deref().unwrap_or("")
            );
            println!("readings  {} over {} days", summary.readings, days);
            match &summary.stats {
                Some(stats) => {
                    println!(
                        "discharge mean {} cfs, median {} cfs, range {} to {} cfs",
                        format_number(stats.mean),
                        format_number(stats.median),
                        format_number(stats.min),
                        format_number(stats.max)
                    );
                    println!("outliers  {}", summary.outlier_count);
                }
                None => println!("No discharge data"),
            }
            if let Some(trend) = &summary.trend {
                println!("trend     {} cfs per reading", format_value(trend.slope));
            }
        }

        Commands::Badges {
            readme,
            h_index,
            citations,
            publications,
            i10_index,
        } => {
            let metrics = ScholarMetrics {
                h_index,
                citations,
                publications,
                i10_index,
            };

            if metrics.is_empty() {
                eprintln!(
                    "No metrics given. Use --h-index, --citations, --publications or --i10-index"
                );
                std::process::exit(1);
            }

            if update_readme(&readme, &metrics)? {
                println!("{:?} updated", readme);
            } else {
                println!("No changes needed - badges are up to date");
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Numbers separated by commas or whitespace
fn read_values(path: &std::path::Path) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;

    content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|e| -> Box<dyn std::error::Error> {
                    format!("Invalid number '{}' in {:?}: {}", token, path, e).into()
                })
        })
        .collect()
}

fn print_cards(cards: &[ProjectCard]) {
    println!("{:<36} {:>6} {:>6}  {:<18} {}", "Project", "Stars", "Forks", "Language", "Updated");
    println!("{}", "-".repeat(84));

    for card in cards {
        println!(
            "{:<36} {:>6} {:>6}  {:<18} {}",
            card.title,
            card.stars,
            card.forks,
            card.language,
            card.updated.as_deref().unwrap_or("-")
        );
    }
}

fn format_value(value: f64) -> String {
    format!("{:.4}", value)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_value(*v))
        .collect::<Vec<_>>()
        .join(", ")
}
