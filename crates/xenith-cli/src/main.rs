use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xenith_analytics::{
    bucketize_timestamps, legend_order, price_segments, total_revenue, Aggregator,
    CompetitorMatrixBuilder, ComplaintThresholds, RankMetric, TrendGenerator, MAX_TREND_MONTHS,
};
use xenith_core::{AnalysisPipeline, TrendSource, XenithConfig};
use xenith_review::{ProductType, ReviewCorpus, ReviewDataset};

mod output;

fn cli() -> Command {
    Command::new("xenith")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Review aggregation and ranking for the Xenith dashboard")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (.toml, .yaml, .yml or .json)"),
        )
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .short('d')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Review dataset (.json, .yaml or .yml); defaults to the built-in dataset"),
        )
        .arg(
            Arg::new("product-type")
                .long("product-type")
                .short('p')
                .global(true)
                .value_parser(parse_product_type)
                .help("Product line: dimmer or light"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .subcommand(
            Command::new("rank")
                .about("Rank categories by pain points")
                .arg(top_arg())
                .arg(
                    Arg::new("metric")
                        .long("metric")
                        .default_value("negative")
                        .value_parser(["negative", "mentions", "satisfaction"])
                        .help("Ranking metric"),
                ),
        )
        .subcommand(
            Command::new("use-cases")
                .about("Rank use cases by mentions with complaint levels")
                .arg(top_arg()),
        )
        .subcommand(
            Command::new("matrix")
                .about("Build the competitor matrix")
                .arg(
                    Arg::new("products")
                        .long("products")
                        .value_delimiter(',')
                        .help("Comma-separated target products; defaults to the configured list"),
                ),
        )
        .subcommand(
            Command::new("trend")
                .about("Monthly negative-mention trend of the top categories")
                .arg(top_arg())
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(
                            RangedU64ValueParser::<usize>::new().range(0..=MAX_TREND_MONTHS as u64),
                        )
                        .help("Months in the series"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed for the synthetic walk"),
                )
                .arg(
                    Arg::new("from-timestamps")
                        .long("from-timestamps")
                        .action(ArgAction::SetTrue)
                        .help("Count real review timestamps instead of the synthetic walk"),
                ),
        )
        .subcommand(Command::new("segments").about("Revenue by price segment"))
        .subcommand(Command::new("report").about("Run the full analysis pipeline"))
}

fn top_arg() -> Arg {
    Arg::new("top")
        .long("top")
        .short('n')
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i64))
        .help("Number of entries to keep; zero or negative keeps none")
}

fn parse_product_type(value: &str) -> Result<ProductType, String> {
    value.parse()
}

/// Negative counts are clamped to zero
fn top_n(args: &ArgMatches, default: usize) -> usize {
    args.get_one::<i64>("top")
        .map_or(default, |&n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<XenithConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => XenithConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => XenithConfig::default(),
    };
    if let Some(path) = matches.get_one::<PathBuf>("dataset") {
        config = config.with_dataset(path);
    }
    if let Some(product_type) = matches.get_one::<ProductType>("product-type") {
        config = config.with_product_type(*product_type);
    }
    Ok(config)
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn corpus(dataset: &ReviewDataset, product_type: ProductType) -> Result<&ReviewCorpus> {
    dataset
        .corpus(product_type)
        .with_context(|| format!("dataset has no '{product_type}' reviews"))
}

fn main() -> Result<()> {
    init_tracing();

    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    let json = matches.get_flag("json");

    let loaded;
    let dataset: &ReviewDataset = match &config.dataset {
        Some(path) => {
            loaded = ReviewDataset::from_path(path)
                .with_context(|| format!("loading dataset {}", path.display()))?;
            &loaded
        }
        None => ReviewDataset::builtin().context("loading built-in dataset")?,
    };
    let product_type = config.product_type;
    let aggregator = Aggregator::new().with_taxonomy(dataset.taxonomy());

    match matches.subcommand() {
        Some(("rank", args)) => {
            let metric = match args.get_one::<String>("metric").map(String::as_str) {
                Some("mentions") => RankMetric::TotalMentions,
                Some("satisfaction") => RankMetric::SatisfactionRate,
                _ => RankMetric::NegativeCount,
            };
            let n = top_n(args, config.ranking.top_n);
            let ranked = aggregator.top_categories(&corpus(dataset, product_type)?.categories, metric, n);
            emit(json, &ranked, || output::categories(&ranked))?;
        }
        Some(("use-cases", args)) => {
            let n = top_n(args, config.ranking.use_case_top_n);
            let ranked = aggregator.top_use_cases(
                &corpus(dataset, product_type)?.use_cases,
                RankMetric::TotalMentions,
                n,
            );
            let thresholds =
                ComplaintThresholds::from_rates(ranked.iter().map(|u| u.satisfaction_rate));
            emit(json, &ranked, || output::use_cases(&ranked, &thresholds))?;
        }
        Some(("matrix", args)) => {
            let products: Vec<String> = match args.get_many::<String>("products") {
                Some(values) => values.map(|p| p.trim().to_string()).collect(),
                None => config.competitors.target_products.clone(),
            };
            let cells = CompetitorMatrixBuilder::new(&config.competitors.product_ids)
                .with_taxonomy(dataset.taxonomy())
                .build(&products, &corpus(dataset, product_type)?.categories);
            emit(json, &cells, || output::matrix(&cells))?;
        }
        Some(("trend", args)) => {
            let mut trend = config.trend;
            if let Some(&months) = args.get_one::<usize>("months") {
                trend.months = months;
            }
            if let Some(&seed) = args.get_one::<u64>("seed") {
                trend.walk = trend.walk.with_seed(seed);
            }
            if args.get_flag("from-timestamps") {
                trend.source = TrendSource::Timestamps;
            }

            let store = &corpus(dataset, product_type)?.categories;
            let ranked = aggregator.top_categories(
                store,
                RankMetric::NegativeCount,
                top_n(args, config.ranking.top_n),
            );
            let points = match trend.source {
                TrendSource::Synthetic => TrendGenerator::new(trend.walk).generate(&ranked, trend.months),
                TrendSource::Timestamps => {
                    bucketize_timestamps(&ranked, store, trend.months, trend.walk.anchor)
                }
            };
            let legend = legend_order(&points);
            emit(json, &points, || output::trend(&points, &legend))?;
        }
        Some(("segments", _)) => {
            let segments = price_segments(dataset.products());
            let total = total_revenue(dataset.products());
            emit(json, &segments, || output::segments(&segments, total))?;
        }
        Some(("report", _)) => {
            let report = AnalysisPipeline::new(config)
                .run(dataset, product_type)
                .context("running analysis")?;
            emit(json, &report, || output::report(&report))?;
        }
        _ => {}
    }

    Ok(())
}
