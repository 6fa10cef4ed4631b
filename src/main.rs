//! custseg CLI
//!
//! Generates synthetic customers, counts the named segments, compares k-means
//! runs over a range of k on (age, income), then clusters the high-value
//! cohort on all four columns.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use custseg::dataset::head;
use custseg::filter::high_value_filter;
use custseg::report::summarize;
use custseg::{
    AGE, COLUMN_NAMES, ClusterError, Dataset, INCOME, KMeans, PeopleConfig, SegmentThresholds,
    cluster_filtered, select_columns,
};

/// K-means clustering of synthetic people data
#[derive(Parser, Debug)]
#[command(name = "custseg")]
#[command(version = "0.1.0")]
#[command(about = "K-means clustering and segment summaries for synthetic people data")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of people to generate
    #[arg(long, default_value_t = 100_000)]
    num_samples: usize,

    /// Seed for the synthetic data generator
    #[arg(long, default_value_t = 0)]
    data_seed: u64,

    /// Number of clusters for the high-value cohort
    #[arg(short = 'k', long = "clusters", default_value_t = 3)]
    clusters: usize,

    /// Maximum k-means iterations
    #[arg(long, default_value_t = 100)]
    max_iters: usize,

    /// Seed for the initial center sample
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Smallest k of the age/income comparison
    #[arg(long, default_value_t = 2)]
    compare_min: usize,

    /// Largest k of the age/income comparison
    #[arg(long, default_value_t = 5)]
    compare_max: usize,

    /// Young Professionals: minimum age
    #[arg(long, default_value_t = 25.0)]
    young_age_min: f64,

    /// Young Professionals: maximum age
    #[arg(long, default_value_t = 35.0)]
    young_age_max: f64,

    /// Young Professionals: minimum income
    #[arg(long, default_value_t = 90_000.0)]
    young_income_min: f64,

    /// Young Professionals: minimum purchase frequency
    #[arg(long, default_value_t = 50.0)]
    young_freq_min: f64,

    /// Budget Conscious: maximum income
    #[arg(long, default_value_t = 40_000.0)]
    budget_income_max: f64,

    /// Budget Conscious: minimum purchase frequency
    #[arg(long, default_value_t = 30.0)]
    budget_freq_min: f64,

    /// Loyal Customers: minimum purchase frequency
    #[arg(long, default_value_t = 80.0)]
    loyal_freq_min: f64,

    /// Loyal Customers: minimum purchase history
    #[arg(long, default_value_t = 20_000.0)]
    loyal_purchase_min: f64,

    /// High-value cohort: minimum age
    #[arg(long, default_value_t = 25.0)]
    age_min: f64,

    /// High-value cohort: maximum age
    #[arg(long, default_value_t = 35.0)]
    age_max: f64,

    /// High-value cohort: minimum income
    #[arg(long, default_value_t = 100_000.0)]
    income_min: f64,

    /// High-value cohort: minimum purchase frequency
    #[arg(long, default_value_t = 80.0)]
    freq_min: f64,
}

impl Cli {
    fn segment_thresholds(&self) -> SegmentThresholds {
        SegmentThresholds {
            young_age_min: self.young_age_min,
            young_age_max: self.young_age_max,
            young_income_min: self.young_income_min,
            young_freq_min: self.young_freq_min,
            budget_income_max: self.budget_income_max,
            budget_freq_min: self.budget_freq_min,
            loyal_freq_min: self.loyal_freq_min,
            loyal_purchase_min: self.loyal_purchase_min,
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = PeopleConfig::default()
        .num_samples(cli.num_samples)
        .seed(cli.data_seed);
    let dataset = Dataset::generate(&config).context("failed to generate people data")?;

    println!("Random people data (first few rows):");
    println!("{}", dataset.head(5));
    println!("\nColumns: {}", COLUMN_NAMES.join(", "));

    println!("\n=== Customer Segments ===");
    for segment in cli.segment_thresholds().segments() {
        let count = segment.filter.count(&dataset.features)?;
        println!("  {}: {} people", segment.name, count);
    }

    println!("\n=== K-Means Comparison (Age vs Income) ===");
    let age_income = select_columns(&dataset.features, &[AGE, INCOME])?;
    for k in cli.compare_min..=cli.compare_max {
        let mut model = KMeans::new(k).max_iter(cli.max_iters).random_state(cli.seed);
        model
            .fit(&age_income)
            .with_context(|| format!("k-means comparison failed for k={}", k))?;

        let (Some(labels), Some(centers)) = (&model.labels, &model.cluster_centers) else {
            continue;
        };
        println!(
            "KMeans with {} Clusters: inertia {:.4}, {} iterations{}",
            k,
            model.inertia.unwrap_or_default(),
            model.n_iter.unwrap_or_default(),
            if model.converged == Some(true) { "" } else { " (not converged)" }
        );
        print!("{}", summarize(&age_income, labels, centers)?);
    }

    let filter = high_value_filter((cli.age_min, cli.age_max), cli.income_min, cli.freq_min);
    let criteria = format!(
        "age {}-{}, high income >= {}, frequency >= {}",
        cli.age_min, cli.age_max, cli.income_min, cli.freq_min
    );
    match cluster_filtered(&dataset.features, &filter, cli.clusters, cli.max_iters, cli.seed) {
        Ok((filtered, labels, centers)) => {
            println!("\nFiltered people ({}): {} found", criteria, filtered.nrows());
            println!("{}", head(&filtered, 5));
            println!("\n=== High-Value Clusters (k={}) ===", cli.clusters);
            print!("{}", summarize(&filtered, &labels, &centers)?);
        }
        Err(ClusterError::EmptyInput) => {
            println!("\nFiltered people ({}): 0 found", criteria);
            println!("No people found with the specified criteria.");
        }
        Err(e) => return Err(e).context("failed to cluster the high-value cohort"),
    }

    Ok(())
}
