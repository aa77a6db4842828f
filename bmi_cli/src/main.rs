use bmi_core::advice::{self, WeightAdjustment};
use bmi_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "BMI calculator with local history tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI from weight and height
    Calc {
        /// Weight in kilograms (20-300)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        weight: String,

        /// Height, whole feet (1-8)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        feet: String,

        /// Height, remaining inches (0-11)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        inches: String,

        /// Save the result to history
        #[arg(long)]
        save: bool,

        /// Show the result immediately
        #[arg(long)]
        no_delay: bool,
    },

    /// List saved calculations (default)
    History {
        /// Sort column (date, weight, bmi, category)
        #[arg(long)]
        sort: Option<String>,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },

    /// Summary statistics over saved calculations
    Stats,

    /// Delete one saved calculation by id
    Remove {
        id: String,
    },

    /// Delete all saved calculations
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Export saved calculations to CSV
    Export {
        path: PathBuf,
    },

    /// Show the WHO BMI classification table
    Table,
}

fn main() -> Result<()> {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Some(Commands::Calc {
            weight,
            feet,
            inches,
            save,
            no_delay,
        }) => cmd_calc(&data_dir, &weight, &feet, &inches, save, no_delay, &config),
        Some(Commands::History { sort, asc }) => cmd_history(&data_dir, sort, asc, &config),
        Some(Commands::Stats) => cmd_stats(&data_dir, &config),
        Some(Commands::Remove { id }) => cmd_remove(&data_dir, &id),
        Some(Commands::Clear { yes }) => cmd_clear(&data_dir, yes),
        Some(Commands::Export { path }) => cmd_export(&data_dir, &path),
        Some(Commands::Table) => {
            display_table();
            Ok(())
        }
        None => {
            // Default to "history" command
            cmd_history(&data_dir, None, false, &config)
        }
    }
}

fn cmd_calc(
    data_dir: &Path,
    weight: &str,
    feet: &str,
    inches: &str,
    save: bool,
    no_delay: bool,
    config: &Config,
) -> Result<()> {
    let measurement = match validate(weight, feet, inches) {
        Ok(m) => m,
        Err(errors) => {
            eprintln!("Invalid input:");
            for error in errors.iter() {
                eprintln!("  - {}: {}", error.field, error.message);
            }
            std::process::exit(1);
        }
    };

    let result = measurement.calculate()?;

    if !no_delay && config.calculator.result_delay_ms > 0 {
        println!("Calculating...");
        std::thread::sleep(Duration::from_millis(config.calculator.result_delay_ms));
    }

    display_result(&result, measurement.weight_kg(), config.display.decimals);

    if save {
        let mut store = HistoryStore::open(data_dir);
        let entries = store.add(NewEntry::from_measurement(&measurement)?);

        if store.last_write_persisted() {
            println!("\n✓ Saved to history ({} total)", entries.len());
            println!("  ID: {}", entries[0].id);
        } else {
            eprintln!("\n! Result kept for this run only: history could not be written");
        }
    }

    Ok(())
}

fn cmd_history(data_dir: &Path, sort: Option<String>, asc: bool, config: &Config) -> Result<()> {
    let store = HistoryStore::open(data_dir);
    let entries = store.load();

    if entries.is_empty() {
        println!("No saved calculations yet.");
        return Ok(());
    }

    let mut state = config.display.sort_state();
    if let Some(field) = sort {
        state.field = field.parse()?;
        state.direction = SortDirection::Descending;
    }
    if asc {
        state.direction = SortDirection::Ascending;
    }

    let decimals = config.display.decimals;
    println!(
        "{} calculation{} tracked\n",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );
    println!(
        "  {:<36}  {:<17}  {:>8}  {:>7}  {:>6}  {}",
        "ID", "DATE", "WEIGHT", "HEIGHT", "BMI", "CATEGORY"
    );
    for entry in state.apply(&entries) {
        println!(
            "  {:<36}  {:<17}  {:>8}  {:>7}  {:>6.*}  {}",
            entry.id,
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            format!("{:.*} kg", decimals, entry.weight),
            format!("{}'{}\"", entry.height_feet, entry.height_inches),
            decimals,
            entry.bmi,
            entry.category
        );
    }

    if let Some(stats) = HistoryStats::from_entries(&entries) {
        println!();
        display_stats(&stats, decimals);
    }

    Ok(())
}

fn cmd_stats(data_dir: &Path, config: &Config) -> Result<()> {
    let store = HistoryStore::open(data_dir);
    let entries = store.load();
    let decimals = config.display.decimals;
    match HistoryStats::from_entries(&entries) {
        Some(stats) => {
            display_stats(&stats, decimals);
            println!();
            println!("  Trend (oldest first):");
            for point in chart_series(&entries) {
                println!(
                    "    {}  {:>5.1}  {:>8}  {}",
                    point.timestamp.format("%Y-%m-%d %H:%M"),
                    point.bmi,
                    format!("{:.*} kg", decimals, point.weight),
                    point.category
                );
            }
        }
        None => println!("No saved calculations yet."),
    }
    Ok(())
}

fn cmd_remove(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = HistoryStore::open(data_dir);
    let before = store.load().len();
    let entries = store.remove(id);

    if entries.len() < before {
        println!("✓ Removed entry {}", id);
    } else {
        println!("No entry with id {}", id);
    }
    if !store.last_write_persisted() {
        eprintln!("! History could not be written");
    }
    Ok(())
}

fn cmd_clear(data_dir: &Path, yes: bool) -> Result<()> {
    let mut store = HistoryStore::open(data_dir);

    if !yes {
        let count = store.load().len();
        println!(
            "This will delete {} saved calculation{}. Run again with --yes to confirm.",
            count,
            if count == 1 { "" } else { "s" }
        );
        return Ok(());
    }

    store.clear_all();
    if store.last_write_persisted() {
        println!("✓ History cleared");
    } else {
        eprintln!("! History could not be written");
    }
    Ok(())
}

fn cmd_export(data_dir: &Path, path: &Path) -> Result<()> {
    let store = HistoryStore::open(data_dir);
    let entries = SortState::default().apply(&store.load());
    let count = export_csv(&entries, path)?;

    println!("✓ Exported {} entries", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn display_result(result: &BmiResult, weight_kg: f64, decimals: usize) {
    let simple = result.simple_category();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  YOUR RESULTS");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  BMI: {:.*}", decimals, result.bmi);
    println!("  Category: {}", result.category);
    println!("  Health risk: {}", result.category.severity().label());
    println!();
    println!("  {}", render_gauge(result.gauge_position()));
    println!();
    println!(
        "  Ideal weight for your height: {:.*} kg - {:.*} kg",
        decimals, result.ideal_weight_min, decimals, result.ideal_weight_max
    );
    match result.weight_adjustment(weight_kg) {
        WeightAdjustment::Gain(kg) => println!(
            "  → Gain approximately {:.*} kg to reach a healthy BMI",
            decimals, kg
        ),
        WeightAdjustment::Lose(kg) => println!(
            "  → Lose approximately {:.*} kg to reach a healthy BMI",
            decimals, kg
        ),
        WeightAdjustment::None => {}
    }

    let status = advice::status(simple);
    println!();
    println!("  {}", status.title);
    println!("  {}", status.summary);
    println!();
    for rec in advice::recommendations(simple) {
        println!("  • {}: {}", rec.title, rec.description);
    }
}

fn display_stats(stats: &HistoryStats, decimals: usize) {
    println!("  Entries: {}", stats.count);
    println!("  Average BMI: {:.*}", decimals, stats.average_bmi);
    println!("  Lowest BMI: {:.*}", decimals, stats.min_bmi);
    println!("  Highest BMI: {:.*}", decimals, stats.max_bmi);
    println!(
        "  Latest BMI: {:.*} ({})",
        decimals,
        stats.latest.bmi,
        stats.latest.timestamp.format("%Y-%m-%d")
    );
    println!("  Change since first: {:+.*}", decimals, stats.change);
}

fn display_table() {
    println!("  {:<18}  {:<12}  {}", "CATEGORY", "BMI RANGE", "HEALTH RISK");
    for row in classification_table() {
        println!("  {:<18}  {:<12}  {}", row.label, row.range, row.risk.label());
    }
}

/// One-line gauge from BMI 10 to 50 with a pointer
fn render_gauge(position: f64) -> String {
    const WIDTH: usize = 40;
    let index = ((position / 100.0) * (WIDTH - 1) as f64).round() as usize;
    let bar: String = (0..WIDTH)
        .map(|i| if i == index.min(WIDTH - 1) { '▲' } else { '─' })
        .collect();
    format!("10 [{}] 50", bar)
}
