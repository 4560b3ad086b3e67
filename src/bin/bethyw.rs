use anyhow::{Context, Result, bail};
use bethyw::datasets::{self, InputFileSource};
use bethyw::{Areas, Filters, InputFile, YearRange, report, stats, storage};
use clap::{ArgAction, Parser, ValueEnum};
use regex::Regex;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "bethyw",
    version,
    about = "Parse, merge, and summarize official Welsh Government statistics data files"
)]
struct Cli {
    /// Directory holding the input data files.
    #[arg(long, default_value = "datasets")]
    dir: PathBuf,
    /// Dataset codes separated by comma (e.g., popden,complete-pop), or 'all'.
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    datasets: Vec<String>,
    /// Authority codes separated by comma (e.g., W06000011), or 'all'.
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    areas: Vec<String>,
    /// Measure codes separated by comma (e.g., pop,dens), or 'all'.
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    measures: Vec<String>,
    /// Year (YYYY) or inclusive range (YYYY-ZZZZ); 0 for all years.
    #[arg(short, long, default_value = "0")]
    years: String,
    /// Print the output as JSON instead of tables.
    #[arg(short, long, default_value_t = false)]
    json: bool,
    /// Print per-measure statistics after the main output.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Also save the merged data to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output file format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

/// Compact number for the stats line: at most 4 decimals, no trailing zeros, `-` when absent.
fn compact(v: Option<f64>) -> String {
    let Some(x) = v.filter(|x| x.is_finite()) else {
        return "-".to_string();
    };
    let fixed = format!("{x:.4}");
    match fixed.trim_end_matches('0').strip_suffix('.') {
        Some(whole) => whole.to_string(),
        None => fixed.trim_end_matches('0').to_string(),
    }
}

impl OutFormat {
    /// Explicit `--format`, else the extension of `path`, else JSON.
    fn resolve(explicit: Option<Self>, path: &Path) -> Result<Self> {
        if let Some(fmt) = explicit {
            return Ok(fmt);
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("json") => Ok(OutFormat::Json),
            Some("csv") => Ok(OutFormat::Csv),
            Some(other) => {
                bail!("cannot infer output format from extension .{other}; pass --format")
            }
        }
    }
}

/// True when the list is empty or names `all` anywhere; other entries are then ignored.
fn means_all(list: &[String]) -> bool {
    list.is_empty() || list.iter().any(|s| s.trim().eq_ignore_ascii_case("all"))
}

fn cleaned(list: &[String]) -> impl Iterator<Item = &str> {
    list.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_datasets(list: &[String]) -> Result<Vec<&'static InputFileSource>> {
    if means_all(list) {
        return Ok(datasets::DATASETS.iter().collect());
    }
    cleaned(list)
        .map(|code| {
            datasets::find(code).ok_or_else(|| anyhow::anyhow!("no dataset matches key: {code}"))
        })
        .collect()
}

fn parse_areas(list: &[String]) -> Result<BTreeSet<String>> {
    if means_all(list) {
        return Ok(BTreeSet::new());
    }
    let re = Regex::new(r"^[A-Za-z][0-9]{8}$")?;
    cleaned(list)
        .map(|code| {
            if re.is_match(code) {
                Ok(code.to_string())
            } else {
                bail!("invalid input for area argument: {code}")
            }
        })
        .collect()
}

fn parse_measures(list: &[String]) -> BTreeSet<String> {
    if means_all(list) {
        return BTreeSet::new();
    }
    cleaned(list).map(str::to_lowercase).collect()
}

fn parse_years(s: &str) -> Result<Option<YearRange>> {
    let s = s.trim();
    if s.is_empty() || s == "0" || s == "0-0" {
        return Ok(None);
    }
    let re = Regex::new(r"^([0-9]{4})(?:-([0-9]{4}))?$")?;
    let caps = re
        .captures(s)
        .ok_or_else(|| anyhow::anyhow!("invalid input for years argument: {s}"))?;
    let start: i32 = caps[1].parse()?;
    let end: i32 = match caps.get(2) {
        Some(m) => m.as_str().parse()?,
        None => start,
    };
    if start > end {
        bail!("invalid input for years argument: {s} (start after end)");
    }
    Ok(Some(YearRange::new(start, end)))
}

fn import(areas: &mut Areas, dir: &Path, source: &InputFileSource, filters: &Filters) -> Result<usize> {
    let input = InputFile::in_dir(dir, source);
    let reader = input.open()?;
    let count = areas
        .populate(reader, source.parser, &source.cols(), filters)
        .with_context(|| format!("import {}", input.path().display()))?;
    Ok(count)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let to_import = parse_datasets(&cli.datasets)?;
    let filters = Filters::all()
        .with_areas(parse_areas(&cli.areas)?)
        .with_measures(parse_measures(&cli.measures))
        .with_years(parse_years(&cli.years)?);

    let mut areas = Areas::new();
    import(&mut areas, &cli.dir, &datasets::AREAS, &filters).context("loading areas")?;

    // A failed dataset is reported and skipped; what was merged before it stays.
    for source in to_import {
        if let Err(e) = import(&mut areas, &cli.dir, source, &filters) {
            log::error!("dataset {} failed: {e:#}", source.code);
            eprintln!("Error importing dataset {}: {e:#}", source.code);
        }
    }

    if cli.json {
        println!("{}", storage::to_json(&areas)?);
    } else {
        report::render_table(&areas, io::stdout().lock())?;
    }

    if cli.stats {
        for s in stats::grouped_summary(&areas) {
            println!(
                "{} • {}  count={}  min={} max={} mean={} diff={} pct={}",
                s.area_code,
                s.measure,
                s.count,
                compact(s.min),
                compact(s.max),
                compact(Some(s.mean)),
                compact(Some(s.difference)),
                compact(Some(s.percent_difference))
            );
        }
    }

    if let Some(path) = cli.out.as_deref() {
        match OutFormat::resolve(cli.format, path)? {
            OutFormat::Csv => storage::save_csv(&areas, path),
            OutFormat::Json => storage::save_json(&areas, path),
        }
        .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} areas to {}", areas.len(), path.display());
    }

    Ok(())
}
