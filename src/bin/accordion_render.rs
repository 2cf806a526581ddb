//! Renders the membership accordion from a store snapshot.
//!
//! The snapshot stands in for the live platform: it is validated against the
//! bundled schema, indexed, and fed through the same render path the
//! shortcode uses. Output goes to stdout; diagnostics go to stderr through
//! `tracing` (filter with `ACCORDION_LOG`, default `warn`).

use anyhow::{Context, Result, bail};
use memberships_accordion::{
    AccordionConfig, ShortcodeRegistry, StoreIndex, build_view, dependency_notice,
    register_accordion, render_view,
};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SNAPSHOT_ENV: &str = "ACCORDION_SNAPSHOT";
const LOG_ENV: &str = "ACCORDION_LOG";

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("accordion-render: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let index = StoreIndex::load_with_schema(&cli.snapshot, cli.schema.as_deref())?;

    let output = match cli.mode {
        Mode::AdminNotice => dependency_notice(&index)
            .map(|notice| notice.render())
            .unwrap_or_default(),
        Mode::Page(ref page) => {
            let content = fs::read_to_string(page)
                .with_context(|| format!("reading page {}", page.display()))?;
            let mut registry = ShortcodeRegistry::new();
            register_accordion(&mut registry, &index, cli.config.clone());
            registry.expand(&content)
        }
        Mode::Fragment => match cli.format {
            Format::Html => render_view(&build_view(&index), &cli.config),
            Format::Json => {
                let mut json = serde_json::to_string_pretty(&build_view(&index))?;
                json.push('\n');
                json
            }
        },
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("writing output")?;
    stdout.flush().context("flushing output")?;
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Format {
    Html,
    Json,
}

enum Mode {
    Fragment,
    Page(PathBuf),
    AdminNotice,
}

struct Cli {
    snapshot: PathBuf,
    schema: Option<PathBuf>,
    mode: Mode,
    format: Format,
    config: AccordionConfig,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut snapshot: Option<PathBuf> = None;
        let mut schema: Option<PathBuf> = None;
        let mut mode = Mode::Fragment;
        let mut format = Format::Html;
        let mut config = AccordionConfig::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--snapshot" => snapshot = Some(PathBuf::from(next_value(&mut args, &arg)?)),
                "--schema" => schema = Some(PathBuf::from(next_value(&mut args, &arg)?)),
                "--page" => mode = Mode::Page(PathBuf::from(next_value(&mut args, &arg)?)),
                "--admin-notice" => mode = Mode::AdminNotice,
                "--format" => {
                    format = match next_value(&mut args, &arg)?.as_str() {
                        "html" => Format::Html,
                        "json" => Format::Json,
                        other => bail!("unsupported --format '{other}' (expected html or json)"),
                    }
                }
                "--book-label" => config.book_label = next_value(&mut args, &arg)?,
                "--sold-out-label" => config.sold_out_label = next_value(&mut args, &arg)?,
                "--no-assets" => config.include_assets = false,
                "--help" | "-h" => usage(0),
                other => {
                    eprintln!("accordion-render: unknown argument '{other}'");
                    usage(1)
                }
            }
        }

        if format == Format::Json && !matches!(mode, Mode::Fragment) {
            bail!("--format json cannot be combined with --page or --admin-notice");
        }

        let snapshot = match snapshot {
            Some(path) => path,
            None => match env::var(SNAPSHOT_ENV) {
                Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
                _ => bail!("no snapshot given; pass --snapshot PATH or set {SNAPSHOT_ENV}"),
            },
        };

        Ok(Self {
            snapshot,
            schema,
            mode,
            format,
            config,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    match args.next() {
        Some(value) => Ok(value),
        None => bail!("{flag} requires a value"),
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: accordion-render [--snapshot PATH] [--schema PATH] [--format html|json]\n                        [--page PATH | --admin-notice]\n                        [--book-label TEXT] [--sold-out-label TEXT] [--no-assets]\n\nOptions:\n  --snapshot PATH       Store snapshot JSON (default: ${SNAPSHOT_ENV}).\n  --schema PATH         Validate the snapshot against this schema instead of the bundled one.\n  --format html|json    Emit the HTML fragment (default) or the decided view as JSON.\n  --page PATH           Expand [display_memberships_by_category] inside a page file.\n  --admin-notice        Print the admin dependency notice, if one applies.\n  --book-label TEXT     Call-to-action label (default: Book Now).\n  --sold-out-label TEXT Sold-out label (default: SOLD OUT).\n  --no-assets           Omit the inline <style> and <script> blocks.\n\nLogging: set {LOG_ENV} (e.g. {LOG_ENV}=debug) to trace skipped items and sold-out reasons."
    );
    std::process::exit(code);
}
