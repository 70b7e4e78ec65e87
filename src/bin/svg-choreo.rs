use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use svg_choreo::{
    Document, Element, Fetch, FetchSettings, FileFetcher, HttpFetcher, Script, Segment, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "svg-choreo", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a choreography script and print the scheduled timeline as JSON.
    Script(ScriptArgs),
    /// Load an SVG into a container and print the resulting markup.
    Load(LoadArgs),
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the timeline here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LoadArgs {
    /// `http(s)://` or `file://` URL, or a local path.
    #[arg(long)]
    url: String,

    /// Id of the container the markup is loaded into.
    #[arg(long, default_value = "stage")]
    target: String,

    #[arg(long, default_value_t = 0.0)]
    x: f64,

    #[arg(long, default_value_t = 0.0)]
    y: f64,

    /// Request timeout in seconds (HTTP only).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(serde::Serialize)]
struct ScheduledOut<'a> {
    start: f64,
    end: f64,
    #[serde(flatten)]
    segment: &'a Segment,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Script(args) => cmd_script(args),
        Command::Load(args) => cmd_load(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open script '{}'", path.display()))?;
    Script::from_json(&s).context("parse script JSON")
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let script = read_script(&args.in_path)?;
    let mut tl = Timeline::new();
    script.apply(&mut tl);

    let scheduled: Vec<ScheduledOut<'_>> = tl
        .schedule()
        .into_iter()
        .map(|s| ScheduledOut {
            start: s.start,
            end: s.end,
            segment: &tl.segments()[s.index],
        })
        .collect();
    let json = serde_json::to_string_pretty(&scheduled)?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write timeline '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_load(args: LoadArgs) -> anyhow::Result<()> {
    let is_http = args.url.starts_with("http://") || args.url.starts_with("https://");
    let fetcher: Box<dyn Fetch> = if is_http {
        let settings = FetchSettings {
            timeout: args.timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        };
        Box::new(HttpFetcher::new(&settings)?)
    } else {
        Box::new(FileFetcher)
    };

    let mut doc = Document::new();
    let mut container = Element::new("div");
    container.attrs.insert("id".to_string(), args.target.clone());
    let container = doc.create_element(container);
    doc.append_child(doc.root(), container)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")?;
    let loaded = runtime.block_on(svg_choreo::load_svg(
        fetcher.as_ref(),
        &mut doc,
        &args.url,
        &args.target,
        args.x,
        args.y,
    ))?;

    match loaded.size {
        Some(size) => eprintln!("loaded {} ({}x{})", args.url, size.width, size.height),
        None => eprintln!("loaded {} (no intrinsic size)", args.url),
    }
    println!("{}", doc.outer_markup(container));
    Ok(())
}
