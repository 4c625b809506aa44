use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tagdraw", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a drawing script and write the result as a PNG.
    Draw(DrawArgs),
    /// List the operation vocabulary with arities.
    Ops,
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Surface to draw on. Without it the script starts uninitialized unless a size is given.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    image: Option<PathBuf>,

    /// Width of a blank surface.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Height of a blank surface.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Pixel format of a blank surface.
    #[arg(long, value_enum, default_value_t = FormatChoice::Argb32)]
    format: FormatChoice,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write the final tags as JSON.
    #[arg(long)]
    tags_out: Option<PathBuf>,

    /// Operation name matching. Defaults to `TAGDRAW_OP_MATCH` or exact.
    #[arg(long = "match", value_enum)]
    match_mode: Option<MatchChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Argb32,
    Rgb24,
    #[value(name = "rgb16_565")]
    Rgb565,
    Rgb30,
}

impl From<FormatChoice> for tagdraw::PixelFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Argb32 => Self::Argb32,
            FormatChoice::Rgb24 => Self::Rgb24,
            FormatChoice::Rgb565 => Self::Rgb565,
            FormatChoice::Rgb30 => Self::Rgb30,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MatchChoice {
    Exact,
    Prefix,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
        Command::Ops => cmd_ops(),
    }
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let script = tagdraw::Script::load(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;

    let image = match (&args.image, args.width, args.height) {
        (Some(path), _, _) => Some(
            tagdraw::codec::read_png(path)
                .with_context(|| format!("read image '{}'", path.display()))?,
        ),
        (None, Some(w), Some(h)) => Some(
            tagdraw::ImageDescriptor::blank(w, h, args.format.into())
                .with_context(|| format!("blank {w}x{h} surface"))?,
        ),
        _ => None,
    };

    let mut settings = tagdraw::EngineSettings::from_env();
    if let Some(choice) = args.match_mode {
        settings = settings.with_match_mode(match choice {
            MatchChoice::Exact => tagdraw::MatchMode::Exact,
            MatchChoice::Prefix => tagdraw::MatchMode::UniquePrefix,
        });
    }
    let engine = tagdraw::CpuEngine::new(settings, tagdraw::CpuBackendOpts::from_env());

    let output = engine
        .draw(script.request(image.as_ref()))
        .with_context(|| format!("run script '{}'", args.script.display()))?;

    let drawn = output
        .image
        .as_ref()
        .context("script never created a surface; pass --image or --width/--height")?;
    tagdraw::codec::write_png(drawn, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(path) = &args.tags_out {
        let json = tagdraw::script::tags_to_json(&output.tags)?;
        std::fs::write(path, json)
            .with_context(|| format!("write tags '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_ops() -> anyhow::Result<()> {
    for (name, kind) in tagdraw::ops::VOCABULARY {
        println!("{name}\t{}", kind.arity());
    }
    Ok(())
}
