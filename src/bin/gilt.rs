use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gilt", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render every frame as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Print the stage timeline of the scripted run as JSON.
    Timeline(CommonArgs),
    /// Render one card icon as a PNG.
    Icon(IconArgs),
    /// Print the card list as JSON.
    Cards(CommonArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Reveal config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Particle seed (overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Run length in milliseconds (overrides the config).
    #[arg(long)]
    duration_ms: Option<u64>,
}

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("at").required(true).args(["frame", "at_ms"]))]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: Option<u64>,

    /// Timestamp in milliseconds.
    #[arg(long)]
    at_ms: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the scene SVG next to the PNG.
    #[arg(long)]
    dump_svg: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct IconArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// chess, basketball, dragon, starve, running, career or cake.
    #[arg(long)]
    kind: String,

    /// Edge length in pixels.
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Icon(args) => cmd_icon(args),
        Command::Cards(args) => cmd_cards(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(common: &CommonArgs) -> anyhow::Result<(gilt::RevealConfig, gilt::ContentSet)> {
    let mut config = match &common.config {
        Some(path) => gilt::RevealConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => gilt::RevealConfig::default(),
    };
    if let Some(seed) = common.seed {
        config.seed = Some(seed);
    }
    if let Some(ms) = common.duration_ms {
        config.duration_ms = ms;
    }
    config.validate()?;
    let content = config.load_content().context("load content")?;
    Ok((config, content))
}

fn session(common: &CommonArgs) -> anyhow::Result<gilt::RevealSession> {
    let (config, content) = load(common)?;
    Ok(gilt::RevealSession::new(config, content)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = session(&args.common)?;
    let at_ms = match (args.at_ms, args.frame) {
        (Some(ms), _) => ms,
        (None, Some(frame)) => {
            if frame >= session.config().frame_count() {
                anyhow::bail!(
                    "frame {frame} is out of range (0..{})",
                    session.config().frame_count()
                );
            }
            session.config().fps.frame_to_millis(gilt::FrameIndex(frame))
        }
        (None, None) => anyhow::bail!("either --frame or --at-ms is required"),
    };

    if args.dump_svg {
        let svg_path = args.out.with_extension("svg");
        if let Some(parent) = svg_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&svg_path, session.scene_svg_at(at_ms)?)
            .with_context(|| format!("write svg '{}'", svg_path.display()))?;
        eprintln!("wrote {}", svg_path.display());
    }

    let frame = session.render_at(at_ms)?;
    gilt::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = session(&args.common)?;
    let mut opts = gilt::FfmpegSinkOpts::new(&args.out);
    opts.background = session.config().background_color(session.content());
    let mut sink = gilt::FfmpegSink::new(opts);

    session.render_range(session.full_range()?, &mut sink)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let session = session(&args.common)?;
    let mut sink = gilt::PngSequenceSink::new(&args.out_dir);

    session.render_range(session.full_range()?, &mut sink)?;
    eprintln!(
        "wrote {} frames to {}",
        sink.written(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_timeline(args: CommonArgs) -> anyhow::Result<()> {
    let session = session(&args)?;
    let timeline = session.timeline()?;
    let doc = serde_json::json!({
        "seed": session.seed(),
        "duration_ms": session.config().duration_ms,
        "transitions": timeline,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn cmd_icon(args: IconArgs) -> anyhow::Result<()> {
    let (_, content) = load(&args.common)?;
    let icon = gilt::IconType::parse(&args.kind)
        .with_context(|| format!("unknown icon kind '{}'", args.kind))?;
    let accent = content
        .cards
        .iter()
        .find(|c| c.icon == icon)
        .map_or(content.theme.gilt, |c| c.accent);

    let svg = gilt::standalone_icon_svg(icon, accent, &content.theme, args.size);
    let canvas = gilt::Canvas::new(args.size, args.size)?;
    let frame = gilt::SvgRasterizer::without_fonts().rasterize(&svg, canvas, None)?;
    gilt::write_png(&args.out, &frame)
        .with_context(|| format!("write icon '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_cards(args: CommonArgs) -> anyhow::Result<()> {
    let (_, content) = load(&args)?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}
