use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tagmontage::{
    GenerateRequest, NoElaborator, OutputKind, RenderOptions, TagId, TaggedSource,
    generate_to_file, resolve_directive,
};

#[derive(Parser, Debug)]
#[command(name = "tagmontage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the directive a prompt compiles to, as JSON.
    Directive(DirectiveArgs),
    /// Compose a still PNG.
    Compose(RenderArgs),
    /// Render an animated GIF.
    Animate(RenderArgs),
}

#[derive(Parser, Debug)]
struct PromptArgs {
    /// Free-text prompt; images are referenced as `@tag`.
    #[arg(long)]
    prompt: String,

    /// Tagged image, `NAME=PATH`. Repeatable; order is significant.
    #[arg(long = "tag", value_parser = parse_tag, required = true)]
    tags: Vec<(String, PathBuf)>,

    /// Render options JSON.
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DirectiveArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    /// Compile with the animated-output rules.
    #[arg(long)]
    animated: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    prompt: PromptArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Frame count for motion animations.
    #[arg(long)]
    frames: Option<u32>,

    /// Per-frame delay in milliseconds.
    #[arg(long)]
    duration_ms: Option<u32>,

    /// Render frames on a rayon pool.
    #[arg(long)]
    parallel: bool,
}

fn parse_tag(raw: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got '{raw}'"))?;
    let name = name.trim().trim_start_matches('@');
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got '{raw}'"));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Directive(args) => cmd_directive(args),
        Command::Compose(args) => cmd_render(args, OutputKind::Still),
        Command::Animate(args) => cmd_render(args, OutputKind::Animated),
    }
}

fn load_options(args: &PromptArgs) -> anyhow::Result<RenderOptions> {
    match &args.options {
        Some(path) => RenderOptions::from_json_file(path)
            .with_context(|| format!("load options '{}'", path.display())),
        None => Ok(RenderOptions::default()),
    }
}

fn cmd_directive(args: DirectiveArgs) -> anyhow::Result<()> {
    let options = load_options(&args.prompt)?;
    let tags: Vec<TagId> = args
        .prompt
        .tags
        .iter()
        .map(|(name, _)| TagId::new(name.as_str()))
        .collect();
    let output = if args.animated {
        OutputKind::Animated
    } else {
        OutputKind::Still
    };

    let directive = resolve_directive(&args.prompt.prompt, &tags, output, &options);
    println!("{}", serde_json::to_string_pretty(&directive)?);
    Ok(())
}

fn cmd_render(args: RenderArgs, output: OutputKind) -> anyhow::Result<()> {
    let mut options = load_options(&args.prompt)?;
    if let Some(frames) = args.frames {
        options.frame_count = frames;
    }
    if let Some(ms) = args.duration_ms {
        options.frame_duration_ms = ms;
    }
    if args.parallel {
        options.threading.parallel = true;
    }

    let request = GenerateRequest {
        prompt: args.prompt.prompt,
        images: args
            .prompt
            .tags
            .into_iter()
            .map(|(name, path)| TaggedSource::from_path(name, path))
            .collect(),
        output,
    };

    let generated = generate_to_file(&request, &options, &NoElaborator, &args.out)
        .with_context(|| format!("generate '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} frame(s))",
        args.out.display(),
        generated.width,
        generated.height,
        generated.frame_count
    );
    Ok(())
}
