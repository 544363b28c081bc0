use std::{
    io::{IsTerminal, stderr},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "qrcle", version, about = "Styled QR code cards from the command line")]
struct Cli {
    /// JSON settings file.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Directory downloads are written to (overrides the settings file).
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate content and print the Customize URL.
    Collect(CollectArgs),
    /// Apply presentation choices to a Customize URL and print the Export URL.
    Customize(CustomizeArgs),
    /// Capture the card described by an Export URL as a PNG.
    Export(ExportArgs),
    /// Print the information summary for a URL.
    Info(InfoArgs),
    /// List themes and their palettes.
    Themes(ThemesArgs),
}

#[derive(Parser, Debug)]
struct CollectArgs {
    #[arg(long, default_value = "")]
    location: String,

    #[arg(long, default_value = qrcle::DEFAULT_THEME)]
    theme: String,

    #[arg(long, default_value = "")]
    text: String,
}

#[derive(Parser, Debug)]
struct CustomizeArgs {
    /// Customize URL, e.g. `/preview?location=...&theme=...&text=...`.
    #[arg(long)]
    url: String,

    #[arg(long)]
    palette: Option<usize>,

    #[arg(long)]
    theme: Option<String>,

    /// top, bottom, left or right.
    #[arg(long)]
    text_position: Option<String>,

    /// Index into xs, sm, base, lg, xl, 2xl.
    #[arg(long)]
    font_size: Option<usize>,

    /// Catalog name, e.g. `Heart`; `None` removes the overlay.
    #[arg(long)]
    icon: Option<String>,

    /// bottom-right, bottom-left, top-right, top-left or center.
    #[arg(long)]
    icon_position: Option<String>,

    /// Also write the composed preview here.
    #[arg(long)]
    preview_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Export URL (`/share?...`).
    #[arg(long)]
    url: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Switch palette before capturing.
    #[arg(long)]
    palette: Option<usize>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    #[arg(long)]
    url: String,

    /// Print JSON instead of aligned text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ThemesArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger();

    let mut settings = match &cli.settings {
        Some(path) => qrcle::Settings::from_path(path)?,
        None => qrcle::Settings::default(),
    };
    if let Some(dir) = cli.download_dir {
        settings.download_dir = dir;
    }

    match cli.cmd {
        Command::Collect(args) => cmd_collect(settings, args),
        Command::Customize(args) => cmd_customize(settings, args),
        Command::Export(args) => cmd_export(settings, args),
        Command::Info(args) => cmd_info(&args),
        Command::Themes(args) => cmd_themes(&args),
    }
}

fn init_logger() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let console_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .with_level(true)
        .without_time()
        .compact()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn make_wizard(settings: qrcle::Settings) -> anyhow::Result<qrcle::Wizard> {
    let rasterizer = qrcle::SvgRasterizer::new(settings.export_scale, settings.fonts_dir.as_deref())
        .context("initialize rasterizer")?;
    let platform = qrcle::HeadlessPlatform::new(settings.download_dir.clone());
    Ok(qrcle::Wizard::new(
        settings,
        Box::new(qrcle::QrcodeEncoder),
        Box::new(rasterizer),
        Box::new(platform),
    ))
}

fn cmd_collect(settings: qrcle::Settings, args: CollectArgs) -> anyhow::Result<()> {
    let mut wizard = make_wizard(settings)?;
    let form = wizard.collect_mut()?;
    form.location = args.location;
    form.theme = args.theme;
    form.text = args.text;

    if let Err(err) = wizard.submit_collect() {
        for field in wizard.collect_mut()?.errors() {
            eprintln!("{}: {}", field.field, field.message);
        }
        return Err(err.into());
    }
    println!("{}", wizard.current_url());
    Ok(())
}

fn cmd_customize(settings: qrcle::Settings, args: CustomizeArgs) -> anyhow::Result<()> {
    let mut wizard = make_wizard(settings)?;
    wizard.open(&args.url)?;
    if wizard.step() != qrcle::Step::Customize {
        anyhow::bail!("'{}' is not a Customize URL", args.url);
    }

    for adjustment in adjustments(&args)? {
        wizard.adjust(adjustment)?;
    }
    wizard.run_pending();

    let step = wizard.customize()?;
    if let Some(err) = step.state().error() {
        anyhow::bail!("preview failed: {}", err.message);
    }
    if let (Some(out), Some(preview)) = (&args.preview_out, step.state().ready()) {
        let rasterizer = qrcle::SvgRasterizer::new(1.0, wizard.settings().fonts_dir.as_deref())?;
        let png = qrcle::Rasterizer::rasterize(&rasterizer, &preview.composition, &preview.bitmap)?;
        write_png(out, &png)?;
    }

    wizard.continue_to_export()?;
    println!("{}", wizard.current_url());
    Ok(())
}

fn adjustments(args: &CustomizeArgs) -> anyhow::Result<Vec<qrcle::Adjustment>> {
    let mut out = Vec::new();
    // Theme first: it re-clamps the palette index.
    if let Some(theme) = &args.theme {
        out.push(qrcle::Adjustment::Theme(theme.clone()));
    }
    if let Some(i) = args.palette {
        out.push(qrcle::Adjustment::Palette(i));
    }
    if let Some(p) = &args.text_position {
        let p = qrcle::TextPosition::parse(p)
            .with_context(|| format!("unknown text position '{p}'"))?;
        out.push(qrcle::Adjustment::TextPosition(p));
    }
    if let Some(i) = args.font_size {
        out.push(qrcle::Adjustment::FontSize(i));
    }
    if let Some(name) = &args.icon {
        let icon = qrcle::Icon::from_name(name).with_context(|| format!("unknown icon '{name}'"))?;
        out.push(qrcle::Adjustment::Icon(icon));
    }
    if let Some(p) = &args.icon_position {
        let p = qrcle::IconPosition::parse(p)
            .with_context(|| format!("unknown icon position '{p}'"))?;
        out.push(qrcle::Adjustment::IconPosition(p));
    }
    Ok(out)
}

fn cmd_export(settings: qrcle::Settings, args: ExportArgs) -> anyhow::Result<()> {
    let mut wizard = make_wizard(settings)?;
    wizard.open(&args.url)?;
    if wizard.step() != qrcle::Step::Export {
        anyhow::bail!("'{}' is not an Export URL", args.url);
    }
    wizard.run_pending();
    if let Some(i) = args.palette {
        wizard.adjust(qrcle::Adjustment::Palette(i))?;
        wizard.run_pending();
    }

    let step = wizard.export()?;
    if let Some(err) = step.state().error() {
        if !err.missing.is_empty() {
            anyhow::bail!("missing parameters: {}", err.missing.join(", "));
        }
        anyhow::bail!("capture failed: {}", err.message);
    }
    let png = step
        .state()
        .ready()
        .context("capture did not complete")?;
    write_png(&args.out, png)?;
    if args.palette.is_some() {
        println!("{}", wizard.current_url());
    }
    Ok(())
}

fn cmd_info(args: &InfoArgs) -> anyhow::Result<()> {
    let url = qrcle::StepUrl::parse(&args.url)?;
    let config = qrcle::decode_query(&url.query);
    let resolved = config.require_complete()?;
    let summary = qrcle::InfoSummary::from_config(&resolved);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn cmd_themes(args: &ThemesArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(qrcle::themes())?);
        return Ok(());
    }
    for theme in qrcle::themes() {
        println!("{} ({})", theme.id, theme.name);
        for (i, palette) in theme.palettes.iter().enumerate() {
            println!(
                "  {i}: {:<12} {} / {}",
                palette.name,
                palette.dark.to_hex(),
                palette.light.to_hex()
            );
        }
    }
    Ok(())
}

fn write_png(path: &Path, png: &qrcle::ImagePayload) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png.bytes()).with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
