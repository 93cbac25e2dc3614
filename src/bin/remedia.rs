use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "remedia", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-encode an image into another container.
    Image(ImageArgs),
    /// Apply a visual filter chain, producing a PNG.
    Filter(FilterArgs),
    /// Key out a background color, producing a PNG.
    RemoveBg(RemoveBgArgs),
    /// Sample the color of one pixel.
    Pick(PickArgs),
    /// Re-encode audio into a PCM container (requires `ffmpeg` on PATH).
    Audio(AudioArgs),
    /// Split a stereo source into an instrumental or vocal WAV.
    Separate(SeparateArgs),
}

#[derive(Parser, Debug)]
struct ImageArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target container.
    #[arg(long, value_enum)]
    to: RasterChoice,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Quality in (0, 1] for lossy targets.
    #[arg(long)]
    quality: Option<f32>,
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Filter spec, e.g. "sepia(50%) contrast(120%)".
    #[arg(long)]
    spec: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RemoveBgArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Reference color as #RRGGBB.
    #[arg(long)]
    color: String,

    /// Tolerance percentage, 0-100.
    #[arg(long, default_value_t = 30.0)]
    tolerance: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PickArgs {
    /// Input image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pixel x coordinate.
    #[arg(short, long)]
    x: u32,

    /// Pixel y coordinate.
    #[arg(short, long)]
    y: u32,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    /// Input audio path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target container (compressed targets downgrade to WAV).
    #[arg(long, value_enum)]
    to: AudioChoice,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SeparateArgs {
    /// Input audio path (must be stereo).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Which heuristic to run.
    #[arg(long, value_enum)]
    mode: ModeChoice,

    /// Output WAV path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RasterChoice {
    Png,
    Jpeg,
    Webp,
    Gif,
    Ico,
    Avif,
    Heic,
    Svg,
    Bmp,
    Tiff,
    Eps,
    Raw,
}

impl From<RasterChoice> for remedia::RasterTarget {
    fn from(c: RasterChoice) -> Self {
        match c {
            RasterChoice::Png => Self::Png,
            RasterChoice::Jpeg => Self::Jpeg,
            RasterChoice::Webp => Self::Webp,
            RasterChoice::Gif => Self::Gif,
            RasterChoice::Ico => Self::Ico,
            RasterChoice::Avif => Self::Avif,
            RasterChoice::Heic => Self::Heic,
            RasterChoice::Svg => Self::Svg,
            RasterChoice::Bmp => Self::Bmp,
            RasterChoice::Tiff => Self::Tiff,
            RasterChoice::Eps => Self::Eps,
            RasterChoice::Raw => Self::Raw,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AudioChoice {
    Wav,
    Mp3,
    Flac,
    Aac,
    Ogg,
    Wma,
    M4a,
    Alac,
    Dsd,
    Pcm,
    Apc,
    Cda,
    #[value(name = "3ga")]
    ThreeGa,
    Au,
    Mqa,
    Opus,
    Raw,
}

impl From<AudioChoice> for remedia::AudioTarget {
    fn from(c: AudioChoice) -> Self {
        match c {
            AudioChoice::Wav => Self::Wav,
            AudioChoice::Mp3 => Self::Mp3,
            AudioChoice::Flac => Self::Flac,
            AudioChoice::Aac => Self::Aac,
            AudioChoice::Ogg => Self::Ogg,
            AudioChoice::Wma => Self::Wma,
            AudioChoice::M4a => Self::M4a,
            AudioChoice::Alac => Self::Alac,
            AudioChoice::Dsd => Self::Dsd,
            AudioChoice::Pcm => Self::Pcm,
            AudioChoice::Apc => Self::Apc,
            AudioChoice::Cda => Self::Cda,
            AudioChoice::ThreeGa => Self::ThreeGa,
            AudioChoice::Au => Self::Au,
            AudioChoice::Mqa => Self::Mqa,
            AudioChoice::Opus => Self::Opus,
            AudioChoice::Raw => Self::Raw,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Instrumental,
    Vocal,
}

impl From<ModeChoice> for remedia::SeparationMode {
    fn from(c: ModeChoice) -> Self {
        match c {
            ModeChoice::Instrumental => Self::Instrumental,
            ModeChoice::Vocal => Self::Vocal,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Image(args) => cmd_image(args),
        Command::Filter(args) => cmd_filter(args),
        Command::RemoveBg(args) => cmd_remove_bg(args),
        Command::Pick(args) => cmd_pick(args),
        Command::Audio(args) => cmd_audio(args),
        Command::Separate(args) => cmd_separate(args),
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

fn write_result(out: &Path, result: &remedia::EncodedResult) -> anyhow::Result<()> {
    fs::write(out, &result.bytes).with_context(|| format!("write output '{}'", out.display()))?;
    println!(
        "wrote {} ({} bytes, {})",
        out.display(),
        result.bytes.len(),
        result.mime_type
    );
    Ok(())
}

fn cmd_image(args: ImageArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.in_path)?;
    let result = remedia::convert_raster(&bytes, args.to.into(), args.quality)?;
    write_result(&args.out, &result)
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.in_path)?;
    let result = remedia::apply_filter(&bytes, &args.spec)?;
    write_result(&args.out, &result)
}

fn cmd_remove_bg(args: RemoveBgArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.in_path)?;
    let reference = remedia::Rgb::from_hex(&args.color)?;
    let tolerance = remedia::Tolerance::new(args.tolerance)?;
    let result = remedia::remove_background(&bytes, reference, tolerance)?;
    write_result(&args.out, &result)
}

fn cmd_pick(args: PickArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.in_path)?;
    let sample = remedia::pick_color(&bytes, args.x, args.y)?;
    println!(
        "{} rgb({}, {}, {})",
        sample.hex, sample.rgb.r, sample.rgb.g, sample.rgb.b
    );
    Ok(())
}

fn cmd_audio(args: AudioArgs) -> anyhow::Result<()> {
    let result = remedia::convert_audio(&args.in_path, args.to.into())?;
    write_result(&args.out, &result)
}

fn cmd_separate(args: SeparateArgs) -> anyhow::Result<()> {
    let result = remedia::separate_to_wav(&args.in_path, args.mode.into())?;
    write_result(&args.out, &result)
}
