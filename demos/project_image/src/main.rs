use std::path::PathBuf;

use argh::FromArgs;
use surfwarp::{
    imgproc::{
        interpolation::InterpolationMode,
        padding::{spatial_padding_dynamic, Padding2D, PaddingMode},
        projection::{Direction, ProjectionKind, ProjectionParams},
        transform::transform_dynamic_interpolated,
    },
    io::{read_image_any, write_image},
};

/// Project an image onto a flat or cylindrical viewing surface
#[derive(FromArgs)]
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// projection kind: identity, flat, cylinder or cylinder-fixed-width
    #[argh(option, short = 'k', default = "ProjectionKind::Cylinder")]
    kind: ProjectionKind,

    /// mapping direction: inverse or forward
    #[argh(option, short = 'd', default = "Direction::Inverse")]
    direction: Direction,

    /// interpolation for inverse mapping: bilinear or nearest
    #[argh(
        option,
        default = "InterpolationMode::Bilinear",
        from_str_fn(parse_interpolation)
    )]
    interpolation: InterpolationMode,

    /// border in pixels added with reflect-101 padding before projecting
    #[argh(option, short = 'p', default = "0")]
    pad: usize,

    /// json file overriding the default projection ratios
    #[argh(option)]
    params: Option<PathBuf>,
}

fn parse_interpolation(value: &str) -> Result<InterpolationMode, String> {
    match value {
        "bilinear" => Ok(InterpolationMode::Bilinear),
        "nearest" => Ok(InterpolationMode::Nearest),
        _ => Err(format!("unsupported interpolation: {value}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let params = match &args.params {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ProjectionParams::default(),
    };

    let mut image = read_image_any(&args.input)?;
    log::info!(
        "projecting {} ({}) with {:?}",
        args.input.display(),
        image.size(),
        params
    );

    if args.pad > 0 {
        image = spatial_padding_dynamic(
            &image,
            Padding2D::uniform(args.pad),
            PaddingMode::Reflect101,
        )?;
    }

    let projected = transform_dynamic_interpolated(
        &image,
        args.kind,
        args.direction,
        &params,
        args.interpolation,
    )?;
    write_image(&args.output, &projected)?;

    log::info!("wrote {} ({})", args.output.display(), projected.size());

    Ok(())
}
