use log::{debug, warn};
use surfwarp_image::{DynamicImage, Image, PixelDepth};

use crate::{
    accumulate::Accumulator,
    interpolation::{grid::meshgrid_from_fn, remap, InterpolationMode},
    projection::{Direction, ProjectionError, ProjectionKind, ProjectionModel, ProjectionParams},
};

/// Project `src` into `dst` by sampling the source at the inverse-mapped coordinate of every
/// destination pixel.
///
/// Destination pixels whose source coordinate falls outside the source keep their value.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The pre-filled output image, usually of size `model.output_size()`.
/// * `model` - The projection model built for the size of `src`.
/// * `interpolation` - The interpolation mode to use.
pub fn project_inverse<T: PixelDepth, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    model: &ProjectionModel,
    interpolation: InterpolationMode,
) -> Result<(), ProjectionError> {
    let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        model.inverse(x as f32, y as f32)
    })?;

    remap(src, dst, &map_x, &map_y, interpolation)?;

    Ok(())
}

/// Project `src` into `dst` by writing every source pixel at its forward-mapped coordinate.
///
/// The destination coordinate is rounded to the nearest pixel and collisions are averaged
/// with an [`Accumulator`]. Pixels landing outside `dst` are dropped.
///
/// # Returns
///
/// The number of destination pixels that received no source pixel.
///
/// # Errors
///
/// Returns [`ProjectionError::UnsupportedDirection`] when the model has no forward form.
pub fn project_forward<T: PixelDepth, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    model: &ProjectionModel,
) -> Result<usize, ProjectionError> {
    if !model.supports(Direction::Forward) {
        return Err(ProjectionError::UnsupportedDirection {
            kind: model.kind(),
            direction: Direction::Forward,
        });
    }

    let (max_x, max_y) = (dst.cols() as f32, dst.rows() as f32);
    let mut acc = Accumulator::new(dst);

    if src.cols() == 0 {
        return Ok(acc.holes());
    }

    for (y, row) in src.as_slice().chunks_exact(C * src.cols()).enumerate() {
        for (x, pixel) in row.chunks_exact(C).enumerate() {
            let Some((u, v)) = model.forward(x as f32, y as f32) else {
                continue;
            };

            let (u, v) = (u.round(), v.round());
            if !(0.0..max_x).contains(&u) || !(0.0..max_y).contains(&v) {
                continue;
            }

            let mut value = [T::default(); C];
            value.copy_from_slice(pixel);
            acc.accumulate(u as usize, v as usize, &value)?;
        }
    }

    Ok(acc.holes())
}

/// Re-project an image onto the viewing surface of `kind`.
///
/// Sampling uses bilinear interpolation; see [`transform_interpolated`] to choose another mode.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `kind` - The projection model.
/// * `direction` - Whether to iterate destination (inverse) or source (forward) pixels.
/// * `params` - The camera ratios.
///
/// # Returns
///
/// A new image of the model output size, zero where nothing was projected.
///
/// # Errors
///
/// Dimension, parameter and direction errors are reported before any pixel is written.
///
/// # Example
///
/// ```
/// use surfwarp_image::{Image, ImageSize};
/// use surfwarp_imgproc::projection::{Direction, ProjectionKind, ProjectionParams};
/// use surfwarp_imgproc::transform::transform;
///
/// let src = Image::<u8, 3>::from_size_val(ImageSize { width: 64, height: 48 }, 128).unwrap();
///
/// let dst = transform(
///     &src,
///     ProjectionKind::Cylinder,
///     Direction::Inverse,
///     &ProjectionParams::default(),
/// )
/// .unwrap();
///
/// assert_eq!(dst.size(), src.size());
/// ```
pub fn transform<T: PixelDepth, const C: usize>(
    src: &Image<T, C>,
    kind: ProjectionKind,
    direction: Direction,
    params: &ProjectionParams,
) -> Result<Image<T, C>, ProjectionError> {
    transform_interpolated(src, kind, direction, params, InterpolationMode::Bilinear)
}

/// Re-project an image onto the viewing surface of `kind` with the given interpolation.
///
/// The interpolation mode only affects inverse mapping.
pub fn transform_interpolated<T: PixelDepth, const C: usize>(
    src: &Image<T, C>,
    kind: ProjectionKind,
    direction: Direction,
    params: &ProjectionParams,
    interpolation: InterpolationMode,
) -> Result<Image<T, C>, ProjectionError> {
    let model = ProjectionModel::new(kind, src.size(), params)?;

    if !model.supports(direction) {
        return Err(ProjectionError::UnsupportedDirection { kind, direction });
    }

    debug!(
        "{direction} {kind} projection: {} -> {}",
        src.size(),
        model.output_size()
    );

    let mut dst = Image::from_size_val(model.output_size(), T::default())?;

    match direction {
        Direction::Inverse => project_inverse(src, &mut dst, &model, interpolation)?,
        Direction::Forward => {
            let holes = project_forward(src, &mut dst, &model)?;
            if holes > 0 {
                warn!("forward {kind} projection left {holes} destination pixels unfilled");
            }
        }
    }

    Ok(dst)
}

/// Re-project an image whose pixel format is only known at runtime.
///
/// The output has the same channel count and bit depth as the input. Sampling uses bilinear
/// interpolation; see [`transform_dynamic_interpolated`] to choose another mode.
pub fn transform_dynamic(
    src: &DynamicImage,
    kind: ProjectionKind,
    direction: Direction,
    params: &ProjectionParams,
) -> Result<DynamicImage, ProjectionError> {
    transform_dynamic_interpolated(src, kind, direction, params, InterpolationMode::Bilinear)
}

/// Re-project an image whose pixel format is only known at runtime with the given
/// interpolation.
pub fn transform_dynamic_interpolated(
    src: &DynamicImage,
    kind: ProjectionKind,
    direction: Direction,
    params: &ProjectionParams,
    interpolation: InterpolationMode,
) -> Result<DynamicImage, ProjectionError> {
    let dst = match src {
        DynamicImage::Rgb8(image) => DynamicImage::Rgb8(transform_interpolated(
            image,
            kind,
            direction,
            params,
            interpolation,
        )?),
        DynamicImage::Rgba8(image) => DynamicImage::Rgba8(transform_interpolated(
            image,
            kind,
            direction,
            params,
            interpolation,
        )?),
        DynamicImage::Rgb16(image) => DynamicImage::Rgb16(transform_interpolated(
            image,
            kind,
            direction,
            params,
            interpolation,
        )?),
        DynamicImage::Rgba16(image) => DynamicImage::Rgba16(transform_interpolated(
            image,
            kind,
            direction,
            params,
            interpolation,
        )?),
    };

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfwarp_image::{ImageSize, PixelFormat};

    fn pattern<T: PixelDepth, const C: usize>(
        width: usize,
        height: usize,
        modulo: usize,
    ) -> Result<Image<T, C>, ProjectionError> {
        let data = (0..width * height * C)
            .map(|i| T::from_f32(((i * 37 + 11) % modulo) as f32))
            .collect();
        Ok(Image::new(ImageSize { width, height }, data)?)
    }

    fn assert_identity<T: PixelDepth + PartialEq + std::fmt::Debug, const C: usize>(
        src: &Image<T, C>,
    ) -> Result<(), ProjectionError> {
        let params = ProjectionParams::default();
        for direction in [Direction::Inverse, Direction::Forward] {
            let dst = transform(src, ProjectionKind::Identity, direction, &params)?;
            assert_eq!(dst.as_slice(), src.as_slice(), "{direction}");
        }
        Ok(())
    }

    #[test]
    fn identity_reproduces_every_format() -> Result<(), ProjectionError> {
        assert_identity(&pattern::<u8, 3>(7, 5, 256)?)?;
        assert_identity(&pattern::<u8, 4>(5, 7, 256)?)?;
        assert_identity(&pattern::<u16, 3>(6, 4, 65536)?)?;
        assert_identity(&pattern::<u16, 4>(1, 9, 65536)?)?;
        assert_identity(&pattern::<u8, 1>(3, 3, 256)?)?;
        Ok(())
    }

    #[test]
    fn flat_inverse_rows() -> Result<(), ProjectionError> {
        let src = pattern::<u8, 3>(10, 8, 256)?;
        let dst = transform(
            &src,
            ProjectionKind::Flat,
            Direction::Inverse,
            &ProjectionParams::default(),
        )?;

        // row 0 samples above the source and stays empty
        for x in 0..10 {
            assert_eq!(dst.pixel(x, 0)?, &[0, 0, 0]);
        }
        // the ceiling row (0.75 * 8) is unchanged
        for x in 0..10 {
            assert_eq!(dst.pixel(x, 6)?, src.pixel(x, 6)?);
        }

        Ok(())
    }

    #[test]
    fn cylinder_inverse_uniform() -> Result<(), ProjectionError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 32,
                height: 16,
            },
            200,
        )?;
        let dst = transform(
            &src,
            ProjectionKind::Cylinder,
            Direction::Inverse,
            &ProjectionParams::default(),
        )?;

        assert!(dst.as_slice().iter().all(|&v| v == 0 || v == 200));
        // the centre of the ceiling row is always inside the source
        assert_eq!(dst.pixel(16, 12)?, &[200, 200, 200]);
        // the centre column is foreshortened, leaving the top row empty
        assert_eq!(dst.pixel(16, 0)?, &[0, 0, 0]);

        Ok(())
    }

    #[test]
    fn cylinder_forward_uniform() -> Result<(), ProjectionError> {
        let size = ImageSize {
            width: 40,
            height: 24,
        };
        let src = Image::<u16, 4>::from_size_val(size, 1000)?;
        let model = ProjectionModel::new(
            ProjectionKind::Cylinder,
            size,
            &ProjectionParams::default(),
        )?;

        let mut dst = Image::from_size_val(model.output_size(), 0)?;
        let holes = project_forward(&src, &mut dst, &model)?;

        let filled = dst
            .as_slice()
            .chunks_exact(4)
            .filter(|p| p.iter().all(|&v| v == 1000))
            .count();
        let empty = dst
            .as_slice()
            .chunks_exact(4)
            .filter(|p| p.iter().all(|&v| v == 0))
            .count();

        assert_eq!(filled + empty, size.area());
        assert_eq!(empty, holes);
        assert!(filled > 0);

        Ok(())
    }

    #[test]
    fn flat_forward_averages_collisions() -> Result<(), ProjectionError> {
        let size = ImageSize {
            width: 1,
            height: 16,
        };
        let src = Image::<u8, 1>::new(size, (0..16).map(|v| v * 10).collect())?;
        let dst = transform(
            &src,
            ProjectionKind::Flat,
            Direction::Forward,
            &ProjectionParams::default(),
        )?;

        // rows compress towards the ceiling, so the output never exceeds the source range
        assert!(dst.as_slice().iter().all(|&v| v <= 150));
        // the ceiling row (12) only receives source row 12
        assert_eq!(dst.pixel(0, 12)?, &[120]);
        // source rows 4 and 5 land at 5.6 and 6.4, both rounding to row 6
        assert_eq!(dst.pixel(0, 6)?, &[45]);

        Ok(())
    }

    #[test]
    fn fixed_width_adjusts_height() -> Result<(), ProjectionError> {
        let src = Image::<u8, 4>::from_size_val(
            ImageSize {
                width: 64,
                height: 64,
            },
            255,
        )?;
        let params = ProjectionParams::default();

        let dst = transform(
            &src,
            ProjectionKind::CylinderFixedWidth,
            Direction::Inverse,
            &params,
        )?;
        assert_eq!(dst.width(), 64);
        assert_eq!(dst.height(), (64.0 / 1f64.sin()).ceil() as usize);

        let res = transform(
            &src,
            ProjectionKind::CylinderFixedWidth,
            Direction::Forward,
            &params,
        );
        assert_eq!(
            res,
            Err(ProjectionError::UnsupportedDirection {
                kind: ProjectionKind::CylinderFixedWidth,
                direction: Direction::Forward,
            })
        );

        Ok(())
    }

    #[test]
    fn folded_cylinder_rejects_forward() -> Result<(), ProjectionError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 100,
                height: 100,
            },
            10,
        )?;
        let params = ProjectionParams {
            radius_ratio: 0.34,
            ..Default::default()
        };

        let res = transform(&src, ProjectionKind::Cylinder, Direction::Forward, &params);
        assert_eq!(
            res,
            Err(ProjectionError::UnsupportedDirection {
                kind: ProjectionKind::Cylinder,
                direction: Direction::Forward,
            })
        );

        // inverse mapping stays available
        let dst = transform(&src, ProjectionKind::Cylinder, Direction::Inverse, &params)?;
        assert_eq!(dst.size(), src.size());

        Ok(())
    }

    #[test]
    fn empty_source_is_rejected() -> Result<(), ProjectionError> {
        let src = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 4,
            },
            vec![],
        )?;
        let res = transform(
            &src,
            ProjectionKind::Identity,
            Direction::Inverse,
            &ProjectionParams::default(),
        );
        assert_eq!(
            res,
            Err(ProjectionError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        Ok(())
    }

    #[test]
    fn dynamic_keeps_format() -> Result<(), ProjectionError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let format = PixelFormat::new(4, 16)?;
        let bytes = (0..size.area() * format.bytes_per_pixel())
            .map(|i| i as u8)
            .collect::<Vec<_>>();
        let src = DynamicImage::from_bytes(size, format, &bytes)?;

        let dst = transform_dynamic(
            &src,
            ProjectionKind::Identity,
            Direction::Inverse,
            &ProjectionParams::default(),
        )?;

        assert_eq!(dst.format(), format);
        assert_eq!(dst.size(), size);
        assert_eq!(dst.into_bytes(), bytes);

        Ok(())
    }
}
