use crate::padding::PaddingMode;
use surfwarp_image::{Image, PixelDepth};

/// Kernel for bilinear interpolation
///
/// The four neighbours of `(u, v)` are folded into the image with reflect-101 addressing,
/// blended per channel and rounded to the channel type.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: PixelDepth, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [T; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let (iu, iv) = (u0 as isize, v0 as isize);

    let border = PaddingMode::Reflect101;
    let iu0 = border.map_index(iu, cols).unwrap_or(0);
    let iu1 = border.map_index(iu + 1, cols).unwrap_or(0);
    let iv0 = border.map_index(iv, rows).unwrap_or(0);
    let iv1 = border.map_index(iv + 1, rows).unwrap_or(0);

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let data = image.as_slice();

    let p00 = &data[base00..base00 + C];
    let p01 = &data[base01..base01 + C];
    let p10 = &data[base10..base10 + C];
    let p11 = &data[base11..base11 + C];

    let mut pixel = [T::default(); C];
    for (k, out) in pixel.iter_mut().enumerate() {
        let (a, b, c, d): (f32, f32, f32, f32) =
            (p00[k].into(), p01[k].into(), p10[k].into(), p11[k].into());
        *out = T::from_f32(a * w00 + b * w01 + c * w10 + d * w11);
    }

    pixel
}
