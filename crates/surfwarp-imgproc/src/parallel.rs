use rayon::prelude::*;

use surfwarp_image::Image;

/// Apply a function to each destination pixel for grid sampling in parallel.
///
/// The destination is split into rows; each row reads the matching rows of `map_x` and `map_y`.
/// The maps must have the same size as `dst`.
pub fn par_iter_rows_resample<T, const C: usize>(
    dst: &mut Image<T, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    f: impl Fn(&f32, &f32, &mut [T]) + Send + Sync,
) where
    T: Send + Sync,
{
    let cols = dst.cols();
    if cols == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map_x.as_slice().par_chunks_exact(cols))
        .zip(map_y.as_slice().par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (x, y))| {
                    f(x, y, dst_pixel);
                });
        });
}
