use rayon::prelude::*;
use surfwarp_image::{Image, ImageError, ImageSize};

/// Create a pair of coordinate maps by evaluating `f` at every grid position.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a grid position `(x, y)` to a continuous coordinate.
///
/// # Returns
///
/// A tuple of single channel images of shape (rows, cols) holding the x and y coordinates.
///
/// # Example
///
/// ```
/// use surfwarp_imgproc::interpolation::grid::meshgrid_from_fn;
///
/// let (map_x, map_y) = meshgrid_from_fn(2, 1, |x, y| (x as f32 + 0.5, y as f32)).unwrap();
///
/// assert_eq!(map_x.as_slice(), &[0.5, 1.5]);
/// assert_eq!(map_y.as_slice(), &[0.0, 0.0]);
/// ```
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32) + Send + Sync,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let size = ImageSize {
        width: cols,
        height: rows,
    };
    let mut map_x = Image::from_size_val(size, 0.0f32)?;
    let mut map_y = Image::from_size_val(size, 0.0f32)?;

    if size.area() == 0 {
        return Ok((map_x, map_y));
    }

    map_x
        .as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(map_y.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(y, (row_x, row_y))| {
            row_x
                .iter_mut()
                .zip(row_y.iter_mut())
                .enumerate()
                .for_each(|(x, (mx, my))| {
                    (*mx, *my) = f(x, y);
                });
        });

    Ok((map_x, map_y))
}
