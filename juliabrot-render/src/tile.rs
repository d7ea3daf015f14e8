use juliabrot_core::Viewport;

/// Edge length of a square work unit for tiled dispatch.
pub const TILE_SIZE: u32 = 64;

/// A rectangle of pixels rendered as one work item. Tiles on the right and
/// bottom edges are clipped to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// `(start, length)` pairs splitting `0..extent` into `TILE_SIZE` runs.
fn spans(extent: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..extent)
        .step_by(TILE_SIZE as usize)
        .map(move |start| (start, TILE_SIZE.min(extent - start)))
}

/// Partition `viewport` into tiles in row-major order.
pub fn tiles_for(viewport: Viewport) -> Vec<Tile> {
    spans(viewport.height)
        .flat_map(|(y, height)| {
            spans(viewport.width).map(move |(x, width)| Tile {
                x,
                y,
                width,
                height,
            })
        })
        .collect()
}

/// Copy a tile's row-major data into its place in a full-frame raster.
pub(crate) fn blit_tile<T: Copy>(dst: &mut [T], dst_width: u32, tile: &Tile, src: &[T]) {
    debug_assert_eq!(src.len(), tile.pixel_count());
    let stride = dst_width as usize;
    let origin = tile.y as usize * stride + tile.x as usize;
    for (row, line) in src.chunks_exact(tile.width as usize).enumerate() {
        let start = origin + row * stride;
        dst[start..start + line.len()].copy_from_slice(line);
    }
}
