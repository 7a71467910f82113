//! Conversions between the three coordinate frames: the dataset's tile
//! grid, the rendered map image (pixels), and the panned screen position.

use crate::model::{MapCoords, TilePos};

/// Fixed tile edge length; every positional field in the dataset is in
/// tile units of this size.
pub const TILE_PX: i32 = 16;

/// The map picture is re-centered by the presentation styling, so applied
/// margins move the image by half; committed offsets carry the inverse.
pub const PAN_SCALE: f64 = 2.0;

/// Axis-aligned pixel rectangle in map-image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

pub fn tile_to_pixel(x: i32, y: i32) -> (i32, i32) {
    (x * TILE_PX, y * TILE_PX)
}

/// One tile-sized box at `origin + pos`; maps with no overworld placement
/// anchor at (0,0).
pub fn hotspot_bounds(origin: Option<&MapCoords>, pos: TilePos) -> PixelRect {
    let (ox, oy) = origin.map_or((0, 0), |c| (c.x, c.y));
    let (x, y) = tile_to_pixel(ox + i32::from(pos.0), oy + i32::from(pos.1));
    PixelRect {
        x,
        y,
        w: TILE_PX,
        h: TILE_PX,
    }
}

/// Pan offset that re-centers the composite overworld image under a warp.
/// The source centers both axes on the overworld *width*; kept as-is.
pub fn overworld_warp_offset(
    origin: &MapCoords,
    warp_pos: TilePos,
    overworld_width: usize,
) -> (f64, f64) {
    let half = overworld_width as f64 / 2.0;
    let x = (f64::from(origin.x) + f64::from(warp_pos.0) - half) * f64::from(TILE_PX);
    let y = (f64::from(origin.y) + f64::from(warp_pos.1) - half) * f64::from(TILE_PX);
    (-x * PAN_SCALE, -y * PAN_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_pixel_round_trip() {
        for (x, y) in [(0, 0), (1, 1), (13, 7), (255, 254)] {
            let (px, py) = tile_to_pixel(x, y);
            assert_eq!((px / TILE_PX, py / TILE_PX), (x, y));
        }
    }

    #[test]
    fn bounds_default_to_zero_origin() {
        let r = hotspot_bounds(None, TilePos(5, 6));
        assert_eq!(
            r,
            PixelRect {
                x: 80,
                y: 96,
                w: 16,
                h: 16
            }
        );
    }

    #[test]
    fn bounds_shift_with_map_origin() {
        let origin = MapCoords { x: 10, y: 22 };
        let r = hotspot_bounds(Some(&origin), TilePos(2, 3));
        assert_eq!(
            r,
            PixelRect {
                x: 192,
                y: 400,
                w: 16,
                h: 16
            }
        );
    }

    #[test]
    fn warp_offset_centers_and_doubles() {
        let origin = MapCoords { x: 10, y: 22 };
        // x = (10 + 2 - 10) * 16 = 32, y = (22 + 3 - 10) * 16 = 240
        let (mx, my) = overworld_warp_offset(&origin, TilePos(2, 3), 20);
        assert_eq!((mx, my), (-64.0, -480.0));
    }

    #[test]
    fn warp_offset_uses_width_for_both_axes() {
        let origin = MapCoords { x: 0, y: 0 };
        let (mx, my) = overworld_warp_offset(&origin, TilePos(0, 0), 6);
        assert_eq!((mx, my), (96.0, 96.0));
    }
}
