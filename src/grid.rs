//! Toroidal grid geometry. The board is a fixed square of pixel
//! coordinates; grid-aligned entities live on multiples of `GRID_SIZE`
//! and every coordinate wraps modulo `WINDOW_SIZE`.

pub const WINDOW_SIZE: i32 = 800;
pub const GRID_SIZE: i32 = 20;
pub const GRID_COUNT: i32 = WINDOW_SIZE / GRID_SIZE;

/// Wrap an integer pixel coordinate onto the torus.
pub fn wrap(coord: i32) -> i32 {
    coord.rem_euclid(WINDOW_SIZE)
}

/// Wrap a fractional pixel coordinate onto the torus.
pub fn wrap_f(coord: f32) -> f32 {
    let wrapped = coord.rem_euclid(WINDOW_SIZE as f32);
    // f32::rem_euclid may round up to the modulus itself for tiny
    // negative inputs; the result must stay inside the window.
    if wrapped >= WINDOW_SIZE as f32 {
        0.0
    } else {
        wrapped
    }
}

/// Grid cell index of a pixel coordinate.
pub fn pixel_to_cell(coord: i32) -> i32 {
    coord.div_euclid(GRID_SIZE)
}

/// Pixel coordinate of a grid cell's top-left corner.
pub fn cell_to_pixel(cell: i32) -> i32 {
    cell * GRID_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_coordinates_in_window() {
        assert_eq!(wrap(0), 0);
        assert_eq!(wrap(WINDOW_SIZE), 0);
        assert_eq!(wrap(WINDOW_SIZE + GRID_SIZE), GRID_SIZE);
        assert_eq!(wrap(-GRID_SIZE), WINDOW_SIZE - GRID_SIZE);
    }

    #[test]
    fn wrap_preserves_grid_alignment() {
        for cell in -GRID_COUNT..2 * GRID_COUNT {
            let px = wrap(cell * GRID_SIZE);
            assert_eq!(px % GRID_SIZE, 0);
            assert!((0..WINDOW_SIZE).contains(&px));
        }
    }

    #[test]
    fn wrap_f_keeps_fractions_in_window() {
        assert_eq!(wrap_f(800.5), 0.5);
        assert_eq!(wrap_f(-0.5), 799.5);
        assert!((0.0..WINDOW_SIZE as f32).contains(&wrap_f(123.4)));
    }

    #[test]
    fn pixel_cell_round_trip() {
        assert_eq!(pixel_to_cell(cell_to_pixel(7)), 7);
        assert_eq!(pixel_to_cell(GRID_SIZE - 1), 0);
        assert_eq!(pixel_to_cell(GRID_SIZE), 1);
    }
}
