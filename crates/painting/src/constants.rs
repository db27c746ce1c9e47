/// Maximum canvas size in either dimension. Not a magic number - may change.
pub const MAX_CANVAS_SIZE: u32 = 2048;

/// Pen widths below this are treated as "no stroke".
pub const MIN_PEN_WIDTH: i32 = 1;
