use super::operation::Operation;

/// Half-extent of the centered restart region, relative to the half-size of
/// the surface.
const CENTER_REGION: f64 = 1.0 / 3.0;

/// Maps a touch on a `width` x `height` surface to an operation: the middle
/// region restarts, everywhere else steers toward the touched side, split
/// along the diagonals.
pub fn touch_operation(x: f64, y: f64, width: f64, height: f64) -> Option<Operation> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
        return None;
    }

    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let dx = (x - half_width) / half_width;
    let dy = (y - half_height) / half_height;

    if dx.abs() < CENTER_REGION && dy.abs() < CENTER_REGION {
        return Some(Operation::Restart);
    }

    let operation = if dx.abs() >= dy.abs() {
        if dx < 0.0 { Operation::Left } else { Operation::Right }
    } else if dy < 0.0 {
        Operation::Up
    } else {
        Operation::Down
    };
    Some(operation)
}
