//! Smooth button-held drag between two points.
//!
//! The path is walked in fixed steps along the dominant axis of one of four
//! literal cases (left-to-right, right-to-left, vertical down, vertical up).
//! Non-vertical cases read `y` off the line through both endpoints.

use crate::device::{Clock, PointerDevice};
use crate::error::{Error, Result};
use crate::types::Point;
use log::{debug, info};

/// Step counter ceiling that keeps a misconfigured drag from running forever.
pub const DEFAULT_MAX_STEPS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOptions {
    /// Pixels advanced along the walked axis per step, `0..=100`.
    pub interval: i32,
    /// Delay after each intermediate move, in milliseconds.
    pub lag_ms: u64,
    /// The walk stops once the step counter goes past this.
    pub max_steps: u32,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self { interval: 5, lag_ms: 1, max_steps: DEFAULT_MAX_STEPS }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Rightward,
    Leftward,
    Down,
    Up,
}

/// Points the pointer visits: the walked steps followed by the destination.
/// The first element is always `from`, the last always `to`.
pub fn plan(from: Point, to: Point, interval: i32, max_steps: u32) -> Result<Vec<Point>> {
    validate(from, to, interval)?;

    let direction = if from.x < to.x {
        Direction::Rightward
    } else if from.x > to.x {
        Direction::Leftward
    } else if from.y < to.y {
        Direction::Down
    } else {
        Direction::Up
    };

    let slope = (f64::from(to.y) - f64::from(from.y)) / (f64::from(to.x) - f64::from(from.x));
    let line_y = |x: f64| slope * x - slope * f64::from(to.x) + f64::from(to.y);

    let span = match direction {
        Direction::Rightward | Direction::Leftward => i64::from(to.x) - i64::from(from.x),
        Direction::Down | Direction::Up => i64::from(to.y) - i64::from(from.y),
    }
    .abs();

    let position = |i: i64| -> Point {
        let i = i as f64;
        match direction {
            Direction::Rightward => {
                let x = f64::from(from.x) + i;
                Point::new(x as i32, line_y(x) as i32)
            }
            Direction::Leftward => {
                let x = f64::from(from.x) - i;
                Point::new(x as i32, line_y(x) as i32)
            }
            Direction::Down => Point::new(from.x, (f64::from(from.y) + i) as i32),
            Direction::Up => Point::new(from.x, (f64::from(from.y) - i) as i32),
        }
    };

    let mut path = Vec::new();
    let mut count: u32 = 0;
    let mut i: i64 = 0;
    while i < span {
        count += 1;
        // step zero is the start itself, not a line read that may drift a pixel
        path.push(if i == 0 { from } else { position(i) });
        if count > max_steps {
            debug!("drag: step cap {max_steps} hit at {} of {span}", i);
            break;
        }
        i += i64::from(interval);
    }
    path.push(to);
    Ok(path)
}

/// Press at `from`, walk towards `to` sleeping `lag_ms` after every step,
/// then release once at `to`. Arguments are checked before the device is
/// touched. Returns the visited path.
pub fn drag<D, C>(
    device: &mut D,
    clock: &mut C,
    from: Point,
    to: Point,
    opts: &DragOptions,
) -> Result<Vec<Point>>
where
    D: PointerDevice + ?Sized,
    C: Clock + ?Sized,
{
    let path = plan(from, to, opts.interval, opts.max_steps)?;
    let (last, steps) = match path.split_last() {
        Some(split) => split,
        None => return Err(Error::InvalidArgument("drag: empty path".into())),
    };

    info!("drag {from} -> {to}: {} steps, {} ms lag", steps.len(), opts.lag_ms);
    device.press(from)?;
    for &p in steps {
        device.move_to(p)?;
        clock.sleep(opts.lag_ms);
    }
    device.release(*last)?;
    Ok(path)
}

fn validate(from: Point, to: Point, interval: i32) -> Result<()> {
    if from == to {
        return Err(Error::InvalidArgument(format!("drag: points cannot be equal ({from})")));
    }
    if !(0..=100).contains(&interval) {
        return Err(Error::InvalidArgument(format!(
            "drag: interval is a percentage and must be within 0..=100, got {interval}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::fakes::{pointer_calls, total_sleep, Call, FakeClock, Journal, Recorder};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn opts(interval: i32, lag_ms: u64) -> DragOptions {
        DragOptions { interval, lag_ms, max_steps: DEFAULT_MAX_STEPS }
    }

    #[test]
    fn equal_points_are_rejected_before_touching_the_device() {
        let journal = Journal::default();
        let mut dev = Recorder::new(&journal);
        let mut clock = FakeClock::new(&journal);
        let err = drag(&mut dev, &mut clock, p(4, 4), p(4, 4), &opts(10, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn out_of_range_interval_is_rejected() {
        for bad in [150, -1, 101] {
            let journal = Journal::default();
            let mut dev = Recorder::new(&journal);
            let mut clock = FakeClock::new(&journal);
            let err = drag(&mut dev, &mut clock, p(0, 0), p(9, 3), &opts(bad, 1)).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "interval {bad}");
            assert!(journal.borrow().is_empty());
        }
    }

    #[test]
    fn horizontal_drag_steps_then_releases_at_destination() {
        let journal = Journal::default();
        let mut dev = Recorder::new(&journal);
        let mut clock = FakeClock::new(&journal);
        drag(&mut dev, &mut clock, p(0, 0), p(100, 0), &opts(25, 7)).unwrap();

        assert_eq!(
            *journal.borrow(),
            vec![
                Call::Press(p(0, 0)),
                Call::Move(p(0, 0)),
                Call::Sleep(7),
                Call::Move(p(25, 0)),
                Call::Sleep(7),
                Call::Move(p(50, 0)),
                Call::Sleep(7),
                Call::Move(p(75, 0)),
                Call::Sleep(7),
                Call::Release(p(100, 0)),
            ]
        );
        assert_eq!(total_sleep(&journal), 28);
    }

    #[test]
    fn right_to_left_follows_the_line() {
        // y = 5 - x/2 through (10,0) and (0,5)
        let path = plan(p(10, 0), p(0, 5), 5, DEFAULT_MAX_STEPS).unwrap();
        assert_eq!(path, vec![p(10, 0), p(5, 2), p(0, 5)]);
    }

    #[test]
    fn diagonal_positions_truncate_toward_zero() {
        let down = plan(p(0, 0), p(10, 5), 5, DEFAULT_MAX_STEPS).unwrap();
        assert_eq!(down, vec![p(0, 0), p(5, 2), p(10, 5)]);
        let up = plan(p(0, 0), p(10, -5), 5, DEFAULT_MAX_STEPS).unwrap();
        assert_eq!(up, vec![p(0, 0), p(5, -2), p(10, -5)]);
    }

    #[test]
    fn vertical_drags_walk_y_in_both_directions() {
        let down = plan(p(3, 0), p(3, 10), 4, DEFAULT_MAX_STEPS).unwrap();
        assert_eq!(down, vec![p(3, 0), p(3, 4), p(3, 8), p(3, 10)]);
        let up = plan(p(3, 10), p(3, 0), 4, DEFAULT_MAX_STEPS).unwrap();
        assert_eq!(up, vec![p(3, 10), p(3, 6), p(3, 2), p(3, 0)]);
    }

    #[test]
    fn path_starts_at_origin_and_ends_at_destination() {
        for (a, b) in [(p(0, 0), p(1, 0)), (p(7, 3), p(-20, 40)), (p(2, 9), p(2, 8))] {
            let path = plan(a, b, 100, DEFAULT_MAX_STEPS).unwrap();
            assert_eq!(path.first(), Some(&a));
            assert_eq!(path.last(), Some(&b));
        }
    }

    #[test]
    fn zero_interval_is_bounded_by_step_cap() {
        let journal = Journal::default();
        let mut dev = Recorder::new(&journal);
        let mut clock = FakeClock::new(&journal);
        let capped = DragOptions { interval: 0, lag_ms: 0, max_steps: 3 };
        drag(&mut dev, &mut clock, p(0, 0), p(50, 0), &capped).unwrap();

        let calls = pointer_calls(&journal);
        let moves = calls.iter().filter(|c| matches!(c, Call::Move(_))).count();
        assert_eq!(moves, 4);
        assert_eq!(calls.first(), Some(&Call::Press(p(0, 0))));
        assert_eq!(calls.last(), Some(&Call::Release(p(50, 0))));
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::Release(_))).count(), 1);
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let steep = plan(p(0, i32::MIN), p(1, i32::MAX), 100, 3).unwrap();
        assert_eq!(steep, vec![p(0, i32::MIN), p(1, i32::MAX)]);

        let wide = plan(p(i32::MIN, 0), p(i32::MAX, 0), 100, 3).unwrap();
        assert_eq!(wide.len(), 5);
        assert_eq!(wide[1], p(i32::MIN + 100, 0));
        assert_eq!(wide.last(), Some(&p(i32::MAX, 0)));

        let back = plan(p(i32::MAX, 5), p(i32::MIN, 5), 100, 3).unwrap();
        assert_eq!(back[1], p(i32::MAX - 100, 5));
    }

    #[test]
    fn default_cap_allows_long_fine_drags() {
        let path = plan(p(0, 0), p(0, 5_000), 1, DEFAULT_MAX_STEPS).unwrap();
        assert_eq!(path.len(), 5_001);
    }

    #[test]
    fn one_press_and_one_release_regardless_of_length() {
        for interval in [1, 3, 50, 100] {
            let journal = Journal::default();
            let mut dev = Recorder::new(&journal);
            let mut clock = FakeClock::new(&journal);
            drag(&mut dev, &mut clock, p(0, 0), p(60, 30), &opts(interval, 0)).unwrap();
            let calls = pointer_calls(&journal);
            assert_eq!(calls.iter().filter(|c| matches!(c, Call::Press(_))).count(), 1);
            assert_eq!(calls.iter().filter(|c| matches!(c, Call::Release(_))).count(), 1);
        }
    }
}
