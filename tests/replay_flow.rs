use mask_painter::canvas::{Sheet, INK};
use mask_painter::{drag, paint, Clock, CompileOutcome, DragOptions, Mask, Point, ReplaySettings};
use std::collections::BTreeSet;

#[derive(Default)]
struct NoWait {
    waited: u64,
}

impl Clock for NoWait {
    fn sleep(&mut self, millis: u64) {
        self.waited += millis;
    }
}

fn inked(sheet: &Sheet) -> BTreeSet<(i32, i32)> {
    let fb = &sheet.paper;
    let mut out = BTreeSet::new();
    for y in 0..fb.height as i32 {
        for x in 0..fb.width as i32 {
            if fb.get(x, y) == Some(INK) {
                out.insert((x, y));
            }
        }
    }
    out
}

fn checker(width: usize, height: usize) -> Mask {
    Mask::from_fn(width, height, |x, y| (x / 2 + y) % 3 != 0)
}

#[test]
fn replay_reproduces_every_ink_cell() {
    let mask = checker(12, 5);
    let settings = ReplaySettings {
        origin: Point::new(4, 3),
        pixel_size: 1,
        gesture_delay_ms: 10,
        settle_delay_ms: 100,
    };
    let mut sheet = Sheet::new(40, 20);
    let mut clock = NoWait::default();

    let report = paint(&mask, &mut sheet, &mut || true, &mut clock, &settings).unwrap();
    assert_eq!(report.outcome, CompileOutcome::Completed);
    assert_eq!(report.presses, mask.stroke_count());
    assert_eq!(report.presses, report.releases);
    assert!(!sheet.pen_down());

    let mut expected = BTreeSet::new();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.ink(x, y) {
                expected.insert((4 + x as i32, 3 + y as i32));
            }
        }
        // runs touching the right edge are released one cell further out
        if mask.ink(mask.width() - 1, y) {
            expected.insert((4 + mask.width() as i32, 3 + y as i32));
        }
    }
    assert_eq!(inked(&sheet), expected);

    // one settle plus one pause per gesture
    assert_eq!(clock.waited, 100 + 10 * (report.presses + report.releases) as u64);
}

#[test]
fn cancelled_replay_leaves_the_pen_down_mid_run() {
    let mask = Mask::from_fn(8, 2, |_, _| true);
    let settings = ReplaySettings {
        origin: Point::new(0, 0),
        pixel_size: 1,
        gesture_delay_ms: 0,
        settle_delay_ms: 0,
    };
    let mut sheet = Sheet::new(16, 4);
    let mut budget = 3;
    let report = paint(
        &mask,
        &mut sheet,
        &mut || {
            budget -= 1;
            budget >= 0
        },
        &mut NoWait::default(),
        &settings,
    )
    .unwrap();

    assert_eq!(report.outcome, CompileOutcome::Cancelled { at: Point::new(3, 0) });
    assert_eq!((report.presses, report.releases), (1, 0));
    assert!(sheet.pen_down());
}

#[test]
fn drag_on_the_sheet_leaves_a_connected_line() {
    let mut sheet = Sheet::new(50, 50);
    let opts = DragOptions { interval: 3, lag_ms: 2, max_steps: 10_000 };
    let mut clock = NoWait::default();
    let path = drag(&mut sheet, &mut clock, Point::new(5, 5), Point::new(40, 22), &opts).unwrap();

    assert_eq!(path.first(), Some(&Point::new(5, 5)));
    assert_eq!(path.last(), Some(&Point::new(40, 22)));
    assert_eq!(clock.waited, 2 * (path.len() as u64 - 1));
    assert!(!sheet.pen_down());

    let ink = inked(&sheet);
    assert!(ink.contains(&(5, 5)));
    assert!(ink.contains(&(40, 22)));
    for p in &path {
        assert!(ink.contains(&(p.x, p.y)), "path point {p} not drawn");
    }
}
