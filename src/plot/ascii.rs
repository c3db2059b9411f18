//! ASCII chart of the series for terminal output.
//!
//! Fixed-size grid, one column position per day spread across the width,
//! deterministic so it can be golden-tested.
//!
//! Plot elements:
//! - cumulative totals: `o`, joined by a `-` line
//! - cumulative deaths: `x` (same axis as totals, only when non-zero)
//! - new cases per day: `|` bars on their own axis

use crate::domain::ChartScale;
use crate::report::DayView;

/// Render the chart for `views` in series order.
pub fn render_daily_chart(views: &[DayView], width: usize, height: usize, scale: ChartScale) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (views.first(), views.last()) else {
        return "Chart: no records\n".to_string();
    };
    let Some(totals_axis) = Axis::fit(views.iter().map(|v| v.total as f64), scale) else {
        return "Chart: no records\n".to_string();
    };
    let growth_axis = Axis::fit(views.iter().map(|v| v.growth as f64), scale).unwrap_or(totals_axis);

    let mut grid = vec![vec![' '; width]; height];
    let cols: Vec<usize> = (0..views.len()).map(|i| map_x(i, views.len(), width)).collect();

    // Bars first so the totals overlay them.
    for (v, &x) in views.iter().zip(&cols) {
        if v.growth > 0 {
            let top = map_y(growth_axis.unit(v.growth as f64), height);
            for row in grid.iter_mut().skip(top) {
                row[x] = '|';
            }
        }
    }

    let points: Vec<(usize, usize)> = views
        .iter()
        .zip(&cols)
        .map(|(v, &x)| (x, map_y(totals_axis.unit(v.total as f64), height)))
        .collect();

    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &points {
        grid[y][x] = 'o';
    }

    for (v, &x) in views.iter().zip(&cols) {
        if v.deaths > 0 {
            let y = map_y(totals_axis.unit(v.deaths as f64), height);
            grid[y][x] = 'x';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Chart: {} .. {} | total=[{:.0}, {:.0}] | new=[{:.0}, {:.0}] | {}\n",
        first.day,
        last.day,
        totals_axis.lo,
        totals_axis.hi,
        growth_axis.lo,
        growth_axis.hi,
        scale_label(scale),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str("o total  x deaths  | new cases\n");
    out
}

fn scale_label(scale: ChartScale) -> &'static str {
    match scale {
        ChartScale::Linear => "linear",
        ChartScale::Log => "log2",
    }
}

/// Value domain for one series, mapped onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    lo: f64,
    hi: f64,
    scale: ChartScale,
}

impl Axis {
    /// Domain is `[max(min, 1), max]`; a flat series gets a unit-wide domain.
    fn fit(values: impl Iterator<Item = f64>, scale: ChartScale) -> Option<Self> {
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for v in values {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
        if !(min_v.is_finite() && max_v.is_finite()) {
            return None;
        }

        let lo = min_v.max(1.0);
        let hi = if max_v > lo { max_v } else { lo + 1.0 };
        Some(Self { lo, hi, scale })
    }

    fn unit(&self, v: f64) -> f64 {
        let u = match self.scale {
            ChartScale::Linear => (v - self.lo) / (self.hi - self.lo),
            ChartScale::Log => {
                if v < 1.0 {
                    return 0.0;
                }
                (v.log2() - self.lo.log2()) / (self.hi.log2() - self.lo.log2())
            }
        };
        u.clamp(0.0, 1.0)
    }
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(u: f64, height: usize) -> usize {
    // u=1 is the top row.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish); only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
