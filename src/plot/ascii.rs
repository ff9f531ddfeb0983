//! Terminal chart of the annual series.
//!
//! A fixed-size character grid: years run left to right, temperature bottom
//! to top. Output is deterministic so it can be checked against golden text.
//!
//! - annual mean temperatures: `o`
//! - fitted trend line: `-`

use crate::domain::Analysis;

/// Render the annual series and its trend line.
pub fn render_ascii_plot(analysis: &Analysis, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = analysis
        .annual_means
        .iter()
        .map(|a| (f64::from(a.year), a.mean))
        .collect();
    let trend: Vec<(f64, f64)> = analysis
        .trend_line
        .iter()
        .map(|t| (f64::from(t.year), t.value))
        .collect();

    render_plot(&points, &trend, width, height)
}

fn render_plot(points: &[(f64, f64)], trend: &[(f64, f64)], width: usize, height: usize) -> String {
    let years = span(points.iter().map(|&(x, _)| x))
        .map(|(lo, hi)| pad(lo, hi, 0.0))
        .unwrap_or((0.0, 1.0));
    let temps = span(points.iter().chain(trend).map(|&(_, y)| y))
        .map(|(lo, hi)| pad(lo, hi, 0.05))
        .unwrap_or((0.0, 1.0));

    let mut canvas = Canvas::new(width.max(10), height.max(5), years, temps);
    // Trend first so the annual means stay visible where they overlap.
    canvas.polyline(trend, '-');
    for &(year, temp) in points {
        let (col, row) = canvas.cell(year, temp);
        canvas.cells[row][col] = 'o';
    }

    let mut out = format!(
        "Plot: years=[{:.0}, {:.0}] | temp=[{:.2}, {:.2}] °C\n",
        years.0, years.1, temps.0, temps.1
    );
    for row in &canvas.cells {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

/// Margin put around an axis whose values are all equal.
const FLAT_MARGIN: f64 = 1.0;

/// `(min, max)` of the values, `None` when empty or not finite.
fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Widen `[min, max]` by `frac` of its width, or by `FLAT_MARGIN` when it has none.
fn pad(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let margin = if max > min { (max - min) * frac } else { FLAT_MARGIN };
    (min - margin, max + margin)
}

/// Character grid with a year axis (columns) and a temperature axis (rows,
/// warmest at the top).
struct Canvas {
    cells: Vec<Vec<char>>,
    years: (f64, f64),
    temps: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, years: (f64, f64), temps: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            years,
            temps,
        }
    }

    fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// Grid position `(col, row)` of a sample; out-of-range samples are clamped.
    fn cell(&self, year: f64, temp: f64) -> (usize, usize) {
        let last_col = self.width().max(2) as f64 - 1.0;
        let last_row = self.height().max(2) as f64 - 1.0;
        let u = fraction(year, self.years);
        let v = fraction(temp, self.temps);
        ((u * last_col).round() as usize, (last_row - v * last_row).round() as usize)
    }

    fn polyline(&mut self, samples: &[(f64, f64)], ch: char) {
        if samples.len() < 2 {
            return;
        }
        let mut prev: Option<(usize, usize)> = None;
        for &(year, temp) in samples {
            let here = self.cell(year, temp);
            match prev {
                Some(from) => self.segment(from, here, ch),
                None => self.cells[here.1][here.0] = ch,
            }
            prev = Some(here);
        }
    }

    /// Bresenham segment; only blank cells are painted.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            let cell = usize::try_from(y)
                .ok()
                .and_then(|row| self.cells.get_mut(row))
                .and_then(|row| usize::try_from(x).ok().and_then(|col| row.get_mut(col)));
            if let Some(cell) = cell {
                if *cell == ' ' {
                    *cell = ch;
                }
            }

            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }
}

fn fraction(value: f64, (lo, hi): (f64, f64)) -> f64 {
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}
