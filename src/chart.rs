use eframe::egui::{Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

use crate::config::Palette;
use crate::models::Entry;

const Y_TICKS: usize = 5;
const POINT_RADIUS: f32 = 4.0;

/// A single filled line series. One instance is live at a time; the view
/// drops the old one before building the next.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub label: String,
    pub points: Vec<(String, f64)>,
}

impl Chart {
    /// Builds the series from entries already in plot order. Weights that did
    /// not parse are left out. Returns `None` when nothing is left to draw.
    pub fn build(entries: &[Entry], label: &str) -> Option<Chart> {
        let points: Vec<(String, f64)> = entries
            .iter()
            .filter_map(|entry| {
                if entry.weight.is_finite() {
                    Some((entry.date.clone(), entry.weight))
                } else {
                    tracing::warn!(
                        "Dropping {} on {}: weight is not a number",
                        entry.exercise,
                        entry.date
                    );
                    None
                }
            })
            .collect();

        if points.is_empty() {
            return None;
        }

        Some(Chart {
            label: label.to_string(),
            points,
        })
    }

    pub fn title(&self) -> String {
        format!("{} Progress", self.label)
    }

    pub fn show(&self, ui: &mut Ui, palette: &Palette) {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let outer = response.rect;

        painter.text(
            Pos2::new(outer.center().x, outer.top() + 4.0),
            Align2::CENTER_TOP,
            self.title(),
            FontId::proportional(16.0),
            palette.text,
        );

        let plot = Rect::from_min_max(
            outer.min + Vec2::new(56.0, 32.0),
            outer.max - Vec2::new(16.0, 28.0),
        );
        let geometry = Geometry::new(plot, &self.points);

        for tick in 0..=Y_TICKS {
            let value = geometry.y_min + (geometry.y_max - geometry.y_min) * tick as f64 / Y_TICKS as f64;
            let y = geometry.y(value);
            painter.line_segment(
                [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
                Stroke::new(1.0, palette.grid),
            );
            painter.text(
                Pos2::new(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format_weight(value),
                FontId::proportional(12.0),
                palette.text,
            );
        }

        let screen: Vec<Pos2> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, weight))| Pos2::new(geometry.x(i), geometry.y(*weight)))
            .collect();

        for (pos, (date, _)) in screen.iter().zip(&self.points) {
            painter.line_segment(
                [Pos2::new(pos.x, plot.top()), Pos2::new(pos.x, plot.bottom())],
                Stroke::new(1.0, palette.grid),
            );
            painter.text(
                Pos2::new(pos.x, plot.bottom() + 6.0),
                Align2::CENTER_TOP,
                date,
                FontId::proportional(12.0),
                palette.text,
            );
        }

        // Area under the line, one trapezoid per segment so every piece is convex.
        for pair in screen.windows(2) {
            painter.add(Shape::convex_polygon(
                vec![
                    pair[0],
                    pair[1],
                    Pos2::new(pair[1].x, plot.bottom()),
                    Pos2::new(pair[0].x, plot.bottom()),
                ],
                palette.accent_fill,
                Stroke::NONE,
            ));
        }

        painter.add(Shape::line(screen.clone(), Stroke::new(2.0, palette.accent)));
        for pos in &screen {
            painter.circle_filled(*pos, POINT_RADIUS, palette.accent);
        }

        if let Some(hover) = response.hover_pos() {
            let nearest = screen
                .iter()
                .enumerate()
                .min_by(|a, b| (a.1.x - hover.x).abs().total_cmp(&(b.1.x - hover.x).abs()));
            if let Some((i, pos)) = nearest {
                let (date, weight) = &self.points[i];
                painter.text(
                    *pos - Vec2::new(0.0, 10.0),
                    Align2::CENTER_BOTTOM,
                    hover_label(date, *weight),
                    FontId::proportional(13.0),
                    palette.text,
                );
            }
        }
    }
}

/// Maps point index and weight into the plot rectangle.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    rect: Rect,
    count: usize,
    pub y_min: f64,
    pub y_max: f64,
}

impl Geometry {
    pub fn new(rect: Rect, points: &[(String, f64)]) -> Self {
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, w)| (lo.min(*w), hi.max(*w)));

        // y does not start at zero; pad the data range instead
        let (y_min, y_max) = if !lo.is_finite() {
            (0.0, 1.0)
        } else if hi - lo < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            let pad = (hi - lo) * 0.1;
            (lo - pad, hi + pad)
        };

        Geometry {
            rect,
            count: points.len(),
            y_min,
            y_max,
        }
    }

    pub fn x(&self, index: usize) -> f32 {
        if self.count <= 1 {
            return self.rect.center().x;
        }
        let t = index as f32 / (self.count - 1) as f32;
        self.rect.left() + t * self.rect.width()
    }

    pub fn y(&self, weight: f64) -> f32 {
        let t = ((weight - self.y_min) / (self.y_max - self.y_min)) as f32;
        self.rect.bottom() - t * self.rect.height()
    }
}

/// Exact stored value; only axis ticks are rounded.
fn hover_label(date: &str, weight: f64) -> String {
    format!("{date}: {weight}")
}

fn format_weight(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
