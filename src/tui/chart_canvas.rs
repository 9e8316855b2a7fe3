//! Chart canvas widget: the concrete chart surface.
//!
//! Renders the marker row from the positional projection and translates
//! raw mouse input into the surface's gesture events. The canvas owns only
//! ephemeral render and drag state; the sequence itself always arrives as
//! a freshly regenerated projection.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::chart::{AxisBounds, DragSpec, SurfaceEvent};
use crate::models::{ElementId, ProjectedPoint};
use crate::tui::Theme;

/// Width of the marker glyph in cells.
const MARKER_WIDTH: u16 = 3;

/// In-flight drag tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    id: ElementId,
    origin_column: u16,
    current_column: u16,
    moved: bool,
}

/// The marker-row chart widget.
#[derive(Debug, Default)]
pub struct ChartCanvas {
    /// Plot area inside the borders, captured at render time
    inner: Option<Rect>,
    drag: Option<DragState>,
}

impl ChartCanvas {
    /// Creates an idle canvas.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: None,
            drag: None,
        }
    }

    /// The element currently being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<ElementId> {
        self.drag.map(|drag| drag.id)
    }

    /// Abandons any in-flight drag (e.g. when a popup opens).
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Screen cell at the center of a marker slot, for anchoring popups.
    #[must_use]
    pub fn marker_anchor(&self, count: usize, position: usize) -> Option<(u16, u16)> {
        let inner = self.inner?;
        if position >= count || inner.height < 3 {
            return None;
        }
        let bounds = AxisBounds::for_count(count);
        let column = screen_column(inner, &bounds, position as f64);
        Some((column, marker_row(inner)))
    }

    /// Render the chart: baseline, markers, labels, and order numbers.
    ///
    /// `cursor` is the keyboard-highlighted position, if any.
    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        projection: &[ProjectedPoint],
        theme: &Theme,
        cursor: Option<usize>,
    ) {
        let block = Block::default()
            .title(" Sequence ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.primary).bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.inner = Some(inner);

        if projection.is_empty() {
            let hint = Paragraph::new("No elements yet. Press 'a' to add one.")
                .style(Style::default().fg(theme.text_muted));
            if inner.height > 0 {
                f.render_widget(hint, Rect { height: 1, ..inner });
            }
            return;
        }

        if inner.height < 3 || (inner.width as usize) < projection.len() * 4 {
            let hint = Paragraph::new("Terminal too small to draw the sequence")
                .style(Style::default().fg(theme.warning));
            if inner.height > 0 {
                f.render_widget(hint, Rect { height: 1, ..inner });
            }
            return;
        }

        let bounds = AxisBounds::for_count(projection.len());
        let row = marker_row(inner);

        // Connecting line underneath the markers
        let baseline = Paragraph::new("─".repeat(inner.width as usize))
            .style(Style::default().fg(theme.text_muted));
        f.render_widget(
            baseline,
            Rect {
                x: inner.x,
                y: row,
                width: inner.width,
                height: 1,
            },
        );

        let slot_width = (f64::from(inner.width) / bounds.span()) as usize;
        for point in projection {
            let mut column = screen_column(inner, &bounds, point.position as f64);
            if self.dragging() == Some(point.id) {
                if let Some(drag) = self.drag {
                    column = drag.current_column;
                }
            }
            let highlighted = cursor == Some(point.position);

            // Marker block
            let marker_style = if highlighted {
                Style::default()
                    .fg(point.color.to_ratatui_color())
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(point.color.to_ratatui_color())
            };
            let marker = Paragraph::new("█".repeat(MARKER_WIDTH as usize)).style(marker_style);
            f.render_widget(marker, centered_cell(inner, column, MARKER_WIDTH, row));

            // Label above
            let label_width = slot_width.saturating_sub(1).max(MARKER_WIDTH as usize);
            let label: String = point.label.chars().take(label_width).collect();
            let label_style = if highlighted {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            f.render_widget(
                Paragraph::new(label.clone()).style(label_style),
                centered_cell(inner, column, label.chars().count() as u16, row - 1),
            );

            // 1-based order number beneath
            let order = format!("#{}", point.order_number);
            f.render_widget(
                Paragraph::new(order.clone()).style(Style::default().fg(theme.text_muted)),
                centered_cell(inner, column, order.len() as u16, row + 1),
            );
        }
    }

    /// Finds the element whose marker band covers the given screen cell.
    #[must_use]
    pub fn hit_test(
        &self,
        projection: &[ProjectedPoint],
        column: u16,
        row: u16,
    ) -> Option<ElementId> {
        let inner = self.inner?;
        if projection.is_empty() || inner.height < 3 {
            return None;
        }
        let center = marker_row(inner);
        if row + 1 < center || row > center + 1 {
            return None;
        }
        let slot = slot_index(inner, projection.len(), column)?;
        projection.get(slot).map(|point| point.id)
    }

    /// Feeds a raw mouse event through the surface's gesture rules.
    ///
    /// A press on a marker arms a potential drag; releasing without motion
    /// is a click, releasing after motion reports a drop with the
    /// continuous target coordinate (clamped to the drag constraint — the
    /// adapter re-validates regardless).
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        projection: &[ProjectedPoint],
    ) -> Option<SurfaceEvent> {
        let inner = self.inner?;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = self.hit_test(projection, event.column, event.row) {
                    self.drag = Some(DragState {
                        id,
                        origin_column: event.column,
                        current_column: event.column,
                        moved: false,
                    });
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = &mut self.drag {
                    let max_column = inner.x + inner.width.saturating_sub(1);
                    drag.current_column = event.column.clamp(inner.x, max_column);
                    if drag.current_column != drag.origin_column {
                        drag.moved = true;
                    }
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let drag = self.drag.take()?;
                if drag.moved {
                    let bounds = AxisBounds::for_count(projection.len());
                    let spec = DragSpec::for_count(projection.len());
                    let target = spec.clamp(axis_position(inner, &bounds, drag.current_column));
                    Some(SurfaceEvent::PointDropped {
                        id: drag.id,
                        target,
                    })
                } else {
                    Some(SurfaceEvent::PointClicked {
                        id: drag.id,
                        column: event.column,
                        row: event.row,
                    })
                }
            }
            _ => None,
        }
    }
}

/// Row the marker blocks sit on.
fn marker_row(inner: Rect) -> u16 {
    inner.y + inner.height / 2
}

/// Columns per axis position unit.
fn x_scale(inner: Rect, bounds: &AxisBounds) -> f64 {
    f64::from(inner.width) / bounds.span()
}

/// Screen column at the center of the given axis position.
fn screen_column(inner: Rect, bounds: &AxisBounds, position: f64) -> u16 {
    let offset = (position - bounds.min) * x_scale(inner, bounds);
    let max_column = inner.x + inner.width.saturating_sub(1);
    (inner.x + offset as u16).min(max_column)
}

/// Continuous axis position under a screen column.
fn axis_position(inner: Rect, bounds: &AxisBounds, column: u16) -> f64 {
    f64::from(column.saturating_sub(inner.x)) / x_scale(inner, bounds) + bounds.min
}

/// Slot index (0-based position) under a screen column.
fn slot_index(inner: Rect, count: usize, column: u16) -> Option<usize> {
    if column < inner.x || column >= inner.x + inner.width {
        return None;
    }
    let slot_width = f64::from(inner.width) / count as f64;
    let slot = (f64::from(column - inner.x) / slot_width) as usize;
    (slot < count).then_some(slot)
}

/// A one-row rect of `width` cells centered on `column`, clamped to `inner`.
fn centered_cell(inner: Rect, column: u16, width: u16, row: u16) -> Rect {
    let width = width.min(inner.width).max(1);
    let half = width / 2;
    let left = column.saturating_sub(half).max(inner.x);
    let right_limit = inner.x + inner.width;
    let left = left.min(right_limit.saturating_sub(width));
    Rect {
        x: left,
        y: row,
        width,
        height: 1,
    }
}
