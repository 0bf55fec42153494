/*
 * Renderer Module
 *
 * This module puts the simulation on screen. NannouSurface implements the
 * Surface trait on top of nannou's Draw API, converting surface-local
 * coordinates (top-left origin, y down) to nannou's centred, y-up space.
 *
 * The window is never cleared after the first frame: each frame only adds
 * strokes on top of the last one, and the simulation's translucent fade
 * rectangle is what turns the strokes into fading trails.
 */

use std::f32::consts::TAU;

use log::warn;
use nannou::color::Rgba;
use nannou::prelude::*;

use crate::app::Model;
use crate::surface::Surface;
use crate::vector::Vector;

const STROKE_WEIGHT: f32 = 1.0;
// Segments used to approximate a partial arc
const ARC_SEGMENTS: usize = 24;

#[derive(Clone, Debug)]
enum PathElement {
    MoveTo(Vector),
    LineTo(Vector),
    Arc {
        centre: Vector,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
}

pub struct NannouSurface<'a> {
    draw: &'a Draw,
    window_rect: Rect,
    stroke_colour: Rgba,
    fill_colour: Rgba,
    path: Vec<PathElement>,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, window_rect: Rect) -> Self {
        Self {
            draw,
            window_rect,
            stroke_colour: rgba(1.0, 1.0, 1.0, 1.0),
            fill_colour: rgba(1.0, 1.0, 1.0, 1.0),
            path: Vec::new(),
        }
    }

    // Convert a surface-local point to nannou window space
    fn to_window(&self, point: Vector) -> Point2 {
        pt2(
            self.window_rect.left() + point.x,
            self.window_rect.top() - point.y,
        )
    }

    // Split the current path into polylines, one per move_to or arc.
    // Full circles are left out when `skip_circles` is set.
    fn subpaths(&self, skip_circles: bool) -> Vec<Vec<Point2>> {
        let mut subpaths: Vec<Vec<Point2>> = Vec::new();
        for element in &self.path {
            match *element {
                PathElement::MoveTo(p) => subpaths.push(vec![self.to_window(p)]),
                PathElement::LineTo(p) => match subpaths.last_mut() {
                    Some(current) => current.push(self.to_window(p)),
                    None => subpaths.push(vec![self.to_window(p)]),
                },
                PathElement::Arc {
                    centre,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    if skip_circles && is_full_circle(start_angle, end_angle) {
                        continue;
                    }
                    let points = (0..=ARC_SEGMENTS).map(|i| {
                        let t = start_angle + (end_angle - start_angle) * i as f32 / ARC_SEGMENTS as f32;
                        self.to_window(centre + Vector::new(t.cos(), t.sin()).scale(radius))
                    });
                    subpaths.push(points.collect());
                }
            }
        }
        subpaths
    }
}

fn is_full_circle(start_angle: f32, end_angle: f32) -> bool {
    (end_angle - start_angle).abs() >= TAU
}

impl Surface for NannouSurface<'_> {
    fn width(&self) -> f32 {
        self.window_rect.w()
    }

    fn height(&self) -> f32 {
        self.window_rect.h()
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Vector) {
        self.path.push(PathElement::MoveTo(point));
    }

    fn line_to(&mut self, point: Vector) {
        self.path.push(PathElement::LineTo(point));
    }

    fn arc(&mut self, centre: Vector, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.push(PathElement::Arc {
            centre,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        for points in self.subpaths(false) {
            if points.len() < 2 {
                continue;
            }
            self.draw
                .polyline()
                .weight(STROKE_WEIGHT)
                .color(self.stroke_colour)
                .points(points);
        }
    }

    fn fill(&mut self) {
        // Full circles are drawn natively, everything else as polygons
        for element in &self.path {
            if let PathElement::Arc {
                centre,
                radius,
                start_angle,
                end_angle,
            } = *element
            {
                if is_full_circle(start_angle, end_angle) {
                    self.draw
                        .ellipse()
                        .xy(self.to_window(centre))
                        .radius(radius)
                        .color(self.fill_colour);
                }
            }
        }

        for points in self.subpaths(true) {
            if points.len() < 3 {
                continue;
            }
            self.draw.polygon().color(self.fill_colour).points(points);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let centre = self.to_window(Vector::new(x + width / 2.0, y + height / 2.0));
        self.draw
            .rect()
            .xy(centre)
            .w_h(width, height)
            .color(self.fill_colour);
    }

    fn set_stroke_colour(&mut self, colour: Rgba) {
        self.stroke_colour = colour;
    }

    fn set_fill_colour(&mut self, colour: Rgba) {
        self.fill_colour = colour;
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    // Start from black once; afterwards the previous frame is kept
    if frame.nth() == 0 || model.clear_frame {
        draw.background().color(BLACK);
    }

    let mut surface = NannouSurface::new(&draw, app.window_rect());
    model.frame_commands.replay(&mut surface);

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!("Failed to draw frame: {:?}", err);
    }

    if model.show_controls {
        if let Err(err) = model.egui.draw_to_frame(&frame) {
            warn!("Failed to draw controls: {:?}", err);
        }
    }
}
