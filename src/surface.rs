/*
 * Surface Module
 *
 * The Surface trait is the drawing context the simulation renders into. It
 * follows the familiar path-based 2D canvas model: build a path with
 * move_to/line_to/arc, then stroke or fill it with the current colour.
 * Coordinates are surface-local: origin at the top-left, y pointing down.
 *
 * RecordingSurface captures the commands instead of drawing them. The app
 * records a frame during update and replays it onto nannou's Draw in view;
 * tests inspect the recorded commands directly.
 */

use nannou::color::Rgba;

use crate::vector::Vector;

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Vector);
    fn line_to(&mut self, point: Vector);
    // Angles in radians, measured clockwise on screen from the +x axis
    fn arc(&mut self, centre: Vector, radius: f32, start_angle: f32, end_angle: f32);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_stroke_colour(&mut self, colour: Rgba);
    fn set_fill_colour(&mut self, colour: Rgba);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    BeginPath,
    MoveTo(Vector),
    LineTo(Vector),
    Arc {
        centre: Vector,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Stroke,
    Fill,
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    StrokeColour(Rgba),
    FillColour(Rgba),
}

impl DrawCommand {
    // Re-issue this command against another surface
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        match *self {
            DrawCommand::BeginPath => surface.begin_path(),
            DrawCommand::MoveTo(p) => surface.move_to(p),
            DrawCommand::LineTo(p) => surface.line_to(p),
            DrawCommand::Arc {
                centre,
                radius,
                start_angle,
                end_angle,
            } => surface.arc(centre, radius, start_angle, end_angle),
            DrawCommand::Stroke => surface.stroke(),
            DrawCommand::Fill => surface.fill(),
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
            } => surface.fill_rect(x, y, width, height),
            DrawCommand::StrokeColour(c) => surface.set_stroke_colour(c),
            DrawCommand::FillColour(c) => surface.set_fill_colour(c),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            command.apply(target);
        }
    }

    // Number of stroke commands issued; one per drawn trail segment
    pub fn stroke_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Stroke))
    }

    pub fn fill_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Fill))
    }

    pub fn fill_rect_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::FillRect { .. }))
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Vector) {
        self.record(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vector) {
        self.record(DrawCommand::LineTo(point));
    }

    fn arc(&mut self, centre: Vector, radius: f32, start_angle: f32, end_angle: f32) {
        self.record(DrawCommand::Arc {
            centre,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.record(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.record(DrawCommand::Fill);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.record(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_stroke_colour(&mut self, colour: Rgba) {
        self.record(DrawCommand::StrokeColour(colour));
    }

    fn set_fill_colour(&mut self, colour: Rgba) {
        self.record(DrawCommand::FillColour(colour));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::color::rgba;

    #[test]
    fn records_in_order() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.begin_path();
        surface.move_to(Vector::new(1.0, 2.0));
        surface.line_to(Vector::new(3.0, 4.0));
        surface.stroke();

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(Vector::new(1.0, 2.0)),
                DrawCommand::LineTo(Vector::new(3.0, 4.0)),
                DrawCommand::Stroke,
            ]
        );
        assert_eq!(surface.stroke_count(), 1);
        assert_eq!((surface.width(), surface.height()), (100.0, 50.0));
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut source = RecordingSurface::new(10.0, 10.0);
        source.set_fill_colour(rgba(0.0, 0.0, 0.0, 0.05));
        source.fill_rect(0.0, 0.0, 10.0, 10.0);
        source.arc(Vector::new(5.0, 5.0), 2.0, 0.0, std::f32::consts::TAU);
        source.fill();

        let mut target = RecordingSurface::new(10.0, 10.0);
        source.replay(&mut target);
        assert_eq!(source.commands(), target.commands());

        target.clear();
        assert!(target.commands().is_empty());
    }
}
