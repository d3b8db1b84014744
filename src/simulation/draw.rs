//! Drawing intent issued by the renderer
//!
//! The renderer never touches pixels. It records `DrawCommand`s into a
//! `DrawList`, which any backend implementing `DrawSurface` can replay.

use super::map::SceneryKind;
use super::vehicle::CarModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

pub const GRASS: Rgba = Rgba::rgb(0x66, 0xbb, 0x6a);
pub const SKY: Rgba = Rgba::rgb(0x81, 0xd4, 0xfa);
pub const ASPHALT: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
pub const ASPHALT_LIGHT: Rgba = Rgba::rgb(0x3d, 0x3d, 0x3d);
pub const MARKING: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
pub const WATER: Rgba = Rgba::rgb(0x02, 0x77, 0xbd);
pub const BANK: Rgba = Rgba::rgb(0xcd, 0xdc, 0x39);
pub const HEADLIGHT: Rgba = Rgba::rgba(255, 255, 200, 0.6);
pub const SMOKE: Rgba = Rgba::rgba(220, 220, 220, 0.5);

/// How a path outline is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
    /// Dash and gap lengths; `None` is a solid line
    pub dash: Option<[f32; 2]>,
    /// Round caps and joins
    pub round: bool,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
            round: false,
        }
    }

    pub fn rounded(color: Rgba, width: f32) -> Self {
        Self {
            round: true,
            ..Self::solid(color, width)
        }
    }

    pub fn dashed(color: Rgba, width: f32, dash: f32, gap: f32) -> Self {
        Self {
            dash: Some([dash, gap]),
            ..Self::solid(color, width)
        }
    }
}

/// Image the surface is asked to blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Car(CarModel),
    Scenery(SceneryKind),
}

/// One drawing instruction, in the coordinate space left by earlier
/// transform commands
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Push the current transform
    Save,
    /// Pop back to the last saved transform
    Restore,
    Translate { x: f32, y: f32 },
    Rotate { angle: f32 },
    Scale { x: f32, y: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Rgba },
    FillPath { points: Vec<[f32; 2]>, color: Rgba },
    StrokePath { points: Vec<[f32; 2]>, stroke: Stroke },
    FillEllipse { x: f32, y: f32, rx: f32, ry: f32, color: Rgba },
    Blit { sprite: Sprite, x: f32, y: f32, w: f32, h: f32 },
}

/// A 2D drawing backend
pub trait DrawSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, x: f32, y: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn fill_path(&mut self, points: &[[f32; 2]], color: Rgba);
    fn stroke_path(&mut self, points: &[[f32; 2]], stroke: &Stroke);
    fn fill_ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, color: Rgba);
    fn blit(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32);
}

/// Ordered drawing commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprites blitted, in draw order
    pub fn blits(&self) -> impl Iterator<Item = (Sprite, f32, f32, f32, f32)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Blit { sprite, x, y, w, h } => Some((*sprite, *x, *y, *w, *h)),
            _ => None,
        })
    }

    /// Issue every command against `surface`, in order
    pub fn replay(&self, surface: &mut impl DrawSurface) {
        for command in &self.commands {
            match command {
                DrawCommand::Save => surface.save(),
                DrawCommand::Restore => surface.restore(),
                DrawCommand::Translate { x, y } => surface.translate(*x, *y),
                DrawCommand::Rotate { angle } => surface.rotate(*angle),
                DrawCommand::Scale { x, y } => surface.scale(*x, *y),
                DrawCommand::FillRect { x, y, w, h, color } => {
                    surface.fill_rect(*x, *y, *w, *h, *color)
                }
                DrawCommand::FillPath { points, color } => surface.fill_path(points, *color),
                DrawCommand::StrokePath { points, stroke } => surface.stroke_path(points, stroke),
                DrawCommand::FillEllipse { x, y, rx, ry, color } => {
                    surface.fill_ellipse(*x, *y, *rx, *ry, *color)
                }
                DrawCommand::Blit { sprite, x, y, w, h } => surface.blit(*sprite, *x, *y, *w, *h),
            }
        }
    }
}
