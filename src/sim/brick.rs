//! Brick data model
//!
//! A brick is a rectangular block with a footprint measured in grid units,
//! resting at a vertical height, turned about Y in quarter turns.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::grid::effective_footprint;
use crate::consts::*;

/// Opaque unique brick identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrickId(String);

impl BrickId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BrickId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Horizontal extent of a brick in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Extent along X
    pub width: u32,
    /// Extent along Z
    pub depth: u32,
}

impl Footprint {
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// Footprint after a quarter turn
    #[inline]
    pub fn swapped(self) -> Self {
        Self {
            width: self.depth,
            depth: self.width,
        }
    }

    /// Half extents (x, z) in world units
    #[inline]
    pub fn half_extents(self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.depth as f32 / 2.0)
    }
}

/// Brick types, named by their nominal footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[serde(rename = "1x1")]
    OneByOne,
    #[serde(rename = "1x2")]
    OneByTwo,
    #[serde(rename = "1x3")]
    OneByThree,
    #[serde(rename = "1x4")]
    OneByFour,
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[serde(rename = "2x3")]
    TwoByThree,
    /// The classic brick, and the size used when a save omits the type
    #[default]
    #[serde(rename = "2x4")]
    TwoByFour,
}

impl BrickKind {
    pub const ALL: [BrickKind; 7] = [
        BrickKind::OneByOne,
        BrickKind::OneByTwo,
        BrickKind::OneByThree,
        BrickKind::OneByFour,
        BrickKind::TwoByTwo,
        BrickKind::TwoByThree,
        BrickKind::TwoByFour,
    ];

    /// Nominal (unrotated) footprint
    pub const fn footprint(self) -> Footprint {
        match self {
            BrickKind::OneByOne => Footprint::new(1, 1),
            BrickKind::OneByTwo => Footprint::new(1, 2),
            BrickKind::OneByThree => Footprint::new(1, 3),
            BrickKind::OneByFour => Footprint::new(1, 4),
            BrickKind::TwoByTwo => Footprint::new(2, 2),
            BrickKind::TwoByThree => Footprint::new(2, 3),
            BrickKind::TwoByFour => Footprint::new(2, 4),
        }
    }

    /// Height used for stacking. Every kind shares one layer height.
    pub const fn height(self) -> f32 {
        BRICK_HEIGHT
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickKind::OneByOne => "1x1",
            BrickKind::OneByTwo => "1x2",
            BrickKind::OneByThree => "1x3",
            BrickKind::OneByFour => "1x4",
            BrickKind::TwoByTwo => "2x2",
            BrickKind::TwoByThree => "2x3",
            BrickKind::TwoByFour => "2x4",
        }
    }
}

impl FromStr for BrickKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BrickKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| format!("unknown brick type '{s}'"))
    }
}

impl fmt::Display for BrickKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 24-bit RGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(0xcc, 0x00, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x55, 0xbf);
    pub const GREEN: Color = Color::rgb(0x23, 0x78, 0x41);
    pub const YELLOW: Color = Color::rgb(0xf2, 0xcd, 0x37);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x05, 0x13, 0x1d);
    pub const LIGHT_GREY: Color = Color::rgb(0x9b, 0xa1, 0x9d);

    /// Standard brick palette
    pub const PALETTE: [Color; 7] = [
        Color::RED,
        Color::BLUE,
        Color::GREEN,
        Color::YELLOW,
        Color::WHITE,
        Color::BLACK,
        Color::LIGHT_GREY,
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse `#rrggbb` or `#rgb` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{s}' must start with '#'"))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color '{s}' is not hexadecimal"));
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|e| e.to_string());
        match hex.len() {
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(format!("color '{s}' must be #rrggbb or #rgb")),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Move,
    Rotate,
    Delete,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Move, Tool::Rotate, Tool::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Move => "move",
            Tool::Rotate => "rotate",
            Tool::Delete => "delete",
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    /// Missing in saves from the fixed-size editor
    #[serde(rename = "type", default)]
    pub kind: BrickKind,
    /// Center of the brick; y is the vertical resting height
    pub position: Vec3,
    /// Euler angles; only Y is meaningful
    #[serde(default)]
    pub rotation: Vec3,
    pub color: Color,
}

impl Brick {
    pub fn new(id: BrickId, kind: BrickKind, position: Vec3, color: Color) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: Vec3::ZERO,
            color,
        }
    }

    /// Footprint after applying the Y rotation
    pub fn footprint(&self) -> Footprint {
        effective_footprint(self.kind, self.rotation.y)
    }

    pub fn height(&self) -> f32 {
        self.kind.height()
    }

    /// Height of the top surface
    pub fn top(&self) -> f32 {
        self.position.y + self.height() / 2.0
    }

    /// Full bounding box at the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::for_footprint(self.footprint(), self.height(), self.position)
    }
}
