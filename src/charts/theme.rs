// Catppuccin Mocha, the subset the charts draw with
use plotters::style::RGBColor;

pub const BASE: RGBColor = RGBColor(30, 30, 46);
pub const TEXT: RGBColor = RGBColor(205, 214, 244);
pub const SURFACE0: RGBColor = RGBColor(49, 50, 68);
pub const SURFACE1: RGBColor = RGBColor(69, 71, 90);
pub const BLUE: RGBColor = RGBColor(137, 180, 250);
pub const YELLOW: RGBColor = RGBColor(249, 226, 175);
pub const MAUVE: RGBColor = RGBColor(203, 166, 247);
