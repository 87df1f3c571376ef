//! Branch color palette parsing

use anyhow::{bail, Context, Result};
use console::Style;

pub const DEFAULT_BRANCH_COLORS: &str = "#7272A8, #ff00ff, #b00b69, #e5ebb7, #11bf7b";

/// Parse a comma separated color list into lane styles.
///
/// Each entry is `#rrggbb` (mapped to the nearest xterm-256 color), a
/// number in `0..=255`, or a console style string such as `red` or
/// `green.bold`. At least two colors are required.
pub fn parse_palette(colors: &str) -> Result<Vec<Style>> {
    let styles = colors
        .split(',')
        .map(str::trim)
        .map(parse_color)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Invalid branch colors '{}'", colors))?;
    if styles.len() < 2 {
        bail!("Need at least 2 branch colors, got {}", styles.len());
    }
    Ok(styles)
}

fn parse_color(token: &str) -> Result<Style> {
    if token.is_empty() {
        bail!("empty color entry");
    }
    if let Some(hex) = token.strip_prefix('#') {
        let (r, g, b) = parse_hex(hex).with_context(|| format!("bad hex color '{}'", token))?;
        return Ok(Style::new().color256(rgb_to_ansi256(r, g, b)));
    }
    if let Ok(n) = token.parse::<u8>() {
        return Ok(Style::new().color256(n));
    }
    let style = Style::from_dotted_str(token);
    if style == Style::new() {
        bail!("unknown color '{}'", token);
    }
    Ok(style)
}

fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("expected 6 hex digits");
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// Nearest color in the xterm 256-color table (6x6x6 cube or gray ramp).
fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((u16::from(r) - 8) * 24 / 247) as u8;
    }
    let cube = |v: u8| ((u16::from(v) * 5 + 127) / 255) as u8;
    16 + 36 * cube(r) + 6 * cube(g) + cube(b)
}
