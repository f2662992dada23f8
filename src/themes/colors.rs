use serde::{Deserialize, Serialize};

pub const RESET: &str = "\x1b[0m";

/// Color depth of the target terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLevel {
    None,
    Ansi,
    Ansi256,
    #[serde(rename = "truecolor")]
    TrueColor,
}

impl ColorLevel {
    pub fn reset(self) -> &'static str {
        match self {
            ColorLevel::None => "",
            _ => RESET,
        }
    }
}

/// xterm's default 16-color palette.
const ANSI16_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

pub fn parse_color(color: &str) -> (u8, u8, u8) {
    let hex = color.trim_start_matches('#');
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    if expanded.len() != 6 || !expanded.is_ascii() {
        return (255, 255, 255);
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16).unwrap_or(255)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

fn distance((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> u32 {
    let dr = r1 as i32 - r2 as i32;
    let dg = g1 as i32 - g2 as i32;
    let db = b1 as i32 - b2 as i32;
    (dr * dr + dg * dg + db * db) as u32
}

fn nearest_cube_index(channel: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (**level as i32 - channel as i32).abs())
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Nearest xterm-256 index, choosing between the 6x6x6 cube and the gray ramp.
pub fn rgb_to_ansi256(rgb: (u8, u8, u8)) -> u8 {
    let (r, g, b) = rgb;
    let (ri, gi, bi) = (
        nearest_cube_index(r),
        nearest_cube_index(g),
        nearest_cube_index(b),
    );
    let cube_rgb = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    let avg = (r as u32 + g as u32 + b as u32) / 3;
    let gray_step = if avg <= 8 {
        0
    } else {
        ((avg - 8) / 10).min(23)
    };
    let gray_value = (8 + gray_step * 10) as u8;
    let gray_index = 232 + gray_step as usize;

    if distance(rgb, (gray_value, gray_value, gray_value)) < distance(rgb, cube_rgb) {
        gray_index as u8
    } else {
        cube_index as u8
    }
}

/// Index into the 16-color palette (0-7 normal, 8-15 bright).
pub fn rgb_to_ansi16(rgb: (u8, u8, u8)) -> u8 {
    ANSI16_PALETTE
        .iter()
        .enumerate()
        .min_by_key(|(_, candidate)| distance(rgb, **candidate))
        .map(|(idx, _)| idx as u8)
        .unwrap_or(7)
}

fn ansi16_code(index: u8, background: bool) -> u8 {
    let base = if index < 8 { 30 + index } else { 90 + index - 8 };
    if background {
        base + 10
    } else {
        base
    }
}

fn encode(color: &str, level: ColorLevel, background: bool) -> String {
    let rgb = parse_color(color);
    match level {
        ColorLevel::None => String::new(),
        ColorLevel::Ansi => format!("\x1b[{}m", ansi16_code(rgb_to_ansi16(rgb), background)),
        ColorLevel::Ansi256 => {
            let layer = if background { 48 } else { 38 };
            format!("\x1b[{};5;{}m", layer, rgb_to_ansi256(rgb))
        }
        ColorLevel::TrueColor => {
            let layer = if background { 48 } else { 38 };
            format!("\x1b[{};2;{};{};{}m", layer, rgb.0, rgb.1, rgb.2)
        }
    }
}

pub fn encode_bg(color: &str, level: ColorLevel) -> String {
    encode(color, level, true)
}

pub fn encode_fg(color: &str, level: ColorLevel) -> String {
    encode(color, level, false)
}

/// Reinterpret an encoded background escape as the matching foreground escape.
pub fn bg_to_fg(code: &str, level: ColorLevel) -> String {
    let Some(body) = code
        .strip_prefix("\x1b[")
        .and_then(|rest| rest.strip_suffix('m'))
    else {
        return String::new();
    };

    if level == ColorLevel::Ansi {
        return match body.parse::<u8>() {
            Ok(n @ 40..=47) | Ok(n @ 100..=107) => format!("\x1b[{}m", n - 10),
            _ => code.to_string(),
        };
    }

    match body.strip_prefix("48;") {
        Some(rest) => format!("\x1b[38;{}m", rest),
        None => code.to_string(),
    }
}
