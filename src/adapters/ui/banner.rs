//! Leafy ASCII banner with gradient (ZEROWASTE).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Leaf Green (#16a34a).
const LEAF_GREEN: (u8, u8, u8) = (0x16, 0xa3, 0x4a);
/// Fresh Lime (#a3e635).
const FRESH_LIME: (u8, u8, u8) = (0xa3, 0xe6, 0x35);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "ZEROWASTE" in figlet ASCII with a gradient
/// from Leaf Green to Fresh Lime, then version and the product line.
pub fn print_welcome() {
    let mut out = stdout();
    let font = FIGfont::standard().expect("figlet standard font");
    let figure = font.convert("ZEROWASTE").expect("figlet convert ZEROWASTE");
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(LEAF_GREEN, FRESH_LIME, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: FRESH_LIME.0,
        g: FRESH_LIME.1,
        b: FRESH_LIME.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Zero Waste Grocery\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
