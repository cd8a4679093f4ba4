use ratatui::style::Color;

/// Theme colors are plain strings: a named color ("LightBlue"), an
/// "r,g,b" triple, or "#rrggbb" hex. Anything unreadable maps to Reset.
pub fn parse_color(s: &str) -> Color {
    let s = s.trim().to_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Color::Reset);
    }
    if s.contains(',') {
        return parse_rgb_triple(&s).unwrap_or(Color::Reset);
    }

    match s.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" => Color::Gray,
        "darkgray" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

fn parse_rgb_triple(s: &str) -> Option<Color> {
    let mut parts = s.split(',');
    let r = parts.next()?.trim().parse().ok()?;
    let g = parts.next()?.trim().parse().ok()?;
    let b = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Color::Rgb(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
