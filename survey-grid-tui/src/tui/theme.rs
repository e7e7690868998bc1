use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub header: Color,
    pub highlight: Color,
    pub filtered: Color, // header marker for columns with checked values
    pub checked: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            header: Color::Cyan,
            highlight: Color::Yellow,
            filtered: Color::Magenta,
            checked: Color::LightGreen,
            muted: Color::DarkGray,
            error: Color::Red,
            success: Color::LightGreen,
        }
    }
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            header: Color::Blue,
            highlight: Color::Blue,
            filtered: Color::Magenta,
            checked: Color::Green,
            muted: Color::Gray,
            error: Color::Red,
            success: Color::Green,
        }
    }
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            header: Color::Rgb(129, 161, 193),
            highlight: Color::Rgb(136, 192, 208),
            filtered: Color::Rgb(180, 142, 173),
            checked: Color::Rgb(163, 190, 140),
            muted: Color::Rgb(76, 86, 106),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }
    pub fn catppuccin() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            header: Color::Rgb(137, 220, 235),
            highlight: Color::Rgb(137, 180, 250),
            filtered: Color::Rgb(203, 166, 247),
            checked: Color::Rgb(166, 227, 161),
            muted: Color::Rgb(108, 112, 134),
            error: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 227, 161),
        }
    }
    pub fn colorblind() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            header: Color::Cyan,
            highlight: Color::Yellow,
            filtered: Color::Magenta,
            checked: Color::Rgb(0x00, 0x80, 0xFF), // blue instead of green
            muted: Color::DarkGray,
            error: Color::Rgb(0xFF, 0x8C, 0x00), // orange instead of red
            success: Color::Rgb(0x00, 0x80, 0xFF),
        }
    }
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "nord" => Self::nord(),
            "catppuccin" => Self::catppuccin(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        }
    }
}
