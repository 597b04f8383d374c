/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: Split pane, minimal terminal
    Compact,
    /// 60-99 cols: Half-screen
    Normal,
    /// 100-139 cols: Full terminal
    Wide,
    /// 140+ cols: Ultrawide monitor
    UltraWide,
}

/// Narrowest a gallery card may get before dropping a column
pub const MIN_CARD_WIDTH: u16 = 24;

/// Upper bound on gallery columns regardless of width
pub const MAX_GRID_COLUMNS: u16 = 6;

/// Card height in rows: border, title, artist, border
pub const CARD_HEIGHT: u16 = 4;

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }
}

/// Gallery columns for a content width
///
/// Compact terminals always get a single column; wider ones fit as many
/// cards of at least `MIN_CARD_WIDTH` as possible, capped per breakpoint.
pub fn grid_columns(width: u16) -> usize {
    let cap = match Breakpoint::from_width(width) {
        Breakpoint::Compact => 1,
        Breakpoint::Normal => 3,
        Breakpoint::Wide => 4,
        Breakpoint::UltraWide => MAX_GRID_COLUMNS,
    };
    (width / MIN_CARD_WIDTH).clamp(1, cap) as usize
}

/// Whether the detail screen puts the image beside the text
pub fn detail_side_by_side(width: u16) -> bool {
    Breakpoint::from_width(width).at_least(Breakpoint::Wide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(139), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(140), Breakpoint::UltraWide);
    }

    #[test]
    fn at_least_comparisons() {
        let wide = Breakpoint::Wide;
        assert!(wide.at_least(Breakpoint::Compact));
        assert!(wide.at_least(Breakpoint::Normal));
        assert!(wide.at_least(Breakpoint::Wide));
        assert!(!wide.at_least(Breakpoint::UltraWide));
    }

    #[test]
    fn grid_columns_grow_with_width() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(59), 1);
        assert_eq!(grid_columns(60), 2);
        assert_eq!(grid_columns(80), 3);
        assert_eq!(grid_columns(120), 4);
        assert_eq!(grid_columns(150), 6);
        assert_eq!(grid_columns(400), MAX_GRID_COLUMNS as usize);
    }

    #[test]
    fn detail_layout_switches_at_wide() {
        assert!(!detail_side_by_side(99));
        assert!(detail_side_by_side(100));
    }
}
