use ratatui::style::{Style, Stylize};

/// Panels stay bold while they take input; otherwise they fade back.
pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused {
        style.bold()
    } else {
        style.dim().italic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn test_focus_styles() {
        let focused = dim_unless_focused(true, Style::default());
        assert!(focused.add_modifier.contains(Modifier::BOLD));

        let faded = dim_unless_focused(false, Style::default());
        assert!(faded.add_modifier.contains(Modifier::DIM | Modifier::ITALIC));
        assert!(!faded.add_modifier.contains(Modifier::BOLD));
    }
}
