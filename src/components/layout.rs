//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width in columns, shrunk on narrow terminals
const SIDEBAR_WIDTH: u16 = 30;

/// Main screen layout areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub sidebar: Rect,
    /// Module header, tab bar and panel
    pub content: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width - width) / 2;
    let popup_y = area.y + (area.height - height) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    // Content + status line + key hints
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let sidebar_width = SIDEBAR_WIDTH.min(area.width / 3);
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(main_chunks[0]);

    MainLayout {
        sidebar: horizontal_chunks[0],
        content: horizontal_chunks[1],
        status: main_chunks[1],
        help: main_chunks[2],
    }
}

/// Module header, tab bar and panel areas
pub fn split_module_view(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Split a panel into a list column and a detail area
pub fn split_list_detail(area: Rect, list_width: u16) -> (Rect, Rect) {
    let list_width = list_width.min(area.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_partitions_screen() {
        let layout = calculate_main_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.sidebar.width, 30);
        assert_eq!(layout.sidebar.height, 38);
        assert_eq!(layout.content.x, 30);
        assert_eq!(layout.content.width, 90);

        let (header, tabs, panel) = split_module_view(layout.content);
        assert_eq!(header.height, 3);
        assert_eq!(tabs.y, 3);
        assert_eq!(panel.y, 5);
        assert_eq!(layout.status.y, 38);
        assert_eq!(layout.help.y, 39);
    }

    #[test]
    fn test_sidebar_shrinks_on_narrow_terminal() {
        let layout = calculate_main_layout(Rect::new(0, 0, 60, 20));
        assert_eq!(layout.sidebar.width, 20);
    }

    #[test]
    fn test_centered_popup_clamps_to_area() {
        let popup = centered_popup(Rect::new(0, 0, 30, 10), 50, 6);
        assert_eq!(popup, Rect::new(0, 2, 30, 6));
    }
}
