//! Full-screen image browser
//!
//! Lists sub-directories and supported images of the current directory,
//! with type-to-filter search. Enter descends into a directory or picks a
//! file, Backspace goes up, Esc cancels.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Terminal,
};

use crate::convert::is_supported_image;

/// Result of the browser interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseResult {
    Selected(PathBuf),
    Cancelled,
}

/// A file or directory entry in the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// File size in bytes (files only)
    pub size: Option<u64>,
}

impl BrowserEntry {
    fn label(&self) -> String {
        match (self.is_dir, self.size) {
            (true, _) if self.name == ".." => "..  (go up)".to_string(),
            (true, _) => format!("{}/", self.name),
            (false, Some(size)) => format!("{}  ({})", self.name, format_file_size(size)),
            (false, None) => self.name.clone(),
        }
    }
}

struct BrowserState {
    current_dir: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
    search: String,
    filtered: Vec<usize>,
}

impl BrowserState {
    fn new(start_dir: PathBuf) -> Self {
        let entries = list_directory(&start_dir);
        let filtered: Vec<usize> = (0..entries.len()).collect();
        Self {
            current_dir: start_dir,
            entries,
            selected: 0,
            search: String::new(),
            filtered,
        }
    }

    fn refresh(&mut self) {
        self.entries = list_directory(&self.current_dir);
        self.search.clear();
        self.filtered = (0..self.entries.len()).collect();
        self.selected = 0;
    }

    fn navigate_to(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.refresh();
    }

    fn update_filter(&mut self) {
        let search_lower = self.search.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name.to_lowercase().contains(&search_lower))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }
}

/// Raw mode and the alternate screen, restored on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Run the interactive image browser starting at `start_dir`
pub fn run_file_browser(start_dir: &Path) -> Result<BrowseResult> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    run_browser_loop(&mut terminal, start_dir.to_path_buf())
}

fn run_browser_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    start_dir: PathBuf,
) -> Result<BrowseResult> {
    let mut state = BrowserState::new(start_dir);

    loop {
        terminal.draw(|frame| {
            draw_browser(frame, &state);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(result) = handle_key(&mut state, key) {
                return result;
            }
        }
    }
}

/// Apply one key press; `Some` ends the browser
fn handle_key(state: &mut BrowserState, key: KeyEvent) -> Option<Result<BrowseResult>> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Err(io::Error::from(io::ErrorKind::Interrupted).into()));
        }
        KeyCode::Enter => {
            if !state.filtered.is_empty() {
                let idx = state.filtered[state.selected];
                let entry = &state.entries[idx];
                if entry.is_dir {
                    state.navigate_to(entry.path.clone());
                } else {
                    return Some(Ok(BrowseResult::Selected(entry.path.clone())));
                }
            }
        }
        KeyCode::Backspace => {
            if state.search.is_empty() {
                if let Some(parent) = state.current_dir.parent() {
                    state.navigate_to(parent.to_path_buf());
                }
            } else {
                state.search.pop();
                state.update_filter();
            }
        }
        KeyCode::Esc => {
            // First Esc clears an active filter
            if state.search.is_empty() {
                return Some(Ok(BrowseResult::Cancelled));
            }
            state.search.clear();
            state.update_filter();
        }
        KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.selected + 1 < state.filtered.len() {
                state.selected += 1;
            }
        }
        KeyCode::PageUp => {
            state.selected = state.selected.saturating_sub(10);
        }
        KeyCode::PageDown => {
            state.selected = (state.selected + 10).min(state.filtered.len().saturating_sub(1));
        }
        KeyCode::Home => {
            state.selected = 0;
        }
        KeyCode::End => {
            state.selected = state.filtered.len().saturating_sub(1);
        }
        KeyCode::Char(c) if !c.is_control() => {
            state.search.push(c);
            state.update_filter();
        }
        _ => {}
    }
    None
}

/// List directory contents: visible sub-directories and supported images.
///
/// A `..` entry comes first unless `path` is the filesystem root, then
/// directories, then files, each group sorted case-insensitively.
pub fn list_directory(path: &Path) -> Vec<BrowserEntry> {
    let mut entries = Vec::new();

    if let Some(parent) = path.parent() {
        if parent != path {
            entries.push(BrowserEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                size: None,
            });
        }
    }

    if let Ok(read_dir) = std::fs::read_dir(path) {
        for entry in read_dir.flatten() {
            let entry_path = entry.path();
            let is_dir = entry_path.is_dir();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') {
                continue;
            }

            if is_dir {
                entries.push(BrowserEntry {
                    name,
                    path: entry_path,
                    is_dir,
                    size: None,
                });
            } else if is_supported_image(&entry_path) {
                let size = entry.metadata().ok().map(|m| m.len());
                entries.push(BrowserEntry {
                    name,
                    path: entry_path,
                    is_dir,
                    size,
                });
            }
        }
    }

    entries.sort_by(|a, b| {
        if a.name == ".." {
            return std::cmp::Ordering::Less;
        }
        if b.name == ".." {
            return std::cmp::Ordering::Greater;
        }
        match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    });

    entries
}

/// Human-readable file size: `512B`, `1.5KB`, `2.0MB`
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{}B", bytes)
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    }
}

fn truncate_path_start(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len || max_len < 4 {
        path.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

fn draw_browser(frame: &mut Frame, state: &BrowserState) {
    let area = frame.area();

    let header_lines = vec![
        Line::from(Span::styled(
            "ffwizard",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "Batch image conversion with FFmpeg",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let header_height = 3u16;

    let popup_width = 66u16;
    let popup_height = 22u16;
    let hint_height = 1u16;
    let total_height = header_height + popup_height + hint_height;

    let x = area.width.saturating_sub(popup_width) / 2;
    let y = area.height.saturating_sub(total_height) / 2;

    let header_area = Rect::new(x, y, popup_width.min(area.width), header_height.min(area.height));
    frame.render_widget(
        Paragraph::new(header_lines).alignment(Alignment::Center),
        header_area,
    );

    let popup_y = y + header_height;
    let popup_area = Rect::new(
        x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height.saturating_sub(popup_y)),
    );

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Image ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Current path
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // Entry list
            Constraint::Length(2), // Help text
        ])
        .split(inner);

    let path_str = state.current_dir.display().to_string();
    let max_path_len = (chunks[0].width as usize).saturating_sub(12);
    let path_line = Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled("Current: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_path_start(&path_str, max_path_len),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(path_line), chunks[0]);

    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Filter ")
        .title_style(Style::default().fg(Color::DarkGray));

    let search_content = if state.search.is_empty() {
        Line::from(vec![
            Span::styled("Type to filter...", Style::default().fg(Color::DarkGray)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![
            Span::styled(&state.search, Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    };
    frame.render_widget(Paragraph::new(search_content).block(search_block), chunks[1]);

    let list_height = chunks[2].height as usize;
    let start_idx = if state.selected >= list_height {
        state.selected - list_height + 1
    } else {
        0
    };

    let items: Vec<ListItem> = state
        .filtered
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(list_height)
        .map(|(display_idx, &entry_idx)| {
            let entry = &state.entries[entry_idx];
            let icon = if entry.is_dir { "▸ " } else { "  " };

            let style = if display_idx == state.selected {
                if entry.is_dir {
                    Style::default().fg(Color::Black).bg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Black).bg(Color::Green).bold()
                }
            } else if entry.is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(format!("  {}{}", icon, entry.label())).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.saturating_sub(start_idx)));
    frame.render_stateful_widget(List::new(items), chunks[2], &mut list_state);

    let help_text = Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Backspace", Style::default().fg(Color::Cyan)),
        Span::styled(" up  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), chunks[3]);

    if !state.filtered.is_empty() && popup_area.width > 12 && popup_area.height > 1 {
        let count_text = format!(" {}/{} ", state.selected + 1, state.filtered.len());
        let text_len = count_text.len() as u16;
        let count_area = Rect::new(
            popup_area.x + popup_area.width - text_len - 1,
            popup_area.y + popup_area.height - 1,
            text_len,
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(count_text, Style::default().fg(Color::DarkGray))),
            count_area,
        );
    }

    if state.filtered.is_empty() {
        let msg = if state.search.is_empty() {
            "No images or folders in this directory"
        } else {
            "No matching entries"
        };
        let msg_area = Rect::new(
            chunks[2].x + 2,
            chunks[2].y + chunks[2].height / 2,
            chunks[2].width.saturating_sub(4),
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default().fg(Color::DarkGray).italic(),
            )))
            .alignment(Alignment::Center),
            msg_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512B");
        assert_eq!(format_file_size(1536), "1.5KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0MB");
    }

    #[test]
    fn test_list_directory_filters_and_orders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("Zeta")).unwrap();
        std::fs::create_dir(root.join("alpha")).unwrap();
        std::fs::create_dir(root.join(".hidden")).unwrap();
        std::fs::write(root.join("b.PNG"), [0u8; 10]).unwrap();
        std::fs::write(root.join("a.jpg"), [0u8; 2048]).unwrap();
        std::fs::write(root.join("notes.txt"), "x").unwrap();
        std::fs::write(root.join(".secret.png"), "x").unwrap();

        let entries = list_directory(root);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "alpha", "Zeta", "a.jpg", "b.PNG"]);

        let jpg = entries.iter().find(|e| e.name == "a.jpg").unwrap();
        assert_eq!(jpg.size, Some(2048));
        assert_eq!(jpg.label(), "a.jpg  (2.0KB)");
    }

    fn press(state: &mut BrowserState, code: KeyCode) -> Option<Result<BrowseResult>> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut BrowserState, text: &str) {
        for c in text.chars() {
            assert!(press(state, KeyCode::Char(c)).is_none());
        }
    }

    fn browse_fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("alpha")).unwrap();
        std::fs::create_dir(root.join("photos")).unwrap();
        std::fs::write(root.join("photos").join("cat.png"), "x").unwrap();
        std::fs::write(root.join("dog.jpg"), "x").unwrap();
        temp_dir
    }

    fn visible_names(state: &BrowserState) -> Vec<&str> {
        state
            .filtered
            .iter()
            .map(|&i| state.entries[i].name.as_str())
            .collect()
    }

    #[test]
    fn test_typing_filters_entries() {
        let temp_dir = browse_fixture();
        let mut state = BrowserState::new(temp_dir.path().to_path_buf());
        assert_eq!(visible_names(&state), vec!["..", "alpha", "photos", "dog.jpg"]);

        type_text(&mut state, "PHO");
        assert_eq!(state.search, "PHO");
        assert_eq!(visible_names(&state), vec!["photos"]);
    }

    #[test]
    fn test_backspace_edits_filter_then_goes_up() {
        let temp_dir = browse_fixture();
        let root = temp_dir.path().to_path_buf();
        let mut state = BrowserState::new(root.clone());

        type_text(&mut state, "dx");
        assert!(visible_names(&state).is_empty());

        assert!(press(&mut state, KeyCode::Backspace).is_none());
        assert_eq!(state.search, "d");
        assert_eq!(visible_names(&state), vec!["dog.jpg"]);
        assert_eq!(state.current_dir, root);

        press(&mut state, KeyCode::Backspace);
        assert!(state.search.is_empty());
        assert_eq!(state.current_dir, root);

        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.current_dir, root.parent().unwrap());
    }

    #[test]
    fn test_esc_clears_filter_then_cancels() {
        let temp_dir = browse_fixture();
        let mut state = BrowserState::new(temp_dir.path().to_path_buf());

        type_text(&mut state, "alp");
        assert!(press(&mut state, KeyCode::Esc).is_none());
        assert!(state.search.is_empty());
        assert_eq!(visible_names(&state).len(), 4);

        match press(&mut state, KeyCode::Esc) {
            Some(Ok(BrowseResult::Cancelled)) => {}
            other => panic!("expected cancel, got {:?}", other),
        }
    }

    #[test]
    fn test_enter_descends_into_directory_then_selects_file() {
        let temp_dir = browse_fixture();
        let photos = temp_dir.path().join("photos");
        let mut state = BrowserState::new(temp_dir.path().to_path_buf());

        type_text(&mut state, "photos");
        assert!(press(&mut state, KeyCode::Enter).is_none());
        assert_eq!(state.current_dir, photos);
        assert!(state.search.is_empty(), "navigating resets the filter");
        assert_eq!(visible_names(&state), vec!["..", "cat.png"]);

        press(&mut state, KeyCode::Down);
        match press(&mut state, KeyCode::Enter) {
            Some(Ok(BrowseResult::Selected(path))) => assert_eq!(path, photos.join("cat.png")),
            other => panic!("expected selection, got {:?}", other),
        }
    }

    #[test]
    fn test_ctrl_c_interrupts_instead_of_filtering() {
        let temp_dir = browse_fixture();
        let mut state = BrowserState::new(temp_dir.path().to_path_buf());

        let result = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        let err = match result {
            Some(Err(err)) => err,
            other => panic!("expected interrupt, got {:?}", other),
        };
        assert_eq!(
            err.downcast_ref::<io::Error>().map(|e| e.kind()),
            Some(io::ErrorKind::Interrupted)
        );
        assert!(state.search.is_empty());
    }

    #[test]
    fn test_terminal_guard_leaves_raw_mode() {
        // Without a terminal `enter` fails part way; either way raw mode is off afterwards
        if let Ok(guard) = TerminalGuard::enter() {
            drop(guard);
        }
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap());
    }

    #[test]
    fn test_truncate_path_start() {
        assert_eq!(truncate_path_start("/short", 20), "/short");
        assert_eq!(truncate_path_start("/a/very/long/path", 10), "...ng/path");
    }
}
