//! Devices screen — searchable, sortable, paged device table with the
//! add/edit form and delete confirmation layered on top.

use std::collections::HashSet;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};
use tui_input::Input;

use switchyard_core::{ConsoleState, Device, DeviceForm, DeviceId, SortField, TablePage};

use super::device_form::{DeviceFormScreen, FormOutcome};
use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::text_input;

/// Delete waiting for a y/n answer.
#[derive(Debug)]
struct PendingDelete {
    id: DeviceId,
    name: String,
}

pub struct DevicesScreen {
    state: ConsoleState,
    /// Row index within the current page.
    selected: usize,
    /// Search buffer while the search bar has focus.
    search: Option<Input>,
    confirm: Option<PendingDelete>,
    form: Option<DeviceFormScreen>,
    /// Set once the first load answered, so an empty table reads as empty.
    loaded: bool,
    /// Deletes in flight; `d` on any of these devices is ignored.
    deleting: HashSet<DeviceId>,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self {
            state: ConsoleState::new(),
            selected: 0,
            search: None,
            confirm: None,
            form: None,
            loaded: false,
            deleting: HashSet::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    fn selected_device(&self) -> Option<&Device> {
        self.state.page().rows.get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let rows = self.state.page().rows.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn move_selection(&mut self, down: bool) {
        self.selected = if down {
            self.selected + 1
        } else {
            self.selected.saturating_sub(1)
        };
        self.clamp_selection();
    }

    /// Forward a save outcome to the form that issued it. A form that is
    /// not saving did not issue it; the failure then stays on the banner.
    fn finish_form(&mut self, succeeded: bool) {
        if !self.form.as_ref().is_some_and(|f| f.form().is_saving()) {
            return;
        }
        if succeeded {
            self.form = None;
        } else if let Some(form) = self.form.as_mut() {
            // Shown inside the modal instead of the banner
            let message = self.state.error.take().unwrap_or_default();
            form.form_mut().finish_submit(Err(message));
        }
    }

    // ── Key handling per mode ───────────────────────────────────────

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let form = self.form.as_mut()?;
        let mode = form.form().mode();
        match form.handle_key(key) {
            FormOutcome::Continue => None,
            FormOutcome::Cancel => {
                self.form = None;
                None
            }
            FormOutcome::Submit(device) => Some(Action::Submit { mode, device }),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                let pending = self.confirm.take()?;
                self.deleting.insert(pending.id.clone());
                Some(Action::Delete(pending.id))
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.confirm = None;
                None
            }
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(input) = self.search.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Enter => self.search = None,
            KeyCode::Esc => {
                self.search = None;
                self.state.view.set_search("");
                self.selected = 0;
            }
            _ => {
                if text_input::edit(input, key) {
                    self.state.view.set_search(input.value());
                    self.selected = 0;
                }
            }
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('/') => {
                self.search = Some(Input::new(self.state.view.search().to_owned()));
            }
            KeyCode::Char('n') => self.state.view.sort_by(SortField::Name),
            KeyCode::Char('i') => self.state.view.sort_by(SortField::Ip),
            KeyCode::Char('l') | KeyCode::Right => {
                let total = self.state.page().total_pages;
                self.state.view.next_page(total);
                self.selected = 0;
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.state.view.prev_page();
                self.selected = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
            KeyCode::Char('a') => {
                self.form = Some(DeviceFormScreen::new(DeviceForm::create()));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let form = self.selected_device().map(DeviceForm::edit)?;
                self.form = Some(DeviceFormScreen::new(form));
            }
            KeyCode::Char('d') => {
                let pending = self.selected_device().map(|d| PendingDelete {
                    id: d.id.clone(),
                    name: d.name.clone(),
                })?;
                if self.deleting.contains(&pending.id) {
                    return None;
                }
                self.confirm = Some(pending);
            }
            KeyCode::Char('r') => return Some(Action::Reload),
            KeyCode::Esc => self.state.dismiss_error(),
            _ => {}
        }
        None
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_search_line(&self, frame: &mut Frame, area: Rect) {
        let [label_area, input_area, sort_area] = Layout::horizontal([
            Constraint::Length(9),
            Constraint::Min(10),
            Constraint::Length(16),
        ])
        .areas(area);

        let label_style = if self.search.is_some() {
            theme::key_hint_key()
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        frame.render_widget(Paragraph::new(" Search: ").style(label_style), label_area);

        if let Some(ref input) = self.search {
            text_input::render(
                frame,
                input_area,
                input,
                Style::default().fg(theme::NEON_CYAN),
                true,
            );
        } else {
            let query = self.state.view.search();
            let (text, style) = if query.is_empty() {
                ("[all]", Style::default().fg(theme::BORDER_GRAY))
            } else {
                (query, Style::default().fg(theme::NEON_CYAN))
            };
            frame.render_widget(Paragraph::new(text).style(style), input_area);
        }

        let sort = Line::from(vec![
            Span::styled("Sort: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!(
                    "[{} {}]",
                    self.state.view.sort_field(),
                    self.state.view.sort_order().arrow()
                ),
                Style::default().fg(theme::NEON_CYAN),
            ),
        ]);
        frame.render_widget(Paragraph::new(sort), sort_area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, page: &TablePage<'_>) {
        let header = Row::new(
            ["Name", "IP", "Connections", "VLANs"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let rows: Vec<Row> = page
            .rows
            .iter()
            .enumerate()
            .map(|(i, dev)| {
                let is_selected = i == self.selected;
                let prefix = if is_selected { "▸ " } else { "  " };
                let connections = or_dash(&dev.connections().collect::<Vec<_>>().join(", "));
                let vlans = or_dash(
                    &dev.vlan_ids()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                );
                let deleting = self.deleting.contains(&dev.id);
                let name_modifier = if deleting {
                    Modifier::CROSSED_OUT
                } else if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                };

                Row::new(vec![
                    Cell::from(format!("{prefix}{}", or_dash(&dev.name))).style(
                        Style::default()
                            .fg(theme::NEON_CYAN)
                            .add_modifier(name_modifier),
                    ),
                    Cell::from(or_dash(&dev.ip)).style(Style::default().fg(theme::CORAL)),
                    Cell::from(connections),
                    Cell::from(vlans),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Length(16),
            Constraint::Min(24),
            Constraint::Length(18),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = TableState::default().with_selected(if page.rows.is_empty() {
            None
        } else {
            Some(self.selected)
        });
        frame.render_stateful_widget(table, area, &mut state);

        if page.rows.is_empty() {
            let message = if !self.loaded {
                "Loading devices…"
            } else if page.matched == 0 && !self.state.devices.is_empty() {
                "No devices match the search"
            } else {
                "No devices yet, press a to add one"
            };
            let [_, body] =
                Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);
            frame.render_widget(
                Paragraph::new(message)
                    .style(theme::key_hint())
                    .centered(),
                body,
            );
        }
    }

    fn render_confirm(frame: &mut Frame, area: Rect, pending: &PendingDelete) {
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 5u16.min(area.height);
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Delete device ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ERROR_RED))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let text = vec![
            Line::from(format!(" Delete {} ({})?", or_dash(&pending.name), pending.id)),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("delete  ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("keep", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }
}

impl Default for DevicesScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "─".into()
    } else {
        value.to_owned()
    }
}

impl Component for DevicesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = if self.form.is_some() {
            self.handle_form_key(key)
        } else if self.confirm.is_some() {
            self.handle_confirm_key(key)
        } else if self.search.is_some() {
            self.handle_search_key(key);
            None
        } else {
            self.handle_table_key(key)
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Loaded(outcome) => {
                self.state.on_loaded(outcome);
                self.loaded = true;
                self.clamp_selection();
            }
            Action::Created(outcome) => {
                let ok = self.state.on_created(outcome);
                self.finish_form(ok);
            }
            Action::Updated(outcome) => {
                let ok = self.state.on_updated(outcome);
                self.finish_form(ok);
            }
            Action::Deleted { id, outcome } => {
                self.state.on_deleted(&id, outcome);
                self.deleting.remove(&id);
                self.clamp_selection();
            }
            _ => {}
        }
        Ok(None)
    }

    fn captures_input(&self) -> bool {
        self.form.is_some() || self.confirm.is_some() || self.search.is_some()
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let page = self.state.page();
        let title = format!(" Devices ({}) ", self.state.devices.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let banner_height = u16::from(self.state.error.is_some());
        let [banner_area, search_area, table_area, footer_area, hints_area] =
            Layout::vertical([
                Constraint::Length(banner_height),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        if let Some(ref error) = self.state.error {
            frame.render_widget(
                Paragraph::new(format!(" ✖ {error}  (Esc to dismiss)"))
                    .style(theme::error_banner()),
                banner_area,
            );
        }

        self.render_search_line(frame, search_area);
        self.render_table(frame, table_area, &page);

        let footer = format!(
            " {} (page {} of {})",
            page.window,
            page.page,
            page.total_pages.max(1)
        );
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().fg(theme::DIM_WHITE)),
            footer_area,
        );

        let hints = Line::from(vec![
            Span::styled(" / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("n/i ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("h/l ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hints_area);

        if let Some(ref pending) = self.confirm {
            Self::render_confirm(frame, area, pending);
        }
        if let Some(ref form) = self.form {
            form.render(frame, area);
        }
    }
}
