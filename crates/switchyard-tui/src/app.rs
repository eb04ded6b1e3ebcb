//! Application core — event loop, background requests, action dispatch.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use switchyard_core::{Controller, Device, DeviceId, FormMode};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader, Rates};
use crate::screens::DevicesScreen;
use crate::theme;
use crate::tui::Tui;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Top-level application state and event loop.
pub struct App {
    controller: Controller,
    /// The device console; owns the inventory state.
    devices: DevicesScreen,
    running: bool,
    help_visible: bool,
    /// Background requests not yet answered.
    in_flight: usize,
    /// Advances on every tick while requests are in flight.
    spinner_frame: usize,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            devices: DevicesScreen::new(),
            running: true,
            help_visible: false,
            in_flight: 0,
            spinner_frame: 0,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        let mut events = EventReader::spawn(Rates::default());

        // The list is fetched once on start; `r` fetches again.
        self.action_tx.send(Action::Reload)?;

        info!(url = %self.controller.config().url, "TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action
            let action = match event {
                Event::Key(key) => self.handle_key_event(key)?,
                Event::Tick => Some(Action::Tick),
                Event::Resize | Event::Render => Some(Action::Render),
            };
            if let Some(action) = action {
                self.action_tx.send(action)?;
            }

            // 3. Drain and process all queued actions, background outcomes included
            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render);
                self.process_action(action)?;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Text entry and dialogs see every key;
    /// otherwise global bindings win over the screen's.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if !self.devices.captures_input() {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                _ => {}
            }
        }

        self.devices.handle_key_event(key)
    }

    /// Process a single action — run requests, update app state, and hand
    /// outcomes to the screen.
    fn process_action(&mut self, action: Action) -> Result<()> {
        if action.is_outcome() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Tick => {
                if self.in_flight > 0 {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
            Action::Render => {}

            Action::Reload => self.spawn_reload(),
            Action::Submit { mode, device } => self.spawn_submit(mode, device),
            Action::Delete(id) => self.spawn_delete(id),

            outcome => {
                if let Some(follow_up) = self.devices.update(outcome)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }
        Ok(())
    }

    // ── Background requests ─────────────────────────────────────────
    //
    // Each task owns a controller handle and answers with one outcome
    // action. The console state is only touched when that action is
    // processed on this loop.

    fn spawn_reload(&mut self) {
        debug!("fetching devices");
        self.in_flight += 1;
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = controller.fetch_devices().await;
            if tx.send(Action::Loaded(outcome)).is_err() {
                warn!("app closed before the device list arrived");
            }
        });
    }

    fn spawn_submit(&mut self, mode: FormMode, device: Device) {
        debug!(?mode, id = %device.id, "submitting device");
        self.in_flight += 1;
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match mode {
                FormMode::Create => Action::Created(controller.create_device(&device).await),
                FormMode::Edit => Action::Updated(controller.update_device(&device).await),
            };
            if tx.send(action).is_err() {
                warn!("app closed before the save finished");
            }
        });
    }

    fn spawn_delete(&mut self, id: DeviceId) {
        debug!(%id, "deleting device");
        self.in_flight += 1;
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = controller.delete_device(&id).await;
            if tx.send(Action::Deleted { id, outcome }).is_err() {
                warn!("app closed before the delete finished");
            }
        });
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.devices.render(frame, content_area);
        self.render_status_bar(frame, status_area);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Bottom status bar: API URL, request activity, global key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let activity = if self.in_flight > 0 {
            let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
            Span::styled(
                format!("{glyph} working "),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            )
        } else {
            Span::styled("● idle ", Style::default().fg(theme::SUCCESS_GREEN))
        };

        let line = Line::from(vec![
            Span::raw(" "),
            activity,
            Span::styled(
                self.controller.config().url.to_string(),
                Style::default().fg(theme::DIM_WHITE),
            ),
            Span::styled(" │ ? help  q quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 22u16.min(area.height.saturating_sub(2));
        let help_area = Rect::new(
            area.x + area.width.saturating_sub(help_width) / 2,
            area.y + area.height.saturating_sub(help_height) / 2,
            help_width,
            help_height,
        );

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };
        let entry = |keys: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(text, theme::key_hint()),
            ])
        };

        let help_text = vec![
            section("Table"),
            entry("/", "Search name, IP, link or VLAN id"),
            entry("n / i", "Sort by name / IP (again: reverse)"),
            entry("h / l", "Previous / next page"),
            entry("j / k", "Move selection"),
            entry("a", "Add device"),
            entry("Enter e", "Edit device"),
            entry("d", "Delete device"),
            entry("r", "Reload from the API"),
            entry("Esc", "Dismiss error"),
            Line::from(""),
            section("Form"),
            entry("↑ / ↓", "Previous / next field"),
            entry("← / →", "Cycle a status field"),
            entry("Ctrl+P", "Add port"),
            entry("Ctrl+V", "Add VLAN"),
            entry("Ctrl+X", "Remove port / VLAN under cursor"),
            entry("Ctrl+S", "Save"),
            entry("Esc", "Cancel"),
            Line::from(""),
            Line::from(Span::styled(
                "                    Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
