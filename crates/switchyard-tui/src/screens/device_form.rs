//! Device form modal — create or edit one device.
//!
//! Every field of the working copy is listed; the field under the cursor is
//! edited in place. Text changes are applied to the working copy as they are
//! typed, so each row shows the value that would be submitted. A rejected
//! value (e.g. a non-numeric VLAN id) leaves the working copy unchanged and
//! shows the reason; moving off the field restores the accepted value.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tui_input::Input;

use switchyard_core::edit::join_port_list;
use switchyard_core::{Device, DeviceEdit, DeviceForm, FormMode, LinkField, PortField, VlanField};

use crate::theme;
use crate::widgets::text_input;

const LABEL_WIDTH: u16 = 16;

// ── Fields ──────────────────────────────────────────────────────────

/// One editable row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Ip,
    PortLabel(usize),
    PortStatus(usize),
    PortVlan(usize),
    LinkDevice(usize),
    LinkIp(usize),
    LinkPort(usize),
    VlanId(usize),
    VlanName(usize),
    VlanStatus(usize),
    VlanPorts(usize),
    VlanIp(usize),
}

impl FormField {
    /// Rows for `device`, ports before VLANs, each in list order.
    pub fn all(device: &Device) -> Vec<Self> {
        let mut fields = vec![Self::Name, Self::Ip];
        for i in 0..device.ports.len() {
            fields.extend([
                Self::PortLabel(i),
                Self::PortStatus(i),
                Self::PortVlan(i),
                Self::LinkDevice(i),
                Self::LinkIp(i),
                Self::LinkPort(i),
            ]);
        }
        for i in 0..device.vlans.len() {
            fields.extend([
                Self::VlanId(i),
                Self::VlanName(i),
                Self::VlanStatus(i),
                Self::VlanPorts(i),
                Self::VlanIp(i),
            ]);
        }
        fields
    }

    pub fn label(self) -> String {
        match self {
            Self::Name => "Name".into(),
            Self::Ip => "IP".into(),
            Self::PortLabel(i) => format!("Port {}", i + 1),
            Self::PortStatus(_) | Self::VlanStatus(_) => "  status".into(),
            Self::PortVlan(_) => "  vlan".into(),
            Self::LinkDevice(_) => "  link device".into(),
            Self::LinkIp(_) => "  link ip".into(),
            Self::LinkPort(_) => "  link port".into(),
            Self::VlanId(i) => format!("VLAN {} id", i + 1),
            Self::VlanName(_) => "  name".into(),
            Self::VlanPorts(_) => "  ports".into(),
            Self::VlanIp(_) => "  ip".into(),
        }
    }

    /// Current value of this field in `device`, as shown in the form.
    pub fn value(self, device: &Device) -> String {
        let port = |i: usize| device.ports.get(i);
        let link = |i: usize| port(i).and_then(|p| p.connected_to.as_ref());
        let vlan = |i: usize| device.vlans.get(i);

        let text = match self {
            Self::Name => Some(device.name.clone()),
            Self::Ip => Some(device.ip.clone()),
            Self::PortLabel(i) => port(i).map(|p| p.port.clone()),
            Self::PortStatus(i) => port(i).map(|p| p.status.as_str().to_owned()),
            Self::PortVlan(i) => port(i).map(|p| p.vlan.clone()),
            Self::LinkDevice(i) => link(i).map(|l| l.device.clone()),
            Self::LinkIp(i) => link(i).map(|l| l.ip.clone()),
            Self::LinkPort(i) => link(i).map(|l| l.port.clone()),
            Self::VlanId(i) => vlan(i).map(|v| v.id.to_string()),
            Self::VlanName(i) => vlan(i).map(|v| v.name.clone()),
            Self::VlanStatus(i) => vlan(i).map(|v| v.status.as_str().to_owned()),
            Self::VlanPorts(i) => vlan(i).map(|v| join_port_list(&v.ports)),
            Self::VlanIp(i) => vlan(i).map(|v| v.ip.clone()),
        };
        text.unwrap_or_default()
    }

    /// Status fields cycle through a closed set instead of taking text.
    pub fn is_status(self) -> bool {
        matches!(self, Self::PortStatus(_) | Self::VlanStatus(_))
    }

    /// The edit that sets this text field to `value`.
    fn text_edit(self, value: String) -> Option<DeviceEdit> {
        let port = |index, field| DeviceEdit::Port { index, field };
        let vlan = |index, field| DeviceEdit::Vlan { index, field };
        Some(match self {
            Self::Name => DeviceEdit::Name(value),
            Self::Ip => DeviceEdit::Ip(value),
            Self::PortLabel(i) => port(i, PortField::Label(value)),
            Self::PortVlan(i) => port(i, PortField::Vlan(value)),
            Self::LinkDevice(i) => port(i, PortField::Link(LinkField::Device(value))),
            Self::LinkIp(i) => port(i, PortField::Link(LinkField::Ip(value))),
            Self::LinkPort(i) => port(i, PortField::Link(LinkField::Port(value))),
            Self::VlanId(i) => vlan(i, VlanField::Id(value)),
            Self::VlanName(i) => vlan(i, VlanField::Name(value)),
            Self::VlanPorts(i) => vlan(i, VlanField::Ports(value)),
            Self::VlanIp(i) => vlan(i, VlanField::Ip(value)),
            Self::PortStatus(_) | Self::VlanStatus(_) => return None,
        })
    }

    /// The edit that moves this status field one step.
    fn cycle(self, device: &Device, forward: bool) -> Option<DeviceEdit> {
        match self {
            Self::PortStatus(index) => {
                let current = device.ports.get(index)?.status;
                let next = if forward { current.next() } else { current.prev() };
                Some(DeviceEdit::Port {
                    index,
                    field: PortField::Status(next),
                })
            }
            Self::VlanStatus(index) => {
                let current = device.vlans.get(index)?.status;
                let next = if forward { current.next() } else { current.prev() };
                Some(DeviceEdit::Vlan {
                    index,
                    field: VlanField::Status(next),
                })
            }
            _ => None,
        }
    }

    /// The edit that removes the port or VLAN this field belongs to.
    fn removal(self) -> Option<DeviceEdit> {
        match self {
            Self::Name | Self::Ip => None,
            Self::PortLabel(i)
            | Self::PortStatus(i)
            | Self::PortVlan(i)
            | Self::LinkDevice(i)
            | Self::LinkIp(i)
            | Self::LinkPort(i) => Some(DeviceEdit::RemovePort(i)),
            Self::VlanId(i)
            | Self::VlanName(i)
            | Self::VlanStatus(i)
            | Self::VlanPorts(i)
            | Self::VlanIp(i) => Some(DeviceEdit::RemoveVlan(i)),
        }
    }

    fn value_style(self, device: &Device) -> Style {
        match self {
            Self::PortStatus(i) => device
                .ports
                .get(i)
                .map_or_else(theme::table_row, |p| theme::port_status(p.status)),
            Self::VlanStatus(i) => device
                .vlans
                .get(i)
                .map_or_else(theme::table_row, |v| theme::vlan_status(v.status)),
            _ => theme::table_row(),
        }
    }
}

// ── Form screen ─────────────────────────────────────────────────────

/// What the device screen should do after a key press in the form.
#[derive(Debug, PartialEq, Eq)]
pub enum FormOutcome {
    Continue,
    Cancel,
    Submit(Device),
}

pub struct DeviceFormScreen {
    form: DeviceForm,
    cursor: usize,
    input: Input,
}

impl DeviceFormScreen {
    pub fn new(form: DeviceForm) -> Self {
        let mut screen = Self {
            form,
            cursor: 0,
            input: Input::default(),
        };
        screen.sync_input();
        screen
    }

    pub fn form(&self) -> &DeviceForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut DeviceForm {
        &mut self.form
    }

    pub fn current(&self) -> Option<FormField> {
        FormField::all(self.form.working()).get(self.cursor).copied()
    }

    /// Reload the text buffer from the working copy.
    fn sync_input(&mut self) {
        let value = self
            .current()
            .filter(|f| !f.is_status())
            .map(|f| f.value(self.form.working()))
            .unwrap_or_default();
        self.input = Input::new(value);
    }

    fn move_cursor(&mut self, down: bool) {
        let len = FormField::all(self.form.working()).len();
        self.cursor = if down {
            (self.cursor + 1).min(len.saturating_sub(1))
        } else {
            self.cursor.saturating_sub(1)
        };
        self.sync_input();
    }

    fn focus(&mut self, field: FormField) {
        if let Some(pos) = FormField::all(self.form.working())
            .iter()
            .position(|f| *f == field)
        {
            self.cursor = pos;
        }
        self.sync_input();
    }

    fn clamp_cursor(&mut self) {
        let len = FormField::all(self.form.working()).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.sync_input();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        // Frozen, cancel included, until the pending request answers.
        if self.form.is_saving() {
            return FormOutcome::Continue;
        }
        if key.code == KeyCode::Esc {
            return FormOutcome::Cancel;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => {
                return self
                    .form
                    .begin_submit()
                    .map_or(FormOutcome::Continue, FormOutcome::Submit);
            }
            KeyCode::Char('p') if ctrl => {
                if self.form.apply(DeviceEdit::AddPort) {
                    let index = self.form.working().ports.len().saturating_sub(1);
                    self.focus(FormField::PortLabel(index));
                }
            }
            KeyCode::Char('v') if ctrl => {
                if self.form.apply(DeviceEdit::AddVlan) {
                    let index = self.form.working().vlans.len().saturating_sub(1);
                    self.focus(FormField::VlanId(index));
                }
            }
            KeyCode::Char('x') if ctrl => {
                if let Some(edit) = self.current().and_then(FormField::removal) {
                    self.form.apply(edit);
                    self.clamp_cursor();
                }
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => self.move_cursor(true),
            KeyCode::Up | KeyCode::BackTab => self.move_cursor(false),
            KeyCode::Left | KeyCode::Right if self.current().is_some_and(FormField::is_status) => {
                let forward = key.code == KeyCode::Right;
                let edit = self
                    .current()
                    .and_then(|f| f.cycle(self.form.working(), forward));
                if let Some(edit) = edit {
                    self.form.apply(edit);
                }
            }
            _ => self.edit_text(key),
        }
        FormOutcome::Continue
    }

    fn edit_text(&mut self, key: KeyEvent) {
        let Some(field) = self.current().filter(|f| !f.is_status()) else {
            return;
        };
        if !text_input::edit(&mut self.input, key) {
            return;
        }
        if let Some(edit) = field.text_edit(self.input.value().to_owned()) {
            self.form.apply(edit);
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 72u16.min(area.width.saturating_sub(4));
        let height = area.height.saturating_sub(4).max(8).min(area.height);
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let working = self.form.working();
        let title = match self.form.mode() {
            FormMode::Create => " Add device ".to_owned(),
            FormMode::Edit => format!(" Edit {} ", working.name),
        };

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let layout = Layout::vertical([
            Constraint::Min(1),    // fields
            Constraint::Length(1), // status / error
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_fields(frame, layout[0]);
        self.render_status(frame, layout[1]);
        self.render_hints(frame, layout[2]);
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let working = self.form.working();
        let fields = FormField::all(working);
        let visible = usize::from(area.height);
        if visible == 0 {
            return;
        }
        let offset = self.cursor.saturating_sub(visible - 1);

        for (slot, (index, field)) in fields
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let y = area
                .y
                .saturating_add(u16::try_from(slot).unwrap_or(u16::MAX));
            let row = Rect::new(area.x, y, area.width, 1);
            let [label_area, value_area] =
                Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
                    .areas(row);

            let selected = index == self.cursor;
            let label_style = if selected {
                theme::table_selected()
            } else {
                theme::key_hint()
            };
            frame.render_widget(
                Paragraph::new(field.label()).style(label_style),
                label_area,
            );

            if selected && !field.is_status() {
                text_input::render(
                    frame,
                    value_area,
                    &self.input,
                    Style::default().fg(theme::NEON_CYAN),
                    true,
                );
                continue;
            }

            let value = field.value(working);
            let text = if selected {
                format!("◂ {value} ▸")
            } else {
                value
            };
            frame.render_widget(
                Paragraph::new(text).style(field.value_style(working)),
                value_area,
            );
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = if self.form.is_saving() {
            Line::from(Span::styled(
                " Saving…",
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ))
        } else if let Some(error) = self.form.error() {
            Line::from(Span::styled(format!(" {error}"), theme::error_text()))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        if self.form.is_saving() {
            let hint = Span::styled(" saving… waiting for the API", theme::key_hint());
            frame.render_widget(Paragraph::new(Line::from(hint)), area);
            return;
        }
        let hints = Line::from(vec![
            Span::styled(" ^S ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("^P ", theme::key_hint_key()),
            Span::styled("port  ", theme::key_hint()),
            Span::styled("^V ", theme::key_hint_key()),
            Span::styled("vlan  ", theme::key_hint()),
            Span::styled("^X ", theme::key_hint_key()),
            Span::styled("remove  ", theme::key_hint()),
            Span::styled("←/→ ", theme::key_hint_key()),
            Span::styled("status  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use switchyard_core::{ConnectedDevice, Port, PortStatus, Vlan, VlanStatus};

    use super::*;

    fn press(screen: &mut DeviceFormScreen, code: KeyCode) -> FormOutcome {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(screen: &mut DeviceFormScreen, c: char) -> FormOutcome {
        screen.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(screen: &mut DeviceFormScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn unlinked_switch() -> Device {
        let mut device = Device::draft();
        device.name = "SW1".into();
        device.ports.push(Port {
            port: "1".into(),
            status: PortStatus::Connected,
            vlan: String::new(),
            connected_to: None,
        });
        device.vlans.push(Vlan {
            id: 10,
            ..Vlan::blank()
        });
        device
    }

    #[test]
    fn fields_cover_every_port_and_vlan() {
        let fields = FormField::all(&unlinked_switch());
        assert_eq!(fields.len(), 2 + 6 + 5);
        assert_eq!(fields[2], FormField::PortLabel(0));
        assert_eq!(fields[8], FormField::VlanId(0));
    }

    #[test]
    fn typing_updates_the_working_copy() {
        let mut screen = DeviceFormScreen::new(DeviceForm::create());
        type_text(&mut screen, "SW9");
        press(&mut screen, KeyCode::Down);
        type_text(&mut screen, "10.0.0.9");
        assert_eq!(screen.form().working().name, "SW9");
        assert_eq!(screen.form().working().ip, "10.0.0.9");
    }

    #[test]
    fn link_edit_materializes_the_connection() {
        let mut screen = DeviceFormScreen::new(DeviceForm::edit(&unlinked_switch()));
        screen.focus(FormField::LinkIp(0));
        type_text(&mut screen, "10.0.0.20");
        assert_eq!(
            screen.form().working().ports[0].connected_to,
            Some(ConnectedDevice {
                device: String::new(),
                ip: "10.0.0.20".into(),
                port: String::new(),
            })
        );
    }

    #[test]
    fn status_cycles_with_arrows() {
        let mut screen = DeviceFormScreen::new(DeviceForm::edit(&unlinked_switch()));
        screen.focus(FormField::PortStatus(0));
        press(&mut screen, KeyCode::Right);
        assert_eq!(
            screen.form().working().ports[0].status,
            PortStatus::NotConnected
        );
        press(&mut screen, KeyCode::Left);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.form().working().ports[0].status, PortStatus::Disabled);

        screen.focus(FormField::VlanStatus(0));
        press(&mut screen, KeyCode::Right);
        assert_eq!(
            screen.form().working().vlans[0].status,
            VlanStatus::ActUnsupported
        );
    }

    #[test]
    fn bad_vlan_id_keeps_previous_value() {
        let mut screen = DeviceFormScreen::new(DeviceForm::edit(&unlinked_switch()));
        screen.focus(FormField::VlanId(0));
        press(&mut screen, KeyCode::End);
        type_text(&mut screen, "x");
        assert_eq!(screen.form().working().vlans[0].id, 10);
        assert!(screen.form().error().is_some());

        // Leaving the field restores the accepted value
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.input.value(), "10");
    }

    #[test]
    fn ctrl_p_and_ctrl_v_add_rows_and_focus_them() {
        let mut screen = DeviceFormScreen::new(DeviceForm::create());
        ctrl(&mut screen, 'p');
        assert_eq!(screen.current(), Some(FormField::PortLabel(0)));
        type_text(&mut screen, "Gi1/0/1");

        ctrl(&mut screen, 'v');
        assert_eq!(screen.current(), Some(FormField::VlanId(0)));
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        type_text(&mut screen, "1, 2");

        let working = screen.form().working();
        assert_eq!(working.ports[0].port, "Gi1/0/1");
        assert_eq!(working.vlans[0].ports, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn ctrl_x_removes_the_row_under_the_cursor() {
        let mut device = unlinked_switch();
        device.ports.push(Port {
            port: "2".into(),
            ..Port::blank()
        });
        let mut screen = DeviceFormScreen::new(DeviceForm::edit(&device));
        screen.focus(FormField::PortVlan(0));
        ctrl(&mut screen, 'x');
        let working = screen.form().working();
        assert_eq!(working.ports.len(), 1);
        assert_eq!(working.ports[0].port, "2");
        assert_eq!(working.vlans.len(), 1);
    }

    #[test]
    fn submit_is_disabled_while_saving() {
        let mut screen = DeviceFormScreen::new(DeviceForm::edit(&unlinked_switch()));
        let FormOutcome::Submit(device) = ctrl(&mut screen, 's') else {
            panic!("expected a submit");
        };
        assert_eq!(device.name, "SW1");
        assert_eq!(ctrl(&mut screen, 's'), FormOutcome::Continue);

        // Edits and cancel are ignored too
        type_text(&mut screen, "zz");
        assert_eq!(screen.form().working().name, "SW1");
        assert_eq!(press(&mut screen, KeyCode::Esc), FormOutcome::Continue);

        screen.form_mut().finish_submit(Err("Failed to update device".into()));
        assert!(!screen.form().is_saving());
        assert!(matches!(ctrl(&mut screen, 's'), FormOutcome::Submit(_)));
    }

    #[test]
    fn escape_cancels() {
        let mut screen = DeviceFormScreen::new(DeviceForm::create());
        assert_eq!(press(&mut screen, KeyCode::Esc), FormOutcome::Cancel);
    }
}
