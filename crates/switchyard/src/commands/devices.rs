//! Device command handlers.

use tabled::Tabled;

use switchyard_core::{
    Controller, Device, PageWindow, SortField, SortOrder, TableView, edit,
    query::{filter_devices, sort_devices},
};

use crate::cli::{
    CreateArgs, DevicesArgs, DevicesCommand, GlobalOpts, ListArgs, OutputFormat, SortKey,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Connections")]
    connections: String,
    #[tabled(rename = "VLANs")]
    vlans: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            ip: d.ip.clone(),
            connections: d.connections().collect::<Vec<_>>().join(", "),
            vlans: d
                .vlan_ids()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Connected To")]
    link: String,
}

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: u16,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Ports")]
    ports: String,
    #[tabled(rename = "IP")]
    ip: String,
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn detail(d: &Device, color: bool) -> String {
    let mut lines = vec![
        format!("ID:    {}", d.id),
        format!("Name:  {}", or_dash(&d.name)),
        format!("IP:    {}", or_dash(&d.ip)),
    ];

    if d.ports.is_empty() {
        lines.push("Ports: none".into());
    } else {
        let rows: Vec<PortRow> = d
            .ports
            .iter()
            .enumerate()
            .map(|(index, p)| PortRow {
                index,
                port: p.port.clone(),
                status: output::port_status(p.status, color),
                vlan: p.vlan.clone(),
                link: p
                    .connected_to
                    .as_ref()
                    .filter(|c| !c.is_empty())
                    .map(|c| {
                        [c.device.as_str(), c.ip.as_str(), c.port.as_str()]
                            .iter()
                            .filter(|s| !s.is_empty())
                            .copied()
                            .collect::<Vec<_>>()
                            .join(" / ")
                    })
                    .unwrap_or_default(),
            })
            .collect();
        lines.push(String::new());
        lines.push("Ports:".into());
        lines.push(output::render_table(&rows));
    }

    if d.vlans.is_empty() {
        lines.push("VLANs: none".into());
    } else {
        let rows: Vec<VlanRow> = d
            .vlans
            .iter()
            .enumerate()
            .map(|(index, v)| VlanRow {
                index,
                id: v.id,
                name: v.name.clone(),
                status: output::vlan_status(v.status, color),
                ports: edit::join_port_list(&v.ports),
                ip: v.ip.clone(),
            })
            .collect();
        lines.push(String::new());
        lines.push("VLANs:".into());
        lines.push(output::render_table(&rows));
    }

    lines.join("\n")
}

fn print_device(d: &Device, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let out = output::render_single(global.output, d, |d| detail(d, color), |d| {
        d.id.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn sort_field(key: SortKey) -> SortField {
    match key {
        SortKey::Name => SortField::Name,
        SortKey::Ip => SortField::Ip,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(list) => handle_list(controller, &list, global).await,

        DevicesCommand::Get { device } => {
            let found = util::resolve_device(controller, global, &device).await?;
            print_device(&found, global)
        }

        DevicesCommand::Create(create) => handle_create(controller, create, global).await,

        DevicesCommand::Edit { device, set } => {
            let original = util::resolve_device(controller, global, &device).await?;
            let working = util::apply_edits(original.clone(), &set)?;
            if working == original {
                if !global.quiet {
                    eprintln!("No changes");
                }
                return Ok(());
            }
            let saved = util::with_spinner(
                global,
                "Saving device",
                controller.update_device(&working),
            )
            .await?;
            if !global.quiet {
                eprintln!("Device updated");
            }
            print_device(&saved, global)
        }

        DevicesCommand::Delete { device } => {
            let found = util::resolve_device(controller, global, &device).await?;
            let prompt = format!("Delete device {} ({})?", or_dash(&found.name), found.id);
            if !util::confirm(&prompt, "devices delete", global.yes)? {
                return Ok(());
            }
            util::with_spinner(global, "Deleting device", controller.delete_device(&found.id))
                .await?;
            if !global.quiet {
                eprintln!("Device deleted");
            }
            Ok(())
        }
    }
}

async fn handle_list(
    controller: &Controller,
    list: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = util::with_spinner(global, "Fetching devices", controller.fetch_devices()).await?;

    let field = sort_field(list.sort);
    let order = if list.desc { SortOrder::Desc } else { SortOrder::Asc };
    let search = list.search.as_deref().unwrap_or_default();

    let (rows, window, page, total_pages) = if list.all {
        let mut rows = filter_devices(&devices, search);
        sort_devices(&mut rows, field, order);
        let window = PageWindow::new(1, rows.len(), rows.len());
        let pages = usize::from(!rows.is_empty());
        (rows, window, pages, pages)
    } else {
        let mut view = TableView::default();
        view.set_search(search);
        view.set_sort(field, order);
        let total = view.project(&devices).total_pages;
        view.set_page(list.page, total);
        let page = view.project(&devices);
        (page.rows, page.window, page.page, page.total_pages)
    };

    let out = output::render_list(
        global.output,
        &rows,
        |d| DeviceRow::from(*d),
        |d| d.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);

    if global.output == OutputFormat::Table {
        let footer = format!("{window} (page {page} of {})", total_pages.max(1));
        output::print_output(&footer, global.quiet);
    }
    Ok(())
}

async fn handle_create(
    controller: &Controller,
    create: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut draft = match create.from_file {
        Some(ref path) => util::read_device_file(path)?,
        None => Device::draft(),
    };
    if let Some(name) = create.name {
        draft.name = name;
    }
    if let Some(ip) = create.ip {
        draft.ip = ip;
    }
    let draft = util::apply_edits(draft, &create.set)?;

    for (field, value) in [("name", &draft.name), ("ip", &draft.ip)] {
        if value.trim().is_empty() {
            return Err(CliError::Validation {
                field: field.into(),
                reason: format!("a device needs a {field} (use --{field})"),
            });
        }
    }

    let created =
        util::with_spinner(global, "Creating device", controller.create_device(&draft)).await?;
    if !global.quiet {
        eprintln!("Device created");
    }
    print_device(&created, global)
}
