use crate::command::Command;

/// Render commands as Windows DhcpServer PowerShell cmdlets, one per line.
pub fn render(commands: &[Command]) -> String {
    let mut out = String::new();
    for command in commands {
        out.push_str(&render_command(command));
        out.push('\n');
    }
    out
}

pub fn render_command(command: &Command) -> String {
    match command {
        Command::CreateScope {
            name,
            start,
            end,
            mask,
        } => format!(
            "Add-DhcpServerv4Scope -Name {} -StartRange '{start}' -EndRange '{end}' -SubnetMask {}",
            quote(name),
            quote(mask)
        ),
        Command::DefineOption { id, name, kind } => format!(
            "Add-DhcpServerv4OptionDefinition -OptionId {id} -Name {} -Type {kind}",
            quote(name)
        ),
        Command::SetOptionValue {
            scope_id,
            option_id,
            values,
        } => {
            let list = values
                .iter()
                .map(|value| quote(value))
                .collect::<Vec<_>>()
                .join(",");
            format!(
                "Set-DhcpServerv4OptionValue -ScopeId {} -OptionId {option_id} -Value (@({list}))",
                quote(scope_id)
            )
        }
        Command::CreateReservation {
            scope_id,
            address,
            client_id,
            name,
            description,
        } => format!(
            "Add-DhcpServerv4Reservation -ScopeId {} -IPAddress {} -ClientId {} -Name {} -Description {}",
            quote(scope_id),
            quote(address),
            quote(client_id),
            quote(name),
            quote(description)
        ),
    }
}

/// Single-quoted PowerShell string literal; embedded quotes are doubled.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
