//! Interactive text front end
//!
//! Parses typed commands, dispatches them to the session controller and
//! renders the session as plain text. Row numbers shown to the user start
//! at 1.

use std::fmt::Write as _;

use crate::session::{Controller, Direction, Session, SessionView};

pub const HELP: &str = "\
Commands:
  lists              show loot lists and which are selected
  select <id>        toggle a loot list
  pull [n]           roll n items (1-20, default 1)
  up <row>           move a result up
  down <row>         move a result down
  delete <row>       remove a result
  clear              remove all results
  export             save results to a text file
  roll <formula>     roll a formula, e.g. 2d6x100
  show               show results
  dismiss            hide the current message
  help               show this help
  quit               exit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lists,
    Select(String),
    Pull(u32),
    Move(usize, Direction),
    Delete(usize),
    Clear,
    Export,
    Roll(String),
    Show,
    Dismiss,
    Help,
    Quit,
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print (may be empty)
    Output(String),
    Quit,
}

fn parse_row(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or("missing row number")?;
    match arg.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("invalid row number: {}", arg)),
        Ok(n) => Ok(n - 1),
    }
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Ok(None);
    };
    let verb = first.to_lowercase();
    let arg = parts.get(1).copied();

    let command = match verb.as_str() {
        "lists" | "ls" => Command::Lists,
        "select" | "toggle" | "sel" => {
            Command::Select(arg.ok_or("missing list id")?.to_string())
        }
        "pull" | "p" => {
            let count = match arg {
                None => 1,
                Some(n) => n
                    .parse()
                    .map_err(|_| format!("invalid roll count: {}", n))?,
            };
            Command::Pull(count)
        }
        "up" | "u" => Command::Move(parse_row(arg)?, Direction::Up),
        "down" | "d" => Command::Move(parse_row(arg)?, Direction::Down),
        "delete" | "del" | "rm" => Command::Delete(parse_row(arg)?),
        "clear" => Command::Clear,
        "export" | "save" => Command::Export,
        "roll" | "r" => {
            if parts.len() < 2 {
                return Err("missing formula".to_string());
            }
            Command::Roll(parts[1..].join(" "))
        }
        "show" => Command::Show,
        "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(format!("Unknown command: {}", verb)),
    };

    Ok(Some(command))
}

/// Run a command against the controller
pub fn execute(controller: &mut Controller, command: Command) -> Reply {
    let text = match command {
        Command::Lists => render_lists(controller.session()),
        Command::Select(id) => {
            if controller.session().table(&id).is_none() {
                format!("No loot list with id {:?}.", id)
            } else if controller.toggle_table(&id) {
                format!("Selected {}.", id)
            } else {
                format!("Deselected {}.", id)
            }
        }
        Command::Pull(count) => match controller.pull(count) {
            Ok(batch) => format!("Rolled {} item(s).", batch.len()),
            Err(_) => String::new(),
        },
        Command::Move(row, direction) => {
            if controller.reorder(row, direction) {
                String::new()
            } else {
                format!("Row {} cannot move {}.", row + 1, direction)
            }
        }
        Command::Delete(row) => match controller.delete_at(row) {
            Some(entry) => format!("Deleted {}.", entry.item_name),
            None => format!("No row {}.", row + 1),
        },
        Command::Clear => format!("Cleared {} result(s).", controller.clear()),
        Command::Export => match controller.export_results() {
            Ok(receipt) => format!("Saved to {}.", receipt.path.display()),
            Err(_) => String::new(),
        },
        Command::Roll(formula) => match controller.roll(&formula) {
            Ok(value) => format!("{} => {}", formula, value),
            Err(e) => format!("Error: {}", e),
        },
        Command::Show => render_view(&controller.view()),
        Command::Dismiss => {
            controller.dismiss_advisory();
            String::new()
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Reply::Quit,
    };

    Reply::Output(text)
}

/// Render the table list with selection marks
pub fn render_lists(session: &Session) -> String {
    let mut out = String::from("Loot lists:\n");
    for table in session.tables() {
        let mark = if session.is_selected(&table.id) { 'x' } else { ' ' };
        let _ = write!(out, "  [{}] {:<14} {}", mark, table.id, table.name);
        if !table.items.is_empty() {
            let _ = write!(out, " ({} items)", table.items.len());
        }
        out.push('\n');
    }
    out
}

/// Render the advisory and the result list
pub fn render_view(view: &SessionView<'_>) -> String {
    let mut out = String::new();

    if let Some(message) = view.advisory {
        let _ = writeln!(out, "! {}", message);
    }

    let session = view.session;
    if !session.has_results() {
        out.push_str("No results yet. Select lists and roll to generate loot!\n");
        return out;
    }

    let _ = writeln!(
        out,
        "Results ({} entries, {} items, {}¥):",
        session.results().len(),
        session.total_items(),
        session.total_value()
    );
    for (i, entry) in session.results().iter().enumerate() {
        let values: Vec<String> = entry.values.iter().map(|v| format!("{}¥", v)).collect();
        let _ = writeln!(
            out,
            "  {:>2}. [{}] {} x{}  {}",
            i + 1,
            entry.list_name,
            entry.item_name,
            entry.quantity,
            values.join(", ")
        );
    }
    out
}
