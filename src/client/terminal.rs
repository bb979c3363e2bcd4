//! Line-oriented terminal front-end for the controller.

use std::io::{self, BufRead, Write};

use crate::client::api::{EventForm, EventsApi};
use crate::client::controller::{Controller, ListRegion, Ui, View};

const HELP: &str = "\
Commands:
  list          refresh the event list
  add           add an event (staff PIN required)
  edit <id>     edit an event (staff PIN required)
  delete <id>   delete an event (staff PIN required)
  join <id>     join an event
  help          show this help
  quit          exit";

pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl TerminalUi<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed input line, `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn ask(&mut self, label: &str) -> Option<String> {
        self.write(format_args!("{} ", label));
        self.read_line()
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        // A closed stdout is not worth aborting the session over
        let _ = self.output.write_fmt(args);
        let _ = self.output.flush();
    }

    /// Asks for every form field, keeping the current value on an empty line.
    pub fn fill_form(&mut self, current: &EventForm) -> Option<EventForm> {
        let mut field = |label: &str, value: &str| -> Option<String> {
            let answer = self.ask(&format!("{} [{}]:", label, value))?;
            Some(if answer.is_empty() {
                value.to_string()
            } else {
                answer
            })
        };

        Some(EventForm {
            name: field("Event Name", &current.name)?,
            description: field("Description", &current.description)?,
            date: field("Date (YYYY-MM-DDTHH:MM)", &current.date)?,
            location: field("Location", &current.location)?,
            pin: field("Staff PIN", &current.pin)?,
        })
    }
}

impl<R: BufRead, W: Write> Ui for TerminalUi<R, W> {
    fn prompt(&mut self, message: &str) -> Option<String> {
        self.ask(message)
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{} [y/N]", message))
            .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"))
    }

    fn alert(&mut self, message: &str) {
        self.write(format_args!("! {}\n", message));
    }

    fn render(&mut self, view: &View) {
        match &view.region {
            ListRegion::Events(events) if events.is_empty() => {
                self.write(format_args!("(no events)\n"));
            }
            ListRegion::Events(events) => {
                for event in events {
                    self.write(format_args!(
                        "[{}] {}\n    {}\n    {}\n    Location: {}\n",
                        event.id,
                        event.name,
                        event.description,
                        event.date.format("%Y-%m-%d %H:%M"),
                        event.location
                    ));
                }
            }
            ListRegion::Editing(edit) => {
                self.write(format_args!(
                    "Editing event {}: {} | {} | {} | {}\n",
                    edit.id, edit.form.name, edit.form.description, edit.form.date, edit.form.location
                ));
            }
        }
        if view.add_form.visible {
            self.write(format_args!("(add event form open)\n"));
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List,
    Add,
    Edit(i64),
    Delete(i64),
    Join(i64),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let mut id = || -> Result<i64, String> {
        parts
            .next()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| format!("usage: {} <id>", verb))
    };

    match verb {
        "list" | "ls" => Ok(Command::List),
        "add" => Ok(Command::Add),
        "edit" => id().map(Command::Edit),
        "delete" | "rm" => id().map(Command::Delete),
        "join" => id().map(Command::Join),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Reads commands until `quit` or end of input.
pub async fn run<A, R, W>(controller: &mut Controller<A, TerminalUi<R, W>>)
where
    A: EventsApi,
    R: BufRead,
    W: Write,
{
    controller.refresh().await;

    loop {
        let Some(line) = controller.ui_mut().ask(">") else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                controller.ui_mut().alert(&message);
                continue;
            }
        };

        match command {
            Command::List => controller.refresh().await,
            Command::Add => {
                controller.show_add_form();
                if !controller.view().add_form.visible {
                    continue;
                }
                let current = controller.view().add_form.form.clone();
                if let Some(form) = controller.ui_mut().fill_form(&current) {
                    controller.fill_add_form(form);
                    controller.submit_add_form().await;
                }
            }
            Command::Edit(id) => {
                controller.begin_edit(id).await;
                let ListRegion::Editing(edit) = &controller.view().region else {
                    continue;
                };
                let current = edit.form.clone();
                if let Some(form) = controller.ui_mut().fill_form(&current) {
                    controller.submit_edit(form).await;
                }
            }
            Command::Delete(id) | Command::Join(id) => {
                let Some(event) = controller.view().listed(id).cloned() else {
                    controller
                        .ui_mut()
                        .alert(&format!("Event {} is not in the list", id));
                    continue;
                };
                if command == Command::Join(id) {
                    controller.join(&event);
                } else {
                    controller.delete(&event).await;
                }
            }
            Command::Help => controller.ui_mut().write(format_args!("{}\n", HELP)),
            Command::Quit => break,
        }
    }
}
