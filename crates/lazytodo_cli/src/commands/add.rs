use chrono::NaiveDateTime;
use clap::Args;
use lazytodo_core::{TodoDraft, TodoRepository, TodoService};
use log::info;

use crate::utils::datetime::{default_due_date, parse_datetime_arg};
use crate::utils::prompt;

#[derive(Args, Debug)]
pub struct Command {
    /// Description of the new todo item; prompted for when omitted
    #[clap(long)]
    desc: Option<String>,

    /// Due date, e.g. 2024-01-02 or 2024-01-02T17:30:00; prompted for when omitted
    #[clap(long, value_parser = parse_datetime_arg)]
    due: Option<NaiveDateTime>,

    /// Whether the item starts out completed
    #[clap(long)]
    done: Option<bool>,
}

pub fn handle<R: TodoRepository>(
    command: Command,
    service: &mut TodoService<R>,
) -> eyre::Result<()> {
    let description = match command.desc {
        Some(value) => value,
        None => prompt::required_line("Desc")?,
    };
    let due_date = match command.due {
        Some(value) => value,
        None => prompt::datetime_with_default("Due", default_due_date())?,
    };
    let done = command.done.unwrap_or(false);

    let created = service.add(&TodoDraft::new(description, due_date, done))?;
    info!("event=cli_add module=cli status=ok id={}", created.id);
    println!("{created}");
    Ok(())
}
