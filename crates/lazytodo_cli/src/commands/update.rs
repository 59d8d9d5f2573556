use chrono::NaiveDateTime;
use clap::Args;
use lazytodo_core::{TodoId, TodoPatch, TodoRepository, TodoService};
use log::info;

use crate::utils::datetime::parse_datetime_arg;
use crate::utils::prompt;

#[derive(Args, Debug)]
pub struct Command {
    /// Id of the todo item to update; prompted for when omitted
    #[clap(long)]
    id: Option<TodoId>,

    /// New description; an empty string keeps the stored one
    #[clap(long)]
    desc: Option<String>,

    /// New due date
    #[clap(long, value_parser = parse_datetime_arg)]
    due: Option<NaiveDateTime>,

    /// New completion flag
    #[clap(long)]
    done: Option<bool>,
}

pub fn handle<R: TodoRepository>(
    command: Command,
    service: &mut TodoService<R>,
) -> eyre::Result<()> {
    let id = match command.id {
        Some(value) => value,
        None => prompt::required_id("Id")?,
    };

    let patch = TodoPatch {
        description: command.desc,
        due_date: command.due,
        done: command.done,
    };

    let updated = service.update(id, &patch)?;
    info!("event=cli_update module=cli status=ok id={id}");
    println!("{updated}");
    Ok(())
}
