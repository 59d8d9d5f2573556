use clap::Args;
use lazytodo_core::{TodoId, TodoRepository, TodoService};
use log::info;

use crate::utils::prompt;

#[derive(Args, Debug)]
pub struct Command {
    /// Id of the todo item to mark as completed; prompted for when omitted
    #[clap(long)]
    id: Option<TodoId>,
}

pub fn handle<R: TodoRepository>(
    command: Command,
    service: &mut TodoService<R>,
) -> eyre::Result<()> {
    let id = match command.id {
        Some(value) => value,
        None => prompt::required_id("Id")?,
    };

    let updated = service.complete(id)?;
    info!("event=cli_done module=cli status=ok id={id}");
    println!("{updated}");
    Ok(())
}
