use clap::Args;
use lazytodo_core::{TodoListQuery, TodoRepository, TodoService};

#[derive(Args, Debug)]
pub struct Command {
    /// Only print items whose completion flag matches this value
    #[clap(long)]
    done: Option<bool>,
}

pub fn handle<R: TodoRepository>(
    command: Command,
    service: &mut TodoService<R>,
) -> eyre::Result<()> {
    let todos = service.get_all(&TodoListQuery { done: command.done })?;
    for todo in &todos {
        println!("{todo}");
    }
    Ok(())
}
