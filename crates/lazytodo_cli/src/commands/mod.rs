use std::path::Path;

use clap::Subcommand;
use lazytodo_core::db::open_db;
use lazytodo_core::{SqliteTodoRepository, TodoService};
use log::info;

pub mod add;
pub mod delete;
pub mod done;
pub mod listing;
pub mod undone;
pub mod update;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a new todo item
    Add(add::Command),
    /// Print todo items, optionally filtered by completion status
    Listing(listing::Command),
    /// Change fields of an existing todo item
    Update(update::Command),
    /// Remove a todo item
    Delete(delete::Command),
    /// Mark a todo item as completed
    Done(done::Command),
    /// Mark a completed todo item as open again
    Undone(undone::Command),
}

impl Command {
    pub fn execute(self, db_path: &Path) -> eyre::Result<()> {
        info!(
            "event=cli_dispatch module=cli command={} db={}",
            self.name(),
            db_path.display()
        );

        let mut conn = open_db(db_path)?;
        let repo = SqliteTodoRepository::try_new(&mut conn)?;
        let mut service = TodoService::new(repo);

        match self {
            Self::Add(o) => add::handle(o, &mut service)?,
            Self::Listing(o) => listing::handle(o, &mut service)?,
            Self::Update(o) => update::handle(o, &mut service)?,
            Self::Delete(o) => delete::handle(o, &mut service)?,
            Self::Done(o) => done::handle(o, &mut service)?,
            Self::Undone(o) => undone::handle(o, &mut service)?,
        };

        Ok(())
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Listing(_) => "listing",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::Done(_) => "done",
            Self::Undone(_) => "undone",
        }
    }
}
