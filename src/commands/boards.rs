use tabled::Tabled;

use crate::api::KanbanApi;
use crate::error::Result;
use crate::output::{self, truncate};
use crate::types::Board;

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Issues")]
    task_count: u32,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Board> for BoardRow {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id,
            name: board.name.clone(),
            task_count: board.task_count,
            description: truncate(&board.description.replace('\n', " "), 50),
        }
    }
}

pub async fn list(api: &mut KanbanApi) -> Result<()> {
    let boards = api.get_all_boards().await?;

    if boards.is_empty() {
        output::print_message("No boards found");
        return Ok(());
    }

    output::print_table(&boards, |b| BoardRow::from(b));

    Ok(())
}
