use crate::api::KanbanApi;
use crate::cli::{BoardArgs, IssueListArgs};
use crate::commands::{board, boards, issues};
use crate::error::Result;
use crate::header::Header;
use crate::output;
use crate::route::Route;
use crate::store::IssueStore;

pub async fn run(api: &mut KanbanApi, store: &mut IssueStore, raw: &str) -> Result<()> {
    let route = Route::parse(raw)?;

    if !output::is_json_output() {
        println!("{}", Header::new(route).nav_line());
        println!();
    }

    match route {
        Route::Boards => boards::list(api).await,
        Route::Board { id, task_id } => {
            let args = BoardArgs {
                id,
                task: task_id,
                dynamic: false,
            };
            board::show(api, store, args).await
        }
        Route::Issues => issues::list(api, store, IssueListArgs::default()).await,
    }
}
