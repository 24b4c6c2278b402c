use tabled::Tabled;

use crate::api::KanbanApi;
use crate::error::Result;
use crate::output;
use crate::types::Assignee;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&Assignee> for UserRow {
    fn from(user: &Assignee) -> Self {
        Self {
            id: user.id,
            name: user.full_name.clone(),
            email: user.email.clone(),
        }
    }
}

pub async fn list(api: &mut KanbanApi) -> Result<()> {
    let users = api.get_all_users().await?;

    if users.is_empty() {
        output::print_message("No users found");
        return Ok(());
    }

    output::print_table(&users, |u| UserRow::from(u));

    Ok(())
}
