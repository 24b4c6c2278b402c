use std::fmt;

use url::Url;

use crate::error::{KanbanError, Result};

const ROUTE_BASE: &str = "http://localhost/";

/// Client-visible location: the board list, one board, or the issue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Boards,
    Board { id: u64, task_id: Option<u64> },
    Issues,
}

impl Route {
    /// Parse `/boards`, `/boards/{id}[?taskId={id}]` or `/issues`.
    ///
    /// Full URLs are accepted too; only the path and query are considered.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || KanbanError::InvalidRoute(input.to_string());

        let url = Url::parse(ROUTE_BASE)
            .and_then(|base| base.join(input))
            .map_err(|_| invalid())?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["boards"] => Ok(Route::Boards),
            ["issues"] => Ok(Route::Issues),
            ["boards", id] => {
                let id = id.parse().map_err(|_| invalid())?;
                let task_id = url
                    .query_pairs()
                    .find(|(key, _)| key == "taskId")
                    .map(|(_, value)| value.parse().map_err(|_| invalid()))
                    .transpose()?;
                Ok(Route::Board { id, task_id })
            }
            _ => Err(invalid()),
        }
    }

    /// Board a form opened from this route should default to.
    pub fn board_context(&self) -> Option<u64> {
        match self {
            Route::Board { id, .. } => Some(*id),
            Route::Boards | Route::Issues => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Boards => write!(f, "/boards"),
            Route::Issues => write!(f, "/issues"),
            Route::Board { id, task_id: None } => write!(f, "/boards/{id}"),
            Route::Board {
                id,
                task_id: Some(task),
            } => write!(f, "/boards/{id}?taskId={task}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::boards("/boards", Route::Boards)]
    #[case::boards_trailing_slash("/boards/", Route::Boards)]
    #[case::issues("/issues", Route::Issues)]
    #[case::board("/boards/5", Route::Board { id: 5, task_id: None })]
    #[case::board_with_task("/boards/5?taskId=7", Route::Board { id: 5, task_id: Some(7) })]
    #[case::full_url("http://127.0.0.1:5173/boards/2?taskId=9", Route::Board { id: 2, task_id: Some(9) })]
    fn test_parse(#[case] input: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(input).unwrap(), expected);
    }

    #[rstest]
    #[case("/")]
    #[case("/boards/abc")]
    #[case("/boards/5?taskId=x")]
    #[case("/tasks")]
    #[case("/boards/5/extra")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(matches!(Route::parse(input), Err(KanbanError::InvalidRoute(_))));
    }

    #[test]
    fn test_display_roundtrips() {
        let route = Route::Board {
            id: 3,
            task_id: Some(7),
        };
        assert_eq!(route.to_string(), "/boards/3?taskId=7");
        assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
    }

    #[test]
    fn test_board_context() {
        assert_eq!(Route::parse("/boards/5").unwrap().board_context(), Some(5));
        assert_eq!(Route::Issues.board_context(), None);
        assert_eq!(Route::Boards.board_context(), None);
    }
}
