use std::io::{self, Write};

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{KanbanError, Result};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Kanban CLI Configuration");
    println!("========================\n");

    let api_url = prompt(&format!("API base URL [{DEFAULT_API_URL}]: "))?;
    let api_url = if api_url.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        api_url
    };
    url::Url::parse(&api_url).map_err(|_| KanbanError::InvalidApiUrl(api_url.clone()))?;

    let default_board = prompt("Default board ID [optional]: ")?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| KanbanError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let mut config_content = format!("api_url = \"{api_url}\"\n");
    match default_board.parse::<u64>() {
        Ok(id) => config_content.push_str(&format!("default_board = {id}\n")),
        Err(_) if default_board.is_empty() => {}
        Err(_) => println!("Ignoring non-numeric board ID '{default_board}'"),
    }

    std::fs::write(&config_path, config_content).map_err(|e| KanbanError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'kanban' commands!");

    Ok(())
}
