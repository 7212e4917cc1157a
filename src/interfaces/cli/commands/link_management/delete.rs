//! Delete link command

use colored::Colorize;

use crate::errors::Result;
use crate::services::LinkService;

pub async fn delete_link(service: &LinkService, link_id: String) -> Result<()> {
    let removed = service.delete_link(&link_id).await?;

    println!(
        "{} Deleted smart link: {} ({} - {})",
        "✓".bold().green(),
        removed.id.cyan(),
        removed.title,
        removed.artist
    );

    Ok(())
}
