//! Create link command

use colored::Colorize;

use crate::errors::Result;
use crate::services::{CreateLinkRequest, LinkService};

pub async fn create_link(
    service: &LinkService,
    title: String,
    artist: String,
    platforms: Vec<(String, String)>,
) -> Result<()> {
    let request = CreateLinkRequest {
        title,
        artist,
        platforms: platforms.into_iter().collect(),
    };

    let link = service.create_link(request).await?;

    println!(
        "{} Created smart link: {} ({} - {})",
        "✓".bold().green(),
        link.id.cyan(),
        link.title.bold(),
        link.artist
    );
    for (platform, url) in &link.platforms {
        println!("    {} -> {}", platform.magenta(), url.blue().underline());
    }

    let path = format!("/l/{}", link.id);
    match service.config().public_base_url.as_deref() {
        Some(base) if !base.trim().is_empty() => println!(
            "{} {}{}",
            "ℹ".bold().blue(),
            base.trim().trim_end_matches('/'),
            path
        ),
        _ => println!("{} Landing page path: {}", "ℹ".bold().blue(), path),
    }

    Ok(())
}
