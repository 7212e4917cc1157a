//! List links command

use colored::Colorize;

use crate::errors::Result;
use crate::services::LinkService;
use crate::storage::LinkRecord;

/// One summary line per link: id, title/artist, platform names and counters.
pub fn format_link_line(link: &LinkRecord) -> String {
    let mut info_parts = vec![format!(
        "{} {} - {}",
        link.id.cyan(),
        link.title.bold(),
        link.artist
    )];

    let platforms: Vec<&str> = link.platforms.keys().map(String::as_str).collect();
    info_parts.push(format!("[{}]", platforms.join(", ")).magenta().to_string());

    info_parts.push(
        format!("(views: {})", link.clicks)
            .dimmed()
            .cyan()
            .to_string(),
    );

    let platform_clicks: u64 = link.platform_clicks.values().sum();
    if platform_clicks > 0 {
        info_parts.push(
            format!("(platform clicks: {})", platform_clicks)
                .dimmed()
                .yellow()
                .to_string(),
        );
    }

    info_parts.join(" ")
}

pub async fn list_links(service: &LinkService, json: bool) -> Result<()> {
    if json {
        println!("{}", service.export_links().await?);
        return Ok(());
    }

    let links = service.list_links().await?;

    if links.is_empty() {
        println!("{} No smart links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Smart link list:".bold().green());
    println!();
    for link in &links {
        println!("  {}", format_link_line(link));
    }
    println!();
    println!(
        "{} Total {} smart links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_format_link_line_mentions_counters() {
        colored::control::set_override(false);

        let mut platforms = BTreeMap::new();
        platforms.insert("Spotify".to_string(), "https://open.spotify.com/t/1".to_string());
        platforms.insert("Tidal".to_string(), "https://tidal.com/t/1".to_string());
        let mut link = LinkRecord::new(
            "AbCd1234".to_string(),
            "Song".to_string(),
            "Band".to_string(),
            platforms,
        );
        link.clicks = 3;

        let line = format_link_line(&link);
        assert!(line.starts_with("AbCd1234 Song - Band"));
        assert!(line.contains("[Spotify, Tidal]"));
        assert!(line.contains("(views: 3)"));
        assert!(!line.contains("platform clicks"));

        link.platform_clicks.insert("Spotify".to_string(), 2);
        assert!(format_link_line(&link).contains("(platform clicks: 2)"));
    }
}
