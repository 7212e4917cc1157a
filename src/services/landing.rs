//! Landing page rendering
//!
//! Every record field reaching the page goes through [`escape_html`];
//! platform labels are additionally sanitized so the `data-platform` value
//! the tracking script reports back is already in the accepted character set.

use std::fmt::Write;

use crate::storage::{LinkRecord, Platform};
use crate::utils::{escape_html, sanitize_platform};

const STYLE: &str = r#"
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; background: #1a1a2e; color: #fff; }
    .container { max-width: 480px; margin: 0 auto; padding: 48px 16px; }
    .music-card { background: #16213e; border-radius: 16px; padding: 32px 24px; text-align: center; }
    h1 { margin: 0 0 8px; font-size: 1.6rem; }
    h2 { margin: 0 0 24px; font-size: 1.1rem; font-weight: 400; color: #b8c1ec; }
    .platforms { display: flex; flex-direction: column; gap: 12px; }
    .platform-btn { display: flex; align-items: center; gap: 12px; padding: 14px 18px; border-radius: 10px; background: #0f3460; color: #fff; text-decoration: none; font-weight: 600; }
    .platform-btn:hover { background: #e94560; }
"#;

const TRACKING_SCRIPT: &str = r#"
    function validateInput(input, maxLength) {
      if (!input || typeof input !== 'string') return null;
      var sanitized = input.replace(/[^a-zA-Z0-9 \-_\.]/g, '');
      return sanitized.length > 0 && sanitized.length <= maxLength ? sanitized : null;
    }

    function trackClick(linkId, platform) {
      var validLinkId = validateInput(linkId, 64);
      var validPlatform = validateInput(platform, 50);
      if (!validLinkId || !validPlatform) {
        console.error('Invalid tracking parameters');
        return;
      }
      fetch('/api/track-click', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ linkId: validLinkId, platform: validPlatform }),
        keepalive: true
      }).catch(function (err) { console.error('Tracking error:', err); });
    }

    document.addEventListener('DOMContentLoaded', function () {
      document.querySelector('.platforms').addEventListener('click', function (e) {
        var btn = e.target.closest('.platform-btn');
        if (btn) {
          trackClick(btn.getAttribute('data-linkid'), btn.getAttribute('data-platform'));
        }
      });
    });
"#;

/// Render the visitor-facing page for `link`.
pub fn render_landing_page(link: &LinkRecord) -> String {
    let title = escape_html(&link.title);
    let artist = escape_html(&link.artist);
    let link_id = escape_html(&link.id);

    let mut buttons = String::new();
    for (platform, url) in &link.platforms {
        let label = sanitize_platform(platform);
        if label.is_empty() {
            continue;
        }
        let label = escape_html(&label);
        // write! 到 String 不会失败
        let _ = write!(
            buttons,
            r#"
        <a href="{url}" class="platform-btn" target="_blank" rel="noopener noreferrer" data-linkid="{link_id}" data-platform="{label}">
          <span class="platform-icon">{icon}</span>
          {label}
        </a>"#,
            url = escape_html(url),
            link_id = link_id,
            label = label,
            icon = Platform::icon_for(platform),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title} by {artist}</title>
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <div class="music-card">
      <h1>{title}</h1>
      <h2>by {artist}</h2>
      <p>Choose your preferred music platform:</p>
      <div class="platforms">{buttons}
      </div>
    </div>
  </div>
  <script>{script}</script>
</body>
</html>"#,
        title = title,
        artist = artist,
        style = STYLE,
        buttons = buttons,
        script = TRACKING_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn link(title: &str, platforms: &[(&str, &str)]) -> LinkRecord {
        let platforms: BTreeMap<String, String> = platforms
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LinkRecord::new("abc123XY".into(), title.into(), "Artist & Co".into(), platforms)
    }

    #[test]
    fn test_renders_each_platform() {
        let html = render_landing_page(&link(
            "Song A",
            &[
                ("Spotify", "https://open.spotify.com/x"),
                ("Apple Music", "https://music.apple.com/y"),
            ],
        ));
        assert!(html.contains(r#"href="https://open.spotify.com/x""#));
        assert!(html.contains(r#"data-platform="Apple Music""#));
        assert!(html.contains(r#"data-linkid="abc123XY""#));
        assert!(html.contains("🍎"));
        assert!(html.contains("<title>Song A by Artist &amp; Co</title>"));
    }

    #[test]
    fn test_escapes_record_fields() {
        let html = render_landing_page(&link(
            "<script>alert('x')</script>",
            &[("Spotify", "https://a.com/?q=\"><img src=x>")],
        ));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(html.contains("https://a.com/?q=&quot;&gt;&lt;img src=x&gt;"));
    }

    #[test]
    fn test_platform_label_is_sanitized() {
        let html = render_landing_page(&link("T", &[("Odd\"Name<>", "https://a.com")]));
        assert!(html.contains(r#"data-platform="OddName""#));
        assert!(html.contains("🎵"));
    }
}
