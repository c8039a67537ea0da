//! Admin utility embeds: setup, help, health and the guild welcome DM.

use serenity::all::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter};

use crate::server::{
    service::template::catalog::{self, TEMPLATE_NAMES},
    util::url::strip_port,
};

use super::{EMBED_COLOR, EMBED_THUMBNAIL};

/// Renders a duration in seconds as `Xd Xh Xm Xs`.
pub fn format_uptime(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

fn template_summary() -> String {
    TEMPLATE_NAMES
        .iter()
        .map(|name| {
            let template = catalog::template(name);
            format!(
                "**{}**: {} roles, {} channels",
                name,
                template.roles.len(),
                template.channel_count()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn setup_embed(dashboard_url: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("⚙️ Server Setup")
        .description(format!(
            "Configure this server from the dashboard: {}\n\nApply a template there or paste a text structure to build channels and roles.",
            strip_port(dashboard_url)
        ))
        .field("Templates", template_summary(), false)
        .thumbnail(EMBED_THUMBNAIL)
        .color(EMBED_COLOR)
}

pub fn setup_buttons(dashboard_url: &str, support_url: &str) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new_link(strip_port(dashboard_url)).label("🌐 Open Dashboard"),
        CreateButton::new_link(support_url).label("Support Server"),
    ])
}

const STRUCTURE_EXAMPLE: &str = "```
WELCOME (category)
  #rules | Read before chatting
  #announcements
COMMUNITY (category)
  #general
  🔊 Lounge
  Music (voice)
```";

const ROLES_EXAMPLE: &str = "```
STAFF (roles)
  Admin | Color: #E74C3C | Permissions: [Administrator]
  Moderator | Color: #3498DB | Permissions: [Kick Members, Ban Members]
```";

pub fn help_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("Channel Builder Help")
        .description(
            "Paste a server structure on the dashboard to create categories, channels and roles in one go.",
        )
        .field("Channels", STRUCTURE_EXAMPLE, false)
        .field("Roles", ROLES_EXAMPLE, false)
        .field(
            "Commands",
            "`/setup` dashboard link and templates\n`/rules` `/verify` `/giveaway_start` `/rank` `/daily`\n`/health` bot status",
            false,
        )
        .color(EMBED_COLOR)
}

pub struct HealthReport {
    pub latency_ms: Option<u128>,
    pub uptime_seconds: u64,
    pub guilds: usize,
    pub channels: usize,
}

pub fn health_embed(report: &HealthReport) -> CreateEmbed {
    let (status, latency) = match report.latency_ms {
        Some(ms) => ("🟢 Online", format!("{} ms", ms)),
        None => ("🟠 Degraded", "unavailable".to_string()),
    };

    CreateEmbed::new()
        .title("Bot Health")
        .field("Status", status, true)
        .field("REST latency", latency, true)
        .field("Uptime", format_uptime(report.uptime_seconds), true)
        .field("Guilds", report.guilds.to_string(), true)
        .field("Channels", report.channels.to_string(), true)
        .field(
            "Runtime",
            format!("Rust, {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            true,
        )
        .color(EMBED_COLOR)
}

/// DM sent to the owner of a guild the bot just joined.
pub fn welcome_embed(guild_name: &str, dashboard_url: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("Thanks for adding me to {}!", guild_name))
        .description(format!(
            "Run `/setup` in your server to get started, or open the dashboard at {} to configure verification, rules, tickets and more.",
            strip_port(dashboard_url)
        ))
        .thumbnail(EMBED_THUMBNAIL)
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new("Need a hand? Join the support server."))
}

pub fn support_button(support_url: &str) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new_link(support_url).label("Support Server")
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_breaks_into_units() {
        assert_eq!(format_uptime(0), "0d 0h 0m 0s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
        assert_eq!(format_uptime(3_599), "0d 0h 59m 59s");
    }

    #[test]
    fn setup_link_drops_port() {
        let json =
            serde_json::to_value(setup_buttons("http://dash.example.com:6767", "https://discord.gg/x"))
                .unwrap();

        assert_eq!(json["components"][0]["url"], "http://dash.example.com");
        assert_eq!(json["components"][1]["label"], "Support Server");
    }

    #[test]
    fn setup_lists_every_template() {
        let json = serde_json::to_value(setup_embed("http://localhost:6767")).unwrap();

        let summary = json["fields"][0]["value"].as_str().unwrap();
        for name in TEMPLATE_NAMES {
            assert!(summary.contains(name));
        }
    }

    #[test]
    fn health_without_latency_is_degraded() {
        let report = HealthReport {
            latency_ms: None,
            uptime_seconds: 61,
            guilds: 3,
            channels: 40,
        };

        let json = serde_json::to_value(health_embed(&report)).unwrap();

        assert_eq!(json["fields"][0]["value"], "🟠 Degraded");
        assert_eq!(json["fields"][2]["value"], "0d 0h 1m 1s");
    }
}
