//! Rules panel configuration, stored under the `rules` key of the guild config.

use serde::{Deserialize, Serialize};

pub const MAX_RULE_TITLE: usize = 100;
pub const MAX_RULE_DESCRIPTION: usize = 500;
pub const MAX_FOOTER: usize = 120;
pub const MAX_BANNER_URL: usize = 2048;

pub const DEFAULT_DETAIL_FOOTER: &str = "Questions? Ask staff for clarification.";
pub const DEFAULT_BULK_DESCRIPTION: &str = "Details for this rule.";
pub const NO_DETAILS: &str = "No details available.";

/// Emoji cycled through by bulk rule entry.
pub const BULK_PALETTE: [&str; 5] = ["🟦", "🟩", "🟧", "🟥", "🟪"];

const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".webp", ".gif"];

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Whether a URL points at an image Discord can render as an embed banner.
///
/// Accepts base64 `data:image/` URIs and http(s) links whose path, ignoring any query
/// string, ends in a common image extension.
pub fn is_image_link(url: &str) -> bool {
    let lowered = url.to_lowercase();

    if lowered.starts_with("data:image/") && lowered.contains("base64,") {
        return true;
    }
    if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
        return false;
    }

    let path = lowered.split('?').next().unwrap_or_default();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

pub fn is_valid_banner_url(url: &str) -> bool {
    !url.is_empty() && url.len() <= MAX_BANNER_URL && is_image_link(url)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCategory {
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default = "default_category_color")]
    pub color: String,
    #[serde(default = "default_category_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

fn default_category_color() -> String {
    "red".to_string()
}

fn default_category_title() -> String {
    "Item".to_string()
}

impl RuleCategory {
    fn new(emoji: &str, color: &str, title: &str, description: &str) -> Self {
        Self {
            emoji: Some(emoji.to_string()),
            color: color.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    pub title_text: String,
    pub welcome_title: String,
    pub welcome_body: String,
    pub description_text: String,
    pub categories: Vec<RuleCategory>,
    pub banner_url: Option<String>,
    pub footer_text: Option<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            title_text: "Server Rules".to_string(),
            welcome_title: "Welcome!".to_string(),
            welcome_body: "Thanks for being here. These rules are the basics for keeping things safe, friendly, and fun for everyone.".to_string(),
            description_text: "If something isn't covered below, staff may apply common-sense judgment to protect the community. Questions or concerns? Ask the team before it becomes an issue.".to_string(),
            categories: vec![
                RuleCategory::new(
                    "📘",
                    "red",
                    "General Guidelines",
                    "Be kind and on-topic. No spam/NSFW/hate speech. Follow staff direction and use the right channels.",
                ),
                RuleCategory::new(
                    "🟩",
                    "green",
                    "Minor Offenses",
                    "- Light spam or emoji flooding\n- Off-topic messages\n- Mild language/low-effort trolling\nLikely: warning or short mute.",
                ),
                RuleCategory::new(
                    "🟧",
                    "orange",
                    "Moderate Offenses",
                    "- Advertising without permission\n- Impersonation\n- Ignoring staff direction\n- Disturbing content\nLikely: timeout, mute, or kick.",
                ),
                RuleCategory::new(
                    "🟥",
                    "red",
                    "Major Offenses",
                    "- Hate/harassment/threats\n- Doxxing/personal info\n- Severe NSFW/illegal content\n- Raid/ban evasion\nLikely: ban and report to Discord.",
                ),
            ],
            banner_url: None,
            footer_text: None,
        }
    }
}

impl RulesConfig {
    /// Enforces length limits and drops banners that are not image links.
    pub fn sanitized(mut self) -> Self {
        self.categories = self
            .categories
            .into_iter()
            .map(|category| RuleCategory {
                emoji: category.emoji.filter(|emoji| !emoji.trim().is_empty()),
                color: category.color,
                title: truncate_chars(&category.title, MAX_RULE_TITLE),
                description: truncate_chars(&category.description, MAX_RULE_DESCRIPTION),
            })
            .collect();

        self.banner_url = self.banner_url.filter(|url| is_valid_banner_url(url));
        self.footer_text = self
            .footer_text
            .filter(|footer| !footer.trim().is_empty())
            .map(|footer| truncate_chars(&footer, MAX_FOOTER));

        self
    }

    /// Body of the overview embed: bold welcome line, welcome body, then notes.
    pub fn overview_description(&self) -> String {
        format!(
            "**{}**\n\n{}\n\n{}",
            self.welcome_title, self.welcome_body, self.description_text
        )
        .trim()
        .to_string()
    }

    pub fn category(&self, index: usize) -> Option<&RuleCategory> {
        self.categories.get(index)
    }

    pub fn detail_footer(&self) -> String {
        truncate_chars(
            self.footer_text.as_deref().unwrap_or(DEFAULT_DETAIL_FOOTER),
            MAX_FOOTER,
        )
    }
}

/// Builds categories from `Title | Description` lines, skipping blank entries.
///
/// Returns an empty list when every entry is blank.
pub fn parse_bulk_rules(entries: &[String]) -> Vec<RuleCategory> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let text = entry.trim();
            if text.is_empty() {
                return None;
            }

            let (title, description) = match text.split_once('|') {
                Some((title, description)) => (
                    truncate_chars(title.trim(), MAX_RULE_TITLE),
                    truncate_chars(description.trim(), MAX_RULE_DESCRIPTION),
                ),
                None => (
                    truncate_chars(text, MAX_RULE_TITLE),
                    DEFAULT_BULK_DESCRIPTION.to_string(),
                ),
            };

            Some(RuleCategory {
                emoji: Some(BULK_PALETTE[index % BULK_PALETTE.len()].to_string()),
                color: default_category_color(),
                title: if title.is_empty() {
                    format!("Rule {}", index + 1)
                } else {
                    title
                },
                description,
            })
        })
        .collect()
}
