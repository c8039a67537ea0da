use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateInputText,
    CreateModal, InputTextStyle,
};

use crate::server::model::verify::{VerifyConfig, VerifyForm};

use super::{EMBED_COLOR, VERIFY_ACCEPT, VERIFY_SETUP_MODAL};

pub const INPUT_UNVERIFIED: &str = "verify_unverified";
pub const INPUT_VERIFIED: &str = "verify_verified";
pub const INPUT_TITLE: &str = "verify_title";
pub const INPUT_DESCRIPTION: &str = "verify_description";
/// Banner URL and footer share one input, as `url | footer`, to fit Discord's five row modal limit.
pub const INPUT_BANNER_FOOTER: &str = "verify_banner_footer";

pub fn verify_embed(config: &VerifyConfig) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&config.title)
        .description(&config.description)
        .color(EMBED_COLOR);

    if let Some(banner) = &config.banner_url {
        embed = embed.image(banner);
    }
    if let Some(footer) = &config.footer_text {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

pub fn verify_button() -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(VERIFY_ACCEPT)
        .label("Verify")
        .style(ButtonStyle::Success)])
}

fn banner_footer_value(config: &VerifyConfig) -> String {
    match (&config.banner_url, &config.footer_text) {
        (Some(banner), Some(footer)) => format!("{} | {}", banner, footer),
        (Some(banner), None) => banner.clone(),
        (None, Some(footer)) => format!("| {}", footer),
        (None, None) => String::new(),
    }
}

fn input(
    style: InputTextStyle,
    label: &str,
    custom_id: &str,
    max: u16,
    required: bool,
    value: &str,
) -> CreateActionRow {
    let input = CreateInputText::new(style, label, custom_id)
        .required(required)
        .max_length(max);

    // Discord rejects an empty prefill value
    if value.is_empty() {
        CreateActionRow::InputText(input)
    } else {
        CreateActionRow::InputText(input.value(value))
    }
}

/// Prefilled with the guild's current settings.
pub fn verify_setup_modal(config: &VerifyConfig) -> CreateModal {
    CreateModal::new(VERIFY_SETUP_MODAL, "Verify Setup").components(vec![
        input(
            InputTextStyle::Short,
            "Unverified role ID (optional)",
            INPUT_UNVERIFIED,
            20,
            false,
            config.unverified_role.as_deref().unwrap_or_default(),
        ),
        input(
            InputTextStyle::Short,
            "Verified role ID (required)",
            INPUT_VERIFIED,
            20,
            true,
            config.verified_role.as_deref().unwrap_or_default(),
        ),
        input(InputTextStyle::Short, "Title", INPUT_TITLE, 100, false, &config.title),
        input(
            InputTextStyle::Paragraph,
            "Description",
            INPUT_DESCRIPTION,
            4000,
            false,
            &config.description,
        ),
        input(
            InputTextStyle::Short,
            "Banner URL | Footer (both optional)",
            INPUT_BANNER_FOOTER,
            4000,
            false,
            &banner_footer_value(config),
        ),
    ])
}

/// Builds the form from submitted inputs, looked up by custom id.
pub fn verify_form(value: impl Fn(&str) -> String) -> VerifyForm {
    let combined = value(INPUT_BANNER_FOOTER);
    let (banner_url, footer_text) = match combined.split_once('|') {
        Some((banner, footer)) => (banner.trim().to_string(), footer.trim().to_string()),
        None => (combined.trim().to_string(), String::new()),
    };

    VerifyForm {
        unverified_role: value(INPUT_UNVERIFIED),
        verified_role: value(INPUT_VERIFIED),
        title: value(INPUT_TITLE),
        description: value(INPUT_DESCRIPTION),
        banner_url,
        footer_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_banner_and_footer() {
        let form = verify_form(|id| match id {
            INPUT_VERIFIED => "42".to_string(),
            INPUT_BANNER_FOOTER => "https://cdn.example.com/banner.png | Welcome aboard".to_string(),
            _ => String::new(),
        });

        assert_eq!(form.verified_role, "42");
        assert_eq!(form.banner_url, "https://cdn.example.com/banner.png");
        assert_eq!(form.footer_text, "Welcome aboard");
    }

    #[test]
    fn footer_only_input() {
        let form = verify_form(|id| match id {
            INPUT_BANNER_FOOTER => "| Be nice".to_string(),
            _ => String::new(),
        });

        assert_eq!(form.banner_url, "");
        assert_eq!(form.footer_text, "Be nice");
    }

    #[test]
    fn prefill_round_trips_through_form() {
        let config = VerifyConfig {
            banner_url: Some("https://cdn.example.com/a.png".to_string()),
            footer_text: Some("Hi".to_string()),
            ..Default::default()
        };

        let value = banner_footer_value(&config);
        let form = verify_form(|id| match id {
            INPUT_BANNER_FOOTER => value.clone(),
            _ => String::new(),
        });

        assert_eq!(form.banner_url, "https://cdn.example.com/a.png");
        assert_eq!(form.footer_text, "Hi");
    }
}
