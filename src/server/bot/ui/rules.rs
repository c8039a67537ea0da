use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateInputText,
    CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, InputTextStyle,
    ReactionType,
};

use crate::server::model::rules::{
    truncate_chars, RulesConfig, MAX_FOOTER, MAX_RULE_DESCRIPTION, MAX_RULE_TITLE, NO_DETAILS,
};

use super::{
    EMBED_COLOR, RULES_ACCENT_COLOR, RULES_BANNER_MODAL, RULES_BULK_MODAL, RULES_FOOTER_MODAL,
    RULES_SELECT, RULES_SETUP_BANNER, RULES_SETUP_BULK, RULES_SETUP_CLEAR_BANNER,
    RULES_SETUP_FOOTER, RULES_SETUP_TEXTS, RULES_TEXTS_MODAL,
};

pub const INPUT_TITLE: &str = "rules_title";
pub const INPUT_WELCOME: &str = "rules_welcome";
pub const INPUT_BODY: &str = "rules_body";
pub const INPUT_DESCRIPTION: &str = "rules_desc";
pub const INPUT_BANNER: &str = "rules_banner";
pub const INPUT_FOOTER: &str = "rules_footer";
/// Inputs `rule_1` through `rule_5` of the bulk modal.
pub const BULK_INPUT_PREFIX: &str = "rule_";
pub const BULK_INPUTS: usize = 5;

/// Select menu labels are capped at 100 characters by Discord.
const MAX_OPTION_LABEL: usize = 100;

pub fn rules_embed(config: &RulesConfig) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&config.title_text)
        .description(config.overview_description())
        .color(RULES_ACCENT_COLOR);

    if let Some(banner) = &config.banner_url {
        embed = embed.image(banner);
    }
    if let Some(footer) = &config.footer_text {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }

    embed
}

/// One option per category; the option value is the category index.
pub fn rules_select(config: &RulesConfig) -> CreateActionRow {
    let options = config
        .categories
        .iter()
        .enumerate()
        .take(25)
        .map(|(index, category)| {
            let option =
                CreateSelectMenuOption::new(truncate_chars(&category.title, MAX_OPTION_LABEL), index.to_string());
            match &category.emoji {
                Some(emoji) => option.emoji(ReactionType::Unicode(emoji.clone())),
                None => option,
            }
        })
        .collect();

    CreateActionRow::SelectMenu(
        CreateSelectMenu::new(RULES_SELECT, CreateSelectMenuKind::String { options })
            .placeholder("Make a selection")
            .min_values(1)
            .max_values(1),
    )
}

pub fn rules_detail(config: &RulesConfig, index: Option<usize>) -> CreateEmbed {
    match index.and_then(|index| config.category(index)) {
        Some(category) => CreateEmbed::new()
            .title(&category.title)
            .description(&category.description)
            .color(RULES_ACCENT_COLOR)
            .footer(CreateEmbedFooter::new(config.detail_footer())),
        None => CreateEmbed::new()
            .title("Rules")
            .description(NO_DETAILS)
            .color(EMBED_COLOR),
    }
}

pub fn rules_setup_embed(config: &RulesConfig) -> CreateEmbed {
    let summary = if config.categories.is_empty() {
        "No categories set yet.".to_string()
    } else {
        config
            .categories
            .iter()
            .enumerate()
            .map(|(index, category)| format!("{}) {}", index + 1, category.title))
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title("Rules Setup")
        .description(format!(
            "Manage all rules settings here. Buttons below let you edit texts, bulk rules, and banner.\nCurrent banner: {}",
            config.banner_url.as_deref().unwrap_or("None")
        ))
        .field("Rules overview", summary, false)
        .color(EMBED_COLOR)
        .footer(CreateEmbedFooter::new(
            "Owner only - changes apply to this server only",
        ))
}

pub fn rules_setup_buttons() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(RULES_SETUP_TEXTS)
            .label("Edit Texts")
            .style(ButtonStyle::Primary),
        CreateButton::new(RULES_SETUP_BULK)
            .label("Bulk Rules")
            .style(ButtonStyle::Secondary),
        CreateButton::new(RULES_SETUP_BANNER)
            .label("Set Banner")
            .style(ButtonStyle::Success),
        CreateButton::new(RULES_SETUP_CLEAR_BANNER)
            .label("Clear Banner")
            .style(ButtonStyle::Danger),
        CreateButton::new(RULES_SETUP_FOOTER)
            .label("Set Footer")
            .style(ButtonStyle::Secondary),
    ])
}

fn input(style: InputTextStyle, label: &str, custom_id: &str, max: usize) -> CreateInputText {
    CreateInputText::new(style, label, custom_id)
        .required(false)
        .max_length(max as u16)
}

/// Prefilled with the current texts.
pub fn texts_modal(config: &RulesConfig) -> CreateModal {
    CreateModal::new(RULES_TEXTS_MODAL, "Edit Rules Texts").components(vec![
        CreateActionRow::InputText(
            input(InputTextStyle::Short, "Title", INPUT_TITLE, MAX_RULE_TITLE)
                .value(truncate_chars(&config.title_text, MAX_RULE_TITLE)),
        ),
        CreateActionRow::InputText(
            input(InputTextStyle::Short, "Welcome title", INPUT_WELCOME, MAX_RULE_TITLE)
                .value(truncate_chars(&config.welcome_title, MAX_RULE_TITLE)),
        ),
        CreateActionRow::InputText(
            input(InputTextStyle::Paragraph, "Welcome body", INPUT_BODY, MAX_RULE_DESCRIPTION)
                .value(truncate_chars(&config.welcome_body, MAX_RULE_DESCRIPTION)),
        ),
        CreateActionRow::InputText(
            input(
                InputTextStyle::Paragraph,
                "Description",
                INPUT_DESCRIPTION,
                MAX_RULE_DESCRIPTION,
            )
            .value(truncate_chars(&config.description_text, MAX_RULE_DESCRIPTION)),
        ),
    ])
}

pub fn bulk_modal() -> CreateModal {
    let rows = (1..=BULK_INPUTS)
        .map(|n| {
            CreateActionRow::InputText(
                input(
                    InputTextStyle::Short,
                    &format!("Rule {} (Title | Description)", n),
                    &format!("{}{}", BULK_INPUT_PREFIX, n),
                    MAX_RULE_TITLE + MAX_RULE_DESCRIPTION + 3,
                )
                .placeholder("Be respectful | No harassment or hate speech"),
            )
        })
        .collect();

    CreateModal::new(RULES_BULK_MODAL, "Bulk Rules").components(rows)
}

pub fn banner_modal() -> CreateModal {
    CreateModal::new(RULES_BANNER_MODAL, "Set Rules Banner URL").components(vec![
        CreateActionRow::InputText(input(
            InputTextStyle::Short,
            "Banner image URL (leave empty to remove)",
            INPUT_BANNER,
            4000,
        )),
    ])
}

pub fn footer_modal() -> CreateModal {
    CreateModal::new(RULES_FOOTER_MODAL, "Set Rules Footer").components(vec![
        CreateActionRow::InputText(
            input(
                InputTextStyle::Short,
                "Footer text (optional)",
                INPUT_FOOTER,
                MAX_FOOTER,
            )
            .placeholder("e.g. Be respectful to everyone."),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_for_unknown_index_says_no_details() {
        let config = RulesConfig::default();

        let json = serde_json::to_value(rules_detail(&config, Some(99))).unwrap();

        assert_eq!(json["description"], NO_DETAILS);
    }

    #[test]
    fn detail_uses_category_text() {
        let config = RulesConfig::default();

        let json = serde_json::to_value(rules_detail(&config, Some(0))).unwrap();

        assert_eq!(json["title"], "General Guidelines");
        assert_eq!(json["color"], RULES_ACCENT_COLOR);
    }

    #[test]
    fn setup_embed_lists_categories() {
        let json = serde_json::to_value(rules_setup_embed(&RulesConfig::default())).unwrap();

        let overview = json["fields"][0]["value"].as_str().unwrap();
        assert!(overview.starts_with("1) General Guidelines"));
        assert!(json["description"]
            .as_str()
            .unwrap()
            .ends_with("Current banner: None"));
    }
}
