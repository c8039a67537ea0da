//! Leveling info posted by the queued leveling setup.

use serenity::all::CreateEmbed;

use crate::server::model::leveling::{
    xp_to_next_level, XP_COOLDOWN_SECONDS, XP_PER_MESSAGE_MAX, XP_PER_MESSAGE_MIN,
};

use super::EMBED_COLOR;

/// Total XP a member needs to reach `level` from zero.
pub fn total_xp_for_level(level: u32) -> i64 {
    (0..level as i32).map(xp_to_next_level).sum()
}

pub fn leveling_info_embed(milestones: &[u32]) -> CreateEmbed {
    let rewards = if milestones.is_empty() {
        "No level roles configured yet.".to_string()
    } else {
        milestones
            .iter()
            .map(|level| {
                format!(
                    "**Level {}** ({} XP) unlocks the `Level {}` role",
                    level,
                    total_xp_for_level(*level),
                    level
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title("📈 Leveling")
        .description(format!(
            "Chat to earn {}-{} XP per message, at most once every {} seconds.\n\
             Use `/rank` to see your progress and `/leaderboard` for the top members.",
            XP_PER_MESSAGE_MIN, XP_PER_MESSAGE_MAX, XP_COOLDOWN_SECONDS
        ))
        .field("Level Rewards", rewards, false)
        .color(EMBED_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_xp_sums_the_curve() {
        assert_eq!(total_xp_for_level(0), 0);
        assert_eq!(total_xp_for_level(1), 100);
        assert_eq!(total_xp_for_level(2), 255);
    }

    #[test]
    fn info_lists_each_milestone() {
        let json = serde_json::to_value(leveling_info_embed(&[5, 10])).unwrap();
        let rewards = json["fields"][0]["value"].as_str().unwrap();

        assert!(rewards.contains("**Level 5**"));
        assert!(rewards.contains("`Level 10`"));
    }

    #[test]
    fn info_without_milestones_says_so() {
        let json = serde_json::to_value(leveling_info_embed(&[])).unwrap();

        assert_eq!(json["fields"][0]["value"], "No level roles configured yet.");
    }
}
