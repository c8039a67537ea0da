//! Permission name parsing shared by the template parser and role requests.

use serenity::all::Permissions;

/// Discord's MANAGE_GUILD bit as it appears in the user guild list.
pub const MANAGE_GUILD_BIT: u64 = 0x20;
/// Discord's ADMINISTRATOR bit as it appears in the user guild list.
pub const ADMINISTRATOR_BIT: u64 = 0x8;

/// Whether a guild permission bitfield grants dashboard access.
pub fn has_manage_access(bits: u64) -> bool {
    bits & (MANAGE_GUILD_BIT | ADMINISTRATOR_BIT) != 0
}

/// Resolves a human readable permission name such as `Manage Server`.
///
/// Matching ignores case, spaces and underscores, so `manage_roles` and
/// `Manage Roles` are equivalent.
pub fn parse_permission_name(name: &str) -> Option<Permissions> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();

    let permission = match normalized.as_str() {
        "administrator" | "admin" => Permissions::ADMINISTRATOR,
        "manageserver" | "manageguild" => Permissions::MANAGE_GUILD,
        "manageroles" => Permissions::MANAGE_ROLES,
        "managechannels" => Permissions::MANAGE_CHANNELS,
        "managemessages" => Permissions::MANAGE_MESSAGES,
        "managenicknames" => Permissions::MANAGE_NICKNAMES,
        "manageemojis" | "manageexpressions" => Permissions::MANAGE_GUILD_EXPRESSIONS,
        "managewebhooks" => Permissions::MANAGE_WEBHOOKS,
        "manageevents" => Permissions::MANAGE_EVENTS,
        "managethreads" => Permissions::MANAGE_THREADS,
        "kickmembers" | "kick" => Permissions::KICK_MEMBERS,
        "banmembers" | "ban" => Permissions::BAN_MEMBERS,
        "timeoutmembers" | "moderatemembers" | "timeout" => Permissions::MODERATE_MEMBERS,
        "viewauditlog" => Permissions::VIEW_AUDIT_LOG,
        "viewchannel" | "viewchannels" | "readmessages" => Permissions::VIEW_CHANNEL,
        "sendmessages" => Permissions::SEND_MESSAGES,
        "embedlinks" => Permissions::EMBED_LINKS,
        "attachfiles" => Permissions::ATTACH_FILES,
        "addreactions" => Permissions::ADD_REACTIONS,
        "mentioneveryone" => Permissions::MENTION_EVERYONE,
        "readmessagehistory" => Permissions::READ_MESSAGE_HISTORY,
        "connect" => Permissions::CONNECT,
        "speak" => Permissions::SPEAK,
        "mutemembers" => Permissions::MUTE_MEMBERS,
        "deafenmembers" => Permissions::DEAFEN_MEMBERS,
        "movemembers" => Permissions::MOVE_MEMBERS,
        "changenickname" => Permissions::CHANGE_NICKNAME,
        "createinvite" | "createinstantinvite" => Permissions::CREATE_INSTANT_INVITE,
        _ => return None,
    };

    Some(permission)
}

/// Parses a comma separated permission list, or a raw numeric bitfield.
///
/// Unknown names are skipped.
pub fn parse_permission_list(text: &str) -> Permissions {
    let trimmed = text.trim().trim_start_matches('[').trim_end_matches(']');

    if let Ok(bits) = trimmed.trim().parse::<u64>() {
        return Permissions::from_bits_truncate(bits);
    }

    trimmed
        .split(',')
        .filter_map(parse_permission_name)
        .fold(Permissions::empty(), |acc, permission| acc | permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manage_access_requires_manage_guild_or_admin() {
        assert!(has_manage_access(0x20));
        assert!(has_manage_access(0x8));
        assert!(has_manage_access(0x28 | 0x400));
        assert!(!has_manage_access(0x400));
        assert!(!has_manage_access(0));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(
            parse_permission_name("Manage Server"),
            Some(Permissions::MANAGE_GUILD)
        );
        assert_eq!(
            parse_permission_name("manage_roles"),
            Some(Permissions::MANAGE_ROLES)
        );
        assert_eq!(parse_permission_name("Fly"), None);
    }

    #[test]
    fn parses_bracketed_list_and_skips_unknown() {
        let permissions = parse_permission_list("[Administrator, Manage Server, Juggle]");
        assert_eq!(
            permissions,
            Permissions::ADMINISTRATOR | Permissions::MANAGE_GUILD
        );
    }

    #[test]
    fn parses_numeric_bitfield() {
        assert_eq!(parse_permission_list("8"), Permissions::ADMINISTRATOR);
        assert_eq!(parse_permission_list(""), Permissions::empty());
    }
}
