//! Group roster recognition: listings, followers, departures, and resets.

use super::strip_article;
use once_cell::sync::Lazy;
use regex::Regex;
use wingman_types::{Character, ResourceBar, StatusFlags};

/// Class token that marks a non-player group member (pets, charmed creatures).
pub const CREATURE_CLASS: &str = "mob";

/// One roster line:
/// `[Orc            40]  B        Earthquack           227/ 394 ( 57%)     354/ 394 ( 89%)     326/ 326 (100%)`
static ROSTER_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\[\s*(?P<cls>[A-Za-z]+)\s+(?P<lvl>\d+)\s*\]",
        r"\s+(?P<status>(?:[BPDS]\s)*)",
        r"(?P<name>.+?)",
        r"\s+(?P<hp>\d+/\s*\d+)",
        r".*?\s+(?P<fat>\d+/\s*\d+)",
        r".*?\s+(?P<pwr>\d+/\s*\d+)",
    ))
    .expect("Invalid roster line regex")
});

static FOLLOWER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<name>[A-Za-z][A-Za-z -]*?) follows you\b").expect("Invalid follower regex")
});

static LEAVING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<name>[a-z][a-z -]*?) disbands from (?:your|the) group")
        .expect("Invalid leaving regex")
});

static GROUP_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<leader>[A-Za-z]+)'s group:").expect("Invalid group header regex")
});

static SELF_DISBAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)you disband from").expect("Invalid self disband regex"));

static LEADER_DISBAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<name>[A-Za-z]+) disbanded their group\.").expect("Invalid leader disband regex")
});

fn is_roster_candidate(line: &str) -> bool {
    line.contains(']') && line.contains('/')
}

/// Parse every roster line and follower announcement in `text`, in order.
///
/// Members whose class is [`CREATURE_CLASS`] are dropped unless
/// `include_creatures` is set.
pub fn parse_roster(text: &str, include_creatures: bool) -> Vec<Character> {
    text.lines()
        .filter_map(|line| {
            if is_roster_candidate(line) {
                parse_roster_line(line, include_creatures)
            } else {
                parse_follower(line)
            }
        })
        .collect()
}

/// Parse a single roster line into a classified member.
pub fn parse_roster_line(line: &str, include_creatures: bool) -> Option<Character> {
    let caps = ROSTER_LINE_RE.captures(line)?;

    let class = &caps["cls"];
    if !include_creatures && class.eq_ignore_ascii_case(CREATURE_CLASS) {
        return None;
    }

    let name = caps["name"].trim();
    if name.is_empty() {
        return None;
    }

    Some(Character::member(
        name,
        class,
        caps["lvl"].parse().ok()?,
        StatusFlags::from_markers(&caps["status"]),
        ResourceBar::parse(&caps["hp"])?,
        ResourceBar::parse(&caps["fat"])?,
        ResourceBar::parse(&caps["pwr"])?,
    ))
}

/// Parse "`<name> follows you`" into an unclassified follower.
///
/// Shapeshifted and disguised creatures are announced with an indefinite
/// article ("A black wolf follows you"); the article is dropped from the name.
pub fn parse_follower(line: &str) -> Option<Character> {
    let caps = FOLLOWER_RE.captures(line)?;
    let name = strip_article(caps["name"].trim());
    if name.is_empty() {
        return None;
    }
    Some(Character::follower(name))
}

/// Names of members announced as leaving the group, without a leading article.
pub fn parse_leaving(text: &str) -> Vec<String> {
    LEAVING_RE
        .captures_iter(text)
        .map(|caps| strip_article(caps["name"].trim()).to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Leader named in a "`<name>'s group:`" listing header.
pub fn parse_group_header(text: &str) -> Option<&str> {
    GROUP_HEADER_RE
        .captures(text)
        .and_then(|caps| caps.name("leader"))
        .map(|m| m.as_str())
}

/// Whether `text` invalidates the whole roster: a fresh listing header or the
/// player leaving their group.
pub fn is_roster_reset(text: &str) -> bool {
    GROUP_HEADER_RE.is_match(text) || SELF_DISBAND_RE.is_match(text)
}

/// Whether the current leader disbanded the group.
///
/// Needs the roster context: with no leader known this is always false.
pub fn is_leader_disband(text: &str, leader: Option<&str>) -> bool {
    let Some(leader) = leader else {
        return false;
    };
    LEADER_DISBAND_RE
        .captures_iter(text)
        .any(|caps| &caps["name"] == leader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_group_block() {
        let block = "
        [ Class         Lvl] Status      Name                 Hits                Fat                Power
        [Orc            40]  B        Earthquack           227/ 394 ( 57%)     354/ 394 ( 89%)     326/ 326 (100%)
        [Kenku          70]           Big                  550/ 550 (100%)     538/ 550 ( 97%)      63/  73 ( 86%)
        ";

        let members = parse_roster(block, false);
        assert_eq!(members.len(), 2);

        let p1 = &members[0];
        assert_eq!(p1.class, "Orc");
        assert_eq!(p1.level, Some(40));
        assert_eq!(p1.status, StatusFlags::BLEEDING);
        assert_eq!(p1.name, "Earthquack");
        assert_eq!(p1.hp, ResourceBar::new(227, 394));
        assert_eq!(p1.fatigue, ResourceBar::new(354, 394));
        assert_eq!(p1.power, ResourceBar::new(326, 326));

        let p2 = &members[1];
        assert_eq!(p2.class, "Kenku");
        assert_eq!(p2.name, "Big");
        assert_eq!(p2.status, StatusFlags::empty());
        assert_eq!(p2.power, ResourceBar::new(63, 73));
    }

    #[test]
    fn test_parse_single_line_update() {
        let line = "[Kenku          58]  B        Quacamole            360/ 510 ( 70%)    479/ 510 ( 93%)     37/  69 ( 53%)  ";
        let member = parse_roster_line(line, false).unwrap();
        assert_eq!(member.status, StatusFlags::BLEEDING);
        assert_eq!(member.name, "Quacamole");
    }

    #[test]
    fn test_individual_status_flags() {
        let cases = [
            ("B", StatusFlags::BLEEDING),
            ("P", StatusFlags::POISONED),
            ("D", StatusFlags::DISEASED),
            ("S", StatusFlags::STUNNED),
        ];
        for (marker, expected) in cases {
            let line = format!(
                "[Sin         74] {marker}       Beautiful        500/500 (100%)  500/500 (100%)  418/731 ( 57%)"
            );
            let member = parse_roster_line(&line, false).unwrap();
            assert_eq!(member.status, expected, "marker {marker}");
            assert_eq!(member.name, "Beautiful");
        }
    }

    #[test]
    fn test_multiple_status_flags() {
        let cases = [
            ("B P    ", StatusFlags::BLEEDING | StatusFlags::POISONED),
            ("D S    ", StatusFlags::DISEASED | StatusFlags::STUNNED),
            ("B P D  ", StatusFlags::BLEEDING | StatusFlags::POISONED | StatusFlags::DISEASED),
            ("P D S  ", StatusFlags::POISONED | StatusFlags::DISEASED | StatusFlags::STUNNED),
            ("B P D S", StatusFlags::all()),
        ];
        for (markers, expected) in cases {
            let line = format!(
                "[Sin         74] {markers} Beautiful        500/500 (100%)  500/500 (100%)  418/731 ( 57%)"
            );
            let member = parse_roster_line(&line, false).unwrap();
            assert_eq!(member.status, expected, "markers {markers:?}");
            assert_eq!(member.name, "Beautiful");
        }
    }

    #[test]
    fn test_ignores_headers_and_noise() {
        let header = "[ Class         Lvl] Status      Name                 Hits                Fat                Power";
        assert!(parse_roster(header, false).is_empty());
        assert!(parse_roster("[10:00] nothing to see 1/2", false).is_empty());
    }

    #[test]
    fn test_creature_members_excluded_by_default() {
        let line = "[mob            20]           Skeleton         100/100 (100%)  100/100 (100%)  100/100 (100%)";
        assert!(parse_roster_line(line, false).is_none());

        let included = parse_roster_line(line, true).unwrap();
        assert_eq!(included.class, "mob");
        assert_eq!(included.name, "Skeleton");
    }

    #[test]
    fn test_parse_follower() {
        let follower = parse_follower("FooBar follows you").unwrap();
        assert_eq!(follower.name, "FooBar");
        assert!(follower.is_new_follower);
        assert!(!follower.is_classified());
    }

    #[test]
    fn test_parse_follower_with_article() {
        let follower = parse_follower("A black wolf follows you.").unwrap();
        assert_eq!(follower.name, "black wolf");

        let follower = parse_follower("An eagle follows you.").unwrap();
        assert_eq!(follower.name, "eagle");
    }

    #[test]
    fn test_follower_not_matched_without_phrase() {
        assert!(parse_follower("FooBar waves at you").is_none());
    }

    #[test]
    fn test_parse_roster_mixes_members_and_followers() {
        let block = "[Sin            69]           Beautiful            500/ 500 (100%)    497/ 500 ( 99%)    592/ 707 ( 83%)\nFooBar follows you";
        let members = parse_roster(block, false);
        assert_eq!(members.len(), 2);
        assert!(members[0].is_classified());
        assert!(members[1].is_new_follower);
    }

    #[test]
    fn test_parse_leaving() {
        assert_eq!(parse_leaving("Baz disbands from the group."), vec!["Baz"]);
        assert_eq!(parse_leaving("Baz disbands from your group."), vec!["Baz"]);
        assert_eq!(parse_leaving("A black wolf disbands from your group."), vec!["black wolf"]);
        assert_eq!(parse_leaving("An eagle disbands from the group."), vec!["eagle"]);
        assert_eq!(parse_leaving("Anna disbands from the group."), vec!["Anna"]);
        assert!(parse_leaving("Baz leaves north.").is_empty());
    }

    #[test]
    fn test_parse_leaving_multiple() {
        let text = "Foo disbands from the group.\nBar disbands from the group.";
        assert_eq!(parse_leaving(text), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_roster_reset_triggers() {
        assert!(is_roster_reset("<10:00:00> Earthquack's group:"));
        assert!(is_roster_reset("You disband from the group."));
        assert!(!is_roster_reset("Earthquack says 'group up'"));
        assert_eq!(parse_group_header("Beautiful's group:"), Some("Beautiful"));
    }

    #[test]
    fn test_leader_disband_requires_matching_leader() {
        let text = "Foo disbanded their group.";
        assert!(is_leader_disband(text, Some("Foo")));
        assert!(!is_leader_disband(text, Some("Bar")));
        assert!(!is_leader_disband(text, None));
    }
}
