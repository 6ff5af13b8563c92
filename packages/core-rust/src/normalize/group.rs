use serde_json::Value;
use tracing::{debug, warn};

use super::member::normalize_members;
use super::{describe, LOG_TARGET};
use crate::aliases::{
    GROUP_ID, GROUP_ID_ON_OWNER, GROUP_PLAYERS, GROUP_TYPE, GROUP_TYPE_ON_OWNER, NESTED_GROUP,
};
use crate::raw::{FieldAliases, RawRecord};
use crate::types::{Group, GroupType, MAX_GROUP_SIZE};

/// Where a group's fields live on its owning record.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GroupFields {
    pub id: FieldAliases,
    pub players: FieldAliases,
    pub group_type: FieldAliases,
}

/// A standalone group object (`{id, players, type}`).
pub(crate) const STANDALONE_GROUP: GroupFields = GroupFields {
    id: GROUP_ID,
    players: GROUP_PLAYERS,
    group_type: GROUP_TYPE,
};

/// A group flattened onto a session or waitlist entry.
pub(crate) const OWNER_GROUP: GroupFields = GroupFields {
    id: GROUP_ID_ON_OWNER,
    players: GROUP_PLAYERS,
    group_type: GROUP_TYPE_ON_OWNER,
};

/// Normalizes a standalone group object.
///
/// The group type is taken from the record when it is a recognized tag and
/// otherwise inferred from the player count.
#[must_use]
pub fn normalize_group(raw: Option<&Value>) -> Group {
    let record = RawRecord::new(raw);
    if !record.is_object() {
        warn!(target: LOG_TARGET, kind = describe(raw), "group record is not an object; using empty group");
        return Group::empty();
    }
    group_from_record(record, &STANDALONE_GROUP)
}

/// Resolves the group owned by `owner`: a nested `group` object when present,
/// otherwise the group fields flattened onto the owner itself.
pub(crate) fn group_for_owner(owner: RawRecord<'_>, flattened: &GroupFields) -> Group {
    match owner.object(&NESTED_GROUP) {
        Some(nested) => group_from_record(nested, &STANDALONE_GROUP),
        None => group_from_record(owner, flattened),
    }
}

pub(crate) fn group_from_record(record: RawRecord<'_>, fields: &GroupFields) -> Group {
    let players = record
        .array(&fields.players)
        .map(normalize_members)
        .unwrap_or_default();

    let group_type = match record.string(&fields.group_type) {
        Some(tag) => GroupType::parse(&tag).unwrap_or_else(|| {
            debug!(target: LOG_TARGET, tag = %tag, "unrecognized group type; inferring from players");
            GroupType::for_player_count(players.len())
        }),
        None => GroupType::for_player_count(players.len()),
    };

    Group {
        id: record.string(&fields.id).unwrap_or_default(),
        players,
        group_type,
    }
}

/// Structural validity of a group. An empty player list is a recognized
/// state (cleared or blocked court), not an error.
#[must_use]
pub fn is_valid_group(group: &Group) -> bool {
    group.players.len() <= MAX_GROUP_SIZE
        && group
            .players
            .iter()
            .all(|m| !m.member_id.is_empty() && !m.display_name.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn type_inferred_when_absent() {
        let one = json!({"id": "g", "players": [{"memberId": "a", "displayName": "A"}]});
        let two = json!({"players": [{"memberId": "a"}, {"memberId": "b"}]});
        let four = json!({"participants": [{}, {}, {}, {}]});
        assert_eq!(normalize_group(Some(&one)).group_type, GroupType::Singles);
        assert_eq!(normalize_group(Some(&two)).group_type, GroupType::Doubles);
        assert_eq!(normalize_group(Some(&four)).group_type, GroupType::Foursome);
    }

    #[test]
    fn invalid_type_falls_back_to_inference() {
        let raw = json!({"type": "mixed", "players": [{"memberId": "a"}, {"memberId": "b"}]});
        assert_eq!(normalize_group(Some(&raw)).group_type, GroupType::Doubles);
    }

    #[test]
    fn explicit_type_is_kept() {
        let raw = json!({"group_type": "doubles", "players": [{"memberId": "a"}]});
        assert_eq!(normalize_group(Some(&raw)).group_type, GroupType::Doubles);
    }

    #[test]
    fn empty_group_is_valid() {
        let group = normalize_group(Some(&json!({"id": "g", "players": []})));
        assert!(group.players.is_empty());
        assert!(is_valid_group(&group));
        assert!(is_valid_group(&Group::empty()));
    }

    #[test]
    fn oversized_group_is_invalid() {
        let raw = json!({"players": [{}, {}, {}, {}, {}]});
        assert!(!is_valid_group(&normalize_group(Some(&raw))));
    }

    #[test]
    fn owner_group_does_not_borrow_owner_id() {
        let session = json!({"id": "s1", "players": [{"memberId": "a"}]});
        let group = group_for_owner(RawRecord::new(Some(&session)), &OWNER_GROUP);
        assert_eq!(group.id, "");
        assert_eq!(group.players.len(), 1);
    }

    #[test]
    fn nested_group_takes_precedence_over_owner_fields() {
        let entry = json!({
            "id": "w1",
            "players": [{"memberId": "ignored"}],
            "group": {"id": "g1", "players": [{"memberId": "a"}, {"memberId": "b"}]}
        });
        let group = group_for_owner(RawRecord::new(Some(&entry)), &OWNER_GROUP);
        assert_eq!(group.id, "g1");
        assert_eq!(group.group_type, GroupType::Doubles);
    }

    #[test]
    fn null_group_is_empty() {
        assert_eq!(normalize_group(None), Group::empty());
    }
}
