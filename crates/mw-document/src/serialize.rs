use std::collections::BTreeMap;

use log::debug;
use mw_core::{Connection, Direction, GraphStore, Location};

use crate::schema::{LocationRecord, PlayerRecord, WorldDocument};

/// Start location used when the map has no locations at all.
pub const FALLBACK_START: &str = "courtyard";

/// Project the graph into a fresh, uninitialized engine document.
pub fn serialize(graph: &GraphStore) -> WorldDocument {
    serialize_with_fallback(graph, FALLBACK_START)
}

/// Like [`serialize`], with a custom start id for empty maps.
pub fn serialize_with_fallback(graph: &GraphStore, fallback_start: &str) -> WorldDocument {
    let player = match graph.locations().first() {
        Some(first) => PlayerRecord::starting_at(first.id.clone(), true),
        None => PlayerRecord::starting_at(fallback_start, false),
    };

    let mut doc = WorldDocument::new(player);
    doc.locations = graph
        .locations()
        .iter()
        .map(|loc| (loc.id.clone(), location_record(loc, graph.connections())))
        .collect();
    doc.items = graph.items().clone();
    doc.npcs = graph.characters().clone();

    debug!(
        "serialized {} location(s), {} item(s), {} character(s); start {}",
        doc.locations.len(),
        doc.items.len(),
        doc.npcs.len(),
        doc.player.location
    );
    doc
}

fn location_record(loc: &Location, connections: &[Connection]) -> LocationRecord {
    let mut exits = BTreeMap::new();
    let mut locked_exits = BTreeMap::new();
    for conn in connections {
        let Some((dir, dest)) = exit_of(conn, &loc.id) else {
            continue;
        };
        exits.insert(dir, dest.to_string());
        if let (true, Some(key)) = (conn.locked, &conn.key_id) {
            locked_exits.insert(dir, key.clone());
        }
    }

    LocationRecord {
        id: loc.id.clone(),
        name: loc.name.clone(),
        description: loc.description.clone(),
        items: loc.item_ids.clone(),
        npcs: loc.character_ids.clone(),
        exits,
        locked_exits,
        visited: false,
        discovered_secrets: Vec::new(),
        ambient_mood: loc.mood,
        examine_details: loc.examine_details.clone(),
        revisit_description: None,
    }
}

/// The exit `conn` gives location `id`: its direction there and the far end.
fn exit_of<'a>(conn: &'a Connection, id: &str) -> Option<(Direction, &'a str)> {
    Some((conn.direction_at(id)?, conn.other_end(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mw_core::{ConnectionPatch, LocationPatch, Mood, Position};
    use serde_json::json;

    fn three_rooms() -> GraphStore {
        let mut graph = GraphStore::new();
        for x in [0.0, 200.0, 400.0] {
            graph.add_location(Position::new(x, 0.0)).unwrap();
        }
        graph
    }

    #[test]
    fn empty_graph_uses_fallback_start() {
        let doc = serialize(&GraphStore::new());
        assert_eq!(doc.player.location, "courtyard");
        assert!(doc.player.visited_locations.is_empty());
        assert!(doc.locations.is_empty());
    }

    #[test]
    fn custom_fallback_start() {
        let doc = serialize_with_fallback(&GraphStore::new(), "gatehouse");
        assert_eq!(doc.player.location, "gatehouse");
    }

    #[test]
    fn first_created_location_is_start() {
        let mut graph = three_rooms();
        graph
            .update_location("room_1", LocationPatch::rename("zz_last_alphabetically"))
            .unwrap();
        let doc = serialize(&graph);
        assert_eq!(doc.player.location, "zz_last_alphabetically");
        assert_eq!(doc.player.visited_locations, ["zz_last_alphabetically"]);
    }

    #[test]
    fn exits_derived_from_both_ends() {
        let mut graph = three_rooms();
        graph
            .add_connection(Connection::new("room_1", "room_2", Direction::East, Direction::West))
            .unwrap();
        graph
            .add_connection(Connection::new("room_3", "room_2", Direction::Up, Direction::Down))
            .unwrap();
        let doc = serialize(&graph);

        let hall = &doc.locations["room_2"];
        assert_eq!(hall.exits.len(), 2);
        assert_eq!(hall.exits[&Direction::West], "room_1");
        assert_eq!(hall.exits[&Direction::Down], "room_3");
        assert_eq!(doc.locations["room_1"].exits[&Direction::East], "room_2");
        assert_eq!(doc.locations["room_3"].exits[&Direction::Up], "room_2");
    }

    #[test]
    fn locked_exits_on_both_ends() {
        let mut graph = three_rooms();
        graph
            .add_connection(Connection::new("room_1", "room_2", Direction::North, Direction::South))
            .unwrap();
        graph
            .update_connection("room_1", "room_2", ConnectionPatch::lock("brass_key"))
            .unwrap();
        graph
            .add_connection(Connection::new("room_2", "room_3", Direction::East, Direction::West))
            .unwrap();
        let doc = serialize(&graph);

        assert_eq!(doc.locations["room_1"].locked_exits[&Direction::North], "brass_key");
        assert_eq!(doc.locations["room_2"].locked_exits[&Direction::South], "brass_key");
        assert_eq!(doc.locations["room_2"].locked_exits.len(), 1);
        assert!(doc.locations["room_3"].locked_exits.is_empty());
    }

    #[test]
    fn registries_copied_verbatim() {
        let mut graph = three_rooms();
        graph.attach_item("room_1", "rusty_sword").unwrap();
        graph.attach_character("room_2", "old_wizard").unwrap();
        let doc = serialize(&graph);
        assert_eq!(doc.items["rusty_sword"], *graph.item("rusty_sword").unwrap());
        assert_eq!(doc.npcs["old_wizard"], *graph.character("old_wizard").unwrap());
        assert_eq!(doc.locations["room_1"].items, ["rusty_sword"]);
        assert_eq!(doc.locations["room_2"].npcs, ["old_wizard"]);
    }

    #[test]
    fn wire_format_matches_engine_schema() {
        let mut graph = GraphStore::new();
        graph.add_location(Position::new(0.0, 0.0)).unwrap();
        graph
            .update_location(
                "room_1",
                LocationPatch {
                    mood: Some(Mood::Mysterious),
                    ..LocationPatch::default()
                },
            )
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&serialize(&graph).to_json().unwrap()).unwrap();

        assert_eq!(
            json["locations"]["room_1"],
            json!({
                "id": "room_1",
                "name": "Room 1",
                "description": "A new room.",
                "items": [],
                "npcs": [],
                "exits": {},
                "lockedExits": {},
                "visited": false,
                "discoveredSecrets": [],
                "ambientMood": "mysterious",
                "examineDetails": null,
                "revisitDescription": null
            })
        );
        assert_eq!(json["quests"], json!({}));
        assert_eq!(json["events"], json!([]));
        assert_eq!(json["gameMode"], "exploring");
        assert!(json["combatState"].is_null());
        assert_eq!(json["messageLog"], json!([]));
        assert_eq!(json["combatLog"], json!([]));
        assert!(json["lastNarrativeContext"].is_null());
        assert_eq!(json["initialized"], false);
        assert_eq!(json["difficulty"], "normal");
        for key in ["journal", "recipes", "dialogueHistory", "commandLog"] {
            assert_eq!(json[key], json!([]), "{key}");
        }
    }

    #[test]
    fn document_reparses() {
        let mut graph = three_rooms();
        graph.attach_item("room_2", "lantern").unwrap();
        graph
            .add_connection(Connection::new("room_1", "room_2", Direction::East, Direction::West))
            .unwrap();
        let doc = serialize(&graph);
        let back = WorldDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}
