use navgraph::CampusMap;
use query::{Direction, RouteEngine, RouteStep, TransitionKind};
use wayfinder_core::model::{MapObjectType, Vertex};

const TWO_FLOORS: &str = r#"{
    "floors": {
        "1": {
            "vertices": [
                {"id": "v1", "x": 0, "y": 0, "mapObjectId": "r1"},
                {"id": "v2", "x": 0, "y": 10, "mapObjectId": "s1"}
            ],
            "edges": [{"source": "v1", "target": "v2", "weight": 10}]
        },
        "2": {
            "vertices": [
                {"id": "v3", "x": 0, "y": 0, "mapObjectId": "s1"},
                {"id": "v4", "x": 5, "y": 0, "mapObjectId": "r2"}
            ],
            "edges": [
                {"source": "v3", "target": "v4", "weight": 5},
                {"source": "v2", "target": "s1", "weight": 0, "toNextFloor": true}
            ]
        }
    },
    "objects": [
        {"id": "r1", "type": "room", "name": "101"},
        {"id": "s1", "type": "stairs", "name": "Stairs"},
        {"id": "r2", "type": "room", "name": "201"}
    ]
}"#;

/// Corridor c0..c4 on one floor with toilets hanging off it at growing
/// distances, plus an isolated toilet and a toilet with no vertex at all.
const TOILETS: &str = r#"{
    "floors": {
        "1": {
            "vertices": [
                {"id": "start", "x": 0, "y": 0, "mapObjectId": "room"},
                {"id": "c1", "x": 10, "y": 0},
                {"id": "c2", "x": 20, "y": 0},
                {"id": "c3", "x": 30, "y": 0},
                {"id": "t_far", "x": 30, "y": 5, "mapObjectId": "toilet_far"},
                {"id": "t_mid", "x": 20, "y": 5, "mapObjectId": "toilet_mid"},
                {"id": "t_near", "x": 10, "y": 5, "mapObjectId": "toilet_near"},
                {"id": "t_island", "x": 1, "y": 1, "mapObjectId": "toilet_island"}
            ],
            "edges": [
                {"source": "start", "target": "c1", "weight": 10},
                {"source": "c1", "target": "c2", "weight": 10},
                {"source": "c2", "target": "c3", "weight": 10},
                {"source": "c3", "target": "t_far", "weight": 5},
                {"source": "c2", "target": "t_mid", "weight": 5},
                {"source": "c1", "target": "t_near", "weight": 5}
            ]
        }
    },
    "objects": [
        {"id": "room", "type": "room", "name": "А-101"},
        {"id": "toilet_far", "type": "toilet", "name": "WC 3"},
        {"id": "toilet_mid", "type": "toilet", "name": "WC 2"},
        {"id": "toilet_near", "type": "toilet", "name": "WC 1"},
        {"id": "toilet_island", "type": "toilet", "name": "WC 0"},
        {"id": "toilet_ghost", "type": "toilet", "name": "WC X"}
    ]
}"#;

fn ids(path: &[Vertex]) -> Vec<&str> {
    path.iter().map(|v| v.id.as_str()).collect()
}

#[test]
fn test_end_to_end_two_floor_route() {
    let map = CampusMap::from_json_str(TWO_FLOORS).unwrap();
    let engine = RouteEngine::new(&map);
    let r1 = map.object_by_id("r1").unwrap();
    let r2 = map.object_by_id("r2").unwrap();

    let path = engine.shortest_path(r1, r2).unwrap();
    assert_eq!(ids(&path), vec!["v1", "v2", "v3", "v4"]);
    assert_eq!(engine.path_weight(&path), 15.0);

    let segments = engine.shortest_path_by_segments(r1, r2).unwrap();
    let segment_ids: Vec<Vec<&str>> = segments.iter().map(|s| ids(s)).collect();
    assert_eq!(segment_ids, vec![vec!["v1", "v2"], vec!["v3", "v4"]]);
}

#[test]
fn test_route_is_walkable_in_both_directions() {
    let map = CampusMap::from_json_str(TWO_FLOORS).unwrap();
    let engine = RouteEngine::new(&map);
    let r1 = map.object_by_id("r1").unwrap();
    let r2 = map.object_by_id("r2").unwrap();

    let path = engine.shortest_path(r2, r1).unwrap();
    assert_eq!(path.first().unwrap().map_object_id.as_deref(), Some("r2"));
    assert_eq!(path.last().unwrap().map_object_id.as_deref(), Some("r1"));
    for pair in path.windows(2) {
        assert!(
            map.unpacked().edge_weight(&pair[0].id, &pair[1].id).is_some(),
            "no edge between {} and {}",
            pair[0].id,
            pair[1].id
        );
    }
}

#[test]
fn test_unreachable_objects_yield_none() {
    let map = CampusMap::from_json_str(TOILETS).unwrap();
    let engine = RouteEngine::new(&map);
    let room = map.object_by_id("room").unwrap();

    let island = map.object_by_id("toilet_island").unwrap();
    assert!(engine.shortest_path(room, island).is_none());
    assert!(engine.shortest_path_by_segments(room, island).is_none());

    let ghost = map.object_by_id("toilet_ghost").unwrap();
    assert!(engine.shortest_path(room, ghost).is_none());
    assert!(engine.route("room", "missing").is_none());
}

#[test]
fn test_same_object_route_is_single_vertex() {
    let map = CampusMap::from_json_str(TWO_FLOORS).unwrap();
    let engine = RouteEngine::new(&map);
    let r1 = map.object_by_id("r1").unwrap();

    let segments = engine.shortest_path_by_segments(r1, r1).unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(ids(&segments[0]), vec!["v1"]);
}

#[test]
fn test_nearest_toilet() {
    let map = CampusMap::from_json_str(TOILETS).unwrap();
    let engine = RouteEngine::new(&map);
    let room = map.object_by_id("room").unwrap();

    let nearest = engine
        .nearest_by_type(room, MapObjectType::Toilet, &[])
        .unwrap();
    assert_eq!(nearest.id, "toilet_near");

    let names = vec!["WC 2".to_string(), "WC 3".to_string(), "WC 0".to_string()];
    let nearest = engine
        .nearest_by_type(room, MapObjectType::Toilet, &names)
        .unwrap();
    assert_eq!(nearest.id, "toilet_mid");

    let names = vec!["WC 0".to_string()];
    assert!(engine
        .nearest_by_type(room, MapObjectType::Toilet, &names)
        .is_none());
    assert!(engine
        .nearest_by_type(room, MapObjectType::Canteen, &[])
        .is_none());
}

#[test]
fn test_nearest_skips_start_object() {
    let map = CampusMap::from_json_str(TOILETS).unwrap();
    let engine = RouteEngine::new(&map);
    let near = map.object_by_id("toilet_near").unwrap();

    let nearest = engine
        .nearest_by_type(near, MapObjectType::Toilet, &[])
        .unwrap();
    assert_eq!(nearest.id, "toilet_mid");
}

#[test]
fn test_route_directions() {
    let map = CampusMap::from_json_str(TWO_FLOORS).unwrap();
    let route = RouteEngine::new(&map).route("r1", "r2").unwrap();

    assert_eq!(route.total_weight, 15.0);
    assert_eq!(route.segments.len(), 2);
    assert_eq!(route.steps.len(), 3);

    match &route.steps[0] {
        RouteStep::Walk { floor, from, to, distance } => {
            assert_eq!(floor.as_ref().unwrap().as_str(), "1");
            assert_eq!(from.as_deref(), Some("101"));
            assert_eq!(to.as_deref(), Some("Stairs"));
            assert_eq!(*distance, 10.0);
        }
        other => panic!("expected walk, got {other:?}"),
    }
    match &route.steps[1] {
        RouteStep::ChangeFloor { via, kind, direction, from_floor, to_floor } => {
            assert_eq!(via.as_deref(), Some("Stairs"));
            assert_eq!(*kind, Some(TransitionKind::Stairs));
            assert_eq!(*direction, Direction::Up);
            assert_eq!(from_floor.as_str(), "1");
            assert_eq!(to_floor.as_str(), "2");
        }
        other => panic!("expected floor change, got {other:?}"),
    }

    let back = RouteEngine::new(&map).route("r2", "r1").unwrap();
    assert!(back.steps.iter().any(|step| matches!(
        step,
        RouteStep::ChangeFloor { direction: Direction::Down, .. }
    )));

    let json = serde_json::to_value(&route).unwrap();
    assert_eq!(json["steps"][1]["step"], "change_floor");
    assert_eq!(json["steps"][1]["direction"], "up");
}

#[test]
fn test_path_weight_counts_missing_edges_as_zero() {
    let map = CampusMap::from_json_str(TWO_FLOORS).unwrap();
    let engine = RouteEngine::new(&map);
    let unpacked = map.unpacked();
    let v1 = unpacked.vertex("v1").cloned().unwrap();
    let v2 = unpacked.vertex("v2").cloned().unwrap();
    let v4 = unpacked.vertex("v4").cloned().unwrap();

    assert_eq!(engine.path_weight(&[v1.clone(), v4.clone()]), 0.0);
    assert_eq!(engine.path_weight(&[v1, v2, v4]), 10.0);
}
