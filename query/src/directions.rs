//! Turn-by-turn steps derived from path segments.

use navgraph::CampusMap;
use serde::Serialize;
use wayfinder_core::model::{FloorId, MapObjectType, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Stairs,
    Elevator,
}

impl TransitionKind {
    fn from_type(object_type: MapObjectType) -> Option<Self> {
        match object_type {
            MapObjectType::Stairs => Some(TransitionKind::Stairs),
            MapObjectType::Elevator => Some(TransitionKind::Elevator),
            MapObjectType::Room
            | MapObjectType::Toilet
            | MapObjectType::Canteen
            | MapObjectType::Atm
            | MapObjectType::Lecture => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum RouteStep {
    Walk {
        floor: Option<FloorId>,
        from: Option<String>,
        to: Option<String>,
        distance: f64,
    },
    ChangeFloor {
        via: Option<String>,
        kind: Option<TransitionKind>,
        direction: Direction,
        from_floor: FloorId,
        to_floor: FloorId,
    },
}

pub fn directions(map: &CampusMap, segments: &[Vec<Vertex>]) -> Vec<RouteStep> {
    let unpacked = map.unpacked();
    let floor_of = |v: &Vertex| unpacked.floor_of(&v.id).cloned();
    let name_of = |v: &Vertex| map.object_of_vertex(v).map(|o| o.name.clone());

    let mut steps: Vec<RouteStep> = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        let Some(first) = segment.first() else {
            continue;
        };

        if i > 0 {
            if let Some(prev_last) = segments[i - 1].last() {
                if let (Some(from_floor), Some(to_floor)) = (floor_of(prev_last), floor_of(first)) {
                    if from_floor != to_floor {
                        push_floor_change(&mut steps, map, prev_last, first, from_floor, to_floor);
                    }
                }
            }
        }

        if segment.len() >= 2 {
            let last = &segment[segment.len() - 1];
            let distance: f64 = segment
                .windows(2)
                .map(|pair| unpacked.edge_weight(&pair[0].id, &pair[1].id).unwrap_or(0.0))
                .sum();
            steps.push(RouteStep::Walk {
                floor: floor_of(first),
                from: name_of(first),
                to: name_of(last),
                distance,
            });
        }
    }
    steps
}

fn push_floor_change(
    steps: &mut Vec<RouteStep>,
    map: &CampusMap,
    leaving: &Vertex,
    arriving: &Vertex,
    from_floor: FloorId,
    to_floor: FloorId,
) {
    let transition = [leaving, arriving]
        .into_iter()
        .filter_map(|v| map.object_of_vertex(v))
        .find(|o| o.object_type.is_transition());
    let kind = transition.and_then(|o| TransitionKind::from_type(o.object_type));
    let via = transition.map(|o| o.name.clone());
    let direction = if to_floor > from_floor {
        Direction::Up
    } else {
        Direction::Down
    };

    // Riding the same stairs or elevator through several floors is one step.
    if let Some(RouteStep::ChangeFloor {
        via: prev_via,
        direction: prev_direction,
        to_floor: prev_to,
        ..
    }) = steps.last_mut()
    {
        if *prev_via == via && *prev_direction == direction && *prev_to == from_floor {
            *prev_to = to_floor;
            return;
        }
    }

    steps.push(RouteStep::ChangeFloor {
        via,
        kind,
        direction,
        from_floor,
        to_floor,
    });
}
