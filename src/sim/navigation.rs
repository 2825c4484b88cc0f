//! Lane Navigation
//!
//! Moves lane followers along their team's waypoint path. Navigation only
//! runs for units without an attack target; combat takes priority over
//! pushing the lane.

use bevy::prelude::*;

use super::components::{LaneFollower, LanePaths, SimulationSpeed, Unit};
use super::constants::WAYPOINT_ARRIVAL_THRESHOLD;

/// Advances each idle lane follower toward its current waypoint.
///
/// A follower that closes within the arrival threshold moves on to the next
/// waypoint; one that has walked off the end of its path holds position.
pub fn follow_lane_waypoints(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    paths: Res<LanePaths>,
    mut followers: Query<(&Unit, &mut LaneFollower, &mut Transform)>,
) {
    if speed.is_paused() {
        return;
    }
    let delta = time.delta_secs() * speed.multiplier;

    for (unit, mut follower, mut transform) in followers.iter_mut() {
        if !unit.is_alive() || unit.target.is_some() {
            continue;
        }
        let Some(waypoints) = paths.get(unit.team, follower.lane) else {
            continue;
        };
        let Some(&waypoint) = waypoints.get(follower.waypoint_index) else {
            // Past the end of the path; hold position.
            continue;
        };

        let to_waypoint = waypoint - transform.translation;
        let distance = to_waypoint.length();
        if distance < WAYPOINT_ARRIVAL_THRESHOLD {
            follower.waypoint_index += 1;
            continue;
        }

        let move_speed = movement_speed_of(unit);
        let step = (move_speed * delta).min(distance);
        transform.translation += to_waypoint / distance * step;
    }
}

/// Movement speed for a lane-following unit kind.
fn movement_speed_of(unit: &Unit) -> f32 {
    use super::components::UnitKind;
    use super::constants::{CHAMPION_MOVE_SPEED, MINION_MOVE_SPEED};
    match unit.kind {
        UnitKind::Champion => CHAMPION_MOVE_SPEED,
        UnitKind::Minion => MINION_MOVE_SPEED,
        // Structures never move.
        UnitKind::Tower | UnitKind::Nexus => 0.0,
    }
}
