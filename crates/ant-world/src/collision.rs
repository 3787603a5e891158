//! Same-cell collision detection.

use crate::agent::Agent;
use ant_core::Position;
use std::collections::HashMap;

/// Two or more agents sharing a cell after a movement phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionGroup {
    pub position: Position,
    /// Roster indices of the agents on this cell, ascending
    pub members: Vec<usize>,
}

impl CollisionGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Group agents by position and keep every group of two or more.
///
/// Groups come back ordered by the roster index of their first member, so the
/// order is stable for a given roster.
pub fn detect_collisions(agents: &[Agent]) -> Vec<CollisionGroup> {
    let mut slots: HashMap<Position, usize> = HashMap::with_capacity(agents.len());
    let mut groups: Vec<CollisionGroup> = Vec::new();

    for (index, agent) in agents.iter().enumerate() {
        match slots.get(&agent.position) {
            Some(&slot) => groups[slot].members.push(index),
            None => {
                slots.insert(agent.position, groups.len());
                groups.push(CollisionGroup {
                    position: agent.position,
                    members: vec![index],
                });
            }
        }
    }

    groups.retain(|group| group.size() >= 2);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_core::Heading;

    #[test]
    fn test_no_collisions() {
        let agents = vec![
            Agent::at(0, 0, Heading::Up),
            Agent::at(1, 0, Heading::Up),
            Agent::at(0, 1, Heading::Up),
        ];
        assert!(detect_collisions(&agents).is_empty());
        assert!(detect_collisions(&[]).is_empty());
    }

    #[test]
    fn test_single_group_of_k() {
        let agents = vec![
            Agent::at(2, 2, Heading::Up),
            Agent::at(0, 0, Heading::Left),
            Agent::at(2, 2, Heading::Down),
            Agent::at(2, 2, Heading::Right),
        ];
        let groups = detect_collisions(&agents);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].position, Position::new(2, 2));
        assert_eq!(groups[0].members, vec![0, 2, 3]);
    }

    #[test]
    fn test_groups_ordered_by_first_member() {
        let agents = vec![
            Agent::at(5, 5, Heading::Up),
            Agent::at(-1, -1, Heading::Up),
            Agent::at(-1, -1, Heading::Up),
            Agent::at(5, 5, Heading::Up),
            Agent::at(9, 9, Heading::Up),
        ];
        let groups = detect_collisions(&agents);
        let positions: Vec<Position> = groups.iter().map(|g| g.position).collect();
        assert_eq!(positions, vec![Position::new(5, 5), Position::new(-1, -1)]);
        assert!(groups.iter().all(|g| g.size() == 2));
    }
}
