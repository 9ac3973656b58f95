//! Probes: position, heading, and the plateau they roam.

use serde::Serialize;
use uuid::Uuid;

use super::commands::CommandError;
use super::{Heading, Plateau};

/// An exploratory probe on the plateau.
///
/// The position stays within the plateau's bounds; every mutation
/// re-checks that invariant. Reconstruction from a stored record trusts
/// the stored position as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub id: Uuid,
    pub x: i64,
    pub y: i64,
    pub heading: Heading,
    pub plateau: Plateau,
}

impl Probe {
    /// A freshly launched probe at the plateau origin.
    pub fn launched(id: Uuid, plateau: Plateau, heading: Heading) -> Self {
        Self {
            id,
            x: 0,
            y: 0,
            heading,
            plateau,
        }
    }

    /// Moves one step in the current heading.
    ///
    /// Fails with [`CommandError::OutOfBounds`] when the step would leave
    /// the plateau; the stored position is unchanged on that path.
    pub fn step_forward(&mut self) -> Result<(), CommandError> {
        let (dx, dy) = self.heading.displacement();
        let x = self.x + dx;
        let y = self.y + dy;

        if !self.plateau.contains(x, y) {
            return Err(CommandError::OutOfBounds {
                x,
                y,
                max_x: self.plateau.max_x(),
                max_y: self.plateau.max_y(),
            });
        }

        self.x = x;
        self.y = y;
        Ok(())
    }

    /// Rotates 90° counter-clockwise. Position untouched.
    pub fn turn_left(&mut self) {
        self.heading = self.heading.turn_left();
    }

    /// Rotates 90° clockwise. Position untouched.
    pub fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
    }

    /// A pure read of the probe's externally visible state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id,
            x: self.x,
            y: self.y,
            heading: self.heading,
        }
    }
}

/// A probe's state shaped for external display.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub id: Uuid,
    pub x: i64,
    pub y: i64,
    pub heading: Heading,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_at(x: i64, y: i64, heading: Heading) -> Probe {
        Probe {
            id: Uuid::new_v4(),
            x,
            y,
            heading,
            plateau: Plateau::new(5, 5).unwrap(),
        }
    }

    #[test]
    fn launched_probe_sits_at_origin() {
        let plateau = Plateau::new(5, 5).unwrap();
        let probe = Probe::launched(Uuid::new_v4(), plateau, Heading::North);
        assert_eq!((probe.x, probe.y), (0, 0));
        assert_eq!(probe.heading, Heading::North);
    }

    #[test]
    fn step_north_increases_y() {
        let mut probe = probe_at(0, 0, Heading::North);
        probe.step_forward().unwrap();
        assert_eq!((probe.x, probe.y), (0, 1));
        assert_eq!(probe.heading, Heading::North);
    }

    #[test]
    fn step_east_increases_x() {
        let mut probe = probe_at(0, 0, Heading::East);
        probe.step_forward().unwrap();
        assert_eq!((probe.x, probe.y), (1, 0));
    }

    #[test]
    fn step_south_decreases_y() {
        let mut probe = probe_at(0, 1, Heading::South);
        probe.step_forward().unwrap();
        assert_eq!((probe.x, probe.y), (0, 0));
    }

    #[test]
    fn step_west_decreases_x() {
        let mut probe = probe_at(1, 0, Heading::West);
        probe.step_forward().unwrap();
        assert_eq!((probe.x, probe.y), (0, 0));
    }

    #[test]
    fn step_off_the_plateau_fails_and_preserves_position() {
        let mut probe = probe_at(0, 0, Heading::South);
        let err = probe.step_forward().unwrap_err();

        assert_eq!(
            err,
            CommandError::OutOfBounds {
                x: 0,
                y: -1,
                max_x: 5,
                max_y: 5,
            }
        );
        assert_eq!((probe.x, probe.y), (0, 0));
        assert_eq!(probe.heading, Heading::South);
    }

    #[test]
    fn turns_replace_the_heading() {
        let mut probe = probe_at(0, 0, Heading::North);
        probe.turn_left();
        assert_eq!(probe.heading, Heading::West);
        probe.turn_right();
        probe.turn_right();
        assert_eq!(probe.heading, Heading::East);
    }

    #[test]
    fn snapshot_reads_without_mutating() {
        let probe = probe_at(2, 3, Heading::East);
        let snapshot = probe.snapshot();
        assert_eq!(snapshot.id, probe.id);
        assert_eq!((snapshot.x, snapshot.y), (2, 3));
        assert_eq!(snapshot.heading, Heading::East);
    }
}
