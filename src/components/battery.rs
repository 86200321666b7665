use bevy_ecs::prelude::Component;

/// Depletable charge carried by an astronaut.
///
/// A charged battery turns a whack into an ejection, and some devices drain
/// it when used.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Battery {
    charge: f32,
    capacity: f32,
}

impl Default for Battery {
    fn default() -> Self {
        Self::full(1.0)
    }
}

impl Battery {
    pub fn full(capacity: f32) -> Self {
        let capacity = capacity.max(0.0);
        Self {
            charge: capacity,
            capacity,
        }
    }

    pub fn empty(capacity: f32) -> Self {
        Self {
            charge: 0.0,
            capacity: capacity.max(0.0),
        }
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn has_charge(&self) -> bool {
        self.charge > 0.0
    }

    /// Empty the battery completely.
    pub fn drain_charge(&mut self) {
        self.charge = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_a_full_battery() {
        let mut battery = Battery::full(2.0);
        assert!(battery.has_charge());
        assert_eq!(battery.charge(), 2.0);
        battery.drain_charge();
        assert!(!battery.has_charge());
        assert_eq!(battery.charge(), 0.0);
    }

    #[test]
    fn empty_battery_has_no_charge() {
        let battery = Battery::empty(1.0);
        assert!(!battery.has_charge());
        assert_eq!(battery, Battery { charge: 0.0, capacity: 1.0 });
    }
}
