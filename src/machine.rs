//! The machine description: target lights, buttons and joltages.

use bit_set::BitSet;
use std::fmt;

use crate::{Error, PsResult, Val};

/// A row of indicator lights.
///
/// Equality and hashing are by value, so a light state can be used as a
/// key when deduplicating searched configurations.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LightState {
    // The lit positions.
    on: BitSet,

    // The number of lights in the row.
    len: usize,
}

/// A button: the set of lights it toggles when pressed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Action {
    lights: BitSet,
}

/// A machine to be started.
#[derive(Clone, Debug)]
pub struct Machine {
    target: LightState,
    actions: Vec<Action>,

    // Required joltage per light; empty if the machine has none.
    joltage: Vec<Val>,
}

/*--------------------------------------------------------------*/

impl LightState {
    /// A row of `len` lights, all off.
    pub fn off(len: usize) -> Self {
        LightState {
            on: BitSet::with_capacity(len),
            len,
        }
    }

    /// Build a row from one flag per light.
    ///
    /// # Examples
    ///
    /// ```
    /// let lights = machine_solver::LightState::from_flags(&[false, true, true]);
    /// assert_eq!(lights.to_string(), "[.##]");
    /// ```
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut state = Self::off(flags.len());
        for (idx, &flag) in flags.iter().enumerate() {
            if flag {
                state.on.insert(idx);
            }
        }
        state
    }

    /// The number of lights in the row.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if a light is on.
    pub fn is_on(&self, light: usize) -> bool {
        self.on.contains(light)
    }

    /// The number of lights that are on.
    pub fn count_on(&self) -> usize {
        self.on.len()
    }

    /// Check if every light is off.
    pub fn is_all_off(&self) -> bool {
        self.on.is_empty()
    }

    /// The number of positions where two rows differ.
    pub fn distance(&self, other: &LightState) -> usize {
        self.on.symmetric_difference(&other.on).count()
    }

    /// Toggle the lights named by the action, in place.
    pub fn toggle(&mut self, action: &Action) {
        self.on.symmetric_difference_with(&action.lights);
    }

    /// The row after pressing the action once.
    pub fn pressed(&self, action: &Action) -> LightState {
        let mut next = self.clone();
        next.toggle(action);
        next
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for idx in 0..self.len {
            write!(f, "{}", if self.is_on(idx) { '#' } else { '.' })?;
        }
        write!(f, "]")
    }
}

/*--------------------------------------------------------------*/

impl Action {
    /// Allocate a button toggling the given lights.
    ///
    /// Naming the same light twice is rejected: a button is a set.
    pub fn new<I>(lights: I) -> PsResult<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = BitSet::new();
        for light in lights {
            if !set.insert(light) {
                return Err(Error::MalformedMachine(format!(
                    "button names light {} twice",
                    light
                )));
            }
        }

        Ok(Action { lights: set })
    }

    /// Check if the button affects a light.
    pub fn affects(&self, light: usize) -> bool {
        self.lights.contains(light)
    }

    /// Iterate over the affected lights in increasing order.
    pub fn lights(&self) -> impl Iterator<Item = usize> + '_ {
        self.lights.iter()
    }

    /// The number of lights affected.
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

/*--------------------------------------------------------------*/

impl Machine {
    /// Allocate a machine, checking the data-model invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_solver::{Action, LightState, Machine};
    ///
    /// let machine = Machine::new(
    ///     LightState::from_flags(&[true, true, true]),
    ///     vec![Action::new([0, 2]).unwrap(), Action::new([1]).unwrap()],
    ///     vec![],
    /// );
    /// assert!(machine.is_ok());
    /// ```
    pub fn new(target: LightState, actions: Vec<Action>, joltage: Vec<Val>) -> PsResult<Self> {
        let num_lights = target.len();

        for (idx, action) in actions.iter().enumerate() {
            if let Some(light) = action.lights().find(|&light| light >= num_lights) {
                return Err(Error::MalformedMachine(format!(
                    "button {} names light {}, but only {} lights exist",
                    idx, light, num_lights
                )));
            }
        }

        if !joltage.is_empty() && joltage.len() != num_lights {
            return Err(Error::MalformedMachine(format!(
                "{} joltage values given for {} lights",
                joltage.len(),
                num_lights
            )));
        }

        if let Some(&val) = joltage.iter().find(|&&val| val < 0) {
            return Err(Error::MalformedMachine(format!(
                "joltage {} is negative",
                val
            )));
        }

        Ok(Machine {
            target,
            actions,
            joltage,
        })
    }

    /// The number of lights.
    pub fn num_lights(&self) -> usize {
        self.target.len()
    }

    /// The light pattern that starts the machine.
    pub fn target(&self) -> &LightState {
        &self.target
    }

    /// The buttons, in declaration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The joltage totals, one per light, or empty.
    pub fn joltage(&self) -> &[Val] {
        &self.joltage
    }

    /// For each light, the set of buttons (by index) that affect it.
    pub fn incidence(&self) -> Vec<BitSet> {
        let mut incidence = vec![BitSet::with_capacity(self.actions.len()); self.num_lights()];
        for (idx, action) in self.actions.iter().enumerate() {
            for light in action.lights() {
                incidence[light].insert(idx);
            }
        }
        incidence
    }

    /// The light pattern obtained by pressing the given buttons (by
    /// index) in order, starting from all off.
    pub fn press_all<I>(&self, presses: I) -> LightState
    where
        I: IntoIterator<Item = usize>,
    {
        let mut state = LightState::off(self.num_lights());
        for idx in presses {
            state.toggle(&self.actions[idx]);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, LightState, Machine};
    use crate::Error;

    #[test]
    fn test_press_toggles_named_lights() {
        let lights = LightState::from_flags(&[true, true, false]);
        let action = Action::new([0, 2]).unwrap();
        assert_eq!(
            lights.pressed(&action),
            LightState::from_flags(&[false, true, true])
        );
    }

    #[test]
    fn test_press_twice_is_identity() {
        let lights = LightState::from_flags(&[true, false, true, true]);
        let action = Action::new([1, 3]).unwrap();
        assert_eq!(lights.pressed(&action).pressed(&action), lights);
    }

    #[test]
    fn test_structural_equality() {
        // Two rows built along different paths compare and hash equal.
        let mut a = LightState::off(4);
        a.toggle(&Action::new([0, 1, 2]).unwrap());
        a.toggle(&Action::new([1, 2]).unwrap());
        let b = LightState::from_flags(&[true, false, false, false]);
        assert_eq!(a, b);

        let mut seen = std::collections::HashSet::new();
        seen.insert(a);
        assert!(seen.contains(&b));
    }

    #[test]
    fn test_duplicate_light_rejected() {
        assert!(matches!(
            Action::new([1, 1]),
            Err(Error::MalformedMachine(_))
        ));
    }

    #[test]
    fn test_light_out_of_range_rejected() {
        let result = Machine::new(
            LightState::off(2),
            vec![Action::new([0, 2]).unwrap()],
            vec![],
        );
        assert!(matches!(result, Err(Error::MalformedMachine(_))));
    }

    #[test]
    fn test_joltage_length_mismatch_rejected() {
        let result = Machine::new(
            LightState::off(2),
            vec![Action::new([0]).unwrap()],
            vec![1, 2, 3],
        );
        assert!(matches!(result, Err(Error::MalformedMachine(_))));
    }

    #[test]
    fn test_incidence() {
        let machine = Machine::new(
            LightState::off(3),
            vec![Action::new([0, 2]).unwrap(), Action::new([2]).unwrap()],
            vec![1, 0, 2],
        )
        .unwrap();

        let incidence = machine.incidence();
        assert_eq!(incidence[0].iter().collect::<Vec<_>>(), vec![0]);
        assert!(incidence[1].is_empty());
        assert_eq!(incidence[2].iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_display() {
        let lights = LightState::from_flags(&[false, true, true, false]);
        assert_eq!(lights.to_string(), "[.##.]");
        assert_eq!(lights.count_on(), 2);
        assert_eq!(lights.distance(&LightState::off(4)), 2);
    }

    #[test]
    fn test_all_off() {
        assert!(LightState::off(3).is_all_off());
        assert!(LightState::off(0).is_all_off());

        let action = Action::new([1]).unwrap();
        let lit = LightState::off(3).pressed(&action);
        assert!(!lit.is_all_off());
        assert!(lit.pressed(&action).is_all_off());
    }
}
