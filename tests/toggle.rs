//! Fewest presses to light a target pattern.

use machine_solver::*;

fn make_machine(target: &[bool], buttons: &[&[usize]]) -> Machine {
    let actions = buttons
        .iter()
        .map(|lights| Action::new(lights.iter().copied()).expect("button"))
        .collect();
    Machine::new(LightState::from_flags(target), actions, vec![]).expect("machine")
}

#[test]
fn toggle_count_two_presses() {
    let machine = make_machine(&[true, true, true], &[&[0, 2], &[1]]);
    for action in machine.actions() {
        assert_ne!(&LightState::off(3).pressed(action), machine.target());
    }
    assert_eq!(minimum_toggle_count(&machine), Ok(2));
}

#[test]
fn toggle_count_outside_span() {
    let machine = make_machine(&[false, true, true], &[&[0, 2], &[1]]);
    assert_eq!(minimum_toggle_count(&machine), Err(Error::Unreachable));
}

#[test]
fn toggle_count_empty_buttons() {
    let machine = make_machine(&[false, true], &[]);
    assert_eq!(minimum_toggle_count(&machine), Err(Error::Unreachable));

    let machine = make_machine(&[false, false], &[]);
    assert_eq!(minimum_toggle_count(&machine), Ok(0));
}

#[test]
fn toggle_count_finds_shortcut() {
    // Pressing 0, 1, 2 lights everything, but button 3 does it alone.
    let machine = make_machine(
        &[true, true, true, true],
        &[&[0], &[1], &[2, 3], &[0, 1, 2, 3]],
    );
    let known = machine.press_all([0, 1, 2]);
    assert_eq!(&known, machine.target());
    assert_eq!(minimum_toggle_count(&machine), Ok(1));
}

#[test]
fn toggle_count_not_ordered_by_lights_on() {
    // More lights on can take fewer presses when one wide button covers
    // them all.
    let buttons: &[&[usize]] = &[&[0], &[1], &[2], &[0, 1, 2]];
    let far = make_machine(&[true, true, true], buttons);
    let near = make_machine(&[true, true, false], buttons);
    assert_eq!(minimum_toggle_count(&far), Ok(1));
    assert_eq!(minimum_toggle_count(&near), Ok(2));
}

#[test]
fn toggle_count_visits_bounded_states() {
    let machine = make_machine(&[true; 6], &[&[0, 1], &[2, 3], &[4, 5], &[1, 2], &[3, 4]]);
    let mut search = ToggleSearch::new(&machine, SearchLimits::default());
    assert_eq!(search.run(), Ok(3));
    assert!(search.states_visited() <= 1 << 5);
}
