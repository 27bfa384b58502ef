//! Reading machines from their text description.
//!
//! One machine per line:
//!
//! ```text
//! [.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
//! ```
//!
//! The bracketed diagram gives the target lights (`#` on, `.` off), each
//! parenthesised group is a button, and the optional braced group holds
//! the joltage totals.

use std::str::FromStr;

use crate::{Action, Error, LightState, Machine, PsResult, Val};

fn malformed(reason: String) -> Error {
    Error::MalformedMachine(reason)
}

/// Strip the delimiters from a token such as `(1,2)`.
fn delimited(token: &str, open: char, close: char) -> Option<&str> {
    token.strip_prefix(open)?.strip_suffix(close)
}

fn parse_numbers<T: FromStr>(list: &str, token: &str) -> PsResult<Vec<T>> {
    list.split(',')
        .map(|num| {
            num.trim().parse().map_err(|_| {
                malformed(format!("could not parse '{}' in '{}' as a number", num, token))
            })
        })
        .collect()
}

fn parse_diagram(token: &str) -> PsResult<LightState> {
    let inner = delimited(token, '[', ']')
        .ok_or_else(|| malformed(format!("expected a light diagram '[.#]', got '{}'", token)))?;

    let flags = inner
        .chars()
        .map(|c| match c {
            '.' => Ok(false),
            '#' => Ok(true),
            _ => Err(malformed(format!("unexpected '{}' in light diagram '{}'", c, token))),
        })
        .collect::<PsResult<Vec<_>>>()?;

    Ok(LightState::from_flags(&flags))
}

impl FromStr for Machine {
    type Err = Error;

    fn from_str(line: &str) -> PsResult<Self> {
        let mut tokens = line.split_whitespace();

        let target = match tokens.next() {
            Some(token) => parse_diagram(token)?,
            None => return Err(malformed("missing light diagram".to_string())),
        };

        let mut actions = Vec::new();
        let mut joltage: Option<Vec<Val>> = None;

        for token in tokens {
            if joltage.is_some() {
                return Err(malformed(format!("unexpected '{}' after joltage", token)));
            }

            if let Some(list) = delimited(token, '(', ')') {
                let lights = parse_numbers::<usize>(list, token)?;
                actions.push(Action::new(lights)?);
            } else if let Some(list) = delimited(token, '{', '}') {
                joltage = Some(parse_numbers(list, token)?);
            } else {
                return Err(malformed(format!("unrecognised token '{}'", token)));
            }
        }

        Machine::new(target, actions, joltage.unwrap_or_default())
    }
}

/// Parse every non-blank line as a machine.
///
/// # Examples
///
/// ```
/// let machines = machine_solver::parse_machines("[.#] (1) (0,1) {0,2}\n").unwrap();
/// assert_eq!(machines.len(), 1);
/// assert_eq!(machines[0].actions().len(), 2);
/// ```
pub fn parse_machines(input: &str) -> PsResult<Vec<Machine>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.parse().map_err(|e| match e {
                Error::MalformedMachine(reason) => {
                    malformed(format!("line {}: {}", idx + 1, reason))
                }
                other => other,
            })
        })
        .collect()
}
