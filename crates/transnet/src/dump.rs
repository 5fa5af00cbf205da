// Text dump of a transition network.
//
// Layout:
//   x,y,z                  labels in column order, comma separated
//   S0: x => S1            one line per state 0..=state_count
//   S1: y => SF, z => SF   `SF` marks a terminal edge
//
// A state without outgoing transitions is written as the bare `S<id>`, with
// no `": "` after it.

use std::fmt;

use crate::network::TransitionNetwork;

impl TransitionNetwork {
    /// Render the network in the stable text dump format.
    pub fn print(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TransitionNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for label in self.labels().iter() {
            write!(f, "{separator}{label}")?;
            separator = ",";
        }
        writeln!(f)?;

        for state in self.states() {
            write!(f, "{state}")?;
            let mut separator = ": ";
            for (label, &target) in self.labels().iter().zip(self.row(state)) {
                if target.is_invalid() {
                    continue;
                }
                write!(f, "{separator}{label} => {target}")?;
                separator = ", ";
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{StateId, TransitionNetwork};

    #[test]
    fn shared_prefix_dump() {
        let mut network = TransitionNetwork::new(5, 5).unwrap();
        network.add_path(&["x", "y"]).unwrap();
        network.add_path(&["x", "z"]).unwrap();
        assert_eq!(network.print(), "x,y,z\nS0: x => S1\nS1: y => SF, z => SF\n");
    }

    #[test]
    fn empty_network_dump() {
        let network = TransitionNetwork::new(1, 1).unwrap();
        assert_eq!(network.print(), "\nS0\n");
    }

    #[test]
    fn dead_end_state_has_no_separator() {
        let mut network = TransitionNetwork::new(3, 3).unwrap();
        network.add_transition_to_new_state(StateId::INITIAL, "ab").unwrap();
        assert_eq!(network.print(), "ab\nS0: ab => S1\nS1\n");
    }

    #[test]
    fn columns_follow_insertion_order_not_string_order() {
        let mut network = TransitionNetwork::new(5, 5).unwrap();
        network.add_path(&["zu", "ge"]).unwrap();
        network.add_path(&["an", "ge"]).unwrap();
        assert_eq!(
            network.print(),
            "zu,ge,an\nS0: zu => S1, an => S2\nS1: ge => SF\nS2: ge => SF\n"
        );
    }

    #[test]
    fn display_and_print_agree() {
        let mut network = TransitionNetwork::new(2, 2).unwrap();
        network.add_path(&["a", "b"]).unwrap();
        assert_eq!(format!("{network}"), network.print());
    }
}
